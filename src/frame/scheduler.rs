use std::fmt;

/// Callback run once when its frame is painted.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Identifies one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Platform paint-frame primitive.
///
/// `schedule_frame` must not invoke the callback before returning; callbacks
/// run on a later turn of the host's loop. Cancelling a token that already
/// fired or was never issued is a no-op.
pub trait FrameScheduler {
    fn schedule_frame(&self, callback: FrameCallback) -> FrameToken;

    fn cancel_frame(&self, token: FrameToken);
}
