//! Counter component hosted by the terminal demo.

use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use framebind::{Component, Effect, EffectError, Handle, HostElement, Transition};

use super::screen::{Button, Screen};

const DELAY: Duration = Duration::from_millis(750);
const FETCH_LATENCY: Duration = Duration::from_millis(300);
const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct CounterState {
    pub count: i64,
    pub step: i64,
    /// Delayed increments still in flight.
    pub pending: u32,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterMessage {
    Increment,
    Decrement,
    Reset,
    IncrementLater,
    DelayedIncrement,
    Fetch,
    FetchFailed(String),
    SetStep(i64),
}

pub struct Counter;

impl Counter {
    fn next(state: &CounterState, change: impl FnOnce(&mut CounterState)) -> Rc<CounterState> {
        let mut next = state.clone();
        change(&mut next);
        Rc::new(next)
    }
}

impl Component for Counter {
    type State = CounterState;
    type Message = CounterMessage;
    type View = Screen;
    type Event = KeyEvent;

    fn init(&self, host: &HostElement) -> Transition<CounterState, CounterMessage> {
        let state = CounterState {
            count: host.parse_attribute("start").unwrap_or(0),
            step: host.parse_attribute("step").unwrap_or(1),
            pending: 0,
            status: None,
        };
        (Rc::new(state), None)
    }

    fn update(
        &self,
        state: &Rc<CounterState>,
        message: CounterMessage,
    ) -> Transition<CounterState, CounterMessage> {
        match message {
            CounterMessage::Increment => (Self::next(state, |s| s.count += s.step), None),
            CounterMessage::Decrement => (Self::next(state, |s| s.count -= s.step), None),
            CounterMessage::Reset if state.count == 0 && state.status.is_none() => {
                (Rc::clone(state), None)
            }
            CounterMessage::Reset => (
                Self::next(state, |s| {
                    s.count = 0;
                    s.status = None;
                }),
                None,
            ),
            CounterMessage::IncrementLater => (
                Self::next(state, |s| s.pending += 1),
                Some(Effect::after(DELAY, CounterMessage::DelayedIncrement)),
            ),
            CounterMessage::DelayedIncrement => (
                Self::next(state, |s| {
                    s.count += s.step;
                    s.pending = s.pending.saturating_sub(1);
                }),
                None,
            ),
            // The remote counter is never reachable; the failure comes back
            // through `effect_failed`.
            CounterMessage::Fetch => (
                Rc::clone(state),
                Some(
                    Effect::try_new(async {
                        tokio::time::sleep(FETCH_LATENCY).await;
                        Err::<Option<CounterMessage>, _>(anyhow::anyhow!(
                            "remote counter unavailable"
                        ))
                    })
                    .timeout(FETCH_TIMEOUT),
                ),
            ),
            CounterMessage::FetchFailed(reason) => {
                (Self::next(state, |s| s.status = Some(reason)), None)
            }
            CounterMessage::SetStep(step) if step == state.step => (Rc::clone(state), None),
            CounterMessage::SetStep(step) => (Self::next(state, |s| s.step = step), None),
        }
    }

    fn mount(&self, view: &mut Screen, state: &CounterState, handle: &Handle<CounterMessage>) {
        view.title = "framebind counter".to_string();
        view.buttons = vec![
            Button::new('+', "increment", handle.callback(|()| CounterMessage::Increment)),
            Button::new('-', "decrement", handle.callback(|()| CounterMessage::Decrement)),
            Button::new('r', "reset", handle.callback(|()| CounterMessage::Reset)),
        ];
        view.lines = lines(state);
        view.mounts += 1;
    }

    fn redraw(
        &self,
        view: &mut Screen,
        _prev: &CounterState,
        next: &CounterState,
        _handle: &Handle<CounterMessage>,
    ) {
        view.lines = lines(next);
        view.redraws += 1;
    }

    fn event(&self, key: &KeyEvent) -> Option<CounterMessage> {
        match key.code {
            KeyCode::Up => Some(CounterMessage::Increment),
            KeyCode::Down => Some(CounterMessage::Decrement),
            KeyCode::Char('d') => Some(CounterMessage::IncrementLater),
            KeyCode::Char('f') => Some(CounterMessage::Fetch),
            _ => None,
        }
    }

    fn observed_attributes(&self) -> &[&'static str] {
        &["step"]
    }

    fn attribute_changed(&self, name: &str, value: Option<&str>) -> Option<CounterMessage> {
        match name {
            "step" => Some(CounterMessage::SetStep(
                value.and_then(|v| v.trim().parse().ok()).unwrap_or(1),
            )),
            _ => None,
        }
    }

    fn effect_failed(&self, error: EffectError) -> Option<CounterMessage> {
        Some(CounterMessage::FetchFailed(error.to_string()))
    }
}

fn lines(state: &CounterState) -> Vec<String> {
    let mut lines = vec![
        format!("count: {}", state.count),
        format!("step:  {}", state.step),
    ];
    if state.pending > 0 {
        lines.push(format!("delayed increments in flight: {}", state.pending));
    }
    if let Some(status) = &state.status {
        lines.push(format!("last error: {}", status));
    }
    lines
}
