//! Shared test component and helpers.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use framebind::{
    Component, ComponentInstance, Effect, EffectError, Handle, HostElement, QueuedFrames,
    Transition,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub value: i64,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// New state unless already at the value.
    Set(i64),
    /// Always a new state, even for `Add(0)`.
    Add(i64),
    /// Same state, no effect.
    Same,
    /// Same state; effect yields `Loaded(v)` on the next turn.
    Load(i64),
    /// Same state; effect yields `Loaded(v)` after `ms` milliseconds.
    Later(i64, u64),
    Loaded(i64),
    /// Same state; effect fails with the given reason.
    Fail(&'static str),
    Failed(String),
    /// Same state; effect yields no message.
    Nothing,
}

/// Everything a view writer saw, plus the handle it was given.
#[derive(Debug, Default)]
pub struct Recorder {
    pub mounts: Vec<i64>,
    pub redraws: Vec<(i64, i64)>,
    pub handle: Option<Handle<Msg>>,
}

pub type UpdateLog = Rc<RefCell<Vec<(i64, Msg)>>>;

/// Test component recording every `update` call as `(state before, message)`.
#[derive(Default)]
pub struct Probe {
    pub updates: UpdateLog,
    init_effect: Option<Msg>,
    mount_message: Option<Msg>,
    echo: Option<(i64, Msg)>,
}

impl Probe {
    pub fn new() -> (Self, UpdateLog) {
        let probe = Self::default();
        let log = Rc::clone(&probe.updates);
        (probe, log)
    }

    /// `init` returns an effect resolving to `message`.
    pub fn with_init_effect(mut self, message: Msg) -> Self {
        self.init_effect = Some(message);
        self
    }

    /// The mount writer sends `message` through its handle.
    pub fn with_mount_message(mut self, message: Msg) -> Self {
        self.mount_message = Some(message);
        self
    }

    /// The redraw writer sends `message` when it draws `value`.
    pub fn with_echo(mut self, value: i64, message: Msg) -> Self {
        self.echo = Some((value, message));
        self
    }
}

fn count(value: i64, status: Option<String>) -> Rc<Count> {
    Rc::new(Count { value, status })
}

impl Component for Probe {
    type State = Count;
    type Message = Msg;
    type View = Recorder;
    type Event = &'static str;

    fn init(&self, host: &HostElement) -> Transition<Count, Msg> {
        let value = host.parse_attribute("value").unwrap_or(0);
        let effect = self.init_effect.clone().map(Effect::message);
        (count(value, None), effect)
    }

    fn update(&self, state: &Rc<Count>, message: Msg) -> Transition<Count, Msg> {
        self.updates.borrow_mut().push((state.value, message.clone()));
        let same = Rc::clone(state);
        match message {
            Msg::Set(value) if value == state.value => (same, None),
            Msg::Set(value) | Msg::Loaded(value) => (count(value, state.status.clone()), None),
            Msg::Add(delta) => (count(state.value + delta, state.status.clone()), None),
            Msg::Same => (same, None),
            Msg::Load(value) => (same, Some(Effect::message(Msg::Loaded(value)))),
            Msg::Later(value, ms) => (
                same,
                Some(Effect::after(Duration::from_millis(ms), Msg::Loaded(value))),
            ),
            Msg::Fail(reason) => (
                same,
                Some(Effect::try_new(async move {
                    Err::<Option<Msg>, _>(anyhow::anyhow!(reason))
                })),
            ),
            Msg::Failed(reason) => (count(state.value, Some(reason)), None),
            Msg::Nothing => (same, Some(Effect::new(async { None }))),
        }
    }

    fn mount(&self, view: &mut Recorder, state: &Count, handle: &Handle<Msg>) {
        view.mounts.push(state.value);
        view.handle = Some(handle.clone());
        if let Some(message) = &self.mount_message {
            handle.send(message.clone());
        }
    }

    fn redraw(&self, view: &mut Recorder, prev: &Count, next: &Count, handle: &Handle<Msg>) {
        view.redraws.push((prev.value, next.value));
        if let Some((value, message)) = &self.echo {
            if *value == next.value {
                handle.send(message.clone());
            }
        }
    }

    fn event(&self, event: &&'static str) -> Option<Msg> {
        match *event {
            "click" => Some(Msg::Add(1)),
            _ => None,
        }
    }

    fn observed_attributes(&self) -> &[&'static str] {
        &["value"]
    }

    fn attribute_changed(&self, name: &str, value: Option<&str>) -> Option<Msg> {
        match name {
            "value" => value.and_then(|v| v.parse().ok()).map(Msg::Set),
            _ => None,
        }
    }

    fn effect_failed(&self, error: EffectError) -> Option<Msg> {
        Some(Msg::Failed(error.to_string()))
    }
}

pub fn host() -> HostElement {
    HostElement::new("x-probe")
}

/// Construct `probe` on a fresh manual frame queue.
pub fn mount(probe: Probe) -> (Rc<QueuedFrames>, ComponentInstance<Probe>) {
    mount_with(probe, host())
}

pub fn mount_with(probe: Probe, host: HostElement) -> (Rc<QueuedFrames>, ComponentInstance<Probe>) {
    let frames = Rc::new(QueuedFrames::new());
    let instance = ComponentInstance::new(probe, host, Recorder::default(), frames.clone());
    (frames, instance)
}

/// Yield to the local task set until every in-flight effect has settled.
pub async fn settle(instance: &ComponentInstance<Probe>) {
    for _ in 0..100 {
        if instance.pending_effects() == 0 {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!(
        "effects still pending after 100 turns: {}",
        instance.pending_effects()
    );
}

pub fn mounts(instance: &ComponentInstance<Probe>) -> Vec<i64> {
    instance.with_view(|view| view.mounts.clone())
}

pub fn redraws(instance: &ComponentInstance<Probe>) -> Vec<(i64, i64)> {
    instance.with_view(|view| view.redraws.clone())
}
