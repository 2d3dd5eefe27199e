//! Terminal host for the counter component.
//!
//! The terminal plays the host platform: keys become events or listener
//! presses, `[`/`]` rewrite the host's `step` attribute, and a fixed-rate
//! paint loop supplies frames.

mod counter;
mod screen;
mod terminal;

use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use framebind::config::Config;
use framebind::frame::driver::run_frames;
use framebind::shutdown::{ShutdownCoordinator, ShutdownHandle};
use framebind::{ComponentInstance, QueuedFrames};

use counter::Counter;
use screen::{draw, Screen};
use terminal::TerminalSession;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let mut terminal = TerminalSession::enter()?;

    let frames = Rc::new(QueuedFrames::new());
    let instance = ComponentInstance::new(Counter, config.host.clone(), Screen::default(), frames.clone());
    tracing::info!(instance = %instance.id(), fps = config.frames.fps, "demo started");

    let coordinator = ShutdownCoordinator::new();
    let shutdown = coordinator.handle();
    let ctrl_c = coordinator.handle();
    tokio::task::spawn_local(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.signal();
        }
    });

    let mut failure: Option<io::Error> = None;
    let mut dirty = true;
    run_frames(&frames, config.frames.interval(), coordinator.handle(), |fired| {
        match pump_input(&instance, &shutdown) {
            Ok(resized) => dirty |= resized,
            Err(err) => {
                failure = Some(err);
                shutdown.signal();
                return;
            }
        }
        if fired == 0 && !dirty {
            return;
        }
        let painted = frames.frames_fired();
        let result = terminal.draw(|frame| instance.with_view(|screen| draw(frame, screen, painted)));
        match result {
            Ok(()) => dirty = false,
            Err(err) => {
                failure = Some(err);
                shutdown.signal();
            }
        }
    })
    .await;

    drop(instance);
    drop(terminal);
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Drain pending terminal input. Returns whether the terminal was resized.
fn pump_input(instance: &ComponentInstance<Counter>, shutdown: &ShutdownHandle) -> io::Result<bool> {
    let mut resized = false;
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                on_key(instance, shutdown, key);
            }
            Event::Resize(_, _) => resized = true,
            _ => {}
        }
    }
    Ok(resized)
}

fn on_key(instance: &ComponentInstance<Counter>, shutdown: &ShutdownHandle, key: KeyEvent) {
    if is_quit(key) {
        shutdown.signal();
        return;
    }

    if let KeyCode::Char(ch) = key.code {
        if let Some(delta) = step_delta(ch) {
            bump_step_attribute(instance, delta);
            return;
        }
        let listener = instance.with_view(|screen| screen.listener(ch));
        if let Some(listener) = listener {
            listener(());
            return;
        }
    }

    instance.handle_event(&key);
}

fn is_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char(ch) => {
            ch.eq_ignore_ascii_case(&'c') && key.modifiers.contains(KeyModifiers::CONTROL)
        }
        _ => false,
    }
}

fn step_delta(ch: char) -> Option<i64> {
    match ch {
        '[' => Some(-1),
        ']' => Some(1),
        _ => None,
    }
}

/// Act as the host rewriting the element's `step` attribute.
fn bump_step_attribute(instance: &ComponentInstance<Counter>, delta: i64) {
    let old = instance.host().attribute("step").map(str::to_string);
    let current = old.as_deref().and_then(|v| v.parse::<i64>().ok()).unwrap_or(1);
    let new = (current + delta).max(1).to_string();
    instance.attribute_changed("step", old.as_deref(), Some(&new));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        assert!(is_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(is_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn step_keys() {
        assert_eq!(step_delta('['), Some(-1));
        assert_eq!(step_delta(']'), Some(1));
        assert_eq!(step_delta('+'), None);
    }

    #[test]
    fn step_attribute_never_drops_below_one() {
        let frames = Rc::new(QueuedFrames::new());
        let host = framebind::HostElement::new("x-counter").with_attribute("step", "1");
        let instance = ComponentInstance::new(Counter, host, Screen::default(), frames.clone());

        bump_step_attribute(&instance, -1);
        assert_eq!(instance.host().attribute("step"), Some("1"));
        assert!(!instance.has_pending_frame());

        bump_step_attribute(&instance, 1);
        assert_eq!(instance.host().attribute("step"), Some("2"));
        assert_eq!(instance.state().step, 2);

        frames.step();
        assert_eq!(instance.with_view(|screen| screen.redraws), 1);
    }

    #[test]
    fn listener_and_event_paths_both_reach_update() {
        let frames = Rc::new(QueuedFrames::new());
        let coordinator = ShutdownCoordinator::new();
        let instance = ComponentInstance::new(
            Counter,
            framebind::HostElement::new("x-counter"),
            Screen::default(),
            frames.clone(),
        );

        on_key(&instance, &coordinator.handle(), KeyEvent::from(KeyCode::Char('+')));
        on_key(&instance, &coordinator.handle(), KeyEvent::from(KeyCode::Up));
        assert_eq!(instance.state().count, 2);

        on_key(&instance, &coordinator.handle(), KeyEvent::from(KeyCode::Char('q')));
        assert!(coordinator.is_shutting_down());
    }
}
