//! Terminal view root written by the demo component and painted by ratatui.

use std::fmt;
use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Key-bound action installed by the mount writer.
pub struct Button {
    pub key: char,
    pub label: &'static str,
    on_press: Rc<dyn Fn(())>,
}

impl Button {
    pub fn new(key: char, label: &'static str, on_press: impl Fn(()) + 'static) -> Self {
        Self {
            key,
            label,
            on_press: Rc::new(on_press),
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct Screen {
    pub title: String,
    pub lines: Vec<String>,
    pub buttons: Vec<Button>,
    pub mounts: u32,
    pub redraws: u32,
}

impl Screen {
    /// Listener bound to `key`, cloned out so it can run without borrowing
    /// the view.
    pub fn listener(&self, key: char) -> Option<Rc<dyn Fn(())>> {
        self.buttons
            .iter()
            .find(|button| button.key == key)
            .map(|button| Rc::clone(&button.on_press))
    }
}

pub fn draw(frame: &mut Frame<'_>, screen: &Screen, frames_painted: u64) {
    let area = frame.area();
    let [body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .areas(area);

    let lines: Vec<Line> = screen.lines.iter().map(|line| Line::from(line.as_str())).collect();
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(screen.title.as_str())
                .borders(Borders::ALL),
        ),
        body,
    );

    let mut keys: Vec<String> = screen
        .buttons
        .iter()
        .map(|button| format!("{} {}", button.key, button.label))
        .collect();
    keys.extend(
        ["↑/↓ count", "d delayed", "f fetch", "[/] step attr", "q quit"]
            .iter()
            .map(|hint| hint.to_string()),
    );
    let status = format!(
        "{}  |  frames {} · mounts {} · redraws {}",
        keys.join("  "),
        frames_painted,
        screen.mounts,
        screen.redraws
    );
    frame.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL)),
        footer,
    );
}
