//! Conversation transcript display component

use crate::events::{Message, Originator};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Append-only log of the exchanged messages.
///
/// Ordering is append order; nothing reorders, edits, or removes entries.
/// The transcript lives and dies with its widget instance.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the log. Only the reply orchestrator
    /// calls this.
    pub(crate) fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Read-only view of the log, in append order.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Widget for Transcript {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("💬 RoleArc Assistant");

        let inner_area = block.inner(area);
        block.render(area, buf);

        // Collect all lines, then show the window that fits, anchored at the
        // bottom so the latest exchange is always visible.
        let mut all_lines: Vec<Line> = Vec::new();
        for message in &self.messages {
            let mut lines = render_message(message, inner_area.width);
            all_lines.append(&mut lines);
            all_lines.push(Line::from(vec![Span::raw("")]));
        }

        let height = inner_area.height as usize;
        let total = all_lines.len();
        let start = total.saturating_sub(height);
        let visible = &all_lines[start..];

        for (i, line) in visible.iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
        }
    }
}

/// Render a single message into lines
fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let role_icon = match message.originator {
        Originator::User => "👤",
        Originator::Assistant => "🤖",
    };

    let timestamp = message.timestamp.format("%H:%M:%S").to_string();
    let header = format!(
        "{} {} {} {}",
        role_icon,
        message.originator.display_name(),
        timestamp,
        "─".repeat(12)
    );

    lines.push(Line::from(vec![Span::styled(
        header,
        Style::default().fg(Color::DarkGray),
    )]));

    let style = content_style(message);
    for content_line in wrap_text(&message.content, width.saturating_sub(2) as usize) {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(content_line, style),
        ]));
    }

    lines
}

fn content_style(message: &Message) -> Style {
    if message.is_error {
        return Style::default().fg(Color::Red);
    }
    match message.originator {
        Originator::User => Style::default().fg(Color::Blue),
        Originator::Assistant => Style::default().fg(Color::Green),
    }
}

/// Wrap text to fit within the given width
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 <= width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            if !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
