use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Result returned when the user interacts with the composer
#[derive(Debug, PartialEq)]
pub enum ComposerResult {
    Submitted(String),
    None,
}

/// State for the text area within the composer
#[derive(Debug, Clone, Default)]
pub struct TextAreaState {
    pub content: String,
    pub cursor_position: usize,
}

/// Input composer for the assistant panel. Holds the not-yet-submitted draft.
#[derive(Debug, Clone)]
pub struct Composer {
    state: TextAreaState,
    placeholder: String,
    has_focus: bool,
}

impl Composer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            state: TextAreaState::default(),
            placeholder: placeholder.into(),
            has_focus: false,
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerResult {
        if key.kind != KeyEventKind::Press {
            return ComposerResult::None;
        }

        match key.code {
            KeyCode::Enter => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.insert_char('\n');
                } else if !self.state.content.trim().is_empty() {
                    let content = self.state.content.clone();
                    self.clear();
                    return ComposerResult::Submitted(content);
                }
            }
            KeyCode::Char(c) => {
                self.insert_char(c);
            }
            KeyCode::Backspace => {
                if self.state.cursor_position > 0 {
                    self.state.cursor_position -= 1;
                    self.state.content.remove(self.state.cursor_position);
                }
            }
            KeyCode::Delete => {
                if self.state.cursor_position < self.state.content.len() {
                    self.state.content.remove(self.state.cursor_position);
                }
            }
            KeyCode::Left => {
                if self.state.cursor_position > 0 {
                    self.state.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if self.state.cursor_position < self.state.content.len() {
                    self.state.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                self.state.cursor_position = 0;
            }
            KeyCode::End => {
                self.state.cursor_position = self.state.content.len();
            }
            _ => {}
        }

        ComposerResult::None
    }

    /// Insert a character at the cursor position
    fn insert_char(&mut self, c: char) {
        self.state.content.insert(self.state.cursor_position, c);
        self.state.cursor_position += c.len_utf8();
    }

    /// Replace the draft wholesale, placing the cursor at the end. Used when
    /// the user picks a suggested prompt.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.content = text.into();
        self.state.cursor_position = self.state.content.len();
    }

    pub fn content(&self) -> &str {
        &self.state.content
    }

    pub fn clear(&mut self) {
        self.state.content.clear();
        self.state.cursor_position = 0;
    }

    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }
}

impl Widget for Composer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Ask a question...")
            .style(if self.has_focus {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.state.content.is_empty() {
            let placeholder_line = Line::from(vec![Span::styled(
                &self.placeholder,
                Style::default().fg(Color::DarkGray),
            )]);
            buf.set_line(inner_area.x, inner_area.y, &placeholder_line, inner_area.width);
        } else {
            let mut content = self.state.content.clone();
            if self.has_focus {
                content.insert(self.state.cursor_position.min(content.len()), '▌');
            }

            for (i, line_text) in content.split('\n').enumerate() {
                if i < inner_area.height as usize {
                    let line = Line::from(vec![Span::raw(line_text)]);
                    buf.set_line(inner_area.x, inner_area.y + i as u16, &line, inner_area.width);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(composer: &mut Composer, text: &str) {
        for c in text.chars() {
            composer.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_builds_the_draft() {
        let mut composer = Composer::new("Ask a question...");
        type_text(&mut composer, "hello");
        assert_eq!(composer.content(), "hello");
    }

    #[test]
    fn enter_submits_and_clears_the_draft() {
        let mut composer = Composer::new("");
        type_text(&mut composer, "find roles");

        let result = composer.handle_key(press(KeyCode::Enter));
        assert_eq!(result, ComposerResult::Submitted("find roles".to_string()));
        assert_eq!(composer.content(), "");
    }

    #[test]
    fn enter_on_whitespace_draft_is_a_no_op() {
        let mut composer = Composer::new("");
        type_text(&mut composer, "   ");

        let result = composer.handle_key(press(KeyCode::Enter));
        assert_eq!(result, ComposerResult::None);
        assert_eq!(composer.content(), "   ");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut composer = Composer::new("");
        type_text(&mut composer, "abc");
        composer.handle_key(press(KeyCode::Backspace));
        assert_eq!(composer.content(), "ab");

        composer.handle_key(press(KeyCode::Left));
        composer.handle_key(press(KeyCode::Backspace));
        assert_eq!(composer.content(), "b");
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut composer = Composer::new("");
        composer.set_text("suggested prompt");
        type_text(&mut composer, "!");
        assert_eq!(composer.content(), "suggested prompt!");
    }
}
