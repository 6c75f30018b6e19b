//! Suggested prompts shown while the transcript is empty

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Example prompts offered to a first-time user, in display order.
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "How do I find specific roles in Product Management?",
    "As a student intern, what would increase my chances for landing a role in FAANG?",
    "What skills should I highlight for software engineering roles?",
    "How can I make my profile stand out to recruiters?",
];

/// Selection state over the fixed prompt list.
#[derive(Debug, Clone)]
pub struct SuggestionSurface {
    selected: usize,
}

impl Default for SuggestionSurface {
    fn default() -> Self {
        Self { selected: 0 }
    }
}

impl SuggestionSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn prompts(&self) -> &'static [&'static str] {
        &SUGGESTED_PROMPTS
    }

    pub fn selected_prompt(&self) -> &'static str {
        SUGGESTED_PROMPTS[self.selected]
    }

    /// Move the highlight up or down, wrapping at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        let len = SUGGESTED_PROMPTS.len() as isize;
        let mut next = self.selected as isize + delta;

        if next < 0 {
            next = len - 1;
        } else if next >= len {
            next = 0;
        }

        self.selected = next as usize;
    }
}

impl Widget for SuggestionSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("💬 RoleArc Assistant");

        let inner = block.inner(area);
        block.render(area, buf);

        let hint = Line::from(vec![Span::styled(
            "Try asking questions like:",
            Style::default().fg(Color::Gray),
        )]);
        buf.set_line(inner.x, inner.y, &hint, inner.width);

        let mut y = inner.y + 2;
        for (index, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
            if y >= inner.y + inner.height {
                break;
            }

            let is_selected = index == self.selected;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let marker = if is_selected { "› " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(*prompt, style),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;
        }

        if y < inner.y + inner.height {
            let footer = Line::from(vec![Span::styled(
                "↑/↓ choose · Tab to use · Enter to send",
                Style::default().fg(Color::DarkGray),
            )]);
            buf.set_line(inner.x, inner.y + inner.height - 1, &footer, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_starts_at_the_first_prompt() {
        let surface = SuggestionSurface::new();
        assert_eq!(surface.selected_prompt(), SUGGESTED_PROMPTS[0]);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut surface = SuggestionSurface::new();
        surface.move_selection(-1);
        assert_eq!(
            surface.selected_prompt(),
            SUGGESTED_PROMPTS[SUGGESTED_PROMPTS.len() - 1]
        );

        surface.move_selection(1);
        assert_eq!(surface.selected_prompt(), SUGGESTED_PROMPTS[0]);
    }

    #[test]
    fn prompts_are_fixed_and_ordered() {
        let surface = SuggestionSurface::new();
        assert_eq!(surface.prompts().len(), 4);
        assert_eq!(
            surface.prompts()[0],
            "How do I find specific roles in Product Management?"
        );
    }
}
