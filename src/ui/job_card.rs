//! Job card display component

use crate::jobs::Job;
use crate::ui::assistant::transcript::wrap_text;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Stateless rendering of one job record. Like/dislike interactions are
/// handled by the board; the card only reflects the current liked flag.
#[derive(Debug, Clone)]
pub struct JobCard<'a> {
    job: &'a Job,
    is_liked: bool,
    is_selected: bool,
}

impl<'a> JobCard<'a> {
    pub fn new(job: &'a Job) -> Self {
        Self {
            job,
            is_liked: false,
            is_selected: false,
        }
    }

    pub fn liked(mut self, is_liked: bool) -> Self {
        self.is_liked = is_liked;
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    /// Lines needed to show this card in full, borders included.
    pub fn height(&self) -> u16 {
        // title + details + highlights header
        let mut lines = 3usize;
        lines += self.job.highlights.iter().take(2).count();
        if !self.job.consultants.is_empty() {
            lines += 1 + self.job.consultants.iter().take(2).count();
        }
        lines += 1; // apply footer
        lines as u16 + 2
    }
}

impl Widget for JobCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let job = self.job;

        let heart = if self.is_liked { "❤" } else { "♡" };
        let title = format!(" {} {} ", heart, job.company);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(if self.is_selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            job.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]));

        lines.push(Line::from(vec![Span::styled(
            format!(
                "📍 {}   💼 {}   💰 {}   {} {}",
                job.location,
                job.employment_type,
                job.salary,
                job.work_location.icon(),
                job.work_location.display_name()
            ),
            Style::default().fg(Color::Gray),
        )]));

        lines.push(Line::from(vec![Span::styled(
            "Key Highlights:",
            Style::default().fg(Color::White),
        )]));
        for highlight in job.highlights.iter().take(2) {
            for wrapped in wrap_text(highlight, inner.width.saturating_sub(4) as usize) {
                lines.push(Line::from(vec![
                    Span::raw("  • "),
                    Span::styled(wrapped, Style::default().fg(Color::Gray)),
                ]));
            }
        }

        if !job.consultants.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                "Role Consultants:",
                Style::default().fg(Color::White),
            )]));
            for consultant in job.consultants.iter().take(2) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        consultant.name.clone(),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        format!(" — {}", consultant.experience),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("  Book ${}/hr", consultant.hourly_rate),
                        Style::default().fg(Color::Yellow),
                    ),
                ]));
            }
        }

        lines.push(Line::from(vec![Span::styled(
            format!("View Details → {}", job.apply_url),
            Style::default().fg(Color::Blue),
        )]));

        for (i, line) in lines.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::sample_jobs;

    fn rendered_text(card: JobCard, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);

        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                text.push_str(buf.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn card_shows_title_company_and_work_location() {
        let jobs = sample_jobs();
        let text = rendered_text(JobCard::new(&jobs[0]), 80, 16);

        assert!(text.contains("Senior Product Manager"));
        assert!(text.contains("Northwind Labs"));
        assert!(text.contains("Hybrid"));
    }

    #[test]
    fn card_truncates_highlights_to_two() {
        let jobs = sample_jobs();
        assert!(jobs[0].highlights.len() > 2);
        let text = rendered_text(JobCard::new(&jobs[0]), 120, 16);

        assert!(text.contains("roadmap"));
        assert!(!text.contains("Quarterly travel"));
    }

    #[test]
    fn liked_flag_switches_the_heart_marker() {
        let jobs = sample_jobs();
        let unliked = rendered_text(JobCard::new(&jobs[0]), 80, 16);
        let liked = rendered_text(JobCard::new(&jobs[0]).liked(true), 80, 16);

        assert!(unliked.contains("♡"));
        assert!(liked.contains("❤"));
    }
}
