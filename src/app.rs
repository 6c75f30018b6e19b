use crate::config::Config;
use crate::events::JobFeedback;
use crate::jobs::{sample_jobs, Job};
use crate::provider::{HttpReplyProvider, ReplyProvider, StubReplyProvider};
use crate::ui::{AssistantOrb, JobCard};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
    Terminal,
};
use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// The job board plus its floating assistant.
pub struct App {
    jobs: Vec<Job>,
    selected: usize,
    liked: HashSet<Uuid>,
    feedback_tx: mpsc::UnboundedSender<JobFeedback>,
    orb: AssistantOrb,
    status: Option<String>,
    should_exit: bool,
}

impl App {
    pub fn new(config: &Config, feedback_tx: mpsc::UnboundedSender<JobFeedback>) -> Self {
        // Fall back to the canned-response stub until a backend is configured.
        let provider: Arc<dyn ReplyProvider> = match HttpReplyProvider::new(config) {
            Ok(http) => Arc::new(http),
            Err(_) => Arc::new(StubReplyProvider::default()),
        };

        Self {
            jobs: sample_jobs(),
            selected: 0,
            liked: HashSet::new(),
            feedback_tx,
            orb: AssistantOrb::new(provider).with_typing_indicator(config.ui.show_typing_indicator),
            status: None,
            should_exit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Global bindings first
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_exit = true;
                    return;
                }
                KeyCode::Char('a') => {
                    self.orb.toggle();
                    return;
                }
                _ => {}
            }
        }

        if self.orb.is_open() {
            if key.code == KeyCode::Esc {
                self.orb.toggle();
                return;
            }
            self.orb.handle_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.jobs.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('l') => self.like_selected(),
            KeyCode::Char('x') => self.dislike_selected(),
            _ => {}
        }
    }

    fn like_selected(&mut self) {
        let Some(job) = self.jobs.get(self.selected) else {
            return;
        };

        let _ = self.feedback_tx.send(JobFeedback::Liked(job.id));
        if self.liked.insert(job.id) {
            self.status = Some(format!("Saved \"{}\" to liked roles", job.title));
        } else {
            self.liked.remove(&job.id);
            self.status = Some(format!("Removed \"{}\" from liked roles", job.title));
        }
    }

    fn dislike_selected(&mut self) {
        let Some(job) = self.jobs.get(self.selected) else {
            return;
        };

        let _ = self.feedback_tx.send(JobFeedback::Disliked(job.id));
        self.status = Some("Got it. We'll show fewer roles like this.".to_string());
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);

        self.render_board(chunks[0], buf);
        self.render_footer(chunks[1], buf);
        self.orb.render(chunks[0], buf);
    }

    fn render_board(&self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y;
        for (index, job) in self.jobs.iter().enumerate().skip(self.selected) {
            let card = JobCard::new(job)
                .liked(self.liked.contains(&job.id))
                .selected(index == self.selected);
            let height = card.height().min(area.bottom().saturating_sub(y));
            if height < 4 {
                break;
            }

            let card_area = Rect {
                x: area.x,
                y,
                width: area.width,
                height,
            };
            card.render(card_area, buf);
            y += height;
        }
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let text = match &self.status {
            Some(status) => status.clone(),
            None => "↑/↓ browse · l like · x pass · Ctrl+A assistant · q quit".to_string(),
        };
        let line = Line::from(vec![Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Run the TUI until the user quits.
pub async fn run(config: Config) -> Result<()> {
    // Panic hook: restore the terminal before the default handler runs,
    // otherwise raw mode survives the crash and corrupts the shell.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let (feedback_tx, feedback_rx) = mpsc::unbounded_channel();
    spawn_feedback_sink(feedback_rx);

    let mut app = App::new(&config, feedback_tx);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_exit {
        app.orb.poll_replies();

        terminal.draw(|frame| {
            let area = frame.size();
            app.render(area, frame.buffer_mut());
        })?;

        if event::poll(TICK_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }

    Ok(())
}

/// Stand-in for the external liking/ranking subsystem: drains the
/// fire-and-forget notifications and records them.
fn spawn_feedback_sink(mut rx: mpsc::UnboundedReceiver<JobFeedback>) {
    tokio::spawn(async move {
        while let Some(feedback) = rx.recv().await {
            match feedback {
                JobFeedback::Liked(id) => info!(job_id = %id, "job liked"),
                JobFeedback::Disliked(id) => info!(job_id = %id, "job disliked"),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liking_emits_a_feedback_event_with_the_job_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        let expected = app.jobs[0].id;

        app.like_selected();

        assert_eq!(rx.try_recv().unwrap(), JobFeedback::Liked(expected));
        assert!(app.liked.contains(&expected));
    }

    #[test]
    fn liking_twice_clears_the_local_flag_but_still_notifies() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        let id = app.jobs[0].id;

        app.like_selected();
        app.like_selected();

        assert_eq!(rx.try_recv().unwrap(), JobFeedback::Liked(id));
        assert_eq!(rx.try_recv().unwrap(), JobFeedback::Liked(id));
        assert!(!app.liked.contains(&id));
    }

    #[test]
    fn disliking_notifies_without_touching_the_board() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        let id = app.jobs[0].id;
        let count = app.jobs.len();

        app.dislike_selected();

        assert_eq!(rx.try_recv().unwrap(), JobFeedback::Disliked(id));
        assert_eq!(app.jobs.len(), count);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);

        app.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(app.selected, 0);

        for _ in 0..20 {
            app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        }
        assert_eq!(app.selected, app.jobs.len() - 1);
    }
}
