use crate::events::Message;
use crate::provider::{ProviderError, ReplyProvider};
use crate::ui::assistant::{
    Composer, ComposerResult, SuggestionSurface, Transcript, TypingIndicator,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Reply orchestrator states. `AwaitingReply` holds strictly between the
/// submission of a user message and the arrival of the matching reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyPhase {
    Idle,
    AwaitingReply,
}

/// The floating assistant widget: collapsed orb or expanded panel.
///
/// One instance owns its whole state; nothing is shared across instances.
pub struct AssistantOrb {
    transcript: Transcript,
    composer: Composer,
    suggestions: SuggestionSurface,
    provider: Arc<dyn ReplyProvider>,
    phase: ReplyPhase,
    is_open: bool,
    show_typing: bool,
    reply_rx: Option<mpsc::UnboundedReceiver<Result<String, ProviderError>>>,
}

impl AssistantOrb {
    pub fn new(provider: Arc<dyn ReplyProvider>) -> Self {
        Self {
            transcript: Transcript::new(),
            composer: Composer::new("Ask a question..."),
            suggestions: SuggestionSurface::new(),
            provider,
            phase: ReplyPhase::Idle,
            is_open: false,
            show_typing: true,
            reply_rx: None,
        }
    }

    pub fn with_typing_indicator(mut self, enabled: bool) -> Self {
        self.show_typing = enabled;
        self
    }

    /// Expand or collapse the panel. Touches nothing but the visibility flag;
    /// the conversation survives close/open cycles.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
        self.composer.set_focus(self.is_open);
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// True iff a reply is currently outstanding.
    pub fn is_composing(&self) -> bool {
        self.phase == ReplyPhase::AwaitingReply
    }

    pub fn draft(&self) -> &str {
        self.composer.content()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn suggestions_visible(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Copy the highlighted suggestion into the draft. Does not submit.
    pub fn select_suggestion(&mut self) {
        self.composer.set_text(self.suggestions.selected_prompt());
    }

    /// Route a key press to the suggestion list or the composer.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.suggestions_visible() {
            match key.code {
                KeyCode::Up => {
                    self.suggestions.move_selection(-1);
                    return;
                }
                KeyCode::Down => {
                    self.suggestions.move_selection(1);
                    return;
                }
                KeyCode::Tab => {
                    self.select_suggestion();
                    return;
                }
                _ => {}
            }
        }

        // Single-flight: ignore plain Enter while a reply is pending so the
        // draft is kept intact.
        if self.is_composing()
            && key.code == KeyCode::Enter
            && !key.modifiers.contains(KeyModifiers::SHIFT)
        {
            return;
        }

        if let ComposerResult::Submitted(input) = self.composer.handle_key(key) {
            self.submit(input);
        }
    }

    /// Stage a user message and request a reply.
    ///
    /// Valid only while idle; empty or whitespace-only input and submissions
    /// made while a reply is pending are rejected silently. Returns whether
    /// the submission was accepted.
    pub fn submit(&mut self, input: impl Into<String>) -> bool {
        let input = input.into();

        if self.phase != ReplyPhase::Idle {
            debug!("submission rejected: a reply is already in flight");
            return false;
        }
        if input.trim().is_empty() {
            return false;
        }

        self.transcript.append(Message::user(input));
        self.composer.clear();
        self.phase = ReplyPhase::AwaitingReply;

        let provider = Arc::clone(&self.provider);
        let conversation = self.transcript.snapshot().to_vec();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let outcome = provider.generate_reply(&conversation).await;
            let _ = tx.send(outcome);
        });

        self.reply_rx = Some(rx);
        true
    }

    /// Drain a pending reply, if one has arrived. Called from the main loop
    /// on every tick; never blocks.
    pub fn poll_replies(&mut self) {
        let Some(rx) = self.reply_rx.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(outcome) => self.on_reply_resolved(outcome),
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => {
                // The provider task died without resolving. Must not stay
                // stuck in the composing state.
                self.on_reply_resolved(Err(ProviderError::Unavailable(
                    "reply channel closed".to_string(),
                )));
            }
        }
    }

    /// Apply a resolved reply: append the assistant message and return to
    /// idle. Valid only while a reply is outstanding.
    fn on_reply_resolved(&mut self, outcome: Result<String, ProviderError>) {
        if self.phase != ReplyPhase::AwaitingReply {
            warn!("reply resolved outside the awaiting state; ignoring");
            return;
        }

        match outcome {
            Ok(text) => self.transcript.append(Message::assistant(text)),
            Err(err) => {
                warn!(error = %err, "reply provider failed");
                self.transcript.append(Message::provider_error(err.to_string()));
            }
        }

        self.phase = ReplyPhase::Idle;
        self.reply_rx = None;
    }

    /// Render the collapsed orb hint or the expanded panel into the
    /// bottom-right corner of `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if !self.is_open {
            let hint = "💬 assistant (Ctrl+A)";
            let x = area.right().saturating_sub(hint.chars().count() as u16 + 2);
            let y = area.bottom().saturating_sub(1);
            let line = Line::from(vec![Span::styled(
                hint,
                Style::default().fg(Color::Cyan),
            )]);
            buf.set_line(x, y, &line, area.width);
            return;
        }

        let panel = panel_rect(area);
        Clear.render(panel, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // transcript or suggestions
                Constraint::Length(1), // typing indicator
                Constraint::Length(3), // composer
            ])
            .split(panel);

        if self.suggestions_visible() {
            self.suggestions.clone().render(chunks[0], buf);
        } else {
            self.transcript.clone().render(chunks[0], buf);
        }

        if self.show_typing && self.is_composing() {
            TypingIndicator.render(chunks[1], buf);
        }

        self.composer.clone().render(chunks[2], buf);
    }
}

/// Panel footprint: anchored to the bottom-right, leaving the board visible.
fn panel_rect(area: Rect) -> Rect {
    let width = area.width.min(52);
    let height = area.height.min(20);
    Rect {
        x: area.right().saturating_sub(width),
        y: area.bottom().saturating_sub(height),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Originator;
    use crate::provider::{StubReplyProvider, PLACEHOLDER_REPLY};
    use crate::ui::assistant::suggestions::SUGGESTED_PROMPTS;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FailingProvider;

    #[async_trait]
    impl ReplyProvider for FailingProvider {
        async fn generate_reply(&self, _: &[Message]) -> Result<String, ProviderError> {
            Err(ProviderError::Unavailable("503 service unavailable".to_string()))
        }
    }

    fn orb_with_instant_stub() -> AssistantOrb {
        AssistantOrb::new(Arc::new(
            StubReplyProvider::default().with_delay(Duration::ZERO),
        ))
    }

    /// Drive the event loop until the outstanding reply lands.
    async fn resolve_pending(orb: &mut AssistantOrb) {
        let mut spins = 0usize;
        while orb.is_composing() {
            tokio::task::yield_now().await;
            orb.poll_replies();
            spins += 1;
            assert!(spins < 10_000, "reply never resolved");
        }
    }

    #[test]
    fn toggle_flips_visibility_and_nothing_else() {
        let mut orb = orb_with_instant_stub();
        orb.composer.set_text("half-typed question");

        assert!(!orb.is_open());
        orb.toggle();
        assert!(orb.is_open());
        orb.toggle();
        assert!(!orb.is_open());

        assert_eq!(orb.draft(), "half-typed question");
        assert!(orb.transcript().is_empty());
        assert!(!orb.is_composing());
    }

    #[test]
    fn whitespace_submission_is_a_silent_no_op() {
        let mut orb = orb_with_instant_stub();

        assert!(!orb.submit(""));
        assert!(!orb.submit("   \n\t"));

        assert!(orb.transcript().is_empty());
        assert!(!orb.is_composing());
    }

    #[tokio::test]
    async fn submit_is_rejected_while_a_reply_is_in_flight() {
        let mut orb = AssistantOrb::new(Arc::new(
            StubReplyProvider::default().with_delay(Duration::from_secs(60)),
        ));

        assert!(orb.submit("first question"));
        assert!(orb.is_composing());

        // Rapid repeated submissions must all bounce off.
        for _ in 0..5 {
            assert!(!orb.submit("second question"));
        }

        assert_eq!(orb.transcript().len(), 1);
        assert!(orb.is_composing());
    }

    #[tokio::test]
    async fn resolved_rounds_alternate_user_then_assistant() {
        let mut orb = orb_with_instant_stub();

        for round in 0..3 {
            assert!(orb.submit(format!("question {round}")));
            resolve_pending(&mut orb).await;
        }

        let snapshot = orb.transcript().snapshot();
        assert_eq!(snapshot.len(), 6);
        for (index, message) in snapshot.iter().enumerate() {
            let expected = if index % 2 == 0 {
                Originator::User
            } else {
                Originator::Assistant
            };
            assert_eq!(message.originator, expected);
        }
    }

    #[test]
    fn selecting_a_suggestion_only_populates_the_draft() {
        let mut orb = orb_with_instant_stub();

        orb.select_suggestion();

        assert_eq!(orb.draft(), SUGGESTED_PROMPTS[0]);
        assert!(orb.transcript().is_empty());
        assert!(!orb.is_composing());
    }

    #[tokio::test]
    async fn suggestion_to_reply_scenario() {
        let mut orb = AssistantOrb::new(Arc::new(
            StubReplyProvider::default()
                .with_delay(Duration::ZERO)
                .with_reply("placeholder"),
        ));

        orb.suggestions.move_selection(0);
        orb.select_suggestion();
        assert_eq!(
            orb.draft(),
            "How do I find specific roles in Product Management?"
        );
        assert!(orb.transcript().is_empty());

        let draft = orb.draft().to_string();
        assert!(orb.submit(draft));
        assert!(orb.is_composing());
        assert_eq!(orb.transcript().len(), 1);
        assert_eq!(
            orb.transcript().snapshot()[0].content,
            "How do I find specific roles in Product Management?"
        );
        assert_eq!(orb.draft(), "");

        resolve_pending(&mut orb).await;

        let snapshot = orb.transcript().snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].originator, Originator::Assistant);
        assert_eq!(snapshot[1].content, "placeholder");
        assert!(!orb.is_composing());
    }

    #[tokio::test]
    async fn visibility_can_toggle_while_awaiting_a_reply() {
        let mut orb = orb_with_instant_stub();

        assert!(orb.submit("question"));
        orb.toggle();
        orb.toggle();
        assert!(orb.is_composing());

        resolve_pending(&mut orb).await;
        assert_eq!(orb.transcript().len(), 2);
        assert_eq!(orb.transcript().snapshot()[1].content, PLACEHOLDER_REPLY);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_an_error_message_and_returns_to_idle() {
        let mut orb = AssistantOrb::new(Arc::new(FailingProvider));

        assert!(orb.submit("question"));
        resolve_pending(&mut orb).await;

        let snapshot = orb.transcript().snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].originator, Originator::Assistant);
        assert!(snapshot[1].is_error);
        assert!(snapshot[1].content.contains("unavailable"));
        assert!(!orb.is_composing());

        // The machine must accept new submissions after a failure.
        assert!(orb.submit("try again"));
    }

    #[test]
    fn stray_resolution_while_idle_is_ignored() {
        let mut orb = orb_with_instant_stub();

        orb.on_reply_resolved(Ok("uninvited reply".to_string()));

        assert!(orb.transcript().is_empty());
        assert!(!orb.is_composing());
    }

    #[tokio::test]
    async fn enter_is_ignored_while_composing_and_the_draft_survives() {
        let mut orb = AssistantOrb::new(Arc::new(
            StubReplyProvider::default().with_delay(Duration::from_secs(60)),
        ));

        assert!(orb.submit("first"));
        orb.composer.set_text("queued question");

        orb.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(orb.draft(), "queued question");
        assert_eq!(orb.transcript().len(), 1);
    }
}
