use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Originator {
    User,
    Assistant,
}

impl Originator {
    pub fn display_name(&self) -> &'static str {
        match self {
            Originator::User => "You",
            Originator::Assistant => "Assistant",
        }
    }
}

/// A single entry in the assistant transcript.
///
/// Immutable once created; only the reply orchestrator constructs these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub originator: Originator,
    pub content: String,
    /// Marks an assistant entry that reports a provider failure rather than
    /// a real reply, so the transcript stays a faithful audit trail.
    #[serde(default)]
    pub is_error: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            originator: Originator::User,
            content: content.into(),
            is_error: false,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            originator: Originator::Assistant,
            content: content.into(),
            is_error: false,
            timestamp: Utc::now(),
        }
    }

    pub fn provider_error(content: impl Into<String>) -> Self {
        Self {
            originator: Originator::Assistant,
            content: content.into(),
            is_error: true,
            timestamp: Utc::now(),
        }
    }
}

/// Outward notifications from the job board to the liking/ranking subsystem.
///
/// Fire-and-forget: the board never waits on an acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFeedback {
    Liked(Uuid),
    Disliked(Uuid),
}

impl JobFeedback {
    #[allow(dead_code)]
    pub fn job_id(&self) -> Uuid {
        match self {
            JobFeedback::Liked(id) | JobFeedback::Disliked(id) => *id,
        }
    }
}
