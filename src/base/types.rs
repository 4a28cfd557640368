use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Subject marker the provider puts on username mention notifications.
pub const MENTION_SUBJECT_MARKER: &str = "username mention";

// Errors.

/// The kinds of failure the bot distinguishes.
///
/// `Configuration`, `Authentication` and `InboxUnavailable` are returned from
/// setup and abort the run; the rest are scoped to a single message and only
/// logged.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0:#}")]
    Configuration(Err),
    #[error("authentication failed: {0:#}")]
    Authentication(Err),
    #[error("could not list unread messages: {0:#}")]
    InboxUnavailable(Err),
    #[error("mention in message {id} does not contain `{token} <note>`")]
    MalformedMention { id: String, token: String },
    #[error("issue tracker unavailable: {0:#}")]
    TrackerUnavailable(Err),
    #[error("could not reply to message {id}: {cause:#}")]
    Notification { id: String, cause: Err },
    #[error("could not mark message {id} as read: {cause:#}")]
    MarkRead { id: String, cause: Err },
}

// Data model.

/// The post a comment belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub title: String,
    pub permalink: String,
}

/// One inbound notification from the messaging provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    /// Short provider id (e.g. `def456`).
    pub id: String,
    /// Provider-qualified id used by reply / read calls (e.g. `t1_def456`).
    pub fullname: String,
    pub subject: String,
    pub body: String,
    /// Display name of the author.
    pub author: String,
    /// Top-level comment directly on the submission.
    pub is_root: bool,
    pub submission: Submission,
    pub permalink: String,
}

impl InboxMessage {
    /// Whether the provider flagged this as a username mention.
    pub fn is_mention(&self) -> bool {
        self.subject.contains(MENTION_SUBJECT_MARKER)
    }
}

/// A mention that can be turned into an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMention {
    pub note: String,
    pub labels: Vec<String>,
    pub title: String,
    pub context: String,
}

/// Issue content ready to be submitted to the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// The tracker's handle on a created issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueReference {
    pub number: u64,
    pub html_url: String,
}

/// Counters for a single drain of the unread set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub seen: usize,
    pub mentions: usize,
    pub filed: usize,
    pub replied: usize,
    pub failed: usize,
}
