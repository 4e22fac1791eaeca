use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Title used when the export has none (absent, null or empty).
pub const UNTITLED: &str = "Untitled";

/// Role used when a message node has no `author.role`.
pub const UNKNOWN_ROLE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: role.into(), content: content.into() }
    }
}

/// A single conversation with its active branch flattened oldest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub title: String,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
    pub thread: Vec<Message>,
}

/// Everything produced by one load. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    pub conversations: Vec<Conversation>,
    pub report: LoadReport,
}

impl Archive {
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.conversations.iter().map(|c| c.thread.len()).sum()
    }
}

/// Records that were skipped or defaulted while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub defects: Vec<Defect>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.defects.is_empty()
    }

    pub fn skipped_conversations(&self) -> usize {
        self.defects.iter().filter(|d| matches!(d.kind, DefectKind::ConversationSkipped { .. })).count()
    }

    pub fn skipped_messages(&self) -> usize {
        self.defects.iter().filter(|d| matches!(d.kind, DefectKind::MessageSkipped { .. })).count()
    }

    pub fn defaulted_messages(&self) -> usize {
        self.defects
            .iter()
            .filter(|d| matches!(d.kind, DefectKind::MissingRole { .. } | DefectKind::MissingContent { .. }))
            .count()
    }

    /// One-line summary, e.g. for a status bar.
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "no defects".to_string();
        }
        format!(
            "{} defects ({} conversations skipped, {} messages skipped, {} messages defaulted)",
            self.defects.len(),
            self.skipped_conversations(),
            self.skipped_messages(),
            self.defaulted_messages()
        )
    }
}

/// A problem isolated to one conversation or one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    /// Position of the conversation in the source array.
    pub conversation: usize,
    pub kind: DefectKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefectKind {
    ConversationSkipped { reason: String },
    MessageSkipped { node_id: String, reason: String },
    MissingRole { node_id: String },
    MissingContent { node_id: String },
    LeafNotInMapping { node_id: String },
    CycleDetected { node_id: String },
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conversation #{}: ", self.conversation)?;
        match &self.kind {
            DefectKind::ConversationSkipped { reason } => write!(f, "skipped ({})", reason),
            DefectKind::MessageSkipped { node_id, reason } => {
                write!(f, "message {} skipped ({})", node_id, reason)
            }
            DefectKind::MissingRole { node_id } => {
                write!(f, "message {} has no author.role, using '{}'", node_id, UNKNOWN_ROLE)
            }
            DefectKind::MissingContent { node_id } => {
                write!(f, "message {} has no content parts, using empty content", node_id)
            }
            DefectKind::LeafNotInMapping { node_id } => {
                write!(f, "current node {} is not in the mapping", node_id)
            }
            DefectKind::CycleDetected { node_id } => {
                write!(f, "parent chain loops back to {}, traversal stopped", node_id)
            }
        }
    }
}
