use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// One element of the exported root array, as read from disk.
///
/// Only used during loading; the [`Conversation`](super::Conversation) built from it
/// is what the rest of the crate sees.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConversation {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds")]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_mapping")]
    pub mapping: HashMap<String, RawNode>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub current_node: Option<String>,
}

/// Entry in the parent-pointer graph.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    /// Kept as a raw value so a single broken message never fails the conversation.
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub author: Option<RawAuthor>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub content: Option<RawContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContent {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub parts: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub text: Option<String>,
}
