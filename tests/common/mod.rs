//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for an export archive written to a temporary `conversations.json`
pub struct ArchiveBuilder {
    temp_dir: TempDir,
    conversations: Vec<Value>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, conversations: Vec::new() }
    }

    pub fn with_conversation(mut self, conversation: ConversationBuilder) -> Self {
        self.conversations.push(conversation.to_json());
        self
    }

    /// Append an arbitrary JSON element (used for malformed records)
    pub fn with_raw(mut self, value: Value) -> Self {
        self.conversations.push(value);
        self
    }

    /// Write the archive and return (temp dir guard, archive path)
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join("conversations.json");
        let content = serde_json::to_string(&Value::Array(self.conversations))
            .expect("Failed to serialize archive");
        fs::write(&path, content).expect("Failed to write archive");
        (self.temp_dir, path)
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write raw text as an archive file
pub fn write_archive(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("conversations.json");
    fs::write(&path, content).expect("Failed to write archive");
    path
}

/// Builder for one exported conversation with a linear message chain.
///
/// Nodes are named `root`, `n1`, `n2`, ... and `current_node` points at the last one.
pub struct ConversationBuilder {
    title: Option<String>,
    create_time: Option<Value>,
    update_time: Option<Value>,
    messages: Vec<(String, String)>,
    branches: Vec<(String, String, String, String)>,
}

impl ConversationBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            create_time: None,
            update_time: None,
            messages: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn untitled() -> Self {
        Self { title: None, ..Self::new("") }
    }

    pub fn created(mut self, seconds: i64) -> Self {
        self.create_time = Some(json!(seconds));
        self
    }

    pub fn created_float(mut self, seconds: f64) -> Self {
        self.create_time = Some(json!(seconds));
        self
    }

    pub fn updated(mut self, seconds: i64) -> Self {
        self.update_time = Some(json!(seconds));
        self
    }

    pub fn message(mut self, role: &str, text: &str) -> Self {
        self.messages.push((role.to_string(), text.to_string()));
        self
    }

    pub fn user(self, text: &str) -> Self {
        self.message("user", text)
    }

    pub fn assistant(self, text: &str) -> Self {
        self.message("assistant", text)
    }

    /// Add an abandoned sibling node `id` under `parent` that is not on the active branch
    pub fn branch(mut self, id: &str, parent: &str, role: &str, text: &str) -> Self {
        self.branches.push((id.to_string(), parent.to_string(), role.to_string(), text.to_string()));
        self
    }

    pub fn to_json(&self) -> Value {
        let mut mapping = serde_json::Map::new();
        mapping.insert("root".to_string(), json!({"message": null, "parent": null}));

        let mut parent = "root".to_string();
        for (i, (role, text)) in self.messages.iter().enumerate() {
            let id = format!("n{}", i + 1);
            mapping.insert(
                id.clone(),
                json!({
                    "message": {"author": {"role": role}, "content": {"parts": [text]}},
                    "parent": parent,
                }),
            );
            parent = id;
        }

        for (id, branch_parent, role, text) in &self.branches {
            mapping.insert(
                id.clone(),
                json!({
                    "message": {"author": {"role": role}, "content": {"parts": [text]}},
                    "parent": branch_parent,
                }),
            );
        }

        let mut conversation = json!({
            "mapping": mapping,
            "current_node": parent,
        });
        if let Some(title) = &self.title {
            conversation["title"] = json!(title);
        }
        if let Some(created) = &self.create_time {
            conversation["create_time"] = created.clone();
        }
        if let Some(updated) = &self.update_time {
            conversation["update_time"] = updated.clone();
        }
        conversation
    }
}

/// Create a realistic archive with several conversations for testing
pub fn realistic_archive() -> (TempDir, PathBuf) {
    ArchiveBuilder::new()
        .with_conversation(
            ConversationBuilder::new("Rust async runtime")
                .created(1_700_000_000)
                .updated(1_700_000_600)
                .user("How does tokio schedule tasks?")
                .assistant("It uses a work-stealing scheduler."),
        )
        .with_conversation(
            ConversationBuilder::new("Python API client")
                .created(1_690_000_000)
                .user("Write a requests wrapper")
                .assistant("Here is a small client class."),
        )
        .with_conversation(
            ConversationBuilder::new("python packaging")
                .created(1_710_000_000)
                .user("pyproject or setup.py?"),
        )
        .with_conversation(ConversationBuilder::new("Notes without date").user("remember this"))
        .build()
}
