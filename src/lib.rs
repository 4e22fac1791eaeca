//! Chat Archive Viewer - browse and search an exported chat conversation archive
//!
//! This library loads a `conversations.json` export (an array of conversations, each a
//! tree of message nodes) and presents it as a filterable, sortable list of linear
//! threads. It provides:
//!
//! - Loading the archive with per-conversation and per-message defect isolation
//! - Reconstructing each conversation's active branch from its node mapping
//! - Pure filtering (title search plus keywords) and sorting into a derived view
//! - A UI-independent [`Viewer`] that owns the archive and query state
//! - An interactive terminal browser and plain-text CLI commands on top of it
//!
//! # Example
//!
//! ```no_run
//! use chat_archive_viewer::{SortMode, Viewer};
//!
//! let mut viewer = Viewer::open("data/conversations.json")?;
//! viewer.set_search("rust");
//! viewer.add_keyword("async");
//! viewer.set_sort(SortMode::TitleAscending);
//! for conversation in viewer.view_conversations() {
//!     println!("{}", conversation.title);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod error;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod tui;
pub mod utils;
pub mod viewer;

// Re-export commonly used types
pub use error::{ArchiveError, ViewError};
pub use filters::{SortMode, ViewQuery, apply_filters};
pub use models::{Archive, Conversation, LoadReport, Message};
pub use parsers::{load_archive, parse_archive_str};
pub use viewer::{Viewer, render_thread};
