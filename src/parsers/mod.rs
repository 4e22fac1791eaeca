//! Archive Loader: parsers for exported chat archives
//!
//! # Error Handling Strategy
//!
//! This module isolates defects instead of failing the whole load:
//!
//! - **Whole-file failures**: a missing file, an unreadable file, invalid JSON, or a root
//!   that is not an array are returned as [`ArchiveError`](crate::error::ArchiveError).
//!   A missing file is its own variant so callers can show a specific message.
//!
//! - **Conversation-level defects**: an element that is not an object, or whose structure
//!   cannot be read (e.g. `mapping` is not an object), is skipped and recorded.
//!
//! - **Message-level defects**: a missing `author.role` becomes the placeholder role,
//!   missing `content.parts` becomes empty content, an unreadable message is skipped.
//!   Dangling leaves and parent-chain cycles end traversal early. All are recorded.
//!
//! - **User feedback**: defects are collected in a [`LoadReport`](crate::models::LoadReport)
//!   attached to the archive and summarised through `tracing`.

pub mod archive;
pub mod deserializers;
pub mod thread;

pub use archive::{load_archive, parse_archive_str};
pub use thread::{join_parts, reconstruct_thread};
