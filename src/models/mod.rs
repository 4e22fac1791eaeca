//! Data models for exported chat archives.
//!
//! - [`RawConversation`] / [`RawNode`] / [`RawMessage`] - serde shapes of the export file,
//!   used only while loading
//! - [`Archive`] / [`Conversation`] / [`Message`] - the immutable records the viewer works on
//! - [`LoadReport`] / [`Defect`] - records that were skipped or defaulted during a load
//!
//! Lenient field deserializers live in `parsers::deserializers`.

pub mod archive;
pub mod export;

pub use archive::{
    Archive, Conversation, Defect, DefectKind, LoadReport, Message, UNKNOWN_ROLE, UNTITLED,
};
pub use export::{RawAuthor, RawContent, RawConversation, RawMessage, RawNode};
