use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::deserializers::json_type;
use super::thread::reconstruct_thread;
use crate::error::ArchiveError;
use crate::models::{
    Archive, Conversation, Defect, DefectKind, LoadReport, RawConversation, UNTITLED,
};
use crate::utils::open_archive_file;

/// Load an exported conversation archive from disk.
///
/// Fails only on whole-file problems (missing, unreadable, not JSON, root not an array).
/// Defects inside individual conversations or messages are isolated and collected in
/// the returned archive's [`LoadReport`].
pub fn load_archive(path: &Path) -> Result<Archive, ArchiveError> {
    let mut file = open_archive_file(path)?;

    // Bytes, not a String: invalid UTF-8 is malformed content, not an I/O failure
    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|source| ArchiveError::Io { path: path.to_path_buf(), source })?;

    let archive = parse_archive_bytes(&content).map_err(|e| match e {
        ArchiveError::Malformed { reason, source, .. } => {
            ArchiveError::Malformed { path: path.to_path_buf(), reason, source }
        }
        other => other,
    })?;

    info!(
        path = %path.display(),
        conversations = archive.len(),
        messages = archive.message_count(),
        defects = archive.report.defects.len(),
        "Loaded archive"
    );

    Ok(archive)
}

/// Parse an archive document already held in memory.
///
/// Errors carry an empty path; [`load_archive`] fills in the real one.
pub fn parse_archive_str(content: &str) -> Result<Archive, ArchiveError> {
    parse_archive_bytes(content.as_bytes())
}

fn parse_archive_bytes(content: &[u8]) -> Result<Archive, ArchiveError> {
    let root: Value = serde_json::from_slice(content).map_err(|e| ArchiveError::Malformed {
        path: Default::default(),
        reason: format!("invalid JSON: {}", e),
        source: Some(e),
    })?;

    let Value::Array(items) = root else {
        return Err(ArchiveError::Malformed {
            path: Default::default(),
            reason: format!("expected an array of conversations, found {}", json_type(&root)),
            source: None,
        });
    };

    let mut conversations = Vec::with_capacity(items.len());
    let mut report = LoadReport::default();

    for (position, item) in items.into_iter().enumerate() {
        if let Some(conversation) = parse_conversation(position, item, &mut report) {
            conversations.push(conversation);
        }
    }

    if !report.is_clean() {
        warn!("Archive loaded with {}", report.summary());
    }

    Ok(Archive { conversations, report })
}

/// Build one conversation, or record why it was skipped
fn parse_conversation(position: usize, item: Value, report: &mut LoadReport) -> Option<Conversation> {
    if !item.is_object() {
        let reason = format!("expected an object, found {}", json_type(&item));
        record(report, position, DefectKind::ConversationSkipped { reason });
        return None;
    }

    let raw = match serde_json::from_value::<RawConversation>(item) {
        Ok(raw) => raw,
        Err(e) => {
            record(report, position, DefectKind::ConversationSkipped { reason: e.to_string() });
            return None;
        }
    };

    let thread = reconstruct_thread(&raw.mapping, raw.current_node.as_deref());
    for kind in thread.defects {
        record(report, position, kind);
    }

    let title = raw.title.filter(|t| !t.is_empty()).unwrap_or_else(|| UNTITLED.to_string());

    Some(Conversation {
        title,
        create_time: raw.create_time,
        update_time: raw.update_time,
        thread: thread.messages,
    })
}

fn record(report: &mut LoadReport, conversation: usize, kind: DefectKind) {
    let defect = Defect { conversation, kind };
    debug!("{}", defect);
    report.defects.push(defect);
}
