use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::tui::format_full;
use crate::utils::{format_path_with_tilde, sanitize_for_display};
use crate::viewer::{Viewer, render_thread};

fn list_date(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn show_stats(viewer: &Viewer, out: &mut impl Write) -> Result<()> {
    let archive = viewer.archive();
    let report = viewer.report();

    let dated: Vec<&DateTime<Utc>> =
        archive.conversations.iter().filter_map(|c| c.create_time.as_ref()).collect();
    let empty_threads = archive.conversations.iter().filter(|c| c.thread.is_empty()).count();

    writeln!(out, "Chat Archive Statistics")?;
    writeln!(out, "=======================")?;
    writeln!(out, "Archive: {}", format_path_with_tilde(viewer.archive_path()))?;
    writeln!(out, "Conversations: {}", archive.len())?;
    writeln!(out, "  With creation time: {}", dated.len())?;
    writeln!(out, "  Without messages: {}", empty_threads)?;
    writeln!(out, "Messages: {}", archive.message_count())?;

    if let Some(oldest) = dated.iter().min() {
        writeln!(out, "Oldest conversation: {}", oldest.format("%Y-%m-%d %H:%M:%S"))?;
    }
    if let Some(newest) = dated.iter().max() {
        writeln!(out, "Newest conversation: {}", newest.format("%Y-%m-%d %H:%M:%S"))?;
    }

    writeln!(out, "Load defects: {}", report.summary())?;
    for defect in &report.defects {
        writeln!(out, "  {}", sanitize_for_display(&defect.to_string()))?;
    }

    Ok(())
}

/// One line per conversation in view order; the first column is the index `show` takes.
pub fn list_conversations(viewer: &Viewer, out: &mut impl Write) -> Result<()> {
    if viewer.view_len() == 0 {
        writeln!(out, "No conversations match")?;
        return Ok(());
    }

    for (idx, conversation) in viewer.view_conversations().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<16}  {:>4}  {}",
            idx,
            list_date(conversation.create_time.as_ref()),
            conversation.thread.len(),
            sanitize_for_display(&conversation.title)
        )?;
    }

    Ok(())
}

pub fn show_conversation(viewer: &Viewer, index: usize, json: bool, out: &mut impl Write) -> Result<()> {
    let conversation = viewer.select_conversation(index)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, conversation)
            .context("Failed to serialize conversation")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", sanitize_for_display(&conversation.title))?;
    writeln!(
        out,
        "Created: {} | Updated: {}",
        format_full(conversation.create_time.as_ref()),
        format_full(conversation.update_time.as_ref())
    )?;
    writeln!(out)?;
    write!(out, "{}", sanitize_for_display(&render_thread(&conversation.thread)))?;

    Ok(())
}
