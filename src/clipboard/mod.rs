//! Copy a conversation's rendered thread to the system clipboard.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::models::Conversation;
use crate::viewer::render_thread;

/// Maximum clipboard payload (16MB); long threads beyond this are refused
const MAX_CLIPBOARD_SIZE: usize = 16 * 1024 * 1024;

/// Clipboard seam so the copy path can be tested headless
trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<()>;
}

struct SystemClipboard(Clipboard);

impl SystemClipboard {
    fn new() -> Result<Self> {
        Ok(Self(Clipboard::new().context("Failed to initialize clipboard")?))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        self.0.set_text(text).context("Failed to set clipboard contents")
    }
}

/// Title line followed by the plain-text thread
pub fn clipboard_text(conversation: &Conversation) -> Result<String> {
    if conversation.thread.is_empty() {
        bail!("'{}' has no messages to copy", conversation.title);
    }

    let text = format!("{}\n\n{}", conversation.title, render_thread(&conversation.thread));
    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Thread too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }
    Ok(text)
}

fn copy_with_sink(conversation: &Conversation, sink: &mut dyn ClipboardSink) -> Result<usize> {
    let text = clipboard_text(conversation)?;
    let len = text.len();
    sink.set_text(text)?;
    Ok(len)
}

/// Copy the conversation's thread to the system clipboard, returning the byte count.
///
/// Validation runs before the clipboard is opened, so an empty thread reports
/// that rather than a clipboard error on headless machines.
pub fn copy_thread_to_clipboard(conversation: &Conversation) -> Result<usize> {
    clipboard_text(conversation)?;
    let mut clipboard = SystemClipboard::new()?;
    copy_with_sink(conversation, &mut clipboard)
}
