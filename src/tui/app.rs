//! TUI application state and event handling.
//!
//! `App` wraps a [`Viewer`] and adds what only the interactive surface needs:
//!
//! - **Selection and focus**: which view row is highlighted, and whether arrow keys move
//!   the list selection or scroll the thread pane
//! - **Input modes**: typing edits the live search; Ctrl+K switches to keyword entry
//! - **Status messages**: transient feedback for reloads, keyword changes and clipboard
//! - **Dirty state tracking**: redraw only when state changes (or periodically for resizes)
//!
//! All filtering and sorting is delegated to the viewer; `App` only reflects its output.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_thread_to_clipboard;
use crate::viewer::Viewer;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Rows moved by PageUp/PageDown
const PAGE_SIZE: isize = 10;
const MAX_INPUT_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Pane that receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Thread,
}

/// What typed characters edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    Keyword,
}

pub struct App {
    viewer: Viewer,
    selected_idx: usize,
    focus: Focus,
    input_mode: InputMode,
    search_input: String,
    keyword_input: String,
    thread_scroll: u16,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(viewer: Viewer) -> Self {
        let search_input = viewer.query().search.clone();
        Self {
            viewer,
            selected_idx: 0,
            focus: Focus::List,
            input_mode: InputMode::Search,
            search_input,
            keyword_input: String::new(),
            thread_scroll: 0,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    fn error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            viewer: &self.viewer,
            selected_idx: self.selected_idx,
            focus: self.focus,
            input_mode: self.input_mode,
            search_input: &self.search_input,
            keyword_input: &self.keyword_input,
            thread_scroll: self.thread_scroll,
            status_message: self.status_message.as_ref(),
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => self.cancel(),
            Action::MoveUp => self.navigate(-1),
            Action::MoveDown => self.navigate(1),
            Action::PageUp => self.navigate(-PAGE_SIZE),
            Action::PageDown => self.navigate(PAGE_SIZE),
            Action::Submit => self.submit(),
            Action::BeginKeyword => {
                self.input_mode = InputMode::Keyword;
                self.keyword_input.clear();
                self.needs_redraw = true;
            }
            Action::RemoveKeyword => match self.viewer.remove_last_keyword() {
                Some(keyword) => {
                    self.after_view_change();
                    self.success(format!("✓ Removed keyword '{}'", keyword));
                }
                None => self.error("✗ No keywords to remove"),
            },
            Action::CycleSort => {
                let mode = self.viewer.cycle_sort();
                self.after_view_change();
                self.success(format!("Sort: {}", mode));
            }
            Action::Reload => self.reload(),
            Action::CopyToClipboard => self.copy_selected(),
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::List => Focus::Thread,
                    Focus::Thread => Focus::List,
                };
                self.needs_redraw = true;
            }
            Action::Input(c) => self.input_char(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    fn cancel(&mut self) {
        if self.input_mode == InputMode::Keyword {
            self.input_mode = InputMode::Search;
            self.keyword_input.clear();
            self.needs_redraw = true;
        } else if !self.search_input.is_empty() {
            self.search_input.clear();
            self.viewer.set_search("");
            self.after_view_change();
        } else {
            self.should_quit = true;
        }
    }

    fn submit(&mut self) {
        match self.input_mode {
            InputMode::Keyword => {
                let keyword = std::mem::take(&mut self.keyword_input);
                self.input_mode = InputMode::Search;
                if self.viewer.add_keyword(&keyword) {
                    self.after_view_change();
                    self.success(format!("✓ Added keyword '{}'", keyword.trim()));
                } else if keyword.trim().is_empty() {
                    self.needs_redraw = true;
                } else {
                    self.error(format!("✗ Keyword '{}' is already active", keyword.trim()));
                }
            }
            InputMode::Search => {
                self.focus = Focus::Thread;
                self.needs_redraw = true;
            }
        }
    }

    fn navigate(&mut self, delta: isize) {
        match self.focus {
            Focus::List => self.move_selection(delta),
            Focus::Thread => self.scroll_thread(delta),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.viewer.view_len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.thread_scroll = 0;
            self.needs_redraw = true;
        }
    }

    fn scroll_thread(&mut self, delta: isize) {
        let old = self.thread_scroll;
        self.thread_scroll = (self.thread_scroll as isize + delta).clamp(0, u16::MAX as isize) as u16;
        if old != self.thread_scroll {
            self.needs_redraw = true;
        }
    }

    fn input_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::Keyword => {
                if self.keyword_input.len() < MAX_INPUT_LEN {
                    self.keyword_input.push(c);
                    self.needs_redraw = true;
                }
            }
            InputMode::Search => {
                if self.search_input.len() < MAX_INPUT_LEN {
                    self.search_input.push(c);
                    self.viewer.set_search(self.search_input.clone());
                    self.after_view_change();
                }
            }
        }
    }

    fn delete_char(&mut self) {
        match self.input_mode {
            InputMode::Keyword => {
                if self.keyword_input.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            InputMode::Search => {
                if self.search_input.pop().is_some() {
                    self.viewer.set_search(self.search_input.clone());
                    self.after_view_change();
                }
            }
        }
    }

    fn reload(&mut self) {
        match self.viewer.reload() {
            Ok(report) => {
                let summary = (!report.is_clean()).then(|| report.summary());
                let count = self.viewer.archive().len();
                let text = match summary {
                    None => format!("✓ Reloaded {} conversations", count),
                    Some(summary) => format!("✓ Reloaded {} conversations ({})", count, summary),
                };
                self.clamp_selection();
                self.success(text);
            }
            Err(e) => self.error(format!("✗ Reload failed: {}", e)),
        }
    }

    fn copy_selected(&mut self) {
        let result = match self.viewer.select_conversation(self.selected_idx) {
            Ok(conversation) => copy_thread_to_clipboard(conversation),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(bytes) => self.success(format!("✓ Copied thread to clipboard ({} bytes)", bytes)),
            Err(e) => self.error(format!("✗ Clipboard error: {}", e)),
        }
    }

    /// The view was re-derived: restart at the top
    fn after_view_change(&mut self) {
        self.selected_idx = 0;
        self.thread_scroll = 0;
        self.needs_redraw = true;
    }

    fn clamp_selection(&mut self) {
        let total = self.viewer.view_len();
        self.selected_idx = if total == 0 { 0 } else { self.selected_idx.min(total - 1) };
        self.thread_scroll = 0;
        self.needs_redraw = true;
    }
}
