//! Viewer Shell state, independent of any UI toolkit.
//!
//! [`Viewer`] owns the immutable [`Archive`], the active [`ViewQuery`] and the derived
//! view (indices into the archive). Every query mutation re-derives the view before
//! returning, so callers never observe a stale view.

mod render;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use render::render_thread;

use crate::error::{ArchiveError, ViewError};
use crate::filters::{SortMode, ViewQuery, apply_filters};
use crate::models::{Archive, Conversation, LoadReport};
use crate::parsers::load_archive;

#[derive(Debug, Clone)]
pub struct Viewer {
    archive_path: PathBuf,
    archive: Archive,
    query: ViewQuery,
    view: Vec<usize>,
}

impl Viewer {
    /// Load the archive at `path` and derive the unfiltered view.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let archive_path = path.into();
        let archive = load_archive(&archive_path)?;
        Ok(Self::from_archive(archive_path, archive))
    }

    /// Wrap an already-loaded archive. `path` is used by [`Viewer::reload`].
    pub fn from_archive(path: impl Into<PathBuf>, archive: Archive) -> Self {
        let mut viewer =
            Self { archive_path: path.into(), archive, query: ViewQuery::new(), view: Vec::new() };
        viewer.apply_filters();
        viewer
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn report(&self) -> &LoadReport {
        &self.archive.report
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// Archive indices of the derived view, in display order
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Conversations of the derived view, in display order
    pub fn view_conversations(&self) -> impl Iterator<Item = &Conversation> {
        self.view.iter().map(|&idx| &self.archive.conversations[idx])
    }

    /// Recompute the derived view from the archive and current query.
    pub fn apply_filters(&mut self) {
        self.view = apply_filters(&self.archive.conversations, &self.query);
    }

    /// Replace the query wholesale
    pub fn set_query(&mut self, query: ViewQuery) {
        self.query = query;
        self.apply_filters();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.apply_filters();
    }

    /// Returns false if the keyword was blank or already active.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let added = self.query.keywords.insert(keyword);
        if added {
            self.apply_filters();
        }
        added
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let removed = self.query.keywords.remove(keyword);
        if removed {
            self.apply_filters();
        }
        removed
    }

    pub fn remove_last_keyword(&mut self) -> Option<String> {
        let removed = self.query.keywords.pop();
        if removed.is_some() {
            self.apply_filters();
        }
        removed
    }

    pub fn clear_keywords(&mut self) {
        if !self.query.keywords.is_empty() {
            self.query.keywords.clear();
            self.apply_filters();
        }
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        if self.query.sort != sort {
            self.query.sort = sort;
            self.apply_filters();
        }
    }

    /// Advance to the next sort mode and return it
    pub fn cycle_sort(&mut self) -> SortMode {
        self.set_sort(self.query.sort.next());
        self.query.sort
    }

    /// Conversation at `view_index` in the current view.
    ///
    /// The view can shrink between rendering and selection, so the index is
    /// checked against the view as it is now.
    pub fn select_conversation(&self, view_index: usize) -> Result<&Conversation, ViewError> {
        self.view
            .get(view_index)
            .map(|&idx| &self.archive.conversations[idx])
            .ok_or(ViewError::SelectionOutOfRange { index: view_index, len: self.view.len() })
    }

    /// Reload from the same path, keeping the current query.
    ///
    /// On failure the previous archive and view are left untouched.
    pub fn reload(&mut self) -> Result<&LoadReport, ArchiveError> {
        let archive = match load_archive(&self.archive_path) {
            Ok(archive) => archive,
            Err(e) => {
                warn!(path = %self.archive_path.display(), "Reload failed: {}", e);
                return Err(e);
            }
        };

        self.archive = archive;
        self.apply_filters();
        info!(conversations = self.archive.len(), visible = self.view.len(), "Reloaded archive");
        Ok(&self.archive.report)
    }
}
