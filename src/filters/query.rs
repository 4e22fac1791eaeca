//! Query state for the derived view: search text, keyword set and sort mode.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Ordering of the derived view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Creation time descending; conversations without one go last
    #[default]
    NewestFirst,
    /// Creation time ascending; conversations without one go first
    OldestFirst,
    /// Case-insensitive title order
    TitleAscending,
}

impl SortMode {
    pub const ALL: [SortMode; 3] =
        [SortMode::NewestFirst, SortMode::OldestFirst, SortMode::TitleAscending];

    /// Next mode in [`SortMode::ALL`], wrapping around
    pub fn next(self) -> Self {
        match self {
            SortMode::NewestFirst => SortMode::OldestFirst,
            SortMode::OldestFirst => SortMode::TitleAscending,
            SortMode::TitleAscending => SortMode::NewestFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::NewestFirst => "Newest first",
            SortMode::OldestFirst => "Oldest first",
            SortMode::TitleAscending => "Title (A-Z)",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "newest-first" => Ok(SortMode::NewestFirst),
            "oldest" | "oldest-first" => Ok(SortMode::OldestFirst),
            "title" | "title-ascending" => Ok(SortMode::TitleAscending),
            other => Err(anyhow!("Unknown sort mode '{}' (expected newest, oldest or title)", other)),
        }
    }
}

/// Active keywords in insertion order. Duplicates (ignoring case) are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword. Returns false if it is blank or already present.
    pub fn insert(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.contains(keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    /// Remove a keyword (case-insensitive). Returns false if it was not present.
    pub fn remove(&mut self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        let before = self.keywords.len();
        self.keywords.retain(|k| k.to_lowercase() != needle);
        self.keywords.len() != before
    }

    /// Remove the most recently added keyword
    pub fn pop(&mut self) -> Option<String> {
        self.keywords.pop()
    }

    pub fn clear(&mut self) {
        self.keywords.clear();
    }

    pub fn contains(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        self.keywords.iter().any(|k| k.to_lowercase() == needle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        for keyword in iter {
            set.insert(keyword.as_ref());
        }
        set
    }
}

/// Complete filter/sort state. Empty search and no keywords means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub keywords: KeywordSet,
    pub sort: SortMode,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_keywords<S: AsRef<str>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().collect();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// True when no conversation can be excluded
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.keywords.is_empty()
    }
}
