use std::cmp::Ordering;

use super::query::{SortMode, ViewQuery};
use crate::models::Conversation;

/// Derive the view for `query`: indices into `conversations`, filtered then sorted.
///
/// Filter logic:
/// - Title must contain the search text (case-insensitive substring)
/// - Title must contain every keyword (logical AND, case-insensitive substring)
///
/// The sort is stable, so ties keep archive order. Pure: identical inputs always
/// give an identical view.
pub fn apply_filters(conversations: &[Conversation], query: &ViewQuery) -> Vec<usize> {
    let matcher = TitleMatcher::new(query);

    let mut view: Vec<usize> = conversations
        .iter()
        .enumerate()
        .filter(|(_, conversation)| matcher.matches(&conversation.title))
        .map(|(idx, _)| idx)
        .collect();

    sort_view(&mut view, conversations, query.sort);
    view
}

/// Lowercased search terms, prepared once per application
struct TitleMatcher {
    search: String,
    keywords: Vec<String>,
}

impl TitleMatcher {
    fn new(query: &ViewQuery) -> Self {
        Self {
            search: query.search.to_lowercase(),
            keywords: query.keywords.iter().map(str::to_lowercase).collect(),
        }
    }

    fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        title.contains(&self.search) && self.keywords.iter().all(|k| title.contains(k.as_str()))
    }
}

/// Stable sort of view indices by the mode's key
pub fn sort_view(view: &mut [usize], conversations: &[Conversation], mode: SortMode) {
    match mode {
        SortMode::NewestFirst => view.sort_by(|&a, &b| {
            compare_created(&conversations[b], &conversations[a])
        }),
        SortMode::OldestFirst => view.sort_by(|&a, &b| {
            compare_created(&conversations[a], &conversations[b])
        }),
        SortMode::TitleAscending => {
            view.sort_by_cached_key(|&idx| conversations[idx].title.to_lowercase())
        }
    }
}

/// Missing timestamps compare as earliest (`None < Some`)
fn compare_created(a: &Conversation, b: &Conversation) -> Ordering {
    a.create_time.cmp(&b.create_time)
}
