//! Pure filter/sort transformation over an archive.
//!
//! Nothing here touches the UI: [`apply_filters`] maps (conversations, query) to an
//! ordered list of indices, which the viewer and the CLI both consume.

pub mod apply;
pub mod query;

pub use apply::{apply_filters, sort_view};
pub use query::{KeywordSet, SortMode, ViewQuery};
