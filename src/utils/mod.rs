pub mod files;
pub mod paths;
pub mod terminal;

pub use files::{MAX_ARCHIVE_SIZE_BYTES, open_archive_file, validate_file_size};
pub use paths::format_path_with_tilde;
pub use terminal::sanitize_for_display;
