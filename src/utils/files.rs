use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ArchiveError;

/// Maximum archive size: 512MB. Larger exports would need a streaming parser.
pub const MAX_ARCHIVE_SIZE_BYTES: u64 = 512 * 1024 * 1024;

/// Open an archive file for reading, mapping a missing path to [`ArchiveError::NotFound`].
///
/// The size check runs on the open handle so the file cannot be swapped between
/// the check and the read.
pub fn open_archive_file(path: &Path) -> Result<File, ArchiveError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArchiveError::NotFound { path: path.to_path_buf() },
        _ => ArchiveError::Io { path: path.to_path_buf(), source },
    })?;
    validate_file_size(&file, path, MAX_ARCHIVE_SIZE_BYTES)?;
    Ok(file)
}

/// Validates that an open file is a regular file within `max` bytes
pub fn validate_file_size(file: &File, path: &Path, max: u64) -> Result<(), ArchiveError> {
    let metadata =
        file.metadata().map_err(|source| ArchiveError::Io { path: path.to_path_buf(), source })?;

    // A directory opens fine on unix but is not a readable archive
    if !metadata.is_file() {
        return Err(ArchiveError::NotFound { path: path.to_path_buf() });
    }

    let size = metadata.len();
    if size > max {
        return Err(ArchiveError::TooLarge { path: path.to_path_buf(), size, max });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn test_open_missing_file() {
        let err = open_archive_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_open_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        assert!(open_archive_file(file.path()).is_ok());
    }

    #[test]
    fn test_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        file.flush().unwrap();

        let handle = File::open(file.path()).unwrap();
        let err = validate_file_size(&handle, file.path(), 4).unwrap_err();
        assert!(matches!(err, ArchiveError::TooLarge { size: 9, max: 4, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_is_not_an_archive() {
        let dir = TempDir::new().unwrap();
        let err = open_archive_file(dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }
}
