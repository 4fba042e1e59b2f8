//! Scoped temporary files for uploads.
//!
//! The converter picks its parser from the file extension, so every upload is
//! written to disk under a unique name that still ends in `_{original name}`.
//! A [`TemporaryFileHandle`] owns that file: [`TemporaryFileHandle::release`]
//! deletes it and may be called any number of times, and dropping the handle
//! releases it as well, so every exit path cleans up.

use crate::utils::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

const TEMP_PREFIX: &str = "docreader-";

#[derive(Debug, Clone, Default)]
pub struct TemporaryFileStore {
    dir: Option<PathBuf>,
}

impl TemporaryFileStore {
    /// Store backed by the OS temporary directory.
    pub fn new() -> Self {
        Self { dir: None }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Persists `content` to a fresh temporary file.
    ///
    /// Fails with an IO error when the directory cannot be written. A file
    /// that was created but could not be fully written is removed before the
    /// error is returned.
    pub fn acquire(&self, name: &str, content: &[u8]) -> Result<TemporaryFileHandle> {
        let suffix = suffix_for(name);
        let mut builder = Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(&suffix);

        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        file.write_all(content)?;
        file.flush()?;

        let path = file.path().to_path_buf();
        tracing::debug!(
            "Stored {} ({} bytes) at {}",
            name,
            content.len(),
            path.display()
        );

        Ok(TemporaryFileHandle {
            file: Some(file),
            path,
            upload_name: name.to_string(),
        })
    }
}

/// Keeps only the final path component and drops anything that could be
/// read as a directory by the temp file builder.
fn suffix_for(name: &str) -> String {
    let file_name = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    if file_name.is_empty() {
        String::new()
    } else {
        format!("_{}", file_name)
    }
}

#[derive(Debug)]
pub struct TemporaryFileHandle {
    file: Option<NamedTempFile>,
    path: PathBuf,
    upload_name: String,
}

impl TemporaryFileHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_released(&self) -> bool {
        self.file.is_none()
    }

    /// Deletes the temporary file. Later calls are no-ops, and a file that has
    /// already disappeared from disk is not an error.
    pub fn release(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };

        match file.close() {
            Ok(()) => tracing::debug!(
                "Removed temporary copy of {} at {}",
                self.upload_name,
                self.path.display()
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => tracing::debug!(
                "Temporary copy of {} was already gone",
                self.upload_name
            ),
            Err(e) => tracing::warn!(
                "⚠️ Could not remove temporary copy of {} at {}: {}",
                self.upload_name,
                self.path.display(),
                e
            ),
        }
    }
}

impl Drop for TemporaryFileHandle {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReaderError;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_writes_content_and_keeps_suffix() {
        let dir = TempDir::new().unwrap();
        let store = TemporaryFileStore::in_dir(dir.path());

        let handle = store.acquire("report.docx", b"hello").unwrap();

        assert!(handle.path().starts_with(dir.path()));
        assert!(handle
            .path()
            .to_str()
            .unwrap()
            .ends_with("_report.docx"));
        assert_eq!(std::fs::read(handle.path()).unwrap(), b"hello");
    }

    #[test]
    fn test_acquire_same_name_gives_unique_paths() {
        let dir = TempDir::new().unwrap();
        let store = TemporaryFileStore::in_dir(dir.path());

        let first = store.acquire("data.csv", b"a").unwrap();
        let second = store.acquire("data.csv", b"b").unwrap();

        assert_ne!(first.path(), second.path());
        assert_eq!(std::fs::read(first.path()).unwrap(), b"a");
        assert_eq!(std::fs::read(second.path()).unwrap(), b"b");
    }

    #[test]
    fn test_release_is_idempotent_and_isolated() {
        let dir = TempDir::new().unwrap();
        let store = TemporaryFileStore::in_dir(dir.path());

        let mut first = store.acquire("a.txt", b"a").unwrap();
        let second = store.acquire("b.txt", b"b").unwrap();
        let first_path = first.path().to_path_buf();

        first.release();
        first.release();

        assert!(first.is_released());
        assert!(!first_path.exists());
        assert!(second.path().exists());
        assert!(!second.is_released());
    }

    #[test]
    fn test_release_tolerates_externally_removed_file() {
        let dir = TempDir::new().unwrap();
        let store = TemporaryFileStore::in_dir(dir.path());

        let mut handle = store.acquire("gone.pdf", b"%PDF").unwrap();
        std::fs::remove_file(handle.path()).unwrap();

        handle.release();
        assert!(handle.is_released());
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = TemporaryFileStore::in_dir(dir.path());

        let path = {
            let handle = store.acquire("scoped.html", b"<p>x</p>").unwrap();
            handle.path().to_path_buf()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_acquire_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = TemporaryFileStore::in_dir(dir.path().join("does-not-exist"));

        let err = store.acquire("report.docx", b"x").unwrap_err();
        assert!(matches!(err, ReaderError::IoError(_)));
    }

    #[test]
    fn test_suffix_strips_directories() {
        assert_eq!(suffix_for("report.docx"), "_report.docx");
        assert_eq!(suffix_for("../../etc/passwd.txt"), "_passwd.txt");
        assert_eq!(suffix_for("C:\\Users\\me\\notes.txt"), "_notes.txt");
        assert_eq!(suffix_for(".."), "");
        assert_eq!(suffix_for(""), "");
    }
}
