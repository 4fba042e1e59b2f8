use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Storage rooted at a local directory; parents are created on write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents_and_returns_path() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("out"));

        let written = tokio_test::block_on(storage.write_file("nested/a_converted.md", b"# A"))
            .unwrap();

        let expected = dir.path().join("out").join("nested").join("a_converted.md");
        assert_eq!(written, expected.to_string_lossy());
        assert_eq!(std::fs::read(&expected).unwrap(), b"# A");
    }

    #[test]
    fn test_write_overwrites_existing_download() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        tokio_test::block_on(storage.write_file("data_converted.txt", b"first")).unwrap();
        tokio_test::block_on(storage.write_file("data_converted.txt", b"second")).unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("data_converted.txt")).unwrap(),
            b"second"
        );
    }

    #[test]
    fn test_write_into_a_file_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let storage = LocalStorage::new(&blocker);

        let err = tokio_test::block_on(storage.write_file("a_converted.md", b"# A")).unwrap_err();
        assert!(matches!(err, crate::utils::error::ReaderError::IoError(_)));
    }
}
