use crate::core::metrics;
use crate::core::temp_store::TemporaryFileStore;
use crate::core::{ConfigProvider, DocumentConverter, Pipeline, Storage};
use crate::domain::model::{
    ConversionResult, DownloadArtifact, DownloadFormat, FileOutcome, UploadedFile,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_file_extension;
use std::sync::Arc;

/// Runs a single upload through the temporary store, the conversion engine
/// and the size calculator, then saves the downloads.
pub struct FileProcessor<C: DocumentConverter, S: Storage, P: ConfigProvider> {
    converter: Arc<C>,
    storage: S,
    config: P,
    temp_store: TemporaryFileStore,
}

impl<C: DocumentConverter, S: Storage, P: ConfigProvider> FileProcessor<C, S, P> {
    pub fn new(converter: Arc<C>, storage: S, config: P) -> Self {
        let temp_store = match config.temp_dir() {
            Some(dir) => TemporaryFileStore::in_dir(dir),
            None => TemporaryFileStore::new(),
        };

        Self {
            converter,
            storage,
            config,
            temp_store,
        }
    }

    /// Stores the upload, converts it and releases the temporary file.
    /// The handle is released here on the normal path and by `Drop` if the
    /// converter unwinds.
    pub fn convert_upload(&self, upload: &UploadedFile) -> Result<ConversionResult> {
        let mut handle = self.temp_store.acquire(upload.name(), upload.content())?;
        let result = self.converter.convert(handle.path());
        handle.release();
        Ok(result)
    }

    async fn save_downloads(&self, downloads: &[DownloadArtifact]) -> Result<Vec<String>> {
        let mut saved = Vec::with_capacity(downloads.len());
        for artifact in downloads {
            let path = self
                .storage
                .write_file(&artifact.file_name, artifact.content.as_bytes())
                .await?;
            saved.push(path);
        }
        Ok(saved)
    }
}

#[async_trait::async_trait]
impl<C: DocumentConverter, S: Storage, P: ConfigProvider> Pipeline for FileProcessor<C, S, P> {
    async fn process(&self, upload: &UploadedFile) -> FileOutcome {
        let name = upload.name().to_string();

        if let Err(e) = validate_file_extension(&name, self.config.accepted_extensions()) {
            tracing::warn!("⚠️ Rejected {}: {}", name, e);
            return FileOutcome::Aborted {
                name,
                error: e.to_string(),
            };
        }

        tracing::info!("📄 Reading {} ({} bytes)", name, upload.size());

        let content = match self.convert_upload(upload) {
            Ok(ConversionResult::Converted { content }) => content,
            Ok(ConversionResult::Failed { error }) => {
                tracing::warn!("⚠️ Could not read {}: {}", name, error);
                return FileOutcome::ConversionFailed { name, error };
            }
            Err(e) => {
                tracing::error!("❌ Could not store {} for conversion: {}", name, e);
                return FileOutcome::Aborted {
                    name,
                    error: e.to_string(),
                };
            }
        };

        let size_report = metrics::compute(upload.size(), &content);
        let downloads: Vec<DownloadArtifact> = DownloadFormat::ALL
            .iter()
            .map(|format| DownloadArtifact::for_upload(upload, *format, &content))
            .collect();

        let saved_paths = if self.config.write_downloads() {
            match self.save_downloads(&downloads).await {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::error!("❌ Could not save downloads for {}: {}", name, e);
                    return FileOutcome::Aborted {
                        name,
                        error: e.to_string(),
                    };
                }
            }
        } else {
            Vec::new()
        };

        tracing::info!(
            "✅ Converted {}: {} -> {} ({})",
            name,
            size_report.original_human,
            size_report.converted_human,
            size_report.efficiency_message()
        );

        FileOutcome::Converted {
            name,
            content,
            downloads,
            size_report,
            saved_paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OutcomeStatus;
    use crate::utils::error::ReaderError;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail_writes: bool,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                fail_writes: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::new()
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            if self.fail_writes {
                return Err(ReaderError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(format!("mock://{}", path))
        }
    }

    /// Echoes the file content back, failing for names containing "corrupt".
    /// Remembers every path it saw so tests can check cleanup.
    #[derive(Default)]
    struct EchoConverter {
        seen: StdMutex<Vec<PathBuf>>,
    }

    impl DocumentConverter for EchoConverter {
        fn convert(&self, path: &Path) -> ConversionResult {
            self.seen.lock().unwrap().push(path.to_path_buf());
            if path.to_string_lossy().contains("corrupt") {
                return ConversionResult::failed("File is not a zip file");
            }
            match std::fs::read_to_string(path) {
                Ok(text) => ConversionResult::converted(text),
                Err(e) => ConversionResult::failed(e),
            }
        }
    }

    struct TestConfig {
        temp_dir: PathBuf,
        accepted: Vec<String>,
        write_downloads: bool,
    }

    impl TestConfig {
        fn new(temp_dir: &Path) -> Self {
            Self {
                temp_dir: temp_dir.to_path_buf(),
                accepted: ["txt", "docx", "pdf"].iter().map(|s| s.to_string()).collect(),
                write_downloads: true,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn output_path(&self) -> &str {
            "mock"
        }

        fn accepted_extensions(&self) -> &[String] {
            &self.accepted
        }

        fn temp_dir(&self) -> Option<&Path> {
            Some(&self.temp_dir)
        }

        fn write_downloads(&self) -> bool {
            self.write_downloads
        }

        fn max_archive_depth(&self) -> usize {
            1
        }
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_successful_conversion_saves_identical_downloads() {
        let temp = TempDir::new().unwrap();
        let storage = MockStorage::new();
        let converter = Arc::new(EchoConverter::default());
        let processor =
            FileProcessor::new(converter.clone(), storage.clone(), TestConfig::new(temp.path()));

        let upload = UploadedFile::new("notes.txt", "é".repeat(250).into_bytes());
        let outcome = processor.process(&upload).await;

        let FileOutcome::Converted {
            content,
            downloads,
            size_report,
            saved_paths,
            ..
        } = outcome
        else {
            panic!("expected conversion");
        };

        assert_eq!(size_report.original_human, "500 bytes");
        assert_eq!(size_report.converted_human, "500 bytes");
        assert_eq!(downloads.len(), 2);
        for artifact in &downloads {
            assert_eq!(artifact.content, content);
        }
        assert_eq!(
            saved_paths,
            vec!["mock://notes_converted.md", "mock://notes_converted.txt"]
        );
        assert_eq!(
            storage.get_file("notes_converted.txt").await.unwrap(),
            content.as_bytes()
        );
        assert!(dir_is_empty(temp.path()));
    }

    #[tokio::test]
    async fn test_conversion_failure_is_isolated_and_cleaned_up() {
        let temp = TempDir::new().unwrap();
        let storage = MockStorage::new();
        let converter = Arc::new(EchoConverter::default());
        let processor =
            FileProcessor::new(converter.clone(), storage.clone(), TestConfig::new(temp.path()));

        let outcome = processor
            .process(&UploadedFile::new("corrupt.docx", b"garbage".to_vec()))
            .await;

        match outcome {
            FileOutcome::ConversionFailed { name, error } => {
                assert_eq!(name, "corrupt.docx");
                assert_eq!(error, "File is not a zip file");
            }
            other => panic!("expected conversion failure, got {:?}", other),
        }

        let seen = converter.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].exists());
        assert!(dir_is_empty(temp.path()));
        assert!(storage.get_file("corrupt_converted.md").await.is_none());
    }

    #[tokio::test]
    async fn test_rejected_extension_never_reaches_converter() {
        let temp = TempDir::new().unwrap();
        let converter = Arc::new(EchoConverter::default());
        let processor =
            FileProcessor::new(converter.clone(), MockStorage::new(), TestConfig::new(temp.path()));

        let outcome = processor
            .process(&UploadedFile::new("setup.exe", b"MZ".to_vec()))
            .await;

        assert_eq!(outcome.status(), OutcomeStatus::Aborted);
        assert!(converter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_temp_dir_aborts_file() {
        let temp = TempDir::new().unwrap();
        let config = TestConfig::new(&temp.path().join("missing"));
        let converter = Arc::new(EchoConverter::default());
        let processor = FileProcessor::new(converter.clone(), MockStorage::new(), config);

        let outcome = processor
            .process(&UploadedFile::new("notes.txt", b"hello".to_vec()))
            .await;

        match outcome {
            FileOutcome::Aborted { error, .. } => assert!(error.starts_with("IO error")),
            other => panic!("expected abort, got {:?}", other),
        }
        assert!(converter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_download_write_failure_aborts_file() {
        let temp = TempDir::new().unwrap();
        let processor = FileProcessor::new(
            Arc::new(EchoConverter::default()),
            MockStorage::failing(),
            TestConfig::new(temp.path()),
        );

        let outcome = processor
            .process(&UploadedFile::new("notes.txt", b"hello".to_vec()))
            .await;

        assert_eq!(outcome.status(), OutcomeStatus::Aborted);
        assert!(dir_is_empty(temp.path()));
    }

    #[tokio::test]
    async fn test_downloads_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let storage = MockStorage::new();
        let mut config = TestConfig::new(temp.path());
        config.write_downloads = false;
        let processor =
            FileProcessor::new(Arc::new(EchoConverter::default()), storage.clone(), config);

        let outcome = processor
            .process(&UploadedFile::new("notes.txt", b"hello".to_vec()))
            .await;

        let FileOutcome::Converted {
            downloads,
            saved_paths,
            ..
        } = outcome
        else {
            panic!("expected conversion");
        };
        assert_eq!(downloads.len(), 2);
        assert!(saved_paths.is_empty());
        assert!(storage.get_file("notes_converted.md").await.is_none());
    }
}
