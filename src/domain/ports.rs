use crate::domain::model::{ConversionResult, FileOutcome, UploadedFile};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    /// Writes `data` and returns the full path it was written to.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn accepted_extensions(&self) -> &[String];
    fn temp_dir(&self) -> Option<&Path>;
    fn write_downloads(&self) -> bool;
    fn max_archive_depth(&self) -> usize;
}

/// The document-to-text engine. Implementations hold no per-call state so a
/// single instance can be shared by every file in a batch.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, path: &Path) -> ConversionResult;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Runs one upload through store, convert and load. Never fails: every
    /// problem is reported in the returned outcome.
    async fn process(&self, upload: &UploadedFile) -> FileOutcome;
}
