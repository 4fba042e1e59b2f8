use crate::domain::model::UploadedFile;
use crate::utils::error::Result;
use std::path::Path;

/// Reads a file from disk as an upload named after its final path component.
pub async fn read_upload(path: &Path) -> Result<UploadedFile> {
    let content = tokio::fs::read(path).await?;
    Ok(UploadedFile::new(upload_name(path), content))
}

pub fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
