use serde::{Deserialize, Serialize};
use std::path::Path;

/// One uploaded document: the name it was uploaded under and its raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Declared size in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Upload name with its last extension stripped (`report.final.docx` -> `report.final`).
    pub fn base_name(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }
}

/// Outcome of running the conversion engine on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Converted { content: String },
    Failed { error: String },
}

impl ConversionResult {
    pub fn converted(content: impl Into<String>) -> Self {
        ConversionResult::Converted {
            content: content.into(),
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        ConversionResult::Failed {
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeReport {
    pub original_bytes: u64,
    pub converted_bytes: u64,
    pub original_human: String,
    pub converted_human: String,
    /// Negative when the converted text is larger than the upload.
    pub reduction_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Markdown,
    Text,
}

impl DownloadFormat {
    pub const ALL: [DownloadFormat; 2] = [DownloadFormat::Markdown, DownloadFormat::Text];

    pub fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Markdown => "md",
            DownloadFormat::Text => "txt",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            DownloadFormat::Markdown => "text/markdown",
            DownloadFormat::Text => "text/plain",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DownloadFormat::Markdown => "Download .md file",
            DownloadFormat::Text => "Download .txt file",
        }
    }
}

/// A downloadable copy of the converted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub format: DownloadFormat,
    pub file_name: String,
    pub content: String,
}

impl DownloadArtifact {
    pub fn for_upload(upload: &UploadedFile, format: DownloadFormat, content: &str) -> Self {
        Self {
            format,
            file_name: format!("{}_converted.{}", upload.base_name(), format.extension()),
            content: content.to_string(),
        }
    }

    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

/// Everything the presentation layer needs to render one upload.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Converted {
        name: String,
        content: String,
        downloads: Vec<DownloadArtifact>,
        size_report: SizeReport,
        /// Where the downloads were written, empty when downloads are disabled.
        saved_paths: Vec<String>,
    },
    ConversionFailed {
        name: String,
        error: String,
    },
    /// The file never reached the converter (rejected type or write failure).
    Aborted {
        name: String,
        error: String,
    },
}

impl FileOutcome {
    pub fn name(&self) -> &str {
        match self {
            FileOutcome::Converted { name, .. }
            | FileOutcome::ConversionFailed { name, .. }
            | FileOutcome::Aborted { name, .. } => name,
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            FileOutcome::Converted { .. } => OutcomeStatus::Converted,
            FileOutcome::ConversionFailed { .. } => OutcomeStatus::Failed,
            FileOutcome::Aborted { .. } => OutcomeStatus::Aborted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Converted,
    Failed,
    Aborted,
}
