//! Document-to-Markdown conversion engine.
//!
//! [`MarkdownConverter`] picks a reader from the file extension and hands the
//! parsing to a third-party crate:
//!
//! | extension            | reader                      |
//! |----------------------|-----------------------------|
//! | docx                 | `zip` + `quick-xml`         |
//! | pptx                 | `zip` + `quick-xml`         |
//! | xlsx, xls, ods       | `calamine`                  |
//! | pdf                  | `pdf-extract`               |
//! | html, htm            | `html2md`                   |
//! | csv                  | `csv`                       |
//! | txt, md              | UTF-8 passthrough           |
//! | zip                  | recursive, per entry        |
//!
//! Every failure, including a panic inside a parser, is returned as
//! [`ConversionResult::Failed`] carrying the parser's own message.

mod archive;
mod delimited;
mod docx;
mod html;
pub mod markdown;
mod ooxml;
mod pdf;
mod pptx;
mod text;
mod xlsx;

use crate::core::temp_store::TemporaryFileStore;
use crate::domain::model::ConversionResult;
use crate::domain::ports::DocumentConverter;
use crate::utils::error::ReaderError;
use crate::utils::validation::extension_of;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MAX_ARCHIVE_DEPTH: usize = 2;

const SUPPORTED_EXTENSIONS: &[&str] = &[
    "docx", "pptx", "xlsx", "xls", "ods", "pdf", "html", "htm", "csv", "txt", "md", "zip",
];

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] ReaderError),

    #[error("{0}")]
    Pdf(String),

    #[error("{0}")]
    InvalidDocument(String),

    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Archive nesting exceeds {0} level(s)")]
    ArchiveTooDeep(usize),

    #[error("Parser panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    temp_store: TemporaryFileStore,
    max_archive_depth: usize,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    pub fn new() -> Self {
        Self {
            temp_store: TemporaryFileStore::new(),
            max_archive_depth: DEFAULT_MAX_ARCHIVE_DEPTH,
        }
    }

    /// Temporary files for archive entries are created in `store`.
    pub fn with_temp_store(mut self, store: TemporaryFileStore) -> Self {
        self.temp_store = store;
        self
    }

    pub fn with_max_archive_depth(mut self, depth: usize) -> Self {
        self.max_archive_depth = depth;
        self
    }

    pub fn supports(extension: &str) -> bool {
        SUPPORTED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
    }

    pub(crate) fn temp_store(&self) -> &TemporaryFileStore {
        &self.temp_store
    }

    pub(crate) fn convert_at_depth(
        &self,
        path: &Path,
        depth: usize,
    ) -> Result<String, ConvertError> {
        let extension = path
            .to_str()
            .and_then(extension_of)
            .unwrap_or_default();

        match extension.as_str() {
            "docx" => docx::convert(path),
            "pptx" => pptx::convert(path),
            "xlsx" | "xls" | "ods" => xlsx::convert(path),
            "pdf" => pdf::convert(path),
            "html" | "htm" => html::convert(path),
            "csv" => delimited::convert(path),
            "txt" | "md" => text::convert(path),
            "zip" if depth >= self.max_archive_depth => {
                Err(ConvertError::ArchiveTooDeep(self.max_archive_depth))
            }
            "zip" => archive::convert(self, path, depth),
            _ => Err(ConvertError::UnsupportedExtension(extension)),
        }
    }
}

impl DocumentConverter for MarkdownConverter {
    fn convert(&self, path: &Path) -> ConversionResult {
        tracing::debug!("Converting {}", path.display());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.convert_at_depth(path, 0)));
        match outcome {
            Ok(Ok(content)) => ConversionResult::converted(markdown::normalize(&content)),
            Ok(Err(e)) => ConversionResult::failed(e),
            Err(payload) => {
                ConversionResult::failed(ConvertError::Panicked(panic_message(payload.as_ref())))
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
