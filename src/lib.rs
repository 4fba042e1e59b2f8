pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, MarkdownConverter};
pub use config::{settings::Settings, toml_config::TomlConfig};
pub use core::{
    engine::ReaderEngine,
    processor::FileProcessor,
    temp_store::{TemporaryFileHandle, TemporaryFileStore},
};
pub use domain::model::{
    ConversionResult, DownloadArtifact, DownloadFormat, FileOutcome, OutcomeStatus, SizeReport,
    UploadedFile,
};
pub use utils::error::{ReaderError, Result};
