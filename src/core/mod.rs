pub mod engine;
pub mod metrics;
pub mod processor;
pub mod temp_store;

pub use crate::domain::model::{ConversionResult, FileOutcome, SizeReport, UploadedFile};
pub use crate::domain::ports::{ConfigProvider, DocumentConverter, Pipeline, Storage};
pub use crate::utils::error::Result;
