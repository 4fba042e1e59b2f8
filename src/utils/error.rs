use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("'{name}' is not an accepted file type (accepted: {accepted})")]
    UnsupportedFileType { name: String, accepted: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReaderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReaderError::IoError(_) => ErrorCategory::Io,
            ReaderError::ConfigValidationError { .. }
            | ReaderError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReaderError::UnsupportedFileType { .. } => ErrorCategory::Input,
            ReaderError::SerializationError(_) => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReaderError::IoError(e) => format!("Could not access the file system: {}", e),
            ReaderError::UnsupportedFileType { name, .. } => {
                format!("{} was skipped because its type is not supported", name)
            }
            ReaderError::ConfigValidationError { field, message } => {
                format!("The configuration is invalid ({}): {}", field, message)
            }
            ReaderError::InvalidConfigValueError { field, reason, .. } => {
                format!("The setting '{}' is invalid: {}", field, reason)
            }
            ReaderError::SerializationError(e) => {
                format!("The batch report could not be written: {}", e)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => {
                "Check that the temporary and output directories exist and are writable"
            }
            ErrorCategory::Configuration => {
                "Review the command line flags and the TOML configuration file"
            }
            ErrorCategory::Input => {
                "Upload one of the accepted formats, or extend reader.accepted_extensions"
            }
            ErrorCategory::Processing => "Rerun without --report to skip the JSON report",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
