use crate::utils::error::{ReaderError, Result};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ReaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Lower-cased extension of a file name, without the dot.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Extensions must be bare (`"docx"`, not `".docx"`) and non-empty.
pub fn validate_extension_list(field_name: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Err(ReaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one extension must be accepted".to_string(),
        });
    }

    for ext in extensions {
        let trimmed = ext.trim();
        if trimmed.is_empty() || trimmed.contains('.') || trimmed.contains('/') {
            return Err(ReaderError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: ext.clone(),
                reason: "Extensions must be bare names such as 'docx'".to_string(),
            });
        }
    }

    Ok(())
}

/// Checks that an upload's extension is one of `allowed_extensions`.
pub fn validate_file_extension(name: &str, allowed_extensions: &[String]) -> Result<()> {
    let allowed_set: HashSet<String> = allowed_extensions
        .iter()
        .map(|ext| ext.to_ascii_lowercase())
        .collect();

    match extension_of(name) {
        Some(extension) if allowed_set.contains(&extension) => Ok(()),
        _ => Err(ReaderError::UnsupportedFileType {
            name: name.to_string(),
            accepted: allowed_extensions.join(", "),
        }),
    }
}
