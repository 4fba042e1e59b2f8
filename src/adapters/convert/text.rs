use super::ConvertError;
use std::path::Path;

pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let bytes = std::fs::read(path)?;
    Ok(decode(&bytes, path))
}

/// UTF-8 (a leading BOM is dropped); anything else is decoded lossily.
pub fn decode(bytes: &[u8], path: &Path) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::warn!(
                "⚠️ {} is not valid UTF-8 ({}), decoding lossily",
                path.display(),
                e
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
