use super::ConvertError;
use std::path::Path;

pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let bytes = std::fs::read(path)?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ConvertError::Pdf(e.to_string()))
}
