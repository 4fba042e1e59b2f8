use super::markdown;
use super::ConvertError;
use csv::ReaderBuilder;
use std::path::Path;

/// CSV as a pipe table; the first record is the header row.
pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(markdown::table(&rows))
}
