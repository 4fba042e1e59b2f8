use super::markdown;
use super::ConvertError;
use calamine::{open_workbook_auto, Reader};
use std::path::Path;

/// One `## {sheet}` section per worksheet, each rendered as a pipe table.
pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let mut workbook = open_workbook_auto(path)?;

    let mut sections = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        let rendered = markdown::table(&rows);
        if rendered.is_empty() {
            sections.push(format!("## {}", name));
        } else {
            sections.push(format!("## {}\n{}", name, rendered));
        }
    }

    Ok(sections.join("\n\n"))
}
