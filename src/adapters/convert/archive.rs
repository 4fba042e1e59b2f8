use super::{ConvertError, MarkdownConverter};
use crate::utils::validation::extension_of;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Converts every supported entry of a zip archive, each under a
/// `## File: {entry}` heading. Entries that fail are skipped.
pub fn convert(
    converter: &MarkdownConverter,
    path: &Path,
    depth: usize,
) -> Result<String, ConvertError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut sections = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let supported = extension_of(&name)
            .map(|ext| MarkdownConverter::supports(&ext))
            .unwrap_or(false);
        if !supported {
            tracing::debug!("Skipping unsupported archive entry {}", name);
            continue;
        }

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        drop(entry);

        let mut handle = converter.temp_store().acquire(&name, &bytes)?;
        let converted = converter.convert_at_depth(handle.path(), depth + 1);
        handle.release();

        match converted {
            Ok(content) => sections.push(format!("## File: {}\n\n{}", name, content.trim())),
            Err(e) => tracing::warn!("⚠️ Skipping archive entry {}: {}", name, e),
        }
    }

    Ok(sections.join("\n\n"))
}
