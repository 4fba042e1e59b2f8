use super::markdown;
use super::ooxml::{self, attribute};
use super::ConvertError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let mut package = ooxml::open_package(path)?;
    let xml = ooxml::read_part(&mut package, DOCUMENT_PART)?.ok_or_else(|| {
        ConvertError::InvalidDocument(format!("{} is missing from the package", DOCUMENT_PART))
    })?;
    document_to_markdown(&xml)
}

#[derive(Default)]
struct TableBuilder {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

/// Walks `word/document.xml`: paragraphs become blocks, heading styles become
/// `#` prefixes and top-level tables become pipe tables. Nested tables are
/// flattened into the enclosing cell.
pub fn document_to_markdown(xml: &str) -> Result<String, ConvertError> {
    let mut reader = Reader::from_str(xml);

    let mut blocks: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut style: Option<String> = None;
    let mut in_text = false;
    let mut table_depth = 0usize;
    let mut table = TableBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph.clear();
                    style = None;
                }
                b"w:t" => in_text = true,
                b"w:pStyle" => style = attribute(&e, b"w:val"),
                b"w:tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        table = TableBuilder::default();
                    }
                }
                b"w:tr" if table_depth == 1 => table.row.clear(),
                b"w:tc" if table_depth == 1 => table.cell.clear(),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:pStyle" => style = attribute(&e, b"w:val"),
                b"w:tab" => paragraph.push('\t'),
                b"w:br" | b"w:cr" => paragraph.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => paragraph.push_str(&t.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    let text = paragraph.trim();
                    if table_depth > 0 {
                        if !text.is_empty() {
                            if !table.cell.is_empty() {
                                table.cell.push(' ');
                            }
                            table.cell.push_str(text);
                        }
                    } else if !text.is_empty() {
                        blocks.push(format_paragraph(text, style.as_deref()));
                    }
                    paragraph.clear();
                }
                b"w:tc" if table_depth == 1 => {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell);
                }
                b"w:tr" if table_depth == 1 => {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
                b"w:tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 {
                        let rendered = markdown::table(&table.rows);
                        if !rendered.is_empty() {
                            blocks.push(rendered);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(blocks.join("\n\n"))
}

fn format_paragraph(text: &str, style: Option<&str>) -> String {
    match style.and_then(heading_level) {
        Some(level) => format!("{} {}", "#".repeat(level), text.replace('\n', " ")),
        None if style.is_some_and(|s| s.starts_with("List")) => format!("- {}", text),
        None => text.to_string(),
    }
}

fn heading_level(style: &str) -> Option<usize> {
    if style.eq_ignore_ascii_case("title") {
        return Some(1);
    }
    let level = style
        .strip_prefix("Heading")
        .or_else(|| style.strip_prefix("heading"))?
        .trim()
        .parse::<usize>()
        .ok()?;
    Some(level.clamp(1, 6))
}
