use super::text::decode;
use super::ConvertError;
use regex::Regex;
use std::path::Path;

const HIDDEN_BLOCKS: &str =
    r"(?is)<(script|style|head|noscript)\b[^>]*>.*?</(script|style|head|noscript)\s*>";

pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let bytes = std::fs::read(path)?;
    html_to_markdown(&decode(&bytes, path))
}

/// Drops `<script>`, `<style>` and `<head>` blocks, then renders the rest as Markdown.
pub fn html_to_markdown(html: &str) -> Result<String, ConvertError> {
    let hidden =
        Regex::new(HIDDEN_BLOCKS).map_err(|e| ConvertError::InvalidDocument(e.to_string()))?;
    let visible = hidden.replace_all(html, "");
    Ok(html2md::parse_html(&visible).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_and_styles_are_dropped() {
        let html = r#"<html><head><title>t</title><style>p { color: red }</style></head>
<body><script>alert("x")</script><p>Visible text</p></body></html>"#;

        let markdown = html_to_markdown(html).unwrap();
        assert!(markdown.contains("Visible text"));
        assert!(!markdown.contains("alert"));
        assert!(!markdown.contains("color"));
    }

    #[test]
    fn test_headings_become_markdown() {
        let markdown = html_to_markdown("<h1>Title</h1><p>Body</p>").unwrap();
        assert!(markdown.contains("Title"));
        assert!(markdown.starts_with('#') || markdown.contains("====="));
        assert!(markdown.contains("Body"));
    }
}
