//! Terminal rendering of per-file results.

use crate::adapters::convert::markdown;
use crate::domain::model::{DownloadArtifact, FileOutcome, SizeReport};
use std::io::{self, Write};

const RULE: &str = "────────────────────────────────────────────────────────────";

pub struct TerminalPresenter<W: Write> {
    out: W,
    preview_chars: Option<usize>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, preview_chars: Option<usize>) -> Self {
        Self { out, preview_chars }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, outcome: &FileOutcome) -> io::Result<()> {
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "📄 Processing: {}", outcome.name())?;

        match outcome {
            FileOutcome::Converted {
                name,
                content,
                downloads,
                size_report,
                saved_paths,
            } => {
                writeln!(self.out, "✅ Successfully converted {}", name)?;
                self.render_preview(content)?;
                self.render_downloads(downloads, saved_paths)?;
                self.render_sizes(size_report)?;
            }
            FileOutcome::ConversionFailed { name, error } => {
                writeln!(self.out, "⚠️ Could not read {}. Please check the format.", name)?;
                writeln!(self.out, "Technical error: {}", error)?;
            }
            FileOutcome::Aborted { name, error } => {
                writeln!(self.out, "⚠️ Could not process {}.", name)?;
                writeln!(self.out, "Technical error: {}", error)?;
            }
        }

        self.out.flush()
    }

    fn render_preview(&mut self, content: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Preview")?;
        writeln!(self.out, "-------")?;

        let (shown, truncated) = preview(content, self.preview_chars);
        writeln!(self.out, "{}", shown.trim_end())?;
        if truncated {
            writeln!(
                self.out,
                "… (preview truncated to {} of {} characters)",
                shown.chars().count(),
                content.chars().count()
            )?;
        }
        Ok(())
    }

    fn render_downloads(
        &mut self,
        downloads: &[DownloadArtifact],
        saved_paths: &[String],
    ) -> io::Result<()> {
        writeln!(self.out)?;
        for (index, artifact) in downloads.iter().enumerate() {
            match saved_paths.get(index) {
                Some(path) => writeln!(
                    self.out,
                    "⬇️ {}: {} ({}) -> {}",
                    artifact.format.label(),
                    artifact.file_name,
                    artifact.mime(),
                    path
                )?,
                None => writeln!(
                    self.out,
                    "⬇️ {}: {} ({})",
                    artifact.format.label(),
                    artifact.file_name,
                    artifact.mime()
                )?,
            }
        }
        Ok(())
    }

    fn render_sizes(&mut self, report: &SizeReport) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", size_table(report))?;
        writeln!(self.out)?;
        if report.is_reduced() {
            writeln!(self.out, "📉 Efficiency: {}", report.efficiency_message())
        } else {
            writeln!(self.out, "ℹ️ {}", report.efficiency_message())
        }
    }
}

pub fn size_table(report: &SizeReport) -> String {
    let rows = vec![
        vec!["Metric".to_string(), "Value".to_string()],
        vec![
            "Original File Size".to_string(),
            report.original_human.clone(),
        ],
        vec![
            "Converted .txt Size".to_string(),
            report.converted_human.clone(),
        ],
    ];
    markdown::table(&rows)
}

/// First `limit` characters of `content`, and whether anything was cut.
pub fn preview(content: &str, limit: Option<usize>) -> (&str, bool) {
    match limit {
        Some(limit) => match content.char_indices().nth(limit) {
            Some((byte_index, _)) => (&content[..byte_index], true),
            None => (content, false),
        },
        None => (content, false),
    }
}
