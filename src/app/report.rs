use crate::domain::model::{FileOutcome, OutcomeStatus, SizeReport};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub aborted: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = BatchSummary {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.status() {
                OutcomeStatus::Converted => summary.converted += 1,
                OutcomeStatus::Failed => summary.failed += 1,
                OutcomeStatus::Aborted => summary.aborted += 1,
            }
        }
        summary
    }

    pub fn all_converted(&self) -> bool {
        self.converted == self.total
    }
}

/// Per-file entry of the JSON report. The converted text is left out.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub name: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_report: Option<SizeReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub downloads: Vec<String>,
}

impl From<&FileOutcome> for FileRecord {
    fn from(outcome: &FileOutcome) -> Self {
        let mut record = FileRecord {
            name: outcome.name().to_string(),
            status: outcome.status(),
            error: None,
            size_report: None,
            downloads: Vec::new(),
        };

        match outcome {
            FileOutcome::Converted {
                downloads,
                size_report,
                saved_paths,
                ..
            } => {
                record.size_report = Some(size_report.clone());
                record.downloads = if saved_paths.is_empty() {
                    downloads.iter().map(|d| d.file_name.clone()).collect()
                } else {
                    saved_paths.clone()
                };
            }
            FileOutcome::ConversionFailed { error, .. } | FileOutcome::Aborted { error, .. } => {
                record.error = Some(error.clone());
            }
        }

        record
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub files: Vec<FileRecord>,
}

impl BatchReport {
    pub fn new(outcomes: &[FileOutcome]) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: BatchSummary::from_outcomes(outcomes),
            files: outcomes.iter().map(FileRecord::from).collect(),
        }
    }

    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics;

    fn outcomes() -> Vec<FileOutcome> {
        vec![
            FileOutcome::Converted {
                name: "a.txt".to_string(),
                content: "hello".to_string(),
                downloads: Vec::new(),
                size_report: metrics::compute(10, "hello"),
                saved_paths: vec!["/out/a_converted.md".to_string()],
            },
            FileOutcome::ConversionFailed {
                name: "b.docx".to_string(),
                error: "bad zip".to_string(),
            },
            FileOutcome::Aborted {
                name: "c.exe".to_string(),
                error: "not accepted".to_string(),
            },
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::from_outcomes(&outcomes());
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                converted: 1,
                failed: 1,
                aborted: 1
            }
        );
        assert!(!summary.all_converted());
    }

    #[test]
    fn test_report_json_omits_content() {
        let json = BatchReport::new(&outcomes()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["files"][0]["status"], "converted");
        assert_eq!(value["files"][0]["size_report"]["reduction_percent"], 50.0);
        assert_eq!(value["files"][0]["downloads"][0], "/out/a_converted.md");
        assert_eq!(value["files"][1]["status"], "failed");
        assert_eq!(value["files"][1]["error"], "bad zip");
        assert!(value["files"][2].get("size_report").is_none());
        assert!(!json.contains("hello"));
        assert!(value["generated_at"].is_string());
    }
}
