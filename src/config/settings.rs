use crate::adapters::convert::DEFAULT_MAX_ARCHIVE_DEPTH;
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_PATH: &str = "./converted";
pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] =
    &["docx", "xlsx", "pptx", "pdf", "html", "zip", "csv", "txt"];

/// Effective settings: defaults, then the TOML file, then command line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_path: String,
    pub accepted_extensions: Vec<String>,
    pub temp_dir: Option<PathBuf>,
    pub preview_chars: Option<usize>,
    pub write_downloads: bool,
    pub max_archive_depth: usize,
    pub monitor: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            accepted_extensions: DEFAULT_ACCEPTED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            temp_dir: None,
            preview_chars: None,
            write_downloads: true,
            max_archive_depth: DEFAULT_MAX_ARCHIVE_DEPTH,
            monitor: false,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();

        Self {
            output_path: config
                .output
                .path
                .clone()
                .unwrap_or(defaults.output_path),
            accepted_extensions: config
                .reader
                .accepted_extensions
                .as_ref()
                .map(|exts| exts.iter().map(|e| e.trim().to_ascii_lowercase()).collect())
                .unwrap_or(defaults.accepted_extensions),
            temp_dir: config.reader.temp_dir.clone(),
            preview_chars: config.reader.preview_chars,
            write_downloads: config.output.write_downloads.unwrap_or(true),
            max_archive_depth: config
                .reader
                .max_archive_depth
                .unwrap_or(defaults.max_archive_depth),
            monitor: config.monitoring.enabled,
            json_logs: config.monitoring.json_logs,
        }
    }

    #[cfg(feature = "cli")]
    pub fn apply_cli(&mut self, cli: &crate::config::CliConfig) {
        if let Some(path) = &cli.output_path {
            self.output_path = path.clone();
        }
        if let Some(dir) = &cli.temp_dir {
            self.temp_dir = Some(dir.clone());
        }
        if let Some(chars) = cli.preview_chars {
            self.preview_chars = Some(chars);
        }
        if cli.no_downloads {
            self.write_downloads = false;
        }
        self.monitor |= cli.monitor;
        self.json_logs |= cli.json_logs;
    }
}

impl ConfigProvider for Settings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn accepted_extensions(&self) -> &[String] {
        &self.accepted_extensions
    }

    fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }

    fn write_downloads(&self) -> bool {
        self.write_downloads
    }

    fn max_archive_depth(&self) -> usize {
        self.max_archive_depth
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output.path", &self.output_path)?;
        validation::validate_extension_list(
            "reader.accepted_extensions",
            &self.accepted_extensions,
        )?;
        if let Some(preview) = self.preview_chars {
            validation::validate_positive_number("reader.preview_chars", preview, 1)?;
        }
        validation::validate_range("reader.max_archive_depth", self.max_archive_depth, 1, 8)?;
        if let Some(dir) = &self.temp_dir {
            validation::validate_path("reader.temp_dir", &dir.to_string_lossy())?;
        }
        Ok(())
    }
}
