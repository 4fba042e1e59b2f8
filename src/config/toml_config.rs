use crate::utils::error::{ReaderError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub reader: ReaderSection,
    pub output: OutputSection,
    pub monitoring: MonitoringSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSection {
    pub accepted_extensions: Option<Vec<String>>,
    pub preview_chars: Option<usize>,
    pub temp_dir: Option<PathBuf>,
    pub max_archive_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: Option<String>,
    pub write_downloads: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSection {
    pub enabled: bool,
    pub json_logs: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReaderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReaderError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        if let Some(extensions) = &self.reader.accepted_extensions {
            validation::validate_extension_list("reader.accepted_extensions", extensions)?;
        }

        if let Some(preview) = self.reader.preview_chars {
            validation::validate_positive_number("reader.preview_chars", preview, 1)?;
        }

        if let Some(depth) = self.reader.max_archive_depth {
            validation::validate_range("reader.max_archive_depth", depth, 1, 8)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[reader]
accepted_extensions = ["docx", "pdf"]
preview_chars = 2000
temp_dir = "/var/tmp/docreader"
max_archive_depth = 3

[output]
path = "./converted"
write_downloads = false

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.reader.accepted_extensions,
            Some(vec!["docx".to_string(), "pdf".to_string()])
        );
        assert_eq!(config.reader.preview_chars, Some(2000));
        assert_eq!(
            config.reader.temp_dir,
            Some(PathBuf::from("/var/tmp/docreader"))
        );
        assert_eq!(config.output.path.as_deref(), Some("./converted"));
        assert_eq!(config.output.write_downloads, Some(false));
        assert!(config.monitoring.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.reader.accepted_extensions.is_none());
        assert!(config.output.path.is_none());
        assert!(!config.monitoring.enabled);
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("DOCREADER_TEST_OUTPUT", "/data/out");

        let config = TomlConfig::from_toml_str(
            r#"
[output]
path = "${DOCREADER_TEST_OUTPUT}/md"
"#,
        )
        .unwrap();
        assert_eq!(config.output.path.as_deref(), Some("/data/out/md"));

        let config = TomlConfig::from_toml_str(
            r#"
[output]
path = "${DOCREADER_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.output.path.as_deref(),
            Some("${DOCREADER_TEST_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[reader]
accepted_extensions = [".docx"]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[reader]
max_archive_depth = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = TomlConfig::from_toml_str("[reader\npreview_chars = ").unwrap_err();
        assert!(matches!(err, ReaderError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npath = \"./from-file\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output.path.as_deref(), Some("./from-file"));
    }
}
