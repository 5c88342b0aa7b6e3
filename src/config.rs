//! Configuration loading and management for pdfbrief.
//!
//! Loads settings from a TOML file and resolves `${ENV_VAR}` placeholders
//! against the process environment, so secrets never live in the file itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("environment variable '{0}' is not set")]
    MissingEnvVar(String),
}

/// Input and output directories for the batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoriesConfig {
    /// Directory scanned for `*.pdf` files
    pub input: PathBuf,
    /// Directory receiving one `<stem>_summary.json` per input PDF
    pub output: PathBuf,
}

/// Summary generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Hard cap on summary length, in characters
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

/// Remote xAI service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XaiConfig {
    /// API key, typically supplied as `"${XAI_API_KEY}"`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier (e.g., "grok-beta")
    #[serde(default = "default_model")]
    pub model: String,
    /// OpenAI-compatible API root
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Logging destination and verbosity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub directories: DirectoriesConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub xai: XaiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// Re-reads and re-resolves from disk on every call; the result is meant
    /// to be loaded once at startup and treated as immutable afterwards.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut value: toml::Value = toml::from_str(&content)?;
        resolve_env_placeholders(&mut value)?;
        let config = value.try_into()?;
        Ok(config)
    }
}

/// Recursively replace every string of the exact form `${NAME}` with the
/// value of the environment variable `NAME`. Tables and arrays are walked;
/// non-string scalars pass through unchanged. An unset or empty variable is
/// an error.
fn resolve_env_placeholders(value: &mut toml::Value) -> Result<(), ConfigError> {
    match value {
        toml::Value::Table(table) => {
            for (_key, item) in table.iter_mut() {
                resolve_env_placeholders(item)?;
            }
        }
        toml::Value::Array(items) => {
            for item in items {
                resolve_env_placeholders(item)?;
            }
        }
        toml::Value::String(s) => {
            if let Some(name) = placeholder_name(s) {
                match std::env::var(name) {
                    Ok(resolved) if !resolved.is_empty() => *s = resolved,
                    _ => return Err(ConfigError::MissingEnvVar(name.to_string())),
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Whole-value match only: `"${HOME}/x"` is not a placeholder.
fn placeholder_name(s: &str) -> Option<&str> {
    s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}'))
}

fn default_max_length() -> usize {
    500
}

fn default_model() -> String {
    "grok-beta".to_string()
}

fn default_base_url() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("app.log")
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

impl Default for XaiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const MINIMAL: &str = r#"
[directories]
input = "pdfs"
output = "out"
"#;

    #[test]
    fn defaults_applied() {
        let file = write_config(MINIMAL);
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.summary.max_length, 500);
        assert_eq!(config.xai.model, "grok-beta");
        assert_eq!(config.logging.log_file, PathBuf::from("app.log"));
        assert_eq!(config.logging.log_level, "INFO");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Config::load_from(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_content_is_parse_error() {
        let file = write_config("directories = [broken");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn placeholder_resolved_from_environment() {
        std::env::set_var("PDFBRIEF_TEST_KEY", "sk-12345");
        let file = write_config(
            r#"
[directories]
input = "pdfs"
output = "out"

[xai]
api_key = "${PDFBRIEF_TEST_KEY}"
"#,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.xai.api_key.as_deref(), Some("sk-12345"));
    }

    #[test]
    fn unset_placeholder_fails() {
        std::env::remove_var("PDFBRIEF_TEST_UNSET");
        let file = write_config(
            r#"
[directories]
input = "${PDFBRIEF_TEST_UNSET}"
output = "out"
"#,
        );
        let err = Config::load_from(file.path()).unwrap_err();
        match err {
            ConfigError::MissingEnvVar(name) => assert_eq!(name, "PDFBRIEF_TEST_UNSET"),
            other => panic!("expected MissingEnvVar, got {other:?}"),
        }
    }

    #[test]
    fn empty_placeholder_value_fails() {
        std::env::set_var("PDFBRIEF_TEST_EMPTY", "");
        let file = write_config(
            r#"
[directories]
input = "${PDFBRIEF_TEST_EMPTY}"
output = "out"
"#,
        );
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn partial_placeholder_passes_through() {
        let file = write_config(
            r#"
[directories]
input = "${HOME}/pdfs"
output = "out"
"#,
        );
        // Not a whole-value match, so it stays literal.
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.directories.input, PathBuf::from("${HOME}/pdfs"));
    }

    #[test]
    fn arrays_resolved_and_other_scalars_untouched() {
        std::env::set_var("PDFBRIEF_TEST_ITEM", "resolved");
        let mut value: toml::Value = toml::from_str(
            r#"
items = ["plain", "${PDFBRIEF_TEST_ITEM}"]
count = 42
enabled = true
"#,
        )
        .unwrap();

        resolve_env_placeholders(&mut value).unwrap();

        let table = value.as_table().unwrap();
        let items = table.get("items").unwrap().as_array().unwrap();
        assert_eq!(items[0].as_str(), Some("plain"));
        assert_eq!(items[1].as_str(), Some("resolved"));
        assert_eq!(table.get("count").unwrap().as_integer(), Some(42));
        assert_eq!(table.get("enabled").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn nested_values_resolved_recursively() {
        std::env::set_var("PDFBRIEF_TEST_LOG", "run.log");
        let file = write_config(
            r#"
[directories]
input = "pdfs"
output = "out"

[logging]
log_file = "${PDFBRIEF_TEST_LOG}"
"#,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.logging.log_file, PathBuf::from("run.log"));
    }
}
