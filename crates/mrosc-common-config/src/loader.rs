//! Configuration file loading and parsing.

use crate::types::MroscConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding console configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".mrosc";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "warning", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the project configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from `.mrosc/config.yaml`, or defaults if absent.
    pub fn load(&self) -> Result<MroscConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(MroscConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load an explicit configuration file. A missing file is an error.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<MroscConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: MroscConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    ///
    /// YAML comments are copied through untouched.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
            ConfigError::ParseError {
                line: None,
                message: e.to_string(),
            }
        })?;

        let mut result = String::with_capacity(content.len());
        for line in content.split_inclusive('\n') {
            let (code, comment) = line.split_at(comment_start(line).unwrap_or(line.len()));
            result.push_str(&expand_segment(&re, code)?);
            result.push_str(comment);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &MroscConfig) -> Result<(), ConfigError> {
        if config.municipality.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "municipality.name must not be empty".to_string(),
            });
        }

        let state = &config.municipality.state;
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::ValidationError {
                message: format!("municipality.state must be a two-letter UF code, got {state:?}"),
            });
        }

        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!("logging.level {:?} is not a known level", config.logging.level),
            });
        }

        let format = config.logging.format.to_lowercase();
        if !LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!("logging.format {:?} is not one of pretty, compact, json", config.logging.format),
            });
        }

        Ok(())
    }
}

fn expand_segment(re: &Regex, text: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for cap in re.captures_iter(text) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match default {
                Some(d) => d.to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        out.push_str(&text[last..full_match.start()]);
        out.push_str(&value);
        last = full_match.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}

/// Byte offset of a YAML comment on this line: a `#` at the start of the
/// line or after whitespace, outside a quoted scalar.
fn comment_start(line: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, c) in line.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' if prev.map_or(true, |p| p.is_whitespace() || matches!(p, '[' | '{' | ',')) => {
                    quote = Some(c)
                }
                '#' if prev.map_or(true, char::is_whitespace) => return Some(i),
                _ => {}
            },
        }
        prev = Some(c);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpiryRule;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.documents.expiry_rule, ExpiryRule::FlatThirtyDayMonths);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
municipality:
  name: Prefeitura Municipal de Londrina
  state: PR
documents:
  expiry_rule: calendar_months
  catalog_path: catalog.yaml
"#,
        );

        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();

        assert_eq!(config.municipality.name, "Prefeitura Municipal de Londrina");
        assert_eq!(config.municipality.state, "PR");
        assert_eq!(config.documents.expiry_rule, ExpiryRule::CalendarMonths);
        assert_eq!(config.documents.catalog_path, Some(PathBuf::from("catalog.yaml")));

        // Unspecified sections keep their defaults
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_file_missing_is_error() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let result = loader.load_file(dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("MROSC_TEST_UF", "MG");
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("state: ${MROSC_TEST_UF}").unwrap();
        assert_eq!(result, "state: MG");
        std::env::remove_var("MROSC_TEST_UF");
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("level: ${MROSC_NONEXISTENT:-debug}").unwrap();
        assert_eq!(result, "level: debug");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${MROSC_MISSING_VAR}");
        match result.unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "MROSC_MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let loader = ConfigLoader::new(".");

        let mut config = MroscConfig::default();
        config.municipality.name = "  ".to_string();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("municipality.name")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = MroscConfig::default();
        config.municipality.state = "sao paulo".to_string();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("municipality.state")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = MroscConfig::default();
        config.logging.level = "verbose".to_string();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("logging.level")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = MroscConfig::default();
        config.logging.format = "xml".to_string();
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
municipality:
  name: Prefeitura
  state: [unclosed
"#,
        );

        let loader = ConfigLoader::new(dir.path());
        match loader.load().unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_expiry_rule_rejected() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "documents:\n  expiry_rule: lunar_months\n");
        let loader = ConfigLoader::new(dir.path());
        assert!(matches!(loader.load(), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_placeholders_in_comments_are_not_expanded() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            "# set name via ${MROSC_TEST_UNSET_IN_COMMENT}\nmunicipality:\n  name: Olinda # or ${MROSC_TEST_UNSET_IN_COMMENT}\n  state: PE\n",
        );

        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.municipality.name, "Olinda");
        assert_eq!(config.municipality.state, "PE");
    }

    #[test]
    fn test_comment_text_is_kept_verbatim() {
        std::env::set_var("MROSC_TEST_COMMENT_UF", "BA");
        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("state: ${MROSC_TEST_COMMENT_UF} # was ${MROSC_TEST_COMMENT_UF}\n")
            .unwrap();
        assert_eq!(result, "state: BA # was ${MROSC_TEST_COMMENT_UF}\n");
        std::env::remove_var("MROSC_TEST_COMMENT_UF");
    }

    #[test]
    fn test_comment_detection() {
        assert_eq!(comment_start("# heading"), Some(0));
        assert_eq!(comment_start("name: Olinda # note"), Some(13));
        assert_eq!(comment_start("color: \"#1a4d8f\" # hex"), Some(17));
        assert_eq!(comment_start("url: http://x/#anchor"), None);
        assert_eq!(comment_start("name: Santa Bárbara d'Oeste # SP"), Some(29));
        assert_eq!(comment_start("name: '#literal'"), None);
    }
}
