//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration, read from `.mrosc/config.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MroscConfig {
    /// Municipality running the console.
    pub municipality: MunicipalityConfig,
    /// Compliance document policy.
    pub documents: DocumentPolicyConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Municipality identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MunicipalityConfig {
    /// Display name, e.g. "Prefeitura Municipal de Campinas".
    pub name: String,
    /// Two-letter state code (UF).
    pub state: String,
}

impl Default for MunicipalityConfig {
    fn default() -> Self {
        Self {
            name: "Prefeitura Municipal".to_string(),
            state: "SP".to_string(),
        }
    }
}

/// How a validity period in months becomes an expiry date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryRule {
    /// Each month counts as 30 days. Matches expiry dates already on file.
    #[default]
    FlatThirtyDayMonths,
    /// True calendar months, clamped to the last day of the target month.
    CalendarMonths,
}

/// Compliance document policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPolicyConfig {
    /// Rule used to pre-fill expiry dates on upload.
    pub expiry_rule: ExpiryRule,
    /// Custom document type catalog (YAML). Built-in MROSC catalog when unset.
    pub catalog_path: Option<PathBuf>,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn, error.
    pub level: String,
    /// Output format: pretty, compact, json.
    pub format: String,
    /// Optional log file, appended to.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}
