//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use mrosc_common_config::{BrandingError, ConfigError};
use mrosc_documents::{CatalogError, DocumentError};
use serde_json::json;
use thiserror::Error;

/// Process exit codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
    NotFound = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// CLI error type with context for the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Stable error code shown next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::Other(_) => "E999",
        }
    }

    /// Exit status for this error.
    pub fn status(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::NotFound { .. } => Exit::NotFound,
            Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Process exit code.
    pub fn exit_code(&self) -> ExitCode {
        self.status().into()
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => Some("Did you mean one of these?"),
            _ => None,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    pub fn io_with_path(message: impl Into<String>, source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Error as printed on stderr in text mode.
    pub fn render_text(&self) -> String {
        let mut out = format!("error[{}]: {}", self.code(), self);
        if let Self::Validation { field: Some(field), .. } = self {
            out.push_str(&format!("\n  field: {field}"));
        }
        if let Self::Io { path: Some(path), .. } = self {
            out.push_str(&format!("\n  path: {}", path.display()));
        }
        if let Some(hint) = self.hint() {
            out.push_str(&format!("\n  hint: {hint}"));
        }
        for suggestion in self.suggestions() {
            out.push_str(&format!("\n    - {suggestion}"));
        }
        out
    }

    /// Error as printed on stdout in JSON mode.
    pub fn render_json(&self) -> serde_json::Value {
        json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "hint": self.hint(),
                "suggestions": self.suggestions(),
            }
        })
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::NotFound { .. } => Some("Check the --config path or unset MROSC_CONFIG".to_string()),
            ConfigError::ParseError { .. } => Some("The configuration file must be valid YAML".to_string()),
            ConfigError::EnvVarNotFound { var } => Some(format!("Export {var} or give it a default: ${{{var}:-value}}")),
            _ => None,
        };
        Self::Config {
            message: err.to_string(),
            source: Some(Box::new(err)),
            hint,
        }
    }
}

impl From<BrandingError> for CliError {
    fn from(err: BrandingError) -> Self {
        match err {
            BrandingError::Invalid { message } => Self::validation(format!("invalid branding: {message}")),
            BrandingError::Io(source) => Self::Io {
                message: format!("failed to access branding file: {source}"),
                source,
                path: None,
            },
            BrandingError::Parse(source) => Self::Config {
                message: format!("invalid branding file: {source}"),
                source: Some(Box::new(source)),
                hint: None,
            },
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::Config {
            message: format!("document catalog: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Fix documents.catalog_path or remove it to use the built-in catalog".to_string()),
        }
    }
}

impl From<DocumentError> for CliError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::MalformedDate(e) => Self::invalid_field(e.field.clone(), e.to_string()),
            DocumentError::InvalidId { field, .. } => Self::invalid_field(field, err.to_string()),
            DocumentError::ExpiryBeforeIssue { .. } => Self::invalid_field("expiry_date", err.to_string()),
            DocumentError::UnknownDocumentType { id } => {
                Self::not_found_with_suggestions("document type", id, Vec::new())
            }
            DocumentError::Catalog(e) => e.into(),
            DocumentError::Store(e) => Self::Other(anyhow::Error::new(e)),
        }
    }
}
