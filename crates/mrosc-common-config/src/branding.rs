//! Console branding.
//!
//! Branding is a plain value handed to whatever renders pages or reports.
//! It is read once at startup and written back on update through a
//! [`BrandingStore`]; nothing holds it in process-wide state.

use crate::loader::CONFIG_DIR;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Branding file name inside the configuration directory.
pub const BRANDING_FILE: &str = "branding.yaml";

/// Branding errors.
#[derive(Debug, Error)]
pub enum BrandingError {
    #[error("invalid branding: {message}")]
    Invalid { message: String },

    #[error("failed to access branding file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid branding YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Visual identity of the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Government body shown in headers, e.g. "Prefeitura Municipal de Niterói".
    pub organization_name: String,
    /// Product name shown next to the logo.
    pub system_name: String,
    /// Primary color, `#RRGGBB`.
    pub primary_color: String,
    /// Secondary color, `#RRGGBB`.
    pub secondary_color: String,
    /// Logo location.
    pub logo_url: Option<String>,
    /// Footer text for pages and exported reports.
    pub footer_text: Option<String>,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            organization_name: "Prefeitura Municipal".to_string(),
            system_name: "Gestão de Parcerias MROSC".to_string(),
            primary_color: "#1E40AF".to_string(),
            secondary_color: "#64748B".to_string(),
            logo_url: None,
            footer_text: None,
        }
    }
}

impl BrandingConfig {
    /// Check names are present and colors are `#RRGGBB`.
    pub fn validate(&self) -> Result<(), BrandingError> {
        if self.organization_name.trim().is_empty() {
            return Err(BrandingError::Invalid {
                message: "organization_name must not be empty".to_string(),
            });
        }
        if self.system_name.trim().is_empty() {
            return Err(BrandingError::Invalid {
                message: "system_name must not be empty".to_string(),
            });
        }
        for (field, value) in [
            ("primary_color", &self.primary_color),
            ("secondary_color", &self.secondary_color),
        ] {
            if !is_hex_color(value) {
                return Err(BrandingError::Invalid {
                    message: format!("{field} must look like #RRGGBB, got {value:?}"),
                });
            }
        }
        Ok(())
    }

    /// Apply a partial update, returning the new branding.
    pub fn apply(&self, update: BrandingUpdate) -> BrandingConfig {
        let mut next = self.clone();
        if let Some(name) = update.organization_name {
            next.organization_name = name;
        }
        if let Some(name) = update.system_name {
            next.system_name = name;
        }
        if let Some(color) = update.primary_color {
            next.primary_color = color;
        }
        if let Some(color) = update.secondary_color {
            next.secondary_color = color;
        }
        if let Some(url) = update.logo_url {
            next.logo_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(text) = update.footer_text {
            next.footer_text = Some(text).filter(|t| !t.is_empty());
        }
        next
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Partial branding change. `Some("")` clears optional fields.
#[derive(Debug, Clone, Default)]
pub struct BrandingUpdate {
    pub organization_name: Option<String>,
    pub system_name: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub logo_url: Option<String>,
    pub footer_text: Option<String>,
}

/// Persistence port for branding.
pub trait BrandingStore: Send + Sync {
    /// Read the current branding, defaults when nothing was saved yet.
    fn load(&self) -> Result<BrandingConfig, BrandingError>;

    /// Validate and persist branding.
    fn save(&self, branding: &BrandingConfig) -> Result<(), BrandingError>;

    /// Load, apply `update`, save, and return the result.
    fn update(&self, update: BrandingUpdate) -> Result<BrandingConfig, BrandingError> {
        let next = self.load()?.apply(update);
        self.save(&next)?;
        Ok(next)
    }
}

/// Branding kept in `.mrosc/branding.yaml`.
pub struct FileBrandingStore {
    path: PathBuf,
}

impl FileBrandingStore {
    /// Store rooted at a project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            path: project_dir.as_ref().join(CONFIG_DIR).join(BRANDING_FILE),
        }
    }

    /// Path of the branding file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BrandingStore for FileBrandingStore {
    fn load(&self) -> Result<BrandingConfig, BrandingError> {
        if !self.path.exists() {
            return Ok(BrandingConfig::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let branding: BrandingConfig = serde_yaml::from_str(&contents)?;
        branding.validate()?;
        Ok(branding)
    }

    fn save(&self, branding: &BrandingConfig) -> Result<(), BrandingError> {
        branding.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yaml::to_string(branding)?)?;
        tracing::info!(path = %self.path.display(), "branding saved");
        Ok(())
    }
}

/// Branding kept in memory.
#[derive(Default)]
pub struct InMemoryBrandingStore {
    branding: Mutex<Option<BrandingConfig>>,
}

impl InMemoryBrandingStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BrandingStore for InMemoryBrandingStore {
    fn load(&self) -> Result<BrandingConfig, BrandingError> {
        Ok(self.branding.lock().clone().unwrap_or_default())
    }

    fn save(&self, branding: &BrandingConfig) -> Result<(), BrandingError> {
        branding.validate()?;
        *self.branding.lock() = Some(branding.clone());
        Ok(())
    }
}
