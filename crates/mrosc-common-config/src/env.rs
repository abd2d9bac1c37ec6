//! Environment variable handling.

use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Configuration
    pub const MROSC_CONFIG: &str = "MROSC_CONFIG";
    pub const MROSC_PROJECT_DIR: &str = "MROSC_PROJECT_DIR";
    pub const MROSC_TODAY: &str = "MROSC_TODAY";

    // Deployment
    pub const MROSC_ENV: &str = "MROSC_ENV";
}

/// Environment configuration.
pub struct Environment;

impl Environment {
    /// Load `.env`, `.env.local` and `.env.$MROSC_ENV` when present.
    ///
    /// Variables already set in the process are never overridden.
    pub fn init() -> Result<Self, EnvError> {
        load_optional(".env")?;
        load_optional(".env.local")?;

        if let Ok(env) = env::var(vars::MROSC_ENV) {
            load_optional(&format!(".env.{env}"))?;
        }

        Ok(Self)
    }
}

fn load_optional(file: &str) -> Result<(), EnvError> {
    match dotenvy::from_filename(file) {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
