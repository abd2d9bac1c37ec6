//! Reading document export files.

use std::path::Path;

use mrosc_documents::{parse_records, DocumentRecord, TrackedDocument};

use crate::error::CliError;

/// Export file encodings, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Yaml,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load and parse an export file holding a list of document rows.
///
/// Any malformed date or id fails the whole file.
pub fn load_export(path: &Path) -> Result<Vec<TrackedDocument>, CliError> {
    let format = ExportFormat::from_path(path).ok_or_else(|| {
        CliError::invalid_field(
            "export",
            format!("unsupported export file {}: expected .yaml, .yml or .json", path.display()),
        )
    })?;

    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::io_with_path(format!("failed to read export file: {e}"), e, path))?;

    let records: Vec<DocumentRecord> = match format {
        ExportFormat::Yaml => serde_yaml::from_str(&contents).map_err(|e| {
            CliError::invalid_field("export", format!("invalid YAML in {}: {e}", path.display()))
        })?,
        ExportFormat::Json => serde_json::from_str(&contents).map_err(|e| {
            CliError::invalid_field("export", format!("invalid JSON in {}: {e}", path.display()))
        })?,
    };

    let documents = mrosc_common_log::timed!("parse_export", parse_records(records))?;
    tracing::debug!(path = %path.display(), count = documents.len(), "export loaded");
    Ok(documents)
}
