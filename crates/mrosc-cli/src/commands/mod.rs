//! Command implementations.

mod branding;
mod catalog;
mod expiry;
mod export;
mod status;
mod summary;

pub use branding::BrandingCommand;
pub use catalog::CatalogCommand;
pub use expiry::ExpiryCommand;
pub use export::{load_export, ExportFormat};
pub use status::StatusCommand;
pub use summary::SummaryCommand;

use mrosc_common_core::OrganizationId;
use mrosc_documents::{DocumentCatalog, DocumentStatus};

use crate::error::CliError;

/// Parse an organization id given on the command line.
pub(crate) fn parse_owner(value: &str) -> Result<OrganizationId, CliError> {
    OrganizationId::parse(value).map_err(|e| CliError::invalid_field("owner", format!("invalid owner id {value:?}: {e}")))
}

/// Catalog ids resembling `query`, for "not found" hints.
pub(crate) fn similar_type_ids(catalog: &DocumentCatalog, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    let stem: String = query.chars().take(3).collect();
    catalog
        .iter()
        .map(|t| t.id.clone())
        .filter(|id| !stem.is_empty() && (id.contains(&query) || query.contains(id.as_str()) || id.starts_with(&stem)))
        .collect()
}

/// ANSI color for a rendered status label.
pub(crate) fn status_color(label: &str) -> Option<&'static str> {
    [DocumentStatus::Valid, DocumentStatus::Expiring, DocumentStatus::Expired, DocumentStatus::Pending]
        .into_iter()
        .find(|s| s.label() == label)
        .map(|s| match s {
            DocumentStatus::Valid => "32",
            DocumentStatus::Expiring => "33",
            DocumentStatus::Expired => "31",
            DocumentStatus::Pending => "90",
        })
}
