//! Read-only views over a collection of tracked documents.

use chrono::NaiveDate;
use mrosc_common_core::OrganizationId;
use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::DocumentCatalog;
use crate::lifecycle::{classify, classify_expiry, days_until_expiry};
use crate::types::{DocumentStatus, DocumentTypeConfig, TrackedDocument};

/// Document counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub valid: usize,
    pub expiring: usize,
    pub expired: usize,
    pub pending: usize,
    pub total: usize,
}

impl StatusCounts {
    /// Count one more document with `status`.
    pub fn record(&mut self, status: DocumentStatus) {
        match status {
            DocumentStatus::Valid => self.valid += 1,
            DocumentStatus::Expiring => self.expiring += 1,
            DocumentStatus::Expired => self.expired += 1,
            DocumentStatus::Pending => self.pending += 1,
        }
        self.total += 1;
    }

    /// Documents that need renewal.
    pub fn needing_attention(&self) -> usize {
        self.expiring + self.expired
    }
}

/// Status of a document, using its catalog type when known.
///
/// Types missing from the catalog fall back to the expiry date alone.
pub fn status_of(document: &TrackedDocument, catalog: &DocumentCatalog, now: NaiveDate) -> DocumentStatus {
    match catalog.get(&document.document_type) {
        Some(type_config) => classify(document, type_config, now),
        None => classify_expiry(document.expiry_date, now),
    }
}

/// Partition documents by status. `total` always equals `documents.len()`.
pub fn count_by_status(
    documents: &[TrackedDocument],
    catalog: &DocumentCatalog,
    now: NaiveDate,
) -> StatusCounts {
    documents.iter().fold(StatusCounts::default(), |mut counts, doc| {
        counts.record(status_of(doc, catalog, now));
        counts
    })
}

/// Catalog types with no uploaded document, in catalog order.
pub fn missing_document_types<'a>(
    documents: &[TrackedDocument],
    catalog: &'a DocumentCatalog,
) -> Vec<&'a DocumentTypeConfig> {
    let uploaded: HashSet<&str> = documents.iter().map(|d| d.document_type.as_str()).collect();
    catalog
        .iter()
        .filter(|t| !uploaded.contains(t.id.as_str()))
        .collect()
}

/// A tracked document with its status computed for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: TrackedDocument,
    /// Display name from the catalog, if the type is known.
    pub type_name: Option<String>,
    pub status: DocumentStatus,
    pub days_until_expiry: Option<i64>,
}

impl DocumentView {
    /// Compute the view of `document` on `now`.
    pub fn new(document: TrackedDocument, catalog: &DocumentCatalog, now: NaiveDate) -> Self {
        let status = status_of(&document, catalog, now);
        let days_until_expiry = days_until_expiry(&document, now);
        let type_name = catalog.get(&document.document_type).map(|t| t.name.clone());
        Self {
            document,
            type_name,
            status,
            days_until_expiry,
        }
    }
}

/// Dashboard data for one organization.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub owner_id: OrganizationId,
    pub as_of: NaiveDate,
    pub counts: StatusCounts,
    /// Catalog types with no upload, shown as pending.
    pub missing: Vec<DocumentTypeConfig>,
    /// Expiring and expired documents, soonest first.
    pub attention: Vec<DocumentView>,
}

impl DashboardSummary {
    /// Build the summary from one owner's documents.
    pub fn build(
        owner_id: OrganizationId,
        documents: Vec<TrackedDocument>,
        catalog: &DocumentCatalog,
        now: NaiveDate,
    ) -> Self {
        let counts = count_by_status(&documents, catalog, now);
        let missing = missing_document_types(&documents, catalog)
            .into_iter()
            .cloned()
            .collect();

        let mut attention: Vec<DocumentView> = documents
            .into_iter()
            .map(|d| DocumentView::new(d, catalog, now))
            .filter(|v| v.status.needs_attention())
            .collect();
        attention.sort_by_key(|v| v.days_until_expiry.unwrap_or(i64::MAX));

        Self {
            owner_id,
            as_of: now,
            counts,
            missing,
            attention,
        }
    }

    /// Missing types the OSC is required to provide.
    pub fn missing_required(&self) -> impl Iterator<Item = &DocumentTypeConfig> {
        self.missing.iter().filter(|t| t.required)
    }

    /// Nothing expired, nothing expiring, no required type missing.
    pub fn is_compliant(&self) -> bool {
        self.counts.needing_attention() == 0 && self.missing_required().next().is_none()
    }
}
