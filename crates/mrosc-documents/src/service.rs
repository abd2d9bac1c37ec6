//! Upload, listing and dashboard operations over a document store.

use chrono::{DateTime, NaiveDate, Utc};
use mrosc_common_config::ExpiryRule;
use mrosc_common_core::{DocumentId, OrganizationId};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::DocumentCatalog;
use crate::error::DocumentError;
use crate::lifecycle::compute_expiry_with_rule;
use crate::store::DocumentStore;
use crate::summary::{DashboardSummary, DocumentView};
use crate::types::{DocumentTypeConfig, TrackedDocument};

/// Input from the upload form.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub owner_id: OrganizationId,
    pub document_type: String,
    pub issue_date: Option<NaiveDate>,
    /// Expiry typed in by the uploader, replacing the computed default.
    pub expiry_override: Option<NaiveDate>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub notes: Option<String>,
    pub uploaded_by: String,
}

impl UploadRequest {
    /// Minimal request; optional fields start empty.
    pub fn new(
        owner_id: OrganizationId,
        document_type: impl Into<String>,
        uploaded_by: impl Into<String>,
    ) -> Self {
        Self {
            owner_id,
            document_type: document_type.into(),
            issue_date: None,
            expiry_override: None,
            file_name: None,
            file_url: None,
            notes: None,
            uploaded_by: uploaded_by.into(),
        }
    }

    pub fn issued(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn expires(mut self, date: NaiveDate) -> Self {
        self.expiry_override = Some(date);
        self
    }

    pub fn file(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self.file_url = Some(url.into());
        self
    }
}

/// Document operations used by the upload form, listing and dashboard.
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    catalog: DocumentCatalog,
    expiry_rule: ExpiryRule,
}

impl DocumentService {
    /// Create a service with the flat 30-day expiry rule.
    pub fn new(store: Arc<dyn DocumentStore>, catalog: DocumentCatalog) -> Self {
        Self {
            store,
            catalog,
            expiry_rule: ExpiryRule::default(),
        }
    }

    /// Use a different rule for pre-filled expiry dates.
    pub fn with_expiry_rule(mut self, rule: ExpiryRule) -> Self {
        self.expiry_rule = rule;
        self
    }

    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    pub fn expiry_rule(&self) -> ExpiryRule {
        self.expiry_rule
    }

    fn type_config(&self, id: &str) -> Result<&DocumentTypeConfig, DocumentError> {
        self.catalog
            .get(id)
            .ok_or_else(|| DocumentError::UnknownDocumentType { id: id.to_string() })
    }

    /// Expiry date to pre-fill for a type issued on `issue_date`.
    pub fn suggest_expiry(
        &self,
        document_type: &str,
        issue_date: NaiveDate,
    ) -> Result<Option<NaiveDate>, DocumentError> {
        let config = self.type_config(document_type)?;
        Ok(compute_expiry_with_rule(self.expiry_rule, config, issue_date))
    }

    /// Record an uploaded document, replacing any earlier one of the same type.
    pub fn upload(
        &self,
        request: UploadRequest,
        uploaded_at: DateTime<Utc>,
    ) -> Result<TrackedDocument, DocumentError> {
        let config = self.type_config(&request.document_type)?;

        let expiry_date = match request.expiry_override {
            Some(date) => Some(date),
            None => request
                .issue_date
                .and_then(|issued| compute_expiry_with_rule(self.expiry_rule, config, issued)),
        };

        if let (Some(issue), Some(expiry)) = (request.issue_date, expiry_date) {
            if expiry < issue {
                return Err(DocumentError::ExpiryBeforeIssue { issue, expiry });
            }
        }

        if !config.has_validity && request.expiry_override.is_some() {
            warn!(
                doc_type = %config.id,
                "expiry date recorded for a document type that does not expire"
            );
        }

        let document = TrackedDocument {
            id: DocumentId::new(),
            owner_id: request.owner_id,
            document_type: request.document_type,
            issue_date: request.issue_date,
            expiry_date,
            file_name: request.file_name,
            file_url: request.file_url,
            notes: request.notes,
            uploaded_at,
            uploaded_by: request.uploaded_by,
        };

        match self.store.upsert(document.clone())? {
            Some(previous) => info!(
                owner = %document.owner_id,
                doc_type = %document.document_type,
                superseded = %previous.id,
                "document replaced"
            ),
            None => info!(
                owner = %document.owner_id,
                doc_type = %document.document_type,
                "document uploaded"
            ),
        }

        Ok(document)
    }

    /// An owner's documents with status computed for `today`, in catalog order.
    pub fn list(&self, owner: OrganizationId, today: NaiveDate) -> Result<Vec<DocumentView>, DocumentError> {
        let mut documents = self.store.list_for_owner(owner)?;
        documents.sort_by_key(|d| {
            (
                self.catalog.position(&d.document_type).unwrap_or(usize::MAX),
                d.document_type.clone(),
            )
        });

        debug!(owner = %owner, count = documents.len(), "listing documents");
        Ok(documents
            .into_iter()
            .map(|d| DocumentView::new(d, &self.catalog, today))
            .collect())
    }

    /// Dashboard counts, missing types and documents needing attention.
    pub fn dashboard(&self, owner: OrganizationId, today: NaiveDate) -> Result<DashboardSummary, DocumentError> {
        let documents = self.store.list_for_owner(owner)?;
        let summary = DashboardSummary::build(owner, documents, &self.catalog, today);
        debug!(
            owner = %owner,
            total = summary.counts.total,
            missing = summary.missing.len(),
            "dashboard computed"
        );
        Ok(summary)
    }
}
