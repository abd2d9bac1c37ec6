//! Compliance document lifecycle for MROSC partnerships.
//!
//! Classifies an OSC's compliance documents as valid, expiring or expired,
//! pre-fills expiry dates from a type's validity period, and aggregates
//! statuses for dashboards. Status is never stored; it is recomputed from
//! the expiry date for the day passed in by the caller.

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod record;
pub mod service;
pub mod store;
pub mod summary;
pub mod types;

pub use catalog::{CatalogError, DocumentCatalog};
pub use error::DocumentError;
pub use lifecycle::{
    classify, classify_expiry, compute_default_expiry, compute_expiry_with_rule, days_until_expiry,
    EXPIRING_WINDOW_DAYS,
};
pub use record::{parse_records, DocumentRecord};
pub use service::{DocumentService, UploadRequest};
pub use store::{DocumentStore, InMemoryDocumentStore, StoreError};
pub use summary::{count_by_status, missing_document_types, status_of, DashboardSummary, DocumentView, StatusCounts};
pub use types::{DocumentCategory, DocumentStatus, DocumentTypeConfig, TrackedDocument};
