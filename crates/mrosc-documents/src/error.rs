//! Document service errors.

use chrono::NaiveDate;
use mrosc_common_core::{IdParseError, MalformedDateError};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::store::StoreError;

/// Errors raised around the lifecycle engine: parsing, upload validation, storage.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    MalformedDate(#[from] MalformedDateError),

    #[error("invalid {field}: {value:?}")]
    InvalidId {
        field: &'static str,
        value: String,
        #[source]
        source: IdParseError,
    },

    #[error("unknown document type: {id}")]
    UnknownDocumentType { id: String },

    #[error("expiry date {expiry} is before issue date {issue}")]
    ExpiryBeforeIssue { issue: NaiveDate, expiry: NaiveDate },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
