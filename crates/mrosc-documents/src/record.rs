//! Row shape of the hosted document table.
//!
//! Rows arrive with dates as strings. Converting a row into a
//! [`TrackedDocument`] is where malformed dates are caught; a stored
//! `status` column is read but never used.

use chrono::{DateTime, Utc};
use mrosc_common_core::{format_date, parse_optional_date, DocumentId, MalformedDateError, OrganizationId};
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::types::TrackedDocument;

/// A document row as stored or exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub owner_id: String,
    pub document_type: String,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub uploaded_at: String,
    pub uploaded_by: String,
    /// Legacy cached status. Ignored; status is always recomputed.
    #[serde(default, skip_serializing)]
    pub status: Option<String>,
}

impl TryFrom<DocumentRecord> for TrackedDocument {
    type Error = DocumentError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        let id = DocumentId::parse(&record.id).map_err(|source| DocumentError::InvalidId {
            field: "id",
            value: record.id.clone(),
            source,
        })?;
        let owner_id = OrganizationId::parse(&record.owner_id).map_err(|source| DocumentError::InvalidId {
            field: "owner_id",
            value: record.owner_id.clone(),
            source,
        })?;

        let issue_date = parse_optional_date("issue_date", record.issue_date.as_deref())?;
        let expiry_date = parse_optional_date("expiry_date", record.expiry_date.as_deref())?;
        let uploaded_at = DateTime::parse_from_rfc3339(record.uploaded_at.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| MalformedDateError::new("uploaded_at", record.uploaded_at.clone()))?;

        Ok(TrackedDocument {
            id,
            owner_id,
            document_type: record.document_type,
            issue_date,
            expiry_date,
            file_name: record.file_name,
            file_url: record.file_url,
            notes: record.notes,
            uploaded_at,
            uploaded_by: record.uploaded_by,
        })
    }
}

impl From<&TrackedDocument> for DocumentRecord {
    fn from(doc: &TrackedDocument) -> Self {
        Self {
            id: doc.id.as_uuid().to_string(),
            owner_id: doc.owner_id.as_uuid().to_string(),
            document_type: doc.document_type.clone(),
            issue_date: doc.issue_date.map(format_date),
            expiry_date: doc.expiry_date.map(format_date),
            file_name: doc.file_name.clone(),
            file_url: doc.file_url.clone(),
            notes: doc.notes.clone(),
            uploaded_at: doc.uploaded_at.to_rfc3339(),
            uploaded_by: doc.uploaded_by.clone(),
            status: None,
        }
    }
}

/// Convert a batch of rows, stopping at the first bad one.
pub fn parse_records(records: Vec<DocumentRecord>) -> Result<Vec<TrackedDocument>, DocumentError> {
    records.into_iter().map(TrackedDocument::try_from).collect()
}
