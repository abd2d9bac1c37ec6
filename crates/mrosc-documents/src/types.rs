//! Document types, tracked documents and their status.

use chrono::{DateTime, NaiveDate, Utc};
use mrosc_common_core::{DocumentId, OrganizationId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping used by listings and the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    /// Statute, minutes, registry data.
    Institutional,
    /// Tax clearance certificates.
    Fiscal,
    /// FGTS and labor certificates.
    Labor,
    /// Licences and proof of address.
    Operational,
}

impl DocumentCategory {
    /// Portuguese label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Institutional => "Institucional",
            Self::Fiscal => "Fiscal",
            Self::Labor => "Trabalhista",
            Self::Operational => "Operacional",
        }
    }

    /// Parse from the snake_case key.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "institutional" => Some(Self::Institutional),
            "fiscal" => Some(Self::Fiscal),
            "labor" => Some(Self::Labor),
            "operational" => Some(Self::Operational),
            _ => None,
        }
    }
}

/// Configuration of one kind of compliance document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTypeConfig {
    /// Unique type key, e.g. `cnd_federal`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Catalog grouping.
    pub category: DocumentCategory,
    /// Whether documents of this type expire.
    pub has_validity: bool,
    /// Validity in months. Set only when `has_validity` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_months: Option<u32>,
    /// Whether an OSC must keep this document on file.
    #[serde(default = "default_required")]
    pub required: bool,
    /// Longer description for upload forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_required() -> bool {
    true
}

impl DocumentTypeConfig {
    /// A document type that never expires.
    pub fn permanent(id: impl Into<String>, name: impl Into<String>, category: DocumentCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            has_validity: false,
            validity_months: None,
            required: true,
            description: None,
        }
    }

    /// A document type valid for `months` after issuance.
    pub fn expiring(
        id: impl Into<String>,
        name: impl Into<String>,
        category: DocumentCategory,
        months: u32,
    ) -> Self {
        Self {
            has_validity: true,
            validity_months: Some(months),
            ..Self::permanent(id, name, category)
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the type as not required.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// An uploaded compliance document.
///
/// There is no status field: status is derived on every read from the
/// expiry date (see [`crate::lifecycle::classify`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedDocument {
    pub id: DocumentId,
    pub owner_id: OrganizationId,
    pub document_type: String,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
}

/// Compliance state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// On file and not expiring within the warning window.
    Valid,
    /// Expires within the warning window, today included.
    Expiring,
    /// Past its expiry date.
    Expired,
    /// No document of this type uploaded yet. Never produced by classification.
    Pending,
}

impl DocumentStatus {
    /// Portuguese badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "Válido",
            Self::Expiring => "Vencendo",
            Self::Expired => "Vencido",
            Self::Pending => "Pendente",
        }
    }

    /// Needs action from the organization.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Expiring | Self::Expired | Self::Pending)
    }

    /// Key used in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
