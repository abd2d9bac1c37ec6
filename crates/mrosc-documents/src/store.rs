//! Document persistence port.

use mrosc_common_core::OrganizationId;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

use crate::types::TrackedDocument;

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for tracked documents, one per `(owner, document type)`.
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the document for its owner and type.
    /// Returns the record it superseded, if any.
    fn upsert(&self, document: TrackedDocument) -> Result<Option<TrackedDocument>, StoreError>;

    /// The current document of `document_type` for `owner`.
    fn get(&self, owner: OrganizationId, document_type: &str) -> Result<Option<TrackedDocument>, StoreError>;

    /// All documents of one owner.
    fn list_for_owner(&self, owner: OrganizationId) -> Result<Vec<TrackedDocument>, StoreError>;

    /// Every document in the store.
    fn list_all(&self) -> Result<Vec<TrackedDocument>, StoreError>;
}

type Key = (OrganizationId, String);

/// In-memory store with last-write-wins replacement.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<Key, TrackedDocument>>,
}

impl InMemoryDocumentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with documents.
    ///
    /// For each owner and type the most recent `uploaded_at` wins; on equal
    /// timestamps the later entry does.
    pub fn with_documents(documents: impl IntoIterator<Item = TrackedDocument>) -> Self {
        let mut map: HashMap<Key, TrackedDocument> = HashMap::new();
        for document in documents {
            let key = (document.owner_id, document.document_type.clone());
            match map.get(&key) {
                Some(current) if current.uploaded_at > document.uploaded_at => {}
                _ => {
                    map.insert(key, document);
                }
            }
        }
        Self {
            documents: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn upsert(&self, document: TrackedDocument) -> Result<Option<TrackedDocument>, StoreError> {
        let key = (document.owner_id, document.document_type.clone());
        Ok(self.documents.write().insert(key, document))
    }

    fn get(&self, owner: OrganizationId, document_type: &str) -> Result<Option<TrackedDocument>, StoreError> {
        let key = (owner, document_type.to_string());
        Ok(self.documents.read().get(&key).cloned())
    }

    fn list_for_owner(&self, owner: OrganizationId) -> Result<Vec<TrackedDocument>, StoreError> {
        let mut docs: Vec<TrackedDocument> = self
            .documents
            .read()
            .values()
            .filter(|d| d.owner_id == owner)
            .cloned()
            .collect();
        docs.sort_by(|a, b| a.document_type.cmp(&b.document_type));
        Ok(docs)
    }

    fn list_all(&self) -> Result<Vec<TrackedDocument>, StoreError> {
        let mut docs: Vec<TrackedDocument> = self.documents.read().values().cloned().collect();
        docs.sort_by(|a, b| (a.owner_id, &a.document_type).cmp(&(b.owner_id, &b.document_type)));
        Ok(docs)
    }
}
