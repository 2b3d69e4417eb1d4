//! Document store abstraction.
//!
//! The backend database is modelled as a generic transactional document
//! store: named collections of loosely-typed field bags with per-document
//! read/update/delete, a full-collection scan, and a multi-document atomic
//! batch-write primitive. Production deployments sit this trait on top of a
//! cloud document database; tests use [`MemoryStore`](crate::stores::MemoryStore).

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::StoreResult;

/// A loosely-typed document: named fields with JSON-shaped values.
pub type Document = serde_json::Map<String, Value>;

/// Well-known collection names.
pub mod collections {
    /// Profile records, keyed by user id.
    pub const USERS: &str = "users";

    /// Questionnaire snapshots, keyed by user id.
    pub const QUESTIONNAIRES: &str = "questionnaires";
}

/// A condition that must hold for a [`BatchWrite`] to commit.
///
/// Preconditions are evaluated against the document's state at commit time,
/// under the same atomicity guarantee as the writes themselves. This is what
/// lets callers close read-then-write race windows: the check happens inside
/// the transaction, not against an earlier (possibly stale) read.
#[derive(Debug, Clone, PartialEq)]
pub enum Precondition {
    /// The target document must exist.
    Exists,

    /// The named field must currently equal the given value.
    /// A missing field matches only `Value::Null`.
    FieldEquals { field: String, value: Value },

    /// The named field must not currently equal the given value.
    /// A missing field never equals a non-null value.
    FieldNotEquals { field: String, value: Value },
}

/// One write in an atomic batch: field deltas merged into an existing
/// document, guarded by zero or more preconditions.
#[derive(Debug, Clone)]
pub struct BatchWrite {
    /// Target collection.
    pub collection: String,

    /// Target document id.
    pub id: String,

    /// Fields to merge into the document.
    pub deltas: Document,

    /// Conditions that must hold at commit time.
    pub preconditions: Vec<Precondition>,
}

impl BatchWrite {
    /// Create a batch write with no preconditions.
    pub fn new(collection: impl Into<String>, id: impl Into<String>, deltas: Document) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            deltas,
            preconditions: Vec::new(),
        }
    }

    /// Add a precondition.
    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.preconditions.push(precondition);
        self
    }
}

/// Generic transactional document store.
///
/// Contract notes:
/// - `get_document` returns `Ok(None)` for an absent document; absence is
///   not an error at this layer.
/// - `update_document` and `delete_document` fail with
///   [`StoreError::NotFound`](crate::error::StoreError::NotFound) when the
///   target does not exist.
/// - `atomic_batch` commits every write or none. A failed precondition
///   rejects the whole batch with
///   [`StoreError::Conflict`](crate::error::StoreError::Conflict).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document.
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Write a document. With `merge`, fields are merged into any existing
    /// document; without, the document is replaced wholesale.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> StoreResult<()>;

    /// Merge field deltas into an existing document.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        deltas: Document,
    ) -> StoreResult<()>;

    /// Delete a document.
    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Scan a whole collection.
    ///
    /// Unbounded: every document in the collection is returned. Acceptable
    /// at the population sizes this system targets; known scalability
    /// ceiling for anything larger.
    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<(String, Document)>>;

    /// Apply a set of writes atomically: all land or none do.
    async fn atomic_batch(&self, writes: Vec<BatchWrite>) -> StoreResult<()>;
}

// Shared handles delegate, so services can hold Arc<S> over one backend.
#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        (**self).get_document(collection, id).await
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> StoreResult<()> {
        (**self).set_document(collection, id, fields, merge).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        deltas: Document,
    ) -> StoreResult<()> {
        (**self).update_document(collection, id, deltas).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()> {
        (**self).delete_document(collection, id).await
    }

    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        (**self).list_documents(collection).await
    }

    async fn atomic_batch(&self, writes: Vec<BatchWrite>) -> StoreResult<()> {
        (**self).atomic_batch(writes).await
    }
}

impl Precondition {
    /// Evaluate this precondition against a document (or its absence).
    pub fn holds(&self, doc: Option<&Document>) -> bool {
        match self {
            Precondition::Exists => doc.is_some(),
            Precondition::FieldEquals { field, value } => {
                let current = doc.and_then(|d| d.get(field)).unwrap_or(&Value::Null);
                current == value
            }
            Precondition::FieldNotEquals { field, value } => {
                let current = doc.and_then(|d| d.get(field)).unwrap_or(&Value::Null);
                current != value
            }
        }
    }
}
