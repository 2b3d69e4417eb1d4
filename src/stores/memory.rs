//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{BatchWrite, Document, DocumentStore};

/// In-memory document store.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart. Batches are applied under a single write
/// guard, so preconditions are evaluated against commit-time state and
/// a rejected batch leaves nothing behind.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.collections.write().unwrap().clear();
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .unwrap()
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

fn merge_into(target: &mut Document, deltas: &Document) {
    for (field, value) in deltas {
        target.insert(field.clone(), value.clone());
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            Some(existing) if merge => merge_into(existing, &fields),
            _ => {
                docs.insert(id.to_string(), fields);
            }
        }
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        deltas: Document,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().unwrap();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        merge_into(doc, &deltas);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut collections = self.collections.write().unwrap();
        collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        let collections = self.collections.read().unwrap();
        let mut docs: Vec<(String, Document)> = collections
            .get(collection)
            .map(|docs| docs.iter().map(|(id, d)| (id.clone(), d.clone())).collect())
            .unwrap_or_default();
        // Stable scan order regardless of hash-map internals
        docs.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(docs)
    }

    async fn atomic_batch(&self, writes: Vec<BatchWrite>) -> StoreResult<()> {
        let mut collections = self.collections.write().unwrap();

        // Validate every write before touching anything.
        for write in &writes {
            let doc = collections
                .get(&write.collection)
                .and_then(|docs| docs.get(&write.id));
            if doc.is_none() {
                return Err(StoreError::not_found(&write.collection, &write.id));
            }
            for precondition in &write.preconditions {
                if !precondition.holds(doc) {
                    return Err(StoreError::conflict(format!(
                        "precondition failed on {}/{}",
                        write.collection, write.id
                    )));
                }
            }
        }

        for write in &writes {
            let doc = collections
                .get_mut(&write.collection)
                .and_then(|docs| docs.get_mut(&write.id))
                .expect("validated above");
            merge_into(doc, &write.deltas);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::store::Precondition;
    use serde_json::json;

    fn doc(pairs: &[(&str, serde_json::Value)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_get_set_round_trip() {
        let store = MemoryStore::new();
        store
            .set_document("users", "u1", doc(&[("firstName", json!("Ada"))]), false)
            .await
            .unwrap();

        let fetched = store.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(fetched.get("firstName"), Some(&json!("Ada")));
        assert!(store.get_document("users", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_without_merge() {
        let store = MemoryStore::new();
        store
            .set_document(
                "users",
                "u1",
                doc(&[("a", json!(1)), ("b", json!(2))]),
                false,
            )
            .await
            .unwrap();
        store
            .set_document("users", "u1", doc(&[("a", json!(9))]), false)
            .await
            .unwrap();

        let fetched = store.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(fetched.get("a"), Some(&json!(9)));
        assert!(fetched.get("b").is_none());
    }

    #[tokio::test]
    async fn test_set_with_merge_keeps_other_fields() {
        let store = MemoryStore::new();
        store
            .set_document(
                "users",
                "u1",
                doc(&[("a", json!(1)), ("b", json!(2))]),
                false,
            )
            .await
            .unwrap();
        store
            .set_document("users", "u1", doc(&[("a", json!(9))]), true)
            .await
            .unwrap();

        let fetched = store.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(fetched.get("a"), Some(&json!(9)));
        assert_eq!(fetched.get("b"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryStore::new();
        let err = store
            .update_document("users", "ghost", doc(&[("a", json!(1))]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_documents_is_sorted_by_id() {
        let store = MemoryStore::new();
        for id in ["u3", "u1", "u2"] {
            store
                .set_document("users", id, Document::new(), false)
                .await
                .unwrap();
        }
        let ids: Vec<String> = store
            .list_documents("users")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }

    #[tokio::test]
    async fn test_batch_applies_all_writes() {
        let store = MemoryStore::new();
        store
            .set_document("users", "a", doc(&[("n", json!(0))]), false)
            .await
            .unwrap();
        store
            .set_document("users", "b", doc(&[("n", json!(0))]), false)
            .await
            .unwrap();

        store
            .atomic_batch(vec![
                BatchWrite::new("users", "a", doc(&[("n", json!(1))])),
                BatchWrite::new("users", "b", doc(&[("n", json!(2))])),
            ])
            .await
            .unwrap();

        let a = store.get_document("users", "a").await.unwrap().unwrap();
        let b = store.get_document("users", "b").await.unwrap().unwrap();
        assert_eq!(a.get("n"), Some(&json!(1)));
        assert_eq!(b.get("n"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_failed_precondition_rejects_whole_batch() {
        let store = MemoryStore::new();
        store
            .set_document("users", "a", doc(&[("locked", json!(false))]), false)
            .await
            .unwrap();
        store
            .set_document("users", "b", doc(&[("locked", json!(true))]), false)
            .await
            .unwrap();

        let err = store
            .atomic_batch(vec![
                BatchWrite::new("users", "a", doc(&[("x", json!(1))])),
                BatchWrite::new("users", "b", doc(&[("x", json!(1))])).with_precondition(
                    Precondition::FieldNotEquals {
                        field: "locked".into(),
                        value: json!(true),
                    },
                ),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        // First write must not have landed either.
        let a = store.get_document("users", "a").await.unwrap().unwrap();
        assert!(a.get("x").is_none());
    }

    #[tokio::test]
    async fn test_batch_against_missing_document_fails() {
        let store = MemoryStore::new();
        let err = store
            .atomic_batch(vec![BatchWrite::new(
                "users",
                "ghost",
                doc(&[("x", json!(1))]),
            )])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
