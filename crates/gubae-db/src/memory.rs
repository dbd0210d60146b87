//! In-process document store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Document, DocumentStore, Filter, ID_FIELD, StoreError, strip_id, unique_value};

type Collection = Vec<(Uuid, Document)>;

fn taken(docs: &Collection, field: &str, value: &str, except: Option<Uuid>) -> bool {
    docs.iter().any(|(doc_id, doc)| {
        Some(*doc_id) != except && unique_value(doc, field) == Some(value)
    })
}

fn changes_anything(document: &Document, changes: &Document) -> bool {
    changes
        .iter()
        .any(|(key, value)| document.get(key) != Some(value))
}

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<Document, StoreError> {
        let id = Uuid::new_v4();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push((id, document.clone()));

        Ok(document)
    }

    async fn insert_unique(
        &self,
        collection: &str,
        field: &str,
        mut document: Document,
    ) -> Result<Document, StoreError> {
        let id = Uuid::new_v4();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if unique_value(&document, field).is_some_and(|value| taken(docs, field, value, None)) {
            return Err(StoreError::duplicate(collection, field));
        }

        docs.push((id, document.clone()));
        Ok(document)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| filter.matches(doc))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| *doc_id == id)
                .map(|(_, doc)| doc.clone())
        }))
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        let changes = strip_id(changes);
        let mut collections = self.collections.write().await;

        let Some((_, doc)) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| *doc_id == id))
        else {
            return Ok(None);
        };

        doc.extend(changes);
        Ok(Some(doc.clone()))
    }

    async fn update_unique(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        let changes = strip_id(changes);
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(position) = docs.iter().position(|(doc_id, _)| *doc_id == id) else {
            return Ok(None);
        };

        if unique_value(&changes, field).is_some_and(|value| taken(docs, field, value, Some(id))) {
            return Err(StoreError::duplicate(collection, field));
        }

        let doc = &mut docs[position].1;
        doc.extend(changes);
        Ok(Some(doc.clone()))
    }

    async fn update_many(
        &self,
        collection: &str,
        ids: &[Uuid],
        changes: Document,
    ) -> Result<u64, StoreError> {
        let changes = strip_id(changes);
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let mut modified = 0;
        for (doc_id, doc) in docs.iter_mut() {
            if ids.contains(doc_id) && changes_anything(doc, &changes) {
                doc.extend(changes.clone());
                modified += 1;
            }
        }

        Ok(modified)
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|(doc_id, _)| *doc_id != id);
        Ok(docs.len() < before)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|(_, doc)| filter.matches(doc)).count() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn id_of(document: &Document) -> Uuid {
        document[ID_FIELD].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_id() {
        let store = MemoryDocumentStore::new();
        let inserted = store
            .insert("groups", doc(json!({"id": "client-chosen", "name": "Ann"})))
            .await
            .unwrap();

        let id = id_of(&inserted);
        let found = store.find_by_id("groups", id).await.unwrap().unwrap();
        assert_eq!(found["name"], "Ann");
    }

    #[tokio::test]
    async fn test_find_filters_and_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for name in ["Ann", "Ben", "Anna"] {
            store.insert("groups", doc(json!({"name": name}))).await.unwrap();
        }

        let found = store
            .find("groups", &Filter::new().contains("name", Some("ann")))
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|d| d["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Ann", "Anna"]);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store.insert("staff", doc(json!({"name": "Ann"}))).await.unwrap();

        assert!(store.find("teachers", &Filter::new()).await.unwrap().is_empty());
        assert_eq!(store.count("staff", &Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_id() {
        let store = MemoryDocumentStore::new();
        let inserted = store
            .insert("services", doc(json!({"item": "Chairs", "quantity": 10})))
            .await
            .unwrap();
        let id = id_of(&inserted);

        let updated = store
            .update_by_id(
                "services",
                id,
                doc(json!({"quantity": 4, "id": Uuid::new_v4().to_string()})),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated["item"], "Chairs");
        assert_eq!(updated["quantity"], 4);
        assert_eq!(id_of(&updated), id);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryDocumentStore::new();
        let result = store
            .update_by_id("services", Uuid::new_v4(), Document::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_many_counts_modified_documents() {
        let store = MemoryDocumentStore::new();
        let a = id_of(&store.insert("members", doc(json!({"n": 1}))).await.unwrap());
        let b = id_of(&store.insert("members", doc(json!({"n": 2}))).await.unwrap());
        store.insert("members", doc(json!({"n": 3}))).await.unwrap();

        let matched = store
            .update_many(
                "members",
                &[a, b, Uuid::new_v4()],
                doc(json!({"isCompleted": true})),
            )
            .await
            .unwrap();
        assert_eq!(matched, 2);

        let completed = store
            .count("members", &Filter::new().eq("isCompleted", true))
            .await
            .unwrap();
        assert_eq!(completed, 2);

        let again = store
            .update_many("members", &[a, b], doc(json!({"isCompleted": true})))
            .await
            .unwrap();
        assert_eq!(again, 0);
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_taken_value() {
        let store = MemoryDocumentStore::new();
        store
            .insert_unique("staff", "email", doc(json!({"email": "almaz@example.com"})))
            .await
            .unwrap();

        let err = store
            .insert_unique("staff", "email", doc(json!({"email": "almaz@example.com"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { ref field, .. } if field == "email"));

        store
            .insert_unique("teachers", "email", doc(json!({"email": "almaz@example.com"})))
            .await
            .unwrap();
        for _ in 0..2 {
            store
                .insert_unique("staff", "email", doc(json!({"name": "No email"})))
                .await
                .unwrap();
        }
        assert_eq!(store.count("staff", &Filter::new()).await.unwrap(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_insert_unique_keeps_one() {
        let store = std::sync::Arc::new(MemoryDocumentStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert_unique("admins", "email", doc(json!({"email": "dup@example.com"})))
                        .await
                })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.count("admins", &Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_unique() {
        let store = MemoryDocumentStore::new();
        let almaz = id_of(
            &store
                .insert("staff", doc(json!({"email": "almaz@example.com"})))
                .await
                .unwrap(),
        );
        store
            .insert("staff", doc(json!({"email": "kebede@example.com"})))
            .await
            .unwrap();

        let kept = store
            .update_unique("staff", almaz, "email", doc(json!({"email": "almaz@example.com"})))
            .await
            .unwrap();
        assert!(kept.is_some());

        let err = store
            .update_unique("staff", almaz, "email", doc(json!({"email": "kebede@example.com"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        let missing = store
            .update_unique(
                "staff",
                Uuid::new_v4(),
                "email",
                doc(json!({"email": "kebede@example.com"})),
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = MemoryDocumentStore::new();
        let id = id_of(&store.insert("teachers", doc(json!({"n": 1}))).await.unwrap());

        assert!(store.delete_by_id("teachers", id).await.unwrap());
        assert!(!store.delete_by_id("teachers", id).await.unwrap());
        assert!(store.find_by_id("teachers", id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_one_returns_first_match() {
        let store = MemoryDocumentStore::new();
        store
            .insert("admins", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();

        let found = store
            .find_one("admins", &Filter::new().eq("email", "a@example.com"))
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = store
            .find_one("admins", &Filter::new().eq("email", "b@example.com"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
