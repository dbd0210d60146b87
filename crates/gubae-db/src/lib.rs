//! # Gubae DB
//!
//! The document store behind every Gubae resource.
//!
//! Documents are JSON objects grouped into named collections and addressed by
//! a UUID stored under the [`ID_FIELD`] key. Queries take a [`Filter`].
//!
//! Two backends implement [`DocumentStore`]:
//!
//! - [`PgDocumentStore`]: PostgreSQL, one JSONB row per document
//! - [`MemoryDocumentStore`]: in-process, used by tests and `DATABASE_URL=memory://`
//!
//! # Example
//!
//! ```ignore
//! use gubae_config::DatabaseConfig;
//! use gubae_db::{Filter, connect_store};
//!
//! let store = connect_store(&DatabaseConfig::from_env()?).await?;
//! let teachers = store
//!     .find("teachers", &Filter::new().contains("subject", Some("math")))
//!     .await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use gubae_config::DatabaseConfig;
use uuid::Uuid;

pub mod codec;
pub mod filter;
pub mod memory;
pub mod postgres;

pub use codec::{from_document, to_document};
pub use filter::{Condition, Filter};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A stored JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Key under which every document carries its id.
pub const ID_FIELD: &str = "id";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("stored document in `{collection}` is not a JSON object")]
    Corrupt { collection: String },
    #[error("`{field}` is already taken in `{collection}`")]
    Duplicate { collection: String, field: String },
}

impl StoreError {
    fn duplicate(collection: &str, field: &str) -> Self {
        Self::Duplicate {
            collection: collection.to_string(),
            field: field.to_string(),
        }
    }
}

/// Persistence operations the resource services need.
///
/// Implementations assign a fresh id on insert, merge top-level fields on
/// update (the id is never overwritten) and return documents in insertion
/// order.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError>;

    /// Inserts like [`insert`](Self::insert), failing with
    /// [`StoreError::Duplicate`] when another document in `collection` already
    /// holds the same string under `field`. The check and the write are atomic.
    /// Documents without a string `field` are inserted unchecked.
    async fn insert_unique(
        &self,
        collection: &str,
        field: &str,
        document: Document,
    ) -> Result<Document, StoreError>;

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Merges `changes` into the document; `None` when no document has `id`.
    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        changes: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Updates like [`update_by_id`](Self::update_by_id), atomically rejecting a
    /// string `field` in `changes` that another document already holds.
    /// A missing document yields `Ok(None)` before uniqueness is considered.
    async fn update_unique(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        changes: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Merges `changes` into every document whose id is in `ids`.
    ///
    /// Returns how many documents actually changed; a document that already
    /// holds every value in `changes` is left alone and not counted.
    async fn update_many(
        &self,
        collection: &str,
        ids: &[Uuid],
        changes: Document,
    ) -> Result<u64, StoreError>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }
}

pub type SharedStore = Arc<dyn DocumentStore>;

/// Connects the backend selected by `config.url`.
pub async fn connect_store(config: &DatabaseConfig) -> Result<SharedStore, StoreError> {
    if config.is_memory() {
        tracing::warn!("Using in-memory document store; data is lost on restart");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    }

    let store = PgDocumentStore::connect(config).await?;
    store.migrate().await?;
    Ok(Arc::new(store))
}

fn strip_id(mut changes: Document) -> Document {
    changes.remove(ID_FIELD);
    changes
}

fn unique_value<'a>(document: &'a Document, field: &str) -> Option<&'a str> {
    document.get(field)?.as_str()
}
