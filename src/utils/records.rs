//! Conversions between stored documents and typed records, plus the
//! email-unique writes shared by the people collections.

use anyhow::anyhow;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use gubae_core::AppError;
use gubae_db::{Document, DocumentStore, StoreError, from_document, to_document};

pub const DUPLICATE_EMAIL: &str = "Email already exists";
const EMAIL_FIELD: &str = "email";

pub fn encode<T: Serialize>(value: &T) -> Result<Document, AppError> {
    to_document(value).map_err(|e| AppError::internal(anyhow!("Failed to encode record: {}", e)))
}

pub fn decode<T: DeserializeOwned>(document: Document) -> Result<T, AppError> {
    from_document(document)
        .map_err(|e| AppError::internal(anyhow!("Stored record is malformed: {}", e)))
}

pub fn decode_all<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>, AppError> {
    documents.into_iter().map(decode).collect()
}

/// Maps a store-level uniqueness failure to 400 with `message`.
pub fn duplicate_as(message: &'static str) -> impl Fn(StoreError) -> AppError {
    move |e| match e {
        StoreError::Duplicate { .. } => AppError::conflict(anyhow!(message)),
        other => other.into(),
    }
}

/// Inserts a record whose `email`, when present, must be unused in `collection`.
pub async fn insert_unique_email(
    store: &dyn DocumentStore,
    collection: &str,
    document: Document,
) -> Result<Document, AppError> {
    store
        .insert_unique(collection, EMAIL_FIELD, document)
        .await
        .map_err(duplicate_as(DUPLICATE_EMAIL))
}

/// Updates a record, rejecting an `email` another record already uses.
///
/// A missing record is `Ok(None)`, whatever the email.
pub async fn update_unique_email(
    store: &dyn DocumentStore,
    collection: &str,
    id: Uuid,
    changes: Document,
) -> Result<Option<Document>, AppError> {
    store
        .update_unique(collection, id, EMAIL_FIELD, changes)
        .await
        .map_err(duplicate_as(DUPLICATE_EMAIL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use gubae_db::{ID_FIELD, MemoryDocumentStore};
    use serde_json::json;

    fn email_doc(email: &str) -> Document {
        json!({ "email": email }).as_object().cloned().unwrap()
    }

    fn id_of(document: &Document) -> Uuid {
        document[ID_FIELD].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryDocumentStore::new();
        insert_unique_email(&store, "staff", email_doc("almaz@example.com"))
            .await
            .unwrap();

        let err = insert_unique_email(&store, "staff", email_doc("almaz@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), DUPLICATE_EMAIL);

        assert!(
            insert_unique_email(&store, "staff", email_doc("other@example.com"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_record_may_keep_its_own_email() {
        let store = MemoryDocumentStore::new();
        let almaz = insert_unique_email(&store, "staff", email_doc("almaz@example.com"))
            .await
            .unwrap();
        insert_unique_email(&store, "staff", email_doc("kebede@example.com"))
            .await
            .unwrap();
        let id = id_of(&almaz);

        let kept = update_unique_email(&store, "staff", id, email_doc("almaz@example.com"))
            .await
            .unwrap();
        assert!(kept.is_some());

        let err = update_unique_email(&store, "staff", id, email_doc("kebede@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), DUPLICATE_EMAIL);
    }

    #[tokio::test]
    async fn test_missing_record_wins_over_taken_email() {
        let store = MemoryDocumentStore::new();
        insert_unique_email(&store, "staff", email_doc("almaz@example.com"))
            .await
            .unwrap();

        let result =
            update_unique_email(&store, "staff", Uuid::new_v4(), email_doc("almaz@example.com"))
                .await
                .unwrap();
        assert!(result.is_none());
    }
}
