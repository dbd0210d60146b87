//! PostgreSQL document store.
//!
//! Every document is a JSONB row in the `documents` table, keyed by
//! `(collection, id)`. The body also carries the id so rows round-trip as-is.
//!
//! Unique writes hold a transaction-scoped advisory lock on
//! `collection:field:value` while they check and write. A unique index on
//! `body ->> 'email'` backs this up for email fields.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use gubae_config::DatabaseConfig;

use crate::filter::Condition;
use crate::{Document, DocumentStore, Filter, ID_FIELD, StoreError, strip_id, unique_value};

const INSERT_SQL: &str =
    "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) RETURNING body";

const UPDATE_SQL: &str = r#"UPDATE documents
    SET body = body || $3, updated_at = NOW()
    WHERE collection = $1 AND id = $2
    RETURNING body"#;

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

}

fn duplicate_or(error: sqlx::Error, collection: &str, field: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return StoreError::duplicate(collection, field);
        }
    }
    error.into()
}

async fn lock_value(
    conn: &mut PgConnection,
    collection: &str,
    field: &str,
    value: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(format!("{}:{}:{}", collection, field, value))
        .execute(conn)
        .await?;
    Ok(())
}

async fn value_taken(
    conn: &mut PgConnection,
    collection: &str,
    field: &str,
    value: &str,
    except: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(
               SELECT 1 FROM documents
               WHERE collection = $1 AND body ->> $2 = $3
                 AND ($4::uuid IS NULL OR id <> $4)
           )"#,
    )
    .bind(collection)
    .bind(field)
    .bind(value)
    .bind(except)
    .fetch_one(conn)
    .await
}

fn into_document(collection: &str, body: Json<Value>) -> Result<Document, StoreError> {
    match body.0 {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Corrupt {
            collection: collection.to_string(),
        }),
    }
}

fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for condition in filter.conditions() {
        builder.push(" AND ");
        match condition {
            Condition::Equals { field, value } => {
                builder
                    .push("body -> ")
                    .push_bind(field.clone())
                    .push(" = ")
                    .push_bind(Json(value.clone()));
            }
            Condition::Contains { field, needle } => {
                builder
                    .push("strpos(lower(body ->> ")
                    .push_bind(field.clone())
                    .push("), lower(")
                    .push_bind(needle.clone())
                    .push(")) > 0");
            }
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self, document), level = "debug")]
    async fn insert(&self, collection: &str, mut document: Document) -> Result<Document, StoreError> {
        let id = Uuid::new_v4();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let body = sqlx::query_scalar::<_, Json<Value>>(INSERT_SQL)
            .bind(collection)
            .bind(id)
            .bind(Json(Value::Object(document)))
            .fetch_one(&self.pool)
            .await?;

        into_document(collection, body)
    }

    #[instrument(skip(self, document), level = "debug")]
    async fn insert_unique(
        &self,
        collection: &str,
        field: &str,
        mut document: Document,
    ) -> Result<Document, StoreError> {
        let Some(value) = unique_value(&document, field).map(str::to_string) else {
            return self.insert(collection, document).await;
        };

        let id = Uuid::new_v4();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let mut tx = self.pool.begin().await?;
        lock_value(&mut tx, collection, field, &value).await?;
        if value_taken(&mut tx, collection, field, &value, None).await? {
            return Err(StoreError::duplicate(collection, field));
        }

        let body = sqlx::query_scalar::<_, Json<Value>>(INSERT_SQL)
            .bind(collection)
            .bind(id)
            .bind(Json(Value::Object(document)))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| duplicate_or(e, collection, field))?;
        tx.commit().await?;

        into_document(collection, body)
    }

    #[instrument(skip(self), level = "debug")]
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT body FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        push_conditions(&mut builder, filter);
        builder.push(" ORDER BY seq");

        builder
            .build_query_scalar::<Json<Value>>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|body| into_document(collection, body))
            .collect()
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        sqlx::query_scalar::<_, Json<Value>>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(|body| into_document(collection, body))
        .transpose()
    }

    #[instrument(skip(self, changes), level = "debug")]
    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        sqlx::query_scalar::<_, Json<Value>>(UPDATE_SQL)
            .bind(collection)
            .bind(id)
            .bind(Json(Value::Object(strip_id(changes))))
            .fetch_optional(&self.pool)
            .await?
            .map(|body| into_document(collection, body))
            .transpose()
    }

    #[instrument(skip(self, changes), level = "debug")]
    async fn update_unique(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        let changes = strip_id(changes);
        let value = unique_value(&changes, field).map(str::to_string);

        let mut tx = self.pool.begin().await?;
        if let Some(value) = &value {
            lock_value(&mut tx, collection, field, value).await?;
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM documents WHERE collection = $1 AND id = $2)",
        )
        .bind(collection)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Ok(None);
        }

        if let Some(value) = &value {
            if value_taken(&mut tx, collection, field, value, Some(id)).await? {
                return Err(StoreError::duplicate(collection, field));
            }
        }

        let body = sqlx::query_scalar::<_, Json<Value>>(UPDATE_SQL)
            .bind(collection)
            .bind(id)
            .bind(Json(Value::Object(changes)))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| duplicate_or(e, collection, field))?;
        tx.commit().await?;

        body.map(|body| into_document(collection, body)).transpose()
    }

    #[instrument(skip(self, changes), level = "debug")]
    async fn update_many(
        &self,
        collection: &str,
        ids: &[Uuid],
        changes: Document,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"UPDATE documents
               SET body = body || $3, updated_at = NOW()
               WHERE collection = $1 AND id = ANY($2) AND NOT (body @> $3)"#,
        )
        .bind(collection)
        .bind(ids.to_vec())
        .bind(Json(Value::Object(strip_id(changes))))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), level = "debug")]
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        push_conditions(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total.max(0) as u64)
    }
}
