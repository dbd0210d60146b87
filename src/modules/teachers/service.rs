use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use gubae_core::AppError;
use gubae_db::{DocumentStore, Filter};
use gubae_models::{CreateTeacherDto, Teacher, TeacherFilterParams, UpdateTeacherDto};

use crate::utils::records::{decode, decode_all, encode, insert_unique_email, update_unique_email};

pub const TEACHER_NOT_FOUND: &str = "Teacher not found";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(store))]
    pub async fn create_teacher(
        store: &dyn DocumentStore,
        dto: CreateTeacherDto,
    ) -> Result<Teacher, AppError> {
        decode(insert_unique_email(store, Teacher::COLLECTION, encode(&dto)?).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_teachers(
        store: &dyn DocumentStore,
        filters: TeacherFilterParams,
    ) -> Result<Vec<Teacher>, AppError> {
        let filter = Filter::new()
            .contains("fullName", filters.full_name.as_deref())
            .contains("email", filters.email.as_deref())
            .contains("subject", filters.subject.as_deref());

        decode_all(store.find(Teacher::COLLECTION, &filter).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_teacher(store: &dyn DocumentStore, id: Uuid) -> Result<Teacher, AppError> {
        store
            .find_by_id(Teacher::COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(TEACHER_NOT_FOUND)))
            .and_then(decode)
    }

    #[instrument(skip(store))]
    pub async fn update_teacher(
        store: &dyn DocumentStore,
        id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        update_unique_email(store, Teacher::COLLECTION, id, encode(&dto)?)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(TEACHER_NOT_FOUND)))
            .and_then(decode)
    }

    #[instrument(skip(store))]
    pub async fn delete_teacher(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
        match store.delete_by_id(Teacher::COLLECTION, id).await? {
            true => Ok(()),
            false => Err(AppError::not_found(anyhow!(TEACHER_NOT_FOUND))),
        }
    }
}
