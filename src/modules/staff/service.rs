use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use gubae_core::AppError;
use gubae_db::{DocumentStore, Filter};
use gubae_models::{CreateStaffDto, Staff, StaffFilterParams, UpdateStaffDto};

use crate::utils::records::{decode, decode_all, encode, insert_unique_email, update_unique_email};

pub const STAFF_NOT_FOUND: &str = "Staff not found";

pub struct StaffService;

impl StaffService {
    #[instrument(skip(store))]
    pub async fn create_staff(
        store: &dyn DocumentStore,
        dto: CreateStaffDto,
    ) -> Result<Staff, AppError> {
        decode(insert_unique_email(store, Staff::COLLECTION, encode(&dto)?).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_staff(
        store: &dyn DocumentStore,
        filters: StaffFilterParams,
    ) -> Result<Vec<Staff>, AppError> {
        let filter = Filter::new()
            .contains("fullName", filters.full_name.as_deref())
            .contains("email", filters.email.as_deref())
            .contains("jobType", filters.job_type.as_deref());

        decode_all(store.find(Staff::COLLECTION, &filter).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_staff_member(store: &dyn DocumentStore, id: Uuid) -> Result<Staff, AppError> {
        let document = store
            .find_by_id(Staff::COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(STAFF_NOT_FOUND)))?;

        decode(document)
    }

    #[instrument(skip(store))]
    pub async fn update_staff(
        store: &dyn DocumentStore,
        id: Uuid,
        dto: UpdateStaffDto,
    ) -> Result<Staff, AppError> {
        let document = update_unique_email(store, Staff::COLLECTION, id, encode(&dto)?)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(STAFF_NOT_FOUND)))?;

        decode(document)
    }

    #[instrument(skip(store))]
    pub async fn delete_staff(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
        if !store.delete_by_id(Staff::COLLECTION, id).await? {
            return Err(AppError::not_found(anyhow!(STAFF_NOT_FOUND)));
        }

        Ok(())
    }
}
