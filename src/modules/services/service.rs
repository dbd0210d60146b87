use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use gubae_core::AppError;
use gubae_db::{DocumentStore, Filter};
use gubae_models::{CreateServiceDto, Service, ServiceFilterParams, UpdateServiceDto};

use crate::utils::records::{decode, decode_all, encode};

pub const SERVICE_NOT_FOUND: &str = "Service not found";

/// Service inventory items. Item names are not unique.
pub struct ServiceItemService;

impl ServiceItemService {
    #[instrument(skip(store))]
    pub async fn create_service(
        store: &dyn DocumentStore,
        dto: CreateServiceDto,
    ) -> Result<Service, AppError> {
        decode(store.insert(Service::COLLECTION, encode(&dto)?).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_services(
        store: &dyn DocumentStore,
        filters: ServiceFilterParams,
    ) -> Result<Vec<Service>, AppError> {
        let filter = Filter::new().contains("item", filters.item.as_deref());
        decode_all(store.find(Service::COLLECTION, &filter).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_service(store: &dyn DocumentStore, id: Uuid) -> Result<Service, AppError> {
        store
            .find_by_id(Service::COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(SERVICE_NOT_FOUND)))
            .and_then(decode)
    }

    #[instrument(skip(store))]
    pub async fn update_service(
        store: &dyn DocumentStore,
        id: Uuid,
        dto: UpdateServiceDto,
    ) -> Result<Service, AppError> {
        store
            .update_by_id(Service::COLLECTION, id, encode(&dto)?)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(SERVICE_NOT_FOUND)))
            .and_then(decode)
    }

    #[instrument(skip(store))]
    pub async fn delete_service(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
        if !store.delete_by_id(Service::COLLECTION, id).await? {
            return Err(AppError::not_found(anyhow!(SERVICE_NOT_FOUND)));
        }

        Ok(())
    }
}
