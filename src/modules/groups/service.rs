use anyhow::anyhow;
use chrono::Utc;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use gubae_core::AppError;
use gubae_db::{DocumentStore, Filter};
use gubae_models::{
    CreateGroupDto, Group, GroupFilterParams, GroupWithMemberCount, Member, UpdateGroupDto,
};

use crate::utils::records::{decode, decode_all, encode};

pub const GROUP_NOT_FOUND: &str = "Group not found";

pub struct GroupService;

impl GroupService {
    #[instrument(skip(store))]
    pub async fn create_group(
        store: &dyn DocumentStore,
        dto: CreateGroupDto,
    ) -> Result<Group, AppError> {
        let mut document = encode(&dto)?;
        document.insert("createdAt".to_string(), json!(Utc::now()));

        decode(store.insert(Group::COLLECTION, document).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_groups(
        store: &dyn DocumentStore,
        filters: GroupFilterParams,
    ) -> Result<Vec<Group>, AppError> {
        let filter = Filter::new()
            .contains("name", filters.name.as_deref())
            .contains("place", filters.place.as_deref());

        decode_all(store.find(Group::COLLECTION, &filter).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_group(store: &dyn DocumentStore, id: Uuid) -> Result<Group, AppError> {
        let document = store
            .find_by_id(Group::COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(GROUP_NOT_FOUND)))?;

        decode(document)
    }

    /// Every group with the number of members assigned to it, alumni included.
    #[instrument(skip(store))]
    pub async fn get_groups_with_member_count(
        store: &dyn DocumentStore,
    ) -> Result<Vec<GroupWithMemberCount>, AppError> {
        let groups: Vec<Group> = decode_all(store.find(Group::COLLECTION, &Filter::new()).await?)?;

        let mut counted = Vec::with_capacity(groups.len());
        for group in groups {
            let member_count = store
                .count(
                    Member::COLLECTION,
                    &Filter::new().eq("group", group.id.to_string()),
                )
                .await?;
            counted.push(GroupWithMemberCount {
                group,
                member_count,
            });
        }

        Ok(counted)
    }

    #[instrument(skip(store))]
    pub async fn get_group_members(
        store: &dyn DocumentStore,
        id: Uuid,
    ) -> Result<Vec<Member>, AppError> {
        Self::get_group(store, id).await?;

        decode_all(
            store
                .find(
                    Member::COLLECTION,
                    &Filter::new().eq("group", id.to_string()),
                )
                .await?,
        )
    }

    #[instrument(skip(store))]
    pub async fn update_group(
        store: &dyn DocumentStore,
        id: Uuid,
        dto: UpdateGroupDto,
    ) -> Result<Group, AppError> {
        let document = store
            .update_by_id(Group::COLLECTION, id, encode(&dto)?)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(GROUP_NOT_FOUND)))?;

        decode(document)
    }

    /// Members of a deleted group keep their reference; reads show `groupInfo: null`.
    #[instrument(skip(store))]
    pub async fn delete_group(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
        if !store.delete_by_id(Group::COLLECTION, id).await? {
            return Err(AppError::not_found(anyhow!(GROUP_NOT_FOUND)));
        }

        Ok(())
    }
}
