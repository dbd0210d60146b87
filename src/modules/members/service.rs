use std::collections::HashMap;

use anyhow::anyhow;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, instrument};
use uuid::Uuid;

use gubae_core::AppError;
use gubae_db::{Document, DocumentStore, Filter};
use gubae_models::{
    CreateMemberDto, Group, Member, MemberFilterParams, MemberWithGroup, TransferMembersResponse,
    UpdateMemberDto,
};

use crate::utils::records::{decode, decode_all, encode, insert_unique_email, update_unique_email};

pub const MEMBER_NOT_FOUND: &str = "Member not found";
pub const NO_MEMBER_IDS: &str = "No member IDs provided.";
pub const NO_MEMBERS_MATCHED: &str = "No members found for the provided IDs.";

pub struct MemberService;

impl MemberService {
    #[instrument(skip(store))]
    pub async fn create_member(
        store: &dyn DocumentStore,
        dto: CreateMemberDto,
    ) -> Result<Member, AppError> {
        let mut document = encode(&dto)?;
        document.insert("isCompleted".to_string(), Value::Bool(false));
        document.insert("joinedAt".to_string(), json!(Utc::now()));

        decode(insert_unique_email(store, Member::COLLECTION, document).await?)
    }

    /// Active and alumni members alike, each with its group embedded.
    #[instrument(skip(store))]
    pub async fn get_members(
        store: &dyn DocumentStore,
        filters: MemberFilterParams,
    ) -> Result<Vec<MemberWithGroup>, AppError> {
        let filter = Filter::new()
            .contains("fullname", filters.fullname.as_deref())
            .contains("email", filters.email.as_deref())
            .contains("phone", filters.phone.as_deref());

        let members = decode_all(store.find(Member::COLLECTION, &filter).await?)?;
        Self::with_groups(store, members).await
    }

    #[instrument(skip(store))]
    pub async fn get_alumni(store: &dyn DocumentStore) -> Result<Vec<MemberWithGroup>, AppError> {
        let members = decode_all(
            store
                .find(Member::COLLECTION, &Filter::new().eq("isCompleted", true))
                .await?,
        )?;

        Self::with_groups(store, members).await
    }

    #[instrument(skip(store))]
    pub async fn get_member(
        store: &dyn DocumentStore,
        id: Uuid,
    ) -> Result<MemberWithGroup, AppError> {
        let member = Self::find_member(store, id).await?;
        Self::with_group(store, member).await
    }

    #[instrument(skip(store))]
    pub async fn update_member(
        store: &dyn DocumentStore,
        id: Uuid,
        dto: UpdateMemberDto,
    ) -> Result<MemberWithGroup, AppError> {
        let document = update_unique_email(store, Member::COLLECTION, id, encode(&dto)?)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(MEMBER_NOT_FOUND)))?;

        Self::with_group(store, decode(document)?).await
    }

    #[instrument(skip(store))]
    pub async fn delete_member(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
        if !store.delete_by_id(Member::COLLECTION, id).await? {
            return Err(AppError::not_found(anyhow!(MEMBER_NOT_FOUND)));
        }

        Ok(())
    }

    /// Marks every listed member as completed.
    ///
    /// The reported count is the number of members that changed, so members
    /// that were already alumni do not count. Fails with 404 when nothing
    /// changed.
    #[instrument(skip(store))]
    pub async fn transfer_to_alumni(
        store: &dyn DocumentStore,
        member_ids: Vec<Uuid>,
    ) -> Result<TransferMembersResponse, AppError> {
        if member_ids.is_empty() {
            return Err(AppError::bad_request(anyhow!(NO_MEMBER_IDS)));
        }

        let mut ids = member_ids;
        ids.sort_unstable();
        ids.dedup();

        let mut changes = Document::new();
        changes.insert("isCompleted".to_string(), Value::Bool(true));

        let transferred = store.update_many(Member::COLLECTION, &ids, changes).await?;
        if transferred == 0 {
            return Err(AppError::not_found(anyhow!(NO_MEMBERS_MATCHED)));
        }

        info!(transferred, requested = ids.len(), "Members transferred to alumni");

        Ok(TransferMembersResponse {
            message: format!("{} member(s) transferred to alumni successfully.", transferred),
            transferred,
        })
    }

    async fn find_member(store: &dyn DocumentStore, id: Uuid) -> Result<Member, AppError> {
        let document = store
            .find_by_id(Member::COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(MEMBER_NOT_FOUND)))?;

        decode(document)
    }

    async fn with_group(
        store: &dyn DocumentStore,
        member: Member,
    ) -> Result<MemberWithGroup, AppError> {
        let group_info = match store.find_by_id(Group::COLLECTION, member.group).await? {
            Some(document) => Some(decode(document)?),
            None => None,
        };

        Ok(MemberWithGroup { member, group_info })
    }

    async fn with_groups(
        store: &dyn DocumentStore,
        members: Vec<Member>,
    ) -> Result<Vec<MemberWithGroup>, AppError> {
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let groups: HashMap<Uuid, Group> =
            decode_all::<Group>(store.find(Group::COLLECTION, &Filter::new()).await?)?
                .into_iter()
                .map(|group| (group.id, group))
                .collect();

        Ok(members
            .into_iter()
            .map(|member| MemberWithGroup {
                group_info: groups.get(&member.group).cloned(),
                member,
            })
            .collect())
    }
}
