//! Group members.
//!
//! A member belongs to one [`Group`](crate::groups::Group) and carries a role
//! label. Members who finish their studies are moved to the alumni list by
//! setting `isCompleted`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::groups::Group;
use crate::validation::validate_phone;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub fullname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Id of the group this member belongs to
    pub group: Uuid,
    pub role: String,
    #[serde(default)]
    pub is_completed: bool,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub const COLLECTION: &'static str = "members";
}

/// A member with its group embedded; `groupInfo` is null once the group is gone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberWithGroup {
    #[serde(flatten)]
    pub member: Member,
    pub group_info: Option<Group>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMemberDto {
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub fullname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "0911223344")]
    pub phone: Option<String>,
    pub group: Uuid,
    #[validate(length(min = 1, max = 100, message = "Role is required"))]
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "Full name cannot be empty"))]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Role cannot be empty"))]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

/// Case-insensitive substring filters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberFilterParams {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferMembersDto {
    #[serde(default, alias = "abalids")]
    #[validate(length(min = 1, message = "No member IDs provided."))]
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferMembersResponse {
    pub message: String,
    pub transferred: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_create() -> CreateMemberDto {
        CreateMemberDto {
            fullname: "Abebe Kebede".to_string(),
            email: Some("abebe@example.com".to_string()),
            phone: Some("0911223344".to_string()),
            group: Uuid::new_v4(),
            role: "Student".to_string(),
        }
    }

    #[test]
    fn test_create_member_dto_validation() {
        assert!(valid_create().validate().is_ok());

        let no_contact = CreateMemberDto {
            email: None,
            phone: None,
            ..valid_create()
        };
        assert!(no_contact.validate().is_ok());

        let bad_phone = CreateMemberDto {
            phone: Some("12345".to_string()),
            ..valid_create()
        };
        assert!(bad_phone.validate().is_err());

        let bad_email = CreateMemberDto {
            email: Some("abebe-at-example".to_string()),
            ..valid_create()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_member_defaults_is_completed() {
        let member: Member = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "fullname": "Abebe",
            "email": null,
            "phone": null,
            "group": Uuid::new_v4(),
            "role": "Student",
            "joinedAt": "2024-03-01T09:00:00Z"
        }))
        .unwrap();
        assert!(!member.is_completed);
    }

    #[test]
    fn test_transfer_accepts_legacy_field_name() {
        let id = Uuid::new_v4();
        let dto: TransferMembersDto = serde_json::from_value(json!({ "abalids": [id] })).unwrap();
        assert_eq!(dto.member_ids, vec![id]);

        let empty: TransferMembersDto = serde_json::from_value(json!({ "memberIds": [] })).unwrap();
        assert!(empty.validate().is_err());
    }
}
