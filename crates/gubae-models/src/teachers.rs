//! Teachers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_phone;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: Uuid,
    pub full_name: String,
    pub phone_no: String,
    pub email: String,
    /// Subject taught
    pub subject: String,
}

impl Teacher {
    pub const COLLECTION: &'static str = "teachers";
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "0911223344")]
    pub phone_no: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    pub subject: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Subject cannot be empty"))]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TeacherFilterParams {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_teacher_dto_validation() {
        assert!(UpdateTeacherDto::default().validate().is_ok());

        let bad_phone = UpdateTeacherDto {
            phone_no: Some("09112233".to_string()),
            ..Default::default()
        };
        assert!(bad_phone.validate().is_err());

        let new_subject = UpdateTeacherDto {
            subject: Some("Ge'ez".to_string()),
            ..Default::default()
        };
        assert!(new_subject.validate().is_ok());
    }
}
