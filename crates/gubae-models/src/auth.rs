//! Administrator credentials and the register/login DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Stored administrator credential.
///
/// Only deserialized from the store: the password hash never leaves the
/// server. Outward-facing responses use [`AdminResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

impl Credential {
    pub const COLLECTION: &'static str = "admins";
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<Credential> for AdminResponse {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            email: credential.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "strongpassword")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "strongpassword")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "admin@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = RegisterRequest {
            email: "admin@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_admin_response_drops_password() {
        let credential = Credential {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
        };

        let body = serde_json::to_value(AdminResponse::from(credential)).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["email"], "admin@example.com");
    }

    #[test]
    fn test_login_response_wire_name() {
        let body = serde_json::to_value(LoginResponse {
            access_token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(body["accessToken"], "abc");
    }
}
