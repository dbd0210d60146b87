//! Request extractors that reject bad input before a handler runs.
//!
//! - [`ValidatedJson`]: JSON body deserialized and checked with `validator`
//! - [`ResourceId`]: `{id}` path segment parsed as a UUID
//!
//! Both reject with 400 and an `{"error": ...}` body.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use gubae_core::AppError;

pub const INVALID_ID: &str = "Invalid id";

fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_rejection(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    let body = rejection.body_text();
    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{} is required", field);
    }
    if body.contains("invalid type") || body.contains("invalid value") {
        return "Invalid field type in request".to_string();
    }
    if body.contains("UUID") {
        return INVALID_ID.to_string();
    }

    "Invalid request body".to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!(describe_rejection(&rejection))))?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!(format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// The `{id}` path parameter of a record route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub Uuid);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!(INVALID_ID)))?;

        Uuid::parse_str(&raw)
            .map(ResourceId)
            .map_err(|_| AppError::bad_request(anyhow!(INVALID_ID)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct SampleForm {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(length(min = 3))]
        code: String,
    }

    #[test]
    fn test_format_errors_uses_messages_and_falls_back_to_field() {
        let form = SampleForm {
            name: String::new(),
            code: "x".to_string(),
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(format_errors(&errors), "code is invalid, Name is required");
    }
}
