//! Service inventory items.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub item: String,
    pub quantity: f64,
}

impl Service {
    pub const COLLECTION: &'static str = "services";
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateServiceDto {
    #[validate(length(min = 1, max = 200, message = "Item is required"))]
    pub item: String,
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "Item cannot be empty"))]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceFilterParams {
    pub item: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_must_be_non_negative() {
        let zero = CreateServiceDto {
            item: "Candles".to_string(),
            quantity: 0.0,
        };
        assert!(zero.validate().is_ok());

        let negative = CreateServiceDto {
            item: "Candles".to_string(),
            quantity: -1.0,
        };
        assert!(negative.validate().is_err());

        let negative_patch = UpdateServiceDto {
            item: None,
            quantity: Some(-0.5),
        };
        assert!(negative_patch.validate().is_err());
    }
}
