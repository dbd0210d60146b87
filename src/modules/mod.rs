//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers with their OpenAPI annotations
//! - `service.rs`: Business logic over the document store
//! - `router.rs`: Axum router for the module
//!
//! Records and DTOs live in the `gubae-models` crate.

pub mod auth;
pub mod groups;
pub mod members;
pub mod services;
pub mod staff;
pub mod teachers;
