//! # Gubae Core
//!
//! Core types and utilities shared by every Gubae crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification with bcrypt
//!
//! # Example
//!
//! ```ignore
//! use gubae_core::errors::AppError;
//! use gubae_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Teacher not found"));
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
