//! # Gubae Auth
//!
//! Bearer token issuance and verification.
//!
//! - [`claims`]: The payload carried inside every token
//! - [`jwt`]: The [`TokenCodec`] that signs and verifies tokens
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`gubae_config::JwtConfig`] and expire five hours after issuance.
//! Verification never fails loudly: it returns a [`TokenVerification`]
//! that callers branch on.
//!
//! # Example
//!
//! ```ignore
//! use gubae_auth::{TokenCodec, TokenVerification};
//! use gubae_config::JwtConfig;
//!
//! let codec = TokenCodec::new(&JwtConfig::from_env()?);
//! let token = codec.issue("admin@example.com")?;
//!
//! match codec.verify(&token) {
//!     TokenVerification::Valid(claims) => println!("hello {}", claims.sub),
//!     TokenVerification::Invalid { reason } => println!("rejected: {}", reason),
//! }
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{TokenCodec, TokenVerification};
