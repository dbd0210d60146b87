//! Shared helpers for the feature modules.
//!
//! - [`records`]: Document/record conversion and email-unique writes

pub mod records;
