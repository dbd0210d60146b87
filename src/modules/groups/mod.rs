//! Study groups.
//!
//! Deleting a group leaves its members in place; their `groupInfo` reads
//! back as null.

pub mod controller;
pub mod router;
pub mod service;
