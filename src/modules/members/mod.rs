//! Group members and the alumni list.
//!
//! A member is alumni once `isCompleted` is true; alumni stay in the main
//! listing too. Reads embed the member's group as `groupInfo`.

pub mod controller;
pub mod router;
pub mod service;
