//! Administrator registration and login.
//!
//! Both routes are public. A successful login returns a bearer token that
//! every other `/api` route requires.

pub mod controller;
pub mod router;
pub mod service;
