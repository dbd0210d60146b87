//! Service inventory: items the community keeps on hand and how many.

pub mod controller;
pub mod router;
pub mod service;
