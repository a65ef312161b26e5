//! # Domain Models
//!
//! Pure domain types for the sweet potato risk dashboard, with minimal dependencies
//! (`serde`, `strum`). Keep it lean: no I/O, networking, or heavy logic, just data,
//! the static ward catalogue, and simple helpers.

pub mod config;
pub mod constants;
pub mod crop;
pub mod observation;
pub mod registry;
pub mod ward;
