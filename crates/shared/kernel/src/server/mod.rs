//! HTTP plumbing shared by the feature routers.

pub mod error;
mod health;
pub mod router;
pub mod state;
