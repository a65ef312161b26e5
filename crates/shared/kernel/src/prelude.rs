//! Common imports for feature crates.

pub use crate::domain::config::DashboardConfig;
pub use crate::domain::constants::*;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
pub use crate::random::simulation_rng;

#[cfg(feature = "server")]
pub use crate::server::{
    error::{ApiError, ApiResult},
    state::ApiState,
};
