//! Ward catalogue slice: summaries, the comparison table, detail profiles and the crop profile.

pub mod comparison;
mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod profile;

pub use crate::error::{WardsError, WardsErrorExt};

use agrisk_kernel::domain::config::DashboardConfig;
use agrisk_kernel::domain::registry::InitializedSlice;
use agrisk_kernel::domain::ward::WardRegistry;
use std::sync::Arc;

/// Wards feature state
#[agrisk_derive::feature_slice]
pub struct Wards {
    pub registry: Arc<WardRegistry>,
    /// Seed for the simulated risk scores.
    pub seed: Option<u64>,
}

/// Initialize the wards feature.
///
/// # Errors
/// Returns an error when the catalogue is empty.
pub fn init(
    config: &DashboardConfig,
    registry: Arc<WardRegistry>,
) -> Result<InitializedSlice, WardsError> {
    if registry.is_empty() {
        return Err("ward catalogue is empty".into());
    }

    tracing::info!(wards = registry.len(), "Wards slice initialized");

    let slice = Wards::new(WardsInner { registry, seed: config.history.seed });
    Ok(InitializedSlice::new(slice))
}

#[cfg(feature = "server")]
pub use handlers::router;
