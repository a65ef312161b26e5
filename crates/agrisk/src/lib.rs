//! Facade crate for the dashboard features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `agrisk` with the `server` feature.
//! - Call [`init`] to build the feature slices and [`server::router::api_router`] for their routes.

pub use agrisk_domain as domain;
use agrisk_domain::config::DashboardConfig;
use agrisk_domain::registry::InitializedSlice;
use agrisk_domain::ward::WardRegistry;
pub use agrisk_kernel as kernel;
use std::sync::Arc;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use agrisk_kernel::server::state::ApiState;
        pub use agrisk_kernel::server::router::{start_clock, system_router};
        use utoipa_axum::router::OpenApiRouter;

        /// Routes of every feature slice.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(crate::features::wards::router())
                .merge(crate::features::assessment::router())
                .merge(crate::features::history::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use agrisk_assessment as assessment;
    pub use agrisk_history as history;
    pub use agrisk_wards as wards;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "wards",
        "assessment",
        "history",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize every feature slice over the Gatundu North catalogue.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &DashboardConfig,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let registry = Arc::new(WardRegistry::gatundu_north());

    Ok(vec![
        features::wards::init(config, Arc::clone(&registry))?,
        features::assessment::init(config, Arc::clone(&registry))?,
        features::history::init(config, registry)?,
    ])
}
