//! Crop-stress assessment slice.
//!
//! Wires the [`gateway::ModelGateway`] (lazily loaded classifier), the
//! [`estimator::StressEstimator`] (model first, closed-form fallback second, ward
//! multiplier last) and the [`insurance`] advisor behind `/api/assessments` and `/api/model`.

mod error;
pub mod estimator;
pub mod gateway;
#[cfg(feature = "server")]
mod handlers;
pub mod insurance;
pub mod model;

pub use crate::error::{AssessmentError, AssessmentErrorExt};

use crate::estimator::StressEstimator;
use crate::gateway::ModelGateway;
use agrisk_kernel::domain::config::DashboardConfig;
use agrisk_kernel::domain::registry::InitializedSlice;
use agrisk_kernel::domain::ward::WardRegistry;
use std::sync::Arc;

/// Assessment feature state
#[agrisk_derive::feature_slice]
pub struct Assessment {
    pub registry: Arc<WardRegistry>,
    pub estimator: StressEstimator,
}

/// Initialize the assessment feature and load the stress model.
///
/// # Errors
/// Returns an error when `model.path` is set but empty.
pub fn init(
    config: &DashboardConfig,
    registry: Arc<WardRegistry>,
) -> Result<InitializedSlice, AssessmentError> {
    if config.model.path.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
        return Err(AssessmentError::Config { message: "model.path is empty".into(), context: None });
    }

    let gateway = Arc::new(ModelGateway::new(config.model.path.clone()));
    let model_loaded = gateway.warm_up();
    let estimator = StressEstimator::new(gateway, config.assessment.clamp_probability);

    tracing::info!(
        model_loaded,
        clamp_probability = config.assessment.clamp_probability,
        "Assessment slice initialized"
    );

    Ok(InitializedSlice::new(Assessment::new(AssessmentInner { registry, estimator })))
}

#[cfg(feature = "server")]
pub use handlers::router;
