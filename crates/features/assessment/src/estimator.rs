//! Stress estimation with a rule-based fallback when the model cannot answer.

use crate::gateway::{GatewayError, ModelGateway};
use agrisk_kernel::domain::observation::{EstimateSource, ObservationInput, StressEstimate};
use agrisk_kernel::domain::ward::WardRecord;
use std::sync::Arc;
use tracing::{debug, warn};

/// Closed-form stress heuristic.
///
/// `0.4 * T/40 + 0.4 * (100 - SM)/100 + 0.2 * (1 - NDVI)/2`, evaluated on the raw inputs:
/// 40 °C, 0 % moisture and NDVI 0 give exactly 1.0.
#[must_use]
pub fn fallback_probability(observation: &ObservationInput) -> f64 {
    0.4 * (observation.temperature / 40.0)
        + 0.4 * ((100.0 - observation.soil_moisture) / 100.0)
        + 0.2 * ((1.0 - observation.vegetation_index) / 2.0)
}

/// Estimates for a batch, in request order.
#[derive(Debug, Clone)]
pub struct BatchEstimate<'a> {
    pub estimates: Vec<(&'a WardRecord, StressEstimate)>,
    /// At least one estimate came from the fallback.
    pub fallback_in_use: bool,
}

#[derive(Debug, Clone)]
pub struct StressEstimator {
    gateway: Arc<ModelGateway>,
    clamp_probability: bool,
}

impl StressEstimator {
    #[must_use]
    pub const fn new(gateway: Arc<ModelGateway>, clamp_probability: bool) -> Self {
        Self { gateway, clamp_probability }
    }

    #[must_use]
    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    /// Base probability from the model (or fallback), times the ward multiplier, then tiered.
    /// Never fails: gateway errors select the fallback.
    #[must_use]
    pub fn estimate(&self, ward: &WardRecord, observation: &ObservationInput) -> StressEstimate {
        let (base, source) = match self.gateway.infer(observation) {
            Ok(probability) => (probability, EstimateSource::Model),
            Err(err) => {
                match &err {
                    GatewayError::ModelUnavailable { .. } => {
                        debug!(ward = ward.name, error = %err, "Using fallback stress heuristic");
                    },
                    GatewayError::Inference { .. } => {
                        warn!(ward = ward.name, error = %err, "Model inference failed, using fallback");
                    },
                }
                let reason = err.fallback_reason();
                (fallback_probability(observation), EstimateSource::Fallback { reason })
            },
        };

        let estimate = StressEstimate::new(base, ward.stress_multiplier(), source);
        if self.clamp_probability { estimate.capped() } else { estimate }
    }

    /// Evaluates every `(ward, observation)` pair in order.
    pub fn estimate_all<'a, I>(&self, requests: I) -> BatchEstimate<'a>
    where
        I: IntoIterator<Item = (&'a WardRecord, ObservationInput)>,
    {
        let estimates: Vec<_> = requests
            .into_iter()
            .map(|(ward, observation)| (ward, self.estimate(ward, &observation)))
            .collect();
        let fallback_in_use = estimates.iter().any(|(_, estimate)| estimate.source.is_fallback());

        BatchEstimate { estimates, fallback_in_use }
    }
}
