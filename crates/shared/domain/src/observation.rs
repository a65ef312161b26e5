//! Observation inputs and the stress estimate derived from them.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use strum::{AsRefStr, Display, EnumString};

/// Accepted temperature range, °C.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 20.0..=40.0;
/// Accepted soil moisture range, percent.
pub const SOIL_MOISTURE_RANGE: RangeInclusive<f64> = 20.0..=100.0;
/// Accepted vegetation index (NDVI) range.
pub const VEGETATION_INDEX_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Probability strictly above which a ward is rated `HIGH`.
pub const HIGH_THRESHOLD: f64 = 0.6;
/// Probability strictly above which a ward is rated `MODERATE`.
pub const MODERATE_THRESHOLD: f64 = 0.3;

/// Environmental readings for one ward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationInput {
    pub temperature: f64,
    pub soil_moisture: f64,
    pub vegetation_index: f64,
}

impl ObservationInput {
    #[must_use]
    pub const fn new(temperature: f64, soil_moisture: f64, vegetation_index: f64) -> Self {
        Self { temperature, soil_moisture, vegetation_index }
    }

    /// Every reading is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite()
            && self.soil_moisture.is_finite()
            && self.vegetation_index.is_finite()
    }

    /// Copy with each reading pulled into its accepted range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            temperature: clamp_to(self.temperature, &TEMPERATURE_RANGE),
            soil_moisture: clamp_to(self.soil_moisture, &SOIL_MOISTURE_RANGE),
            vegetation_index: clamp_to(self.vegetation_index, &VEGETATION_INDEX_RANGE),
        }
    }

    /// Feature vector in model order: temperature, soil moisture, vegetation index.
    #[must_use]
    pub const fn features(&self) -> [f64; 3] {
        [self.temperature, self.soil_moisture, self.vegetation_index]
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}

/// Categorical risk derived from a stress probability.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// `HIGH` above 0.6, `MODERATE` above 0.3, `LOW` otherwise. Boundaries are exclusive.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_THRESHOLD {
            Self::High
        } else if probability > MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Why the rule-based fallback produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FallbackReason {
    ModelUnavailable,
    InferenceError,
}

/// Where an estimate's base probability came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EstimateSource {
    Model,
    Fallback { reason: FallbackReason },
}

impl EstimateSource {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Stress estimate for one ward.
///
/// `probability` is the base probability times the ward multiplier and may exceed 1.0
/// unless capping is enabled; `tier` is always derived from `probability`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressEstimate {
    pub probability: f64,
    pub base_probability: f64,
    pub multiplier: f64,
    pub tier: RiskTier,
    pub source: EstimateSource,
}

impl StressEstimate {
    #[must_use]
    pub fn new(base_probability: f64, multiplier: f64, source: EstimateSource) -> Self {
        let probability = base_probability * multiplier;
        Self {
            probability,
            base_probability,
            multiplier,
            tier: RiskTier::from_probability(probability),
            source,
        }
    }

    /// Caps `probability` at 1.0 and re-derives the tier.
    #[must_use]
    pub fn capped(self) -> Self {
        let probability = self.probability.min(1.0);
        Self { probability, tier: RiskTier::from_probability(probability), ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_exclusive() {
        assert_eq!(RiskTier::from_probability(0.6), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.600_001), RiskTier::High);
        assert_eq!(RiskTier::from_probability(0.3), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(0.31), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.0), RiskTier::Low);
        assert_eq!(RiskTier::High.to_string(), "HIGH");
    }

    #[test]
    fn clamped_pulls_readings_into_range() {
        let raw = ObservationInput::new(45.0, 5.0, 1.4);
        assert_eq!(raw.clamped(), ObservationInput::new(40.0, 20.0, 1.0));
        let inside = ObservationInput::new(28.0, 60.0, 0.65);
        assert_eq!(inside.clamped(), inside);
    }

    #[test]
    fn non_finite_readings_are_detected() {
        assert!(ObservationInput::new(28.0, 60.0, 0.65).is_finite());
        assert!(!ObservationInput::new(f64::NAN, 60.0, 0.65).is_finite());
        assert!(!ObservationInput::new(28.0, f64::INFINITY, 0.65).is_finite());
    }

    #[test]
    fn estimate_applies_multiplier_and_caps_on_request() {
        let estimate = StressEstimate::new(0.9, 1.2, EstimateSource::Model);
        assert!((estimate.probability - 1.08).abs() < 1e-12);
        assert_eq!(estimate.tier, RiskTier::High);

        let capped = estimate.capped();
        assert!((capped.probability - 1.0).abs() < f64::EPSILON);
        assert!((capped.base_probability - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn source_serializes_with_reason() {
        let source = EstimateSource::Fallback { reason: FallbackReason::InferenceError };
        let json = serde_json::to_value(source).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "fallback", "reason": "inferenceError" }));
        assert!(source.is_fallback());
        assert!(!EstimateSource::Model.is_fallback());
    }
}
