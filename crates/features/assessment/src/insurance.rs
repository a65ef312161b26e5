use agrisk_kernel::domain::observation::{RiskTier, StressEstimate};
use serde::Serialize;

/// Premium guidance for one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumRecommendation {
    pub tier: RiskTier,
    pub premium: &'static str,
    pub advice: &'static str,
}

/// Maps the (multiplied) probability to a premium band using the tier thresholds.
#[must_use]
pub fn recommend(estimate: &StressEstimate) -> PremiumRecommendation {
    let tier = RiskTier::from_probability(estimate.probability);
    let (premium, advice) = match tier {
        RiskTier::High => ("High Premium (25-40% increase)", "Consider yield protection insurance"),
        RiskTier::Moderate => {
            ("Moderate Premium (10-20% increase)", "Standard coverage with monitoring")
        },
        RiskTier::Low => ("Low Premium (0-10% increase)", "Basic coverage sufficient"),
    };

    PremiumRecommendation { tier, premium, advice }
}
