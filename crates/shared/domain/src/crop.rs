//! Static sweet potato agronomy shown alongside the ward data.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropProfile {
    pub crop: &'static str,
    pub optimal_temperature: &'static str,
    pub optimal_soil_temperature: &'static str,
    pub rainfall_need: &'static str,
    pub growing_period: &'static str,
    pub drought_tolerance: &'static str,
    pub waterlogging_sensitivity: &'static str,
    pub critical_stages: &'static [&'static str],
    pub major_pests: &'static [&'static str],
    pub major_diseases: &'static [&'static str],
}

pub const SWEET_POTATO: CropProfile = CropProfile {
    crop: crate::constants::CROP,
    optimal_temperature: "20-30°C",
    optimal_soil_temperature: "18-25°C",
    rainfall_need: "750-1000mm",
    growing_period: "3-6 months",
    drought_tolerance: "Medium-High",
    waterlogging_sensitivity: "High",
    critical_stages: &["Vine establishment", "Tuber initiation", "Tuber bulking"],
    major_pests: &["Sweet potato weevil", "Virus complexes", "Rodents"],
    major_diseases: &["Alternaria leaf spot", "Fusarium wilt", "Root rot"],
};

/// Growing considerations for the sub-county.
pub const FIELD_NOTES: &[&str] = &[
    "Sweet potatoes prefer well-drained soils",
    "Sensitive to waterlogging",
    "Major pest: Sweet potato weevil",
    "Critical period: Tuber bulking (needs consistent moisture)",
    "Harvest before heavy rains to avoid rotting",
];

/// One-line characterisation per ward, in display order.
pub const WARD_CHARACTERISTICS: &[(&str, &str)] = &[
    ("Mang'u Ward", "Highest risk, driest area"),
    ("Chania Ward", "Best market access"),
    ("Githobokoni Ward", "Good soils, frost risk"),
    ("Gituamba Ward", "Highest yields, urban pressure"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ward::WardRegistry;

    #[test]
    fn characteristics_cover_the_catalogue() {
        let registry = WardRegistry::gatundu_north();
        assert_eq!(WARD_CHARACTERISTICS.len(), registry.len());
        for (ward, _) in WARD_CHARACTERISTICS {
            assert!(registry.get(ward).is_some(), "{ward} missing from the catalogue");
        }
    }
}
