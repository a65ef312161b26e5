//! Ward catalogue: the administrative sub-regions compared by the dashboard.

use crate::observation::ObservationInput;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Market access tier, ordered from worst to best.
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
    EnumIter,
    AsRefStr,
)]
pub enum MarketAccess {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl MarketAccess {
    /// Highest index (`Excellent`).
    pub const MAX_INDEX: u8 = 3;

    /// Position in the ordered enumeration (`Poor` = 0 ... `Excellent` = 3).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Climate exposure of a ward; drives the stress multiplier and default inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Exposure {
    Standard,
    /// Drier area: higher stress, lower yields.
    DroughtProne,
    /// Better growing conditions than average.
    Favourable,
}

impl Exposure {
    /// Multiplier applied to the base stress probability.
    #[must_use]
    pub const fn stress_multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::DroughtProne => 1.2,
            Self::Favourable => 0.9,
        }
    }

    /// Starting point for the per-ward observation inputs.
    #[must_use]
    pub const fn default_observation(self) -> ObservationInput {
        match self {
            Self::DroughtProne => ObservationInput::new(32.0, 45.0, 0.65),
            Self::Standard | Self::Favourable => ObservationInput::new(28.0, 60.0, 0.65),
        }
    }

    /// Factor applied to synthesized historical yields.
    #[must_use]
    pub const fn historical_yield_factor(self) -> f64 {
        match self {
            Self::DroughtProne => 0.9,
            Self::Standard | Self::Favourable => 1.0,
        }
    }

    /// Factor applied to synthesized historical stress levels.
    #[must_use]
    pub const fn historical_stress_factor(self) -> f64 {
        match self {
            Self::DroughtProne => 1.1,
            Self::Standard | Self::Favourable => 1.0,
        }
    }
}

/// Descriptive record of one ward. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardRecord {
    pub name: &'static str,
    pub population: u32,
    pub area_km2: f64,
    pub altitude: &'static str,
    pub soil: &'static str,
    pub cultivated_area_ha: f64,
    pub avg_yield_t_ha: f64,
    pub varieties: &'static [&'static str],
    pub risk_factors: &'static [&'static str],
    pub market_access: MarketAccess,
    pub market_details: Option<&'static str>,
    pub irrigation_pct: f64,
    /// Display color, presentation only.
    pub color: &'static str,
    pub exposure: Exposure,
}

impl WardRecord {
    #[must_use]
    pub const fn stress_multiplier(&self) -> f64 {
        self.exposure.stress_multiplier()
    }

    #[must_use]
    pub const fn default_observation(&self) -> ObservationInput {
        self.exposure.default_observation()
    }

    /// Market access tier followed by the details, e.g. `"Good (near Gatundu town)"`.
    #[must_use]
    pub fn market_text(&self) -> String {
        match self.market_details {
            Some(details) if !details.is_empty() => format!("{} ({details})", self.market_access),
            _ => self.market_access.to_string(),
        }
    }
}

/// Immutable, ordered collection of wards keyed by name.
#[derive(Debug, Clone)]
pub struct WardRegistry {
    wards: Vec<WardRecord>,
}

impl WardRegistry {
    /// The four wards of Gatundu North sub-county.
    #[must_use]
    pub fn gatundu_north() -> Self {
        Self { wards: GATUNDU_NORTH_WARDS.to_vec() }
    }

    /// Exact lookup by ward name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WardRecord> {
        self.wards.iter().find(|ward| ward.name == name)
    }

    /// Lenient lookup: exact name, then case-insensitive name, then the name
    /// with the `" Ward"` suffix omitted (`"gituamba"` finds `"Gituamba Ward"`).
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&WardRecord> {
        let query = query.trim();
        self.get(query).or_else(|| {
            self.wards.iter().find(|ward| {
                ward.name.eq_ignore_ascii_case(query)
                    || ward
                        .name
                        .strip_suffix(" Ward")
                        .is_some_and(|short| short.eq_ignore_ascii_case(query))
            })
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WardRecord> {
        self.wards.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.wards.iter().map(|ward| ward.name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.wards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wards.is_empty()
    }
}

impl Default for WardRegistry {
    fn default() -> Self {
        Self::gatundu_north()
    }
}

const GATUNDU_NORTH_WARDS: [WardRecord; 4] = [
    WardRecord {
        name: "Chania Ward",
        population: 45_200,
        area_km2: 45.2,
        altitude: "1750-1850m",
        soil: "Red volcanic, well-drained",
        cultivated_area_ha: 320.0,
        avg_yield_t_ha: 8.5,
        varieties: &["Orange Fleshed", "Purple", "White"],
        risk_factors: &["Soil erosion", "Limited irrigation", "Pest pressure"],
        market_access: MarketAccess::Good,
        market_details: Some("near Gatundu town"),
        irrigation_pct: 25.0,
        color: "#FF9800",
        exposure: Exposure::Standard,
    },
    WardRecord {
        name: "Githobokoni Ward",
        population: 38_500,
        area_km2: 38.7,
        altitude: "1700-1800m",
        soil: "Clay loam, volcanic",
        cultivated_area_ha: 280.0,
        avg_yield_t_ha: 7.8,
        varieties: &["Orange Fleshed", "Local white"],
        risk_factors: &["Waterlogging in valleys", "Frost risk", "Rodents"],
        market_access: MarketAccess::Moderate,
        market_details: None,
        irrigation_pct: 18.0,
        color: "#4CAF50",
        exposure: Exposure::Standard,
    },
    WardRecord {
        name: "Gituamba Ward",
        population: 52_800,
        area_km2: 52.1,
        altitude: "1800-1900m",
        soil: "Mixed volcanic soils",
        cultivated_area_ha: 420.0,
        avg_yield_t_ha: 9.2,
        varieties: &["Commercial varieties", "Orange Fleshed", "Purple"],
        risk_factors: &["Land pressure", "Pollution risk", "High input costs"],
        market_access: MarketAccess::Excellent,
        market_details: Some("urban market"),
        irrigation_pct: 40.0,
        color: "#2196F3",
        exposure: Exposure::DroughtProne,
    },
    WardRecord {
        name: "Mang'u Ward",
        population: 42_300,
        area_km2: 42.5,
        altitude: "1650-1750m",
        soil: "Sandy loam, less fertile",
        cultivated_area_ha: 380.0,
        avg_yield_t_ha: 6.5,
        varieties: &["Traditional varieties", "Drought tolerant"],
        risk_factors: &["Drought prone", "Poor soils", "Limited extension services"],
        market_access: MarketAccess::Poor,
        market_details: Some("remote areas"),
        irrigation_pct: 12.0,
        color: "#9C27B0",
        exposure: Exposure::Standard,
    },
];
