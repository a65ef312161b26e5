use crate::error::WardsError;
use agrisk_kernel::domain::ward::{Exposure, WardRecord, WardRegistry};

/// Detail view of one ward.
#[derive(Debug, Clone, PartialEq)]
pub struct WardProfile {
    pub name: &'static str,
    /// Thousands-separated, e.g. `"45,200"`.
    pub population: String,
    pub area_km2: f64,
    pub altitude: &'static str,
    pub soil: &'static str,
    pub cultivated_area_ha: f64,
    pub avg_yield_t_ha: f64,
    pub irrigation_pct: f64,
    pub varieties: &'static [&'static str],
    pub market: String,
    pub risk_factors: &'static [&'static str],
    pub exposure: Exposure,
    pub color: &'static str,
}

impl From<&WardRecord> for WardProfile {
    fn from(ward: &WardRecord) -> Self {
        Self {
            name: ward.name,
            population: format_thousands(u64::from(ward.population)),
            area_km2: ward.area_km2,
            altitude: ward.altitude,
            soil: ward.soil,
            cultivated_area_ha: ward.cultivated_area_ha,
            avg_yield_t_ha: ward.avg_yield_t_ha,
            irrigation_pct: ward.irrigation_pct,
            varieties: ward.varieties,
            market: ward.market_text(),
            risk_factors: ward.risk_factors,
            exposure: ward.exposure,
            color: ward.color,
        }
    }
}

/// Profile of the ward matching `name` (lenient lookup).
///
/// # Errors
/// Returns [`WardsError::NotFound`] for names outside the catalogue.
pub fn ward_profile(registry: &WardRegistry, name: &str) -> Result<WardProfile, WardsError> {
    registry
        .find(name)
        .map(WardProfile::from)
        .ok_or_else(|| WardsError::NotFound { name: name.to_owned().into(), context: None })
}

/// `45200` -> `"45,200"`.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
