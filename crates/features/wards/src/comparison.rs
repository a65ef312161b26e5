//! Side-by-side ward comparison with a simulated risk score.

use agrisk_kernel::domain::ward::{MarketAccess, WardRecord, WardRegistry};
use rand::Rng;
use std::ops::Range;

/// Radar chart axes, in the order of [`ComparisonRow::radar`].
pub const RADAR_AXES: [&str; 4] = ["Yield", "Irrigation", "Market", "Safety"];

/// Range of the simulated risk score.
pub const RISK_SCORE_RANGE: Range<f64> = 0.2..0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub ward: &'static str,
    pub population: u32,
    pub area_km2: f64,
    pub cultivated_area_ha: f64,
    pub avg_yield_t_ha: f64,
    pub irrigation_pct: f64,
    pub market_access: MarketAccess,
    pub market_index: u8,
    pub risk_score: f64,
    /// `[yield/10, irrigation/20, market index/3, 1 - risk]`
    pub radar: [f64; 4],
}

impl ComparisonRow {
    #[must_use]
    pub fn new(ward: &WardRecord, risk_score: f64) -> Self {
        let market_index = ward.market_access.index();
        Self {
            ward: ward.name,
            population: ward.population,
            area_km2: ward.area_km2,
            cultivated_area_ha: ward.cultivated_area_ha,
            avg_yield_t_ha: ward.avg_yield_t_ha,
            irrigation_pct: ward.irrigation_pct,
            market_access: ward.market_access,
            market_index,
            risk_score,
            radar: [
                ward.avg_yield_t_ha / 10.0,
                ward.irrigation_pct / 20.0,
                f64::from(market_index) / f64::from(MarketAccess::MAX_INDEX),
                1.0 - risk_score,
            ],
        }
    }
}

/// One row per ward in catalogue order; risk scores come from `rng`.
pub fn comparison_rows<R: Rng>(registry: &WardRegistry, rng: &mut R) -> Vec<ComparisonRow> {
    registry
        .iter()
        .map(|ward| ComparisonRow::new(ward, rng.random_range(RISK_SCORE_RANGE)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rows_follow_catalogue_and_radar_formula() {
        let registry = WardRegistry::gatundu_north();
        let rows = comparison_rows(&registry, &mut StdRng::seed_from_u64(1));

        let names: Vec<_> = rows.iter().map(|row| row.ward).collect();
        assert_eq!(names, registry.names().collect::<Vec<_>>());

        for row in &rows {
            assert!(RISK_SCORE_RANGE.contains(&row.risk_score));
            assert!((row.radar[3] - (1.0 - row.risk_score)).abs() < 1e-12);
        }

        let gituamba = rows.iter().find(|row| row.ward == "Gituamba Ward").unwrap();
        assert_eq!(gituamba.market_index, 3);
        assert!((gituamba.radar[0] - 0.92).abs() < 1e-12);
        assert!((gituamba.radar[1] - 2.0).abs() < 1e-12);
        assert!((gituamba.radar[2] - 1.0).abs() < 1e-12);

        let mangu = rows.iter().find(|row| row.ward == "Mang'u Ward").unwrap();
        assert_eq!(mangu.market_index, 0);
    }
}
