use crate::synth::{BASELINE_YEAR, DROUGHT_YEAR, HistoricalRecord};

/// Yield loss of one ward between the baseline and the drought year.
#[derive(Debug, Clone, PartialEq)]
pub struct DroughtImpact {
    pub ward: &'static str,
    pub normal_yield: f64,
    pub drought_yield: f64,
    pub reduction_pct: f64,
}

fn yield_in(records: &[HistoricalRecord], ward: &str, year: u16) -> Option<f64> {
    records.iter().find(|r| r.ward == ward && r.year == year).map(|r| r.yield_t_ha)
}

/// `(normal - drought) / normal * 100` per selected ward. Wards missing either year, or
/// with no baseline yield, are skipped.
#[must_use]
pub fn drought_impact(records: &[HistoricalRecord], wards: &[&'static str]) -> Vec<DroughtImpact> {
    wards
        .iter()
        .filter_map(|&ward| {
            let normal_yield = yield_in(records, ward, BASELINE_YEAR)?;
            let drought_yield = yield_in(records, ward, DROUGHT_YEAR)?;
            (normal_yield != 0.0).then(|| DroughtImpact {
                ward,
                normal_yield,
                drought_yield,
                reduction_pct: (normal_yield - drought_yield) / normal_yield * 100.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ward: &'static str, year: u16, yield_t_ha: f64) -> HistoricalRecord {
        HistoricalRecord {
            year,
            ward,
            yield_t_ha,
            stress_level: 0.5,
            rainfall_mm: 1000.0,
            temperature_c: 25.0,
        }
    }

    #[test]
    fn reduction_is_relative_to_baseline() {
        let records = vec![record("Chania Ward", 2020, 8.0), record("Chania Ward", 2021, 6.0)];
        let impact = drought_impact(&records, &["Chania Ward"]);
        assert_eq!(impact.len(), 1);
        assert!((impact[0].reduction_pct - 25.0).abs() < 1e-12);
    }

    #[test]
    fn wards_missing_a_year_are_skipped() {
        let records = vec![record("Chania Ward", 2021, 6.0), record("Mang'u Ward", 2020, 5.0)];
        assert!(drought_impact(&records, &["Chania Ward", "Mang'u Ward"]).is_empty());
    }
}
