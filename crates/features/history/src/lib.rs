//! Historical analysis slice: synthesized yearly yield and stress series per ward
//! and the drought impact table.

mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod impact;
pub mod synth;

pub use crate::error::{HistoryError, HistoryErrorExt};

use agrisk_kernel::domain::config::DashboardConfig;
use agrisk_kernel::domain::registry::InitializedSlice;
use agrisk_kernel::domain::ward::WardRegistry;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// History feature state
#[agrisk_derive::feature_slice]
pub struct History {
    pub registry: Arc<WardRegistry>,
    pub years: RangeInclusive<u16>,
    pub seed: Option<u64>,
}

impl HistoryInner {
    /// Resolves a comma-separated ward list; empty or absent selects every ward.
    ///
    /// # Errors
    /// Returns [`HistoryError::UnknownWard`] for the first name outside the catalogue.
    pub fn select_wards(&self, selection: Option<&str>) -> Result<Vec<&'static str>, HistoryError> {
        let names: Vec<&str> = selection
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            return Ok(self.registry.names().collect());
        }

        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let ward = self.registry.find(name).ok_or_else(|| HistoryError::UnknownWard {
                name: name.to_owned().into(),
                context: None,
            })?;
            if !selected.contains(&ward.name) {
                selected.push(ward.name);
            }
        }
        Ok(selected)
    }
}

/// Initialize the history feature.
///
/// # Errors
/// Returns an error when `history.first_year` is after `history.last_year`.
pub fn init(
    config: &DashboardConfig,
    registry: Arc<WardRegistry>,
) -> Result<InitializedSlice, HistoryError> {
    let (first, last) = (config.history.first_year, config.history.last_year);
    if first > last {
        return Err(HistoryError::Config {
            message: format!("first_year {first} is after last_year {last}").into(),
            context: None,
        });
    }

    tracing::info!(first, last, seeded = config.history.seed.is_some(), "History slice initialized");

    let slice = History::new(HistoryInner { registry, years: first..=last, seed: config.history.seed });
    Ok(InitializedSlice::new(slice))
}

#[cfg(feature = "server")]
pub use handlers::router;

#[cfg(test)]
mod tests {
    use super::*;

    fn inner() -> HistoryInner {
        HistoryInner {
            registry: Arc::new(WardRegistry::gatundu_north()),
            years: 2018..=2023,
            seed: None,
        }
    }

    #[test]
    fn selection_defaults_to_all_wards() {
        assert_eq!(inner().select_wards(None).unwrap().len(), 4);
        assert_eq!(inner().select_wards(Some(" , ")).unwrap().len(), 4);
    }

    #[test]
    fn selection_resolves_and_dedups() {
        let selected = inner().select_wards(Some("gituamba, Chania Ward,Gituamba Ward")).unwrap();
        assert_eq!(selected, ["Gituamba Ward", "Chania Ward"]);

        let err = inner().select_wards(Some("Chania,Kamwangi")).unwrap_err();
        assert!(matches!(err, HistoryError::UnknownWard { .. }));
    }

    #[test]
    fn inverted_year_range_is_rejected() {
        let mut config = DashboardConfig::default();
        config.history.first_year = 2024;
        let err = init(&config, Arc::new(WardRegistry::gatundu_north())).unwrap_err();
        assert!(matches!(err, HistoryError::Config { .. }));
    }
}
