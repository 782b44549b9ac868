//! Startup-time registry of regressor implementations.
//!
//! Registration is an explicit list of named factory functions rather than
//! any runtime discovery mechanism; the conformance suite enumerates it.
use crate::models::{EnsemblePanelRegressor, KnnPanelRegressor, SummaryPanelRegressor};
use crate::regressor::PanelRegressor;

/// One registered regressor: its stable name and a factory producing a
/// minimal test instance.
pub struct RegistryEntry {
    pub name: &'static str,
    pub build: fn() -> Box<dyn PanelRegressor>,
}

/// Regressors excluded from the conformance suite, by registry name.
pub const EXCLUDED_REGRESSORS: &[&str] = &[];

/// All registered regressors.
pub fn all_regressors() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry {
            name: "KnnPanelRegressor",
            build: || Box::new(KnnPanelRegressor::create_test_instance()),
        },
        RegistryEntry {
            name: "SummaryPanelRegressor",
            build: || Box::new(SummaryPanelRegressor::create_test_instance()),
        },
        RegistryEntry {
            name: "EnsemblePanelRegressor",
            build: || Box::new(EnsemblePanelRegressor::create_test_instance()),
        },
    ]
}

/// Registered regressors minus the exclusion list.
pub fn conformance_regressors() -> Vec<RegistryEntry> {
    all_regressors()
        .into_iter()
        .filter(|entry| !EXCLUDED_REGRESSORS.contains(&entry.name))
        .collect()
}
