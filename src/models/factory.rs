use crate::config::{RegressorConfig, RegressorType};
use crate::error::RegressorError;
use crate::models::ensemble::EnsemblePanelRegressor;
use crate::models::knn::KnnPanelRegressor;
use crate::models::summary::SummaryPanelRegressor;
use crate::regressor::PanelRegressor;

/// Build a boxed regressor from a `RegressorConfig`.
/// Currently this is a thin factory implemented as a single function.
///
/// Fails on configurations that deserialize but are not buildable, such as
/// an ensemble with no members.
pub fn build_regressor(
    config: RegressorConfig,
) -> Result<Box<dyn PanelRegressor>, RegressorError> {
    build_from_type(config.model_type)
}

fn build_from_type(model_type: RegressorType) -> Result<Box<dyn PanelRegressor>, RegressorError> {
    match model_type {
        RegressorType::Knn { n_neighbors } => Ok(Box::new(KnnPanelRegressor::new(n_neighbors))),
        RegressorType::Summary { window, with_slope } => {
            Ok(Box::new(SummaryPanelRegressor::new(window, with_slope)))
        }
        RegressorType::Ensemble { members } => {
            let members = members
                .into_iter()
                .map(build_from_type)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Box::new(EnsemblePanelRegressor::new(members)?))
        }
    }
}
