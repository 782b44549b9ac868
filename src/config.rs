use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for regressors in the crate.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegressorConfig {
    #[serde(flatten)]
    pub model_type: RegressorType,
}

/// Supported regressor types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum RegressorType {
    Knn {
        n_neighbors: usize,
    },
    Summary {
        /// Number of trailing timepoints to summarize; 0 uses the full series.
        window: usize,
        with_slope: bool,
    },
    Ensemble {
        members: Vec<RegressorType>,
    },
}

impl Default for RegressorType {
    fn default() -> Self {
        RegressorType::Knn { n_neighbors: 1 }
    }
}

impl FromStr for RegressorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knn" => Ok(RegressorType::Knn { n_neighbors: 1 }),
            "summary" => Ok(RegressorType::Summary {
                window: 0,
                with_slope: true,
            }),
            "ensemble" => Ok(RegressorType::Ensemble {
                members: vec![
                    RegressorType::Knn { n_neighbors: 1 },
                    RegressorType::Summary {
                        window: 0,
                        with_slope: true,
                    },
                ],
            }),
            _ => Err(format!(
                "Unknown regressor type: {}. Expected one of: knn, summary, ensemble",
                s
            )),
        }
    }
}

impl RegressorConfig {
    pub fn new(model_type: RegressorType) -> Self {
        Self { model_type }
    }
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            model_type: RegressorType::default(),
        }
    }
}
