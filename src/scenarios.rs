//! Fit/predict data fixtures driving the conformance suite.
//!
//! Scenarios are deterministic: random-walk series come from a fixed-seed
//! `StdRng`, so repeated runs see identical data.
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::datatypes::{Panel, PanelInstance};
use crate::error::RegressorError;
use crate::regressor::{FitReport, PanelRegressor};

/// A predefined fit/predict data configuration.
pub struct FitPredictScenario {
    pub name: &'static str,
    pub fit_x: Panel,
    pub fit_y: Array1<f64>,
    pub predict_x: Panel,
}

impl FitPredictScenario {
    /// Run the fit step only.
    pub fn run_fit(
        &self,
        regressor: &mut dyn PanelRegressor,
    ) -> Result<FitReport, RegressorError> {
        regressor.fit(&self.fit_x, &self.fit_y)
    }

    /// Run fit then predict, returning the fit report and the predictions.
    pub fn run_fit_predict(
        &self,
        regressor: &mut dyn PanelRegressor,
    ) -> Result<(FitReport, Array1<f64>), RegressorError> {
        let report = regressor.fit(&self.fit_x, &self.fit_y)?;
        let predictions = regressor.predict(&self.predict_x)?;
        Ok((report, predictions))
    }
}

fn random_walk_instance(rng: &mut StdRng, len: usize, n_features: usize, level: f64) -> PanelInstance {
    let mut data = Vec::with_capacity(len * n_features);
    let mut state = vec![level; n_features];
    for _ in 0..len {
        for value in state.iter_mut() {
            *value += rng.gen_range(-0.5..0.5);
        }
        data.extend_from_slice(&state);
    }
    let values =
        Array2::from_shape_vec((len, n_features), data).expect("walk buffer matches shape");
    PanelInstance::from_values(values)
}

fn random_walk_panel(
    rng: &mut StdRng,
    lengths: &[usize],
    n_features: usize,
    base_level: f64,
) -> Panel {
    let instances = lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| random_walk_instance(rng, len, n_features, base_level + i as f64))
        .collect();
    Panel::new(instances, None).expect("scenario panel is well-formed")
}

/// The Check A fixture: a feature matrix with more than one variable and a
/// real-valued target. Two instances, two features.
pub fn multivariate_fit_scenario() -> FitPredictScenario {
    let mut rng = StdRng::seed_from_u64(11);
    FitPredictScenario {
        name: "multivariate_two_features",
        fit_x: random_walk_panel(&mut rng, &[6, 6], 2, 0.0),
        fit_y: Array1::from_vec(vec![1.5, -0.5]),
        predict_x: random_walk_panel(&mut rng, &[6, 6], 2, 0.0),
    }
}

/// Shared scenario registry for output-validation checks (Check B).
pub fn retrieve_scenarios() -> Vec<FitPredictScenario> {
    let mut rng = StdRng::seed_from_u64(7);

    let univariate_basic = FitPredictScenario {
        name: "univariate_basic",
        fit_x: random_walk_panel(&mut rng, &[8, 8, 8, 8], 1, 0.0),
        fit_y: Array1::from_vec(vec![0.2, 1.1, 2.3, 2.9]),
        // Three predict-time instances, matching none of the training data.
        predict_x: random_walk_panel(&mut rng, &[8, 8, 8], 1, 0.5),
    };

    let univariate_unequal_length = FitPredictScenario {
        name: "univariate_unequal_length",
        fit_x: random_walk_panel(&mut rng, &[5, 9, 7], 1, 1.0),
        fit_y: Array1::from_vec(vec![-1.0, 0.0, 1.0]),
        predict_x: random_walk_panel(&mut rng, &[6, 4], 1, 1.5),
    };

    vec![univariate_basic, univariate_unequal_length]
}
