use ndarray::Array1;

use crate::datatypes::Panel;
use crate::error::RegressorError;
use crate::models::knn::KnnPanelRegressor;
use crate::regressor::{
    check_fit_inputs, guard_multivariate, FitReport, PanelRegressor, RegressorTags,
};

/// Composite regressor averaging the predictions of its members.
///
/// The multivariate capability is the AND over all members. When the
/// ensemble lacks the capability and receives multivariate input, it
/// downgrades to a warning and fits on the first feature only: raising
/// from inside a wrapper would abort workflows (e.g. cross-validation)
/// where the inner capability check happens too late.
pub struct EnsemblePanelRegressor {
    members: Vec<Box<dyn PanelRegressor>>,
    coerced: bool,
    is_fitted: bool,
}

impl EnsemblePanelRegressor {
    /// Build an ensemble from inner regressors. At least one member is
    /// required; an empty list is a configuration error.
    pub fn new(members: Vec<Box<dyn PanelRegressor>>) -> Result<Self, RegressorError> {
        if members.is_empty() {
            return Err(RegressorError::EmptyEnsemble);
        }
        Ok(EnsemblePanelRegressor {
            members,
            coerced: false,
            is_fitted: false,
        })
    }

    /// Minimal instance used by the conformance registry: wraps a single
    /// univariate-only k-NN, so the downgrade path is reachable.
    pub fn create_test_instance() -> Self {
        EnsemblePanelRegressor::new(vec![Box::new(KnnPanelRegressor::create_test_instance())])
            .expect("single-member list is non-empty")
    }
}

impl PanelRegressor for EnsemblePanelRegressor {
    fn name(&self) -> &'static str {
        "EnsemblePanelRegressor"
    }

    fn tags(&self) -> RegressorTags {
        RegressorTags {
            handles_multivariate: self
                .members
                .iter()
                .all(|m| m.tags().handles_multivariate),
            composite: true,
        }
    }

    fn fit(&mut self, x: &Panel, y: &Array1<f64>) -> Result<FitReport, RegressorError> {
        let mut report = FitReport::default();
        check_fit_inputs(x, y)?;
        let coerced = guard_multivariate(self.name(), self.tags(), x, &mut report)?;

        let coerced_panel;
        let x_fit: &Panel = if coerced {
            coerced_panel = x.to_univariate();
            &coerced_panel
        } else {
            x
        };

        for member in self.members.iter_mut() {
            let inner = member.fit(x_fit, y)?;
            report.merge(inner);
        }

        log::debug!(
            "{}: fitted {} members on {} instances",
            self.name(),
            self.members.len(),
            x_fit.n_instances()
        );
        self.coerced = coerced;
        self.is_fitted = true;
        Ok(report)
    }

    fn predict(&self, x: &Panel) -> Result<Array1<f64>, RegressorError> {
        if !self.is_fitted {
            return Err(RegressorError::NotFitted { name: self.name() });
        }

        let coerced_panel;
        let x_pred: &Panel = if self.coerced {
            coerced_panel = x.to_univariate();
            &coerced_panel
        } else {
            x
        };

        let mut sum = Array1::<f64>::zeros(x_pred.n_instances());
        for member in &self.members {
            sum = sum + member.predict(x_pred)?;
        }
        Ok(sum / self.members.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::PanelInstance;
    use ndarray::arr2;

    fn multivariate_panel() -> Panel {
        Panel::new(
            vec![
                PanelInstance::from_values(arr2(&[[1.0, 9.0], [1.1, 9.1], [1.2, 9.2]])),
                PanelInstance::from_values(arr2(&[[4.0, 7.0], [4.1, 7.1], [4.2, 7.2]])),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn downgrades_multivariate_input_to_warning() {
        let x = multivariate_panel();
        let y = Array1::from_vec(vec![1.0, 2.0]);

        let mut ensemble = EnsemblePanelRegressor::create_test_instance();
        let report = ensemble.fit(&x, &y).unwrap();
        assert!(report.has_warning_containing("multivariate series"));

        let pred = ensemble.predict(&x).unwrap();
        assert_eq!(pred.len(), 2);
    }

    #[test]
    fn averages_member_predictions() {
        let x = Panel::new(
            vec![
                PanelInstance::from_values(arr2(&[[0.0], [0.1]])),
                PanelInstance::from_values(arr2(&[[5.0], [5.1]])),
            ],
            None,
        )
        .unwrap();
        let y = Array1::from_vec(vec![1.0, 3.0]);

        let mut single = KnnPanelRegressor::new(1);
        single.fit(&x, &y).unwrap();
        let expected = single.predict(&x).unwrap();

        let mut ensemble = EnsemblePanelRegressor::new(vec![
            Box::new(KnnPanelRegressor::new(1)),
            Box::new(KnnPanelRegressor::new(1)),
        ])
        .unwrap();
        ensemble.fit(&x, &y).unwrap();
        let pred = ensemble.predict(&x).unwrap();

        for (p, e) in pred.iter().zip(expected.iter()) {
            assert!((p - e).abs() < 1e-12);
        }
    }

    #[test]
    fn capability_is_and_over_members() {
        use crate::models::summary::SummaryPanelRegressor;

        let capable = EnsemblePanelRegressor::new(vec![Box::new(
            SummaryPanelRegressor::create_test_instance(),
        )])
        .unwrap();
        assert!(capable.tags().handles_multivariate);
        assert!(capable.tags().composite);

        let incapable = EnsemblePanelRegressor::create_test_instance();
        assert!(!incapable.tags().handles_multivariate);
    }

    #[test]
    fn empty_member_list_is_an_error() {
        let result = EnsemblePanelRegressor::new(Vec::new());
        assert!(matches!(result, Err(RegressorError::EmptyEnsemble)));
    }
}
