use ndarray::Array1;

use crate::datatypes::Panel;
use crate::error::RegressorError;
use crate::regressor::{
    check_fit_inputs, guard_multivariate, FitReport, PanelRegressor, RegressorTags,
};

/// k-nearest-neighbour regressor over univariate series.
///
/// Distance is Euclidean over the overlapping prefix of two series; the
/// prediction is the mean target of the k nearest training instances.
/// Atomic and univariate-only, so multivariate input fails fast.
pub struct KnnPanelRegressor {
    n_neighbors: usize,
    fitted: Option<KnnFit>,
}

struct KnnFit {
    x: Panel,
    y: Array1<f64>,
}

impl KnnPanelRegressor {
    pub fn new(n_neighbors: usize) -> Self {
        KnnPanelRegressor {
            n_neighbors: n_neighbors.max(1),
            fitted: None,
        }
    }

    /// Minimal instance used by the conformance registry.
    pub fn create_test_instance() -> Self {
        KnnPanelRegressor::new(1)
    }

    fn distance(a: &Panel, i: usize, b: &Panel, j: usize) -> f64 {
        let left = a.instance(i).values();
        let right = b.instance(j).values();
        let overlap = left.nrows().min(right.nrows());
        let mut sum = 0.0;
        for t in 0..overlap {
            let d = left[(t, 0)] - right[(t, 0)];
            sum += d * d;
        }
        sum.sqrt()
    }
}

impl PanelRegressor for KnnPanelRegressor {
    fn name(&self) -> &'static str {
        "KnnPanelRegressor"
    }

    fn tags(&self) -> RegressorTags {
        RegressorTags {
            handles_multivariate: false,
            composite: false,
        }
    }

    fn fit(&mut self, x: &Panel, y: &Array1<f64>) -> Result<FitReport, RegressorError> {
        let mut report = FitReport::default();
        check_fit_inputs(x, y)?;
        guard_multivariate(self.name(), self.tags(), x, &mut report)?;

        log::debug!(
            "{}: storing {} training instances",
            self.name(),
            x.n_instances()
        );
        self.fitted = Some(KnnFit {
            x: x.clone(),
            y: y.clone(),
        });
        Ok(report)
    }

    fn predict(&self, x: &Panel) -> Result<Array1<f64>, RegressorError> {
        let fit = self
            .fitted
            .as_ref()
            .ok_or(RegressorError::NotFitted { name: self.name() })?;
        if x.n_features() != fit.x.n_features() {
            return Err(RegressorError::DimensionMismatch {
                expected: fit.x.n_features(),
                got: x.n_features(),
            });
        }

        let n_train = fit.x.n_instances();
        let k = self.n_neighbors.min(n_train);

        let predictions = (0..x.n_instances())
            .map(|i| {
                let mut order: Vec<usize> = (0..n_train).collect();
                order.sort_by(|&a, &b| {
                    let da = Self::distance(x, i, &fit.x, a);
                    let db = Self::distance(x, i, &fit.x, b);
                    da.partial_cmp(&db)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.cmp(&b))
                });
                order.iter().take(k).map(|&j| fit.y[j]).sum::<f64>() / k as f64
            })
            .collect::<Array1<f64>>();

        Ok(predictions)
    }
}
