use ndarray::Array1;

use crate::datatypes::{Panel, PanelInstance};
use crate::error::RegressorError;
use crate::regressor::{check_fit_inputs, FitReport, PanelRegressor, RegressorTags};

/// Ridge term keeping the normal equations solvable.
const RIDGE: f64 = 1e-6;

/// Regressor on per-series summary features.
///
/// Each instance is reduced to per-feature summary statistics (mean, standard
/// deviation, and optionally the slope against the time index), then ordinary
/// least squares with a small ridge term maps the summary vector to the
/// target. Handles multivariate input natively.
pub struct SummaryPanelRegressor {
    window: usize,
    with_slope: bool,
    fitted: Option<SummaryFit>,
}

struct SummaryFit {
    coef: Vec<f64>,
    n_features_in: usize,
}

impl SummaryPanelRegressor {
    /// # Arguments
    ///
    /// * `window` - Trailing timepoints to summarize; 0 uses the full series.
    /// * `with_slope` - Include the per-feature trend slope as a feature.
    pub fn new(window: usize, with_slope: bool) -> Self {
        SummaryPanelRegressor {
            window,
            with_slope,
            fitted: None,
        }
    }

    /// Minimal instance used by the conformance registry.
    pub fn create_test_instance() -> Self {
        SummaryPanelRegressor::new(0, true)
    }

    /// Summary vector of one instance: intercept, then per feature column
    /// mean, std, and optionally slope over the trailing window.
    fn summarize(&self, inst: &PanelInstance) -> Vec<f64> {
        let n = inst.n_timepoints();
        let start = if self.window == 0 || self.window >= n {
            0
        } else {
            n - self.window
        };
        let len = n - start;

        let mut row = vec![1.0];
        for col in 0..inst.n_features() {
            let values: Vec<f64> = (start..n).map(|t| inst.values()[(t, col)]).collect();
            let times: Vec<f64> = match inst.time_index() {
                Some(index) => index[start..n].to_vec(),
                None => (start..n).map(|t| t as f64).collect(),
            };

            let mean = if len > 0 {
                values.iter().sum::<f64>() / len as f64
            } else {
                0.0
            };
            let var = if len > 1 {
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len as f64
            } else {
                0.0
            };
            row.push(mean);
            row.push(var.sqrt());

            if self.with_slope {
                row.push(slope(&times, &values, mean));
            }
        }
        row
    }
}

/// OLS slope of `values` against `times`; 0 for degenerate segments.
fn slope(times: &[f64], values: &[f64], value_mean: f64) -> f64 {
    let len = times.len();
    if len < 2 {
        return 0.0;
    }
    let t_mean = times.iter().sum::<f64>() / len as f64;
    let mut cov = 0.0;
    let mut var = 0.0;
    for (t, v) in times.iter().zip(values.iter()) {
        cov += (t - t_mean) * (v - value_mean);
        var += (t - t_mean).powi(2);
    }
    if var <= f64::EPSILON {
        0.0
    } else {
        cov / var
    }
}

/// Solve the symmetric system `a * beta = b` by Gaussian elimination with
/// partial pivoting. `a` is consumed.
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut beta = vec![0.0; n];
    for col in (0..n).rev() {
        let mut acc = b[col];
        for k in (col + 1)..n {
            acc -= a[col][k] * beta[k];
        }
        beta[col] = acc / a[col][col];
    }
    Some(beta)
}

impl PanelRegressor for SummaryPanelRegressor {
    fn name(&self) -> &'static str {
        "SummaryPanelRegressor"
    }

    fn tags(&self) -> RegressorTags {
        RegressorTags {
            handles_multivariate: true,
            composite: false,
        }
    }

    fn fit(&mut self, x: &Panel, y: &Array1<f64>) -> Result<FitReport, RegressorError> {
        let report = FitReport::default();
        check_fit_inputs(x, y)?;

        let design: Vec<Vec<f64>> = x.instances().iter().map(|i| self.summarize(i)).collect();
        let p = design[0].len();

        // Normal equations with a ridge term on the diagonal.
        let mut gram = vec![vec![0.0; p]; p];
        let mut rhs = vec![0.0; p];
        for (row, &target) in design.iter().zip(y.iter()) {
            for i in 0..p {
                for j in 0..p {
                    gram[i][j] += row[i] * row[j];
                }
                rhs[i] += row[i] * target;
            }
        }
        for (i, row) in gram.iter_mut().enumerate() {
            row[i] += RIDGE;
        }

        let coef =
            solve_linear(gram, rhs).ok_or(RegressorError::IllConditioned { name: self.name() })?;

        log::debug!(
            "{}: fitted {} coefficients on {} instances",
            self.name(),
            coef.len(),
            x.n_instances()
        );
        self.fitted = Some(SummaryFit {
            coef,
            n_features_in: x.n_features(),
        });
        Ok(report)
    }

    fn predict(&self, x: &Panel) -> Result<Array1<f64>, RegressorError> {
        let fit = self
            .fitted
            .as_ref()
            .ok_or(RegressorError::NotFitted { name: self.name() })?;
        if x.n_features() != fit.n_features_in {
            return Err(RegressorError::DimensionMismatch {
                expected: fit.n_features_in,
                got: x.n_features(),
            });
        }

        let predictions = x
            .instances()
            .iter()
            .map(|inst| {
                self.summarize(inst)
                    .iter()
                    .zip(fit.coef.iter())
                    .map(|(f, c)| f * c)
                    .sum::<f64>()
            })
            .collect::<Array1<f64>>();
        Ok(predictions)
    }
}
