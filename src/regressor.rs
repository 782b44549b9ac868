use ndarray::Array1;

use crate::datatypes::Panel;
use crate::error::RegressorError;

/// Per-type capability tags attached to each regressor at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressorTags {
    /// Whether the regressor accepts panels with more than one feature.
    pub handles_multivariate: bool,
    /// Whether the regressor wraps or delegates to inner regressors.
    pub composite: bool,
}

/// Warnings surfaced by a completed fit call.
///
/// Composite regressors record the multivariate downgrade here so callers
/// can observe it without a log-capture harness; the warning is also emitted
/// through `log::warn!`.
#[derive(Debug, Clone, Default)]
pub struct FitReport {
    pub warnings: Vec<String>,
}

impl FitReport {
    pub fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn has_warning_containing(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(needle))
    }

    /// Absorb the warnings of an inner fit into this report.
    pub fn merge(&mut self, other: FitReport) {
        self.warnings.extend(other.warnings);
    }
}

/// A regressor over panel data: fit on (X, y), predict real values per
/// instance. Implementations hold their own fitted state; each `fit`
/// replaces it.
pub trait PanelRegressor: Send {
    /// Stable regressor name, also used as the registry key.
    fn name(&self) -> &'static str;

    fn tags(&self) -> RegressorTags;

    /// Fit the regressor. `y` must have one value per panel instance.
    fn fit(&mut self, x: &Panel, y: &Array1<f64>) -> Result<FitReport, RegressorError>;

    /// Predict one real value per instance of `x`.
    fn predict(&self, x: &Panel) -> Result<Array1<f64>, RegressorError>;
}

/// Shared multivariate-input policy for fit implementations.
///
/// Returns `Ok(true)` when the caller must coerce `x` to univariate before
/// fitting: that is the composite downgrade path, which records a warning and
/// continues. Atomic regressors without the capability fail fast instead,
/// so that the error surfaces at the outermost fit call.
pub fn guard_multivariate(
    name: &'static str,
    tags: RegressorTags,
    x: &Panel,
    report: &mut FitReport,
) -> Result<bool, RegressorError> {
    if !x.is_multivariate() || tags.handles_multivariate {
        return Ok(false);
    }
    if tags.composite {
        report.warn(format!(
            "{} cannot handle multivariate series input; fitting on the first feature only",
            name
        ));
        Ok(true)
    } else {
        Err(RegressorError::MultivariateUnsupported { name })
    }
}

/// Validate the row-aligned fit inputs shared by all regressors.
pub fn check_fit_inputs(x: &Panel, y: &Array1<f64>) -> Result<(), RegressorError> {
    if x.n_instances() == 0 || x.n_features() == 0 {
        return Err(RegressorError::EmptyPanel);
    }
    if y.len() != x.n_instances() {
        return Err(RegressorError::DimensionMismatch {
            expected: x.n_instances(),
            got: y.len(),
        });
    }
    Ok(())
}
