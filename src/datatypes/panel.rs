//! Panel container and its metadata descriptor.
//!
//! A `Panel` is a flat collection of time series instances. Each instance is
//! a (n_timepoints, n_features) value matrix with an optional explicit time
//! index; an absent index means the implicit index 0..n with unit step.
//!
//! `PanelDescriptor` is the value object describing a panel: every field is
//! optional so a descriptor can represent partially-known metadata. The
//! descriptor performs no cross-field validation at construction; consistency
//! is the job of the extraction routine `PanelDescriptor::from_panel`.
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::Scitype;

/// Relative tolerance for comparing time-index step sizes.
const STEP_EPS: f64 = 1e-9;

/// Identifier of one variable in a panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureName {
    /// Positional identifier.
    Index(usize),
    /// Explicit variable name.
    Named(String),
}

/// One time series instance inside a panel.
#[derive(Debug, Clone)]
pub struct PanelInstance {
    values: Array2<f64>,
    time_index: Option<Vec<f64>>,
}

impl PanelInstance {
    /// Create an instance with an implicit equally-spaced index.
    pub fn from_values(values: Array2<f64>) -> Self {
        PanelInstance {
            values,
            time_index: None,
        }
    }

    /// Create an instance with an explicit time index.
    pub fn with_index(values: Array2<f64>, time_index: Vec<f64>) -> anyhow::Result<Self> {
        if time_index.len() != values.nrows() {
            anyhow::bail!(
                "time index length {} does not match {} timepoints",
                time_index.len(),
                values.nrows()
            );
        }
        Ok(PanelInstance {
            values,
            time_index: Some(time_index),
        })
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn time_index(&self) -> Option<&[f64]> {
        self.time_index.as_deref()
    }

    pub fn n_timepoints(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    /// Step size of the time index, if defined (at least two timepoints and
    /// uniform spacing). The implicit index has unit step.
    fn uniform_step(&self) -> Option<f64> {
        let n = self.n_timepoints();
        if n < 2 {
            return None;
        }
        match &self.time_index {
            None => Some(1.0),
            Some(index) => {
                let step = index[1] - index[0];
                let uniform = index.windows(2).all(|w| {
                    let d = w[1] - w[0];
                    (d - step).abs() <= STEP_EPS * step.abs().max(1.0)
                });
                if uniform {
                    Some(step)
                } else {
                    None
                }
            }
        }
    }

    fn first_feature_only(&self) -> PanelInstance {
        let column = self.values.slice(ndarray::s![.., ..1]).to_owned();
        PanelInstance {
            values: column,
            time_index: self.time_index.clone(),
        }
    }
}

/// A flat collection of time series instances with a shared variable set.
#[derive(Debug, Clone)]
pub struct Panel {
    instances: Vec<PanelInstance>,
    feature_names: Vec<FeatureName>,
    n_features: usize,
}

impl Panel {
    /// Build a panel from instances, validating a uniform feature count.
    ///
    /// # Arguments
    ///
    /// * `instances` - The series instances; all must share one feature count.
    /// * `feature_names` - Optional names, one per feature. Defaults to
    ///   positional `FeatureName::Index` identifiers.
    pub fn new(
        instances: Vec<PanelInstance>,
        feature_names: Option<Vec<FeatureName>>,
    ) -> anyhow::Result<Panel> {
        let n_features = match instances.first() {
            Some(inst) => inst.n_features(),
            None => feature_names.as_ref().map_or(0, |names| names.len()),
        };

        for (i, inst) in instances.iter().enumerate() {
            if inst.n_features() != n_features {
                anyhow::bail!(
                    "instance {} has {} features, expected {}",
                    i,
                    inst.n_features(),
                    n_features
                );
            }
        }

        let feature_names = match feature_names {
            Some(names) => {
                if names.len() != n_features {
                    anyhow::bail!(
                        "{} feature names given for {} features",
                        names.len(),
                        n_features
                    );
                }
                names
            }
            None => (0..n_features).map(FeatureName::Index).collect(),
        };

        Ok(Panel {
            instances,
            feature_names,
            n_features,
        })
    }

    /// A panel with no instances and no features.
    pub fn empty() -> Panel {
        Panel {
            instances: Vec::new(),
            feature_names: Vec::new(),
            n_features: 0,
        }
    }

    pub fn n_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn feature_names(&self) -> &[FeatureName] {
        &self.feature_names
    }

    pub fn instances(&self) -> &[PanelInstance] {
        &self.instances
    }

    pub fn instance(&self, i: usize) -> &PanelInstance {
        &self.instances[i]
    }

    pub fn is_multivariate(&self) -> bool {
        self.n_features > 1
    }

    /// Coerce the panel to its first feature only. Used by composite
    /// regressors that downgrade unsupported multivariate input.
    pub fn to_univariate(&self) -> Panel {
        if self.n_features <= 1 {
            return self.clone();
        }
        Panel {
            instances: self
                .instances
                .iter()
                .map(PanelInstance::first_feature_only)
                .collect(),
            feature_names: self.feature_names.iter().take(1).cloned().collect(),
            n_features: 1,
        }
    }

    fn has_nans(&self) -> bool {
        self.instances
            .iter()
            .any(|inst| inst.values.iter().any(|v| v.is_nan()))
    }

    /// True iff all defined step sizes agree, within and across instances.
    fn is_equally_spaced(&self) -> bool {
        let mut shared_step: Option<f64> = None;
        for inst in &self.instances {
            let step = match (inst.n_timepoints() >= 2, inst.uniform_step()) {
                (false, _) => continue,
                (true, Some(step)) => step,
                (true, None) => return false,
            };
            match shared_step {
                None => shared_step = Some(step),
                Some(existing) => {
                    if (existing - step).abs() > STEP_EPS * existing.abs().max(1.0) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Metadata describing one panel dataset instance.
///
/// All fields default to `None` ("unknown"); a fully populated descriptor is
/// produced by `from_panel`. Equality is by attribute values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelDescriptor {
    /// True iff the panel has exactly one variable.
    pub is_univariate: Option<bool>,
    /// True iff the time index has a uniform step within and across series.
    pub is_equally_spaced: Option<bool>,
    /// True iff every series instance has identical length.
    pub is_equal_length: Option<bool>,
    /// True iff the panel has no variables or no instances.
    pub is_empty: Option<bool>,
    /// True iff the panel degenerates to a single series.
    pub is_one_series: Option<bool>,
    /// True iff any missing values are present.
    pub has_nans: Option<bool>,
    /// Number of series in the panel.
    pub n_instances: Option<usize>,
    /// Number of variables per series.
    pub n_features: Option<usize>,
    /// Names of variables, length == `n_features` when both are set.
    pub feature_names: Option<Vec<FeatureName>>,
}

impl PanelDescriptor {
    /// Fixed classification identity of this descriptor.
    pub fn scitype(&self) -> Scitype {
        Scitype::Panel
    }

    /// Inspect a concrete panel and fill in all metadata fields.
    pub fn from_panel(panel: &Panel) -> PanelDescriptor {
        let n_instances = panel.n_instances();
        let n_features = panel.n_features();

        let is_equal_length = panel
            .instances()
            .windows(2)
            .all(|w| w[0].n_timepoints() == w[1].n_timepoints());

        PanelDescriptor {
            is_univariate: Some(n_features == 1),
            is_equally_spaced: Some(panel.is_equally_spaced()),
            is_equal_length: Some(is_equal_length),
            is_empty: Some(n_instances == 0 || n_features == 0),
            is_one_series: Some(n_instances == 1),
            has_nans: Some(panel.has_nans()),
            n_instances: Some(n_instances),
            n_features: Some(n_features),
            feature_names: Some(panel.feature_names().to_vec()),
        }
    }
}
