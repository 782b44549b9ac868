//! Scitype classification and data inspection utilities.
//!
//! A scitype is a semantic data-type classification (Panel, Series, Table)
//! independent of the concrete container. `check_is_scitype` inspects a
//! dynamic `Dataset` payload, reports the actual scitype, and returns the
//! metadata the conformance suite needs (in particular `n_instances`).
pub mod panel;

use std::fmt;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

pub use panel::{FeatureName, Panel, PanelDescriptor, PanelInstance};

/// Semantic data-type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scitype {
    /// Flat collection of time series instances, each possibly multivariate.
    Panel,
    /// A single time series.
    Series,
    /// A plain samples-by-variables table.
    Table,
}

impl fmt::Display for Scitype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scitype::Panel => write!(f, "Panel"),
            Scitype::Series => write!(f, "Series"),
            Scitype::Table => write!(f, "Table"),
        }
    }
}

/// Dynamic data payload for scitype-generic inspection.
#[derive(Debug, Clone)]
pub enum Dataset {
    Panel(Panel),
    Series(Array1<f64>),
    Table(Array2<f64>),
}

impl Dataset {
    pub fn scitype(&self) -> Scitype {
        match self {
            Dataset::Panel(_) => Scitype::Panel,
            Dataset::Series(_) => Scitype::Series,
            Dataset::Table(_) => Scitype::Table,
        }
    }
}

/// Metadata returned by `check_is_scitype`, one variant per scitype.
#[derive(Debug, Clone, PartialEq)]
pub enum ScitypeMetadata {
    Panel(PanelDescriptor),
    Series { n_timepoints: usize },
    Table { n_rows: usize, n_columns: usize },
}

impl ScitypeMetadata {
    /// Instance count of the payload under the panel convention: a panel
    /// reports its instance count, a single series counts as one instance,
    /// and a table counts one instance per row.
    pub fn n_instances(&self) -> usize {
        match self {
            ScitypeMetadata::Panel(desc) => desc.n_instances.unwrap_or(0),
            ScitypeMetadata::Series { .. } => 1,
            ScitypeMetadata::Table { n_rows, .. } => *n_rows,
        }
    }
}

/// Check whether `data` has the expected scitype and return its metadata.
///
/// # Arguments
///
/// * `data` - The payload to inspect.
/// * `expected` - The scitype the caller expects.
///
/// # Returns
///
/// A tuple `(is_match, actual_scitype, metadata)`. Metadata is always
/// computed for the actual scitype, whether or not it matches.
pub fn check_is_scitype(data: &Dataset, expected: Scitype) -> (bool, Scitype, ScitypeMetadata) {
    let actual = data.scitype();
    let metadata = match data {
        Dataset::Panel(panel) => ScitypeMetadata::Panel(PanelDescriptor::from_panel(panel)),
        Dataset::Series(values) => ScitypeMetadata::Series {
            n_timepoints: values.len(),
        },
        Dataset::Table(table) => ScitypeMetadata::Table {
            n_rows: table.nrows(),
            n_columns: table.ncols(),
        },
    };
    (actual == expected, actual, metadata)
}
