//! Shared correctness checks run over every registered regressor.
//!
//! Two checks, each a single fit/predict/assert pipeline over a fresh
//! instance: multivariate-rejection semantics and output-shape validation.
//! `run_all` fans the checks out over the registry; pairs are independent,
//! so they run in parallel.
use std::error::Error;
use std::fmt;

use rayon::prelude::*;

use crate::datatypes::{check_is_scitype, Dataset, Scitype};
use crate::registry::{conformance_regressors, RegistryEntry};
use crate::scenarios::{multivariate_fit_scenario, retrieve_scenarios, FitPredictScenario};

/// Substring both the rejection error and the downgrade warning must carry.
const MULTIVARIATE_MSG: &str = "multivariate series";

/// One violated conformance expectation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConformanceFailure {
    /// Atomic regressor accepted multivariate input it does not support.
    UnexpectedFitSuccess { name: &'static str },
    /// Composite regressor completed the downgrade fit without warning.
    MissingWarning { name: &'static str },
    /// Fit failed with an error that does not name the multivariate input.
    WrongError { name: &'static str, message: String },
    /// Fit failed where completion was expected.
    FitFailed { name: &'static str, message: String },
    PredictFailed { name: &'static str, message: String },
    /// Prediction payload did not match the expected scitype.
    WrongScitype { name: &'static str, actual: Scitype },
    OutputLength {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    NonFiniteOutput { name: &'static str, index: usize },
}

impl fmt::Display for ConformanceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConformanceFailure::UnexpectedFitSuccess { name } => write!(
                f,
                "{}: fit on multivariate input completed, expected an error",
                name
            ),
            ConformanceFailure::MissingWarning { name } => write!(
                f,
                "{}: composite fit completed without a '{}' warning",
                name, MULTIVARIATE_MSG
            ),
            ConformanceFailure::WrongError { name, message } => write!(
                f,
                "{}: fit error does not mention '{}': {}",
                name, MULTIVARIATE_MSG, message
            ),
            ConformanceFailure::FitFailed { name, message } => {
                write!(f, "{}: fit failed: {}", name, message)
            }
            ConformanceFailure::PredictFailed { name, message } => {
                write!(f, "{}: predict failed: {}", name, message)
            }
            ConformanceFailure::WrongScitype { name, actual } => {
                write!(f, "{}: predict payload has scitype {}, expected Panel", name, actual)
            }
            ConformanceFailure::OutputLength {
                name,
                expected,
                got,
            } => write!(
                f,
                "{}: prediction has length {}, expected {}",
                name, got, expected
            ),
            ConformanceFailure::NonFiniteOutput { name, index } => {
                write!(f, "{}: prediction at index {} is not finite", name, index)
            }
        }
    }
}

impl Error for ConformanceFailure {}

/// Check A: multivariate-input rejection semantics.
///
/// Regressors declaring the multivariate capability are skipped. Otherwise
/// fit on the multivariate fixture must fail with an error naming
/// "multivariate series" for atomic regressors, and must complete with a
/// warning carrying the same substring for composites.
pub fn check_multivariate_rejection(entry: &RegistryEntry) -> Result<(), ConformanceFailure> {
    let mut regressor = (entry.build)();
    let tags = regressor.tags();
    if tags.handles_multivariate {
        return Ok(());
    }

    let scenario = multivariate_fit_scenario();
    let outcome = scenario.run_fit(regressor.as_mut());

    if tags.composite {
        match outcome {
            Ok(report) if report.has_warning_containing(MULTIVARIATE_MSG) => Ok(()),
            Ok(_) => Err(ConformanceFailure::MissingWarning { name: entry.name }),
            Err(err) => Err(ConformanceFailure::FitFailed {
                name: entry.name,
                message: err.to_string(),
            }),
        }
    } else {
        match outcome {
            Err(err) if err.to_string().contains(MULTIVARIATE_MSG) => Ok(()),
            Err(err) => Err(ConformanceFailure::WrongError {
                name: entry.name,
                message: err.to_string(),
            }),
            Ok(_) => Err(ConformanceFailure::UnexpectedFitSuccess { name: entry.name }),
        }
    }
}

/// Check B: output shape validation.
///
/// The expected length is the instance count reported by `check_is_scitype`
/// for the predict-time payload. Container kind and float dtype are static
/// guarantees of the `Array1<f64>` return type; length and finiteness are
/// asserted dynamically.
pub fn check_regressor_output(
    entry: &RegistryEntry,
    scenario: &FitPredictScenario,
) -> Result<(), ConformanceFailure> {
    let payload = Dataset::Panel(scenario.predict_x.clone());
    let (is_panel, actual, metadata) = check_is_scitype(&payload, Scitype::Panel);
    if !is_panel {
        return Err(ConformanceFailure::WrongScitype {
            name: entry.name,
            actual,
        });
    }
    let expected = metadata.n_instances();

    let mut regressor = (entry.build)();
    scenario
        .run_fit(regressor.as_mut())
        .map_err(|err| ConformanceFailure::FitFailed {
            name: entry.name,
            message: err.to_string(),
        })?;
    let predictions =
        regressor
            .predict(&scenario.predict_x)
            .map_err(|err| ConformanceFailure::PredictFailed {
                name: entry.name,
                message: err.to_string(),
            })?;

    if predictions.len() != expected {
        return Err(ConformanceFailure::OutputLength {
            name: entry.name,
            expected,
            got: predictions.len(),
        });
    }
    if let Some(index) = predictions.iter().position(|v| !v.is_finite()) {
        return Err(ConformanceFailure::NonFiniteOutput {
            name: entry.name,
            index,
        });
    }
    Ok(())
}

/// Result of one (regressor, check) pair.
pub struct ConformanceOutcome {
    pub regressor: &'static str,
    pub check: String,
    pub result: Result<(), ConformanceFailure>,
}

/// Run both checks for every non-excluded registry entry and every scenario.
///
/// Each pair constructs its own fresh regressor instance and shares no
/// mutable state, so the fan-out is embarrassingly parallel.
pub fn run_all() -> Vec<ConformanceOutcome> {
    let entries = conformance_regressors();
    let scenarios = retrieve_scenarios();

    let outcomes: Vec<ConformanceOutcome> = entries
        .par_iter()
        .flat_map(|entry| {
            let mut results = vec![ConformanceOutcome {
                regressor: entry.name,
                check: "multivariate_rejection".to_string(),
                result: check_multivariate_rejection(entry),
            }];
            for scenario in &scenarios {
                results.push(ConformanceOutcome {
                    regressor: entry.name,
                    check: format!("regressor_output[{}]", scenario.name),
                    result: check_regressor_output(entry, scenario),
                });
            }
            results
        })
        .collect();

    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => log::debug!("{} {}: ok", outcome.regressor, outcome.check),
            Err(failure) => log::warn!("{} {}: {}", outcome.regressor, outcome.check, failure),
        }
    }
    outcomes
}
