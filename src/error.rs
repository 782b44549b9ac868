use std::error::Error;
use std::fmt;

/// Custom error type for regressor fit/predict failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegressorError {
    /// The regressor cannot handle panels with more than one feature.
    MultivariateUnsupported { name: &'static str },
    /// `predict` was called before a successful `fit`.
    NotFitted { name: &'static str },
    /// Row-aligned inputs disagree in length, or the predict-time feature
    /// count differs from the fit-time feature count.
    DimensionMismatch { expected: usize, got: usize },
    /// The panel has no instances or no features.
    EmptyPanel,
    /// An ensemble was configured without any member regressors.
    EmptyEnsemble,
    /// The training system could not be solved numerically.
    IllConditioned { name: &'static str },
}

impl fmt::Display for RegressorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegressorError::MultivariateUnsupported { name } => write!(
                f,
                "{} cannot handle multivariate series input; X has more than one feature",
                name
            ),
            RegressorError::NotFitted { name } => {
                write!(f, "{} must be fitted before calling predict", name)
            }
            RegressorError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, got)
            }
            RegressorError::EmptyPanel => {
                write!(f, "panel has no instances or no features")
            }
            RegressorError::EmptyEnsemble => {
                write!(f, "ensemble requires at least one member regressor")
            }
            RegressorError::IllConditioned { name } => {
                write!(f, "{} training system is ill-conditioned", name)
            }
        }
    }
}

impl Error for RegressorError {}
