//! panel-regressors: panel time-series data model and regressor conformance suite.
//!
//! This crate provides a `Panel` container for flat collections of time series,
//! a `PanelDescriptor` metadata object with a scitype inspection utility,
//! a `PanelRegressor` trait with a small set of concrete regressors, and a
//! conformance suite that runs shared correctness checks (multivariate-input
//! rejection, output shape validation) over every registered regressor.
//!
//! The design favors small, testable modules: regressors are registered as
//! plain factory functions so the conformance suite can enumerate them
//! without any runtime reflection.
pub mod config;
pub mod conformance;
pub mod datatypes;
pub mod error;
pub mod models;
pub mod registry;
pub mod regressor;
pub mod scenarios;
