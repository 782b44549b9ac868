//! Concrete regressor implementations and the config-driven factory.
pub mod ensemble;
pub mod factory;
pub mod knn;
pub mod summary;

pub use ensemble::EnsemblePanelRegressor;
pub use knn::KnnPanelRegressor;
pub use summary::SummaryPanelRegressor;
