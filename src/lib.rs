//! `mandi-forecast` library crate.
//!
//! The binary (`mandi`) is a thin wrapper around this library so that:
//!
//! - the prediction engine is testable without spawning processes
//! - a service front end can embed `Predictor` directly
//! - code stays easy to navigate as the project grows
//!
//! Flow: `features` (date + commodity -> model row) -> `models` (fitted
//! regressor) -> `predict` (single date, ranges, sowing window).

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod io;
pub mod models;
pub mod plot;
pub mod predict;
pub mod report;

pub use domain::{ForecastPoint, ForecastSeries, SowingRecommendation};
pub use error::PredictError;
pub use predict::{ModelContext, Predictor};
