//! Prediction engine.
//!
//! Responsibilities:
//!
//! - hold the loaded model context (`context`)
//! - single-date and ranged prediction (`predictor`)
//! - sowing-window search over a one-year forecast (`sowing`)

pub mod context;
pub mod predictor;
pub mod sowing;

pub use context::*;
pub use predictor::*;
pub use sowing::*;
