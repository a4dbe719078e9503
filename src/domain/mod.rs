//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - model inputs (`FeatureVector`, `CommodityCode`, `Feature`)
//! - prediction outputs (`ForecastPoint`, `ForecastSeries`, `SowingRecommendation`)
//! - the exported forecast file (`ForecastFile`)

pub mod types;

pub use types::*;
