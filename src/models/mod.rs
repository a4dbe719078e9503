//! Fitted regressors and the artifact that ships them.
//!
//! Models are consumed, never trained, here. Each family implements
//! `Regressor` so the predictor stays generic over what the training job produced.

pub mod artifact;
pub mod linear;
pub mod regressor;
pub mod trees;

pub use artifact::*;
pub use linear::*;
pub use regressor::*;
pub use trees::*;
