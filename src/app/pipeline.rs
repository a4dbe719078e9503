//! Startup: settings -> artifact -> shared model context -> predictor.
//!
//! The artifact is read once here. Everything downstream works off the
//! immutable `ModelContext` behind an `Arc`.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppError;
use crate::io::load_context;
use crate::predict::Predictor;

/// Load the model artifact named by `settings` and wrap it in a predictor.
pub fn load_predictor(settings: &Settings) -> Result<Predictor, AppError> {
    let context = load_context(&settings.model)?;
    Ok(Predictor::new(Arc::new(context)))
}
