//! Runtime settings from the environment (and an optional `.env` file).
//!
//! | variable      | meaning                                      | default                  |
//! |---------------|----------------------------------------------|--------------------------|
//! | `MANDI_MODEL` | artifact path or `http(s)://` URL            | `model/mandi_model.json` |
//! | `MANDI_LOG`   | log filter when `RUST_LOG` is not set        | `mandi_forecast=info`    |
//!
//! Command-line flags take precedence over these.

use crate::io::ArtifactSource;

pub const MODEL_ENV: &str = "MANDI_MODEL";
pub const LOG_ENV: &str = "MANDI_LOG";
pub const DEFAULT_MODEL_LOCATION: &str = "model/mandi_model.json";
pub const DEFAULT_LOG_FILTER: &str = "mandi_forecast=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub model: ArtifactSource,
    pub log_filter: String,
}

impl Settings {
    /// Read settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model = get(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL_LOCATION.to_string());
        let log_filter = get(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            model: ArtifactSource::parse(&model),
            log_filter,
        }
    }

    /// Replace the artifact location with a command-line value, if given.
    pub fn with_model_override(mut self, model: Option<&str>) -> Self {
        if let Some(location) = model {
            self.model = ArtifactSource::parse(location);
        }
        self
    }
}
