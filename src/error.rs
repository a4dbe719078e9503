//! Error types.
//!
//! - `PredictError` is what the prediction engine returns to its callers. Each
//!   variant is a distinct failure kind so a front end can map them separately.
//! - `AppError` is the binary's error: a message plus a process exit code.

use chrono::NaiveDate;
use thiserror::Error;

/// Exit code for caller input errors (bad dates, parameters, commodities, paths).
pub const EXIT_INPUT: u8 = 2;
/// Exit code for a model artifact that could not be loaded or validated.
pub const EXIT_MODEL: u8 = 3;
/// Exit code for runtime failures after a successful load.
pub const EXIT_RUNTIME: u8 = 4;

/// Failures surfaced by the feature builder, predictor and sowing optimizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD.")]
    InvalidDateFormat { input: String },

    #[error("Invalid {name}={value}: {reason}.")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: String,
    },

    #[error("Unknown commodity '{commodity}'. Run `mandi commodities` to list supported names.")]
    UnknownCommodity { commodity: String },

    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("Model produced a non-finite prediction ({value}) for {date}.")]
    InvalidPrediction { date: NaiveDate, value: f64 },

    #[error("Model returned {actual} predictions for {expected} rows.")]
    PredictionCountMismatch { expected: usize, actual: usize },
}

impl PredictError {
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, value: i64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// Process exit code used when this error terminates the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidDateFormat { .. }
            | Self::InvalidParameter { .. }
            | Self::UnknownCommodity { .. } => EXIT_INPUT,
            Self::ModelUnavailable { .. } => EXIT_MODEL,
            Self::InvalidPrediction { .. } | Self::PredictionCountMismatch { .. } => EXIT_RUNTIME,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_errors_map_to_distinct_exit_codes() {
        let input = PredictError::InvalidDateFormat {
            input: "15/03/2024".to_string(),
        };
        let model = PredictError::model_unavailable("missing file");
        let runtime = PredictError::InvalidPrediction {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            value: f64::NAN,
        };

        assert_eq!(AppError::from(input).exit_code(), EXIT_INPUT);
        assert_eq!(AppError::from(model).exit_code(), EXIT_MODEL);
        assert_eq!(AppError::from(runtime).exit_code(), EXIT_RUNTIME);

        let short = PredictError::PredictionCountMismatch { expected: 3, actual: 2 };
        assert_eq!(AppError::from(short).exit_code(), EXIT_RUNTIME);
    }

    #[test]
    fn app_error_keeps_predict_message() {
        let err = AppError::from(PredictError::UnknownCommodity {
            commodity: "UnknownVeg".to_string(),
        });
        assert!(err.to_string().contains("UnknownVeg"));
    }
}
