//! The seam between the predictor and a fitted model.

use crate::domain::FeatureVector;

/// A fitted regressor: a pure function of its feature columns.
///
/// Implementations must be deterministic and must return exactly one value per
/// input row, in input order. `predict` and `predict_batch` must agree bit for
/// bit; the default `predict` guarantees this by routing through the batch path.
pub trait Regressor: Send + Sync + std::fmt::Debug {
    /// Short label of the model family (for reports and logs).
    fn kind(&self) -> &'static str;

    /// Predict one value per row.
    fn predict_batch(&self, rows: &[FeatureVector]) -> Vec<f64>;

    /// Predict a single row.
    fn predict(&self, row: &FeatureVector) -> f64 {
        self.predict_batch(std::slice::from_ref(row))
            .first()
            .copied()
            .unwrap_or(f64::NAN)
    }
}
