//! Linear regressor over the calendar features plus a per-commodity effect.
//!
//! ```text
//! price = intercept
//!       + β_month·month + β_week·week + β_year·year
//!       + β_sin·month_sin + β_cos·month_cos
//!       + effect[commodity]
//! ```
//!
//! An unrecognized commodity contributes no effect. Batched inference builds one
//! design matrix for all rows and multiplies it by the coefficient vector.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::domain::FeatureVector;
use crate::error::PredictError;
use crate::models::Regressor;

/// Number of design-matrix columns (intercept + five numeric features).
const DESIGN_COLS: usize = 6;

/// Coefficients of the numeric features. Missing entries default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearCoefficients {
    pub month: f64,
    pub week: f64,
    pub year: f64,
    pub month_sin: f64,
    pub month_cos: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    #[serde(default)]
    pub coefficients: LinearCoefficients,
    /// One additive effect per vocabulary entry, in vocabulary order.
    #[serde(default)]
    pub commodity_effects: Vec<f64>,
}

impl LinearModel {
    /// Check the model is usable with a vocabulary of `vocabulary_len` entries.
    pub fn validate(&self, vocabulary_len: usize) -> Result<(), PredictError> {
        if self.commodity_effects.len() != vocabulary_len {
            return Err(PredictError::model_unavailable(format!(
                "linear model has {} commodity effects but the vocabulary has {vocabulary_len} entries",
                self.commodity_effects.len()
            )));
        }
        let all_finite = self
            .beta()
            .iter()
            .chain(self.commodity_effects.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(PredictError::model_unavailable(
                "linear model contains non-finite coefficients",
            ));
        }
        Ok(())
    }

    fn beta(&self) -> DVector<f64> {
        let c = &self.coefficients;
        DVector::from_row_slice(&[
            self.intercept,
            c.month,
            c.week,
            c.year,
            c.month_sin,
            c.month_cos,
        ])
    }

    fn commodity_effect(&self, row: &FeatureVector) -> f64 {
        row.commodity
            .index()
            .and_then(|idx| self.commodity_effects.get(idx))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Fill a design row. The row includes the constant term first (intercept).
fn fill_design_row(row: &FeatureVector, out: &mut [f64]) {
    out[0] = 1.0;
    out[1] = f64::from(row.month);
    out[2] = f64::from(row.week);
    out[3] = f64::from(row.year);
    out[4] = row.month_sin;
    out[5] = row.month_cos;
}

impl Regressor for LinearModel {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn predict_batch(&self, rows: &[FeatureVector]) -> Vec<f64> {
        if rows.is_empty() {
            return Vec::new();
        }

        let mut design = vec![0.0; rows.len() * DESIGN_COLS];
        for (row, out) in rows.iter().zip(design.chunks_exact_mut(DESIGN_COLS)) {
            fill_design_row(row, out);
        }
        let x = DMatrix::from_row_slice(rows.len(), DESIGN_COLS, &design);
        let y = x * self.beta();

        rows.iter()
            .zip(y.iter())
            .map(|(row, &base)| base + self.commodity_effect(row))
            .collect()
    }
}
