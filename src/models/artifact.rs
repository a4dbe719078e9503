//! Model artifact schema.
//!
//! The artifact is the single unit shipped by the training job: the commodity
//! vocabulary (in category-code order) and the fitted model travel together in
//! one file, tagged with a format version. Shipping them separately would let a
//! re-ordered vocabulary silently shift every commodity code.

use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::features::CommodityVocabulary;
use crate::models::{LinearModel, Regressor, TreeEnsemble};

/// Artifact format understood by this build.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// The fitted model, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelSpec {
    pub fn validate(&self, vocabulary_len: usize) -> Result<(), PredictError> {
        match self {
            ModelSpec::Linear(m) => m.validate(vocabulary_len),
            ModelSpec::TreeEnsemble(m) => m.validate(vocabulary_len),
        }
    }

    pub fn into_regressor(self) -> Box<dyn Regressor> {
        match self {
            ModelSpec::Linear(m) => Box::new(m),
            ModelSpec::TreeEnsemble(m) => Box::new(m),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Human-readable model identifier (shown in reports and exports).
    pub name: String,
    /// Quantity the model predicts, e.g. `modal_price`.
    #[serde(default)]
    pub target: Option<String>,
    pub vocabulary: CommodityVocabulary,
    pub model: ModelSpec,
}

impl ModelArtifact {
    /// Parse and validate an artifact from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PredictError> {
        let artifact: ModelArtifact = serde_json::from_str(text)
            .map_err(|e| PredictError::model_unavailable(format!("invalid artifact JSON: {e}")))?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn to_json_pretty(&self) -> Result<String, PredictError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PredictError::model_unavailable(format!("failed to serialize artifact: {e}")))
    }

    /// Check the version and that the model agrees with the vocabulary.
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(PredictError::model_unavailable(format!(
                "unsupported artifact format_version {} (expected {ARTIFACT_FORMAT_VERSION})",
                self.format_version
            )));
        }
        self.model.validate(self.vocabulary.len())
    }
}
