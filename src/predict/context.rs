//! The loaded, read-only model context.
//!
//! Built once at startup from a validated artifact and shared (via `Arc`) by
//! every predictor. Nothing in it changes after construction.

use crate::error::PredictError;
use crate::features::CommodityVocabulary;
use crate::models::{ModelArtifact, Regressor};

#[derive(Debug)]
pub struct ModelContext {
    name: String,
    target: Option<String>,
    vocabulary: CommodityVocabulary,
    model: Box<dyn Regressor>,
}

impl ModelContext {
    /// Assemble a context from parts.
    ///
    /// The caller is responsible for `model` having been fitted against
    /// `vocabulary`; prefer `from_artifact`, which checks this.
    pub fn new(name: impl Into<String>, vocabulary: CommodityVocabulary, model: Box<dyn Regressor>) -> Self {
        Self {
            name: name.into(),
            target: None,
            vocabulary,
            model,
        }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, PredictError> {
        artifact.validate()?;
        Ok(Self {
            name: artifact.name,
            target: artifact.target,
            vocabulary: artifact.vocabulary,
            model: artifact.model.into_regressor(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn vocabulary(&self) -> &CommodityVocabulary {
        &self.vocabulary
    }

    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ARTIFACT_FORMAT_VERSION, LinearModel, ModelSpec};

    fn artifact(effects: Vec<f64>) -> ModelArtifact {
        ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            name: "test".to_string(),
            target: Some("modal_price".to_string()),
            vocabulary: CommodityVocabulary::new(["Tomato", "Onion"]).unwrap(),
            model: ModelSpec::Linear(LinearModel {
                intercept: 1.0,
                coefficients: Default::default(),
                commodity_effects: effects,
            }),
        }
    }

    #[test]
    fn from_artifact_keeps_metadata() {
        let ctx = ModelContext::from_artifact(artifact(vec![0.0, 0.0])).unwrap();
        assert_eq!(ctx.name(), "test");
        assert_eq!(ctx.target(), Some("modal_price"));
        assert_eq!(ctx.vocabulary().len(), 2);
        assert_eq!(ctx.model().kind(), "linear");
    }

    #[test]
    fn from_artifact_validates() {
        assert!(matches!(
            ModelContext::from_artifact(artifact(vec![0.0])),
            Err(PredictError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn context_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModelContext>();
    }
}
