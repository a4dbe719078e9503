//! Commodity vocabulary: the ordered category list fixed at training time.
//!
//! A commodity's categorical code is its position in this list. The ordering is
//! part of the model contract, so the vocabulary is only ever loaded from the
//! same artifact as the model and never re-sorted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::CommodityCode;
use crate::error::PredictError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CommodityVocabulary {
    names: Vec<String>,
    codes: HashMap<String, u32>,
}

impl CommodityVocabulary {
    /// Build a vocabulary from names in training category order.
    ///
    /// Rejects an empty list, blank names, and duplicates (a duplicate would make
    /// the name-to-code mapping ambiguous).
    pub fn new<I, S>(names: I) -> Result<Self, PredictError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(PredictError::model_unavailable("commodity vocabulary is empty"));
        }
        if names.len() > u32::MAX as usize {
            return Err(PredictError::model_unavailable("commodity vocabulary is too large"));
        }

        let mut codes = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(PredictError::model_unavailable(format!(
                    "commodity vocabulary entry {idx} is blank"
                )));
            }
            if codes.insert(name.clone(), idx as u32).is_some() {
                return Err(PredictError::model_unavailable(format!(
                    "commodity vocabulary lists '{name}' more than once"
                )));
            }
        }

        Ok(Self { names, codes })
    }

    /// Categorical code for `commodity` (exact, case-sensitive match).
    pub fn code(&self, commodity: &str) -> CommodityCode {
        self.codes
            .get(commodity)
            .map_or(CommodityCode::Unrecognized, |&code| CommodityCode::Known(code))
    }

    pub fn contains(&self, commodity: &str) -> bool {
        self.codes.contains_key(commodity)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TryFrom<Vec<String>> for CommodityVocabulary {
    type Error = PredictError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<CommodityVocabulary> for Vec<String> {
    fn from(vocabulary: CommodityVocabulary) -> Self {
        vocabulary.names
    }
}
