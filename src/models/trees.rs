//! Gradient-boosted regression tree ensemble.
//!
//! Each tree is a flat node list rooted at index 0:
//!
//! - `split`: numeric test `value <= threshold` goes left; a missing value
//!   (`NaN`) follows `missing_left`
//! - `categorical`: commodity code in `categories` goes left, anything else
//!   (including an unrecognized commodity) goes right
//! - `leaf`: contributes `value`
//!
//! The prediction is `base_score` plus the leaf value reached in every tree.
//! Children must point forward in the node list, which makes every walk finite.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Feature, FeatureVector};
use crate::error::PredictError;
use crate::models::Regressor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: Feature,
        threshold: f64,
        #[serde(default)]
        missing_left: bool,
        left: usize,
        right: usize,
    },
    Categorical {
        feature: Feature,
        categories: Vec<u32>,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk from the root to a leaf and return its value.
    pub fn evaluate(&self, row: &FeatureVector) -> f64 {
        let mut idx = 0;
        // Validated trees always terminate; the bound covers unvalidated input.
        for _ in 0..self.nodes.len() {
            let Some(node) = self.nodes.get(idx) else {
                return f64::NAN;
            };
            idx = match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    missing_left,
                    left,
                    right,
                } => {
                    let v = row.value(*feature);
                    let go_left = if v.is_nan() { *missing_left } else { v <= *threshold };
                    if go_left { *left } else { *right }
                }
                TreeNode::Categorical {
                    feature,
                    categories,
                    left,
                    right,
                } => {
                    let v = row.value(*feature);
                    let in_set = !v.is_nan() && categories.iter().any(|&c| f64::from(c) == v);
                    if in_set { *left } else { *right }
                }
            };
        }
        f64::NAN
    }

    fn validate(&self, tree_idx: usize, vocabulary_len: usize) -> Result<(), PredictError> {
        let invalid = |node: usize, what: String| {
            PredictError::model_unavailable(format!("tree {tree_idx}, node {node}: {what}"))
        };

        if self.nodes.is_empty() {
            return Err(PredictError::model_unavailable(format!("tree {tree_idx} has no nodes")));
        }

        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            let children = match node {
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(i, "non-finite leaf value".to_string()));
                    }
                    continue;
                }
                TreeNode::Split {
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if !threshold.is_finite() {
                        return Err(invalid(i, "non-finite threshold".to_string()));
                    }
                    [*left, *right]
                }
                TreeNode::Categorical {
                    feature,
                    categories,
                    left,
                    right,
                } => {
                    if *feature != Feature::Commodity {
                        return Err(invalid(i, format!("{feature:?} is not a categorical feature")));
                    }
                    if let Some(code) = categories.iter().find(|&&c| c as usize >= vocabulary_len) {
                        return Err(invalid(
                            i,
                            format!("category code {code} is outside the vocabulary ({vocabulary_len} entries)"),
                        ));
                    }
                    [*left, *right]
                }
            };
            for child in children {
                if child <= i || child >= n {
                    return Err(invalid(i, format!("child index {child} must be in {}..{n}", i + 1)));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Check structure and categorical references against the vocabulary size.
    pub fn validate(&self, vocabulary_len: usize) -> Result<(), PredictError> {
        if !self.base_score.is_finite() {
            return Err(PredictError::model_unavailable("tree ensemble base_score is not finite"));
        }
        if self.trees.is_empty() {
            return Err(PredictError::model_unavailable("tree ensemble has no trees"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx, vocabulary_len)?;
        }
        Ok(())
    }

    fn predict_row(&self, row: &FeatureVector) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.evaluate(row))
    }
}

impl Regressor for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }

    fn predict_batch(&self, rows: &[FeatureVector]) -> Vec<f64> {
        // Rows are independent; each is scored by the sequential `predict_row`.
        rows.par_iter().map(|row| self.predict_row(row)).collect()
    }

    fn predict(&self, row: &FeatureVector) -> f64 {
        self.predict_row(row)
    }
}
