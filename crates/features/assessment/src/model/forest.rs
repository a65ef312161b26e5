use super::{FEATURE_COUNT, PredictError, check_features};
use serde::{Deserialize, Serialize};

/// One node of a flattened decision tree.
///
/// Split nodes send a sample to `left` when `features[feature] <= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split { feature: usize, threshold: f64, left: usize, right: usize },
    /// Per-class sample weights; normalized at prediction time.
    Leaf { value: Vec<f64> },
}

/// Decision tree stored as a node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walks from the root to a leaf. A walk longer than the node count means a cycle.
    fn leaf(&self, tree: usize, features: &[f64]) -> Result<&[f64], PredictError> {
        let malformed = |reason: String| PredictError::MalformedTree { tree, reason: reason.into() };

        let mut index = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(value),
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let x = features
                        .get(*feature)
                        .ok_or_else(|| malformed(format!("split on unknown feature {feature}")))?;
                    index = if x <= threshold { *left } else { *right };
                },
                None => return Err(malformed(format!("node {index} does not exist"))),
            }
        }

        Err(malformed("no leaf reachable from the root".to_owned()))
    }
}

/// Ensemble of decision trees averaging normalized leaf distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    #[serde(default = "default_feature_count")]
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

const fn default_feature_count() -> usize {
    FEATURE_COUNT
}

impl RandomForest {
    /// Mean of the per-tree class distributions.
    ///
    /// # Errors
    /// Fails on a wrong feature count, an empty or malformed ensemble, fewer than two
    /// classes, or a non-finite result.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        check_features(features, self.n_features)?;
        if self.n_classes < 2 {
            return Err(PredictError::TooFewClasses { classes: self.n_classes });
        }
        if self.trees.is_empty() {
            return Err(PredictError::MalformedTree { tree: 0, reason: "ensemble has no trees".into() });
        }

        let mut totals = vec![0.0; self.n_classes];
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            let value = tree.leaf(tree_idx, features)?;
            if value.len() != self.n_classes {
                return Err(PredictError::MalformedTree {
                    tree: tree_idx,
                    reason: format!("leaf has {} classes, expected {}", value.len(), self.n_classes)
                        .into(),
                });
            }

            if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(PredictError::MalformedTree {
                    tree: tree_idx,
                    reason: "leaf weights must be finite and non-negative".into(),
                });
            }

            let weight: f64 = value.iter().sum();
            if !weight.is_finite() || weight <= 0.0 {
                return Err(PredictError::MalformedTree {
                    tree: tree_idx,
                    reason: "leaf weights must sum to a positive number".into(),
                });
            }

            for (total, v) in totals.iter_mut().zip(value) {
                *total += v / weight;
            }
        }

        let trees = self.trees.len() as f64;
        let proba: Vec<f64> = totals.into_iter().map(|total| total / trees).collect();
        if proba.iter().all(|p| p.is_finite()) { Ok(proba) } else { Err(PredictError::NonFinite {}) }
    }

    /// Index of the most probable class.
    ///
    /// # Errors
    /// See [`RandomForest::predict_proba`].
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        let proba = self.predict_proba(features)?;
        let best = proba
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map_or(0, |(class, _)| class);
        Ok(best as f64)
    }
}
