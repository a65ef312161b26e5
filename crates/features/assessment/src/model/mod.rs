//! Classifier artifacts understood by the gateway.
//!
//! Artifacts are a serialized [`ModelArtifact`]: `.json` files are read with `serde_json`,
//! anything else is decoded as `postcard`. Features are always ordered as
//! `[temperature, soil_moisture, vegetation_index]`.

mod error;
mod forest;
mod linear;

pub use error::{ArtifactError, ArtifactErrorExt};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use linear::LinearModel;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Debug;
use std::path::Path;
use strum::Display;

/// Number of input features every artifact must accept.
pub const FEATURE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModelKind {
    RandomForest,
    LogisticRegression,
    LinearSvm,
}

/// What a classifier can produce for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Per-class probabilities.
    Probability,
    /// A predicted class label only.
    Label,
}

/// Why a prediction could not be produced.
#[agrisk_derive::agrisk_error]
pub enum PredictError {
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: Cow<'static, str> },
    #[error("model has {classes} classes, at least 2 are required")]
    TooFewClasses { classes: usize },
    #[error("model produced a non-finite value")]
    NonFinite {},
    #[error("model produced {value}, outside the probability range [0, 1]")]
    OutOfRange { value: f64 },
    #[error("{kind} models do not provide class probabilities")]
    Unsupported { kind: ModelKind },
}

/// Capability interface over a loaded classifier.
pub trait Classifier: Debug + Send + Sync {
    fn kind(&self) -> ModelKind;

    fn capability(&self) -> Capability;

    /// Class probabilities, indexed by class.
    ///
    /// # Errors
    /// Fails when the input does not fit the model or the model lacks the capability.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        let _ = features;
        Err(PredictError::Unsupported { kind: self.kind() })
    }

    /// Predicted class label as a decimal.
    ///
    /// # Errors
    /// Fails when the input does not fit the model.
    fn predict(&self, features: &[f64]) -> Result<f64, PredictError>;
}

/// A classifier as stored on disk, externally tagged by kind
/// (`{ "random_forest": { ... } }`) so the same layout works for JSON and postcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(RandomForest),
    LogisticRegression(LinearModel),
    LinearSvm(LinearModel),
}

impl ModelArtifact {
    /// Reads an artifact, choosing the decoder from the file extension.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).context(format!("reading {}", path.display()))?;
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_slice(&bytes).context(format!("decoding {}", path.display()))
        } else {
            postcard::from_bytes(&bytes).context(format!("decoding {}", path.display()))
        }
    }
}

pub(crate) fn check_features(features: &[f64], expected: usize) -> Result<(), PredictError> {
    if features.len() == expected {
        Ok(())
    } else {
        Err(PredictError::FeatureCount { expected, actual: features.len() })
    }
}

impl Classifier for ModelArtifact {
    fn kind(&self) -> ModelKind {
        match self {
            Self::RandomForest(_) => ModelKind::RandomForest,
            Self::LogisticRegression(_) => ModelKind::LogisticRegression,
            Self::LinearSvm(_) => ModelKind::LinearSvm,
        }
    }

    fn capability(&self) -> Capability {
        match self {
            Self::RandomForest(_) | Self::LogisticRegression(_) => Capability::Probability,
            Self::LinearSvm(_) => Capability::Label,
        }
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        match self {
            Self::RandomForest(forest) => forest.predict_proba(features),
            Self::LogisticRegression(model) => {
                let positive = model.sigmoid(features)?;
                Ok(vec![1.0 - positive, positive])
            },
            Self::LinearSvm(_) => Err(PredictError::Unsupported { kind: ModelKind::LinearSvm }),
        }
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        match self {
            Self::RandomForest(forest) => forest.predict(features),
            Self::LogisticRegression(model) => {
                Ok(if model.sigmoid(features)? > 0.5 { 1.0 } else { 0.0 })
            },
            Self::LinearSvm(model) => {
                Ok(if model.decision_function(features)? > 0.0 { 1.0 } else { 0.0 })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_artifact_is_keyed_by_kind() {
        let raw = r#"{ "linear_svm": { "coefficients": [0.1, -0.05, -1.0], "intercept": 0.2 } }"#;
        let artifact: ModelArtifact = serde_json::from_str(raw).unwrap();
        assert_eq!(artifact.kind(), ModelKind::LinearSvm);
        assert_eq!(artifact.capability(), Capability::Label);
        assert!(matches!(
            artifact.predict_proba(&[30.0, 40.0, 0.5]),
            Err(PredictError::Unsupported { kind: ModelKind::LinearSvm })
        ));
    }

    #[test]
    fn logistic_regression_reports_both_classes() {
        let artifact = ModelArtifact::LogisticRegression(LinearModel {
            coefficients: vec![0.0, 0.0, 0.0],
            intercept: 0.0,
        });
        let proba = artifact.predict_proba(&[28.0, 60.0, 0.65]).unwrap();
        assert_eq!(proba.len(), 2);
        assert!((proba[1] - 0.5).abs() < 1e-12);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ModelArtifact::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { context: Some(_), .. }));
    }
}
