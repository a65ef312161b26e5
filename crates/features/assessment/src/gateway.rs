//! Lazily loaded classifier handle shared by every assessment request.

use crate::model::{Capability, Classifier, ModelArtifact, ModelKind, PredictError};
use agrisk_kernel::domain::observation::{FallbackReason, ObservationInput};
use serde::Serialize;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Index of the "stressed" class in probability outputs.
pub const POSITIVE_CLASS: usize = 1;

#[agrisk_derive::agrisk_error]
pub enum GatewayError {
    #[error("Model unavailable{}: {reason}", format_context(.context))]
    ModelUnavailable { reason: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Model inference failed{}: {source}", format_context(.context))]
    Inference { source: PredictError, context: Option<Cow<'static, str>> },
}

impl GatewayError {
    #[must_use]
    pub const fn fallback_reason(&self) -> FallbackReason {
        match self {
            Self::ModelUnavailable { .. } => FallbackReason::ModelUnavailable,
            Self::Inference { .. } => FallbackReason::InferenceError,
        }
    }
}

/// Outcome of the one-time load.
#[derive(Debug, Clone)]
enum ModelHandle {
    Ready(Arc<dyn Classifier>),
    Unavailable(Cow<'static, str>),
}

/// Snapshot of the gateway for the informational notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatus {
    pub loaded: bool,
    pub path: Option<PathBuf>,
    pub kind: Option<ModelKind>,
    pub capability: Option<Capability>,
    pub reason: Option<String>,
}

/// Loads the configured artifact at most once and serves inference from it.
#[derive(Debug)]
pub struct ModelGateway {
    path: Option<PathBuf>,
    handle: OnceLock<ModelHandle>,
}

impl ModelGateway {
    /// Gateway reading the artifact at `path` on first use.
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path, handle: OnceLock::new() }
    }

    /// Gateway around an already constructed classifier.
    #[must_use]
    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self { path: None, handle: OnceLock::from(ModelHandle::Ready(classifier)) }
    }

    fn load(&self) -> &ModelHandle {
        self.handle.get_or_init(|| {
            let Some(path) = self.path.as_deref() else {
                info!("No model path configured, using simulated predictions");
                return ModelHandle::Unavailable("no model path configured".into());
            };

            match ModelArtifact::load(path) {
                Ok(artifact) => {
                    info!(
                        path = %path.display(),
                        kind = %artifact.kind(),
                        capability = %artifact.capability(),
                        "Stress model loaded"
                    );
                    ModelHandle::Ready(Arc::new(artifact))
                },
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Model not found, using simulated predictions");
                    ModelHandle::Unavailable(err.to_string().into())
                },
            }
        })
    }

    /// Loads the artifact now instead of on the first request.
    pub fn warm_up(&self) -> bool {
        matches!(self.load(), ModelHandle::Ready(_))
    }

    /// Probability of the stressed class, or the label as a decimal for label-only models.
    ///
    /// # Errors
    /// `ModelUnavailable` when no artifact could be loaded, `Inference` when the loaded
    /// classifier fails on this observation or yields a value outside `[0, 1]`.
    pub fn infer(&self, observation: &ObservationInput) -> Result<f64, GatewayError> {
        let classifier = match self.load() {
            ModelHandle::Ready(classifier) => classifier,
            ModelHandle::Unavailable(reason) => {
                return Err(GatewayError::ModelUnavailable { reason: reason.clone(), context: None });
            },
        };

        let features = observation.features();
        let value = match classifier.capability() {
            Capability::Probability => {
                let proba = classifier.predict_proba(&features)?;
                *proba
                    .get(POSITIVE_CLASS)
                    .ok_or(PredictError::TooFewClasses { classes: proba.len() })?
            },
            Capability::Label => classifier.predict(&features)?,
        };

        if !value.is_finite() {
            return Err(PredictError::NonFinite {}.into());
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(PredictError::OutOfRange { value }.into());
        }
        Ok(value)
    }

    #[must_use]
    pub fn status(&self) -> ModelStatus {
        match self.load() {
            ModelHandle::Ready(classifier) => ModelStatus {
                loaded: true,
                path: self.path.clone(),
                kind: Some(classifier.kind()),
                capability: Some(classifier.capability()),
                reason: None,
            },
            ModelHandle::Unavailable(reason) => ModelStatus {
                loaded: false,
                path: self.path.clone(),
                kind: None,
                capability: None,
                reason: Some(reason.to_string()),
            },
        }
    }
}
