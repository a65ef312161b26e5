use super::{PredictError, check_features};
use serde::{Deserialize, Serialize};

/// Linear decision function `w · x + b`, shared by logistic regression and linear SVMs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// # Errors
    /// Fails on a feature-count mismatch or a non-finite result.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_features(features, self.coefficients.len())?;
        let score = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        if score.is_finite() { Ok(score) } else { Err(PredictError::NonFinite {}) }
    }

    /// Logistic probability of the positive class.
    ///
    /// # Errors
    /// See [`LinearModel::decision_function`].
    pub fn sigmoid(&self, features: &[f64]) -> Result<f64, PredictError> {
        let score = self.decision_function(features)?;
        Ok(1.0 / (1.0 + (-score).exp()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_function_is_affine() {
        let model = LinearModel { coefficients: vec![0.1, -0.02, -1.0], intercept: -1.0 };
        let score = model.decision_function(&[30.0, 50.0, 0.5]).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
        assert!((model.sigmoid(&[30.0, 50.0, 0.5]).unwrap() - 0.622_459_3).abs() < 1e-6);
    }

    #[test]
    fn non_finite_scores_are_errors() {
        let model = LinearModel { coefficients: vec![f64::MAX, f64::MAX, 0.0], intercept: 0.0 };
        assert!(matches!(
            model.decision_function(&[f64::MAX, f64::MAX, 0.0]),
            Err(PredictError::NonFinite {})
        ));
    }
}
