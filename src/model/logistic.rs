//! Logistic regression: `P(present) = sigmoid(w · x + b)`.

use crate::error::ScreeningError;
use crate::model::ProbabilisticClassifier;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Serializable representation of logistic model parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Fitted logistic model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LogisticParams", into = "LogisticParams")]
pub struct LogisticModel {
    weights: Array1<f64>,
    bias: f64,
}

impl LogisticModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Result<Self, ScreeningError> {
        Self::try_from(LogisticParams { weights, bias })
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Raw decision value `w · x + b`.
    pub fn logit(&self, row: ArrayView1<'_, f64>) -> f64 {
        self.weights.dot(&row) + self.bias
    }
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl TryFrom<LogisticParams> for LogisticModel {
    type Error = ScreeningError;

    fn try_from(params: LogisticParams) -> Result<Self, Self::Error> {
        if params.weights.is_empty() {
            return Err(ScreeningError::SerializationError(
                "logistic model has no weights".to_string(),
            ));
        }
        if !params.bias.is_finite() || params.weights.iter().any(|w| !w.is_finite()) {
            return Err(ScreeningError::SerializationError(
                "logistic model has non-finite parameters".to_string(),
            ));
        }
        Ok(Self {
            weights: Array1::from(params.weights),
            bias: params.bias,
        })
    }
}

impl From<LogisticModel> for LogisticParams {
    fn from(model: LogisticModel) -> Self {
        Self {
            weights: model.weights.to_vec(),
            bias: model.bias,
        }
    }
}

impl ProbabilisticClassifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, row: ArrayView1<'_, f64>) -> [f64; 2] {
        let present = sigmoid(self.logit(row));
        [1.0 - present, present]
    }
}
