use serde::{Deserialize, Serialize};
use crate::config::constants::{DEGRADED_EXPLANATION, ERROR_EXPLANATION, ERROR_EXPLANATION_PREFIX};
use crate::enums::prediction::Prediction;
use crate::structs::class_probabilities::ClassProbabilities;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub prediction: Prediction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<ClassProbabilities>,
}

impl AnalysisResult {
    pub fn new(prediction: Prediction) -> Self {
        Self {
            prediction,
            explanation: None,
            confidence_score: None,
            probabilities: None,
        }
    }

    /// Fallback for output that failed schema validation. Only the prediction survives.
    pub fn degraded(prediction: Prediction) -> Self {
        Self {
            prediction,
            explanation: Some(DEGRADED_EXPLANATION.to_string()),
            confidence_score: None,
            probabilities: None,
        }
    }

    /// What the caller shows when the request failed outright.
    pub fn error() -> Self {
        Self {
            prediction: Prediction::FALLBACK,
            explanation: Some(ERROR_EXPLANATION.to_string()),
            confidence_score: None,
            probabilities: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.explanation
            .as_deref()
            .is_some_and(|e| e.starts_with(ERROR_EXPLANATION_PREFIX))
    }
}
