use std::sync::Arc;
use serde_json::Value;
use crate::config::constants::PROBABILITY_SUM_TOLERANCE;
use crate::constants::prompts::CT_SCAN_ANALYSIS_PROMPT;
use crate::enums::analysis_outcome::AnalysisOutcome;
use crate::enums::request_state::RequestState;
use crate::errors::{LungLensError, LungLensResult};
use crate::services::schema_validator::SchemaValidator;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;
use crate::traits::classifier::Classifier;

/// Sends a CT scan to the classifier and holds the model to the result shape.
///
/// Every call is independent: no retry, no timeout, no caching.
#[derive(Clone)]
pub struct CtScanAnalyzer {
    classifier: Arc<dyn Classifier>,
}

impl CtScanAnalyzer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn provider_name(&self) -> &str {
        self.classifier.name()
    }

    /// Classify one image.
    ///
    /// Fails only when the payload is not a data URI, the provider call fails,
    /// or the model returns nothing. Output of the wrong shape comes back as
    /// [`AnalysisOutcome::Degraded`].
    pub async fn classify(&self, request: &AnalysisRequest) -> LungLensResult<AnalysisOutcome> {
        let image = request.data_uri()?;
        let provider = self.classifier.name().to_string();

        log::info!("🫁 Classifying {} image with {}", image.mime_type(), provider);

        let raw = self
            .classifier
            .generate(CT_SCAN_ANALYSIS_PROMPT, &image)
            .await
            .map_err(|e| LungLensError::provider_error(&provider, e))?
            .filter(|value| !value.is_null())
            .ok_or_else(|| LungLensError::no_output(&provider))?;

        Ok(Self::apply_contract(&raw))
    }

    /// Validate raw model output, falling back to a degraded result on any violation.
    pub fn apply_contract(raw: &Value) -> AnalysisOutcome {
        match SchemaValidator::validate_analysis(raw) {
            Ok(result) => {
                if let Some(probabilities) = &result.probabilities {
                    let sum = probabilities.sum();
                    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                        log::warn!("⚠️ Class probabilities sum to {:.3}, left as returned", sum);
                    }
                }
                log::info!("✅ Prediction: {}", result.prediction);
                AnalysisOutcome::Validated(result)
            }
            Err(reason) => {
                log::error!("❌ Model output failed validation: {}", reason);
                let prediction = SchemaValidator::salvage_prediction(raw);
                AnalysisOutcome::Degraded {
                    result: AnalysisResult::degraded(prediction),
                    reason,
                }
            }
        }
    }

    /// Run a classification and turn hard failures into the error result shown to the user.
    pub async fn analyze_for_display(&self, request: &AnalysisRequest) -> (AnalysisResult, RequestState) {
        match self.classify(request).await {
            Ok(outcome) => {
                let state = outcome.request_state();
                (outcome.into_result(), state)
            }
            Err(error) => {
                log::error!("❌ Error analyzing image: {}", error.technical_details());
                (AnalysisResult::error(), RequestState::Failed)
            }
        }
    }
}
