use std::sync::Arc;
use crate::constants::prompts::IMAGE_SUMMARY_PROMPT;
use crate::errors::{LungLensError, LungLensResult};
use crate::services::schema_validator::SchemaValidator;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::image_summary::ImageSummary;
use crate::traits::classifier::Classifier;

/// Free-text description of any image. Unlike classification there is no fallback.
#[derive(Clone)]
pub struct ImageSummarizer {
    classifier: Arc<dyn Classifier>,
}

impl ImageSummarizer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub async fn summarize(&self, request: &AnalysisRequest) -> LungLensResult<ImageSummary> {
        let image = request.data_uri()?;
        let provider = self.classifier.name().to_string();

        log::info!("📝 Summarizing {} image with {}", image.mime_type(), provider);

        let raw = self
            .classifier
            .generate(IMAGE_SUMMARY_PROMPT, &image)
            .await
            .map_err(|e| LungLensError::provider_error(&provider, e))?
            .filter(|value| !value.is_null())
            .ok_or_else(|| LungLensError::no_output(&provider))?;

        SchemaValidator::validate_summary(&raw)
            .map_err(|e| LungLensError::parse_error("image summary", None, &e.to_string(), None))
    }
}
