use async_trait::async_trait;
use serde_json::Value;
use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::data_uri::DataUri;

/// A hosted model that looks at one image under one instruction.
///
/// `Ok(None)` means the model answered with nothing at all. Any text it did
/// return is handed back as JSON (see `helpers::json_extractor`), unvalidated.
#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str, image: &DataUri) -> Result<Option<Value>, AiProviderError>;
}
