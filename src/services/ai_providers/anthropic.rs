use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use crate::config::constants::{ANTHROPIC_BASE_URL, ANTHROPIC_VERSION};
use crate::enums::ai_provider_error::AiProviderError;
use crate::helpers::json_extractor::extract_json;
use crate::structs::ai::anthropic::anthropic_content_block::{AnthropicContentBlock, AnthropicImageSource};
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;
use crate::structs::ai::anthropic::anthropic_message_request::AnthropicMessageRequest;
use crate::structs::data_uri::DataUri;
use crate::traits::classifier::Classifier;

const SUPPORTED_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: ANTHROPIC_BASE_URL.to_string(),
            client: Client::new(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: 0.0,
            max_tokens: 1024,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_generation(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn get_request(&self, prompt: &str, image: &DataUri) -> Result<AnthropicMessageRequest, AiProviderError> {
        if !SUPPORTED_MEDIA_TYPES.contains(&image.mime_type()) {
            return Err(AiProviderError::UnsupportedMedia(image.mime_type().to_string()));
        }

        Ok(AnthropicMessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: vec![
                    AnthropicContentBlock::Image {
                        source: AnthropicImageSource {
                            source_type: "base64".to_string(),
                            media_type: image.mime_type().to_string(),
                            data: image.payload().to_string(),
                        },
                    },
                    AnthropicContentBlock::Text { text: prompt.to_string() },
                ],
            }],
        })
    }

    async fn make_request(&self, url: String, request_body: AnthropicMessageRequest) -> Result<reqwest::Response, AiProviderError> {
        log::debug!("📦 Request model: {}", request_body.model);

        self.client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.without_url().to_string()))
    }

    pub fn extract_text(json: &Value) -> Option<String> {
        let text: String = json
            .get("content")
            .and_then(|content| content.as_array())?
            .iter()
            .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
            .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl Classifier for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, prompt: &str, image: &DataUri) -> Result<Option<Value>, AiProviderError> {
        let url = format!("{}/messages", self.base_url);
        let request_body = self.get_request(prompt, image)?;

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::error!("❌ Anthropic API Error Response: {}", error_text);
            return Err(AiProviderError::from_status(status.as_u16(), error_text));
        }

        let json: Value = response.json().await
            .map_err(|e| AiProviderError::SerializationError(e.without_url().to_string()))?;

        Ok(Self::extract_text(&json).and_then(|text| extract_json(&text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_block_precedes_prompt() {
        let provider = AnthropicProvider::new("key".to_string());
        let image = DataUri::parse("data:image/png;base64,iVBORw0KGgo=").expect("valid data uri");
        let request = provider.get_request("classify", &image).expect("png is supported");
        let body = serde_json::to_value(request).expect("serializable");

        assert_eq!(body["messages"][0]["content"][0]["type"], "image");
        assert_eq!(body["messages"][0]["content"][0]["source"]["type"], "base64");
        assert_eq!(body["messages"][0]["content"][0]["source"]["media_type"], "image/png");
        assert_eq!(body["messages"][0]["content"][1]["text"], "classify");
    }

    #[test]
    fn dicom_is_rejected_before_sending() {
        let provider = AnthropicProvider::new("key".to_string());
        let image = DataUri::parse("data:application/dicom;base64,AAAA").expect("valid data uri");
        assert!(matches!(provider.get_request("classify", &image), Err(AiProviderError::UnsupportedMedia(_))));
    }

    #[test]
    fn only_text_blocks_count() {
        let response = json!({"content": [{"type": "text", "text": "{\"summary\": \"a cat\"}"}]});
        assert_eq!(AnthropicProvider::extract_text(&response).as_deref(), Some("{\"summary\": \"a cat\"}"));
    }
}
