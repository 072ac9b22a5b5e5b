use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use crate::config::constants::OPENAI_BASE_URL;
use crate::enums::ai_provider_error::AiProviderError;
use crate::helpers::json_extractor::extract_json;
use crate::structs::ai::openai::openai_content_part::{OpenAIContentPart, OpenAIImageUrl};
use crate::structs::ai::openai::openai_message::OpenAIMessage;
use crate::structs::ai::openai::openai_request::{OpenAIRequest, OpenAIResponseFormat};
use crate::structs::data_uri::DataUri;
use crate::traits::classifier::Classifier;

#[derive(Clone)]
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
            client: Client::new(),
            model: "gpt-4o-mini".to_string(),
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

    pub fn get_request(&self, prompt: &str, image: &DataUri) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: vec![
                    OpenAIContentPart::Text { text: prompt.to_string() },
                    OpenAIContentPart::ImageUrl {
                        image_url: OpenAIImageUrl { url: image.to_string() },
                    },
                ],
            }],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            response_format: Some(OpenAIResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    async fn make_request(&self, url: String, request_body: OpenAIRequest) -> Result<reqwest::Response, AiProviderError> {
        log::debug!("📦 Request model: {}", request_body.model);

        self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.without_url().to_string()))
    }

    pub fn extract_text(json: &Value) -> Option<String> {
        json.get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl Classifier for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str, image: &DataUri) -> Result<Option<Value>, AiProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request_body = self.get_request(prompt, image);

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::error!("❌ OpenAI API Error Response: {}", error_text);
            return Err(AiProviderError::from_status(status.as_u16(), error_text));
        }

        let json: Value = response.json().await
            .map_err(|e| AiProviderError::SerializationError(e.without_url().to_string()))?;

        Ok(Self::extract_text(&json).and_then(|text| extract_json(&text)))
    }
}
