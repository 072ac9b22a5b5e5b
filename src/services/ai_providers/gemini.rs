use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use crate::config::constants::GEMINI_BASE_URL;
use crate::enums::ai_provider_error::AiProviderError;
use crate::helpers::json_extractor::extract_json;
use crate::structs::ai::gemini::gemini_content::GeminiContent;
use crate::structs::ai::gemini::gemini_generation_config::GeminiGenerationConfig;
use crate::structs::ai::gemini::gemini_part::GeminiPart;
use crate::structs::ai::gemini::gemini_request::GeminiRequest;
use crate::structs::data_uri::DataUri;
use crate::traits::classifier::Classifier;

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            client: Client::new(),
            model: "gemini-2.0-flash".to_string(),
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

    pub fn get_request(&self, prompt: &str, image: &DataUri) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![
                    GeminiPart::text(prompt),
                    GeminiPart::inline(image.mime_type(), image.payload()),
                ],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(self.temperature),
                max_output_tokens: Some(self.max_tokens),
                candidate_count: Some(1),
                response_mime_type: Some("application/json".to_string()),
            }),
        }
    }

    async fn make_request(&self, url: String, request_body: GeminiRequest) -> Result<reqwest::Response, AiProviderError> {
        log::debug!("📦 Request model: {}", self.model);

        self.client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.without_url().to_string()))
    }

    /// Concatenates the text parts of the first candidate.
    pub fn extract_text(json: &Value) -> Option<String> {
        if let Some(reason) = json.pointer("/promptFeedback/blockReason").and_then(|r| r.as_str()) {
            log::warn!("⚠️ Gemini blocked the prompt: {}", reason);
        }

        let parts = json
            .get("candidates")
            .and_then(|candidates| candidates.as_array())
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl Classifier for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, image: &DataUri) -> Result<Option<Value>, AiProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request_body = self.get_request(prompt, image);

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::error!("❌ Gemini API Error Response: {}", error_text);
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
    fn request_carries_prompt_and_inline_image() {
        let provider = GeminiProvider::new("key".to_string());
        let image = DataUri::parse("data:image/png;base64,iVBORw0KGgo=").expect("valid data uri");
        let body = serde_json::to_value(provider.get_request("classify", &image)).expect("serializable");

        assert_eq!(body["contents"][0]["parts"][0]["text"], "classify");
        assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["data"], "iVBORw0KGgo=");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn text_parts_are_joined() {
        let response = json!({
            "candidates": [{"content": {"parts": [{"text": "{\"prediction\":"}, {"text": "\"Normal\"}"}]}}]
        });
        assert_eq!(GeminiProvider::extract_text(&response).as_deref(), Some("{\"prediction\":\"Normal\"}"));
    }

    #[test]
    fn blocked_prompt_has_no_text() {
        let response = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert_eq!(GeminiProvider::extract_text(&response), None);
    }
}
