use std::sync::Arc;
use crate::enums::provider_kind::ProviderKind;
use crate::errors::{LungLensError, LungLensResult};
use crate::services::ai_providers::anthropic::AnthropicProvider;
use crate::services::ai_providers::gemini::GeminiProvider;
use crate::services::ai_providers::openai::OpenAIProvider;
use crate::structs::config::ai_config::AiConfig;
use crate::traits::classifier::Classifier;

pub struct ProviderFactory;

impl ProviderFactory {

    pub fn provider_kind(ai_config: &AiConfig) -> LungLensResult<ProviderKind> {
        ai_config.provider.parse::<ProviderKind>().map_err(|e| {
            LungLensError::config_error(&e, Some("ai.provider"), Some("Use gemini, openai or anthropic"))
        })
    }

    pub fn api_key_env(ai_config: &AiConfig, kind: ProviderKind) -> String {
        ai_config
            .api_key_env
            .clone()
            .unwrap_or_else(|| kind.default_api_key_env().to_string())
    }

    pub fn create(ai_config: &AiConfig) -> LungLensResult<Arc<dyn Classifier>> {
        let kind = Self::provider_kind(ai_config)?;
        let env_name = Self::api_key_env(ai_config, kind);
        let api_key = std::env::var(&env_name)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LungLensError::config_error(
                &format!("API key environment variable {} is not set", env_name),
                Some("ai.api_key_env"),
                Some(&format!("export {}=<your key>", env_name)),
            ))?;

        Ok(Self::create_with_key(ai_config, kind, api_key))
    }

    pub fn create_with_key(ai_config: &AiConfig, kind: ProviderKind, api_key: String) -> Arc<dyn Classifier> {
        let model = ai_config
            .model
            .clone()
            .unwrap_or_else(|| kind.default_model().to_string());

        log::info!("🤖 Using {} provider with model {}", kind, model);

        match kind {
            ProviderKind::Gemini => {
                let mut provider = GeminiProvider::new(api_key)
                    .with_model(model)
                    .with_generation(ai_config.temperature, ai_config.max_tokens);
                if let Some(base_url) = &ai_config.base_url {
                    provider = provider.with_base_url(base_url.clone());
                }
                Arc::new(provider)
            }
            ProviderKind::OpenAI => {
                let mut provider = OpenAIProvider::new(api_key)
                    .with_model(model)
                    .with_generation(ai_config.temperature, ai_config.max_tokens);
                if let Some(base_url) = &ai_config.base_url {
                    provider = provider.with_base_url(base_url.clone());
                }
                Arc::new(provider)
            }
            ProviderKind::Anthropic => {
                let mut provider = AnthropicProvider::new(api_key)
                    .with_model(model)
                    .with_generation(ai_config.temperature, ai_config.max_tokens);
                if let Some(base_url) = &ai_config.base_url {
                    provider = provider.with_base_url(base_url.clone());
                }
                Arc::new(provider)
            }
        }
    }
}
