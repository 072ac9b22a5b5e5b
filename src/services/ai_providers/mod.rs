pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod provider_factory;
