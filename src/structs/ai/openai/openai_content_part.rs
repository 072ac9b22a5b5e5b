use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAIContentPart {
    Text { text: String },
    ImageUrl { image_url: OpenAIImageUrl },
}

/// OpenAI accepts data URIs directly in `url`.
#[derive(Serialize, Debug, Clone)]
pub struct OpenAIImageUrl {
    pub url: String,
}
