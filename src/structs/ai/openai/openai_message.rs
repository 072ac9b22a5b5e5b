use serde::Serialize;
use crate::structs::ai::openai::openai_content_part::OpenAIContentPart;

#[derive(Serialize, Debug, Clone)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: Vec<OpenAIContentPart>,
}
