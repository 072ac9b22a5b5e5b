use serde::Serialize;
use crate::structs::ai::anthropic::anthropic_content_block::AnthropicContentBlock;

#[derive(Serialize, Debug)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: Vec<AnthropicContentBlock>,
}
