pub mod openai_content_part;
pub mod openai_message;
pub mod openai_request;
