pub mod ai_provider_error;
pub mod analysis_outcome;
pub mod commands;
pub mod prediction;
pub mod provider_kind;
pub mod report_format;
pub mod request_state;
