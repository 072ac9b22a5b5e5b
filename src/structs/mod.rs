pub mod ai;
pub mod analysis_report;
pub mod analysis_request;
pub mod analysis_result;
pub mod api_response;
pub mod class_probabilities;
pub mod cli;
pub mod config;
pub mod data_uri;
pub mod file_info;
pub mod historical_analysis;
pub mod image_summary;
pub mod loaded_image;
pub mod schema_validation_error;
pub mod session;
pub mod user;
