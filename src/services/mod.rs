pub mod ai_providers;
pub mod ct_scan_analyzer;
pub mod history_store;
pub mod image_loader;
pub mod image_summarizer;
pub mod report_exporter;
pub mod schema_validator;
