use std::sync::Arc;
use crate::services::ct_scan_analyzer::CtScanAnalyzer;
use crate::services::history_store::HistoryStore;
use crate::services::image_summarizer::ImageSummarizer;
use crate::structs::config::output_config::OutputConfig;
use crate::traits::classifier::Classifier;
use crate::ui::session_manager::SessionManager;

/// Everything a web handler needs, built once at startup and shared by reference.
#[derive(Clone)]
pub struct AppContext {
    pub analyzer: CtScanAnalyzer,
    pub summarizer: ImageSummarizer,
    pub history: HistoryStore,
    pub sessions: SessionManager,
    pub output: OutputConfig,
}

impl AppContext {
    pub fn new(classifier: Arc<dyn Classifier>, output: OutputConfig) -> Self {
        Self {
            analyzer: CtScanAnalyzer::new(Arc::clone(&classifier)),
            summarizer: ImageSummarizer::new(classifier),
            history: HistoryStore::new(),
            sessions: SessionManager::new(),
            output,
        }
    }
}
