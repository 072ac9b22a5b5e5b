use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::file_info::FileInfo;

/// Snapshot of the results panel, ready for export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub file_info: Option<FileInfo>,
    pub result: AnalysisResult,
}

impl AnalysisReport {
    pub fn new(file_info: Option<FileInfo>, result: AnalysisResult) -> Self {
        Self {
            generated_at: Utc::now(),
            file_info,
            result,
        }
    }
}
