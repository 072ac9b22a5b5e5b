use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::enums::request_state::RequestState;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::file_info::FileInfo;
use crate::structs::user::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user: User,
    pub state: RequestState,
    pub last_result: Option<AnalysisResult>,
    pub last_file_info: Option<FileInfo>,
    pub created_at: DateTime<Utc>,
}
