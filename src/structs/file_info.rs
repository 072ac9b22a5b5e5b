use serde::{Deserialize, Serialize};

/// Details shown next to the prediction. All fields are preformatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub dimensions: String,
    pub last_modified: String,
}
