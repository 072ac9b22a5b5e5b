use serde::{Deserialize, Serialize};
use crate::errors::LungLensResult;
use crate::structs::data_uri::DataUri;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisRequest {
    #[serde(rename = "photoDataUri")]
    pub image_payload: String,
}

impl AnalysisRequest {
    pub fn new(image_payload: impl Into<String>) -> Self {
        Self {
            image_payload: image_payload.into(),
        }
    }

    pub fn from_data_uri(data_uri: &DataUri) -> Self {
        Self::new(data_uri.to_string())
    }

    /// Parses the payload; an empty or malformed payload is a validation error.
    pub fn data_uri(&self) -> LungLensResult<DataUri> {
        DataUri::parse(&self.image_payload)
    }
}
