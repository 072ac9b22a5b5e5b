use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::enums::prediction::Prediction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalAnalysis {
    pub id: String,
    pub date: NaiveDate,
    pub image_name: String,
    pub prediction: Prediction,
    pub confidence: f64,
}

impl HistoricalAnalysis {
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}
