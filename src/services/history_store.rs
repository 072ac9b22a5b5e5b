use chrono::NaiveDate;
use once_cell::sync::Lazy;
use crate::enums::prediction::Prediction;
use crate::structs::historical_analysis::HistoricalAnalysis;
use crate::structs::user::User;

static MOCK_HISTORY: Lazy<Vec<HistoricalAnalysis>> = Lazy::new(|| {
    vec![
        entry("1", (2024, 7, 28), "scan_001.png", Prediction::Normal, 0.95),
        entry("2", (2024, 7, 27), "patient_x_ct.dcm", Prediction::Malignant, 0.88),
        entry("3", (2024, 7, 26), "lung_series_abc.jpg", Prediction::Benign, 0.75),
        entry("4", (2024, 7, 25), "chest_scan_final.png", Prediction::Normal, 0.99),
    ]
});

fn entry(id: &str, (year, month, day): (i32, u32, u32), image_name: &str, prediction: Prediction, confidence: f64) -> HistoricalAnalysis {
    HistoricalAnalysis {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        image_name: image_name.to_string(),
        prediction,
        confidence,
    }
}

/// Placeholder history. Nothing is persisted; every signed-in user sees the same rows.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore;

impl HistoryStore {
    pub fn new() -> Self {
        Self
    }

    pub fn list_for(&self, user: Option<&User>) -> Vec<HistoricalAnalysis> {
        match user {
            Some(user) => {
                log::debug!("📚 Listing history for {}", user.email);
                MOCK_HISTORY.clone()
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_users_see_nothing() {
        assert!(HistoryStore::new().list_for(None).is_empty());
    }

    #[test]
    fn rows_are_newest_first() {
        let user = User { email: "doc@example.com".to_string() };
        let rows = HistoryStore::new().list_for(Some(&user));

        assert_eq!(rows.len(), 4);
        assert!(rows.windows(2).all(|pair| pair[0].date > pair[1].date));
        assert_eq!(rows[1].confidence_percent(), "88.0%");
    }
}
