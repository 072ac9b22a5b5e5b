use serde::{Deserialize, Serialize};
use crate::enums::prediction::Prediction;

/// Per-class estimates. The sum is nominally 1.0 but is never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub normal: f64,
    pub malignant: f64,
    pub benign: f64,
}

impl ClassProbabilities {
    pub fn get(&self, prediction: Prediction) -> f64 {
        match prediction {
            Prediction::Normal => self.normal,
            Prediction::Malignant => self.malignant,
            Prediction::Benign => self.benign,
        }
    }

    pub fn sum(&self) -> f64 {
        self.normal + self.malignant + self.benign
    }
}
