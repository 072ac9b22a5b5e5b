use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Prediction {
    Normal,
    Malignant,
    Benign,
}

impl Prediction {
    pub const ALL: [Prediction; 3] = [Prediction::Normal, Prediction::Malignant, Prediction::Benign];

    /// Prediction used when the model's label cannot be salvaged.
    pub const FALLBACK: Prediction = Prediction::Normal;

    pub fn as_str(&self) -> &'static str {
        match self {
            Prediction::Normal => "Normal",
            Prediction::Malignant => "Malignant",
            Prediction::Benign => "Benign",
        }
    }

    /// Exact, case-sensitive label match.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == label)
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Prediction::Normal => "default",
            Prediction::Benign => "secondary",
            Prediction::Malignant => "destructive",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Prediction::Normal => "🟢",
            Prediction::Benign => "🟡",
            Prediction::Malignant => "🔴",
        }
    }

    pub fn allowed_labels() -> String {
        Self::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prediction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("expected one of {}, found '{}'", Self::allowed_labels(), s))
    }
}
