use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    #[error("expected an object, found {found}")]
    NotAnObject { found: String },

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("field '{field}' must be a {expected}, found {found}")]
    InvalidType { field: String, expected: String, found: String },

    #[error("field '{field}' must be one of {expected}, found '{found}'")]
    InvalidEnum { field: String, expected: String, found: String },

    #[error("field '{field}' must be within [{min}, {max}], found {value}")]
    OutOfRange { field: String, value: f64, min: f64, max: f64 },
}

/// Every way a model output missed the expected shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidationError {
    pub violations: Vec<SchemaViolation>,
}

impl SchemaValidationError {
    pub fn new(violations: Vec<SchemaViolation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{} schema violation(s): {}", self.violations.len(), joined)
    }
}

impl std::error::Error for SchemaValidationError {}
