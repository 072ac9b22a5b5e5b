use serde_json::{Map, Value};
use crate::enums::prediction::Prediction;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::class_probabilities::ClassProbabilities;
use crate::structs::image_summary::ImageSummary;
use crate::structs::schema_validation_error::{SchemaValidationError, SchemaViolation};

const UNIT_MIN: f64 = 0.0;
const UNIT_MAX: f64 = 1.0;

/// Checks untrusted model output against the result shapes.
///
/// Unknown keys are ignored. Optional fields may be absent but not `null`.
/// All violations are collected rather than stopping at the first one.
pub struct SchemaValidator;

impl SchemaValidator {

    pub fn validate_analysis(raw: &Value) -> Result<AnalysisResult, SchemaValidationError> {
        let object = as_object(raw)?;
        let mut violations = Vec::new();

        let prediction = match object.get("prediction") {
            None => {
                violations.push(SchemaViolation::MissingField { field: "prediction".to_string() });
                None
            }
            Some(Value::String(label)) => {
                let prediction = Prediction::from_label(label);
                if prediction.is_none() {
                    violations.push(SchemaViolation::InvalidEnum {
                        field: "prediction".to_string(),
                        expected: Prediction::allowed_labels(),
                        found: label.clone(),
                    });
                }
                prediction
            }
            Some(other) => {
                violations.push(invalid_type("prediction", "string", other));
                None
            }
        };

        let explanation = match object.get("explanation") {
            None => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                violations.push(invalid_type("explanation", "string", other));
                None
            }
        };

        let confidence_score = object
            .get("confidenceScore")
            .and_then(|value| unit_interval("confidenceScore", value, &mut violations));

        let probabilities = match object.get("probabilities") {
            None => None,
            Some(Value::Object(map)) => probabilities(map, &mut violations),
            Some(other) => {
                violations.push(invalid_type("probabilities", "object", other));
                None
            }
        };

        match (prediction, violations.is_empty()) {
            (Some(prediction), true) => Ok(AnalysisResult {
                prediction,
                explanation,
                confidence_score,
                probabilities,
            }),
            _ => Err(SchemaValidationError::new(violations)),
        }
    }

    /// The raw `prediction` when it is an allowed label, otherwise the fallback.
    pub fn salvage_prediction(raw: &Value) -> Prediction {
        raw.get("prediction")
            .and_then(|value| value.as_str())
            .and_then(Prediction::from_label)
            .unwrap_or(Prediction::FALLBACK)
    }

    pub fn validate_summary(raw: &Value) -> Result<ImageSummary, SchemaValidationError> {
        let object = as_object(raw)?;

        match object.get("summary") {
            Some(Value::String(summary)) => Ok(ImageSummary { summary: summary.clone() }),
            Some(other) => Err(SchemaValidationError::new(vec![invalid_type("summary", "string", other)])),
            None => Err(SchemaValidationError::new(vec![SchemaViolation::MissingField {
                field: "summary".to_string(),
            }])),
        }
    }
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>, SchemaValidationError> {
    raw.as_object().ok_or_else(|| {
        SchemaValidationError::new(vec![SchemaViolation::NotAnObject {
            found: json_type(raw).to_string(),
        }])
    })
}

fn probabilities(map: &Map<String, Value>, violations: &mut Vec<SchemaViolation>) -> Option<ClassProbabilities> {
    let mut class = |key: &str| -> Option<f64> {
        let field = format!("probabilities.{}", key);
        match map.get(key) {
            Some(value) => unit_interval(&field, value, violations),
            None => {
                violations.push(SchemaViolation::MissingField { field });
                None
            }
        }
    };

    let normal = class("normal");
    let malignant = class("malignant");
    let benign = class("benign");

    Some(ClassProbabilities {
        normal: normal?,
        malignant: malignant?,
        benign: benign?,
    })
}

fn unit_interval(field: &str, value: &Value, violations: &mut Vec<SchemaViolation>) -> Option<f64> {
    let Some(number) = value.as_f64() else {
        violations.push(invalid_type(field, "number", value));
        return None;
    };

    if (UNIT_MIN..=UNIT_MAX).contains(&number) {
        Some(number)
    } else {
        violations.push(SchemaViolation::OutOfRange {
            field: field.to_string(),
            value: number,
            min: UNIT_MIN,
            max: UNIT_MAX,
        });
        None
    }
}

fn invalid_type(field: &str, expected: &str, found: &Value) -> SchemaViolation {
    SchemaViolation::InvalidType {
        field: field.to_string(),
        expected: expected.to_string(),
        found: json_type(found).to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_violations_are_reported() {
        let raw = json!({
            "prediction": "Unknown",
            "confidenceScore": 1.5,
            "probabilities": {"normal": 0.2, "malignant": "high"}
        });
        let error = SchemaValidator::validate_analysis(&raw).expect_err("invalid output");

        assert_eq!(error.violations.len(), 4);
        assert!(error.violations.contains(&SchemaViolation::MissingField {
            field: "probabilities.benign".to_string()
        }));
    }

    #[test]
    fn null_optional_field_is_rejected() {
        let raw = json!({"prediction": "Benign", "explanation": null});
        let error = SchemaValidator::validate_analysis(&raw).expect_err("null is not absent");

        assert_eq!(error.violations, vec![SchemaViolation::InvalidType {
            field: "explanation".to_string(),
            expected: "string".to_string(),
            found: "null".to_string(),
        }]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw = json!({"prediction": "Normal", "notes": "extra"});
        let result = SchemaValidator::validate_analysis(&raw).expect("valid output");
        assert_eq!(result.prediction, Prediction::Normal);
    }

    #[test]
    fn bounds_are_inclusive() {
        let raw = json!({
            "prediction": "Normal",
            "confidenceScore": 1,
            "probabilities": {"normal": 1.0, "malignant": 0, "benign": 0.0}
        });
        let result = SchemaValidator::validate_analysis(&raw).expect("valid output");
        assert_eq!(result.confidence_score, Some(1.0));
    }

    #[test]
    fn salvage_is_case_sensitive() {
        assert_eq!(SchemaValidator::salvage_prediction(&json!({"prediction": "malignant"})), Prediction::Normal);
        assert_eq!(SchemaValidator::salvage_prediction(&json!({"prediction": "Malignant"})), Prediction::Malignant);
        assert_eq!(SchemaValidator::salvage_prediction(&json!("Malignant")), Prediction::Normal);
    }

    #[test]
    fn summary_must_be_a_string() {
        assert!(SchemaValidator::validate_summary(&json!({"summary": 3})).is_err());
        assert_eq!(
            SchemaValidator::validate_summary(&json!({"summary": "A chest X-ray"})).expect("valid"),
            ImageSummary { summary: "A chest X-ray".to_string() }
        );
    }
}
