use serde_json::Value;

const CODE_FENCE: &str = "```";

/// Turns a model's text answer into JSON.
///
/// Returns `None` for blank text and for a bare `null`. Markdown fences are stripped and the
/// outermost `{...}` is tried when the whole text is not JSON. Text with no
/// object in it comes back as a JSON string so that schema validation, not
/// this function, decides what to do with it.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unfenced = strip_code_fence(trimmed);

    if let Ok(value) = serde_json::from_str::<Value>(unfenced) {
        return (!value.is_null()).then_some(value);
    }

    if let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&unfenced[start..=end]) {
                return Some(value);
            }
        }
    }

    Some(Value::String(trimmed.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(CODE_FENCE) else {
        return text;
    };

    // Skip the language tag line, e.g. ```json
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix(CODE_FENCE).unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_text_is_no_output() {
        assert_eq!(extract_json("   \n"), None);
    }

    #[test]
    fn null_is_no_output() {
        assert_eq!(extract_json("null"), None);
        assert_eq!(extract_json("```json\nnull\n```"), None);
    }

    #[test]
    fn plain_json_is_parsed() {
        assert_eq!(extract_json(r#"{"prediction":"Benign"}"#), Some(json!({"prediction": "Benign"})));
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let text = "```json\n{\"prediction\": \"Normal\", \"confidenceScore\": 0.7}\n```";
        assert_eq!(extract_json(text), Some(json!({"prediction": "Normal", "confidenceScore": 0.7})));
    }

    #[test]
    fn object_is_found_inside_prose() {
        let text = "Here is my answer: {\"prediction\": \"Malignant\"} Hope it helps.";
        assert_eq!(extract_json(text), Some(json!({"prediction": "Malignant"})));
    }

    #[test]
    fn prose_without_object_becomes_string() {
        assert_eq!(extract_json("I cannot help with that."), Some(json!("I cannot help with that.")));
    }
}
