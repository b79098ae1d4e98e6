//! Recovers a JSON object from free-form model output.
//!
//! Models asked for "JSON only" still wrap it in code fences or add a sentence
//! before or after. The parser tolerates both: strip an enclosing fence, then
//! take everything from the first `{` to the last `}`.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseFailure {
    #[error("no JSON object delimiters found in model output")]
    NoObject,

    #[error("invalid JSON in model output: {0}")]
    InvalidJson(String),
}

/// Extracts the outermost JSON object embedded in `text`.
pub fn extract_json(text: &str) -> Result<Map<String, Value>, ParseFailure> {
    let text = strip_code_fence(text.trim());

    let start = text.find('{').ok_or(ParseFailure::NoObject)?;
    let end = text.rfind('}').ok_or(ParseFailure::NoObject)?;
    if end < start {
        return Err(ParseFailure::NoObject);
    }

    serde_json::from_str::<Map<String, Value>>(&text[start..=end])
        .map_err(|e| ParseFailure::InvalidJson(e.to_string()))
}

/// Strips a leading ```` ``` ```` / ```` ```json ```` marker and a trailing ```` ``` ````.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.strip_suffix('\n').unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn embedded() -> Value {
        json!({
            "extractedPosting": {"title": "Motorista", "location": "Maputo"},
            "riskFindings": {"riskLevel": "ALTO", "score": 78, "alerts": ["{weird} braces"]}
        })
    }

    #[test]
    fn test_plain_object() {
        let text = embedded().to_string();
        assert_eq!(Value::Object(extract_json(&text).unwrap()), embedded());
    }

    #[test]
    fn test_fenced_with_json_tag() {
        let text = format!("```json\n{}\n```", embedded());
        assert_eq!(Value::Object(extract_json(&text).unwrap()), embedded());
    }

    #[test]
    fn test_fenced_without_tag() {
        let text = format!("```\n{}\n```", embedded());
        assert_eq!(Value::Object(extract_json(&text).unwrap()), embedded());
    }

    #[test]
    fn test_surrounding_commentary_is_ignored() {
        let text = format!(
            "Here is the analysis you asked for:\n{}\nLet me know if you need more.",
            serde_json::to_string_pretty(&embedded()).unwrap()
        );
        assert_eq!(Value::Object(extract_json(&text).unwrap()), embedded());
    }

    #[test]
    fn test_unterminated_fence_still_parses() {
        // Stop sequences can cut the closing fence off.
        let text = format!("```json\n{}", embedded());
        assert_eq!(Value::Object(extract_json(&text).unwrap()), embedded());
    }

    #[test]
    fn test_no_braces_fails() {
        assert_eq!(
            extract_json("I cannot analyse this posting."),
            Err(ParseFailure::NoObject)
        );
        assert_eq!(extract_json(""), Err(ParseFailure::NoObject));
    }

    #[test]
    fn test_reversed_braces_fail() {
        assert_eq!(extract_json("} nothing {"), Err(ParseFailure::NoObject));
    }

    #[test]
    fn test_truncated_json_fails() {
        let result = extract_json(r#"{"riskFindings": {"score": 40}"#);
        assert!(matches!(result, Err(ParseFailure::InvalidJson(_))));
    }
}
