//! Turning raw model text into JSON.
//!
//! Models like to wrap their answer in Markdown code fences even when told not
//! to. The fences are removed before parsing; nothing else about the text is
//! touched.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResponseParseError {
    #[error("model returned no text after removing code fences")]
    Empty,

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker and trim the result.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Strip fences and parse what is left as JSON.
pub fn parse_model_json(raw: &str) -> Result<Value, ResponseParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ResponseParseError::Empty);
    }

    Ok(serde_json::from_str(&cleaned)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n[1]\n```\n"), "[1]");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_fenced_response() {
        let raw = "```json\n{\"recommendations\":[{\"id\":\"القلب\",\"reason\":\"ألم في الصدر\"}]}\n```";
        let value = parse_model_json(raw).unwrap();
        assert_eq!(
            value,
            json!({"recommendations": [{"id": "القلب", "reason": "ألم في الصدر"}]})
        );
    }

    #[test]
    fn test_parse_unfenced_response() {
        let value = parse_model_json("{\"interpretation\":\"x\",\"temporary_advice\":[],\"recommendations\":[]}")
            .unwrap();
        assert_eq!(value["interpretation"], "x");
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_model_json("Sure! Here is your answer: cardiology").unwrap_err();
        assert!(matches!(err, ResponseParseError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            parse_model_json("```json\n```"),
            Err(ResponseParseError::Empty)
        ));
        assert!(matches!(parse_model_json(""), Err(ResponseParseError::Empty)));
    }
}
