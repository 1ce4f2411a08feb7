//! Prompt construction and model output parsing
//!
//! Models asked for JSON often return something JSON-like instead: wrapped
//! in prose or fences, with Python triple-quoted strings, single quotes or
//! trailing commas. [`parse_summary_response`] repairs those before parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::format::DocFormat;
use crate::shared::models::{DocstitchError, Result};

static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));
static TRIPLE_DOUBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)"""(.*?)""""#).expect("valid regex"));
static TRIPLE_SINGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)'''(.*?)'''").expect("valid regex"));
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));
static STRAY_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""\s*\.(\s*[,}\]])"#).expect("valid regex"));

/// Build the instruction sent to the summarizer for one declaration
pub fn build_prompt(language: &str, name: &str, code: &str, format: DocFormat) -> String {
    format!(
        "You are an expert {language} developer and documentation assistant.\n\
         Given the following {language} declaration, write a {format} documentation \
         comment with a short description, arguments, return value and examples if applicable.\n\
         \n\
         Return your answer strictly as JSON with no markdown, no code fences and no explanation:\n\
         {{\"function_name\": \"{name}\", \"docstring\": \"<documentation text>\"}}\n\
         \n\
         Declaration:\n\
         {code}",
        language = language,
        format = format,
        name = name,
        code = code.trim_end(),
    )
}

/// Extract the `docstring` field from raw model output
///
/// `name` identifies the declaration in the error on failure.
pub fn parse_summary_response(name: &str, raw: &str) -> Result<String> {
    let fail = |message: String| DocstitchError::summarization(name, message);

    let object = JSON_OBJECT
        .find(raw)
        .ok_or_else(|| fail(format!("no JSON object in model output: {}", preview(raw))))?
        .as_str();

    let value = parse_lenient(object)
        .ok_or_else(|| fail(format!("invalid JSON after cleanup: {}", preview(object))))?;

    match value.get("docstring") {
        Some(Value::String(text)) => Ok(strip_wrapping_quotes(text).to_string()),
        Some(Value::Null) | None => Err(fail("response has no 'docstring' field".to_string())),
        Some(other) => Err(fail(format!("'docstring' is not a string: {}", other))),
    }
}

/// Parse with progressively more aggressive repairs
fn parse_lenient(object: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(object) {
        return Some(value);
    }

    let repaired = repair_json(object);
    if let Ok(value) = serde_json::from_str(&repaired) {
        return Some(value);
    }

    // Single-quoted keys and strings; breaks apostrophes, so tried last
    serde_json::from_str(&repaired.replace('\'', "\"")).ok()
}

fn repair_json(object: &str) -> String {
    let text = TRIPLE_DOUBLE.replace_all(object, as_json_string);
    let text = TRIPLE_SINGLE.replace_all(&text, as_json_string);
    let text = STRAY_PERIOD.replace_all(&text, "\"$1");
    TRAILING_COMMA.replace_all(&text, "$1").into_owned()
}

fn as_json_string(caps: &regex::Captures<'_>) -> String {
    serde_json::to_string(&caps[1]).unwrap_or_default()
}

/// Models sometimes wrap the docstring value itself in triple quotes
fn strip_wrapping_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    ["\"\"\"", "'''"]
        .into_iter()
        .find_map(|q| trimmed.strip_prefix(q).and_then(|t| t.strip_suffix(q)))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn preview(text: &str) -> String {
    text.chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_inputs() {
        let prompt = build_prompt("Python", "add", "def add(a, b):\n    return a + b\n", DocFormat::NumPy);
        assert!(prompt.contains("expert Python developer"));
        assert!(prompt.contains("NumPy-style"));
        assert!(prompt.contains("\"function_name\": \"add\""));
        assert!(prompt.ends_with("return a + b"));
    }

    #[test]
    fn test_plain_json() {
        let raw = r#"{"function_name": "f", "docstring": "Returns 1."}"#;
        assert_eq!(parse_summary_response("f", raw).unwrap(), "Returns 1.");
    }

    #[test]
    fn test_json_wrapped_in_prose() {
        let raw = "Sure! Here it is:\n```json\n{\"docstring\": \"Adds two numbers.\"}\n```\n";
        assert_eq!(parse_summary_response("add", raw).unwrap(), "Adds two numbers.");
    }

    #[test]
    fn test_triple_quoted_value_and_trailing_comma() {
        let raw = "{\n  \"function_name\": \"f\",\n  \"docstring\": \"\"\"Line one.\n\nLine two.\"\"\",\n}";
        assert_eq!(parse_summary_response("f", raw).unwrap(), "Line one.\n\nLine two.");
    }

    #[test]
    fn test_single_quoted_object() {
        let raw = "{'function_name': 'f', 'docstring': 'Does things.'}";
        assert_eq!(parse_summary_response("f", raw).unwrap(), "Does things.");
    }

    #[test]
    fn test_apostrophe_survives_valid_json() {
        let raw = r#"{"docstring": "Doesn't fail."}"#;
        assert_eq!(parse_summary_response("f", raw).unwrap(), "Doesn't fail.");
    }

    #[test]
    fn test_stray_period_after_value() {
        let raw = "{\n\"function_name\": \"f\",\n\"docstring\": \"Text here\".\n}";
        assert_eq!(parse_summary_response("f", raw).unwrap(), "Text here");
    }

    #[test]
    fn test_value_wrapped_in_triple_quotes() {
        let raw = r#"{"docstring": "\"\"\"Wrapped.\"\"\""}"#;
        assert_eq!(parse_summary_response("f", raw).unwrap(), "Wrapped.");
    }

    #[test]
    fn test_failures() {
        for raw in ["no json here", "{not json at all", r#"{"name": "f"}"#, r#"{"docstring": 3}"#] {
            let err = parse_summary_response("f", raw).unwrap_err();
            assert!(
                matches!(err, DocstitchError::SummarizationFailure { ref name, .. } if name == "f"),
                "{raw}"
            );
        }
    }
}
