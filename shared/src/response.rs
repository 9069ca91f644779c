//! Sanitation and shape validation of Gemini replies.
//!
//! The model is instructed to return bare JSON but frequently wraps it in a
//! markdown code fence anyway, so replies are stripped of fence markers
//! before parsing. The parsed value is then checked against the fixed
//! schema of the invoked endpoint. Only structure is checked here; the
//! content itself is the model's business.

use std::fmt;

use serde_json::{Map, Value};

/// Strip markdown code-fence markers and surrounding whitespace.
///
/// Idempotent: already-clean text comes back unchanged, and interior
/// content is never altered.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// A single structural problem in a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending field, e.g. `new_words[2].turkish_meaning`.
    pub field: String,
    /// What the schema expected there.
    pub expected: &'static str,
}

impl Violation {
    fn new(field: impl Into<String>, expected: &'static str) -> Self {
        Self {
            field: field.into(),
            expected,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}", self.field, self.expected)
    }
}

/// Check a parsed reply against the basic rewrite schema.
///
/// Required shape:
/// - `rewritten_text`: string
/// - `new_words`: array of objects with `english_word` and `turkish_meaning`
pub fn validate_rewrite(value: &Value) -> Result<(), Vec<Violation>> {
    let Some(object) = value.as_object() else {
        return Err(vec![Violation::new("$", "a JSON object")]);
    };

    let mut violations = Vec::new();
    check_string(object, "rewritten_text", &mut violations);
    check_object_list(
        object,
        "new_words",
        &["english_word", "turkish_meaning"],
        &mut violations,
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Check a parsed reply against the upgrade schema.
///
/// Required shape, all keys mandatory:
/// - `rewritten_text`: string
/// - `grammar_corrections`: array of objects with `original`, `corrected`, `explanation`
/// - `new_words`: array of objects with `english_word` and `turkish_meaning`
/// - `writing_tips`, `strengths`, `weaknesses`: arrays of strings
/// - `overall_feedback`: string
pub fn validate_upgrade(value: &Value) -> Result<(), Vec<Violation>> {
    let Some(object) = value.as_object() else {
        return Err(vec![Violation::new("$", "a JSON object")]);
    };

    let mut violations = Vec::new();
    check_string(object, "rewritten_text", &mut violations);
    check_object_list(
        object,
        "grammar_corrections",
        &["original", "corrected", "explanation"],
        &mut violations,
    );
    check_object_list(
        object,
        "new_words",
        &["english_word", "turkish_meaning"],
        &mut violations,
    );
    check_string_list(object, "writing_tips", &mut violations);
    check_string_list(object, "strengths", &mut violations);
    check_string_list(object, "weaknesses", &mut violations);
    check_string(object, "overall_feedback", &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_string(object: &Map<String, Value>, key: &str, violations: &mut Vec<Violation>) {
    if !matches!(object.get(key), Some(Value::String(_))) {
        violations.push(Violation::new(key, "a string"));
    }
}

fn check_object_list(
    object: &Map<String, Value>,
    key: &str,
    required: &[&'static str],
    violations: &mut Vec<Violation>,
) {
    let Some(items) = object.get(key).and_then(Value::as_array) else {
        violations.push(Violation::new(key, "an array"));
        return;
    };

    for (index, item) in items.iter().enumerate() {
        let Some(entry) = item.as_object() else {
            violations.push(Violation::new(format!("{}[{}]", key, index), "an object"));
            continue;
        };
        for field in required {
            if !entry.contains_key(*field) {
                violations.push(Violation::new(
                    format!("{}[{}].{}", key, index, field),
                    "a value",
                ));
            }
        }
    }
}

fn check_string_list(object: &Map<String, Value>, key: &str, violations: &mut Vec<Violation>) {
    let Some(items) = object.get(key).and_then(Value::as_array) else {
        violations.push(Violation::new(key, "an array of strings"));
        return;
    };

    for (index, item) in items.iter().enumerate() {
        if !item.is_string() {
            violations.push(Violation::new(format!("{}[{}]", key, index), "a string"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_fences_is_noop_on_clean_text() {
        assert_eq!(strip_code_fences(r#"{"a":1}"#), r#"{"a":1}"#);
    }

    #[test]
    fn test_strip_fences_removes_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), r#"{"a":1}"#);
    }

    #[test]
    fn test_strip_fences_is_idempotent() {
        let once = strip_code_fences("```json\n{\"a\":1}\n```");
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn test_strip_fences_trims_whitespace() {
        assert_eq!(strip_code_fences("  \n{\"a\":1}\n  "), r#"{"a":1}"#);
    }

    #[test]
    fn test_rewrite_minimal_object_passes() {
        let value = json!({"rewritten_text": "x", "new_words": []});
        assert!(validate_rewrite(&value).is_ok());
    }

    #[test]
    fn test_rewrite_missing_text_fails() {
        let value = json!({"new_words": []});
        let violations = validate_rewrite(&value).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "rewritten_text");
    }

    #[test]
    fn test_rewrite_non_array_words_fails() {
        let value = json!({"rewritten_text": "x", "new_words": "serene"});
        assert!(validate_rewrite(&value).is_err());
    }

    #[test]
    fn test_rewrite_word_missing_meaning_fails() {
        let value = json!({
            "rewritten_text": "x",
            "new_words": [{"english_word": "serene"}]
        });
        let violations = validate_rewrite(&value).unwrap_err();
        assert_eq!(violations[0].field, "new_words[0].turkish_meaning");
    }

    #[test]
    fn test_rewrite_non_object_fails() {
        let violations = validate_rewrite(&json!("Hello")).unwrap_err();
        assert_eq!(violations[0].field, "$");
    }

    fn upgrade_reply() -> Value {
        json!({
            "rewritten_text": "Yesterday, I visited the local park.",
            "grammar_corrections": [
                {"original": "to park", "corrected": "to the park", "explanation": "Missing article"}
            ],
            "new_words": [
                {"english_word": "serene", "turkish_meaning": "huzurlu"}
            ],
            "writing_tips": ["Use articles correctly."],
            "strengths": ["Clear meaning."],
            "weaknesses": ["Limited vocabulary."],
            "overall_feedback": "Clear but basic."
        })
    }

    #[test]
    fn test_upgrade_full_object_passes() {
        assert!(validate_upgrade(&upgrade_reply()).is_ok());
    }

    #[test]
    fn test_upgrade_each_missing_key_fails() {
        for key in [
            "rewritten_text",
            "grammar_corrections",
            "new_words",
            "writing_tips",
            "strengths",
            "weaknesses",
            "overall_feedback",
        ] {
            let mut value = upgrade_reply();
            value.as_object_mut().unwrap().remove(key);
            assert!(validate_upgrade(&value).is_err(), "missing {} passed", key);
        }
    }

    #[test]
    fn test_upgrade_non_string_tip_fails() {
        let mut value = upgrade_reply();
        value["writing_tips"] = json!(["Use articles correctly.", 42]);
        let violations = validate_upgrade(&value).unwrap_err();
        assert_eq!(violations[0].field, "writing_tips[1]");
    }
}
