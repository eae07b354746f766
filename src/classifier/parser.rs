// Defensive parsing of classifier output
//
// Models wrap JSON in markdown fences or add a sentence before/after it.
// Strip that, then deserialize strictly: a missing field or an out-of-enum
// value is an error, never a guess.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::error::Category as JsonErrorKind;

use super::types::Classification;
use crate::errors::TriageError;

/// Matches ``` and ```json fence markers anywhere in the output
static FENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json|JSON)?").expect("Failed to compile fence regex"));

/// Parse raw model output into a validated Classification
///
/// Each `{` is tried in turn as the start of the object; the first one that
/// deserializes wins and anything after it is ignored. Braces in the
/// surrounding prose therefore never hide a valid answer.
pub fn parse_classification(raw: &str) -> Result<Classification, TriageError> {
    let defenced = FENCE_REGEX.replace_all(raw, "");
    let text = defenced.trim();

    if text.is_empty() {
        return Err(TriageError::MalformedClassifierOutput(
            "empty response".to_string(),
        ));
    }

    let mut first_error: Option<serde_json::Error> = None;
    for (start, _) in text.match_indices('{') {
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<Classification>();
        match stream.next() {
            Some(Ok(classification)) => {
                classification
                    .validate()
                    .map_err(TriageError::MalformedClassifierOutput)?;
                return Ok(classification);
            }
            Some(Err(e)) => {
                // Well-formed JSON of the wrong shape names the real problem
                // (bad enum value, missing field); prefer it over prose noise
                let replace = match &first_error {
                    None => true,
                    Some(prev) => {
                        e.classify() == JsonErrorKind::Data && prev.classify() != JsonErrorKind::Data
                    }
                };
                if replace {
                    first_error = Some(e);
                }
            }
            None => {}
        }
    }

    let reason = match first_error {
        Some(e) => e.to_string(),
        None => "no JSON object".to_string(),
    };
    Err(TriageError::MalformedClassifierOutput(format!(
        "{} in output: {}",
        reason,
        preview(raw)
    )))
}

fn preview(raw: &str) -> String {
    const LIMIT: usize = 200;
    let mut out: String = raw.chars().take(LIMIT).collect();
    if raw.chars().count() > LIMIT {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::types::{Category, Department, Priority, TicketType};
    use crate::language::Language;

    const VALID: &str = r#"{
        "department": "IT_SUPPORT",
        "priority": "MEDIUM",
        "type": "REQUEST",
        "category": "password_reset",
        "language": "ru",
        "summary": "Сброс пароля",
        "is_auto_solvable": true,
        "confidence": 0.92
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let c = parse_classification(VALID).unwrap();
        assert_eq!(c.department, Department::ItSupport);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.ticket_type, TicketType::Request);
        assert_eq!(c.category, Category::PasswordReset);
        assert_eq!(c.language, Language::Ru);
        assert!(c.is_auto_solvable);
    }

    #[test]
    fn test_parse_fenced_json_with_prose() {
        let raw = format!("Here is the result:\n```json\n{}\n```\nHope this helps.", VALID);
        let c = parse_classification(&raw).unwrap();
        assert_eq!(c.category, Category::PasswordReset);
    }

    #[test]
    fn test_braces_in_trailing_prose_are_ignored() {
        let raw = format!(
            "```json\n{}\n```\nПоля в {{фигурных скобках}} заполнены.",
            VALID
        );
        let c = parse_classification(&raw).unwrap();
        assert_eq!(c.department, Department::ItSupport);
    }

    #[test]
    fn test_braces_in_leading_prose_are_skipped() {
        let raw = format!("Ответ в формате {{JSON}}:\n{}", VALID);
        let c = parse_classification(&raw).unwrap();
        assert_eq!(c.category, Category::PasswordReset);
    }

    #[test]
    fn test_out_of_enum_value_is_reported_over_prose() {
        let raw = format!("Ответ в формате {{JSON}}:\n{}", VALID.replace("MEDIUM", "URGENT"));
        match parse_classification(&raw).unwrap_err() {
            TriageError::MalformedClassifierOutput(msg) => assert!(msg.contains("URGENT")),
            other => panic!("expected malformed output, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_out_of_enum_department() {
        let raw = VALID.replace("IT_SUPPORT", "FINANCE");
        let err = parse_classification(&raw).unwrap_err();
        assert!(matches!(err, TriageError::MalformedClassifierOutput(_)));
    }

    #[test]
    fn test_rejects_missing_field() {
        let raw = VALID.replace("\"is_auto_solvable\": true,", "");
        assert!(parse_classification(&raw).is_err());
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(parse_classification("I cannot classify this ticket.").is_err());
        assert!(parse_classification("   ").is_err());
    }

    #[test]
    fn test_rejects_overlong_summary() {
        let raw = VALID.replace("Сброс пароля", &"x".repeat(101));
        assert!(parse_classification(&raw).is_err());
    }
}
