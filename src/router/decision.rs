// Routing decision logic
//
// A classified ticket is either answered from the knowledge base or handed to
// a department queue. Auto-resolution needs all three: the model claims the
// ticket is auto-solvable, the category is a known one, and the knowledge
// base has an entry in the ticket's language. Anything else escalates.
// The ticket's language is the detected one, passed alongside the
// classification; the classification itself is never altered.

use crate::classifier::{Category, Classification, Department, Priority};
use crate::knowledge;
use crate::language::Language;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    AutoResolved {
        solution: String,
        language: Language,
        classification: Classification,
    },
    Escalated {
        assigned_department: Department,
        estimated_response: String,
        language: Language,
        classification: Classification,
    },
}

impl RouteDecision {
    pub fn classification(&self) -> &Classification {
        match self {
            RouteDecision::AutoResolved { classification, .. } => classification,
            RouteDecision::Escalated { classification, .. } => classification,
        }
    }

    /// Language the ticket is answered in
    pub fn language(&self) -> Language {
        match self {
            RouteDecision::AutoResolved { language, .. } => *language,
            RouteDecision::Escalated { language, .. } => *language,
        }
    }

    pub fn is_auto_resolved(&self) -> bool {
        matches!(self, RouteDecision::AutoResolved { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteDecision::AutoResolved { .. } => "auto_resolved",
            RouteDecision::Escalated { .. } => "escalated",
        }
    }

    /// User-facing status line in the ticket's language
    pub fn message(&self) -> String {
        match self {
            RouteDecision::AutoResolved { language, .. } => match language {
                Language::Kk => "✅ Сіздің сұрауыңыз автоматты түрде шешілді".to_string(),
                Language::Ru => "✅ Ваш запрос решен автоматически".to_string(),
            },
            RouteDecision::Escalated {
                assigned_department,
                language,
                ..
            } => match language {
                Language::Kk => format!("📋 Тикет {} бөліміне бағытталды", assigned_department),
                Language::Ru => format!("📋 Тикет направлен в отдел {}", assigned_department),
            },
        }
    }
}

/// Decide between auto-resolution and escalation for a classified ticket
/// written in `language`
pub fn decide(classification: Classification, language: Language) -> RouteDecision {
    if classification.is_auto_solvable && classification.category != Category::Other {
        if let Some(solution) = knowledge::lookup(classification.category, language) {
            tracing::info!(
                category = classification.category.as_str(),
                language = %language,
                "Routing decision: AUTO_RESOLVED"
            );
            return RouteDecision::AutoResolved {
                solution: solution.to_string(),
                language,
                classification,
            };
        }
        tracing::debug!(
            category = classification.category.as_str(),
            "Auto-solvable claimed but no knowledge base entry, escalating"
        );
    }

    tracing::info!(
        department = %classification.department,
        priority = %classification.priority,
        "Routing decision: ESCALATED"
    );
    RouteDecision::Escalated {
        assigned_department: classification.department,
        estimated_response: estimated_response(classification.priority, language).to_string(),
        language,
        classification,
    }
}

/// Expected first-response time for a priority, localized
pub fn estimated_response(priority: Priority, language: Language) -> &'static str {
    match (priority, language) {
        (Priority::Critical, _) => "15 минут",
        (Priority::High, Language::Ru) => "1 час",
        (Priority::High, Language::Kk) => "1 сағат",
        (Priority::Medium, Language::Ru) => "4 часа",
        (Priority::Medium, Language::Kk) => "4 сағат",
        (Priority::Low, Language::Ru) => "24 часа",
        (Priority::Low, Language::Kk) => "24 сағат",
    }
}

/// Same as `estimated_response` for a raw priority code, for callers holding
/// priorities outside the typed pipeline (stored or imported tickets).
/// Unknown codes get the LOW label.
pub fn estimated_response_for_code(code: &str, language: Language) -> &'static str {
    let priority = Priority::from_code(code).unwrap_or(Priority::Low);
    estimated_response(priority, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TicketType;

    fn classification(category: Category, auto: bool, language: Language) -> Classification {
        Classification {
            department: Department::ItSupport,
            priority: Priority::Medium,
            ticket_type: TicketType::Request,
            category,
            language,
            summary: "Сброс пароля".to_string(),
            is_auto_solvable: auto,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_password_reset_is_auto_resolved() {
        let decision = decide(classification(Category::PasswordReset, true, Language::Ru), Language::Ru);
        match decision {
            RouteDecision::AutoResolved { ref solution, .. } => {
                assert!(solution.contains("portal.company.kz/reset"));
            }
            other => panic!("expected auto resolution, got {:?}", other),
        }
        assert_eq!(decision.message(), "✅ Ваш запрос решен автоматически");
    }

    #[test]
    fn test_other_category_always_escalates() {
        let decision = decide(classification(Category::Other, true, Language::Ru), Language::Ru);
        match decision {
            RouteDecision::Escalated {
                assigned_department,
                ref estimated_response,
                ..
            } => {
                assert_eq!(assigned_department, Department::ItSupport);
                assert_eq!(estimated_response, "4 часа");
            }
            other => panic!("expected escalation, got {:?}", other),
        }
    }

    #[test]
    fn test_not_auto_solvable_escalates() {
        let decision = decide(classification(Category::VpnAccess, false, Language::Kk), Language::Kk);
        assert!(!decision.is_auto_resolved());
        assert_eq!(decision.message(), "📋 Тикет IT_SUPPORT бөліміне бағытталды");
        assert_eq!(decision.as_str(), "escalated");
    }

    #[test]
    fn test_detected_language_drives_answer_and_message() {
        let decision = decide(
            classification(Category::PasswordReset, true, Language::Ru),
            Language::Kk,
        );
        assert_eq!(decision.language(), Language::Kk);
        assert_eq!(decision.classification().language, Language::Ru);
        assert_eq!(decision.message(), "✅ Сіздің сұрауыңыз автоматты түрде шешілді");
        match decision {
            RouteDecision::AutoResolved { ref solution, .. } => {
                assert_eq!(
                    Some(solution.as_str()),
                    knowledge::lookup(Category::PasswordReset, Language::Kk)
                );
            }
            other => panic!("expected auto resolution, got {:?}", other),
        }
    }

    #[test]
    fn test_estimated_response_table() {
        assert_eq!(estimated_response(Priority::Critical, Language::Ru), "15 минут");
        assert_eq!(estimated_response(Priority::High, Language::Ru), "1 час");
        assert_eq!(estimated_response(Priority::Low, Language::Kk), "24 сағат");
    }

    #[test]
    fn test_unknown_priority_code_falls_back_to_low() {
        assert_eq!(estimated_response_for_code("CRITICAL", Language::Ru), "15 минут");
        assert_eq!(estimated_response_for_code("URGENT", Language::Ru), "24 часа");
        assert_eq!(estimated_response_for_code("", Language::Kk), "24 сағат");
    }
}
