// Prompt templates and generation profiles for each classifier operation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::language::Language;

/// Sampling settings for one kind of request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProfile {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationProfile {
    /// Low variance: the answer must be a stable JSON verdict
    pub const CLASSIFY: GenerationProfile = GenerationProfile {
        temperature: 0.1,
        max_tokens: 500,
    };

    /// Creative: a draft reply the operator edits
    pub const OPERATOR_REPLY: GenerationProfile = GenerationProfile {
        temperature: 0.7,
        max_tokens: 1000,
    };

    pub const TRANSLATE: GenerationProfile = GenerationProfile {
        temperature: 0.3,
        max_tokens: 2000,
    };

    pub const SUMMARIZE: GenerationProfile = GenerationProfile {
        temperature: 0.5,
        max_tokens: 500,
    };
}

/// Languages a text can be translated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationTarget {
    Kk,
    #[default]
    Ru,
    En,
}

impl TranslationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationTarget::Kk => "kk",
            TranslationTarget::Ru => "ru",
            TranslationTarget::En => "en",
        }
    }

    /// Language name as used inside the (Russian) translation prompt
    fn prompt_name(&self) -> &'static str {
        match self {
            TranslationTarget::Kk => "казахский",
            TranslationTarget::Ru => "русский",
            TranslationTarget::En => "английский",
        }
    }
}

impl fmt::Display for TranslationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kk" => Ok(TranslationTarget::Kk),
            "ru" => Ok(TranslationTarget::Ru),
            "en" => Ok(TranslationTarget::En),
            other => Err(format!(
                "unsupported target language '{}', expected one of: kk, ru, en",
                other
            )),
        }
    }
}

const CLASSIFICATION_INSTRUCTIONS: &str = r#"Ты - интеллектуальная система маршрутизации Help Desk.

ЗАДАЧА: Проанализируй обращение пользователя и верни JSON с классификацией.

ДЕПАРТАМЕНТЫ:
- IT_INFRASTRUCTURE: серверы, сети, VPN, инфраструктура
- IT_SUPPORT: пароли, email, рабочие станции, принтеры
- SOFTWARE_DEV: баги, новые функции, API, базы данных
- HR_IT: онбординг, доступы для новых сотрудников
- SECURITY: безопасность, фишинг, вирусы, инциденты безопасности

ПРИОРИТЕТЫ:
- LOW: типовые вопросы, не срочные
- MEDIUM: влияет на работу пользователя
- HIGH: блокирует работу, влияет на несколько человек
- CRITICAL: массовые проблемы, безопасность, продакшн

ТИПЫ:
- QUESTION: вопрос
- INCIDENT: проблема, требующая решения
- REQUEST: запрос на доступ/ПО/оборудование
- CHANGE: изменение конфигурации

КАТЕГОРИИ ТИПОВЫХ ИНЦИДЕНТОВ:
- password_reset
- vpn_access
- email_setup
- printer_issue
- software_install
- other

Отвечай ТОЛЬКО валидным JSON без дополнительного текста:
{
  "department": "код_департамента",
  "priority": "уровень",
  "type": "тип",
  "category": "категория или other",
  "language": "kk или ru",
  "summary": "краткое резюме на языке обращения (макс 100 символов)",
  "is_auto_solvable": true/false,
  "confidence": 0.0-1.0
}"#;

pub fn classification_prompt(ticket: &str, language: Language) -> String {
    format!(
        "{}\n\nЯЗЫК ОБРАЩЕНИЯ (определён автоматически): {}\n\nОБРАЩЕНИЕ:\n{}",
        CLASSIFICATION_INSTRUCTIONS, language, ticket
    )
}

pub fn operator_reply_prompt(ticket: &str, language: Language) -> String {
    match language {
        Language::Kk => format!(
            "Сіз Help Desk операторының көмекшісісіз. Келесі сұрауға профессионалды жауап жазыңыз:\n\n{}\n\nЖауап тек қазақ тілінде болуы керек.",
            ticket
        ),
        Language::Ru => format!(
            "Ты помощник оператора Help Desk. Составь профессиональный ответ на следующий запрос:\n\n{}\n\nОтвет должен быть только на русском языке.",
            ticket
        ),
    }
}

pub fn translation_prompt(text: &str, target: TranslationTarget) -> String {
    format!(
        "Переведи следующий текст на {} язык. Верни ТОЛЬКО перевод без комментариев:\n\n{}",
        target.prompt_name(),
        text
    )
}

pub fn summary_prompt(conversation: &str, language: Language) -> String {
    match language {
        Language::Kk => format!(
            "Келесі қолдау диалогын қысқаша түйіндеңіз (3-5 сөйлем):\n\n{}\n\nТүйін тек қазақ тілінде болуы керек.",
            conversation
        ),
        Language::Ru => format!(
            "Составь краткое резюме следующего диалога поддержки (3-5 предложений):\n\n{}\n\nРезюме должно быть только на русском языке.",
            conversation
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_embeds_ticket_and_schema() {
        let prompt = classification_prompt("Не работает VPN", Language::Ru);
        assert!(prompt.contains("Не работает VPN"));
        assert!(prompt.contains("\"is_auto_solvable\""));
        assert!(prompt.contains("password_reset"));
    }

    #[test]
    fn test_reply_prompt_follows_language() {
        assert!(operator_reply_prompt("x", Language::Kk).contains("қазақ тілінде"));
        assert!(operator_reply_prompt("x", Language::Ru).contains("на русском языке"));
    }

    #[test]
    fn test_translation_target_parsing() {
        assert_eq!("EN".parse::<TranslationTarget>().unwrap(), TranslationTarget::En);
        assert!("de".parse::<TranslationTarget>().is_err());
        assert!(translation_prompt("hi", TranslationTarget::Kk).contains("казахский"));
    }
}
