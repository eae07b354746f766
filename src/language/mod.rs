// Ticket language tagging
//
// Tickets arrive in Kazakh or Russian. Kazakh shares the Cyrillic alphabet
// with Russian but adds letters Russian never uses, so one of those letters
// anywhere in the text is enough to tag it as Kazakh.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letters present in the Kazakh alphabet but absent from Russian
const KAZAKH_LETTERS: &[char] = &[
    'Ә', 'ә', 'І', 'і', 'Ң', 'ң', 'Ғ', 'ғ', 'Ү', 'ү', 'Ұ', 'ұ', 'Қ', 'қ', 'Ө', 'ө', 'Һ', 'һ',
];

/// Language tag of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Kk,
    Ru,
}

impl Language {
    /// Every language the service accepts, in reporting order
    pub const ALL: [Language; 2] = [Language::Kk, Language::Ru];

    /// Fallback when no language-specific letters are found
    pub const DEFAULT: Language = Language::Ru;

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Kk => "kk",
            Language::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kk" => Ok(Language::Kk),
            "ru" => Ok(Language::Ru),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Tag text with its language. Total and O(n) in the text length.
pub fn detect(text: &str) -> Language {
    if text.chars().any(|c| KAZAKH_LETTERS.contains(&c)) {
        Language::Kk
    } else {
        Language::DEFAULT
    }
}
