// Classification data types

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum summary length, counted in characters
pub const MAX_SUMMARY_CHARS: usize = 100;

/// Department queue a ticket can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    ItInfrastructure,
    ItSupport,
    SoftwareDev,
    HrIt,
    Security,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::ItInfrastructure,
        Department::ItSupport,
        Department::SoftwareDev,
        Department::HrIt,
        Department::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::ItInfrastructure => "IT_INFRASTRUCTURE",
            Department::ItSupport => "IT_SUPPORT",
            Department::SoftwareDev => "SOFTWARE_DEV",
            Department::HrIt => "HR_IT",
            Department::Security => "SECURITY",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket urgency, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Most urgent first, the order SLA targets are reported in
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }

    /// Parse a priority code, `None` for anything outside the enum
    pub fn from_code(code: &str) -> Option<Priority> {
        match code.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Priority::Low),
            "MEDIUM" => Some(Priority::Medium),
            "HIGH" => Some(Priority::High),
            "CRITICAL" => Some(Priority::Critical),
            _ => None,
        }
    }

    /// SLA response target in minutes
    pub fn sla_target_minutes(&self) -> u64 {
        match self {
            Priority::Critical => 15,
            Priority::High => 60,
            Priority::Medium => 240,
            Priority::Low => 1440,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    Question,
    Incident,
    Request,
    Change,
}

/// Known-issue category; only these have knowledge base entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PasswordReset,
    VpnAccess,
    EmailSetup,
    PrinterIssue,
    SoftwareInstall,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PasswordReset => "password_reset",
            Category::VpnAccess => "vpn_access",
            Category::EmailSetup => "email_setup",
            Category::PrinterIssue => "printer_issue",
            Category::SoftwareInstall => "software_install",
            Category::Other => "other",
        }
    }
}

/// Structured triage result for one ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub department: Department,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub category: Category,
    pub language: Language,
    pub summary: String,
    pub is_auto_solvable: bool,
    pub confidence: f64,
}

impl Classification {
    /// Check the constraints serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence {} outside [0.0, 1.0]",
                self.confidence
            ));
        }
        let summary_len = self.summary.chars().count();
        if summary_len > MAX_SUMMARY_CHARS {
            return Err(format!(
                "summary is {} characters, limit is {}",
                summary_len, MAX_SUMMARY_CHARS
            ));
        }
        Ok(())
    }
}
