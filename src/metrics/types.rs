// Metrics data types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::classifier::Classification;

/// One triaged ticket, fed into the aggregator once its route is known
#[derive(Debug, Clone)]
pub struct TicketOutcome {
    pub ticket_id: Uuid,
    pub classification: Classification,
    pub auto_resolved: bool,
    /// Pipeline latency in milliseconds
    pub response_time_ms: u64,
    pub recorded_at: DateTime<Local>,
}

impl TicketOutcome {
    /// Outcome stamped with a fresh ticket id and the current local time
    pub fn new(classification: Classification, auto_resolved: bool, response_time_ms: u64) -> Self {
        Self {
            ticket_id: Uuid::new_v4(),
            classification,
            auto_resolved,
            response_time_ms,
            recorded_at: Local::now(),
        }
    }
}

/// Human-reported misclassification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    #[serde(alias = "ticketId")]
    pub ticket_id: String,
    #[serde(alias = "predictedDepartment")]
    pub predicted_department: String,
    #[serde(alias = "actualDepartment")]
    pub actual_department: String,
    #[serde(default)]
    pub reason: String,
}

impl ErrorReport {
    /// Reject reports missing the fields needed for review
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("ticket_id", &self.ticket_id),
            ("predicted_department", &self.predicted_department),
            ("actual_department", &self.actual_department),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", field));
            }
        }
        Ok(())
    }
}

/// Reporting window for a metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Whole process lifetime, served from running totals
    #[default]
    All,
    /// Since local midnight
    Today,
    /// Last seven days
    Week,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Today => "today",
            Period::Week => "week",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Period::All),
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            other => Err(format!(
                "unknown period '{}', expected one of: all, today, week",
                other
            )),
        }
    }
}

/// Per-hour ticket counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub count: u64,
    pub auto_resolved: u64,
}
