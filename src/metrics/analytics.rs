// Derived analytics: SLA compliance and cost savings
//
// Computed fresh from aggregator counters on every read.

use serde::{Deserialize, Serialize};

use crate::classifier::Priority;

/// Cost constants used by the savings estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Cost of one ticket handled by a human
    pub manual_ticket_cost: f64,
    /// Cost of one ticket answered from the knowledge base
    pub auto_ticket_cost: f64,
    /// Operator time one ticket takes
    pub minutes_per_ticket: f64,
    pub hours_per_day: f64,
    pub work_days_per_month: f64,
    pub currency: String,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            manual_ticket_cost: 500.0,
            auto_ticket_cost: 50.0,
            minutes_per_ticket: 15.0,
            hours_per_day: 8.0,
            work_days_per_month: 22.0,
            currency: "₸".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSavings {
    pub total_cost: f64,
    pub saved_cost: f64,
    /// Full-time operators freed per month
    pub saved_fte: f64,
    pub monthly_savings: f64,
    pub currency: String,
}

impl CostModel {
    pub fn savings(&self, auto_resolved: u64, escalated: u64) -> CostSavings {
        let total = auto_resolved + escalated;
        let auto = auto_resolved as f64;

        let total_cost = escalated as f64 * self.manual_ticket_cost + auto * self.auto_ticket_cost;
        let saved_cost = auto * (self.manual_ticket_cost - self.auto_ticket_cost);

        let operator_minutes_per_month = self.hours_per_day * 60.0 * self.work_days_per_month;
        let saved_fte = if operator_minutes_per_month > 0.0 {
            auto * self.minutes_per_ticket / operator_minutes_per_month
        } else {
            0.0
        };

        let monthly_savings = if total > 0 {
            saved_cost * 30.0 / total as f64
        } else {
            0.0
        };

        CostSavings {
            total_cost,
            saved_cost,
            saved_fte,
            monthly_savings,
            currency: self.currency.clone(),
        }
    }
}

/// SLA compliance for one priority level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaCompliance {
    pub target_minutes: u64,
    pub tickets: u64,
    pub within_target: u64,
    /// Percentage of tickets answered within target, `None` without tickets
    pub compliance_percent: Option<f64>,
}

impl SlaCompliance {
    pub fn new(priority: Priority, tickets: u64, within_target: u64) -> Self {
        let compliance_percent = if tickets > 0 {
            Some(within_target as f64 / tickets as f64 * 100.0)
        } else {
            None
        };
        Self {
            target_minutes: priority.sla_target_minutes(),
            tickets,
            within_target,
            compliance_percent,
        }
    }
}

/// Whether a response time meets the priority's SLA target
pub fn within_sla(priority: Priority, response_time_ms: u64) -> bool {
    response_time_ms <= priority.sla_target_minutes() * 60_000
}
