// Metrics aggregator
//
// Owns the single metrics state for the process. Every mutation takes the
// write lock for its whole duration, so readers never observe a half-applied
// ticket (e.g. auto_resolved bumped but total_tickets not yet). None of the
// operations here await.

use chrono::{DateTime, Duration, Local, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use super::analytics::{within_sla, CostModel, CostSavings, SlaCompliance};
use super::error_log::{ErrorLog, ErrorLogEntry};
use super::history::{TicketHistory, TicketRecord};
use super::types::{ErrorReport, HourlyBucket, Period, TicketOutcome};
use crate::classifier::{Department, Priority};
use crate::errors::TriageError;
use crate::language::Language;

/// Counters shared by the lifetime state and windowed recomputation
#[derive(Debug, Clone)]
struct Totals {
    total_tickets: u64,
    auto_resolved: u64,
    escalated: u64,
    by_department: BTreeMap<Department, u64>,
    by_priority: BTreeMap<Priority, u64>,
    by_language: BTreeMap<Language, u64>,
    avg_confidence: f64,
    response_time_sum_ms: u128,
    sla_within_target: BTreeMap<Priority, u64>,
    classification_errors: u64,
    hourly: BTreeMap<u32, HourlyBucket>,
}

impl Totals {
    fn new() -> Self {
        Self {
            total_tickets: 0,
            auto_resolved: 0,
            escalated: 0,
            by_department: Department::ALL.iter().map(|d| (*d, 0)).collect(),
            by_priority: Priority::ALL.iter().map(|p| (*p, 0)).collect(),
            by_language: Language::ALL.iter().map(|l| (*l, 0)).collect(),
            avg_confidence: 0.0,
            response_time_sum_ms: 0,
            sla_within_target: Priority::ALL.iter().map(|p| (*p, 0)).collect(),
            classification_errors: 0,
            hourly: BTreeMap::new(),
        }
    }

    fn add(&mut self, record: &TicketRecord) {
        self.total_tickets += 1;
        if record.auto_resolved {
            self.auto_resolved += 1;
        } else {
            self.escalated += 1;
        }

        *self.by_department.entry(record.department).or_insert(0) += 1;
        *self.by_priority.entry(record.priority).or_insert(0) += 1;
        *self.by_language.entry(record.language).or_insert(0) += 1;

        // Running mean over n samples: (m * (n - 1) + c) / n
        let n = self.total_tickets as f64;
        self.avg_confidence = (self.avg_confidence * (n - 1.0) + record.confidence) / n;

        self.response_time_sum_ms += u128::from(record.response_time_ms);
        if within_sla(record.priority, record.response_time_ms) {
            *self.sla_within_target.entry(record.priority).or_insert(0) += 1;
        }

        let bucket = self.hourly.entry(record.recorded_at.hour()).or_default();
        bucket.count += 1;
        if record.auto_resolved {
            bucket.auto_resolved += 1;
        }
    }

    fn check_invariants(&self) -> Result<(), String> {
        if self.auto_resolved + self.escalated != self.total_tickets {
            return Err(format!(
                "auto_resolved ({}) + escalated ({}) != total_tickets ({})",
                self.auto_resolved, self.escalated, self.total_tickets
            ));
        }
        for (name, sum) in [
            ("by_department", self.by_department.values().sum::<u64>()),
            ("by_priority", self.by_priority.values().sum::<u64>()),
            ("by_language", self.by_language.values().sum::<u64>()),
            ("hourly", self.hourly.values().map(|b| b.count).sum::<u64>()),
        ] {
            if sum != self.total_tickets {
                return Err(format!(
                    "{} sums to {} but total_tickets is {}",
                    name, sum, self.total_tickets
                ));
            }
        }
        // Slack for rounding in the running mean
        if !(-1e-9..=1.0 + 1e-9).contains(&self.avg_confidence) {
            return Err(format!("avg_confidence {} outside [0, 1]", self.avg_confidence));
        }
        Ok(())
    }

    /// Department with the most tickets; ties go to the smallest code
    fn top_department(&self) -> Option<Department> {
        if self.total_tickets == 0 {
            return None;
        }
        self.by_department
            .iter()
            .filter(|(_, count)| **count > 0)
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.as_str().cmp(a.as_str())))
            .map(|(department, _)| *department)
    }
}

struct MetricsState {
    lifetime: Totals,
    malformed_outputs: u64,
    history: TicketHistory,
}

/// Summary counters and rates
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_tickets: u64,
    pub auto_resolved: u64,
    pub escalated: u64,
    /// auto_resolved / total_tickets, 0 without tickets
    pub auto_resolution_rate: f64,
    pub avg_confidence: f64,
    pub avg_response_time_ms: f64,
    pub classification_errors: u64,
    /// 1 - classification_errors / total_tickets, 0 without tickets, not clamped
    pub classification_accuracy: f64,
    /// False when more errors were reported than tickets recorded
    pub accuracy_reliable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    pub by_department: BTreeMap<Department, u64>,
    pub by_priority: BTreeMap<Priority, u64>,
    pub by_language: BTreeMap<Language, u64>,
    pub top_department: Option<Department>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    /// Classifier answers that could not be parsed; not human error reports
    pub malformed_classifier_outputs: u64,
    pub history_retained: usize,
    pub history_capacity: usize,
}

/// Read-only projection of the metrics state
#[derive(Debug, Clone, Serialize)]
pub struct MetricsView {
    pub period: Period,
    pub summary: Summary,
    pub breakdown: Breakdown,
    pub hourly_distribution: BTreeMap<u32, HourlyBucket>,
    pub sla_compliance: BTreeMap<Priority, SlaCompliance>,
    pub cost_savings: CostSavings,
    pub diagnostics: Diagnostics,
}

/// Process-wide metrics aggregator
pub struct MetricsAggregator {
    state: RwLock<MetricsState>,
    cost: CostModel,
    error_log: Option<ErrorLog>,
}

impl MetricsAggregator {
    pub fn new(history_capacity: usize, cost: CostModel) -> Self {
        Self {
            state: RwLock::new(MetricsState {
                lifetime: Totals::new(),
                malformed_outputs: 0,
                history: TicketHistory::new(history_capacity),
            }),
            cost,
            error_log: None,
        }
    }

    /// Also append error reports to a JSONL log
    pub fn with_error_log(mut self, error_log: ErrorLog) -> Self {
        self.error_log = Some(error_log);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, MetricsState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MetricsState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one triaged ticket
    pub fn record(&self, outcome: &TicketOutcome) -> Result<(), TriageError> {
        outcome
            .classification
            .validate()
            .map_err(TriageError::AggregatorInvariantViolation)?;

        let record = TicketRecord::from(outcome);
        let mut state = self.write();
        state.lifetime.add(&record);
        state.history.push(record);

        if let Err(violation) = state.lifetime.check_invariants() {
            tracing::error!(%violation, "Metrics invariant violated");
            return Err(TriageError::AggregatorInvariantViolation(violation));
        }

        tracing::debug!(
            ticket_id = %outcome.ticket_id,
            total_tickets = state.lifetime.total_tickets,
            auto_resolved = outcome.auto_resolved,
            "Recorded ticket"
        );
        Ok(())
    }

    /// Record a human-reported misclassification
    ///
    /// Returns whether the report matched a ticket still held in history.
    pub fn record_classification_error(&self, report: &ErrorReport) -> Result<bool, TriageError> {
        report.validate().map_err(TriageError::Validation)?;

        let reported_at = Local::now();
        let linked = {
            let mut state = self.write();
            state.lifetime.classification_errors += 1;
            state.history.push_error_report(reported_at);
            Uuid::parse_str(report.ticket_id.trim())
                .map(|id| state.history.contains(&id))
                .unwrap_or(false)
        };

        tracing::warn!(
            ticket_id = %report.ticket_id,
            predicted = %report.predicted_department,
            actual = %report.actual_department,
            reason = %report.reason,
            linked,
            "Classification error reported"
        );

        if let Some(log) = &self.error_log {
            let entry = ErrorLogEntry {
                reported_at,
                report: report.clone(),
                linked,
            };
            if let Err(e) = log.append(&entry) {
                tracing::warn!(error = %e, path = %log.path().display(), "Failed to append error report");
            }
        }

        Ok(linked)
    }

    /// Count a classifier answer that could not be parsed
    pub fn record_malformed_output(&self) {
        let mut state = self.write();
        state.malformed_outputs += 1;
        tracing::debug!(
            malformed_outputs = state.malformed_outputs,
            "Recorded malformed classifier output"
        );
    }

    /// Project the current state for a reporting period
    pub fn snapshot(&self, period: Period) -> MetricsView {
        let state = self.read();
        let now = Local::now();

        let totals = match period {
            Period::All => state.lifetime.clone(),
            Period::Today => windowed(&state.history, start_of_day(now)),
            Period::Week => windowed(&state.history, now - Duration::days(7)),
        };

        let diagnostics = Diagnostics {
            malformed_classifier_outputs: state.malformed_outputs,
            history_retained: state.history.len(),
            history_capacity: state.history.capacity(),
        };
        drop(state);

        self.view(period, &totals, diagnostics)
    }

    fn view(&self, period: Period, totals: &Totals, diagnostics: Diagnostics) -> MetricsView {
        let total = totals.total_tickets;
        let ratio = |n: u64| if total > 0 { n as f64 / total as f64 } else { 0.0 };

        let summary = Summary {
            total_tickets: total,
            auto_resolved: totals.auto_resolved,
            escalated: totals.escalated,
            auto_resolution_rate: ratio(totals.auto_resolved),
            avg_confidence: totals.avg_confidence,
            avg_response_time_ms: if total > 0 {
                totals.response_time_sum_ms as f64 / total as f64
            } else {
                0.0
            },
            classification_errors: totals.classification_errors,
            classification_accuracy: if total > 0 {
                1.0 - ratio(totals.classification_errors)
            } else {
                0.0
            },
            accuracy_reliable: totals.classification_errors <= total,
        };

        let sla_compliance = Priority::ALL
            .iter()
            .map(|p| {
                let tickets = totals.by_priority.get(p).copied().unwrap_or(0);
                let within = totals.sla_within_target.get(p).copied().unwrap_or(0);
                (*p, SlaCompliance::new(*p, tickets, within))
            })
            .collect();

        MetricsView {
            period,
            summary,
            breakdown: Breakdown {
                by_department: totals.by_department.clone(),
                by_priority: totals.by_priority.clone(),
                by_language: totals.by_language.clone(),
                top_department: totals.top_department(),
            },
            hourly_distribution: totals.hourly.clone(),
            sla_compliance,
            cost_savings: self.cost.savings(totals.auto_resolved, totals.escalated),
            diagnostics,
        }
    }
}

fn windowed(history: &TicketHistory, cutoff: DateTime<Local>) -> Totals {
    let mut totals = Totals::new();
    for record in history.since(cutoff) {
        totals.add(record);
    }
    totals.classification_errors = history.error_reports_since(cutoff);
    totals
}

fn start_of_day(now: DateTime<Local>) -> DateTime<Local> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
        .unwrap_or_else(|| now - Duration::hours(i64::from(now.hour())))
}
