// Bounded ticket history for windowed metrics views

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use uuid::Uuid;

use super::types::TicketOutcome;
use crate::classifier::{Department, Priority};
use crate::language::Language;

/// What the history keeps of a recorded ticket
#[derive(Debug, Clone)]
pub struct TicketRecord {
    pub ticket_id: Uuid,
    pub recorded_at: DateTime<Local>,
    pub department: Department,
    pub priority: Priority,
    pub language: Language,
    pub auto_resolved: bool,
    pub confidence: f64,
    pub response_time_ms: u64,
}

impl From<&TicketOutcome> for TicketRecord {
    fn from(outcome: &TicketOutcome) -> Self {
        Self {
            ticket_id: outcome.ticket_id,
            recorded_at: outcome.recorded_at,
            department: outcome.classification.department,
            priority: outcome.classification.priority,
            language: outcome.classification.language,
            auto_resolved: outcome.auto_resolved,
            confidence: outcome.classification.confidence,
            response_time_ms: outcome.response_time_ms,
        }
    }
}

/// Ring buffer of recent tickets and error reports
///
/// Oldest entries are evicted once `capacity` is reached, so windowed views
/// only cover what is still retained.
pub struct TicketHistory {
    tickets: VecDeque<TicketRecord>,
    error_reports: VecDeque<DateTime<Local>>,
    capacity: usize,
}

impl TicketHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tickets: VecDeque::with_capacity(capacity.min(1024)),
            error_reports: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, record: TicketRecord) {
        if self.tickets.len() >= self.capacity {
            self.tickets.pop_front();
        }
        self.tickets.push_back(record);
    }

    pub fn push_error_report(&mut self, at: DateTime<Local>) {
        if self.error_reports.len() >= self.capacity {
            self.error_reports.pop_front();
        }
        self.error_reports.push_back(at);
    }

    /// Whether a ticket with this id is still retained
    pub fn contains(&self, ticket_id: &Uuid) -> bool {
        self.tickets.iter().any(|r| &r.ticket_id == ticket_id)
    }

    /// Tickets recorded at or after `cutoff`, oldest first
    pub fn since(&self, cutoff: DateTime<Local>) -> impl Iterator<Item = &TicketRecord> {
        self.tickets.iter().filter(move |r| r.recorded_at >= cutoff)
    }

    pub fn error_reports_since(&self, cutoff: DateTime<Local>) -> u64 {
        self.error_reports.iter().filter(|at| **at >= cutoff).count() as u64
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
