// Metrics module
// Public interface for ticket metrics and derived analytics

mod aggregator;
mod analytics;
mod error_log;
mod exposition;
mod history;
mod types;

pub use aggregator::{Breakdown, Diagnostics, MetricsAggregator, MetricsView, Summary};
pub use analytics::{within_sla, CostModel, CostSavings, SlaCompliance};
pub use error_log::{ErrorLog, ErrorLogEntry};
pub use exposition::render as render_prometheus;
pub use history::{TicketHistory, TicketRecord};
pub use types::{ErrorReport, HourlyBucket, Period, TicketOutcome};
