// Prometheus text exposition of a metrics snapshot

use anyhow::{Context, Result};
use prometheus::{Encoder, Gauge, GaugeVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use super::aggregator::MetricsView;

const NAMESPACE: &str = "helpdesk";

fn counter(registry: &Registry, name: &str, help: &str, value: u64) -> Result<()> {
    let metric = IntCounter::with_opts(Opts::new(name, help))?;
    metric.inc_by(value);
    registry.register(Box::new(metric))?;
    Ok(())
}

fn gauge(registry: &Registry, name: &str, help: &str, value: f64) -> Result<()> {
    let metric = Gauge::with_opts(Opts::new(name, help))?;
    metric.set(value);
    registry.register(Box::new(metric))?;
    Ok(())
}

fn labeled_counter<'a>(
    registry: &Registry,
    name: &str,
    help: &str,
    label: &str,
    values: impl IntoIterator<Item = (&'a str, u64)>,
) -> Result<()> {
    let metric = IntCounterVec::new(Opts::new(name, help), &[label])?;
    for (key, value) in values {
        metric.with_label_values(&[key]).inc_by(value);
    }
    registry.register(Box::new(metric))?;
    Ok(())
}

/// Render a lifetime snapshot in Prometheus text format
pub fn render(view: &MetricsView) -> Result<String> {
    let registry = Registry::new_custom(Some(NAMESPACE.to_string()), None)?;
    let summary = &view.summary;

    counter(&registry, "tickets_total", "Tickets triaged", summary.total_tickets)?;
    counter(
        &registry,
        "tickets_auto_resolved_total",
        "Tickets answered from the knowledge base",
        summary.auto_resolved,
    )?;
    counter(
        &registry,
        "tickets_escalated_total",
        "Tickets routed to a department queue",
        summary.escalated,
    )?;
    counter(
        &registry,
        "classification_errors_total",
        "Human-reported misclassifications",
        summary.classification_errors,
    )?;
    counter(
        &registry,
        "malformed_classifier_outputs_total",
        "Classifier answers that could not be parsed",
        view.diagnostics.malformed_classifier_outputs,
    )?;

    gauge(
        &registry,
        "avg_confidence",
        "Mean classifier confidence",
        summary.avg_confidence,
    )?;
    gauge(
        &registry,
        "avg_response_time_milliseconds",
        "Mean triage latency",
        summary.avg_response_time_ms,
    )?;
    gauge(
        &registry,
        "classification_accuracy",
        "1 - errors / tickets",
        summary.classification_accuracy,
    )?;

    labeled_counter(
        &registry,
        "tickets_by_department_total",
        "Tickets per department",
        "department",
        view.breakdown
            .by_department
            .iter()
            .map(|(d, n)| (d.as_str(), *n)),
    )?;
    labeled_counter(
        &registry,
        "tickets_by_priority_total",
        "Tickets per priority",
        "priority",
        view.breakdown.by_priority.iter().map(|(p, n)| (p.as_str(), *n)),
    )?;
    labeled_counter(
        &registry,
        "tickets_by_language_total",
        "Tickets per language",
        "language",
        view.breakdown.by_language.iter().map(|(l, n)| (l.as_str(), *n)),
    )?;

    let sla = GaugeVec::new(
        Opts::new("sla_compliance_percent", "Tickets answered within SLA target"),
        &["priority"],
    )?;
    for (priority, compliance) in &view.sla_compliance {
        if let Some(percent) = compliance.compliance_percent {
            sla.with_label_values(&[priority.as_str()]).set(percent);
        }
    }
    registry.register(Box::new(sla))?;

    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Metrics output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Category, Classification, Department, Priority, TicketType};
    use crate::language::Language;
    use crate::metrics::{CostModel, MetricsAggregator, Period, TicketOutcome};

    #[test]
    fn test_render_contains_counters_and_labels() {
        let agg = MetricsAggregator::new(10, CostModel::default());
        agg.record(&TicketOutcome::new(
            Classification {
                department: Department::Security,
                priority: Priority::Critical,
                ticket_type: TicketType::Incident,
                category: Category::Other,
                language: Language::Kk,
                summary: "Фишинг".to_string(),
                is_auto_solvable: false,
                confidence: 0.9,
            },
            false,
            500,
        ))
        .unwrap();

        let text = render(&agg.snapshot(Period::All)).unwrap();
        assert!(text.contains("helpdesk_tickets_total 1"));
        assert!(text.contains("helpdesk_tickets_escalated_total 1"));
        assert!(text.contains(r#"helpdesk_tickets_by_department_total{department="SECURITY"} 1"#));
        assert!(text.contains(r#"helpdesk_tickets_by_language_total{language="kk"} 1"#));
        assert!(text.contains(r#"helpdesk_sla_compliance_percent{priority="CRITICAL"} 100"#));
    }
}
