// Helpdesk Router - HTTP Server Module
// Ticket intake, metrics and health endpoints

mod error_report_handler;
mod handlers;

pub use handlers::{create_router, health_check, AppError};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::metrics::MetricsAggregator;
use crate::triage::TriageService;

/// Shared state behind every request handler
pub struct HelpdeskServer {
    triage: TriageService,
    config: ServerConfig,
    started_at: Instant,
}

impl HelpdeskServer {
    pub fn new(triage: TriageService, config: ServerConfig) -> Self {
        Self {
            triage,
            config,
            started_at: Instant::now(),
        }
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app = create_router(Arc::new(self)).layer(TraceLayer::new_for_http());

        tracing::info!("Starting helpdesk router on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn triage(&self) -> &TriageService {
        &self.triage
    }

    pub fn metrics(&self) -> &Arc<MetricsAggregator> {
        self.triage.metrics()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
