//! Prometheus metrics for the catalog API

use catalog_authz::Action;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Counters exported at `/metrics`
pub struct ApiMetrics {
    registry: Registry,
    decisions: IntCounterVec,
    responses: IntCounterVec,
}

impl ApiMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let decisions = IntCounterVec::new(
            Opts::new(
                "catalog_authz_decisions_total",
                "Record-level authorization decisions",
            ),
            &["action", "outcome"],
        )?;
        let responses = IntCounterVec::new(
            Opts::new("catalog_http_requests_total", "HTTP responses by status"),
            &["status"],
        )?;

        registry.register(Box::new(decisions.clone()))?;
        registry.register(Box::new(responses.clone()))?;

        Ok(Self {
            registry,
            decisions,
            responses,
        })
    }

    pub fn record_decision(&self, action: Action, allowed: bool) {
        let outcome = if allowed { "allowed" } else { "denied" };
        self.decisions
            .with_label_values(&[action.as_str(), outcome])
            .inc();
    }

    pub fn record_response(&self, status: u16) {
        self.responses
            .with_label_values(&[status.to_string().as_str()])
            .inc();
    }

    pub fn decision_count(&self, action: Action, allowed: bool) -> u64 {
        let outcome = if allowed { "allowed" } else { "denied" };
        self.decisions
            .with_label_values(&[action.as_str(), outcome])
            .get()
    }

    /// Text exposition format
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_counters() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.record_decision(Action::Edit, true);
        metrics.record_decision(Action::Edit, false);
        metrics.record_decision(Action::Edit, false);

        assert_eq!(metrics.decision_count(Action::Edit, true), 1);
        assert_eq!(metrics.decision_count(Action::Edit, false), 2);
        assert_eq!(metrics.decision_count(Action::View, true), 0);
    }

    #[test]
    fn test_render() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.record_decision(Action::Delete, false);
        metrics.record_response(403);

        let text = metrics.render().unwrap();
        assert!(text.contains("catalog_authz_decisions_total{action=\"delete\",outcome=\"denied\"} 1"));
        assert!(text.contains("catalog_http_requests_total{status=\"403\"} 1"));
    }
}
