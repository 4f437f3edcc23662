//! Fetch context management.
//!
//! Provides fetch and per-audit context for logging.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for one aggregation fetch.
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub fetch_id: String,
    pub started_at: DateTime<Utc>,
}

impl FetchContext {
    pub fn new() -> Self {
        Self::with_id(&format!("fetch-{}", &Uuid::new_v4().to_string()[..8]))
    }

    pub fn with_id(fetch_id: &str) -> Self {
        Self {
            fetch_id: fetch_id.to_string(),
            started_at: Utc::now(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.fetch_id)
    }

    /// Logging context for a single audit within this fetch.
    pub fn audit_context(&self, audit_id: &str) -> LogContext {
        self.log_context().with_audit(audit_id)
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_id_format() {
        let ctx = FetchContext::new();
        assert!(ctx.fetch_id.starts_with("fetch-"));
        assert_eq!(ctx.fetch_id.len(), "fetch-".len() + 8);
    }

    #[test]
    fn test_audit_context_display() {
        let ctx = FetchContext::with_id("fetch-abc");
        assert_eq!(
            format!("{}", ctx.audit_context("a-1")),
            "[fetch=fetch-abc] [audit=a-1]"
        );
    }
}
