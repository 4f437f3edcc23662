//! Structured logging utilities.
//!
//! Provides context-aware logging with fetch_id and audit_id included
//! in every log message.

use std::fmt;

/// Logging context for one aggregation fetch.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub fetch_id: String,
    pub audit_id: Option<String>,
}

impl LogContext {
    pub fn new(fetch_id: &str) -> Self {
        Self {
            fetch_id: fetch_id.to_string(),
            audit_id: None,
        }
    }

    pub fn with_audit(&self, audit_id: &str) -> Self {
        Self {
            fetch_id: self.fetch_id.clone(),
            audit_id: Some(audit_id.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.audit_id {
            Some(aid) => write!(f, "[fetch={}] [audit={}]", self.fetch_id, aid),
            None => write!(f, "[fetch={}]", self.fetch_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}
