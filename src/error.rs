//! Error taxonomy for the audit engine.
//!
//! Only I/O-facing operations fail. Data-integrity anomalies in raw records
//! are defaulted and logged, never raised.

use thiserror::Error;

/// Errors surfaced by aggregation and pipeline triggers.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A paginated read or exact-count query against the store failed.
    #[error("source query failed during {operation} (offset {offset}): {message}")]
    SourceQuery {
        operation: String,
        offset: usize,
        message: String,
    },

    /// Triggering the external enrichment pipeline failed.
    #[error("pipeline trigger '{operation}' failed: {message}")]
    PipelineTrigger { operation: String, message: String },

    /// A row handed across the binding boundary was not valid JSON for its shape.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

impl AuditError {
    pub fn source_query(operation: &str, offset: usize, message: impl Into<String>) -> Self {
        AuditError::SourceQuery {
            operation: operation.to_string(),
            offset,
            message: message.into(),
        }
    }

    pub fn pipeline_trigger(operation: &str, message: impl Into<String>) -> Self {
        AuditError::PipelineTrigger {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

pub type AuditResult<T> = Result<T, AuditError>;
