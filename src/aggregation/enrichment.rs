//! Enrichment pipeline status and triggers.
//!
//! The pipeline itself runs outside this crate. Here its polled status is
//! shaped into dashboard counters, and trigger failures are reported
//! without touching any displayed data.

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// Status object as served by the pipeline bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentStatus {
    pub total_products: u64,
    pub enriched: u64,
    pub processed: u64,
    pub failed: u64,
    pub pipeline_running: bool,
}

/// Dashboard view of the enrichment progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentStats {
    pub total: u64,
    pub enriched: u64,
    pub failed: u64,
    pub pending: u64,
    pub is_running: bool,
}

impl From<&EnrichmentStatus> for EnrichmentStats {
    fn from(status: &EnrichmentStatus) -> Self {
        Self {
            total: status.total_products,
            enriched: status.enriched,
            failed: status.failed,
            pending: status.total_products.saturating_sub(status.processed),
            is_running: status.pipeline_running,
        }
    }
}

impl EnrichmentStats {
    /// Parse the bridge's status JSON.
    pub fn from_status_json(json: &str) -> AuditResult<Self> {
        let status: EnrichmentStatus = serde_json::from_str(json)?;
        Ok(Self::from(&status))
    }
}

/// Operations the bridge exposes for kicking off pipeline work.
pub trait PipelineControl {
    fn status(&self) -> Result<EnrichmentStatus, String>;
    fn run_pipeline(&self) -> Result<(), String>;
    fn refresh_scores(&self) -> Result<(), String>;
}

/// Poll the bridge for current enrichment progress.
pub fn poll_enrichment<P: PipelineControl + ?Sized>(control: &P) -> AuditResult<EnrichmentStats> {
    control
        .status()
        .map(|status| EnrichmentStats::from(&status))
        .map_err(|message| trigger_failed("status", message))
}

/// Start a scrape/enrich/audit run.
pub fn trigger_pipeline<P: PipelineControl + ?Sized>(control: &P) -> AuditResult<()> {
    control
        .run_pipeline()
        .map_err(|message| trigger_failed("run_pipeline", message))?;
    log::info!("PIPELINE_TRIGGERED operation=run_pipeline");
    Ok(())
}

/// Recompute stored audit scores.
pub fn trigger_refresh<P: PipelineControl + ?Sized>(control: &P) -> AuditResult<()> {
    control
        .refresh_scores()
        .map_err(|message| trigger_failed("refresh_scores", message))?;
    log::info!("PIPELINE_TRIGGERED operation=refresh_scores");
    Ok(())
}

fn trigger_failed(operation: &str, message: String) -> AuditError {
    log::warn!(
        "PIPELINE_TRIGGER_FAILED operation={} error={}",
        operation,
        message
    );
    AuditError::pipeline_trigger(operation, message)
}
