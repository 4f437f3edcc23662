//! Last-good aggregation snapshot.
//!
//! A failed refresh leaves the previous snapshot in place; a refresh over
//! unchanged data is detected by fingerprint and does not swap.

use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::aggregation::aggregator::{aggregate, Aggregation};
use crate::aggregation::context::FetchContext;
use crate::aggregation::source::AuditSource;
use crate::audit::product::{DashboardStats, ProductAudit};
use crate::config::EngineConfig;
use crate::error::AuditResult;

/// One successful aggregation plus its content fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSnapshot {
    pub audits: Vec<ProductAudit>,
    pub stats: DashboardStats,
    /// Hex SHA-256 of the serialized audits.
    pub fingerprint: String,
}

impl AuditSnapshot {
    pub fn from_aggregation(aggregation: Aggregation) -> AuditResult<Self> {
        let fingerprint = fingerprint_audits(&aggregation.audits)?;
        Ok(Self {
            audits: aggregation.audits,
            stats: aggregation.stats,
            fingerprint,
        })
    }
}

/// Content fingerprint of an audit list.
pub fn fingerprint_audits(audits: &[ProductAudit]) -> AuditResult<String> {
    let bytes = serde_json::to_vec(audits)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Outcome of a refresh that succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Swapped,
    Unchanged,
}

/// Holds the most recent successful snapshot.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: RwLock<Option<Arc<AuditSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<AuditSnapshot>> {
        self.current.read().clone()
    }

    /// Aggregate from `source` and publish the result.
    ///
    /// On error the cached snapshot is untouched and the error is returned.
    pub fn refresh<S: AuditSource + ?Sized>(
        &self,
        source: &S,
        config: &EngineConfig,
    ) -> AuditResult<RefreshOutcome> {
        let ctx = FetchContext::new();
        let log_ctx = ctx.log_context();
        let snapshot = AuditSnapshot::from_aggregation(aggregate(source, config, &ctx)?)?;

        let mut current = self.current.write();
        if let Some(existing) = current.as_ref() {
            if existing.fingerprint == snapshot.fingerprint && existing.stats == snapshot.stats {
                log::info!(
                    "{} SNAPSHOT_UNCHANGED fingerprint={}",
                    log_ctx,
                    &snapshot.fingerprint[..12]
                );
                return Ok(RefreshOutcome::Unchanged);
            }
        }

        log::info!(
            "{} SNAPSHOT_SWAPPED audits={} fingerprint={}",
            log_ctx,
            snapshot.audits.len(),
            &snapshot.fingerprint[..12]
        );
        *current = Some(Arc::new(snapshot));
        Ok(RefreshOutcome::Swapped)
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }
}
