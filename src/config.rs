//! Engine configuration.
//!
//! Defaults mirror the store's observed row cap and the dashboard's risk
//! thresholds, which are fixed. Environment overrides are read once per `from_env` call.

/// Rows per paginated request (the store caps responses at this size).
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Scores strictly above this are High risk.
pub const HIGH_RISK_THRESHOLD: u8 = 60;

/// Scores strictly above this (and not High) are Medium risk.
pub const MEDIUM_RISK_THRESHOLD: u8 = 30;

/// Sellers shown in the analytics "top violators" panel.
pub const DEFAULT_TOP_VIOLATORS: usize = 5;

/// Runtime configuration for aggregation and analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub page_size: usize,
    pub top_violators: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            top_violators: DEFAULT_TOP_VIOLATORS,
        }
    }
}

impl EngineConfig {
    /// Build from defaults, overriding from `BRANDGUARD_PAGE_SIZE` and
    /// `BRANDGUARD_TOP_VIOLATORS` when set to a positive integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(page_size) = positive_env("BRANDGUARD_PAGE_SIZE") {
            config.page_size = page_size;
        }
        if let Some(top) = positive_env("BRANDGUARD_TOP_VIOLATORS") {
            config.top_violators = top;
        }

        log::debug!(
            "CONFIG_LOADED page_size={} top_violators={}",
            config.page_size,
            config.top_violators
        );
        config
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

fn positive_env(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Some(v),
        _ => {
            log::warn!("CONFIG_IGNORED key={} value={:?}", key, raw);
            None
        }
    }
}
