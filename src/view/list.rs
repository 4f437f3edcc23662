//! Product list filtering and sorting.
//!
//! Pure over its inputs: the configuration is passed in, never read from
//! ambient state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::audit::product::ProductAudit;
use crate::storage::models::{MatchLevel, RiskLevel};

/// Filter on the stored risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl RiskFilter {
    fn accepts(self, risk: RiskLevel) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::High => risk == RiskLevel::High,
            RiskFilter::Medium => risk == RiskLevel::Medium,
            RiskFilter::Low => risk == RiskLevel::Low,
        }
    }
}

/// Filter on match level by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchFilter {
    #[default]
    All,
    Unidentified,
    Ean,
    Fuzzy,
    Suspicious,
}

impl MatchFilter {
    pub fn level(self) -> Option<MatchLevel> {
        match self {
            MatchFilter::All => None,
            MatchFilter::Unidentified => Some(MatchLevel::Unidentified),
            MatchFilter::Ean => Some(MatchLevel::Ean),
            MatchFilter::Fuzzy => Some(MatchLevel::Fuzzy),
            MatchFilter::Suspicious => Some(MatchLevel::Suspicious),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    FraudScore,
    Price,
    MatchLevel,
    Brand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::FraudScore,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    /// Select `key`: the same key flips direction; a new key starts
    /// ascending for brand and descending otherwise.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                order: self.order.flipped(),
            }
        } else {
            let order = if key == SortKey::Brand {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            };
            Self { key, order }
        }
    }
}

/// Complete list view configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListViewConfig {
    pub risk: RiskFilter,
    pub match_filter: MatchFilter,
    pub search: String,
    pub sort: SortState,
}

impl ListViewConfig {
    /// Whether `audit` passes every active filter.
    pub fn matches(&self, audit: &ProductAudit) -> bool {
        if !self.risk.accepts(audit.risk_level) {
            return false;
        }
        if let Some(level) = self.match_filter.level() {
            if audit.match_level != level {
                return false;
            }
        }
        matches_search(audit, &self.search.to_lowercase())
    }
}

fn matches_search(audit: &ProductAudit, needle: &str) -> bool {
    needle.is_empty()
        || audit.title.to_lowercase().contains(needle)
        || audit.seller.to_lowercase().contains(needle)
}

fn compare(a: &ProductAudit, b: &ProductAudit, key: SortKey) -> Ordering {
    match key {
        SortKey::FraudScore => a.fraud_score.cmp(&b.fraud_score),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::MatchLevel => a.match_level.cmp(&b.match_level),
        SortKey::Brand => a.brand_name().cmp(b.brand_name()),
    }
}

/// Filter only, keeping the input order.
pub fn filter_audits<'a>(audits: &'a [ProductAudit], config: &ListViewConfig) -> Vec<&'a ProductAudit> {
    let needle = config.search.to_lowercase();
    let level = config.match_filter.level();
    audits
        .iter()
        .filter(|a| config.risk.accepts(a.risk_level))
        .filter(|a| level.map_or(true, |l| a.match_level == l))
        .filter(|a| matches_search(a, &needle))
        .collect()
}

/// Filter then sort `audits` per `config`.
pub fn apply_list_view<'a>(audits: &'a [ProductAudit], config: &ListViewConfig) -> Vec<&'a ProductAudit> {
    let mut view = filter_audits(audits, config);

    let SortState { key, order } = config.sort;
    view.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    view
}
