//! Field-level comparison results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven compliance fields, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Ean,
    Brand,
    Price,
    Volume,
    Quantity,
    Discount,
    Publishable,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::Ean,
        FieldName::Brand,
        FieldName::Price,
        FieldName::Volume,
        FieldName::Quantity,
        FieldName::Discount,
        FieldName::Publishable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Ean => "ean",
            FieldName::Brand => "brand",
            FieldName::Price => "price",
            FieldName::Volume => "volume",
            FieldName::Quantity => "quantity",
            FieldName::Discount => "discount",
            FieldName::Publishable => "publishable",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single field comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldStatus {
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "rejected")]
    Rejected,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl FieldStatus {
    /// Whether this outcome carries a penalty.
    pub fn is_flagged(self) -> bool {
        matches!(self, FieldStatus::Rejected | FieldStatus::Warning)
    }
}

/// Scraped-vs-expected comparison for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldComparison {
    pub field: FieldName,
    pub scraped: String,
    pub master: String,
    pub status: FieldStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Informational penalty; never summed into the stored fraud score.
    pub score_impact: u32,
}

impl FieldComparison {
    /// Build a comparison, zeroing the impact unless the status is flagged.
    pub fn new(
        field: FieldName,
        status: FieldStatus,
        scraped: impl Into<String>,
        master: impl Into<String>,
        details: Option<String>,
        score_impact: u32,
    ) -> Self {
        Self {
            field,
            scraped: scraped.into(),
            master: master.into(),
            status,
            details,
            score_impact: if status.is_flagged() { score_impact } else { 0 },
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.status == FieldStatus::Rejected
    }
}

/// Exactly one comparison per field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldComparisons {
    pub ean: FieldComparison,
    pub brand: FieldComparison,
    pub price: FieldComparison,
    pub volume: FieldComparison,
    pub quantity: FieldComparison,
    pub discount: FieldComparison,
    pub publishable: FieldComparison,
}

impl FieldComparisons {
    /// Assemble from comparisons listed in `FieldName::ALL` order.
    pub fn from_ordered(ordered: [FieldComparison; 7]) -> Self {
        debug_assert!(ordered
            .iter()
            .zip(FieldName::ALL)
            .all(|(c, name)| c.field == name));

        let [ean, brand, price, volume, quantity, discount, publishable] = ordered;
        Self {
            ean,
            brand,
            price,
            volume,
            quantity,
            discount,
            publishable,
        }
    }

    pub fn get(&self, field: FieldName) -> &FieldComparison {
        match field {
            FieldName::Ean => &self.ean,
            FieldName::Brand => &self.brand,
            FieldName::Price => &self.price,
            FieldName::Volume => &self.volume,
            FieldName::Quantity => &self.quantity,
            FieldName::Discount => &self.discount,
            FieldName::Publishable => &self.publishable,
        }
    }

    /// Comparisons in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldComparison> {
        FieldName::ALL.into_iter().map(move |name| self.get(name))
    }

    pub fn total_impact(&self) -> u32 {
        self.iter().map(|c| c.score_impact).sum()
    }
}
