//! Typed view over the `violation_details` bag.
//!
//! The enrichment pipeline has written several generations of keys; each
//! accessor knows every alias it has used. Absent keys read as "not set".

use serde_json::Value;

use crate::extraction::json_path::{is_truthy, resolve_json_path, value_to_count, value_to_float};

/// Expected vs found brand text.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandMismatch {
    pub expected: Option<String>,
    pub found: Option<String>,
}

/// Listing priced below the allowed minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct LowPrice {
    pub min_allowed: Option<f64>,
    pub actual: Option<f64>,
}

/// Pack pricing hint for multi-unit listings.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPriceInfo {
    pub is_pack: bool,
    pub unit_price: Option<f64>,
}

/// Listing-vs-master unit counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboMismatch {
    pub listing: Option<u32>,
    pub master: Option<u32>,
}

/// Borrowed accessor over one record's details bag.
#[derive(Debug, Clone, Copy)]
pub struct ViolationDetails<'a> {
    bag: &'a Value,
}

impl<'a> ViolationDetails<'a> {
    pub fn new(bag: &'a Value) -> Self {
        Self { bag }
    }

    fn get(&self, path: &str) -> Option<&'a Value> {
        resolve_json_path(self.bag, path).filter(|v| is_truthy(v))
    }

    fn flag(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    fn text(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str()).map(str::to_string)
    }

    fn number(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(value_to_float)
    }

    fn first_number(&self, paths: &[&str]) -> Option<f64> {
        paths
            .iter()
            .filter_map(|p| self.number(p))
            .find(|v| *v > 0.0)
    }

    pub fn missing_ean(&self) -> bool {
        self.flag("missing_ean")
    }

    pub fn brand_mismatch(&self) -> Option<BrandMismatch> {
        self.get("brand_mismatch")?;
        Some(BrandMismatch {
            expected: self.text("brand_mismatch.expected"),
            found: self.text("brand_mismatch.found"),
        })
    }

    pub fn detected_brand(&self) -> Option<String> {
        self.text("detected_brand")
    }

    pub fn low_price(&self) -> Option<LowPrice> {
        self.get("low_price")?;
        Some(LowPrice {
            min_allowed: self
                .number("low_price.min_allowed")
                .or_else(|| self.number("low_price.min")),
            actual: self.number("low_price.actual"),
        })
    }

    pub fn unit_price_info(&self) -> Option<UnitPriceInfo> {
        self.get("unit_price_info")?;
        Some(UnitPriceInfo {
            is_pack: self.flag("unit_price_info.is_pack"),
            unit_price: self.number("unit_price_info.unit_price"),
        })
    }

    pub fn volumetric_mismatch(&self) -> bool {
        self.flag("volumetric_mismatch")
    }

    /// Weight found in the listing, in kg.
    pub fn detected_volume_kg(&self) -> Option<f64> {
        self.first_number(&[
            "volumetric_info.detected_total_kg",
            "volumetric_mismatch.detected_in_listing",
            "detected_volume",
        ])
    }

    /// Weight the master product implies, in kg.
    pub fn expected_volume_kg(&self) -> Option<f64> {
        self.first_number(&[
            "volumetric_info.expected_total_kg",
            "volumetric_mismatch.expected_kg",
        ])
    }

    pub fn combo_mismatch(&self) -> Option<ComboMismatch> {
        self.get("combo_mismatch")?;
        Some(ComboMismatch {
            listing: self.get("combo_mismatch.listing").and_then(value_to_count),
            master: self.get("combo_mismatch.master").and_then(value_to_count),
        })
    }

    pub fn unauthorized_discount(&self) -> bool {
        self.flag("unauthorized_discount")
    }

    pub fn restricted_sku(&self) -> bool {
        self.flag("restricted_sku_violation") || self.flag("restricted_sku")
    }
}
