//! Field rule registry.
//!
//! Each compliance field is one `FieldRule`: a check that reads the record
//! and produces the displayed values plus an outcome, and the fixed penalty
//! attached when that outcome is flagged. Adding a field means adding a
//! check function and a registry entry.

use crate::audit::fields::{FieldComparison, FieldName, FieldStatus};
use crate::evaluation::format::{format_kg, format_number, format_price, format_units, percent_difference};
use crate::extraction::details::ViolationDetails;
use crate::storage::models::{ListingRecord, MasterProductRecord};

const NOT_PROVIDED: &str = "Not provided";
const NOT_DETECTED: &str = "Not detected";
const NA: &str = "N/A";

/// Everything a check may read.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub listing: Option<&'a ListingRecord>,
    pub master: Option<&'a MasterProductRecord>,
    pub details: ViolationDetails<'a>,
}

/// Raw outcome of a check, before the penalty is attached.
#[derive(Debug, Clone)]
pub struct Check {
    pub status: FieldStatus,
    pub scraped: String,
    pub master: String,
    pub details: Option<String>,
}

impl Check {
    fn approved(scraped: impl Into<String>, master: impl Into<String>) -> Self {
        Self {
            status: FieldStatus::Approved,
            scraped: scraped.into(),
            master: master.into(),
            details: None,
        }
    }

    fn flagged(
        status: FieldStatus,
        scraped: impl Into<String>,
        master: impl Into<String>,
        details: String,
    ) -> Self {
        Self {
            status,
            scraped: scraped.into(),
            master: master.into(),
            details: Some(details),
        }
    }
}

/// One registry entry.
pub struct FieldRule {
    pub field: FieldName,
    pub score_impact: u32,
    check: fn(&RuleInput<'_>) -> Check,
}

impl FieldRule {
    pub fn apply(&self, input: &RuleInput<'_>) -> FieldComparison {
        let check = (self.check)(input);
        FieldComparison::new(
            self.field,
            check.status,
            check.scraped,
            check.master,
            check.details,
            self.score_impact,
        )
    }
}

/// Registry in rendering order.
pub const FIELD_RULES: [FieldRule; 7] = [
    FieldRule { field: FieldName::Ean, score_impact: 20, check: check_ean },
    FieldRule { field: FieldName::Brand, score_impact: 30, check: check_brand },
    FieldRule { field: FieldName::Price, score_impact: 100, check: check_price },
    FieldRule { field: FieldName::Volume, score_impact: 100, check: check_volume },
    FieldRule { field: FieldName::Quantity, score_impact: 20, check: check_quantity },
    FieldRule { field: FieldName::Discount, score_impact: 60, check: check_discount },
    FieldRule { field: FieldName::Publishable, score_impact: 100, check: check_publishable },
];

fn non_empty(s: Option<&String>) -> Option<&str> {
    s.map(String::as_str).filter(|s| !s.is_empty())
}

fn check_ean(input: &RuleInput<'_>) -> Check {
    let published = input.listing.and_then(|l| non_empty(l.ean_published.as_ref()));
    let scraped = published.unwrap_or(NOT_PROVIDED);
    let master = input
        .master
        .and_then(|m| non_empty(m.ean.as_ref()))
        .unwrap_or(NA);

    if input.details.missing_ean() {
        return Check::flagged(
            FieldStatus::Warning,
            scraped,
            master,
            "EAN not provided in listing".to_string(),
        );
    }

    let mut check = Check::approved(scraped, master);
    if published.is_none() {
        check.status = FieldStatus::NotApplicable;
    }
    check
}

fn check_brand(input: &RuleInput<'_>) -> Check {
    let mismatch = input.details.brand_mismatch();
    let found = mismatch
        .as_ref()
        .and_then(|m| m.found.clone())
        .or_else(|| input.listing.and_then(|l| non_empty(l.brand_detected.as_ref())).map(str::to_string))
        .or_else(|| input.details.detected_brand())
        .unwrap_or_else(|| NOT_DETECTED.to_string());
    let expected = mismatch
        .as_ref()
        .and_then(|m| m.expected.clone())
        .or_else(|| input.master.and_then(|m| non_empty(m.brand.as_ref())).map(str::to_string))
        .unwrap_or_else(|| NA.to_string());

    match mismatch {
        Some(_) => {
            let message = format!("Expected \"{}\", found \"{}\"", expected, found);
            Check::flagged(FieldStatus::Rejected, found, expected, message)
        }
        None => Check::approved(found, expected),
    }
}

fn check_price(input: &RuleInput<'_>) -> Check {
    let listing_price = input.listing.and_then(|l| l.price).filter(|p| *p != 0.0);
    let scraped = listing_price.map(format_price).unwrap_or_else(|| NA.to_string());
    let list_price = input.master.and_then(|m| m.list_price).filter(|p| *p != 0.0);

    match input.details.low_price() {
        Some(low) => {
            let master = match low.min_allowed {
                Some(min) => format!("{} (min)", format_price(min)),
                None => list_price.map(format_price).unwrap_or_else(|| NA.to_string()),
            };
            let actual = listing_price.or(low.actual);
            let minimum = low.min_allowed.or(list_price);
            let message = format!(
                "Price {} is below minimum {}",
                actual.map(format_price).unwrap_or_else(|| NA.to_string()),
                minimum.map(format_price).unwrap_or_else(|| NA.to_string()),
            );
            Check::flagged(FieldStatus::Rejected, scraped, master, message)
        }
        None => {
            let master = list_price.map(format_price).unwrap_or_else(|| NA.to_string());
            let mut check = Check::approved(scraped, master);
            check.details = input
                .details
                .unit_price_info()
                .filter(|info| info.is_pack)
                .and_then(|info| info.unit_price)
                .map(|unit| format!("Unit price: {}", format_price(unit)));
            check
        }
    }
}

fn check_volume(input: &RuleInput<'_>) -> Check {
    let detected = input.details.detected_volume_kg();
    let expected = input
        .details
        .expected_volume_kg()
        .or_else(|| input.master.and_then(|m| m.fc_net).filter(|kg| *kg > 0.0));

    let scraped = detected.map(format_kg).unwrap_or_else(|| NOT_DETECTED.to_string());
    let master = expected.map(format_kg).unwrap_or_else(|| NA.to_string());

    if !input.details.volumetric_mismatch() {
        return Check::approved(scraped, master);
    }

    let mut message = match expected {
        Some(kg) => format!("Volume mismatch detected (expected {}kg)", format_number(kg)),
        None => "Volume mismatch detected".to_string(),
    };
    if let (Some(found), Some(want)) = (detected, expected) {
        if let Some(pct) = percent_difference(found, want) {
            message.push_str(&format!(", {:+.0}% vs expected", pct));
        }
    }
    Check::flagged(FieldStatus::Rejected, scraped, master, message)
}

fn check_quantity(input: &RuleInput<'_>) -> Check {
    let master_default = input
        .master
        .and_then(|m| m.units_per_pack)
        .filter(|u| *u > 0)
        .unwrap_or(1);

    match input.details.combo_mismatch() {
        Some(combo) => {
            let listing_units = combo.listing.unwrap_or(1);
            let master_units = combo.master.unwrap_or(master_default);
            let message = format!(
                "Expected {} units, found {}",
                master_units, listing_units
            );
            Check::flagged(
                FieldStatus::Rejected,
                format_units(listing_units),
                format_units(master_units),
                message,
            )
        }
        None => Check::approved(format_units(1), format_units(master_default)),
    }
}

fn check_discount(input: &RuleInput<'_>) -> Check {
    if input.details.unauthorized_discount() {
        Check::flagged(
            FieldStatus::Rejected,
            "Yes (unauthorized)",
            "Not allowed",
            "This product should never have a discount".to_string(),
        )
    } else {
        Check::approved("No", "Allowed")
    }
}

fn check_publishable(input: &RuleInput<'_>) -> Check {
    let scraped = input
        .listing
        .and_then(|l| non_empty(l.status_publicacion.as_ref()))
        .unwrap_or("Active");

    if input.details.restricted_sku() {
        Check::flagged(
            FieldStatus::Rejected,
            scraped,
            "Not publishable",
            "This SKU should not be published on marketplace".to_string(),
        )
    } else {
        Check::approved(scraped, "Publishable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn input<'a>(
        listing: Option<&'a ListingRecord>,
        master: Option<&'a MasterProductRecord>,
        bag: &'a Value,
    ) -> RuleInput<'a> {
        RuleInput {
            listing,
            master,
            details: ViolationDetails::new(bag),
        }
    }

    #[test]
    fn test_registry_order_matches_field_names() {
        let names: Vec<FieldName> = FIELD_RULES.iter().map(|r| r.field).collect();
        assert_eq!(names, FieldName::ALL.to_vec());
    }

    #[test]
    fn test_ean_states() {
        let bag = Value::Null;
        let listing = ListingRecord {
            ean_published: Some("7790000000001".to_string()),
            ..Default::default()
        };
        let c = check_ean(&input(Some(&listing), None, &bag));
        assert_eq!(c.status, FieldStatus::Approved);
        assert_eq!(c.master, "N/A");

        let c = check_ean(&input(None, None, &bag));
        assert_eq!(c.status, FieldStatus::NotApplicable);
        assert_eq!(c.scraped, "Not provided");

        let bag = json!({"missing_ean": true});
        let c = check_ean(&input(Some(&listing), None, &bag));
        assert_eq!(c.status, FieldStatus::Warning);
    }

    #[test]
    fn test_brand_mismatch_message() {
        let bag = json!({"brand_mismatch": {"expected": "Vitalcan", "found": "Vitalis"}});
        let c = check_brand(&input(None, None, &bag));
        assert_eq!(c.status, FieldStatus::Rejected);
        assert_eq!(c.scraped, "Vitalis");
        assert_eq!(c.master, "Vitalcan");
        assert_eq!(c.details.as_deref(), Some("Expected \"Vitalcan\", found \"Vitalis\""));
    }

    #[test]
    fn test_brand_falls_back_to_master() {
        let bag = Value::Null;
        let master = MasterProductRecord {
            brand: Some("Vitalcan".to_string()),
            ..Default::default()
        };
        let listing = ListingRecord {
            brand_detected: Some("Vitalcan".to_string()),
            ..Default::default()
        };
        let c = check_brand(&input(Some(&listing), Some(&master), &bag));
        assert_eq!(c.status, FieldStatus::Approved);
        assert_eq!(c.master, "Vitalcan");
    }

    #[test]
    fn test_price_below_minimum() {
        let bag = json!({"low_price": {"min_allowed": 15000}});
        let listing = ListingRecord {
            price: Some(12000.0),
            ..Default::default()
        };
        let c = check_price(&input(Some(&listing), None, &bag));
        assert_eq!(c.status, FieldStatus::Rejected);
        assert_eq!(c.scraped, "$12.000");
        assert_eq!(c.master, "$15.000 (min)");
        assert_eq!(c.details.as_deref(), Some("Price $12.000 is below minimum $15.000"));
    }

    #[test]
    fn test_price_pack_hint() {
        let bag = json!({"unit_price_info": {"is_pack": true, "unit_price": 4500}});
        let c = check_price(&input(None, None, &bag));
        assert_eq!(c.status, FieldStatus::Approved);
        assert_eq!(c.details.as_deref(), Some("Unit price: $4.500"));
    }

    #[test]
    fn test_volume_falls_back_to_master_weight() {
        let bag = json!({"volumetric_mismatch": {"detected_in_listing": 20}});
        let master = MasterProductRecord {
            fc_net: Some(15.0),
            ..Default::default()
        };
        let c = check_volume(&input(None, Some(&master), &bag));
        assert_eq!(c.status, FieldStatus::Rejected);
        assert_eq!(c.scraped, "20 kg");
        assert_eq!(c.master, "15 kg");
        assert_eq!(
            c.details.as_deref(),
            Some("Volume mismatch detected (expected 15kg), +33% vs expected")
        );
    }

    #[test]
    fn test_quantity_defaults() {
        let bag = Value::Null;
        let master = MasterProductRecord {
            units_per_pack: Some(2),
            ..Default::default()
        };
        let c = check_quantity(&input(None, Some(&master), &bag));
        assert_eq!(c.status, FieldStatus::Approved);
        assert_eq!(c.scraped, "1 unit");
        assert_eq!(c.master, "2 units");

        let bag = json!({"combo_mismatch": {"listing": 3, "master": 1}});
        let c = check_quantity(&input(None, Some(&master), &bag));
        assert_eq!(c.status, FieldStatus::Rejected);
        assert_eq!(c.details.as_deref(), Some("Expected 1 units, found 3"));
    }

    #[test]
    fn test_discount_and_publishable() {
        let bag = json!({"unauthorized_discount": true, "restricted_sku_violation": true});
        let c = check_discount(&input(None, None, &bag));
        assert_eq!(c.scraped, "Yes (unauthorized)");
        assert_eq!(c.status, FieldStatus::Rejected);

        let c = check_publishable(&input(None, None, &bag));
        assert_eq!(c.scraped, "Active");
        assert_eq!(c.master, "Not publishable");
        assert_eq!(c.status, FieldStatus::Rejected);
    }
}
