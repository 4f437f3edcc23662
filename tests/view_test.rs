mod common;

use brandguard_core::storage::{AuditStatus, MatchLevel, MasterProductRecord, RiskLevel};
use brandguard_core::view::{
    apply_list_view, filter_by_violation, ListViewConfig, MatchFilter, RiskFilter, SortKey, SortOrder,
    SortState, ViolationFilter,
};
use brandguard_core::{ProductAudit, ViolationType};
use serde_json::json;

use common::*;

fn ids(view: &[&ProductAudit]) -> Vec<String> {
    view.iter().map(|a| a.id.clone()).collect()
}

fn risk_mix() -> Vec<ProductAudit> {
    resolve_all(&[
        make_row("h1", 90, RiskLevel::High, 0),
        make_row("h2", 70, RiskLevel::High, 1),
        make_row("m1", 50, RiskLevel::Medium, 2),
        make_row("l1", 10, RiskLevel::Low, 3),
        make_row("l2", 5, RiskLevel::Low, 4),
    ])
}

#[test]
fn test_risk_filter_keeps_input_order() {
    let audits = risk_mix();
    let config = ListViewConfig {
        risk: RiskFilter::High,
        ..Default::default()
    };
    let view = brandguard_core::view::filter_audits(&audits, &config);
    assert_eq!(ids(&view), vec!["h1", "h2"]);
}

#[test]
fn test_risk_filter_uses_stored_level() {
    // Stored Low, but a score that buckets High.
    let audits = resolve_all(&[make_row("x", 95, RiskLevel::Low, 0)]);
    assert!(audits[0].has_risk_disagreement());

    let config = ListViewConfig {
        risk: RiskFilter::High,
        ..Default::default()
    };
    assert!(apply_list_view(&audits, &config).is_empty());
}

#[test]
fn test_price_sort_ascending_then_toggled() {
    let audits = resolve_all(&[
        with_price(make_row("a", 10, RiskLevel::Low, 0), 100.0),
        with_price(make_row("b", 10, RiskLevel::Low, 1), 50.0),
        with_price(make_row("c", 10, RiskLevel::Low, 2), 200.0),
    ]);

    let sort = SortState::default().toggle(SortKey::Price).toggle(SortKey::Price);
    assert_eq!(sort, SortState { key: SortKey::Price, order: SortOrder::Asc });
    let config = ListViewConfig { sort, ..Default::default() };
    let prices: Vec<f64> = apply_list_view(&audits, &config).iter().map(|a| a.price).collect();
    assert_eq!(prices, vec![50.0, 100.0, 200.0]);

    let config = ListViewConfig {
        sort: sort.toggle(SortKey::Price),
        ..Default::default()
    };
    let prices: Vec<f64> = apply_list_view(&audits, &config).iter().map(|a| a.price).collect();
    assert_eq!(prices, vec![200.0, 100.0, 50.0]);
}

#[test]
fn test_default_sort_is_fraud_score_desc() {
    let audits = risk_mix();
    let view = apply_list_view(&audits, &ListViewConfig::default());
    let scores: Vec<u8> = view.iter().map(|a| a.fraud_score).collect();
    assert_eq!(scores, vec![90, 70, 50, 10, 5]);
}

#[test]
fn test_brand_sort_uses_unidentified_fallback() {
    let mut rows = vec![
        make_row("v", 10, RiskLevel::Low, 0),
        make_row("u", 10, RiskLevel::Low, 1),
        make_row("a", 10, RiskLevel::Low, 2),
    ];
    rows[1].master = None;
    rows[2].master = Some(MasterProductRecord {
        brand: Some("Agility".to_string()),
        ..Default::default()
    });
    let audits = resolve_all(&rows);

    let config = ListViewConfig {
        sort: SortState::default().toggle(SortKey::Brand),
        ..Default::default()
    };
    let brands: Vec<&str> = apply_list_view(&audits, &config).iter().map(|a| a.brand_name()).collect();
    assert_eq!(brands, vec!["Agility", "Unidentified", "Vitalcan"]);
}

#[test]
fn test_search_is_case_insensitive_over_title_and_seller() {
    let audits = resolve_all(&[
        with_seller(make_row("1", 10, RiskLevel::Low, 0), "MASCOTAS_NORTE"),
        make_row("2", 10, RiskLevel::Low, 1),
    ]);

    let config = ListViewConfig {
        search: "norte".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&apply_list_view(&audits, &config)), vec!["1"]);

    let config = ListViewConfig {
        search: "alimento PERRO 2".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&apply_list_view(&audits, &config)), vec!["2"]);
}

#[test]
fn test_match_filter() {
    let mut rows = vec![make_row("e", 10, RiskLevel::Low, 0), make_row("f", 10, RiskLevel::Low, 1)];
    rows[0].audit.match_level = MatchLevel::Ean;
    rows[1].audit.match_level = MatchLevel::Fuzzy;
    let audits = resolve_all(&rows);

    let config = ListViewConfig {
        match_filter: MatchFilter::Fuzzy,
        ..Default::default()
    };
    assert_eq!(ids(&apply_list_view(&audits, &config)), vec!["f"]);
}

#[test]
fn test_list_view_config_from_json() {
    let config: ListViewConfig = serde_json::from_value(json!({
        "risk": "Medium",
        "sort": {"key": "Price", "order": "Asc"}
    }))
    .unwrap();
    assert_eq!(config.risk, RiskFilter::Medium);
    assert_eq!(config.match_filter, MatchFilter::All);
    assert!(config.search.is_empty());
    assert_eq!(config.sort.key, SortKey::Price);
}

#[test]
fn test_violation_filter() {
    let audits = resolve_all(&[
        with_details(make_row("p", 10, RiskLevel::Low, 0), json!({"low_price": {"min_allowed": 99999}})),
        with_status(
            with_details(make_row("c", 10, RiskLevel::Low, 1), json!({"low_price": {"min_allowed": 99999}})),
            AuditStatus::Clean,
        ),
        make_row("s", 75, RiskLevel::High, 2),
        make_row("i", 10, RiskLevel::Low, 3),
    ]);
    assert_eq!(audits[2].violation_type, ViolationType::Suspicious);

    assert_eq!(ids(&filter_by_violation(&audits, ViolationFilter::Price)), vec!["p", "c"]);
    assert_eq!(ids(&filter_by_violation(&audits, ViolationFilter::Suspicious)), vec!["s"]);
    assert_eq!(ids(&filter_by_violation(&audits, ViolationFilter::All)), vec!["p", "s", "i"]);
    assert_eq!(filter_by_violation(&audits, ViolationFilter::TotalAnalyzed).len(), 4);
    assert!(filter_by_violation(&audits, ViolationFilter::Restricted).is_empty());
}
