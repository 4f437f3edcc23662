//! Python bindings.
//!
//! The bridge owns the store connection; it hands rows over as JSON and
//! gets resolved audits, views and reports back as JSON or text.

use chrono::NaiveDate;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::aggregation::{aggregate, AnalyticsSummary, EnrichmentStats, FetchContext, InMemorySource};
use crate::audit::ProductAudit;
use crate::config::EngineConfig;
use crate::error::AuditError;
use crate::export::{export_audits, report_filename};
use crate::init_logger;
use crate::storage::{build_audit_page_query, parse_dashboard_counts, JoinedAuditRow, DASHBOARD_COUNTS};
use crate::view::{apply_list_view, ListViewConfig};

fn to_py_err(err: AuditError) -> PyErr {
    match err {
        AuditError::InvalidRecord(e) => PyValueError::new_err(e.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> PyResult<T> {
    serde_json::from_str(json).map_err(|e| to_py_err(e.into()))
}

fn dump<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| to_py_err(e.into()))
}

/// Resolve joined rows into audits plus dashboard counters.
///
/// # Arguments
/// * `rows_json` - JSON array of joined `compliance_audit` rows
/// * `counts_json` - Exact store counts keyed like `count_queries()`
///
/// # Returns
/// JSON object `{"audits": [...], "stats": {...}}`
#[pyfunction]
#[pyo3(signature = (rows_json, counts_json=None))]
fn evaluate_audit_rows(rows_json: String, counts_json: Option<String>) -> PyResult<String> {
    init_logger();

    let rows: Vec<JoinedAuditRow> = parse(&rows_json)?;
    let mut source = InMemorySource::new(rows);
    if let Some(json) = counts_json {
        source = source.with_counts(parse_dashboard_counts(&json).map_err(to_py_err)?);
    }

    let ctx = FetchContext::new();
    let aggregation = aggregate(&source, &EngineConfig::from_env(), &ctx).map_err(to_py_err)?;

    dump(&serde_json::json!({
        "audits": aggregation.audits,
        "stats": aggregation.stats,
    }))
}

/// Filter and sort audits with a list view configuration.
#[pyfunction]
fn apply_view(audits_json: String, config_json: String) -> PyResult<String> {
    let audits: Vec<ProductAudit> = parse(&audits_json)?;
    let config: ListViewConfig = parse(&config_json)?;
    dump(&apply_list_view(&audits, &config))
}

/// Analytics summary for the given audits.
#[pyfunction]
fn summarize_audits(audits_json: String) -> PyResult<String> {
    let audits: Vec<ProductAudit> = parse(&audits_json)?;
    let top_n = EngineConfig::from_env().top_violators;
    dump(&AnalyticsSummary::from_audits(&audits, top_n))
}

/// Shape the bridge's status JSON into dashboard counters.
#[pyfunction]
fn enrichment_stats(status_json: String) -> PyResult<String> {
    let stats = EnrichmentStats::from_status_json(&status_json).map_err(to_py_err)?;
    dump(&stats)
}

/// Report text for the given audits.
#[pyfunction]
fn export_report(py: Python<'_>, audits_json: String) -> PyResult<PyObject> {
    init_logger();
    let audits: Vec<ProductAudit> = parse(&audits_json)?;
    Ok(PyBytes::new(py, &export_audits(&audits)).into())
}

/// Download filename for an ISO date (`YYYY-MM-DD`).
#[pyfunction]
fn report_filename_for(date: String) -> PyResult<String> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(report_filename(date))
}

/// SQL for one page of joined audit rows.
#[pyfunction]
fn audit_page_query(offset: usize, limit: usize) -> String {
    build_audit_page_query(offset, limit)
}

/// Exact-count statements keyed by dashboard counter.
#[pyfunction]
fn count_queries() -> Vec<(String, String)> {
    DASHBOARD_COUNTS
        .iter()
        .map(|(name, query)| (name.to_string(), query.to_sql()))
        .collect()
}

/// Python module definition
#[pymodule]
fn brandguard_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(evaluate_audit_rows, m)?)?;
    m.add_function(wrap_pyfunction!(apply_view, m)?)?;
    m.add_function(wrap_pyfunction!(summarize_audits, m)?)?;
    m.add_function(wrap_pyfunction!(enrichment_stats, m)?)?;
    m.add_function(wrap_pyfunction!(export_report, m)?)?;
    m.add_function(wrap_pyfunction!(report_filename_for, m)?)?;
    m.add_function(wrap_pyfunction!(audit_page_query, m)?)?;
    m.add_function(wrap_pyfunction!(count_queries, m)?)?;
    Ok(())
}
