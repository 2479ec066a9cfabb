//! Integration tests for models composed of sub-models.

use rok::core::{assign, encode, Field, Listeners, Schema, SnapshotError};
use rok::date_range::DateRange;
use rok::enumeration::TriStateEnumeration;
use rok::{Checkpoint, Model, Observable};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

/// A search form: free-text query, a status filter that is always present
/// and an optional period filter.
struct SearchForm {
    listeners: Listeners,
    query: String,
    status: TriStateEnumeration,
    period: Option<DateRange>,
}

impl SearchForm {
    fn new() -> Self {
        let mut status = TriStateEnumeration::new("status", "Status");
        status.add("open", None);
        status.add("closed", None);
        status.add("stale", None);

        Self {
            listeners: Listeners::new(),
            query: String::new(),
            status,
            period: Some(DateRange::new("period", "Period")),
        }
    }

    fn without_period() -> Self {
        Self {
            period: None,
            ..Self::new()
        }
    }
}

impl Observable for SearchForm {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

fn status(m: &SearchForm) -> Option<&dyn Model> {
    Some(&m.status)
}

fn status_mut(m: &mut SearchForm) -> Option<&mut dyn Model> {
    Some(&mut m.status)
}

fn reset_status(m: &mut SearchForm) {
    m.status.reset();
}

fn period(m: &SearchForm) -> Option<&dyn Model> {
    m.period.as_ref().map(|p| p as &dyn Model)
}

fn period_mut(m: &mut SearchForm) -> Option<&mut dyn Model> {
    m.period.as_mut().map(|p| p as &mut dyn Model)
}

fn drop_period(m: &mut SearchForm) {
    m.period = None;
}

impl Schema for SearchForm {
    const KIND: &'static str = "SearchForm";
    const FIELDS: &'static [Field<Self>] = &[
        Field::property(
            "query",
            |m: &Self| encode(&m.query),
            |m: &mut Self, value| assign(&mut m.query, value),
        )
        .reset_with(|m: &mut Self| m.query.clear()),
        Field::sub_model("status", status, status_mut, reset_status),
        Field::sub_model("period", period, period_mut, drop_period),
    ];
}

fn counter(model: &impl Observable) -> Rc<Cell<usize>> {
    let hits = Rc::new(Cell::new(0));
    let inner = Rc::clone(&hits);
    model.watch(move || inner.set(inner.get() + 1));
    hits
}

fn filled() -> SearchForm {
    let mut form = SearchForm::new();
    form.query = "timeout".to_string();
    form.status.set_include("open").unwrap();
    form.status.set_exclude("stale").unwrap();
    if let Some(period) = form.period.as_mut() {
        period.set_start("2024-01-01").unwrap();
        period.set_end("2024-03-31").unwrap();
    }
    form
}

#[test]
fn schema_groups_fields() {
    assert!(rok::core::check_schema::<SearchForm>().is_ok());
    assert_eq!(SearchForm::property_names(), vec!["query"]);
    assert!(SearchForm::object_names().is_empty());
    assert_eq!(SearchForm::sub_model_names(), vec!["status", "period"]);
}

#[test]
fn reset_cascades_into_sub_models() {
    let mut form = filled();
    let parent_hits = counter(&form);
    let status_hits = counter(&form.status);

    form.reset();

    assert_eq!(form.query, "");
    assert_eq!(form.status.count_ignored(), 3);
    let period = form.period.as_ref().unwrap();
    assert!(!period.has_either());
    assert_eq!(parent_hits.get(), 1);
    assert_eq!(status_hits.get(), 1);
}

#[test]
fn reset_leaves_absent_sub_model_absent() {
    let mut form = SearchForm::without_period();
    form.reset();
    assert!(form.period.is_none());
}

#[test]
fn extract_nests_sub_model_snapshots() {
    let snapshot = filled().extract();

    assert_eq!(snapshot.get("query"), Some(&json!("timeout")));
    assert_eq!(snapshot.get("status").unwrap()["name"], json!("status"));
    assert_eq!(
        snapshot.get("status").unwrap()["classification"]["open"],
        json!("include")
    );
    assert_eq!(snapshot.get("period").unwrap()["start"], json!("2024-01-01"));

    let without = SearchForm::without_period().extract();
    assert_eq!(without.get("period"), Some(&json!(null)));
}

#[test]
fn restore_round_trips_through_sub_models() {
    let source = filled();
    let mut target = SearchForm::new();
    let hits = counter(&target);

    target.restore(&source.extract()).unwrap();

    assert_eq!(hits.get(), 1);
    assert_eq!(target.query, "timeout");
    assert_eq!(target.status.all_included_names(), vec!["open"]);
    assert_eq!(target.status.all_excluded_names(), vec!["stale"]);
    assert_eq!(
        target.period.as_ref().and_then(|p| p.end_str()),
        Some("2024-03-31".to_string())
    );
    assert_eq!(target.extract(), source.extract());
}

#[test]
fn restore_with_null_drops_sub_model() {
    let mut target = filled();
    let snapshot = SearchForm::without_period().extract();

    target.restore(&snapshot).unwrap();

    assert!(target.period.is_none());
}

#[test]
fn restore_into_missing_sub_model_fails() {
    let mut target = SearchForm::without_period();
    let result = target.restore(&filled().extract());

    assert!(matches!(
        result,
        Err(SnapshotError::MissingSubModel { field: "period" })
    ));
}

#[test]
fn restore_rejects_non_object_sub_model() {
    let mut snapshot = filled().extract();
    snapshot.insert("status", json!(["open"]));

    let mut target = SearchForm::new();
    let result = target.restore(&snapshot);

    assert!(matches!(
        result,
        Err(SnapshotError::NotAnObject { field: "status" })
    ));
}

#[test]
fn checkpoint_applies_to_composite() {
    let checkpoint = Checkpoint::capture(&filled());
    assert_eq!(checkpoint.kind, "SearchForm");

    let json = checkpoint.to_json().unwrap();
    let mut target = SearchForm::new();
    Checkpoint::from_json(&json)
        .unwrap()
        .apply_to(&mut target)
        .unwrap();

    assert_eq!(target.status.count_included(), 1);
    assert!(target.period.as_ref().unwrap().has_both());
}
