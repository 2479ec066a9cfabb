//! Search Filters
//!
//! This demo wires a few containers together the way a search page would.
//!
//! Key concepts:
//! - Listeners re-reading state after each notification
//! - Capped selection and tri-state classification
//! - Date-range edit buffers applied on demand
//! - Checkpointing a model to JSON and applying it back
//!
//! Run with: RUST_LOG=rok=debug cargo run --example filters

use rok::prelude::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Search Filters ===\n");

    // Sort order: pick exactly one
    let mut sort = Enumeration::new("sort", "Sort by").with_max(1);
    sort.add("newest", Some(json!({ "field": "created", "dir": "desc" })));
    sort.add("oldest", Some(json!({ "field": "created", "dir": "asc" })));
    sort.add("title", Some(json!({ "field": "title", "dir": "asc" })));

    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let log = Rc::clone(&log);
        sort.watch(move || log.borrow_mut().push("sort changed"));
    }

    sort.set("newest").expect("newest is in the universe");
    match sort.set("title") {
        Ok(()) => println!("Unexpectedly selected a second sort order"),
        Err(e) => println!("Rejected second sort order: {}", e),
    }
    sort.set_to("newest", false).expect("newest is in the universe");
    sort.set("title").expect("cap is free again");
    println!(
        "Sort: {:?} -> {}",
        sort.selected_name().expect("at most one selected"),
        sort.selected_value().ok().flatten().unwrap_or(&json!(null))
    );

    // Labels: include, exclude or ignore each one
    let mut labels = TriStateEnumeration::new("labels", "Labels");
    for label in ["bug", "docs", "wontfix", "good-first-issue"] {
        labels.add(label, None);
    }
    labels.set_include("bug").expect("bug is a label");
    labels.set("wontfix", "exclude").expect("valid target");
    if let Err(e) = labels.set("docs", "maybe") {
        println!("Rejected classification: {}", e);
    }
    println!(
        "Labels: include {:?}, exclude {:?}, ignore {:?}",
        labels.all_included_names(),
        labels.all_excluded_names(),
        labels.all_ignored_names()
    );

    // Period: typed by the user, applied on blur
    let mut period = DateRange::new("period", "Created between");
    period.set_edit_start("01/03/2024");
    period.set_edit_end("31/02/2024");
    println!(
        "Edit buffers valid? start={} end={}",
        period.is_valid_edit_start(),
        period.is_valid_edit_end()
    );
    for problem in period.edit_end_problems() {
        println!("  end: {}", problem);
    }
    period.apply_edit_start().expect("start has no end to conflict with");
    period.apply_edit_end().expect("invalid buffers clear silently");
    println!(
        "Period: {:?} .. {:?}",
        period.start_str(),
        period.end_str()
    );

    period.set_edit_end("29/02/2024");
    if let Err(e) = period.apply_edit_end() {
        println!("Rejected end date: {}", e);
    }

    // Persist the label filter and bring it back after a reset
    let checkpoint = Checkpoint::capture(&labels);
    let json = checkpoint.to_json_pretty().expect("snapshot serializes");
    labels.reset();
    println!("\nAfter reset: {} labels included", labels.count_included());

    Checkpoint::from_json(&json)
        .and_then(|checkpoint| checkpoint.apply_to(&mut labels))
        .expect("checkpoint matches the model");
    println!("Restored checkpoint {}: {:?} included", checkpoint.id, labels.all_included_names());

    println!("\nSort listener fired {} times", log.borrow().len());
}
