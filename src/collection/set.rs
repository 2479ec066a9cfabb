//! Name-keyed set of values.

use crate::core::{assign, encode, Field, Listeners, Observable, Schema};
use crate::enumeration::Entry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

/// A mapping from names to values, iterated in name order.
///
/// Unlike an [`Enumeration`](crate::enumeration::Enumeration) there is no
/// fixed universe: any name may be added, and `reset` empties the set.
pub struct Set {
    listeners: Listeners,
    name: String,
    title: String,
    opts: Value,
    meta: Value,
    set: BTreeMap<String, Value>,
}

impl Default for Set {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Set {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            listeners: Listeners::new(),
            name: name.into(),
            title: title.into(),
            opts: Value::Object(Default::default()),
            meta: Value::Object(Default::default()),
            set: BTreeMap::new(),
        }
    }

    pub fn with_opts(mut self, opts: Value) -> Self {
        self.opts = opts;
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn opts(&self) -> &Value {
        &self.opts
    }

    pub fn meta(&self) -> &Value {
        &self.meta
    }

    /// Insert or replace `name`. A missing value is stored as `true`.
    pub fn add(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.set
            .insert(name.into(), value.unwrap_or(Value::Bool(true)));
        self.notify();
    }

    pub fn del(&mut self, name: &str) {
        self.set.remove(name);
        self.notify();
    }

    pub fn count(&self) -> usize {
        self.set.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.set.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Entry> {
        self.set.get(name).map(|value| entry(name, value))
    }

    pub fn all(&self) -> Vec<Entry> {
        self.set.iter().map(|(name, value)| entry(name, value)).collect()
    }

    pub fn all_names(&self) -> Vec<&str> {
        self.set.keys().map(String::as_str).collect()
    }

    pub fn all_values(&self) -> Vec<&Value> {
        self.set.values().collect()
    }

    /// Entries whose name starts with `prefix`. An empty prefix matches
    /// everything.
    pub fn with_prefix(&self, prefix: &str) -> Vec<Entry> {
        self.prefixed(prefix)
            .map(|(name, value)| entry(name, value))
            .collect()
    }

    pub fn names_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.prefixed(prefix).map(|(name, _)| name.as_str()).collect()
    }

    pub fn values_with_prefix(&self, prefix: &str) -> Vec<&Value> {
        self.prefixed(prefix).map(|(_, value)| value).collect()
    }

    fn prefixed(&self, prefix: &str) -> impl Iterator<Item = (&String, &Value)> + '_ {
        let owned = prefix.to_string();
        self.set
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(name, _)| name.starts_with(owned.as_str()))
    }
}

fn entry(name: &str, value: &Value) -> Entry {
    Entry {
        name: name.to_string(),
        value: value.clone(),
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Set")
            .field("name", &self.name)
            .field("set", &self.set)
            .finish()
    }
}

impl Observable for Set {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

impl Schema for Set {
    const KIND: &'static str = "Set";
    const FIELDS: &'static [Field<Self>] = &[
        Field::property(
            "name",
            |m: &Self| encode(&m.name),
            |m: &mut Self, value| assign(&mut m.name, value),
        ),
        Field::property(
            "title",
            |m: &Self| encode(&m.title),
            |m: &mut Self, value| assign(&mut m.title, value),
        ),
        Field::object(
            "opts",
            |m: &Self| m.opts.clone(),
            |m: &mut Self, value| assign(&mut m.opts, value),
        ),
        Field::object(
            "meta",
            |m: &Self| m.meta.clone(),
            |m: &mut Self, value| assign(&mut m.meta, value),
        ),
        Field::object(
            "set",
            |m: &Self| encode(&m.set),
            |m: &mut Self, value| assign(&mut m.set, value),
        )
        .reset_with(|m: &mut Self| m.set.clear()),
    ];
}
