//! Enumeration with a capped selection.

use super::error::EnumError;
use super::{default_value, Entry};
use crate::core::{assign, encode, Field, Listeners, Observable, Schema};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A name→value universe with a selected subset.
///
/// The selection is always a subset of the universe and never larger than
/// the effective cap: the configured `max` when positive, otherwise the
/// current size of the universe. `reset` clears the selection only.
///
/// # Example
///
/// ```rust
/// use rok::enumeration::{EnumError, Enumeration};
/// use serde_json::json;
///
/// let mut colour = Enumeration::new("colour", "Colour").with_max(1);
/// colour.add("red", Some(json!(1)));
/// colour.add("green", Some(json!(2)));
///
/// colour.set("red").unwrap();
/// assert!(matches!(
///     colour.set("green"),
///     Err(EnumError::TooManySelections { max: 1, current: 1 })
/// ));
/// assert_eq!(colour.count_selected(), 1);
/// ```
pub struct Enumeration {
    listeners: Listeners,
    name: String,
    title: String,
    meta: Value,
    max: usize,
    valid: BTreeMap<String, Value>,
    names: Vec<String>,
    selected: BTreeSet<String>,
}

impl Default for Enumeration {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Enumeration {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            listeners: Listeners::new(),
            name: name.into(),
            title: title.into(),
            meta: Value::Null,
            max: 0,
            valid: BTreeMap::new(),
            names: Vec::new(),
            selected: BTreeSet::new(),
        }
    }

    /// Cap the number of simultaneous selections; 0 means uncapped.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max;
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

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.notify();
    }

    pub fn meta(&self) -> &Value {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: Value) {
        self.meta = meta;
        self.notify();
    }

    /// Effective selection cap.
    pub fn max(&self) -> usize {
        if self.max > 0 {
            self.max
        } else {
            self.valid.len()
        }
    }

    /// Add `name` to the universe. A missing value is stored as `true`;
    /// adding an existing name replaces its value and keeps its position.
    pub fn add(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        let value = value.unwrap_or_else(default_value);
        if let Some(existing) = self.valid.get_mut(&name) {
            *existing = value;
        } else {
            self.names.push(name.clone());
            self.valid.insert(name, value);
        }
        self.notify();
    }

    /// Remove `name` from the universe and the selection. Unknown names are
    /// ignored.
    pub fn del(&mut self, name: &str) {
        if self.valid.remove(name).is_none() {
            return;
        }
        self.names.retain(|existing| existing != name);
        self.selected.remove(name);
        self.notify();
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.valid.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Entry> {
        self.valid.get(name).map(|value| Entry {
            name: name.to_string(),
            value: value.clone(),
        })
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.valid.get(name)
    }

    /// Universe names in insertion order.
    pub fn all_valid_names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn all_valid_values(&self) -> Vec<&Value> {
        self.names
            .iter()
            .filter_map(|name| self.valid.get(name))
            .collect()
    }

    pub fn all_valid(&self) -> Vec<Entry> {
        self.names.iter().filter_map(|name| self.get(name)).collect()
    }

    /// Selected names in universe order.
    pub fn all_selected_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| self.selected.contains(*name))
            .map(String::as_str)
            .collect()
    }

    pub fn all_selected_values(&self) -> Vec<&Value> {
        self.all_selected_names()
            .into_iter()
            .filter_map(|name| self.valid.get(name))
            .collect()
    }

    pub fn all_selected(&self) -> Vec<Entry> {
        self.all_selected_names()
            .into_iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Size of the universe.
    pub fn count(&self) -> usize {
        self.valid.len()
    }

    pub fn count_selected(&self) -> usize {
        self.selected.len()
    }

    /// The single selected name, `None` when nothing is selected.
    pub fn selected_name(&self) -> Result<Option<&str>, EnumError> {
        match self.selected.len() {
            0 => Ok(None),
            1 => Ok(self.selected.iter().next().map(String::as_str)),
            count => Err(EnumError::MultipleSelected { count }),
        }
    }

    pub fn selected_value(&self) -> Result<Option<&Value>, EnumError> {
        Ok(self
            .selected_name()?
            .and_then(|name| self.valid.get(name)))
    }

    pub fn selected(&self) -> Result<Option<Entry>, EnumError> {
        Ok(self.selected_name()?.and_then(|name| self.get(name)))
    }

    /// Select `name`. Selecting an already selected name is a no-op.
    pub fn set(&mut self, name: &str) -> Result<(), EnumError> {
        self.ensure_allowed(name)?;

        if self.selected.contains(name) {
            return Ok(());
        }

        let max = self.max();
        if self.selected.len() + 1 > max {
            tracing::debug!(
                model = %self.name,
                entry = %name,
                max,
                "selection cap reached"
            );
            return Err(EnumError::TooManySelections {
                max,
                current: self.selected.len(),
            });
        }

        self.selected.insert(name.to_string());
        self.notify();
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> Result<(), EnumError> {
        self.ensure_allowed(name)?;
        self.selected.remove(name);
        self.notify();
        Ok(())
    }

    pub fn toggle(&mut self, name: &str) -> Result<(), EnumError> {
        self.ensure_allowed(name)?;
        if self.selected.contains(name) {
            self.unset(name)
        } else {
            self.set(name)
        }
    }

    pub fn set_to(&mut self, name: &str, selected: bool) -> Result<(), EnumError> {
        self.ensure_allowed(name)?;
        if selected {
            self.set(name)
        } else {
            self.unset(name)
        }
    }

    pub fn clear_selected(&mut self) {
        self.selected.clear();
        self.notify();
    }

    fn ensure_allowed(&self, name: &str) -> Result<(), EnumError> {
        if self.is_allowed(name) {
            Ok(())
        } else {
            tracing::debug!(model = %self.name, entry = %name, "name not in universe");
            Err(EnumError::NotAllowed {
                model: self.name.clone(),
                name: name.to_string(),
            })
        }
    }
}

impl fmt::Debug for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumeration")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("max", &self.max)
            .field("names", &self.names)
            .field("selected", &self.selected)
            .finish()
    }
}

impl Observable for Enumeration {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

impl Schema for Enumeration {
    const KIND: &'static str = "Enum";
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
        Field::property(
            "max",
            |m: &Self| encode(&m.max),
            |m: &mut Self, value| assign(&mut m.max, value),
        ),
        Field::object(
            "meta",
            |m: &Self| m.meta.clone(),
            |m: &mut Self, value| assign(&mut m.meta, value),
        ),
        Field::object(
            "valid",
            |m: &Self| encode(&m.valid),
            |m: &mut Self, value| assign(&mut m.valid, value),
        ),
        Field::object(
            "names",
            |m: &Self| encode(&m.names),
            |m: &mut Self, value| assign(&mut m.names, value),
        ),
        Field::object(
            "selected",
            |m: &Self| encode(&m.selected),
            |m: &mut Self, value| assign(&mut m.selected, value),
        )
        .reset_with(|m: &mut Self| m.selected.clear()),
    ];

    fn after_restore(&mut self) {
        let valid = &self.valid;
        let mut seen = BTreeSet::new();
        self.names
            .retain(|name| valid.contains_key(name) && seen.insert(name.clone()));
        for name in valid.keys() {
            if !seen.contains(name) {
                self.names.push(name.clone());
            }
        }
        self.selected.retain(|name| valid.contains_key(name));

        let max = self.max();
        if self.selected.len() > max {
            tracing::debug!(
                model = %self.name,
                max,
                selected = self.selected.len(),
                "restored selection over cap, trimming"
            );
            let keep: BTreeSet<String> = self
                .names
                .iter()
                .filter(|name| self.selected.contains(*name))
                .take(max)
                .cloned()
                .collect();
            self.selected = keep;
        }
    }
}
