//! Tri-state enumeration: every name is included, excluded or ignored.

use super::error::EnumError;
use super::{default_value, Entry};
use crate::core::{assign, encode, Field, Listeners, Observable, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// The bucket a universe name is classified into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Include,
    Exclude,
    #[default]
    Ignore,
}

impl Classification {
    pub const INCLUDE: &'static str = "include";
    pub const EXCLUDE: &'static str = "exclude";
    pub const IGNORE: &'static str = "ignore";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Include => Self::INCLUDE,
            Self::Exclude => Self::EXCLUDE,
            Self::Ignore => Self::IGNORE,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = EnumError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            Self::INCLUDE => Ok(Self::Include),
            Self::EXCLUDE => Ok(Self::Exclude),
            Self::IGNORE => Ok(Self::Ignore),
            other => Err(EnumError::InvalidTarget {
                target: other.to_string(),
            }),
        }
    }
}

/// A name→value universe where each name sits in exactly one bucket.
///
/// Classification is held as a single map from name to bucket, so a name can
/// never be in two buckets at once. Names start out ignored, and `reset`
/// puts every name back into the ignore bucket.
///
/// # Example
///
/// ```rust
/// use rok::enumeration::TriStateEnumeration;
/// use rok::Model;
///
/// let mut status = TriStateEnumeration::new("status", "Status");
/// status.add("open", None);
/// status.add("closed", None);
///
/// status.set_include("open").unwrap();
/// assert!(status.is_included("open"));
/// assert!(!status.is_ignored("open"));
///
/// status.reset();
/// assert!(status.is_ignored("open"));
/// ```
pub struct TriStateEnumeration {
    listeners: Listeners,
    name: String,
    title: String,
    opts: Value,
    meta: Value,
    valid: BTreeMap<String, Value>,
    names: Vec<String>,
    classes: BTreeMap<String, Classification>,
}

impl Default for TriStateEnumeration {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl TriStateEnumeration {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            listeners: Listeners::new(),
            name: name.into(),
            title: title.into(),
            opts: Value::Object(Default::default()),
            meta: Value::Object(Default::default()),
            valid: BTreeMap::new(),
            names: Vec::new(),
            classes: BTreeMap::new(),
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

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.notify();
    }

    pub fn opts(&self) -> &Value {
        &self.opts
    }

    pub fn set_opts(&mut self, opts: Value) {
        self.opts = opts;
        self.notify();
    }

    pub fn meta(&self) -> &Value {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: Value) {
        self.meta = meta;
        self.notify();
    }

    /// Add `name` to the universe, classified as ignored. Re-adding an
    /// existing name replaces its value and keeps its classification.
    pub fn add(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        let value = value.unwrap_or_else(default_value);
        if let Some(existing) = self.valid.get_mut(&name) {
            *existing = value;
        } else {
            self.names.push(name.clone());
            self.classes.insert(name.clone(), Classification::Ignore);
            self.valid.insert(name, value);
        }
        self.notify();
    }

    pub fn del(&mut self, name: &str) {
        if self.valid.remove(name).is_none() {
            return;
        }
        self.names.retain(|existing| existing != name);
        self.classes.remove(name);
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

    /// Bucket currently holding `name`, if it is in the universe.
    pub fn classification(&self, name: &str) -> Option<Classification> {
        self.classes.get(name).copied()
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.classification(name) == Some(Classification::Include)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.classification(name) == Some(Classification::Exclude)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.classification(name) == Some(Classification::Ignore)
    }

    pub fn count_valid(&self) -> usize {
        self.valid.len()
    }

    pub fn count_included(&self) -> usize {
        self.count(Classification::Include)
    }

    pub fn count_excluded(&self) -> usize {
        self.count(Classification::Exclude)
    }

    pub fn count_ignored(&self) -> usize {
        self.count(Classification::Ignore)
    }

    /// Sorted names of the universe.
    pub fn all_valid_names(&self) -> Vec<&str> {
        self.valid.keys().map(String::as_str).collect()
    }

    /// Names of the universe in the order they were added.
    pub fn all_valid_names_in_order(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn all_included_names(&self) -> Vec<&str> {
        self.names_in(Classification::Include)
    }

    pub fn all_excluded_names(&self) -> Vec<&str> {
        self.names_in(Classification::Exclude)
    }

    pub fn all_ignored_names(&self) -> Vec<&str> {
        self.names_in(Classification::Ignore)
    }

    pub fn set_include(&mut self, name: &str) -> Result<(), EnumError> {
        self.classify(name, Classification::Include)
    }

    pub fn set_exclude(&mut self, name: &str) -> Result<(), EnumError> {
        self.classify(name, Classification::Exclude)
    }

    pub fn set_ignore(&mut self, name: &str) -> Result<(), EnumError> {
        self.classify(name, Classification::Ignore)
    }

    /// Move `name` into the bucket named by `target`
    /// (`"include"`, `"exclude"` or `"ignore"`).
    pub fn set(&mut self, name: &str, target: &str) -> Result<(), EnumError> {
        self.ensure_allowed(name)?;
        let target = target.parse::<Classification>()?;
        self.classify(name, target)
    }

    /// Move `name` into `target`. Already being there is a no-op.
    pub fn classify(&mut self, name: &str, target: Classification) -> Result<(), EnumError> {
        self.ensure_allowed(name)?;

        if self.classes.get(name) == Some(&target) {
            return Ok(());
        }

        self.classes.insert(name.to_string(), target);
        self.notify();
        Ok(())
    }

    fn count(&self, bucket: Classification) -> usize {
        self.classes.values().filter(|class| **class == bucket).count()
    }

    fn names_in(&self, bucket: Classification) -> Vec<&str> {
        self.classes
            .iter()
            .filter(|(_, class)| **class == bucket)
            .map(|(name, _)| name.as_str())
            .collect()
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

    fn ignore_all(&mut self) {
        self.classes = self
            .valid
            .keys()
            .map(|name| (name.clone(), Classification::Ignore))
            .collect();
    }
}

impl fmt::Debug for TriStateEnumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriStateEnumeration")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("names", &self.names)
            .field("classes", &self.classes)
            .finish()
    }
}

impl Observable for TriStateEnumeration {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

impl Schema for TriStateEnumeration {
    const KIND: &'static str = "EnumTri";
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
            "classification",
            |m: &Self| encode(&m.classes),
            |m: &mut Self, value| assign(&mut m.classes, value),
        )
        .reset_with(|m: &mut Self| m.ignore_all()),
    ];

    fn after_restore(&mut self) {
        let valid = &self.valid;
        self.classes.retain(|name, _| valid.contains_key(name));
        for name in valid.keys() {
            self.classes.entry(name.clone()).or_default();
        }
        let mut seen = BTreeSet::new();
        self.names
            .retain(|name| valid.contains_key(name) && seen.insert(name.clone()));
        for name in valid.keys() {
            if !seen.contains(name) {
                self.names.push(name.clone());
            }
        }
    }
}
