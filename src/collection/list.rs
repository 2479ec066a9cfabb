//! Ordered list with a resettable working copy.

use super::error::ListError;
use crate::core::{assign, encode, Field, Listeners, Observable, Schema};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// An ordered sequence of JSON items.
///
/// The list keeps two copies: the working copy returned by the queries and
/// an original copy. Structural edits (`push`, `pop`, `shift`, `unshift`)
/// apply to both; item edits apply to the working copy only, so `reset`
/// discards them by copying the original back over the working copy.
///
/// # Example
///
/// ```rust
/// use rok::collection::List;
/// use rok::Model;
/// use serde_json::json;
///
/// let mut people = List::new("people", "People");
/// people.push(json!({ "name": "Ada", "age": 36 }));
/// people.set_item_key(0, "age", json!(37)).unwrap();
///
/// people.reset();
/// assert_eq!(people.list()[0]["age"], json!(36));
/// ```
pub struct List {
    listeners: Listeners,
    name: String,
    title: String,
    opts: Value,
    meta: Value,
    list: Vec<Value>,
    orig: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl List {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            listeners: Listeners::new(),
            name: name.into(),
            title: title.into(),
            opts: Value::Object(Default::default()),
            meta: Value::Object(Default::default()),
            list: Vec::new(),
            orig: Vec::new(),
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

    /// Working copy.
    pub fn list(&self) -> &[Value] {
        &self.list
    }

    pub fn count(&self) -> usize {
        self.list.len()
    }

    /// Append to both copies, returning the new length.
    pub fn push(&mut self, item: Value) -> usize {
        self.orig.push(item.clone());
        self.list.push(item);
        self.notify();
        self.list.len()
    }

    /// Take the last item from both copies.
    pub fn pop(&mut self) -> Option<Value> {
        let item = self.list.pop();
        self.orig.pop();
        self.notify();
        item
    }

    /// Take the first item from both copies.
    pub fn shift(&mut self) -> Option<Value> {
        let item = (!self.list.is_empty()).then(|| self.list.remove(0));
        if !self.orig.is_empty() {
            self.orig.remove(0);
        }
        self.notify();
        item
    }

    /// Prepend to both copies, returning the new length.
    pub fn unshift(&mut self, item: Value) -> usize {
        self.orig.insert(0, item.clone());
        self.list.insert(0, item);
        self.notify();
        self.list.len()
    }

    /// Replace the working item at `index`.
    pub fn set_item(&mut self, index: usize, item: Value) -> Result<(), ListError> {
        let len = self.list.len();
        let slot = self
            .list
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        *slot = item;
        self.notify();
        Ok(())
    }

    /// Set `key` on the working item at `index`.
    pub fn set_item_key(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), ListError> {
        self.item_object(index)?.insert(key.into(), value);
        self.notify();
        Ok(())
    }

    /// Remove `key` from the working item at `index`.
    pub fn remove_item_key(&mut self, index: usize, key: &str) -> Result<(), ListError> {
        self.item_object(index)?.remove(key);
        self.notify();
        Ok(())
    }

    /// Items whose `key` equals `value`.
    pub fn filter(&self, key: &str, value: &Value) -> Vec<&Value> {
        self.list
            .iter()
            .filter(|item| item.get(key) == Some(value))
            .collect()
    }

    pub fn filter_has_key(&self, key: &str) -> Vec<&Value> {
        self.list.iter().filter(|item| has_key(item, key)).collect()
    }

    pub fn filter_has_no_key(&self, key: &str) -> Vec<&Value> {
        self.list.iter().filter(|item| !has_key(item, key)).collect()
    }

    /// Stable sort of the working copy by the value under `key`.
    ///
    /// Numbers compare numerically and strings lexically. Items of
    /// different types order as booleans, numbers, strings, anything else,
    /// then items missing the key.
    pub fn sort(&mut self, key: &str) -> &[Value] {
        self.list
            .sort_by(|a, b| compare_keyed(a.get(key), b.get(key)));
        self.notify();
        &self.list
    }

    pub fn find_index(&self, key: &str, value: &Value) -> Option<usize> {
        self.list
            .iter()
            .position(|item| item.get(key) == Some(value))
    }

    pub fn find(&self, key: &str, value: &Value) -> Option<&Value> {
        self.list.iter().find(|item| item.get(key) == Some(value))
    }

    fn item_object(
        &mut self,
        index: usize,
    ) -> Result<&mut serde_json::Map<String, Value>, ListError> {
        let len = self.list.len();
        self.list
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?
            .as_object_mut()
            .ok_or(ListError::NotAnObject { index })
    }
}

fn has_key(item: &Value, key: &str) -> bool {
    item.as_object().is_some_and(|map| map.contains_key(key))
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Bool(_)) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(_) => 3,
        None => 4,
    }
}

fn compare_keyed(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("name", &self.name)
            .field("list", &self.list)
            .field("orig", &self.orig)
            .finish()
    }
}

impl Observable for List {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

impl Schema for List {
    const KIND: &'static str = "List";
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
            "list",
            |m: &Self| encode(&m.list),
            |m: &mut Self, value| assign(&mut m.list, value),
        )
        .reset_with(|m: &mut Self| m.list = m.orig.clone()),
        Field::object(
            "orig",
            |m: &Self| encode(&m.orig),
            |m: &mut Self, value| assign(&mut m.orig, value),
        ),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{check_schema, Model};
    use serde_json::json;

    fn people() -> List {
        let mut list = List::new("people", "People");
        list.push(json!({ "name": "Chidi", "age": 35 }));
        list.push(json!({ "name": "Eleanor", "age": 32, "admin": true }));
        list.push(json!({ "name": "Tahani", "age": 33 }));
        list
    }

    #[test]
    fn schema_is_disjoint() {
        assert!(check_schema::<List>().is_ok());
    }

    #[test]
    fn create_list() {
        let list = List::default();
        assert_eq!(list.kind(), "List");
        assert_eq!(list.name(), "");
        assert_eq!(list.title(), "");
        assert_eq!(list.opts(), &json!({}));
        assert_eq!(list.meta(), &json!({}));
        assert_eq!(list.count(), 0);

        let list = List::new("test", "Test")
            .with_opts(json!({ "thing": true }))
            .with_meta(json!({ "title": "Hello" }));
        assert_eq!(list.opts(), &json!({ "thing": true }));
        assert_eq!(list.meta(), &json!({ "title": "Hello" }));
    }

    #[test]
    fn push_pop_shift_unshift() {
        let mut list = List::default();
        assert_eq!(list.push(json!(2)), 1);
        assert_eq!(list.unshift(json!(1)), 2);
        assert_eq!(list.push(json!(3)), 3);
        assert_eq!(list.list(), &[json!(1), json!(2), json!(3)]);

        assert_eq!(list.shift(), Some(json!(1)));
        assert_eq!(list.pop(), Some(json!(3)));
        assert_eq!(list.list(), &[json!(2)]);

        list.reset();
        assert_eq!(list.list(), &[json!(2)]);
    }

    #[test]
    fn pop_and_shift_on_empty() {
        let mut list = List::default();
        assert_eq!(list.pop(), None);
        assert_eq!(list.shift(), None);
    }

    #[test]
    fn item_edits_are_discarded_by_reset() {
        let mut list = people();
        list.set_item(0, json!({ "name": "Jason" })).unwrap();
        list.set_item_key(1, "age", json!(40)).unwrap();
        list.remove_item_key(2, "age").unwrap();

        assert_eq!(list.list()[0], json!({ "name": "Jason" }));
        assert_eq!(list.list()[1]["age"], json!(40));
        assert!(list.list()[2].get("age").is_none());

        list.reset();
        assert_eq!(list.list(), people().list());
    }

    #[test]
    fn item_edits_report_bad_targets() {
        let mut list = people();
        list.push(json!("not an object"));

        assert_eq!(
            list.set_item(9, json!(1)),
            Err(ListError::IndexOutOfRange { index: 9, len: 4 })
        );
        assert_eq!(
            list.set_item_key(3, "age", json!(1)),
            Err(ListError::NotAnObject { index: 3 })
        );
        assert_eq!(
            list.remove_item_key(4, "age"),
            Err(ListError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn queries() {
        let list = people();

        assert_eq!(list.filter("age", &json!(33)).len(), 1);
        assert_eq!(list.filter_has_key("admin").len(), 1);
        assert_eq!(list.filter_has_no_key("admin").len(), 2);
        assert_eq!(list.find_index("name", &json!("Tahani")), Some(2));
        assert_eq!(list.find_index("name", &json!("Michael")), None);
        assert_eq!(
            list.find("name", &json!("Eleanor")).map(|item| &item["age"]),
            Some(&json!(32))
        );
    }

    #[test]
    fn sort_by_key() {
        let mut list = people();
        list.push(json!({ "name": "Janet" }));

        let names: Vec<_> = list
            .sort("age")
            .iter()
            .map(|item| item["name"].clone())
            .collect();

        assert_eq!(
            names,
            vec![
                json!("Eleanor"),
                json!("Tahani"),
                json!("Chidi"),
                json!("Janet")
            ]
        );
    }

    #[test]
    fn round_trip_keeps_both_copies() {
        let mut source = people();
        source.set_item_key(0, "age", json!(99)).unwrap();

        let mut target = List::default();
        target.restore(&source.extract()).unwrap();
        assert_eq!(target.list(), source.list());

        target.reset();
        assert_eq!(target.list()[0]["age"], json!(35));
    }
}
