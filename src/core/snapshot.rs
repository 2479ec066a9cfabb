//! Plain snapshot structure produced by `extract` and consumed by `restore`.

use super::error::SnapshotError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mapping from declared field names to owned values.
///
/// Sub-model entries are nested JSON objects. Every value is an owned copy,
/// so a snapshot never aliases the state of the model it was taken from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Value recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Record `value` for `field`, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Remove and return the value recorded for `field`.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in the snapshot.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Snapshot {
    type Error = SnapshotError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(SnapshotError::InvalidShape),
        }
    }
}

/// Serialize a field value into an owned JSON value.
///
/// The field types used by the containers always serialize; anything that
/// does not is recorded as `null`.
pub fn encode<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Decode an owned JSON value, treating `null` as the type's default.
pub fn decode<T: DeserializeOwned + Default>(value: Value) -> Result<T, serde_json::Error> {
    if value.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(value)
    }
}

/// Decode `value` into `slot`.
pub fn assign<T: DeserializeOwned + Default>(
    slot: &mut T,
    value: Value,
) -> Result<(), serde_json::Error> {
    *slot = decode(value)?;
    Ok(())
}
