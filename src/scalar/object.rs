use super::scalar_model;
use serde_json::Value;

scalar_model! {
    /// An opaque JSON value, `null` by default.
    Object {
        kind: "Object",
        field: obj: Value = Value::Null,
        input: Value,
    }
}
