//! The uniform reset/extract/restore contract.

use super::error::SnapshotError;
use super::observable::Observable;
use super::schema::{FieldKind, Schema};
use super::snapshot::Snapshot;
use serde_json::Value;

/// Object-safe view of a container's persistent state.
///
/// Implemented for every [`Schema`] type by a blanket impl, so concrete
/// containers only declare their fields. Sub-models are held and walked as
/// `dyn Model`.
pub trait Model: Observable {
    /// Type tag of the container (`"Enum"`, `"DateRange"`, ...).
    fn kind(&self) -> &'static str;

    /// Reinitialize resettable properties, then resettable objects, then
    /// every present sub-model, and notify once.
    fn reset(&mut self);

    /// Owned snapshot of every declared field.
    fn extract(&self) -> Snapshot;

    /// Overwrite declared state from `snapshot`, then notify once.
    ///
    /// Missing or `null` entries restore a field to its default and drop an
    /// absent sub-model. On error the fields already written keep their
    /// restored values and no notification is sent.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

impl<M: Schema> Model for M {
    fn kind(&self) -> &'static str {
        M::KIND
    }

    fn reset(&mut self) {
        for field in M::FIELDS {
            if let FieldKind::Property(slot) = field.kind {
                if let Some(reset) = slot.reset {
                    reset(self);
                }
            }
        }

        for field in M::FIELDS {
            if let FieldKind::Object(slot) = field.kind {
                if let Some(reset) = slot.reset {
                    reset(self);
                }
            }
        }

        for field in M::FIELDS {
            if let FieldKind::SubModel(nested) = field.kind {
                if let Some(sub) = (nested.get_mut)(self) {
                    sub.reset();
                }
            }
        }

        self.notify();
    }

    fn extract(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for field in M::FIELDS {
            let value = match field.kind {
                FieldKind::Property(slot) | FieldKind::Object(slot) => (slot.read)(self),
                FieldKind::SubModel(nested) => (nested.get)(self)
                    .map(|sub| sub.extract().into_value())
                    .unwrap_or(Value::Null),
            };
            snapshot.insert(field.name, value);
        }
        snapshot
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        tracing::debug!(kind = M::KIND, fields = snapshot.len(), "restoring snapshot");

        for field in M::FIELDS {
            if let FieldKind::Property(slot) = field.kind {
                write_slot(self, field.name, slot.write, snapshot)?;
            }
        }

        for field in M::FIELDS {
            if let FieldKind::Object(slot) = field.kind {
                write_slot(self, field.name, slot.write, snapshot)?;
            }
        }

        for field in M::FIELDS {
            if let FieldKind::SubModel(nested) = field.kind {
                match snapshot.get(field.name) {
                    None | Some(Value::Null) => (nested.clear)(self),
                    Some(Value::Object(map)) => {
                        let sub = (nested.get_mut)(self).ok_or(SnapshotError::MissingSubModel {
                            field: field.name,
                        })?;
                        sub.restore(&Snapshot::from(map.clone()))?;
                    }
                    Some(_) => return Err(SnapshotError::NotAnObject { field: field.name }),
                }
            }
        }

        self.after_restore();
        self.notify();
        Ok(())
    }
}

fn write_slot<M>(
    model: &mut M,
    name: &'static str,
    write: fn(&mut M, Value) -> Result<(), serde_json::Error>,
    snapshot: &Snapshot,
) -> Result<(), SnapshotError> {
    let value = snapshot.get(name).cloned().unwrap_or(Value::Null);
    write(model, value).map_err(|source| SnapshotError::Field {
        field: name,
        source,
    })
}
