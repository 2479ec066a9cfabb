//! Explicit per-container schema descriptors.
//!
//! A model's persistent state is partitioned into three kinds of field:
//! scalar properties, deep-copied objects and nested sub-models. Each
//! container declares its fields once as a static list of [`Field`]s, and
//! reset/extract/restore walk that list uniformly.

use super::error::SnapshotError;
use super::model::Model;
use super::observable::Observable;
use serde_json::Value;
use std::collections::HashSet;

/// Reads a field's current value as an owned JSON value.
pub type ReadFn<M> = fn(&M) -> Value;

/// Overwrites a field from an owned JSON value (`null` means "default").
pub type WriteFn<M> = fn(&mut M, Value) -> Result<(), serde_json::Error>;

/// Reinitializes a field to its type-specific default.
pub type ResetFn<M> = fn(&mut M);

/// Accessors for a property or object field.
pub struct Slot<M: 'static> {
    pub read: ReadFn<M>,
    pub write: WriteFn<M>,
    /// `None` marks a field that survives `reset` (identity, universe, ...)
    pub reset: Option<ResetFn<M>>,
}

impl<M> Clone for Slot<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Slot<M> {}

/// Accessors for a sub-model field. The reference may be absent.
pub struct Nested<M: 'static> {
    pub get: fn(&M) -> Option<&dyn Model>,
    pub get_mut: fn(&mut M) -> Option<&mut dyn Model>,
    /// Drops the sub-model reference (used when a snapshot marks it absent)
    pub clear: fn(&mut M),
}

impl<M> Clone for Nested<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Nested<M> {}

/// What kind of state a field holds.
pub enum FieldKind<M: 'static> {
    Property(Slot<M>),
    Object(Slot<M>),
    SubModel(Nested<M>),
}

impl<M> Clone for FieldKind<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for FieldKind<M> {}

/// A single declared field of a model.
pub struct Field<M: 'static> {
    pub name: &'static str,
    pub kind: FieldKind<M>,
}

impl<M> Clone for Field<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Field<M> {}

impl<M: 'static> Field<M> {
    /// A scalar property that persists across `reset`.
    pub const fn property(name: &'static str, read: ReadFn<M>, write: WriteFn<M>) -> Self {
        Self {
            name,
            kind: FieldKind::Property(Slot {
                read,
                write,
                reset: None,
            }),
        }
    }

    /// An object field that persists across `reset`.
    pub const fn object(name: &'static str, read: ReadFn<M>, write: WriteFn<M>) -> Self {
        Self {
            name,
            kind: FieldKind::Object(Slot {
                read,
                write,
                reset: None,
            }),
        }
    }

    pub const fn sub_model(
        name: &'static str,
        get: fn(&M) -> Option<&dyn Model>,
        get_mut: fn(&mut M) -> Option<&mut dyn Model>,
        clear: fn(&mut M),
    ) -> Self {
        Self {
            name,
            kind: FieldKind::SubModel(Nested {
                get,
                get_mut,
                clear,
            }),
        }
    }

    /// Attach a reset function to a property or object field.
    ///
    /// Sub-models always reset through their own schema, so this leaves a
    /// sub-model field untouched.
    pub const fn reset_with(self, reset: ResetFn<M>) -> Self {
        let kind = match self.kind {
            FieldKind::Property(slot) => FieldKind::Property(Slot {
                read: slot.read,
                write: slot.write,
                reset: Some(reset),
            }),
            FieldKind::Object(slot) => FieldKind::Object(Slot {
                read: slot.read,
                write: slot.write,
                reset: Some(reset),
            }),
            FieldKind::SubModel(nested) => FieldKind::SubModel(nested),
        };
        Self {
            name: self.name,
            kind,
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, FieldKind::Property(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, FieldKind::Object(_))
    }

    pub fn is_sub_model(&self) -> bool {
        matches!(self.kind, FieldKind::SubModel(_))
    }
}

/// Declared persistent state of a container.
///
/// Implementing `Schema` (plus [`Observable`]) is all a container needs to
/// get reset/extract/restore through the blanket [`Model`] impl. Any field
/// not listed in `FIELDS` is invisible to those operations.
pub trait Schema: Observable + Sized + 'static {
    /// Type tag reported by [`Model::kind`].
    const KIND: &'static str;

    /// Every persisted field, in the order they are walked.
    const FIELDS: &'static [Field<Self>];

    /// Re-establish container invariants after a restore.
    ///
    /// Runs after every field has been written and before the single
    /// notification. Default implementation does nothing.
    fn after_restore(&mut self) {}

    fn property_names() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|field| field.is_property())
            .map(|field| field.name)
            .collect()
    }

    fn object_names() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|field| field.is_object())
            .map(|field| field.name)
            .collect()
    }

    fn sub_model_names() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|field| field.is_sub_model())
            .map(|field| field.name)
            .collect()
    }
}

/// Verify that no field name is declared twice, which keeps the property,
/// object and sub-model name sets pairwise disjoint.
pub fn check_schema<M: Schema>() -> Result<(), SnapshotError> {
    let mut seen = HashSet::new();
    for field in M::FIELDS {
        if !seen.insert(field.name) {
            return Err(SnapshotError::DuplicateField { field: field.name });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observable::Listeners;
    use crate::core::snapshot::{assign, encode};

    #[derive(Default)]
    struct Broken {
        listeners: Listeners,
        label: String,
    }

    impl Observable for Broken {
        fn listeners(&self) -> &Listeners {
            &self.listeners
        }
    }

    impl Schema for Broken {
        const KIND: &'static str = "Broken";
        const FIELDS: &'static [Field<Self>] = &[
            Field::property(
                "label",
                |m: &Self| encode(&m.label),
                |m: &mut Self, value| assign(&mut m.label, value),
            ),
            Field::object(
                "label",
                |m: &Self| encode(&m.label),
                |m: &mut Self, value| assign(&mut m.label, value),
            ),
        ];
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = check_schema::<Broken>();
        assert!(matches!(
            result,
            Err(SnapshotError::DuplicateField { field: "label" })
        ));
    }

    #[test]
    fn names_are_grouped_by_kind() {
        assert_eq!(Broken::property_names(), vec!["label"]);
        assert_eq!(Broken::object_names(), vec!["label"]);
        assert!(Broken::sub_model_names().is_empty());
    }

    #[test]
    fn reset_with_attaches_reset() {
        let field: Field<Broken> = Field::property(
            "label",
            |m: &Broken| encode(&m.label),
            |m: &mut Broken, value| assign(&mut m.label, value),
        )
        .reset_with(|m: &mut Broken| m.label.clear());

        let mut model = Broken {
            label: "x".to_string(),
            ..Default::default()
        };
        match field.kind {
            FieldKind::Property(slot) => (slot.reset.unwrap())(&mut model),
            _ => panic!("Expected a property"),
        }
        assert!(model.label.is_empty());
    }
}
