//! Single-value containers.
//!
//! Each holds one resettable property next to the usual `name`, `title`,
//! `opts` and `meta` identity fields, and notifies on every `set`.

mod boolean;
mod number;
mod object;
mod text;

pub use boolean::Boolean;
pub use number::Number;
pub use object::Object;
pub use text::Text;

/// Declare a single-value container.
///
/// Generates the struct, its constructors and identity accessors, `get` and
/// `set` (taking `input`) over the value field, and the `Observable` and
/// `Schema` impls. The value field is the only one cleared by `reset`.
macro_rules! scalar_model {
    (
        $(#[$meta:meta])*
        $name:ident {
            kind: $kind:literal,
            field: $field:ident: $ty:ty = $default:expr,
            input: $input:ty,
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            listeners: $crate::core::Listeners,
            name: String,
            title: String,
            opts: serde_json::Value,
            meta: serde_json::Value,
            $field: $ty,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new("", "")
            }
        }

        impl $name {
            pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
                Self {
                    listeners: $crate::core::Listeners::new(),
                    name: name.into(),
                    title: title.into(),
                    opts: serde_json::Value::Object(Default::default()),
                    meta: serde_json::Value::Object(Default::default()),
                    $field: $default,
                }
            }

            pub fn with_opts(mut self, opts: serde_json::Value) -> Self {
                self.opts = opts;
                self
            }

            pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
                self.meta = meta;
                self
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn title(&self) -> &str {
                &self.title
            }

            pub fn opts(&self) -> &serde_json::Value {
                &self.opts
            }

            pub fn meta(&self) -> &serde_json::Value {
                &self.meta
            }

            pub fn get(&self) -> &$ty {
                &self.$field
            }

            pub fn set(&mut self, value: $input) {
                self.$field = value.into();
                $crate::core::Observable::notify(self);
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("name", &self.name)
                    .field(stringify!($field), &self.$field)
                    .finish()
            }
        }

        impl $crate::core::Observable for $name {
            fn listeners(&self) -> &$crate::core::Listeners {
                &self.listeners
            }
        }

        impl $crate::core::Schema for $name {
            const KIND: &'static str = $kind;
            const FIELDS: &'static [$crate::core::Field<Self>] = &[
                $crate::core::Field::property(
                    "name",
                    |m: &Self| $crate::core::encode(&m.name),
                    |m: &mut Self, value| $crate::core::assign(&mut m.name, value),
                ),
                $crate::core::Field::property(
                    "title",
                    |m: &Self| $crate::core::encode(&m.title),
                    |m: &mut Self, value| $crate::core::assign(&mut m.title, value),
                ),
                $crate::core::Field::property(
                    stringify!($field),
                    |m: &Self| $crate::core::encode(&m.$field),
                    |m: &mut Self, value| $crate::core::assign(&mut m.$field, value),
                )
                .reset_with(|m: &mut Self| m.$field = $default),
                $crate::core::Field::object(
                    "opts",
                    |m: &Self| m.opts.clone(),
                    |m: &mut Self, value| $crate::core::assign(&mut m.opts, value),
                ),
                $crate::core::Field::object(
                    "meta",
                    |m: &Self| m.meta.clone(),
                    |m: &mut Self, value| $crate::core::assign(&mut m.meta, value),
                ),
            ];
        }
    };
}

pub(crate) use scalar_model;
