//! # vld-chain: fluent, composable schema validation
//!
//! Build a schema by chaining constraints onto typed schema builders, then
//! validate any [`Value`](value::Value) against it. Validation never fails
//! fast on the whole input and never changes it: it returns an
//! [`ErrorFeedback`](error::ErrorFeedback) listing every failure with the
//! path where it happened.
//!
//! ## Quick Start
//!
//! ```rust
//! use vld_chain::prelude::*;
//!
//! let user = vld_chain::object()
//!     .field("name", vld_chain::string().minlength(2).required())
//!     .field("age", vld_chain::number().integer().min(0.0))
//!     .field("tags", vld_chain::array_of(vld_chain::string()).distinct());
//!
//! let input = Value::from(serde_json::json!({"name": "A", "age": 31, "tags": ["x", "x"]}));
//! let report = user.validate(&input, "user");
//!
//! assert_eq!(report.errors_count, 2);
//! let name_errors = report.errors.get("name").unwrap().as_list().unwrap();
//! assert_eq!(name_errors[0].kind(), ErrorKind::Range);
//! assert_eq!(name_errors[0].path(), "user.name");
//! ```
//!
//! ## Optional by default
//!
//! A value whose shape does not match the schema is treated as absent and
//! produces no error, unless the schema is marked `required()`. Type
//! mismatches are the only errors that stop validation of a value; every
//! other constraint is checked and reported.
//!
//! ## Registries
//!
//! [`registry::create_instance`] builds a namespace of constructors from
//! kind providers, optionally filtered, with a substitutable base contract
//! and error factory. New kinds plug in through [`registry::KindProvider`].

pub mod collections;
pub mod combinators;
pub mod error;
pub mod format;
pub mod input;
pub mod modifiers;
pub mod object;
pub mod primitives;
pub mod registry;
pub mod schema;
pub mod value;

pub use schema::validate;

// ---------------------------------------------------------------------------
// Convenience constructors (default context)
// ---------------------------------------------------------------------------

/// Create a string validation schema.
pub fn string() -> primitives::StringSchema {
    primitives::StringSchema::new(schema::Context::default())
}

/// Create a number validation schema (`f64`).
pub fn number() -> primitives::NumberSchema {
    primitives::NumberSchema::new(schema::Context::default())
}

/// Create a boolean validation schema.
pub fn boolean() -> primitives::BooleanSchema {
    primitives::BooleanSchema::new(schema::Context::default())
}

/// Create a date validation schema.
pub fn date() -> primitives::DateSchema {
    primitives::DateSchema::new(schema::Context::default())
}

/// Create a schema accepting only the given values.
///
/// ```
/// use vld_chain::prelude::*;
/// let level = vld_chain::enumeration([1, 2, 3]);
/// assert!(level.validate(&Value::from(2), "").is_valid());
/// assert!(!level.validate(&Value::from(4), "").is_valid());
/// ```
pub fn enumeration<I, V>(values: I) -> primitives::EnumSchema
where
    I: IntoIterator<Item = V>,
    V: Into<value::Value>,
{
    primitives::EnumSchema::new(schema::Context::default(), values)
}

/// Create a schema accepting only the values of an object's entries.
///
/// ```
/// use vld_chain::prelude::*;
/// let status = vld_chain::enumeration_of([("ACTIVE", "on"), ("INACTIVE", "off")]);
/// assert!(status.validate(&Value::from("off"), "").is_valid());
/// ```
pub fn enumeration_of<K, V, I>(entries: I) -> primitives::EnumSchema
where
    I: IntoIterator<Item = (K, V)>,
    V: Into<value::Value>,
{
    primitives::EnumSchema::from_object(schema::Context::default(), entries)
}

/// Create an array schema without an element schema.
pub fn array() -> collections::ArraySchema {
    collections::ArraySchema::new(schema::Context::default())
}

/// Create an array schema validating each element with `element`.
pub fn array_of<S: schema::Schema + 'static>(element: S) -> collections::ArraySchema {
    array().of(element)
}

/// Create an object schema. Declare keys with `.field(name, schema)`.
pub fn object() -> object::ObjectSchema {
    object::ObjectSchema::new(schema::Context::default())
}

/// Create a union of shared schemas. Use `.or(schema)` to add more.
///
/// ```
/// use vld_chain::prelude::*;
/// let schema = vld_chain::union([vld_chain::string().shared(), vld_chain::boolean().shared()]);
/// assert_eq!(schema.type_name(), "string|boolean");
/// ```
pub fn union<I>(alternatives: I) -> combinators::UnionSchema
where
    I: IntoIterator<Item = schema::SchemaRef>,
{
    alternatives
        .into_iter()
        .fold(
            combinators::UnionSchema::new(schema::Context::default()),
            combinators::UnionSchema::or_shared,
        )
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `vld_chain`.
pub mod prelude {
    pub use crate::collections::ArraySchema;
    pub use crate::combinators::UnionSchema;
    pub use crate::error::{
        ErrorCollection, ErrorFactory, ErrorFeedback, ErrorKind, SchemaError, ValidationError,
    };
    pub use crate::format::{flatten_errors, prettify};
    pub use crate::input::ValidationInput;
    pub use crate::object::ObjectSchema;
    pub use crate::primitives::{BooleanSchema, DateSchema, EnumSchema, NumberSchema, StringSchema};
    pub use crate::registry::{create_instance, Registry, RegistryOptions};
    pub use crate::schema::{validate, Checked, Context, Schema, SchemaRef};
    pub use crate::value::Value;
}
