use std::borrow::Cow;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use crate::error::ErrorFeedback;
use crate::schema::{Context, Schema, SchemaCore, SchemaRef};
use crate::value::Value;

/// Object schema with runtime-defined keys. Created via
/// [`vld_chain::object()`](crate::object).
///
/// Every declared key is validated, present or not: a missing key is
/// validated as [`Value::Undefined`], so a required key that is absent gets
/// a TYPE error at its path. Keys the schema does not declare are ignored.
///
/// The report is a map from each declared key to that key's own error
/// collection (nested objects nest further), and `errors_count` is the sum
/// over all keys.
///
/// # Example
/// ```
/// use vld_chain::prelude::*;
///
/// let schema = vld_chain::object()
///     .field("name", vld_chain::string().minlength(1).required())
///     .field("age", vld_chain::number().integer().min(0.0));
///
/// let report = schema.validate(&Value::object([("age", 2.5)]), "user");
/// assert_eq!(report.errors_count, 2);
/// assert_eq!(report.errors.get("name").unwrap().as_list().unwrap()[0].path(), "user.name");
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    core: SchemaCore<Infallible>,
    fields: Vec<(String, SchemaRef)>,
    allow_arrays: bool,
    allow_functions: bool,
}

impl ObjectSchema {
    pub fn new(ctx: Context) -> Self {
        Self {
            core: SchemaCore::new(ctx),
            fields: Vec::new(),
            allow_arrays: false,
            allow_functions: false,
        }
    }

    /// Declare `name` and the schema its value must satisfy. Declaring the
    /// same key again replaces its schema.
    pub fn field<S: Schema + 'static>(self, name: impl Into<String>, schema: S) -> Self {
        self.field_shared(name, Arc::new(schema))
    }

    /// Same as [`field`](Self::field) with a shared schema.
    pub fn field_shared(mut self, name: impl Into<String>, schema: SchemaRef) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = schema,
            None => self.fields.push((name, schema)),
        }
        self
    }

    /// Report a type mismatch instead of silently ignoring the value.
    pub fn required(mut self) -> Self {
        self.core.set_required();
        self
    }

    /// Accept arrays as objects (their keys are the indexes).
    pub fn allow_arrays(mut self) -> Self {
        self.allow_arrays = true;
        self
    }

    /// Accept function values as objects.
    pub fn allow_functions(mut self) -> Self {
        self.allow_functions = true;
        self
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}

impl Schema for ObjectSchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("object")
    }

    fn validate_type(&self, value: &Value) -> bool {
        match value {
            Value::Object(_) => true,
            Value::Array(_) => self.allow_arrays,
            Value::Function(_) => self.allow_functions,
            _ => false,
        }
    }

    fn is_required(&self) -> bool {
        self.core.is_required()
    }

    fn context(&self) -> &Context {
        self.core.context()
    }

    fn validate_value_with_correct_type(&self, value: &Value, path: &str) -> ErrorFeedback {
        let mut errors = BTreeMap::new();
        let mut errors_count = 0;

        for (key, schema) in &self.fields {
            let key_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            let feedback = schema.validate(value.get(key), &key_path);
            errors_count += feedback.errors_count;
            errors.insert(key.clone(), feedback.errors);
        }

        ErrorFeedback::from_map(errors, errors_count)
    }
}
