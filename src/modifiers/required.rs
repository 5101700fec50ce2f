use std::borrow::Cow;

use crate::error::ErrorFeedback;
use crate::schema::{Context, Schema, SchemaRef};
use crate::value::Value;

/// Wraps a shared schema so that it reports type mismatches.
///
/// Composite kinds wrap their subschemas with this (union alternatives and
/// array elements), so a mismatch is reported at the subschema's path even
/// if the caller never called `required()` on it.
#[derive(Clone)]
pub struct Required {
    inner: SchemaRef,
}

impl Required {
    pub fn new(inner: SchemaRef) -> Self {
        Self { inner }
    }

    /// Access the wrapped schema.
    pub fn inner_schema(&self) -> &SchemaRef {
        &self.inner
    }
}

impl Schema for Required {
    fn type_name(&self) -> Cow<'_, str> {
        self.inner.type_name()
    }

    fn validate_type(&self, value: &Value) -> bool {
        self.inner.validate_type(value)
    }

    fn is_required(&self) -> bool {
        true
    }

    fn context(&self) -> &Context {
        self.inner.context()
    }

    // Go through `validate` so kinds that override it keep their behaviour.
    fn validate_value_with_correct_type(&self, value: &Value, path: &str) -> ErrorFeedback {
        self.inner.validate(value, path)
    }
}
