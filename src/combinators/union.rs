use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::{Arc, OnceLock};

use crate::error::ErrorFeedback;
use crate::modifiers::Required;
use crate::schema::{Context, Schema, SchemaCore, SchemaRef};
use crate::value::Value;

/// Union of any number of schemas. Created via [`vld_chain::union()`](crate::union())
/// or built up with [`or`](UnionSchema::or).
///
/// Alternatives are tried in declaration order. Those whose type check
/// rejects the value are skipped; the first remaining alternative that
/// reports no errors makes the whole union pass. Otherwise the errors of
/// every tried alternative are returned together. A value no alternative
/// accepts by shape gets a single TYPE error naming all of them.
///
/// Shape means the alternative's own type check, which is shallow for
/// arrays: any array selects an `array<number>` alternative, and an element
/// of the wrong shape is then reported at its own path (`v[0]`).
///
/// # Example
/// ```
/// use vld_chain::prelude::*;
///
/// let id = vld_chain::union([
///     vld_chain::string().minlength(5).shared(),
///     vld_chain::number().integer().shared(),
/// ]);
/// assert!(id.validate(&Value::from(42), "id").is_valid());
/// assert!(id.validate(&Value::from("abcdef"), "id").is_valid());
/// assert_eq!(id.validate(&Value::from(2.5), "id").errors_count, 1);
/// ```
#[derive(Clone)]
pub struct UnionSchema {
    core: SchemaCore<Infallible>,
    alternatives: Vec<SchemaRef>,
    type_name: OnceLock<String>,
}

impl UnionSchema {
    pub fn new(ctx: Context) -> Self {
        Self {
            core: SchemaCore::new(ctx),
            alternatives: Vec::new(),
            type_name: OnceLock::new(),
        }
    }

    /// Add an alternative. It is treated as required.
    pub fn or<S: Schema + 'static>(self, alternative: S) -> Self {
        self.or_shared(Arc::new(alternative))
    }

    /// Same as [`or`](Self::or) with a shared schema.
    pub fn or_shared(mut self, alternative: SchemaRef) -> Self {
        self.alternatives
            .push(Arc::new(Required::new(alternative)));
        self.type_name = OnceLock::new();
        self
    }

    /// Report a type mismatch (no alternative accepts the shape) instead of
    /// silently ignoring the value.
    pub fn required(mut self) -> Self {
        self.core.set_required();
        self
    }

    pub fn alternatives(&self) -> &[SchemaRef] {
        &self.alternatives
    }
}

impl Schema for UnionSchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.type_name.get_or_init(|| {
            if self.alternatives.is_empty() {
                return "never".to_string();
            }
            self.alternatives
                .iter()
                .map(|alt| alt.type_name().into_owned())
                .collect::<Vec<_>>()
                .join("|")
        }))
    }

    fn validate_type(&self, value: &Value) -> bool {
        self.alternatives.iter().any(|alt| alt.validate_type(value))
    }

    fn is_required(&self) -> bool {
        self.core.is_required()
    }

    fn context(&self) -> &Context {
        self.core.context()
    }

    fn validate_value_with_correct_type(&self, value: &Value, path: &str) -> ErrorFeedback {
        let mut errors = Vec::new();

        for (index, alternative) in self.alternatives.iter().enumerate() {
            if !alternative.validate_type(value) {
                continue;
            }
            let feedback = alternative.validate(value, path);
            if feedback.is_valid() {
                tracing::trace!(path, index, "union alternative matched");
                return ErrorFeedback::empty();
            }
            errors.extend(feedback.errors.into_flat());
        }

        tracing::trace!(path, errors = errors.len(), "no union alternative matched");
        ErrorFeedback::from_list(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{BooleanSchema, NumberSchema, StringSchema};

    #[test]
    fn type_name_joins_alternatives() {
        let ctx = Context::default();
        let schema = UnionSchema::new(ctx.clone())
            .or(StringSchema::new(ctx.clone()))
            .or(NumberSchema::new(ctx.clone()))
            .or(BooleanSchema::new(ctx));
        assert_eq!(schema.type_name(), "string|number|boolean");
    }

    #[test]
    fn empty_union_accepts_nothing() {
        let schema = UnionSchema::new(Context::default()).required();
        assert_eq!(schema.type_name(), "never");
        assert_eq!(schema.validate(&Value::from(1), "").errors_count, 1);
    }
}
