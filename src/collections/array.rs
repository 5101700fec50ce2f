use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

use crate::error::{ErrorFeedback, ErrorKind, SchemaError, ValidationError};
use crate::modifiers::Required;
use crate::schema::{Checked, Constraint, Context, Schema, SchemaCore, SchemaRef};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayCheck {
    Distinct,
}

/// Schema for array validation. Created via [`vld_chain::array()`](crate::array)
/// or [`vld_chain::array_of()`](crate::array_of).
///
/// Validation order: the constraint chain (`distinct`, `predicate`, `not`),
/// then the length bounds, then the elements. A length violation stops
/// validation there. Elements are checked in index order and the first
/// element with errors stops iteration: only that element's errors are
/// reported, later elements are not looked at.
///
/// The element schema is always treated as required, so an element of the
/// wrong shape is reported at its own path (`items[3]`).
///
/// # Example
/// ```
/// use vld_chain::prelude::*;
///
/// let tags = vld_chain::array_of(vld_chain::string().minlength(1)).maxlength(10).distinct();
/// let report = tags.validate(&Value::array(["a", "", "a"]), "tags");
/// assert_eq!(report.errors_count, 2);
/// ```
#[derive(Clone)]
pub struct ArraySchema {
    core: SchemaCore<ArrayCheck>,
    element: Option<SchemaRef>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    type_name: OnceLock<String>,
}

impl ArraySchema {
    pub fn new(ctx: Context) -> Self {
        Self {
            core: SchemaCore::new(ctx),
            element: None,
            min_length: None,
            max_length: None,
            type_name: OnceLock::new(),
        }
    }

    /// Validate every element with `element`.
    ///
    /// # Panics
    /// If an element schema was already set.
    pub fn of<S: Schema + 'static>(self, element: S) -> Self {
        self.of_shared(Arc::new(element))
    }

    /// Same as [`of`](Self::of) with a shared schema.
    ///
    /// # Panics
    /// If an element schema was already set.
    pub fn of_shared(mut self, element: SchemaRef) -> Self {
        if self.element.is_some() {
            SchemaError::AlreadySet {
                schema: "array",
                option: "of",
            }
            .raise();
        }
        self.element = Some(Arc::new(Required::new(element)));
        self.type_name = OnceLock::new();
        self
    }

    /// Minimum number of elements (inclusive).
    ///
    /// # Panics
    /// If the minimum length was already set.
    pub fn minlength(mut self, len: usize) -> Self {
        if self.min_length.replace(len).is_some() {
            SchemaError::AlreadySet {
                schema: "array",
                option: "minlength",
            }
            .raise();
        }
        self
    }

    /// Maximum number of elements (inclusive).
    ///
    /// # Panics
    /// If the maximum length was already set.
    pub fn maxlength(mut self, len: usize) -> Self {
        if self.max_length.replace(len).is_some() {
            SchemaError::AlreadySet {
                schema: "array",
                option: "maxlength",
            }
            .raise();
        }
        self
    }

    /// Reject arrays containing two equal elements.
    pub fn distinct(mut self) -> Self {
        if !self.core.has_check(|c| *c == ArrayCheck::Distinct) {
            self.core
                .push_constraint(Constraint::Kind(ArrayCheck::Distinct));
        }
        self
    }

    /// The element schema, if any.
    pub fn element(&self) -> Option<&SchemaRef> {
        self.element.as_ref()
    }
}

impl Checked for ArraySchema {
    type Check = ArrayCheck;

    fn core(&self) -> &SchemaCore<ArrayCheck> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore<ArrayCheck> {
        &mut self.core
    }

    fn run_check(&self, check: &ArrayCheck, value: &Value, path: &str) -> Option<ValidationError> {
        let items = value.as_array()?;
        match check {
            ArrayCheck::Distinct => {
                let (first, second) = items.iter().enumerate().find_map(|(i, a)| {
                    items[i + 1..]
                        .iter()
                        .position(|b| self.are_equal(a, b))
                        .map(|offset| (i, i + 1 + offset))
                })?;
                Some(self.core.context().error(
                    ErrorKind::Argument,
                    format!(
                        "Array elements must be distinct, [{}] and [{}] are equal",
                        first, second
                    ),
                    path,
                ))
            }
        }
    }
}

impl Schema for ArraySchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.type_name.get_or_init(|| match &self.element {
            Some(element) => format!("array<{}>", element.type_name()),
            None => "array".to_string(),
        }))
    }

    fn validate_type(&self, value: &Value) -> bool {
        matches!(value, Value::Array(_))
    }

    fn is_required(&self) -> bool {
        self.core.is_required()
    }

    fn context(&self) -> &Context {
        self.core.context()
    }

    fn validate_value_with_correct_type(&self, value: &Value, path: &str) -> ErrorFeedback {
        let mut errors = self.core.evaluate(self, value, path);
        let Some(items) = value.as_array() else {
            return ErrorFeedback::from_list(errors);
        };
        let ctx = self.core.context();

        if let Some(min) = self.min_length {
            if items.len() < min {
                errors.push(ctx.error(
                    ErrorKind::Range,
                    format!(
                        "Array must have at least {} elements, received {}",
                        min,
                        items.len()
                    ),
                    path,
                ));
                return ErrorFeedback::from_list(errors);
            }
        }

        if let Some(max) = self.max_length {
            if items.len() > max {
                errors.push(ctx.error(
                    ErrorKind::Range,
                    format!(
                        "Array must have at most {} elements, received {}",
                        max,
                        items.len()
                    ),
                    path,
                ));
                return ErrorFeedback::from_list(errors);
            }
        }

        if let Some(element) = &self.element {
            for (i, item) in items.iter().enumerate() {
                let feedback = element.validate(item, &format!("{}[{}]", path, i));
                if !feedback.is_valid() {
                    tracing::trace!(path, index = i, "array element failed, skipping the rest");
                    errors.extend(feedback.errors.into_flat());
                    break;
                }
            }
        }

        ErrorFeedback::from_list(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::NumberSchema;

    #[test]
    fn type_name_mentions_the_element() {
        let ctx = Context::default();
        let schema = ArraySchema::new(ctx.clone()).of(NumberSchema::new(ctx));
        assert_eq!(schema.type_name(), "array<number>");
    }

    #[test]
    #[should_panic(expected = "`maxlength` can only be set once")]
    fn maxlength_twice_panics() {
        let _ = ArraySchema::new(Context::default()).maxlength(1).maxlength(2);
    }
}
