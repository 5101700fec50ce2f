use std::borrow::Cow;

use crate::error::{ErrorFeedback, ErrorKind, ValidationError};
use crate::schema::{Checked, Constraint, Context, Schema, SchemaCore};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCheck {
    Member,
}

/// Schema accepting only a fixed set of values. Created via
/// [`vld_chain::enumeration()`](crate::enumeration) or
/// [`vld_chain::enumeration_of()`](crate::enumeration_of).
///
/// Any shape passes the type check; membership is the real test, so even
/// an absent value is reported when it is not among the allowed ones.
///
/// # Example
/// ```
/// use vld_chain::prelude::*;
///
/// let role = vld_chain::enumeration(["admin", "user", "moderator"]);
/// assert!(role.validate(&Value::from("admin"), "").is_valid());
/// assert!(!role.validate(&Value::from("hacker"), "").is_valid());
/// ```
#[derive(Clone, Debug)]
pub struct EnumSchema {
    core: SchemaCore<EnumCheck>,
    values: Vec<Value>,
}

impl EnumSchema {
    pub fn new<I, V>(ctx: Context, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut core = SchemaCore::new(ctx);
        core.push_constraint(Constraint::Kind(EnumCheck::Member));
        Self {
            core,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Allow the values of an object's entries; keys are only labels.
    ///
    /// Values keep the order of `entries`, which is also the order the
    /// error message lists them in. A [`Value::Object`] iterates by key.
    pub fn from_object<K, V, I>(ctx: Context, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        V: Into<Value>,
    {
        Self::new(ctx, entries.into_iter().map(|(_, value)| value))
    }

    /// The allowed values, in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Checked for EnumSchema {
    type Check = EnumCheck;

    fn core(&self) -> &SchemaCore<EnumCheck> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore<EnumCheck> {
        &mut self.core
    }

    fn run_check(&self, check: &EnumCheck, value: &Value, path: &str) -> Option<ValidationError> {
        match check {
            EnumCheck::Member => {
                if self.values.iter().any(|v| self.are_equal(value, v)) {
                    return None;
                }
                let allowed = self
                    .values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(self.core.context().error(
                    ErrorKind::Argument,
                    format!("Expected one of {}, received {}", allowed, value),
                    path,
                ))
            }
        }
    }
}

impl Schema for EnumSchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("enumeration")
    }

    fn validate_type(&self, _value: &Value) -> bool {
        true
    }

    fn is_required(&self) -> bool {
        self.core.is_required()
    }

    fn context(&self) -> &Context {
        self.core.context()
    }

    fn validate_value_with_correct_type(&self, value: &Value, path: &str) -> ErrorFeedback {
        self.check_constraints(value, path)
    }
}
