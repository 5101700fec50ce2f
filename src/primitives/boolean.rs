use std::borrow::Cow;
use std::convert::Infallible;

use crate::error::{ErrorFeedback, ValidationError};
use crate::schema::{Checked, Context, Schema, SchemaCore};
use crate::value::Value;

/// Schema for boolean validation. Created via [`vld_chain::boolean()`](crate::boolean).
#[derive(Clone, Debug)]
pub struct BooleanSchema {
    core: SchemaCore<Infallible>,
}

impl BooleanSchema {
    pub fn new(ctx: Context) -> Self {
        Self {
            core: SchemaCore::new(ctx),
        }
    }
}

impl Checked for BooleanSchema {
    type Check = Infallible;

    fn core(&self) -> &SchemaCore<Infallible> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore<Infallible> {
        &mut self.core
    }

    fn run_check(&self, check: &Infallible, _value: &Value, _path: &str) -> Option<ValidationError> {
        match *check {}
    }
}

impl Schema for BooleanSchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("boolean")
    }

    fn validate_type(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_))
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
