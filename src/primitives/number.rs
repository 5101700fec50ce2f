use std::borrow::Cow;

use crate::error::{ErrorFeedback, ErrorKind, SchemaError, ValidationError};
use crate::schema::{Checked, Constraint, Context, Schema, SchemaCore};
use crate::value::{format_number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberCheck {
    Min,
    Max,
    Integer,
}

/// Schema for number validation (`f64`). Created via [`vld_chain::number()`](crate::number).
///
/// NaN and infinities fail the type check unless allowed with
/// [`allow_nan`](Self::allow_nan) / [`allow_infinity`](Self::allow_infinity).
///
/// # Example
/// ```
/// use vld_chain::prelude::*;
///
/// let percent = vld_chain::number().min(0.0).max(100.0).integer();
/// assert!(percent.validate(&Value::from(42), "").is_valid());
/// assert_eq!(percent.validate(&Value::from(100.5), "").errors_count, 2);
/// ```
#[derive(Clone, Debug)]
pub struct NumberSchema {
    core: SchemaCore<NumberCheck>,
    allow_nan: bool,
    allow_infinity: bool,
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
    precision: f64,
}

impl NumberSchema {
    pub fn new(ctx: Context) -> Self {
        Self {
            core: SchemaCore::new(ctx),
            allow_nan: false,
            allow_infinity: false,
            min: None,
            max: None,
            integer: false,
            precision: 0.0,
        }
    }

    /// Accept NaN as a number.
    pub fn allow_nan(mut self) -> Self {
        self.allow_nan = true;
        self
    }

    /// Accept positive and negative infinity as numbers.
    pub fn allow_infinity(mut self) -> Self {
        self.allow_infinity = true;
        self
    }

    /// Minimum value (inclusive). Calling it again replaces the bound.
    ///
    /// # Panics
    /// If `min` is NaN.
    pub fn min(mut self, min: f64) -> Self {
        if min.is_nan() {
            SchemaError::InvalidArgument {
                schema: "number",
                option: "min",
                reason: "bound must not be NaN".to_string(),
            }
            .raise();
        }
        if self.min.replace(min).is_none() {
            self.core.push_constraint(Constraint::Kind(NumberCheck::Min));
        }
        self
    }

    /// Maximum value (inclusive). Calling it again replaces the bound.
    ///
    /// # Panics
    /// If `max` is NaN.
    pub fn max(mut self, max: f64) -> Self {
        if max.is_nan() {
            SchemaError::InvalidArgument {
                schema: "number",
                option: "max",
                reason: "bound must not be NaN".to_string(),
            }
            .raise();
        }
        if self.max.replace(max).is_none() {
            self.core.push_constraint(Constraint::Kind(NumberCheck::Max));
        }
        self
    }

    /// Reject values with a fractional part.
    pub fn integer(mut self) -> Self {
        if !self.integer {
            self.integer = true;
            self.core
                .push_constraint(Constraint::Kind(NumberCheck::Integer));
        }
        self
    }

    /// Tolerance used when comparing numbers for [`not`](Checked::not):
    /// two numbers are equal when they differ by at most `epsilon`.
    ///
    /// # Panics
    /// If `epsilon` is negative or not finite.
    pub fn precision(mut self, epsilon: f64) -> Self {
        if !epsilon.is_finite() || epsilon < 0.0 {
            SchemaError::InvalidArgument {
                schema: "number",
                option: "precision",
                reason: format!("expected a finite non-negative number, got {}", epsilon),
            }
            .raise();
        }
        self.precision = epsilon;
        self
    }
}

impl Checked for NumberSchema {
    type Check = NumberCheck;

    fn core(&self) -> &SchemaCore<NumberCheck> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore<NumberCheck> {
        &mut self.core
    }

    fn run_check(&self, check: &NumberCheck, value: &Value, path: &str) -> Option<ValidationError> {
        let n = value.as_f64()?;
        let ctx = self.core.context();
        match check {
            NumberCheck::Min => {
                let min = self.min?;
                (n < min).then(|| {
                    ctx.error(
                        ErrorKind::Range,
                        format!(
                            "Number must be at least {}, received {}",
                            format_number(min),
                            format_number(n)
                        ),
                        path,
                    )
                })
            }
            NumberCheck::Max => {
                let max = self.max?;
                (n > max).then(|| {
                    ctx.error(
                        ErrorKind::Range,
                        format!(
                            "Number must be at most {}, received {}",
                            format_number(max),
                            format_number(n)
                        ),
                        path,
                    )
                })
            }
            NumberCheck::Integer => (!(n.is_finite() && n.fract() == 0.0)).then(|| {
                ctx.error(
                    ErrorKind::Argument,
                    format!("Expected an integer, received {}", format_number(n)),
                    path,
                )
            }),
        }
    }

    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => x == y || (x - y).abs() <= self.precision,
            _ => self.core.context().base().are_equal(a, b),
        }
    }
}

impl Schema for NumberSchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("number")
    }

    fn validate_type(&self, value: &Value) -> bool {
        match value {
            Value::Number(n) if n.is_nan() => self.allow_nan,
            Value::Number(n) if n.is_infinite() => self.allow_infinity,
            Value::Number(_) => true,
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
        self.check_constraints(value, path)
    }
}
