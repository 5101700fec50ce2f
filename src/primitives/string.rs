use std::borrow::Cow;

use regex_lite::Regex;

use crate::error::{ErrorFeedback, ErrorKind, SchemaError, ValidationError};
use crate::schema::{Checked, Constraint, Context, Schema, SchemaCore};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringCheck {
    MinLength,
    MaxLength,
    Pattern,
}

/// Schema for string validation. Created via [`vld_chain::string()`](crate::string).
///
/// Lengths count characters, not bytes. Each of `minlength`, `maxlength`
/// and `pattern` can be set once per schema.
///
/// # Example
/// ```
/// use vld_chain::prelude::*;
///
/// let slug = vld_chain::string().minlength(3).maxlength(32).pattern("^[a-z-]+$");
/// assert!(slug.validate(&Value::from("hello-world"), "").is_valid());
/// assert_eq!(slug.validate(&Value::from("Hi"), "").errors_count, 2);
/// ```
#[derive(Clone, Debug)]
pub struct StringSchema {
    core: SchemaCore<StringCheck>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl StringSchema {
    pub fn new(ctx: Context) -> Self {
        Self {
            core: SchemaCore::new(ctx),
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// Minimum number of characters (inclusive).
    ///
    /// # Panics
    /// If the minimum length was already set.
    pub fn minlength(mut self, len: usize) -> Self {
        if self.min_length.is_some() {
            SchemaError::AlreadySet {
                schema: "string",
                option: "minlength",
            }
            .raise();
        }
        self.min_length = Some(len);
        self.core
            .push_constraint(Constraint::Kind(StringCheck::MinLength));
        self
    }

    /// Maximum number of characters (inclusive).
    ///
    /// # Panics
    /// If the maximum length was already set.
    pub fn maxlength(mut self, len: usize) -> Self {
        if self.max_length.is_some() {
            SchemaError::AlreadySet {
                schema: "string",
                option: "maxlength",
            }
            .raise();
        }
        self.max_length = Some(len);
        self.core
            .push_constraint(Constraint::Kind(StringCheck::MaxLength));
        self
    }

    /// Require the value to contain a match of `pattern`. Anchor the
    /// expression to match the whole string.
    ///
    /// # Panics
    /// If a pattern was already set or `pattern` is not a valid expression.
    pub fn pattern(self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.regex(re),
            Err(e) => SchemaError::InvalidPattern(format!("{}: {}", pattern, e)).raise(),
        }
    }

    /// Same as [`pattern`](Self::pattern) with an already compiled expression.
    ///
    /// # Panics
    /// If a pattern was already set.
    pub fn regex(mut self, re: Regex) -> Self {
        if self.pattern.is_some() {
            SchemaError::AlreadySet {
                schema: "string",
                option: "pattern",
            }
            .raise();
        }
        self.pattern = Some(re);
        self.core.push_constraint(Constraint::Kind(StringCheck::Pattern));
        self
    }
}

impl Checked for StringSchema {
    type Check = StringCheck;

    fn core(&self) -> &SchemaCore<StringCheck> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore<StringCheck> {
        &mut self.core
    }

    fn run_check(&self, check: &StringCheck, value: &Value, path: &str) -> Option<ValidationError> {
        let s = value.as_str()?;
        let ctx = self.core.context();
        match check {
            StringCheck::MinLength => {
                let min = self.min_length?;
                let len = s.chars().count();
                (len < min).then(|| {
                    ctx.error(
                        ErrorKind::Range,
                        format!("String must be at least {} characters, received {}", min, len),
                        path,
                    )
                })
            }
            StringCheck::MaxLength => {
                let max = self.max_length?;
                let len = s.chars().count();
                (len > max).then(|| {
                    ctx.error(
                        ErrorKind::Range,
                        format!("String must be at most {} characters, received {}", max, len),
                        path,
                    )
                })
            }
            StringCheck::Pattern => {
                let re = self.pattern.as_ref()?;
                (!re.is_match(s)).then(|| {
                    ctx.error(
                        ErrorKind::Argument,
                        format!("String {:?} does not match pattern /{}/", s, re.as_str()),
                        path,
                    )
                })
            }
        }
    }
}

impl Schema for StringSchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("string")
    }

    fn validate_type(&self, value: &Value) -> bool {
        matches!(value, Value::String(_))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "`minlength` can only be set once")]
    fn minlength_twice_panics() {
        let _ = StringSchema::new(Context::default()).minlength(1).minlength(2);
    }

    #[test]
    #[should_panic(expected = "invalid pattern")]
    fn bad_pattern_panics() {
        let _ = StringSchema::new(Context::default()).pattern("(unclosed");
    }

    #[test]
    fn length_counts_characters() {
        let schema = StringSchema::new(Context::default()).maxlength(2);
        assert!(schema.validate(&Value::from("é✓"), "").is_valid());
    }
}
