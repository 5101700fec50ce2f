use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{
    DefaultErrorFactory, ErrorFactory, ErrorFeedback, ErrorKind, SchemaError, ValidationError,
};
use crate::input::ValidationInput;
use crate::value::Value;

/// Shared, type-erased schema handle. Composite schemas hold their
/// subschemas this way.
pub type SchemaRef = Arc<dyn Schema>;

/// Caller-supplied check used by [`Checked::predicate`].
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// The policy every schema kind inherits: what a type mismatch reports and
/// what "equal" means for [`Checked::not`].
///
/// Substituting the contract (see [`RegistryOptions::base_contract`](crate::registry::RegistryOptions::base_contract))
/// changes these rules for every kind built from that registry.
pub trait BaseContract: Send + Sync {
    /// Report for a value whose shape does not match `expected`.
    ///
    /// Optional schemas treat the value as absent; required ones report a
    /// single TYPE error at `path`.
    fn type_mismatch(
        &self,
        expected: &str,
        required: bool,
        value: &Value,
        path: &str,
        errors: &dyn ErrorFactory,
    ) -> ErrorFeedback {
        if !required {
            return ErrorFeedback::empty();
        }
        ErrorFeedback::from_list(vec![errors.create_error(
            ErrorKind::Type,
            format!("Expected {}, received {}", expected, value.type_name()),
            path,
        )])
    }

    /// Equality used by exclusion and membership checks.
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        a == b
    }
}

/// The default contract: optional unless `required()`, strict equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardContract;

impl BaseContract for StandardContract {}

/// The base contract and error factory a schema was built against.
#[derive(Clone)]
pub struct Context {
    base: Arc<dyn BaseContract>,
    errors: Arc<dyn ErrorFactory>,
}

impl Context {
    pub fn new(base: Arc<dyn BaseContract>, errors: Arc<dyn ErrorFactory>) -> Self {
        Self { base, errors }
    }

    pub fn base(&self) -> &dyn BaseContract {
        self.base.as_ref()
    }

    pub fn errors(&self) -> &dyn ErrorFactory {
        self.errors.as_ref()
    }

    /// Create an error through this context's factory.
    pub fn error(&self, kind: ErrorKind, message: impl Into<String>, path: &str) -> ValidationError {
        self.errors.create_error(kind, message.into(), path)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Arc::new(StandardContract), Arc::new(DefaultErrorFactory))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}

/// Core validation trait.
///
/// Validation runs in two phases. [`validate_type`](Schema::validate_type)
/// decides whether the value has the expected shape; a mismatch is reported
/// (or ignored, for optional schemas) by [`validate`](Schema::validate) and
/// nothing else about the value is checked. Values with the right shape go
/// to [`validate_value_with_correct_type`](Schema::validate_value_with_correct_type).
///
/// Schemas never change while validating, so a composed schema can be
/// shared and reused freely.
///
/// # Example
/// ```
/// use vld_chain::prelude::*;
///
/// let schema = vld_chain::string().minlength(3).required();
/// let report = schema.validate(&Value::from("hi"), "name");
/// assert_eq!(report.errors_count, 1);
/// ```
pub trait Schema: Send + Sync {
    /// Display name of the expected shape, used in TYPE error messages.
    fn type_name(&self) -> Cow<'_, str>;

    /// Runtime shape test.
    fn validate_type(&self, value: &Value) -> bool;

    fn is_required(&self) -> bool;

    fn context(&self) -> &Context;

    /// Validate a value that already passed [`validate_type`](Schema::validate_type).
    fn validate_value_with_correct_type(&self, value: &Value, path: &str) -> ErrorFeedback;

    /// Both phases. Composite kinds call this on their subschemas, so an
    /// override is honoured wherever the kind is nested.
    fn validate(&self, value: &Value, path: &str) -> ErrorFeedback {
        if !self.validate_type(value) {
            let ctx = self.context();
            return ctx.base().type_mismatch(
                &self.type_name(),
                self.is_required(),
                value,
                path,
                ctx.errors(),
            );
        }
        self.validate_value_with_correct_type(value, path)
    }

    /// Convert any supported input (JSON text, `serde_json::Value`, ...) and validate it.
    fn validate_input<I>(&self, input: &I, path: &str) -> Result<ErrorFeedback, SchemaError>
    where
        Self: Sized,
        I: ValidationInput + ?Sized,
    {
        let value = input.to_value()?;
        Ok(self.validate(&value, path))
    }

    /// Move this schema behind a shared handle.
    fn shared(self) -> SchemaRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// Validate `value` against `schema`, labelling the root with `root`.
pub fn validate(schema: &dyn Schema, value: &Value, root: &str) -> ErrorFeedback {
    schema.validate(value, root)
}

/// One entry of a schema's constraint chain.
///
/// `Kind` holds the schema-specific check; it is evaluated by
/// [`Checked::run_check`] against the schema's configuration at validation
/// time, not at the time it was pushed.
#[derive(Clone)]
pub enum Constraint<C> {
    Predicate(PredicateFn),
    Not(Vec<Value>),
    Kind(C),
}

/// State every schema kind carries: its context, the required flag and the
/// ordered constraint chain.
#[derive(Clone)]
pub struct SchemaCore<C> {
    ctx: Context,
    required: bool,
    constraints: Vec<Constraint<C>>,
}

impl<C> SchemaCore<C> {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            required: false,
            constraints: Vec::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self) {
        self.required = true;
    }

    pub fn push_constraint(&mut self, constraint: Constraint<C>) {
        self.constraints.push(constraint);
    }

    pub fn constraints(&self) -> &[Constraint<C>] {
        &self.constraints
    }

    /// Whether a kind-specific check matching `pred` was already pushed.
    pub fn has_check(&self, pred: impl Fn(&C) -> bool) -> bool {
        self.constraints.iter().any(|c| match c {
            Constraint::Kind(check) => pred(check),
            _ => false,
        })
    }

    /// Run every constraint in order and collect all failures.
    pub fn evaluate<S>(&self, schema: &S, value: &Value, path: &str) -> Vec<ValidationError>
    where
        S: Checked<Check = C>,
    {
        self.constraints
            .iter()
            .filter_map(|constraint| match constraint {
                Constraint::Predicate(check) => (!check(value)).then(|| {
                    self.ctx
                        .error(ErrorKind::Predicate, "Value failed the predicate check", path)
                }),
                Constraint::Not(excluded) => excluded
                    .iter()
                    .any(|other| schema.are_equal(value, other))
                    .then(|| {
                        self.ctx.error(
                            ErrorKind::Argument,
                            format!("Value must not be {}", value),
                            path,
                        )
                    }),
                Constraint::Kind(check) => schema.run_check(check, value, path),
            })
            .collect()
    }
}

impl<C> fmt::Debug for SchemaCore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCore")
            .field("required", &self.required)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}

/// Builder vocabulary for kinds that own a constraint chain.
///
/// Implement this (plus [`Schema`]) to add a new kind: the builder methods
/// and chain evaluation come for free.
pub trait Checked: Sized {
    /// Kind-specific check stored in the chain.
    type Check;

    fn core(&self) -> &SchemaCore<Self::Check>;

    fn core_mut(&mut self) -> &mut SchemaCore<Self::Check>;

    /// Evaluate one kind-specific check. `None` means it passed.
    fn run_check(&self, check: &Self::Check, value: &Value, path: &str)
        -> Option<ValidationError>;

    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        self.core().context().base().are_equal(a, b)
    }

    /// Run the whole constraint chain. This is what scalar kinds report for
    /// a value of the correct type.
    fn check_constraints(&self, value: &Value, path: &str) -> ErrorFeedback {
        ErrorFeedback::from_list(self.core().evaluate(self, value, path))
    }

    /// Report a type mismatch instead of silently ignoring the value.
    fn required(mut self) -> Self {
        self.core_mut().set_required();
        self
    }

    /// Fail with a PREDICATE error when `check` returns `false`.
    fn predicate<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.core_mut()
            .push_constraint(Constraint::Predicate(Arc::new(check)));
        self
    }

    /// Fail with an ARGUMENT error when the value equals any of `values`.
    fn not<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let excluded = values.into_iter().map(Into::into).collect();
        self.core_mut().push_constraint(Constraint::Not(excluded));
        self
    }
}
