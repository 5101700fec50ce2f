use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// The closed set of validation failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ErrorKind {
    /// The value does not have the runtime shape the schema expects.
    Type,
    /// The value lies outside a declared bound (length, numeric bound, date range).
    Range,
    /// The value breaks a structural rule that is not a plain range.
    Argument,
    /// A caller-supplied predicate rejected the value.
    Predicate,
}

impl ErrorKind {
    /// Every error kind, in declaration order.
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::Type,
        ErrorKind::Range,
        ErrorKind::Argument,
        ErrorKind::Predicate,
    ];

    /// Stable string key for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            ErrorKind::Type => "TYPE",
            ErrorKind::Range => "RANGE",
            ErrorKind::Argument => "ARGUMENT",
            ErrorKind::Predicate => "PREDICATE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single validation failure: what went wrong and where.
///
/// Records are produced by an [`ErrorFactory`] and never change afterwards,
/// so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ValidationError {
    kind: ErrorKind,
    message: String,
    path: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable description. Not meant to be parsed.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the offending value, e.g. `user.tags[2]`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}] {}", self.kind, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.kind, self.path, self.message)
        }
    }
}

/// Constructor for [`ValidationError`] records.
///
/// Every error the engine reports goes through the factory held by the
/// schema's [`Context`](crate::schema::Context), so swapping the factory
/// changes how failures are worded or located without touching any kind.
pub trait ErrorFactory: Send + Sync {
    fn create_error(&self, kind: ErrorKind, message: String, path: &str) -> ValidationError;
}

/// Factory that records errors exactly as the schema kinds describe them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorFactory;

impl ErrorFactory for DefaultErrorFactory {
    fn create_error(&self, kind: ErrorKind, message: String, path: &str) -> ValidationError {
        ValidationError::new(kind, message, path)
    }
}

/// The error container of an [`ErrorFeedback`].
///
/// Scalar, array, enumeration and union schemas report a flat list. Object
/// schemas report a map from each declared key to that key's own collection,
/// so nested errors are found by walking the object shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(untagged))]
pub enum ErrorCollection {
    List(Vec<ValidationError>),
    Map(BTreeMap<String, ErrorCollection>),
}

impl ErrorCollection {
    pub fn as_list(&self) -> Option<&[ValidationError]> {
        match self {
            ErrorCollection::List(list) => Some(list),
            ErrorCollection::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ErrorCollection>> {
        match self {
            ErrorCollection::Map(map) => Some(map),
            ErrorCollection::List(_) => None,
        }
    }

    /// Collection recorded for `key` of an object report.
    pub fn get(&self, key: &str) -> Option<&ErrorCollection> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Total number of errors, counting through nested maps.
    pub fn len(&self) -> usize {
        match self {
            ErrorCollection::List(list) => list.len(),
            ErrorCollection::Map(map) => map.values().map(ErrorCollection::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth-first iteration over every error. Map entries are visited in key order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &ValidationError> + '_> {
        match self {
            ErrorCollection::List(list) => Box::new(list.iter()),
            ErrorCollection::Map(map) => Box::new(map.values().flat_map(ErrorCollection::iter)),
        }
    }

    /// Consume the collection into a flat list of errors.
    pub fn into_flat(self) -> Vec<ValidationError> {
        match self {
            ErrorCollection::List(list) => list,
            ErrorCollection::Map(map) => map
                .into_values()
                .flat_map(ErrorCollection::into_flat)
                .collect(),
        }
    }
}

impl Default for ErrorCollection {
    fn default() -> Self {
        ErrorCollection::List(Vec::new())
    }
}

/// Result of a `validate` call: the errors and how many there are.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
pub struct ErrorFeedback {
    pub errors: ErrorCollection,
    pub errors_count: usize,
}

impl ErrorFeedback {
    /// A successful validation: empty list, zero count.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_list(errors: Vec<ValidationError>) -> Self {
        let errors_count = errors.len();
        Self {
            errors: ErrorCollection::List(errors),
            errors_count,
        }
    }

    pub fn from_map(errors: BTreeMap<String, ErrorCollection>, errors_count: usize) -> Self {
        Self {
            errors: ErrorCollection::Map(errors),
            errors_count,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors_count == 0
    }

    /// Render the report as JSON, keeping the list/map shape.
    #[cfg(feature = "serialize")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<Vec<ValidationError>> for ErrorFeedback {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::from_list(errors)
    }
}

/// Errors raised while composing schemas or building a registry.
///
/// These signal programmer mistakes, not invalid input. Builder methods
/// panic with the error's message; registry and input functions return it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A once-only option was configured a second time.
    #[error("{schema}: `{option}` can only be set once")]
    AlreadySet {
        schema: &'static str,
        option: &'static str,
    },

    /// A builder argument is out of range or of the wrong shape.
    #[error("{schema}: invalid argument for `{option}`: {reason}")]
    InvalidArgument {
        schema: &'static str,
        option: &'static str,
        reason: String,
    },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// `include` and `exclude` were both given to the registry.
    #[error("registry options `include` and `exclude` are mutually exclusive")]
    ConflictingFilters,

    #[error("unknown schema kind: {0}")]
    UnknownKind(String),

    /// A registry constructor received arguments it cannot use.
    #[error("{kind}: {reason}")]
    BadArguments { kind: String, reason: String },

    #[error("invalid JSON input: {0}")]
    InvalidJson(String),
}

impl SchemaError {
    /// Abort schema construction with this error.
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        panic!("{}", self)
    }
}
