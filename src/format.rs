use crate::error::{ErrorFeedback, ValidationError};

/// Every error of a report in one list, whatever its shape.
///
/// Object reports are walked key by key, in key order.
///
/// # Example
/// ```
/// use vld_chain::format::flatten_errors;
/// use vld_chain::prelude::*;
///
/// let schema = vld_chain::object()
///     .field("a", vld_chain::number().required())
///     .field("b", vld_chain::object().field("c", vld_chain::string().required()));
/// let report = schema.validate(&Value::object([("b", Value::object([("c", 1)]))]), "");
/// let paths: Vec<_> = flatten_errors(&report).iter().map(|e| e.path()).collect();
/// assert_eq!(paths, ["a", "b.c"]);
/// ```
pub fn flatten_errors(feedback: &ErrorFeedback) -> Vec<&ValidationError> {
    feedback.errors.iter().collect()
}

/// Format a report into a human-readable string.
///
/// # Example output
/// ```text
/// ✖ Expected number, received undefined [TYPE]
///   → at user.age
/// ✖ String must be at least 2 characters, received 1 [RANGE]
///   → at user.name
/// ```
pub fn prettify(feedback: &ErrorFeedback) -> String {
    let mut lines = Vec::new();

    for error in feedback.errors.iter() {
        lines.push(format!("✖ {} [{}]", error.message(), error.kind()));
        if !error.path().is_empty() {
            lines.push(format!("  → at {}", error.path()));
        }
    }

    lines.join("\n")
}
