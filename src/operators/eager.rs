//! Eager operators: plain functions and record projection.
//!
//! None of these join a fused run. Placed between two lazy operators they
//! split the pipe into two runs, and the run before them is materialized in
//! full.

use serde_json::map::Map as Record;

use crate::error::{BoxError, PipeError};
use crate::operator::Operator;
use crate::value::{Value, kind_of};

/// Wraps an ordinary unary function as a pipe step.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{func, json, pipe};
///
/// let result = pipe!(
///     1,
///     func(|value| json!(value.as_i64().unwrap_or_default() * 2)),
///     func(|value| json!(value.as_i64().unwrap_or_default() * 3)),
/// )
/// .unwrap();
/// assert_eq!(result, json!(6));
/// ```
pub fn func<F>(function: F) -> Operator
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Operator::eager("func", move |value| Ok(function(value)))
}

/// Wraps a fallible unary function as a pipe step.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{BoxError, json, pipe, try_func};
///
/// let parse = || {
///     try_func(|value| -> Result<_, BoxError> {
///         let text = value.as_str().ok_or("not a string")?;
///         let number: i64 = text.parse()?;
///         Ok(json!(number))
///     })
/// };
///
/// assert_eq!(pipe!(json!("42"), parse()).unwrap(), json!(42));
/// assert!(pipe!(json!("forty-two"), parse()).is_err());
/// assert!(pipe!(json!(42), parse()).is_err());
/// ```
pub fn try_func<F, E>(function: F) -> Operator
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    Operator::eager("try_func", move |value| {
        function(value).map_err(|error| PipeError::operator("try_func", error))
    })
}

/// Returns the value unchanged.
///
/// This is an eager step: between lazy operators it closes the current run,
/// so each side is evaluated as its own fused pass. Use
/// [`passthrough`](crate::operators::passthrough) for a no-op that stays
/// inside the run.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{identity, json, pipe};
///
/// assert_eq!(pipe!(json!([1, 2]), identity()).unwrap(), json!([1, 2]));
/// ```
pub fn identity() -> Operator {
    Operator::eager("identity", Ok)
}

fn project(mut record: Record<String, Value>, key: &str) -> Value {
    record.remove(key).unwrap_or(Value::Null)
}

/// Projects the field `key` out of a record.
///
/// A missing field yields `null`.
///
/// # Errors
///
/// The returned operator fails with [`PipeError::NotARecord`] when the
/// current value is not an object.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{json, pipe, prop};
///
/// let result = pipe!(json!({"inner": [1, 2, 3]}), prop("inner")).unwrap();
/// assert_eq!(result, json!([1, 2, 3]));
///
/// assert_eq!(pipe!(json!({}), prop("inner")).unwrap(), json!(null));
/// ```
pub fn prop(key: impl Into<String>) -> Operator {
    let key = key.into();
    Operator::eager("prop", move |value| match value {
        Value::Object(record) => Ok(project(record, &key)),
        other => Err(PipeError::NotARecord {
            operator: "prop",
            found: kind_of(&other),
        }),
    })
}
