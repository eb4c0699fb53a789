//! The value model threaded through a pipe.
//!
//! Values are dynamically shaped so that a single pipe can move between
//! records, scalars and sequences: `prop("inner")` turns a record into a
//! sequence, `map` works on the sequence, a plain function may turn it back
//! into a scalar. [`Value`] is [`serde_json::Value`]; a *sequence* is
//! [`Value::Array`].
//!
//! # Examples
//!
//! ```rust
//! use lazypipe::value::{Value, is_sequence};
//! use lazypipe::json;
//!
//! assert!(is_sequence(&json!([1, 2, 3])));
//! assert!(!is_sequence(&json!({"inner": [1, 2, 3]})));
//! assert_eq!(Value::from(vec![1, 2]), json!([1, 2]));
//! ```

pub use serde_json::Value;

/// Returns `true` when `value` is a sequence the fusion engine can pull from.
#[inline]
pub const fn is_sequence(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// Names the shape of a value, for error messages.
///
/// # Examples
///
/// ```rust
/// use lazypipe::value::kind_of;
/// use lazypipe::json;
///
/// assert_eq!(kind_of(&json!(null)), "null");
/// assert_eq!(kind_of(&json!([1])), "array");
/// assert_eq!(kind_of(&json!({"a": 1})), "object");
/// ```
pub const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
