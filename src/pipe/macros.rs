//! The `pipe!` macro for left-to-right operator application.

/// Pipes a value through a series of operators from left to right.
///
/// `pipe!(x, a, b, c)` is shorthand for
/// `lazypipe::pipe::pipe(x.into(), [a, b, c])`: the value is converted into a
/// [`Value`](crate::Value) and every argument after it must be an
/// [`Operator`](crate::operator::Operator). Adjacent lazy operators are fused.
///
/// # Syntax
///
/// - `pipe!(x)` - Returns `Ok(x)` unchanged
/// - `pipe!(x, f)` - Applies `f`
/// - `pipe!(x, f, g, h, ...)` - Applies `f`, then `g`, then `h`, ...
///
/// # Examples
///
/// ## Plain functions
///
/// ```
/// use lazypipe::{func, json, pipe};
///
/// let double = || func(|value| json!(value.as_i64().unwrap_or_default() * 2));
/// let add_one = || func(|value| json!(value.as_i64().unwrap_or_default() + 1));
///
/// // add_one(double(5)) = 11
/// assert_eq!(pipe!(5, double(), add_one()).unwrap(), json!(11));
/// ```
///
/// ## Lazy operators after a projection
///
/// ```
/// use lazypipe::{json, map, pipe, prop, take};
///
/// let result = pipe!(
///     json!({"inner": [1, 2, 3]}),
///     prop("inner"),
///     map(|value| json!(value.as_i64().unwrap_or_default() * 10)),
///     take(2),
/// )
/// .unwrap();
/// assert_eq!(result, json!([10, 20]));
/// ```
///
/// ## Value only
///
/// ```
/// use lazypipe::{json, pipe};
///
/// assert_eq!(pipe!(vec![1, 2, 3]).unwrap(), json!([1, 2, 3]));
/// ```
#[macro_export]
macro_rules! pipe {
    // Value only: return as is
    ($value:expr $(,)?) => {
        ::core::result::Result::<$crate::Value, $crate::PipeError>::Ok(
            ::core::convert::Into::<$crate::Value>::into($value),
        )
    };

    // One or more operators: evaluate through the dispatcher
    ($value:expr, $($operator:expr),+ $(,)?) => {
        $crate::pipe::pipe(
            ::core::convert::Into::<$crate::Value>::into($value),
            [$($operator),+],
        )
    };
}
