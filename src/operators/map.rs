//! Element-wise operators: `map`, `try_map`, `for_each` and `passthrough`.
//!
//! All four answer [`StepSignal::Emit`] for every element and never stop a
//! run on their own.

use crate::error::{BoxError, PipeError};
use crate::operator::{LazyOperator, Operator, StepSignal, Stepper};
use crate::value::Value;

type ElementFunction = Box<dyn Fn(Value) -> Result<Value, PipeError> + Send + Sync>;

struct Map {
    name: &'static str,
    function: ElementFunction,
}

struct MapStepper<'a> {
    operator: &'a Map,
}

impl Stepper for MapStepper<'_> {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        (self.operator.function)(element).map(StepSignal::Emit)
    }
}

impl LazyOperator for Map {
    fn name(&self) -> &'static str {
        self.name
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(MapStepper { operator: self })
    }

    fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        sequence.into_iter().map(&self.function).collect()
    }
}

/// Transforms every element with `function`.
///
/// Inside a fused run `function` is called exactly once per element that is
/// actually pulled, so a downstream `take` bounds the number of calls.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{json, map, pipe, take};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let result = pipe!(
///     json!([1, 2, 3]),
///     map(move |value| {
///         counter.fetch_add(1, Ordering::SeqCst);
///         json!(value.as_i64().unwrap_or_default() * 10)
///     }),
///     take(2),
/// )
/// .unwrap();
///
/// assert_eq!(result, json!([10, 20]));
/// assert_eq!(calls.load(Ordering::SeqCst), 2);
/// ```
pub fn map<F>(function: F) -> Operator
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Operator::lazy(Map {
        name: "map",
        function: Box::new(move |element| Ok(function(element))),
    })
}

/// Transforms every element with a fallible `function`.
///
/// The first error aborts the whole pipe with [`PipeError::Operator`].
///
/// # Examples
///
/// ```rust
/// use lazypipe::{PipeError, json, pipe, try_map};
///
/// let halve = try_map(|value| match value.as_i64() {
///     Some(number) if number % 2 == 0 => Ok(json!(number / 2)),
///     _ => Err(format!("cannot halve {value}")),
/// });
///
/// let error = pipe!(json!([2, 3, 4]), halve).unwrap_err();
/// assert!(matches!(error, PipeError::Operator { operator: "try_map", .. }));
/// assert_eq!(error.to_string(), "try_map failed: cannot halve 3");
/// ```
pub fn try_map<F, E>(function: F) -> Operator
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    Operator::lazy(Map {
        name: "try_map",
        function: Box::new(move |element| {
            function(element).map_err(|error| PipeError::operator("try_map", error))
        }),
    })
}

/// Runs `effect` on every element and passes the element on unchanged.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{for_each, json, pipe, take};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let result = pipe!(
///     json!([1, 2, 3]),
///     for_each(move |value| sink.lock().unwrap().push(value.clone())),
///     take(1),
/// )
/// .unwrap();
///
/// assert_eq!(result, json!([1]));
/// assert_eq!(*seen.lock().unwrap(), vec![json!(1)]);
/// ```
pub fn for_each<F>(effect: F) -> Operator
where
    F: Fn(&Value) + Send + Sync + 'static,
{
    Operator::lazy(Map {
        name: "for_each",
        function: Box::new(move |element| {
            effect(&element);
            Ok(element)
        }),
    })
}

/// A lazy pass-through: every element is emitted unchanged.
///
/// Unlike [`identity`](crate::operators::identity), this operator joins the
/// surrounding fused run instead of closing it.
pub fn passthrough() -> Operator {
    Operator::lazy(Map {
        name: "passthrough",
        function: Box::new(Ok),
    })
}
