//! Expanding operators: `flat`, `flat_depth`, `flat_map` and `try_flat_map`.
//!
//! One pulled element may become many; the fusion engine threads the
//! expansion through the rest of the run in order. Non-sequence elements
//! pass through untouched.

use crate::error::{BoxError, PipeError};
use crate::operator::{LazyOperator, Operator, StepSignal, Stepper};
use crate::value::Value;

fn flatten_into(element: Value, depth: usize, output: &mut Vec<Value>) {
    match element {
        Value::Array(items) if depth > 0 => {
            for item in items {
                flatten_into(item, depth - 1, output);
            }
        }
        other => output.push(other),
    }
}

fn expand(element: Value, depth: usize) -> StepSignal {
    match element {
        Value::Array(_) if depth > 0 => {
            let mut expanded = Vec::new();
            flatten_into(element, depth, &mut expanded);
            StepSignal::EmitMany(expanded)
        }
        other => StepSignal::Emit(other),
    }
}

struct Flat {
    depth: usize,
}

struct FlatStepper {
    depth: usize,
}

impl Stepper for FlatStepper {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        Ok(expand(element, self.depth))
    }
}

impl LazyOperator for Flat {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(FlatStepper { depth: self.depth })
    }

    fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        let mut output = Vec::with_capacity(sequence.len());
        for element in sequence {
            flatten_into(element, self.depth, &mut output);
        }
        Ok(output)
    }
}

/// Flattens nested sequences by one level.
///
/// After a `take`, only the outer elements that `take` let through are
/// pulled, and each of them is expanded completely.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{flat, json, pipe, take};
///
/// let result = pipe!(json!([[1, 2], [3, 4], [5, 6]]), take(1), flat()).unwrap();
/// assert_eq!(result, json!([1, 2]));
///
/// let mixed = pipe!(json!([[1], 2, [[3]]]), flat()).unwrap();
/// assert_eq!(mixed, json!([1, 2, [3]]));
/// ```
pub fn flat() -> Operator {
    flat_depth(1)
}

/// Flattens nested sequences up to `depth` levels.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{flat_depth, json, pipe};
///
/// let result = pipe!(json!([[1, [2, [3]]], 4]), flat_depth(2)).unwrap();
/// assert_eq!(result, json!([1, 2, [3], 4]));
/// ```
pub fn flat_depth(depth: usize) -> Operator {
    Operator::lazy(Flat { depth })
}

type ExpandFunction = Box<dyn Fn(Value) -> Result<Value, PipeError> + Send + Sync>;

struct FlatMap {
    name: &'static str,
    function: ExpandFunction,
}

struct FlatMapStepper<'a> {
    operator: &'a FlatMap,
}

impl Stepper for FlatMapStepper<'_> {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        (self.operator.function)(element).map(|mapped| expand(mapped, 1))
    }
}

impl LazyOperator for FlatMap {
    fn name(&self) -> &'static str {
        self.name
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(FlatMapStepper { operator: self })
    }

    fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        let mut output = Vec::with_capacity(sequence.len());
        for element in sequence {
            flatten_into((self.function)(element)?, 1, &mut output);
        }
        Ok(output)
    }
}

/// Maps every element to a sequence and concatenates the results.
///
/// A mapped value that is not a sequence is emitted as a single element.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{flat_map, json, pipe, take};
///
/// let result = pipe!(
///     json!([[[1, 2], [2, 3]], [[4, 5], [5, 6]], [[7, 8], [8, 9]]]),
///     take(2),
///     flat_map(|pair| pair[1].clone()),
/// )
/// .unwrap();
/// assert_eq!(result, json!([2, 3, 5, 6]));
/// ```
pub fn flat_map<F>(function: F) -> Operator
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Operator::lazy(FlatMap {
        name: "flat_map",
        function: Box::new(move |element| Ok(function(element))),
    })
}

/// Like [`flat_map`], with a fallible `function`.
pub fn try_flat_map<F, E>(function: F) -> Operator
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    Operator::lazy(FlatMap {
        name: "try_flat_map",
        function: Box::new(move |element| {
            function(element).map_err(|error| PipeError::operator("try_flat_map", error))
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_step_expands_sequences() {
        let flat = Flat { depth: 1 };
        let mut stepper = flat.start();
        assert_eq!(
            stepper.step(json!([1, [2]])).unwrap(),
            StepSignal::EmitMany(vec![json!(1), json!([2])])
        );
        assert_eq!(stepper.step(json!(3)).unwrap(), StepSignal::Emit(json!(3)));
        assert_eq!(stepper.step(json!([])).unwrap(), StepSignal::EmitMany(vec![]));
    }

    #[test]
    fn test_flat_depth_zero_is_a_no_op() {
        let flat = Flat { depth: 0 };
        assert_eq!(
            flat.start().step(json!([1, 2])).unwrap(),
            StepSignal::Emit(json!([1, 2]))
        );
        assert_eq!(flat.apply(vec![json!([1])]).unwrap(), vec![json!([1])]);
    }

    #[test]
    fn test_flatten_into_respects_depth() {
        let mut output = Vec::new();
        flatten_into(json!([[1, [2]], 3]), 3, &mut output);
        assert_eq!(output, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_flat_map_step_wraps_scalars() {
        let operator = FlatMap {
            name: "flat_map",
            function: Box::new(|value| Ok(json!({"wrapped": value}))),
        };
        assert_eq!(
            operator.start().step(json!(1)).unwrap(),
            StepSignal::Emit(json!({"wrapped": 1}))
        );
    }

    #[test]
    fn test_try_flat_map_error() {
        let operator = try_flat_map(|_| Err::<Value, _>("no children"));
        let error = operator.apply(json!([1])).unwrap_err();
        assert_eq!(error.to_string(), "try_flat_map failed: no children");
    }
}
