//! The `unique` operator.

use rustc_hash::FxHashSet;

use crate::error::PipeError;
use crate::operator::{LazyOperator, Operator, StepSignal, Stepper};
use crate::value::Value;

// Object fields are written in key order regardless of how the map stores
// them, so the key does not depend on serde_json's `preserve_order` feature.
fn key_of(value: &Value) -> String {
    let mut key = String::new();
    write_key(value, &mut key);
    key
}

fn write_key(value: &Value, key: &mut String) {
    match value {
        Value::Array(items) => {
            key.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    key.push(',');
                }
                write_key(item, key);
            }
            key.push(']');
        }
        Value::Object(fields) => {
            let mut entries: Vec<_> = fields.iter().collect();
            entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
            key.push('{');
            for (index, (name, field)) in entries.into_iter().enumerate() {
                if index > 0 {
                    key.push(',');
                }
                key.push_str(&Value::from(name.as_str()).to_string());
                key.push(':');
                write_key(field, key);
            }
            key.push('}');
        }
        scalar => key.push_str(&scalar.to_string()),
    }
}

struct Unique;

#[derive(Default)]
struct UniqueStepper {
    seen: FxHashSet<String>,
}

impl Stepper for UniqueStepper {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        if self.seen.insert(key_of(&element)) {
            Ok(StepSignal::Emit(element))
        } else {
            Ok(StepSignal::Skip)
        }
    }
}

impl LazyOperator for Unique {
    fn name(&self) -> &'static str {
        "unique"
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(UniqueStepper::default())
    }

    fn apply(&self, mut sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        let mut seen = FxHashSet::default();
        sequence.retain(|element| seen.insert(key_of(element)));
        Ok(sequence)
    }
}

/// Keeps the first occurrence of every distinct element.
///
/// Two elements are the same when their compact JSON text, with object
/// fields in key order, is equal. `1` and `1.0` are distinct while
/// `{"a": 1, "b": 2}` and `{"b": 2, "a": 1}` are not.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{json, pipe, take, unique};
///
/// let result = pipe!(json!([3, 1, 3, 2, 1, 4]), unique(), take(3)).unwrap();
/// assert_eq!(result, json!([3, 1, 2]));
/// ```
pub fn unique() -> Operator {
    Operator::lazy(Unique)
}
