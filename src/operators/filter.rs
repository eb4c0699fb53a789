//! The `filter` operator.

use crate::error::PipeError;
use crate::operator::{LazyOperator, Operator, StepSignal, Stepper};
use crate::value::Value;

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

struct Filter {
    predicate: Predicate,
}

struct FilterStepper<'a> {
    operator: &'a Filter,
}

impl Stepper for FilterStepper<'_> {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        if (self.operator.predicate)(&element) {
            Ok(StepSignal::Emit(element))
        } else {
            Ok(StepSignal::Skip)
        }
    }
}

impl LazyOperator for Filter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(FilterStepper { operator: self })
    }

    fn apply(&self, mut sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        sequence.retain(|element| (self.predicate)(element));
        Ok(sequence)
    }
}

/// Keeps the elements for which `predicate` returns `true`.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{filter, json, pipe};
///
/// let result = pipe!(
///     json!([1, 2, 3, 4, 5]),
///     filter(|value| value.as_i64().is_some_and(|number| number % 2 == 1)),
/// )
/// .unwrap();
/// assert_eq!(result, json!([1, 3, 5]));
/// ```
pub fn filter<P>(predicate: P) -> Operator
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Operator::lazy(Filter {
        predicate: Box::new(predicate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_step_skips_rejected_elements() {
        let filter = Filter {
            predicate: Box::new(|value| value.is_string()),
        };
        let mut stepper = filter.start();
        assert_eq!(stepper.step(json!("a")).unwrap(), StepSignal::Emit(json!("a")));
        assert_eq!(stepper.step(json!(1)).unwrap(), StepSignal::Skip);
        assert!(!stepper.is_exhausted());
    }

    #[test]
    fn test_filter_apply_keeps_order() {
        let filter = Filter {
            predicate: Box::new(|value| value.as_i64().is_some_and(|number| number > 1)),
        };
        let kept = filter.apply(vec![json!(3), json!(1), json!(2)]).unwrap();
        assert_eq!(kept, vec![json!(3), json!(2)]);
    }
}
