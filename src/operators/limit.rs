//! Limiting operators: `take`, `skip`, `take_while` and `skip_while`.
//!
//! Their counters and flags live in the stepper, never in the operator, so
//! re-running a pipe always starts from the bound the operator was built
//! with.

use crate::error::PipeError;
use crate::operator::{LazyOperator, Operator, StepSignal, Stepper};
use crate::value::Value;

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

struct Take {
    count: usize,
}

struct TakeStepper {
    remaining: usize,
}

impl Stepper for TakeStepper {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        if self.remaining == 0 {
            return Ok(StepSignal::Stop);
        }
        self.remaining -= 1;
        Ok(StepSignal::Emit(element))
    }

    fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl LazyOperator for Take {
    fn name(&self) -> &'static str {
        "take"
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(TakeStepper {
            remaining: self.count,
        })
    }

    fn apply(&self, mut sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        sequence.truncate(self.count);
        Ok(sequence)
    }
}

/// Keeps the first `count` elements.
///
/// In a fused run the source is not pulled again once `count` elements got
/// through, and `take(0)` pulls nothing at all. Chained `take`s limit to the
/// smallest bound.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{json, pipe, take};
///
/// assert_eq!(pipe!(json!([1, 2, 3]), take(2)).unwrap(), json!([1, 2]));
/// assert_eq!(pipe!(json!([1, 2, 3]), take(5), take(1)).unwrap(), json!([1]));
/// assert_eq!(pipe!(json!([1, 2, 3]), take(0)).unwrap(), json!([]));
/// ```
pub fn take(count: usize) -> Operator {
    Operator::lazy(Take { count })
}

struct Skip {
    count: usize,
}

struct SkipStepper {
    pending: usize,
}

impl Stepper for SkipStepper {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        if self.pending > 0 {
            self.pending -= 1;
            Ok(StepSignal::Skip)
        } else {
            Ok(StepSignal::Emit(element))
        }
    }
}

impl LazyOperator for Skip {
    fn name(&self) -> &'static str {
        "skip"
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(SkipStepper {
            pending: self.count,
        })
    }

    fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        Ok(sequence.into_iter().skip(self.count).collect())
    }
}

/// Discards the first `count` elements.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{json, pipe, skip, take};
///
/// assert_eq!(pipe!(json!([1, 2, 3, 4]), skip(1), take(2)).unwrap(), json!([2, 3]));
/// ```
pub fn skip(count: usize) -> Operator {
    Operator::lazy(Skip { count })
}

struct TakeWhile {
    predicate: Predicate,
}

struct TakeWhileStepper<'a> {
    operator: &'a TakeWhile,
    done: bool,
}

impl Stepper for TakeWhileStepper<'_> {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        if !self.done && (self.operator.predicate)(&element) {
            return Ok(StepSignal::Emit(element));
        }
        self.done = true;
        Ok(StepSignal::Stop)
    }

    fn is_exhausted(&self) -> bool {
        self.done
    }
}

impl LazyOperator for TakeWhile {
    fn name(&self) -> &'static str {
        "take_while"
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(TakeWhileStepper {
            operator: self,
            done: false,
        })
    }

    fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        Ok(sequence
            .into_iter()
            .take_while(|element| (self.predicate)(element))
            .collect())
    }
}

/// Keeps elements up to, not including, the first one that fails `predicate`.
///
/// The failing element ends the run: nothing after it is pulled.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{json, pipe, take_while};
///
/// let result = pipe!(
///     json!([1, 2, 7, 3]),
///     take_while(|value| value.as_i64().is_some_and(|number| number < 5)),
/// )
/// .unwrap();
/// assert_eq!(result, json!([1, 2]));
/// ```
pub fn take_while<P>(predicate: P) -> Operator
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Operator::lazy(TakeWhile {
        predicate: Box::new(predicate),
    })
}

struct SkipWhile {
    predicate: Predicate,
}

struct SkipWhileStepper<'a> {
    operator: &'a SkipWhile,
    skipping: bool,
}

impl Stepper for SkipWhileStepper<'_> {
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
        if self.skipping && (self.operator.predicate)(&element) {
            return Ok(StepSignal::Skip);
        }
        self.skipping = false;
        Ok(StepSignal::Emit(element))
    }
}

impl LazyOperator for SkipWhile {
    fn name(&self) -> &'static str {
        "skip_while"
    }

    fn start(&self) -> Box<dyn Stepper + '_> {
        Box::new(SkipWhileStepper {
            operator: self,
            skipping: true,
        })
    }

    fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
        Ok(sequence
            .into_iter()
            .skip_while(|element| (self.predicate)(element))
            .collect())
    }
}

/// Discards elements while `predicate` holds, then keeps everything.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{json, pipe, skip_while};
///
/// let result = pipe!(
///     json!([0, 0, 1, 0]),
///     skip_while(|value| value == &json!(0)),
/// )
/// .unwrap();
/// assert_eq!(result, json!([1, 0]));
/// ```
pub fn skip_while<P>(predicate: P) -> Operator
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Operator::lazy(SkipWhile {
        predicate: Box::new(predicate),
    })
}
