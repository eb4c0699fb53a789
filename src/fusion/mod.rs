//! The fusion engine.
//!
//! A [`Run`] is a maximal group of adjacent lazy operators together with the
//! sequence they consume. Materializing a run pulls source elements one at a
//! time and threads each through every operator, left to right, before the
//! next element is pulled:
//!
//! 1. Before a pull, if any operator in the run is closed (it signalled
//!    [`StepSignal::Stop`] or reports [`Stepper::is_exhausted`]), the run
//!    ends. Every output has to pass through every operator, so a closed
//!    operator means no further output is possible.
//! 2. The pulled element starts a worklist of live values. Each operator
//!    maps the worklist: `Emit` replaces a value, `EmitMany` replaces it with
//!    zero or more values, `Skip` drops it, and `Stop` drops it and closes
//!    the operator. Values that reach a closed operator are dropped without
//!    invoking it.
//! 3. Whatever survives the last operator is appended to the output.
//!
//! An element that exhausts a limiter is still threaded through the rest of
//! the run in full, so `take(1)` followed by `flat()` emits every inner
//! element of the first outer element.
//!
//! # Examples
//!
//! ```rust
//! use lazypipe::fusion::Run;
//! use lazypipe::{filter, json, map, take};
//!
//! let times_ten = map(|value| json!(value.as_i64().unwrap_or_default() * 10));
//! let odd_tens = filter(|value| value.as_i64().is_some_and(|number| (number / 10) % 2 == 1));
//! let first_two = take(2);
//!
//! let mut run = Run::new(vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
//! for operator in [&times_ten, &odd_tens, &first_two] {
//!     run.push(operator.as_lazy().unwrap());
//! }
//!
//! let (output, stats) = run.execute().unwrap();
//! assert_eq!(output, vec![json!(10), json!(30)]);
//! assert_eq!(stats.pulled, 3);
//! assert!(stats.halted);
//! ```

use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::error::PipeError;
use crate::operator::{LazyOperator, StepSignal, Stepper};
use crate::value::Value;

/// The live values derived from one pulled element.
type Worklist = SmallVec<[Value; 4]>;

/// Counters describing one materialized run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Source elements pulled into the run.
    pub pulled: usize,
    /// Elements appended to the output.
    pub emitted: usize,
    /// Whether a closed operator ended the run before the source was drained.
    pub halted: bool,
}

/// One operator of a run together with its per-run state.
struct Stage<'a> {
    operator: &'static str,
    stepper: Box<dyn Stepper + 'a>,
    stopped: bool,
}

impl<'a> Stage<'a> {
    fn new(operator: &'a dyn LazyOperator) -> Self {
        Self {
            operator: operator.name(),
            stepper: operator.start(),
            stopped: false,
        }
    }

    fn is_closed(&self) -> bool {
        self.stopped || self.stepper.is_exhausted()
    }

    fn feed(&mut self, live: Worklist) -> Result<Worklist, PipeError> {
        let mut next = Worklist::new();
        for value in live {
            if self.is_closed() {
                break;
            }
            match self.stepper.step(value)? {
                StepSignal::Emit(value) => next.push(value),
                StepSignal::EmitMany(values) => next.extend(values),
                StepSignal::Skip => {}
                StepSignal::Stop => self.stopped = true,
            }
        }
        Ok(next)
    }
}

/// A pending group of lazy operators and the sequence they will consume.
///
/// Nothing is evaluated until [`materialize`](Run::materialize) or
/// [`execute`](Run::execute) is called.
pub struct Run<'a> {
    source: Vec<Value>,
    operators: Vec<&'a dyn LazyOperator>,
}

impl<'a> Run<'a> {
    /// Starts an empty run over `source`.
    pub const fn new(source: Vec<Value>) -> Self {
        Self {
            source,
            operators: Vec::new(),
        }
    }

    /// Appends an operator to the run.
    pub fn push(&mut self, operator: &'a dyn LazyOperator) {
        self.operators.push(operator);
    }

    /// Returns the number of operators in the run.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns `true` when the run holds no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Evaluates the run and returns its output sequence.
    ///
    /// A run of a single operator has nothing to fuse and goes through that
    /// operator's eager [`apply`](LazyOperator::apply).
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any operator in the run.
    pub fn materialize(self) -> Result<Vec<Value>, PipeError> {
        if let [operator] = self.operators.as_slice() {
            let operator = *operator;
            debug!(operator = operator.name(), "single-operator run applied eagerly");
            return operator.apply(self.source);
        }
        self.execute().map(|(output, _)| output)
    }

    /// Evaluates the run by pull-driven fusion and reports what it did.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any operator in the run; the partial
    /// output is discarded.
    pub fn execute(self) -> Result<(Vec<Value>, RunStats), PipeError> {
        let mut stages: Vec<Stage<'a>> = self.operators.into_iter().map(Stage::new).collect();
        let mut source = self.source.into_iter();
        let mut output = Vec::new();
        let mut stats = RunStats::default();

        loop {
            if stages.iter().any(Stage::is_closed) {
                stats.halted = !source.as_slice().is_empty();
                break;
            }
            let Some(element) = source.next() else {
                break;
            };
            stats.pulled += 1;

            let mut live: Worklist = smallvec![element];
            for stage in &mut stages {
                if live.is_empty() {
                    break;
                }
                live = stage.feed(live)?;
            }
            stats.emitted += live.len();
            output.extend(live);
        }

        debug!(
            operators = ?stages.iter().map(|stage| stage.operator).collect::<Vec<_>>(),
            pulled = stats.pulled,
            emitted = stats.emitted,
            halted = stats.halted,
            "run materialized"
        );
        Ok((output, stats))
    }
}
