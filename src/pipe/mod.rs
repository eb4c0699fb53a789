//! The pipe dispatcher.
//!
//! [`Pipeline`] walks its operators left to right and keeps track of one of
//! two states:
//!
//! - **Idle**: the current value is fully materialized. An eager operator is
//!   applied to it directly. A lazy operator opens a new [`Run`] when the
//!   value is a sequence; otherwise the operator is applied eagerly, which
//!   fails with [`PipeError::NotASequence`].
//! - **In a run**: lazy operators are appended to the pending run. An eager
//!   operator first materializes the run, then is applied to the result.
//!
//! A run still pending after the last operator is materialized to produce the
//! final value. With [`Fusion::Disabled`] every operator is applied eagerly,
//! one after another; the output is the same either way.

mod config;
mod macros;

pub use config::{Fusion, PipeConfig};

use tracing::trace;

use crate::error::PipeError;
use crate::fusion::Run;
use crate::operator::Operator;
use crate::value::Value;

/// Dispatcher state between two operators.
enum Dispatch<'a> {
    Idle(Value),
    InRun(Run<'a>),
}

/// An ordered, reusable list of operators.
///
/// Evaluation state lives entirely inside [`run`](Pipeline::run), so one
/// pipeline can be run any number of times and from several threads at once.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{Pipeline, filter, json, map, take};
///
/// let pipeline = Pipeline::new([
///     map(|value| json!(value.as_i64().unwrap_or_default() * 10)),
///     filter(|value| value.as_i64().is_some_and(|number| number > 10)),
/// ])
/// .then(take(2));
///
/// assert_eq!(pipeline.run(json!([1, 2, 3, 4])).unwrap(), json!([20, 30]));
/// assert_eq!(pipeline.run(json!([5])).unwrap(), json!([50]));
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    operators: Vec<Operator>,
    config: PipeConfig,
}

impl Pipeline {
    /// Creates a pipeline from operators in application order.
    pub fn new<I>(operators: I) -> Self
    where
        I: IntoIterator<Item = Operator>,
    {
        Self {
            operators: operators.into_iter().collect(),
            config: PipeConfig::default(),
        }
    }

    /// Replaces the evaluation settings.
    #[must_use]
    pub const fn with_config(mut self, config: PipeConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends an operator and returns the pipeline.
    #[must_use]
    pub fn then(mut self, operator: Operator) -> Self {
        self.operators.push(operator);
        self
    }

    /// Appends an operator.
    pub fn push(&mut self, operator: Operator) {
        self.operators.push(operator);
    }

    /// Returns the evaluation settings.
    pub const fn config(&self) -> PipeConfig {
        self.config
    }

    /// Returns the operators in application order.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Returns the number of operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns `true` when the pipeline has no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Pipes `value` through every operator.
    ///
    /// An empty pipeline returns `value` unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any operator. No partial output is
    /// returned.
    pub fn run(&self, value: Value) -> Result<Value, PipeError> {
        match self.config.fusion() {
            Fusion::Enabled => self.run_fused(value),
            Fusion::Disabled => self.run_eager(value),
        }
    }

    fn run_eager(&self, value: Value) -> Result<Value, PipeError> {
        self.operators
            .iter()
            .try_fold(value, |value, operator| operator.apply(value))
    }

    fn run_fused(&self, value: Value) -> Result<Value, PipeError> {
        let mut state = Dispatch::Idle(value);

        for operator in &self.operators {
            state = match (state, operator) {
                (Dispatch::Idle(Value::Array(sequence)), Operator::Lazy(lazy)) => {
                    trace!(operator = lazy.name(), "run opened");
                    let mut run = Run::new(sequence);
                    run.push(&**lazy);
                    Dispatch::InRun(run)
                }
                (Dispatch::Idle(value), operator) => {
                    trace!(operator = operator.name(), "applied to materialized value");
                    Dispatch::Idle(operator.apply(value)?)
                }
                (Dispatch::InRun(mut run), Operator::Lazy(lazy)) => {
                    trace!(operator = lazy.name(), "joined run");
                    run.push(&**lazy);
                    Dispatch::InRun(run)
                }
                (Dispatch::InRun(run), Operator::Eager(eager)) => {
                    trace!(
                        operator = eager.name(),
                        operators = run.len(),
                        "run closed by eager operator"
                    );
                    let sequence = run.materialize()?;
                    Dispatch::Idle(eager.apply(Value::Array(sequence))?)
                }
            };
        }

        match state {
            Dispatch::Idle(value) => Ok(value),
            Dispatch::InRun(run) => {
                trace!(operators = run.len(), "trailing run closed");
                run.materialize().map(Value::Array)
            }
        }
    }
}

impl FromIterator<Operator> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Operator>>(operators: I) -> Self {
        Self::new(operators)
    }
}

impl Extend<Operator> for Pipeline {
    fn extend<I: IntoIterator<Item = Operator>>(&mut self, operators: I) {
        self.operators.extend(operators);
    }
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);

/// Pipes `value` through `operators` with fusion enabled.
///
/// This is the function behind the [`pipe!`](crate::pipe!) macro.
///
/// # Errors
///
/// Returns the first error raised by any operator.
///
/// # Examples
///
/// ```rust
/// use lazypipe::{flat, json, pipe::pipe, take};
///
/// let result = pipe(json!([[1, 2], [3, 4]]), [take(1), flat()]).unwrap();
/// assert_eq!(result, json!([1, 2]));
/// ```
pub fn pipe<I>(value: Value, operators: I) -> Result<Value, PipeError>
where
    I: IntoIterator<Item = Operator>,
{
    Pipeline::new(operators).run(value)
}
