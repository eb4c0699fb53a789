//! The operator protocol.
//!
//! An [`Operator`] is either eager or lazy:
//!
//! - [`Operator::Eager`] wraps a plain function from value to value. It always
//!   sees a fully materialized input.
//! - [`Operator::Lazy`] wraps a [`LazyOperator`], which can take part in a
//!   fused run. It exposes an eager fallback ([`LazyOperator::apply`]) and a
//!   per-run [`Stepper`] that is fed one element at a time and answers with a
//!   [`StepSignal`].
//!
//! Operators are immutable. Any state a lazy operator needs while a run is
//! being evaluated (a remaining count, a set of seen values) lives in the
//! stepper returned by [`LazyOperator::start`], so every run starts from
//! scratch and the same operator can be evaluated any number of times, from
//! any number of threads.
//!
//! # Writing a lazy operator
//!
//! ```rust
//! use lazypipe::operator::{LazyOperator, Operator, StepSignal, Stepper};
//! use lazypipe::{PipeError, Value, json, pipe, take};
//!
//! /// Emits every element twice.
//! struct Twice;
//!
//! struct TwiceStepper;
//!
//! impl Stepper for TwiceStepper {
//!     fn step(&mut self, element: Value) -> Result<StepSignal, PipeError> {
//!         Ok(StepSignal::EmitMany(vec![element.clone(), element]))
//!     }
//! }
//!
//! impl LazyOperator for Twice {
//!     fn name(&self) -> &'static str {
//!         "twice"
//!     }
//!
//!     fn start(&self) -> Box<dyn Stepper + '_> {
//!         Box::new(TwiceStepper)
//!     }
//!
//!     fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError> {
//!         Ok(sequence.into_iter().flat_map(|element| [element.clone(), element]).collect())
//!     }
//! }
//!
//! let result = pipe!(json!([1, 2, 3]), Operator::lazy(Twice), take(3)).unwrap();
//! assert_eq!(result, json!([1, 1, 2]));
//! ```

use std::fmt;

use crate::error::PipeError;
use crate::value::{Value, kind_of};

/// The outcome of feeding one element to a [`Stepper`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepSignal {
    /// Produce exactly one element.
    Emit(Value),
    /// Produce zero or more elements, in order.
    EmitMany(Vec<Value>),
    /// Produce nothing for this element and keep pulling.
    Skip,
    /// Produce nothing for this element and accept no further elements.
    ///
    /// Elements this operator already let through keep flowing to the rest
    /// of the run; only the next source pull is suppressed.
    Stop,
}

/// The per-run half of a lazy operator.
///
/// A stepper is created by [`LazyOperator::start`] at the beginning of a run
/// and dropped when the run is materialized. The engine calls [`step`] once
/// per element reaching this operator, in source order.
///
/// [`step`]: Stepper::step
pub trait Stepper {
    /// Processes one element.
    ///
    /// # Errors
    ///
    /// Returns an error when the operator's function fails; the whole pipe
    /// evaluation fails with it.
    fn step(&mut self, element: Value) -> Result<StepSignal, PipeError>;

    /// Returns `true` once the stepper will accept no further elements.
    ///
    /// Optional. The engine checks this before every pull, which lets a
    /// limiting operator end the run right after its last emission instead
    /// of waiting for one more element to answer [`StepSignal::Stop`].
    /// Returning [`StepSignal::Stop`] closes the operator on its own, whatever
    /// this method reports afterwards.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// An operator that can take part in fused, pull-driven evaluation.
///
/// Implementations must make [`apply`](LazyOperator::apply) and fused
/// evaluation through [`start`](LazyOperator::start) produce the same
/// output, in the same order, for every input.
pub trait LazyOperator: Send + Sync {
    /// A short name used in errors and diagnostics.
    fn name(&self) -> &'static str;

    /// Creates fresh per-run state.
    fn start(&self) -> Box<dyn Stepper + '_>;

    /// Applies the operator to a fully materialized sequence.
    ///
    /// # Errors
    ///
    /// Returns an error when the operator's function fails.
    fn apply(&self, sequence: Vec<Value>) -> Result<Vec<Value>, PipeError>;
}

type EagerFunction = Box<dyn Fn(Value) -> Result<Value, PipeError> + Send + Sync>;

/// A plain unary function used as a pipe step.
pub struct EagerOperator {
    name: &'static str,
    function: EagerFunction,
}

impl EagerOperator {
    /// Wraps `function` under `name`.
    pub fn new<F>(name: &'static str, function: F) -> Self
    where
        F: Fn(Value) -> Result<Value, PipeError> + Send + Sync + 'static,
    {
        Self {
            name,
            function: Box::new(function),
        }
    }

    /// Returns the operator name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Calls the wrapped function.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function returns.
    pub fn apply(&self, value: Value) -> Result<Value, PipeError> {
        (self.function)(value)
    }
}

impl fmt::Debug for EagerOperator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("EagerOperator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A single step of a pipe.
///
/// The dispatcher matches on this tag to decide whether the step can join a
/// fused run.
pub enum Operator {
    /// Applied to the whole current value.
    Eager(EagerOperator),
    /// Fusable with adjacent lazy operators when the current value is a sequence.
    Lazy(Box<dyn LazyOperator>),
}

impl Operator {
    /// Creates an eager operator from a fallible function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazypipe::operator::Operator;
    /// use lazypipe::json;
    ///
    /// let operator = Operator::eager("wrap", |value| Ok(json!([value])));
    /// assert_eq!(operator.apply(json!(1)).unwrap(), json!([1]));
    /// assert!(!operator.is_lazy());
    /// ```
    pub fn eager<F>(name: &'static str, function: F) -> Self
    where
        F: Fn(Value) -> Result<Value, PipeError> + Send + Sync + 'static,
    {
        Self::Eager(EagerOperator::new(name, function))
    }

    /// Creates a lazy operator.
    pub fn lazy<L>(operator: L) -> Self
    where
        L: LazyOperator + 'static,
    {
        Self::Lazy(Box::new(operator))
    }

    /// Returns the operator name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eager(operator) => operator.name(),
            Self::Lazy(operator) => operator.name(),
        }
    }

    /// Returns `true` when the operator can join a fused run.
    pub const fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// Returns the lazy half of the operator, if it has one.
    pub fn as_lazy(&self) -> Option<&dyn LazyOperator> {
        match self {
            Self::Lazy(operator) => Some(&**operator),
            Self::Eager(_) => None,
        }
    }

    /// Applies the operator to a whole value, without fusion.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::NotASequence`] when a lazy operator receives a
    /// value that is not a sequence, and otherwise whatever error the
    /// operator's function returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazypipe::{PipeError, json, take};
    ///
    /// assert_eq!(take(2).apply(json!([1, 2, 3])).unwrap(), json!([1, 2]));
    /// assert!(matches!(
    ///     take(2).apply(json!(7)),
    ///     Err(PipeError::NotASequence { operator: "take", found: "number" })
    /// ));
    /// ```
    pub fn apply(&self, value: Value) -> Result<Value, PipeError> {
        match self {
            Self::Eager(operator) => operator.apply(value),
            Self::Lazy(operator) => match value {
                Value::Array(sequence) => operator.apply(sequence).map(Value::Array),
                other => Err(PipeError::NotASequence {
                    operator: operator.name(),
                    found: kind_of(&other),
                }),
            },
        }
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(operator) => formatter
                .debug_tuple("Eager")
                .field(&operator.name())
                .finish(),
            Self::Lazy(operator) => formatter
                .debug_tuple("Lazy")
                .field(&operator.name())
                .finish(),
        }
    }
}

static_assertions::assert_impl_all!(Operator: Send, Sync);
static_assertions::assert_impl_all!(StepSignal: Send, Sync, Clone);
