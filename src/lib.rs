//! # lazypipe
//!
//! A left-to-right `pipe` combinator with lazy fusion of sequence operators.
//!
//! ## Overview
//!
//! `pipe!(value, op1, op2, ...)` applies operators in order. Plain functions
//! are applied to the whole value. Sequence operators such as `map`, `filter`,
//! `take` and `flat` are fused: adjacent ones form a single pull-driven run,
//! so each element travels through the whole run before the next one is
//! pulled, and a limiting operator stops the run as soon as it has what it
//! needs.
//!
//! - **Operators**: [`operator`] defines the eager/lazy protocol,
//!   [`operators`] the built-in factories
//! - **Fusion**: [`fusion`] evaluates a run of lazy operators
//! - **Dispatch**: [`pipe`](mod@pipe) groups operators into runs and
//!   eager steps
//! - **Values**: every value is a [`serde_json::Value`]; a sequence is an array
//!
//! ## Example
//!
//! ```rust
//! use lazypipe::prelude::*;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//!
//! let result = pipe!(
//!     json!([1, 2, 3, 4, 5]),
//!     map(move |value| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!         json!(value.as_i64().unwrap_or_default() * 10)
//!     }),
//!     filter(|value| value.as_i64().is_some_and(|number| (number / 10) % 2 == 1)),
//!     take(2),
//! )
//! .unwrap();
//!
//! assert_eq!(result, json!([10, 30]));
//! assert_eq!(calls.load(Ordering::SeqCst), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the operator factories, the pipeline types and the `pipe!` and
/// `json!` macros.
///
/// # Usage
///
/// ```rust
/// use lazypipe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{BoxError, PipeError};
    pub use crate::operator::Operator;
    pub use crate::operators::*;
    pub use crate::pipe;
    pub use crate::pipe::{Fusion, PipeConfig, Pipeline};
    pub use crate::value::Value;
    pub use serde_json::json;
}

pub mod error;
pub mod fusion;
pub mod operator;
pub mod operators;
pub mod pipe;
pub mod value;

pub use error::{BoxError, PipeError};
pub use operator::{EagerOperator, LazyOperator, Operator, StepSignal, Stepper};
pub use operators::{
    filter, flat, flat_depth, flat_map, for_each, func, identity, map, passthrough, prop, skip,
    skip_while, take, take_while, try_flat_map, try_func, try_map, unique,
};
pub use pipe::{Fusion, PipeConfig, Pipeline, pipe};
pub use serde_json::json;
pub use value::Value;
