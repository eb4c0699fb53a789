//! Built-in operator factories.
//!
//! Every factory returns a fresh [`Operator`](crate::operator::Operator).
//!
//! | Factory | Kind | Per-element signal |
//! |---|---|---|
//! | [`map`], [`try_map`] | lazy | `Emit(f(element))` |
//! | [`for_each`], [`passthrough`] | lazy | `Emit(element)` |
//! | [`filter`] | lazy | `Emit` when the predicate holds, else `Skip` |
//! | [`take`] | lazy | `Emit` until the count is spent, then exhausted |
//! | [`skip`] | lazy | `Skip` for the first n elements, then `Emit` |
//! | [`take_while`] | lazy | `Emit` while the predicate holds, then `Stop` |
//! | [`skip_while`] | lazy | `Skip` while the predicate holds, then `Emit` |
//! | [`flat`], [`flat_depth`] | lazy | `EmitMany(inner elements)` |
//! | [`flat_map`], [`try_flat_map`] | lazy | `EmitMany(f(element))` |
//! | [`unique`] | lazy | `Emit` first occurrences, `Skip` repeats |
//! | [`func`], [`try_func`], [`identity`] | eager | |
//! | [`prop`] | eager | |

mod eager;
mod filter;
mod flatten;
mod limit;
mod map;
mod unique;

pub use eager::{func, identity, prop, try_func};
pub use filter::filter;
pub use flatten::{flat, flat_depth, flat_map, try_flat_map};
pub use limit::{skip, skip_while, take, take_while};
pub use map::{for_each, map, passthrough, try_map};
pub use unique::unique;
