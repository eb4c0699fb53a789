//! Shared helpers for the integration tests.

#![allow(dead_code)]

use lazypipe::{Operator, Value, json, map};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts calls into a user function.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// A `map` that multiplies numbers by `factor` and records every call.
    pub fn times(&self, factor: i64) -> Operator {
        let counter = self.clone();
        map(move |value| {
            counter.record();
            json!(number(&value) * factor)
        })
    }
}

pub fn number(value: &Value) -> i64 {
    value.as_i64().unwrap_or_default()
}

pub fn numbers<I>(values: I) -> Value
where
    I: IntoIterator<Item = i64>,
{
    Value::Array(values.into_iter().map(|value| json!(value)).collect())
}
