//! Integration tests for the pipe! macro and the pipe dispatcher.
//!
//! Covers left-to-right composition of plain functions and the call-count
//! guarantees of fused runs.

mod common;

use common::{CallCounter, number, numbers};
use lazypipe::{
    Fusion, PipeConfig, PipeError, Pipeline, Value, filter, flat, flat_map, func, identity, json,
    pipe, prop, take, try_func,
};
use rstest::rstest;

fn add_one() -> lazypipe::Operator {
    func(|value| json!(number(&value) + 1))
}

fn double() -> lazypipe::Operator {
    func(|value| json!(number(&value) * 2))
}

fn square() -> lazypipe::Operator {
    func(|value| json!(number(&value) * number(&value)))
}

// =============================================================================
// Plain function composition
// =============================================================================

#[rstest]
fn test_pipe_value_only() {
    assert_eq!(pipe!(42).unwrap(), json!(42));
}

#[rstest]
fn test_pipe_value_only_string() {
    assert_eq!(pipe!("hello").unwrap(), json!("hello"));
}

#[rstest]
fn test_pipe_two_functions() {
    // add_one(double(5)) = 11
    assert_eq!(pipe!(5, double(), add_one()).unwrap(), json!(11));
}

#[rstest]
fn test_pipe_three_functions() {
    // add_one(double(square(3))) = 19
    assert_eq!(pipe!(3, square(), double(), add_one()).unwrap(), json!(19));
}

#[rstest]
fn test_pipe_with_type_conversion() {
    let to_text = func(|value| json!(value.to_string()));
    let length = func(|value| json!(value.as_str().map_or(0, str::len)));
    assert_eq!(pipe!(12345, to_text, length).unwrap(), json!(5));
}

#[rstest]
fn test_pipe_with_captured_environment() {
    let multiplier = 3;
    let offset = 10;
    let multiply = func(move |value| json!(number(&value) * multiplier));
    let add_offset = func(move |value| json!(number(&value) + offset));

    // 5 -> 15 -> 25
    assert_eq!(pipe!(5, multiply, add_offset).unwrap(), json!(25));
}

#[rstest]
fn test_pipe_with_trailing_comma() {
    assert_eq!(pipe!(5, double(), add_one(),).unwrap(), json!(11));
}

#[rstest]
fn test_pipe_with_identity() {
    assert_eq!(pipe!(json!({"a": [1]}), identity()).unwrap(), json!({"a": [1]}));
}

#[rstest]
fn test_pipe_macro_matches_function() {
    let from_macro = pipe!(numbers(1..=4), take(3), double_each()).unwrap();
    let from_function = lazypipe::pipe(numbers(1..=4), [take(3), double_each()]).unwrap();
    assert_eq!(from_macro, from_function);
}

fn double_each() -> lazypipe::Operator {
    lazypipe::map(|value| json!(number(&value) * 2))
}

// =============================================================================
// Call counts in fused runs
// =============================================================================

#[rstest]
fn test_map_then_take_calls_map_twice() {
    let counter = CallCounter::new();
    let result = pipe!(numbers([1, 2, 3]), counter.times(10), take(2)).unwrap();

    assert_eq!(result, json!([10, 20]));
    assert_eq!(counter.count(), 2);
}

#[rstest]
fn test_filter_between_map_and_take_widens_pulls() {
    let counter = CallCounter::new();
    let result = pipe!(
        numbers(1..=5),
        counter.times(10),
        filter(|value| (number(value) / 10) % 2 == 1),
        take(2),
    )
    .unwrap();

    assert_eq!(result, json!([10, 30]));
    assert_eq!(counter.count(), 3);
}

#[rstest]
fn test_run_starts_after_projection() {
    let counter = CallCounter::new();
    let result = pipe!(
        json!({"inner": [1, 2, 3]}),
        prop("inner"),
        counter.times(10),
        take(2),
    )
    .unwrap();

    assert_eq!(result, json!([10, 20]));
    assert_eq!(counter.count(), 2);
}

#[rstest]
fn test_plain_function_breaks_fusion() {
    let counter = CallCounter::new();
    let result = pipe!(
        numbers([1, 2, 3]),
        counter.times(10),
        func(|value| value),
        take(2),
    )
    .unwrap();

    assert_eq!(result, json!([10, 20]));
    assert_eq!(counter.count(), 3);
}

#[rstest]
fn test_chained_takes_use_smaller_limit() {
    let counter = CallCounter::new();
    let result = pipe!(numbers([1, 2, 3]), counter.times(10), take(2), take(1)).unwrap();

    assert_eq!(result, json!([10]));
    assert_eq!(counter.count(), 1);
}

#[rstest]
fn test_runs_count_independently() {
    let first = CallCounter::new();
    let second = CallCounter::new();
    let result = pipe!(
        numbers(1..=7),
        first.times(10),
        take(4),
        identity(),
        second.times(10),
        take(2),
    )
    .unwrap();

    assert_eq!(result, json!([100, 200]));
    assert_eq!(first.count(), 4);
    assert_eq!(second.count(), 2);
}

#[rstest]
fn test_take_then_flat_pulls_one_outer_element() {
    let touched = CallCounter::new();
    let probe = touched.clone();
    let result = pipe!(
        json!([[1, 2], [3, 4], [5, 6]]),
        lazypipe::for_each(move |_| probe.record()),
        take(1),
        flat(),
    )
    .unwrap();

    assert_eq!(result, json!([1, 2]));
    assert_eq!(touched.count(), 1);
}

#[rstest]
fn test_take_then_flat_map_draws_from_first_two_outer_elements() {
    let touched = CallCounter::new();
    let probe = touched.clone();
    let result = pipe!(
        json!([[[1, 2], [3, 4]], [[5, 6], [7, 8]], [[9, 10], [11, 12]]]),
        take(2),
        flat_map(move |pair| {
            probe.record();
            pair.as_array()
                .map(|inner| inner.iter().map(|nested| nested[1].clone()).collect())
                .unwrap_or_else(|| Value::Array(Vec::new()))
        }),
    )
    .unwrap();

    assert_eq!(result, json!([2, 4, 6, 8]));
    assert_eq!(touched.count(), 2);
}

// =============================================================================
// Errors and configuration
// =============================================================================

#[rstest]
fn test_empty_pipe_returns_value() {
    let operators: [lazypipe::Operator; 0] = [];
    assert_eq!(lazypipe::pipe(json!([1, 2]), operators).unwrap(), json!([1, 2]));
}

#[rstest]
fn test_failure_stops_later_operators() {
    let later = CallCounter::new();
    let error = pipe!(
        json!("not a number"),
        try_func(|value| value.as_i64().map(Value::from).ok_or("expected a number")),
        later.times(2),
    )
    .unwrap_err();

    assert_eq!(error.to_string(), "try_func failed: expected a number");
    assert_eq!(later.count(), 0);
}

#[rstest]
fn test_failure_inside_run_returns_no_partial_output() {
    let result = pipe!(
        numbers(1..=4),
        lazypipe::try_map(|value| {
            if number(&value) == 3 {
                Err("three")
            } else {
                Ok(value)
            }
        }),
        take(4),
    );

    assert!(matches!(result, Err(PipeError::Operator { operator: "try_map", .. })));
}

#[rstest]
#[case::fused(Fusion::Enabled, 2)]
#[case::eager(Fusion::Disabled, 3)]
fn test_fusion_mode_changes_calls_not_output(
    #[case] fusion: Fusion,
    #[case] expected_calls: usize,
) {
    let counter = CallCounter::new();
    let pipeline = Pipeline::new([counter.times(10), take(2)])
        .with_config(PipeConfig::default().with_fusion(fusion));

    assert_eq!(pipeline.run(numbers([1, 2, 3])).unwrap(), json!([10, 20]));
    assert_eq!(counter.count(), expected_calls);
}
