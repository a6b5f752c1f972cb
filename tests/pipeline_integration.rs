//! End-to-end pipeline runs against real files and controllable nodes

mod common;

use common::builders::WorkspaceBuilder;
use common::mock_helpers::{CountingSink, FailingSink, SlowSource};
use common::read_category;
use numclass_rs::classify::classify;
use numclass_rs::pipeline::nodes::{IntegerFileSource, IteratorSource, MemorySink};
use numclass_rs::pipeline::{Pipeline, PipelineError, PipelineReport, Router, SourceError};
use numclass_rs::Category;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

fn run_workspace(ws: &common::builders::Workspace) -> Result<PipelineReport, PipelineError> {
    let source = IntegerFileSource::open(&ws.input)?;
    let router = Router::standard_files(ws.output())?;
    Pipeline::new(&ws.config)?.run(source, router)
}

#[test]
fn test_fixture_files_written() {
    let ws = WorkspaceBuilder::new()
        .items([4, 9, -8, 7, 0, 1, -1])
        .build();

    let report = run_workspace(&ws).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.produced, 7);
    assert_eq!(read_category(ws.output(), Category::Even), vec![4, -8, 0]);
    assert_eq!(read_category(ws.output(), Category::Odd), vec![9, 7, 1, -1]);
    assert_eq!(read_category(ws.output(), Category::Positive), vec![4, 9, 7, 1]);
    assert_eq!(read_category(ws.output(), Category::Negative), vec![-8, -1]);
    assert_eq!(read_category(ws.output(), Category::Square), vec![4, 9, 0, 1]);
    assert_eq!(read_category(ws.output(), Category::Cube), vec![-8, 0, 1, -1]);
}

#[test]
fn test_capacity_one_classifies_every_item_once() {
    let items: Vec<i64> = (-5_000..5_000).collect();
    let ws = WorkspaceBuilder::new()
        .items(items.iter().copied())
        .capacity(1)
        .build();

    let report = run_workspace(&ws).unwrap();
    assert_eq!(report.produced, 10_000);
    assert_eq!(report.consumed, 10_000);

    let mut expected: BTreeMap<Category, Vec<i64>> = BTreeMap::new();
    for &item in &items {
        for category in classify(item) {
            expected.entry(category).or_default().push(item);
        }
    }
    for category in Category::ALL {
        let written = read_category(ws.output(), category);
        assert_eq!(
            written,
            expected.remove(&category).unwrap_or_default(),
            "{} file differs",
            category
        );
        assert_eq!(report.routed_to(category), written.len() as u64);
    }
}

#[test]
fn test_empty_input_creates_empty_outputs() {
    let ws = WorkspaceBuilder::new().build();

    let report = run_workspace(&ws).unwrap();

    assert_eq!(report.produced, 0);
    assert_eq!(report.consumed, 0);
    for category in Category::ALL {
        assert!(read_category(ws.output(), category).is_empty());
    }
}

#[test]
fn test_bad_token_returns_source_error() {
    let ws = WorkspaceBuilder::new()
        .items([1, 2, 3])
        .line("12abc")
        .items([5])
        .build();

    let err = run_workspace(&ws).unwrap_err();

    match err {
        PipelineError::Source(SourceError::Parse { line, token }) => {
            assert_eq!(line, 4);
            assert_eq!(token, "12abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_input_is_reported_before_outputs_exist() {
    let ws = WorkspaceBuilder::new().build();
    let missing = ws.dir.path().join("does-not-exist.txt");

    let result = IntegerFileSource::open(&missing);

    assert!(matches!(result, Err(SourceError::Open { .. })));
    assert!(!ws.output().exists());
}

#[test]
fn test_summary_json_written() {
    let ws = WorkspaceBuilder::new()
        .items([1, 2, 3, 4])
        .write_summary(true)
        .build();

    let report = run_workspace(&ws).unwrap();
    let path = ws.config.summary_path();
    report.write_json(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["produced"], 4);
    assert_eq!(json["consumed"], 4);
    assert_eq!(json["routed"]["even"], 2);
    assert_eq!(json["routed"]["square"], 2);
}

#[test]
fn test_sink_failure_stops_the_producer() {
    let router = Router::new().with_route(Category::Even, |_: &i64| true, FailingSink::after(3));
    let pipeline = Pipeline::with_capacity(4).unwrap();

    let err = pipeline
        .run(SlowSource::new(1_000_000, Duration::ZERO), router)
        .unwrap_err();

    assert!(matches!(err, PipelineError::Sink(_)), "got {err}");
}

#[test]
fn test_slow_consumer_never_loses_items() {
    let sink = CountingSink::new(Duration::from_micros(50));
    let router = Router::new().with_route(Category::Positive, |_: &i64| true, sink.clone());
    let pipeline = Pipeline::with_capacity(2).unwrap();

    let report = pipeline
        .run(SlowSource::new(500, Duration::ZERO), router)
        .unwrap();

    assert_eq!(report.consumed, 500);
    assert_eq!(sink.records(), 500);
}

#[test]
fn test_shutdown_timeout_bounds_a_stalled_consumer() {
    let ws = WorkspaceBuilder::new()
        .shutdown_timeout(Duration::from_millis(100))
        .build();
    let sink = CountingSink::new(Duration::from_millis(50));
    let router = Router::new().with_route(Category::Even, |_: &i64| true, sink);
    let pipeline = Pipeline::new(&ws.config).unwrap();

    let clock = Instant::now();
    let err = pipeline
        .run(IteratorSource::from_items(0..40i64), router)
        .unwrap_err();

    assert!(matches!(err, PipelineError::ShutdownTimedOut(_)), "got {err}");
    assert!(clock.elapsed() < common::test_timeout());
}

#[test]
fn test_memory_router_matches_classifier() {
    let sinks: Vec<(Category, MemorySink<i64>)> = Category::ALL
        .iter()
        .map(|&c| (c, MemorySink::new(c.label())))
        .collect();
    let mut router = Router::new();
    for (category, sink) in &sinks {
        let category = *category;
        router.add_route(category, move |i: &i64| category.matches(*i), sink.clone());
    }

    let report = Pipeline::with_capacity(3)
        .unwrap()
        .run(IteratorSource::from_items(-30..=30i64), router)
        .unwrap();

    assert_eq!(report.consumed, 61);
    for (category, sink) in sinks {
        let expected: Vec<i64> = (-30..=30).filter(|i| category.matches(*i)).collect();
        assert_eq!(sink.items(), expected);
    }
}
