use std::sync::Arc;

use cucumber_tester::{
    event::{Collector, Kind, Record},
    step::{Collection, Context},
    Environment, Outcome as _, Registry, Scope, Severity, Suite, Tester as _,
};
use regex::Regex;

#[derive(Debug)]
struct World(Arc<Suite>);

impl Environment for World {
    fn suite(&self) -> &Suite {
        &self.0
    }

    fn isolate(&self, _: &gherkin::Scenario) -> Self {
        Self(Arc::clone(&self.0))
    }
}

fn pass(_: &mut World, _: Context) {}

fn fail(_: &mut World, _: Context) {
    panic!("no more cucumbers");
}

const FEATURE: &str = "\
Feature: Outline events
  Background:
    Given ready

  Scenario Outline: eat <n>
    Given eat <n>

    Examples:
      | n  |
      | 1  |
      | 99 |
";

#[test]
fn outline_events_nest_per_row() {
    let feature =
        gherkin::Feature::parse(FEATURE, gherkin::GherkinEnv::default())
            .unwrap();
    let collector = Collector::new();
    let mut registry = Registry::<World>::new();
    _ = registry.register_events(Arc::new(collector.clone()));
    let testers = registry.build(
        Collection::new()
            .given(None, Regex::new("^ready$").unwrap(), pass)
            .given(None, Regex::new(r"^eat 1$").unwrap(), pass)
            .given(None, Regex::new(r"^eat 99$").unwrap(), fail),
    );

    let tested = testers.feature.run(
        &mut World(Suite::new("default")),
        &feature,
        &feature,
        false,
    );

    assert_eq!(tested.test_result().severity(), Severity::Failed);

    let records = collector.records();
    let row = [
        Kind::Before(Scope::Example),
        Kind::Before(Scope::Background),
        Kind::Before(Scope::Step),
        Kind::After(Scope::Step),
        Kind::After(Scope::Background),
        Kind::Before(Scope::Step),
        Kind::After(Scope::Step),
        Kind::After(Scope::Example),
    ];
    let expected = [Kind::Before(Scope::Feature), Kind::Before(Scope::Outline)]
        .into_iter()
        .chain(row)
        .chain(row)
        .chain([Kind::After(Scope::Outline), Kind::After(Scope::Feature)])
        .collect::<Vec<_>>();
    assert_eq!(records.iter().map(|r| r.kind).collect::<Vec<_>>(), expected);

    let named = |kind: Kind| {
        records
            .iter()
            .filter(|r| r.kind == kind)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    };
    assert_eq!(named(Kind::Before(Scope::Outline)), ["before outline eat <n>"]);
    assert_eq!(
        named(Kind::After(Scope::Example)),
        ["after example eat 1", "after example eat 99"],
    );

    let failed = records
        .iter()
        .filter(|r| r.severity == Some(Severity::Failed))
        .map(|r| (r.kind, r.location.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        failed,
        [
            (Kind::After(Scope::Step), Some("Outline events:6".to_owned())),
            (Kind::After(Scope::Example), Some("Outline events:11".to_owned())),
            (Kind::After(Scope::Outline), Some("Outline events:5".to_owned())),
            (Kind::After(Scope::Feature), Some("Outline events:1".to_owned())),
        ],
    );
}

#[test]
fn records_display_kind_and_name() {
    let record = Record {
        kind: Kind::After(Scope::Scenario),
        name: "eating".to_owned(),
        location: None,
        severity: Some(Severity::Passed),
    };

    assert_eq!(record.to_string(), "after scenario eating");
}
