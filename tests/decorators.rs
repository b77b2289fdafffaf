use std::sync::{Arc, Mutex};

use cucumber_tester::{
    decorator::Wrapped,
    error::{Failure, Fatal, LifecycleError, Stage},
    event::Event,
    result::ScenarioResult,
    step::{Collection, Context},
    Environment, Outcome as _, Registry, Setup, Severity, Suite, Teardown,
    TestResult, Tester,
};
use regex::Regex;

type Log = Arc<Mutex<Vec<String>>>;

#[derive(Debug)]
struct World {
    suite: Arc<Suite>,
    log: Log,
}

impl World {
    fn new(log: &Log) -> Self {
        Self { suite: Suite::new("default"), log: Arc::clone(log) }
    }
}

impl Environment for World {
    fn suite(&self) -> &Suite {
        &self.suite
    }

    fn isolate(&self, _: &gherkin::Scenario) -> Self {
        Self { suite: Arc::clone(&self.suite), log: Arc::clone(&self.log) }
    }
}

fn push(log: &Log, entry: impl Into<String>) {
    log.lock().unwrap().push(entry.into());
}

fn record(w: &mut World, ctx: Context) {
    push(&w.log, format!("step {}", ctx.step.value));
}

fn collection() -> Collection<World> {
    Collection::new().given(None, Regex::new(".*").unwrap(), record)
}

fn parse(text: &str) -> gherkin::Feature {
    gherkin::Feature::parse(text, gherkin::GherkinEnv::default()).unwrap()
}

const FEATURE: &str = "\
Feature: Decorators
  Scenario: wrapped
    Given first
    Given second
";

/// Step wrapper logging around the wrapped `test`.
struct Logging {
    name: &'static str,
    inner: Wrapped<World, gherkin::Step, TestResult>,
}

impl Tester<World, gherkin::Step> for Logging {
    type Result = TestResult;

    fn set_up(
        &self,
        env: &mut World,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
        skip: bool,
    ) -> Setup {
        self.inner.set_up(env, feature, step, skip)
    }

    fn test(
        &self,
        env: &mut World,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
        skip: bool,
    ) -> TestResult {
        push(&env.log, format!("{} pre", self.name));
        let result = self.inner.test(env, feature, step, skip);
        push(&env.log, format!("{} post", self.name));
        result
    }

    fn tear_down(
        &self,
        env: &mut World,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
        skip: bool,
        setup: &Setup,
        result: &TestResult,
    ) -> Teardown {
        self.inner.tear_down(env, feature, step, skip, setup, result)
    }
}

/// Scenario wrapper failing to acquire its fixture.
struct NoFixture(Wrapped<World, gherkin::Scenario, ScenarioResult>);

impl Tester<World, gherkin::Scenario> for NoFixture {
    type Result = ScenarioResult;

    fn set_up(
        &self,
        env: &mut World,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
        skip: bool,
    ) -> Setup {
        _ = self.0.set_up(env, feature, scenario, skip);
        Setup::failed(Fatal::set_up("no fixture"))
    }

    fn test(
        &self,
        env: &mut World,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
        skip: bool,
    ) -> ScenarioResult {
        self.0.test(env, feature, scenario, skip)
    }

    fn tear_down(
        &self,
        env: &mut World,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
        skip: bool,
        setup: &Setup,
        result: &ScenarioResult,
    ) -> Teardown {
        self.0.tear_down(env, feature, scenario, skip, setup, result)
    }
}

#[test]
fn highest_priority_wraps_outermost() {
    let feature = parse(FEATURE);
    let log = Log::default();
    let mut registry = Registry::<World>::new();
    _ = registry
        .step
        .wrap(10, |inner| Arc::new(Logging { name: "W1", inner }))
        .wrap(20, |inner| Arc::new(Logging { name: "W2", inner }));
    let testers = registry.build(collection());
    let step = &feature.scenarios[0].steps[0];

    let tested = testers.step.run(&mut World::new(&log), &feature, step, false);

    assert!(tested.is_passed());
    assert_eq!(
        *log.lock().unwrap(),
        ["W2 pre", "W1 pre", "step first", "W1 post", "W2 post"],
    );
}

#[test]
fn outermost_setup_is_authoritative() {
    let feature = parse(FEATURE);
    let log = Log::default();
    let published = Arc::new(Mutex::new(Vec::new()));
    let p = Arc::clone(&published);
    let mut registry = Registry::<World>::new();
    _ = registry
        .register_events(Arc::new(move |ev: &Event<'_, World>| {
            if let Event::Before(b) = ev {
                p.lock().unwrap().push(b.setup.is_successful());
            }
        }))
        .scenario
        .wrap(0, |inner| Arc::new(NoFixture(inner)));
    let testers = registry.build(collection());

    let tested = testers.scenario.run(
        &mut World::new(&log),
        &feature,
        &feature.scenarios[0],
        false,
    );

    assert!(matches!(
        tested.test_result(),
        TestResult::Failed(Failure::Lifecycle(LifecycleError::Fatal(Fatal {
            stage: Stage::SetUp,
            ..
        }))),
    ));
    assert!(tested
        .result
        .steps
        .iter()
        .all(|s| s.test_result().severity() == Severity::Skipped));
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(*published.lock().unwrap(), [false, true, true]);
}
