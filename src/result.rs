// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcomes of testing specification nodes.
//!
//! Leaf nodes produce a [`TestResult`]. Composite nodes keep every child's
//! [`Tested`] outcome, and reduce them to the most severe [`TestResult`] via
//! the [`Outcome`] trait.

use derive_more::with_trait::Display;
use either::Either;

use crate::{
    error::{Failure, LifecycleError},
    tester::{Setup, Teardown},
};

/// Severity of a [`TestResult`], used for combining results.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub enum Severity {
    /// Test passed.
    #[display("passed")]
    Passed,

    /// Test wasn't executed.
    #[display("skipped")]
    Skipped,

    /// Test has no matching definition.
    #[display("pending")]
    Pending,

    /// Test failed.
    #[display("failed")]
    Failed,
}

/// Outcome of testing a single node.
#[derive(Clone, Debug)]
pub enum TestResult {
    /// Test passed.
    Passed,

    /// Test wasn't executed.
    Skipped,

    /// [`Step`] text doesn't match any definition.
    ///
    /// [`Step`]: gherkin::Step
    Pending,

    /// Test failed with the given cause.
    Failed(Failure),
}

impl TestResult {
    /// Returns [`Severity`] of this [`TestResult`].
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Passed => Severity::Passed,
            Self::Skipped => Severity::Skipped,
            Self::Pending => Severity::Pending,
            Self::Failed(_) => Severity::Failed,
        }
    }

    /// Indicates whether this [`TestResult`] is [`TestResult::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the [`Failure`] cause, if this [`TestResult`] is failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(f) => Some(f),
            Self::Passed | Self::Skipped | Self::Pending => None,
        }
    }

    /// Combines the given `results` into the most severe one.
    ///
    /// Of equally severe results the first one wins, so a [`Failure`] cause
    /// is kept intact. No results combine into [`TestResult::Passed`].
    #[must_use]
    pub fn combine<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        results.into_iter().fold(Self::Passed, |worst, r| {
            if r.severity() > worst.severity() {
                r
            } else {
                worst
            }
        })
    }
}

/// Anything reducible to a single [`TestResult`].
pub trait Outcome {
    /// Returns the most severe [`TestResult`] of this [`Outcome`].
    #[must_use]
    fn test_result(&self) -> TestResult;

    /// Indicates whether this [`Outcome`] is passed.
    #[must_use]
    fn is_passed(&self) -> bool {
        self.test_result().is_passed()
    }

    /// Collects [`LifecycleError`]s of this [`Outcome`] and all its children.
    #[must_use]
    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        Vec::new()
    }
}

impl Outcome for TestResult {
    fn test_result(&self) -> TestResult {
        self.clone()
    }
}

impl<L: Outcome, R: Outcome> Outcome for Either<L, R> {
    fn test_result(&self) -> TestResult {
        either::for_both!(self, o => o.test_result())
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        either::for_both!(self, o => o.lifecycle_errors())
    }
}

/// Complete lifecycle of a tested unit: its [`Setup`], result and
/// [`Teardown`].
#[derive(Clone, Debug)]
pub struct Tested<R> {
    /// Artifact of the unit's `setUp`.
    pub setup: Setup,

    /// Result of the unit's `test`.
    pub result: R,

    /// Artifact of the unit's `tearDown`.
    pub teardown: Teardown,
}

impl<R> Tested<R> {
    /// Creates a new [`Tested`] out of its parts.
    #[must_use]
    pub const fn new(setup: Setup, result: R, teardown: Teardown) -> Self {
        Self { setup, result, teardown }
    }
}

impl<R: Outcome> Outcome for Tested<R> {
    /// A failed [`Setup`] makes the unit failed, while a failed [`Teardown`]
    /// never changes the already computed result.
    fn test_result(&self) -> TestResult {
        self.setup.result_of(&self.result)
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        self.setup
            .errors()
            .chain(self.result.lifecycle_errors())
            .chain(self.teardown.errors())
            .collect()
    }
}

/// Combines the given children [`Outcome`]s.
fn combine<'o, O: Outcome + 'o>(
    children: impl IntoIterator<Item = &'o O>,
) -> TestResult {
    TestResult::combine(children.into_iter().map(Outcome::test_result))
}

/// Collects [`LifecycleError`]s of the given children [`Outcome`]s.
fn collect_errors<'o, O: Outcome + 'o>(
    children: impl IntoIterator<Item = &'o O>,
) -> Vec<LifecycleError> {
    children.into_iter().flat_map(Outcome::lifecycle_errors).collect()
}

/// Result of a [`Background`].
///
/// [`Background`]: gherkin::Background
#[derive(Clone, Debug, Default)]
pub struct BackgroundResult {
    /// Outcomes of the [`Background`] steps, in declared order.
    ///
    /// [`Background`]: gherkin::Background
    pub steps: Vec<Tested<TestResult>>,
}

impl Outcome for BackgroundResult {
    fn test_result(&self) -> TestResult {
        combine(&self.steps)
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        collect_errors(&self.steps)
    }
}

/// Result of a [`Scenario`] or a single outline [`Example`].
///
/// [`Example`]: crate::Example
/// [`Scenario`]: gherkin::Scenario
#[derive(Clone, Debug, Default)]
pub struct ScenarioResult {
    /// Outcome of the [`Feature`]'s [`Background`], if any.
    ///
    /// [`Background`]: gherkin::Background
    /// [`Feature`]: gherkin::Feature
    pub background: Option<Tested<BackgroundResult>>,

    /// Outcomes of the scenario's own steps, in declared order.
    pub steps: Vec<Tested<TestResult>>,
}

impl ScenarioResult {
    /// Iterates over outcomes of all the steps, [`Background`] ones first.
    ///
    /// [`Background`]: gherkin::Background
    pub fn all_steps(&self) -> impl Iterator<Item = &Tested<TestResult>> {
        self.background
            .iter()
            .flat_map(|bg| &bg.result.steps)
            .chain(&self.steps)
    }
}

impl Outcome for ScenarioResult {
    fn test_result(&self) -> TestResult {
        TestResult::combine(
            self.background
                .iter()
                .map(Outcome::test_result)
                .chain(self.steps.iter().map(Outcome::test_result)),
        )
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        self.background
            .iter()
            .flat_map(Outcome::lifecycle_errors)
            .chain(collect_errors(&self.steps))
            .collect()
    }
}

/// Result of a [`Outline`].
///
/// [`Outline`]: crate::Outline
#[derive(Clone, Debug, Default)]
pub struct OutlineResult {
    /// Outcomes of the outline examples, one per row.
    pub examples: Vec<Tested<ScenarioResult>>,
}

impl Outcome for OutlineResult {
    fn test_result(&self) -> TestResult {
        combine(&self.examples)
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        collect_errors(&self.examples)
    }
}

/// Result of a [`Feature`].
///
/// [`Feature`]: gherkin::Feature
#[derive(Clone, Debug, Default)]
pub struct FeatureResult {
    /// Outcomes of plain scenarios ([`Either::Left`]) and outlines
    /// ([`Either::Right`]) in document order.
    pub scenarios: Vec<Either<Tested<ScenarioResult>, Tested<OutlineResult>>>,
}

impl Outcome for FeatureResult {
    fn test_result(&self) -> TestResult {
        combine(&self.scenarios)
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        collect_errors(&self.scenarios)
    }
}

/// Result of a whole suite.
#[derive(Clone, Debug, Default)]
pub struct SuiteResult {
    /// Outcomes of the suite's features, in iteration order.
    pub features: Vec<Tested<FeatureResult>>,
}

impl Outcome for SuiteResult {
    fn test_result(&self) -> TestResult {
        combine(&self.features)
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        collect_errors(&self.features)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::error::Fatal;

    use super::*;

    fn failed(msg: &'static str) -> TestResult {
        TestResult::Failed(Failure::Panic(Arc::new(msg)))
    }

    fn passed<R>(result: R) -> Tested<R> {
        Tested::new(Setup::default(), result, Teardown::default())
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Passed < Severity::Skipped);
        assert!(Severity::Skipped < Severity::Pending);
        assert!(Severity::Pending < Severity::Failed);
    }

    #[test]
    fn combines_into_most_severe() {
        let r = TestResult::combine([
            TestResult::Passed,
            TestResult::Skipped,
            TestResult::Passed,
        ]);
        assert_eq!(r.severity(), Severity::Skipped);

        let r = TestResult::combine([
            TestResult::Skipped,
            failed("x"),
            TestResult::Pending,
        ]);
        let info = r.failure().and_then(Failure::panic_info).unwrap();
        assert_eq!(crate::error::coerce_error(info), "x");
    }

    #[test]
    fn first_of_equally_severe_wins() {
        let r = TestResult::combine([failed("first"), failed("second")]);
        let info = r.failure().and_then(Failure::panic_info).unwrap();
        assert_eq!(crate::error::coerce_error(info), "first");
    }

    #[test]
    fn empty_combines_into_passed() {
        assert!(TestResult::combine([]).is_passed());
        assert!(ScenarioResult::default().is_passed());
        assert!(OutlineResult::default().is_passed());
    }

    #[test]
    fn failed_setup_fails_the_unit() {
        let tested = Tested::new(
            Setup::failed(Fatal::set_up("no fixture")),
            TestResult::Skipped,
            Teardown::default(),
        );

        assert_eq!(tested.test_result().severity(), Severity::Failed);
        assert_eq!(tested.lifecycle_errors().len(), 1);
    }

    #[test]
    fn failed_teardown_keeps_the_result() {
        let tested = Tested::new(
            Setup::default(),
            TestResult::Passed,
            Teardown::failed(Fatal::tear_down("leak")),
        );

        assert!(tested.is_passed());
        assert_eq!(tested.lifecycle_errors().len(), 1);
    }

    #[test]
    fn scenario_keeps_every_step() {
        let scenario = ScenarioResult {
            background: Some(passed(BackgroundResult {
                steps: vec![passed(TestResult::Passed)],
            })),
            steps: vec![
                passed(TestResult::Pending),
                passed(TestResult::Skipped),
            ],
        };

        assert_eq!(scenario.all_steps().count(), 3);
        assert_eq!(scenario.test_result().severity(), Severity::Pending);
    }

    #[test]
    fn feature_combines_scenarios_and_outlines() {
        let feature = FeatureResult {
            scenarios: vec![
                Either::Left(passed(ScenarioResult::default())),
                Either::Right(passed(OutlineResult {
                    examples: vec![
                        passed(ScenarioResult::default()),
                        passed(ScenarioResult {
                            background: None,
                            steps: vec![passed(failed("row 2"))],
                        }),
                    ],
                })),
            ],
        };

        assert_eq!(feature.test_result().severity(), Severity::Failed);
    }
}
