// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Composition of [`Tester`]s out of prioritized wrappers.
//!
//! Every scope has its own list of [`Decorators`]. When building, the base
//! [`Tester`] of a scope is wrapped by each decorator in ascending priority
//! order, so the decorator with the highest priority ends up outermost.
//!
//! ```text
//! priority 20 ─┐ pre
//! priority 10 ─┤ ─┐ pre
//!        base  │  │ ── test
//! priority 10 ─┤ ─┘ post
//! priority 20 ─┘ post
//! ```

use std::{
    fmt,
    sync::{atomic::AtomicBool, Arc},
};

use itertools::Itertools as _;

use crate::{
    event::{EventDispatching, Sink},
    hook::{Hookable, Hooks},
    node::{Example, Node, Outline},
    result::{
        BackgroundResult, FeatureResult, OutlineResult, ScenarioResult,
    },
    step::Resolver,
    tester::{
        BackgroundTester, FailFast, FeatureTester, OutlineTester,
        ScenarioTester, StepTester, Tester,
    },
    Environment, TestResult,
};

/// Priority of the [`Hookable`] decorators.
pub const HOOKS_PRIORITY: i32 = -1000;

/// Priority of the [`FailFast`] decorators.
pub const FAIL_FAST_PRIORITY: i32 = -500;

/// Priority of the [`EventDispatching`] decorators.
pub const EVENTS_PRIORITY: i32 = 1000;

/// Type-erased [`Tester`] of a node `N`.
pub type Wrapped<E, N, R> = Arc<dyn Tester<E, N, Result = R>>;

/// Factory wrapping a [`Tester`] into another one.
type Factory<E, N, R> = Box<dyn Fn(Wrapped<E, N, R>) -> Wrapped<E, N, R>>;

/// Prioritized wrappers of a [`Tester`] of a node `N`.
pub struct Decorators<E, N: Node, R> {
    /// Registered wrappers along with their priorities.
    wrappers: Vec<(i32, Factory<E, N, R>)>,
}

impl<E, N: Node, R> fmt::Debug for Decorators<E, N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorators")
            .field("scope", &N::SCOPE)
            .field(
                "priorities",
                &self.wrappers.iter().map(|(p, _)| p).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<E, N: Node, R> Default for Decorators<E, N, R> {
    fn default() -> Self {
        Self { wrappers: Vec::new() }
    }
}

impl<E, N: Node, R> Decorators<E, N, R> {
    /// Registers the given `wrapper` with the given `priority`.
    ///
    /// Wrappers of equal priority wrap in their registration order, so the
    /// later registered one is the outer one.
    pub fn wrap<F>(&mut self, priority: i32, wrapper: F) -> &mut Self
    where
        F: Fn(Wrapped<E, N, R>) -> Wrapped<E, N, R> + 'static,
    {
        self.wrappers.push((priority, Box::new(wrapper)));
        self
    }

    /// Wraps the given `base` [`Tester`] with all the registered wrappers.
    #[must_use]
    pub fn decorate(&self, base: Wrapped<E, N, R>) -> Wrapped<E, N, R> {
        self.wrappers
            .iter()
            .sorted_by_key(|(priority, _)| *priority)
            .fold(base, |tester, (priority, wrap)| {
                tracing::trace!(scope = %N::SCOPE, priority, "decorating");
                wrap(tester)
            })
    }
}

/// Per-scope [`Decorators`] of all the [`Tester`]s of a run.
#[derive(Debug)]
pub struct Registry<E> {
    /// [`Decorators`] of [`gherkin::Step`]s.
    pub step: Decorators<E, gherkin::Step, TestResult>,

    /// [`Decorators`] of [`gherkin::Background`]s.
    pub background: Decorators<E, gherkin::Background, BackgroundResult>,

    /// [`Decorators`] of plain [`gherkin::Scenario`]s.
    pub scenario: Decorators<E, gherkin::Scenario, ScenarioResult>,

    /// [`Decorators`] of outline [`Example`]s.
    pub example: Decorators<E, Example, ScenarioResult>,

    /// [`Decorators`] of [`Outline`]s.
    pub outline: Decorators<E, Outline, OutlineResult>,

    /// [`Decorators`] of [`gherkin::Feature`]s.
    pub feature: Decorators<E, gherkin::Feature, FeatureResult>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            step: Decorators::default(),
            background: Decorators::default(),
            scenario: Decorators::default(),
            example: Decorators::default(),
            outline: Decorators::default(),
            feature: Decorators::default(),
        }
    }
}

/// Registers a wrapper sharing the given [`Arc`] for every scope of a
/// [`Registry`].
macro_rules! wrap_every_scope {
    ($registry:expr, $priority:expr, $shared:expr, $wrapper:ident) => {
        wrap_every_scope!(
            @fields $registry, $priority, $shared, $wrapper;
            step, background, scenario, example, outline, feature
        )
    };
    (
        @fields $registry:expr, $priority:expr, $shared:expr, $wrapper:ident;
        $($field:ident),+
    ) => {{$(
        let shared = Arc::clone(&$shared);
        _ = $registry.$field.wrap($priority, move |t| {
            Arc::new($wrapper::new(t, Arc::clone(&shared)))
        });
    )+}};
}

impl<E: 'static> Registry<E> {
    /// Creates a new [`Registry`] without any decorators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the [`Tester`]s of every scope into [`EventDispatching`] ones,
    /// publishing into the given [`Sink`].
    pub fn register_events(&mut self, sink: Arc<dyn Sink<E>>) -> &mut Self {
        wrap_every_scope!(self, EVENTS_PRIORITY, sink, EventDispatching);
        self
    }

    /// Wraps the [`Tester`]s of every scope into [`Hookable`] ones, calling
    /// the given [`Hooks`].
    pub fn register_hooks(&mut self, hooks: Arc<Hooks<E>>) -> &mut Self {
        wrap_every_scope!(self, HOOKS_PRIORITY, hooks, Hookable);
        self
    }

    /// Wraps the [`Tester`]s of scenarios, outline [`Example`]s, [`Outline`]s
    /// and features into [`FailFast`] ones, sharing the same flag.
    ///
    /// Steps and backgrounds are left as is, being skipped by their scenario.
    pub fn register_fail_fast(&mut self) -> &mut Self {
        let failed = Arc::new(AtomicBool::new(false));
        wrap_every_scope!(
            @fields self, FAIL_FAST_PRIORITY, failed, FailFast;
            scenario, example, outline, feature
        );
        self
    }
}

impl<E: Environment + 'static> Registry<E> {
    /// Builds all the decorated [`Tester`]s on top of the given [`Resolver`].
    #[must_use]
    pub fn build<R>(&self, resolver: R) -> Testers<E>
    where
        R: Resolver<E> + 'static,
    {
        let step = self.step.decorate(Arc::new(StepTester::new(resolver)));
        let background = self
            .background
            .decorate(Arc::new(BackgroundTester::new(Arc::clone(&step))));
        let scenario = self.scenario.decorate(Arc::new(ScenarioTester::new(
            Arc::clone(&background),
            Arc::clone(&step),
        )));
        let example = self.example.decorate(Arc::new(ScenarioTester::new(
            Arc::clone(&background),
            Arc::clone(&step),
        )));
        let outline = self
            .outline
            .decorate(Arc::new(OutlineTester::new(Arc::clone(&example))));
        let feature = self.feature.decorate(Arc::new(FeatureTester::new(
            Arc::clone(&scenario),
            Arc::clone(&outline),
        )));

        Testers { step, background, scenario, example, outline, feature }
    }
}

/// Fully decorated [`Tester`]s of every scope, built by
/// [`Registry::build()`].
pub struct Testers<E> {
    /// [`Tester`] of [`gherkin::Step`]s.
    pub step: Wrapped<E, gherkin::Step, TestResult>,

    /// [`Tester`] of [`gherkin::Background`]s.
    pub background: Wrapped<E, gherkin::Background, BackgroundResult>,

    /// [`Tester`] of plain [`gherkin::Scenario`]s.
    pub scenario: Wrapped<E, gherkin::Scenario, ScenarioResult>,

    /// [`Tester`] of outline [`Example`]s.
    pub example: Wrapped<E, Example, ScenarioResult>,

    /// [`Tester`] of [`Outline`]s.
    pub outline: Wrapped<E, Outline, OutlineResult>,

    /// [`Tester`] of [`gherkin::Feature`]s.
    pub feature: Wrapped<E, gherkin::Feature, FeatureResult>,
}

impl<E> fmt::Debug for Testers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Testers").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::tester::{Setup, Teardown};

    use super::*;

    type Log = Arc<Mutex<Vec<String>>>;

    /// Base [`Tester`] recording its stages.
    struct Base(Log);

    impl Tester<(), gherkin::Step> for Base {
        type Result = TestResult;

        fn set_up(
            &self,
            _: &mut (),
            _: &gherkin::Feature,
            _: &gherkin::Step,
            _: bool,
        ) -> Setup {
            self.0.lock().unwrap().push("base setUp".into());
            Setup::default()
        }

        fn test(
            &self,
            _: &mut (),
            _: &gherkin::Feature,
            _: &gherkin::Step,
            _: bool,
        ) -> TestResult {
            self.0.lock().unwrap().push("base test".into());
            TestResult::Passed
        }

        fn tear_down(
            &self,
            _: &mut (),
            _: &gherkin::Feature,
            _: &gherkin::Step,
            _: bool,
            _: &Setup,
            _: &TestResult,
        ) -> Teardown {
            self.0.lock().unwrap().push("base tearDown".into());
            Teardown::default()
        }
    }

    /// Wrapper recording its pre- and post-logic around `test`.
    struct Named {
        name: &'static str,
        log: Log,
        inner: Wrapped<(), gherkin::Step, TestResult>,
    }

    impl Tester<(), gherkin::Step> for Named {
        type Result = TestResult;

        fn set_up(
            &self,
            env: &mut (),
            feature: &gherkin::Feature,
            step: &gherkin::Step,
            skip: bool,
        ) -> Setup {
            self.inner.set_up(env, feature, step, skip)
        }

        fn test(
            &self,
            env: &mut (),
            feature: &gherkin::Feature,
            step: &gherkin::Step,
            skip: bool,
        ) -> TestResult {
            self.log.lock().unwrap().push(format!("{} pre", self.name));
            let res = self.inner.test(env, feature, step, skip);
            self.log.lock().unwrap().push(format!("{} post", self.name));
            res
        }

        fn tear_down(
            &self,
            env: &mut (),
            feature: &gherkin::Feature,
            step: &gherkin::Step,
            skip: bool,
            setup: &Setup,
            result: &TestResult,
        ) -> Teardown {
            self.inner.tear_down(env, feature, step, skip, setup, result)
        }
    }

    fn named(
        decorators: &mut Decorators<(), gherkin::Step, TestResult>,
        name: &'static str,
        priority: i32,
        log: &Log,
    ) {
        let log = log.clone();
        _ = decorators.wrap(priority, move |inner| {
            Arc::new(Named { name, log: log.clone(), inner })
        });
    }

    #[test]
    fn highest_priority_is_outermost() {
        let feature = gherkin::Feature::parse(
            "Feature: f\n  Scenario: s\n    Given a step\n",
            gherkin::GherkinEnv::default(),
        )
        .unwrap();
        let log = Log::default();
        let mut decorators = Decorators::default();
        named(&mut decorators, "W2", 20, &log);
        named(&mut decorators, "W1", 10, &log);

        let step = &feature.scenarios[0].steps[0];

        let tester = decorators.decorate(Arc::new(Base(log.clone())));
        let tested = tester.run(&mut (), &feature, step, false);

        assert!(tested.result.is_passed());
        assert_eq!(
            *log.lock().unwrap(),
            [
                "base setUp",
                "W2 pre",
                "W1 pre",
                "base test",
                "W1 post",
                "W2 post",
                "base tearDown",
            ],
        );
    }

    #[test]
    fn equal_priorities_keep_registration_order() {
        let feature = gherkin::Feature::parse(
            "Feature: f\n  Scenario: s\n    Given a step\n",
            gherkin::GherkinEnv::default(),
        )
        .unwrap();
        let log = Log::default();
        let mut decorators = Decorators::default();
        named(&mut decorators, "inner", 0, &log);
        named(&mut decorators, "outer", 0, &log);

        let step = &feature.scenarios[0].steps[0];

        let tester = decorators.decorate(Arc::new(Base(log.clone())));
        _ = tester.test(&mut (), &feature, step, true);

        assert_eq!(
            *log.lock().unwrap(),
            ["outer pre", "inner pre", "base test", "inner post", "outer post"],
        );
    }
}
