// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level drive of all the suites to completion.

use std::{fmt, sync::Arc};

use derive_more::with_trait::Debug;
use either::Either;

use crate::{
    cli::Cli,
    decorator::{Registry, Testers},
    error::LifecycleError,
    event::{After, Before, Dispatcher, Event, Sink},
    hook::{AfterScope, BeforeScope, Hooks},
    node::Subject,
    result::{Outcome, ScenarioResult, Severity, SuiteResult, Tested},
    step::Resolver,
    tester::{Setup, Teardown, Tester as _},
    Environment, SpecificationIterator, Suite, TestResult,
};

/// Everything an [`Exercise`] is composed of.
#[derive(Debug)]
pub struct Configuration<E> {
    /// [`Registry`] of additional decorators.
    ///
    /// [`Exercise::new()`] registers the [`Hooks`], events and (if enabled)
    /// fail-fast decorators into it on its own.
    pub registry: Registry<E>,

    /// [`Dispatcher`] receiving all the [`Event`]s of a run.
    pub dispatcher: Dispatcher<E>,

    /// [`Hooks`] of a run.
    pub hooks: Hooks<E>,

    /// CLI options of a run.
    pub cli: Cli,
}

impl<E> Default for Configuration<E> {
    fn default() -> Self {
        Self {
            registry: Registry::default(),
            dispatcher: Dispatcher::default(),
            hooks: Hooks::default(),
            cli: Cli::default(),
        }
    }
}

/// Runner of all the suites' [`SpecificationIterator`]s.
#[derive(Debug)]
pub struct Exercise<E> {
    /// Fully decorated [`Tester`]s.
    ///
    /// [`Tester`]: crate::Tester
    testers: Testers<E>,

    /// [`Sink`] of all the [`Event`]s.
    #[debug(skip)]
    sink: Arc<dyn Sink<E>>,

    /// [`Hooks`] of the [`Suite`] scope.
    hooks: Arc<Hooks<E>>,

    /// CLI options.
    cli: Cli,
}

impl<E: Environment + 'static> Exercise<E> {
    /// Composes a new [`Exercise`] out of the given [`Configuration`],
    /// executing [`gherkin::Step`]s with the given [`Resolver`].
    #[must_use]
    pub fn new<R>(config: Configuration<E>, resolver: R) -> Self
    where
        R: Resolver<E> + 'static,
    {
        let Configuration { mut registry, dispatcher, hooks, cli } = config;
        let sink: Arc<dyn Sink<E>> = Arc::new(dispatcher);
        let hooks = Arc::new(hooks);

        _ = registry
            .register_hooks(Arc::clone(&hooks))
            .register_events(Arc::clone(&sink));
        if cli.fail_fast {
            _ = registry.register_fail_fast();
        }

        Self { testers: registry.build(resolver), sink, hooks, cli }
    }

    /// Runs all the given [`SpecificationIterator`]s, one per [`Suite`], in
    /// order.
    ///
    /// Every [`Suite`] gets its own environment created by the given
    /// `environment` factory, which is then isolated for each scenario.
    pub fn run<I, F>(
        &self,
        specifications: Vec<I>,
        mut environment: F,
    ) -> RunOutcome
    where
        I: SpecificationIterator,
        F: FnMut(&Arc<Suite>) -> E,
    {
        let suites = specifications
            .iter()
            .map(|s| Arc::clone(s.suite()))
            .collect::<Vec<_>>();
        tracing::debug!(suites = suites.len(), "exercise started");
        self.sink.publish(&Event::BeforeExercise { suites: &suites });

        let outcome = RunOutcome {
            suites: specifications
                .into_iter()
                .map(|spec| {
                    let suite = Arc::clone(spec.suite());
                    let mut env = environment(&suite);
                    let tested = self.run_suite(&mut env, spec);
                    (suite, tested)
                })
                .collect(),
            strict: self.cli.strict,
        };

        let result = outcome.test_result();
        self.sink.publish(&Event::AfterExercise {
            suites: &suites,
            result: &result,
        });
        tracing::info!(
            result = %result.severity(),
            failed = outcome.is_failed(),
            "{}",
            outcome.statistics(),
        );

        outcome
    }

    /// Runs the whole lifecycle of a single [`Suite`].
    fn run_suite<I>(&self, env: &mut E, mut spec: I) -> Tested<SuiteResult>
    where
        I: SpecificationIterator,
    {
        let suite = Arc::clone(spec.suite());
        let subject = Subject::Suite(&suite);
        let skip = self.cli.dry_run;

        let mut setup = Setup::default();
        if !skip {
            let specification: &dyn SpecificationIterator = &spec;
            setup = setup.with_hooks(self.hooks.dispatch_before(&BeforeScope {
                environment: &*env,
                subject,
                specification: Some(specification),
            }));
        }
        self.sink.publish(&Event::Before(Before {
            environment: &*env,
            subject,
            setup: &setup,
        }));

        let local_skip = skip || !setup.is_successful();
        let mut result = SuiteResult::default();
        for feature in spec.by_ref() {
            result.features.push(
                self.testers.feature.run(env, &feature, &feature, local_skip),
            );
        }

        let res = setup.result_of(&result);
        let mut teardown = Teardown::default();
        if !skip {
            let specification: &dyn SpecificationIterator = &spec;
            teardown =
                teardown.with_hooks(self.hooks.dispatch_after(&AfterScope {
                    environment: &*env,
                    subject,
                    specification: Some(specification),
                    result: &res,
                }));
        }
        self.sink.publish(&Event::After(After {
            environment: &*env,
            subject,
            result: res,
            teardown: &teardown,
        }));

        let tested = Tested::new(setup, result, teardown);
        for e in tested.setup.errors().chain(tested.teardown.errors()) {
            tracing::warn!(suite = %suite.name, error = %e, "lifecycle error");
        }
        tracing::debug!(
            suite = %suite.name,
            result = %tested.test_result().severity(),
            "suite tested",
        );
        tested
    }
}

/// Outcome of a whole [`Exercise::run()`].
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Outcomes of every [`Suite`], in run order.
    pub suites: Vec<(Arc<Suite>, Tested<SuiteResult>)>,

    /// Whether the run is considered failed when not every scenario has
    /// passed.
    pub strict: bool,
}

impl RunOutcome {
    /// Indicates whether the run has failed.
    ///
    /// A run fails if any scenario has failed, any lifecycle error occurred,
    /// or (in strict mode) if not every scenario has passed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        let result = self.test_result();
        result.severity() == Severity::Failed
            || !self.lifecycle_errors().is_empty()
            || (self.strict && !result.is_passed())
    }

    /// Counts [`Statistics`] of the run.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics {
            lifecycle_errors: self.lifecycle_errors().len(),
            ..Statistics::default()
        };
        let scenarios = self
            .suites
            .iter()
            .flat_map(|(_, s)| &s.result.features)
            .flat_map(|f| &f.result.scenarios)
            .flat_map(|sc| match sc {
                Either::Left(sc) => Either::Left(std::iter::once(sc)),
                Either::Right(ol) => Either::Right(ol.result.examples.iter()),
            });
        for sc in scenarios {
            stats.add(sc);
        }
        stats
    }
}

impl Outcome for RunOutcome {
    fn test_result(&self) -> TestResult {
        TestResult::combine(self.suites.iter().map(|(_, s)| s.test_result()))
    }

    fn lifecycle_errors(&self) -> Vec<LifecycleError> {
        self.suites.iter().flat_map(|(_, s)| s.lifecycle_errors()).collect()
    }
}

/// Per-[`Severity`] counts of tested units.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counts {
    /// Number of [`Severity::Passed`] units.
    pub passed: usize,

    /// Number of [`Severity::Skipped`] units.
    pub skipped: usize,

    /// Number of [`Severity::Pending`] units.
    pub pending: usize,

    /// Number of [`Severity::Failed`] units.
    pub failed: usize,
}

impl Counts {
    /// Counts a unit of the given [`Severity`].
    pub fn add(&mut self, severity: Severity) {
        let counter = match severity {
            Severity::Passed => &mut self.passed,
            Severity::Skipped => &mut self.skipped,
            Severity::Pending => &mut self.pending,
            Severity::Failed => &mut self.failed,
        };
        *counter += 1;
    }

    /// Returns the total number of counted units.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.skipped + self.pending + self.failed
    }

    /// Formats these [`Counts`] of units with the given `noun`.
    fn fmt_of(&self, noun: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        write!(f, "{total} {noun}{}", if total == 1 { "" } else { "s" })?;

        let parts = [
            (self.passed, Severity::Passed),
            (self.skipped, Severity::Skipped),
            (self.pending, Severity::Pending),
            (self.failed, Severity::Failed),
        ]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, s)| format!("{n} {s}"))
        .collect::<Vec<_>>();
        if !parts.is_empty() {
            write!(f, " ({})", parts.join(", "))?;
        }
        Ok(())
    }
}

/// Statistics of a whole run.
///
/// Scenarios include both plain scenarios and outline examples.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// [`Counts`] of scenarios.
    pub scenarios: Counts,

    /// [`Counts`] of steps, including [`Background`] ones.
    ///
    /// [`Background`]: gherkin::Background
    pub steps: Counts,

    /// Number of lifecycle errors.
    pub lifecycle_errors: usize,
}

impl Statistics {
    /// Counts the given scenario along with its steps.
    fn add(&mut self, scenario: &Tested<ScenarioResult>) {
        self.scenarios.add(scenario.test_result().severity());
        for step in scenario.result.all_steps() {
            self.steps.add(step.test_result().severity());
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.scenarios.fmt_of("scenario", f)?;
        f.write_str("\n")?;
        self.steps.fmt_of("step", f)?;
        if self.lifecycle_errors > 0 {
            let n = self.lifecycle_errors;
            write!(
                f,
                "\n{n} lifecycle error{}",
                if n == 1 { "" } else { "s" },
            )?;
        }
        Ok(())
    }
}
