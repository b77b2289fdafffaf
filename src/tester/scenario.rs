// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] of a [`gherkin::Scenario`] or a single outline [`Example`].

use crate::{
    node::Example,
    result::{BackgroundResult, Outcome as _, ScenarioResult},
    TestResult,
};

use super::{background::run_steps, Setup, Teardown, Tester};

/// [`Tester`] of a [`gherkin::Scenario`] or an outline [`Example`].
///
/// Runs the [`gherkin::Feature`]'s [`gherkin::Background`] first (if any),
/// and then the scenario's own steps. Once a [`gherkin::Background`] or a
/// step is not passed, all the following steps are skipped.
#[derive(Clone, Copy, Debug)]
pub struct ScenarioTester<Bg, St> {
    /// [`Tester`] of the [`gherkin::Background`].
    background: Bg,

    /// [`Tester`] of the steps.
    step: St,
}

impl<Bg, St> ScenarioTester<Bg, St> {
    /// Creates a new [`ScenarioTester`] out of the given
    /// [`gherkin::Background`] and step [`Tester`]s.
    #[must_use]
    pub const fn new(background: Bg, step: St) -> Self {
        Self { background, step }
    }

    /// Tests the given `scenario` against the given `env`.
    fn test_scenario<E>(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
        mut skip: bool,
    ) -> ScenarioResult
    where
        Bg: Tester<E, gherkin::Background, Result = BackgroundResult>,
        St: Tester<E, gherkin::Step, Result = TestResult>,
    {
        let background = feature.background.as_ref().map(|bg| {
            let tested = self.background.run(env, feature, bg, skip);
            skip |= !tested.is_passed();
            tested
        });
        let steps =
            run_steps(&self.step, env, feature, &scenario.steps, &mut skip);

        ScenarioResult { background, steps }
    }
}

impl<E, Bg, St> Tester<E, gherkin::Scenario> for ScenarioTester<Bg, St>
where
    Bg: Tester<E, gherkin::Background, Result = BackgroundResult>,
    St: Tester<E, gherkin::Step, Result = TestResult>,
{
    type Result = ScenarioResult;

    fn set_up(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &gherkin::Scenario,
        _: bool,
    ) -> Setup {
        Setup::default()
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
        skip: bool,
    ) -> ScenarioResult {
        self.test_scenario(env, feature, scenario, skip)
    }

    fn tear_down(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &gherkin::Scenario,
        _: bool,
        _: &Setup,
        _: &ScenarioResult,
    ) -> Teardown {
        Teardown::default()
    }
}

impl<E, Bg, St> Tester<E, Example> for ScenarioTester<Bg, St>
where
    Bg: Tester<E, gherkin::Background, Result = BackgroundResult>,
    St: Tester<E, gherkin::Step, Result = TestResult>,
{
    type Result = ScenarioResult;

    fn set_up(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &Example,
        _: bool,
    ) -> Setup {
        Setup::default()
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        example: &Example,
        skip: bool,
    ) -> ScenarioResult {
        self.test_scenario(env, feature, &example.scenario, skip)
    }

    fn tear_down(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &Example,
        _: bool,
        _: &Setup,
        _: &ScenarioResult,
    ) -> Teardown {
        Teardown::default()
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use crate::{
        result::{Outcome, Severity},
        step::{Collection, Context},
        tester::{BackgroundTester, StepTester},
    };

    use super::*;

    const FEATURE: &str = "\
Feature: Basket
  Background:
    Given a basket
    Given a broken handle

  Scenario: eating
    Given 3 cucumbers
    When I eat one
";

    fn ok(env: &mut Vec<String>, ctx: Context) {
        env.push(ctx.step.value);
    }

    fn broken(env: &mut Vec<String>, ctx: Context) {
        env.push(ctx.step.value);
        panic!("broken");
    }

    fn tester(
        handle: fn(&mut Vec<String>, Context),
    ) -> impl Tester<Vec<String>, gherkin::Scenario, Result = ScenarioResult>
    {
        let steps = Collection::new()
            .given(None, Regex::new("^a basket$").unwrap(), ok)
            .given(None, Regex::new("^a broken handle$").unwrap(), handle)
            .given(None, Regex::new(r"^\d+ cucumbers$").unwrap(), ok)
            .when(None, Regex::new("^I eat one$").unwrap(), ok);
        let step = std::sync::Arc::new(StepTester::new(steps));

        ScenarioTester::new(BackgroundTester::new(step.clone()), step)
    }

    #[test]
    fn runs_background_then_steps() {
        let feature =
            gherkin::Feature::parse(FEATURE, gherkin::GherkinEnv::default())
                .unwrap();
        let mut env = Vec::new();

        let tested =
            tester(ok).run(&mut env, &feature, &feature.scenarios[0], false);

        assert!(tested.is_passed());
        assert_eq!(
            env,
            ["a basket", "a broken handle", "3 cucumbers", "I eat one"],
        );
        assert_eq!(tested.result.all_steps().count(), 4);
    }

    #[test]
    fn background_failure_skips_the_rest() {
        let feature =
            gherkin::Feature::parse(FEATURE, gherkin::GherkinEnv::default())
                .unwrap();
        let mut env = Vec::new();

        let tested = tester(broken).run(
            &mut env,
            &feature,
            &feature.scenarios[0],
            false,
        );

        assert_eq!(env, ["a basket", "a broken handle"]);
        assert_eq!(tested.test_result().severity(), Severity::Failed);
        assert_eq!(
            tested
                .result
                .all_steps()
                .map(|s| s.test_result().severity())
                .collect::<Vec<_>>(),
            [
                Severity::Passed,
                Severity::Failed,
                Severity::Skipped,
                Severity::Skipped,
            ],
        );
    }
}
