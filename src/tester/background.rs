// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] of a [`gherkin::Background`].

use crate::{
    result::{BackgroundResult, Outcome as _, Tested},
    TestResult,
};

use super::{Setup, Teardown, Tester};

/// Runs the given `steps` in order through the given step [`Tester`].
///
/// Once a step is not passed, all the following ones are skipped, while still
/// being run through their whole lifecycle.
pub(crate) fn run_steps<'s, E, St>(
    tester: &St,
    env: &mut E,
    feature: &gherkin::Feature,
    steps: impl IntoIterator<Item = &'s gherkin::Step>,
    skip: &mut bool,
) -> Vec<Tested<TestResult>>
where
    St: Tester<E, gherkin::Step, Result = TestResult> + ?Sized,
{
    steps
        .into_iter()
        .map(|step| {
            let tested = tester.run(env, feature, step, *skip);
            *skip |= !tested.is_passed();
            tested
        })
        .collect()
}

/// [`Tester`] of a [`gherkin::Background`], running each of its steps with
/// the given step [`Tester`].
#[derive(Clone, Copy, Debug)]
pub struct BackgroundTester<St> {
    /// [`Tester`] of the [`gherkin::Background`] steps.
    step: St,
}

impl<St> BackgroundTester<St> {
    /// Creates a new [`BackgroundTester`] on top of the given step
    /// [`Tester`].
    #[must_use]
    pub const fn new(step: St) -> Self {
        Self { step }
    }
}

impl<E, St> Tester<E, gherkin::Background> for BackgroundTester<St>
where
    St: Tester<E, gherkin::Step, Result = TestResult>,
{
    type Result = BackgroundResult;

    fn set_up(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &gherkin::Background,
        _: bool,
    ) -> Setup {
        Setup::default()
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        background: &gherkin::Background,
        mut skip: bool,
    ) -> BackgroundResult {
        BackgroundResult {
            steps: run_steps(
                &self.step,
                env,
                feature,
                &background.steps,
                &mut skip,
            ),
        }
    }

    fn tear_down(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &gherkin::Background,
        _: bool,
        _: &Setup,
        _: &BackgroundResult,
    ) -> Teardown {
        Teardown::default()
    }
}
