// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] of a single [`gherkin::Step`].

use crate::{step::Resolver, TestResult};

use super::{Setup, Teardown, Tester};

/// [`Tester`] of a single [`gherkin::Step`], delegating its execution to a
/// [`Resolver`].
///
/// When skipped, neither acquires nor releases any resources, and never
/// invokes the [`Resolver::execute()`].
#[derive(Clone, Copy, Debug)]
pub struct StepTester<R> {
    /// [`Resolver`] executing [`gherkin::Step`]s.
    resolver: R,
}

impl<R> StepTester<R> {
    /// Creates a new [`StepTester`] on top of the given [`Resolver`].
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<E, R: Resolver<E>> Tester<E, gherkin::Step> for StepTester<R> {
    type Result = TestResult;

    fn set_up(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
        skip: bool,
    ) -> Setup {
        if skip {
            return Setup::default();
        }
        self.resolver
            .prepare(env, feature, step)
            .map_or_else(Setup::failed, |()| Setup::default())
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
        skip: bool,
    ) -> TestResult {
        if skip {
            return TestResult::Skipped;
        }
        self.resolver.execute(env, feature, step)
    }

    fn tear_down(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
        skip: bool,
        _: &Setup,
        _: &TestResult,
    ) -> Teardown {
        if skip {
            return Teardown::default();
        }
        self.resolver
            .release(env, feature, step)
            .map_or_else(Teardown::failed, |()| Teardown::default())
    }
}
