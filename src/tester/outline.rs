// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] of an [`Outline`].

use crate::{
    node::{Example, Outline},
    result::{OutlineResult, ScenarioResult},
    Environment,
};

use super::{Setup, Teardown, Tester};

/// [`Tester`] of an [`Outline`], running each of its [`Example`]s with the
/// given example [`Tester`].
///
/// [`Example`]s are independent: each one is tested against its own isolated
/// [`Environment`], and a failed [`Example`] never skips the following ones.
#[derive(Clone, Copy, Debug)]
pub struct OutlineTester<Ex> {
    /// [`Tester`] of the [`Example`]s.
    example: Ex,
}

impl<Ex> OutlineTester<Ex> {
    /// Creates a new [`OutlineTester`] on top of the given example
    /// [`Tester`].
    #[must_use]
    pub const fn new(example: Ex) -> Self {
        Self { example }
    }
}

impl<E, Ex> Tester<E, Outline> for OutlineTester<Ex>
where
    E: Environment,
    Ex: Tester<E, Example, Result = ScenarioResult>,
{
    type Result = OutlineResult;

    fn set_up(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &Outline,
        _: bool,
    ) -> Setup {
        Setup::default()
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        outline: &Outline,
        skip: bool,
    ) -> OutlineResult {
        OutlineResult {
            examples: outline
                .examples
                .iter()
                .map(|example| {
                    let mut env = env.isolate(&example.scenario);
                    self.example.run(&mut env, feature, example, skip)
                })
                .collect(),
        }
    }

    fn tear_down(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &Outline,
        _: bool,
        _: &Setup,
        _: &OutlineResult,
    ) -> Teardown {
        Teardown::default()
    }
}
