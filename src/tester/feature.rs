// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] of a [`gherkin::Feature`].

use either::Either;

use crate::{
    feature::Ext as _,
    node::Outline,
    result::{FeatureResult, OutlineResult, ScenarioResult},
    Environment,
};

use super::{Setup, Teardown, Tester};

/// [`Tester`] of a [`gherkin::Feature`].
///
/// Tests all the [`gherkin::Feature`]'s scenarios (including the ones inside
/// [`gherkin::Rule`]s) in order, each against its own isolated
/// [`Environment`]. Plain scenarios go to the scenario [`Tester`], while the
/// ones with [`gherkin::Examples`] are expanded into an [`Outline`] and go to
/// the outline [`Tester`].
#[derive(Clone, Copy, Debug)]
pub struct FeatureTester<Sc, Ol> {
    /// [`Tester`] of plain scenarios.
    scenario: Sc,

    /// [`Tester`] of [`Outline`]s.
    outline: Ol,
}

impl<Sc, Ol> FeatureTester<Sc, Ol> {
    /// Creates a new [`FeatureTester`] out of the given scenario and outline
    /// [`Tester`]s.
    #[must_use]
    pub const fn new(scenario: Sc, outline: Ol) -> Self {
        Self { scenario, outline }
    }
}

impl<E, Sc, Ol> Tester<E, gherkin::Feature> for FeatureTester<Sc, Ol>
where
    E: Environment,
    Sc: Tester<E, gherkin::Scenario, Result = ScenarioResult>,
    Ol: Tester<E, Outline, Result = OutlineResult>,
{
    type Result = FeatureResult;

    fn set_up(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &gherkin::Feature,
        _: bool,
    ) -> Setup {
        Setup::default()
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        _: &gherkin::Feature,
        skip: bool,
    ) -> FeatureResult {
        let scenarios = feature.all_scenarios().map(|sc| {
            let mut env = env.isolate(sc);
            if sc.examples.is_empty() {
                Either::Left(self.scenario.run(&mut env, feature, sc, skip))
            } else {
                let ol = Outline::new(sc.clone());
                Either::Right(self.outline.run(&mut env, feature, &ol, skip))
            }
        });

        FeatureResult { scenarios: scenarios.collect() }
    }

    fn tear_down(
        &self,
        _: &mut E,
        _: &gherkin::Feature,
        _: &gherkin::Feature,
        _: bool,
        _: &Setup,
        _: &FeatureResult,
    ) -> Teardown {
        Teardown::default()
    }
}
