// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for testing specification nodes through a `setUp`/`test`/`tearDown`
//! lifecycle.
//!
//! Every [`Tester`] implements the same contract for its node type, so any
//! [`Tester`] may be wrapped into another one adding behavior around the
//! delegation (see [`decorator`] module).
//!
//! [`decorator`]: crate::decorator

pub mod background;
pub mod fail_fast;
pub mod feature;
pub mod outline;
pub mod scenario;
pub mod step;

use std::sync::Arc;

use crate::{
    error::{Fatal, LifecycleError},
    hook::HookCall,
    node::Node,
    result::{Outcome, TestResult, Tested},
};

#[doc(inline)]
pub use self::{
    background::BackgroundTester, fail_fast::FailFast, feature::FeatureTester,
    outline::OutlineTester, scenario::ScenarioTester, step::StepTester,
};

/// Declares a lifecycle artifact type.
macro_rules! artifact {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Default)]
        pub struct $name {
            /// [`Fatal`] error of the lifecycle stage, if any.
            fatal: Option<Fatal>,

            /// Hooks called at the lifecycle stage.
            hooks: Vec<HookCall>,
        }

        impl $name {
            #[doc = concat!("Creates a failed [`", stringify!($name), "`].")]
            #[must_use]
            pub const fn failed(fatal: Fatal) -> Self {
                Self { fatal: Some(fatal), hooks: Vec::new() }
            }

            /// Attaches the given hook `calls` to this artifact.
            #[must_use]
            pub fn with_hooks(
                mut self,
                calls: impl IntoIterator<Item = HookCall>,
            ) -> Self {
                self.hooks.extend(calls);
                self
            }

            /// Indicates whether the lifecycle stage has no [`Fatal`] error
            /// and all its hooks succeeded.
            #[must_use]
            pub fn is_successful(&self) -> bool {
                self.fatal.is_none()
                    && self.hooks.iter().all(|h| h.failure.is_none())
            }

            /// Returns the [`Fatal`] error of the lifecycle stage, if any.
            #[must_use]
            pub const fn fatal(&self) -> Option<&Fatal> {
                self.fatal.as_ref()
            }

            /// Returns the hooks called at the lifecycle stage.
            #[must_use]
            pub fn hooks(&self) -> &[HookCall] {
                &self.hooks
            }

            /// Iterates over all the [`LifecycleError`]s of the lifecycle
            /// stage.
            pub fn errors(
                &self,
            ) -> impl Iterator<Item = LifecycleError> + '_ {
                self.fatal
                    .iter()
                    .cloned()
                    .map(LifecycleError::Fatal)
                    .chain(
                        self.hooks
                            .iter()
                            .filter_map(|h| h.failure.clone())
                            .map(LifecycleError::Hook),
                    )
            }
        }
    };
}

artifact! {
    /// Artifact of a `setUp` stage.
    ///
    /// An unsuccessful [`Setup`] turns the following `test` into a skipped
    /// one, and fails the tested unit.
    Setup
}

impl Setup {
    /// Returns the [`TestResult`] of a unit tested after this [`Setup`].
    ///
    /// An unsuccessful [`Setup`] fails the unit with its first
    /// [`LifecycleError`], whatever the `result` of its `test` is.
    #[must_use]
    pub fn result_of<R: Outcome + ?Sized>(&self, result: &R) -> TestResult {
        self.errors().next().map_or_else(
            || result.test_result(),
            |e| TestResult::Failed(e.into()),
        )
    }
}

artifact! {
    /// Artifact of a `tearDown` stage.
    ///
    /// An unsuccessful [`Teardown`] never changes the result of the tested
    /// unit.
    Teardown
}

/// Tester of a specification node `N` against an environment `E`.
///
/// Implementors only define the stages, while callers drive a whole lifecycle
/// via [`Tester::run()`].
pub trait Tester<E, N: Node> {
    /// Result of the [`Tester::test()`] stage.
    type Result: Outcome;

    /// Prepares the given `node` for testing.
    ///
    /// Never executes the `node` itself.
    fn set_up(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Setup;

    /// Tests the given `node`.
    ///
    /// Must not execute anything if `skip` is `true`.
    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Self::Result;

    /// Releases everything [`Tester::set_up()`] prepared. Must not alter the
    /// given `result`.
    ///
    /// The `setup` is the one the caller received from
    /// [`Tester::set_up()`], so [`Setup::result_of()`] gives the result the
    /// tested unit is reported with.
    fn tear_down(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
        setup: &Setup,
        result: &Self::Result,
    ) -> Teardown;

    /// Runs the whole lifecycle of the given `node`.
    ///
    /// [`Tester::test()`] is skipped if `skip` is `true` or the
    /// [`Tester::set_up()`] is unsuccessful, while [`Tester::tear_down()`]
    /// is always called with the given `skip`.
    fn run(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Tested<Self::Result> {
        let setup = self.set_up(env, feature, node, skip);
        let result = self.test(
            env,
            feature,
            node,
            skip || !setup.is_successful(),
        );
        let teardown =
            self.tear_down(env, feature, node, skip, &setup, &result);

        let tested = Tested::new(setup, result, teardown);
        for e in tested.setup.errors().chain(tested.teardown.errors()) {
            tracing::warn!(
                scope = %N::SCOPE,
                node = %node.subject(feature).name(),
                error = %e,
                "lifecycle error",
            );
        }
        tracing::debug!(
            scope = %N::SCOPE,
            node = %node.subject(feature).name(),
            skip,
            result = %tested.test_result().severity(),
            "tested",
        );

        tested
    }
}

impl<E, N, T> Tester<E, N> for Arc<T>
where
    N: Node,
    T: Tester<E, N> + ?Sized,
{
    type Result = T::Result;

    fn set_up(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Setup {
        (**self).set_up(env, feature, node, skip)
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Self::Result {
        (**self).test(env, feature, node, skip)
    }

    fn tear_down(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
        setup: &Setup,
        result: &Self::Result,
    ) -> Teardown {
        (**self).tear_down(env, feature, node, skip, setup, result)
    }
}
