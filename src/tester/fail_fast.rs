// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] wrapper stopping the run on the first failure.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use derive_more::with_trait::Deref;

use crate::{node::Node, result::Severity};

use super::{Setup, Teardown, Tester};

/// Wrapper for a [`Tester`] skipping every unit started after a failed one.
///
/// All the [`FailFast`] wrappers sharing the same flag stop together.
#[derive(Clone, Debug, Deref)]
pub struct FailFast<T> {
    /// Wrapped [`Tester`].
    #[deref]
    tester: T,

    /// Flag raised once a unit fails.
    failed: Arc<AtomicBool>,
}

impl<T> FailFast<T> {
    /// Wraps the given [`Tester`] into a [`FailFast`] one, sharing the given
    /// `failed` flag.
    #[must_use]
    pub const fn new(tester: T, failed: Arc<AtomicBool>) -> Self {
        Self { tester, failed }
    }

    /// Indicates whether the testing should be stopped.
    fn stop(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl<E, N, T> Tester<E, N> for FailFast<T>
where
    N: Node,
    T: Tester<E, N>,
{
    type Result = T::Result;

    fn set_up(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Setup {
        self.tester.set_up(env, feature, node, skip || self.stop())
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Self::Result {
        self.tester.test(env, feature, node, skip || self.stop())
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
        let failed = setup.result_of(result).severity() == Severity::Failed;
        // Units containing the failure are failed themselves, while the ones
        // started after the stop were never set up.
        let teardown = self.tester.tear_down(
            env,
            feature,
            node,
            skip || (self.stop() && !failed),
            setup,
            result,
        );
        if failed && !self.failed.swap(true, Ordering::SeqCst) {
            tracing::info!(
                scope = %N::SCOPE,
                node = %node.subject(feature).name(),
                "failed, skipping the rest",
            );
        }
        teardown
    }
}
