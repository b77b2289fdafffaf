// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] wrapper calling hooks.

use std::sync::Arc;

use derive_more::with_trait::{Debug, Deref};

use crate::{
    node::Node,
    tester::{Setup, Teardown, Tester},
};

use super::{AfterScope, BeforeScope, Hooks};

/// Wrapper for a [`Tester`] calling before-hooks after its `setUp` and
/// after-hooks after its `tearDown`.
///
/// Results of the calls are attached to the [`Setup`] and the [`Teardown`]
/// artifacts, so a failed before-hook fails the tested node. No hooks are
/// called when testing is skipped.
#[derive(Debug, Deref)]
pub struct Hookable<T, E> {
    /// Wrapped [`Tester`].
    #[deref]
    tester: T,

    /// [`Hooks`] to call.
    #[debug(skip)]
    hooks: Arc<Hooks<E>>,
}

impl<T, E> Hookable<T, E> {
    /// Wraps the given [`Tester`] into a [`Hookable`] one.
    #[must_use]
    pub const fn new(tester: T, hooks: Arc<Hooks<E>>) -> Self {
        Self { tester, hooks }
    }
}

impl<E, N, T> Tester<E, N> for Hookable<T, E>
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
        let setup = self.tester.set_up(env, feature, node, skip);
        if skip {
            return setup;
        }
        setup.with_hooks(self.hooks.dispatch_before(&BeforeScope {
            environment: env,
            subject: node.subject(feature),
            specification: None,
        }))
    }

    fn test(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        node: &N,
        skip: bool,
    ) -> Self::Result {
        self.tester.test(env, feature, node, skip)
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
        let teardown =
            self.tester.tear_down(env, feature, node, skip, setup, result);
        if skip {
            return teardown;
        }
        teardown.with_hooks(self.hooks.dispatch_after(&AfterScope {
            environment: env,
            subject: node.subject(feature),
            specification: None,
            result: &setup.result_of(result),
        }))
    }
}
