// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Tester`] wrapper publishing [`Event`]s.

use std::sync::Arc;

use derive_more::with_trait::{Debug, Deref};

use crate::{
    node::Node,
    tester::{Setup, Teardown, Tester},
};

use super::{After, Before, Event, Sink};

/// Wrapper for a [`Tester`] publishing an [`Event::Before`] after its
/// `setUp`, and an [`Event::After`] after its `tearDown`.
///
/// Artifacts of the wrapped [`Tester`] are returned unchanged, and its `test`
/// is delegated as is.
#[derive(Debug, Deref)]
pub struct EventDispatching<T, E> {
    /// Wrapped [`Tester`].
    #[deref]
    tester: T,

    /// [`Sink`] to publish [`Event`]s into.
    #[debug(skip)]
    sink: Arc<dyn Sink<E>>,
}

impl<T, E> EventDispatching<T, E> {
    /// Wraps the given [`Tester`] into an [`EventDispatching`] one.
    #[must_use]
    pub fn new(tester: T, sink: Arc<dyn Sink<E>>) -> Self {
        Self { tester, sink }
    }
}

impl<E, N, T> Tester<E, N> for EventDispatching<T, E>
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
        self.sink.publish(&Event::Before(Before {
            environment: env,
            subject: node.subject(feature),
            setup: &setup,
        }));
        setup
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
        self.sink.publish(&Event::After(After {
            environment: env,
            subject: node.subject(feature),
            result: setup.result_of(result),
            teardown: &teardown,
        }));
        teardown
    }
}
