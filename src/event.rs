// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in a lifecycle of a run.
//!
//! The top-level enum here is [`Event`]. [`Event::Before`] is published right
//! after a node's `setUp`, and [`Event::After`] right after its `tearDown`,
//! so events of nested nodes are always enclosed by the events of their
//! parent.
//!
//! [`Event`]s are published synchronously into a [`Sink`].

pub mod dispatcher;
pub mod sink;
pub mod tester;

use std::sync::Arc;

use derive_more::with_trait::{Debug, Display};

use crate::{
    node::{Scope, Subject},
    tester::{Setup, Teardown},
    Suite, TestResult,
};

#[doc(inline)]
pub use self::{
    dispatcher::Dispatcher,
    sink::{Channel, Collector, Record},
    tester::EventDispatching,
};

/// Enumerated kind of an [`Event`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Kind {
    /// [`Event::BeforeExercise`].
    #[display("before exercise")]
    BeforeExercise,

    /// [`Event::AfterExercise`].
    #[display("after exercise")]
    AfterExercise,

    /// [`Event::Before`] a node of the given [`Scope`].
    #[display("before {_0}")]
    Before(Scope),

    /// [`Event::After`] a node of the given [`Scope`].
    #[display("after {_0}")]
    After(Scope),
}

/// Top-level run event.
#[derive(Debug)]
pub enum Event<'a, E> {
    /// Run has started.
    BeforeExercise {
        /// [`Suite`]s about to be run.
        suites: &'a [Arc<Suite>],
    },

    /// Run has finished.
    AfterExercise {
        /// [`Suite`]s that were run.
        suites: &'a [Arc<Suite>],

        /// Overall [`TestResult`] of the run.
        result: &'a TestResult,
    },

    /// Node has been set up.
    Before(Before<'a, E>),

    /// Node has been torn down.
    After(After<'a, E>),
}

impl<E> Event<'_, E> {
    /// Returns the [`Kind`] of this [`Event`].
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::BeforeExercise { .. } => Kind::BeforeExercise,
            Self::AfterExercise { .. } => Kind::AfterExercise,
            Self::Before(ev) => Kind::Before(ev.subject.scope()),
            Self::After(ev) => Kind::After(ev.subject.scope()),
        }
    }

    /// Returns the [`Subject`] of this [`Event`], if it's about a node.
    #[must_use]
    pub const fn subject(&self) -> Option<&Subject<'_>> {
        match self {
            Self::BeforeExercise { .. } | Self::AfterExercise { .. } => None,
            Self::Before(ev) => Some(&ev.subject),
            Self::After(ev) => Some(&ev.subject),
        }
    }
}

/// Payload of an [`Event::Before`].
#[derive(Debug)]
pub struct Before<'a, E> {
    /// Environment the node is tested against.
    #[debug(skip)]
    pub environment: &'a E,

    /// Node being tested.
    pub subject: Subject<'a>,

    /// [`Setup`] of the node.
    pub setup: &'a Setup,
}

/// Payload of an [`Event::After`].
#[derive(Debug)]
pub struct After<'a, E> {
    /// Environment the node was tested against.
    #[debug(skip)]
    pub environment: &'a E,

    /// Node being tested.
    pub subject: Subject<'a>,

    /// [`TestResult`] of the node.
    pub result: TestResult,

    /// [`Teardown`] of the node.
    pub teardown: &'a Teardown,
}

/// Receiver of [`Event`]s.
///
/// [`Event`]s are published synchronously and in order, so a [`Sink`] observes
/// them in the same order they happen.
pub trait Sink<E> {
    /// Handles the given [`Event`].
    fn publish(&self, event: &Event<'_, E>);
}

impl<E, F> Sink<E> for F
where
    F: Fn(&Event<'_, E>),
{
    fn publish(&self, event: &Event<'_, E>) {
        self(event);
    }
}
