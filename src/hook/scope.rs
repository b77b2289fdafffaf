// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Snapshots of the context passed to hook callbacks.

use derive_more::with_trait::Debug;

use crate::{
    node::{Scope, Subject},
    Environment, SpecificationIterator, Suite, TestResult,
};

/// Context of a hook called before testing a node.
#[derive(Debug)]
pub struct BeforeScope<'a, E> {
    /// Environment the node is tested against.
    #[debug(skip)]
    pub environment: &'a E,

    /// Node being tested.
    pub subject: Subject<'a>,

    /// [`SpecificationIterator`] of the [`Suite`].
    ///
    /// Only [`Scope::Suite`] hooks carry it, being `None` for every other
    /// [`Scope`], whose nodes are reachable via the `subject` instead.
    #[debug(skip)]
    pub specification: Option<&'a dyn SpecificationIterator>,
}

/// Context of a hook called after testing a node.
#[derive(Debug)]
pub struct AfterScope<'a, E> {
    /// Environment the node was tested against.
    #[debug(skip)]
    pub environment: &'a E,

    /// Node being tested.
    pub subject: Subject<'a>,

    /// [`SpecificationIterator`] of the [`Suite`].
    ///
    /// Only [`Scope::Suite`] hooks carry it, being `None` for every other
    /// [`Scope`], whose nodes are reachable via the `subject` instead.
    #[debug(skip)]
    pub specification: Option<&'a dyn SpecificationIterator>,

    /// [`TestResult`] of the node.
    pub result: &'a TestResult,
}

impl<E> BeforeScope<'_, E> {
    /// Returns the [`Scope`] of the tested node.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.subject.scope()
    }
}

impl<E: Environment> BeforeScope<'_, E> {
    /// Returns the [`Suite`] the node belongs to.
    #[must_use]
    pub fn suite(&self) -> &Suite {
        self.environment.suite()
    }
}

impl<E> AfterScope<'_, E> {
    /// Returns the [`Scope`] of the tested node.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.subject.scope()
    }
}

impl<E: Environment> AfterScope<'_, E> {
    /// Returns the [`Suite`] the node belongs to.
    #[must_use]
    pub fn suite(&self) -> &Suite {
        self.environment.suite()
    }
}
