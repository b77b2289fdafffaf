// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Hooks called before and after testing specification nodes.
//!
//! Callbacks are registered in [`Hooks`] per [`Kind`], and dispatched with a
//! [`BeforeScope`] or an [`AfterScope`] describing what is being tested.
//! A panicking callback never stops the run: it's recorded as a
//! [`HookFailure`] of its [`HookCall`].

pub mod scope;
pub mod tester;

use std::fmt;

use derive_more::with_trait::{Debug, Display};
use gherkin::tagexpr::TagOperation;
use linked_hash_map::LinkedHashMap;

use crate::{
    error::{self, HookFailure},
    node::{Scope, Subject},
    tag::Ext as _,
};

#[doc(inline)]
pub use self::{
    scope::{AfterScope, BeforeScope},
    tester::Hookable,
};

/// Scope tag a hook is registered for.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Before testing a node of the given [`Scope`].
    #[display("before {_0}")]
    Before(Scope),

    /// After testing a node of the given [`Scope`].
    #[display("after {_0}")]
    After(Scope),
}

/// Filter deciding whether a hook applies to a [`Subject`].
pub enum Filter {
    /// Tag expression over the [`Subject::tags()`].
    Tags(TagOperation),

    /// Arbitrary predicate over the [`Subject`].
    Predicate(Box<dyn Fn(&Subject<'_>) -> bool>),
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags(op) => f.debug_tuple("Tags").field(op).finish(),
            Self::Predicate(_) => f.debug_tuple("Predicate").finish(),
        }
    }
}

impl Filter {
    /// Creates a new [`Filter::Predicate`] out of the given closure.
    #[must_use]
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Subject<'_>) -> bool + 'static,
    {
        Self::Predicate(Box::new(f))
    }

    /// Checks whether the given [`Subject`] passes this [`Filter`].
    #[must_use]
    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        match self {
            Self::Tags(op) => op.eval(subject.tags()),
            Self::Predicate(f) => f(subject),
        }
    }
}

impl From<TagOperation> for Filter {
    fn from(op: TagOperation) -> Self {
        Self::Tags(op)
    }
}

/// Result of calling a single hook.
#[derive(Clone, Debug)]
pub struct HookCall {
    /// [`Kind`] the hook was registered for.
    pub kind: Kind,

    /// Position of the hook among the ones registered for the same [`Kind`].
    pub index: usize,

    /// [`HookFailure`] of the hook, if it panicked.
    pub failure: Option<HookFailure>,
}

/// Callback of a before-hook.
type BeforeFn<E> = Box<dyn Fn(&BeforeScope<'_, E>)>;

/// Callback of an after-hook.
type AfterFn<E> = Box<dyn Fn(&AfterScope<'_, E>)>;

/// Registered hook.
#[derive(Debug)]
struct Hook<F> {
    /// [`Filter`] of the hook, if any.
    filter: Option<Filter>,

    /// Callback of the hook.
    #[debug(skip)]
    callback: F,
}

/// Registry of hooks, keyed by their [`Kind`].
///
/// Hooks of the same [`Kind`] are called in their registration order.
#[derive(Debug)]
pub struct Hooks<E> {
    /// Before-hooks.
    before: LinkedHashMap<Scope, Vec<Hook<BeforeFn<E>>>>,

    /// After-hooks.
    after: LinkedHashMap<Scope, Vec<Hook<AfterFn<E>>>>,
}

impl<E> Default for Hooks<E> {
    fn default() -> Self {
        Self { before: LinkedHashMap::new(), after: LinkedHashMap::new() }
    }
}

impl<E> Hooks<E> {
    /// Creates a new empty [`Hooks`] registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook to be called before testing every node of the given
    /// [`Scope`] passing the given [`Filter`].
    #[must_use]
    pub fn before<F>(
        mut self,
        scope: Scope,
        filter: impl Into<Option<Filter>>,
        callback: F,
    ) -> Self
    where
        F: Fn(&BeforeScope<'_, E>) + 'static,
    {
        self.before
            .entry(scope)
            .or_insert_with(Vec::new)
            .push(Hook {
                filter: filter.into(),
                callback: Box::new(callback),
            });
        self
    }

    /// Registers a hook to be called after testing every node of the given
    /// [`Scope`] passing the given [`Filter`].
    #[must_use]
    pub fn after<F>(
        mut self,
        scope: Scope,
        filter: impl Into<Option<Filter>>,
        callback: F,
    ) -> Self
    where
        F: Fn(&AfterScope<'_, E>) + 'static,
    {
        self.after
            .entry(scope)
            .or_insert_with(Vec::new)
            .push(Hook {
                filter: filter.into(),
                callback: Box::new(callback),
            });
        self
    }

    /// Returns the registered [`Kind`]s in the order of their first
    /// registration, before-hooks first.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.before
            .keys()
            .copied()
            .map(Kind::Before)
            .chain(self.after.keys().copied().map(Kind::After))
    }

    /// Calls all the before-hooks matching the given [`BeforeScope`].
    pub fn dispatch_before(
        &self,
        scope: &BeforeScope<'_, E>,
    ) -> Vec<HookCall> {
        let s = scope.subject.scope();
        dispatch(
            Kind::Before(s),
            self.before.get(&s).map(Vec::as_slice).unwrap_or_default(),
            &scope.subject,
            |f| f(scope),
        )
    }

    /// Calls all the after-hooks matching the given [`AfterScope`].
    pub fn dispatch_after(
        &self,
        scope: &AfterScope<'_, E>,
    ) -> Vec<HookCall> {
        let s = scope.subject.scope();
        dispatch(
            Kind::After(s),
            self.after.get(&s).map(Vec::as_slice).unwrap_or_default(),
            &scope.subject,
            |f| f(scope),
        )
    }
}

/// Calls the given `hooks` matching the given [`Subject`], in order.
fn dispatch<F>(
    kind: Kind,
    hooks: &[Hook<F>],
    subject: &Subject<'_>,
    call: impl Fn(&F),
) -> Vec<HookCall> {
    hooks
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            h.filter.as_ref().map_or(true, |f| f.matches(subject))
        })
        .map(|(index, h)| {
            tracing::trace!(%kind, index, "calling hook");
            let failure =
                error::catch(|| call(&h.callback)).err().map(|info| {
                    let failure = HookFailure { kind, index, info };
                    tracing::warn!(error = %failure, "hook failed");
                    failure
                });
            HookCall { kind, index, failure }
        })
        .collect()
}
