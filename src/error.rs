// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors produced while testing specification nodes.
//!
//! - [`Failure`] is the cause carried by a [`TestResult::Failed`].
//! - [`LifecycleError`] is a failure of the plumbing around a test: a
//!   [`Fatal`] error of `setUp`/`tearDown`, or a [`HookFailure`].
//!
//! [`TestResult::Failed`]: crate::TestResult::Failed

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use derive_more::with_trait::{Display, Error, From};

use crate::{hook, step::AmbiguousMatchError};

/// Alias for a [`catch_unwind()`] error.
///
/// [`catch_unwind()`]: std::panic::catch_unwind()
pub type Info = Arc<dyn Any + Send + 'static>;

/// Cause of a [`Failed`] test.
///
/// [`Failed`]: crate::TestResult::Failed
#[derive(Clone, Debug, Display, Error, From)]
pub enum Failure {
    /// [`Step`] matches multiple definitions.
    ///
    /// [`Step`]: gherkin::Step
    #[display("Step match is ambiguous: {_0}")]
    #[from]
    AmbiguousMatch(AmbiguousMatchError),

    /// Step function panicked or its assertion failed.
    #[display("Step panicked. Captured output: {}", coerce_error(_0))]
    Panic(#[error(not(source))] Info),

    /// Setup of the tested unit failed, so the test never ran.
    #[display("{_0}")]
    #[from]
    Lifecycle(LifecycleError),
}

impl Failure {
    /// Returns the panic payload, if this [`Failure`] is a [`Failure::Panic`].
    #[must_use]
    pub fn panic_info(&self) -> Option<&Info> {
        match self {
            Self::Panic(info) => Some(info),
            Self::AmbiguousMatch(_) | Self::Lifecycle(_) => None,
        }
    }
}

/// Failure of the lifecycle plumbing around a tested unit.
#[derive(Clone, Debug, Display, Error, From)]
pub enum LifecycleError {
    /// `setUp` or `tearDown` couldn't acquire or release its resources.
    #[display("{_0}")]
    Fatal(Fatal),

    /// Hook callback failed.
    #[display("{_0}")]
    Hook(HookFailure),
}

/// Stage of a lifecycle a [`Fatal`] error happened at.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Stage {
    /// `setUp` of a tested unit.
    #[display("setUp")]
    SetUp,

    /// `tearDown` of a tested unit.
    #[display("tearDown")]
    TearDown,
}

/// Error of preparing or releasing resources of a tested unit.
#[derive(Clone, Debug, Display, Error)]
#[display("{stage} failed: {message}")]
pub struct Fatal {
    /// [`Stage`] the error happened at.
    pub stage: Stage,

    /// Human-readable description of the error.
    pub message: String,
}

impl Fatal {
    /// Creates a new [`Fatal`] error of a [`Stage::SetUp`].
    #[must_use]
    pub fn set_up(message: impl Into<String>) -> Self {
        Self { stage: Stage::SetUp, message: message.into() }
    }

    /// Creates a new [`Fatal`] error of a [`Stage::TearDown`].
    #[must_use]
    pub fn tear_down(message: impl Into<String>) -> Self {
        Self { stage: Stage::TearDown, message: message.into() }
    }
}

/// Failed call of a hook callback.
#[derive(Clone, Debug, Display, Error)]
#[display("`{kind}` hook #{index} panicked: {}", coerce_error(info))]
pub struct HookFailure {
    /// Scope tag the hook was registered for.
    pub kind: hook::Kind,

    /// Position of the hook among the ones registered for the same `kind`.
    pub index: usize,

    /// Panic payload of the hook.
    #[error(not(source))]
    pub info: Info,
}

/// Coerces the given panic payload into a [`String`].
#[must_use]
pub fn coerce_error(err: &Info) -> String {
    if let Some(string) = err.downcast_ref::<String>() {
        string.clone()
    } else if let Some(&string) = err.downcast_ref::<&str>() {
        string.to_owned()
    } else {
        "(Could not resolve panic payload)".to_owned()
    }
}

/// Runs the given closure, converting its panic into an [`Info`].
pub(crate) fn catch<T>(f: impl FnOnce() -> T) -> Result<T, Info> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Info::from)
}
