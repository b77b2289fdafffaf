// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolution of [`gherkin::Step`]s into executable definitions.
//!
//! [`StepTester`] never executes a [`gherkin::Step`] by itself. It delegates
//! to a [`Resolver`], which decides whether the [`gherkin::Step`] is passed,
//! pending, ambiguous or failed. [`Collection`] is the bundled [`Resolver`]
//! matching [`gherkin::Step`]s against [`Regex`]es.
//!
//! [`Regex`]: regex::Regex
//! [`StepTester`]: crate::tester::StepTester

pub mod collection;
pub mod context;
pub mod error;
pub mod location;
pub mod regex;

use std::sync::Arc;

use crate::{error::Fatal, TestResult};

#[doc(inline)]
pub use self::{
    collection::Collection,
    context::{CaptureName, Context},
    error::AmbiguousMatchError,
    location::Location,
    regex::HashableRegex,
};

/// Alias for a [`gherkin::Step`] function.
pub type Step<E> = fn(&mut E, Context);

/// Definition resolver executing [`gherkin::Step`]s against an environment.
pub trait Resolver<E> {
    /// Acquires resources required for executing the given
    /// [`gherkin::Step`].
    ///
    /// # Errors
    ///
    /// If the resources cannot be acquired, so the [`gherkin::Step`] cannot
    /// be executed at all.
    fn prepare(
        &self,
        _env: &mut E,
        _feature: &gherkin::Feature,
        _step: &gherkin::Step,
    ) -> Result<(), Fatal> {
        Ok(())
    }

    /// Resolves the given [`gherkin::Step`] to its definition and executes
    /// it.
    fn execute(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
    ) -> TestResult;

    /// Releases resources acquired by [`Resolver::prepare()`].
    ///
    /// # Errors
    ///
    /// If the resources cannot be released.
    fn release(
        &self,
        _env: &mut E,
        _feature: &gherkin::Feature,
        _step: &gherkin::Step,
    ) -> Result<(), Fatal> {
        Ok(())
    }
}

impl<E, R: Resolver<E> + ?Sized> Resolver<E> for Arc<R> {
    fn prepare(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
    ) -> Result<(), Fatal> {
        (**self).prepare(env, feature, step)
    }

    fn execute(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
    ) -> TestResult {
        (**self).execute(env, feature, step)
    }

    fn release(
        &self,
        env: &mut E,
        feature: &gherkin::Feature,
        step: &gherkin::Step,
    ) -> Result<(), Fatal> {
        (**self).release(env, feature, step)
    }
}
