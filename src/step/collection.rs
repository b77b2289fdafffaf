// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Collection`] of [`Step`] functions.

use std::collections::HashMap;

use derive_more::with_trait::Debug;
use gherkin::StepType;
use itertools::Itertools as _;
use regex::Regex;

use crate::{
    error::{self, Failure},
    TestResult,
};

use super::{
    context::Context, error::AmbiguousMatchError, location::Location,
    regex::HashableRegex, Resolver, Step,
};

/// Alias for a [`Step`] function matched to a [`gherkin::Step`], along with
/// its [`Location`] and [`Context`].
pub type WithContext<'me, E> = (&'me Step<E>, Option<Location>, Context);

/// Keyed [`Step`] functions of one [`StepType`].
type Steps<E> = HashMap<(HashableRegex, Option<Location>), Step<E>>;

/// Collection of [`Step`]s, resolving [`gherkin::Step`]s by matching their
/// text against the registered [`Regex`]es.
///
/// Every [`StepType`] has its own set of [`Step`]s, so [Given] [`Step`]s
/// never match a [When] [`gherkin::Step`].
///
/// [Given]: https://cucumber.io/docs/gherkin/reference#given
/// [When]: https://cucumber.io/docs/gherkin/reference#when
#[derive(Debug)]
pub struct Collection<E> {
    /// Collection of [Given] [`Step`]s.
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference#given
    #[debug("{:?}", given.keys().collect::<Vec<_>>())]
    given: Steps<E>,

    /// Collection of [When] [`Step`]s.
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference#when
    #[debug("{:?}", when.keys().collect::<Vec<_>>())]
    when: Steps<E>,

    /// Collection of [Then] [`Step`]s.
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference#then
    #[debug("{:?}", then.keys().collect::<Vec<_>>())]
    then: Steps<E>,
}

impl<E> Clone for Collection<E> {
    fn clone(&self) -> Self {
        Self {
            given: self.given.clone(),
            when: self.when.clone(),
            then: self.then.clone(),
        }
    }
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            given: HashMap::new(),
            when: HashMap::new(),
            then: HashMap::new(),
        }
    }
}

impl<E> Collection<E> {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [Given] [`Step`] matching the given `regex`.
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference#given
    #[must_use]
    pub fn given(
        mut self,
        loc: Option<Location>,
        regex: Regex,
        step: Step<E>,
    ) -> Self {
        _ = self.given.insert((regex.into(), loc), step);
        self
    }

    /// Adds a [When] [`Step`] matching the given `regex`.
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference#when
    #[must_use]
    pub fn when(
        mut self,
        loc: Option<Location>,
        regex: Regex,
        step: Step<E>,
    ) -> Self {
        _ = self.when.insert((regex.into(), loc), step);
        self
    }

    /// Adds a [Then] [`Step`] matching the given `regex`.
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference#then
    #[must_use]
    pub fn then(
        mut self,
        loc: Option<Location>,
        regex: Regex,
        step: Step<E>,
    ) -> Self {
        _ = self.then.insert((regex.into(), loc), step);
        self
    }

    /// Returns a [`Step`] function matching the given [`gherkin::Step`], if
    /// any.
    ///
    /// # Errors
    ///
    /// If the given [`gherkin::Step`] matches multiple [`Regex`]es.
    pub fn find(
        &self,
        step: &gherkin::Step,
    ) -> Result<Option<WithContext<'_, E>>, AmbiguousMatchError> {
        let steps = match step.ty {
            StepType::Given => &self.given,
            StepType::When => &self.when,
            StepType::Then => &self.then,
        };

        let mut found = steps
            .iter()
            .filter_map(|((re, loc), f)| {
                re.captures(&step.value).map(|caps| (re, loc, caps, f))
            })
            .collect::<Vec<_>>();

        if found.len() > 1 {
            return Err(AmbiguousMatchError {
                possible_matches: found
                    .into_iter()
                    .map(|(re, loc, ..)| (re.clone(), *loc))
                    .sorted()
                    .collect(),
            });
        }

        Ok(found.pop().map(|(re, loc, caps, f)| {
            let matches = re
                .capture_names()
                .zip(caps.iter())
                .map(|(name, m)| {
                    (
                        name.map(str::to_owned),
                        m.map_or_else(String::new, |m| m.as_str().to_owned()),
                    )
                })
                .collect();

            (f, *loc, Context { step: step.clone(), matches })
        }))
    }
}

impl<E> Resolver<E> for Collection<E> {
    fn execute(
        &self,
        env: &mut E,
        _: &gherkin::Feature,
        step: &gherkin::Step,
    ) -> TestResult {
        match self.find(step) {
            Ok(Some((f, loc, ctx))) => {
                tracing::trace!(
                    step = %step.value,
                    location = ?loc,
                    "executing step function",
                );
                match error::catch(|| f(env, ctx)) {
                    Ok(()) => TestResult::Passed,
                    Err(info) => TestResult::Failed(Failure::Panic(info)),
                }
            }
            Ok(None) => {
                tracing::trace!(step = %step.value, "no step function");
                TestResult::Pending
            }
            Err(e) => TestResult::Failed(e.into()),
        }
    }
}
