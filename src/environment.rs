// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Execution context of [`gherkin::Step`]s.

use std::sync::Arc;

/// Named group of specifications run against the same kind of
/// [`Environment`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Suite {
    /// Name of this [`Suite`].
    pub name: String,
}

impl Suite {
    /// Creates a new [`Suite`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { name: name.into() })
    }
}

/// State [`gherkin::Step`]s are executed against, bound to a [`Suite`].
///
/// Testers only borrow an [`Environment`], and never own it.
pub trait Environment: Sized {
    /// Returns the [`Suite`] this [`Environment`] is bound to.
    fn suite(&self) -> &Suite;

    /// Creates a fresh [`Environment`] for testing the given
    /// [`gherkin::Scenario`] (or a single outline example), so no state
    /// leaks between scenarios.
    #[must_use]
    fn isolate(&self, scenario: &gherkin::Scenario) -> Self;
}
