// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Context of a [`Step`] function call.
//!
//! [`Step`]: super::Step

/// Name of a capturing group inside a [`regex`].
pub type CaptureName = Option<String>;

/// Context for a [`Step`] function execution.
///
/// [`Step`]: super::Step
#[derive(Clone, Debug)]
pub struct Context {
    /// [`gherkin::Step`] matched to a [`Step`] function.
    ///
    /// [`Step`]: super::Step
    pub step: gherkin::Step,

    /// [`Regex`] matches of a [`Step::value`], the whole match first.
    ///
    /// [`Regex`]: regex::Regex
    /// [`Step::value`]: gherkin::Step::value
    pub matches: Vec<(CaptureName, String)>,
}

impl Context {
    /// Returns the value of a named capture group, if it matched.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of the capture group with the given `index`, where
    /// `0` is the whole match.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.matches.get(index).map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        let feature = gherkin::Feature::parse(
            "Feature: f\n  Scenario: s\n    Given 5 cucumbers\n",
            gherkin::GherkinEnv::default(),
        )
        .unwrap();

        Context {
            step: feature.scenarios[0].steps[0].clone(),
            matches: vec![
                (None, "5 cucumbers".to_owned()),
                (Some("count".to_owned()), "5".to_owned()),
            ],
        }
    }

    #[test]
    fn looks_up_captures() {
        let ctx = context();

        assert_eq!(ctx.get(0), Some("5 cucumbers"));
        assert_eq!(ctx.get(1), Some("5"));
        assert_eq!(ctx.get(2), None);
        assert_eq!(ctx.named("count"), Some("5"));
        assert_eq!(ctx.named("other"), None);
    }
}
