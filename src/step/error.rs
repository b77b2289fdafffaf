// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error of matching a [`gherkin::Step`].

use std::fmt;

use derive_more::with_trait::Error;

use super::{location::Location, regex::HashableRegex};

/// [`gherkin::Step`] matches multiple [`Regex`]es.
///
/// [`Regex`]: regex::Regex
#[derive(Clone, Debug, Error)]
pub struct AmbiguousMatchError {
    /// Possible [`Regex`]es the [`gherkin::Step`] matches, sorted.
    ///
    /// [`Regex`]: regex::Regex
    pub possible_matches: Vec<(HashableRegex, Option<Location>)>,
}

impl fmt::Display for AmbiguousMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Possible matches:")?;
        for (reg, loc_opt) in &self.possible_matches {
            write!(f, "\n{reg}")?;
            if let Some(loc) = loc_opt {
                write!(f, " --> {loc}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn lists_possible_matches() {
        let err = AmbiguousMatchError {
            possible_matches: vec![
                (
                    Regex::new(r"^(\d+) cucumbers$").unwrap().into(),
                    Some(Location { path: "steps.rs", line: 10, column: 5 }),
                ),
                (Regex::new(r"cucumbers").unwrap().into(), None),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Possible matches:\n\
             ^(\\d+) cucumbers$ --> steps.rs:10:5\n\
             cucumbers",
        );
    }
}
