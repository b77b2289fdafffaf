// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Providers of [`gherkin::Feature`]s to test.

use std::{collections::VecDeque, sync::Arc};

use crate::{feature::Ext as _, Suite};

/// Finite, ordered [`Iterator`] of [`gherkin::Feature`]s of a single
/// [`Suite`].
pub trait SpecificationIterator: Iterator<Item = gherkin::Feature> {
    /// Returns the [`Suite`] the [`gherkin::Feature`]s belong to.
    fn suite(&self) -> &Arc<Suite>;
}

/// In-memory [`SpecificationIterator`] over already parsed
/// [`gherkin::Feature`]s.
#[derive(Clone, Debug)]
pub struct Specifications {
    /// [`Suite`] of the [`gherkin::Feature`]s.
    suite: Arc<Suite>,

    /// [`gherkin::Feature`]s left to iterate over.
    features: VecDeque<gherkin::Feature>,
}

impl Specifications {
    /// Creates new [`Specifications`] of the given [`Suite`].
    #[must_use]
    pub fn new(
        suite: Arc<Suite>,
        features: impl IntoIterator<Item = gherkin::Feature>,
    ) -> Self {
        Self { suite, features: features.into_iter().collect() }
    }

    /// Restricts these [`Specifications`] to the scenarios and outline rows
    /// at the given `path:line` locations, such as the ones collected by a
    /// [`RerunTracker`] during a previous run.
    ///
    /// [`gherkin::Feature`]s left without any scenario are dropped.
    ///
    /// [`RerunTracker`]: crate::RerunTracker
    #[must_use]
    pub fn retain_locations<S: AsRef<str>>(mut self, locations: &[S]) -> Self {
        let wanted = |f: &gherkin::Feature, line| {
            let loc = f.location(line);
            locations.iter().any(|l| l.as_ref() == loc)
        };

        for feature in &mut self.features {
            let f = feature.clone();
            let retain = |scenarios: &mut Vec<gherkin::Scenario>| {
                scenarios.retain_mut(|sc| {
                    if sc.examples.is_empty() {
                        return wanted(&f, sc.position.line);
                    }
                    if wanted(&f, sc.position.line) {
                        return true;
                    }
                    for ex in &mut sc.examples {
                        let first_row = ex.position.line + 2;
                        if let Some(table) = &mut ex.table {
                            // Header row is always kept.
                            let mut id = 0;
                            table.rows.retain(|_| {
                                id += 1;
                                id == 1 || wanted(&f, first_row + id - 2)
                            });
                        }
                    }
                    sc.examples.retain(|ex| {
                        ex.table.as_ref().is_some_and(|t| t.rows.len() > 1)
                    });
                    !sc.examples.is_empty()
                });
            };

            retain(&mut feature.scenarios);
            for rule in &mut feature.rules {
                retain(&mut rule.scenarios);
            }
            feature.rules.retain(|r| !r.scenarios.is_empty());
        }
        self.features.retain(|f| f.all_scenarios().next().is_some());

        self
    }
}

impl Iterator for Specifications {
    type Item = gherkin::Feature;

    fn next(&mut self) -> Option<Self::Item> {
        self.features.pop_front()
    }
}

impl SpecificationIterator for Specifications {
    fn suite(&self) -> &Arc<Suite> {
        &self.suite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURE: &str = "\
Feature: Eating
  Scenario: one
    Given a cucumber

  Scenario: two
    Given a cucumber

  Scenario Outline: many
    Given <n> cucumbers

    Examples:
      | n |
      | 1 |
      | 2 |
      | 3 |

Feature: Other
";

    fn specifications() -> Specifications {
        let (eating, other) =
            FEATURE.split_at(FEATURE.find("Feature: Other").unwrap());
        Specifications::new(
            Suite::new("default"),
            [eating, other].map(|f| {
                gherkin::Feature::parse(f, gherkin::GherkinEnv::default())
                    .unwrap()
            }),
        )
    }

    #[test]
    fn iterates_in_order() {
        let specs = specifications();
        assert_eq!(specs.suite().name, "default");

        let names = specs.map(|f| f.name).collect::<Vec<_>>();
        assert_eq!(names, ["Eating", "Other"]);
    }

    #[test]
    fn retains_given_locations() {
        let mut specs =
            specifications().retain_locations(&["Eating:5", "Eating:13"]);

        let feature = specs.next().unwrap();
        assert!(specs.next().is_none());

        assert_eq!(feature.scenarios.len(), 2);
        assert_eq!(feature.scenarios[0].name, "two");

        let rows =
            &feature.scenarios[1].examples[0].table.as_ref().unwrap().rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ["1".to_owned()]);
    }
}
