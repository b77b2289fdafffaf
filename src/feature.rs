// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`gherkin::Feature`] extension.

use sealed::sealed;

/// Helper methods to operate on [`gherkin::Feature`]s.
#[sealed]
pub trait Ext {
    /// Iterates over all the [`Feature`]'s [`Scenario`]s, including the ones
    /// inside [`Rule`]s.
    ///
    /// [`Feature`]: gherkin::Feature
    /// [`Rule`]: gherkin::Rule
    /// [`Scenario`]: gherkin::Scenario
    fn all_scenarios(&self) -> impl Iterator<Item = &gherkin::Scenario>;

    /// Counts all the [`Feature`]'s [`Scenario`]s, with every outline
    /// [`Examples`] row counted as a separate [`Scenario`].
    ///
    /// [`Examples`]: gherkin::Examples
    /// [`Feature`]: gherkin::Feature
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    fn count_scenarios(&self) -> usize;

    /// Counts all the [`Feature`]'s [`Step`]s, outline ones counted once per
    /// [`Examples`] row. [`Background`] [`Step`]s are counted for each
    /// [`Scenario`] they run for.
    ///
    /// [`Background`]: gherkin::Background
    /// [`Examples`]: gherkin::Examples
    /// [`Feature`]: gherkin::Feature
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    #[must_use]
    fn count_steps(&self) -> usize;

    /// Returns `path:line` location of the given `line` in this
    /// [`Feature`], falling back to its name if it has no path.
    ///
    /// [`Feature`]: gherkin::Feature
    #[must_use]
    fn location(&self, line: usize) -> String;
}

/// Number of runs of the given [`gherkin::Scenario`].
fn runs(scenario: &gherkin::Scenario) -> usize {
    if scenario.examples.is_empty() {
        1
    } else {
        scenario
            .examples
            .iter()
            .filter_map(|ex| ex.table.as_ref())
            .map(|t| t.rows.len().saturating_sub(1))
            .sum()
    }
}

#[sealed]
impl Ext for gherkin::Feature {
    fn all_scenarios(&self) -> impl Iterator<Item = &gherkin::Scenario> {
        self.scenarios
            .iter()
            .chain(self.rules.iter().flat_map(|r| &r.scenarios))
    }

    fn count_scenarios(&self) -> usize {
        self.all_scenarios().map(runs).sum()
    }

    fn count_steps(&self) -> usize {
        let background = self.background.as_ref().map_or(0, |b| b.steps.len());
        self.all_scenarios()
            .map(|s| runs(s) * (background + s.steps.len()))
            .sum()
    }

    fn location(&self, line: usize) -> String {
        self.path.as_ref().map_or_else(
            || format!("{}:{line}", self.name),
            |p| format!("{}:{line}", p.display()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::Ext as _;

    const FEATURE: &str = "\
Feature: Hungry
  Background:
    Given a cucumber basket

  Scenario: eating
    Given there are 12 cucumbers
    When I eat 5 cucumbers

  Scenario Outline: eating more
    Given there are <start> cucumbers
    When I eat <eat> cucumbers
    Then I should have <left> cucumbers

    Examples:
      | start | eat | left |
      |    12 |   5 |    7 |
      |    20 |   4 |   16 |

  Rule: leftovers
    Scenario: nothing left
      Then I should have 0 cucumbers
";

    fn feature() -> gherkin::Feature {
        gherkin::Feature::parse(FEATURE, gherkin::GherkinEnv::default())
            .unwrap()
    }

    #[test]
    fn iterates_rule_scenarios_too() {
        let names = feature()
            .all_scenarios()
            .map(|s| s.name.clone())
            .collect::<Vec<_>>();

        assert_eq!(names, ["eating", "eating more", "nothing left"]);
    }

    #[test]
    fn counts_outline_rows() {
        let feature = feature();

        assert_eq!(feature.count_scenarios(), 4);
        assert_eq!(feature.count_steps(), 3 + 2 * 4 + 2);
    }

    #[test]
    fn formats_location() {
        let mut feature = feature();
        assert_eq!(feature.location(5), "Hungry:5");

        feature.path = Some(PathBuf::from("features/hungry.feature"));
        assert_eq!(feature.location(5), "features/hungry.feature:5");
    }
}
