// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Specification nodes being tested.
//!
//! Plain nodes are [`gherkin`] types. A [Scenario Outline][1] is tested as an
//! [`Outline`] with its [`Examples`] rows expanded into [`Example`]s.
//!
//! [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
//! [`Examples`]: gherkin::Examples

use std::iter;

use derive_more::with_trait::{Deref, Display};
use lazy_regex::regex;
use sealed::sealed;

use crate::{feature::Ext as _, Suite};

/// Granularity of execution.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Scope {
    /// Whole suite.
    #[display("suite")]
    Suite,

    /// [`gherkin::Feature`].
    #[display("feature")]
    Feature,

    /// Plain [`gherkin::Scenario`].
    #[display("scenario")]
    Scenario,

    /// [`Outline`].
    #[display("outline")]
    Outline,

    /// Single [`Example`] of an [`Outline`].
    #[display("example")]
    Example,

    /// [`gherkin::Background`].
    #[display("background")]
    Background,

    /// [`gherkin::Step`].
    #[display("step")]
    Step,
}

/// Node being tested, along with the [`gherkin::Feature`] it belongs to.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    /// Suite.
    Suite(&'a Suite),

    /// [`gherkin::Feature`].
    Feature(&'a gherkin::Feature),

    /// [`gherkin::Scenario`].
    Scenario(&'a gherkin::Feature, &'a gherkin::Scenario),

    /// [`Outline`].
    Outline(&'a gherkin::Feature, &'a Outline),

    /// [`Example`].
    Example(&'a gherkin::Feature, &'a Example),

    /// [`gherkin::Background`].
    Background(&'a gherkin::Feature, &'a gherkin::Background),

    /// [`gherkin::Step`].
    Step(&'a gherkin::Feature, &'a gherkin::Step),
}

impl<'a> Subject<'a> {
    /// Returns the [`Scope`] of this [`Subject`].
    #[must_use]
    pub const fn scope(&self) -> Scope {
        match self {
            Self::Suite(_) => Scope::Suite,
            Self::Feature(_) => Scope::Feature,
            Self::Scenario(..) => Scope::Scenario,
            Self::Outline(..) => Scope::Outline,
            Self::Example(..) => Scope::Example,
            Self::Background(..) => Scope::Background,
            Self::Step(..) => Scope::Step,
        }
    }

    /// Returns the [`gherkin::Feature`] this [`Subject`] belongs to, if any.
    #[must_use]
    pub const fn feature(&self) -> Option<&'a gherkin::Feature> {
        match *self {
            Self::Suite(_) => None,
            Self::Feature(f)
            | Self::Scenario(f, _)
            | Self::Outline(f, _)
            | Self::Example(f, _)
            | Self::Background(f, _)
            | Self::Step(f, _) => Some(f),
        }
    }

    /// Returns the [`gherkin::Scenario`] of this [`Subject`], if it's a
    /// scenario, an outline or an example.
    #[must_use]
    pub fn scenario(&self) -> Option<&'a gherkin::Scenario> {
        match *self {
            Self::Scenario(_, s) => Some(s),
            Self::Outline(_, o) => Some(&o.scenario),
            Self::Example(_, e) => Some(&e.scenario),
            Self::Suite(_)
            | Self::Feature(_)
            | Self::Background(..)
            | Self::Step(..) => None,
        }
    }

    /// Returns tags applying to this [`Subject`]: the [`gherkin::Feature`]
    /// ones followed by the [`gherkin::Scenario`] ones.
    #[must_use]
    pub fn tags(&self) -> Vec<&'a str> {
        self.feature()
            .into_iter()
            .flat_map(|f| &f.tags)
            .chain(self.scenario().into_iter().flat_map(|s| &s.tags))
            .map(String::as_str)
            .collect()
    }

    /// Returns a human-readable name of this [`Subject`].
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Suite(s) => s.name.clone(),
            Self::Feature(f) => f.name.clone(),
            Self::Scenario(_, s) => s.name.clone(),
            Self::Outline(_, o) => o.scenario.name.clone(),
            Self::Example(_, e) => e.scenario.name.clone(),
            Self::Background(_, b) => b.keyword.clone(),
            Self::Step(_, s) => format!("{} {}", s.keyword.trim(), s.value),
        }
    }

    /// Returns `path:line` location of this [`Subject`], if it has any.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        let line = match self {
            Self::Suite(_) => return None,
            Self::Feature(f) => f.position.line,
            Self::Scenario(_, s) => s.position.line,
            Self::Outline(_, o) => o.scenario.position.line,
            Self::Example(_, e) => e.scenario.position.line,
            Self::Background(_, b) => b.position.line,
            Self::Step(_, s) => s.position.line,
        };
        self.feature().map(|f| f.location(line))
    }
}

/// Specification node testable by a [`Tester`].
///
/// [`Tester`]: crate::Tester
#[sealed]
pub trait Node {
    /// [`Scope`] of this [`Node`].
    const SCOPE: Scope;

    /// Wraps this [`Node`] into a [`Subject`].
    fn subject<'a>(&'a self, feature: &'a gherkin::Feature) -> Subject<'a>;
}

#[sealed]
impl Node for gherkin::Feature {
    const SCOPE: Scope = Scope::Feature;

    fn subject<'a>(&'a self, _: &'a gherkin::Feature) -> Subject<'a> {
        Subject::Feature(self)
    }
}

#[sealed]
impl Node for gherkin::Scenario {
    const SCOPE: Scope = Scope::Scenario;

    fn subject<'a>(&'a self, feature: &'a gherkin::Feature) -> Subject<'a> {
        Subject::Scenario(feature, self)
    }
}

#[sealed]
impl Node for Outline {
    const SCOPE: Scope = Scope::Outline;

    fn subject<'a>(&'a self, feature: &'a gherkin::Feature) -> Subject<'a> {
        Subject::Outline(feature, self)
    }
}

#[sealed]
impl Node for Example {
    const SCOPE: Scope = Scope::Example;

    fn subject<'a>(&'a self, feature: &'a gherkin::Feature) -> Subject<'a> {
        Subject::Example(feature, self)
    }
}

#[sealed]
impl Node for gherkin::Background {
    const SCOPE: Scope = Scope::Background;

    fn subject<'a>(&'a self, feature: &'a gherkin::Feature) -> Subject<'a> {
        Subject::Background(feature, self)
    }
}

#[sealed]
impl Node for gherkin::Step {
    const SCOPE: Scope = Scope::Step;

    fn subject<'a>(&'a self, feature: &'a gherkin::Feature) -> Subject<'a> {
        Subject::Step(feature, self)
    }
}

/// [Scenario Outline][1] with its [`Examples`] rows expanded.
///
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
/// [`Examples`]: gherkin::Examples
#[derive(Clone, Debug)]
pub struct Outline {
    /// Template [`gherkin::Scenario`].
    pub scenario: gherkin::Scenario,

    /// Expanded [`Example`]s, one per [`Examples`] row, in document order.
    ///
    /// [`Examples`]: gherkin::Examples
    pub examples: Vec<Example>,
}

impl Outline {
    /// Expands [`Examples`] of the given [`gherkin::Scenario`].
    ///
    /// So this one:
    /// ```gherkin
    /// Scenario Outline: eating
    ///   Given there are <start> cucumbers
    ///   When I eat <eat> cucumbers
    ///
    ///   Examples:
    ///     | start | eat |
    ///     |    12 |   5 |
    ///     |    20 |   4 |
    /// ```
    ///
    /// Will be expanded into two [`Example`]s:
    /// ```gherkin
    /// Scenario Outline: eating
    ///   Given there are 12 cucumbers
    ///   When I eat 5 cucumbers
    ///
    /// Scenario Outline: eating
    ///   Given there are 20 cucumbers
    ///   When I eat 4 cucumbers
    /// ```
    ///
    /// Placeholders without a matching column are left as is.
    ///
    /// [`Examples`]: gherkin::Examples
    #[must_use]
    pub fn new(scenario: gherkin::Scenario) -> Self {
        let examples = scenario
            .examples
            .iter()
            .filter_map(|ex| {
                ex.table
                    .as_ref()?
                    .rows
                    .split_first()
                    .map(|(header, rows)| (header, rows, ex))
            })
            .flat_map(|(header, rows, ex)| {
                rows.iter()
                    .enumerate()
                    .map(move |(id, row)| (header, id, row, ex))
            })
            .enumerate()
            .map(|(index, (header, id, row, ex))| {
                let tokens = header
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Vec<_>>();

                let mut expanded = scenario.clone();
                expanded.examples.clear();
                expanded.position = ex.position;
                expanded.position.line += id + 2;
                expanded.tags.extend(ex.tags.iter().cloned());

                expanded.name = substitute(&expanded.name, &tokens);
                for s in &mut expanded.steps {
                    for value in iter::once(&mut s.value)
                        .chain(s.docstring.iter_mut())
                        .chain(s.table.iter_mut().flat_map(|t| {
                            t.rows.iter_mut().flat_map(|r| r.iter_mut())
                        }))
                    {
                        *value = substitute(value, &tokens);
                    }
                }

                Example { index, tokens, scenario: expanded }
            })
            .collect();

        Self { scenario, examples }
    }
}

/// Replaces `<name>` placeholders in the given `text` with the values of the
/// given `tokens`.
fn substitute(text: &str, tokens: &[(String, String)]) -> String {
    let re = regex!(r"<([^>\s]+)>");

    re.replace_all(text, |cap: &regex::Captures<'_>| {
        let whole = cap.get(0).map_or("", |m| m.as_str());
        let name = cap.get(1).map_or("", |m| m.as_str());
        tokens
            .iter()
            .find_map(|(k, v)| (k == name).then(|| v.clone()))
            .unwrap_or_else(|| whole.to_owned())
    })
    .into_owned()
}

/// Single row of an [`Outline`]'s [`Examples`], tested as a
/// [`gherkin::Scenario`] of its own.
///
/// [`Examples`]: gherkin::Examples
#[derive(Clone, Debug, Deref)]
pub struct Example {
    /// Index of this [`Example`] among all the [`Outline`]'s rows.
    pub index: usize,

    /// Column names paired with this row's values.
    pub tokens: Vec<(String, String)>,

    /// [`gherkin::Scenario`] with all the placeholders substituted.
    #[deref]
    pub scenario: gherkin::Scenario,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURE: &str = "\
@hungry
Feature: Hungry
  Scenario Outline: eating <eat>
    Given there are <start> cucumbers
    When I eat <eat> cucumbers
    Then I should have <left> cucumbers and <unknown>
      | cucumbers left |
      | <left>         |

    Examples:
      | start | eat | left |
      |    12 |   5 |    7 |
      |    20 |   4 |   16 |

    @big
    Examples:
      | start | eat | left |
      |   100 |  50 |   50 |
";

    fn outline() -> (gherkin::Feature, Outline) {
        let mut feature =
            gherkin::Feature::parse(FEATURE, gherkin::GherkinEnv::default())
                .unwrap();
        let outline = Outline::new(feature.scenarios.remove(0));
        (feature, outline)
    }

    #[test]
    fn expands_every_row() {
        let (_, outline) = outline();

        assert_eq!(outline.examples.len(), 3);
        assert_eq!(
            outline.examples.iter().map(|e| e.index).collect::<Vec<_>>(),
            [0, 1, 2],
        );
        assert!(outline.examples.iter().all(|e| e.examples.is_empty()));
    }

    #[test]
    fn substitutes_placeholders() {
        let (_, outline) = outline();
        let first = &outline.examples[0];

        assert_eq!(first.name, "eating 5");
        assert_eq!(first.steps[0].value, "there are 12 cucumbers");
        assert_eq!(first.steps[1].value, "I eat 5 cucumbers");
        assert_eq!(
            first.steps[2].value,
            "I should have 7 cucumbers and <unknown>",
        );
        assert_eq!(
            first.steps[2].table.as_ref().unwrap().rows[1],
            ["7".to_owned()],
        );
        assert_eq!(
            outline.scenario.steps[0].value,
            "there are <start> cucumbers",
        );
    }

    #[test]
    fn positions_rows() {
        let (_, outline) = outline();

        let lines = outline
            .examples
            .iter()
            .map(|e| e.position.line)
            .collect::<Vec<_>>();
        assert_eq!(lines, [12, 13, 18]);
    }

    #[test]
    fn appends_examples_tags() {
        let (feature, outline) = outline();

        assert!(outline.examples[0].tags.is_empty());
        assert_eq!(outline.examples[2].tags, ["big"]);
        assert_eq!(
            Example::subject(&outline.examples[2], &feature).tags(),
            ["hungry", "big"],
        );
    }

    #[test]
    fn subject_describes_node() {
        let (feature, outline) = outline();
        let subject = outline.subject(&feature);

        assert_eq!(subject.scope(), Scope::Outline);
        assert_eq!(subject.name(), "eating <eat>");
        assert_eq!(subject.location().as_deref(), Some("Hungry:3"));

        let step = outline.examples[1].steps[0].subject(&feature);
        assert_eq!(step.name(), "Given there are 20 cucumbers");
        assert_eq!(step.location().as_deref(), Some("Hungry:4"));
    }
}
