// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tracking of failed scenarios for re-running them later.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    event::{Event, Sink},
    node::Scope,
    result::Severity,
};

/// [`Sink`] recording `path:line` locations of failed scenarios and outline
/// examples.
///
/// Clones share the same recorded locations. Persisting them between runs is
/// up to the caller, while [`Specifications::retain_locations()`] restricts a
/// later run to them.
///
/// [`Specifications::retain_locations()`]:
///     crate::Specifications::retain_locations
#[derive(Clone, Debug, Default)]
pub struct RerunTracker {
    /// Recorded locations, in failing order.
    failed: Arc<Mutex<Vec<String>>>,
}

impl RerunTracker {
    /// Creates a new [`RerunTracker`] without any recorded locations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the locations of all the failed scenarios so far.
    #[must_use]
    pub fn failed(&self) -> Vec<String> {
        self.failed.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Indicates whether no scenario has failed so far.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failed.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl<E> Sink<E> for RerunTracker {
    fn publish(&self, event: &Event<'_, E>) {
        let Event::After(ev) = event else {
            return;
        };
        if !matches!(ev.subject.scope(), Scope::Scenario | Scope::Example)
            || ev.result.severity() != Severity::Failed
        {
            return;
        }
        if let Some(loc) = ev.subject.location() {
            tracing::debug!(location = %loc, "scenario failed");
            self.failed
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(loc);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::Failure,
        event::After,
        node::{Outline, Subject},
        tester::Teardown,
        TestResult,
    };

    use super::*;

    fn after(tracker: &RerunTracker, subject: Subject<'_>, res: TestResult) {
        tracker.publish(&Event::After(After {
            environment: &(),
            subject,
            result: res,
            teardown: &Teardown::default(),
        }));
    }

    #[test]
    fn records_failed_scenarios_and_examples_only() {
        let feature = gherkin::Feature::parse(
            "Feature: f\n\
             \n\
             \x20 Scenario: plain\n\
             \x20   Given a step\n\
             \n\
             \x20 Scenario Outline: rows\n\
             \x20   Given <x>\n\
             \n\
             \x20   Examples:\n\
             \x20     | x |\n\
             \x20     | 1 |\n\
             \x20     | 2 |\n",
            gherkin::GherkinEnv::default(),
        )
        .unwrap();
        let outline = Outline::new(feature.scenarios[1].clone());
        let tracker = RerunTracker::new();
        let failed = || TestResult::Failed(Failure::Panic(Arc::new("boom")));

        let sc = &feature.scenarios[0];
        after(&tracker, Subject::Scenario(&feature, sc), failed());
        after(&tracker, Subject::Step(&feature, &sc.steps[0]), failed());
        after(&tracker, Subject::Outline(&feature, &outline), failed());
        after(
            &tracker,
            Subject::Example(&feature, &outline.examples[0]),
            TestResult::Passed,
        );
        after(
            &tracker,
            Subject::Example(&feature, &outline.examples[1]),
            failed(),
        );

        assert_eq!(tracker.failed(), ["f:3", "f:12"]);
    }
}
