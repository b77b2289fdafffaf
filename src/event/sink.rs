// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Sink`]s keeping owned [`Record`]s of [`Event`]s.

use std::sync::{Arc, Mutex, PoisonError};

use derive_more::with_trait::Display;
use futures::channel::mpsc;
use itertools::Itertools as _;

use crate::result::Severity;

use super::{Event, Kind, Sink};

/// Owned summary of an [`Event`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{kind} {name}")]
pub struct Record {
    /// [`Kind`] of the [`Event`].
    pub kind: Kind,

    /// Name of the node (or [`Suite`]s) the [`Event`] is about.
    ///
    /// [`Suite`]: crate::Suite
    pub name: String,

    /// `path:line` location of the node, if any.
    pub location: Option<String>,

    /// [`Severity`] of the result, for [`Kind::After`] and
    /// [`Kind::AfterExercise`] only.
    pub severity: Option<Severity>,
}

impl Record {
    /// Creates a new [`Record`] of the given [`Event`].
    #[must_use]
    pub fn new<E>(event: &Event<'_, E>) -> Self {
        let kind = event.kind();
        match event {
            Event::BeforeExercise { suites } => Self {
                kind,
                name: suites.iter().map(|s| &s.name).join(", "),
                location: None,
                severity: None,
            },
            Event::AfterExercise { suites, result } => Self {
                kind,
                name: suites.iter().map(|s| &s.name).join(", "),
                location: None,
                severity: Some(result.severity()),
            },
            Event::Before(ev) => Self {
                kind,
                name: ev.subject.name(),
                location: ev.subject.location(),
                severity: None,
            },
            Event::After(ev) => Self {
                kind,
                name: ev.subject.name(),
                location: ev.subject.location(),
                severity: Some(ev.result.severity()),
            },
        }
    }
}

/// [`Sink`] collecting [`Record`]s of all the published [`Event`]s.
///
/// Clones share the same [`Record`]s.
#[derive(Clone, Debug, Default)]
pub struct Collector {
    /// Collected [`Record`]s.
    records: Arc<Mutex<Vec<Record>>>,
}

impl Collector {
    /// Creates a new empty [`Collector`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all the collected [`Record`]s in publishing order.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<E> Sink<E> for Collector {
    fn publish(&self, event: &Event<'_, E>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Record::new(event));
    }
}

/// [`Sink`] forwarding [`Record`]s of [`Event`]s into an unbounded
/// [`mpsc`] channel.
#[derive(Clone, Debug)]
pub struct Channel {
    /// Sending half of the channel.
    sender: mpsc::UnboundedSender<Record>,
}

impl Channel {
    /// Creates a new [`Channel`] along with the receiving half of it.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Record>) {
        let (sender, receiver) = mpsc::unbounded();
        (Self { sender }, receiver)
    }
}

impl<E> Sink<E> for Channel {
    fn publish(&self, event: &Event<'_, E>) {
        if self.sender.unbounded_send(Record::new(event)).is_err() {
            tracing::trace!("event receiver is dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, StreamExt as _};

    use crate::{Suite, TestResult};

    use super::*;

    #[test]
    fn records_exercise_events() {
        let suites = [Suite::new("first"), Suite::new("second")];
        let collector = Collector::new();
        let (channel, receiver) = Channel::new();

        let events: [Event<'_, ()>; 2] = [
            Event::BeforeExercise { suites: &suites },
            Event::AfterExercise {
                suites: &suites,
                result: &TestResult::Skipped,
            },
        ];
        for event in events {
            collector.publish(&event);
            channel.publish(&event);
        }
        drop(channel);

        let records = collector.records();
        assert_eq!(
            records.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["before exercise first, second", "after exercise first, second"],
        );
        assert_eq!(records[1].severity, Some(Severity::Skipped));
        assert_eq!(block_on(receiver.collect::<Vec<_>>()), records);
    }
}
