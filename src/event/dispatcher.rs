// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Sink`] fanning [`Event`]s out to subscribers.

use std::fmt;

use super::{Event, Sink};

/// [`Sink`] publishing every [`Event`] into all the subscribed [`Sink`]s, in
/// their subscription order.
pub struct Dispatcher<E> {
    /// Subscribed [`Sink`]s.
    sinks: Vec<Box<dyn Sink<E>>>,
}

impl<E> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self { sinks: Vec::new() }
    }
}

impl<E> Dispatcher<E> {
    /// Creates a new [`Dispatcher`] without subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes the given [`Sink`] to all the [`Event`]s.
    #[must_use]
    pub fn subscribe(mut self, sink: impl Sink<E> + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl<E> Sink<E> for Dispatcher<E> {
    fn publish(&self, event: &Event<'_, E>) {
        tracing::trace!(kind = %event.kind(), "publishing event");
        for sink in &self.sinks {
            sink.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::{event::Kind, Suite};

    use super::*;

    #[test]
    fn publishes_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (first, second) = (log.clone(), log.clone());
        let dispatcher = Dispatcher::<()>::new()
            .subscribe(move |ev: &Event<'_, ()>| {
                first.lock().unwrap().push(("first", ev.kind()));
            })
            .subscribe(move |ev: &Event<'_, ()>| {
                second.lock().unwrap().push(("second", ev.kind()));
            });

        dispatcher.publish(&Event::BeforeExercise {
            suites: &[Suite::new("default")],
        });

        assert_eq!(
            *log.lock().unwrap(),
            [
                ("first", Kind::BeforeExercise),
                ("second", Kind::BeforeExercise),
            ],
        );
    }
}
