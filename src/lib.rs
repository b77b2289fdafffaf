// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Execution core of a [Cucumber] runner.
//!
//! Every [`gherkin`] node (feature, scenario, outline example, background,
//! step) is tested by a [`Tester`] through the same `setUp` → `test` →
//! `tearDown` lifecycle, producing a [`Tested`] outcome. Parents run the
//! whole lifecycle of their children inside their own `test`, and pass a
//! `skip` flag down once anything fails.
//!
//! Cross-cutting behavior ([`Event`]s, [`Hooks`], fail-fast) is attached by
//! wrapping [`Tester`]s into decorators, composed per scope by a [`Registry`]
//! in the order of their priorities. An [`Exercise`] drives all the suites to
//! completion and derives the overall [`RunOutcome`].
//!
//! [Cucumber]: https://cucumber.io

#![deny(nonstandard_style, rustdoc::all, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::missing_const_for_fn,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod cli;
pub mod decorator;
pub mod environment;
pub mod error;
pub mod event;
pub mod exercise;
pub mod feature;
pub mod hook;
pub mod node;
pub mod rerun;
pub mod result;
pub mod specification;
pub mod step;
pub mod tag;
pub mod tester;

#[doc(inline)]
pub use self::{
    cli::Cli,
    decorator::{Decorators, Registry},
    environment::{Environment, Suite},
    event::{Dispatcher, Event, Sink},
    exercise::{Configuration, Exercise, RunOutcome, Statistics},
    hook::{Filter, Hooks},
    node::{Example, Outline, Scope, Subject},
    rerun::RerunTracker,
    result::{Outcome, Severity, TestResult, Tested},
    specification::{SpecificationIterator, Specifications},
    step::Resolver,
    tester::{Setup, Teardown, Tester},
};
