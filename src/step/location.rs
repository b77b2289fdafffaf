// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Source location of a [`Step`] function.
//!
//! [`Step`]: super::Step

use derive_more::with_trait::Display;

/// Location of a [`Step`] [`fn`] in the source code.
///
/// [`Step`]: super::Step
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}:{column}")]
pub struct Location {
    /// Path to the file where [`Step`] [`fn`] is located.
    ///
    /// [`Step`]: super::Step
    pub path: &'static str,

    /// Line of the file where [`Step`] [`fn`] is located.
    ///
    /// [`Step`]: super::Step
    pub line: u32,

    /// Column of the file where [`Step`] [`fn`] is located.
    ///
    /// [`Step`]: super::Step
    pub column: u32,
}

/// Creates a [`Location`] of the macro call site.
#[macro_export]
macro_rules! location {
    () => {
        $crate::step::Location {
            path: ::std::file!(),
            line: ::std::line!(),
            column: ::std::column!(),
        }
    };
}
