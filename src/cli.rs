// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of a run.
//!
//! [`Cli`] holds the options the [`Exercise`] itself understands. A host
//! binary may flatten it into its own [`clap::Parser`], or use the prepared
//! [`Opts`] extended with any custom [`clap::Args`].
//!
//! [`Exercise`]: crate::Exercise

pub use clap::{Args, Parser};

/// Options controlling an [`Exercise`].
///
/// [`Exercise`]: crate::Exercise
#[derive(Args, Clone, Copy, Debug, Default, Eq, PartialEq)]
#[group(skip)]
pub struct Cli {
    /// Fail the run if any scenario is skipped or pending.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Walk through all the scenarios without executing any step or hook.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Stop executing scenarios after the first failed one.
    ///
    /// Remaining scenarios are still walked through as skipped.
    #[arg(long, visible_alias = "ff", global = true)]
    pub fail_fast: bool,
}

/// Root CLI (command line interface) of a host binary.
///
/// # Example
///
/// ```rust
/// # use cucumber_tester::cli::{self, Parser as _};
/// #
/// #[derive(cli::Args)] // re-export of `clap::Args`
/// struct Custom {
///     /// Name of the suite to run.
///     #[arg(long)]
///     suite: Option<String>,
/// }
///
/// let opts = cli::Opts::<Custom>::try_parse_from(["run", "--ff"])?;
/// assert!(opts.tester.fail_fast);
/// assert_eq!(opts.custom.suite, None);
/// # Ok::<_, clap::Error>(())
/// ```
#[derive(Parser, Clone, Debug, Default)]
#[command(name = "cucumber-tester", about = "Run the scenarios")]
pub struct Opts<Custom: Args = Empty> {
    /// [`Exercise`] options.
    ///
    /// [`Exercise`]: crate::Exercise
    #[command(flatten)]
    pub tester: Cli,

    /// Additional custom CLI options.
    #[command(flatten)]
    pub custom: Custom,
}

impl<Custom: Args> Opts<Custom> {
    /// Shortcut for [`clap::Parser::parse()`], which doesn't require the trait
    /// being imported.
    #[must_use]
    pub fn parsed() -> Self {
        <Self as Parser>::parse()
    }
}

/// Empty CLI options.
#[derive(Args, Clone, Copy, Debug, Default)]
#[group(skip)]
pub struct Empty;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_lenient_run() {
        let opts = Opts::<Empty>::try_parse_from(["run"]).unwrap();

        assert_eq!(opts.tester, Cli::default());
    }

    #[test]
    fn parses_flags_and_alias() {
        let opts =
            Opts::<Empty>::try_parse_from(["run", "--strict", "--ff"]).unwrap();

        assert_eq!(
            opts.tester,
            Cli { strict: true, dry_run: false, fail_fast: true },
        );

        let opts = Opts::<Empty>::try_parse_from(["run", "--dry-run"]).unwrap();

        assert!(opts.tester.dry_run);
    }
}
