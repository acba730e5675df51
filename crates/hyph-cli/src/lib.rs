#![forbid(unsafe_code)]

//! Driver for the `hyphenator` binary: loads a pattern file, builds the
//! index once, then hyphenates one word per input line.

pub mod cli;
pub mod error;
pub mod logging;
pub mod session;

pub use cli::{Cli, Stats, run, run_from_env, run_with};
pub use error::{CliError, Result};
pub use session::{Command, Flow, Session};
