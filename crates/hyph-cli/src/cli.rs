use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use hyph_text::hyphenation::{DEFAULT_HYPHEN, DEFAULT_LEFT_MIN, DEFAULT_RIGHT_MIN};
use hyph_text::{HyphenPolicy, Hyphenator, PatternSet};
use serde::Serialize;
use web_time::Instant;

use crate::error::{CliError, Result};
use crate::logging;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "hyphenator",
    about = "Hyphenate words with TeX-style Liang patterns",
    version
)]
pub struct Cli {
    /// Minimum characters before the first hyphen (values below 1 become 1).
    #[arg(short = 'l', long, value_name = "N", default_value_t = DEFAULT_LEFT_MIN)]
    pub left_min: usize,

    /// Minimum characters after the last hyphen (values below 1 become 1).
    #[arg(short = 'r', long, value_name = "N", default_value_t = DEFAULT_RIGHT_MIN)]
    pub right_min: usize,

    /// Character inserted at hyphenation points.
    #[arg(short = 'c', long, value_name = "CHAR", default_value_t = DEFAULT_HYPHEN)]
    pub hyphen_char: char,

    /// Log more detail to stderr (-v timing, -vv index summary, -vvv pattern matches).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// File with one word per line; reads stdin when absent.
    #[arg(short = 'f', long = "words", value_name = "FILE")]
    pub words: Option<PathBuf>,

    /// Print a JSON timing summary after the last word.
    #[arg(long)]
    pub stats: bool,

    /// Pattern file: whitespace-separated patterns, `%` starts a comment.
    #[arg(value_name = "PATTERN_FILE")]
    pub patterns: PathBuf,
}

impl Cli {
    /// Policy from the flags, with minimums raised to at least 1.
    pub fn policy(&self) -> Result<HyphenPolicy> {
        Ok(HyphenPolicy::new(
            self.left_min.max(1),
            self.right_min.max(1),
            self.hyphen_char,
        )?)
    }
}

/// Summary printed by `--stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub patterns: usize,
    pub nodes: usize,
    pub words: usize,
    pub build_us: u64,
    pub hyphenate_us: u64,
    pub us_per_word: f64,
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    match &cli.words {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Words {
                path: path.clone(),
                source,
            })?;
            run_with(&cli, BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("Enter words to hyphenate (:q to quit):");
            }
            run_with(&cli, stdin.lock(), &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Load patterns, build the index, then hyphenate every line of `input`.
pub fn run_with<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> Result<Stats> {
    let policy = cli.policy()?;

    let started = Instant::now();
    let patterns = PatternSet::load(&cli.patterns).map_err(|source| CliError::Patterns {
        path: cli.patterns.clone(),
        source,
    })?;
    tracing::info!(
        message = "patterns.loaded",
        patterns = patterns.len(),
        elapsed_us = micros(started.elapsed())
    );
    if tracing::enabled!(tracing::Level::TRACE) {
        for pattern in &patterns {
            tracing::trace!(message = "pattern", pattern = %pattern, code = ?pattern.code);
        }
    }

    let started = Instant::now();
    let hyphenator = Hyphenator::from_patterns(&patterns, policy)?;
    let build = started.elapsed();
    let nodes = hyphenator.index().node_count();
    tracing::info!(
        message = "index.built",
        patterns = patterns.len(),
        nodes,
        elapsed_us = micros(build)
    );

    let mut session = Session::new(hyphenator);
    session.run(input, out)?;

    let words = session.words();
    let hyphenate_us = micros(session.elapsed());
    let us_per_word = if words == 0 {
        0.0
    } else {
        hyphenate_us as f64 / words as f64
    };
    tracing::info!(message = "hyphenation.done", words, elapsed_us = hyphenate_us, us_per_word);

    let stats = Stats {
        patterns: patterns.len(),
        nodes,
        words,
        build_us: micros(build),
        hyphenate_us,
        us_per_word,
    };
    if cli.stats {
        serde_json::to_writer(&mut *out, &stats)?;
        out.write_all(b"\n")?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["hyphenator", "en.pat"]).unwrap();
        assert_eq!(cli.left_min, 2);
        assert_eq!(cli.right_min, 2);
        assert_eq!(cli.hyphen_char, '-');
        assert_eq!(cli.verbose, 0);
        assert!(cli.words.is_none());
        assert!(!cli.stats);
        assert_eq!(cli.patterns, PathBuf::from("en.pat"));
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from([
            "hyphenator", "-l", "3", "-r", "4", "-c", "=", "-vv", "-f", "words.txt", "--stats",
            "en.pat",
        ])
        .unwrap();
        assert_eq!((cli.left_min, cli.right_min), (3, 4));
        assert_eq!(cli.hyphen_char, '=');
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.words, Some(PathBuf::from("words.txt")));
        assert!(cli.stats);
    }

    #[test]
    fn zero_minimums_are_raised() {
        let cli = Cli::try_parse_from(["hyphenator", "-l", "0", "-r", "0", "en.pat"]).unwrap();
        let policy = cli.policy().unwrap();
        assert_eq!((policy.left_min(), policy.right_min()), (1, 1));
    }

    #[test]
    fn missing_pattern_file_is_usage_error() {
        let err = Cli::try_parse_from(["hyphenator"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn multi_char_hyphen_rejected() {
        assert!(Cli::try_parse_from(["hyphenator", "-c", "ab", "en.pat"]).is_err());
    }

    #[test]
    fn micros_saturates() {
        assert_eq!(micros(Duration::from_millis(3)), 3_000);
        assert_eq!(micros(Duration::MAX), u64::MAX);
    }
}
