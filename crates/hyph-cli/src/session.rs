//! Line-by-line hyphenation with interactive commands.
//!
//! Each non-empty input line is one word. Lines starting with `:` are
//! commands: `:lN` and `:rN` change the left/right minimums, `:q` stops.

use std::io::{BufRead, Write};
use std::time::Duration;

use hyph_text::hyphenation::{DEFAULT_LEFT_MIN, DEFAULT_RIGHT_MIN};
use hyph_text::{HyphenPolicy, Hyphenator, hyphenate_bytes};
use web_time::Instant;

use crate::error::Result;

/// An interactive command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetLeftMin(usize),
    SetRightMin(usize),
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a `:`-prefixed line. Returns `None` for ordinary words.
    ///
    /// A missing or zero minimum falls back to the default of 2.
    #[must_use]
    pub fn parse(line: &[u8]) -> Option<Self> {
        let rest = line.strip_prefix(b":")?;
        let command = match rest.first() {
            Some(b'q') => Self::Quit,
            Some(b'l') => Self::SetLeftMin(leading_number(&rest[1..]).unwrap_or(DEFAULT_LEFT_MIN)),
            Some(b'r') => {
                Self::SetRightMin(leading_number(&rest[1..]).unwrap_or(DEFAULT_RIGHT_MIN))
            }
            _ => Self::Unknown(String::from_utf8_lossy(rest).into_owned()),
        };
        Some(command)
    }
}

/// Leading decimal digits as a positive number; `None` for none or zero.
fn leading_number(text: &[u8]) -> Option<usize> {
    let digits = text.iter().take_while(|b| b.is_ascii_digit()).count();
    let value = std::str::from_utf8(&text[..digits]).ok()?.parse::<usize>().ok()?;
    (value > 0).then_some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Hyphenation state across input lines.
#[derive(Debug)]
pub struct Session {
    hyphenator: Hyphenator,
    words: usize,
    elapsed: Duration,
}

impl Session {
    #[must_use]
    pub fn new(hyphenator: Hyphenator) -> Self {
        Self {
            hyphenator,
            words: 0,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn hyphenator(&self) -> &Hyphenator {
        &self.hyphenator
    }

    /// Words hyphenated so far.
    #[must_use]
    pub fn words(&self) -> usize {
        self.words
    }

    /// Time spent inside the engine, I/O excluded.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Process lines until end of input or `:q`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.split(b'\n') {
            let line = line?;
            if self.process_line(&line, out)? == Flow::Quit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Handle one input line, newline already removed.
    pub fn process_line<W: Write>(&mut self, line: &[u8], out: &mut W) -> Result<Flow> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if let Some(command) = Command::parse(line) {
            return self.apply(command, out);
        }

        let policy = *self.hyphenator.policy();
        let mut marker = [0u8; 4];
        let marker = policy.marker().encode_utf8(&mut marker).as_bytes();
        let mut word = Vec::with_capacity(line.len() + 2 * marker.len());
        word.extend_from_slice(marker);
        word.extend_from_slice(line);
        word.extend_from_slice(marker);

        let started = Instant::now();
        let hyphenated = hyphenate_bytes(&word, self.hyphenator.index(), &policy)?;
        self.elapsed += started.elapsed();
        self.words += 1;

        out.write_all(&hyphenated)?;
        out.write_all(b"\n")?;
        Ok(Flow::Continue)
    }

    fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        let policy = *self.hyphenator.policy();
        let updated = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(text) => {
                tracing::warn!(message = "session.unknown_command", command = %text);
                return Ok(Flow::Continue);
            }
            Command::SetLeftMin(left) => {
                writeln!(out, "left minimum set to {left}")?;
                HyphenPolicy::new(left, policy.right_min(), policy.hyphen_char())?
            }
            Command::SetRightMin(right) => {
                writeln!(out, "right minimum set to {right}")?;
                HyphenPolicy::new(policy.left_min(), right, policy.hyphen_char())?
            }
        };
        self.hyphenator.set_policy(updated.with_marker(policy.marker()));
        tracing::info!(
            message = "session.policy",
            left_min = updated.left_min(),
            right_min = updated.right_min()
        );
        Ok(Flow::Continue)
    }
}
