//! Log setup for the binary. Libraries only emit events; this installs the
//! subscriber that writes them to stderr.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count: warnings by default, then info (timing),
/// debug (index summary), trace (every matched pattern).
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber installed earlier (tests, embedding) stays in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
