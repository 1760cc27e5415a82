//! Tracing subscriber setup.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter, e.g. `QUILL_LOG=quill_index=debug`.
pub const LOG_ENV: &str = "QUILL_LOG";

/// Maps a `-v` count to a filter directive, starting from `base` when no flag is given.
pub fn directive_for(verbose: u8, base: &str) -> &str {
    match verbose {
        0 => base,
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. Events go to stderr so stdout stays parseable.
///
/// `QUILL_LOG` wins over the level derived from `verbose`. Must be called at most once.
pub fn init(verbose: u8, base: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(directive_for(verbose, base)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
