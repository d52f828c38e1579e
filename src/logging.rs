//! Diagnostic logging to stderr.
//!
//! Level defaults to `warn`; `--verbose` raises it to `debug`. `GDORK_LOG`
//! takes a full `tracing_subscriber` filter directive and wins over both.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GDORK_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "gdork=debug" } else { "warn" }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_crate_debug() {
        assert_eq!(default_directive(true), "gdork=debug");
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
