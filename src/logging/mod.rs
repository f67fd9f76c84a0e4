//! Tracing subscriber setup.
//!
//! Filter priority, highest first: `SIGNALBOARD_LOG`, `RUST_LOG`, then the
//! `-v` count (`-v` debug, `-vv` trace, default warn). Logs go to stderr so
//! they never interleave with rendered frames on stdout.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SIGNALBOARD_LOG";

pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(verbose: u8) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = level_for_verbosity(verbose);
    EnvFilter::try_new(level.as_str()).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(verbose: u8, no_color: bool) {
    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color && stderr_is_tty)
        .with_target(verbose > 0)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::DEBUG);
        assert_eq!(level_for_verbosity(5), Level::TRACE);
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(0, true);
        init(2, true);
    }
}
