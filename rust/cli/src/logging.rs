//! Diagnostic logging for the `handsim` binary.
//!
//! Engine and CLI emit `tracing` events; this installs the subscriber that
//! prints them. Verbosity comes from `HANDSIM_LOG` (an `EnvFilter`
//! directive such as `debug` or `handsim_engine=trace`) and defaults to
//! `warn`. Output always goes to stderr so stdout stays machine readable.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HANDSIM_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter from a raw directive string, falling back to the default on
/// absent or unparsable input.
pub fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initialize logging for the application.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::fmt;

    let directive = std::env::var(LOG_ENV).ok();
    let filter = build_filter(directive.as_deref());

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_warn() {
        assert_eq!(build_filter(None).to_string(), "warn");
        assert_eq!(build_filter(Some("  ")).to_string(), "warn");
    }

    #[test]
    fn explicit_directive_is_used() {
        assert_eq!(build_filter(Some("debug")).to_string(), "debug");
        assert_eq!(
            build_filter(Some("handsim_engine=trace")).to_string(),
            "handsim_engine=trace"
        );
    }

    #[test]
    fn invalid_directive_falls_back() {
        assert_eq!(build_filter(Some("handsim_engine=loud")).to_string(), "warn");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging();
        init_logging();
    }
}
