//! Tracing subscriber setup for the `credcache` binary.
//!
//! Logs go to stderr so they never mix with command output. `RUST_LOG`
//! wins over the verbosity flag when set.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
///
/// `verbosity` 0 logs warnings, 1 adds info, 2 or more adds debug.
pub fn init_logging(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(console::colors_enabled_stderr())
                .with_target(true),
        );

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("[credcache] Failed to set tracing subscriber: {e}");
        }
    });
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "credcache=warn",
        1 => "credcache=info",
        _ => "credcache=debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "credcache=warn");
        assert_eq!(default_directive(1), "credcache=info");
        assert_eq!(default_directive(5), "credcache=debug");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(0);
        init_logging(2);
    }
}
