//! Tracing subscriber setup for the binary.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber, writing to stderr so stdout stays reserved
/// for the report. `RUST_LOG` takes precedence over `level` when set.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("invoice_payment={level}")));

    // try_init: tests may have installed a subscriber already
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(true),
        )
        .with(filter)
        .try_init();
}
