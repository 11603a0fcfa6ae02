//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "MEFGUARD_LOG";

/// Default filter when `MEFGUARD_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "mefguard=info";

/// Initialize the mefguard logging system.
///
/// Reads `MEFGUARD_LOG` for per-subsystem levels, e.g.
/// `MEFGUARD_LOG=mefguard_analysis::fixes=debug,mefguard_analysis::parsers=warn`.
///
/// Idempotent: later calls are no-ops. Output goes to stderr so that
/// report output on stdout stays machine-readable.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // try_init: a host may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
