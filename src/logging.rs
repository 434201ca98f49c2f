use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_ENV: &str = "DIAGNOSIS_LOG";

/// Installs the stderr subscriber. Level comes from `DIAGNOSIS_LOG`
/// (e.g. `DIAGNOSIS_LOG=linear_diagnosis=debug`), falling back to warnings
/// only. Later calls do nothing.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "linear_diagnosis=debug"
        } else {
            "linear_diagnosis=warn"
        };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
