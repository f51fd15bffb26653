//! Process-wide logging setup.

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `jwks_export=info`. Output goes to stderr so
/// stdout stays free for the run summary. Only the first call has any effect.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "jwks_export=info".into());
        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}
