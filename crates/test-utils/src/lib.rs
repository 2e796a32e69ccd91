pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a tracing subscriber once per test binary.
///
/// Output goes through `with_test_writer()`, so the harness only shows it
/// for failing tests (or with `-- --nocapture`).
///
/// The filter comes from `HEFTMAP_LOG`, the same variable the binary reads,
/// e.g. `HEFTMAP_LOG=heftmap::heft=trace cargo test --test scenarios`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("HEFTMAP_LOG")
            .unwrap_or_else(|_| EnvFilter::new("heftmap=info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
