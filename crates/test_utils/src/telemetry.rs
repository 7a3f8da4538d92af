//! Test logging
//!
//! Routes `tracing` output through the test harness so it only shows for
//! failing tests. Filter with `RUST_LOG`, e.g. `RUST_LOG=domain_lease=debug`.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Another test binary helper may have installed a subscriber already
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init();
});

/// Installs the test subscriber once per process
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
