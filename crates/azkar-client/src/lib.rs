pub mod bridge;
pub mod client;

pub use bridge::CommandBridge;
pub use client::SyncClient;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the diagnostic subscriber. Safe to call more than once; later
/// calls are ignored, which lets every test set it up unconditionally.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,azkar_client=debug,azkar_core=debug"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
