pub mod config;
pub mod flow; // Consultation route classifier + wizard
pub mod extraction; // Transcript keyword extraction + smart actions
pub mod engine;

pub use config::{ConfigError, SmartFlowConfig, Thresholds};
pub use engine::SmartFlow;
pub use extraction::{derive_actions, extract, ExtractedData, SmartAction};
pub use flow::{classify, FlowDecision, PatientContext};

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::debug!("{} v{} tracing initialised", config::APP_NAME, config::APP_VERSION);
}
