//! Citaboard — dashboard core of the clinic appointment suite.
//!
//! The webview shell owns the markup and the canvases; this crate owns
//! everything between a date-picker change and the rendered result:
//! date validation, the report fetches against the clinic backend, the
//! per-report renderers, chart specs, toasts and the orchestration
//! that ties a load action together.

pub mod client;
pub mod config;
pub mod export;
pub mod notify;
pub mod query;
pub mod reports;
pub mod statistics;
pub mod view;

use tracing_subscriber::EnvFilter;

/// Initializes tracing for the embedding application.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
