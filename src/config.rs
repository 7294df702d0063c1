use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Citaboard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Currency prefix used by every money cell the dashboards render.
/// The backend reports amounts in Peruvian soles.
pub const CURRENCY_PREFIX: &str = "S/.";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Runtime configuration for one dashboard instance.
///
/// The defaults match the deployed clinic setup: the Django backend on
/// its standard port, the 10-second request timeout the statistics
/// dashboard always ran with, and the 5-second toast lifetime.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the clinic backend, without a trailing slash.
    pub base_url: String,
    /// Fixed per-request timeout.
    pub request_timeout: Duration,
    /// How long a notification stays visible before self-dismissing.
    pub notification_ttl: Duration,
    /// Maximum notifications visible at once; the oldest is dropped
    /// when the queue would exceed this.
    pub notification_cap: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(10),
            notification_ttl: Duration::from_secs(5),
            notification_cap: 8,
        }
    }
}

impl DashboardConfig {
    /// Config pointing at an explicit backend, defaults elsewhere.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}
