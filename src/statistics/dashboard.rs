//! Statistics dashboard orchestration.
//!
//! A single pipeline: validate the period, fetch the summary, render
//! tiles + charts + therapist list. Same ticket discipline as the
//! reports dashboard — a superseded load never overwrites the newer
//! period's render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::BackendClient;
use crate::config::DashboardConfig;
use crate::notify::{NotificationCenter, Severity};
use crate::query::{parse_date_range, ValidationError};
use crate::reports::DashboardState;
use crate::view::region::{shared_region, SharedRegion};

use super::charts::ChartRegistry;
use super::fetch;
use super::render::render_statistics;

const ERROR_PLACEHOLDER: &str = r#"<p class="no-data-message">Error al cargar estadísticas</p>"#;

pub struct StatisticsDashboard {
    client: Arc<BackendClient>,
    notifications: NotificationCenter,
    state: Arc<Mutex<DashboardState>>,
    seq: Arc<AtomicU64>,
    tiles: SharedRegion,
    therapists: SharedRegion,
    charts: Arc<Mutex<ChartRegistry>>,
}

impl StatisticsDashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_parts(
            Arc::new(BackendClient::from_config(config)),
            NotificationCenter::from_config(config),
        )
    }

    pub fn with_parts(client: Arc<BackendClient>, notifications: NotificationCenter) -> Self {
        Self {
            client,
            notifications,
            state: Arc::new(Mutex::new(DashboardState::Idle)),
            seq: Arc::new(AtomicU64::new(0)),
            tiles: shared_region("metric-tiles"),
            therapists: shared_region("therapists-list"),
            charts: Arc::new(Mutex::new(ChartRegistry::new())),
        }
    }

    pub fn tiles(&self) -> &SharedRegion {
        &self.tiles
    }

    pub fn therapists(&self) -> &SharedRegion {
        &self.therapists
    }

    pub fn charts(&self) -> &Arc<Mutex<ChartRegistry>> {
        &self.charts
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub async fn state(&self) -> DashboardState {
        *self.state.lock().await
    }

    /// Loads statistics for an inclusive period.
    pub async fn load(&self, raw_start: &str, raw_end: &str) -> Result<(), ValidationError> {
        self.set_state(DashboardState::Validating).await;

        let query = match parse_date_range(raw_start, raw_end) {
            Ok(query) => query,
            Err(err) => {
                tracing::warn!(error = %err, "rejected period input");
                self.notifications
                    .notify(err.user_message(), Severity::Error)
                    .await;
                self.set_state(DashboardState::Idle).await;
                return Err(err);
            }
        };

        if let Some((start, end)) = query.as_date_range() {
            let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            self.set_state(DashboardState::Loading).await;
            self.tiles.lock().await.set_loading();
            self.therapists.lock().await.set_loading();

            let outcome = fetch::summary(&self.client, start, end).await;

            if self.seq.load(Ordering::SeqCst) != ticket {
                tracing::debug!(ticket, "discarding superseded statistics response");
                return Ok(());
            }

            match outcome {
                Ok(summary) => {
                    let mut tiles = self.tiles.lock().await;
                    let mut therapists = self.therapists.lock().await;
                    let mut charts = self.charts.lock().await;
                    if let Err(err) =
                        render_statistics(&mut tiles, &mut therapists, &mut charts, &summary)
                    {
                        tracing::error!(error = %err, "statistics render failed");
                        self.fail_views(&mut tiles, &mut therapists, &mut charts);
                        drop((tiles, therapists, charts));
                        self.notifications
                            .notify("Error al cargar estadísticas", Severity::Error)
                            .await;
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "statistics load failed");
                    let mut tiles = self.tiles.lock().await;
                    let mut therapists = self.therapists.lock().await;
                    let mut charts = self.charts.lock().await;
                    self.fail_views(&mut tiles, &mut therapists, &mut charts);
                    drop((tiles, therapists, charts));
                    self.notifications
                        .notify(err.user_message(), Severity::Error)
                        .await;
                }
            }

            self.set_state(DashboardState::Idle).await;
        }

        Ok(())
    }

    /// Failure leaves every view in a defined state: placeholders in
    /// both regions, no stale charts from the previous period.
    fn fail_views(
        &self,
        tiles: &mut crate::view::region::Region,
        therapists: &mut crate::view::region::Region,
        charts: &mut ChartRegistry,
    ) {
        tiles.fail(ERROR_PLACEHOLDER.to_string());
        therapists.fail(ERROR_PLACEHOLDER.to_string());
        charts.clear();
    }

    async fn set_state(&self, state: DashboardState) {
        *self.state.lock().await = state;
    }
}
