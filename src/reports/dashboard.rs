//! Reports dashboard orchestration.
//!
//! One instance per open dashboard. A load action validates the date
//! input, fans out one fetch+render pipeline per report kind and
//! settles back to idle once every pipeline finished, successfully or
//! not. Pipelines are independent: a failing report renders its own
//! error placeholder and never aborts its siblings.
//!
//! Loads are not cancelled when the operator re-triggers while a
//! previous load is still in flight. Instead every load takes a
//! monotonic ticket; a pipeline whose ticket is no longer the latest
//! discards its response instead of overwriting the newer render.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::{BackendClient, FetchError};
use crate::config::DashboardConfig;
use crate::export::{export_url, ExportError};
use crate::notify::{NotificationCenter, Severity};
use crate::query::{parse_date_range, parse_single_date, ReportQuery, ValidationError};
use crate::view::format::display_date;
use crate::view::region::{shared_region, SharedRegion};

use super::fetch;
use super::render::{render_error_placeholder, render_report};
use super::types::{ReportKind, ReportResult};

/// Controller lifecycle; observable by the shell for busy indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardState {
    Idle,
    Validating,
    Loading,
}

/// The four disjoint regions the reports dashboard renders into.
pub struct ReportRegions {
    pub therapist_appointments: SharedRegion,
    pub patients_by_therapist: SharedRegion,
    pub daily_cash: SharedRegion,
    pub date_range_appointments: SharedRegion,
}

impl ReportRegions {
    fn new() -> Self {
        Self {
            therapist_appointments: shared_region(
                ReportKind::TherapistAppointments.region_name(),
            ),
            patients_by_therapist: shared_region(ReportKind::PatientsByTherapist.region_name()),
            daily_cash: shared_region(ReportKind::DailyCash.region_name()),
            date_range_appointments: shared_region(
                ReportKind::DateRangeAppointments.region_name(),
            ),
        }
    }
}

pub struct ReportsDashboard {
    client: Arc<BackendClient>,
    notifications: NotificationCenter,
    state: Arc<Mutex<DashboardState>>,
    seq: Arc<AtomicU64>,
    regions: ReportRegions,
}

impl ReportsDashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_parts(
            Arc::new(BackendClient::from_config(config)),
            NotificationCenter::from_config(config),
        )
    }

    /// Build around an existing client/notification pair, e.g. when
    /// both dashboards share one toast region.
    pub fn with_parts(client: Arc<BackendClient>, notifications: NotificationCenter) -> Self {
        Self {
            client,
            notifications,
            state: Arc::new(Mutex::new(DashboardState::Idle)),
            seq: Arc::new(AtomicU64::new(0)),
            regions: ReportRegions::new(),
        }
    }

    pub fn regions(&self) -> &ReportRegions {
        &self.regions
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub async fn state(&self) -> DashboardState {
        *self.state.lock().await
    }

    /// Loads the three single-date reports concurrently.
    ///
    /// On invalid input no fetch is issued: the error surfaces as a
    /// toast and the controller settles back to idle.
    pub async fn load_single_date(&self, raw_date: &str) -> Result<(), ValidationError> {
        self.set_state(DashboardState::Validating).await;

        let query = match parse_single_date(raw_date) {
            Ok(query) => query,
            Err(err) => return Err(self.reject(err).await),
        };

        if let Some(date) = query.as_single_date() {
            let ticket = self.next_ticket();
            self.set_state(DashboardState::Loading).await;
            self.regions.therapist_appointments.lock().await.set_loading();
            self.regions.patients_by_therapist.lock().await.set_loading();
            self.regions.daily_cash.lock().await.set_loading();

            tokio::join!(
                self.pipeline(ticket, ReportKind::TherapistAppointments, async {
                    fetch::therapist_appointments(&self.client, date)
                        .await
                        .map(ReportResult::TherapistAppointments)
                }),
                self.pipeline(ticket, ReportKind::PatientsByTherapist, async {
                    fetch::patients_by_therapist(&self.client, date)
                        .await
                        .map(ReportResult::PatientsByTherapist)
                }),
                self.pipeline(ticket, ReportKind::DailyCash, async {
                    fetch::daily_cash(&self.client, date)
                        .await
                        .map(ReportResult::DailyCash)
                }),
            );

            self.settle(ticket, format!("Reportes cargados para el {}", display_date(date)))
                .await;
        }

        Ok(())
    }

    /// Loads the appointments-between-dates report.
    pub async fn load_date_range(
        &self,
        raw_start: &str,
        raw_end: &str,
    ) -> Result<(), ValidationError> {
        self.set_state(DashboardState::Validating).await;

        let query = match parse_date_range(raw_start, raw_end) {
            Ok(query) => query,
            Err(err) => return Err(self.reject(err).await),
        };

        if let Some((start, end)) = query.as_date_range() {
            let ticket = self.next_ticket();
            self.set_state(DashboardState::Loading).await;
            self.regions.date_range_appointments.lock().await.set_loading();

            self.pipeline(ticket, ReportKind::DateRangeAppointments, async {
                fetch::appointments_between_dates(&self.client, start, end)
                    .await
                    .map(ReportResult::DateRangeAppointments)
            })
            .await;

            self.settle(
                ticket,
                format!(
                    "Citas cargadas del {} al {}",
                    display_date(start),
                    display_date(end)
                ),
            )
            .await;
        }

        Ok(())
    }

    /// Export link for one report against this dashboard's backend.
    /// The shell opens it in a new browser view; nothing is fetched.
    pub fn export_link(
        &self,
        kind: ReportKind,
        query: &ReportQuery,
    ) -> Result<String, ExportError> {
        export_url(&self.client, kind, query)
    }

    /// One independent fetch+render pipeline.
    async fn pipeline(
        &self,
        ticket: u64,
        kind: ReportKind,
        fetch: impl Future<Output = Result<ReportResult, FetchError>>,
    ) {
        let outcome = fetch.await;

        if !self.is_current(ticket) {
            tracing::debug!(?kind, ticket, "discarding superseded report response");
            return;
        }

        let region = self.region_for(kind);
        match outcome {
            Ok(result) => {
                tracing::debug!(?kind, empty = result.is_empty(), "report rendered");
                render_report(&mut *region.lock().await, &result);
            }
            Err(err) => {
                tracing::error!(?kind, error = %err, "report load failed");
                render_error_placeholder(&mut *region.lock().await, kind);
                self.notifications
                    .notify(err.user_message(), Severity::Error)
                    .await;
            }
        }
    }

    fn region_for(&self, kind: ReportKind) -> &SharedRegion {
        match kind {
            ReportKind::TherapistAppointments => &self.regions.therapist_appointments,
            ReportKind::PatientsByTherapist => &self.regions.patients_by_therapist,
            ReportKind::DailyCash => &self.regions.daily_cash,
            ReportKind::DateRangeAppointments => &self.regions.date_range_appointments,
        }
    }

    async fn reject(&self, err: ValidationError) -> ValidationError {
        tracing::warn!(error = %err, "rejected date input");
        self.notifications
            .notify(err.user_message(), Severity::Error)
            .await;
        self.set_state(DashboardState::Idle).await;
        err
    }

    /// All pipelines of `ticket` settled: back to idle with a success
    /// toast, unless a newer load owns the dashboard by now.
    async fn settle(&self, ticket: u64, message: String) {
        if !self.is_current(ticket) {
            tracing::debug!(ticket, "superseded load settled, leaving state alone");
            return;
        }
        self.set_state(DashboardState::Idle).await;
        self.notifications.notify(message, Severity::Success).await;
    }

    fn next_ticket(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket
    }

    async fn set_state(&self, state: DashboardState) {
        *self.state.lock().await = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::time::Duration;

    use axum::extract::Query;
    use axum::routing::get;
    use axum::Router;

    use crate::view::region::RegionStatus;

    async fn spawn_stub(router: Router) -> ReportsDashboard {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub serve");
        });

        let config = DashboardConfig::with_base_url(&format!("http://{addr}"));
        ReportsDashboard::new(&config)
    }

    fn happy_router() -> Router {
        Router::new()
            .route(
                "/reports/appointments-per-therapist/",
                get(|| async {
                    r#"{"total_appointments_count":2,
                        "therapists_appointments":[
                            {"name":"Ana","paternal_lastname":"Quispe",
                             "maternal_lastname":"","appointments_count":2}]}"#
                }),
            )
            .route(
                "/reports/patients-by-therapist/",
                get(|| async {
                    r#"[{"therapist":"Quispe Ana",
                         "patients":[{"patient":"Flores Luis","appointments":2}]}]"#
                }),
            )
            .route(
                "/reports/daily-cash/",
                get(|| async { r#"[{"payment_type":"EFECTIVO","total_payment":70.0}]"# }),
            )
    }

    #[tokio::test]
    async fn single_date_load_renders_all_regions() {
        let dashboard = spawn_stub(happy_router()).await;

        dashboard.load_single_date("2024-03-10").await.unwrap();

        assert_eq!(dashboard.state().await, DashboardState::Idle);
        let regions = dashboard.regions();
        assert_eq!(
            regions.therapist_appointments.lock().await.status(),
            RegionStatus::Ready
        );
        assert_eq!(
            regions.patients_by_therapist.lock().await.status(),
            RegionStatus::Ready
        );
        assert_eq!(regions.daily_cash.lock().await.status(), RegionStatus::Ready);

        let toasts = dashboard.notifications().visible().await;
        assert!(toasts
            .iter()
            .any(|n| n.severity == Severity::Success
                && n.message.starts_with("Reportes cargados para el ")));
    }

    #[tokio::test]
    async fn invalid_date_issues_no_fetch() {
        // Client points at a dead port: any issued fetch would flip a
        // region to Failed. Regions staying Empty proves no call left.
        let config = DashboardConfig::with_base_url("http://127.0.0.1:1");
        let dashboard = ReportsDashboard::new(&config);

        let err = dashboard.load_single_date("10/03/2024").await.unwrap_err();
        assert!(matches!(err, ValidationError::MalformedDate(_)));
        assert_eq!(dashboard.state().await, DashboardState::Idle);

        let regions = dashboard.regions();
        assert_eq!(
            regions.therapist_appointments.lock().await.status(),
            RegionStatus::Empty
        );
        assert_eq!(regions.daily_cash.lock().await.status(), RegionStatus::Empty);

        let toasts = dashboard.notifications().visible().await;
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Formato de fecha inválido");
        assert_eq!(toasts[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn failing_report_never_aborts_siblings() {
        let router = Router::new()
            .route(
                "/reports/appointments-per-therapist/",
                get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/reports/patients-by-therapist/",
                get(|| async { "[]" }),
            )
            .route(
                "/reports/daily-cash/",
                get(|| async { r#"[{"payment_type":"Yape","total_payment":25.0}]"# }),
            );
        let dashboard = spawn_stub(router).await;

        dashboard.load_single_date("2024-03-10").await.unwrap();

        let regions = dashboard.regions();
        let therapist = regions.therapist_appointments.lock().await;
        assert_eq!(therapist.status(), RegionStatus::Failed);
        assert!(therapist.html().contains("Error al cargar los datos"));
        drop(therapist);

        // Siblings reflect their own outcomes.
        let patients = regions.patients_by_therapist.lock().await;
        assert_eq!(patients.status(), RegionStatus::Ready);
        assert!(patients.html().contains("No hay pacientes"));
        drop(patients);

        let cash = regions.daily_cash.lock().await;
        assert_eq!(cash.status(), RegionStatus::Ready);
        assert!(cash.html().contains("S/. 25.00"));
        drop(cash);

        assert_eq!(dashboard.state().await, DashboardState::Idle);
        let toasts = dashboard.notifications().visible().await;
        assert!(toasts.iter().any(|n| n.severity == Severity::Error
            && n.message == "Error interno del servidor. Contacta al administrador."));
    }

    #[tokio::test]
    async fn date_range_load_renders_summary() {
        let router = Router::new().route(
            "/reports/appointments-between-dates/",
            get(|| async {
                r#"[{"appointment_date":"2024-03-05","appointment_hour":"10:00",
                     "therapist":"Quispe Ana","patient":"Flores Luis",
                     "payment":35.0,"payment_type":"EFECTIVO"}]"#
            }),
        );
        let dashboard = spawn_stub(router).await;

        dashboard
            .load_date_range("2024-03-01", "2024-03-10")
            .await
            .unwrap();

        let region = dashboard.regions().date_range_appointments.lock().await;
        assert_eq!(region.status(), RegionStatus::Ready);
        assert!(region.html().contains("Total (1 citas)"));
        assert!(region.html().contains("S/. 35.00"));
    }

    #[tokio::test]
    async fn inverted_range_rejected_before_fetch() {
        let config = DashboardConfig::with_base_url("http://127.0.0.1:1");
        let dashboard = ReportsDashboard::new(&config);

        let err = dashboard
            .load_date_range("2024-03-10", "2024-03-01")
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
        assert_eq!(
            dashboard
                .regions()
                .date_range_appointments
                .lock()
                .await
                .status(),
            RegionStatus::Empty
        );
    }

    #[tokio::test]
    async fn superseded_load_never_overwrites_newer_render() {
        // The first load's daily-cash response is slow; the re-trigger
        // answers immediately. The slow response must be discarded.
        let router = Router::new()
            .route(
                "/reports/appointments-per-therapist/",
                get(|| async { r#"{"total_appointments_count":0,"therapists_appointments":[]}"# }),
            )
            .route("/reports/patients-by-therapist/", get(|| async { "[]" }))
            .route(
                "/reports/daily-cash/",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    if params.get("date").map(String::as_str) == Some("2024-03-09") {
                        tokio::time::sleep(Duration::from_millis(300)).await;
                        r#"[{"payment_type":"EFECTIVO","total_payment":1.0}]"#
                    } else {
                        r#"[{"payment_type":"Yape","total_payment":2.0}]"#
                    }
                }),
            );
        let dashboard = spawn_stub(router).await;

        // Polling order of join! hands the slow load the older ticket.
        let (first, second) = tokio::join!(
            dashboard.load_single_date("2024-03-09"),
            dashboard.load_single_date("2024-03-10"),
        );
        first.unwrap();
        second.unwrap();

        let cash = dashboard.regions().daily_cash.lock().await;
        assert_eq!(cash.status(), RegionStatus::Ready);
        assert!(cash.html().contains("Yape"), "latest load wins");
        assert!(!cash.html().contains("EFECTIVO"), "stale response discarded");
        drop(cash);

        assert_eq!(dashboard.state().await, DashboardState::Idle);
    }

    #[tokio::test]
    async fn export_link_targets_dashboard_backend() {
        let config = DashboardConfig::with_base_url("http://localhost:8000");
        let dashboard = ReportsDashboard::new(&config);

        let query = parse_single_date("2024-03-10").unwrap();
        let url = dashboard
            .export_link(ReportKind::DailyCash, &query)
            .unwrap();
        assert_eq!(
            url,
            "http://localhost:8000/reports/pdf/resumen-caja/?date=2024-03-10"
        );
    }

    #[tokio::test]
    async fn all_reports_failing_still_settles_idle() {
        let dashboard = {
            let config = DashboardConfig::with_base_url("http://127.0.0.1:1");
            ReportsDashboard::new(&config)
        };

        dashboard.load_single_date("2024-03-10").await.unwrap();

        assert_eq!(dashboard.state().await, DashboardState::Idle);
        let regions = dashboard.regions();
        for region in [
            &regions.therapist_appointments,
            &regions.patients_by_therapist,
            &regions.daily_cash,
        ] {
            assert_eq!(region.lock().await.status(), RegionStatus::Failed);
        }
    }
}
