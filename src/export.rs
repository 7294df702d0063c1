//! Export link construction.
//!
//! Exports are fire-and-forget navigations the shell opens in a new
//! browser view; they never flow through the fetch pipeline. The
//! PDF/Excel paths are derived from the JSON endpoint paths by segment
//! substitution, which is the backend's own URL scheme.

use thiserror::Error;

use crate::client::BackendClient;
use crate::query::ReportQuery;
use crate::reports::fetch::{
    APPOINTMENTS_BETWEEN_DATES, APPOINTMENTS_PER_THERAPIST, DAILY_CASH, PATIENTS_BY_THERAPIST,
};
use crate::reports::types::ReportKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Excel,
}

/// Export format offered for each report kind.
pub fn export_format(kind: ReportKind) -> ExportFormat {
    match kind {
        ReportKind::TherapistAppointments
        | ReportKind::PatientsByTherapist
        | ReportKind::DailyCash => ExportFormat::Pdf,
        ReportKind::DateRangeAppointments => ExportFormat::Excel,
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("report {0:?} exports from a {1} query")]
    QueryMismatch(ReportKind, &'static str),
}

/// Absolute export URL for one report and a validated query of the
/// matching kind.
pub fn export_url(
    client: &BackendClient,
    kind: ReportKind,
    query: &ReportQuery,
) -> Result<String, ExportError> {
    match kind {
        ReportKind::TherapistAppointments | ReportKind::PatientsByTherapist | ReportKind::DailyCash => {
            let date = query
                .as_single_date()
                .ok_or(ExportError::QueryMismatch(kind, "single-date"))?;
            let path = match kind {
                ReportKind::TherapistAppointments => APPOINTMENTS_PER_THERAPIST
                    .replace("appointments-per-therapist", "pdf/citas-terapeuta"),
                ReportKind::PatientsByTherapist => {
                    PATIENTS_BY_THERAPIST.replace("patients-by-therapist", "pdf/pacientes-terapeuta")
                }
                _ => DAILY_CASH.replace("daily-cash", "pdf/resumen-caja"),
            };
            Ok(format!("{}?date={date}", client.url_for(&path)))
        }
        ReportKind::DateRangeAppointments => {
            let (start, end) = query
                .as_date_range()
                .ok_or(ExportError::QueryMismatch(kind, "date-range"))?;
            let path = APPOINTMENTS_BETWEEN_DATES
                .replace("appointments-between-dates", "excel/citas-rango");
            Ok(format!(
                "{}?start_date={start}&end_date={end}",
                client.url_for(&path)
            ))
        }
    }
}
