//! Typed fetchers for the report endpoints.
//!
//! One function per endpoint, pairing the path with its payload type
//! so the wire schema is enforced the moment the body is decoded.

use chrono::NaiveDate;

use crate::client::{BackendClient, FetchError};

use super::types::{CashEntry, RangeAppointment, TherapistAppointmentsReport, TherapistPatients};

pub const APPOINTMENTS_PER_THERAPIST: &str = "reports/appointments-per-therapist/";
pub const PATIENTS_BY_THERAPIST: &str = "reports/patients-by-therapist/";
pub const DAILY_CASH: &str = "reports/daily-cash/";
pub const APPOINTMENTS_BETWEEN_DATES: &str = "reports/appointments-between-dates/";

pub async fn therapist_appointments(
    client: &BackendClient,
    date: NaiveDate,
) -> Result<TherapistAppointmentsReport, FetchError> {
    client
        .get_json(APPOINTMENTS_PER_THERAPIST, &[("date", &date.to_string())])
        .await
}

pub async fn patients_by_therapist(
    client: &BackendClient,
    date: NaiveDate,
) -> Result<Vec<TherapistPatients>, FetchError> {
    client
        .get_json(PATIENTS_BY_THERAPIST, &[("date", &date.to_string())])
        .await
}

pub async fn daily_cash(
    client: &BackendClient,
    date: NaiveDate,
) -> Result<Vec<CashEntry>, FetchError> {
    client
        .get_json(DAILY_CASH, &[("date", &date.to_string())])
        .await
}

pub async fn appointments_between_dates(
    client: &BackendClient,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RangeAppointment>, FetchError> {
    client
        .get_json(
            APPOINTMENTS_BETWEEN_DATES,
            &[
                ("start_date", &start.to_string()),
                ("end_date", &end.to_string()),
            ],
        )
        .await
}
