//! Wire payloads for the four report endpoints.
//!
//! Each endpoint gets a typed schema decoded at the fetch boundary;
//! the [`ReportResult`] union is what renderers dispatch on. Field
//! names follow the backend contract.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// The four fixed dashboard data views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    TherapistAppointments,
    PatientsByTherapist,
    DailyCash,
    DateRangeAppointments,
}

impl ReportKind {
    /// Region name, stable across renders.
    pub fn region_name(&self) -> &'static str {
        match self {
            ReportKind::TherapistAppointments => "therapist-appointments",
            ReportKind::PatientsByTherapist => "patients-by-therapist",
            ReportKind::DailyCash => "daily-cash",
            ReportKind::DateRangeAppointments => "date-range-appointments",
        }
    }
}

/// Decoded payload of one report, tagged by kind.
#[derive(Debug, Clone)]
pub enum ReportResult {
    TherapistAppointments(TherapistAppointmentsReport),
    PatientsByTherapist(Vec<TherapistPatients>),
    DailyCash(Vec<CashEntry>),
    DateRangeAppointments(Vec<RangeAppointment>),
}

impl ReportResult {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportResult::TherapistAppointments(_) => ReportKind::TherapistAppointments,
            ReportResult::PatientsByTherapist(_) => ReportKind::PatientsByTherapist,
            ReportResult::DailyCash(_) => ReportKind::DailyCash,
            ReportResult::DateRangeAppointments(_) => ReportKind::DateRangeAppointments,
        }
    }

    /// Zero rows/entries. Empty results still render, as a placeholder.
    pub fn is_empty(&self) -> bool {
        match self {
            ReportResult::TherapistAppointments(report) => {
                report.therapists_appointments.is_empty()
            }
            ReportResult::PatientsByTherapist(groups) => groups.is_empty(),
            ReportResult::DailyCash(entries) => entries.is_empty(),
            ReportResult::DateRangeAppointments(rows) => rows.is_empty(),
        }
    }
}

/// `reports/appointments-per-therapist/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TherapistAppointmentsReport {
    #[serde(default)]
    pub total_appointments_count: u32,
    #[serde(default)]
    pub therapists_appointments: Vec<TherapistCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TherapistCount {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub paternal_lastname: String,
    #[serde(default)]
    pub maternal_lastname: String,
    pub appointments_count: u32,
}

impl TherapistCount {
    /// Lastname-first display name, skipping empty parts the way the
    /// backend leaves them for incomplete records.
    pub fn display_name(&self) -> String {
        [
            self.paternal_lastname.as_str(),
            self.maternal_lastname.as_str(),
            self.name.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// One group of the `reports/patients-by-therapist/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TherapistPatients {
    pub therapist: String,
    #[serde(default)]
    pub patients: Vec<PatientCount>,
}

impl TherapistPatients {
    /// Appointments summed over this group's patients, recomputed on
    /// every render.
    pub fn total_appointments(&self) -> u32 {
        self.patients.iter().map(|p| p.appointments).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientCount {
    pub patient: String,
    pub appointments: u32,
}

/// One row of the `reports/daily-cash/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CashEntry {
    pub payment_type: String,
    #[serde(deserialize_with = "de_money")]
    pub total_payment: f64,
}

/// One row of the `reports/appointments-between-dates/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeAppointment {
    pub appointment_date: NaiveDate,
    pub appointment_hour: String,
    pub therapist: String,
    pub patient: String,
    #[serde(deserialize_with = "de_money")]
    pub payment: f64,
    pub payment_type: String,
}

/// Money arrives as a JSON number, but decimal fields have shipped as
/// numeric strings from other serializer configurations; both decode.
pub(crate) fn de_money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct MoneyVisitor;

    impl serde::de::Visitor<'_> for MoneyVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(MoneyVisitor)
}
