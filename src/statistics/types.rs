//! Wire payload of the statistics endpoint.
//!
//! The backend speaks Spanish field names; they are mapped onto
//! English struct fields here and nowhere else.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::reports::types::de_money;

/// `statistics/statistics/metricas/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsSummary {
    #[serde(rename = "metricas")]
    pub totals: MetricTotals,
    /// Income per day, keyed by ISO date (sorted = chronological).
    #[serde(rename = "ingresos", default)]
    pub income_by_day: BTreeMap<String, f64>,
    /// Sessions per day, keyed by ISO date.
    #[serde(rename = "sesiones", default)]
    pub sessions_by_day: BTreeMap<String, u32>,
    /// Collected amount per payment type.
    #[serde(rename = "tipos_pago", default)]
    pub payment_types: BTreeMap<String, f64>,
    #[serde(rename = "tipos_pacientes", default)]
    pub patient_types: PatientTypeSplit,
    #[serde(rename = "terapeutas", default)]
    pub therapists: Vec<TherapistStats>,
}

/// Headline tiles for the selected period.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricTotals {
    #[serde(rename = "ttlpacientes", default)]
    pub patients: u32,
    #[serde(rename = "ttlsesiones", default)]
    pub sessions: u32,
    #[serde(rename = "ttlganancias", default, deserialize_with = "de_money")]
    pub earnings: f64,
}

/// Patient split between the two billing categories.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PatientTypeSplit {
    #[serde(default)]
    pub c: u32,
    #[serde(default)]
    pub cc: u32,
}

/// Per-therapist figures for the selected period.
#[derive(Debug, Clone, Deserialize)]
pub struct TherapistStats {
    #[serde(rename = "terapeuta")]
    pub name: String,
    #[serde(rename = "sesiones", default)]
    pub sessions: u32,
    #[serde(rename = "ingresos", default, deserialize_with = "de_money")]
    pub income: f64,
    // "raiting" is the backend's spelling; it is the wire contract.
    #[serde(rename = "raiting", default)]
    pub rating: f64,
}
