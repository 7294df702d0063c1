//! Renderers for the four report kinds.
//!
//! One function per kind, each writing a complete fragment into its
//! region. Rendering always replaces the whole fragment, so a render
//! with new data leaves nothing from the previous payload behind. An
//! empty result renders a single placeholder row/message, never an
//! empty container.

use crate::view::format::{currency, display_date, percentage};
use crate::view::html::escape;
use crate::view::region::Region;

use super::types::{
    CashEntry, RangeAppointment, ReportKind, ReportResult, TherapistAppointmentsReport,
    TherapistPatients,
};

/// Dispatches a decoded result to its kind's renderer.
pub fn render_report(region: &mut Region, result: &ReportResult) {
    match result {
        ReportResult::TherapistAppointments(report) => {
            render_therapist_appointments(region, report)
        }
        ReportResult::PatientsByTherapist(groups) => render_patients_by_therapist(region, groups),
        ReportResult::DailyCash(entries) => render_daily_cash(region, entries),
        ReportResult::DateRangeAppointments(rows) => render_date_range(region, rows),
    }
}

/// Error placeholder for a failed pipeline, per kind.
pub fn render_error_placeholder(region: &mut Region, kind: ReportKind) {
    let placeholder = match kind {
        ReportKind::TherapistAppointments => {
            let mut html = total_line(0);
            html.push_str(&appointments_table(
                r#"<tr class="no-data"><td colspan="3">Error al cargar los datos</td></tr>"#,
            ));
            html
        }
        ReportKind::PatientsByTherapist => {
            r#"<p class="no-data-message">Error al cargar los pacientes</p>"#.to_string()
        }
        ReportKind::DailyCash => {
            r#"<p class="no-data-message">Error al cargar el resumen de caja</p>"#.to_string()
        }
        ReportKind::DateRangeAppointments => range_table(
            r#"<tr class="no-data"><td colspan="6">Error al cargar las citas</td></tr>"#,
        ),
    };
    region.fail(placeholder);
}

pub fn render_therapist_appointments(region: &mut Region, report: &TherapistAppointmentsReport) {
    region.clear();

    let total = report.total_appointments_count;
    let mut html = total_line(total);

    if report.therapists_appointments.is_empty() {
        html.push_str(&appointments_table(
            r#"<tr class="no-data"><td colspan="3">No hay datos para esta fecha</td></tr>"#,
        ));
        region.render(html);
        return;
    }

    let mut body = String::new();
    for therapist in &report.therapists_appointments {
        let name = escape(&therapist.display_name());
        body.push_str(&format!(
            r#"<tr><td title="{name}">{name}</td><td><span class="badge">{count}</span></td><td><span class="percentage">{share}</span></td></tr>"#,
            count = therapist.appointments_count,
            share = percentage(therapist.appointments_count, total),
        ));
    }
    html.push_str(&appointments_table(&body));
    region.render(html);
}

pub fn render_patients_by_therapist(region: &mut Region, groups: &[TherapistPatients]) {
    region.clear();

    if groups.is_empty() {
        region.render(
            r#"<p class="no-data-message">No hay pacientes para esta fecha</p>"#.to_string(),
        );
        return;
    }

    let mut html = String::new();
    for group in groups {
        let mut patients = String::new();
        for patient in &group.patients {
            let name = escape(&patient.patient);
            patients.push_str(&format!(
                r#"<div class="patient-item"><span class="patient-name" title="{name}">{name}</span><span class="patient-appointments">{count}</span></div>"#,
                count = citas(patient.appointments),
            ));
        }

        html.push_str(&format!(
            r#"<div class="therapist-group"><h4 class="therapist-name">{therapist} <span class="patient-count">{npatients} pacientes - {ncitas} citas</span></h4><div class="patients-list">{patients}</div></div>"#,
            therapist = escape(&group.therapist),
            npatients = group.patients.len(),
            ncitas = group.total_appointments(),
        ));
    }
    region.render(html);
}

pub fn render_daily_cash(region: &mut Region, entries: &[CashEntry]) {
    region.clear();

    if entries.is_empty() {
        region.render(
            r#"<p class="no-data-message">No hay movimientos de caja para esta fecha</p>"#
                .to_string(),
        );
        return;
    }

    // Grand total recomputed from the rendered rows, every render.
    let total: f64 = entries.iter().map(|e| e.total_payment).sum();

    let mut items = String::new();
    for entry in entries {
        items.push_str(&format!(
            r#"<div class="cash-item"><span class="payment-type">{kind}</span><span class="payment-amount">{amount}</span></div>"#,
            kind = escape(&entry.payment_type),
            amount = currency(entry.total_payment),
        ));
    }

    region.render(format!(
        r#"<div class="cash-items">{items}</div><div class="cash-total"><strong>Total del día: {total}</strong></div>"#,
        total = currency(total),
    ));
}

pub fn render_date_range(region: &mut Region, rows: &[RangeAppointment]) {
    region.clear();

    if rows.is_empty() {
        region.render(range_table(
            r#"<tr class="no-data"><td colspan="6">No hay citas en este rango de fechas</td></tr>"#,
        ));
        return;
    }

    let mut body = String::new();
    for row in rows {
        let therapist = escape(&row.therapist);
        let patient = escape(&row.patient);
        body.push_str(&format!(
            r#"<tr><td>{date}</td><td>{hour}</td><td title="{therapist}">{therapist}</td><td title="{patient}">{patient}</td><td class="payment-cell">{payment}</td><td><span class="payment-type-badge">{kind}</span></td></tr>"#,
            date = display_date(row.appointment_date),
            hour = escape(&row.appointment_hour),
            payment = currency(row.payment),
            kind = escape(&row.payment_type),
        ));
    }

    let total: f64 = rows.iter().map(|r| r.payment).sum();
    body.push_str(&format!(
        r#"<tr class="summary-row"><td colspan="4"><strong>Total ({count} citas)</strong></td><td class="payment-cell"><strong>{total}</strong></td><td></td></tr>"#,
        count = rows.len(),
        total = currency(total),
    ));

    region.render(range_table(&body));
}

fn citas(count: u32) -> String {
    if count == 1 {
        "1 cita".to_string()
    } else {
        format!("{count} citas")
    }
}

fn total_line(total: u32) -> String {
    format!(r#"<div class="report-total">Total de citas: <strong>{total}</strong></div>"#)
}

fn appointments_table(body: &str) -> String {
    format!(
        r#"<table class="report-table"><thead><tr><th>Terapeuta</th><th>Citas</th><th>%</th></tr></thead><tbody>{body}</tbody></table>"#
    )
}

fn range_table(body: &str) -> String {
    format!(
        r#"<table class="report-table"><thead><tr><th>Fecha</th><th>Hora</th><th>Terapeuta</th><th>Paciente</th><th>Pago</th><th>Tipo</th></tr></thead><tbody>{body}</tbody></table>"#
    )
}
