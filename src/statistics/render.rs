//! Renders the statistics summary: metric tiles, four charts and the
//! per-therapist list.

use crate::view::format::currency;
use crate::view::html::escape;
use crate::view::region::Region;
use crate::view::RenderError;

use super::charts::{ChartKind, ChartRegistry, ChartSlot, ChartSpec};
use super::types::StatisticsSummary;

/// Renders the whole summary. Regions and charts are fully replaced;
/// nothing from the previous period survives.
pub fn render_statistics(
    tiles: &mut Region,
    therapists: &mut Region,
    charts: &mut ChartRegistry,
    summary: &StatisticsSummary,
) -> Result<(), RenderError> {
    render_metric_tiles(tiles, summary);
    mount_charts(charts, summary)?;
    render_therapist_list(therapists, &summary.therapists);
    Ok(())
}

fn render_metric_tiles(region: &mut Region, summary: &StatisticsSummary) {
    region.clear();
    region.render(format!(
        r#"<div class="metric-card"><span class="metric-value">{patients}</span><span class="metric-label">Pacientes</span></div><div class="metric-card"><span class="metric-value">{sessions}</span><span class="metric-label">Sesiones</span></div><div class="metric-card"><span class="metric-value">{earnings}</span><span class="metric-label">Ganancias</span></div>"#,
        patients = summary.totals.patients,
        sessions = summary.totals.sessions,
        earnings = currency(summary.totals.earnings),
    ));
}

fn mount_charts(charts: &mut ChartRegistry, summary: &StatisticsSummary) -> Result<(), RenderError> {
    let income = ChartSpec::new(
        ChartSlot::IncomeByDay,
        ChartKind::Bar,
        summary.income_by_day.keys().cloned().collect(),
        summary.income_by_day.values().copied().collect(),
    )?
    .with_dataset_label("Ingresos (S/)");
    charts.mount(ChartSlot::IncomeByDay, income);

    let sessions = ChartSpec::new(
        ChartSlot::SessionsByDay,
        ChartKind::Line,
        summary.sessions_by_day.keys().cloned().collect(),
        summary.sessions_by_day.values().map(|&v| v as f64).collect(),
    )?
    .with_dataset_label("Sesiones");
    charts.mount(ChartSlot::SessionsByDay, sessions);

    // An empty payment map leaves the slot unmounted; the canvas shows
    // its no-data text instead of a zero-slice doughnut.
    if summary.payment_types.is_empty() {
        charts.unmount(ChartSlot::PaymentTypes);
    } else {
        let payments = ChartSpec::new(
            ChartSlot::PaymentTypes,
            ChartKind::Doughnut,
            summary.payment_types.keys().cloned().collect(),
            summary.payment_types.values().copied().collect(),
        )?;
        charts.mount(ChartSlot::PaymentTypes, payments);
    }

    let patients = ChartSpec::new(
        ChartSlot::PatientTypes,
        ChartKind::Pie,
        vec!["Tipo C".to_string(), "Tipo CC".to_string()],
        vec![
            summary.patient_types.c as f64,
            summary.patient_types.cc as f64,
        ],
    )?;
    charts.mount(ChartSlot::PatientTypes, patients);

    Ok(())
}

fn render_therapist_list(region: &mut Region, therapists: &[super::types::TherapistStats]) {
    region.clear();

    if therapists.is_empty() {
        region.render(
            r#"<p class="no-data-message">No hay datos de terapeutas en el período seleccionado</p>"#
                .to_string(),
        );
        return;
    }

    let mut html = String::new();
    for therapist in therapists {
        html.push_str(&format!(
            r#"<div class="therapist-card"><div class="therapist-info"><div class="therapist-name">{name}</div><div class="therapist-stats"><span>📅 {sessions} sesiones</span><span>💰 {income}</span></div></div><div class="therapist-rating">⭐ {rating}/5</div></div>"#,
            name = escape(&therapist.name),
            sessions = therapist.sessions,
            income = currency(therapist.income),
            rating = therapist.rating,
        ));
    }
    region.render(html);
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::view::region::RegionStatus;

    fn summary(body: &str) -> StatisticsSummary {
        serde_json::from_str(body).unwrap()
    }

    fn render_all(body: &str) -> (Region, Region, ChartRegistry) {
        let mut tiles = Region::new("metric-tiles");
        let mut therapists = Region::new("therapists-list");
        let mut charts = ChartRegistry::new();
        render_statistics(&mut tiles, &mut therapists, &mut charts, &summary(body)).unwrap();
        (tiles, therapists, charts)
    }

    const FULL_BODY: &str = r#"{
        "metricas": {"ttlpacientes": 12, "ttlsesiones": 48, "ttlganancias": 1690.5},
        "ingresos": {"2024-03-01": 120.0, "2024-03-02": 85.5},
        "sesiones": {"2024-03-01": 4, "2024-03-02": 3},
        "tipos_pago": {"EFECTIVO": 140.0, "Yape": 65.5},
        "tipos_pacientes": {"c": 9, "cc": 3},
        "terapeutas": [
            {"terapeuta": "Quispe Mamani Ana", "sesiones": 30, "ingresos": 900.0, "raiting": 4.5}
        ]
    }"#;

    #[test]
    fn tiles_show_headline_metrics() {
        let (tiles, _, _) = render_all(FULL_BODY);
        assert_eq!(tiles.status(), RegionStatus::Ready);
        assert!(tiles.html().contains(">12<"));
        assert!(tiles.html().contains(">48<"));
        assert!(tiles.html().contains("S/. 1690.50"));
    }

    #[test]
    fn all_four_charts_mounted() {
        let (_, _, charts) = render_all(FULL_BODY);
        assert_eq!(charts.len(), 4);

        let income = charts.get(ChartSlot::IncomeByDay).unwrap();
        assert_eq!(income.kind, ChartKind::Bar);
        assert_eq!(income.labels, ["2024-03-01", "2024-03-02"]);
        assert_eq!(income.values, [120.0, 85.5]);

        let patients = charts.get(ChartSlot::PatientTypes).unwrap();
        assert_eq!(patients.kind, ChartKind::Pie);
        assert_eq!(patients.values, [9.0, 3.0]);
    }

    #[test]
    fn empty_payment_map_leaves_slot_unmounted() {
        let (_, _, charts) = render_all(r#"{"metricas":{}}"#);
        assert!(charts.get(ChartSlot::PaymentTypes).is_none());
        // The other three still mount (possibly with empty datasets).
        assert_eq!(charts.len(), 3);
    }

    #[test]
    fn remount_replaces_previous_period() {
        let mut tiles = Region::new("metric-tiles");
        let mut therapists = Region::new("therapists-list");
        let mut charts = ChartRegistry::new();

        render_statistics(&mut tiles, &mut therapists, &mut charts, &summary(FULL_BODY)).unwrap();
        render_statistics(
            &mut tiles,
            &mut therapists,
            &mut charts,
            &summary(r#"{"metricas":{"ttlpacientes":1},"ingresos":{"2024-04-01":10.0}}"#),
        )
        .unwrap();

        let income = charts.get(ChartSlot::IncomeByDay).unwrap();
        assert_eq!(income.labels, ["2024-04-01"]);
        assert!(tiles.html().contains(">1<"));
        assert!(!tiles.html().contains(">12<"));
        assert!(charts.get(ChartSlot::PaymentTypes).is_none(), "unmounted on re-render");
    }

    #[test]
    fn therapist_list_renders_cards() {
        let (_, therapists, _) = render_all(FULL_BODY);
        let html = therapists.html();
        assert!(html.contains("Quispe Mamani Ana"));
        assert!(html.contains("📅 30 sesiones"));
        assert!(html.contains("💰 S/. 900.00"));
        assert!(html.contains("⭐ 4.5/5"));
    }

    #[test]
    fn empty_therapists_render_placeholder() {
        let (_, therapists, _) = render_all(r#"{"metricas":{}}"#);
        assert!(therapists
            .html()
            .contains("No hay datos de terapeutas en el período seleccionado"));
    }
}
