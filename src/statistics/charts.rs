//! Chart specifications and the per-dashboard chart registry.
//!
//! The webview owns the live canvas objects; this side owns what each
//! canvas should display. The registry maps chart slot to the current
//! spec, and mounting a slot replaces whatever was there, so a
//! re-render can never stack a second chart onto the same canvas.

use std::collections::HashMap;

use serde::Serialize;

use crate::view::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
    Pie,
}

/// The four fixed canvases of the statistics dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    IncomeByDay,
    SessionsByDay,
    PaymentTypes,
    PatientTypes,
}

impl ChartSlot {
    /// Canvas element id in the statistics template.
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::IncomeByDay => "ingresosChart",
            ChartSlot::SessionsByDay => "sesionesChart",
            ChartSlot::PaymentTypes => "pagoChart",
            ChartSlot::PatientTypes => "pacientesChart",
        }
    }
}

/// Everything the webview needs to draw one chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_label: Option<String>,
}

impl ChartSpec {
    /// Builds a spec, rejecting label/value arity mismatches — the one
    /// shape error the wire schema cannot rule out, since labels and
    /// values are often assembled from different payload sections.
    pub fn new(
        slot: ChartSlot,
        kind: ChartKind,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self, RenderError> {
        if labels.len() != values.len() {
            return Err(RenderError::ChartArity {
                slot: slot.canvas_id(),
                labels: labels.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            kind,
            labels,
            values,
            dataset_label: None,
        })
    }

    pub fn with_dataset_label(mut self, label: impl Into<String>) -> Self {
        self.dataset_label = Some(label.into());
        self
    }
}

/// Owned registry of live chart specs, keyed by slot.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    slots: HashMap<ChartSlot, ChartSpec>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a spec into a slot, destroying any prior instance.
    /// Returns whether a prior instance was replaced.
    pub fn mount(&mut self, slot: ChartSlot, spec: ChartSpec) -> bool {
        let prior = self.slots.insert(slot, spec);
        if prior.is_some() {
            tracing::debug!(canvas = slot.canvas_id(), "replacing mounted chart");
        }
        prior.is_some()
    }

    /// Empties a slot (the canvas shows its no-data text instead).
    pub fn unmount(&mut self, slot: ChartSlot) -> bool {
        self.slots.remove(&slot).is_some()
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&ChartSpec> {
        self.slots.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Destroys all mounted charts.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
