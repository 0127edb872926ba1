//! Rendering helpers for a balanced panel.
//!
//! Nothing here computes an allocation; it only reads the selected
//! [`AllocationResult`] and the candidate amplitudes.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::balancer::{AllocationResult, BalanceOutcome, OrderingStrategy};
use crate::domain::{Panel, PhaseLoads};

const TOTALS_LABEL: &str = "Totals";

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub load_w: u64,
    pub phases: u8,
    pub r_w: u64,
    pub s_w: u64,
    pub t_w: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateSummary {
    pub strategy: OrderingStrategy,
    pub amplitude_w: u64,
}

/// Serializable snapshot of a balanced panel
#[derive(Debug, Clone, Serialize)]
pub struct PanelReport {
    pub panel: String,
    pub strategy: OrderingStrategy,
    pub rows: Vec<ReportRow>,
    pub totals: PhaseLoads,
    pub amplitude_w: u64,
    pub unbalance_factor: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<CandidateSummary>,
}

impl PanelReport {
    pub fn new(panel: &Panel, outcome: Option<&BalanceOutcome>) -> Result<Self> {
        let result = selected(panel)?;

        let rows = result
            .rows()
            .iter()
            .map(|row| ReportRow {
                name: row.name().to_string(),
                load_w: row.circuit.total_load_w(),
                phases: row.circuit.phase_count(),
                r_w: row.shares.r_w,
                s_w: row.shares.s_w,
                t_w: row.shares.t_w,
            })
            .collect();

        let candidates = outcome
            .map(|o| {
                o.amplitudes()
                    .into_iter()
                    .map(|(strategy, amplitude_w)| CandidateSummary { strategy, amplitude_w })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            panel: panel.name().to_string(),
            strategy: result.strategy(),
            rows,
            totals: result.phase_totals(),
            amplitude_w: result.amplitude(),
            unbalance_factor: result.phase_totals().unbalance_factor(),
            candidates,
        })
    }
}

/// Plain-text table: one line per circuit, a totals line and the amplitude
pub fn render_table(panel: &Panel) -> Result<String> {
    let result = selected(panel)?;

    let name_width = result
        .rows()
        .iter()
        .map(|row| row.name().len())
        .chain([TOTALS_LABEL.len(), "Name".len()])
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    writeln!(out, "Panel {}", panel.name())?;
    writeln!(
        out,
        "{:<name_width$} | {:>8} | {:>8} | {:>8} | {:>8}",
        "Name", "Circuit", "R", "S", "T"
    )?;
    writeln!(out, "{}", "-".repeat(name_width + 44))?;

    for row in result.rows() {
        let circuit = format!("{}W/{}P", row.circuit.total_load_w(), row.circuit.phase_count());
        writeln!(
            out,
            "{:<name_width$} | {:>8} | {:>8} | {:>8} | {:>8}",
            row.name(),
            circuit,
            row.shares.r_w,
            row.shares.s_w,
            row.shares.t_w
        )?;
    }

    let totals = result.phase_totals();
    writeln!(out, "{}", "-".repeat(name_width + 44))?;
    writeln!(
        out,
        "{:<name_width$} | {:>8} | {:>8} | {:>8} | {:>8}",
        TOTALS_LABEL, "", totals.r_w, totals.s_w, totals.t_w
    )?;
    writeln!(
        out,
        "Amplitude: {} W (strategy: {})",
        result.amplitude(),
        result.strategy()
    )?;

    Ok(out)
}

fn selected(panel: &Panel) -> Result<&AllocationResult> {
    panel
        .result()
        .with_context(|| format!("panel '{}' has not been balanced", panel.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::{Balancer, PhaseAssigner};
    use crate::domain::CircuitSpec;

    fn balanced_panel() -> Panel {
        let mut panel = Panel::from_specs(
            "QD1",
            &[CircuitSpec::new("Shower", 6000, 2), CircuitSpec::new("Lighting", 2000, 1)],
        )
        .unwrap();
        let result = PhaseAssigner::run(OrderingStrategy::AsGiven, panel.circuits()).unwrap();
        panel.set_result(result);
        panel
    }

    #[test]
    fn test_unbalanced_panel_is_an_error() {
        let panel = Panel::new("Empty", Vec::new());
        let err = render_table(&panel).unwrap_err();
        assert!(err.to_string().contains("has not been balanced"));
    }

    #[test]
    fn test_table_has_totals_line() {
        let table = render_table(&balanced_panel()).unwrap();
        let totals = table.lines().find(|l| l.starts_with("Totals")).unwrap();
        let cells: Vec<&str> = totals.split('|').map(str::trim).collect();
        assert_eq!(cells, vec!["Totals", "", "3000", "3000", "2000"]);
        assert!(table.contains("Amplitude: 1000 W (strategy: as_given)"));
        assert!(table.contains("6000W/2P"));
    }

    #[test]
    fn test_report_serializes_rows_and_candidates() {
        let mut panel = balanced_panel();
        let mut balancer = Balancer::default();
        let outcome = balancer.evaluate(panel.circuits()).unwrap();
        balancer.apply(&mut panel, outcome.clone());

        let report = PanelReport::new(&panel, Some(&outcome)).unwrap();
        assert_eq!(report.candidates.len(), 4);
        assert_eq!(report.rows.len(), 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["panel"], "QD1");
        let total: u64 = ["r_w", "s_w", "t_w"]
            .iter()
            .filter_map(|k| json["totals"][*k].as_u64())
            .sum();
        assert_eq!(total, 8000);
        assert!(json["candidates"].is_array());
    }
}
