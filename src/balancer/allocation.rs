use std::sync::Arc;

use serde::Serialize;

use super::OrderingStrategy;
use crate::domain::{Circuit, Phase, PhaseLoads};

/// One circuit's placement: the load it puts on each phase (0 for unused phases)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRow {
    pub circuit: Arc<Circuit>,
    pub shares: PhaseLoads,
}

impl AllocationRow {
    pub fn name(&self) -> &str {
        self.circuit.name()
    }

    pub fn share(&self, phase: Phase) -> u64 {
        self.shares.get(phase)
    }
}

/// Outcome of one greedy pass over an ordered circuit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    strategy: OrderingStrategy,
    rows: Vec<AllocationRow>,
    phase_totals: PhaseLoads,
    amplitude: u64,
}

impl AllocationResult {
    pub(crate) fn new(
        strategy: OrderingStrategy,
        rows: Vec<AllocationRow>,
        phase_totals: PhaseLoads,
    ) -> Self {
        Self {
            strategy,
            rows,
            amplitude: phase_totals.amplitude(),
            phase_totals,
        }
    }

    /// Ordering strategy that produced this allocation
    pub fn strategy(&self) -> OrderingStrategy {
        self.strategy
    }

    /// Rows in processing order
    pub fn rows(&self) -> &[AllocationRow] {
        &self.rows
    }

    pub fn row(&self, name: &str) -> Option<&AllocationRow> {
        self.rows.iter().find(|row| row.name() == name)
    }

    pub fn phase_totals(&self) -> PhaseLoads {
        self.phase_totals
    }

    pub fn amplitude(&self) -> u64 {
        self.amplitude
    }

    /// Sum of every row, for renderers that append a totals line
    pub fn totals_row(&self) -> PhaseLoads {
        self.rows
            .iter()
            .fold(PhaseLoads::default(), |acc, row| acc.add(&row.shares))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
