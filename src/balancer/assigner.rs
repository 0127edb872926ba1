use std::sync::Arc;

use itertools::izip;
use serde::Serialize;
use tracing::debug;

use super::{AllocationResult, AllocationRow, OrderingStrategy};
use crate::domain::{Circuit, Phase, PhaseLoads};
use crate::error::{BalanceError, BalanceResult};

/// A single share recorded against a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseEntry {
    pub circuit: String,
    pub share_w: u64,
}

/// Running total for one phase during an assignment pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseAccumulator {
    phase: Phase,
    load_sum: u64,
    entries: Vec<PhaseEntry>,
}

impl PhaseAccumulator {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            load_sum: 0,
            entries: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn load_sum(&self) -> u64 {
        self.load_sum
    }

    /// Entries in assignment order, including zero entries for circuits that skip this phase
    pub fn entries(&self) -> &[PhaseEntry] {
        &self.entries
    }

    fn push(&mut self, circuit: &str, share_w: u64) {
        self.load_sum += share_w;
        self.entries.push(PhaseEntry {
            circuit: circuit.to_string(),
            share_w,
        });
    }
}

/// Greedy single-pass placement of circuits onto phases R, S and T.
///
/// Circuits are processed strictly in the order given and never revisited:
/// - 3 phases: shares go to R, S, T positionally
/// - 2 phases: each share goes to the lightest phase this circuit has not used yet
/// - 1 phase: the share goes to the lightest phase
///
/// "Lightest" is judged against the running totals at the moment of placement,
/// with ties resolved in R, S, T order. Every phase receives exactly one entry per
/// circuit, zero where the circuit does not draw from it.
pub struct PhaseAssigner {
    accumulators: [PhaseAccumulator; 3],
    processed: Vec<Arc<Circuit>>,
}

impl Default for PhaseAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseAssigner {
    pub fn new() -> Self {
        Self {
            accumulators: Phase::ALL.map(PhaseAccumulator::new),
            processed: Vec::new(),
        }
    }

    /// Run a full pass over `circuits` and tag the result with `strategy`
    pub fn run(
        strategy: OrderingStrategy,
        circuits: &[Arc<Circuit>],
    ) -> BalanceResult<AllocationResult> {
        let mut assigner = Self::new();
        for circuit in circuits {
            assigner.assign(circuit)?;
        }
        Ok(assigner.finish(strategy))
    }

    pub fn accumulator(&self, phase: Phase) -> &PhaseAccumulator {
        &self.accumulators[phase.index()]
    }

    /// Current running totals
    pub fn totals(&self) -> PhaseLoads {
        let mut totals = PhaseLoads::default();
        for acc in &self.accumulators {
            *totals.get_mut(acc.phase) = acc.load_sum;
        }
        totals
    }

    /// Place one circuit
    pub fn assign(&mut self, circuit: &Arc<Circuit>) -> BalanceResult<()> {
        let name = circuit.name();

        match *circuit.phase_shares() {
            [r, s, t] => {
                self.push(Phase::R, name, r);
                self.push(Phase::S, name, s);
                self.push(Phase::T, name, t);
            }
            [first, second] => {
                let mut used: Vec<Phase> = Vec::with_capacity(2);
                for share in [first, second] {
                    let phase = self.lightest(&used);
                    self.push(phase, name, share);
                    used.push(phase);
                }
                let unused = self.lightest(&used);
                self.push(unused, name, 0);
            }
            [share] => {
                let phase = self.lightest(&[]);
                self.push(phase, name, share);
                for other in Phase::ALL.into_iter().filter(|p| *p != phase) {
                    self.push(other, name, 0);
                }
            }
            ref other => {
                return Err(BalanceError::UnassignableCircuit {
                    circuit: name.to_string(),
                    phase_count: other.len(),
                });
            }
        }

        self.processed.push(Arc::clone(circuit));
        debug!(
            circuit = name,
            phases = circuit.phase_count(),
            totals = ?self.totals(),
            "circuit placed"
        );
        Ok(())
    }

    /// Close the pass and build the dense result table
    pub fn finish(self, strategy: OrderingStrategy) -> AllocationResult {
        let totals = self.totals();
        let [r, s, t] = self.accumulators;

        let rows = izip!(self.processed, r.entries, s.entries, t.entries)
            .map(|(circuit, r, s, t)| AllocationRow {
                circuit,
                shares: PhaseLoads::new(r.share_w, s.share_w, t.share_w),
            })
            .collect();

        AllocationResult::new(strategy, rows, totals)
    }

    /// Lightest phase not in `excluded`; first in R, S, T order on ties
    fn lightest(&self, excluded: &[Phase]) -> Phase {
        debug_assert!(
            Phase::ALL.iter().any(|p| !excluded.contains(p)),
            "every phase excluded"
        );
        self.accumulators
            .iter()
            .filter(|acc| !excluded.contains(&acc.phase))
            .min_by_key(|acc| acc.load_sum)
            .map(|acc| acc.phase)
            .unwrap_or(Phase::R)
    }

    fn push(&mut self, phase: Phase, circuit: &str, share_w: u64) {
        self.accumulators[phase.index()].push(circuit, share_w);
    }
}
