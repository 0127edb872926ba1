use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info};

use super::{AllocationResult, OrderingStrategy, PermutationSource, PhaseAssigner, ShufflePermutation};
use crate::config::BalancerConfig;
use crate::domain::{Circuit, Panel};
use crate::error::{BalanceError, BalanceResult};

/// Every candidate allocation from one balancing run
#[derive(Debug, Clone)]
pub struct BalanceOutcome {
    candidates: Vec<AllocationResult>,
    selected: usize,
}

impl BalanceOutcome {
    /// Candidates in evaluation order
    pub fn candidates(&self) -> &[AllocationResult] {
        &self.candidates
    }

    /// Strategy and amplitude of each candidate
    pub fn amplitudes(&self) -> Vec<(OrderingStrategy, u64)> {
        self.candidates
            .iter()
            .map(|c| (c.strategy(), c.amplitude()))
            .collect()
    }

    /// First candidate with the lowest amplitude
    pub fn selected(&self) -> &AllocationResult {
        &self.candidates[self.selected]
    }

    pub fn into_selected(mut self) -> AllocationResult {
        self.candidates.swap_remove(self.selected)
    }
}

/// Runs the greedy assigner under each ordering strategy and keeps the
/// best-balanced allocation.
pub struct Balancer {
    strategies: Vec<OrderingStrategy>,
    permutation: Box<dyn PermutationSource>,
}

impl Default for Balancer {
    fn default() -> Self {
        Self {
            strategies: OrderingStrategy::ALL.to_vec(),
            permutation: Box::new(ShufflePermutation::new(None)),
        }
    }
}

impl Balancer {
    /// `strategies` are evaluated in the given order; earlier entries win ties
    pub fn new(
        strategies: Vec<OrderingStrategy>,
        permutation: Box<dyn PermutationSource>,
    ) -> BalanceResult<Self> {
        if strategies.is_empty() {
            return Err(BalanceError::invalid(
                "balancer",
                "at least one ordering strategy is required",
            ));
        }
        if !strategies.iter().all_unique() {
            return Err(BalanceError::invalid(
                "balancer",
                format!("ordering strategies must not repeat: {strategies:?}"),
            ));
        }
        Ok(Self {
            strategies,
            permutation,
        })
    }

    pub fn from_config(cfg: &BalancerConfig) -> BalanceResult<Self> {
        Self::new(
            cfg.strategies.clone(),
            Box::new(ShufflePermutation::new(cfg.random_seed)),
        )
    }

    pub fn strategies(&self) -> &[OrderingStrategy] {
        &self.strategies
    }

    /// Evaluate every strategy against `circuits` and pick the lowest amplitude
    pub fn evaluate(&mut self, circuits: &[Arc<Circuit>]) -> BalanceResult<BalanceOutcome> {
        let mut candidates = Vec::with_capacity(self.strategies.len());

        for &strategy in &self.strategies {
            let ordered = strategy.order(circuits, self.permutation.as_mut());
            let result = PhaseAssigner::run(strategy, &ordered)?;
            debug!(
                %strategy,
                amplitude = result.amplitude(),
                totals = ?result.phase_totals(),
                "strategy evaluated"
            );
            candidates.push(result);
        }

        let selected = candidates
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| c.amplitude())
            .map(|(i, _)| i)
            .unwrap_or_default();

        Ok(BalanceOutcome {
            candidates,
            selected,
        })
    }

    /// Recompute the panel's allocation from scratch and store the winner on it
    pub fn balance<'p>(&mut self, panel: &'p mut Panel) -> BalanceResult<&'p AllocationResult> {
        let outcome = self.evaluate(panel.circuits())?;
        Ok(self.apply(panel, outcome))
    }

    /// Store the selected candidate of `outcome` on `panel`
    pub fn apply<'p>(&self, panel: &'p mut Panel, outcome: BalanceOutcome) -> &'p AllocationResult {
        let selected = outcome.into_selected();
        info!(
            panel = panel.name(),
            strategy = %selected.strategy(),
            amplitude = selected.amplitude(),
            "panel balanced"
        );
        panel.set_result(selected)
    }
}
