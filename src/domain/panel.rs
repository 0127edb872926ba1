use std::sync::Arc;

use super::{Circuit, CircuitSpec};
use crate::balancer::AllocationResult;
use crate::error::BalanceResult;

/// An electrical panel: a named, ordered set of circuits and the last balancing result
#[derive(Debug, Clone)]
pub struct Panel {
    name: String,
    circuits: Vec<Arc<Circuit>>,
    result: Option<AllocationResult>,
}

impl Panel {
    pub fn new(name: impl Into<String>, circuits: Vec<Circuit>) -> Self {
        Self {
            name: name.into(),
            circuits: circuits.into_iter().map(Arc::new).collect(),
            result: None,
        }
    }

    /// Build a panel from raw records, failing on the first invalid circuit
    pub fn from_specs(name: impl Into<String>, specs: &[CircuitSpec]) -> BalanceResult<Self> {
        let circuits = specs
            .iter()
            .map(Circuit::try_from)
            .collect::<BalanceResult<Vec<_>>>()?;
        Ok(Self::new(name, circuits))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Circuits in insertion order
    pub fn circuits(&self) -> &[Arc<Circuit>] {
        &self.circuits
    }

    /// Currently selected allocation, `None` until the panel has been balanced
    pub fn result(&self) -> Option<&AllocationResult> {
        self.result.as_ref()
    }

    /// Replace the selected allocation wholesale
    pub fn set_result(&mut self, result: AllocationResult) -> &AllocationResult {
        self.result.insert(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BalanceError;

    #[test]
    fn test_preserves_insertion_order() {
        let panel = Panel::from_specs(
            "QD1",
            &[
                CircuitSpec::new("B", 1000, 1),
                CircuitSpec::new("A", 2000, 2),
                CircuitSpec::new("C", 3000, 3),
            ],
        )
        .unwrap();

        let names: Vec<&str> = panel.circuits().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert!(panel.result().is_none());
    }

    #[test]
    fn test_from_specs_stops_on_invalid_circuit() {
        let err = Panel::from_specs(
            "QD1",
            &[CircuitSpec::new("Ok", 1000, 1), CircuitSpec::new("Broken", 1000, 5)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BalanceError::InvalidConfiguration { ref circuit, .. } if circuit == "Broken"
        ));
    }
}
