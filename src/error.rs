use thiserror::Error;

/// Errors raised while building circuits or assigning them to phases
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// A circuit (or balancer) was configured with values outside the supported range.
    #[error("Invalid configuration for '{circuit}': {reason}")]
    InvalidConfiguration { circuit: String, reason: String },

    /// A circuit whose share list does not span 1, 2 or 3 phases reached the assigner.
    /// Circuit construction rejects these, so this indicates a broken invariant upstream.
    #[error("Circuit '{circuit}' cannot be assigned: {phase_count} phase shares")]
    UnassignableCircuit { circuit: String, phase_count: usize },
}

impl BalanceError {
    pub fn invalid(circuit: impl Into<String>, reason: impl Into<String>) -> Self {
        BalanceError::InvalidConfiguration {
            circuit: circuit.into(),
            reason: reason.into(),
        }
    }
}

pub type BalanceResult<T> = Result<T, BalanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_circuit() {
        let err = BalanceError::invalid("Shower 01", "phase count 4 is outside 1..=3");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'Shower 01': phase count 4 is outside 1..=3"
        );

        let err = BalanceError::UnassignableCircuit {
            circuit: "Pump".to_string(),
            phase_count: 0,
        };
        assert!(err.to_string().contains("Pump"));
    }
}
