use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, BalanceResult};

/// Smallest and largest number of phases a circuit can span
pub const MIN_PHASES: u8 = 1;
pub const MAX_PHASES: u8 = 3;

/// Largest accepted circuit load (W); keeps every phase sum well inside `u64`
pub const MAX_LOAD_W: u64 = u32::MAX as u64;

/// Raw circuit record as supplied by a caller or a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSpec {
    pub name: String,
    /// Total load (W). Signed so that bad input reaches validation instead of the parser.
    pub load_w: i64,
    pub phases: u8,
}

impl CircuitSpec {
    pub fn new(name: impl Into<String>, load_w: i64, phases: u8) -> Self {
        Self {
            name: name.into(),
            load_w,
            phases,
        }
    }
}

/// An electrical circuit with a fixed total load split evenly over 1-3 phases.
///
/// Shares are derived once at construction with integer division, so a load that
/// does not divide evenly loses its remainder (e.g. 5001 W on 2 phases gives 2500 + 2500).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Circuit {
    name: String,
    total_load_w: u64,
    phase_count: u8,
    phase_shares: Vec<u64>,
}

impl Circuit {
    pub fn new(name: impl Into<String>, total_load_w: i64, phase_count: u8) -> BalanceResult<Self> {
        let name = name.into();

        if !(MIN_PHASES..=MAX_PHASES).contains(&phase_count) {
            return Err(BalanceError::invalid(
                name,
                format!("phase count {phase_count} is outside {MIN_PHASES}..={MAX_PHASES}"),
            ));
        }
        let total_load_w = u64::try_from(total_load_w).map_err(|_| {
            BalanceError::invalid(name.clone(), format!("negative load {total_load_w} W"))
        })?;
        if total_load_w > MAX_LOAD_W {
            return Err(BalanceError::invalid(
                name,
                format!("load {total_load_w} W exceeds {MAX_LOAD_W} W"),
            ));
        }

        let per_phase = total_load_w / u64::from(phase_count);
        let phase_shares = vec![per_phase; usize::from(phase_count)];

        Ok(Self {
            name,
            total_load_w,
            phase_count,
            phase_shares,
        })
    }

    /// Build a circuit with arbitrary shares, skipping validation
    #[cfg(test)]
    pub(crate) fn with_shares(name: impl Into<String>, phase_shares: Vec<u64>) -> Self {
        Self {
            name: name.into(),
            total_load_w: phase_shares.iter().sum(),
            phase_count: u8::try_from(phase_shares.len()).unwrap_or(u8::MAX),
            phase_shares,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_load_w(&self) -> u64 {
        self.total_load_w
    }

    pub fn phase_count(&self) -> u8 {
        self.phase_count
    }

    /// Per-phase shares, one entry per spanned phase
    pub fn phase_shares(&self) -> &[u64] {
        &self.phase_shares
    }

    /// Sum of the derived shares; this is the load the circuit actually places
    pub fn share_sum(&self) -> u64 {
        self.phase_shares.iter().sum()
    }

    /// Watts dropped by the integer split
    pub fn truncated_w(&self) -> u64 {
        self.total_load_w - self.share_sum()
    }
}

impl TryFrom<&CircuitSpec> for Circuit {
    type Error = BalanceError;

    fn try_from(spec: &CircuitSpec) -> Result<Self, Self::Error> {
        Circuit::new(spec.name.clone(), spec.load_w, spec.phases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(6000, 2, vec![3000, 3000])]
    #[case(5000, 2, vec![2500, 2500])]
    #[case(6000, 3, vec![2000, 2000, 2000])]
    #[case(3000, 1, vec![3000])]
    #[case(0, 3, vec![0, 0, 0])]
    fn test_phase_shares(#[case] load: i64, #[case] phases: u8, #[case] expected: Vec<u64>) {
        let circuit = Circuit::new("c", load, phases).unwrap();
        assert_eq!(circuit.phase_shares(), expected.as_slice());
        assert_eq!(circuit.phase_shares().len(), usize::from(phases));
    }

    #[test]
    fn test_remainder_is_dropped() {
        let circuit = Circuit::new("Odd", 5001, 2).unwrap();
        assert_eq!(circuit.phase_shares(), &[2500, 2500]);
        assert_eq!(circuit.share_sum(), 5000);
        assert_eq!(circuit.truncated_w(), 1);

        let circuit = Circuit::new("Motor", 1000, 3).unwrap();
        assert_eq!(circuit.share_sum(), 999);
        assert_eq!(circuit.truncated_w(), 1000 % 3);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(255)]
    fn test_rejects_phase_count(#[case] phases: u8) {
        let err = Circuit::new("Bad", 1000, phases).unwrap_err();
        assert!(matches!(
            err,
            BalanceError::InvalidConfiguration { ref circuit, .. } if circuit == "Bad"
        ));
    }

    #[test]
    fn test_rejects_negative_load() {
        let err = Circuit::new("Negative", -1, 1).unwrap_err();
        assert!(err.to_string().contains("negative load"));
    }

    #[test]
    fn test_load_cap() {
        let at_cap = Circuit::new("Feeder", MAX_LOAD_W as i64, 3).unwrap();
        assert_eq!(at_cap.total_load_w(), MAX_LOAD_W);

        for load in [MAX_LOAD_W as i64 + 1, i64::MAX] {
            let err = Circuit::new("Huge", load, 1).unwrap_err();
            assert!(matches!(
                err,
                BalanceError::InvalidConfiguration { ref circuit, ref reason }
                    if circuit == "Huge" && reason.contains("exceeds")
            ));
        }
    }

    #[test]
    fn test_shares_are_stable() {
        let circuit = Circuit::new("Shower", 6000, 2).unwrap();
        let first = circuit.phase_shares().to_vec();
        assert_eq!(circuit.phase_shares(), first.as_slice());
        assert_eq!(circuit.clone().phase_shares(), first.as_slice());
    }

    #[test]
    fn test_from_spec() {
        let spec = CircuitSpec::new("Lighting", 2000, 1);
        let circuit = Circuit::try_from(&spec).unwrap();
        assert_eq!(circuit.name(), "Lighting");
        assert_eq!(circuit.total_load_w(), 2000);
        assert_eq!(circuit.phase_count(), 1);
    }
}
