use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

use crate::domain::Circuit;

/// Supplies the random permutation used by [`OrderingStrategy::Randomized`]
#[cfg_attr(test, mockall::automock)]
pub trait PermutationSource {
    /// A permutation of `0..len`
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

/// Uniform shuffle backed by `StdRng`
pub struct ShufflePermutation {
    rng: StdRng,
}

impl ShufflePermutation {
    /// Seeded for reproducible runs, OS entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        use rand::SeedableRng;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl PermutationSource for ShufflePermutation {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut self.rng);
        indices
    }
}

/// Order in which circuits are fed to the greedy assigner.
///
/// Load comparisons use the sum of derived phase shares. All sorts are stable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderingStrategy {
    /// Panel insertion order
    AsGiven,
    /// Phase count descending, then load descending
    Descending,
    /// Phase count ascending, then load ascending
    Ascending,
    /// Random shuffle, then load descending; equal loads keep the shuffled order
    Randomized,
}

impl OrderingStrategy {
    /// Every strategy, in tie-breaking order
    pub const ALL: [OrderingStrategy; 4] = [
        OrderingStrategy::AsGiven,
        OrderingStrategy::Descending,
        OrderingStrategy::Ascending,
        OrderingStrategy::Randomized,
    ];

    /// Produce a new ordering; `circuits` is left untouched
    pub fn order(
        self,
        circuits: &[Arc<Circuit>],
        permutation: &mut dyn PermutationSource,
    ) -> Vec<Arc<Circuit>> {
        let mut ordered = circuits.to_vec();

        match self {
            OrderingStrategy::AsGiven => {}
            OrderingStrategy::Descending => ordered.sort_by(|a, b| {
                b.phase_count()
                    .cmp(&a.phase_count())
                    .then_with(|| b.share_sum().cmp(&a.share_sum()))
            }),
            OrderingStrategy::Ascending => ordered.sort_by(|a, b| {
                a.phase_count()
                    .cmp(&b.phase_count())
                    .then_with(|| a.share_sum().cmp(&b.share_sum()))
            }),
            OrderingStrategy::Randomized => {
                let indices = permutation.permutation(circuits.len());
                if is_permutation(&indices, circuits.len()) {
                    ordered = indices.iter().map(|&i| Arc::clone(&circuits[i])).collect();
                } else {
                    warn!(
                        expected = circuits.len(),
                        got = indices.len(),
                        "invalid permutation, keeping insertion order"
                    );
                }
                ordered.sort_by(|a, b| b.share_sum().cmp(&a.share_sum()));
            }
        }

        ordered
    }
}

fn is_permutation(indices: &[usize], len: usize) -> bool {
    if indices.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in indices {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
