//! # Supply Phases
//!
//! A panel is fed by three supply lines, conventionally labelled R, S and T.
//! Every per-phase quantity in the crate is kept as a named triple so that
//! renderers never need to know about column positions.
//!
//! The iteration order `R, S, T` is significant: whenever two phases carry the
//! same load, the first one in this order wins.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the three supply phases
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Phase {
    R,
    S,
    T,
}

impl Phase {
    /// All phases in tie-breaking order
    pub const ALL: [Phase; 3] = [Phase::R, Phase::S, Phase::T];

    /// Position of the phase inside `Phase::ALL`
    pub fn index(self) -> usize {
        match self {
            Phase::R => 0,
            Phase::S => 1,
            Phase::T => 2,
        }
    }
}

/// Per-phase load in watts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseLoads {
    /// Phase R load (W)
    pub r_w: u64,
    /// Phase S load (W)
    pub s_w: u64,
    /// Phase T load (W)
    pub t_w: u64,
}

impl PhaseLoads {
    pub fn new(r_w: u64, s_w: u64, t_w: u64) -> Self {
        Self { r_w, s_w, t_w }
    }

    /// Load on a single phase
    pub fn get(&self, phase: Phase) -> u64 {
        match phase {
            Phase::R => self.r_w,
            Phase::S => self.s_w,
            Phase::T => self.t_w,
        }
    }

    /// Mutable access to a single phase
    pub fn get_mut(&mut self, phase: Phase) -> &mut u64 {
        match phase {
            Phase::R => &mut self.r_w,
            Phase::S => &mut self.s_w,
            Phase::T => &mut self.t_w,
        }
    }

    /// Total load across all phases
    pub fn total(&self) -> u64 {
        self.r_w + self.s_w + self.t_w
    }

    /// Most loaded phase value
    pub fn max_phase(&self) -> u64 {
        self.r_w.max(self.s_w).max(self.t_w)
    }

    /// Least loaded phase value
    pub fn min_phase(&self) -> u64 {
        self.r_w.min(self.s_w).min(self.t_w)
    }

    /// Spread between the most and least loaded phase
    pub fn amplitude(&self) -> u64 {
        self.max_phase() - self.min_phase()
    }

    /// Phase unbalance factor (0.0 = perfectly balanced, 1.0 = everything on one phase)
    ///
    /// Calculated as: (max - min) / (max + min)
    pub fn unbalance_factor(&self) -> f64 {
        let max = self.max_phase();
        let min = self.min_phase();
        if max + min == 0 {
            return 0.0;
        }
        (max - min) as f64 / (max + min) as f64
    }

    /// Number of phases carrying a non-zero load
    pub fn non_zero_count(&self) -> usize {
        Phase::ALL.iter().filter(|p| self.get(**p) > 0).count()
    }

    /// Add another per-phase load
    pub fn add(&self, other: &PhaseLoads) -> Self {
        Self {
            r_w: self.r_w + other.r_w,
            s_w: self.s_w + other.s_w,
            t_w: self.t_w + other.t_w,
        }
    }
}
