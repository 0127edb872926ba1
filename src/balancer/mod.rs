//! Balancing Engine
//!
//! This module contains the phase balancing pipeline:
//! - Ordering: four strategies that decide the order circuits are placed in
//! - Assigner: greedy single-pass placement onto R, S and T
//! - Selection: runs every strategy and keeps the lowest amplitude result

pub mod allocation;
pub mod assigner;
pub mod ordering;
pub mod selection;

pub use allocation::*;
pub use assigner::*;
pub use ordering::*;
pub use selection::*;
