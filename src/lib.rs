//! # Phase Balancer
//!
//! Distributes the circuits of an electrical panel over the three supply
//! phases R, S and T so that the per-phase totals end up as close together
//! as possible.
//!
//! Balancing is a greedy single pass, run once per ordering strategy; the
//! allocation with the smallest spread between the heaviest and lightest
//! phase is kept on the panel.
//!
//! ```rust
//! use phase_balancer::balancer::Balancer;
//! use phase_balancer::domain::{CircuitSpec, Panel};
//!
//! let mut panel = Panel::from_specs(
//!     "QD1",
//!     &[CircuitSpec::new("Shower", 6000, 2), CircuitSpec::new("Lighting", 2000, 1)],
//! )?;
//!
//! let result = Balancer::default().balance(&mut panel)?;
//! assert_eq!(result.phase_totals().total(), 8000);
//! # Ok::<(), phase_balancer::error::BalanceError>(())
//! ```

pub mod balancer;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod telemetry;

pub use error::{BalanceError, BalanceResult};
