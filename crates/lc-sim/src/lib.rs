//! Transient simulation core for the ideal LC resonant circuit.
//!
//! Provides:
//! - Forward-Euler circuit integration (charge, current, voltages)
//! - Charge carrier advection along the composite wire path
//! - Field indicator placement tied to the inductive winding
//! - Sub-stepped per-frame driver with a divergence guard

pub mod carriers;
pub mod driver;
pub mod error;
pub mod fields;
pub mod physics;
pub mod state;

// Re-exports for public API
pub use carriers::{CarrierSwarm, CARRIER_SPEED_SCALE, DEFAULT_CARRIER_COUNT};
pub use driver::{SimOptions, Simulation};
pub use error::{SimError, SimResult};
pub use fields::{b_field_indicator, effect_region, induced_field_arrows, ProgressSpan};
pub use state::{CircuitParams, CircuitState};
