//! Snapshot data types emitted once per tick.
//!
//! These are plain read-only copies of derived quantities; consumers never
//! receive a live handle into mid-update simulation state.

use serde::{Deserialize, Serialize};

/// Qualitative phase of the oscillation, derived from the relative charge
/// and current amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscillationPhase {
    /// |Q| near its peak, current near zero.
    CapacitorPeak,
    /// Current near its peak, capacitor near empty.
    PeakCurrent,
    /// Capacitor discharging into the inductor.
    CapacitorDischarging,
    /// Inductor driving charge back onto the capacitor.
    InductorDischarging,
    /// Between the regimes above.
    Transitioning,
}

/// A field indicator placed by the core for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldIndicator {
    /// Anchor point on (or at the center of) the physical element.
    pub anchor: [f64; 3],
    /// Unit direction the indicator should point along.
    pub direction: [f64; 3],
    /// Normalized magnitude in [0, 1] for sizing/opacity.
    pub strength: f64,
}

/// Scalar circuit quantities for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarRecord {
    pub t_s: f64,
    pub q_c: f64,
    pub i_a: f64,
    pub di_dt_a_per_s: f64,
    pub v_c_v: f64,
    pub v_l_v: f64,
    pub electric_energy_j: f64,
    pub magnetic_energy_j: f64,
    pub total_energy_j: f64,
}

/// Everything a rendering/reporting collaborator needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub scalars: ScalarRecord,
    pub phase: OscillationPhase,
    /// One position per charge carrier; carriers that failed to resolve sit
    /// at the hidden sentinel far outside the visible volume.
    pub carrier_positions: Vec<[f64; 3]>,
    /// Net B field arrow for the winding, absent when current is negligible
    /// or the winding segment is missing.
    pub b_field: Option<FieldIndicator>,
    /// Induced E field arrows along the winding; empty when suppressed.
    pub induced_field: Vec<FieldIndicator>,
}
