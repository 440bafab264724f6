//! Explicit integration of the ideal LC loop.
//!
//! Governing law, no resistance:
//!
//! ```text
//! dI/dt = Q / (L·C)
//! dQ/dt = -I
//! Vc    = Q / C
//! Vl    = -L · dI/dt
//! ```
//!
//! A single forward (explicit) Euler step: the derivative and both voltages
//! come from the pre-update charge, then charge and current advance. The
//! method is first order and only conditionally stable; the driver keeps the
//! sub-step small and watches the trajectory for divergence.

use crate::state::{CircuitParams, CircuitState};
use lc_core::Real;

/// Advance the circuit by one fixed sub-step.
///
/// `dt` must be strictly positive and small against the natural period
/// `2π·sqrt(LC)`; choosing the sub-step count accordingly is the caller's
/// responsibility. No error conditions are intrinsic to one step.
pub fn step(state: &mut CircuitState, params: &CircuitParams, dt: Real) {
    let c = params.capacitance();
    let l = params.inductance();

    state.v_c = state.q / c;
    state.di_dt = state.q / (l * c);
    state.v_l = -l * state.di_dt;

    state.q += -state.i * dt;
    state.i += state.di_dt * dt;
    state.t += dt;
}
