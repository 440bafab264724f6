//! Circuit parameters and mutable per-run state.

use crate::error::{SimError, SimResult};
use lc_core::units::{Capacitance, Charge, Inductance};
use lc_core::Real;
use lc_results::OscillationPhase;
use std::f64::consts::TAU;

/// Immutable-per-run circuit parameters.
///
/// Changing any of these forces a full state reset; nothing is re-derived
/// mid-run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircuitParams {
    capacitance_f: Real,
    inductance_h: Real,
    initial_charge_c: Real,
}

impl CircuitParams {
    /// Validate and store parameters supplied at the configuration boundary.
    ///
    /// Capacitance and inductance must be strictly positive; the initial
    /// charge may be any finite real, its sign sets the convention for the
    /// current direction.
    pub fn new(
        capacitance: Capacitance,
        inductance: Inductance,
        initial_charge: Charge,
    ) -> SimResult<Self> {
        use uom::si::capacitance::farad;
        use uom::si::electric_charge::coulomb;
        use uom::si::inductance::henry;

        let capacitance_f = capacitance.get::<farad>();
        let inductance_h = inductance.get::<henry>();
        let initial_charge_c = initial_charge.get::<coulomb>();

        if !capacitance_f.is_finite() || capacitance_f <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "capacitance must be positive",
            });
        }
        if !inductance_h.is_finite() || inductance_h <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "inductance must be positive",
            });
        }
        if !initial_charge_c.is_finite() {
            return Err(SimError::InvalidArg {
                what: "initial charge must be finite",
            });
        }

        Ok(Self {
            capacitance_f,
            inductance_h,
            initial_charge_c,
        })
    }

    pub fn capacitance(&self) -> Real {
        self.capacitance_f
    }

    pub fn inductance(&self) -> Real {
        self.inductance_h
    }

    pub fn initial_charge(&self) -> Real {
        self.initial_charge_c
    }

    /// Natural oscillation period `2π·sqrt(LC)`.
    pub fn natural_period(&self) -> Real {
        TAU * (self.inductance_h * self.capacitance_f).sqrt()
    }

    /// Current amplitude of the undamped oscillation, `|Q0|/sqrt(LC)`.
    pub fn peak_current(&self) -> Real {
        self.initial_charge_c.abs() / (self.inductance_h * self.capacitance_f).sqrt()
    }

    /// Total oscillator energy set by the initial charge, `Q0²/(2C)`.
    pub fn initial_energy(&self) -> Real {
        0.5 * self.initial_charge_c * self.initial_charge_c / self.capacitance_f
    }
}

/// Mutable circuit state, advanced once per sub-step.
///
/// In the undamped model total energy is conserved up to integration error;
/// it is monitored by tests, never enforced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircuitState {
    /// Elapsed simulated time, seconds.
    pub t: Real,
    /// Capacitor charge, coulombs.
    pub q: Real,
    /// Loop current, amperes.
    pub i: Real,
    /// Rate of change of current, amperes/second.
    pub di_dt: Real,
    /// Capacitor voltage, volts.
    pub v_c: Real,
    /// Inductor voltage, volts.
    pub v_l: Real,
}

impl CircuitState {
    /// State at t = 0: full charge, no current.
    pub fn initial(params: &CircuitParams) -> Self {
        let q0 = params.initial_charge();
        Self {
            t: 0.0,
            q: q0,
            i: 0.0,
            di_dt: 0.0,
            v_c: q0 / params.capacitance(),
            v_l: 0.0,
        }
    }

    /// Energy stored in the capacitor, `Q²/(2C)`.
    pub fn electric_energy(&self, params: &CircuitParams) -> Real {
        0.5 * self.q * self.q / params.capacitance()
    }

    /// Energy stored in the inductor, `L·I²/2`.
    pub fn magnetic_energy(&self, params: &CircuitParams) -> Real {
        0.5 * params.inductance() * self.i * self.i
    }

    pub fn total_energy(&self, params: &CircuitParams) -> Real {
        self.electric_energy(params) + self.magnetic_energy(params)
    }

    /// Qualitative phase of the oscillation for readouts.
    pub fn phase(&self, params: &CircuitParams) -> OscillationPhase {
        let q_scale = params.initial_charge().abs().max(1e-9);
        let i_scale = params.peak_current().max(1e-9);
        let q_rel = self.q / q_scale;
        let i_rel = self.i / i_scale;

        if q_rel.abs() > 0.98 && i_rel.abs() < 0.05 {
            OscillationPhase::CapacitorPeak
        } else if q_rel.abs() < 0.05 && i_rel.abs() > 0.95 {
            OscillationPhase::PeakCurrent
        } else if self.q * self.i > 0.0 {
            OscillationPhase::CapacitorDischarging
        } else if self.q * self.i < 0.0 {
            OscillationPhase::InductorDischarging
        } else {
            OscillationPhase::Transitioning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::units::{coulomb, farad, henry, microcoulomb, microfarad, millihenry};
    use lc_core::{nearly_equal, Tolerances};

    fn params() -> CircuitParams {
        CircuitParams::new(microfarad(100.0), millihenry(50.0), microcoulomb(50.0)).unwrap()
    }

    #[test]
    fn rejects_nonpositive_capacitance_and_inductance() {
        assert!(CircuitParams::new(farad(0.0), henry(1.0), coulomb(1.0)).is_err());
        assert!(CircuitParams::new(farad(1.0), henry(-1.0), coulomb(1.0)).is_err());
        assert!(CircuitParams::new(farad(1.0), henry(1.0), coulomb(f64::NAN)).is_err());
    }

    #[test]
    fn negative_initial_charge_is_valid() {
        let p = CircuitParams::new(farad(1e-4), henry(0.05), coulomb(-5e-5)).unwrap();
        assert_eq!(p.initial_charge(), -5e-5);
    }

    #[test]
    fn natural_period_matches_formula() {
        let p = params();
        let expected = TAU * (0.05_f64 * 1e-4).sqrt();
        assert!(nearly_equal(p.natural_period(), expected, Tolerances::default()));
    }

    #[test]
    fn initial_state_holds_full_charge() {
        let p = params();
        let s = CircuitState::initial(&p);
        assert_eq!(s.t, 0.0);
        assert_eq!(s.q, p.initial_charge());
        assert_eq!(s.i, 0.0);
        assert!(nearly_equal(
            s.v_c,
            p.initial_charge() / p.capacitance(),
            Tolerances::default()
        ));
        assert!(nearly_equal(
            s.total_energy(&p),
            p.initial_energy(),
            Tolerances::default()
        ));
    }

    #[test]
    fn phase_classification_extremes() {
        let p = params();
        let rest = CircuitState::initial(&p);
        assert_eq!(rest.phase(&p), OscillationPhase::CapacitorPeak);

        let mut coasting = rest;
        coasting.q = 0.0;
        coasting.i = p.peak_current();
        assert_eq!(coasting.phase(&p), OscillationPhase::PeakCurrent);

        let mut discharging = rest;
        discharging.q = 0.5 * p.initial_charge();
        discharging.i = 0.5 * p.peak_current();
        assert_eq!(discharging.phase(&p), OscillationPhase::CapacitorDischarging);

        let mut recharging = rest;
        recharging.q = 0.5 * p.initial_charge();
        recharging.i = -0.5 * p.peak_current();
        assert_eq!(recharging.phase(&p), OscillationPhase::InductorDischarging);
    }
}
