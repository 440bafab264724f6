//! Per-frame simulation driver: sub-stepping, divergence guard, snapshots.

use crate::carriers::{CarrierSwarm, CARRIER_SPEED_SCALE, DEFAULT_CARRIER_COUNT};
use crate::error::{SimError, SimResult};
use crate::fields::{self, INDUCED_ARROWS_PER_TURN};
use crate::physics;
use crate::state::{CircuitParams, CircuitState};
use lc_core::Real;
use lc_path::{CircuitLayout, CompositePath, SegmentKind};
use lc_results::{FrameSnapshot, RollingWindow, ScalarRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Options for a simulation run.
///
/// The instability ratio and carrier speed scale are presentation-tuned
/// magic numbers carried over from the reference visualization; they are
/// plain fields so hosts can override them, nothing re-derives them.
#[derive(Clone, Copy, Debug)]
pub struct SimOptions {
    /// Macro time advanced per tick at speed factor 1 (seconds).
    pub base_dt: Real,
    /// Sub-steps per tick per unit of speed factor.
    pub steps_per_unit_speed: Real,
    /// User-controlled speed factor, strictly positive.
    pub speed_factor: Real,
    /// Halt when |Q| exceeds this multiple of |Q0|.
    pub instability_ratio: Real,
    /// Carrier advection calibration, progress units per ampere-second.
    pub carrier_speed_scale: Real,
    /// Number of visual charge carriers.
    pub carrier_count: usize,
    /// RNG seed for carrier phases; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Capacity of the rolling scalar history window.
    pub window_capacity: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            base_dt: 1.5e-7,
            steps_per_unit_speed: 30.0,
            speed_factor: 1.0,
            instability_ratio: 15.0,
            carrier_speed_scale: CARRIER_SPEED_SCALE,
            carrier_count: DEFAULT_CARRIER_COUNT,
            seed: None,
            window_capacity: 800,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.base_dt.is_finite() || self.base_dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "base_dt must be positive",
            });
        }
        if !self.steps_per_unit_speed.is_finite() || self.steps_per_unit_speed <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "steps_per_unit_speed must be positive",
            });
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "speed_factor must be positive",
            });
        }
        if !self.instability_ratio.is_finite() || self.instability_ratio <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "instability_ratio must be positive",
            });
        }
        Ok(())
    }
}

/// Owns one run of the simulation: circuit state, the composite path, the
/// carrier swarm and the rolling history.
///
/// External collaborators only ever see [`FrameSnapshot`] copies; nothing
/// outside holds a live handle into mid-update state. Control surface calls
/// take effect between ticks.
pub struct Simulation {
    params: CircuitParams,
    layout: CircuitLayout,
    options: SimOptions,
    path: CompositePath,
    state: CircuitState,
    carriers: CarrierSwarm,
    history: RollingWindow<ScalarRecord>,
    running: bool,
    halted: bool,
}

impl Simulation {
    /// Build a simulation for the given circuit and geometry.
    ///
    /// Fails fast on invalid options or degenerate geometry; a path that
    /// cannot be built is fatal before the first tick.
    pub fn new(
        params: CircuitParams,
        layout: CircuitLayout,
        options: SimOptions,
    ) -> SimResult<Self> {
        options.validate()?;
        let path = layout.build_loop()?;
        let history = RollingWindow::new(options.window_capacity)?;
        let mut rng = Self::rng(options.seed);
        let carriers = CarrierSwarm::seed(options.carrier_count, options.carrier_speed_scale, &mut rng);
        Ok(Self {
            state: CircuitState::initial(&params),
            params,
            layout,
            options,
            path,
            carriers,
            history,
            running: false,
            halted: false,
        })
    }

    fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn params(&self) -> &CircuitParams {
        &self.params
    }

    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    pub fn path(&self) -> &CompositePath {
        &self.path
    }

    pub fn history(&self) -> &RollingWindow<ScalarRecord> {
        &self.history
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn speed_factor(&self) -> Real {
        self.options.speed_factor
    }

    /// Begin advancing time on subsequent ticks.
    ///
    /// A halted run stays halted until an explicit [`Simulation::reset`].
    pub fn start(&mut self) -> SimResult<()> {
        if self.halted {
            return Err(SimError::InvalidArg {
                what: "halted run requires reset before start",
            });
        }
        self.running = true;
        Ok(())
    }

    /// Stop advancing time. Synchronous: no in-flight work to unwind, each
    /// sub-step completes atomically from the caller's perspective.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Change the speed factor, effective from the next tick.
    pub fn set_speed_factor(&mut self, factor: Real) -> SimResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "speed_factor must be positive",
            });
        }
        self.options.speed_factor = factor;
        Ok(())
    }

    /// Full re-initialization with new parameters.
    ///
    /// State, path, carrier phases and history are all rebuilt; parameter
    /// changes are never absorbed mid-integration. Identical parameters
    /// yield a bit-identical initial state and an identically shaped path.
    pub fn reset(&mut self, params: CircuitParams) -> SimResult<()> {
        self.path = self.layout.build_loop()?;
        self.state = CircuitState::initial(&params);
        self.params = params;
        let mut rng = Self::rng(self.options.seed);
        self.carriers =
            CarrierSwarm::seed(self.options.carrier_count, self.options.carrier_speed_scale, &mut rng);
        self.history.clear();
        self.running = false;
        self.halted = false;
        tracing::debug!(
            q0 = self.params.initial_charge(),
            period = self.params.natural_period(),
            "simulation reset"
        );
        Ok(())
    }

    /// Advance one rendered frame's worth of simulation.
    ///
    /// Runs `N = max(1, floor(steps_per_unit_speed · speed_factor))`
    /// sub-steps of size `base_dt · speed_factor / N`, advancing carriers
    /// with the just-updated current after each sub-step, then emits exactly
    /// one snapshot. Sub-step count scales with the speed factor so per-step
    /// error stays bounded while presentation cost stays one refresh per
    /// frame.
    ///
    /// While paused, returns the current snapshot without advancing. Once
    /// the divergence guard trips, every subsequent call returns
    /// [`SimError::Unstable`] with the state frozen at its last-valid values
    /// until [`Simulation::reset`].
    pub fn tick(&mut self) -> SimResult<FrameSnapshot> {
        if self.halted {
            return Err(self.unstable_error());
        }
        if !self.running {
            return Ok(self.snapshot());
        }

        let substeps = (self.options.steps_per_unit_speed * self.options.speed_factor)
            .floor()
            .max(1.0) as usize;
        let dt = self.options.base_dt * self.options.speed_factor / substeps as Real;

        for _ in 0..substeps {
            self.check_divergence()?;
            physics::step(&mut self.state, &self.params, dt);
            self.carriers.advance(self.state.i, dt, &self.path);
        }

        let snapshot = self.snapshot();
        self.history.push(snapshot.scalars);
        Ok(snapshot)
    }

    /// Read-only copy of the current frame state, usable while paused.
    pub fn snapshot(&self) -> FrameSnapshot {
        let induced_field = fields::effect_region(&self.path, SegmentKind::InductorWinding)
            .map(|span| {
                let count = self.layout.solenoid_turns as usize * INDUCED_ARROWS_PER_TURN;
                fields::induced_field_arrows(&self.path, span, count, &self.state, &self.params)
            })
            .unwrap_or_default();

        FrameSnapshot {
            scalars: self.scalar_record(),
            phase: self.state.phase(&self.params),
            carrier_positions: self.carriers.positions(&self.path),
            b_field: fields::b_field_indicator(&self.state, &self.params, &self.layout),
            induced_field,
        }
    }

    fn scalar_record(&self) -> ScalarRecord {
        ScalarRecord {
            t_s: self.state.t,
            q_c: self.state.q,
            i_a: self.state.i,
            di_dt_a_per_s: self.state.di_dt,
            v_c_v: self.state.v_c,
            v_l_v: self.state.v_l,
            electric_energy_j: self.state.electric_energy(&self.params),
            magnetic_energy_j: self.state.magnetic_energy(&self.params),
            total_energy_j: self.state.total_energy(&self.params),
        }
    }

    fn check_divergence(&mut self) -> SimResult<()> {
        let bound = self.options.instability_ratio * self.params.initial_charge().abs();
        let diverged = !self.state.q.is_finite()
            || !self.state.i.is_finite()
            || self.state.q.abs() > bound;
        if diverged {
            self.halted = true;
            self.running = false;
            tracing::warn!(
                t = self.state.t,
                q = self.state.q,
                i = self.state.i,
                "numerical instability detected, halting run"
            );
            return Err(self.unstable_error());
        }
        Ok(())
    }

    fn unstable_error(&self) -> SimError {
        SimError::Unstable {
            t_s: self.state.t,
            q_c: self.state.q,
            i_a: self.state.i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::units::{microcoulomb, microfarad, millihenry};

    fn params() -> CircuitParams {
        CircuitParams::new(microfarad(100.0), millihenry(50.0), microcoulomb(50.0)).unwrap()
    }

    fn seeded_options() -> SimOptions {
        SimOptions {
            seed: Some(42),
            ..SimOptions::default()
        }
    }

    #[test]
    fn options_validation() {
        let mut opts = SimOptions::default();
        assert!(opts.validate().is_ok());
        opts.speed_factor = 0.0;
        assert!(opts.validate().is_err());
        opts.speed_factor = 1.0;
        opts.base_dt = -1.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn paused_tick_does_not_advance() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        let before = *sim.state();
        let snap = sim.tick().unwrap();
        assert_eq!(*sim.state(), before);
        assert_eq!(snap.scalars.t_s, 0.0);
    }

    #[test]
    fn running_tick_advances_by_macro_dt() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        sim.start().unwrap();
        let snap = sim.tick().unwrap();
        let expected = 1.5e-7;
        assert!((snap.scalars.t_s - expected).abs() < 1e-18);
        assert!(snap.scalars.i_a > 0.0);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn speed_factor_scales_substeps_not_snapshot_rate() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        sim.set_speed_factor(4.0).unwrap();
        sim.start().unwrap();
        let snap = sim.tick().unwrap();
        // 4x speed: one tick covers 4x the macro time, still one record
        assert!((snap.scalars.t_s - 4.0 * 1.5e-7).abs() < 1e-18);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn set_speed_factor_rejects_nonpositive() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        assert!(sim.set_speed_factor(0.0).is_err());
        assert!(sim.set_speed_factor(f64::NAN).is_err());
        assert!(sim.set_speed_factor(2.5).is_ok());
    }

    #[test]
    fn guard_trips_on_non_finite_charge() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        sim.start().unwrap();
        sim.state.q = f64::NAN;
        assert!(matches!(sim.tick(), Err(SimError::Unstable { .. })));
        assert!(sim.is_halted());
        assert!(!sim.is_running());
    }

    #[test]
    fn guard_trips_on_charge_blowup_and_freezes_state() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        sim.start().unwrap();
        sim.state.q = 20.0 * sim.params().initial_charge();
        assert!(matches!(sim.tick(), Err(SimError::Unstable { .. })));
        let frozen = *sim.state();
        // Subsequent ticks keep failing and never mutate the state
        assert!(sim.tick().is_err());
        assert!(sim.start().is_err());
        assert!(sim.tick().is_err());
        assert_eq!(*sim.state(), frozen);
    }

    #[test]
    fn reset_recovers_from_halt() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        sim.start().unwrap();
        sim.state.q = f64::NAN;
        let _ = sim.tick();
        assert!(sim.is_halted());

        sim.reset(params()).unwrap();
        assert!(!sim.is_halted());
        assert_eq!(sim.state().q, params().initial_charge());
        sim.start().unwrap();
        assert!(sim.tick().is_ok());
    }

    #[test]
    fn reset_is_deterministic() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        sim.reset(params()).unwrap();
        let state_a = *sim.state();
        let len_a = sim.path().total_length();
        let count_a = sim.path().segments().len();
        let carriers_a = sim.carriers.progress().to_vec();

        sim.reset(params()).unwrap();
        assert_eq!(*sim.state(), state_a);
        assert_eq!(sim.path().total_length(), len_a);
        assert_eq!(sim.path().segments().len(), count_a);
        // Seeded runs also reproduce the carrier phases
        assert_eq!(sim.carriers.progress(), &carriers_a[..]);
    }

    #[test]
    fn snapshot_shapes_match_options() {
        let mut sim = Simulation::new(params(), CircuitLayout::default(), seeded_options()).unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap.carrier_positions.len(), DEFAULT_CARRIER_COUNT);
        // At rest there is no current and no derived voltage yet
        assert!(snap.b_field.is_none());
        assert!(snap.induced_field.is_empty());

        // Just after the start, the capacitor is still nearly full: dI/dt is
        // near its maximum, so the induced-field arrows appear
        sim.start().unwrap();
        let snap = sim.tick().unwrap();
        assert!(!snap.induced_field.is_empty());
    }
}
