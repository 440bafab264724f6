//! Charge carrier advection along the composite path.

use lc_core::{wrap_unit, Real};
use lc_path::{CompositePath, Point3};
use rand::Rng;
use rayon::prelude::*;

/// Calibration constant converting physical current into a visually legible
/// carrier speed. Presentation-tuned, no physical derivation.
pub const CARRIER_SPEED_SCALE: Real = 5.0e7;

/// Default particle count of the visualization.
pub const DEFAULT_CARRIER_COUNT: usize = 160;

/// Sentinel position far outside the visible volume, emitted for carriers
/// that fail to resolve. A rendering glitch must never abort the step.
pub const HIDDEN_POSITION: [Real; 3] = [1e5, 1e5, 1e5];

/// The set of charge carriers.
///
/// Carriers are independent and identically seeded, never collide, and share
/// nothing mutable; a sub-step update only reads the immutable path and the
/// scalar flow speed, so per-carrier work runs in parallel.
pub struct CarrierSwarm {
    progress: Vec<Real>,
    speed_scale: Real,
}

impl CarrierSwarm {
    /// Seed `count` carriers with i.i.d. uniform initial phase.
    pub fn seed<R: Rng>(count: usize, speed_scale: Real, rng: &mut R) -> Self {
        let progress = (0..count).map(|_| rng.gen_range(0.0..1.0)).collect();
        Self {
            progress,
            speed_scale,
        }
    }

    pub fn len(&self) -> usize {
        self.progress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progress.is_empty()
    }

    /// Fractional positions, each in [0, 1).
    pub fn progress(&self) -> &[Real] {
        &self.progress
    }

    /// Advance every carrier by one sub-step of flow.
    ///
    /// `flow_speed` is signed (it tracks the circuit current, which reverses
    /// across the oscillation); the wrap keeps progress in [0, 1) for either
    /// direction. Zero flow leaves every carrier exactly in place.
    pub fn advance(&mut self, flow_speed: Real, dt: Real, path: &CompositePath) {
        let delta = flow_speed * self.speed_scale * dt / path.total_length();
        if delta == 0.0 {
            return;
        }
        self.progress
            .par_iter_mut()
            .for_each(|p| *p = wrap_unit(*p + delta));
    }

    /// Resolve every carrier to a 3-D point on the path.
    ///
    /// Carriers whose progress or resolved point is non-finite land on
    /// [`HIDDEN_POSITION`] instead of propagating a failure.
    pub fn positions(&self, path: &CompositePath) -> Vec<[Real; 3]> {
        self.progress
            .par_iter()
            .map(|&p| resolve(path, p))
            .collect()
    }
}

fn resolve(path: &CompositePath, progress: Real) -> [Real; 3] {
    if !progress.is_finite() {
        return HIDDEN_POSITION;
    }
    let point: Point3<Real> = path.point_at_progress(progress);
    if point.iter().all(|c| c.is_finite()) {
        [point.x, point.y, point.z]
    } else {
        HIDDEN_POSITION
    }
}
