//! Curve primitives used to assemble the circuit loop.

use lc_core::Real;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// A parametric curve with a constant-speed parameterization.
///
/// Implementors must map the local fraction `u` in `[0, 1]` to points at a
/// uniform rate along the curve, so that arc length is linear in `u`. The
/// composite path relies on this to resolve absolute arc length into local
/// fractions without numeric resampling.
pub trait Curve: Send + Sync {
    /// Point at local fraction `u` in `[0, 1]`.
    fn point_at(&self, u: Real) -> Point3<Real>;

    /// Unit tangent at local fraction `u`, oriented with increasing `u`.
    fn tangent_at(&self, u: Real) -> Vector3<Real>;

    /// Total arc length.
    fn length(&self) -> Real;
}

/// Straight wire link between two points.
#[derive(Clone, Debug)]
pub struct LineSegment {
    pub start: Point3<Real>,
    pub end: Point3<Real>,
}

impl LineSegment {
    pub fn new(start: Point3<Real>, end: Point3<Real>) -> Self {
        Self { start, end }
    }
}

impl Curve for LineSegment {
    fn point_at(&self, u: Real) -> Point3<Real> {
        self.start + (self.end - self.start) * u
    }

    fn tangent_at(&self, _u: Real) -> Vector3<Real> {
        let d = self.end - self.start;
        let n = d.norm();
        if n > 0.0 { d / n } else { Vector3::zeros() }
    }

    fn length(&self) -> Real {
        (self.end - self.start).norm()
    }
}

/// Constant-pitch helical winding with its axis along +X.
///
/// Matches the solenoid parameterization of the circuit layout: the winding
/// is centered on `x = 0`, spans `axial_length` along X, and circles the
/// axis at `y = axis_y` with the given radius, starting at the top of the
/// first turn (`y = axis_y + radius`, `z = 0`).
#[derive(Clone, Debug)]
pub struct Helix {
    pub radius: Real,
    pub axial_length: Real,
    pub turns: u32,
    pub axis_y: Real,
}

impl Helix {
    pub fn new(radius: Real, axial_length: Real, turns: u32, axis_y: Real) -> Self {
        Self {
            radius,
            axial_length,
            turns,
            axis_y,
        }
    }

    fn total_angle(&self) -> Real {
        Real::from(self.turns) * TAU
    }

    /// Length of wire unrolled around one full winding.
    fn circumferential_length(&self) -> Real {
        self.radius * self.total_angle()
    }
}

impl Curve for Helix {
    fn point_at(&self, u: Real) -> Point3<Real> {
        let angle = u * self.total_angle();
        Point3::new(
            self.axial_length * (u - 0.5),
            self.axis_y + self.radius * angle.cos(),
            self.radius * angle.sin(),
        )
    }

    fn tangent_at(&self, u: Real) -> Vector3<Real> {
        let angle = u * self.total_angle();
        let rate = self.radius * self.total_angle();
        let d = Vector3::new(
            self.axial_length,
            -rate * angle.sin(),
            rate * angle.cos(),
        );
        let n = d.norm();
        if n > 0.0 { d / n } else { Vector3::zeros() }
    }

    fn length(&self) -> Real {
        self.axial_length.hypot(self.circumferential_length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::{nearly_equal, Tolerances};

    #[test]
    fn line_segment_endpoints_and_length() {
        let seg = LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0));
        assert_eq!(seg.length(), 5.0);
        assert_eq!(seg.point_at(0.0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(seg.point_at(1.0), Point3::new(3.0, 4.0, 0.0));
        let t = seg.tangent_at(0.5);
        assert!(nearly_equal(t.norm(), 1.0, Tolerances::default()));
        assert!(nearly_equal(t.x, 0.6, Tolerances::default()));
    }

    #[test]
    fn helix_length_is_pythagorean() {
        let h = Helix::new(0.5, 3.0, 8, 1.0);
        let expected = (3.0_f64.powi(2) + (0.5 * 8.0 * TAU).powi(2)).sqrt();
        assert!(nearly_equal(h.length(), expected, Tolerances::default()));
    }

    #[test]
    fn helix_endpoints_sit_on_first_and_last_turn_top() {
        let h = Helix::new(0.5, 3.0, 8, 1.0);
        let start = h.point_at(0.0);
        let end = h.point_at(1.0);
        let tol = Tolerances::default();
        assert!(nearly_equal(start.x, -1.5, tol));
        assert!(nearly_equal(start.y, 1.5, tol));
        assert!(nearly_equal(start.z, 0.0, tol));
        assert!(nearly_equal(end.x, 1.5, tol));
        assert!(nearly_equal(end.y, 1.5, tol));
        // 8 whole turns bring z back to the start
        assert!(start.z.abs() < 1e-9 && end.z.abs() < 1e-9);
    }

    #[test]
    fn helix_tangent_is_unit_and_advances_along_x() {
        let h = Helix::new(0.5, 3.0, 8, 1.0);
        for u in [0.0, 0.3, 0.77, 1.0] {
            let t = h.tangent_at(u);
            assert!(nearly_equal(t.norm(), 1.0, Tolerances::default()));
            assert!(t.x > 0.0);
        }
    }
}
