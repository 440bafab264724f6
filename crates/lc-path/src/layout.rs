//! Standard rectangular LC circuit layout.
//!
//! Capacitor on the left (plates in the YZ plane), solenoid centered on the
//! top wire, rectangular return loop. Segment order follows conventional
//! current flow for positive charge leaving the left plate.

use crate::composite::{CompositePath, SegmentKind, SegmentSpec};
use crate::curve::{Curve, Helix, LineSegment};
use crate::error::PathResult;
use lc_core::Real;
use nalgebra::Point3;

/// Geometry-affecting dimensions of the circuit loop.
///
/// Changing any of these requires a wholesale path rebuild.
#[derive(Clone, Copy, Debug)]
pub struct CircuitLayout {
    pub solenoid_radius: Real,
    pub solenoid_length: Real,
    pub solenoid_turns: u32,
    pub wire_radius: Real,
    /// Side of the square capacitor plates; also the loop height.
    pub cap_plate_size: Real,
    pub cap_thickness: Real,
    pub cap_separation: Real,
}

impl Default for CircuitLayout {
    fn default() -> Self {
        Self {
            solenoid_radius: 0.5,
            solenoid_length: 3.0,
            solenoid_turns: 8,
            wire_radius: 0.04,
            cap_plate_size: 2.0,
            cap_thickness: 0.05,
            cap_separation: 0.2,
        }
    }
}

impl CircuitLayout {
    /// Width of the main wire rectangle.
    pub fn rect_width(&self) -> Real {
        self.solenoid_length + 2.0
    }

    /// Height of the main wire rectangle.
    pub fn rect_height(&self) -> Real {
        self.cap_plate_size
    }

    /// X coordinate of the capacitor midpoint, left of the rectangle.
    pub fn cap_center_x(&self) -> Real {
        -self.rect_width() / 2.0 - 0.5
    }

    /// X positions of the (left, right) plate centers.
    pub fn plate_positions(&self) -> (Real, Real) {
        let cx = self.cap_center_x();
        (
            cx - self.cap_separation / 2.0,
            cx + self.cap_separation / 2.0,
        )
    }

    /// Y of the top wire run, which is also the solenoid axis height.
    pub fn top_wire_y(&self) -> Real {
        self.rect_height() / 2.0
    }

    /// Center of the winding, the anchor for the net B field indicator.
    pub fn solenoid_center(&self) -> Point3<Real> {
        Point3::new(0.0, self.top_wire_y(), 0.0)
    }

    /// Assemble the closed loop in traversal order.
    ///
    /// The plate-to-plate gap link is tagged [`SegmentKind::CapacitorGap`]
    /// and marked non-droppable so consumers can locate the gap even when
    /// the separation shrinks below the drop epsilon. The final link runs
    /// along the left plate back to the starting point, closing the loop so
    /// progress 0 and 1 coincide.
    pub fn build_loop(&self) -> PathResult<CompositePath> {
        let h = self.rect_height();
        let (left_x, right_x) = self.plate_positions();

        let cap_l_top = Point3::new(left_x, h / 2.0, 0.0);
        let cap_l_bottom = Point3::new(left_x, -h / 2.0, 0.0);
        let cap_r_top = Point3::new(right_x, h / 2.0, 0.0);

        let helix = Helix::new(
            self.solenoid_radius,
            self.solenoid_length,
            self.solenoid_turns,
            self.top_wire_y(),
        );
        let sol_start = helix.point_at(0.0);
        let sol_end = helix.point_at(1.0);

        let top_near = Point3::new(right_x + 0.1, h / 2.0, 0.0);
        let top_far = Point3::new(self.rect_width() / 2.0, h / 2.0, 0.0);
        let bottom_far = Point3::new(self.rect_width() / 2.0, -h / 2.0, 0.0);

        CompositePath::build(vec![
            SegmentSpec::non_droppable(
                SegmentKind::CapacitorGap,
                Box::new(LineSegment::new(cap_l_top, cap_r_top)),
            ),
            SegmentSpec::new(
                SegmentKind::WireLink,
                Box::new(LineSegment::new(cap_r_top, top_near)),
            ),
            SegmentSpec::new(
                SegmentKind::WireLink,
                Box::new(LineSegment::new(top_near, sol_start)),
            ),
            SegmentSpec::new(SegmentKind::InductorWinding, Box::new(helix.clone())),
            SegmentSpec::new(
                SegmentKind::WireLink,
                Box::new(LineSegment::new(sol_end, top_far)),
            ),
            SegmentSpec::new(
                SegmentKind::WireLink,
                Box::new(LineSegment::new(top_far, bottom_far)),
            ),
            SegmentSpec::new(
                SegmentKind::WireLink,
                Box::new(LineSegment::new(bottom_far, cap_l_bottom)),
            ),
            // Up the left plate, closing the loop
            SegmentSpec::new(
                SegmentKind::WireLink,
                Box::new(LineSegment::new(cap_l_bottom, cap_l_top)),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_loop_builds() {
        let path = CircuitLayout::default().build_loop().unwrap();
        assert!(path.total_length() > 0.0);
        assert_eq!(path.segments().len(), 8);
        assert!(path.find_segment(SegmentKind::InductorWinding).is_some());
        assert!(path.find_segment(SegmentKind::CapacitorGap).is_some());
    }

    #[test]
    fn loop_is_closed() {
        let path = CircuitLayout::default().build_loop().unwrap();
        let start = path.point_at_progress(0.0);
        let end = path.point_at_progress(1.0);
        assert!((end - start).norm() < 1e-9);
    }
}
