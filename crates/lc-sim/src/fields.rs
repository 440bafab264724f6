//! Placement of field indicators tied to physical circuit elements.
//!
//! All failures here are soft: a missing or degenerate winding suppresses
//! the indicator for the frame, never the simulation step.

use crate::state::{CircuitParams, CircuitState};
use lc_core::Real;
use lc_path::{CircuitLayout, CompositePath, SegmentKind, Vector3};
use lc_results::FieldIndicator;

/// Induced-field arrows per winding turn.
pub const INDUCED_ARROWS_PER_TURN: usize = 4;

/// Indicators below these normalized magnitudes are suppressed entirely.
/// Presentation-tuned cutoffs, kept from the reference visualization.
pub const B_FIELD_VISIBILITY_THRESHOLD: Real = 0.02;
pub const INDUCED_FIELD_VISIBILITY_THRESHOLD: Real = 0.05;

/// Progress-fraction interval `[start, end)` of a named segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSpan {
    pub start: Real,
    pub end: Real,
}

impl ProgressSpan {
    pub fn width(&self) -> Real {
        self.end - self.start
    }
}

/// Derive the progress interval covered by the first segment of `kind`.
///
/// Returns `None` when the segment is absent or the derived interval is
/// degenerate or non-finite; callers suppress the dependent effect for the
/// frame.
pub fn effect_region(path: &CompositePath, kind: SegmentKind) -> Option<ProgressSpan> {
    let segment = match path.find_segment(kind) {
        Some(segment) => segment,
        None => {
            tracing::debug!(?kind, "segment not found, suppressing effect");
            return None;
        }
    };
    let total = path.total_length();
    let span = ProgressSpan {
        start: segment.span_start() / total,
        end: segment.cumulative_length / total,
    };
    if !span.start.is_finite() || !span.end.is_finite() || span.end <= span.start {
        tracing::debug!(?kind, ?span, "degenerate effect region, suppressing effect");
        return None;
    }
    Some(span)
}

/// Induced E field arrows spaced evenly over the winding's progress span.
///
/// Arrow direction follows the wire tangent, flipped against the sign of
/// `dI/dt` (the induced field opposes the change in current). Strength is
/// the inductor voltage normalized against the capacitor's peak voltage.
/// Returns an empty vector below the visibility threshold.
pub fn induced_field_arrows(
    path: &CompositePath,
    span: ProgressSpan,
    count: usize,
    state: &CircuitState,
    params: &CircuitParams,
) -> Vec<FieldIndicator> {
    let peak_voltage = (params.initial_charge() / params.capacitance()).abs().max(0.1);
    let strength = (state.v_l.abs() / peak_voltage).min(1.0);
    if strength <= INDUCED_FIELD_VISIBILITY_THRESHOLD || count == 0 {
        return Vec::new();
    }

    let orientation = -state.di_dt.signum();
    (0..count)
        .filter_map(|index| {
            let p = span.start + (index as Real / count as Real) * span.width();
            let anchor = path.point_at_progress(p);
            let tangent = path.tangent_at_progress(p);
            if !anchor.iter().all(|c| c.is_finite()) || tangent.norm() == 0.0 {
                return None;
            }
            let direction = tangent * orientation;
            Some(FieldIndicator {
                anchor: [anchor.x, anchor.y, anchor.z],
                direction: [direction.x, direction.y, direction.z],
                strength,
            })
        })
        .collect()
}

/// Net B field arrow through the winding.
///
/// Points along +X for positive current (right-hand rule for the layout's
/// winding sense), anchored at the winding center, with strength equal to
/// the current normalized against the oscillation's peak current.
pub fn b_field_indicator(
    state: &CircuitState,
    params: &CircuitParams,
    layout: &CircuitLayout,
) -> Option<FieldIndicator> {
    let peak = params.peak_current().max(1e-6);
    let strength = (state.i.abs() / peak).min(1.0);
    if strength <= B_FIELD_VISIBILITY_THRESHOLD {
        return None;
    }
    let direction = if state.i >= 0.0 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(-1.0, 0.0, 0.0)
    };
    let anchor = layout.solenoid_center();
    Some(FieldIndicator {
        anchor: [anchor.x, anchor.y, anchor.z],
        direction: [direction.x, direction.y, direction.z],
        strength,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CircuitParams, CircuitState};
    use lc_core::units::{microcoulomb, microfarad, millihenry};
    use lc_core::{nearly_equal, Tolerances};
    use lc_path::{CompositePath, LineSegment, Point3, SegmentSpec};

    fn params() -> CircuitParams {
        CircuitParams::new(microfarad(100.0), millihenry(50.0), microcoulomb(50.0)).unwrap()
    }

    fn line(x0: f64, x1: f64) -> Box<dyn lc_path::Curve> {
        Box::new(LineSegment::new(
            Point3::new(x0, 0.0, 0.0),
            Point3::new(x1, 0.0, 0.0),
        ))
    }

    #[test]
    fn effect_region_of_middle_segment() {
        // Lengths 1-2-1: the middle segment spans [1/4, 3/4)
        let path = CompositePath::build(vec![
            SegmentSpec::new(SegmentKind::WireLink, line(0.0, 1.0)),
            SegmentSpec::new(SegmentKind::InductorWinding, line(1.0, 3.0)),
            SegmentSpec::new(SegmentKind::WireLink, line(3.0, 4.0)),
        ])
        .unwrap();
        let span = effect_region(&path, SegmentKind::InductorWinding).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(span.start, 0.25, tol));
        assert!(nearly_equal(span.end, 0.75, tol));
        assert!(span.start >= 0.0 && span.start < span.end && span.end <= 1.0);
    }

    #[test]
    fn missing_segment_suppresses_region() {
        let path = CompositePath::build(vec![SegmentSpec::new(
            SegmentKind::WireLink,
            line(0.0, 1.0),
        )])
        .unwrap();
        assert!(effect_region(&path, SegmentKind::InductorWinding).is_none());
    }

    #[test]
    fn induced_arrows_oppose_rising_current() {
        let path = CircuitLayout::default().build_loop().unwrap();
        let span = effect_region(&path, SegmentKind::InductorWinding).unwrap();
        let p = params();
        let mut state = CircuitState::initial(&p);
        // Full charge: dI/dt at its maximum, Vl at the capacitor peak voltage
        state.di_dt = state.q / (p.inductance() * p.capacitance());
        state.v_l = -p.inductance() * state.di_dt;

        let arrows = induced_field_arrows(&path, span, 32, &state, &p);
        assert_eq!(arrows.len(), 32);
        for arrow in &arrows {
            // Winding advances along +X; opposing arrows run backwards
            assert!(arrow.direction[0] < 0.0);
            assert!(arrow.strength > 0.9);
        }
    }

    #[test]
    fn induced_arrows_vanish_with_no_voltage() {
        let path = CircuitLayout::default().build_loop().unwrap();
        let span = effect_region(&path, SegmentKind::InductorWinding).unwrap();
        let p = params();
        let mut state = CircuitState::initial(&p);
        state.v_l = 0.0;
        assert!(induced_field_arrows(&path, span, 32, &state, &p).is_empty());
    }

    #[test]
    fn b_field_tracks_current_sign_and_magnitude() {
        let p = params();
        let layout = CircuitLayout::default();
        let mut state = CircuitState::initial(&p);

        // No current: suppressed
        assert!(b_field_indicator(&state, &p, &layout).is_none());

        state.i = p.peak_current();
        let arrow = b_field_indicator(&state, &p, &layout).unwrap();
        assert_eq!(arrow.direction, [1.0, 0.0, 0.0]);
        assert!(nearly_equal(arrow.strength, 1.0, Tolerances::default()));

        state.i = -0.5 * p.peak_current();
        let arrow = b_field_indicator(&state, &p, &layout).unwrap();
        assert_eq!(arrow.direction, [-1.0, 0.0, 0.0]);
        assert!(nearly_equal(arrow.strength, 0.5, Tolerances::default()));
    }
}
