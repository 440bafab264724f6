//! Arc-length-indexed composite path built from typed curve segments.

use crate::curve::Curve;
use crate::error::{PathError, PathResult};
use lc_core::Real;
use nalgebra::{Point3, Vector3};

/// Segments shorter than this are construction artifacts (zero-length joins
/// used to pin a curve origin) and are dropped before indexing, unless the
/// spec is marked non-droppable.
pub const MIN_SEGMENT_LENGTH: Real = 1e-6;

/// Semantic role of a path contributor, distinct from its geometric type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Plain straight wire link.
    WireLink,
    /// The helical inductor winding.
    InductorWinding,
    /// Conceptual link across the capacitor plates, closing the loop.
    CapacitorGap,
}

/// One segment offered to [`CompositePath::build`].
pub struct SegmentSpec {
    pub kind: SegmentKind,
    pub curve: Box<dyn Curve>,
    /// When false, the segment survives even below [`MIN_SEGMENT_LENGTH`].
    pub droppable: bool,
}

impl SegmentSpec {
    pub fn new(kind: SegmentKind, curve: Box<dyn Curve>) -> Self {
        Self {
            kind,
            curve,
            droppable: true,
        }
    }

    pub fn non_droppable(kind: SegmentKind, curve: Box<dyn Curve>) -> Self {
        Self {
            kind,
            curve,
            droppable: false,
        }
    }
}

/// An indexed contributor to the composite path.
pub struct PathSegment {
    pub kind: SegmentKind,
    pub length: Real,
    /// Running total of segment lengths, including this one. Strictly
    /// increasing along the traversal order.
    pub cumulative_length: Real,
    curve: Box<dyn Curve>,
}

impl PathSegment {
    /// Arc length at which this segment begins.
    pub fn span_start(&self) -> Real {
        self.cumulative_length - self.length
    }
}

/// The joined circuit loop: an ordered segment sequence with a precomputed
/// total length and per-segment cumulative index.
///
/// Built once at initialization and rebuilt wholesale on any
/// geometry-affecting reset; never partially mutated.
pub struct CompositePath {
    segments: Vec<PathSegment>,
    total_length: Real,
}

impl std::fmt::Debug for CompositePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositePath")
            .field("segments", &self.segments.len())
            .field("total_length", &self.total_length)
            .finish()
    }
}

impl CompositePath {
    /// Assemble a path from segments listed in physical traversal order.
    ///
    /// Progress 0 -> 1 then traces the loop once, consistent with the sign
    /// convention used by the circuit current.
    pub fn build(specs: Vec<SegmentSpec>) -> PathResult<Self> {
        let mut segments = Vec::with_capacity(specs.len());
        let mut cumulative = 0.0;
        for spec in specs {
            let length = spec.curve.length();
            if !length.is_finite() {
                return Err(PathError::DegeneratePath {
                    what: "segment with non-finite length",
                });
            }
            if spec.droppable && length < MIN_SEGMENT_LENGTH {
                continue;
            }
            cumulative += length;
            segments.push(PathSegment {
                kind: spec.kind,
                length,
                cumulative_length: cumulative,
                curve: spec.curve,
            });
        }

        if segments.is_empty() {
            return Err(PathError::DegeneratePath {
                what: "no segments survived construction",
            });
        }
        if cumulative <= 0.0 {
            return Err(PathError::DegeneratePath {
                what: "total path length is non-positive",
            });
        }

        Ok(Self {
            segments,
            total_length: cumulative,
        })
    }

    pub fn total_length(&self) -> Real {
        self.total_length
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Resolve a progress value to the owning segment and local fraction.
    fn locate(&self, progress: Real) -> (&PathSegment, Real) {
        let p = progress.clamp(0.0, 1.0);
        let s = p * self.total_length;
        let segment = self
            .segments
            .iter()
            .find(|seg| seg.cumulative_length >= s)
            .unwrap_or_else(|| {
                // s can exceed the last cumulative length by rounding
                self.segments.last().expect("non-empty by construction")
            });
        let u = if segment.length > 0.0 {
            ((s - segment.span_start()) / segment.length).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (segment, u)
    }

    /// 3-D point at fractional position `p` in `[0, 1]` along the loop.
    ///
    /// Continuous across segment boundaries: adjoining segments are
    /// constructed with coincident endpoints.
    pub fn point_at_progress(&self, p: Real) -> Point3<Real> {
        let (segment, u) = self.locate(p);
        segment.curve.point_at(u)
    }

    /// Unit tangent at fractional position `p`, oriented with traversal.
    pub fn tangent_at_progress(&self, p: Real) -> Vector3<Real> {
        let (segment, u) = self.locate(p);
        segment.curve.tangent_at(u)
    }

    /// Linear scan for the first segment with the given semantic kind.
    ///
    /// `None` is an expected outcome; callers suppress the dependent visual
    /// effect rather than failing the frame.
    pub fn find_segment(&self, kind: SegmentKind) -> Option<&PathSegment> {
        self.segments.iter().find(|seg| seg.kind == kind)
    }
}
