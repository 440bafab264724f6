//! lc-path: composite wire path for the LC circuit loop.
//!
//! Provides:
//! - Curve primitives (straight wire links, helical inductor winding)
//! - Arc-length-indexed composite path with progress queries
//! - Semantic segment kinds for effect placement
//! - The standard rectangular circuit layout

pub mod composite;
pub mod curve;
pub mod error;
pub mod layout;

pub use composite::{CompositePath, PathSegment, SegmentKind, SegmentSpec, MIN_SEGMENT_LENGTH};
pub use curve::{Curve, Helix, LineSegment};
pub use error::{PathError, PathResult};
pub use layout::CircuitLayout;

pub use nalgebra::{Point3, Vector3};
