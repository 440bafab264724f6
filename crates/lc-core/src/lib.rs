//! lc-core: stable foundation for the LC oscillator workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for the electrical boundary)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LcError, LcResult};
pub use numeric::*;
pub use units::*;
