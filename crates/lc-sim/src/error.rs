//! Error types for simulation operations.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Errors encountered while driving the simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Numerical instability at t={t_s}s (q={q_c} C, i={i_a} A); reset required")]
    Unstable { t_s: f64, q_c: f64, i_a: f64 },

    #[error(transparent)]
    Path(#[from] lc_path::PathError),

    #[error(transparent)]
    Core(#[from] lc_core::LcError),

    #[error(transparent)]
    Results(#[from] lc_results::ResultsError),
}
