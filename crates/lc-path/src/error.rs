//! Error types for path construction and queries.

use thiserror::Error;

pub type PathResult<T> = Result<T, PathError>;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Degenerate path: {what}")]
    DegeneratePath { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
