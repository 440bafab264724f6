//! lc-results: per-tick snapshot types and the bounded history window.

pub mod types;
pub mod window;

pub use types::*;
pub use window::RollingWindow;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Invalid window capacity: {capacity}")]
    InvalidCapacity { capacity: usize },
}
