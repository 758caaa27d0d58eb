//! Error type shared by every fallible operation of the crate.

use thiserror::Error;

/// Errors raised while subdividing or reducing cells.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubdivError {
    /// Joining the faces of a child cell did not produce a closed solid within tolerance.
    #[error("faces do not close into a solid: {faces} faces welded into {vertices} vertices")]
    OpenBoundary { faces: usize, vertices: usize },
    /// The initial solid has (near) zero volume, so volume ratios are undefined.
    #[error("initial solid is degenerate (volume {volume})")]
    DegenerateInput { volume: f64 },
    /// A parameter lies outside its admissible range.
    #[error("parameter `{name}` out of range: {value}")]
    InvalidRange { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, SubdivError>;
