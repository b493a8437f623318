//! Pentadiagonal linear systems arising from a 5-point stencil on a regular 2D grid.
//!
//! The matrix is kept as five parallel bands and is never stored as a general sparse or dense
//! matrix, except for the small-grid reference solve in [`LinearSystem::direct_solve`].
mod dense;
pub mod io;
mod residual;
mod segment;
mod system;

pub use segment::{Bands, Neighbours, Segment, SegmentKernel};
pub use system::{Diagonal, LinearSystem};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("One of the input arguments was illegal: {msg}")]
    IllegalInput { msg: String },

    #[error("A singular matrix was encountered during a LU factorization (col {col})")]
    SingularMatrix { col: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
