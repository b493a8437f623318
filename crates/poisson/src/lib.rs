//! Finite-difference discretization of a 2D elliptic problem on `(0, π)²` into a pentadiagonal
//! system.
//!
//! The problem solved is
//!
//! ```math
//! -Δu + cx ∂u/∂x + cy ∂u/∂y + k u = f(x, y)
//! ```
//!
//! with Dirichlet boundary values, discretized with centred differences on the interior points
//! of an `nx` by `ny` grid. Boundary values are eliminated into the right-hand side.
mod assemble;
mod sinh;
mod traits;

pub use assemble::{assemble, assemble_with, fill, Stencil};
pub use sinh::SinhProblem;
pub use traits::Problem;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    System(#[from] pentadiag::Error),
}
