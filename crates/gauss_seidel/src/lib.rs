//! Fixed-budget Gauss-Seidel iteration on a pentadiagonal [`LinearSystem`].
//!
//! The solver runs a given number of in-place sweeps, records the L2 norm of the residual after
//! every sweep and accumulates the wall-clock time spent in the sweeps themselves. There is no
//! convergence test: the iteration count is the only termination control.
use std::io::Write;

use nalgebra::RealField;
use pentadiag::LinearSystem;
use thiserror::Error;

mod gauss_seidel;
pub mod instrument;
pub mod report;
mod traits;

pub use gauss_seidel::{sweep, Convergence, GaussSeidel};
pub use instrument::{LogMonitor, MonotonicClock, NoMonitor, Region};
pub use traits::{Clock, IterativeSolver, Monitor};

#[derive(Debug, Error)]
pub enum Error {
    #[error("One of the input arguments was illegal: {msg}")]
    IllegalInput { msg: String },

    #[error(transparent)]
    System(#[from] pentadiag::Error),

    #[error("Could not write the report")]
    Io(#[from] std::io::Error),
}

/// Runs `iterations` Gauss-Seidel sweeps on `system` and writes the report to `output`.
///
/// See [`solve_to_stdout`] for the same run reported on standard output.
pub fn solve<T, W>(
    system: &mut LinearSystem<T>,
    iterations: usize,
    output: &mut W,
) -> Result<Convergence<T>, Error>
where
    T: RealField + Copy,
    W: Write,
{
    let mut solver = GaussSeidel::new(iterations);
    let convergence = solver.solve(system)?;
    report::write_report(output, solver.name(), &convergence)?;
    Ok(convergence)
}

/// [`solve`] with the report written to standard output.
pub fn solve_to_stdout<T>(
    system: &mut LinearSystem<T>,
    iterations: usize,
) -> Result<Convergence<T>, Error>
where
    T: RealField + Copy,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let convergence = solve(system, iterations, &mut out)?;
    out.flush()?;
    Ok(convergence)
}
