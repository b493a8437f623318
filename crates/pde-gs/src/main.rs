//! Solves the reference convection-reaction-diffusion problem on the square `(0, π)²` with a
//! fixed number of Gauss-Seidel sweeps and prints the residual history.
//!
//! Set `RUST_LOG=debug` (or `trace`, for every norm) to see what the solver is doing.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use gauss_seidel::{report, Convergence, GaussSeidel, IterativeSolver, LogMonitor};
use log::info;
use pentadiag::{io as dump, LinearSystem};

/// Largest system checked against the dense direct solution.
const MAX_REFERENCE_UNKNOWNS: usize = 4096;

#[derive(Parser)]
#[command(
    name = "pde-gs",
    version,
    about = "Gauss-Seidel on a five-point finite-difference discretization"
)]
struct Cli {
    /// Interior grid points along x
    #[arg(short = 'n', long)]
    nx: usize,

    /// Interior grid points along y [default: nx]
    #[arg(short = 'm', long)]
    ny: Option<usize>,

    /// Number of Gauss-Seidel sweeps
    #[arg(short = 'i', long)]
    iterations: usize,

    /// Write the report here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Dump the final iterate as `x y value` lines
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Dump the assembled bands as `column row coefficient` lines
    #[arg(long)]
    diagonals: Option<PathBuf>,

    /// Compare the iterate with a dense direct solve
    #[arg(long)]
    reference: bool,
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn compare_with_reference(system: &LinearSystem<f64>) -> Result<()> {
    if system.dim() > MAX_REFERENCE_UNKNOWNS {
        bail!(
            "--reference supports at most {} unknowns, the grid has {}",
            MAX_REFERENCE_UNKNOWNS,
            system.dim()
        );
    }
    let exact = system
        .direct_solve()
        .context("Dense direct solve failed")?;
    let deviation = (system.solution() - exact).amax();
    info!("max |x - x_direct| = {:e}", deviation);
    Ok(())
}

fn run(cli: &Cli) -> Result<Convergence<f64>> {
    let nx = cli.nx;
    let ny = cli.ny.unwrap_or(nx);

    let mut system = poisson::assemble(nx, ny)
        .with_context(|| format!("Failed to assemble the {}x{} system", nx, ny))?;

    if let Some(path) = &cli.diagonals {
        let mut out = create(path)?;
        dump::write_diagonals(&system, &mut out)
            .and_then(|()| out.flush().map_err(Into::into))
            .with_context(|| format!("Failed to write the diagonals to {}", path.display()))?;
    }

    let mut solver = GaussSeidel::new(cli.iterations).with_monitor(LogMonitor);
    info!("{}: {} sweeps on {}x{}", solver.name(), solver.iterations(), nx, ny);
    let convergence = solver.solve(&mut system)?;

    match &cli.output {
        Some(path) => {
            let mut out = create(path)?;
            report::write_report(&mut out, solver.name(), &convergence)
                .map_err(anyhow::Error::from)
                .and_then(|()| out.flush().map_err(Into::into))
                .with_context(|| format!("Failed to write the report to {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            report::write_report(&mut stdout.lock(), solver.name(), &convergence)
                .context("Failed to write the report")?;
        }
    }

    if let Some(path) = &cli.mesh {
        let mut out = create(path)?;
        dump::write_mesh(&system, &mut out)
            .and_then(|()| out.flush().map_err(Into::into))
            .with_context(|| format!("Failed to write the mesh to {}", path.display()))?;
    }

    if cli.reference {
        compare_with_reference(&system)?;
    }

    Ok(convergence)
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let convergence = run(&cli)?;
    info!(
        "{} iterations, {:.6}ms per sweep, final residual {:?}",
        convergence.iterations,
        convergence.avg_iteration_ms,
        convergence.last_norm()
    );
    Ok(())
}
