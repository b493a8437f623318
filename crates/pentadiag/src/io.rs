//! Plain-text dumps of a [`LinearSystem`], in `x y value` columns suitable for gnuplot.
use std::io::Write;

use nalgebra::{convert, RealField};

use crate::{Diagonal, Error, LinearSystem};

/// Writes the current iterate as `x y value` lines for the points `(i, j)` with `i` in
/// `1..nx` and `j` in `1..ny`, `j` outer and `i` inner.
pub fn write_mesh<T, W>(system: &LinearSystem<T>, output: &mut W) -> Result<(), Error>
where
    T: RealField + Copy,
    W: Write,
{
    let (hx, hy) = system.spacing();
    let x = system.solution();

    for j in 1..system.ny() {
        let y_j = convert::<f64, T>(j as f64) * hy;
        for i in 1..system.nx() {
            let x_i = convert::<f64, T>(i as f64) * hx;
            writeln!(output, "{:.6} {:.6} {:.6}", x_i, y_j, x[system.index(i, j)])?;
        }
    }
    Ok(())
}

/// Writes every band as a block of `column*hx row*hy coefficient` lines, one per live entry.
pub fn write_diagonals<T, W>(system: &LinearSystem<T>, output: &mut W) -> Result<(), Error>
where
    T: RealField + Copy,
    W: Write,
{
    let (hx, hy) = system.spacing();
    let (nx, n) = (system.nx(), system.dim());

    for d in Diagonal::ALL {
        writeln!(output, "# {} diagonal", d.name())?;
        let band = system.diagonal(d);
        for i in (0..n).filter(|&i| d.is_valid(i, nx, n)) {
            let col = convert::<f64, T>(d.column(i, nx) as f64) * hx;
            let row = convert::<f64, T>(i as f64) * hy;
            writeln!(output, "{:.6} {:.6} {:.6}", col, row, band[i])?;
        }
        writeln!(output)?;
    }
    Ok(())
}
