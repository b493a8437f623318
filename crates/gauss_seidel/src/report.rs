//! Text report of a solve: mean iteration time and the residual history.
use std::io::Write;

use nalgebra::RealField;

use crate::{Convergence, Error};

const RULE: &str = "###########";

/// Writes the report of `convergence` for the method `method` to `output`:
///
/// ```text
/// ###########
/// # Gauss-Seidel method time: 0.012345ms
/// #
/// # L2 Residual Norm
/// #i = 0 : 12.345678
/// ...
/// ###########
/// ```
pub fn write_report<T, W>(
    output: &mut W,
    method: &str,
    convergence: &Convergence<T>,
) -> Result<(), Error>
where
    T: RealField + Copy,
    W: Write,
{
    writeln!(output, "{}", RULE)?;
    writeln!(output, "# {} time: {:.6}ms", method, convergence.avg_iteration_ms)?;
    writeln!(output, "#")?;

    writeln!(output, "# L2 Residual Norm")?;
    for (i, norm) in convergence.norms.iter().enumerate() {
        writeln!(output, "#i = {} : {:.6}", i, norm)?;
    }

    writeln!(output, "{}", RULE)?;
    Ok(())
}
