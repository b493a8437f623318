//! Dense reconstruction of a [`LinearSystem`] and a direct LU solve of it.
//!
//! Only intended for small grids: the reconstructed matrix has `(nx*ny)²` entries. It serves as
//! the reference answer against which the iterative solution is checked.
use log::{debug, warn};
use nalgebra::{DMatrix, DVector, RealField};

use crate::{Diagonal, Error, LinearSystem};

impl<T> LinearSystem<T>
where
    T: RealField + Copy,
{
    /// The full `n` by `n` matrix `A`.
    pub fn to_dense(&self) -> DMatrix<T> {
        let (nx, n) = (self.nx(), self.dim());
        let mut mat_a = DMatrix::zeros(n, n);
        for d in Diagonal::ALL {
            let band = self.diagonal(d);
            for i in (0..n).filter(|&i| d.is_valid(i, nx, n)) {
                mat_a[(i, d.column(i, nx))] = band[i];
            }
        }
        mat_a
    }

    /// Solves `A x = b` directly, ignoring the current iterate.
    pub fn direct_solve(&self) -> Result<DVector<T>, Error> {
        debug!("dense LU of a {0}x{0} matrix", self.dim());
        let mut mat_a = self.to_dense();
        let mut pivots = vec![0; self.dim()];
        lu_factor(&mut mat_a, &mut pivots).map_err(|col| {
            warn!("zero pivot in column {}", col);
            Error::SingularMatrix { col }
        })?;

        let mut x = self.rhs.clone();
        lu_solve(&mat_a, &pivots, &mut x);
        Ok(x)
    }
}

/// LU factorization of the square matrix A by Gaussian elimination with partial (row) pivoting.
///
/// On success the upper triangle of A (including its diagonal) holds U, the strictly lower
/// triangle holds the multipliers of the unit lower triangular L, and `pivots[k]` is the row
/// chosen as pivot at elimination step `k`.
///
/// On a zero pivot, returns the column (numbered from one) at which it was encountered.
fn lu_factor<T>(mat_a: &mut DMatrix<T>, pivots: &mut [usize]) -> Result<(), usize>
where
    T: RealField + Copy,
{
    let n = mat_a.ncols();

    for k in 0..n {
        // find the pivot row
        let mut l = k;
        for i in (k + 1)..n {
            if mat_a[(i, k)].abs() > mat_a[(l, k)].abs() {
                l = i;
            }
        }
        pivots[k] = l;

        if mat_a[(l, k)] == T::zero() {
            return Err(k + 1);
        }

        if l != k {
            mat_a.swap_rows(k, l);
        }

        // store the multipliers a(i,k)/a(k,k) below the diagonal
        let mult = mat_a[(k, k)].recip();
        for i in (k + 1)..n {
            mat_a[(i, k)] *= mult;
        }

        // row_i -= a(i,k)/a(k,k) * row_k, one column at a time
        for j in (k + 1)..n {
            let a_kj = mat_a[(k, j)];
            if a_kj != T::zero() {
                for i in (k + 1)..n {
                    let a_ik = mat_a[(i, k)];
                    mat_a[(i, j)] -= a_kj * a_ik;
                }
            }
        }
    }

    Ok(())
}

/// Solves `A x = b` in place in `b`, using the factors and pivots from [`lu_factor`].
fn lu_solve<T>(mat_a: &DMatrix<T>, pivots: &[usize], b: &mut DVector<T>)
where
    T: RealField + Copy,
{
    let n = mat_a.ncols();

    for (k, &pk) in pivots.iter().enumerate().take(n) {
        if pk != k {
            b.swap_rows(k, pk);
        }
    }

    // L y = b
    for k in 0..n.saturating_sub(1) {
        let bk = b[k];
        for i in (k + 1)..n {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }

    // U x = y
    for k in (0..n).rev() {
        b[k] /= mat_a[(k, k)];
        let bk = b[k];
        for i in 0..k {
            b[i] -= mat_a[(i, k)] * bk;
        }
    }
}
