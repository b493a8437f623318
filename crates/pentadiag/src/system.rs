use log::debug;
use nalgebra::{convert, DVector, RealField, Scalar};
use num_traits::Zero;

use crate::{
    segment::{partition, Bands, Segment},
    Error,
};

/// The five bands of a pentadiagonal matrix built from a 5-point stencil on an `nx` by `ny` grid.
///
/// Row `i` of the matrix is the equation of unknown `i`. Each band stores, at index `i`, the
/// coefficient that row `i` applies to one neighbour of `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Diagonal {
    /// Coefficient of `x[i - nx]`, the neighbour one grid row below.
    FarSub,
    /// Coefficient of `x[i - 1]`, the neighbour to the left.
    Sub,
    /// Coefficient of `x[i]`.
    Main,
    /// Coefficient of `x[i + 1]`, the neighbour to the right.
    Super,
    /// Coefficient of `x[i + nx]`, the neighbour one grid row above.
    FarSuper,
}

impl Diagonal {
    /// All bands, from the highest column offset to the lowest.
    pub const ALL: [Diagonal; 5] = [
        Diagonal::FarSuper,
        Diagonal::Super,
        Diagonal::Main,
        Diagonal::Sub,
        Diagonal::FarSub,
    ];

    /// Whether row `i` of a system with `n` unknowns and rows of length `nx` has a live
    /// coefficient on this band.
    ///
    /// `Sub` and `Super` never cross a grid-row boundary, `FarSub` and `FarSuper` never leave the
    /// grid. Entries for which this returns `false` are kept at zero.
    #[inline]
    pub fn is_valid(self, i: usize, nx: usize, n: usize) -> bool {
        i < n
            && match self {
                Diagonal::FarSub => i >= nx,
                Diagonal::Sub => i % nx != 0,
                Diagonal::Main => true,
                Diagonal::Super => (i + 1) % nx != 0,
                Diagonal::FarSuper => i + nx < n,
            }
    }

    /// Column of the matrix entry stored at row `i` of this band. Only meaningful when
    /// [`Diagonal::is_valid`] holds for `i`.
    #[inline]
    pub fn column(self, i: usize, nx: usize) -> usize {
        match self {
            Diagonal::FarSub => i - nx,
            Diagonal::Sub => i - 1,
            Diagonal::Main => i,
            Diagonal::Super => i + 1,
            Diagonal::FarSuper => i + nx,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Diagonal::FarSub => "far-sub",
            Diagonal::Sub => "sub",
            Diagonal::Main => "main",
            Diagonal::Super => "super",
            Diagonal::FarSuper => "far-super",
        }
    }
}

/// A pentadiagonal system `A x = b` over the interior points of an `nx` by `ny` grid, together
/// with the current iterate `x`.
///
/// Unknowns are numbered row-major: interior point `(i, j)` with `i` in `1..=nx` and `j` in
/// `1..=ny` has index `(j - 1) * nx + (i - 1)`.
#[derive(Clone, Debug)]
pub struct LinearSystem<T: Scalar> {
    nx: usize,
    ny: usize,
    pub(crate) main_diag: DVector<T>,
    pub(crate) super_diag: DVector<T>,
    pub(crate) sub_diag: DVector<T>,
    pub(crate) far_super_diag: DVector<T>,
    pub(crate) far_sub_diag: DVector<T>,
    pub(crate) rhs: DVector<T>,
    pub(crate) solution: DVector<T>,
    segments: Vec<Segment>,
}

impl<T> LinearSystem<T>
where
    T: Scalar + Zero,
{
    /// Allocates a zeroed system for an `nx` by `ny` grid of unknowns.
    pub fn new(nx: usize, ny: usize) -> Result<Self, Error> {
        if nx == 0 || ny == 0 {
            return Err(Error::IllegalInput {
                msg: format!("grid must have at least one interior point per axis, got {nx}x{ny}"),
            });
        }
        let n = nx.checked_mul(ny).ok_or_else(|| Error::IllegalInput {
            msg: format!("grid {nx}x{ny} is too large"),
        })?;

        let segments = partition(nx, ny);
        debug!(
            "allocating {}x{} system, {} unknowns in {} segments",
            nx,
            ny,
            n,
            segments.len()
        );

        Ok(LinearSystem {
            nx,
            ny,
            main_diag: DVector::zeros(n),
            super_diag: DVector::zeros(n),
            sub_diag: DVector::zeros(n),
            far_super_diag: DVector::zeros(n),
            far_sub_diag: DVector::zeros(n),
            rhs: DVector::zeros(n),
            solution: DVector::zeros(n),
            segments,
        })
    }

    /// Sets the iterate back to zero.
    pub fn reset_solution(&mut self) {
        self.solution.fill(T::zero());
    }
}

impl<T: Scalar> LinearSystem<T> {
    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of unknowns, `nx * ny`.
    pub fn dim(&self) -> usize {
        self.nx * self.ny
    }

    /// Index of interior point `(i, j)`, both 1-based.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        (j - 1) * self.nx + (i - 1)
    }

    pub fn diagonal(&self, diagonal: Diagonal) -> &DVector<T> {
        match diagonal {
            Diagonal::FarSub => &self.far_sub_diag,
            Diagonal::Sub => &self.sub_diag,
            Diagonal::Main => &self.main_diag,
            Diagonal::Super => &self.super_diag,
            Diagonal::FarSuper => &self.far_super_diag,
        }
    }

    pub fn diagonal_mut(&mut self, diagonal: Diagonal) -> &mut DVector<T> {
        match diagonal {
            Diagonal::FarSub => &mut self.far_sub_diag,
            Diagonal::Sub => &mut self.sub_diag,
            Diagonal::Main => &mut self.main_diag,
            Diagonal::Super => &mut self.super_diag,
            Diagonal::FarSuper => &mut self.far_super_diag,
        }
    }

    pub fn rhs(&self) -> &DVector<T> {
        &self.rhs
    }

    pub fn rhs_mut(&mut self) -> &mut DVector<T> {
        &mut self.rhs
    }

    pub fn solution(&self) -> &DVector<T> {
        &self.solution
    }

    pub fn solution_mut(&mut self) -> &mut DVector<T> {
        &mut self.solution
    }

    /// The contiguous index ranges that share one neighbour set, in ascending order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Read-only view of the coefficients and right-hand side.
    pub fn bands(&self) -> Bands<'_, T> {
        Bands {
            nx: self.nx,
            segments: &self.segments,
            main_diag: self.main_diag.as_slice(),
            super_diag: self.super_diag.as_slice(),
            sub_diag: self.sub_diag.as_slice(),
            far_super_diag: self.far_super_diag.as_slice(),
            far_sub_diag: self.far_sub_diag.as_slice(),
            rhs: self.rhs.as_slice(),
        }
    }

    /// Splits the system into its read-only coefficients and the mutable iterate, so that the
    /// iterate can be updated in place while the bands are read.
    pub fn bands_and_solution_mut(&mut self) -> (Bands<'_, T>, &mut [T]) {
        let bands = Bands {
            nx: self.nx,
            segments: &self.segments,
            main_diag: self.main_diag.as_slice(),
            super_diag: self.super_diag.as_slice(),
            sub_diag: self.sub_diag.as_slice(),
            far_super_diag: self.far_super_diag.as_slice(),
            far_sub_diag: self.far_sub_diag.as_slice(),
            rhs: self.rhs.as_slice(),
        };
        (bands, self.solution.as_mut_slice())
    }
}

impl<T> LinearSystem<T>
where
    T: RealField + Copy,
{
    /// Grid spacing `(hx, hy)` for a domain of side `π` with the boundary at `0` and `π`.
    pub fn spacing(&self) -> (T, T) {
        let hx = T::pi() / convert::<f64, T>((self.nx + 1) as f64);
        let hy = T::pi() / convert::<f64, T>((self.ny + 1) as f64);
        (hx, hy)
    }

    /// Entry `(row, col)` of the matrix, reconstructed from the bands.
    pub fn coefficient(&self, row: usize, col: usize) -> T {
        let n = self.dim();
        Diagonal::ALL
            .iter()
            .find(|d| d.is_valid(row, self.nx, n) && d.column(row, self.nx) == col)
            .map(|&d| self.diagonal(d)[row])
            .unwrap_or_else(T::zero)
    }
}
