//! Residual `b - A x` of the current iterate and its L2 norm.
use std::ops::Range;

use nalgebra::{DVector, RealField};

use crate::{Bands, LinearSystem, SegmentKernel};

/// Writes `b[i] - (A x)[i]` into `out` for every row of a segment.
struct ResidualKernel<'a, T> {
    x: &'a [T],
    out: &'a mut [T],
}

impl<'a, T> SegmentKernel<T> for ResidualKernel<'a, T>
where
    T: RealField + Copy,
{
    #[inline]
    fn run<const WEST: bool, const EAST: bool, const SOUTH: bool, const NORTH: bool>(
        &mut self,
        bands: &Bands<'_, T>,
        rows: Range<usize>,
    ) {
        for i in rows {
            self.out[i] = bands.reduced_rhs::<WEST, EAST, SOUTH, NORTH>(self.x, i)
                - bands.main_diag[i] * self.x[i];
        }
    }
}

impl<T> LinearSystem<T>
where
    T: RealField + Copy,
{
    /// The residual vector `b - A x`, evaluated segment by segment.
    pub fn residual(&self) -> DVector<T> {
        let mut out = DVector::zeros(self.dim());
        let mut kernel = ResidualKernel {
            x: self.solution.as_slice(),
            out: out.as_mut_slice(),
        };
        self.bands().for_each_segment(&mut kernel);
        out
    }

    /// The residual vector `b - A x`, testing the validity of every band on every row.
    pub fn residual_branching(&self) -> DVector<T> {
        let bands = self.bands();
        let x = self.solution.as_slice();
        DVector::from_fn(self.dim(), |i, _| {
            bands.reduced_rhs_checked(x, i) - bands.main_diag[i] * x[i]
        })
    }

    /// `‖b - A x‖₂` of the current iterate.
    pub fn l2_norm(&self) -> T {
        self.residual().norm()
    }

    /// `‖b - A x‖₂`, computed from [`LinearSystem::residual_branching`].
    pub fn l2_norm_branching(&self) -> T {
        self.residual_branching().norm()
    }
}
