//! Partition of the unknowns into contiguous ranges that share one neighbour set.
//!
//! Equations at the edges of the flattened grid reference fewer neighbours than interior ones.
//! Instead of testing the validity of every band for every row, the index range `0..n` is split
//! once into segments whose rows all reference the same neighbours, and each segment is handed to
//! a kernel that is monomorphized for that neighbour set. The inner loops then carry no
//! per-element branching.
//!
//! For a grid with at least two rows the partition is:
//!
//! | range              | west | east | south | north |
//! |--------------------|------|------|-------|-------|
//! | `0..1`             |      |  x   |       |   x   |
//! | `1..nx`            |  x   |  x   |       |   x   |
//! | `nx..n-nx`         |  x   |  x   |   x   |   x   |
//! | `n-nx..n-1`        |  x   |  x   |   x   |       |
//! | `n-1..n`           |  x   |      |   x   |       |
//!
//! West and east neighbours that cross a grid-row boundary are still multiplied, against the
//! zero stored in the band at that row.
use std::ops::Range;

use nalgebra::RealField;

use crate::Diagonal;

/// Which of the four stencil neighbours the rows of a segment reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Neighbours {
    /// `x[i - 1]`
    pub west: bool,
    /// `x[i + 1]`
    pub east: bool,
    /// `x[i - nx]`
    pub south: bool,
    /// `x[i + nx]`
    pub north: bool,
}

impl Neighbours {
    pub const fn new(west: bool, east: bool, south: bool, north: bool) -> Self {
        Neighbours {
            west,
            east,
            south,
            north,
        }
    }

    /// Neighbours that exist in index space for row `i`, ignoring grid-row boundaries.
    #[cfg(test)]
    fn of(i: usize, nx: usize, n: usize) -> Self {
        Neighbours {
            west: i >= 1,
            east: i + 1 < n,
            south: i >= nx,
            north: i + nx < n,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub range: Range<usize>,
    pub neighbours: Neighbours,
}

/// Splits `0..nx*ny` into at most five segments, dropping empty ones.
pub(crate) fn partition(nx: usize, ny: usize) -> Vec<Segment> {
    let n = nx * ny;

    let spans = if n == 1 {
        vec![(0..1, Neighbours::new(false, false, false, false))]
    } else if ny == 1 {
        vec![
            (0..1, Neighbours::new(false, true, false, false)),
            (1..n - 1, Neighbours::new(true, true, false, false)),
            (n - 1..n, Neighbours::new(true, false, false, false)),
        ]
    } else {
        vec![
            (0..1, Neighbours::new(false, true, false, true)),
            (1..nx, Neighbours::new(true, true, false, true)),
            (nx..n - nx, Neighbours::new(true, true, true, true)),
            (n - nx..n - 1, Neighbours::new(true, true, true, false)),
            (n - 1..n, Neighbours::new(true, false, true, false)),
        ]
    };

    spans
        .into_iter()
        .filter(|(range, _)| !range.is_empty())
        .map(|(range, neighbours)| Segment { range, neighbours })
        .collect()
}

/// Borrowed view of the coefficients and right-hand side of a [`LinearSystem`](crate::LinearSystem).
#[derive(Clone, Copy, Debug)]
pub struct Bands<'a, T> {
    pub nx: usize,
    pub segments: &'a [Segment],
    pub main_diag: &'a [T],
    pub super_diag: &'a [T],
    pub sub_diag: &'a [T],
    pub far_super_diag: &'a [T],
    pub far_sub_diag: &'a [T],
    pub rhs: &'a [T],
}

/// Work applied to every row of a segment, specialised on the segment's neighbour set.
pub trait SegmentKernel<T> {
    fn run<const WEST: bool, const EAST: bool, const SOUTH: bool, const NORTH: bool>(
        &mut self,
        bands: &Bands<'_, T>,
        rows: Range<usize>,
    );
}

impl<'a, T> Bands<'a, T>
where
    T: RealField + Copy,
{
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    /// `b[i]` minus the off-diagonal terms of row `i` for the given neighbour set.
    ///
    /// Terms are subtracted east, north, west, south. West and east terms across a grid-row
    /// boundary multiply the stored zero, so an infinite neighbour yields `NaN` here where
    /// [`Bands::reduced_rhs_checked`] skips the term.
    #[inline(always)]
    pub fn reduced_rhs<const WEST: bool, const EAST: bool, const SOUTH: bool, const NORTH: bool>(
        &self,
        x: &[T],
        i: usize,
    ) -> T {
        let mut acc = self.rhs[i];
        if EAST {
            acc -= self.super_diag[i] * x[i + 1];
        }
        if NORTH {
            acc -= self.far_super_diag[i] * x[i + self.nx];
        }
        if WEST {
            acc -= self.sub_diag[i] * x[i - 1];
        }
        if SOUTH {
            acc -= self.far_sub_diag[i] * x[i - self.nx];
        }
        acc
    }

    /// Same as [`Bands::reduced_rhs`], deciding every term from the band validity predicates.
    pub fn reduced_rhs_checked(&self, x: &[T], i: usize) -> T {
        let (nx, n) = (self.nx, self.len());
        let mut acc = self.rhs[i];
        if Diagonal::Super.is_valid(i, nx, n) {
            acc -= self.super_diag[i] * x[i + 1];
        }
        if Diagonal::FarSuper.is_valid(i, nx, n) {
            acc -= self.far_super_diag[i] * x[i + nx];
        }
        if Diagonal::Sub.is_valid(i, nx, n) {
            acc -= self.sub_diag[i] * x[i - 1];
        }
        if Diagonal::FarSub.is_valid(i, nx, n) {
            acc -= self.far_sub_diag[i] * x[i - nx];
        }
        acc
    }

    /// Runs `kernel` over every segment in ascending index order.
    pub fn for_each_segment<K>(&self, kernel: &mut K)
    where
        K: SegmentKernel<T>,
    {
        for segment in self.segments {
            segment.apply(self, kernel);
        }
    }
}

impl Segment {
    /// Runs `kernel` over the rows of this segment, monomorphized on its neighbour set.
    pub fn apply<T, K>(&self, bands: &Bands<'_, T>, kernel: &mut K)
    where
        K: SegmentKernel<T>,
    {
        let rows = self.range.clone();
        let Neighbours {
            west,
            east,
            south,
            north,
        } = self.neighbours;

        macro_rules! dispatch {
            ($($w:tt $e:tt $s:tt $n:tt),* $(,)?) => {
                match (west, east, south, north) {
                    $(($w, $e, $s, $n) => kernel.run::<$w, $e, $s, $n>(bands, rows),)*
                }
            };
        }

        dispatch!(
            false false false false,
            false false false true,
            false false true false,
            false false true true,
            false true false false,
            false true false true,
            false true true false,
            false true true true,
            true false false false,
            true false false true,
            true false true false,
            true false true true,
            true true false false,
            true true false true,
            true true true false,
            true true true true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_covers_range() {
        for nx in 1..7 {
            for ny in 1..7 {
                let n = nx * ny;
                let segments = partition(nx, ny);
                let mut next = 0;
                for segment in &segments {
                    assert!(!segment.range.is_empty());
                    assert_eq!(segment.range.start, next, "gap at {nx}x{ny}");
                    next = segment.range.end;
                }
                assert_eq!(next, n);
                assert!(segments.len() <= 5);
            }
        }
    }

    #[test]
    fn test_partition_neighbours_match_rows() {
        for nx in 1..7 {
            for ny in 1..7 {
                let n = nx * ny;
                for segment in partition(nx, ny) {
                    for i in segment.range.clone() {
                        assert_eq!(
                            segment.neighbours,
                            Neighbours::of(i, nx, n),
                            "row {i} of {nx}x{ny}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_partition_shapes() {
        assert_eq!(partition(1, 1).len(), 1);
        assert_eq!(partition(4, 1).len(), 3);
        assert_eq!(partition(2, 1).len(), 2);
        assert_eq!(partition(4, 4).len(), 5);
        // a single column has no first-row or last-row rest
        assert_eq!(partition(1, 4).len(), 3);
        // two rows have no interior rows
        let segments = partition(3, 2);
        assert_eq!(segments.len(), 4);
        assert!(segments
            .iter()
            .all(|s| s.neighbours != Neighbours::new(true, true, true, true)));
    }

    struct Visits(Vec<(usize, Neighbours)>);

    impl SegmentKernel<f64> for Visits {
        fn run<const WEST: bool, const EAST: bool, const SOUTH: bool, const NORTH: bool>(
            &mut self,
            _bands: &Bands<'_, f64>,
            rows: Range<usize>,
        ) {
            for i in rows {
                self.0.push((i, Neighbours::new(WEST, EAST, SOUTH, NORTH)));
            }
        }
    }

    #[test]
    fn test_dispatch_visits_rows_in_order() {
        let sys = crate::LinearSystem::<f64>::new(3, 3).unwrap();
        let mut visits = Visits(Vec::new());
        sys.bands().for_each_segment(&mut visits);

        let rows: Vec<usize> = visits.0.iter().map(|(i, _)| *i).collect();
        assert_eq!(rows, (0..9).collect::<Vec<_>>());
        for (i, neighbours) in visits.0 {
            assert_eq!(neighbours, Neighbours::of(i, 3, 9));
        }
    }
}
