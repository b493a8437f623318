use std::ops::Range;

use log::{debug, trace, warn};
use nalgebra::RealField;
use pentadiag::{Bands, LinearSystem, SegmentKernel};

use crate::{Clock, Error, IterativeSolver, Monitor, MonotonicClock, NoMonitor, Region};

/// Outcome of a fixed-budget solve.
#[derive(Clone, Debug, PartialEq)]
pub struct Convergence<T> {
    /// Number of sweeps performed.
    pub iterations: usize,
    /// Mean wall-clock time of one sweep, in milliseconds. Excludes the norm evaluation.
    pub avg_iteration_ms: f64,
    /// `‖b - A x‖₂` after each sweep, indexed by iteration.
    pub norms: Vec<T>,
}

impl<T: Copy> Convergence<T> {
    /// The residual norm after the final sweep.
    pub fn last_norm(&self) -> Option<T> {
        self.norms.last().copied()
    }
}

/// Gauss-Seidel solver with a fixed iteration budget.
///
/// Each sweep visits the unknowns in ascending index order and replaces `x[i]` by
///
/// ```math
/// x[i] = (b[i] - Σ_{j≠i} A[i][j] x[j]) / A[i][i]
/// ```
///
/// using the values already updated in this sweep for the west and south neighbours, and the
/// values of the previous sweep for the east and north neighbours.
#[derive(Clone, Debug)]
pub struct GaussSeidel<C = MonotonicClock, M = NoMonitor> {
    /// number of sweeps per solve
    iterations: usize,
    clock: C,
    monitor: M,
}

impl GaussSeidel {
    /// Create a new solver performing `iterations` sweeps, timed with a [`MonotonicClock`].
    pub fn new(iterations: usize) -> Self {
        GaussSeidel {
            iterations,
            clock: MonotonicClock::new(),
            monitor: NoMonitor,
        }
    }
}

impl<C, M> GaussSeidel<C, M>
where
    C: Clock,
    M: Monitor,
{
    /// Replaces the clock used to time the sweeps.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> GaussSeidel<C2, M> {
        GaussSeidel {
            iterations: self.iterations,
            clock,
            monitor: self.monitor,
        }
    }

    /// Replaces the hooks called around the iteration loop and the norm evaluations.
    pub fn with_monitor<M2: Monitor>(self, monitor: M2) -> GaussSeidel<C, M2> {
        GaussSeidel {
            iterations: self.iterations,
            clock: self.clock,
            monitor,
        }
    }
}

impl<C, M> IterativeSolver for GaussSeidel<C, M>
where
    C: Clock,
    M: Monitor,
{
    fn name(&self) -> &'static str {
        "Gauss-Seidel method"
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn solve<T>(&mut self, system: &mut LinearSystem<T>) -> Result<Convergence<T>, Error>
    where
        T: RealField + Copy,
    {
        if self.iterations == 0 {
            return Err(Error::IllegalInput {
                msg: "the iteration count must be positive".to_owned(),
            });
        }

        debug!(
            "Gauss-Seidel: {} iterations on {}x{} unknowns",
            self.iterations,
            system.nx(),
            system.ny()
        );

        let mut norms = Vec::with_capacity(self.iterations);
        let mut elapsed_ms = 0.0;
        let mut warned = false;

        self.monitor.start(Region::GaussSeidel);
        for k in 0..self.iterations {
            let started = self.clock.now_ms();
            sweep(system);
            elapsed_ms += self.clock.now_ms() - started;

            self.monitor.start(Region::L2Norm);
            let norm = system.l2_norm();
            self.monitor.stop(Region::L2Norm);

            trace!("i = {} : {}", k, norm);
            if !warned && !norm.is_finite() {
                warn!("residual norm is not finite at iteration {}", k);
                warned = true;
            }
            norms.push(norm);
        }
        self.monitor.stop(Region::GaussSeidel);

        Ok(Convergence {
            iterations: self.iterations,
            avg_iteration_ms: elapsed_ms / self.iterations as f64,
            norms,
        })
    }
}

/// Updates the iterate of one segment in place.
struct Sweep<'a, T> {
    x: &'a mut [T],
}

impl<'a, T> SegmentKernel<T> for Sweep<'a, T>
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
            self.x[i] =
                bands.reduced_rhs::<WEST, EAST, SOUTH, NORTH>(self.x, i) / bands.main_diag[i];
        }
    }
}

/// One in-place Gauss-Seidel sweep over all unknowns, in ascending index order.
pub fn sweep<T>(system: &mut LinearSystem<T>)
where
    T: RealField + Copy,
{
    let (bands, x) = system.bands_and_solution_mut();
    bands.for_each_segment(&mut Sweep { x });
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pentadiag::Diagonal;

    use super::*;

    /// Advances by a fixed step on every reading.
    struct StepClock {
        now: f64,
        step: f64,
    }

    impl Clock for StepClock {
        fn now_ms(&mut self) -> f64 {
            self.now += self.step;
            self.now
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<(&'static str, Region)>);

    impl Monitor for Recorder {
        fn start(&mut self, region: Region) {
            self.0.push(("start", region));
        }

        fn stop(&mut self, region: Region) {
            self.0.push(("stop", region));
        }
    }

    /// A strictly diagonally dominant, non-symmetric system.
    fn dominant(nx: usize, ny: usize) -> LinearSystem<f64> {
        let mut sys = LinearSystem::new(nx, ny).unwrap();
        let n = sys.dim();
        for (k, d) in Diagonal::ALL.into_iter().enumerate() {
            let band = sys.diagonal_mut(d);
            for i in (0..n).filter(|&i| d.is_valid(i, nx, n)) {
                band[i] = if d == Diagonal::Main {
                    6.0 + 0.01 * i as f64
                } else {
                    -0.5 - 0.1 * k as f64
                };
            }
        }
        for i in 0..n {
            sys.rhs_mut()[i] = (0.3 * i as f64).sin() + 1.0;
        }
        sys
    }

    /// The same sweep written with one validity test per band and row.
    fn sweep_branching(sys: &mut LinearSystem<f64>) {
        let n = sys.dim();
        for i in 0..n {
            let b = sys.bands().reduced_rhs_checked(sys.solution().as_slice(), i);
            let m = sys.diagonal(Diagonal::Main)[i];
            sys.solution_mut()[i] = b / m;
        }
    }

    #[test]
    fn test_sweep_matches_branching_form() {
        for (nx, ny) in [(1, 1), (1, 5), (5, 1), (2, 2), (3, 4), (6, 5)] {
            let mut segmented = dominant(nx, ny);
            let mut branching = segmented.clone();
            for _ in 0..7 {
                sweep(&mut segmented);
                sweep_branching(&mut branching);
                assert_eq!(segmented.solution(), branching.solution(), "{nx}x{ny}");
            }
        }
    }

    #[test]
    fn test_sweep_uses_updated_neighbours() {
        // 2x1 grid: x0 = (b0 - e*x1)/m, then x1 = (b1 - w*x0_new)/m
        let mut sys = LinearSystem::<f64>::new(2, 1).unwrap();
        sys.diagonal_mut(Diagonal::Main).fill(2.0);
        sys.diagonal_mut(Diagonal::Super)[0] = -1.0;
        sys.diagonal_mut(Diagonal::Sub)[1] = -1.0;
        sys.rhs_mut().copy_from_slice(&[1.0, 1.0]);

        sweep(&mut sys);
        assert_eq!(sys.solution().as_slice(), &[0.5, 0.75]);
        sweep(&mut sys);
        assert_eq!(sys.solution().as_slice(), &[0.875, 0.9375]);
    }

    #[test]
    fn test_single_unknown_is_exact_after_one_sweep() {
        let mut sys = LinearSystem::<f64>::new(1, 1).unwrap();
        sys.diagonal_mut(Diagonal::Main)[0] = 4.0;
        sys.rhs_mut()[0] = 2.0;

        let convergence = GaussSeidel::new(3).solve(&mut sys).unwrap();
        assert_eq!(sys.solution()[0], 0.5);
        assert_eq!(convergence.norms, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_converges_to_direct_solution() {
        let mut sys = dominant(4, 3);
        let expected = sys.direct_solve().unwrap();

        let convergence = GaussSeidel::new(60).solve(&mut sys).unwrap();
        assert_eq!(convergence.norms.len(), 60);
        assert!(convergence.last_norm().unwrap() < 1e-10);
        assert_relative_eq!(*sys.solution(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_average_iteration_time() {
        let mut sys = dominant(3, 3);
        // two readings per sweep, one step apart
        let mut solver = GaussSeidel::new(4).with_clock(StepClock {
            now: 100.0,
            step: 0.25,
        });
        assert_eq!(solver.iterations(), 4);
        let convergence = solver.solve(&mut sys).unwrap();
        assert_eq!(convergence.iterations, solver.iterations());
        assert_eq!(convergence.norms.len(), solver.iterations());
        assert_eq!(convergence.avg_iteration_ms, 0.25);
    }

    #[test]
    fn test_monitor_regions() {
        let mut sys = dominant(2, 2);
        let mut recorder = Recorder::default();
        GaussSeidel::new(2)
            .with_monitor(&mut recorder)
            .solve(&mut sys)
            .unwrap();

        assert_eq!(
            recorder.0,
            vec![
                ("start", Region::GaussSeidel),
                ("start", Region::L2Norm),
                ("stop", Region::L2Norm),
                ("start", Region::L2Norm),
                ("stop", Region::L2Norm),
                ("stop", Region::GaussSeidel),
            ]
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut sys = dominant(2, 2);
        assert!(matches!(
            GaussSeidel::new(0).solve(&mut sys),
            Err(Error::IllegalInput { .. })
        ));
        assert!(sys.solution().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_non_finite_norms_are_reported() {
        // a zero main diagonal is not guarded against
        let mut sys = LinearSystem::<f64>::new(2, 1).unwrap();
        sys.rhs_mut().fill(1.0);
        let convergence = GaussSeidel::new(2).solve(&mut sys).unwrap();
        assert!(convergence.norms.iter().all(|n| !n.is_finite()));
    }
}
