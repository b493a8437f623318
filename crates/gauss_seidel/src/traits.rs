use nalgebra::RealField;
use pentadiag::LinearSystem;

use crate::{Convergence, Error, Region};

/// Source of wall-clock time for the per-iteration timing.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin. Must never decrease.
    fn now_ms(&mut self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&mut self) -> f64 {
        (**self).now_ms()
    }
}

/// Hooks around the solver's hot regions, for profiling markers.
///
/// Both hooks default to doing nothing.
pub trait Monitor {
    fn start(&mut self, _region: Region) {}

    fn stop(&mut self, _region: Region) {}
}

impl<M: Monitor + ?Sized> Monitor for &mut M {
    fn start(&mut self, region: Region) {
        (**self).start(region)
    }

    fn stop(&mut self, region: Region) {
        (**self).stop(region)
    }
}

pub trait IterativeSolver {
    /// Name of the method, as printed in the report header.
    fn name(&self) -> &'static str;

    /// Number of sweeps a call to `solve` performs.
    fn iterations(&self) -> usize;

    /// Iterates on the solution of `system` in place.
    ///
    /// # Returns
    ///
    /// * `Ok(Convergence)` - the residual norm after every iteration and the mean iteration time.
    ///
    /// # Errors
    ///
    /// * `Err(Error::IllegalInput)` - the solver was configured with zero iterations.
    fn solve<T>(&mut self, system: &mut LinearSystem<T>) -> Result<Convergence<T>, Error>
    where
        T: RealField + Copy;
}
