//! Default clock and monitors.
use std::time::Instant;

use log::trace;

use crate::{Clock, Monitor};

/// The two instrumented regions of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The whole iteration loop.
    GaussSeidel,
    /// One residual-norm evaluation.
    L2Norm,
}

impl Region {
    pub fn name(self) -> &'static str {
        match self {
            Region::GaussSeidel => "Gauss_Seidel",
            Region::L2Norm => "L2_Norm",
        }
    }
}

/// Monotonic wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1.0e3
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoMonitor;

impl Monitor for NoMonitor {}

/// Logs region boundaries at `trace` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMonitor;

impl Monitor for LogMonitor {
    fn start(&mut self, region: Region) {
        trace!("start {}", region.name());
    }

    fn stop(&mut self, region: Region) {
        trace!("stop {}", region.name());
    }
}
