use log::debug;
use nalgebra::{convert, RealField};
use pentadiag::{Diagonal, LinearSystem};

use crate::{Error, Problem, SinhProblem};

/// The five stencil weights of one interior equation, scaled by `2 hx² hy²`.
///
/// Every interior unknown shares the same weights; only which of them are live depends on the
/// position of the unknown in the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stencil<T> {
    pub main: T,
    /// weight of `u(i+1, j)`
    pub east: T,
    /// weight of `u(i-1, j)`
    pub west: T,
    /// weight of `u(i, j+1)`
    pub north: T,
    /// weight of `u(i, j-1)`
    pub south: T,
}

impl<T> Stencil<T>
where
    T: RealField + Copy,
{
    /// Centred-difference weights for grid spacing `(hx, hy)`.
    pub fn new<P: Problem<T>>(problem: &P, hx: T, hy: T) -> Self {
        let two: T = convert(2.0);
        let four: T = convert(4.0);
        let (sqr_hx, sqr_hy) = (hx * hx, hy * hy);
        let (cx, cy) = problem.convection();
        let k = problem.reaction();

        Stencil {
            main: four * sqr_hy + four * sqr_hx + two * k * sqr_hx * sqr_hy,
            east: sqr_hy * (cx * hx - two),
            west: -(sqr_hy * (two + cx * hx)),
            north: sqr_hx * (cy * hy - two),
            south: -(sqr_hx * (two + cy * hy)),
        }
    }

    pub fn weight(&self, diagonal: Diagonal) -> T {
        match diagonal {
            Diagonal::FarSub => self.south,
            Diagonal::Sub => self.west,
            Diagonal::Main => self.main,
            Diagonal::Super => self.east,
            Diagonal::FarSuper => self.north,
        }
    }
}

/// Assembles the reference problem ([`SinhProblem`]) on an `nx` by `ny` grid.
pub fn assemble(nx: usize, ny: usize) -> Result<LinearSystem<f64>, Error> {
    assemble_with(nx, ny, &SinhProblem)
}

/// Allocates and assembles the system of `problem` on an `nx` by `ny` grid.
pub fn assemble_with<T, P>(nx: usize, ny: usize, problem: &P) -> Result<LinearSystem<T>, Error>
where
    T: RealField + Copy,
    P: Problem<T>,
{
    let mut system = LinearSystem::new(nx, ny)?;
    fill(&mut system, problem);
    Ok(system)
}

/// Overwrites the bands, right-hand side and iterate of `system` with the discretization of
/// `problem`. The iterate is reset to zero.
pub fn fill<T, P>(system: &mut LinearSystem<T>, problem: &P)
where
    T: RealField + Copy,
    P: Problem<T>,
{
    let (nx, ny, n) = (system.nx(), system.ny(), system.dim());
    let (hx, hy) = system.spacing();
    let stencil = Stencil::new(problem, hx, hy);

    debug!("assembling {}x{} grid, hx={:.6} hy={:.6}", nx, ny, hx, hy);

    for d in Diagonal::ALL {
        let weight = stencil.weight(d);
        for (i, c) in system.diagonal_mut(d).iter_mut().enumerate() {
            *c = if d.is_valid(i, nx, n) {
                weight
            } else {
                T::zero()
            };
        }
    }

    let two: T = convert(2.0);
    let scale = two * hx * hx * hy * hy;
    let rhs = system.rhs_mut();
    let mut idx = 0;

    for j in 1..=ny {
        let y = convert::<f64, T>(j as f64) * hy;
        for i in 1..=nx {
            let x = convert::<f64, T>(i as f64) * hx;
            let mut b = scale * problem.source(x, y);

            // known boundary neighbours move to the right-hand side
            if j == 1 {
                b -= problem.bottom(x) * stencil.south;
            }
            if j == ny {
                b -= problem.top(x) * stencil.north;
            }
            if i == 1 {
                b -= problem.left(y) * stencil.west;
            }
            if i == nx {
                b -= problem.right(y) * stencil.east;
            }

            rhs[idx] = b;
            idx += 1;
        }
    }

    system.reset_solution();
}
