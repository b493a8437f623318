//! Description of the boundary value problem to discretize.

use nalgebra::RealField;

/// A Dirichlet problem `-Δu + cx u_x + cy u_y + k u = f` on the square `(0, π)²`.
pub trait Problem<T: RealField + Copy> {
    /// The forcing term `f(x, y)`.
    fn source(&self, x: T, y: T) -> T;

    /// `u(x, 0)`
    fn bottom(&self, x: T) -> T;

    /// `u(x, π)`
    fn top(&self, x: T) -> T;

    /// `u(0, y)`
    fn left(&self, y: T) -> T;

    /// `u(π, y)`
    fn right(&self, y: T) -> T;

    /// The first-order coefficients `(cx, cy)`.
    fn convection(&self) -> (T, T);

    /// The zeroth-order coefficient `k`.
    fn reaction(&self) -> T;
}
