use nalgebra::{convert, RealField};

use crate::Problem;

/// The reference problem:
///
/// ```math
/// -Δu + ∂u/∂x + ∂u/∂y + 4π²u = 4π² [sin(2πx) sinh(πy) + sin(2π(π-x)) sinh(π(π-y))]
/// ```
///
/// with `u(x, 0) = sin(2π(π-x)) sinh(π²)`, `u(x, π) = sin(2πx) sinh(π²)` and zero on the left
/// and right edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinhProblem;

impl<T> Problem<T> for SinhProblem
where
    T: RealField + Copy,
{
    fn source(&self, x: T, y: T) -> T {
        let pi = T::pi();
        let two_pi = T::two_pi();
        let four: T = convert(4.0);
        four * pi * pi
            * ((two_pi * x).sin() * (pi * y).sinh()
                + (two_pi * (pi - x)).sin() * (pi * (pi - y)).sinh())
    }

    fn bottom(&self, x: T) -> T {
        let pi = T::pi();
        (T::two_pi() * (pi - x)).sin() * (pi * pi).sinh()
    }

    fn top(&self, x: T) -> T {
        let pi = T::pi();
        (T::two_pi() * x).sin() * (pi * pi).sinh()
    }

    fn left(&self, _y: T) -> T {
        T::zero()
    }

    fn right(&self, _y: T) -> T {
        T::zero()
    }

    fn convection(&self) -> (T, T) {
        (T::one(), T::one())
    }

    fn reaction(&self) -> T {
        let four: T = convert(4.0);
        four * T::pi() * T::pi()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_boundary_values() {
        let p = SinhProblem;
        assert_eq!(Problem::<f64>::left(&p, 1.0), 0.0);
        assert_eq!(Problem::<f64>::right(&p, 2.0), 0.0);
        assert_relative_eq!(
            Problem::<f64>::top(&p, 0.25),
            (PI * PI).sinh(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            Problem::<f64>::bottom(&p, PI - 0.25),
            (PI * PI).sinh(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_source_and_coefficients() {
        let p = SinhProblem;
        let (x, y) = (0.3, 1.1);
        let expected = 4.0
            * PI
            * PI
            * ((2.0 * PI * x).sin() * (PI * y).sinh()
                + (2.0 * PI * (PI - x)).sin() * (PI * (PI - y)).sinh());
        assert_relative_eq!(p.source(x, y), expected, max_relative = 1e-12);
        assert_eq!(Problem::<f64>::convection(&p), (1.0, 1.0));
        assert_relative_eq!(Problem::<f64>::reaction(&p), 4.0 * PI * PI);
    }
}
