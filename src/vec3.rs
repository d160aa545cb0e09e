use std::ops;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub type Point3 = Vec3;
pub type Color = Vec3;

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        (self.x * self.x) + (self.y * self.y) + (self.z * self.z)
    }

    pub fn dot(&self, rhs: &Vec3) -> f64 {
        (self.x * rhs.x) + (self.y * rhs.y) + (self.z * rhs.z)
    }

    pub fn cross(&self, rhs: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Divides every component by `t`.
    ///
    /// Division never yields inf/NaN components: a zero divisor, or one small
    /// enough to overflow a component, is reported as
    /// [`RenderError::DivisionByZero`] instead.
    pub fn div(&self, t: f64) -> Result<Vec3, RenderError> {
        if t == 0.0 {
            return Err(RenderError::DivisionByZero);
        }

        Vec3 {
            x: self.x / t,
            y: self.y / t,
            z: self.z / t,
        }
        .finite()
    }

    /// Componentwise division, fails if any component of `rhs` is zero.
    pub fn div_elem(&self, rhs: &Vec3) -> Result<Vec3, RenderError> {
        if rhs.x == 0.0 || rhs.y == 0.0 || rhs.z == 0.0 {
            return Err(RenderError::DivisionByZero);
        }

        Vec3 {
            x: self.x / rhs.x,
            y: self.y / rhs.y,
            z: self.z / rhs.z,
        }
        .finite()
    }

    /// Same direction, length 1.
    ///
    /// Scaled by the largest component first so `length_squared` can neither
    /// underflow for tiny vectors nor overflow for huge ones.
    pub fn unit(&self) -> Result<Vec3, RenderError> {
        let largest = f64::max(f64::abs(self.x), f64::max(f64::abs(self.y), f64::abs(self.z)));
        let scaled = self.div(largest)?;

        scaled.div(scaled.length())
    }

    fn finite(self) -> Result<Vec3, RenderError> {
        if self.x.is_finite() && self.y.is_finite() && self.z.is_finite() {
            Ok(self)
        } else {
            Err(RenderError::DivisionByZero)
        }
    }
}

impl ops::Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl ops::Add<f64> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x + rhs,
            y: self.y + rhs,
            z: self.z + rhs,
        }
    }
}

impl ops::Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl ops::Sub<f64> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x - rhs,
            y: self.y - rhs,
            z: self.z - rhs,
        }
    }
}

impl ops::Mul<Vec3> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl ops::Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

impl ops::Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl ops::Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn samples() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.5, 0.25, 8.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1e3, -2e-3, 7.5),
        ]
    }

    #[test]
    fn add_and_dot_commute() {
        for u in samples() {
            for v in samples() {
                assert_eq!(u + v, v + u);
                assert_eq!(u.dot(&v), v.dot(&u));
            }
        }
    }

    #[test]
    fn cross_is_anticommutative() {
        for u in samples() {
            for v in samples() {
                assert_eq!(u.cross(&v), v.cross(&u) * -1.0);
            }
        }
    }

    #[test]
    fn cross_of_basis_vectors() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn length_scales_with_abs_scalar() {
        for u in samples() {
            for s in [-3.0, -0.5, 0.0, 2.0, 10.0] {
                let scaled = (u * s).length();
                let expected = f64::abs(s) * u.length();
                assert!((scaled - expected).abs() <= 1e-9 * expected.max(1.0));
            }
        }
    }

    #[test]
    fn unit_has_length_one() {
        for v in samples() {
            assert!(approx_eq(v.unit().unwrap().length(), 1.0));
        }
    }

    #[test]
    fn unit_of_zero_vector_fails() {
        assert_eq!(Vec3::ZERO.unit(), Err(RenderError::DivisionByZero));
    }

    #[test]
    fn scalar_ops_apply_to_every_component() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v + 1.0, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(v - 1.0, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(2.0 * v, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(v.div(2.0).unwrap(), Vec3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn negative_scalars_shift_every_component() {
        let v = Vec3::new(-1.5, 0.0, 4.0);
        assert_eq!(v + -2.0, Vec3::new(-3.5, -2.0, 2.0));
        assert_eq!(v - -2.0, Vec3::new(0.5, 2.0, 6.0));
        assert_eq!(v + 0.0, v);
        assert_eq!((v + 3.25) - 3.25, v);
    }

    #[test]
    fn tiny_divisor_that_overflows_is_rejected() {
        assert_eq!(Vec3::ONE.div(1e-310), Err(RenderError::DivisionByZero));
        assert_eq!(
            Vec3::ONE.div_elem(&Vec3::new(1.0, 1e-310, 1.0)),
            Err(RenderError::DivisionByZero)
        );
        // small but harmless divisors still work
        assert_eq!(Vec3::new(1e-300, 0.0, 0.0).div(1e-300), Ok(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn unit_of_tiny_and_huge_vectors_has_length_one() {
        for v in [
            Vec3::new(1e-170, 0.0, 0.0),
            Vec3::new(3e-320, -4e-320, 0.0),
            Vec3::new(1e200, 0.0, 0.0),
            Vec3::new(-1e300, 1e300, 1e300),
        ] {
            let unit = v.unit().unwrap();
            assert!(approx_eq(unit.length(), 1.0), "{v:?} -> {unit:?}");
        }

        assert_eq!(Vec3::new(0.0, 1e200, 0.0).unit(), Ok(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn division_by_zero_is_reported() {
        let v = Vec3::ONE;
        assert_eq!(v.div(0.0), Err(RenderError::DivisionByZero));
        assert_eq!(
            v.div_elem(&Vec3::new(1.0, 0.0, 1.0)),
            Err(RenderError::DivisionByZero)
        );
        assert_eq!(
            Vec3::new(2.0, 4.0, 9.0).div_elem(&Vec3::new(2.0, 2.0, 3.0)),
            Ok(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn operations_leave_operands_untouched() {
        let u = Vec3::new(1.0, 2.0, 3.0);
        let v = Vec3::new(4.0, 5.0, 6.0);
        let _ = u + v;
        let _ = u * v;
        let _ = -u;
        assert_eq!(u, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vec3::new(4.0, 5.0, 6.0));
    }
}
