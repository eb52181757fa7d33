//! A minimal 3-vector for positions and directions.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 3-component double-precision vector.
///
/// Positions are in meters, directions are unit-length and dimensionless;
/// the type itself is unit-agnostic. Only the operations the pipeline and
/// its modules need are provided — this is deliberately not a linear
/// algebra library.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: &Vector3) -> f64 {
        (*self - *other).length()
    }

    /// The same direction with unit length.
    ///
    /// The zero vector has no direction; it is returned unchanged.
    pub fn normalized(&self) -> Vector3 {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            *self * (1.0 / len)
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn componentwise_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Vector3::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, Vector3::new(2.0, 1.5, 1.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn length_and_distance() {
        let a = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(Vector3::ZERO.distance_to(&a), 5.0);
    }

    #[test]
    fn normalizing_zero_is_identity() {
        assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);
    }

    proptest! {
        #[test]
        fn normalized_has_unit_length(
            x in -1e6f64..1e6,
            y in -1e6f64..1e6,
            z in -1e6f64..1e6,
        ) {
            let v = Vector3::new(x, y, z);
            prop_assume!(v.length() > 1e-9);
            let n = v.normalized();
            prop_assert!((n.length() - 1.0).abs() < 1e-12);
        }
    }
}
