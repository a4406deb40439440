use core::ops::{Add, AddAssign, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).norm()
    }

    /// Point at fraction `t` of the way from `self` to `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// z-component of the 3D cross product.
    pub fn cross(self, rhs: Self) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            Self::default()
        } else {
            self * (1.0 / n)
        }
    }

    /// Rotates by +90 degrees, so the result points to the left of `self`.
    pub fn perp(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }
}

/// Component-wise binary operator between two of the coordinate types.
macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt: $lhs:ty, $rhs:ty => $out:ident) => {
        impl $trait<$rhs> for $lhs {
            type Output = $out;

            #[inline]
            fn $method(self, rhs: $rhs) -> $out {
                $out::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

componentwise!(Add, add, +: Point2, Vec2 => Point2);
componentwise!(Sub, sub, -: Point2, Vec2 => Point2);
componentwise!(Sub, sub, -: Point2, Point2 => Vec2);
componentwise!(Add, add, +: Vec2, Vec2 => Vec2);
componentwise!(Sub, sub, -: Vec2, Vec2 => Vec2);

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2, Vec2};

    #[test]
    fn vec_ops_and_normalize() {
        let a = Vec2 { x: 3.0, y: 4.0 };
        let b = Vec2 { x: 1.0, y: -2.0 };

        assert_eq!(a + b, Vec2 { x: 4.0, y: 2.0 });
        assert_eq!(a - b, Vec2 { x: 2.0, y: 6.0 });
        assert_eq!(-b, Vec2 { x: -1.0, y: 2.0 });
        assert!((a.dot(b) + 5.0).abs() < 1e-12);
        assert!((a.cross(b) + 10.0).abs() < 1e-12);
        assert!((a.norm() - 5.0).abs() < 1e-12);

        let n = a.normalize();
        assert!((n.norm() - 1.0).abs() < 1e-12);

        assert_eq!(a * 2.0, 2.0 * a);
        let mut acc = a;
        acc += b;
        assert_eq!(acc, a + b);

        let z = Vec2::default().normalize();
        assert_eq!(z, Vec2::default());
    }

    #[test]
    fn perp_turns_left() {
        let east = Vec2::new(1.0, 0.0);
        assert_eq!(east.perp(), Vec2::new(0.0, 1.0));
        assert!(east.cross(east.perp()) > 0.0);
    }

    #[test]
    fn point_vec_ops() {
        let p = Point2 { x: 2.0, y: 3.0 };
        let v = Vec2 { x: 0.5, y: -1.0 };

        assert_eq!(p + v, Point2 { x: 2.5, y: 2.0 });
        assert_eq!(p - v, Point2 { x: 1.5, y: 4.0 });
        assert_eq!(p - Point2 { x: 1.0, y: 1.0 }, Vec2 { x: 1.0, y: 2.0 });
    }

    #[test]
    fn lerp_and_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 4.0);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 0.5), Point2::new(1.0, 2.0));
        assert!((a.distance(Point2::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
