use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Result, TilingError};

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `degrees` counter-clockwise from the +x axis.
    pub fn from_angle_deg(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self { x: c, y: s }
    }

    /// Counter-clockwise perpendicular `(-y, x)`.
    #[inline]
    pub fn perp(self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Linear interpolation: `self` at t = 0, `other` at t = 1.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Arithmetic mean of a point set; the origin for an empty slice.
    pub fn mean(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self::ORIGIN;
        }
        let sum = points.iter().fold(Self::ORIGIN, |acc, p| acc + *p);
        sum * (1.0 / points.len() as f64)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    // Affine 2D: [a, b, c, d, e, f] for matrix [[a c e],[b d f],[0 0 1]]
    pub m: [f64; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Mirror across the y axis: `(x, y) -> (-x, y)`.
    pub const REFLECT: Transform2D = Transform2D {
        m: [-1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub const fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Compose two transforms: self ∘ other (apply `other`, then `self`).
    pub fn concat(self, other: Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = other.m;
        let a = a1 * a2 + c1 * b2;
        let b = b1 * a2 + d1 * b2;
        let c = a1 * c2 + c1 * d2;
        let d = b1 * c2 + d1 * d2;
        let e = a1 * e2 + c1 * f2 + e1;
        let f = b1 * e2 + d1 * f2 + f1;
        Self {
            m: [a, b, c, d, e, f],
        }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Translation that carries `from` onto `to`.
    pub fn translate_to(from: Point, to: Point) -> Self {
        Self::translate(to.x - from.x, to.y - from.y)
    }

    /// Counter-clockwise rotation about the origin, in radians.
    pub fn rotate(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            m: [c, s, -s, c, 0.0, 0.0],
        }
    }

    pub fn rotate_deg(degrees: f64) -> Self {
        Self::rotate(degrees.to_radians())
    }

    /// Uniform scale about the origin.
    pub fn scale(s: f64) -> Self {
        Self {
            m: [s, 0.0, 0.0, s, 0.0, 0.0],
        }
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, _, _] = self.m;
        a * d - b * c
    }

    /// Inverse transform. Fails instead of producing non-finite coordinates.
    pub fn invert(&self) -> Result<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPS {
            return Err(TilingError::SingularTransform { det });
        }
        let [a, b, c, d, e, f] = self.m;
        let inv = 1.0 / det;
        Ok(Self {
            m: [
                d * inv,
                -b * inv,
                -c * inv,
                a * inv,
                (c * f - d * e) * inv,
                (b * e - a * f) * inv,
            ],
        })
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.m;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    #[inline]
    pub fn translation(&self) -> Point {
        Point::new(self.m[4], self.m[5])
    }

    /// Rotation component `atan2(b, a)`, normalized to `[0, 2π)`.
    pub fn rotation(&self) -> f64 {
        let angle = self.m[1].atan2(self.m[0]);
        if angle < 0.0 { angle + std::f64::consts::TAU } else { angle }
    }

    /// True when the transform flips orientation.
    pub fn is_reflection(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.m.iter().zip(other.m.iter()).all(|(x, y)| (x - y).abs() <= eps)
    }
}
