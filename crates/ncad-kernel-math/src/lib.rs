#![warn(missing_docs)]

//! Math types for the ncad geometry kernel.
//!
//! Thin wrappers around nalgebra plus the tolerance model shared by every
//! predicate in the kernel: points and vectors, the [`Tolerance`] context,
//! the numeric guard constants, the [`Diagnostics`] trace level, and a 4x4
//! [`Transform`].

use nalgebra::{Matrix4, Rotation3, Unit, Vector2, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in the plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the plane.
pub type Vec2 = Vector2<f64>;

/// Smallest vector magnitude treated as non-zero.
pub const SMALL: f64 = 1.0e-77;

/// Square root of [`SMALL`]; guard for squared-magnitude tests.
pub const SQRT_SMALL: f64 = 1.0e-39;

/// Tolerance on the squared magnitude of a supposedly unit vector.
pub const UNIT_SQ_TOL: f64 = 1.0e-13;

/// Magnitude below which a vector cannot be meaningfully unitized.
pub const VUNITIZE_TOL: f64 = 1.0e-15;

/// Determinants smaller than this are treated as singular.
pub const DETERMINANT_TOL: f64 = 1.0e-14;

/// True if `v` is within `tol` of zero.
#[inline]
pub fn near_zero(v: f64, tol: f64) -> bool {
    v.abs() < tol
}

/// True if `a` and `b` differ by less than `tol`.
#[inline]
pub fn near_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// A vector perpendicular to `v`, built by crossing `v` with the coordinate
/// axis along its smallest component. Not normalized; zero if `v` is zero.
pub fn vec_perp(v: &Vec3) -> Vec3 {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vec3::x()
    } else if ay <= az {
        Vec3::y()
    } else {
        Vec3::z()
    };
    axis.cross(v)
}

/// Distance tolerances for geometric comparisons.
///
/// `dist` is the absolute distance (model units) below which two points are
/// considered coincident; `dist_sq` is always its square. `perp` is the
/// cosine threshold under which two directions count as perpendicular, and
/// `para` the threshold over which they count as parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Distance below which two points fuse, in model units.
    pub dist: f64,
    /// `dist * dist`, kept alongside to avoid square roots in hot paths.
    pub dist_sq: f64,
    /// |cos| below this means perpendicular.
    pub perp: f64,
    /// |cos| at or above this means parallel.
    pub para: f64,
}

impl Tolerance {
    /// The conventional working tolerance: half a micron of distance slop
    /// (in mm models) and a one-in-a-million angular cosine band.
    pub const DEFAULT: Self = Self {
        dist: 0.0005,
        dist_sq: 0.0005 * 0.0005,
        perp: 1e-6,
        para: 1.0 - 1e-6,
    };

    /// Build a tolerance from a distance and a perpendicularity cosine.
    ///
    /// # Panics
    /// Panics if `dist` is not positive or `perp` is outside `(0, 1)`.
    pub fn new(dist: f64, perp: f64) -> Self {
        assert!(dist > 0.0, "tolerance distance must be positive");
        assert!(
            perp > 0.0 && perp < 1.0,
            "perpendicularity cosine must be in (0, 1)"
        );
        Self {
            dist,
            dist_sq: dist * dist,
            perp,
            para: 1.0 - perp,
        }
    }

    /// Two 3D points coincide when their squared separation is under
    /// `dist_sq`.
    pub fn pt3_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm_squared() < self.dist_sq
    }

    /// Two 2D points coincide when their squared separation is under
    /// `dist_sq`.
    pub fn pt2_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm_squared() < self.dist_sq
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How much tracing the topology queries emit.
///
/// Replaces a process-wide debug bitmask: the caller decides per model how
/// chatty the kernel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diagnostics {
    /// No trace output.
    #[default]
    Off,
    /// Structural events only (geometry repairs, unexpected topology).
    Basic,
    /// Structural events plus per-candidate math traces.
    MathVerbose,
}

impl Diagnostics {
    /// True at `Basic` and above.
    pub fn basic(self) -> bool {
        self != Diagnostics::Off
    }

    /// True only at `MathVerbose`.
    pub fn math(self) -> bool {
        self == Diagnostics::MathVerbose
    }
}

/// A 4x4 affine transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    m: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            m: Matrix4::new_translation(&Vec3::new(dx, dy, dz)),
        }
    }

    /// Rotation about an axis through the origin by `angle` radians.
    pub fn rotation(axis: &Dir3, angle: f64) -> Self {
        Self {
            m: Rotation3::from_axis_angle(axis, angle).to_homogeneous(),
        }
    }

    /// Wrap an arbitrary 4x4 matrix.
    pub fn from_matrix(m: Matrix4<f64>) -> Self {
        Self { m }
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.m
    }

    /// Compose: apply `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self { m: self.m * other.m }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.m * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (translation ignored).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.m * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Transform a surface normal (inverse-transpose of the linear part).
    /// Degenerate transforms return the input unchanged.
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        let m3 = self.m.fixed_view::<3, 3>(0, 0);
        match m3.try_inverse() {
            Some(inv) => inv.transpose() * n,
            None => *n,
        }
    }

    /// Inverse transform, if the matrix is invertible.
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|m| Self { m })
    }

    /// Transform an axis-aligned box and return the axis-aligned box of the
    /// eight transformed corners.
    pub fn apply_bbox(&self, min: &Point3, max: &Point3) -> (Point3, Point3) {
        let mut out_min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut out_max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for corner in 0..8u32 {
            let c = Point3::new(
                if corner & 1 != 0 { max.x } else { min.x },
                if corner & 2 != 0 { max.y } else { min.y },
                if corner & 4 != 0 { max.z } else { min.z },
            );
            let t = self.apply_point(&c);
            out_min = out_min.inf(&t);
            out_max = out_max.sup(&t);
        }
        (out_min, out_max)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn tolerance_new_squares_distance() {
        let tol = Tolerance::new(0.01, 1e-5);
        approx::assert_relative_eq!(tol.dist_sq, 1e-4);
        assert!((tol.para - (1.0 - 1e-5)).abs() < 1e-15);
    }

    #[test]
    #[should_panic]
    fn tolerance_rejects_negative_distance() {
        let _ = Tolerance::new(-1.0, 1e-6);
    }

    #[test]
    fn default_tolerance_point_equality() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-4, 2.0, 3.0);
        assert!(tol.pt3_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.pt3_equal(&a, &c));
    }

    #[test]
    fn vec_perp_is_perpendicular() {
        for v in [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.3, -2.0, 0.7),
            Vec3::new(0.0, 0.0, 5.0),
        ] {
            let p = vec_perp(&v);
            assert!(p.norm() > 0.0);
            assert!(v.dot(&p).abs() < 1e-12);
        }
    }

    #[test]
    fn rotation_about_z() {
        let t = Transform::rotation(&Dir3::new_normalize(Vec3::z()), PI / 2.0);
        let r = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn translation_then_inverse_round_trips() {
        let t = Transform::translation(1.0, 2.0, 3.0);
        let inv = t.inverse().unwrap();
        let p = Point3::new(5.0, 6.0, 7.0);
        let r = inv.apply_point(&t.apply_point(&p));
        assert!((r - p).norm() < 1e-12);
    }

    #[test]
    fn bbox_transform_contains_all_corners() {
        let t = Transform::rotation(&Dir3::new_normalize(Vec3::z()), PI / 4.0);
        let (min, max) = t.apply_bbox(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 1.0, 1.0));
        // The rotated unit cube spans sqrt(2) across the xy diagonal.
        assert!((max.x - min.x) > 1.0);
        assert!((max.z - min.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn diagnostics_levels() {
        assert!(!Diagnostics::Off.basic());
        assert!(Diagnostics::Basic.basic());
        assert!(!Diagnostics::Basic.math());
        assert!(Diagnostics::MathVerbose.math());
    }
}
