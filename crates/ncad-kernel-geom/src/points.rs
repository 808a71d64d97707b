//! Point-level predicates: equality, distinctness, collinearity, and
//! parametric positions along lines.

use ncad_kernel_math::{near_equal, Point2, Point3, Tolerance, Vec2, Vec3};
use std::f64::consts::{PI, TAU};

/// Distance between two 3D points.
pub fn dist_pt3_pt3(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// True if all three points are pairwise farther apart than the tolerance
/// distance.
pub fn pts_distinct3(a: &Point3, b: &Point3, c: &Point3, tol: &Tolerance) -> bool {
    if (b - a).norm_squared() <= tol.dist_sq {
        return false;
    }
    if (c - a).norm_squared() <= tol.dist_sq {
        return false;
    }
    (c - b).norm_squared() > tol.dist_sq
}

/// True if every pair of points is farther apart than the tolerance
/// distance.
pub fn pts_distinct(pts: &[Point3], tol: &Tolerance) -> bool {
    for i in 0..pts.len() {
        for j in (i + 1)..pts.len() {
            if (pts[j] - pts[i]).norm_squared() <= tol.dist_sq {
                return false;
            }
        }
    }
    true
}

/// True if three points are collinear within the tolerance distance.
///
/// Works regardless of point order: the altitude is measured from the
/// vertex opposite the longest edge, via the law of cosines, and compared
/// against `tol.dist_sq`.
pub fn pts_collinear(a: &Point3, b: &Point3, c: &Point3, tol: &Tolerance) -> bool {
    let ab = b - a;
    let bc = c - b;
    let ca = a - c;
    let mag_ab = ab.norm();
    let mag_bc = bc.norm();
    let mag_ca = ca.norm();

    let dist_sq = if mag_ab >= mag_bc && mag_ab >= mag_ca {
        let cos_b = (-ab.dot(&bc)) / (mag_ab * mag_bc);
        mag_bc * mag_bc * (1.0 - cos_b * cos_b)
    } else if mag_bc >= mag_ca {
        let cos_c = (-bc.dot(&ca)) / (mag_bc * mag_ca);
        mag_ca * mag_ca * (1.0 - cos_c * cos_c)
    } else {
        let cos_a = (-ca.dot(&ab)) / (mag_ca * mag_ab);
        mag_ab * mag_ab * (1.0 - cos_a * cos_a)
    };

    dist_sq <= tol.dist_sq
}

/// True if `mid` lies between `left` and `right`, with the bounds widened
/// by a tenth of the tolerance distance when they nearly coincide.
pub fn between(left: f64, mid: f64, right: f64, tol: &Tolerance) -> bool {
    let fuzz = tol.dist * 0.1;
    let (mut lo, mut hi) = if left < right { (left, right) } else { (right, left) };
    if near_equal(lo, hi, fuzz) {
        lo -= fuzz;
        hi += fuzz;
    }
    mid >= lo && mid <= hi
}

/// Angle of `vec` in the frame spanned by `x_dir` and `y_dir`, in
/// `[0, 2*pi)`.
///
/// Projections are negated and the result shifted by pi so that the
/// numerically delicate region of `atan2` lands at the branch cut rather
/// than at zero: `vec == x_dir` gives 0, `vec == y_dir` gives pi/2.
pub fn angle_measure(vec: &Vec3, x_dir: &Vec3, y_dir: &Vec3) -> f64 {
    let xproj = -vec.dot(x_dir);
    let yproj = -vec.dot(y_dir);
    let mut ang = PI + yproj.atan2(xproj);
    while ang < 0.0 {
        ang += TAU;
    }
    while ang > TAU {
        ang -= TAU;
    }
    ang
}

/// Parametric distance t of point `x` along the ray `p + t * d`.
///
/// If `x` is off the line, t locates the perpendicular projection of `x`
/// onto it. `d` is assumed unit length.
pub fn dist_pt3_along_line3(p: &Point3, d: &Vec3, x: &Point3) -> f64 {
    (x - p).dot(d)
}

/// 2D analogue of [`dist_pt3_along_line3`].
pub fn dist_pt2_along_line2(p: &Point2, d: &Vec2, x: &Point2) -> f64 {
    (x - p).dot(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn distinct3_rejects_near_coincident_pair() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0 + 1e-5, 0.0, 0.0);
        assert!(!pts_distinct3(&a, &b, &c, &tol));
        let c2 = Point3::new(0.0, 1.0, 0.0);
        assert!(pts_distinct3(&a, &b, &c2, &tol));
    }

    #[test]
    fn npts_distinct_checks_all_pairs() {
        let tol = Tolerance::DEFAULT;
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1e-5, 0.0, 0.0),
        ];
        assert!(!pts_distinct(&pts, &tol));
        assert!(pts_distinct(&pts[..3], &tol));
    }

    #[test]
    fn collinear_points_in_any_order() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(5.0, 0.0, 0.0);
        let c = Point3::new(2.0, 1e-5, 0.0);
        assert!(pts_collinear(&a, &b, &c, &tol));
        assert!(pts_collinear(&c, &a, &b, &tol));
        assert!(pts_collinear(&b, &c, &a, &tol));
        let off = Point3::new(2.0, 0.5, 0.0);
        assert!(!pts_collinear(&a, &b, &off, &tol));
    }

    #[test]
    fn between_widens_coincident_bounds() {
        let tol = Tolerance::DEFAULT;
        assert!(between(0.0, 0.5, 1.0, &tol));
        assert!(between(1.0, 0.5, 0.0, &tol));
        assert!(!between(0.0, 1.5, 1.0, &tol));
        // Bounds that coincide still accept a mid within the fuzz band.
        assert!(between(2.0, 2.0 + 1e-6, 2.0, &tol));
    }

    #[test]
    fn angle_measure_frame_axes() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert!(angle_measure(&x, &x, &y).abs() < 1e-12);
        assert!((angle_measure(&y, &x, &y) - FRAC_PI_2).abs() < 1e-12);
        assert!((angle_measure(&(-x), &x, &y) - PI).abs() < 1e-12);
        assert!((angle_measure(&(-y), &x, &y) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn along_line_projects_off_line_points() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let d = Vec3::new(1.0, 0.0, 0.0);
        let x = Point3::new(4.0, 7.0, 0.0);
        assert!((dist_pt3_along_line3(&p, &d, &x) - 3.0).abs() < 1e-12);
    }
}
