//! 3D line and segment predicates.
//!
//! The intersection routines here reduce each problem to two dimensions
//! by dropping the component most nearly perpendicular to the plane the
//! lines share, then solve by Cramer's rule and verify the dropped
//! equation afterwards.

use crate::error::GeomError;
use crate::points::dist_pt3_along_line3;
use crate::seg::{LineSegIsect, PointSegDist, SegSegIsect};
use ncad_kernel_math::{
    near_zero, vec_perp, Point3, Tolerance, Vec3, SMALL, VUNITIZE_TOL,
};

/// Distance from point `a` to the line `pt + t * dir`.
///
/// `dir` need not be unit length; a zero-length `dir` gives distance zero.
pub fn dist_line3_pt3(pt: &Point3, dir: &Vec3, a: &Point3) -> f64 {
    distsq_line3_pt3(pt, dir, a).sqrt()
}

/// Squared distance from point `a` to the line `pt + t * dir`.
pub fn distsq_line3_pt3(pt: &Point3, dir: &Vec3, a: &Point3) -> f64 {
    let f = a - pt;
    let mag = dir.norm();
    if mag <= SMALL {
        return 0.0;
    }
    let proj = f.dot(dir) / mag;
    let d_sq = f.dot(&f) - proj * proj;
    if d_sq <= SMALL {
        0.0
    } else {
        d_sq
    }
}

/// True if two lines are collinear over the given model-space range.
///
/// A coarse angular filter (about 26 degrees, far looser than `tol.para`)
/// rejects obviously skew pairs, then each line's start point and a tail
/// point `range` along it must lie within `tol.dist` of the other line.
///
/// # Panics
/// Panics if either direction has zero magnitude.
pub fn two_lines_colinear(
    p1: &Point3,
    d1: &Vec3,
    p2: &Point3,
    d2: &Vec3,
    range: f64,
    tol: &Tolerance,
) -> bool {
    let mag1 = d1.norm();
    let mag2 = d2.norm();
    assert!(mag1 >= SMALL, "two_lines_colinear: first direction is zero");
    assert!(mag2 >= SMALL, "two_lines_colinear: second direction is zero");

    if d1.dot(d2).abs() < 0.9 * mag1 * mag2 {
        return false;
    }
    if distsq_line3_pt3(p1, d1, p2) > tol.dist_sq {
        return false;
    }
    if distsq_line3_pt3(p2, d2, p1) > tol.dist_sq {
        return false;
    }
    let tail = p1 + d1 * (range / mag1);
    if distsq_line3_pt3(p2, d2, &tail) > tol.dist_sq {
        return false;
    }
    let tail = p2 + d2 * (range / mag2);
    distsq_line3_pt3(p1, d1, &tail) <= tol.dist_sq
}

/// Outcome of intersecting two infinite 3D lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineLineIsect3 {
    /// Lines are skew or their computed crossing fails verification.
    None,
    /// Lines are parallel and offset.
    Parallel,
    /// Lines coincide; payload locates the second line's base point on
    /// the first line.
    Collinear {
        /// Parameter along the first line of the second line's base.
        t_at_a: f64,
    },
    /// Single intersection point.
    Hit {
        /// Parameter along the first line.
        t: f64,
        /// Parameter along the second line.
        u: f64,
    },
}

/// Intersect the lines `P + t * D` and `A + u * C`.
///
/// Both lines must lie in a common plane: the projections of `P` and `A`
/// along `D x C` must agree within `tol.perp` or the lines are skew. The
/// 3x2 system is reduced by dropping the equation for the normal's
/// largest component, and the solution is checked against the dropped
/// equation and against point equality of both reconstructed hits.
///
/// # Panics
/// Panics if either direction has near-zero magnitude.
pub fn isect_line3_line3(
    p: &Point3,
    d: &Vec3,
    a: &Point3,
    c: &Vec3,
    tol: &Tolerance,
) -> LineLineIsect3 {
    assert!(
        !near_zero(c.norm_squared(), VUNITIZE_TOL) && !near_zero(d.norm_squared(), VUNITIZE_TOL),
        "isect_line3_line3: zero magnitude direction"
    );

    // Both lines lie in a plane normal to D x C; P and A must project to
    // the same distance along that normal or no intersection exists.
    let mut n = d.cross(c);
    let offset = n.dot(&p.coords) - n.dot(&a.coords);
    if !near_zero(offset, tol.perp) {
        return LineLineIsect3::None;
    }

    let mut colinear = false;
    if near_zero(n.norm_squared(), VUNITIZE_TOL) {
        // Parallel lines; derive the plane normal from the offset instead.
        let a_to_p = p - a;
        n = a_to_p.cross(d);
        if near_zero(n.norm_squared(), VUNITIZE_TOL) {
            colinear = true;
            n = vec_perp(d);
        }
    }

    for i in 0..3 {
        if near_zero(n[i], SMALL) {
            n[i] = 0.0;
        }
    }
    let abs_n = n.abs();

    // q and r index the 2x2 system; s is the dropped (largest) component.
    let (q, r, s) = if abs_n.x >= abs_n.y {
        if abs_n.x >= abs_n.z {
            (1, 2, 0)
        } else {
            (0, 1, 2)
        }
    } else if abs_n.y >= abs_n.z {
        (0, 2, 1)
    } else {
        (0, 1, 2)
    };

    let h = a - p;
    let det = c[q] * d[r] - d[q] * c[r];
    let det1 = c[q] * h[r] - h[q] * c[r];

    if near_zero(det, VUNITIZE_TOL) {
        if !colinear || !near_zero(det1, VUNITIZE_TOL) {
            return LineLineIsect3::Parallel;
        }
        // Use the larger direction component for stability.
        let t_at_a = if d[q].abs() >= d[r].abs() {
            h[q] / d[q]
        } else {
            h[r] / d[r]
        };
        return LineLineIsect3::Collinear { t_at_a };
    }

    let inv = 1.0 / det;
    let t = inv * det1;
    let u = inv * (d[q] * h[r] - h[q] * d[r]);

    // The solution must also satisfy the dropped third equation.
    let residual = t * d[s] - u * c[s] - h[s];
    if !near_zero(residual, VUNITIZE_TOL) {
        return LineLineIsect3::None;
    }

    // Reconstruct both hit points and require them to coincide.
    let hit1 = p + d * t;
    let hit2 = a + c * u;
    if !tol.pt3_equal(&hit1, &hit2) {
        return LineLineIsect3::None;
    }

    LineLineIsect3::Hit { t, u }
}

/// Intersect two 3D segments, each given as point plus full-length
/// direction.
///
/// Parameters are in `[0, 1]` along each segment, snapped exactly to 0
/// or 1 when within tolerance of an endpoint.
///
/// # Panics
/// Panics if either segment direction has zero magnitude.
pub fn isect_lseg3_lseg3(
    p: &Point3,
    pdir: &Vec3,
    q: &Point3,
    qdir: &Vec3,
    tol: &Tolerance,
) -> SegSegIsect {
    let status = isect_line3_line3(p, pdir, q, qdir, tol);
    let pmag = pdir.norm();
    assert!(pmag >= SMALL, "isect_lseg3_lseg3: |pdir| = 0");

    match status {
        LineLineIsect3::None | LineLineIsect3::Parallel => SegSegIsect::Miss,
        LineLineIsect3::Collinear { t_at_a } => {
            let ptol = tol.dist / pmag;
            let t0 = snap01(t_at_a, ptol);
            let t1 = snap01(t_at_a + qdir.dot(pdir) / (pmag * pmag), ptol);
            let mut nogood = 0;
            if !(0.0..=1.0).contains(&t1) {
                nogood = 1;
            }
            if !(0.0..=1.0).contains(&t0) {
                nogood += 1;
            }
            if nogood >= 2 {
                return SegSegIsect::Miss;
            }
            SegSegIsect::CollinearOverlap { t0, t1 }
        }
        LineLineIsect3::Hit { t, u } => {
            let ptol = tol.dist / pmag;
            let t = snap01(t, ptol);
            let qmag = qdir.norm();
            assert!(qmag >= SMALL, "isect_lseg3_lseg3: |qdir| = 0");
            let qtol = tol.dist / qmag;
            let u = snap01(u, qtol);
            if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
                return SegSegIsect::Miss;
            }
            SegSegIsect::Hit { t, u }
        }
    }
}

fn snap01(v: f64, tol: f64) -> f64 {
    if v > -tol && v < tol {
        0.0
    } else if v > 1.0 - tol && v < 1.0 + tol {
        1.0
    } else {
        v
    }
}

/// Intersect the line `P + t * D` with the segment from `A` to `B`.
///
/// Collinearity is pre-tested by checking both endpoints against the
/// line; in that case the parameters of both endpoints along the line
/// are returned. Errors with [`GeomError::DegeneratePoints`] when `A`
/// and `B` are not distinct.
pub fn isect_line_lseg(
    p: &Point3,
    d: &Vec3,
    a: &Point3,
    b: &Point3,
    tol: &Tolerance,
) -> Result<LineSegIsect, GeomError> {
    let c = b - a;
    let c_len_sq = c.norm_squared();
    if c_len_sq < tol.dist_sq {
        return Err(GeomError::DegeneratePoints);
    }

    if distsq_line3_pt3(p, d, a) <= tol.dist_sq && distsq_line3_pt3(p, d, b) <= tol.dist_sq {
        return Ok(LineSegIsect::Collinear {
            t_start: dist_pt3_along_line3(p, d, a),
            t_end: dist_pt3_along_line3(p, d, b),
        });
    }

    let (t, u) = match isect_line3_line3(p, d, a, &c, tol) {
        LineLineIsect3::None | LineLineIsect3::Parallel => return Ok(LineSegIsect::None),
        LineLineIsect3::Collinear { t_at_a } => {
            return Ok(LineSegIsect::Collinear {
                t_start: t_at_a,
                t_end: dist_pt3_along_line3(p, d, b),
            });
        }
        LineLineIsect3::Hit { t, u } => (t, u),
    };

    // Convert tol.dist into parameter-space slack along the segment.
    let fuzz = tol.dist / c_len_sq.sqrt();
    if u < -fuzz {
        return Ok(LineSegIsect::BeforeStart { t });
    }
    let f = u - 1.0;
    if f > fuzz {
        return Ok(LineSegIsect::BeyondEnd { t });
    }
    if u < fuzz {
        return Ok(LineSegIsect::AtStart { t });
    }
    if f >= -fuzz {
        return Ok(LineSegIsect::AtEnd { t });
    }
    Ok(LineSegIsect::Interior { t, u })
}

/// Test point `p` against the segment from `a` to `b`.
///
/// Endpoint proximity wins over the on-line test. A degenerate segment
/// whose endpoints coincide reports `NotOnLine` unless `p` is at one of
/// them.
pub fn isect_pt_lseg(
    a: &Point3,
    b: &Point3,
    p: &Point3,
    tol: &Tolerance,
) -> crate::seg::PointSegIsect {
    use crate::seg::PointSegIsect;

    let a_to_p = p - a;
    if a_to_p.norm_squared() < tol.dist_sq {
        return PointSegIsect::AtStart;
    }
    let b_to_p = p - b;
    if b_to_p.norm_squared() < tol.dist_sq {
        return PointSegIsect::AtEnd;
    }
    let a_to_b = b - a;
    let len_sq = a_to_b.norm_squared();
    if len_sq < tol.dist_sq {
        return PointSegIsect::NotOnLine;
    }
    let proj = a_to_p.dot(&a_to_b) / len_sq.sqrt();
    if a_to_p.norm_squared() - proj * proj > tol.dist_sq {
        return PointSegIsect::NotOnLine;
    }
    let t = a_to_p.dot(&a_to_b) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return PointSegIsect::OutsideRange { t };
    }
    PointSegIsect::OnSegment { t }
}

/// Distance from point `p` to the segment `A..B`, with the closest point.
///
/// Distances in the result are linear, except the on-segment case which
/// reports the parametric position of the closest point instead.
pub fn dist_pt3_lseg3(
    a: &Point3,
    b: &Point3,
    p: &Point3,
    tol: &Tolerance,
) -> (PointSegDist, Point3) {
    let p_to_a = p - a;
    let p_a_sq = p_to_a.norm_squared();
    if p_a_sq < tol.dist_sq {
        return (PointSegDist::AtStart, *a);
    }
    let p_to_b = p - b;
    let p_b_sq = p_to_b.norm_squared();
    if p_b_sq < tol.dist_sq {
        return (PointSegDist::AtEnd, *b);
    }

    let a_to_b = b - a;
    let b_a = a_to_b.norm();
    // Distance along the carrier line to the projection of P.
    let t = p_to_a.dot(&a_to_b) / b_a;
    if t <= 0.0 {
        return (PointSegDist::BeforeStart { dist: p_a_sq.sqrt() }, *a);
    }
    if t < b_a {
        let param = t / b_a;
        let pca = a + a_to_b * param;
        let dsq = p_a_sq - t * t;
        if dsq <= tol.dist_sq {
            // Off-segment distance is zero; report the parameter instead.
            return (PointSegDist::OnSegment { t: param }, pca);
        }
        return (PointSegDist::Perpendicular { dist: dsq.sqrt() }, pca);
    }
    (PointSegDist::BeyondEnd { dist: p_b_sq.sqrt() }, *b)
}

/// Points of closest approach between two infinite 3D lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// True if the lines are parallel; `t` is then fixed at zero and
    /// `dist_sq` is their constant separation.
    pub parallel: bool,
    /// Parameter of the closest point along the first line, in multiples
    /// of its (not necessarily unit) direction vector.
    pub t: f64,
    /// Parameter of the closest point along the second line.
    pub u: f64,
    /// Squared distance between the two closest points.
    pub dist_sq: f64,
    /// Closest point on the first line.
    pub pt1: Point3,
    /// Closest point on the second line.
    pub pt2: Point3,
}

/// Squared distance between two lines `P + t * d` and `Q + u * e`, with
/// the points of closest approach on each.
///
/// # Panics
/// Panics if either direction has zero magnitude.
pub fn distsq_line3_line3(
    p: &Point3,
    d_in: &Vec3,
    q: &Point3,
    e_in: &Vec3,
) -> ClosestApproach {
    let len_d = d_in.norm();
    assert!(len_d > SMALL, "distsq_line3_line3: zero length direction");
    let len_e = e_in.norm();
    assert!(len_e > SMALL, "distsq_line3_line3: zero length direction");
    let inv_len_d = 1.0 / len_d;
    let inv_len_e = 1.0 / len_e;

    let d = d_in * inv_len_d;
    let e = e_in * inv_len_e;
    let de = d.dot(&e);

    let mut parallel = false;
    let (mut t, u);
    if near_zero(de, SMALL) {
        // Perpendicular lines.
        t = q.coords.dot(&d) - p.coords.dot(&d);
        u = p.coords.dot(&e) - q.coords.dot(&e);
    } else {
        let pmq = p - q;
        let denom = 1.0 - de * de;
        if near_zero(denom, SMALL) {
            parallel = true;
            t = 0.0;
            u = pmq.dot(&d);
        } else {
            let tmp = e - d * de;
            u = pmq.dot(&tmp) / denom;
            t = u * de - pmq.dot(&d);
        }
    }
    let pt1 = p + d * t;
    let pt2 = q + e * u;
    let diff = pt1 - pt2;
    t *= inv_len_d;
    let u = u * inv_len_e;
    ClosestApproach {
        parallel,
        t,
        u,
        dist_sq: diff.norm_squared(),
        pt1,
        pt2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slope {
    Degenerate,
    Vertical,
    Ratio(f64),
}

fn slope2(dx: f64, dy: f64) -> Slope {
    if near_zero(dx, SMALL) {
        if near_zero(dy, SMALL) {
            Slope::Degenerate
        } else {
            Slope::Vertical
        }
    } else {
        Slope::Ratio(dy / dx)
    }
}

fn slopes_match(s1: Slope, s2: Slope) -> bool {
    match (s1, s2) {
        (Slope::Degenerate, _) | (_, Slope::Degenerate) => true,
        (Slope::Vertical, Slope::Vertical) => true,
        (Slope::Ratio(r1), Slope::Ratio(r2)) => ncad_kernel_math::near_equal(r1, r2, SMALL),
        _ => false,
    }
}

/// True if two 3D segments are parallel, judged by comparing direction
/// slopes in each of the XY, XZ, and YZ projections.
///
/// A projection in which a segment degenerates to a point constrains
/// nothing. Zero-length segments are parallel to everything.
pub fn lseg3_lseg3_parallel(
    sg1a: &Point3,
    sg1b: &Point3,
    sg2a: &Point3,
    sg2b: &Point3,
    _tol: &Tolerance,
) -> bool {
    let e1 = sg1b - sg1a;
    let e2 = sg2b - sg2a;

    slopes_match(slope2(e1.x, e1.y), slope2(e2.x, e2.y))
        && slopes_match(slope2(e1.x, e1.z), slope2(e2.x, e2.z))
        && slopes_match(slope2(e1.y, e1.z), slope2(e2.y, e2.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Tolerance = Tolerance::DEFAULT;

    #[test]
    fn line_point_distance() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let d = Vec3::new(2.0, 0.0, 0.0);
        let a = Point3::new(5.0, 3.0, 0.0);
        assert!((dist_line3_pt3(&p, &d, &a) - 3.0).abs() < 1e-12);
        assert!((distsq_line3_pt3(&p, &d, &a) - 9.0).abs() < 1e-12);
        // Point on the line.
        assert_eq!(distsq_line3_pt3(&p, &d, &Point3::new(7.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn colinear_lines_over_range() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let d1 = Vec3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(5.0, 0.0, 0.0);
        let d2 = Vec3::new(-2.0, 0.0, 0.0);
        assert!(two_lines_colinear(&p1, &d1, &p2, &d2, 100.0, &TOL));
        // Parallel but offset.
        let p3 = Point3::new(0.0, 1.0, 0.0);
        assert!(!two_lines_colinear(&p1, &d1, &p3, &d1, 100.0, &TOL));
        // Nearly perpendicular.
        let d3 = Vec3::new(0.0, 1.0, 0.0);
        assert!(!two_lines_colinear(&p1, &d1, &p1, &d3, 100.0, &TOL));
    }

    #[test]
    fn crossing_lines_hit() {
        let r = isect_line3_line3(
            &Point3::new(0.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Point3::new(5.0, -5.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            &TOL,
        );
        match r {
            LineLineIsect3::Hit { t, u } => {
                assert!((t - 5.0).abs() < 1e-12);
                assert!((u - 5.0).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn skew_lines_miss() {
        let r = isect_line3_line3(
            &Point3::new(0.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 1.0),
            &Vec3::new(0.0, 1.0, 0.0),
            &TOL,
        );
        assert_eq!(r, LineLineIsect3::None);
    }

    #[test]
    fn parallel_and_collinear_lines() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let d = Vec3::new(1.0, 0.0, 0.0);
        let r = isect_line3_line3(&p, &d, &Point3::new(0.0, 2.0, 0.0), &d, &TOL);
        assert_eq!(r, LineLineIsect3::Parallel);

        let r = isect_line3_line3(&p, &d, &Point3::new(7.0, 0.0, 0.0), &d, &TOL);
        match r {
            LineLineIsect3::Collinear { t_at_a } => assert!((t_at_a - 7.0).abs() < 1e-12),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn segment_intersection_round_trip() {
        // P = A + s(B - A) must come back as a hit at parameter s.
        let a = Point3::new(1.0, 2.0, 3.0);
        let bdir = Vec3::new(4.0, -2.0, 1.0);
        let s = 0.35;
        let hit = a + bdir * s;
        let q = hit - Vec3::new(0.0, 3.0, 0.0);
        let r = isect_lseg3_lseg3(&a, &bdir, &q, &Vec3::new(0.0, 6.0, 0.0), &TOL);
        match r {
            SegSegIsect::Hit { t, u } => {
                assert!((t - s).abs() < 1e-9);
                assert!((u - 0.5).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn segment_miss_beyond_range() {
        let r = isect_lseg3_lseg3(
            &Point3::new(0.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Point3::new(5.0, 1.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            &TOL,
        );
        assert_eq!(r, SegSegIsect::Miss);
    }

    #[test]
    fn line_lseg_classifications() {
        let p = Point3::new(0.0, -5.0, 0.0);
        let d = Vec3::new(0.0, 1.0, 0.0);
        let a = Point3::new(-2.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let r = isect_line_lseg(&p, &d, &a, &b, &TOL).unwrap();
        match r {
            LineSegIsect::Interior { t, u } => {
                assert!((t - 5.0).abs() < 1e-12);
                assert!((u - 0.5).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }

        // Line through vertex A.
        let p2 = Point3::new(-2.0, -5.0, 0.0);
        let r = isect_line_lseg(&p2, &d, &a, &b, &TOL).unwrap();
        assert!(matches!(r, LineSegIsect::AtStart { .. }));

        // Collinear returns parameters of both endpoints.
        let p3 = Point3::new(-10.0, 0.0, 0.0);
        let d3 = Vec3::new(1.0, 0.0, 0.0);
        let r = isect_line_lseg(&p3, &d3, &a, &b, &TOL).unwrap();
        match r {
            LineSegIsect::Collinear { t_start, t_end } => {
                assert!((t_start - 8.0).abs() < 1e-12);
                assert!((t_end - 12.0).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }

        // Coincident endpoints are an error.
        assert_eq!(
            isect_line_lseg(&p, &d, &a, &a, &TOL),
            Err(GeomError::DegeneratePoints)
        );
    }

    #[test]
    fn point_segment_distance_cases() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 0.0, 0.0);

        let (r, pca) = dist_pt3_lseg3(&a, &b, &Point3::new(5.0, 3.0, 4.0), &TOL);
        assert_eq!(r, PointSegDist::Perpendicular { dist: 5.0 });
        assert!((pca - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);

        let (r, pca) = dist_pt3_lseg3(&a, &b, &Point3::new(-3.0, 4.0, 0.0), &TOL);
        assert_eq!(r, PointSegDist::BeforeStart { dist: 5.0 });
        assert_eq!(pca, a);

        let (r, pca) = dist_pt3_lseg3(&a, &b, &Point3::new(13.0, 0.0, 4.0), &TOL);
        assert_eq!(r, PointSegDist::BeyondEnd { dist: 5.0 });
        assert_eq!(pca, b);

        let (r, _) = dist_pt3_lseg3(&a, &b, &Point3::new(10.0 - 1e-5, 0.0, 0.0), &TOL);
        assert_eq!(r, PointSegDist::AtEnd);

        let (r, _) = dist_pt3_lseg3(&a, &b, &Point3::new(2.5, 0.0, 0.0), &TOL);
        match r {
            PointSegDist::OnSegment { t } => assert!((t - 0.25).abs() < 1e-12),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn point_segment_intersection_cases() {
        use crate::seg::PointSegIsect;
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 0.0, 0.0);
        assert!(matches!(
            isect_pt_lseg(&a, &b, &Point3::new(4.0, 0.0, 0.0), &TOL),
            PointSegIsect::OnSegment { .. }
        ));
        assert_eq!(
            isect_pt_lseg(&a, &b, &Point3::new(1e-5, 0.0, 0.0), &TOL),
            PointSegIsect::AtStart
        );
        assert_eq!(
            isect_pt_lseg(&a, &b, &Point3::new(4.0, 2.0, 0.0), &TOL),
            PointSegIsect::NotOnLine
        );
        match isect_pt_lseg(&a, &b, &Point3::new(-5.0, 0.0, 0.0), &TOL) {
            PointSegIsect::OutsideRange { t } => assert!((t + 0.5).abs() < 1e-12),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn closest_approach_skew_lines() {
        let r = distsq_line3_line3(
            &Point3::new(0.0, 0.0, 0.0),
            &Vec3::new(2.0, 0.0, 0.0),
            &Point3::new(5.0, 0.0, 3.0),
            &Vec3::new(0.0, 4.0, 0.0),
        );
        assert!(!r.parallel);
        assert!((r.dist_sq - 9.0).abs() < 1e-12);
        // Parameters are in multiples of the input directions.
        assert!((r.t - 2.5).abs() < 1e-12);
        assert!(r.u.abs() < 1e-12);
        assert!((r.pt1 - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((r.pt2 - Point3::new(5.0, 0.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn closest_approach_parallel_lines() {
        let r = distsq_line3_line3(
            &Point3::new(0.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 2.0, 0.0),
            &Vec3::new(3.0, 0.0, 0.0),
        );
        assert!(r.parallel);
        assert_eq!(r.t, 0.0);
        assert!((r.dist_sq - 4.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_segments_by_projection() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 4.0, 6.0);
        let c = Point3::new(1.0, 1.0, 1.0);
        let d = c + (b - a) * 0.5;
        assert!(lseg3_lseg3_parallel(&a, &b, &c, &d, &tol));
        assert!(lseg3_lseg3_parallel(&a, &b, &d, &c, &tol));
        let e = Point3::new(2.0, 4.0, 7.0);
        assert!(!lseg3_lseg3_parallel(&a, &b, &c, &e, &tol));
        // A zero-length segment is parallel to everything.
        assert!(lseg3_lseg3_parallel(&a, &a, &c, &e, &tol));
        // Axis-aligned verticals in every projection.
        let z1 = Point3::new(0.0, 0.0, 5.0);
        let z2 = Point3::new(1.0, 1.0, 0.0);
        let z3 = Point3::new(1.0, 1.0, 9.0);
        assert!(lseg3_lseg3_parallel(&a, &z1, &z2, &z3, &tol));
    }
}
