//! 2D line and segment predicates.
//!
//! Lines are given in parametric form `X = P + t * D`; direction vectors
//! need not be unit length unless noted. Segments are given as a start
//! point and a direction whose length is the segment (so the far endpoint
//! is at parameter 1).

use crate::error::GeomError;
use crate::points::{between, dist_pt2_along_line2};
use crate::seg::{LineSegIsect, PointSegDistSq, PointSegIsect, SegSegIsect};
use ncad_kernel_math::{near_zero, Point2, Tolerance, Vec2, DETERMINANT_TOL, SMALL};

fn unit_or_zero(v: &Vec2) -> Vec2 {
    let m = v.norm();
    if m < SMALL {
        Vec2::zeros()
    } else {
        v / m
    }
}

/// Distance from point `a` to the line `pt + t * dir`.
///
/// Zero-length `dir` yields distance zero.
pub fn dist_line2_point2(pt: &Point2, dir: &Vec2, a: &Point2) -> f64 {
    distsq_line2_point2(pt, dir, a).sqrt()
}

/// Squared distance from point `a` to the line `pt + t * dir`.
pub fn distsq_line2_point2(pt: &Point2, dir: &Vec2, a: &Point2) -> f64 {
    let f = pt - a;
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

/// Outcome of intersecting two infinite 2D lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineLineIsect2 {
    /// Parallel and offset; no intersection.
    Parallel,
    /// The lines coincide.
    ///
    /// Parameters are along the FIRST line: `t0` locates the second
    /// line's base point `A`, `t1` locates `A + C`.
    Collinear {
        /// Parameter along the first line of `A`.
        t0: f64,
        /// Parameter along the first line of `A + C`.
        t1: f64,
    },
    /// Single intersection.
    Hit {
        /// Parameter along the first line.
        t: f64,
        /// Parameter along the second line.
        u: f64,
    },
}

/// Intersect the lines `P + t * D` and `A + u * C` by Cramer's rule.
///
/// Parallelism is detected both by the unit directions' dot product
/// against `tol.para` and by the determinant against a fixed threshold;
/// near-parallel lines that slip past both can intersect far away, which
/// is why segment-level callers re-validate the hit point.
pub fn isect_line2_line2(
    p: &Point2,
    d: &Vec2,
    a: &Point2,
    c: &Vec2,
    tol: &Tolerance,
) -> LineLineIsect2 {
    // System: t * D - u * C = A - P, solved for t and u.
    let hx = a.x - p.x;
    let hy = a.y - p.y;
    let det = c.x * d.y - d.x * c.y;
    let det1 = c.x * hy - hx * c.y;

    let unit_d = unit_or_zero(d);
    let unit_c = unit_or_zero(c);
    let unit_h = unit_or_zero(&Vec2::new(hx, hy));

    let parallel = unit_d.dot(&unit_c).abs() >= tol.para;
    let parallel1 = unit_h.dot(&unit_c).abs() >= tol.para;

    if parallel || near_zero(det, DETERMINANT_TOL) {
        if !parallel1 && !near_zero(det1, DETERMINANT_TOL) {
            return LineLineIsect2::Parallel;
        }
        // Collinear. Use the larger direction component for stability.
        let (t0, t1) = if d.x.abs() >= d.y.abs() {
            (hx / d.x, (hx + c.x) / d.x)
        } else {
            (hy / d.y, (hy + c.y) / d.y)
        };
        return LineLineIsect2::Collinear { t0, t1 };
    }

    let inv = 1.0 / det;
    LineLineIsect2::Hit {
        t: inv * det1,
        u: inv * (d.x * hy - hx * d.y),
    }
}

/// Test point `p` against the segment from `a` to `b`.
///
/// Endpoint proximity wins over the on-line test, so a point near `A` is
/// reported `AtStart` even if it is off the segment's carrier line.
pub fn isect_pt2_lseg2(a: &Point2, b: &Point2, p: &Point2, tol: &Tolerance) -> PointSegIsect {
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
        // A equals B and P is not there.
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

/// Intersect the line `P + t * D` with the segment from `A` to `A + C`.
///
/// Collinearity is pre-tested by checking both endpoints against the
/// line; hit points from the general solver are re-validated against the
/// segment to guard against near-parallel blowup. Errors with
/// [`GeomError::DegeneratePoints`] when `A` and `A + C` are not distinct.
///
/// # Panics
/// Panics if the solver reports an interior hit whose coordinates do not
/// lie between the endpoints (numerical contract violation).
pub fn isect_line2_lseg2(
    p: &Point2,
    d: &Vec2,
    a: &Point2,
    c: &Vec2,
    tol: &Tolerance,
) -> Result<LineSegIsect, GeomError> {
    let c_len_sq = c.norm_squared();
    if c_len_sq <= tol.dist_sq {
        return Err(GeomError::DegeneratePoints);
    }
    let b = a + c;

    // If both endpoints are on the line, the segment is on the line.
    if distsq_line2_point2(p, d, a) <= tol.dist_sq
        && distsq_line2_point2(p, d, &b) <= tol.dist_sq
    {
        return Ok(LineSegIsect::Collinear {
            t_start: dist_pt2_along_line2(p, d, a),
            t_end: dist_pt2_along_line2(p, d, &b),
        });
    }

    let (t, u) = match isect_line2_line2(p, d, a, c, tol) {
        LineLineIsect2::Parallel => return Ok(LineSegIsect::None),
        LineLineIsect2::Collinear { t0, t1 } => {
            // Snap parameters to exact endpoint values within tolerance.
            let dtol = tol.dist / d.norm();
            return Ok(LineSegIsect::Collinear {
                t_start: snap01(t0, dtol),
                t_end: snap01(t1, dtol),
            });
        }
        LineLineIsect2::Hit { t, u } => (t, u),
    };

    // Validate the claimed hit point against the segment itself.
    let hit_pt = p + d * t;
    match isect_pt2_lseg2(a, &b, &hit_pt, tol) {
        PointSegIsect::NotOnLine => return Ok(LineSegIsect::BeyondEnd { t }),
        PointSegIsect::OutsideRange { t: ab } => {
            if ab < 0.0 {
                return Ok(LineSegIsect::BeforeStart { t });
            }
            return Ok(LineSegIsect::BeyondEnd { t });
        }
        PointSegIsect::AtStart => return Ok(LineSegIsect::AtStart { t }),
        PointSegIsect::AtEnd => return Ok(LineSegIsect::AtEnd { t }),
        PointSegIsect::OnSegment { .. } => {}
    }

    if !between(a.x, hit_pt.x, b.x, tol) || !between(a.y, hit_pt.y, b.y, tol) {
        panic!("isect_line2_lseg2: hit point not between segment endpoints");
    }

    // Convert tol.dist into parameter-space slack along the segment.
    let ctol = tol.dist / c_len_sq.sqrt();
    if u < -ctol {
        return Ok(LineSegIsect::BeforeStart { t });
    }
    let f = u - 1.0;
    if f > ctol {
        return Ok(LineSegIsect::BeyondEnd { t });
    }
    if u < ctol {
        return Ok(LineSegIsect::AtStart { t });
    }
    if f >= -ctol {
        return Ok(LineSegIsect::AtEnd { t });
    }
    Ok(LineSegIsect::Interior { t, u })
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

/// Intersect two 2D segments, each given as point plus full-length
/// direction.
///
/// Parameters are snapped exactly to 0 or 1 when within tolerance of an
/// endpoint. In the collinear-overlap case both returned parameters are
/// along the first segment (see [`SegSegIsect::CollinearOverlap`]).
pub fn isect_lseg2_lseg2(
    p: &Point2,
    pdir: &Vec2,
    q: &Point2,
    qdir: &Vec2,
    tol: &Tolerance,
) -> SegSegIsect {
    match isect_line2_line2(p, pdir, q, qdir, tol) {
        LineLineIsect2::Parallel => SegSegIsect::Miss,
        LineLineIsect2::Collinear { t0, t1 } => {
            let ptol = tol.dist / pdir.norm();
            let t0 = snap01(t0, ptol);
            let t1 = snap01(t1, ptol);
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
        LineLineIsect2::Hit { t, u } => {
            let ptol = tol.dist / pdir.norm();
            let qtol = tol.dist / qdir.norm();
            let t = snap01(t, ptol);
            let u = snap01(u, qtol);
            if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
                return SegSegIsect::Miss;
            }
            SegSegIsect::Hit { t, u }
        }
    }
}

/// Distance from point `p` to the segment `A..B`, with the closest point.
///
/// Distances in the result are SQUARED, except the on-segment case which
/// reports the parametric position of the closest point instead.
pub fn dist_pt2_lseg2(
    a: &Point2,
    b: &Point2,
    p: &Point2,
    tol: &Tolerance,
) -> (PointSegDistSq, Point2) {
    let p_to_a = p - a;
    let p_a_sq = p_to_a.norm_squared();
    if p_a_sq < tol.dist_sq {
        return (PointSegDistSq::AtStart, *a);
    }
    let p_to_b = p - b;
    let p_b_sq = p_to_b.norm_squared();
    if p_b_sq < tol.dist_sq {
        return (PointSegDistSq::AtEnd, *b);
    }

    let a_to_b = b - a;
    let b_a = a_to_b.norm();
    // Distance along the carrier line to the projection of P.
    let t = p_to_a.dot(&a_to_b) / b_a;
    if t <= 0.0 {
        return (PointSegDistSq::BeforeStart { dist_sq: p_a_sq }, *a);
    }
    if t < b_a {
        let param = t / b_a;
        let pca = a + a_to_b * param;
        let dsq = p_a_sq - t * t;
        if dsq <= tol.dist_sq {
            // Off-segment distance is zero; report the parameter instead.
            return (PointSegDistSq::OnSegment { t: param }, pca);
        }
        return (PointSegDistSq::Perpendicular { dist_sq: dsq }, pca);
    }
    (PointSegDistSq::BeyondEnd { dist_sq: p_b_sq }, *b)
}
