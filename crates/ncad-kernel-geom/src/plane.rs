//! Planes and plane intersections.
//!
//! A plane is stored as a unit outward normal `n` and a signed offset `d`
//! such that a point `P` is on the plane when `dot(n, P) == d`.

use crate::error::GeomError;
use crate::points::pts_distinct3;
use nalgebra::Matrix3;
use ncad_kernel_math::{
    near_equal, near_zero, Dir3, Point3, Tolerance, Transform, Vec3, SMALL, VUNITIZE_TOL,
};

/// A plane in normal/offset form: `dot(normal, P) = dist`.
///
/// `normal` must be unit length; constructors enforce this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit outward normal.
    pub normal: Vec3,
    /// Signed distance from the origin along the normal.
    pub dist: f64,
}

impl Plane {
    /// Plane from an already-unit normal and offset.
    ///
    /// # Panics
    /// Panics if `normal` is not unit length within [`VUNITIZE_TOL`].
    pub fn new(normal: Vec3, dist: f64) -> Self {
        assert!(
            near_equal(normal.norm_squared(), 1.0, VUNITIZE_TOL),
            "plane normal must be unit length"
        );
        Self { normal, dist }
    }

    /// Plane through three points, with the normal `(b-a) x (c-a)`
    /// following the right-hand rule (counter-clockwise input gives an
    /// outward normal).
    ///
    /// Fails if any pair of points is within tolerance of each other, or
    /// if the points are collinear enough that the cross product vanishes.
    pub fn from_3_points(
        a: &Point3,
        b: &Point3,
        c: &Point3,
        tol: &Tolerance,
    ) -> Result<Plane, GeomError> {
        if !pts_distinct3(a, b, c, tol) {
            return Err(GeomError::DegeneratePoints);
        }
        let n = (b - a).cross(&(c - a));
        let mag = n.norm();
        if mag <= SMALL {
            return Err(GeomError::DegeneratePoints);
        }
        let normal = n / mag;
        Ok(Plane {
            normal,
            dist: normal.dot(&a.coords),
        })
    }

    /// Signed distance of `p` from the plane, positive on the normal side.
    pub fn signed_dist(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.dist
    }

    /// This plane mapped through an affine transform.
    ///
    /// The normal is carried by the inverse transpose and re-unitized; the
    /// offset is recomputed from a transformed point on the plane.
    pub fn transformed(&self, xform: &Transform) -> Plane {
        let anchor = Point3::from(self.normal * self.dist);
        let n = xform.apply_normal(&self.normal);
        let mag = n.norm();
        let normal = if mag > SMALL { n / mag } else { self.normal };
        let new_anchor = xform.apply_point(&anchor);
        Plane {
            normal,
            dist: normal.dot(&new_anchor.coords),
        }
    }
}

/// Relative placement of two planes, as classified by [`coplanar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coplanarity {
    /// Not parallel; the planes intersect in a line.
    Intersecting,
    /// Parallel but offset from each other.
    ParallelDistinct,
    /// Same plane, normals pointing the same way.
    CoplanarSameNormal,
    /// Same plane, normals opposed.
    CoplanarOppositeNormal,
}

/// Classify two planes as intersecting, parallel, or coincident.
///
/// Parallelism is judged by the normals' dot product being within
/// `tol.perp` of +-1; coincidence additionally requires the planes'
/// origin-projection points to coincide within `tol.dist`.
pub fn coplanar(a: &Plane, b: &Plane, tol: &Tolerance) -> Coplanarity {
    assert!(
        near_equal(a.normal.norm_squared(), 1.0, VUNITIZE_TOL)
            && near_equal(b.normal.norm_squared(), 1.0, VUNITIZE_TOL),
        "coplanar() requires unit plane normals"
    );

    let dot = a.normal.dot(&b.normal);
    if near_zero(dot, tol.perp) {
        return Coplanarity::Intersecting;
    }

    let parallel = if dot <= -SMALL {
        near_equal(dot, -1.0, tol.perp)
    } else {
        near_equal(dot, 1.0, tol.perp)
    };
    if parallel {
        let pt_a = Point3::from(a.normal * a.dist);
        let pt_b = Point3::from(b.normal * b.dist);
        if tol.pt3_equal(&pt_a, &pt_b) {
            if dot >= SMALL {
                return Coplanarity::CoplanarSameNormal;
            }
            return Coplanarity::CoplanarOppositeNormal;
        }
        return Coplanarity::ParallelDistinct;
    }
    Coplanarity::Intersecting
}

/// Point where three planes meet, by Cramer's rule with the scalar triple
/// product as determinant.
///
/// Fails when the determinant is numerically zero (the intersection is a
/// line or a plane, or empty).
pub fn point_from_3_planes(a: &Plane, b: &Plane, c: &Plane) -> Result<Point3, GeomError> {
    let v1 = b.normal.cross(&c.normal);
    let det = a.normal.dot(&v1);
    if near_zero(det, SMALL) {
        return Err(GeomError::SingularSystem);
    }
    let v2 = a.normal.cross(&c.normal);
    let v3 = a.normal.cross(&b.normal);
    let pt = (v1 * a.dist - v2 * b.dist + v3 * c.dist) / det;
    Ok(Point3::from(pt))
}

/// Result of intersecting a line with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinePlaneIsect {
    /// The ray crosses the plane along its normal (from the inside of the
    /// half-space to the outside); payload is the parametric hit distance.
    Entering(f64),
    /// The ray crosses the plane against its normal; payload is the
    /// parametric hit distance.
    Leaving(f64),
    /// Parallel and within `tol.dist` of the plane.
    InPlane,
    /// Parallel, origin beyond the plane (outside the half-space).
    MissOutside,
    /// Parallel, origin below the plane (inside the half-space).
    MissInside,
}

/// Intersect the line `pt + t * dir` with a plane.
///
/// `dir` need not be unit length; the returned hit parameter is in
/// multiples of `dir`. A crossing steeper than `tol.perp` in unit terms is
/// a hit; anything flatter falls back to classifying the origin's signed
/// distance against `tol.dist`.
pub fn isect_line3_plane(
    pt: &Point3,
    dir: &Vec3,
    plane: &Plane,
    tol: &Tolerance,
) -> LinePlaneIsect {
    let norm_dist = plane.dist - plane.normal.dot(&pt.coords);
    let slant_factor = plane.normal.dot(dir);
    let dot = plane.normal.dot(&dir.normalize());

    if slant_factor > SMALL && dot > tol.perp {
        return LinePlaneIsect::Entering(norm_dist / slant_factor);
    }
    if slant_factor < -SMALL && dot < -tol.perp {
        return LinePlaneIsect::Leaving(norm_dist / slant_factor);
    }

    if norm_dist < -tol.dist {
        return LinePlaneIsect::MissOutside;
    }
    if norm_dist > tol.dist {
        return LinePlaneIsect::MissInside;
    }
    LinePlaneIsect::InPlane
}

/// Result of intersecting two planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanePlaneIsect {
    /// Line of intersection in point/direction form.
    Line {
        /// A point on the line, anchored near the model minimum.
        point: Point3,
        /// Unit direction of the line.
        dir: Dir3,
    },
    /// The planes coincide.
    Coplanar,
    /// The planes are parallel and distinct.
    ParallelDistinct,
}

/// Find the line where two planes intersect.
///
/// So that downstream geometry sits "in front" of the returned ray,
/// callers pass the minimum corner of the model box as `rpp_min` (the
/// origin works when that convention is not needed): the ray is anchored
/// on an axis plane through that corner, the axis chosen as the one most
/// parallel to the line so the 3-plane solve stays well conditioned.
pub fn isect_2planes(
    a: &Plane,
    b: &Plane,
    rpp_min: &Point3,
    tol: &Tolerance,
) -> Result<PlanePlaneIsect, GeomError> {
    match coplanar(a, b, tol) {
        Coplanarity::CoplanarSameNormal | Coplanarity::CoplanarOppositeNormal => {
            return Ok(PlanePlaneIsect::Coplanar);
        }
        Coplanarity::ParallelDistinct => return Ok(PlanePlaneIsect::ParallelDistinct),
        Coplanarity::Intersecting => {}
    }

    let mut dir = a.normal.cross(&b.normal).normalize();

    let abs = dir.abs();
    let (axis, anchor) = if abs.x >= abs.y {
        if abs.x >= abs.z {
            (Vec3::x(), rpp_min.x)
        } else {
            (Vec3::z(), rpp_min.z)
        }
    } else if abs.y >= abs.z {
        (Vec3::y(), rpp_min.y)
    } else {
        (Vec3::z(), rpp_min.z)
    };
    if dir.dot(&axis) < 0.0 {
        dir = -dir;
    }
    let axis_plane = Plane {
        normal: axis,
        dist: anchor,
    };

    let point =
        point_from_3_planes(&axis_plane, a, b).map_err(|_| GeomError::NoIntersection)?;
    Ok(PlanePlaneIsect::Line {
        point,
        dir: Dir3::new_unchecked(dir),
    })
}

/// Point at minimum total squared distance from a set of planes.
///
/// Builds the 3x3 normal equations from the planes' squared-distance sum
/// and solves them; if the planes meet in one point, that point is the
/// answer. Fails when the system is singular (fewer than three independent
/// normals).
pub fn isect_planes(planes: &[Plane]) -> Result<Point3, GeomError> {
    let mut m = Matrix3::<f64>::zeros();
    let mut hpq = Vec3::zeros();
    for p in planes {
        m += p.normal * p.normal.transpose();
        hpq += p.normal * p.dist;
    }
    if near_zero(m.determinant(), SMALL) {
        return Err(GeomError::SingularSystem);
    }
    let inv = m.try_inverse().ok_or(GeomError::SingularSystem)?;
    Ok(Point3::from(inv * hpq))
}
