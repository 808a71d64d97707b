//! Triangle predicates.

use ncad_kernel_math::{near_zero, Point3, Vec3, SMALL};

/// Area of the triangle `a`, `b`, `c`.
///
/// Half the magnitude of the cross product, computed as the root of the
/// sum of the three squared cofactor determinants so no intermediate
/// vector is formed. Algorithm by Jon Leech.
pub fn area_of_triangle(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    let mut t = a.y * (b.z - c.z) - b.y * (a.z - c.z) + c.y * (a.z - b.z);
    let mut area = t * t;
    t = a.z * (b.x - c.x) - b.z * (a.x - c.x) + c.z * (a.x - b.x);
    area += t * t;
    t = a.x * (b.y - c.y) - b.x * (a.y - c.y) + c.x * (a.y - b.y);
    area += t * t;
    0.5 * area.sqrt()
}

/// Intersect the ray `pt + t * dir` with the triangle `v`, `a`, `b`.
///
/// Returns the intersection point, or `None` when the ray is parallel to
/// the triangle's plane or the plane crossing falls outside the triangle.
/// Containment is decided by requiring the crossing to be on the inner
/// side of all three edges, so edge and vertex grazes count as hits.
pub fn does_ray_isect_tri(
    pt: &Point3,
    dir: &Vec3,
    v: &Point3,
    a: &Point3,
    b: &Point3,
) -> Option<Point3> {
    let va = a - v;
    let vb = b - v;
    let mut n = va.cross(&vb);
    let mag = n.norm();
    if mag < SMALL {
        return None;
    }
    n /= mag;

    let n_dot_dir = n.dot(dir);
    if near_zero(n_dot_dir, SMALL) {
        return None;
    }

    let plane_dist = n.dot(&v.coords);
    let t = (plane_dist - n.dot(&pt.coords)) / n_dot_dir;
    let inter = pt + dir * t;

    // The crossing must lie on the inner side of each edge.
    let vp = inter - v;
    if va.cross(&vp).dot(&n) < 0.0 {
        return None;
    }
    if vp.cross(&vb).dot(&n) < 0.0 {
        return None;
    }
    let ab = b - a;
    let ap = inter - a;
    if ab.cross(&ap).dot(&n) < 0.0 {
        return None;
    }

    Some(inter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_of_unit_right_triangle() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        assert!((area_of_triangle(&a, &b, &c) - 0.5).abs() < 1e-12);
        // Order independence.
        assert!((area_of_triangle(&c, &a, &b) - 0.5).abs() < 1e-12);
        // Degenerate triangle.
        assert!(area_of_triangle(&a, &b, &b).abs() < 1e-12);
    }

    #[test]
    fn area_of_tilted_triangle() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(0.0, 0.0, 3.0);
        approx::assert_relative_eq!(area_of_triangle(&a, &b, &c), 3.0, max_relative = 1e-12);
    }

    #[test]
    fn ray_hits_triangle_interior() {
        let v = Point3::new(0.0, 0.0, 0.0);
        let a = Point3::new(4.0, 0.0, 0.0);
        let b = Point3::new(0.0, 4.0, 0.0);
        let hit = does_ray_isect_tri(
            &Point3::new(1.0, 1.0, 5.0),
            &Vec3::new(0.0, 0.0, -1.0),
            &v,
            &a,
            &b,
        );
        let p = hit.unwrap();
        assert!((p - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn ray_misses_outside_and_parallel() {
        let v = Point3::new(0.0, 0.0, 0.0);
        let a = Point3::new(4.0, 0.0, 0.0);
        let b = Point3::new(0.0, 4.0, 0.0);
        // Crossing outside the hypotenuse edge.
        assert!(does_ray_isect_tri(
            &Point3::new(3.0, 3.0, 5.0),
            &Vec3::new(0.0, 0.0, -1.0),
            &v,
            &a,
            &b,
        )
        .is_none());
        // Ray parallel to the plane.
        assert!(does_ray_isect_tri(
            &Point3::new(1.0, 1.0, 5.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &v,
            &a,
            &b,
        )
        .is_none());
    }

    #[test]
    fn ray_hits_edge_and_vertex() {
        let v = Point3::new(0.0, 0.0, 0.0);
        let a = Point3::new(4.0, 0.0, 0.0);
        let b = Point3::new(0.0, 4.0, 0.0);
        // Graze along the VA edge.
        assert!(does_ray_isect_tri(
            &Point3::new(2.0, 0.0, 5.0),
            &Vec3::new(0.0, 0.0, -1.0),
            &v,
            &a,
            &b,
        )
        .is_some());
        // Exactly at vertex V.
        assert!(does_ray_isect_tri(
            &Point3::new(0.0, 0.0, 5.0),
            &Vec3::new(0.0, 0.0, -1.0),
            &v,
            &a,
            &b,
        )
        .is_some());
    }
}
