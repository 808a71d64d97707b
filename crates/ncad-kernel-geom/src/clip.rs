//! Clipping and classification against axis-aligned boxes.

use crate::plane::Plane;
use ncad_kernel_math::{Point3, Tolerance, SQRT_SMALL};

/// Classification of an axis-aligned box against a half space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfSpaceClass {
    /// Every corner is strictly below the plane.
    Inside,
    /// Every corner is strictly above the plane.
    Outside,
    /// Corners fall on both sides, or a corner lies on the plane within
    /// tolerance.
    Overlapping,
}

/// Classify the box `min..max` against the half space below `plane`.
///
/// Corners within `tol.dist` of the plane force `Overlapping`
/// immediately, as does the first corner on the opposite side of an
/// already-classified one.
pub fn hlf_class(plane: &Plane, min: &Point3, max: &Point3, tol: &Tolerance) -> HalfSpaceClass {
    let mut class: Option<HalfSpaceClass> = None;
    // Corner order: z varies fastest, then y, then x.
    for i in 0..8u32 {
        let corner = Point3::new(
            if i & 4 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 1 == 0 { min.z } else { max.z },
        );
        let d = plane.signed_dist(&corner);
        if d < -tol.dist {
            match class {
                Some(HalfSpaceClass::Outside) => return HalfSpaceClass::Overlapping,
                _ => class = Some(HalfSpaceClass::Inside),
            }
        } else if d > tol.dist {
            match class {
                Some(HalfSpaceClass::Inside) => return HalfSpaceClass::Overlapping,
                _ => class = Some(HalfSpaceClass::Outside),
            }
        } else {
            return HalfSpaceClass::Overlapping;
        }
    }
    match class {
        Some(c) => c,
        // Unreachable: the loop always classifies at least one corner.
        None => HalfSpaceClass::Overlapping,
    }
}

/// Clip the segment `a..b` against the axis-aligned box `min..max`.
///
/// Returns the clipped endpoints, or `None` when the segment misses the
/// box. The inputs are not modified; see [`clip_seg_rpp_in_place`] for
/// the mutating form.
pub fn clip_seg_rpp(
    a: &Point3,
    b: &Point3,
    min: &Point3,
    max: &Point3,
) -> Option<(Point3, Point3)> {
    let mut ca = *a;
    let mut cb = *b;
    if clip_seg_rpp_in_place(&mut ca, &mut cb, min, max) {
        Some((ca, cb))
    } else {
        None
    }
}

/// Clip the segment `a..b` against the axis-aligned box `min..max`,
/// overwriting the endpoints with the clipped positions.
///
/// Returns false, leaving `a` and `b` untouched, when the segment misses
/// the box. Slab method: the entry and exit parameters are accumulated
/// per axis, with near-zero direction components checked only against
/// the slab boundaries.
pub fn clip_seg_rpp_in_place(a: &mut Point3, b: &mut Point3, min: &Point3, max: &Point3) -> bool {
    let diff = *b - *a;
    let mut mindist = f64::NEG_INFINITY;
    let mut maxdist = f64::INFINITY;

    for i in 0..3 {
        let dir = diff[i];
        let pt = a[i];
        if dir < -SQRT_SMALL {
            let sv = (min[i] - pt) / dir;
            if sv < 0.0 {
                return false;
            }
            if maxdist > sv {
                maxdist = sv;
            }
            let st = (max[i] - pt) / dir;
            if mindist < st {
                mindist = st;
            }
        } else if dir > SQRT_SMALL {
            let st = (max[i] - pt) / dir;
            if st < 0.0 {
                return false;
            }
            if maxdist > st {
                maxdist = st;
            }
            let sv = (min[i] - pt) / dir;
            if mindist < sv {
                mindist = sv;
            }
        } else if min[i] > pt || max[i] < pt {
            // Segment is parallel to this slab and outside it.
            return false;
        }
    }
    if mindist >= maxdist {
        return false;
    }
    if mindist > 1.0 || maxdist < 0.0 {
        return false;
    }
    if mindist >= 0.0 && maxdist <= 1.0 {
        // Entirely inside, nothing to clip.
        return true;
    }

    // Don't grow an end of a contained segment.
    let mindist = mindist.max(0.0);
    let maxdist = maxdist.min(1.0);

    // b is derived from the original a, so it must be written first.
    *b = *a + diff * maxdist;
    *a += diff * mindist;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncad_kernel_math::Vec3;

    fn unit_box() -> (Point3, Point3) {
        (Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    fn xplane(d: f64) -> Plane {
        Plane::new(Vec3::new(1.0, 0.0, 0.0), d)
    }

    #[test]
    fn box_classification_against_plane() {
        let tol = Tolerance::DEFAULT;
        let (min, max) = unit_box();
        assert_eq!(hlf_class(&xplane(5.0), &min, &max, &tol), HalfSpaceClass::Inside);
        assert_eq!(hlf_class(&xplane(-5.0), &min, &max, &tol), HalfSpaceClass::Outside);
        assert_eq!(
            hlf_class(&xplane(0.5), &min, &max, &tol),
            HalfSpaceClass::Overlapping
        );
        // Plane exactly through a face.
        assert_eq!(
            hlf_class(&xplane(1.0), &min, &max, &tol),
            HalfSpaceClass::Overlapping
        );
    }

    #[test]
    fn segment_clipped_to_box() {
        let (min, max) = unit_box();
        let a = Point3::new(-1.0, 0.5, 0.5);
        let b = Point3::new(2.0, 0.5, 0.5);
        let (ca, cb) = clip_seg_rpp(&a, &b, &min, &max).unwrap();
        assert!((ca - Point3::new(0.0, 0.5, 0.5)).norm() < 1e-12);
        assert!((cb - Point3::new(1.0, 0.5, 0.5)).norm() < 1e-12);
        // Inputs untouched.
        assert_eq!(a, Point3::new(-1.0, 0.5, 0.5));
    }

    #[test]
    fn contained_segment_not_grown() {
        let (min, max) = unit_box();
        let mut a = Point3::new(0.25, 0.5, 0.5);
        let mut b = Point3::new(0.75, 0.5, 0.5);
        assert!(clip_seg_rpp_in_place(&mut a, &mut b, &min, &max));
        assert_eq!(a, Point3::new(0.25, 0.5, 0.5));
        assert_eq!(b, Point3::new(0.75, 0.5, 0.5));
    }

    #[test]
    fn missing_segment_left_untouched() {
        let (min, max) = unit_box();
        let orig_a = Point3::new(-1.0, 2.0, 0.5);
        let orig_b = Point3::new(2.0, 2.0, 0.5);
        let mut a = orig_a;
        let mut b = orig_b;
        assert!(!clip_seg_rpp_in_place(&mut a, &mut b, &min, &max));
        assert_eq!(a, orig_a);
        assert_eq!(b, orig_b);
        assert!(clip_seg_rpp(&orig_a, &orig_b, &min, &max).is_none());
    }

    #[test]
    fn axis_aligned_segment_outside_slab_misses() {
        let (min, max) = unit_box();
        // Parallel to x, offset in z beyond the box.
        let a = Point3::new(-1.0, 0.5, 2.0);
        let b = Point3::new(2.0, 0.5, 2.0);
        assert!(clip_seg_rpp(&a, &b, &min, &max).is_none());
    }

    #[test]
    fn diagonal_segment_clips_both_ends() {
        let (min, max) = unit_box();
        let a = Point3::new(-1.0, -1.0, -1.0);
        let b = Point3::new(2.0, 2.0, 2.0);
        let (ca, cb) = clip_seg_rpp(&a, &b, &min, &max).unwrap();
        assert!((ca - Point3::new(0.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((cb - Point3::new(1.0, 1.0, 1.0)).norm() < 1e-12);
    }
}
