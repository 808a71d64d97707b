//! Classification enums shared by the 2D and 3D segment predicates.
//!
//! Each variant corresponds to one outcome of the underlying routine; the
//! payloads are the parametric values callers previously had to read out
//! of side-channel output arguments.

/// Outcome of intersecting two line segments.
///
/// Parameters are in `[0, 1]` along each segment, snapped exactly to the
/// endpoint values when within tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegSegIsect {
    /// No intersection: parallel, collinear without overlap, or crossing
    /// outside one of the segments.
    Miss,
    /// Segments are collinear and overlap.
    ///
    /// Both parameters are along the FIRST segment: `t0` locates the
    /// second segment's start, `t1` its end. Either may fall outside
    /// `[0, 1]` when that endpoint lies beyond the first segment.
    CollinearOverlap {
        /// Parameter along the first segment of the second's start point.
        t0: f64,
        /// Parameter along the first segment of the second's end point.
        t1: f64,
    },
    /// Single transverse intersection.
    Hit {
        /// Parameter along the first segment.
        t: f64,
        /// Parameter along the second segment.
        u: f64,
    },
}

/// Outcome of intersecting an infinite line with a segment `A..B`.
///
/// `t` is the parameter along the line (in multiples of its direction
/// vector); `u` is in `[0, 1]` along the segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSegIsect {
    /// Line and segment do not intersect.
    None,
    /// The line crosses the segment's carrier before `A`.
    BeforeStart {
        /// Line parameter of the crossing.
        t: f64,
    },
    /// The line crosses the segment's carrier beyond `B`.
    BeyondEnd {
        /// Line parameter of the crossing.
        t: f64,
    },
    /// The segment lies on the line.
    Collinear {
        /// Line parameter of `A`.
        t_start: f64,
        /// Line parameter of `B`.
        t_end: f64,
    },
    /// Crossing lands on `A` within tolerance.
    AtStart {
        /// Line parameter of the crossing. Prefer the original `A` over
        /// re-deriving the point from `t`.
        t: f64,
    },
    /// Crossing lands on `B` within tolerance.
    AtEnd {
        /// Line parameter of the crossing. Prefer the original `B` over
        /// re-deriving the point from `t`.
        t: f64,
    },
    /// Crossing strictly between `A` and `B`.
    Interior {
        /// Line parameter of the crossing.
        t: f64,
        /// Segment parameter of the crossing, in `(0, 1)`.
        u: f64,
    },
}

/// Outcome of testing a point against a segment `A..B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointSegIsect {
    /// The point is farther than tolerance from the segment's line.
    NotOnLine,
    /// On the line but outside `[A, B]`; payload is the parameter along
    /// `A..B` (negative before `A`, above 1 beyond `B`).
    OutsideRange {
        /// Parameter of the point's projection along `A..B`.
        t: f64,
    },
    /// Within tolerance of `A`.
    AtStart,
    /// Within tolerance of `B`.
    AtEnd,
    /// On the segment; payload is the parameter in `[0, 1]`.
    OnSegment {
        /// Parameter of the point along `A..B`.
        t: f64,
    },
}

/// Point-to-segment distance classification, 3D flavor (linear distances).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointSegDist {
    /// Within tolerance of the segment interior. The payload is the
    /// PARAMETRIC position of the closest point in `[0, 1]`, not a
    /// distance.
    OnSegment {
        /// Parameter of the closest point along `A..B`.
        t: f64,
    },
    /// Within tolerance of endpoint `A` (distance treated as zero).
    AtStart,
    /// Within tolerance of endpoint `B` (distance treated as zero).
    AtEnd,
    /// Projection falls before `A`; distance is to `A`.
    BeforeStart {
        /// Distance from the point to `A`.
        dist: f64,
    },
    /// Projection falls beyond `B`; distance is to `B`.
    BeyondEnd {
        /// Distance from the point to `B`.
        dist: f64,
    },
    /// Projection falls within the segment but off it by more than
    /// tolerance.
    Perpendicular {
        /// Perpendicular distance from the point to the segment.
        dist: f64,
    },
}

/// Point-to-segment distance classification, 2D flavor.
///
/// Distances are SQUARED, except that `OnSegment` carries the parametric
/// position exactly as the 3D flavor does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointSegDistSq {
    /// Within tolerance of the segment interior; payload is parametric,
    /// not a squared distance.
    OnSegment {
        /// Parameter of the closest point along `A..B`.
        t: f64,
    },
    /// Within tolerance of endpoint `A`.
    AtStart,
    /// Within tolerance of endpoint `B`.
    AtEnd,
    /// Projection falls before `A`; squared distance is to `A`.
    BeforeStart {
        /// Squared distance from the point to `A`.
        dist_sq: f64,
    },
    /// Projection falls beyond `B`; squared distance is to `B`.
    BeyondEnd {
        /// Squared distance from the point to `B`.
        dist_sq: f64,
    },
    /// Projection within the segment, point off it by more than
    /// tolerance.
    Perpendicular {
        /// Squared perpendicular distance from the point to the segment.
        dist_sq: f64,
    },
}

impl PointSegDistSq {
    /// Squared distance usable for nearest-element ranking: the
    /// on-segment and endpoint cases count as zero.
    pub fn ranking_dist_sq(&self) -> f64 {
        match *self {
            PointSegDistSq::OnSegment { .. }
            | PointSegDistSq::AtStart
            | PointSegDistSq::AtEnd => 0.0,
            PointSegDistSq::BeforeStart { dist_sq }
            | PointSegDistSq::BeyondEnd { dist_sq }
            | PointSegDistSq::Perpendicular { dist_sq } => dist_sq,
        }
    }
}
