//! Tolerance-based geometric predicates and constructions.
//!
//! Every routine that makes a yes/no decision takes a [`Tolerance`]
//! rather than comparing against machine epsilon: two points closer
//! than `tol.dist` are the same point, two unit vectors whose dot
//! exceeds `tol.para` are parallel. Results that used to be magic
//! integer codes are tagged enums carrying their parametric payloads.
//!
//! All routines are stateless; inputs are never mutated unless the
//! function name says `_in_place`.

#![warn(missing_docs)]

mod clip;
mod error;
mod line2;
mod line3;
mod plane;
mod points;
mod seg;
mod tri;

pub use clip::{clip_seg_rpp, clip_seg_rpp_in_place, hlf_class, HalfSpaceClass};
pub use error::GeomError;
pub use line2::{
    dist_line2_point2, dist_pt2_lseg2, distsq_line2_point2, isect_line2_line2, isect_line2_lseg2,
    isect_lseg2_lseg2, isect_pt2_lseg2, LineLineIsect2,
};
pub use line3::{
    dist_line3_pt3, dist_pt3_lseg3, distsq_line3_line3, distsq_line3_pt3, isect_line3_line3,
    isect_line_lseg, isect_lseg3_lseg3, isect_pt_lseg, lseg3_lseg3_parallel, two_lines_colinear,
    ClosestApproach, LineLineIsect3,
};
pub use plane::{
    coplanar, isect_2planes, isect_line3_plane, isect_planes, point_from_3_planes, Coplanarity,
    LinePlaneIsect, Plane, PlanePlaneIsect,
};
pub use points::{
    angle_measure, between, dist_pt2_along_line2, dist_pt3_along_line3, dist_pt3_pt3,
    pts_collinear, pts_distinct, pts_distinct3,
};
pub use seg::{
    LineSegIsect, PointSegDist, PointSegDistSq, PointSegIsect, SegSegIsect,
};
pub use tri::{area_of_triangle, does_ray_isect_tri};

pub use ncad_kernel_math::Tolerance;
