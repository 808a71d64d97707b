//! Loop-level queries: plane and area, winding, cracks, self-touches.

use crate::model::{LoopuseChildren, LoopuseId, Model, VertexuseId, VertexuseParent};
use ncad_kernel_geom::Plane;
use ncad_kernel_math::{near_zero, Point3, Tolerance, Vec3, SMALL};

/// Winding of a loop relative to a reference normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOrientation {
    /// Counterclockwise around the reference normal (exterior loop).
    Ccw,
    /// Clockwise (interior loop, a hole).
    Cw,
    /// Degenerate area or a loop plane perpendicular to the reference;
    /// callers must handle this explicitly.
    Indeterminate,
}

impl Model {
    /// Vertex positions around a loopuse's cycle, in boundary order.
    /// Empty for a lone-vertex loop.
    fn loop_points(&self, lu: LoopuseId) -> Vec<Point3> {
        match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(_) => Vec::new(),
            LoopuseChildren::Edges(eus) => eus
                .iter()
                .map(|&eu| self.vertex(self.eu_start_vertex(eu)).point)
                .collect(),
        }
    }

    /// Supporting plane and enclosed area of a loop, by Newell's method.
    ///
    /// The plane normal points along the loop's counterclockwise
    /// winding; the offset is fitted through the cycle's centroid.
    /// `None` for lone-vertex loops and degenerate (near-zero area)
    /// cycles.
    pub fn loop_plane_area(&self, lu: LoopuseId) -> Option<(Plane, f64)> {
        let pts = self.loop_points(lu);
        if pts.len() < 3 {
            return None;
        }
        let mut n = Vec3::zeros();
        let mut centroid = Vec3::zeros();
        for i in 0..pts.len() {
            let a = pts[i].coords;
            let b = pts[(i + 1) % pts.len()].coords;
            n += a.cross(&b);
            centroid += a;
        }
        let mag = n.norm();
        if mag < SMALL {
            return None;
        }
        let unit = n / mag;
        centroid /= pts.len() as f64;
        let plane = Plane::new(unit, unit.dot(&centroid));
        Some((plane, 0.5 * mag))
    }

    /// Winding of a loop relative to `ref_normal`.
    ///
    /// The sign of the Newell normal against the reference decides CCW
    /// versus CW; a near-zero area or a near-perpendicular reference
    /// yields `Indeterminate` rather than a guess.
    pub fn loop_is_ccw(
        &self,
        lu: LoopuseId,
        ref_normal: &Vec3,
        tol: &Tolerance,
    ) -> LoopOrientation {
        let (plane, area) = match self.loop_plane_area(lu) {
            Some(r) => r,
            None => return LoopOrientation::Indeterminate,
        };
        if area <= tol.dist_sq {
            return LoopOrientation::Indeterminate;
        }
        let dot = plane.normal.dot(ref_normal);
        if near_zero(dot, tol.perp) {
            return LoopOrientation::Indeterminate;
        }
        if dot > 0.0 {
            LoopOrientation::Ccw
        } else {
            LoopOrientation::Cw
        }
    }

    /// True if the loop is a crack: every edge in the cycle is used by
    /// at least one other edgeuse of the same cycle, so the loop
    /// encloses zero width. Lone-vertex loops are not cracks.
    pub fn loop_is_a_crack(&self, lu: LoopuseId) -> bool {
        let eus = match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(_) => return false,
            LoopuseChildren::Edges(eus) => eus,
        };
        for (i, &eu) in eus.iter().enumerate() {
            let e = self.edgeuse(eu).edge;
            let has_partner = eus
                .iter()
                .enumerate()
                .any(|(j, &other)| j != i && self.edgeuse(other).edge == e);
            if !has_partner {
                return false;
            }
        }
        true
    }

    /// First vertexuse of a vertex visited more than once around the
    /// loop, or `None` when the loop never touches itself.
    pub fn loop_touches_self(&self, lu: LoopuseId) -> Option<VertexuseId> {
        let eus = match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(_) => return None,
            LoopuseChildren::Edges(eus) => eus,
        };
        for &eu in eus {
            let vu = self.edgeuse(eu).vertexuse;
            let v = self.vertexuse(vu).vertex;
            // Another use of the same vertex whose owner is this loop.
            for &other_vu in &self.vertex(v).uses {
                if other_vu == vu {
                    continue;
                }
                if let VertexuseParent::Edgeuse(other_eu) = self.vertexuse(other_vu).parent {
                    match self.edgeuse(other_eu).parent {
                        crate::model::EdgeuseParent::Loopuse(other_lu) if other_lu == lu => {
                            return Some(other_vu);
                        }
                        _ => {}
                    }
                }
            }
        }
        None
    }
}
