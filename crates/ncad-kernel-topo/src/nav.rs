//! Upward resolution and local frames.
//!
//! These queries walk parent links from any element up to a requested
//! ancestor kind. Wire elements legitimately have no faceuse ancestor;
//! those resolutions return `None`. A shell ancestor always exists.

use crate::model::{
    EdgeId, EdgeuseId, EdgeuseParent, Element, FaceGeomId, FaceuseId, LoopuseChildren, LoopuseId,
    LoopuseParent, Model, Orientation, RegionId, ShellId, VertexuseId, VertexuseParent,
};
use ncad_kernel_geom::angle_measure;
use ncad_kernel_math::Vec3;

impl Model {
    /// Shell owning a loopuse (directly, or through its faceuse).
    pub fn shell_of_loopuse(&self, lu: LoopuseId) -> ShellId {
        match self.loopuse(lu).parent {
            LoopuseParent::Shell(s) => s,
            LoopuseParent::Faceuse(fu) => self.faceuse(fu).shell,
        }
    }

    /// Shell owning an edgeuse.
    pub fn shell_of_edgeuse(&self, eu: EdgeuseId) -> ShellId {
        match self.edgeuse(eu).parent {
            EdgeuseParent::Shell(s) => s,
            EdgeuseParent::Loopuse(lu) => self.shell_of_loopuse(lu),
        }
    }

    /// Shell owning a vertexuse.
    pub fn shell_of_vertexuse(&self, vu: VertexuseId) -> ShellId {
        match self.vertexuse(vu).parent {
            VertexuseParent::Shell(s) => s,
            VertexuseParent::Loopuse(lu) => self.shell_of_loopuse(lu),
            VertexuseParent::Edgeuse(eu) => self.shell_of_edgeuse(eu),
        }
    }

    /// Faceuse owning a loopuse, or `None` for a wire loop.
    pub fn faceuse_of_loopuse(&self, lu: LoopuseId) -> Option<FaceuseId> {
        match self.loopuse(lu).parent {
            LoopuseParent::Faceuse(fu) => Some(fu),
            LoopuseParent::Shell(_) => None,
        }
    }

    /// Faceuse owning an edgeuse, or `None` for a wire edge.
    pub fn faceuse_of_edgeuse(&self, eu: EdgeuseId) -> Option<FaceuseId> {
        match self.edgeuse(eu).parent {
            EdgeuseParent::Loopuse(lu) => self.faceuse_of_loopuse(lu),
            EdgeuseParent::Shell(_) => None,
        }
    }

    /// Faceuse owning a vertexuse, or `None` outside any face.
    pub fn faceuse_of_vertexuse(&self, vu: VertexuseId) -> Option<FaceuseId> {
        match self.vertexuse(vu).parent {
            VertexuseParent::Edgeuse(eu) => self.faceuse_of_edgeuse(eu),
            VertexuseParent::Loopuse(lu) => self.faceuse_of_loopuse(lu),
            VertexuseParent::Shell(_) => None,
        }
    }

    /// Loopuse owning a vertexuse, or `None` when the vertexuse belongs
    /// to a wire edge or directly to a shell.
    pub fn loopuse_of_vertexuse(&self, vu: VertexuseId) -> Option<LoopuseId> {
        match self.vertexuse(vu).parent {
            VertexuseParent::Loopuse(lu) => Some(lu),
            VertexuseParent::Edgeuse(eu) => match self.edgeuse(eu).parent {
                EdgeuseParent::Loopuse(lu) => Some(lu),
                EdgeuseParent::Shell(_) => None,
            },
            VertexuseParent::Shell(_) => None,
        }
    }

    /// Edgeuse owning a vertexuse, or `None` for lone-vertex uses.
    pub fn edgeuse_of_vertexuse(&self, vu: VertexuseId) -> Option<EdgeuseId> {
        match self.vertexuse(vu).parent {
            VertexuseParent::Edgeuse(eu) => Some(eu),
            _ => None,
        }
    }

    /// Shell ancestor of any element.
    pub fn shell_of(&self, elem: Element) -> Option<ShellId> {
        match elem {
            Element::Region(_) => None,
            Element::Shell(s) => Some(s),
            Element::Faceuse(fu) => Some(self.faceuse(fu).shell),
            Element::Loopuse(lu) => Some(self.shell_of_loopuse(lu)),
            Element::Edgeuse(eu) => Some(self.shell_of_edgeuse(eu)),
            Element::Vertexuse(vu) => Some(self.shell_of_vertexuse(vu)),
        }
    }

    /// Region ancestor of any element.
    pub fn region_of(&self, elem: Element) -> RegionId {
        match elem {
            Element::Region(r) => r,
            other => {
                // Every non-region element has a shell ancestor.
                let s = match self.shell_of(other) {
                    Some(s) => s,
                    None => unreachable!(),
                };
                self.shell(s).region
            }
        }
    }

    /// True if the shell owns nothing at all.
    pub fn shell_is_empty(&self, s: ShellId) -> bool {
        let sh = self.shell(s);
        sh.faceuses.is_empty()
            && sh.wire_loopuses.is_empty()
            && sh.wire_edgeuses.is_empty()
            && sh.lone_vertexuse.is_none()
    }

    /// The edgeuse within a loopuse's cycle that starts at the given
    /// vertexuse's vertex.
    ///
    /// # Panics
    /// Panics if the loopuse is a lone-vertex loop or its cycle has no
    /// edgeuse at that vertex; both indicate a corrupted graph, since
    /// callers hold a vertexuse known to live in the loop.
    pub fn find_eu_with_vu_in_lu(&self, lu: LoopuseId, vu: VertexuseId) -> EdgeuseId {
        let v = self.vertexuse(vu).vertex;
        match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(_) => {
                panic!("find_eu_with_vu_in_lu: loopuse is a lone-vertex loop")
            }
            LoopuseChildren::Edges(eus) => {
                for &eu in eus {
                    if self.eu_start_vertex(eu) == v {
                        return eu;
                    }
                }
                panic!("find_eu_with_vu_in_lu: vertex not found in loop cycle")
            }
        }
    }

    /// Unit direction of an edgeuse, start to end.
    ///
    /// # Panics
    /// Panics if the edge has zero length.
    pub fn eu_dir(&self, eu: EdgeuseId) -> Vec3 {
        let a = self.vertex(self.eu_start_vertex(eu)).point;
        let b = self.vertex(self.eu_end_vertex(eu)).point;
        let d = b - a;
        let mag = d.norm();
        assert!(mag > 0.0, "eu_dir: zero length edge");
        d / mag
    }

    /// Orthonormal frame of an edgeuse within its face: `x` along the
    /// edge, `z` the faceuse normal (flipped for an opposite-oriented
    /// use), `y = z cross x`.
    ///
    /// # Panics
    /// Panics if the edgeuse is not part of a face, or the edge is
    /// degenerate.
    pub fn eu_2vecs_perp(&self, eu: EdgeuseId) -> EdgeFrame {
        let fu = match self.faceuse_of_edgeuse(eu) {
            Some(fu) => fu,
            None => panic!("eu_2vecs_perp: edgeuse is not in a face"),
        };
        let x = self.eu_dir(eu);
        let z = self.fu_normal(fu);
        let y = z.cross(&x);
        EdgeFrame { x, y, z }
    }

    /// Outward plane normal of a faceuse: the face plane's normal,
    /// negated for the opposite-oriented use.
    pub fn fu_normal(&self, fu: FaceuseId) -> Vec3 {
        let f = self.face(self.faceuse(fu).face);
        let n = self.face_geom(f.geom).plane.normal;
        match self.faceuse(fu).orientation {
            Orientation::Same => n,
            Orientation::Opposite => -n,
        }
    }

    /// Vector pointing "left" of an edgeuse, into its faceuse's
    /// interior: the faceuse normal crossed with the edge direction.
    /// `None` when the edgeuse is not in a face.
    pub fn find_eu_leftvec(&self, eu: EdgeuseId) -> Option<Vec3> {
        let fu = self.faceuse_of_edgeuse(eu)?;
        let dir = self.eu_dir(eu);
        let n = self.fu_normal(fu);
        let mut left = n.cross(&dir);
        let mag = left.norm();
        if mag == 0.0 {
            return None;
        }
        left /= mag;
        Some(left)
    }

    /// Angle of an edgeuse's left vector measured in the supplied
    /// `x`/`y` frame, in `[0, 2*pi)`. `None` when the edgeuse has no
    /// usable left vector (wire edge or degenerate geometry).
    pub fn measure_fu_angle(&self, eu: EdgeuseId, x: &Vec3, y: &Vec3) -> Option<f64> {
        let left = self.find_eu_leftvec(eu)?;
        Some(angle_measure(&left, x, y))
    }

    /// First edgeuse of an edge whose faceuse has `Same` orientation,
    /// found by walking the radial orbit.
    pub fn find_ot_same_eu_of_e(&self, e: EdgeId) -> Option<EdgeuseId> {
        let start = self.edge(e).eu;
        let mut cur = start;
        loop {
            for candidate in [cur, self.edgeuse(cur).mate] {
                if let Some(fu) = self.faceuse_of_edgeuse(candidate) {
                    if self.faceuse(fu).orientation == Orientation::Same {
                        return Some(candidate);
                    }
                }
            }
            let mate = self.edgeuse(cur).mate;
            cur = self.edgeuse(mate).radial;
            if cur == start {
                return None;
            }
        }
    }

    /// Faceuse in a shell whose face shares the given plane record, with
    /// the requested orientation.
    pub fn find_fu_with_fg_in_s(
        &self,
        s: ShellId,
        fg: FaceGeomId,
        orientation: Orientation,
    ) -> Option<FaceuseId> {
        for &fu in &self.shell(s).faceuses {
            let record = self.faceuse(fu);
            if record.orientation == orientation && self.face(record.face).geom == fg {
                return Some(fu);
            }
        }
        None
    }
}

/// Orthonormal frame attached to an edgeuse in a face.
#[derive(Debug, Clone, Copy)]
pub struct EdgeFrame {
    /// Unit vector along the edge.
    pub x: Vec3,
    /// In-face perpendicular, `z cross x`.
    pub y: Vec3,
    /// Faceuse normal.
    pub z: Vec3,
}
