//! Visitor traversal and bulk tabulation.
//!
//! Tabulation collects every underlying entity (not every use) reachable
//! from a subtree root exactly once, in first-visited order. De-dup is a
//! bitmap over the model's dense serial index space, allocated per call.

use crate::model::{
    EdgeId, EdgeLineId, EdgeuseId, Element, FaceId, FaceuseId, LoopuseChildren, LoopuseId, Model,
    RegionId, ShellId, VertexId, VertexuseId,
};
use ncad_kernel_math::{Point3, Tolerance, Vec3, SMALL};

/// Bitmap over serial element indices; marks each entity the first time
/// it is seen.
pub struct VisitedSet {
    seen: Vec<bool>,
}

impl VisitedSet {
    /// Fresh set sized to the model's index space.
    pub fn new(model: &Model) -> Self {
        VisitedSet {
            seen: vec![false; model.max_index() as usize],
        }
    }

    /// True exactly once per index: the first time it is presented.
    pub fn first_visit(&mut self, index: u32) -> bool {
        let i = index as usize;
        if self.seen[i] {
            false
        } else {
            self.seen[i] = true;
            true
        }
    }
}

/// Traversal callbacks. Use-level methods fire at every encounter;
/// entity-level methods (`face`, `edge`, `vertex`, `edge_line`) fire
/// once per underlying entity.
#[allow(unused_variables)]
pub trait Visitor {
    /// A region was entered.
    fn region(&mut self, m: &Model, r: RegionId) {}
    /// A shell was entered.
    fn shell(&mut self, m: &Model, s: ShellId) {}
    /// A faceuse was entered.
    fn faceuse(&mut self, m: &Model, fu: FaceuseId) {}
    /// An underlying face, first encounter only.
    fn face(&mut self, m: &Model, f: FaceId) {}
    /// A loopuse was entered.
    fn loopuse(&mut self, m: &Model, lu: LoopuseId) {}
    /// An edgeuse was encountered.
    fn edgeuse(&mut self, m: &Model, eu: EdgeuseId) {}
    /// An underlying edge, first encounter only.
    fn edge(&mut self, m: &Model, e: EdgeId) {}
    /// An edge's shared line record, first encounter only.
    fn edge_line(&mut self, m: &Model, l: EdgeLineId) {}
    /// A vertexuse was encountered.
    fn vertexuse(&mut self, m: &Model, vu: VertexuseId) {}
    /// An underlying vertex, first encounter only.
    fn vertex(&mut self, m: &Model, v: VertexId) {}
}

impl Model {
    /// Walk the subtree under `elem`, firing visitor callbacks.
    pub fn walk(&self, elem: Element, visitor: &mut dyn Visitor) {
        let mut seen = VisitedSet::new(self);
        match elem {
            Element::Region(r) => self.walk_region(r, visitor, &mut seen),
            Element::Shell(s) => self.walk_shell(s, visitor, &mut seen),
            Element::Faceuse(fu) => self.walk_faceuse(fu, visitor, &mut seen),
            Element::Loopuse(lu) => self.walk_loopuse(lu, visitor, &mut seen),
            Element::Edgeuse(eu) => self.walk_edgeuse(eu, visitor, &mut seen),
            Element::Vertexuse(vu) => self.walk_vertexuse(vu, visitor, &mut seen),
        }
    }

    /// Walk every region of the model.
    pub fn walk_model(&self, visitor: &mut dyn Visitor) {
        let mut seen = VisitedSet::new(self);
        for &r in &self.region_order {
            self.walk_region(r, visitor, &mut seen);
        }
    }

    fn walk_region(&self, r: RegionId, visitor: &mut dyn Visitor, seen: &mut VisitedSet) {
        visitor.region(self, r);
        for &s in &self.region(r).shells {
            self.walk_shell(s, visitor, seen);
        }
    }

    fn walk_shell(&self, s: ShellId, visitor: &mut dyn Visitor, seen: &mut VisitedSet) {
        visitor.shell(self, s);
        let sh = self.shell(s);
        for &fu in &sh.faceuses {
            self.walk_faceuse(fu, visitor, seen);
        }
        for &lu in &sh.wire_loopuses {
            self.walk_loopuse(lu, visitor, seen);
        }
        for &eu in &sh.wire_edgeuses {
            self.walk_edgeuse(eu, visitor, seen);
        }
        if let Some(vu) = sh.lone_vertexuse {
            self.walk_vertexuse(vu, visitor, seen);
        }
    }

    fn walk_faceuse(&self, fu: FaceuseId, visitor: &mut dyn Visitor, seen: &mut VisitedSet) {
        visitor.faceuse(self, fu);
        let f = self.faceuse(fu).face;
        if seen.first_visit(self.face(f).index) {
            visitor.face(self, f);
        }
        for &lu in &self.faceuse(fu).loopuses {
            self.walk_loopuse(lu, visitor, seen);
        }
    }

    fn walk_loopuse(&self, lu: LoopuseId, visitor: &mut dyn Visitor, seen: &mut VisitedSet) {
        visitor.loopuse(self, lu);
        match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(vu) => self.walk_vertexuse(*vu, visitor, seen),
            LoopuseChildren::Edges(eus) => {
                for &eu in eus {
                    self.walk_edgeuse(eu, visitor, seen);
                }
            }
        }
    }

    fn walk_edgeuse(&self, eu: EdgeuseId, visitor: &mut dyn Visitor, seen: &mut VisitedSet) {
        visitor.edgeuse(self, eu);
        let e = self.edgeuse(eu).edge;
        if seen.first_visit(self.edge(e).index) {
            visitor.edge(self, e);
        }
        let l = self.edge(e).line;
        if seen.first_visit(self.edge_line(l).index) {
            visitor.edge_line(self, l);
        }
        self.walk_vertexuse(self.edgeuse(eu).vertexuse, visitor, seen);
    }

    fn walk_vertexuse(&self, vu: VertexuseId, visitor: &mut dyn Visitor, seen: &mut VisitedSet) {
        visitor.vertexuse(self, vu);
        let v = self.vertexuse(vu).vertex;
        if seen.first_visit(self.vertex(v).index) {
            visitor.vertex(self, v);
        }
    }

    /// Every distinct vertex under `elem`, in first-visited order.
    pub fn vertex_tabulate(&self, elem: Element) -> Vec<VertexId> {
        struct Collect(Vec<VertexId>);
        impl Visitor for Collect {
            fn vertex(&mut self, _m: &Model, v: VertexId) {
                self.0.push(v);
            }
        }
        let mut c = Collect(Vec::new());
        self.walk(elem, &mut c);
        c.0
    }

    /// Every distinct edge under `elem`, in first-visited order.
    pub fn edge_tabulate(&self, elem: Element) -> Vec<EdgeId> {
        struct Collect(Vec<EdgeId>);
        impl Visitor for Collect {
            fn edge(&mut self, _m: &Model, e: EdgeId) {
                self.0.push(e);
            }
        }
        let mut c = Collect(Vec::new());
        self.walk(elem, &mut c);
        c.0
    }

    /// Every edgeuse under `elem`, in traversal order (uses are not
    /// de-duplicated).
    pub fn edgeuse_tabulate(&self, elem: Element) -> Vec<EdgeuseId> {
        struct Collect(Vec<EdgeuseId>);
        impl Visitor for Collect {
            fn edgeuse(&mut self, _m: &Model, eu: EdgeuseId) {
                self.0.push(eu);
            }
        }
        let mut c = Collect(Vec::new());
        self.walk(elem, &mut c);
        c.0
    }

    /// Every distinct face under `elem`, in first-visited order.
    pub fn face_tabulate(&self, elem: Element) -> Vec<FaceId> {
        struct Collect(Vec<FaceId>);
        impl Visitor for Collect {
            fn face(&mut self, _m: &Model, f: FaceId) {
                self.0.push(f);
            }
        }
        let mut c = Collect(Vec::new());
        self.walk(elem, &mut c);
        c.0
    }

    /// Every distinct edge line record under `elem`.
    pub fn edge_line_tabulate(&self, elem: Element) -> Vec<EdgeLineId> {
        struct Collect(Vec<EdgeLineId>);
        impl Visitor for Collect {
            fn edge_line(&mut self, _m: &Model, l: EdgeLineId) {
                self.0.push(l);
            }
        }
        let mut c = Collect(Vec::new());
        self.walk(elem, &mut c);
        c.0
    }

    /// Distinct edges and vertices under `elem` in one traversal.
    pub fn e_and_v_tabulate(&self, elem: Element) -> (Vec<EdgeId>, Vec<VertexId>) {
        struct Collect(Vec<EdgeId>, Vec<VertexId>);
        impl Visitor for Collect {
            fn edge(&mut self, _m: &Model, e: EdgeId) {
                self.0.push(e);
            }
            fn vertex(&mut self, _m: &Model, v: VertexId) {
                self.1.push(v);
            }
        }
        let mut c = Collect(Vec::new(), Vec::new());
        self.walk(elem, &mut c);
        (c.0, c.1)
    }

    /// Every edgeuse riding the given shared line record.
    pub fn edgeuse_with_line_tabulate(&self, line: EdgeLineId) -> Vec<EdgeuseId> {
        self.edge_line(line).uses.clone()
    }

    /// Edgeuses under `elem` whose edge lies on the query line.
    ///
    /// The angular filter is deliberately loosened to a 0.9 dot product
    /// (about 26 degrees) so near-candidates are not missed; both edge
    /// endpoints must still lie within `tol.dist` of the line. Callers
    /// re-filter for exactness.
    pub fn edgeuse_on_line_tabulate(
        &self,
        elem: Element,
        pt: &Point3,
        dir: &Vec3,
        tol: &Tolerance,
    ) -> Vec<EdgeuseId> {
        let dmag = dir.norm();
        assert!(dmag > SMALL, "edgeuse_on_line_tabulate: zero direction");
        let mut out = Vec::new();
        for eu in self.edgeuse_tabulate(elem) {
            let a = self.vertex(self.eu_start_vertex(eu)).point;
            let b = self.vertex(self.eu_end_vertex(eu)).point;
            let edir = b - a;
            let emag = edir.norm();
            if emag > SMALL && edir.dot(dir).abs() < 0.9 * emag * dmag {
                continue;
            }
            if ncad_kernel_geom::distsq_line3_pt3(pt, dir, &a) > tol.dist_sq {
                continue;
            }
            if ncad_kernel_geom::distsq_line3_pt3(pt, dir, &b) > tol.dist_sq {
                continue;
            }
            out.push(eu);
        }
        out
    }

    /// True if two edgeuses' supporting lines coincide: either they
    /// share the identical line record, or the lines are collinear over
    /// a large range and all four edge endpoints sit on each other's
    /// lines.
    pub fn two_edgeuses_coincident(
        &self,
        eu1: EdgeuseId,
        eu2: EdgeuseId,
        tol: &Tolerance,
    ) -> bool {
        let l1 = self.edge(self.edgeuse(eu1).edge).line;
        let l2 = self.edge(self.edgeuse(eu2).edge).line;
        if l1 == l2 {
            return true;
        }
        let r1 = self.edge_line(l1);
        let r2 = self.edge_line(l2);
        if !ncad_kernel_geom::two_lines_colinear(&r1.pt, &r1.dir, &r2.pt, &r2.dir, 1.0e5, tol) {
            return false;
        }
        let pts = [
            self.vertex(self.eu_start_vertex(eu1)).point,
            self.vertex(self.eu_end_vertex(eu1)).point,
            self.vertex(self.eu_start_vertex(eu2)).point,
            self.vertex(self.eu_end_vertex(eu2)).point,
        ];
        ncad_kernel_geom::distsq_line3_pt3(&r2.pt, &r2.dir, &pts[0]) <= tol.dist_sq
            && ncad_kernel_geom::distsq_line3_pt3(&r2.pt, &r2.dir, &pts[1]) <= tol.dist_sq
            && ncad_kernel_geom::distsq_line3_pt3(&r1.pt, &r1.dir, &pts[2]) <= tol.dist_sq
            && ncad_kernel_geom::distsq_line3_pt3(&r1.pt, &r1.dir, &pts[3]) <= tol.dist_sq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncad_kernel_geom::Plane;
    use ncad_kernel_math::Diagnostics;

    /// Closed unit box: 8 vertices, 12 edges, 6 faces.
    fn closed_box() -> (Model, ShellId) {
        let mut m = Model::new(Diagnostics::Off);
        let r = m.add_region();
        let s = m.add_shell(r);
        let p = |x, y, z| Point3::new(x, y, z);
        let v: Vec<VertexId> = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 1.0),
            p(1.0, 1.0, 1.0),
            p(0.0, 1.0, 1.0),
        ]
        .iter()
        .map(|q| m.add_vertex(*q))
        .collect();

        let pl = |n: Vec3, d: f64| Plane::new(n, d);
        // Outward-facing windings.
        m.add_face(s, &[v[0], v[3], v[2], v[1]], pl(Vec3::new(0.0, 0.0, -1.0), 0.0));
        m.add_face(s, &[v[4], v[5], v[6], v[7]], pl(Vec3::new(0.0, 0.0, 1.0), 1.0));
        m.add_face(s, &[v[0], v[1], v[5], v[4]], pl(Vec3::new(0.0, -1.0, 0.0), 0.0));
        m.add_face(s, &[v[2], v[3], v[7], v[6]], pl(Vec3::new(0.0, 1.0, 0.0), 1.0));
        m.add_face(s, &[v[1], v[2], v[6], v[5]], pl(Vec3::new(1.0, 0.0, 0.0), 1.0));
        m.add_face(s, &[v[0], v[4], v[7], v[3]], pl(Vec3::new(-1.0, 0.0, 0.0), 0.0));
        (m, s)
    }

    #[test]
    fn closed_box_entity_counts() {
        let (m, s) = closed_box();
        let root = Element::Shell(s);
        assert_eq!(m.vertex_tabulate(root).len(), 8);
        assert_eq!(m.edge_tabulate(root).len(), 12);
        assert_eq!(m.face_tabulate(root).len(), 6);
        // Each edge is shared by 2 faces; each faceuse pair carries the
        // cycle twice: 12 edges * 2 faces * 2 uses.
        assert_eq!(m.edgeuse_tabulate(root).len(), 48);
        assert_eq!(m.edge_line_tabulate(root).len(), 12);
        let (es, vs) = m.e_and_v_tabulate(root);
        assert_eq!((es.len(), vs.len()), (12, 8));
    }

    #[test]
    fn radial_orbits_close_on_every_box_edge() {
        let (m, s) = closed_box();
        for e in m.edge_tabulate(Element::Shell(s)) {
            let start = m.edge(e).eu;
            let orbit = m.radial_orbit(start);
            // Two faces share each edge: two use pairs in the orbit.
            assert_eq!(orbit.len(), 4);
        }
    }

    #[test]
    fn tabulation_scoped_to_subtree() {
        let (m, s) = closed_box();
        let fu = m.shell(s).faceuses[0];
        assert_eq!(m.vertex_tabulate(Element::Faceuse(fu)).len(), 4);
        assert_eq!(m.edge_tabulate(Element::Faceuse(fu)).len(), 4);
        assert_eq!(m.face_tabulate(Element::Faceuse(fu)).len(), 1);
    }

    #[test]
    fn on_line_tabulation_uses_loose_filter() {
        let (m, s) = closed_box();
        let tol = Tolerance::DEFAULT;
        // The x-axis carries the bottom-front edge of the box.
        let on_axis = m.edgeuse_on_line_tabulate(
            Element::Shell(s),
            &Point3::new(-5.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &tol,
        );
        assert!(!on_axis.is_empty());
        for eu in &on_axis {
            let a = m.vertex(m.eu_start_vertex(*eu)).point;
            assert!(a.y.abs() < 1e-9 && a.z.abs() < 1e-9);
        }
        // A line far away collects nothing.
        let off = m.edgeuse_on_line_tabulate(
            Element::Shell(s),
            &Point3::new(0.0, 5.0, 5.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &tol,
        );
        assert!(off.is_empty());
    }

    #[test]
    fn coincident_edgeuses_share_or_match_lines() {
        let (m, s) = closed_box();
        let tol = Tolerance::DEFAULT;
        let eus = m.edgeuse_tabulate(Element::Shell(s));
        // Any edgeuse coincides with its own mate (same line record).
        let eu = eus[0];
        assert!(m.two_edgeuses_coincident(eu, m.edgeuse(eu).mate, &tol));

        // Perpendicular box edges never coincide.
        let e_list = m.edge_tabulate(Element::Shell(s));
        let eu_a = m.edge(e_list[0]).eu;
        let other = e_list
            .iter()
            .map(|&e| m.edge(e).eu)
            .find(|&b| {
                let da = m.eu_dir(eu_a);
                let db = m.eu_dir(b);
                da.dot(&db).abs() < 0.1
            })
            .unwrap();
        assert!(!m.two_edgeuses_coincident(eu_a, other, &tol));
    }

    #[test]
    fn visited_set_marks_once() {
        let (m, _s) = closed_box();
        let mut seen = VisitedSet::new(&m);
        assert!(seen.first_visit(3));
        assert!(!seen.first_visit(3));
        assert!(seen.first_visit(0));
    }
}
