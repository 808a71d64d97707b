//! Edge, vertex, and point searches over the topology graph.
//!
//! Searches that may legitimately find nothing return `Option`; lookups
//! whose success is guaranteed by graph structure panic on failure.

use crate::model::{
    EdgeId, EdgeLineId, EdgeuseId, Element, FaceuseId, LoopuseChildren, LoopuseId, Model,
    Orientation, ShellId, VertexId, VertexuseId, VertexuseParent,
};
use ncad_kernel_geom::dist_pt2_lseg2;
use ncad_kernel_math::{Point2, Point3, Tolerance, Transform};

impl Model {
    /// Orientation of the faceuse above an edgeuse, defaulting to `Same`
    /// for wire edges.
    fn eu_fu_orientation(&self, eu: EdgeuseId) -> Orientation {
        match self.faceuse_of_edgeuse(eu) {
            Some(fu) => self.faceuse(fu).orientation,
            None => Orientation::Same,
        }
    }

    /// Every edgeuse in the radial orbit of `eu`, each use pair listed
    /// once, starting with `eu` itself.
    pub fn radial_orbit(&self, eu: EdgeuseId) -> Vec<EdgeuseId> {
        let mut out = Vec::new();
        let mut cur = eu;
        loop {
            out.push(cur);
            out.push(self.edgeuse(cur).mate);
            let mate = self.edgeuse(cur).mate;
            cur = self.edgeuse(mate).radial;
            if cur == eu {
                return out;
            }
        }
    }

    /// Find an edgeuse running from `v1` to `v2`.
    ///
    /// `shell` restricts the search to one shell; `eup` excludes that
    /// edgeuse and its mate from the results, and its faceuse
    /// orientation becomes the reference: if the found edgeuse's faceuse
    /// has a different orientation, the mate is returned instead, so
    /// results are orientation-consistent with the caller's reference.
    /// `dangling_only` keeps only edges with no other use (radial equals
    /// mate).
    pub fn findeu(
        &self,
        v1: VertexId,
        v2: VertexId,
        shell: Option<ShellId>,
        eup: Option<EdgeuseId>,
        dangling_only: bool,
    ) -> Option<EdgeuseId> {
        let want = match eup {
            Some(e) => self.eu_fu_orientation(e),
            None => Orientation::Same,
        };
        for &vu in &self.vertex(v1).uses {
            let eu = match self.vertexuse(vu).parent {
                VertexuseParent::Edgeuse(eu) => eu,
                _ => continue,
            };
            if self.eu_end_vertex(eu) != v2 {
                continue;
            }
            if let Some(s) = shell {
                if self.shell_of_edgeuse(eu) != s {
                    continue;
                }
            }
            if let Some(excl) = eup {
                if eu == excl || self.edgeuse(eu).mate == excl {
                    continue;
                }
            }
            if dangling_only && self.edgeuse(eu).radial != self.edgeuse(eu).mate {
                continue;
            }
            if self.eu_fu_orientation(eu) != want {
                return Some(self.edgeuse(eu).mate);
            }
            return Some(eu);
        }
        None
    }

    /// [`findeu`](Model::findeu) restricted to one faceuse.
    pub fn find_eu_in_face(
        &self,
        v1: VertexId,
        v2: VertexId,
        fu: FaceuseId,
        eup: Option<EdgeuseId>,
        dangling_only: bool,
    ) -> Option<EdgeuseId> {
        let want = match eup {
            Some(e) => self.eu_fu_orientation(e),
            None => Orientation::Same,
        };
        for &vu in &self.vertex(v1).uses {
            let eu = match self.vertexuse(vu).parent {
                VertexuseParent::Edgeuse(eu) => eu,
                _ => continue,
            };
            if self.eu_end_vertex(eu) != v2 {
                continue;
            }
            match self.faceuse_of_edgeuse(eu) {
                Some(f) if f == fu || self.faceuse(f).mate == fu => {}
                _ => continue,
            }
            if let Some(excl) = eup {
                if eu == excl || self.edgeuse(eu).mate == excl {
                    continue;
                }
            }
            if dangling_only && self.edgeuse(eu).radial != self.edgeuse(eu).mate {
                continue;
            }
            if self.eu_fu_orientation(eu) != want {
                return Some(self.edgeuse(eu).mate);
            }
            return Some(eu);
        }
        None
    }

    /// Find an edgeuse whose edge runs between two vertices in either
    /// direction, excluding a given edge.
    pub fn find_e(
        &self,
        v1: VertexId,
        v2: VertexId,
        shell: Option<ShellId>,
        exclude: Option<EdgeId>,
    ) -> Option<EdgeuseId> {
        for &vu in &self.vertex(v1).uses {
            let eu = match self.vertexuse(vu).parent {
                VertexuseParent::Edgeuse(eu) => eu,
                _ => continue,
            };
            if self.eu_end_vertex(eu) != v2 {
                continue;
            }
            if let Some(s) = shell {
                if self.shell_of_edgeuse(eu) != s {
                    continue;
                }
            }
            if exclude == Some(self.edgeuse(eu).edge) {
                continue;
            }
            return Some(eu);
        }
        None
    }

    /// Edgeuse in another shell with the same endpoints as `eu`.
    pub fn find_matching_eu_in_s(&self, eu: EdgeuseId, s: ShellId) -> Option<EdgeuseId> {
        let v1 = self.eu_start_vertex(eu);
        let v2 = self.eu_end_vertex(eu);
        self.findeu(v1, v2, Some(s), None, false)
    }

    /// First radial neighbor of `eu` (excluding `eu` and its mate) that
    /// lies in a face.
    pub fn faceradial(&self, eu: EdgeuseId) -> Option<EdgeuseId> {
        let mate = self.edgeuse(eu).mate;
        for other in self.radial_orbit(eu) {
            if other == eu || other == mate {
                continue;
            }
            if self.faceuse_of_edgeuse(other).is_some() {
                return Some(other);
            }
        }
        None
    }

    /// [`faceradial`](Model::faceradial) restricted to the shell of `eu`.
    pub fn radial_face_edge_in_shell(&self, eu: EdgeuseId) -> Option<EdgeuseId> {
        let s = self.shell_of_edgeuse(eu);
        let mate = self.edgeuse(eu).mate;
        for other in self.radial_orbit(eu) {
            if other == eu || other == mate {
                continue;
            }
            if self.faceuse_of_edgeuse(other).is_some() && self.shell_of_edgeuse(other) == s {
                return Some(other);
            }
        }
        None
    }

    /// True if the two line records describe the same line within
    /// tolerance: each base point within `tol.dist` of the other line.
    fn edge_lines_equivalent(&self, a: EdgeLineId, b: EdgeLineId, tol: &Tolerance) -> bool {
        let la = self.edge_line(a);
        let lb = self.edge_line(b);
        ncad_kernel_geom::distsq_line3_pt3(&la.pt, &la.dir, &lb.pt) <= tol.dist_sq
            && ncad_kernel_geom::distsq_line3_pt3(&lb.pt, &lb.dir, &la.pt) <= tol.dist_sq
            && ncad_kernel_geom::lseg3_lseg3_parallel(
                &la.pt,
                &(la.pt + la.dir),
                &lb.pt,
                &(lb.pt + lb.dir),
                tol,
            )
    }

    /// Find an edgeuse in `fu1` whose edge is shared radially with
    /// `fu2`.
    ///
    /// When two candidate edges carry distinct but geometrically
    /// equivalent line records, the records are merged (the repair is
    /// traced at `Basic` diagnostics and the model is mutated).
    ///
    /// # Panics
    /// Panics when candidates carry genuinely different line geometry,
    /// which indicates a corrupted graph.
    pub fn find_edge_between_2fu(
        &mut self,
        fu1: FaceuseId,
        fu2: FaceuseId,
        tol: &Tolerance,
    ) -> Option<EdgeuseId> {
        let mut found: Option<EdgeuseId> = None;
        let lus = self.faceuse(fu1).loopuses.clone();
        for lu in lus {
            let eus = match &self.loopuse(lu).children {
                LoopuseChildren::Edges(eus) => eus.clone(),
                LoopuseChildren::Vertex(_) => continue,
            };
            for eu in eus {
                let touches_fu2 = self.radial_orbit(eu).into_iter().any(|other| {
                    self.faceuse_of_edgeuse(other)
                        .map(|f| f == fu2 || self.faceuse(f).mate == fu2)
                        .unwrap_or(false)
                });
                if !touches_fu2 {
                    continue;
                }
                match found {
                    None => found = Some(eu),
                    Some(prev) => {
                        let line_prev = self.edge(self.edgeuse(prev).edge).line;
                        let line_new = self.edge(self.edgeuse(eu).edge).line;
                        if line_prev == line_new {
                            continue;
                        }
                        if self.edge_lines_equivalent(line_prev, line_new, tol) {
                            if self.diag().basic() {
                                eprintln!(
                                    "find_edge_between_2fu: merging equivalent edge line records"
                                );
                            }
                            self.merge_edge_lines(line_prev, line_new);
                        } else {
                            panic!(
                                "find_edge_between_2fu: two shared edges with different line geometry"
                            );
                        }
                    }
                }
            }
        }
        found
    }

    /// First vertexuse of `v` inside the given faceuse.
    pub fn find_v_in_face(&self, v: VertexId, fu: FaceuseId) -> Option<VertexuseId> {
        for &vu in &self.vertex(v).uses {
            if self.faceuse_of_vertexuse(vu) == Some(fu) {
                return Some(vu);
            }
        }
        None
    }

    /// First vertexuse of `v` inside the given shell. With `edges_only`
    /// set, only uses at the start of an edgeuse qualify.
    pub fn find_v_in_shell(&self, v: VertexId, s: ShellId, edges_only: bool) -> Option<VertexuseId> {
        for &vu in &self.vertex(v).uses {
            if edges_only && !matches!(self.vertexuse(vu).parent, VertexuseParent::Edgeuse(_)) {
                continue;
            }
            if self.shell_of_vertexuse(vu) == s {
                return Some(vu);
            }
        }
        None
    }

    /// First vertexuse in a loopuse whose vertex is within `tol.dist`
    /// of the point.
    pub fn find_pt_in_lu(
        &self,
        lu: LoopuseId,
        pt: &Point3,
        tol: &Tolerance,
    ) -> Option<VertexuseId> {
        match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(vu) => {
                let v = self.vertexuse(*vu).vertex;
                if tol.pt3_equal(&self.vertex(v).point, pt) {
                    Some(*vu)
                } else {
                    None
                }
            }
            LoopuseChildren::Edges(eus) => {
                for &eu in eus {
                    let vu = self.edgeuse(eu).vertexuse;
                    let v = self.vertexuse(vu).vertex;
                    if tol.pt3_equal(&self.vertex(v).point, pt) {
                        return Some(vu);
                    }
                }
                None
            }
        }
    }

    /// First vertexuse in a faceuse whose vertex is within `tol.dist`
    /// of the point.
    pub fn find_pt_in_face(
        &self,
        fu: FaceuseId,
        pt: &Point3,
        tol: &Tolerance,
    ) -> Option<VertexuseId> {
        for &lu in &self.faceuse(fu).loopuses {
            if let Some(vu) = self.find_pt_in_lu(lu, pt, tol) {
                return Some(vu);
            }
        }
        None
    }

    /// First vertex in a shell within `tol.dist` of the point.
    ///
    /// Traversal order is faceuses, wire loops, wire edges, then the
    /// lone vertexuse; the FIRST match wins, which is not necessarily
    /// the geometrically closest vertex.
    pub fn find_pt_in_shell(&self, s: ShellId, pt: &Point3, tol: &Tolerance) -> Option<VertexId> {
        let sh = self.shell(s);
        for &fu in &sh.faceuses {
            if let Some(vu) = self.find_pt_in_face(fu, pt, tol) {
                return Some(self.vertexuse(vu).vertex);
            }
        }
        for &lu in &sh.wire_loopuses {
            if let Some(vu) = self.find_pt_in_lu(lu, pt, tol) {
                return Some(self.vertexuse(vu).vertex);
            }
        }
        for &eu in &sh.wire_edgeuses {
            let vu = self.edgeuse(eu).vertexuse;
            let v = self.vertexuse(vu).vertex;
            if tol.pt3_equal(&self.vertex(v).point, pt) {
                return Some(v);
            }
        }
        if let Some(vu) = sh.lone_vertexuse {
            let v = self.vertexuse(vu).vertex;
            if tol.pt3_equal(&self.vertex(v).point, pt) {
                return Some(v);
            }
        }
        None
    }

    /// First vertex in the whole model within `tol.dist` of the point,
    /// in region/shell traversal order. First match, not closest.
    pub fn find_pt_in_model(&self, pt: &Point3, tol: &Tolerance) -> Option<VertexId> {
        for &r in &self.region_order {
            for &s in &self.region(r).shells {
                if let Some(v) = self.find_pt_in_shell(s, pt, tol) {
                    return Some(v);
                }
            }
        }
        None
    }

    /// Edge under `elem` whose 2D projection passes nearest the query
    /// point.
    ///
    /// Endpoints are transformed by `xform` and their x/y taken as the
    /// projection. A point on or within tolerance of a projected segment
    /// counts as distance zero. The first edge at the minimal distance
    /// wins.
    pub fn find_e_nearest_pt2(
        &self,
        elem: Element,
        pt2: &Point2,
        xform: &Transform,
        tol: &Tolerance,
    ) -> Option<EdgeId> {
        let edges = self.edge_tabulate(elem);
        let mut best: Option<(EdgeId, f64)> = None;
        for e in edges {
            let eu = self.edge(e).eu;
            let a3 = xform.apply_point(&self.vertex(self.eu_start_vertex(eu)).point);
            let b3 = xform.apply_point(&self.vertex(self.eu_end_vertex(eu)).point);
            let a2 = Point2::new(a3.x, a3.y);
            let b2 = Point2::new(b3.x, b3.y);
            let (cls, _pca) = dist_pt2_lseg2(&a2, &b2, pt2, tol);
            let d = cls.ranking_dist_sq();
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((e, d)),
            }
        }
        best.map(|(e, _)| e)
    }

    /// True if any edgeuse in the list starts at `v`.
    pub fn is_vertex_in_edgelist(&self, v: VertexId, eus: &[EdgeuseId]) -> bool {
        eus.iter().any(|&eu| self.eu_start_vertex(eu) == v)
    }

    /// True if any loopuse in the list uses `v`, either in its edge
    /// cycle or, when `singletons` is set, as a lone-vertex loop.
    pub fn is_vertex_in_looplist(&self, v: VertexId, lus: &[LoopuseId], singletons: bool) -> bool {
        lus.iter().any(|&lu| match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(vu) => singletons && self.vertexuse(*vu).vertex == v,
            LoopuseChildren::Edges(eus) => self.is_vertex_in_edgelist(v, eus),
        })
    }

    /// True if any faceuse in the list uses `v`.
    pub fn is_vertex_in_facelist(&self, v: VertexId, fus: &[FaceuseId]) -> bool {
        fus.iter()
            .any(|&fu| self.is_vertex_in_looplist(v, &self.faceuse(fu).loopuses, true))
    }

    /// True if any edgeuse in the list uses edge `e`.
    pub fn is_edge_in_edgelist(&self, e: EdgeId, eus: &[EdgeuseId]) -> bool {
        eus.iter().any(|&eu| self.edgeuse(eu).edge == e)
    }

    /// True if any loopuse in the list uses edge `e`.
    pub fn is_edge_in_looplist(&self, e: EdgeId, lus: &[LoopuseId]) -> bool {
        lus.iter().any(|&lu| match &self.loopuse(lu).children {
            LoopuseChildren::Vertex(_) => false,
            LoopuseChildren::Edges(eus) => self.is_edge_in_edgelist(e, eus),
        })
    }

    /// True if any faceuse in the list uses edge `e`.
    pub fn is_edge_in_facelist(&self, e: EdgeId, fus: &[FaceuseId]) -> bool {
        fus.iter()
            .any(|&fu| self.is_edge_in_looplist(e, &self.faceuse(fu).loopuses))
    }

    /// True if the shell has a lone-vertex wire loop on `v`.
    pub fn is_vertex_a_selfloop_in_shell(&self, v: VertexId, s: ShellId) -> bool {
        self.shell(s)
            .wire_loopuses
            .iter()
            .any(|&lu| match &self.loopuse(lu).children {
                LoopuseChildren::Vertex(vu) => self.vertexuse(*vu).vertex == v,
                LoopuseChildren::Edges(_) => false,
            })
    }
}
