//! The topology arena: element types, handles, and the building API.
//!
//! The graph follows the classic non-manifold "use" pattern. A `Face`,
//! `Loop`, `Edge`, or `Vertex` is a single underlying entity; each place
//! it appears in the boundary carries an oriented use record. Geometry
//! (`FaceGeom` planes, `EdgeLine` carriers) is shared across every use
//! that references it.
//!
//! All elements live in slotmap arenas owned by [`Model`]; handles are
//! stable keys, and parent links are typed enums rather than raw
//! pointers. Every element also carries a dense serial `index` used by
//! the tabulation layer's visited bitmap.

use ncad_kernel_geom::Plane;
use ncad_kernel_math::{Diagnostics, Point3, Tolerance, Vec3};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a [`Region`].
    pub struct RegionId;
    /// Handle to a [`Shell`].
    pub struct ShellId;
    /// Handle to a [`Face`].
    pub struct FaceId;
    /// Handle to a [`Faceuse`].
    pub struct FaceuseId;
    /// Handle to a [`Loop`].
    pub struct LoopId;
    /// Handle to a [`Loopuse`].
    pub struct LoopuseId;
    /// Handle to an [`Edge`].
    pub struct EdgeId;
    /// Handle to an [`Edgeuse`].
    pub struct EdgeuseId;
    /// Handle to a [`Vertex`].
    pub struct VertexId;
    /// Handle to a [`Vertexuse`].
    pub struct VertexuseId;
    /// Handle to a shared [`FaceGeom`] plane record.
    pub struct FaceGeomId;
    /// Handle to a shared [`EdgeLine`] carrier record.
    pub struct EdgeLineId;
}

/// Orientation of a use relative to its underlying entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Same sense as the entity's geometry.
    Same,
    /// Opposite sense.
    Opposite,
}

impl Orientation {
    /// The other orientation.
    pub fn flipped(self) -> Orientation {
        match self {
            Orientation::Same => Orientation::Opposite,
            Orientation::Opposite => Orientation::Same,
        }
    }
}

/// Any-element handle, used where a query accepts an arbitrary subtree
/// root. Dispatch over this enum is checked by the compiler; there is no
/// runtime tag to corrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// A region.
    Region(RegionId),
    /// A shell.
    Shell(ShellId),
    /// A faceuse.
    Faceuse(FaceuseId),
    /// A loopuse.
    Loopuse(LoopuseId),
    /// An edgeuse.
    Edgeuse(EdgeuseId),
    /// A vertexuse.
    Vertexuse(VertexuseId),
}

/// Top-level grouping of shells.
#[derive(Debug)]
pub struct Region {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Shells owned by this region, in insertion order.
    pub shells: Vec<ShellId>,
}

/// A maximal connected component of the boundary.
///
/// A shell may own faceuses, wire loopuses, wire edgeuses, and at most
/// one lone vertexuse. An empty shell is a valid terminal state.
#[derive(Debug)]
pub struct Shell {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Owning region.
    pub region: RegionId,
    /// Faceuses in this shell, in insertion order.
    pub faceuses: Vec<FaceuseId>,
    /// Wire loopuses owned directly by the shell.
    pub wire_loopuses: Vec<LoopuseId>,
    /// Wire edgeuses owned directly by the shell.
    pub wire_edgeuses: Vec<EdgeuseId>,
    /// Lone vertexuse, if the shell is reduced to a single point.
    pub lone_vertexuse: Option<VertexuseId>,
}

/// Shared plane geometry referenced by one or more faces.
#[derive(Debug)]
pub struct FaceGeom {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// The supporting plane.
    pub plane: Plane,
}

/// An underlying face, with exactly two opposing uses.
#[derive(Debug)]
pub struct Face {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Shared plane record.
    pub geom: FaceGeomId,
    /// The use oriented with the plane normal.
    pub fu_same: FaceuseId,
    /// The use oriented against the plane normal.
    pub fu_opposite: FaceuseId,
}

/// One oriented use of a face within a shell.
#[derive(Debug)]
pub struct Faceuse {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Owning shell.
    pub shell: ShellId,
    /// Underlying face.
    pub face: FaceId,
    /// Orientation relative to the face's plane normal.
    pub orientation: Orientation,
    /// The oppositely oriented use of the same face.
    pub mate: FaceuseId,
    /// Boundary loopuses, in insertion order.
    pub loopuses: Vec<LoopuseId>,
}

/// An underlying loop; its two uses live in a faceuse/mate pair or as a
/// wire loop directly in a shell.
#[derive(Debug)]
pub struct Loop {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// One of the loop's two uses.
    pub lu: LoopuseId,
}

/// Owner of a loopuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopuseParent {
    /// Boundary loop of a faceuse.
    Faceuse(FaceuseId),
    /// Wire loop owned directly by a shell.
    Shell(ShellId),
}

/// Contents of a loopuse: an edge cycle, or a single lone vertexuse
/// (self-loop).
#[derive(Debug)]
pub enum LoopuseChildren {
    /// A cycle of edgeuses in boundary order.
    Edges(Vec<EdgeuseId>),
    /// A self-loop on a single vertex.
    Vertex(VertexuseId),
}

/// One oriented use of a loop.
#[derive(Debug)]
pub struct Loopuse {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Owner (faceuse or shell).
    pub parent: LoopuseParent,
    /// Underlying loop.
    pub lp: LoopId,
    /// The oppositely oriented use of the same loop.
    pub mate: LoopuseId,
    /// Orientation of this use.
    pub orientation: Orientation,
    /// Edge cycle or lone vertex.
    pub children: LoopuseChildren,
}

/// Shared line geometry for a set of collinear edges.
#[derive(Debug)]
pub struct EdgeLine {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// A point on the line.
    pub pt: Point3,
    /// Direction of the line, not necessarily unit length.
    pub dir: Vec3,
    /// Every edgeuse whose edge rides this line.
    pub uses: Vec<EdgeuseId>,
}

/// An underlying edge between two vertices.
#[derive(Debug)]
pub struct Edge {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Shared line carrier.
    pub line: EdgeLineId,
    /// One of the edge's uses, an entry point into the radial orbit.
    pub eu: EdgeuseId,
}

/// Owner of an edgeuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeuseParent {
    /// Part of a loop cycle.
    Loopuse(LoopuseId),
    /// Wire edge owned directly by a shell.
    Shell(ShellId),
}

/// One oriented use of an edge.
///
/// The start vertex is this use's vertexuse; the end vertex is the
/// mate's. Radial links are symmetric (`radial(radial(eu)) == eu`);
/// alternating mate and radial walks the full orbit around the edge.
#[derive(Debug)]
pub struct Edgeuse {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Owner (loopuse or shell).
    pub parent: EdgeuseParent,
    /// Underlying edge.
    pub edge: EdgeId,
    /// The oppositely directed use of the same edge in the same context.
    pub mate: EdgeuseId,
    /// The paired use of the same edge in the adjacent context.
    pub radial: EdgeuseId,
    /// Vertexuse at this use's start vertex.
    pub vertexuse: VertexuseId,
}

/// Owner of a vertexuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexuseParent {
    /// Start of an edgeuse.
    Edgeuse(EdgeuseId),
    /// Lone vertex of a self-loop.
    Loopuse(LoopuseId),
    /// Lone vertex of a shell.
    Shell(ShellId),
}

/// One use of a vertex.
#[derive(Debug)]
pub struct Vertexuse {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Owner.
    pub parent: VertexuseParent,
    /// Underlying vertex.
    pub vertex: VertexId,
}

/// An underlying vertex: a point plus the list of every use.
#[derive(Debug)]
pub struct Vertex {
    /// Serial index for visited bitmaps.
    pub index: u32,
    /// Position.
    pub point: Point3,
    /// Every vertexuse referencing this vertex, in creation order.
    pub uses: Vec<VertexuseId>,
}

/// The topology arena. Owns every element; handles stay valid for the
/// life of the model.
#[derive(Debug)]
pub struct Model {
    pub(crate) regions: SlotMap<RegionId, Region>,
    pub(crate) shells: SlotMap<ShellId, Shell>,
    pub(crate) faces: SlotMap<FaceId, Face>,
    pub(crate) faceuses: SlotMap<FaceuseId, Faceuse>,
    pub(crate) loops: SlotMap<LoopId, Loop>,
    pub(crate) loopuses: SlotMap<LoopuseId, Loopuse>,
    pub(crate) edges: SlotMap<EdgeId, Edge>,
    pub(crate) edgeuses: SlotMap<EdgeuseId, Edgeuse>,
    pub(crate) vertices: SlotMap<VertexId, Vertex>,
    pub(crate) vertexuses: SlotMap<VertexuseId, Vertexuse>,
    pub(crate) face_geoms: SlotMap<FaceGeomId, FaceGeom>,
    pub(crate) edge_lines: SlotMap<EdgeLineId, EdgeLine>,
    /// Regions in insertion order.
    pub region_order: Vec<RegionId>,
    next_index: u32,
    diag: Diagnostics,
}

impl Model {
    /// New empty model with the given diagnostics level.
    pub fn new(diag: Diagnostics) -> Self {
        Model {
            regions: SlotMap::with_key(),
            shells: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            faceuses: SlotMap::with_key(),
            loops: SlotMap::with_key(),
            loopuses: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            edgeuses: SlotMap::with_key(),
            vertices: SlotMap::with_key(),
            vertexuses: SlotMap::with_key(),
            face_geoms: SlotMap::with_key(),
            edge_lines: SlotMap::with_key(),
            region_order: Vec::new(),
            next_index: 0,
            diag,
        }
    }

    /// The model's diagnostics level.
    pub fn diag(&self) -> Diagnostics {
        self.diag
    }

    /// One past the largest serial index ever assigned. Visited bitmaps
    /// are sized to this.
    pub fn max_index(&self) -> u32 {
        self.next_index
    }

    fn alloc_index(&mut self) -> u32 {
        let i = self.next_index;
        self.next_index += 1;
        i
    }

    // ---- accessors; stale handles are a caller contract violation ----

    /// Region record for a handle.
    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id]
    }

    /// Shell record for a handle.
    pub fn shell(&self, id: ShellId) -> &Shell {
        &self.shells[id]
    }

    /// Face record for a handle.
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id]
    }

    /// Faceuse record for a handle.
    pub fn faceuse(&self, id: FaceuseId) -> &Faceuse {
        &self.faceuses[id]
    }

    /// Loop record for a handle.
    pub fn lp(&self, id: LoopId) -> &Loop {
        &self.loops[id]
    }

    /// Loopuse record for a handle.
    pub fn loopuse(&self, id: LoopuseId) -> &Loopuse {
        &self.loopuses[id]
    }

    /// Edge record for a handle.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    /// Edgeuse record for a handle.
    pub fn edgeuse(&self, id: EdgeuseId) -> &Edgeuse {
        &self.edgeuses[id]
    }

    /// Vertex record for a handle.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    /// Vertexuse record for a handle.
    pub fn vertexuse(&self, id: VertexuseId) -> &Vertexuse {
        &self.vertexuses[id]
    }

    /// Shared plane record for a handle.
    pub fn face_geom(&self, id: FaceGeomId) -> &FaceGeom {
        &self.face_geoms[id]
    }

    /// Shared line record for a handle.
    pub fn edge_line(&self, id: EdgeLineId) -> &EdgeLine {
        &self.edge_lines[id]
    }

    /// Start vertex of an edgeuse.
    pub fn eu_start_vertex(&self, eu: EdgeuseId) -> VertexId {
        self.vertexuses[self.edgeuses[eu].vertexuse].vertex
    }

    /// End vertex of an edgeuse (the mate's start).
    pub fn eu_end_vertex(&self, eu: EdgeuseId) -> VertexId {
        let mate = self.edgeuses[eu].mate;
        self.vertexuses[self.edgeuses[mate].vertexuse].vertex
    }

    // ---- construction ----

    /// Add an empty region.
    pub fn add_region(&mut self) -> RegionId {
        let index = self.alloc_index();
        let id = self.regions.insert(Region {
            index,
            shells: Vec::new(),
        });
        self.region_order.push(id);
        id
    }

    /// Add an empty shell to a region.
    pub fn add_shell(&mut self, region: RegionId) -> ShellId {
        let index = self.alloc_index();
        let id = self.shells.insert(Shell {
            index,
            region,
            faceuses: Vec::new(),
            wire_loopuses: Vec::new(),
            wire_edgeuses: Vec::new(),
            lone_vertexuse: None,
        });
        self.regions[region].shells.push(id);
        id
    }

    /// Add a vertex at a point.
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        let index = self.alloc_index();
        self.vertices.insert(Vertex {
            index,
            point,
            uses: Vec::new(),
        })
    }

    fn add_vertexuse(&mut self, vertex: VertexId, parent: VertexuseParent) -> VertexuseId {
        let index = self.alloc_index();
        let vu = self.vertexuses.insert(Vertexuse {
            index,
            parent,
            vertex,
        });
        self.vertices[vertex].uses.push(vu);
        vu
    }

    /// Make a shell a lone-vertex shell.
    ///
    /// # Panics
    /// Panics if the shell already has a lone vertexuse.
    pub fn add_lone_vertex(&mut self, shell: ShellId, vertex: VertexId) -> VertexuseId {
        assert!(
            self.shells[shell].lone_vertexuse.is_none(),
            "add_lone_vertex: shell already has a lone vertexuse"
        );
        let vu = self.add_vertexuse(vertex, VertexuseParent::Shell(shell));
        self.shells[shell].lone_vertexuse = Some(vu);
        vu
    }

    /// Create an edgeuse/mate pair between two vertices, reusing an
    /// existing edge between the same pair (spliced radially) or
    /// creating a fresh edge with new line geometry.
    fn make_eu_pair(
        &mut self,
        va: VertexId,
        vb: VertexId,
        parent_fwd: EdgeuseParent,
        parent_rev: EdgeuseParent,
    ) -> (EdgeuseId, EdgeuseId) {
        let existing = self.find_any_eu_between(va, vb);

        let fwd_index = self.alloc_index();
        let eu_fwd = self.edgeuses.insert(Edgeuse {
            index: fwd_index,
            parent: parent_fwd,
            edge: EdgeId::default(),
            mate: EdgeuseId::default(),
            radial: EdgeuseId::default(),
            vertexuse: VertexuseId::default(),
        });
        let rev_index = self.alloc_index();
        let eu_rev = self.edgeuses.insert(Edgeuse {
            index: rev_index,
            parent: parent_rev,
            edge: EdgeId::default(),
            mate: eu_fwd,
            radial: EdgeuseId::default(),
            vertexuse: VertexuseId::default(),
        });
        self.edgeuses[eu_fwd].mate = eu_rev;

        let vu_fwd = self.add_vertexuse(va, VertexuseParent::Edgeuse(eu_fwd));
        let vu_rev = self.add_vertexuse(vb, VertexuseParent::Edgeuse(eu_rev));
        self.edgeuses[eu_fwd].vertexuse = vu_fwd;
        self.edgeuses[eu_rev].vertexuse = vu_rev;

        let edge = match existing {
            Some(other) => {
                let edge = self.edgeuses[other].edge;
                // Splice the new pair into the radial orbit next to `other`.
                let other_radial = self.edgeuses[other].radial;
                self.edgeuses[eu_fwd].radial = other;
                self.edgeuses[other].radial = eu_fwd;
                self.edgeuses[eu_rev].radial = other_radial;
                self.edgeuses[other_radial].radial = eu_rev;
                edge
            }
            None => {
                let pa = self.vertices[va].point;
                let pb = self.vertices[vb].point;
                let line_index = self.alloc_index();
                let line = self.edge_lines.insert(EdgeLine {
                    index: line_index,
                    pt: pa,
                    dir: pb - pa,
                    uses: Vec::new(),
                });
                let edge_index = self.alloc_index();
                let edge = self.edges.insert(Edge {
                    index: edge_index,
                    line,
                    eu: eu_fwd,
                });
                // A lone pair is its own radial partner set.
                self.edgeuses[eu_fwd].radial = eu_rev;
                self.edgeuses[eu_rev].radial = eu_fwd;
                edge
            }
        };
        self.edgeuses[eu_fwd].edge = edge;
        self.edgeuses[eu_rev].edge = edge;
        let line = self.edges[edge].line;
        self.edge_lines[line].uses.push(eu_fwd);
        self.edge_lines[line].uses.push(eu_rev);

        (eu_fwd, eu_rev)
    }

    /// Any edgeuse running between the two vertices, in either
    /// direction.
    fn find_any_eu_between(&self, va: VertexId, vb: VertexId) -> Option<EdgeuseId> {
        for &vu in &self.vertices[va].uses {
            if let VertexuseParent::Edgeuse(eu) = self.vertexuses[vu].parent {
                if self.eu_end_vertex(eu) == vb {
                    return Some(eu);
                }
            }
        }
        None
    }

    /// Add a face to a shell from a cycle of at least 3 vertices and its
    /// supporting plane. Returns the faceuse oriented with the plane
    /// normal; its mate carries the reversed cycle.
    ///
    /// Edges already present between consecutive vertices are reused and
    /// the new uses spliced into their radial orbits.
    ///
    /// # Panics
    /// Panics if fewer than 3 vertices are supplied.
    pub fn add_face(&mut self, shell: ShellId, verts: &[VertexId], plane: Plane) -> FaceuseId {
        assert!(verts.len() >= 3, "add_face: need at least 3 vertices");

        let geom_index = self.alloc_index();
        let geom = self.face_geoms.insert(FaceGeom {
            index: geom_index,
            plane,
        });

        let face_index = self.alloc_index();
        let face = self.faces.insert(Face {
            index: face_index,
            geom,
            fu_same: FaceuseId::default(),
            fu_opposite: FaceuseId::default(),
        });

        let fu1_index = self.alloc_index();
        let fu1 = self.faceuses.insert(Faceuse {
            index: fu1_index,
            shell,
            face,
            orientation: Orientation::Same,
            mate: FaceuseId::default(),
            loopuses: Vec::new(),
        });
        let fu2_index = self.alloc_index();
        let fu2 = self.faceuses.insert(Faceuse {
            index: fu2_index,
            shell,
            face,
            orientation: Orientation::Opposite,
            mate: fu1,
            loopuses: Vec::new(),
        });
        self.faceuses[fu1].mate = fu2;
        self.faces[face].fu_same = fu1;
        self.faces[face].fu_opposite = fu2;
        self.shells[shell].faceuses.push(fu1);
        self.shells[shell].faceuses.push(fu2);

        let (lu1, lu2) = self.make_edge_loop_pair(
            verts,
            LoopuseParent::Faceuse(fu1),
            LoopuseParent::Faceuse(fu2),
        );
        self.faceuses[fu1].loopuses.push(lu1);
        self.faceuses[fu2].loopuses.push(lu2);

        fu1
    }

    /// Add a wire loop to a shell from a cycle of at least 2 vertices
    /// (a 2-vertex cycle is an out-and-back crack). Returns the loopuse
    /// with forward orientation.
    ///
    /// # Panics
    /// Panics if fewer than 2 vertices are supplied.
    pub fn add_wire_loop(&mut self, shell: ShellId, verts: &[VertexId]) -> LoopuseId {
        assert!(verts.len() >= 2, "add_wire_loop: need at least 2 vertices");
        let (lu1, lu2) = self.make_edge_loop_pair(
            verts,
            LoopuseParent::Shell(shell),
            LoopuseParent::Shell(shell),
        );
        self.shells[shell].wire_loopuses.push(lu1);
        self.shells[shell].wire_loopuses.push(lu2);
        lu1
    }

    /// Build a loop/loopuse pair over a vertex cycle. The first use
    /// carries the cycle as given; the mate carries it reversed.
    fn make_edge_loop_pair(
        &mut self,
        verts: &[VertexId],
        parent1: LoopuseParent,
        parent2: LoopuseParent,
    ) -> (LoopuseId, LoopuseId) {
        let loop_index = self.alloc_index();
        let lp = self.loops.insert(Loop {
            index: loop_index,
            lu: LoopuseId::default(),
        });

        let lu1_index = self.alloc_index();
        let lu1 = self.loopuses.insert(Loopuse {
            index: lu1_index,
            parent: parent1,
            lp,
            mate: LoopuseId::default(),
            orientation: Orientation::Same,
            children: LoopuseChildren::Edges(Vec::new()),
        });
        let lu2_index = self.alloc_index();
        let lu2 = self.loopuses.insert(Loopuse {
            index: lu2_index,
            parent: parent2,
            lp,
            mate: lu1,
            orientation: Orientation::Opposite,
            children: LoopuseChildren::Edges(Vec::new()),
        });
        self.loopuses[lu1].mate = lu2;
        self.loops[lp].lu = lu1;

        let n = verts.len();
        let mut fwd = Vec::with_capacity(n);
        let mut rev = Vec::with_capacity(n);
        for i in 0..n {
            let va = verts[i];
            let vb = verts[(i + 1) % n];
            let (eu_f, eu_r) = self.make_eu_pair(
                va,
                vb,
                EdgeuseParent::Loopuse(lu1),
                EdgeuseParent::Loopuse(lu2),
            );
            fwd.push(eu_f);
            rev.push(eu_r);
        }
        // The mate traverses the same edges in reverse boundary order.
        rev.reverse();
        self.loopuses[lu1].children = LoopuseChildren::Edges(fwd);
        self.loopuses[lu2].children = LoopuseChildren::Edges(rev);

        (lu1, lu2)
    }

    /// Add a single wire edge between two vertices, owned directly by
    /// the shell. Returns the edgeuse running from `va` to `vb`.
    pub fn add_wire_edge(&mut self, shell: ShellId, va: VertexId, vb: VertexId) -> EdgeuseId {
        let (eu_f, eu_r) = self.make_eu_pair(
            va,
            vb,
            EdgeuseParent::Shell(shell),
            EdgeuseParent::Shell(shell),
        );
        self.shells[shell].wire_edgeuses.push(eu_f);
        self.shells[shell].wire_edgeuses.push(eu_r);
        eu_f
    }

    /// Add a self-loop (lone-vertex loop) on a vertex, owned by a shell.
    /// Returns the loopuse with forward orientation.
    pub fn add_vertex_loop(&mut self, shell: ShellId, vertex: VertexId) -> LoopuseId {
        let loop_index = self.alloc_index();
        let lp = self.loops.insert(Loop {
            index: loop_index,
            lu: LoopuseId::default(),
        });
        let lu1_index = self.alloc_index();
        let lu1 = self.loopuses.insert(Loopuse {
            index: lu1_index,
            parent: LoopuseParent::Shell(shell),
            lp,
            mate: LoopuseId::default(),
            orientation: Orientation::Same,
            children: LoopuseChildren::Edges(Vec::new()),
        });
        let lu2_index = self.alloc_index();
        let lu2 = self.loopuses.insert(Loopuse {
            index: lu2_index,
            parent: LoopuseParent::Shell(shell),
            lp,
            mate: lu1,
            orientation: Orientation::Opposite,
            children: LoopuseChildren::Edges(Vec::new()),
        });
        self.loopuses[lu1].mate = lu2;
        self.loops[lp].lu = lu1;

        let vu1 = self.add_vertexuse(vertex, VertexuseParent::Loopuse(lu1));
        let vu2 = self.add_vertexuse(vertex, VertexuseParent::Loopuse(lu2));
        self.loopuses[lu1].children = LoopuseChildren::Vertex(vu1);
        self.loopuses[lu2].children = LoopuseChildren::Vertex(vu2);

        self.shells[shell].wire_loopuses.push(lu1);
        self.shells[shell].wire_loopuses.push(lu2);
        lu1
    }

    /// Replace an edge's shared line record with another, rewriting
    /// every use of the victim. Used by the geometry-merge repair in
    /// `find_edge_between_2fu`.
    pub(crate) fn merge_edge_lines(&mut self, keep: EdgeLineId, victim: EdgeLineId) {
        if keep == victim {
            return;
        }
        let moved = std::mem::take(&mut self.edge_lines[victim].uses);
        for &eu in &moved {
            let edge = self.edgeuses[eu].edge;
            self.edges[edge].line = keep;
        }
        self.edge_lines[keep].uses.extend(moved);
        self.edge_lines.remove(victim);
    }

    /// Bounding box over every vertex in the model, or `None` for a
    /// model with no vertices.
    pub fn model_bb(&self) -> Option<(Point3, Point3)> {
        let mut it = self.vertices.values();
        let first = it.next()?;
        let mut min = first.point;
        let mut max = first.point;
        for v in it {
            min = Point3::from(min.coords.inf(&v.point.coords));
            max = Point3::from(max.coords.sup(&v.point.coords));
        }
        Some((min, max))
    }

    /// Distance-based vertex lookup used by builders that want to share
    /// vertices: first existing vertex within `tol.dist`, else a new one.
    pub fn get_or_add_vertex(&mut self, point: Point3, tol: &Tolerance) -> VertexId {
        for (id, v) in &self.vertices {
            if tol.pt3_equal(&v.point, &point) {
                return id;
            }
        }
        self.add_vertex(point)
    }
}
