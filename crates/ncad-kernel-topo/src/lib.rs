//! Non-manifold boundary topology: the element arena, navigation,
//! search, loop queries, and bulk tabulation.
//!
//! The model is a hierarchy of regions, shells, faces, loops, edges, and
//! vertices, where every appearance of an entity in the boundary is an
//! oriented "use" record. Shared geometry (face planes, edge lines) is
//! factored into separate records referenced by the uses. All structure
//! lives in slotmap arenas behind typed handles; there are no raw
//! pointers and no runtime type tags.
//!
//! Queries are read-only methods on [`Model`] and never allocate inside
//! the graph. Tolerance-based comparisons take an explicit
//! [`Tolerance`](ncad_kernel_math::Tolerance).

#![warn(missing_docs)]

mod loops;
mod model;
mod nav;
mod search;
mod tabulate;

pub use loops::LoopOrientation;
pub use model::{
    Edge, EdgeId, EdgeLine, EdgeLineId, Edgeuse, EdgeuseId, EdgeuseParent, Element, Face,
    FaceGeom, FaceGeomId, FaceId, Faceuse, FaceuseId, Loop, LoopId, Loopuse, LoopuseChildren,
    LoopuseId, LoopuseParent, Model, Orientation, Region, RegionId, Shell, ShellId, Vertex,
    VertexId, Vertexuse, VertexuseId, VertexuseParent,
};
pub use nav::EdgeFrame;
pub use tabulate::{VisitedSet, Visitor};
