#![warn(missing_docs)]

//! ncad — a tolerance-based geometry kernel
//!
//! Geometric predicates that take an explicit [`Tolerance`] instead of
//! comparing against machine epsilon, and a non-manifold boundary
//! topology arena with navigation, search, and tabulation queries.
//!
//! # Example
//!
//! ```rust
//! use ncad::{Diagnostics, Element, Model, Plane, Point3, Tolerance, Vec3};
//!
//! let tol = Tolerance::DEFAULT;
//! let mut m = Model::new(Diagnostics::Off);
//! let r = m.add_region();
//! let s = m.add_shell(r);
//! let verts: Vec<_> = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]
//! .iter()
//! .map(|p| m.add_vertex(*p))
//! .collect();
//! m.add_face(s, &verts, Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0));
//!
//! assert_eq!(m.vertex_tabulate(Element::Shell(s)).len(), 3);
//! assert!(m.find_pt_in_shell(s, &Point3::new(1.0, 0.0, 0.0), &tol).is_some());
//! ```

/// Math types, guard constants, and the tolerance model.
pub use ncad_kernel_math as math;

/// Geometric predicates and constructions.
pub use ncad_kernel_geom as geom;

/// Topology arena and query layer.
pub use ncad_kernel_topo as topo;

pub use ncad_kernel_math::{Diagnostics, Point2, Point3, Tolerance, Transform, Vec2, Vec3};

pub use ncad_kernel_geom::Plane;

pub use ncad_kernel_topo::{Element, Model, Orientation};
