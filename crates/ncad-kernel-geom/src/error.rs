//! Error type for predicate construction failures.

use thiserror::Error;

/// Recoverable failures from predicate and construction routines.
///
/// These cover degenerate but representable inputs. Violations of a stated
/// caller contract (zero-length directions, non-unit normals) panic instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeomError {
    /// Input points coincide or are collinear where distinct,
    /// non-collinear points are required.
    #[error("input points are coincident or collinear within tolerance")]
    DegeneratePoints,
    /// A linear system's determinant is below the singularity threshold.
    #[error("linear system is singular within tolerance")]
    SingularSystem,
    /// An intersection exists in principle but could not be constructed
    /// numerically.
    #[error("no intersection could be constructed")]
    NoIntersection,
}
