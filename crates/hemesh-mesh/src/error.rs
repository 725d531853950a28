//! Mesh construction and topology errors.

use hemesh_arena::ArenaError;
use hemesh_core::{EntityIndex, EntityKind};
use thiserror::Error;

/// Errors from building, finishing, or validating a [`HalfEdgeMesh`](crate::HalfEdgeMesh).
///
/// Input data is checked at the construction boundary. Element access
/// through columns is not: an out-of-range index there panics.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The coordinate array does not hold two numbers per node.
    #[error("expected {expected} coordinates for {node_count} nodes, got {actual}")]
    CoordinateLength {
        /// Declared node count.
        node_count: usize,
        /// `2 * node_count`.
        expected: usize,
        /// Length of the coordinate array.
        actual: usize,
    },
    /// The incidence array is not `cell_count * vertices_per_cell` long.
    #[error("expected {expected} incidence entries, got {actual}")]
    IncidenceLength {
        /// `cell_count * vertices_per_cell`.
        expected: usize,
        /// Length of the incidence array.
        actual: usize,
    },
    /// Cells need at least three vertices.
    #[error("cells need at least 3 vertices, got {vertices_per_cell}")]
    InvalidValence {
        /// The rejected vertex count.
        vertices_per_cell: usize,
    },
    /// An incidence entry names a node that does not exist.
    #[error("cell {cell} references node {node}, but only {node_count} nodes exist")]
    NodeOutOfRange {
        /// Cell (in input order) holding the bad entry.
        cell: usize,
        /// The referenced node.
        node: EntityIndex,
        /// Declared node count.
        node_count: usize,
    },
    /// Two half-edges run between the same nodes in the same direction.
    #[error("non-manifold edge: half-edges {first} and {second} both run {tail} -> {head}")]
    NonManifoldEdge {
        /// Tail node.
        tail: EntityIndex,
        /// Head node.
        head: EntityIndex,
        /// First half-edge seen on this directed pair.
        first: EntityIndex,
        /// Conflicting half-edge.
        second: EntityIndex,
    },
    /// The finishing pass found edges already present.
    #[error("topology already finished: {edges} edges present")]
    AlreadyFinished {
        /// Live edge count found.
        edges: usize,
    },
    /// A topology invariant does not hold.
    #[error("{kind} {index}: {reason}")]
    TopologyViolation {
        /// Kind of the offending entity.
        kind: EntityKind,
        /// Index of the offending entity.
        index: EntityIndex,
        /// Which invariant failed.
        reason: String,
    },
    /// Column registration or lookup failed.
    #[error(transparent)]
    Arena(#[from] ArenaError),
}
