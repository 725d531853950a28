//! The closed set of mesh entity kinds.
//!
//! [`EntityKind`] names a kind at runtime; the zero-sized marker types
//! ([`Node`], [`Edge`], [`Cell`], [`HalfEdge`]) name it at compile time so
//! that generic accessors such as `mesh.number_of::<Cell>()` resolve to a
//! container by a direct branch.

use std::fmt;

/// One of the four mesh element categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Mesh vertex.
    Node,
    /// Undirected mesh edge, backed by one or two half-edges.
    Edge,
    /// Polygonal face.
    Cell,
    /// Directed edge side bounding exactly one cell.
    HalfEdge,
}

impl EntityKind {
    /// All kinds in registry order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Node,
        EntityKind::Edge,
        EntityKind::Cell,
        EntityKind::HalfEdge,
    ];

    /// Lower-case name used in diagnostics and column labels.
    pub fn name(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Cell => "cell",
            Self::HalfEdge => "halfedge",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time tag for an entity kind.
pub trait Entity: 'static {
    /// The runtime kind this tag resolves to.
    const KIND: EntityKind;
}

/// Marker for [`EntityKind::Node`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Node;

/// Marker for [`EntityKind::Edge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edge;

/// Marker for [`EntityKind::Cell`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell;

/// Marker for [`EntityKind::HalfEdge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HalfEdge;

impl Entity for Node {
    const KIND: EntityKind = EntityKind::Node;
}

impl Entity for Edge {
    const KIND: EntityKind = EntityKind::Edge;
}

impl Entity for Cell {
    const KIND: EntityKind = EntityKind::Cell;
}

impl Entity for HalfEdge {
    const KIND: EntityKind = EntityKind::HalfEdge;
}
