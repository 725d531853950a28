//! hemesh: a 2D half-edge mesh kernel on chunked, tombstoned storage.
//!
//! This is the facade crate that re-exports the public API of the hemesh
//! sub-crates. Adding `hemesh` as a single dependency is enough for most
//! users.
//!
//! # Quick start
//!
//! ```rust
//! use hemesh::prelude::*;
//!
//! // Two triangles sharing the diagonal of the unit square.
//! let coords = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
//! let cells = [0, 1, 2, 0, 2, 3];
//! let mut mesh = HalfEdgeMesh::from_incidence(&coords, &cells, 4, 2, 3).unwrap();
//! assert_eq!(mesh.number_of::<HalfEdge>(), 6);
//!
//! let report = finish_topology(&mut mesh).unwrap();
//! assert_eq!(report.interior_edges, 1);
//! assert_eq!(mesh.number_of_boundary_edges(), 4);
//! validate_topology(&mesh).unwrap();
//!
//! // Attach a per-cell attribute.
//! mesh.container_mut::<Cell>().add_column::<f64>("area").unwrap();
//! mesh.column_mut::<Cell, f64>("area")[0] = 0.5;
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `hemesh-core` | Entity indices and kinds, 2D geometry |
//! | [`arena`] | `hemesh-arena` | `ChunkArray`, deletion marks, typed columns |
//! | [`mesh`] | `hemesh-mesh` | Entity containers, registry, `HalfEdgeMesh`, finishing pass |
//!
//! # Features
//!
//! - `checked-access`: element index checks run in release builds too.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Entity indices, entity kinds, and geometry primitives (`hemesh-core`).
pub use hemesh_core as types;

/// Chunked column storage (`hemesh-arena`).
///
/// [`arena::ChunkArray`] is the block-backed array behind every column;
/// [`arena::TombstonedArena`] is the live view that skips deleted slots.
pub use hemesh_arena as arena;

/// Mesh topology (`hemesh-mesh`).
///
/// [`mesh::HalfEdgeMesh`] plus the [`mesh::finish_topology`] and
/// [`mesh::validate_topology`] stages.
pub use hemesh_mesh as mesh;

/// Common imports for typical hemesh usage.
pub mod prelude {
    // Core types
    pub use hemesh_core::{
        intersection_point_of_two_segments, Cell, Edge, Entity, EntityIndex, EntityKind,
        HalfEdge, Node, Point, Vector, INVALID_INDEX,
    };

    // Storage
    pub use hemesh_arena::{ArenaConfig, ChunkArray, TombstonedArena};

    // Mesh
    pub use hemesh_mesh::{
        finish_topology, validate_topology, EntityDataContainer, FinishReport, HalfEdgeMesh,
    };

    // Errors
    pub use hemesh_arena::ArenaError;
    pub use hemesh_mesh::MeshError;
}
