//! Half-edge mesh topology over tombstoned entity containers.
//!
//! # Layers
//!
//! - [`EntityDataContainer`]: one per entity kind. Owns the deletion marks
//!   and a name-keyed set of typed columns kept at the same length.
//! - [`EntityRegistry`]: the four containers, resolved from an
//!   [`EntityKind`](hemesh_core::EntityKind) or a marker type by a direct
//!   branch.
//! - [`HalfEdgeMesh`]: pre-registers the adjacency columns, builds a mesh
//!   from cell/node incidence data, and offers whole-mesh copy, clear,
//!   release and swap.
//! - [`finish`]: the explicit stage that completes the adjacency the
//!   incidence constructor leaves open (cycle closure, `previous`,
//!   `opposite`, edges, node representatives), plus topology validation.
//!
//! Right after [`HalfEdgeMesh::from_incidence`] each cell's `next` chain is
//! open at its last half-edge and no edges exist. Run
//! [`finish_topology`] before trusting `opposite`, `edge`, or
//! [`HalfEdgeMesh::number_of_boundary_edges`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod container;
pub mod error;
pub mod finish;
pub mod mesh;
pub mod registry;

pub use container::EntityDataContainer;
pub use error::MeshError;
pub use finish::{boundary_halfedges, finish_topology, validate_topology, FinishReport};
pub use mesh::{columns, HalfEdgeMesh};
pub use registry::{ContainersMut, EntityRegistry};
