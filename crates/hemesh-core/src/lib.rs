//! Core types for the hemesh half-edge mesh kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the entity index type, the closed set of entity kinds, and the 2D
//! geometry primitives stored in node columns.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod geometry;
pub mod id;
pub mod kind;

pub use geometry::{intersection_point_of_two_segments, Point, Vector, Vector2d};
pub use id::{is_valid, EntityIndex, INVALID_INDEX};
pub use kind::{Cell, Edge, Entity, EntityKind, HalfEdge, Node};
