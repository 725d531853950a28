//! Mesh fixtures for hemesh tests and benchmarks.
//!
//! Each fixture is an [`Incidence`]: the raw arrays accepted by
//! [`HalfEdgeMesh::from_incidence`], plus the counts a finished mesh
//! should report.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{quad_grid, triangle_fan, unit_square, Incidence};
