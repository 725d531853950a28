//! Benchmark profiles for the hemesh mesh kernel.
//!
//! - [`reference_profile`]: 100x100 quad grid (10K cells, 40K half-edges)
//! - [`stress_profile`]: 316x316 quad grid (~100K cells)
//! - [`build_reference_mesh`]: the reference profile built and finished

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use hemesh_mesh::HalfEdgeMesh;
use hemesh_test_utils::{quad_grid, Incidence};

/// Incidence for a 100x100 grid of unit quads.
pub fn reference_profile() -> Incidence {
    quad_grid(100, 100)
}

/// Incidence for a 316x316 grid of unit quads.
pub fn stress_profile() -> Incidence {
    quad_grid(316, 316)
}

/// Build the reference grid and run the finishing pass.
pub fn build_reference_mesh() -> HalfEdgeMesh {
    reference_profile().build_finished()
}
