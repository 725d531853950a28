//! Standard incidence inputs.
//!
//! - [`unit_square`]: one quad over `[0,1,2,3]`.
//! - [`quad_grid`]: an `nx` by `ny` grid of unit quads.
//! - [`triangle_fan`]: `n` triangles around a centre node.

use hemesh_core::EntityIndex;
use hemesh_mesh::{finish_topology, HalfEdgeMesh};

/// Construction input for [`HalfEdgeMesh::from_incidence`].
#[derive(Clone, Debug, PartialEq)]
pub struct Incidence {
    pub coords: Vec<f64>,
    pub cells: Vec<EntityIndex>,
    pub node_count: usize,
    pub cell_count: usize,
    pub vertices_per_cell: usize,
    /// Edges a finished mesh should have.
    pub expected_edges: usize,
    /// Boundary edges a finished mesh should have.
    pub expected_boundary_edges: usize,
}

impl Incidence {
    /// Build the mesh, leaving the topology unfinished.
    pub fn build(&self) -> HalfEdgeMesh {
        HalfEdgeMesh::from_incidence(
            &self.coords,
            &self.cells,
            self.node_count,
            self.cell_count,
            self.vertices_per_cell,
        )
        .expect("fixture incidence is valid")
    }

    /// Build the mesh and run the finishing pass.
    pub fn build_finished(&self) -> HalfEdgeMesh {
        let mut mesh = self.build();
        finish_topology(&mut mesh).expect("fixture topology is manifold");
        mesh
    }

    /// Number of half-edges the mesh will hold.
    pub fn halfedge_count(&self) -> usize {
        self.cell_count * self.vertices_per_cell
    }
}

/// The unit square as a single quad with incidence `[0, 1, 2, 3]`.
pub fn unit_square() -> Incidence {
    Incidence {
        coords: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
        cells: vec![0, 1, 2, 3],
        node_count: 4,
        cell_count: 1,
        vertices_per_cell: 4,
        expected_edges: 4,
        expected_boundary_edges: 4,
    }
}

/// An `nx` by `ny` grid of unit quads, counter-clockwise.
///
/// Node `(i, j)` has index `j * (nx + 1) + i` and sits at `(i, j)`.
pub fn quad_grid(nx: usize, ny: usize) -> Incidence {
    let row = nx + 1;
    let node = |i: usize, j: usize| (j * row + i) as EntityIndex;
    let mut coords = Vec::with_capacity(2 * row * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            coords.push(i as f64);
            coords.push(j as f64);
        }
    }
    let mut cells = Vec::with_capacity(4 * nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            cells.extend([node(i, j), node(i + 1, j), node(i + 1, j + 1), node(i, j + 1)]);
        }
    }
    Incidence {
        coords,
        cells,
        node_count: row * (ny + 1),
        cell_count: nx * ny,
        vertices_per_cell: 4,
        expected_edges: nx * (ny + 1) + ny * (nx + 1),
        expected_boundary_edges: 2 * (nx + ny),
    }
}

/// `n` triangles sharing node 0, with rim nodes `1..=n` on the unit circle.
///
/// # Panics
///
/// Panics if `n < 3`.
pub fn triangle_fan(n: usize) -> Incidence {
    assert!(n >= 3, "a fan needs at least 3 triangles, got {n}");
    let mut coords = vec![0.0, 0.0];
    for k in 0..n {
        let angle = std::f64::consts::TAU * k as f64 / n as f64;
        coords.push(angle.cos());
        coords.push(angle.sin());
    }
    let mut cells = Vec::with_capacity(3 * n);
    for k in 0..n {
        cells.extend([0, (k + 1) as EntityIndex, ((k + 1) % n + 1) as EntityIndex]);
    }
    Incidence {
        coords,
        cells,
        node_count: n + 1,
        cell_count: n,
        vertices_per_cell: 3,
        expected_edges: 2 * n,
        expected_boundary_edges: n,
    }
}
