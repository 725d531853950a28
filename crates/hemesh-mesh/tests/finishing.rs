//! Integration test: the finishing pass over the standard fixtures.

use hemesh_core::{Edge, HalfEdge, INVALID_INDEX};
use hemesh_mesh::{boundary_halfedges, finish_topology, validate_topology, MeshError};
use hemesh_test_utils::{quad_grid, triangle_fan, unit_square, Incidence};

fn check_fixture(input: &Incidence) {
    let mut mesh = input.build();
    let report = finish_topology(&mut mesh).unwrap();

    assert_eq!(report.cells, input.cell_count);
    assert_eq!(report.halfedges, input.halfedge_count());
    assert_eq!(report.edges(), input.expected_edges);
    assert_eq!(report.boundary_edges, input.expected_boundary_edges);
    assert_eq!(mesh.number_of::<Edge>(), input.expected_edges);
    assert_eq!(mesh.number_of_boundary_edges(), input.expected_boundary_edges);
    assert_eq!(boundary_halfedges(&mesh).count(), input.expected_boundary_edges);
    validate_topology(&mesh).unwrap();
}

#[test]
fn unit_square_finishes_with_four_boundary_edges() {
    check_fixture(&unit_square());
}

#[test]
fn two_by_two_grid_has_twelve_edges_eight_on_boundary() {
    let input = quad_grid(2, 2);
    assert_eq!(input.expected_edges, 12);
    assert_eq!(input.expected_boundary_edges, 8);
    check_fixture(&input);
}

#[test]
fn larger_grids_and_fans_finish() {
    check_fixture(&quad_grid(5, 3));
    check_fixture(&quad_grid(1, 7));
    check_fixture(&triangle_fan(3));
    check_fixture(&triangle_fan(12));
}

#[test]
fn cycles_are_closed_and_previous_inverts_next() {
    let mesh = quad_grid(2, 2).build_finished();
    for h in 0..mesh.number_of::<HalfEdge>() {
        let n = mesh.next_halfedge()[h] as usize;
        assert_eq!(mesh.prev_halfedge()[n] as usize, h);
        let mut walk = h;
        for _ in 0..4 {
            walk = mesh.next_halfedge()[walk] as usize;
        }
        assert_eq!(walk, h, "cycle from {h} does not close after 4 steps");
    }
}

#[test]
fn opposite_is_an_involution_and_twins_share_an_edge() {
    let mesh = triangle_fan(8).build_finished();
    for h in 0..mesh.number_of::<HalfEdge>() {
        let o = mesh.oppo_halfedge()[h];
        if o == INVALID_INDEX {
            continue;
        }
        assert_eq!(mesh.oppo_halfedge()[o as usize] as usize, h);
        assert_eq!(mesh.halfedge_to_edge()[o as usize], mesh.halfedge_to_edge()[h]);
    }
}

#[test]
fn fan_centre_is_entered_only_by_interior_halfedges() {
    let mesh = triangle_fan(5).build_finished();
    let rep = mesh.node_halfedge()[0];
    assert_eq!(mesh.halfedge_to_node()[rep as usize], 0);
    assert_ne!(mesh.oppo_halfedge()[rep as usize], INVALID_INDEX);
    for rim in 1..=5 {
        let rep = mesh.node_halfedge()[rim] as usize;
        assert_eq!(mesh.oppo_halfedge()[rep], INVALID_INDEX, "rim node {rim}");
    }
}

#[test]
fn non_manifold_incidence_is_rejected() {
    // Two triangles traversing 0 -> 1 in the same direction.
    let input = Incidence {
        coords: vec![0.0, 0.0, 1.0, 0.0, 0.5, 1.0, 0.5, -1.0],
        cells: vec![0, 1, 2, 0, 1, 3],
        node_count: 4,
        cell_count: 2,
        vertices_per_cell: 3,
        expected_edges: 0,
        expected_boundary_edges: 0,
    };
    let mut mesh = input.build();
    let err = finish_topology(&mut mesh).unwrap_err();
    assert!(matches!(err, MeshError::NonManifoldEdge { tail: 0, head: 1, .. }), "{err}");
    assert_eq!(mesh.number_of::<Edge>(), 0);

    // The mesh is left exactly as `from_incidence` built it.
    let next: Vec<_> = mesh.next_halfedge().iter().copied().collect();
    assert_eq!(next, [1, 2, INVALID_INDEX, 4, 5, INVALID_INDEX]);
    assert!(mesh.prev_halfedge().iter().all(|&p| p == INVALID_INDEX));
    assert!(mesh.oppo_halfedge().iter().all(|&o| o == INVALID_INDEX));
    let reps: Vec<_> = mesh.cell_halfedge().iter().copied().collect();
    assert_eq!(reps, [2, 5]);
}

#[test]
fn edge_shared_by_two_boundary_halfedges_fails_validation() {
    let mut mesh = quad_grid(2, 1).build_finished();
    let boundary: Vec<_> = boundary_halfedges(&mesh).take(2).collect();
    let (a, b) = (boundary[0] as usize, boundary[1] as usize);
    let orphaned = mesh.halfedge_to_edge()[a];
    let shared = mesh.halfedge_to_edge()[b];
    mesh.halfedge_to_edge_mut()[a] = shared;
    mesh.delete_entity::<Edge>(orphaned);
    let err = validate_topology(&mesh).unwrap_err();
    assert!(err.to_string().contains("not opposites"), "{err}");
}

#[test]
fn finishing_twice_is_rejected() {
    let mut mesh = unit_square().build_finished();
    assert_eq!(
        finish_topology(&mut mesh).unwrap_err(),
        MeshError::AlreadyFinished { edges: 4 }
    );
}
