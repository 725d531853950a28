//! Completing and checking half-edge adjacency.
//!
//! [`HalfEdgeMesh::from_incidence`] only records each half-edge's head
//! node, its cell, and an open `next` chain per cell. [`finish_topology`]
//! is the separate stage that derives the rest:
//!
//! 1. close every cell's `next` cycle and set `previous` as its inverse;
//! 2. pair half-edges running between the same two nodes in opposite
//!    directions and link them through `opposite`;
//! 3. create one edge per pair and one per unpaired (boundary) half-edge;
//! 4. point every node at an incoming half-edge, preferring a boundary one.
//!
//! [`validate_topology`] checks the resulting invariants and is cheap
//! enough to run in tests after any hand edit of the links.

use hemesh_arena::ChunkArray;
use hemesh_core::{is_valid, Cell, Edge, EntityIndex, EntityKind, HalfEdge, Node, INVALID_INDEX};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::MeshError;
use crate::mesh::{columns, HalfEdgeMesh};

/// Half-edges of one cell in cycle order.
type Cycle = SmallVec<[EntityIndex; 8]>;

/// Summary of a [`finish_topology`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FinishReport {
    /// Cells whose cycles were closed.
    pub cells: usize,
    /// Half-edges linked.
    pub halfedges: usize,
    /// Edges backed by two half-edges.
    pub interior_edges: usize,
    /// Edges backed by one half-edge.
    pub boundary_edges: usize,
}

impl FinishReport {
    /// Total number of edges created.
    pub fn edges(&self) -> usize {
        self.interior_edges + self.boundary_edges
    }
}

fn violation(kind: EntityKind, index: EntityIndex, reason: impl Into<String>) -> MeshError {
    MeshError::TopologyViolation {
        kind,
        index,
        reason: reason.into(),
    }
}

#[inline]
fn at(array: &ChunkArray<EntityIndex>, index: EntityIndex) -> EntityIndex {
    array[index as usize]
}

/// Derive `previous`, `opposite`, edges, and node representatives for a
/// mesh built by [`HalfEdgeMesh::from_incidence`].
///
/// Cells whose `next` cycle is already closed are accepted as is. The mesh
/// must not contain live edges yet.
///
/// # Errors
///
/// - [`MeshError::AlreadyFinished`] if live edges exist.
/// - [`MeshError::NonManifoldEdge`] if two half-edges run between the same
///   nodes in the same direction.
/// - [`MeshError::TopologyViolation`] if a half-edge names a dead cell or
///   node, a cell's `next` chain does not visit all of its half-edges, or a
///   cell has fewer than three half-edges.
///
/// Every check runs before the first write, so on error the mesh is left
/// exactly as it was.
pub fn finish_topology(mesh: &mut HalfEdgeMesh) -> Result<FinishReport, MeshError> {
    let edges = mesh.number_of::<Edge>();
    if edges > 0 {
        return Err(MeshError::AlreadyFinished { edges });
    }

    let cycles = collect_cycles(mesh)?;
    let directed = pair_directed(mesh, &cycles)?;

    // One entry per edge: its representative and, if interior, the twin.
    let mut pairs: Vec<(EntityIndex, Option<EntityIndex>)> = Vec::with_capacity(directed.len());
    for (&(tail, head), &h) in &directed {
        match directed.get(&(head, tail)) {
            Some(&twin) if twin < h => {}
            twin => pairs.push((h, twin.copied())),
        }
    }

    let c = mesh.entities_mut().split_mut();

    let next = c.halfedges.column_mut::<EntityIndex>(columns::NEXT);
    for cycle in cycles.values() {
        for (i, &h) in cycle.iter().enumerate() {
            next[h as usize] = cycle[(i + 1) % cycle.len()];
        }
    }
    let previous = c.halfedges.column_mut::<EntityIndex>(columns::PREVIOUS);
    for cycle in cycles.values() {
        for (i, &h) in cycle.iter().enumerate() {
            previous[h as usize] = cycle[(i + cycle.len() - 1) % cycle.len()];
        }
    }
    let c2h = c.cells.column_mut::<EntityIndex>(columns::HALFEDGE);
    for (&cell, cycle) in &cycles {
        if !cycle.contains(&c2h[cell as usize]) {
            c2h[cell as usize] = cycle[0];
        }
    }

    let edge_ids = c.edges.add_entities(pairs.len());
    let e2h = c.edges.column_mut::<EntityIndex>(columns::HALFEDGE);
    for (e, &(h, _)) in edge_ids.clone().zip(&pairs) {
        e2h[e as usize] = h;
    }

    let halfedges = &mut *c.halfedges;
    let h2e = halfedges.column_mut::<EntityIndex>(columns::EDGE);
    for (e, &(h, twin)) in edge_ids.clone().zip(&pairs) {
        h2e[h as usize] = e;
        if let Some(t) = twin {
            h2e[t as usize] = e;
        }
    }
    let opposite = halfedges.column_mut::<EntityIndex>(columns::OPPOSITE);
    for cycle in cycles.values() {
        for &h in cycle {
            opposite[h as usize] = INVALID_INDEX;
        }
    }
    let mut report = FinishReport {
        cells: cycles.len(),
        halfedges: directed.len(),
        ..FinishReport::default()
    };
    for &(h, twin) in &pairs {
        match twin {
            Some(t) => {
                opposite[h as usize] = t;
                opposite[t as usize] = h;
                report.interior_edges += 1;
            }
            None => report.boundary_edges += 1,
        }
    }

    let h2n = halfedges.column::<EntityIndex>(columns::NODE);
    let opposite = halfedges.column::<EntityIndex>(columns::OPPOSITE);
    let n2h = c.nodes.column_mut::<EntityIndex>(columns::HALFEDGE);
    n2h.fill(INVALID_INDEX);
    for &h in directed.values() {
        let node = at(h2n, h) as usize;
        let current = n2h[node];
        let replace = !is_valid(current)
            || (is_valid(at(opposite, current)) && !is_valid(at(opposite, h)));
        if replace {
            n2h[node] = h;
        }
    }

    log::debug!(
        "finished topology: {} cells, {} half-edges, {} interior and {} boundary edges",
        report.cells,
        report.halfedges,
        report.interior_edges,
        report.boundary_edges,
    );
    Ok(report)
}

/// Map each half-edge's directed `(tail, head)` node pair to it, in cycle
/// order. Nothing is written to the mesh.
fn pair_directed(
    mesh: &HalfEdgeMesh,
    cycles: &IndexMap<EntityIndex, Cycle>,
) -> Result<IndexMap<(EntityIndex, EntityIndex), EntityIndex>, MeshError> {
    let nodes = mesh.container::<Node>();
    let h2n = mesh.halfedge_to_node();
    let mut directed = IndexMap::new();
    for cycle in cycles.values() {
        for (i, &h) in cycle.iter().enumerate() {
            let prev = cycle[(i + cycle.len() - 1) % cycle.len()];
            let (tail, head) = (at(h2n, prev), at(h2n, h));
            if !nodes.is_live(head) {
                return Err(violation(
                    EntityKind::HalfEdge,
                    h,
                    format!("head node {head} is not live"),
                ));
            }
            if tail == head {
                return Err(violation(
                    EntityKind::HalfEdge,
                    h,
                    format!("starts and ends at node {head}"),
                ));
            }
            if let Some(&first) = directed.get(&(tail, head)) {
                return Err(MeshError::NonManifoldEdge {
                    tail,
                    head,
                    first,
                    second: h,
                });
            }
            directed.insert((tail, head), h);
        }
    }
    Ok(directed)
}

/// Group live half-edges by cell and order each group along `next`.
fn collect_cycles(mesh: &HalfEdgeMesh) -> Result<IndexMap<EntityIndex, Cycle>, MeshError> {
    let cells = mesh.container::<Cell>();
    let halfedges = mesh.container::<HalfEdge>();
    let h2c = mesh.halfedge_to_cell();
    let next = mesh.next_halfedge();

    let mut groups: IndexMap<EntityIndex, Cycle> = IndexMap::new();
    for h in halfedges.live_indices() {
        let cell = at(h2c, h);
        if !cells.is_live(cell) {
            return Err(violation(
                EntityKind::HalfEdge,
                h,
                format!("owning cell {cell} is not live"),
            ));
        }
        groups.entry(cell).or_default().push(h);
    }
    if let Some(cell) = cells.live_indices().find(|c| !groups.contains_key(c)) {
        return Err(violation(EntityKind::Cell, cell, "has no half-edges"));
    }

    let mut cycles = IndexMap::with_capacity(groups.len());
    for (cell, members) in groups {
        if members.len() < 3 {
            return Err(violation(
                EntityKind::Cell,
                cell,
                format!("has {} half-edges, need at least 3", members.len()),
            ));
        }
        for &h in &members {
            let n = at(next, h);
            if is_valid(n) && !halfedges.is_live(n) {
                return Err(violation(
                    EntityKind::HalfEdge,
                    h,
                    format!("next {n} is not live"),
                ));
            }
            if is_valid(n) && !members.contains(&n) {
                return Err(violation(
                    EntityKind::HalfEdge,
                    h,
                    format!("next {n} belongs to another cell"),
                ));
            }
        }
        // The chain starts at the member nothing points to; a closed cycle
        // can start anywhere.
        let start = members
            .iter()
            .copied()
            .find(|&m| !members.iter().any(|&o| at(next, o) == m))
            .unwrap_or(members[0]);

        let mut cycle = Cycle::with_capacity(members.len());
        cycle.push(start);
        let mut current = start;
        while cycle.len() < members.len() {
            let n = at(next, current);
            if !is_valid(n) || cycle.contains(&n) {
                return Err(violation(
                    EntityKind::Cell,
                    cell,
                    format!("next chain from {start} stops after {} half-edges", cycle.len()),
                ));
            }
            cycle.push(n);
            current = n;
        }
        let tail = at(next, current);
        if is_valid(tail) && tail != start {
            return Err(violation(
                EntityKind::HalfEdge,
                current,
                format!("next {tail} re-enters the chain"),
            ));
        }
        cycles.insert(cell, cycle);
    }
    Ok(cycles)
}

/// Check the adjacency invariants of a finished mesh.
///
/// For every live half-edge `h`: its cell, node and edge are live; `next`
/// stays in the same cell and `previous[next[h]] == h`; if `opposite[h]`
/// is set, `opposite[opposite[h]] == h`, the twin runs the other way, and
/// both name the same edge. Each live cell's `next` cycle from its
/// representative visits exactly the cell's half-edges. Each live edge's
/// representative backs it, and the edge is backed by one half-edge or by
/// two that are each other's opposite, and each node's representative (if set) ends
/// at the node.
pub fn validate_topology(mesh: &HalfEdgeMesh) -> Result<(), MeshError> {
    let nodes = mesh.container::<Node>();
    let edges = mesh.container::<Edge>();
    let cells = mesh.container::<Cell>();
    let halfedges = mesh.container::<HalfEdge>();
    let next = mesh.next_halfedge();
    let prev = mesh.prev_halfedge();
    let oppo = mesh.oppo_halfedge();
    let h2c = mesh.halfedge_to_cell();
    let h2e = mesh.halfedge_to_edge();
    let h2n = mesh.halfedge_to_node();

    let he = |h, reason: String| violation(EntityKind::HalfEdge, h, reason);

    let mut per_cell: IndexMap<EntityIndex, usize> = IndexMap::new();
    let mut per_edge: IndexMap<EntityIndex, SmallVec<[EntityIndex; 2]>> = IndexMap::new();
    for h in halfedges.live_indices() {
        let cell = at(h2c, h);
        if !cells.is_live(cell) {
            return Err(he(h, format!("owning cell {cell} is not live")));
        }
        *per_cell.entry(cell).or_default() += 1;
        let node = at(h2n, h);
        if !nodes.is_live(node) {
            return Err(he(h, format!("head node {node} is not live")));
        }
        let edge = at(h2e, h);
        if !edges.is_live(edge) {
            return Err(he(h, format!("edge {edge} is not live")));
        }
        per_edge.entry(edge).or_default().push(h);
        let n = at(next, h);
        if !halfedges.is_live(n) || at(h2c, n) != cell {
            return Err(he(h, format!("next {n} is not a live half-edge of cell {cell}")));
        }
        if at(prev, n) != h {
            return Err(he(h, format!("previous of next {n} is {}", at(prev, n))));
        }
        let p = at(prev, h);
        if !halfedges.is_live(p) || at(h2c, p) != cell {
            return Err(he(h, format!("previous {p} is not a live half-edge of cell {cell}")));
        }
        let o = at(oppo, h);
        if is_valid(o) {
            if !halfedges.is_live(o) || at(oppo, o) != h {
                return Err(he(h, format!("opposite {o} does not point back")));
            }
            let tail = at(h2n, p);
            if at(h2n, o) != tail {
                return Err(he(h, format!("opposite {o} does not end at tail node {tail}")));
            }
            if at(h2e, o) != edge {
                return Err(he(h, format!("opposite {o} backs edge {}, not {edge}", at(h2e, o))));
            }
        }
    }

    let c2h = mesh.cell_halfedge();
    for cell in cells.live_indices() {
        let rep = at(c2h, cell);
        if !halfedges.is_live(rep) || at(h2c, rep) != cell {
            return Err(violation(
                EntityKind::Cell,
                cell,
                format!("representative {rep} is not one of its half-edges"),
            ));
        }
        let expected = per_cell.get(&cell).copied().unwrap_or(0);
        let mut steps = 1;
        let mut h = at(next, rep);
        while h != rep && steps <= expected {
            h = at(next, h);
            steps += 1;
        }
        if steps != expected {
            return Err(violation(
                EntityKind::Cell,
                cell,
                format!("next cycle visits {steps} of {expected} half-edges"),
            ));
        }
    }

    let e2h = mesh.edge_halfedge();
    for edge in edges.live_indices() {
        let rep = at(e2h, edge);
        if !halfedges.is_live(rep) || at(h2e, rep) != edge {
            return Err(violation(
                EntityKind::Edge,
                edge,
                format!("representative {rep} does not back it"),
            ));
        }
        let backing = per_edge.get(&edge).map_or(&[][..], |b| b.as_slice());
        match *backing {
            [_] => {}
            [a, b] if at(oppo, a) == b => {}
            [a, b] => {
                return Err(violation(
                    EntityKind::Edge,
                    edge,
                    format!("backed by half-edges {a} and {b}, which are not opposites"),
                ));
            }
            _ => {
                return Err(violation(
                    EntityKind::Edge,
                    edge,
                    format!("backed by {} half-edges, expected 1 or 2", backing.len()),
                ));
            }
        }
    }

    let n2h = mesh.node_halfedge();
    for node in nodes.live_indices() {
        let rep = at(n2h, node);
        if is_valid(rep) && (!halfedges.is_live(rep) || at(h2n, rep) != node) {
            return Err(violation(
                EntityKind::Node,
                node,
                format!("representative {rep} does not end at it"),
            ));
        }
    }
    Ok(())
}

/// Live half-edges without an opposite, in index order.
pub fn boundary_halfedges(mesh: &HalfEdgeMesh) -> impl Iterator<Item = EntityIndex> + '_ {
    let oppo = mesh.oppo_halfedge();
    mesh.container::<HalfEdge>()
        .live_indices()
        .filter(move |&h| !is_valid(at(oppo, h)))
}
