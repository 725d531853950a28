//! The half-edge mesh: canonical columns and incidence construction.

use hemesh_arena::{ArenaConfig, ChunkArray, ColumnElement};
use hemesh_core::{Cell, Edge, Entity, EntityIndex, EntityKind, HalfEdge, Node, Point};

use crate::container::EntityDataContainer;
use crate::error::MeshError;
use crate::registry::EntityRegistry;

/// Names of the columns every mesh registers.
pub mod columns {
    /// Node position (`Point`).
    pub const COORDINATE: &str = "coordinate";
    /// Representative half-edge of a node, edge, or cell.
    pub const HALFEDGE: &str = "halfedge";
    /// Next half-edge around the owning cell.
    pub const NEXT: &str = "next";
    /// Previous half-edge around the owning cell.
    pub const PREVIOUS: &str = "previous";
    /// Oppositely directed half-edge of the neighbouring cell.
    pub const OPPOSITE: &str = "opposite";
    /// Owning cell of a half-edge.
    pub const CELL: &str = "cell";
    /// Edge backed by a half-edge.
    pub const EDGE: &str = "edge";
    /// Head node of a half-edge.
    pub const NODE: &str = "node";
}

/// A 2D polygonal mesh stored as four tombstoned entity containers.
///
/// Every link between entities is an [`EntityIndex`] held in a named
/// column, so a deep copy is a plain copy of the containers.
///
/// A half-edge's `node` is its head; its tail is `node[previous[h]]` once
/// [`finish_topology`](crate::finish_topology) has set `previous`.
#[derive(Clone, Debug)]
pub struct HalfEdgeMesh {
    entities: EntityRegistry,
}

macro_rules! column_accessors {
    ($( $(#[$doc:meta])* $get:ident, $get_mut:ident => $kind:ty, $column:expr, $elem:ty; )*) => {
        $(
            $(#[$doc])*
            pub fn $get(&self) -> &ChunkArray<$elem> {
                self.container::<$kind>().column($column)
            }

            #[doc = concat!("Mutable form of [`", stringify!($get), "`](Self::", stringify!($get), ").")]
            pub fn $get_mut(&mut self) -> &mut ChunkArray<$elem> {
                self.container_mut::<$kind>().column_mut($column)
            }
        )*
    };
}

impl HalfEdgeMesh {
    /// Empty mesh with the default arena config.
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
            .expect("default config and canonical columns are always valid")
    }

    /// Empty mesh whose containers use `config`.
    pub fn with_config(config: ArenaConfig) -> Result<Self, MeshError> {
        let mut entities = EntityRegistry::with_config(config)?;
        let c = entities.split_mut();
        c.nodes.add_column::<Point>(columns::COORDINATE)?;
        c.nodes.add_column::<EntityIndex>(columns::HALFEDGE)?;
        c.edges.add_column::<EntityIndex>(columns::HALFEDGE)?;
        c.cells.add_column::<EntityIndex>(columns::HALFEDGE)?;
        for name in [
            columns::NEXT,
            columns::PREVIOUS,
            columns::OPPOSITE,
            columns::CELL,
            columns::EDGE,
            columns::NODE,
        ] {
            c.halfedges.add_column::<EntityIndex>(name)?;
        }
        Ok(Self { entities })
    }

    /// Build a mesh from node coordinates and fixed-valence cell incidence.
    ///
    /// `coords` holds `x, y` per node; `cells` holds `vertices_per_cell`
    /// node indices per cell, in boundary order.
    ///
    /// Nodes, cells and half-edges are appended in input order. Each
    /// half-edge gets its `node` from the incidence entry and its `cell`
    /// from the cell being built; consecutive half-edges of a cell are
    /// linked through `next`, and the cell's representative is its last
    /// half-edge.
    ///
    /// The `next` chain of each cell is left open (the last half-edge's
    /// `next` is [`INVALID_INDEX`](hemesh_core::INVALID_INDEX)), and
    /// `previous`, `opposite` and `edge` stay unset. Those are the job of
    /// [`finish_topology`](crate::finish_topology).
    pub fn from_incidence(
        coords: &[f64],
        cells: &[EntityIndex],
        node_count: usize,
        cell_count: usize,
        vertices_per_cell: usize,
    ) -> Result<Self, MeshError> {
        Self::from_incidence_with_config(
            ArenaConfig::default(),
            coords,
            cells,
            node_count,
            cell_count,
            vertices_per_cell,
        )
    }

    /// [`from_incidence`](Self::from_incidence) with a custom arena config.
    pub fn from_incidence_with_config(
        config: ArenaConfig,
        coords: &[f64],
        cells: &[EntityIndex],
        node_count: usize,
        cell_count: usize,
        vertices_per_cell: usize,
    ) -> Result<Self, MeshError> {
        // Counts too large to multiply saturate, so they can never match a
        // real slice length.
        let expected_coords = node_count.checked_mul(2).unwrap_or(usize::MAX);
        if coords.len() != expected_coords {
            return Err(MeshError::CoordinateLength {
                node_count,
                expected: expected_coords,
                actual: coords.len(),
            });
        }
        if vertices_per_cell < 3 {
            return Err(MeshError::InvalidValence { vertices_per_cell });
        }
        let halfedge_count = cell_count.checked_mul(vertices_per_cell).unwrap_or(usize::MAX);
        if cells.len() != halfedge_count {
            return Err(MeshError::IncidenceLength {
                expected: halfedge_count,
                actual: cells.len(),
            });
        }
        if let Some(k) = cells.iter().position(|&n| n as usize >= node_count) {
            return Err(MeshError::NodeOutOfRange {
                cell: k / vertices_per_cell,
                node: cells[k],
                node_count,
            });
        }

        let mut mesh = Self::with_config(config)?;
        let c = mesh.entities.split_mut();

        let node_ids = c.nodes.add_entities(node_count);
        let coordinate = c.nodes.column_mut::<Point>(columns::COORDINATE);
        for (node, xy) in node_ids.zip(coords.chunks_exact(2)) {
            coordinate[node as usize] = Point::new(xy[0], xy[1]);
        }

        let cell_ids = c.cells.add_entities(cell_count);
        let he_ids = c.halfedges.add_entities(halfedge_count);

        let h2n = c.halfedges.column_mut::<EntityIndex>(columns::NODE);
        for (h, &node) in he_ids.clone().zip(cells) {
            h2n[h as usize] = node;
        }

        let h2c = c.halfedges.column_mut::<EntityIndex>(columns::CELL);
        for (k, h) in he_ids.clone().enumerate() {
            h2c[h as usize] = cell_ids.start + (k / vertices_per_cell) as EntityIndex;
        }

        let next = c.halfedges.column_mut::<EntityIndex>(columns::NEXT);
        for (k, h) in he_ids.clone().enumerate() {
            if (k + 1) % vertices_per_cell != 0 {
                next[h as usize] = h + 1;
            }
        }

        let c2h = c.cells.column_mut::<EntityIndex>(columns::HALFEDGE);
        for (i, cell) in cell_ids.enumerate() {
            c2h[cell as usize] = he_ids.start + ((i + 1) * vertices_per_cell - 1) as EntityIndex;
        }

        log::debug!(
            "built mesh from incidence: {node_count} nodes, {cell_count} cells, \
             {halfedge_count} half-edges ({vertices_per_cell} per cell)"
        );
        Ok(mesh)
    }

    // ── Counts ──────────────────────────────────────────────────

    /// Number of live entities of kind `E`.
    pub fn number_of<E: Entity>(&self) -> usize {
        self.count(E::KIND)
    }

    /// Number of live entities of `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.get(kind).live_count()
    }

    /// `2 * edges - halfedges`, clamped at zero.
    ///
    /// Exact only for a manifold mesh whose interior edges back two
    /// half-edges and boundary edges one, i.e. after the finishing pass.
    pub fn number_of_boundary_edges(&self) -> usize {
        (2 * self.number_of::<Edge>()).saturating_sub(self.number_of::<HalfEdge>())
    }

    // ── Entities ────────────────────────────────────────────────

    /// Append one entity of kind `E`; its slots hold vacant values.
    pub fn add_entity<E: Entity>(&mut self) -> EntityIndex {
        self.entities.of_mut::<E>().add_entity()
    }

    /// Tombstone entity `index` of kind `E`. Links pointing at it are left
    /// alone.
    ///
    /// # Panics
    ///
    /// Panics if `index` was never allocated.
    #[track_caller]
    pub fn delete_entity<E: Entity>(&mut self, index: EntityIndex) -> bool {
        self.entities.of_mut::<E>().delete_entity(index)
    }

    /// Container of kind `E`.
    pub fn container<E: Entity>(&self) -> &EntityDataContainer {
        self.entities.of::<E>()
    }

    /// Mutable container of kind `E`, e.g. to register extra columns.
    pub fn container_mut<E: Entity>(&mut self) -> &mut EntityDataContainer {
        self.entities.of_mut::<E>()
    }

    /// All four containers.
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// All four containers, mutable.
    pub fn entities_mut(&mut self) -> &mut EntityRegistry {
        &mut self.entities
    }

    /// Column `name` of kind `E` as an array of `T`.
    #[track_caller]
    pub fn column<E: Entity, T: ColumnElement>(&self, name: &str) -> &ChunkArray<T> {
        self.container::<E>().column(name)
    }

    /// Mutable column `name` of kind `E`.
    #[track_caller]
    pub fn column_mut<E: Entity, T: ColumnElement>(&mut self, name: &str) -> &mut ChunkArray<T> {
        self.container_mut::<E>().column_mut(name)
    }

    // ── Canonical columns ───────────────────────────────────────

    column_accessors! {
        /// Node positions.
        node_coordinate, node_coordinate_mut => Node, columns::COORDINATE, Point;
        /// Representative half-edge of each node (an incoming one).
        node_halfedge, node_halfedge_mut => Node, columns::HALFEDGE, EntityIndex;
        /// Representative half-edge of each edge.
        edge_halfedge, edge_halfedge_mut => Edge, columns::HALFEDGE, EntityIndex;
        /// Representative half-edge of each cell.
        cell_halfedge, cell_halfedge_mut => Cell, columns::HALFEDGE, EntityIndex;
        /// `next` link of each half-edge.
        next_halfedge, next_halfedge_mut => HalfEdge, columns::NEXT, EntityIndex;
        /// `previous` link of each half-edge.
        prev_halfedge, prev_halfedge_mut => HalfEdge, columns::PREVIOUS, EntityIndex;
        /// `opposite` link of each half-edge.
        oppo_halfedge, oppo_halfedge_mut => HalfEdge, columns::OPPOSITE, EntityIndex;
        /// Owning cell of each half-edge.
        halfedge_to_cell, halfedge_to_cell_mut => HalfEdge, columns::CELL, EntityIndex;
        /// Edge backed by each half-edge.
        halfedge_to_edge, halfedge_to_edge_mut => HalfEdge, columns::EDGE, EntityIndex;
        /// Head node of each half-edge.
        halfedge_to_node, halfedge_to_node_mut => HalfEdge, columns::NODE, EntityIndex;
    }

    // ── Whole mesh ──────────────────────────────────────────────

    /// Tombstone every entity. Storage and indices are kept; new entities
    /// get fresh indices.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Drop every entity and free all storage.
    pub fn release(&mut self) {
        let bytes = self.entities.memory_bytes();
        self.entities.release();
        log::debug!("released mesh storage ({bytes} bytes)");
    }

    /// Exchange contents with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.entities.swap(&mut other.entities);
    }

    /// Replace this mesh with a deep copy of `other`.
    pub fn copy_from(&mut self, other: &Self) {
        self.entities.copy_from(&other.entities);
    }

    /// Bytes held by all containers.
    pub fn memory_bytes(&self) -> usize {
        self.entities.memory_bytes()
    }
}

impl Default for HalfEdgeMesh {
    fn default() -> Self {
        Self::new()
    }
}
