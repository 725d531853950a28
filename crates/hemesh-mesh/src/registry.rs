//! The four entity containers of a mesh, addressed by kind.

use std::mem;

use hemesh_arena::{ArenaConfig, ArenaError};
use hemesh_core::{Entity, EntityKind};

use crate::container::EntityDataContainer;

/// One [`EntityDataContainer`] per [`EntityKind`].
///
/// The set of kinds is closed, so each container is a plain field and
/// lookup by kind is a `match`. Generic lookup through a marker type
/// (`registry.of::<Cell>()`) resolves to the same branch at compile time.
#[derive(Clone, Debug)]
pub struct EntityRegistry {
    nodes: EntityDataContainer,
    edges: EntityDataContainer,
    cells: EntityDataContainer,
    halfedges: EntityDataContainer,
}

/// Simultaneous mutable borrows of all four containers.
#[derive(Debug)]
pub struct ContainersMut<'a> {
    /// Node container.
    pub nodes: &'a mut EntityDataContainer,
    /// Edge container.
    pub edges: &'a mut EntityDataContainer,
    /// Cell container.
    pub cells: &'a mut EntityDataContainer,
    /// Half-edge container.
    pub halfedges: &'a mut EntityDataContainer,
}

impl EntityRegistry {
    /// Four empty containers with the default arena config.
    pub fn new() -> Self {
        Self {
            nodes: EntityDataContainer::new(EntityKind::Node),
            edges: EntityDataContainer::new(EntityKind::Edge),
            cells: EntityDataContainer::new(EntityKind::Cell),
            halfedges: EntityDataContainer::new(EntityKind::HalfEdge),
        }
    }

    /// Four empty containers sharing `config`.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self {
            nodes: EntityDataContainer::with_config(EntityKind::Node, config.clone())?,
            edges: EntityDataContainer::with_config(EntityKind::Edge, config.clone())?,
            cells: EntityDataContainer::with_config(EntityKind::Cell, config.clone())?,
            halfedges: EntityDataContainer::with_config(EntityKind::HalfEdge, config)?,
        })
    }

    /// The container for `kind`.
    pub fn get(&self, kind: EntityKind) -> &EntityDataContainer {
        match kind {
            EntityKind::Node => &self.nodes,
            EntityKind::Edge => &self.edges,
            EntityKind::Cell => &self.cells,
            EntityKind::HalfEdge => &self.halfedges,
        }
    }

    /// Mutable container for `kind`.
    pub fn get_mut(&mut self, kind: EntityKind) -> &mut EntityDataContainer {
        match kind {
            EntityKind::Node => &mut self.nodes,
            EntityKind::Edge => &mut self.edges,
            EntityKind::Cell => &mut self.cells,
            EntityKind::HalfEdge => &mut self.halfedges,
        }
    }

    /// The container for marker type `E`.
    pub fn of<E: Entity>(&self) -> &EntityDataContainer {
        self.get(E::KIND)
    }

    /// Mutable container for marker type `E`.
    pub fn of_mut<E: Entity>(&mut self) -> &mut EntityDataContainer {
        self.get_mut(E::KIND)
    }

    /// `(kind, container)` pairs in [`EntityKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &EntityDataContainer)> + '_ {
        EntityKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Borrow all four containers mutably at once.
    pub fn split_mut(&mut self) -> ContainersMut<'_> {
        ContainersMut {
            nodes: &mut self.nodes,
            edges: &mut self.edges,
            cells: &mut self.cells,
            halfedges: &mut self.halfedges,
        }
    }

    /// Exchange every container with `other`. No element is copied.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Tombstone every entity of every kind.
    pub fn clear(&mut self) {
        for kind in EntityKind::ALL {
            self.get_mut(kind).clear();
        }
    }

    /// Free the storage of every container.
    pub fn release(&mut self) {
        for kind in EntityKind::ALL {
            self.get_mut(kind).release();
        }
    }

    /// Deep copy of all four containers of `other`.
    pub fn copy_from(&mut self, other: &Self) {
        for kind in EntityKind::ALL {
            self.get_mut(kind).copy_from(other.get(kind));
        }
    }

    /// Bytes held by all containers.
    pub fn memory_bytes(&self) -> usize {
        self.iter().map(|(_, c)| c.memory_bytes()).sum()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemesh_core::{Cell, HalfEdge, Node};

    #[test]
    fn lookup_by_kind_and_marker_agree() {
        let mut r = EntityRegistry::new();
        r.of_mut::<Cell>().add_entity();
        assert_eq!(r.get(EntityKind::Cell).live_count(), 1);
        assert_eq!(r.of::<Cell>().kind(), EntityKind::Cell);
        assert_eq!(r.of::<Node>().live_count(), 0);
    }

    #[test]
    fn iter_follows_registry_order() {
        let r = EntityRegistry::new();
        let kinds: Vec<_> = r.iter().map(|(k, c)| (k, c.kind())).collect();
        assert_eq!(
            kinds,
            EntityKind::ALL.iter().map(|&k| (k, k)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn swap_exchanges_every_container() {
        let mut a = EntityRegistry::new();
        let mut b = EntityRegistry::new();
        a.of_mut::<Node>().add_entities(3);
        b.of_mut::<HalfEdge>().add_entities(5);
        a.swap(&mut b);
        assert_eq!(a.of::<Node>().live_count(), 0);
        assert_eq!(a.of::<HalfEdge>().live_count(), 5);
        assert_eq!(b.of::<Node>().live_count(), 3);
        assert_eq!(b.of::<HalfEdge>().live_count(), 0);
    }

    #[test]
    fn split_mut_borrows_disjoint_containers() {
        let mut r = EntityRegistry::new();
        let c = r.split_mut();
        c.nodes.add_entity();
        c.cells.add_entity();
        c.cells.add_entity();
        assert_eq!(r.of::<Node>().live_count(), 1);
        assert_eq!(r.of::<Cell>().live_count(), 2);
    }

    #[test]
    fn clear_and_release_reach_all_kinds() {
        let mut r = EntityRegistry::with_config(ArenaConfig::new(32)).unwrap();
        for kind in EntityKind::ALL {
            r.get_mut(kind).add_entities(4);
        }
        r.clear();
        assert!(r.iter().all(|(_, c)| c.live_count() == 0 && c.raw_len() == 4));
        r.release();
        assert!(r.iter().all(|(_, c)| c.raw_len() == 0));
        assert_eq!(r.memory_bytes(), 0);
    }
}
