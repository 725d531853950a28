//! Per-kind entity storage: deletion marks plus named columns.
//!
//! An [`EntityDataContainer`] owns every attribute of one entity kind. The
//! columns live in an `IndexMap` keyed by name (registration order is
//! kept, so iteration and copies are deterministic) and are always the
//! same length as the mark array. An entity's index is its slot in all of
//! them.

use std::ops::Range;

use hemesh_arena::{
    ArenaConfig, ArenaError, ChunkArray, Column, ColumnElement, MarkArray, TombstonedArena,
    TombstonedArenaMut,
};
use hemesh_core::{EntityIndex, EntityKind, INVALID_INDEX};
use indexmap::IndexMap;

fn lookup<'c, T: ColumnElement>(
    columns: &'c IndexMap<String, Column>,
    kind: EntityKind,
    name: &str,
) -> Result<&'c ChunkArray<T>, ArenaError> {
    let column = columns.get(name).ok_or_else(|| ArenaError::UnknownColumn {
        kind,
        name: name.to_string(),
    })?;
    T::downcast_ref(column).ok_or_else(|| ArenaError::ColumnTypeMismatch {
        kind,
        name: name.to_string(),
        expected: T::TYPE,
        found: column.column_type(),
    })
}

fn lookup_mut<'c, T: ColumnElement>(
    columns: &'c mut IndexMap<String, Column>,
    kind: EntityKind,
    name: &str,
) -> Result<&'c mut ChunkArray<T>, ArenaError> {
    let column = columns
        .get_mut(name)
        .ok_or_else(|| ArenaError::UnknownColumn {
            kind,
            name: name.to_string(),
        })?;
    let found = column.column_type();
    T::downcast_mut(column).ok_or_else(|| ArenaError::ColumnTypeMismatch {
        kind,
        name: name.to_string(),
        expected: T::TYPE,
        found,
    })
}

/// Storage for every entity of one kind.
///
/// - Adding an entity appends one vacant slot to every column and a
///   cleared mark; the returned index is stable for the container's life.
/// - Deleting only sets the mark. Storage is kept and the index is never
///   handed out again.
/// - [`clear`](Self::clear) tombstones everything without freeing;
///   [`release`](Self::release) frees all blocks.
#[derive(Debug)]
pub struct EntityDataContainer {
    kind: EntityKind,
    config: ArenaConfig,
    marks: MarkArray,
    columns: IndexMap<String, Column>,
    live_count: usize,
}

impl EntityDataContainer {
    /// Create an empty container with the default arena config.
    pub fn new(kind: EntityKind) -> Self {
        Self::build(kind, ArenaConfig::default())
    }

    /// Create an empty container with a custom arena config.
    pub fn with_config(kind: EntityKind, config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::build(kind, config))
    }

    fn build(kind: EntityKind, config: ArenaConfig) -> Self {
        Self {
            kind,
            marks: MarkArray::new(&config),
            config,
            columns: IndexMap::new(),
            live_count: 0,
        }
    }

    /// The kind stored here.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The arena config shared by the marks and all columns.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// The deletion marks.
    pub fn marks(&self) -> &MarkArray {
        &self.marks
    }

    // ── Columns ─────────────────────────────────────────────────

    /// Register a column of element type `T`, sized to the current number
    /// of slots and filled with `T`'s vacant value.
    pub fn add_column<T: ColumnElement>(&mut self, name: &str) -> Result<(), ArenaError> {
        if self.columns.contains_key(name) {
            return Err(ArenaError::DuplicateColumn {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        let label = format!("{}.{name}", self.kind);
        let mut array = ChunkArray::<T>::with_config(label, &self.config);
        array.reserve(self.marks.len());
        for _ in 0..self.marks.len() {
            array.push(T::vacant());
        }
        self.columns.insert(name.to_string(), T::into_column(array));
        Ok(())
    }

    /// The column `name` as an array of `T`.
    ///
    /// # Panics
    ///
    /// Panics if no such column exists or it stores a different type.
    #[track_caller]
    pub fn column<T: ColumnElement>(&self, name: &str) -> &ChunkArray<T> {
        self.try_column(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Mutable access to the column `name`. Same contract as
    /// [`column`](Self::column).
    #[track_caller]
    pub fn column_mut<T: ColumnElement>(&mut self, name: &str) -> &mut ChunkArray<T> {
        self.try_column_mut(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Checked lookup of the column `name`.
    pub fn try_column<T: ColumnElement>(&self, name: &str) -> Result<&ChunkArray<T>, ArenaError> {
        lookup(&self.columns, self.kind, name)
    }

    /// Checked mutable lookup of the column `name`.
    pub fn try_column_mut<T: ColumnElement>(
        &mut self,
        name: &str,
    ) -> Result<&mut ChunkArray<T>, ArenaError> {
        lookup_mut(&mut self.columns, self.kind, name)
    }

    /// The column `name` bound to this container's marks.
    #[track_caller]
    pub fn live<T: ColumnElement>(&self, name: &str) -> TombstonedArena<'_, T> {
        TombstonedArena::new(self.column(name), &self.marks)
    }

    /// Mutable live view of the column `name`.
    #[track_caller]
    pub fn live_mut<T: ColumnElement>(&mut self, name: &str) -> TombstonedArenaMut<'_, T> {
        let data = lookup_mut(&mut self.columns, self.kind, name).unwrap_or_else(|e| panic!("{e}"));
        TombstonedArenaMut::new(data, &self.marks)
    }

    /// Whether a column named `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in registration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Number of registered columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    // ── Entities ────────────────────────────────────────────────

    /// Append one entity and return its index.
    ///
    /// # Panics
    ///
    /// Panics if the index space of [`EntityIndex`] is exhausted.
    pub fn add_entity(&mut self) -> EntityIndex {
        let slot = self.marks.push(false);
        assert!(
            slot < INVALID_INDEX as usize,
            "{} index space exhausted",
            self.kind
        );
        for column in self.columns.values_mut() {
            column.push_vacant();
        }
        self.live_count += 1;
        slot as EntityIndex
    }

    /// Append `count` entities; their indices form the returned range.
    pub fn add_entities(&mut self, count: usize) -> Range<EntityIndex> {
        let start = self.marks.len() as EntityIndex;
        self.reserve(self.marks.len() + count);
        for _ in 0..count {
            self.add_entity();
        }
        start..start + count as EntityIndex
    }

    /// Ensure every column and the marks can hold `capacity` slots.
    pub fn reserve(&mut self, capacity: usize) {
        self.marks.reserve(capacity);
        for column in self.columns.values_mut() {
            column.reserve(capacity);
        }
    }

    /// Tombstone entity `index`.
    ///
    /// Returns `true` if it was live, `false` if it was already deleted.
    ///
    /// # Panics
    ///
    /// Panics if `index` was never allocated.
    #[track_caller]
    pub fn delete_entity(&mut self, index: EntityIndex) -> bool {
        let slot = index as usize;
        assert!(
            slot < self.marks.len(),
            "{} {index} out of range ({} slots)",
            self.kind,
            self.marks.len()
        );
        if self.marks.is_deleted(slot) {
            return false;
        }
        self.marks.set_deleted(slot);
        self.live_count -= 1;
        true
    }

    /// Whether `index` is an allocated, non-deleted entity.
    pub fn is_live(&self, index: EntityIndex) -> bool {
        let slot = index as usize;
        slot < self.marks.len() && !self.marks.is_deleted(slot)
    }

    /// Number of live entities.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Number of slots ever allocated, deleted ones included.
    pub fn raw_len(&self) -> usize {
        self.marks.len()
    }

    /// Whether there are no live entities.
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Indices of the live entities in index order.
    pub fn live_indices(&self) -> impl Iterator<Item = EntityIndex> + '_ {
        (0..self.marks.len())
            .filter(move |&slot| !self.marks.is_deleted(slot))
            .map(|slot| slot as EntityIndex)
    }

    // ── Whole-container operations ──────────────────────────────

    /// Tombstone every entity. Storage is kept.
    pub fn clear(&mut self) {
        self.marks.fill(true);
        self.live_count = 0;
    }

    /// Drop every entity and free all blocks. Columns stay registered.
    pub fn release(&mut self) {
        self.marks.release();
        for column in self.columns.values_mut() {
            column.release();
        }
        self.live_count = 0;
    }

    /// Replace this container with a deep copy of `other`: marks first,
    /// then each column copies itself.
    pub fn copy_from(&mut self, other: &Self) {
        self.kind = other.kind;
        self.config = other.config.clone();
        self.marks.copy_from(&other.marks);
        self.columns = other
            .columns
            .iter()
            .map(|(name, column)| (name.clone(), column.copy_self()))
            .collect();
        self.live_count = other.live_count;
    }

    /// Bytes held by the marks and every column.
    pub fn memory_bytes(&self) -> usize {
        self.marks.memory_bytes() + self.columns.values().map(Column::memory_bytes).sum::<usize>()
    }
}

impl Clone for EntityDataContainer {
    fn clone(&self) -> Self {
        let mut copy = Self::build(self.kind, self.config.clone());
        copy.copy_from(self);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemesh_core::Point;
    use proptest::prelude::*;

    fn container() -> EntityDataContainer {
        let mut c = EntityDataContainer::with_config(EntityKind::Node, ArenaConfig::new(32)).unwrap();
        c.add_column::<Point>("coordinate").unwrap();
        c.add_column::<EntityIndex>("halfedge").unwrap();
        c
    }

    #[test]
    fn add_entity_grows_every_column() {
        let mut c = container();
        assert_eq!(c.add_entity(), 0);
        assert_eq!(c.add_entity(), 1);
        assert_eq!(c.column::<Point>("coordinate").len(), 2);
        assert_eq!(c.column::<EntityIndex>("halfedge").len(), 2);
        assert_eq!(c.column::<EntityIndex>("halfedge")[1], INVALID_INDEX);
        assert_eq!(c.live_count(), 2);
    }

    #[test]
    fn late_column_is_sized_to_existing_slots() {
        let mut c = container();
        c.add_entities(5);
        c.add_column::<f64>("weight").unwrap();
        assert_eq!(c.column::<f64>("weight").len(), 5);
        assert_eq!(c.column::<f64>("weight")[4], 0.0);
    }

    #[test]
    fn add_entities_returns_contiguous_range() {
        let mut c = container();
        c.add_entity();
        let range = c.add_entities(3);
        assert_eq!(range, 1..4);
        assert_eq!(c.raw_len(), 4);
    }

    #[test]
    fn duplicate_column_rejected() {
        let mut c = container();
        let err = c.add_column::<f64>("coordinate").unwrap_err();
        assert!(matches!(err, ArenaError::DuplicateColumn { .. }));
    }

    #[test]
    fn try_column_reports_unknown_and_mismatch() {
        let c = container();
        assert!(matches!(
            c.try_column::<f64>("missing"),
            Err(ArenaError::UnknownColumn { .. })
        ));
        let err = c.try_column::<f64>("coordinate").unwrap_err();
        assert_eq!(
            err,
            ArenaError::ColumnTypeMismatch {
                kind: EntityKind::Node,
                name: "coordinate".into(),
                expected: hemesh_arena::ColumnType::Scalar,
                found: hemesh_arena::ColumnType::Point,
            }
        );
    }

    #[test]
    #[should_panic(expected = "stores point")]
    fn column_with_wrong_type_panics() {
        let c = container();
        let _ = c.column::<EntityIndex>("coordinate");
    }

    #[test]
    fn delete_tombstones_without_shrinking() {
        let mut c = container();
        c.add_entities(3);
        assert!(c.delete_entity(1));
        assert_eq!(c.live_count(), 2);
        assert_eq!(c.raw_len(), 3);
        assert!(!c.is_live(1));
        assert_eq!(c.live_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(c.live::<Point>("coordinate").indices().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn double_delete_is_noop() {
        let mut c = container();
        c.add_entity();
        assert!(c.delete_entity(0));
        assert!(!c.delete_entity(0));
        assert_eq!(c.live_count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn delete_unallocated_panics() {
        let mut c = container();
        c.delete_entity(0);
    }

    #[test]
    fn deleted_index_is_not_reused() {
        let mut c = container();
        c.add_entities(2);
        c.delete_entity(1);
        assert_eq!(c.add_entity(), 2);
        assert!(!c.is_live(1));
    }

    #[test]
    fn clear_tombstones_all_and_keeps_storage() {
        let mut c = container();
        c.add_entities(40);
        let bytes = c.memory_bytes();
        c.clear();
        assert_eq!(c.live_count(), 0);
        assert_eq!(c.live_indices().count(), 0);
        assert_eq!(c.memory_bytes(), bytes);
        let next = c.add_entity();
        assert_eq!(next, 40);
        assert!(c.is_live(next));
        assert_eq!(c.live_indices().collect::<Vec<_>>(), vec![40]);
    }

    #[test]
    fn release_frees_storage_and_keeps_columns() {
        let mut c = container();
        c.add_entities(40);
        c.release();
        assert_eq!(c.raw_len(), 0);
        assert_eq!(c.memory_bytes(), 0);
        assert!(c.has_column("coordinate"));
        assert_eq!(c.add_entity(), 0);
    }

    #[test]
    fn live_mut_updates_only_live_entities() {
        let mut c = container();
        c.add_entities(3);
        c.delete_entity(0);
        for p in c.live_mut::<Point>("coordinate").iter_mut() {
            *p = Point::new(1.0, 1.0);
        }
        let coords = c.column::<Point>("coordinate");
        assert_eq!(coords[0], Point::ZERO);
        assert_eq!(coords[2], Point::new(1.0, 1.0));
    }

    #[test]
    fn column_names_keep_registration_order() {
        let c = container();
        assert_eq!(c.column_names().collect::<Vec<_>>(), vec!["coordinate", "halfedge"]);
        assert_eq!(c.column::<Point>("coordinate").name(), "node.coordinate");
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(EntityDataContainer::with_config(EntityKind::Cell, ArenaConfig::new(48)).is_err());
    }

    proptest! {
        #[test]
        fn deleting_one_entity_excludes_exactly_it(n in 1usize..150, pick in 0usize..150) {
            let mut c = container();
            c.add_entities(n);
            let victim = (pick % n) as EntityIndex;
            let before: Vec<_> = c.live_indices().collect();
            prop_assert!(c.delete_entity(victim));
            let after: Vec<_> = c.live_indices().collect();
            let expected: Vec<_> = before.into_iter().filter(|&i| i != victim).collect();
            prop_assert_eq!(after, expected);
            prop_assert_eq!(c.live_count(), n - 1);
            prop_assert_eq!(c.add_entity() as usize, n);
        }

        #[test]
        fn copy_matches_source_and_is_independent(
            n in 1usize..100,
            deletes in proptest::collection::vec(0usize..100, 0..20),
        ) {
            let mut c = container();
            c.add_entities(n);
            for i in 0..n {
                c.column_mut::<Point>("coordinate")[i] = Point::new(i as f64, -(i as f64));
                c.column_mut::<EntityIndex>("halfedge")[i] = (i * 2) as EntityIndex;
            }
            for d in deletes {
                c.delete_entity((d % n) as EntityIndex);
            }
            let mut copy = c.clone();
            prop_assert_eq!(copy.live_count(), c.live_count());
            prop_assert_eq!(copy.marks().iter().collect::<Vec<_>>(), c.marks().iter().collect::<Vec<_>>());
            for i in c.live_indices() {
                let i = i as usize;
                prop_assert_eq!(copy.column::<Point>("coordinate")[i], c.column::<Point>("coordinate")[i]);
                prop_assert_eq!(copy.column::<EntityIndex>("halfedge")[i], c.column::<EntityIndex>("halfedge")[i]);
            }
            copy.column_mut::<EntityIndex>("halfedge")[0] = 12345;
            copy.add_entity();
            prop_assert_eq!(c.column::<EntityIndex>("halfedge")[0], 0);
            prop_assert_eq!(c.raw_len(), n);
        }
    }
}
