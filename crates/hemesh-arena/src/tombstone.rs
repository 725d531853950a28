//! Live views over a column: a [`ChunkArray`] bound to its kind's marks.
//!
//! The entity container owns the [`MarkArray`] and builds these views on
//! demand, so every column of a kind is always read through the same
//! authoritative set of marks.

use hemesh_core::EntityIndex;

use crate::chunk::ChunkArray;
use crate::mark::MarkArray;

#[inline]
fn is_live(marks: &MarkArray, index: usize) -> bool {
    index >= marks.len() || !marks.is_deleted(index)
}

/// Read-only column view that skips deleted slots when iterating.
///
/// Indexed access through [`get`](Self::get) does not consult the marks.
#[derive(Clone, Copy, Debug)]
pub struct TombstonedArena<'a, T> {
    data: &'a ChunkArray<T>,
    marks: &'a MarkArray,
}

impl<'a, T: Copy + Default> TombstonedArena<'a, T> {
    /// Bind `data` to `marks`.
    pub fn new(data: &'a ChunkArray<T>, marks: &'a MarkArray) -> Self {
        Self { data, marks }
    }

    /// Element `index`, live or not.
    #[track_caller]
    pub fn get(&self, index: usize) -> &'a T {
        self.data.get(index)
    }

    /// Whether slot `index` is live.
    pub fn is_live(&self, index: usize) -> bool {
        is_live(self.marks, index)
    }

    /// Values of the live slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.iter_indexed().map(|(_, value)| value)
    }

    /// `(index, value)` pairs of the live slots in index order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (EntityIndex, &'a T)> + 'a {
        let (data, marks) = (self.data, self.marks);
        data.iter()
            .enumerate()
            .filter(move |&(i, _)| is_live(marks, i))
            .map(|(i, value)| (i as EntityIndex, value))
    }

    /// Indices of the live slots in index order.
    pub fn indices(&self) -> impl Iterator<Item = EntityIndex> + 'a {
        self.iter_indexed().map(|(i, _)| i)
    }

    /// Number of live slots.
    pub fn live_len(&self) -> usize {
        self.iter_indexed().count()
    }

    /// The underlying array.
    pub fn raw(&self) -> &'a ChunkArray<T> {
        self.data
    }
}

/// Mutable column view that skips deleted slots when iterating.
#[derive(Debug)]
pub struct TombstonedArenaMut<'a, T> {
    data: &'a mut ChunkArray<T>,
    marks: &'a MarkArray,
}

impl<'a, T: Copy + Default> TombstonedArenaMut<'a, T> {
    /// Bind `data` to `marks`.
    pub fn new(data: &'a mut ChunkArray<T>, marks: &'a MarkArray) -> Self {
        Self { data, marks }
    }

    /// Element `index`, live or not.
    #[track_caller]
    pub fn get(&self, index: usize) -> &T {
        self.data.get(index)
    }

    /// Overwrite element `index`, live or not.
    #[track_caller]
    pub fn set(&mut self, index: usize, value: T) {
        self.data.set(index, value);
    }

    /// Whether slot `index` is live.
    pub fn is_live(&self, index: usize) -> bool {
        is_live(self.marks, index)
    }

    /// Shared iteration over the live slots.
    pub fn iter<'s>(&'s self) -> impl Iterator<Item = &'s T> + 's {
        let marks: &'s MarkArray = self.marks;
        self.data
            .iter()
            .enumerate()
            .filter(move |&(i, _)| is_live(marks, i))
            .map(|(_, value)| value)
    }

    /// Mutable values of the live slots in index order.
    pub fn iter_mut<'s>(&'s mut self) -> impl Iterator<Item = &'s mut T> + 's {
        self.iter_indexed_mut().map(|(_, value)| value)
    }

    /// `(index, value)` pairs of the live slots, mutable.
    pub fn iter_indexed_mut<'s>(
        &'s mut self,
    ) -> impl Iterator<Item = (EntityIndex, &'s mut T)> + 's {
        let marks: &'s MarkArray = self.marks;
        self.data
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| is_live(marks, *i))
            .map(|(i, value)| (i as EntityIndex, value))
    }

    /// Downgrade to a read-only view.
    pub fn as_view(&self) -> TombstonedArena<'_, T> {
        TombstonedArena::new(self.data, self.marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    fn setup(n: u32) -> (ChunkArray<u32>, MarkArray) {
        let config = ArenaConfig::new(32);
        let mut data = ChunkArray::with_config("value", &config);
        let mut marks = MarkArray::new(&config);
        for i in 0..n {
            data.push(i * 10);
            marks.push(false);
        }
        (data, marks)
    }

    #[test]
    fn iteration_skips_deleted_slots() {
        let (data, mut marks) = setup(5);
        marks.set_deleted(0);
        marks.set_deleted(3);
        let view = TombstonedArena::new(&data, &marks);
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![10, 20, 40]);
        assert_eq!(view.indices().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(view.live_len(), 3);
    }

    #[test]
    fn iteration_is_restartable() {
        let (data, mut marks) = setup(4);
        marks.set_deleted(2);
        let view = TombstonedArena::new(&data, &marks);
        let first: Vec<_> = view.iter().collect();
        let second: Vec<_> = view.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn indexed_get_ignores_marks() {
        let (data, mut marks) = setup(3);
        marks.set_deleted(1);
        let view = TombstonedArena::new(&data, &marks);
        assert_eq!(*view.get(1), 10);
        assert!(!view.is_live(1));
    }

    #[test]
    fn iter_mut_touches_only_live_slots() {
        let (mut data, mut marks) = setup(4);
        marks.set_deleted(1);
        {
            let mut view = TombstonedArenaMut::new(&mut data, &marks);
            for v in view.iter_mut() {
                *v += 1;
            }
            assert_eq!(view.iter().count(), 3);
        }
        assert_eq!(data.iter().copied().collect::<Vec<_>>(), vec![1, 10, 21, 31]);
    }

    #[test]
    fn slots_beyond_marks_count_as_live() {
        let (mut data, marks) = setup(2);
        data.push(99);
        let view = TombstonedArena::new(&data, &marks);
        assert_eq!(view.live_len(), 3);
    }
}
