//! Bit-packed deletion marks.
//!
//! One [`MarkArray`] per entity kind records which slots are tombstoned.
//! Marks are packed 32 to a `u32` word, and the words live in a
//! [`ChunkArray`] so the mark storage grows in blocks exactly like the
//! columns it describes.

use crate::chunk::{check_index, ChunkArray};
use crate::config::ArenaConfig;

/// Growable sequence of deletion flags, `true` meaning deleted.
#[derive(Clone, Debug)]
pub struct MarkArray {
    words: ChunkArray<u32>,
    len: usize,
}

impl MarkArray {
    /// Marks stored per word.
    pub const BITS_PER_WORD: usize = 32;

    /// Create an empty mark array whose blocks cover `config.chunk_size`
    /// marks each.
    ///
    /// # Panics
    ///
    /// Panics if the config does not pass [`ArenaConfig::validate`].
    pub fn new(config: &ArenaConfig) -> Self {
        assert!(
            config.chunk_size >= Self::BITS_PER_WORD,
            "chunk_size ({}) smaller than a mark word",
            config.chunk_size
        );
        Self {
            words: ChunkArray::with_chunk_size("mark", config.chunk_size / Self::BITS_PER_WORD),
            len: 0,
        }
    }

    #[inline]
    fn split(index: usize) -> (usize, u32) {
        (index / Self::BITS_PER_WORD, 1u32 << (index % Self::BITS_PER_WORD))
    }

    /// Append one mark, returning its index.
    pub fn push(&mut self, deleted: bool) -> usize {
        let index = self.len;
        let (word, _) = Self::split(index);
        if word >= self.words.len() {
            self.words.push(0);
        }
        self.len += 1;
        self.set(index, deleted);
        index
    }

    /// Whether slot `index` is deleted.
    ///
    /// # Panics
    ///
    /// Same index contract as [`ChunkArray::get`].
    #[inline]
    #[track_caller]
    pub fn is_deleted(&self, index: usize) -> bool {
        check_index(index, self.len, "mark");
        let (word, bit) = Self::split(index);
        self.words[word] & bit != 0
    }

    /// Set slot `index` to `deleted`.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, index: usize, deleted: bool) {
        check_index(index, self.len, "mark");
        let (word, bit) = Self::split(index);
        let w = &mut self.words[word];
        if deleted {
            *w |= bit;
        } else {
            *w &= !bit;
        }
    }

    /// Mark slot `index` deleted.
    #[track_caller]
    pub fn set_deleted(&mut self, index: usize) {
        self.set(index, true);
    }

    /// Mark slot `index` live.
    #[track_caller]
    pub fn set_live(&mut self, index: usize) {
        self.set(index, false);
    }

    /// Set every allocated mark, including those past `len`.
    pub fn fill(&mut self, deleted: bool) {
        self.words.fill(if deleted { u32::MAX } else { 0 });
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no marks.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the number of marks.
    ///
    /// Like [`ChunkArray::resize`], growing within the allocated words
    /// exposes the previous flag values.
    pub fn resize(&mut self, len: usize) {
        self.words.resize(len.div_ceil(Self::BITS_PER_WORD));
        self.len = len;
    }

    /// Ensure word storage for `capacity` marks.
    pub fn reserve(&mut self, capacity: usize) {
        self.words.reserve(capacity.div_ceil(Self::BITS_PER_WORD));
    }

    /// Number of deleted marks in `[0, len)`.
    pub fn count_deleted(&self) -> usize {
        let full = self.len / Self::BITS_PER_WORD;
        let rem = self.len % Self::BITS_PER_WORD;
        let mut count: usize = self
            .words
            .iter()
            .take(full)
            .map(|w| w.count_ones() as usize)
            .sum();
        if rem != 0 {
            let tail = self.words[full] & ((1u32 << rem) - 1);
            count += tail.count_ones() as usize;
        }
        count
    }

    /// Iterate over the flags in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.is_deleted(i))
    }

    /// Replace contents with a copy of `other`.
    pub fn copy_from(&mut self, other: &Self) {
        self.words.copy_from(&other.words);
        self.len = other.len;
    }

    /// Reset the length to zero, keeping storage.
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }

    /// Reset the length to zero and free storage.
    pub fn release(&mut self) {
        self.words.release();
        self.len = 0;
    }

    /// Bytes held by allocated word blocks.
    pub fn memory_bytes(&self) -> usize {
        self.words.memory_bytes()
    }
}
