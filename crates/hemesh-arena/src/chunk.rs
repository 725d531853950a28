//! Fixed-size blocks and the growable [`ChunkArray`].
//!
//! A [`ChunkArray`] stores its elements in a list of boxed blocks of
//! `chunk_size` elements each. Growth appends whole blocks and never moves
//! an existing one, so element addresses are stable for the life of the
//! array (until [`ChunkArray::release`]).

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::ArenaConfig;

/// Panic unless `index < len`.
///
/// Unconditional with the `checked-access` feature, debug-only otherwise.
#[inline]
#[track_caller]
pub(crate) fn check_index(index: usize, len: usize, name: &str) {
    #[cfg(feature = "checked-access")]
    assert!(
        index < len,
        "index {index} out of range for '{name}' (len {len})"
    );
    #[cfg(not(feature = "checked-access"))]
    debug_assert!(
        index < len,
        "index {index} out of range for '{name}' (len {len})"
    );
}

/// A growable, index-addressed sequence backed by fixed-size blocks.
///
/// - `push` is O(1) amortised and allocates one block when the last one is
///   full.
/// - `reserve` and `resize` allocate whole blocks; blocks are never
///   relocated or freed before [`release`](ChunkArray::release).
/// - Shrinking (`resize` down, `clear`) only moves the logical length.
///   Growing back within capacity exposes whatever the slots held before;
///   only freshly allocated blocks are default-initialised.
pub struct ChunkArray<T> {
    /// Diagnostic label, copied along with the contents.
    name: String,
    /// Allocated blocks, each exactly `chunk_size` elements.
    chunks: Vec<Box<[T]>>,
    /// Logical length.
    len: usize,
    /// `log2(chunk_size)`.
    shift: u32,
    /// `chunk_size - 1`.
    mask: usize,
}

impl<T: Copy + Default> ChunkArray<T> {
    /// Create an empty array with the default block size.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_chunk_size(name, ArenaConfig::DEFAULT_CHUNK_SIZE)
    }

    /// Create an empty array using the block size from `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config.chunk_size` is not a power of two.
    pub fn with_config(name: impl Into<String>, config: &ArenaConfig) -> Self {
        Self::with_chunk_size(name, config.chunk_size)
    }

    /// Create an array of `len` default-initialised elements.
    pub fn with_len(name: impl Into<String>, config: &ArenaConfig, len: usize) -> Self {
        let mut array = Self::with_config(name, config);
        array.resize(len);
        array
    }

    /// Create an empty array with `chunk_size` elements per block.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is not a power of two.
    pub fn with_chunk_size(name: impl Into<String>, chunk_size: usize) -> Self {
        assert!(
            chunk_size.is_power_of_two(),
            "chunk_size ({chunk_size}) must be a power of two"
        );
        Self {
            name: name.into(),
            chunks: Vec::new(),
            len: 0,
            shift: chunk_size.trailing_zeros(),
            mask: chunk_size - 1,
        }
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, usize) {
        (index >> self.shift, index & self.mask)
    }

    fn new_chunk(&self) -> Box<[T]> {
        vec![T::default(); self.chunk_size()].into_boxed_slice()
    }

    /// Shared reference to element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the allocated blocks, and (see the crate
    /// docs) if `index >= len` when index checks are enabled.
    #[inline]
    #[track_caller]
    pub fn get(&self, index: usize) -> &T {
        check_index(index, self.len, &self.name);
        let (chunk, offset) = self.locate(index);
        &self.chunks[chunk][offset]
    }

    /// Mutable reference to element `index`. Same contract as [`get`](Self::get).
    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        check_index(index, self.len, &self.name);
        let (chunk, offset) = self.locate(index);
        &mut self.chunks[chunk][offset]
    }

    /// Overwrite element `index`. Same contract as [`get`](Self::get).
    #[inline]
    #[track_caller]
    pub fn set(&mut self, index: usize, value: T) {
        *self.get_mut(index) = value;
    }

    /// Append `value`, returning its index.
    pub fn push(&mut self, value: T) -> usize {
        if self.len == self.capacity() {
            let chunk = self.new_chunk();
            self.chunks.push(chunk);
        }
        let index = self.len;
        let (chunk, offset) = self.locate(index);
        self.chunks[chunk][offset] = value;
        self.len += 1;
        index
    }

    /// Append the value produced by `make`, returning its index.
    pub fn emplace_with(&mut self, make: impl FnOnce() -> T) -> usize {
        self.push(make())
    }

    /// Last element, or `None` when empty.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).map(|last| self.get(last))
    }

    /// Mutable last element, or `None` when empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len.checked_sub(1)?;
        Some(self.get_mut(last))
    }

    /// Ensure capacity for at least `capacity` elements.
    ///
    /// Allocates whole blocks; existing blocks are untouched.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }
        let required = capacity.div_ceil(self.chunk_size());
        let added = required - self.chunks.len();
        self.chunks.reserve(added);
        while self.chunks.len() < required {
            let chunk = self.new_chunk();
            self.chunks.push(chunk);
        }
        log::trace!(
            "'{}': reserved {added} block(s), capacity now {}",
            self.name,
            self.capacity()
        );
    }

    /// Set the logical length to `len`.
    ///
    /// Within capacity this only moves the length: trailing slots keep
    /// their previous contents. Beyond capacity new default-initialised
    /// blocks are reserved first.
    pub fn resize(&mut self, len: usize) {
        if len > self.capacity() {
            self.reserve(len);
        }
        self.len = len;
    }

    /// Replace this array's contents and name with a deep copy of `other`.
    ///
    /// Copies the elements `[0, other.len())`; blocks already allocated
    /// here are reused.
    pub fn copy_from(&mut self, other: &Self) {
        self.name.clone_from(&other.name);
        self.len = 0;
        self.reserve(other.len);
        if self.shift == other.shift {
            let mut remaining = other.len;
            for (dst, src) in self.chunks.iter_mut().zip(&other.chunks) {
                if remaining == 0 {
                    break;
                }
                let n = remaining.min(src.len());
                dst[..n].copy_from_slice(&src[..n]);
                remaining -= n;
            }
            self.len = other.len;
        } else {
            self.len = other.len;
            for (index, value) in other.iter().enumerate() {
                let (chunk, offset) = self.locate(index);
                self.chunks[chunk][offset] = *value;
            }
        }
    }

    /// Set every allocated slot, including those past `len`, to `value`.
    pub fn fill(&mut self, value: T) {
        for chunk in &mut self.chunks {
            chunk.fill(value);
        }
    }

    /// Exchange contents with `other` without copying elements.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Reset the length to zero, keeping all blocks.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Reset the length to zero and free every block.
    pub fn release(&mut self) {
        self.chunks = Vec::new();
        self.len = 0;
    }

    /// Iterate over `[0, len)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.chunks.iter().flat_map(|c| c.iter()).take(self.len)
    }

    /// Mutable iteration over `[0, len)` in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        let len = self.len;
        self.chunks.iter_mut().flat_map(|c| c.iter_mut()).take(len)
    }
}

impl<T> ChunkArray<T> {
    /// Logical number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements per block.
    pub fn chunk_size(&self) -> usize {
        self.mask + 1
    }

    /// Number of allocated blocks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Elements that fit without allocating.
    pub fn capacity(&self) -> usize {
        self.chunks.len() << self.shift
    }

    /// Diagnostic label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the diagnostic label.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Bytes held by allocated blocks.
    pub fn memory_bytes(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>()
    }
}

impl<T: Copy + Default> Clone for ChunkArray<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_chunk_size(String::new(), self.chunk_size());
        copy.copy_from(self);
        copy
    }
}

impl<T: Copy + Default> Index<usize> for ChunkArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T: Copy + Default> IndexMut<usize> for ChunkArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

impl<T> fmt::Debug for ChunkArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkArray")
            .field("name", &self.name)
            .field("len", &self.len)
            .field("chunk_size", &self.chunk_size())
            .field("chunks", &self.chunks.len())
            .finish()
    }
}
