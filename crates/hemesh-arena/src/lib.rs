//! Chunked, tombstoned column storage for hemesh entities.
//!
//! Every mesh attribute lives in a [`ChunkArray`]: a growable sequence
//! backed by fixed-size blocks that are never relocated, so an index (or a
//! reference taken between mutations) stays valid while the array grows.
//!
//! # Architecture
//!
//! ```text
//! Entity Data Container (hemesh-mesh, one per entity kind)
//! ├── MarkArray (bit-packed deletion marks, owned by the container)
//! └── IndexMap<name, Column>
//!     └── Column::{Point, Index, Scalar}(ChunkArray<T>)
//!         └── Vec<Box<[T]>> (chunk_size elements per block)
//! ```
//!
//! Deletion never compacts. A slot whose mark is set is skipped by the
//! [`TombstonedArena`] views the container hands out, but its storage
//! stays in place until the owner clears or releases the arrays.
//!
//! # Index checks
//!
//! Element access requires `index < len`. The check is a `debug_assert!`
//! by default; the `checked-access` feature makes it unconditional. An
//! index past the allocated blocks always panics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod column;
pub mod config;
pub mod error;
pub mod mark;
pub mod tombstone;

pub use chunk::ChunkArray;
pub use column::{Column, ColumnElement, ColumnType};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use mark::MarkArray;
pub use tombstone::{TombstonedArena, TombstonedArenaMut};
