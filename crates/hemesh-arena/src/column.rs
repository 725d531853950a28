//! Named, typed columns over the closed set of element types.
//!
//! A [`Column`] is one attribute of every entity of a kind. The set of
//! element types is closed (points, entity indices, scalars), so the
//! column store is a plain enum: lookups are checked by matching on the
//! variant, and whole-column operations such as copying dispatch without
//! the caller knowing the element type.

use std::fmt;

use hemesh_core::{EntityIndex, Point, INVALID_INDEX};

use crate::chunk::ChunkArray;
use crate::config::ArenaConfig;

/// Element type stored by a [`Column`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 2D coordinates ([`Point`]).
    Point,
    /// Entity indices ([`EntityIndex`]).
    Index,
    /// Scalar attributes (`f64`).
    Scalar,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => f.write_str("point"),
            Self::Index => f.write_str("index"),
            Self::Scalar => f.write_str("scalar"),
        }
    }
}

/// One typed attribute array.
#[derive(Clone, Debug)]
pub enum Column {
    /// Point-valued column.
    Point(ChunkArray<Point>),
    /// Index-valued column (adjacency links).
    Index(ChunkArray<EntityIndex>),
    /// Scalar-valued column.
    Scalar(ChunkArray<f64>),
}

/// Dispatch `$body` over the array inside any [`Column`] variant.
macro_rules! with_array {
    ($column:expr, $array:ident => $body:expr) => {
        match $column {
            Column::Point($array) => $body,
            Column::Index($array) => $body,
            Column::Scalar($array) => $body,
        }
    };
}

impl Column {
    /// Create an empty column of element type `T`.
    pub fn new<T: ColumnElement>(name: impl Into<String>, config: &ArenaConfig) -> Self {
        T::into_column(ChunkArray::with_config(name, config))
    }

    /// Element type stored.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Point(_) => ColumnType::Point,
            Self::Index(_) => ColumnType::Index,
            Self::Scalar(_) => ColumnType::Scalar,
        }
    }

    /// Diagnostic label of the underlying array.
    pub fn name(&self) -> &str {
        with_array!(self, a => a.name())
    }

    /// Logical length.
    pub fn len(&self) -> usize {
        with_array!(self, a => a.len())
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the element type's vacant value.
    pub fn push_vacant(&mut self) -> usize {
        match self {
            Self::Point(a) => a.push(Point::vacant()),
            Self::Index(a) => a.push(EntityIndex::vacant()),
            Self::Scalar(a) => a.push(f64::vacant()),
        }
    }

    /// Set the logical length (see [`ChunkArray::resize`]).
    pub fn resize(&mut self, len: usize) {
        with_array!(self, a => a.resize(len))
    }

    /// Ensure capacity for `capacity` elements (see [`ChunkArray::reserve`]).
    pub fn reserve(&mut self, capacity: usize) {
        with_array!(self, a => a.reserve(capacity))
    }

    /// Reset the length, keeping blocks.
    pub fn clear(&mut self) {
        with_array!(self, a => a.clear())
    }

    /// Reset the length and free blocks.
    pub fn release(&mut self) {
        with_array!(self, a => a.release())
    }

    /// Bytes held by allocated blocks.
    pub fn memory_bytes(&self) -> usize {
        with_array!(self, a => a.memory_bytes())
    }

    /// Deep copy of this column, whatever its element type.
    pub fn copy_self(&self) -> Column {
        self.clone()
    }

    /// Checked typed access.
    pub fn downcast_ref<T: ColumnElement>(&self) -> Option<&ChunkArray<T>> {
        T::downcast_ref(self)
    }

    /// Checked typed mutable access.
    pub fn downcast_mut<T: ColumnElement>(&mut self) -> Option<&mut ChunkArray<T>> {
        T::downcast_mut(self)
    }
}

/// An element type that can be stored in a [`Column`].
pub trait ColumnElement: Copy + Default + 'static {
    /// The column variant holding this type.
    const TYPE: ColumnType;

    /// Value given to a slot created by adding an entity.
    fn vacant() -> Self;

    /// Wrap an array of this type in its column variant.
    fn into_column(array: ChunkArray<Self>) -> Column;

    /// The array inside `column`, if it holds this type.
    fn downcast_ref(column: &Column) -> Option<&ChunkArray<Self>>;

    /// The mutable array inside `column`, if it holds this type.
    fn downcast_mut(column: &mut Column) -> Option<&mut ChunkArray<Self>>;
}

macro_rules! impl_column_element {
    ($ty:ty, $variant:ident, $vacant:expr) => {
        impl ColumnElement for $ty {
            const TYPE: ColumnType = ColumnType::$variant;

            fn vacant() -> Self {
                $vacant
            }

            fn into_column(array: ChunkArray<Self>) -> Column {
                Column::$variant(array)
            }

            fn downcast_ref(column: &Column) -> Option<&ChunkArray<Self>> {
                match column {
                    Column::$variant(a) => Some(a),
                    _ => None,
                }
            }

            fn downcast_mut(column: &mut Column) -> Option<&mut ChunkArray<Self>> {
                match column {
                    Column::$variant(a) => Some(a),
                    _ => None,
                }
            }
        }
    };
}

impl_column_element!(Point, Point, Point::ZERO);
impl_column_element!(EntityIndex, Index, INVALID_INDEX);
impl_column_element!(f64, Scalar, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ArenaConfig {
        ArenaConfig::new(32)
    }

    #[test]
    fn new_column_has_requested_type() {
        let c = Column::new::<EntityIndex>("next", &config());
        assert_eq!(c.column_type(), ColumnType::Index);
        assert_eq!(c.name(), "next");
        assert!(c.is_empty());
    }

    #[test]
    fn push_vacant_uses_type_sentinel() {
        let mut idx = Column::new::<EntityIndex>("next", &config());
        let mut pts = Column::new::<Point>("coordinate", &config());
        idx.push_vacant();
        pts.push_vacant();
        assert_eq!(idx.downcast_ref::<EntityIndex>().unwrap()[0], INVALID_INDEX);
        assert_eq!(pts.downcast_ref::<Point>().unwrap()[0], Point::ZERO);
    }

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let mut c = Column::new::<f64>("area", &config());
        assert!(c.downcast_ref::<Point>().is_none());
        assert!(c.downcast_mut::<EntityIndex>().is_none());
        assert!(c.downcast_mut::<f64>().is_some());
    }

    #[test]
    fn copy_self_is_deep() {
        let mut c = Column::new::<f64>("area", &config());
        c.push_vacant();
        c.downcast_mut::<f64>().unwrap()[0] = 2.5;
        let mut copy = c.copy_self();
        copy.downcast_mut::<f64>().unwrap()[0] = 7.0;
        assert_eq!(c.downcast_ref::<f64>().unwrap()[0], 2.5);
        assert_eq!(copy.name(), "area");
        assert_eq!(copy.column_type(), ColumnType::Scalar);
    }

    #[test]
    fn type_erased_resize_and_release() {
        let mut c = Column::new::<Point>("coordinate", &config());
        c.resize(40);
        assert_eq!(c.len(), 40);
        assert_eq!(c.memory_bytes(), 64 * std::mem::size_of::<Point>());
        c.release();
        assert_eq!(c.len(), 0);
        assert_eq!(c.memory_bytes(), 0);
    }
}
