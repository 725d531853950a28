//! Entity indices and the unset-link sentinel.

/// Stable position of an entity within its kind's columns.
///
/// Indices are assigned in creation order and are never reused while the
/// entity is alive. Adjacency columns (`next`, `opposite`, `cell`, ...)
/// store values of this type.
pub type EntityIndex = u32;

/// Sentinel stored in an adjacency column whose link has not been set.
///
/// Fresh index slots start out with this value. Boundary half-edges keep
/// it in their `opposite` column after the finishing pass.
pub const INVALID_INDEX: EntityIndex = u32::MAX;

/// Whether `index` refers to an entity rather than the unset sentinel.
#[inline]
pub fn is_valid(index: EntityIndex) -> bool {
    index != INVALID_INDEX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_not_valid() {
        assert!(!is_valid(INVALID_INDEX));
        assert!(is_valid(0));
        assert!(is_valid(INVALID_INDEX - 1));
    }
}
