//! Arena configuration parameters.

use crate::error::ArenaError;
use crate::mark::MarkArray;

/// Configuration for chunked column storage.
///
/// Controls the block size shared by every column and the mark array of
/// an entity container. Validated when a container is built; immutable
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of elements per block.
    ///
    /// Default: 1024. Must be a power of two and at least
    /// [`MarkArray::BITS_PER_WORD`], so that one block of marks is a whole
    /// number of mark words.
    pub chunk_size: usize,
}

impl ArenaConfig {
    /// Default block size in elements.
    pub const DEFAULT_CHUNK_SIZE: usize = 1024;

    /// Create a config with the given block size.
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Check that the block size can be used for columns and marks.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !self.chunk_size.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: format!("chunk_size ({}) must be a power of two", self.chunk_size),
            });
        }
        if self.chunk_size < MarkArray::BITS_PER_WORD {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "chunk_size ({}) must be at least {}",
                    self.chunk_size,
                    MarkArray::BITS_PER_WORD,
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chunk_size_is_1024() {
        let config = ArenaConfig::default();
        assert_eq!(config.chunk_size, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_power_of_two_rejected() {
        let err = ArenaConfig::new(1000).validate().unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig { .. }));
    }

    #[test]
    fn chunk_smaller_than_mark_word_rejected() {
        assert!(ArenaConfig::new(16).validate().is_err());
        assert!(ArenaConfig::new(0).validate().is_err());
        assert!(ArenaConfig::new(32).validate().is_ok());
    }
}
