//! Buffer configuration parameters.

use locus_core::{BufferError, Field};
use locus_space::{Region, Space};

use crate::any::AnyBuffer;
use crate::array::ArrayBuffer;
use crate::persistent::PersistentBuffer;

/// Storage strategy for a buffer built from a [`BufferConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Writes update the buffer in place ([`ArrayBuffer`]).
    #[default]
    Array,
    /// Writes produce a new buffer and leave the old one untouched
    /// ([`PersistentBuffer`]).
    Persistent,
}

/// Configuration for buffer construction.
///
/// Validated when a buffer is built; all values are immutable after
/// creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Largest number of slots a buffer may hold.
    ///
    /// Default: `i32::MAX`. Regions holding more positions are rejected
    /// with [`BufferError::CapacityExceeded`] rather than truncated.
    pub max_capacity: usize,

    /// Storage strategy. Default: [`Backend::Array`].
    pub backend: Backend,
}

impl BufferConfig {
    /// Default capacity limit: the largest non-negative `i32`.
    pub const DEFAULT_MAX_CAPACITY: usize = i32::MAX as usize;

    /// Default storage strategy.
    pub const DEFAULT_BACKEND: Backend = Backend::Array;

    /// A config with default values.
    pub fn new() -> Self {
        Self {
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
            backend: Self::DEFAULT_BACKEND,
        }
    }

    /// Set the capacity limit.
    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set the storage strategy.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Build a buffer over `region` with the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`] if the region holds more
    /// positions than [`max_capacity`](Self::max_capacity).
    pub fn build<S: Space, F: Field>(
        &self,
        region: Region<S>,
    ) -> Result<AnyBuffer<S, F>, BufferError> {
        Ok(match self.backend {
            Backend::Array => AnyBuffer::Array(ArrayBuffer::with_config(region, self)?),
            Backend::Persistent => {
                AnyBuffer::Persistent(PersistentBuffer::with_config(region, self)?)
            }
        })
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_capacity_is_i32_max() {
        let config = BufferConfig::default();
        assert_eq!(config.max_capacity, 2_147_483_647);
        assert_eq!(config.backend, Backend::Array);
    }

    #[test]
    fn setters_override_defaults() {
        let config = BufferConfig::new()
            .with_max_capacity(16)
            .with_backend(Backend::Persistent);
        assert_eq!(config.max_capacity, 16);
        assert_eq!(config.backend, Backend::Persistent);
    }
}
