//! Configuration for re-chunking behavior.
//!
//! This module provides the types that configure a [`Rebuffer`](crate::Rebuffer):
//!
//! - [`RebufferConfig`] - Target chunk size and the policy for the short tail
//! - [`HashConfig`] - Specifies whether to compute a digest per emitted chunk
//!
//! # Example
//!
//! ```
//! use rechunkrs::{HashConfig, RebufferConfig};
//!
//! // 512-byte sectors, drop whatever does not fill a whole sector
//! let config = RebufferConfig::new(512)?.with_discard_incomplete_chunks(true);
//!
//! // Default chunk size with hashing
//! let config = RebufferConfig::default().with_hash_config(HashConfig::enabled());
//!
//! # Ok::<(), rechunkrs::ChunkError>(())
//! ```

use crate::error::ChunkError;

/// Default chunk size (4 KiB, one typical page).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Configuration for fixed-size re-chunking.
///
/// The chunk size is fixed for the lifetime of the [`Rebuffer`](crate::Rebuffer)
/// built from it. The discard flag only affects what happens at end of stream:
/// when `false` (the default) a trailing chunk shorter than `chunk_size` is
/// emitted, when `true` it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RebufferConfig {
    chunk_size: usize,
    discard_incomplete_chunks: bool,
    hash_config: HashConfig,
}

impl RebufferConfig {
    /// Creates a new configuration emitting chunks of `chunk_size` bytes.
    ///
    /// Returns error if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        Ok(Self {
            chunk_size,
            discard_incomplete_chunks: false,
            hash_config: HashConfig::default(),
        })
    }

    /// Sets the chunk size.
    ///
    /// Not validated here; see [`RebufferConfig::validate`].
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets whether a trailing short chunk is dropped at end of stream.
    pub fn with_discard_incomplete_chunks(mut self, discard: bool) -> Self {
        self.discard_incomplete_chunks = discard;
        self
    }

    /// Sets the hash configuration.
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns true if a trailing short chunk is dropped.
    pub fn discard_incomplete_chunks(&self) -> bool {
        self.discard_incomplete_chunks
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.chunk_size).map(|_| ())
    }
}

impl Default for RebufferConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            discard_incomplete_chunks: false,
            hash_config: HashConfig::default(),
        }
    }
}

/// Configuration for chunk hashing.
///
/// Controls whether a BLAKE3 digest is attached to each emitted chunk. Has no
/// effect unless the `hash-blake3` feature is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashConfig {
    /// Whether to compute BLAKE3 hashes.
    pub enabled: bool,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables hashing.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}
