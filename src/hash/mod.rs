//! Per-chunk digests.
//!
//! The rebuffer never inspects the bytes it moves; this module only attaches
//! an identity to each emitted chunk when [`HashConfig`](crate::HashConfig)
//! asks for it. BLAKE3 is available via the `hash-blake3` feature.

#[cfg(feature = "hash-blake3")]
mod blake3;

#[cfg(feature = "hash-blake3")]
pub(crate) use self::blake3::digest;

use crate::chunk::ChunkHash;
use crate::config::HashConfig;

/// Computes the digest of `data` if hashing is enabled and compiled in.
pub(crate) fn chunk_hash(config: &HashConfig, data: &[u8]) -> Option<ChunkHash> {
    if !config.enabled {
        return None;
    }
    #[cfg(feature = "hash-blake3")]
    return Some(digest(data));
    #[cfg(not(feature = "hash-blake3"))]
    {
        let _ = data;
        None
    }
}
