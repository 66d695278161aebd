//! Chunk types.
//!
//! - [`Chunk`] - One emitted block with its stream offset and optional digest
//! - [`ChunkHash`] - 32-byte BLAKE3 digest

mod data;
mod hash;

pub use data::Chunk;
pub use hash::ChunkHash;
