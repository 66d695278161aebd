//! rechunkrs
//!
//! Streaming fixed-size re-chunking for Rust.
//!
//! `rechunkrs` turns a sequence of byte blocks with arbitrary, uneven sizes
//! into a sequence of blocks of one fixed size. It is meant to sit between a
//! byte producer and a consumer that needs uniform blocks:
//!
//! - cipher blocks
//! - disk pages and sectors
//! - protocol frames
//!
//! The crate intentionally:
//! - does NOT look at the bytes it moves
//! - does NOT manage concurrency
//! - does NOT apply backpressure of its own
//! - does NOT change the chunk size mid-stream
//!
//! It only does one thing: **Irregular blocks in → fixed-size chunks out**
//!
//! Only the final chunk of a stream can be shorter than the chunk size, and
//! [`RebufferConfig::with_discard_incomplete_chunks`] drops it instead.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use rechunkrs::{ChunkError, Rebuffer};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("disk.img")?;
//!     let rebuffer = Rebuffer::with_size(512)?;
//!
//!     for chunk in rebuffer.reader(file) {
//!         let chunk = chunk?;
//!         println!("sector @ {}: {} bytes", chunk.offset, chunk.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rechunkrs::{RebufferConfig, chunk_async};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rechunkrs::ChunkError> {
//!     let mut stream = chunk_async(reader, RebufferConfig::new(512)?);
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod rebuffer;

mod hash; // internal blake3 impl

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use chunk::{Chunk, ChunkHash};
pub use config::{DEFAULT_CHUNK_SIZE, HashConfig, RebufferConfig};
pub use error::ChunkError;
pub use rebuffer::{BlockIter, ChunkIter, DEFAULT_READ_SIZE, Rebuffer, RebufferStats};

#[cfg(feature = "async-io")]
pub use async_stream::{AsyncChunkReader, RebufferStream, chunk_async, rebuffer_stream};
