//! Re-chunking engine and its synchronous adapters.
//!
//! - [`Rebuffer`] - Stateful engine with `push()`/`finish()` API
//! - [`BlockIter`] - Iterator adapter over input blocks
//! - [`ChunkIter`] - Iterator adapter over a [`std::io::Read`] source

mod engine;
mod iter;

pub use engine::{Rebuffer, RebufferStats};
pub use iter::{BlockIter, ChunkIter, DEFAULT_READ_SIZE};
