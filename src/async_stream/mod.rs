//! Async pipeline adapters.
//!
//! Runtime-agnostic adapters built on `futures-core` and `futures-io`; they
//! work with tokio, async-std, smol and any other futures-compatible runtime.
//!
//! - [`RebufferStream`] / [`rebuffer_stream`] - re-chunks a `Stream` of blocks
//! - [`AsyncChunkReader`] / [`chunk_async`] - re-chunks an `AsyncRead` source
//!
//! This module requires the `async-io` feature to be enabled.

mod reader;
mod stream;

pub use reader::{AsyncChunkReader, chunk_async};
pub use stream::{RebufferStream, rebuffer_stream};
