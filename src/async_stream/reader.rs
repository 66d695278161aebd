//! Async reader adapter for re-chunking.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rechunkrs::{RebufferConfig, chunk_async};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rechunkrs::ChunkError> {
//!     let mut stream = chunk_async(reader, RebufferConfig::new(4096)?);
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("Chunk: {} bytes @ {}", chunk.len(), chunk.offset);
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures_core::{FusedStream, Stream};
use futures_io::AsyncRead;
use log::debug;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::RebufferConfig;
use crate::error::ChunkError;
use crate::rebuffer::{DEFAULT_READ_SIZE, Rebuffer};

pin_project! {
    /// A stream that yields fixed-size chunks from an async reader.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic. Each
    /// completed read is one input block. `ErrorKind::Interrupted` is
    /// retried; any other read error is yielded once and ends the stream
    /// without flushing the pending tail.
    #[derive(Debug)]
    pub struct AsyncChunkReader<R> {
        #[pin]
        reader: R,
        rebuffer: Rebuffer,
        read_buf: Box<[u8]>,
        ready: VecDeque<Chunk>,
        finished: bool,
    }
}

impl<R> AsyncChunkReader<R> {
    /// Creates an adapter driving `rebuffer` from `reader`.
    pub fn new(reader: R, rebuffer: Rebuffer) -> Self {
        Self::with_read_size(reader, rebuffer, DEFAULT_READ_SIZE)
    }

    /// Creates an adapter issuing reads of up to `read_size` bytes.
    ///
    /// A `read_size` of zero is bumped to one.
    pub fn with_read_size(reader: R, rebuffer: Rebuffer, read_size: usize) -> Self {
        Self {
            reader,
            rebuffer,
            read_buf: vec![0u8; read_size.max(1)].into_boxed_slice(),
            ready: VecDeque::new(),
            finished: false,
        }
    }

    /// Returns the rebuffer driving this stream.
    pub fn rebuffer(&self) -> &Rebuffer {
        &self.rebuffer
    }
}

impl<R: AsyncRead> Stream for AsyncChunkReader<R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(chunk) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            match ready!(this.reader.as_mut().poll_read(cx, &mut this.read_buf[..])) {
                Ok(0) => {
                    *this.finished = true;
                    return Poll::Ready(this.rebuffer.finish().map(Ok));
                }
                Ok(n) => {
                    this.ready
                        .extend(this.rebuffer.push_slice(&this.read_buf[..n]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(
                        "async reader failed at offset {}: {}",
                        this.rebuffer.offset(),
                        e
                    );
                    *this.finished = true;
                    return Poll::Ready(Some(Err(ChunkError::Io(e))));
                }
            }
        }
    }
}

impl<R: AsyncRead> FusedStream for AsyncChunkReader<R> {
    fn is_terminated(&self) -> bool {
        self.finished && self.ready.is_empty()
    }
}

impl Rebuffer {
    /// Turns this rebuffer into a stream over chunks read from `reader`.
    pub fn async_reader<R: AsyncRead>(self, reader: R) -> AsyncChunkReader<R> {
        AsyncChunkReader::new(reader, self)
    }
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use rechunkrs::{RebufferConfig, chunk_async};
///
/// let file = tokio::fs::File::open("disk.img").await?;
/// let stream = chunk_async(file.compat(), RebufferConfig::new(512)?);
/// ```
///
/// # Panics
///
/// Panics if the chunk size in `config` is zero; configs built with
/// [`RebufferConfig::new`] never are.
pub fn chunk_async<R: AsyncRead>(reader: R, config: RebufferConfig) -> AsyncChunkReader<R> {
    AsyncChunkReader::new(reader, Rebuffer::new(config))
}
