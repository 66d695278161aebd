//! Stream stage that re-chunks a stream of byte blocks.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::{StreamExt, stream};
//! use rechunkrs::{RebufferConfig, rebuffer_stream};
//!
//! async fn demo() -> Result<(), std::io::Error> {
//!     let blocks = stream::iter(vec![Ok::<_, std::io::Error>(vec![0u8; 10])]);
//!     let mut chunks = rebuffer_stream(blocks, RebufferConfig::new(4).unwrap());
//!
//!     while let Some(chunk) = chunks.next().await {
//!         println!("chunk {}", chunk?.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::Bytes;
use futures_core::{FusedStream, Stream};
use log::debug;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::RebufferConfig;
use crate::rebuffer::Rebuffer;

pin_project! {
    /// A stream that re-chunks the blocks of an upstream stream.
    ///
    /// Every upstream item is one input block. Upstream errors are forwarded
    /// unchanged and end the stream; the pending tail is not flushed after an
    /// error. When the upstream ends normally, the tail is handled by
    /// [`Rebuffer::finish`].
    #[derive(Debug)]
    pub struct RebufferStream<S> {
        #[pin]
        upstream: S,
        rebuffer: Rebuffer,
        ready: VecDeque<Chunk>,
        finished: bool,
    }
}

impl<S> RebufferStream<S> {
    /// Creates a stream stage driving `rebuffer` from `upstream`.
    pub fn new(upstream: S, rebuffer: Rebuffer) -> Self {
        Self {
            upstream,
            rebuffer,
            ready: VecDeque::new(),
            finished: false,
        }
    }

    /// Returns the rebuffer driving this stream.
    pub fn rebuffer(&self) -> &Rebuffer {
        &self.rebuffer
    }
}

impl<S, B, E> Stream for RebufferStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: Into<Bytes>,
{
    type Item = Result<Chunk, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(chunk) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            match ready!(this.upstream.as_mut().poll_next(cx)) {
                Some(Ok(block)) => {
                    let ready = &mut *this.ready;
                    this.rebuffer
                        .push_with(block.into(), |chunk| ready.push_back(chunk));
                }
                Some(Err(e)) => {
                    debug!(
                        "upstream failed at offset {}, dropping {} pending bytes",
                        this.rebuffer.offset(),
                        this.rebuffer.pending_len()
                    );
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                None => {
                    *this.finished = true;
                    return Poll::Ready(this.rebuffer.finish().map(Ok));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (self.ready.len(), Some(self.ready.len()))
        } else {
            (self.ready.len(), None)
        }
    }
}

impl<S, B, E> FusedStream for RebufferStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: Into<Bytes>,
{
    fn is_terminated(&self) -> bool {
        self.finished && self.ready.is_empty()
    }
}

impl Rebuffer {
    /// Turns this rebuffer into a stream stage over `upstream`.
    pub fn stream<S>(self, upstream: S) -> RebufferStream<S> {
        RebufferStream::new(upstream, self)
    }
}

/// Creates a re-chunking stream stage over `upstream`.
///
/// # Panics
///
/// Panics if the chunk size in `config` is zero; configs built with
/// [`RebufferConfig::new`] never are.
pub fn rebuffer_stream<S>(upstream: S, config: RebufferConfig) -> RebufferStream<S> {
    RebufferStream::new(upstream, Rebuffer::new(config))
}
