//! Synchronous pipeline adapters - BlockIter and ChunkIter.
//!
//! Both adapters drive a [`Rebuffer`] from an upstream source and yield the
//! chunks it emits, calling `finish()` exactly once when the source ends:
//!
//! - [`BlockIter`] - pulls blocks from any iterator of byte blocks
//! - [`ChunkIter`] - reads from a [`std::io::Read`] source
//!
//! # Example
//!
//! ```
//! use rechunkrs::Rebuffer;
//! use std::io::Cursor;
//!
//! let rebuffer = Rebuffer::with_size(512)?;
//! let chunks = rebuffer
//!     .reader(Cursor::new(vec![0u8; 1300]))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let lens: Vec<_> = chunks.iter().map(|c| c.len()).collect();
//! assert_eq!(lens, [512, 512, 276]);
//! # Ok::<(), rechunkrs::ChunkError>(())
//! ```

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use bytes::Bytes;
use log::debug;

use super::Rebuffer;
use crate::chunk::Chunk;
use crate::error::ChunkError;

/// Size of each `read()` issued by [`ChunkIter`].
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

impl Rebuffer {
    /// Turns this rebuffer into an iterator adapter over input blocks.
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::Rebuffer;
    ///
    /// let blocks = vec![vec![0u8, 1], vec![], vec![2, 3, 4, 5, 6, 7]];
    /// let chunks: Vec<_> = Rebuffer::with_size(3)?
    ///     .blocks(blocks)
    ///     .map(|c| c.data.to_vec())
    ///     .collect();
    ///
    /// assert_eq!(chunks, [vec![0, 1, 2], vec![3, 4, 5], vec![6, 7]]);
    /// # Ok::<(), rechunkrs::ChunkError>(())
    /// ```
    pub fn blocks<I>(self, blocks: I) -> BlockIter<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        BlockIter::new(blocks.into_iter(), self)
    }

    /// Turns this rebuffer into an iterator over chunks read from `reader`.
    pub fn reader<R: Read>(self, reader: R) -> ChunkIter<R> {
        ChunkIter::new(reader, self)
    }
}

/// An iterator that re-chunks the blocks of another iterator.
///
/// Created by [`Rebuffer::blocks`]. Input blocks are pulled lazily, only when
/// no completed chunk is waiting.
#[derive(Debug)]
pub struct BlockIter<I> {
    blocks: I,
    rebuffer: Rebuffer,
    ready: VecDeque<Chunk>,
    finished: bool,
}

impl<I> BlockIter<I> {
    fn new(blocks: I, rebuffer: Rebuffer) -> Self {
        Self {
            blocks,
            rebuffer,
            ready: VecDeque::new(),
            finished: false,
        }
    }

    /// Returns the rebuffer driving this iterator.
    pub fn rebuffer(&self) -> &Rebuffer {
        &self.rebuffer
    }
}

impl<I> Iterator for BlockIter<I>
where
    I: Iterator,
    I::Item: Into<Bytes>,
{
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(chunk);
            }
            if self.finished {
                return None;
            }

            match self.blocks.next() {
                Some(block) => {
                    let ready = &mut self.ready;
                    self.rebuffer
                        .push_with(block.into(), |chunk| ready.push_back(chunk));
                }
                None => {
                    self.finished = true;
                    return self.rebuffer.finish();
                }
            }
        }
    }
}

impl<I> FusedIterator for BlockIter<I>
where
    I: Iterator,
    I::Item: Into<Bytes>,
{
}

/// An iterator that yields fixed-size chunks from a reader.
///
/// Created by [`Rebuffer::reader`]. Each `read()` call is treated as one input
/// block, so the size of individual reads has no effect on the output.
///
/// `ErrorKind::Interrupted` reads are retried. Any other read error is yielded
/// once and ends the iteration; the pending tail is not flushed.
#[derive(Debug)]
pub struct ChunkIter<R> {
    reader: R,
    rebuffer: Rebuffer,
    read_buf: Box<[u8]>,
    ready: VecDeque<Chunk>,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    fn new(reader: R, rebuffer: Rebuffer) -> Self {
        Self::with_read_size(reader, rebuffer, DEFAULT_READ_SIZE)
    }

    /// Creates a chunk iterator issuing reads of up to `read_size` bytes.
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

    /// Returns the rebuffer driving this iterator.
    pub fn rebuffer(&self) -> &Rebuffer {
        &self.rebuffer
    }

    /// Consumes the iterator and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(Ok(chunk));
            }
            if self.finished {
                return None;
            }

            match self.reader.read(&mut self.read_buf) {
                Ok(0) => {
                    self.finished = true;
                    return self.rebuffer.finish().map(Ok);
                }
                Ok(n) => {
                    self.ready
                        .extend(self.rebuffer.push_slice(&self.read_buf[..n]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(
                        "reader failed at offset {}: {}",
                        self.rebuffer.offset(),
                        e
                    );
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for ChunkIter<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Reader that hands out one scripted result per call.
    struct Scripted(VecDeque<io::Result<Vec<u8>>>);

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(data)) => {
                    buf[..data.len()].copy_from_slice(&data);
                    Ok(data.len())
                }
            }
        }
    }

    #[test]
    fn test_block_iter_empty_source() {
        let blocks: Vec<Bytes> = Vec::new();
        let mut iter = Rebuffer::with_size(4).unwrap().blocks(blocks);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_block_iter_finishes_once() {
        let mut iter = Rebuffer::with_size(4)
            .unwrap()
            .blocks(vec![Bytes::from_static(b"abcdef")]);
        assert_eq!(iter.next().unwrap().data, &b"abcd"[..]);
        assert_eq!(iter.next().unwrap().data, &b"ef"[..]);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert_eq!(iter.rebuffer().stats().chunks_out, 2);
    }

    #[test]
    fn test_chunk_iter_small_reads() {
        let data: Vec<u8> = (0..100).collect();
        let rebuffer = Rebuffer::with_size(7).unwrap();
        let chunks: Vec<_> = ChunkIter::with_read_size(Cursor::new(&data), rebuffer, 3)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(chunks.len(), 15);
        assert_eq!(chunks.last().unwrap().len(), 2);
        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.to_vec()).collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn test_chunk_iter_retries_interrupted() {
        let script = VecDeque::from(vec![
            Ok(vec![1, 2]),
            Err(io::Error::from(ErrorKind::Interrupted)),
            Ok(vec![3, 4]),
        ]);
        let chunks: Vec<_> = Rebuffer::with_size(4)
            .unwrap()
            .reader(Scripted(script))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0].data[..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_chunk_iter_propagates_error_without_flush() {
        let script = VecDeque::from(vec![
            Ok(vec![1, 2, 3, 4, 5]),
            Err(io::Error::other("disk gone")),
            Ok(vec![6]),
        ]);
        let mut iter = Rebuffer::with_size(4).unwrap().reader(Scripted(script));

        assert_eq!(&iter.next().unwrap().unwrap().data[..], &[1, 2, 3, 4]);
        assert!(matches!(iter.next(), Some(Err(ChunkError::Io(_)))));
        assert!(iter.next().is_none());
        assert_eq!(iter.rebuffer().pending_len(), 1);
    }
}
