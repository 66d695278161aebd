//! Core re-chunking engine - Rebuffer with streaming API.
//!
//! This module implements fixed-size re-chunking as a pure streaming
//! interface:
//!
//! - [`Rebuffer`] - Stateful engine holding one carry-over buffer
//! - `push()` - Feed blocks of any size (0 bytes, 1 byte, 8KB, 1MB, etc.)
//! - `finish()` - Flush (or drop) the short tail when the stream ends
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use rechunkrs::{Rebuffer, RebufferConfig};
//!
//! let mut rebuffer = Rebuffer::new(RebufferConfig::new(3)?);
//!
//! let mut chunks = rebuffer.push(Bytes::from_static(&[0, 1, 2, 3, 4]));
//! chunks.extend(rebuffer.push(Bytes::from_static(&[5, 6, 7])));
//! chunks.extend(rebuffer.finish());
//!
//! let lens: Vec<_> = chunks.iter().map(|c| c.len()).collect();
//! assert_eq!(lens, [3, 3, 2]);
//! # Ok::<(), rechunkrs::ChunkError>(())
//! ```

use bytes::Bytes;
use log::{debug, trace};

use crate::chunk::Chunk;
use crate::config::RebufferConfig;
use crate::error::ChunkError;
use crate::hash::chunk_hash;

/// Running totals for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebufferStats {
    /// Bytes accepted by `push`.
    pub bytes_in: u64,
    /// Bytes handed downstream in chunks.
    pub bytes_out: u64,
    /// Chunks handed downstream.
    pub chunks_out: u64,
    /// Tail bytes dropped by `finish` under the discard policy.
    pub bytes_discarded: u64,
}

/// Re-chunks a stream of irregular byte blocks into fixed-size chunks.
///
/// `Rebuffer` owns a single carry-over buffer of exactly `chunk_size` bytes,
/// allocated once in [`Rebuffer::new`]. Bytes that do not yet form a whole
/// chunk wait there until later input fills it.
///
/// # Streaming API
///
/// - Call `push()` once per input block, in arrival order
/// - Every returned chunk is exactly `chunk_size` bytes
/// - Call `finish()` once when the input ends to get the short tail (if any,
///   and only if the config does not discard it)
///
/// # Determinism
///
/// The emitted chunks depend only on the concatenated input bytes and the
/// config, never on how the input was split into blocks.
///
/// # Snapshots
///
/// Chunks that fill up the carry-over buffer are copied out of it before
/// being returned. When the buffer is empty and an input `Bytes` still holds
/// a whole chunk, that chunk is sliced from the input without copying. In both
/// cases the returned `Bytes` is immutable.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use rechunkrs::{Rebuffer, RebufferConfig};
///
/// let config = RebufferConfig::new(3)?.with_discard_incomplete_chunks(true);
/// let mut rebuffer = Rebuffer::new(config);
///
/// let chunks = rebuffer.push(Bytes::from_static(&[0, 1, 2, 3, 4, 5, 6, 7]));
/// assert_eq!(chunks.len(), 2);
///
/// // [6, 7] is dropped
/// assert!(rebuffer.finish().is_none());
/// assert_eq!(rebuffer.stats().bytes_discarded, 2);
/// # Ok::<(), rechunkrs::ChunkError>(())
/// ```
#[derive(Debug)]
pub struct Rebuffer {
    buf: Box<[u8]>,
    used: usize,
    offset: u64,
    stats: RebufferStats,
    config: RebufferConfig,
}

impl Rebuffer {
    /// Creates a new rebuffer with the given configuration.
    ///
    /// `config` is expected to come from [`RebufferConfig::new`]; use
    /// [`Rebuffer::try_new`] for configs assembled with the unchecked
    /// `with_chunk_size` setter.
    ///
    /// # Panics
    ///
    /// Panics if the chunk size is zero.
    pub fn new(config: RebufferConfig) -> Self {
        assert!(config.chunk_size() > 0, "chunk size must be non-zero");

        debug!(
            "rebuffer created: chunk_size={} discard_incomplete_chunks={}",
            config.chunk_size(),
            config.discard_incomplete_chunks()
        );

        Self {
            buf: vec![0u8; config.chunk_size()].into_boxed_slice(),
            used: 0,
            offset: 0,
            stats: RebufferStats::default(),
            config,
        }
    }

    /// Creates a new rebuffer after validating the configuration.
    pub fn try_new(config: RebufferConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Creates a rebuffer emitting `chunk_size`-byte chunks with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::Rebuffer;
    ///
    /// assert!(Rebuffer::with_size(0).is_err());
    /// assert_eq!(Rebuffer::with_size(16)?.chunk_size(), 16);
    /// # Ok::<(), rechunkrs::ChunkError>(())
    /// ```
    pub fn with_size(chunk_size: usize) -> Result<Self, ChunkError> {
        Ok(Self::new(RebufferConfig::new(chunk_size)?))
    }

    /// Pushes one input block and returns the chunks it completes.
    ///
    /// An empty block is a no-op. Bytes that do not complete a chunk are kept
    /// in the carry-over buffer for the next call.
    pub fn push(&mut self, data: Bytes) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity((self.used + data.len()) / self.chunk_size());
        self.ingest(&data, Some(&data), &mut |chunk| chunks.push(chunk));
        chunks
    }

    /// Pushes one input block given as a borrowed slice.
    ///
    /// Same as [`Rebuffer::push`], except every emitted chunk is a copy since
    /// there is no `Bytes` to slice from.
    pub fn push_slice(&mut self, data: &[u8]) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity((self.used + data.len()) / self.chunk_size());
        self.ingest(data, None, &mut |chunk| chunks.push(chunk));
        chunks
    }

    /// Pushes one input block, handing each completed chunk to `emit`.
    ///
    /// Use this when chunks go straight downstream and collecting them into a
    /// `Vec` first would be wasted work.
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::Bytes;
    /// use rechunkrs::Rebuffer;
    ///
    /// let mut rebuffer = Rebuffer::with_size(2)?;
    /// let mut out = Vec::new();
    /// rebuffer.push_with(Bytes::from_static(b"abcde"), |chunk| out.push(chunk.data));
    ///
    /// assert_eq!(out, [&b"ab"[..], &b"cd"[..]]);
    /// assert_eq!(rebuffer.pending_len(), 1);
    /// # Ok::<(), rechunkrs::ChunkError>(())
    /// ```
    pub fn push_with<F>(&mut self, data: Bytes, mut emit: F)
    where
        F: FnMut(Chunk),
    {
        self.ingest(&data, Some(&data), &mut emit);
    }

    /// Finalizes the stream and returns the short tail chunk, if any.
    ///
    /// Returns `None` when nothing is pending, or when something is pending
    /// but the config discards incomplete chunks. The carry-over buffer is
    /// empty afterwards, so calling `finish()` again returns `None`.
    pub fn finish(&mut self) -> Option<Chunk> {
        let used = std::mem::take(&mut self.used);
        if used == 0 {
            debug!("rebuffer finished: offset={} no tail", self.offset);
            return None;
        }

        if self.config.discard_incomplete_chunks() {
            self.stats.bytes_discarded += used as u64;
            debug!(
                "rebuffer finished: offset={} discarded {} tail bytes",
                self.offset, used
            );
            return None;
        }

        let data = Bytes::copy_from_slice(&self.buf[..used]);
        let chunk = self.emit(data);
        debug!(
            "rebuffer finished: offset={} short tail of {} bytes",
            chunk.offset, used
        );
        Some(chunk)
    }

    /// Pushes all of `data` and finishes the stream in one call.
    ///
    /// Convenience for data that is already in memory.
    pub fn chunk_bytes(&mut self, data: impl Into<Bytes>) -> Vec<Chunk> {
        let mut chunks = self.push(data.into());
        chunks.extend(self.finish());
        chunks
    }

    /// Resets the rebuffer for a new stream.
    ///
    /// Drops pending bytes without emitting them, and clears the offset and
    /// statistics. The carry-over buffer allocation is kept.
    pub fn reset(&mut self) {
        self.used = 0;
        self.offset = 0;
        self.stats = RebufferStats::default();
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of bytes waiting in the carry-over buffer.
    ///
    /// Always less than [`Rebuffer::chunk_size`] between calls.
    pub fn pending_len(&self) -> usize {
        self.used
    }

    /// Returns the stream offset of the next chunk to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the running totals for the current stream.
    pub fn stats(&self) -> RebufferStats {
        self.stats
    }

    /// Returns the configuration used by this rebuffer.
    pub fn config(&self) -> &RebufferConfig {
        &self.config
    }

    /// Splits `data` into chunk-sized pieces across the carry-over buffer.
    ///
    /// `shared` is `data` itself when the caller has it as `Bytes`, which
    /// allows whole chunks to be sliced instead of copied.
    fn ingest<F>(&mut self, data: &[u8], shared: Option<&Bytes>, emit: &mut F)
    where
        F: FnMut(Chunk),
    {
        let size = self.chunk_size();
        self.stats.bytes_in += data.len() as u64;

        let mut pos = 0;
        while pos < data.len() {
            let remaining = data.len() - pos;

            if self.used == 0 && remaining >= size {
                let chunk_data = match shared {
                    Some(bytes) => bytes.slice(pos..pos + size),
                    None => Bytes::copy_from_slice(&data[pos..pos + size]),
                };
                emit(self.emit(chunk_data));
                pos += size;
                continue;
            }

            let take = remaining.min(size - self.used);
            self.buf[self.used..self.used + take].copy_from_slice(&data[pos..pos + take]);
            self.used += take;
            pos += take;

            if self.used == size {
                let chunk_data = Bytes::copy_from_slice(&self.buf);
                self.used = 0;
                emit(self.emit(chunk_data));
            }
        }
    }

    /// Stamps offset and hash on outgoing data and advances the counters.
    fn emit(&mut self, data: Bytes) -> Chunk {
        let hash = chunk_hash(self.config.hash_config(), &data);
        let chunk = Chunk {
            offset: self.offset,
            data,
            hash,
        };

        self.offset += chunk.len() as u64;
        self.stats.bytes_out += chunk.len() as u64;
        self.stats.chunks_out += 1;

        trace!("emit chunk: offset={} len={}", chunk.offset, chunk.len());
        chunk
    }
}

impl Default for Rebuffer {
    fn default() -> Self {
        Self::new(RebufferConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuffer(size: usize) -> Rebuffer {
        Rebuffer::with_size(size).unwrap()
    }

    fn datas(chunks: &[Chunk]) -> Vec<Vec<u8>> {
        chunks.iter().map(|c| c.data.to_vec()).collect()
    }

    #[test]
    fn test_new_allocates_chunk_size_buffer() {
        let r = rebuffer(7);
        assert_eq!(r.chunk_size(), 7);
        assert_eq!(r.buf.len(), 7);
        assert_eq!(r.pending_len(), 0);
    }

    #[test]
    #[should_panic(expected = "chunk size must be non-zero")]
    fn test_new_rejects_zero_size() {
        Rebuffer::new(RebufferConfig::default().with_chunk_size(0));
    }

    #[test]
    fn test_try_new_rejects_zero_size() {
        let config = RebufferConfig::default().with_chunk_size(0);
        assert!(Rebuffer::try_new(config).unwrap_err().is_config());
    }

    #[test]
    fn test_empty_push_is_noop() {
        let mut r = rebuffer(3);
        r.push_slice(&[1]);
        assert!(r.push(Bytes::new()).is_empty());
        assert!(r.push_slice(&[]).is_empty());
        assert_eq!(r.pending_len(), 1);
    }

    #[test]
    fn test_spans_input_boundaries() {
        let mut r = rebuffer(3);
        assert!(r.push_slice(&[0, 1]).is_empty());
        let chunks = r.push_slice(&[2, 3]);
        assert_eq!(datas(&chunks), vec![vec![0, 1, 2]]);
        assert_eq!(r.pending_len(), 1);
    }

    #[test]
    fn test_emitted_chunk_is_snapshot() {
        let mut r = rebuffer(2);
        let first = r.push_slice(&[1, 2]);
        // Refill the carry-over buffer with different bytes
        r.push_slice(&[9]);
        let second = r.push_slice(&[8]);
        assert_eq!(&first[0].data[..], &[1, 2]);
        assert_eq!(&second[0].data[..], &[9, 8]);
    }

    #[test]
    fn test_aligned_push_slices_input() {
        let mut r = rebuffer(4);
        let input = Bytes::from(vec![5u8; 8]);
        let chunks = r.push(input.clone());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].data.as_ptr(), input.as_ptr());
        assert_eq!(chunks[1].data.as_ptr(), input[4..].as_ptr());
    }

    #[test]
    fn test_finish_emits_short_tail() {
        let mut r = rebuffer(3);
        r.push_slice(&[0, 1, 2, 3, 4]);
        let tail = r.finish().unwrap();
        assert_eq!(&tail.data[..], &[3, 4]);
        assert_eq!(tail.offset, 3);
        assert!(r.finish().is_none());
    }

    #[test]
    fn test_finish_discards_short_tail() {
        let config = RebufferConfig::new(3)
            .unwrap()
            .with_discard_incomplete_chunks(true);
        let mut r = Rebuffer::new(config);
        r.push_slice(&[0, 1, 2, 3, 4]);
        assert!(r.finish().is_none());
        assert_eq!(r.pending_len(), 0);
        assert_eq!(r.stats().bytes_discarded, 2);
    }

    #[test]
    fn test_stats_and_offsets() {
        let mut r = rebuffer(4);
        let chunks = r.chunk_bytes(vec![0u8; 10]);
        let offsets: Vec<_> = chunks.iter().map(|c| c.offset).collect();
        assert_eq!(offsets, [0, 4, 8]);
        assert_eq!(
            r.stats(),
            RebufferStats {
                bytes_in: 10,
                bytes_out: 10,
                chunks_out: 3,
                bytes_discarded: 0,
            }
        );
        assert_eq!(r.offset(), 10);
    }

    #[test]
    fn test_reset() {
        let mut r = rebuffer(4);
        r.push_slice(&[1, 2, 3, 4, 5]);
        r.reset();
        assert_eq!(r.pending_len(), 0);
        assert_eq!(r.offset(), 0);
        assert_eq!(r.stats(), RebufferStats::default());
        assert_eq!(r.chunk_size(), 4);
    }

    #[test]
    fn test_hashing_disabled_by_default() {
        let mut r = rebuffer(2);
        assert!(r.chunk_bytes(&b"abc"[..]).iter().all(|c| c.hash.is_none()));
    }

    #[test]
    #[cfg(feature = "hash-blake3")]
    fn test_hashing_enabled() {
        let config = RebufferConfig::new(2)
            .unwrap()
            .with_hash_config(crate::config::HashConfig::enabled());
        let mut r = Rebuffer::new(config);
        for chunk in r.chunk_bytes(&b"abc"[..]) {
            assert_eq!(chunk.hash, Some(crate::hash::digest(&chunk.data)));
        }
    }
}
