//! The Chunk type - one fixed-size (or final short) output block.

use bytes::Bytes;
use std::fmt;
use std::ops::Range;

use super::ChunkHash;

/// A block emitted by a [`Rebuffer`](crate::Rebuffer).
///
/// `data` is an immutable snapshot: it is either copied out of the rebuffer's
/// carry-over buffer or sliced from an input block, so nothing the rebuffer
/// does afterwards can change it.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use rechunkrs::Chunk;
///
/// let chunk = Chunk::new(Bytes::from_static(b"abc"), 6);
///
/// assert_eq!(chunk.len(), 3);
/// assert_eq!(chunk.range(), 6..9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// Offset of the first byte in the logical input stream.
    pub offset: u64,

    /// The content hash of this chunk (if computed).
    pub hash: Option<ChunkHash>,
}

impl Chunk {
    /// Creates a new chunk at the given stream offset.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
            hash: None,
        }
    }

    /// Attaches a hash.
    pub fn with_hash(mut self, hash: ChunkHash) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    ///
    /// A [`Rebuffer`](crate::Rebuffer) never emits empty chunks.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if this chunk is shorter than `chunk_size`.
    ///
    /// Only the last chunk of a stream can be short.
    pub fn is_short(&self, chunk_size: usize) -> bool {
        self.data.len() < chunk_size
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the byte range this chunk covers in the input stream.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Chunk> for Bytes {
    fn from(chunk: Chunk) -> Self {
        chunk.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes @ {}", self.len(), self.offset)?;
        if let Some(hash) = self.hash {
            write!(f, ", hash={}", hash)?;
        }
        write!(f, ")")
    }
}
