//! Chunk digest type.

use std::fmt;

/// A 32-byte BLAKE3 digest of one chunk's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkHash([u8; 32]);

impl ChunkHash {
    /// The size of the hash in bytes.
    pub const SIZE: usize = 32;

    /// Wraps a raw digest.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds a hash from a slice, or `None` if it is not 32 bytes long.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Returns the raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the digest as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl AsRef<[u8]> for ChunkHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ChunkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{:02x}", b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        let hash = ChunkHash::from_slice(&[1u8; 32]).unwrap();
        assert_eq!(hash.as_bytes(), &[1u8; 32]);

        assert!(ChunkHash::from_slice(&[0u8; 31]).is_none());
        assert!(ChunkHash::from_slice(&[0u8; 33]).is_none());
    }

    #[test]
    fn test_to_hex() {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&[0x01, 0xab, 0xcd, 0xef]);
        let hex = ChunkHash::new(bytes).to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("01abcdef00"));
    }
}
