use bytes::Bytes;

use crate::error::MetadataError;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF stream.
///
/// TIFF streams declare their byte order in the first two bytes of the header.
/// All multi-byte offsets and values inside that stream use this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Whether this is big-endian.
    #[inline]
    pub const fn is_big_endian(self) -> bool {
        matches!(self, ByteOrder::BigEndian)
    }
}

// =============================================================================
// ByteCursor
// =============================================================================

/// Bounds-checked random access over an immutable byte buffer.
///
/// There is no implicit position: every read takes an absolute offset, which
/// matches how TIFF offsets point anywhere in the stream. Reads that would go
/// past the end of the buffer fail with [`MetadataError::TruncatedData`].
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    /// Wrap a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying buffer.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], MetadataError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(&self.data[offset..end]),
            _ => Err(MetadataError::TruncatedData {
                offset,
                requested: len,
                size: self.data.len(),
            }),
        }
    }

    /// Copy `len` bytes starting at `offset` into an owned buffer.
    pub fn copy_range(&self, offset: usize, len: usize) -> Result<Bytes, MetadataError> {
        self.slice(offset, len).map(Bytes::copy_from_slice)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, MetadataError> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> Result<u16, MetadataError> {
        Ok(order.read_u16(self.slice(offset, 2)?))
    }

    pub fn read_u32(&self, offset: usize, order: ByteOrder) -> Result<u32, MetadataError> {
        Ok(order.read_u32(self.slice(offset, 4)?))
    }

    pub fn read_i16(&self, offset: usize, order: ByteOrder) -> Result<i16, MetadataError> {
        self.read_u16(offset, order).map(|v| v as i16)
    }

    pub fn read_i32(&self, offset: usize, order: ByteOrder) -> Result<i32, MetadataError> {
        self.read_u32(offset, order).map(|v| v as i32)
    }

    /// Decode `len` bytes at `offset` as text.
    ///
    /// Valid UTF-8 is taken as is; anything else is read one byte per
    /// character (Latin-1), so arbitrary binary never fails to decode.
    pub fn read_string(&self, offset: usize, len: usize) -> Result<String, MetadataError> {
        Ok(decode_text(self.slice(offset, len)?))
    }

    /// Check whether `pattern` occurs at `offset`. Out-of-range is a mismatch.
    #[inline]
    pub fn matches_at(&self, offset: usize, pattern: &[u8]) -> bool {
        self.slice(offset, pattern.len())
            .map(|bytes| bytes == pattern)
            .unwrap_or(false)
    }

    /// Find the first occurrence of `pattern` at or after `from`.
    pub fn find(&self, pattern: &[u8], from: usize) -> Option<usize> {
        if pattern.is_empty() || from >= self.data.len() {
            return None;
        }
        self.data[from..]
            .windows(pattern.len())
            .position(|window| window == pattern)
            .map(|pos| pos + from)
    }
}

/// Decode bytes as UTF-8, falling back to one character per byte.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
