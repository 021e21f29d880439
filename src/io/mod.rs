//! Byte access layer.
//!
//! Every parser in this crate works on an already materialised, immutable
//! buffer. [`ByteCursor`] adds bounds checking and endian-aware reads on top
//! of a borrowed slice so that attacker-controlled offsets can never index
//! past the end of the data.

mod cursor;

pub use cursor::{
    decode_text, read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteCursor, ByteOrder,
};
