//! TIFF tag value decoding.
//!
//! A directory entry stores its value either inline, in the last 4 bytes of
//! the entry, or at an offset relative to the start of the TIFF header. The
//! choice depends only on `count * size_in_bytes(type) <= 4`, so LONG and
//! SLONG values are inline exactly when there is a single one, and rationals
//! are never inline.
//!
//! Single numeric values are unwrapped into scalars; multi-valued entries
//! keep file order.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{MetadataError, TiffError};
use crate::io::{decode_text, ByteCursor, ByteOrder};

use super::parser::IfdEntry;
use super::tags::FieldType;

// =============================================================================
// Rational
// =============================================================================

/// A fraction as stored by RATIONAL and SRATIONAL entries.
///
/// Both components are kept so the exact file value can be recovered. The
/// denominator may be zero; use [`Rational::checked_value`] where that
/// matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `numerator / denominator` as a float (infinite or NaN for a zero denominator).
    #[inline]
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// `numerator / denominator`, or `None` when the denominator is zero.
    #[inline]
    pub fn checked_value(&self) -> Option<f64> {
        (self.denominator != 0).then(|| self.value())
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.checked_value() {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "{}/{}", self.numerator, self.denominator),
        }
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Rational", 3)?;
        state.serialize_field("value", &self.checked_value())?;
        state.serialize_field("numerator", &self.numerator)?;
        state.serialize_field("denominator", &self.denominator)?;
        state.end()
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// A decoded directory entry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Single BYTE, UNDEFINED, SHORT or LONG
    Unsigned(u32),

    /// Several BYTE, UNDEFINED, SHORT or LONG values
    UnsignedList(Vec<u32>),

    /// Single SLONG
    Signed(i32),

    /// Several SLONG values
    SignedList(Vec<i32>),

    /// ASCII string without its trailing NUL
    Ascii(String),

    /// Single RATIONAL or SRATIONAL
    Rational(Rational),

    /// Several RATIONAL or SRATIONAL values
    RationalList(Vec<Rational>),
}

impl TagValue {
    /// The value as a single unsigned integer.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TagValue::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a list of unsigned integers (a scalar becomes one element).
    pub fn as_unsigned_slice(&self) -> Option<&[u32]> {
        match self {
            TagValue::Unsigned(v) => Some(std::slice::from_ref(v)),
            TagValue::UnsignedList(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Ascii(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            TagValue::Rational(r) => Some(*r),
            _ => None,
        }
    }

    /// Number of elements (characters for strings).
    pub fn len(&self) -> usize {
        match self {
            TagValue::Unsigned(_) | TagValue::Signed(_) | TagValue::Rational(_) => 1,
            TagValue::UnsignedList(v) => v.len(),
            TagValue::SignedList(v) => v.len(),
            TagValue::RationalList(v) => v.len(),
            TagValue::Ascii(s) => s.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the value holds more than one element.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            TagValue::UnsignedList(_) | TagValue::SignedList(_) | TagValue::RationalList(_)
        )
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", v)?;
            }
            Ok(())
        }

        match self {
            TagValue::Unsigned(v) => write!(f, "{}", v),
            TagValue::Signed(v) => write!(f, "{}", v),
            TagValue::Ascii(s) => f.write_str(s),
            TagValue::Rational(r) => write!(f, "{}", r),
            TagValue::UnsignedList(v) => join(f, v),
            TagValue::SignedList(v) => join(f, v),
            TagValue::RationalList(v) => join(f, v),
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode the value of a directory entry.
///
/// # Arguments
/// * `cursor` - The whole buffer
/// * `entry` - The entry to decode
/// * `tiff_start` - Absolute offset of the TIFF header (base of value offsets)
/// * `order` - Byte order of the TIFF stream
///
/// # Errors
/// - `UnsupportedTagType` if the type code is not handled
/// - `MalformedTiff(EmptyValue)` if a numeric entry has a count of zero
/// - `TruncatedData` if the value lies outside the buffer
pub fn decode_value(
    cursor: &ByteCursor<'_>,
    entry: &IfdEntry,
    tiff_start: usize,
    order: ByteOrder,
) -> Result<TagValue, MetadataError> {
    let field_type = entry
        .field_type()
        .ok_or(MetadataError::UnsupportedTagType(entry.field_type_raw))?;

    // Numeric values are never empty; an empty string is still a string
    if entry.count == 0 && field_type != FieldType::Ascii {
        return Err(TiffError::EmptyValue(entry.tag).into());
    }

    let data_offset = if field_type.fits_inline(entry.count) {
        entry.inline_value_offset()
    } else {
        tiff_start
            .checked_add(entry.value_offset as usize)
            .ok_or(MetadataError::TruncatedData {
                offset: tiff_start,
                requested: entry.value_offset as usize,
                size: cursor.len(),
            })?
    };

    let count = entry.count as usize;

    // One bounds check for the whole value before anything is allocated,
    // so a hostile count cannot trigger a huge allocation. ASCII drops its
    // trailing NUL.
    let byte_len = if field_type == FieldType::Ascii {
        count.saturating_sub(1)
    } else {
        count
            .checked_mul(field_type.size_in_bytes())
            .ok_or(MetadataError::TruncatedData {
                offset: data_offset,
                requested: usize::MAX,
                size: cursor.len(),
            })?
    };
    let bytes = cursor.slice(data_offset, byte_len)?;

    let value = match field_type {
        FieldType::Byte | FieldType::Undefined => {
            unsigned(bytes.iter().map(|&b| b as u32).collect())
        }
        FieldType::Short => unsigned(
            bytes
                .chunks_exact(2)
                .map(|c| order.read_u16(c) as u32)
                .collect(),
        ),
        FieldType::Long => unsigned(bytes.chunks_exact(4).map(|c| order.read_u32(c)).collect()),
        FieldType::SLong => {
            let mut values: Vec<i32> = bytes
                .chunks_exact(4)
                .map(|c| order.read_u32(c) as i32)
                .collect();
            if values.len() == 1 {
                TagValue::Signed(values.remove(0))
            } else {
                TagValue::SignedList(values)
            }
        }
        FieldType::Rational => rational(
            bytes
                .chunks_exact(8)
                .map(|c| {
                    Rational::new(
                        order.read_u32(&c[..4]) as i64,
                        order.read_u32(&c[4..]) as i64,
                    )
                })
                .collect(),
        ),
        FieldType::SRational => rational(
            bytes
                .chunks_exact(8)
                .map(|c| {
                    Rational::new(
                        order.read_u32(&c[..4]) as i32 as i64,
                        order.read_u32(&c[4..]) as i32 as i64,
                    )
                })
                .collect(),
        ),
        FieldType::Ascii => TagValue::Ascii(decode_text(bytes)),
    };

    Ok(value)
}

fn unsigned(mut values: Vec<u32>) -> TagValue {
    if values.len() == 1 {
        TagValue::Unsigned(values.remove(0))
    } else {
        TagValue::UnsignedList(values)
    }
}

fn rational(mut values: Vec<Rational>) -> TagValue {
    if values.len() == 1 {
        TagValue::Rational(values.remove(0))
    } else {
        TagValue::RationalList(values)
    }
}

// =============================================================================
// Tests
// =============================================================================
