use bytes::{Buf, BufMut};
use thiserror::Error;

/// Version number written after the type tag of every encoded object.
pub type VersionId = u32;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("Unexpected end of data: needed {needed} more byte(s), {remaining} left")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Unknown matcher type '{0}'")]
    UnknownType(String),

    #[error(
        "Cannot decode version {found} of '{type_name}'; supported version(s): {supported}"
    )]
    VersionMismatch {
        type_name: String,
        found: VersionId,
        supported: &'static str,
    },

    #[error("String data is not valid UTF-8")]
    InvalidUtf8,

    #[error("Unknown atom identifier kind {0}")]
    InvalidIdentifierKind(u8),

    #[error("Invalid timeout of {0} seconds")]
    InvalidTimeout(f64),

    #[error("Matchers nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("{field} of {value} does not fit its encoded width")]
    Overflow { field: &'static str, value: u128 },

    #[error("{0} byte(s) left over after decoding")]
    TrailingBytes(usize),
}

pub fn version_error(type_name: &str, found: VersionId, supported: &'static str) -> CodecError {
    CodecError::VersionMismatch {
        type_name: type_name.to_string(),
        found,
        supported,
    }
}

/// Narrows a length or count to the `u32` it is written as.
pub fn checked_u32(field: &'static str, value: usize) -> Result<u32, CodecError> {
    u32::try_from(value).map_err(|_| CodecError::Overflow {
        field,
        value: value as u128,
    })
}

/// Converts a decoded `u64` into a platform index or length.
pub fn checked_usize(field: &'static str, value: u64) -> Result<usize, CodecError> {
    usize::try_from(value).map_err(|_| CodecError::Overflow {
        field,
        value: u128::from(value),
    })
}

fn ensure(buf: &impl Buf, needed: usize) -> Result<(), CodecError> {
    if buf.remaining() < needed {
        return Err(CodecError::UnexpectedEof {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Writes the type tag and format version that start every encoded object.
pub fn write_header(
    buf: &mut impl BufMut,
    type_name: &str,
    version: VersionId,
) -> Result<(), CodecError> {
    write_string(buf, type_name)?;
    buf.put_u32(version);
    Ok(())
}

/// Reads a header written by [`write_header`].
pub fn read_header(buf: &mut impl Buf) -> Result<(String, VersionId), CodecError> {
    let type_name = read_string(buf)?;
    let version = read_u32(buf)?;
    Ok((type_name, version))
}

/// Writes a string as a `u32` byte length followed by UTF-8 bytes.
pub fn write_string(buf: &mut impl BufMut, value: &str) -> Result<(), CodecError> {
    buf.put_u32(checked_u32("string length", value.len())?);
    buf.put_slice(value.as_bytes());
    Ok(())
}

pub fn read_string(buf: &mut impl Buf) -> Result<String, CodecError> {
    let len = checked_usize("string length", u64::from(read_u32(buf)?))?;
    ensure(buf, len)?;
    let mut bytes = vec![0; len];
    buf.copy_to_slice(&mut bytes);
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
}

pub fn write_bool(buf: &mut impl BufMut, value: bool) {
    buf.put_u8(u8::from(value));
}

/// Reads a boolean; any non-zero byte is `true`.
pub fn read_bool(buf: &mut impl Buf) -> Result<bool, CodecError> {
    Ok(read_u8(buf)? != 0)
}

pub fn read_u8(buf: &mut impl Buf) -> Result<u8, CodecError> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

pub fn read_u32(buf: &mut impl Buf) -> Result<u32, CodecError> {
    ensure(buf, 4)?;
    Ok(buf.get_u32())
}

pub fn read_u64(buf: &mut impl Buf) -> Result<u64, CodecError> {
    ensure(buf, 8)?;
    Ok(buf.get_u64())
}

pub fn read_i64(buf: &mut impl Buf) -> Result<i64, CodecError> {
    ensure(buf, 8)?;
    Ok(buf.get_i64())
}

pub fn read_f64(buf: &mut impl Buf) -> Result<f64, CodecError> {
    ensure(buf, 8)?;
    Ok(buf.get_f64())
}
