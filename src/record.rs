//! # Row Tuple Codec
//!
//! Serialises the SQL layer's row tuples into the opaque byte payloads the
//! storage core persists. The encoding is a tagged, little-endian format:
//!
//! ```text
//! [count:u8] then per value:
//!   Integer: [tag=1][i64 LE]
//!   Text:    [tag=2][len:u16 LE][utf-8 bytes]
//! ```
//!
//! Decoding keeps the storage error kinds closed: truncation, an unknown
//! tag or invalid UTF-8 can only arise from a torn or foreign payload and
//! all surface as `UnexpectedEndOfFile`.

use std::fmt;

use crate::error::{StorageError, StorageResult};

const TAG_INTEGER: u8 = 1;
const TAG_TEXT: u8 = 2;

/// A single column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Encodes a row of up to 255 values.
pub fn encode_row(values: &[Value]) -> StorageResult<Vec<u8>> {
    if values.len() > u8::MAX as usize {
        return Err(StorageError::ValueTooLarge(values.len()));
    }

    let mut out = Vec::with_capacity(1 + values.len() * 9);
    out.push(values.len() as u8);

    for value in values {
        match value {
            Value::Integer(n) => {
                out.push(TAG_INTEGER);
                out.extend_from_slice(&n.to_le_bytes());
            }
            Value::Text(s) => {
                if s.len() > u16::MAX as usize {
                    return Err(StorageError::ValueTooLarge(s.len()));
                }
                out.push(TAG_TEXT);
                out.extend_from_slice(&(s.len() as u16).to_le_bytes());
                out.extend_from_slice(s.as_bytes());
            }
        }
    }

    Ok(out)
}

/// Decodes a row previously produced by [`encode_row`].
pub fn decode_row(bytes: &[u8]) -> StorageResult<Vec<Value>> {
    let mut reader = Reader { bytes, pos: 0 };

    let count = reader.read_u8()? as usize;
    let mut values = Vec::with_capacity(count);

    for _ in 0..count {
        match reader.read_u8()? {
            TAG_INTEGER => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(reader.read_bytes(8)?);
                values.push(Value::Integer(i64::from_le_bytes(buf)));
            }
            TAG_TEXT => {
                let mut buf = [0u8; 2];
                buf.copy_from_slice(reader.read_bytes(2)?);
                let len = u16::from_le_bytes(buf) as usize;
                let text = std::str::from_utf8(reader.read_bytes(len)?)
                    .map_err(|_| StorageError::UnexpectedEndOfFile)?;
                values.push(Value::Text(text.to_string()));
            }
            _ => return Err(StorageError::UnexpectedEndOfFile),
        }
    }

    Ok(values)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn read_u8(&mut self) -> StorageResult<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(StorageError::UnexpectedEndOfFile)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_bytes(&mut self, len: usize) -> StorageResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or(StorageError::UnexpectedEndOfFile)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(StorageError::UnexpectedEndOfFile)?;
        self.pos = end;
        Ok(slice)
    }
}
