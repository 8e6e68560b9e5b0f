//! # Storage Error Types
//!
//! This module defines the error kinds surfaced by the storage core: page,
//! WAL, pager and the database facade. Every kind is distinguishable by the
//! caller; nothing is retried internally and replay aborts on the first
//! corruption it encounters.
//!
//! The SQL layer wraps these in [`crate::sql::SqlError`]; the CLI maps both
//! to short human strings while the kind stays assertable underneath.

use std::io;
use thiserror::Error;

use crate::config::MAX_VALUE_SIZE;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in the storage core.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file read/write/seek/sync failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A short read where the remaining bytes were mandatory.
    #[error("unexpected end of file")]
    UnexpectedEndOfFile,

    /// WAL magic, version, or header CRC invalid.
    #[error("bad WAL header")]
    BadHeader,

    /// WAL record CRC mismatch.
    #[error("WAL record checksum mismatch")]
    BadChecksum,

    /// Unrecognised WAL op byte.
    #[error("invalid WAL op byte {0:#04x}")]
    InvalidWalOp(u8),

    /// Page full even after defragmentation.
    #[error("page out of space")]
    OutOfSpace,

    /// Value exceeds the record length prefix.
    #[error("value too large: {0} bytes exceeds maximum {MAX_VALUE_SIZE}")]
    ValueTooLarge(usize),

    /// Slot index past the end of the slot table.
    #[error("slot index {0} out of bounds")]
    OutOfBounds(u16),
}

impl StorageError {
    /// True when the error indicates on-disk corruption rather than an
    /// environmental or usage failure.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::BadHeader | Self::BadChecksum | Self::InvalidWalOp(_) | Self::UnexpectedEndOfFile
        )
    }
}

/// Maps `io::ErrorKind::UnexpectedEof` from a mandatory read to
/// [`StorageError::UnexpectedEndOfFile`], leaving other I/O errors intact.
pub(crate) fn map_eof(err: io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        StorageError::UnexpectedEndOfFile
    } else {
        StorageError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corruption_classification() {
        assert!(StorageError::BadHeader.is_corruption());
        assert!(StorageError::BadChecksum.is_corruption());
        assert!(StorageError::InvalidWalOp(0x7f).is_corruption());
        assert!(StorageError::UnexpectedEndOfFile.is_corruption());
        assert!(!StorageError::OutOfSpace.is_corruption());
        assert!(!StorageError::ValueTooLarge(70000).is_corruption());
    }

    #[test]
    fn eof_maps_to_unexpected_end_of_file() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        assert!(matches!(map_eof(err), StorageError::UnexpectedEndOfFile));

        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(map_eof(err), StorageError::Io(_)));
    }

    #[test]
    fn display_includes_detail() {
        let msg = StorageError::InvalidWalOp(0x03).to_string();
        assert!(msg.contains("0x03"));

        let msg = StorageError::ValueTooLarge(70000).to_string();
        assert!(msg.contains("70000"));
    }
}
