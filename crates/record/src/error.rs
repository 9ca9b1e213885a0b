//! Error types for the srcpack wire format.

use thiserror::Error;

/// Errors produced while reading or decoding shard files.
///
/// Encoding itself is infallible: a [`crate::Record`] always carries a
/// filename and label by construction, and any byte sequence is a
/// valid payload. Every failure mode here is on the decode side.
#[derive(Debug, Error)]
pub enum RecordError {
    /// File does not start with the shard magic bytes.
    #[error("not a srcpack shard file (bad magic)")]
    BadMagic,

    /// Shard was written by a format version this reader does not know.
    #[error("unsupported shard format version {version}")]
    UnsupportedVersion {
        /// Version found in the shard header
        version: u32,
    },

    /// Record frame or payload ended before its declared length.
    #[error("truncated record at offset {offset}: need {needed} bytes, have {have}")]
    TruncatedRecord {
        /// Byte offset of the record frame in the shard
        offset: u64,
        /// Bytes the frame declared
        needed: usize,
        /// Bytes actually available
        have: usize,
    },

    /// Stored checksum does not match the payload bytes.
    #[error("checksum mismatch at offset {offset}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// Byte offset of the record frame in the shard
        offset: u64,
        /// Checksum stored in the frame
        expected: u32,
        /// Checksum computed over the payload
        actual: u32,
    },

    /// Payload contains a field tag this version does not define.
    #[error("unknown field tag {tag:#04x} in record at offset {offset}")]
    UnknownFieldTag {
        /// The unrecognized tag byte
        tag: u8,
        /// Byte offset of the record frame in the shard
        offset: u64,
    },

    /// A required field was absent from an otherwise well-formed payload.
    #[error("record at offset {offset} is missing required field `{field}`")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
        /// Byte offset of the record frame in the shard
        offset: u64,
    },

    /// Record length does not fit in addressable memory on this platform.
    #[error("record length {len} at offset {offset} exceeds addressable memory")]
    OversizedRecord {
        /// Declared payload length
        len: u64,
        /// Byte offset of the record frame in the shard
        offset: u64,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordError {
    /// Check if this error indicates on-disk corruption rather than an
    /// I/O fault or version skew.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            RecordError::TruncatedRecord { .. }
                | RecordError::ChecksumMismatch { .. }
                | RecordError::UnknownFieldTag { .. }
                | RecordError::MissingField { .. }
        )
    }
}

/// Result type for wire format operations.
pub type Result<T> = std::result::Result<T, RecordError>;
