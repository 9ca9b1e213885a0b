//! Wire format for srcpack shard files.
//!
//! A shard file is a fixed 8-byte header (magic + format version)
//! followed by a sequence of length-delimited, CRC-checked records.
//! Each record carries three tagged fields: the source filename, the
//! raw file bytes, and the obfuscation label.
//!
//! The format is self-describing and decodable record-by-record
//! without seeking past unrelated records. Payloads are copied
//! byte-for-byte: invalid UTF-8 and embedded NUL bytes round-trip
//! losslessly.

#![warn(missing_docs)]

mod error;
mod reader;
mod record;

pub use error::{RecordError, Result};
pub use reader::{read_shard, ShardReader};
pub use record::{
    shard_header, Record, SHARD_FORMAT_VERSION, SHARD_HEADER_SIZE, SHARD_MAGIC,
};
