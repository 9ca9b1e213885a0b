//! # srcpack
//!
//! Packs labeled source files into sharded binary record containers
//! for downstream model training.
//!
//! ## Quick Start
//!
//! ```ignore
//! use srcpack::{Label, PackConfig, ShardedWriter, FileList, read_shard};
//!
//! // Pack every file named in the list, two records per shard
//! let config = PackConfig::new(Label::Obfuscated).capacity(65536);
//! let writer = ShardedWriter::new("./records", config)?;
//! let summary = writer.pack_lines(FileList::open("./files.txt")?)?;
//!
//! // Read one shard back in write order
//! for record in srcpack::ShardReader::open("./records/1.rec")? {
//!     let record = record?;
//!     println!("{} ({} bytes)", record.filename_lossy(), record.data.len());
//! }
//! ```
//!
//! ## Crates
//!
//! - [`srcpack_record`] — the wire format: record encoding, shard
//!   headers, and the checksum-verifying reader
//! - [`srcpack_writer`] — the sharded writer: configuration, lazy
//!   file-list input, capacity-based rollover

#![warn(missing_docs)]

pub use srcpack_record::{
    read_shard, shard_header, Record, RecordError, ShardReader, SHARD_FORMAT_VERSION,
    SHARD_HEADER_SIZE, SHARD_MAGIC,
};
pub use srcpack_writer::{
    FileList, Label, PackConfig, PackError, PackSummary, ReadPolicy, ShardedWriter,
    DEFAULT_SHARD_CAPACITY, SHARD_EXTENSION,
};
