//! Sharded record writer for labeled source-file datasets.
//!
//! Streams an unbounded list of source-file paths into a sequence of
//! size-bounded shard files. Each listed file is read byte-for-byte,
//! encoded as one record (filename, data, label), and appended to the
//! currently open shard; shards roll over at a configured record
//! capacity and are named `{prefix}{index}.rec` with a 1-based index.
//!
//! The pipeline is single-threaded and strictly sequential: record
//! order within a shard, and the shard each record lands in, follow
//! input order exactly.

#![warn(missing_docs)]

mod config;
mod error;
mod list;
mod writer;

pub use config::{Label, PackConfig, ReadPolicy, DEFAULT_SHARD_CAPACITY, SHARD_EXTENSION};
pub use error::{PackError, Result};
pub use list::FileList;
pub use writer::{PackSummary, ShardedWriter};
