//! The sharded writer: reads listed files, encodes records, rolls
//! shards over at capacity.
//!
//! Exactly one shard file is open for writing at any time, owned
//! exclusively by the writer until it is finalized. A shard is
//! finalized (flushed and closed) exactly once, either at capacity or
//! at end of input, and is never reopened. A shard is only created
//! once a record is actually pending, so an empty input stream leaves
//! the output directory empty.

use crate::config::{PackConfig, ReadPolicy, SHARD_EXTENSION};
use crate::error::{PackError, Result};
use crate::list::path_from_line;
use srcpack_record::{shard_header, Record};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Summary of a completed packing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackSummary {
    /// Shard files finalized
    pub shards_written: u64,
    /// Records written across all shards
    pub records_written: u64,
    /// Source files skipped under [`ReadPolicy::SkipAndLog`]
    pub skipped: u64,
}

/// Streams listed source files into sharded record containers.
#[derive(Debug)]
pub struct ShardedWriter {
    dir: PathBuf,
    config: PackConfig,
}

impl ShardedWriter {
    /// Create a writer for `dir` with the given configuration.
    ///
    /// Configuration is validated here; the directory itself is not
    /// touched until a run starts.
    pub fn new(dir: impl Into<PathBuf>, config: PackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dir: dir.into(),
            config,
        })
    }

    /// Pack an in-memory sequence of paths.
    ///
    /// Convenience wrapper over [`ShardedWriter::pack_lines`] for
    /// callers that already hold the list.
    pub fn pack<I, S>(&self, paths: I) -> Result<PackSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pack_lines(
            paths
                .into_iter()
                .map(|p| Ok(p.as_ref().to_string())),
        )
    }

    /// Pack a lazy stream of list lines, one path per line.
    ///
    /// Blank lines (after trailing-whitespace trimming) are skipped;
    /// only exhaustion of the stream completes the run. Consumes the
    /// stream exactly once and never buffers it.
    pub fn pack_lines<I>(&self, lines: I) -> Result<PackSummary>
    where
        I: IntoIterator<Item = std::io::Result<String>>,
    {
        self.ensure_output_dir()?;

        let mut summary = PackSummary::default();
        let mut shard_index: u64 = 1;
        let mut open: Option<OpenShard> = None;

        for line in lines {
            let line = line.map_err(PackError::ListRead)?;
            let path = match path_from_line(&line) {
                Some(path) => path,
                None => continue,
            };

            let data = match fs::read(path) {
                Ok(data) => data,
                Err(e) => match self.config.read_policy {
                    ReadPolicy::FailFast => {
                        // Keep whatever the open shard already holds
                        // readable before surfacing the abort.
                        if let Some(shard) = open.take() {
                            if let Err(close_err) = shard.finalize() {
                                warn!(error = %close_err, "failed to finalize shard during abort");
                            }
                        }
                        return Err(PackError::SourceRead {
                            path: PathBuf::from(path),
                            source: e,
                        });
                    }
                    ReadPolicy::SkipAndLog => {
                        warn!(path, error = %e, "skipping unreadable source file");
                        summary.skipped += 1;
                        continue;
                    }
                },
            };

            // Open the next shard only once a record is pending.
            let mut shard = match open.take() {
                Some(shard) => shard,
                None => OpenShard::create(self.shard_path(shard_index))?,
            };

            if self.config.verbose {
                println!(
                    "[{} {}/{}] {}",
                    shard.filename(),
                    shard.records,
                    self.config.capacity,
                    path
                );
            }

            let record = Record::new(path, data, self.config.label.as_wire());
            shard.append(&record.encode())?;
            summary.records_written += 1;

            if shard.records == self.config.capacity {
                shard.finalize()?;
                summary.shards_written += 1;
                shard_index += 1;
            } else {
                open = Some(shard);
            }
        }

        if let Some(shard) = open.take() {
            shard.finalize()?;
            summary.shards_written += 1;
        }

        debug!(
            shards = summary.shards_written,
            records = summary.records_written,
            skipped = summary.skipped,
            "packing run complete"
        );
        Ok(summary)
    }

    /// Shard filename for a 1-based index: `{prefix}{index}.rec`,
    /// no zero-padding.
    fn shard_path(&self, index: u64) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", self.config.prefix, index, SHARD_EXTENSION))
    }

    /// Create the output directory if absent. Missing parents are not
    /// created; an unusable path is a pre-flight error.
    fn ensure_output_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir(&self.dir).map_err(|e| PackError::OutputDir {
            path: self.dir.clone(),
            source: e,
        })
    }
}

/// The currently open shard file and its record count.
struct OpenShard {
    path: PathBuf,
    file: BufWriter<File>,
    records: usize,
}

impl OpenShard {
    /// Create the shard file and write its header. Overwrites any
    /// pre-existing file of the same name.
    fn create(path: PathBuf) -> Result<Self> {
        let file = File::create(&path).map_err(|e| shard_write(&path, e))?;
        let mut file = BufWriter::new(file);
        file.write_all(&shard_header())
            .map_err(|e| shard_write(&path, e))?;
        Ok(Self {
            path,
            file,
            records: 0,
        })
    }

    fn filename(&self) -> std::borrow::Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }

    fn append(&mut self, encoded: &[u8]) -> Result<()> {
        self.file
            .write_all(encoded)
            .map_err(|e| shard_write(&self.path, e))?;
        self.records += 1;
        Ok(())
    }

    /// Flush and close. Called exactly once per shard.
    fn finalize(mut self) -> Result<()> {
        self.file.flush().map_err(|e| shard_write(&self.path, e))
    }
}

fn shard_write(path: &Path, source: std::io::Error) -> PackError {
    PackError::ShardWrite {
        path: path.to_path_buf(),
        source,
    }
}
