//! Packing run configuration.
//!
//! One explicit configuration value per run instead of constants
//! scattered across call sites: capacity, shard filename prefix,
//! label, verbosity, and the unreadable-file policy.

use crate::error::PackError;

/// Default number of records per shard.
pub const DEFAULT_SHARD_CAPACITY: usize = 65536;

/// Extension appended to every shard filename.
pub const SHARD_EXTENSION: &str = "rec";

/// Obfuscation label applied uniformly to every record in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Non-obfuscated source (wire value 0)
    Clean,
    /// Obfuscated source (wire value 1)
    Obfuscated,
}

impl Label {
    /// The fixed-width integer stored in each record.
    pub fn as_wire(self) -> u64 {
        match self {
            Label::Clean => 0,
            Label::Obfuscated => 1,
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = PackError;

    /// Validate a raw label value. Anything other than 0 or 1 is
    /// rejected here, before any I/O happens.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Clean),
            1 => Ok(Label::Obfuscated),
            other => Err(PackError::InvalidLabel(other)),
        }
    }
}

/// Policy for source files that cannot be opened or read mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Abort the whole run on the first unreadable file. Shards
    /// already finalized remain on disk. Matches the historical
    /// behavior and is the default.
    #[default]
    FailFast,

    /// Log the unreadable file at `warn` level, count it in the run
    /// summary, and continue with the next path.
    SkipAndLog,
}

/// Configuration for one packing run.
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Maximum records per shard; the last shard may hold fewer.
    pub capacity: usize,
    /// Prefix prepended to each shard's numeric filename. May be empty.
    pub prefix: String,
    /// Label applied to every record in the run.
    pub label: Label,
    /// Emit one progress line per record to stdout.
    pub verbose: bool,
    /// What to do when a listed source file cannot be read.
    pub read_policy: ReadPolicy,
}

impl PackConfig {
    /// Configuration with defaults: capacity 65536, empty prefix,
    /// quiet, fail-fast.
    pub fn new(label: Label) -> Self {
        Self {
            capacity: DEFAULT_SHARD_CAPACITY,
            prefix: String::new(),
            label,
            verbose: false,
            read_policy: ReadPolicy::FailFast,
        }
    }

    /// Set the records-per-shard capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the shard filename prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Enable or disable per-record progress output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the unreadable-file policy.
    pub fn read_policy(mut self, policy: ReadPolicy) -> Self {
        self.read_policy = policy;
        self
    }

    /// Pre-flight validation; runs before any filesystem side effect.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.capacity == 0 {
            return Err(PackError::InvalidCapacity);
        }
        Ok(())
    }
}
