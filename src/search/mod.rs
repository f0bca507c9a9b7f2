//! The external-memory breadth-first search driver and its configuration.

use std::fmt;

pub mod bfs;

/// Fatal solver failures. Engine rejections and unsolvable puzzles are *not*
/// errors; per the error policy only resource problems surface here, and
/// nothing is retried.
#[derive(Debug)]
pub enum SolverError {
    Io { stage: &'static str, error: String },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Io { stage, error } => write!(f, "io error at {stage}: {error}"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Tunables for the disk-backed search. The defaults suit the large puzzles;
/// tests shrink them to exercise spilling and resharding on small inputs.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Approximate memory target, partitioned across shard buffers and sort
    /// chunks.
    pub mem_target: usize,
    /// Starting shard count (rounded up to a power of two).
    pub initial_shards: usize,
    /// Average pairs per shard above which the shard count doubles.
    pub shard_high_water: u64,
    /// Average pairs per shard below which the shard count halves.
    pub shard_low_water: u64,
    /// Upper bound on the shard count.
    pub max_shards: usize,
    /// Suppress the stdout renderings and progress trace.
    pub quiet: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mem_target: 2 << 30,
            initial_shards: 1,
            shard_high_water: 100_000_000,
            shard_low_water: 10_000_000,
            max_shards: 256,
            quiet: false,
        }
    }
}

/// What one solve produced. `moves` is 0 when the puzzle has no solution;
/// `path` holds the rendered states from start to win when it does.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub moves: usize,
    pub states: u64,
    pub stored_bytes: u64,
    pub path: Vec<String>,
}
