//! Exportable solved-puzzle bundles.
//!
//! A solution file is a small JSON manifest: enough to replay or inspect a
//! solve without re-running the search. Rendered states are stored verbatim,
//! so the bundle stays meaningful even if the packed format changes.

use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::params::Params;
use crate::search::{SolveOutcome, SolverError};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionManifest {
    pub format_version: u32,
    pub level: String,
    pub params: ParamsManifest,
    pub moves: usize,
    pub states_visited: u64,
    pub stored_bytes: u64,
    /// Rendered states from start to win, one multi-line string per step.
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsManifest {
    pub height: usize,
    pub width: usize,
    pub fruit: usize,
    pub snakes: usize,
    pub snake_max_len: usize,
    pub gadgets: usize,
    pub teleporters: usize,
}

impl From<Params> for ParamsManifest {
    fn from(p: Params) -> ParamsManifest {
        ParamsManifest {
            height: p.height,
            width: p.width,
            fruit: p.fruit,
            snakes: p.snakes,
            snake_max_len: p.snake_max_len,
            gadgets: p.gadgets,
            teleporters: p.teleporters,
        }
    }
}

pub fn manifest_for(level: &str, params: Params, outcome: &SolveOutcome) -> SolutionManifest {
    SolutionManifest {
        format_version: FORMAT_VERSION,
        level: level.to_string(),
        params: params.into(),
        moves: outcome.moves,
        states_visited: outcome.states,
        stored_bytes: outcome.stored_bytes,
        path: outcome.path.clone(),
    }
}

pub fn write_solution(path: &Path, manifest: &SolutionManifest) -> Result<(), SolverError> {
    let file = fs::File::create(path).map_err(|e| SolverError::Io {
        stage: "create solution file",
        error: e.to_string(),
    })?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, manifest).map_err(|e| SolverError::Io {
        stage: "write solution manifest",
        error: e.to_string(),
    })
}

pub fn load_solution(path: &Path) -> Result<SolutionManifest, SolverError> {
    let file = fs::File::open(path).map_err(|e| SolverError::Io {
        stage: "open solution file",
        error: e.to_string(),
    })?;
    let r = BufReader::new(file);
    let manifest: SolutionManifest = serde_json::from_reader(r).map_err(|e| SolverError::Io {
        stage: "parse solution manifest",
        error: e.to_string(),
    })?;
    assert_eq!(
        manifest.format_version, FORMAT_VERSION,
        "unsupported solution format version"
    );
    Ok(manifest)
}
