//! Frontier expansion over disk-backed visited runs.
//!
//! The visited set lives in one [`FileArray`] of delta-compressed sorted
//! runs, one run per depth; a parallel array holds one parent-hash byte per
//! state. Each depth streams the newest run through the engine, shards the
//! successors by hash, sorts and deduplicates every shard, merges the shards
//! against every prior run, and appends the survivors as the next run. No
//! parent pointers are kept: the winning path is rebuilt afterwards by
//! re-expanding candidate parents whose hash byte matches the stored tag.

use std::hash::Hasher;
use std::io;
use std::time::Instant;

use log::debug;
use rayon::slice::ParallelSliceMut;
use rustc_hash::FxHasher;

use crate::game::engine::Engine;
use crate::game::map::Map;
use crate::game::params::MAX_PACKED_BYTES;
use crate::game::render::render;
use crate::game::state::{State, StateShape};
use crate::search::{SolveOutcome, SolverConfig, SolverError};
use crate::store::codec::{RecordCompressor, RecordDecompressor};
use crate::store::file_array::{FileArray, Run, Snapshot};
use crate::store::merge::MergeIter;

const REC_CAP: usize = MAX_PACKED_BYTES + 1;

/// A packed state plus its parent-hash byte, inline and comparable by key so
/// sort, merge and dedup never chase pointers.
#[derive(Clone, Copy)]
struct Rec {
    len: u8,
    bytes: [u8; REC_CAP],
}

impl Rec {
    fn from_pair(pair: &[u8], key_len: usize) -> Rec {
        debug_assert_eq!(pair.len(), key_len + 1);
        let mut bytes = [0u8; REC_CAP];
        bytes[..pair.len()].copy_from_slice(pair);
        Rec {
            len: key_len as u8,
            bytes,
        }
    }

    fn from_key(key: &[u8], tag: u8) -> Rec {
        let mut bytes = [0u8; REC_CAP];
        bytes[..key.len()].copy_from_slice(key);
        bytes[key.len()] = tag;
        Rec {
            len: key.len() as u8,
            bytes,
        }
    }

    #[inline]
    fn key(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    fn tag(&self) -> u8 {
        self.bytes[self.len as usize]
    }

    #[inline]
    fn pair(&self) -> &[u8] {
        &self.bytes[..self.len as usize + 1]
    }
}

impl PartialEq for Rec {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Rec {}
impl PartialOrd for Rec {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Rec {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(other.key())
    }
}

/// Iterate the fixed-size `(key, tag)` pairs of a raw byte slice.
struct PairIter<'a> {
    data: &'a [u8],
    pair_len: usize,
    key_len: usize,
    pos: usize,
}

impl<'a> PairIter<'a> {
    fn new(data: &'a [u8], key_len: usize) -> PairIter<'a> {
        debug_assert_eq!(data.len() % (key_len + 1), 0);
        PairIter {
            data,
            pair_len: key_len + 1,
            key_len,
            pos: 0,
        }
    }
}

impl Iterator for PairIter<'_> {
    type Item = Rec;

    fn next(&mut self) -> Option<Rec> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rec = Rec::from_pair(&self.data[self.pos..self.pos + self.pair_len], self.key_len);
        self.pos += self.pair_len;
        Some(rec)
    }
}

/// Iterate the keys of one compressed visited run (tags read as zero).
struct RunRecords {
    dec: RecordDecompressor,
    key_len: usize,
}

impl RunRecords {
    fn new(compressed: &[u8], key_len: usize) -> io::Result<RunRecords> {
        Ok(RunRecords {
            dec: RecordDecompressor::new(compressed, key_len)?,
            key_len,
        })
    }
}

impl Iterator for RunRecords {
    type Item = Rec;

    fn next(&mut self) -> Option<Rec> {
        let mut buf = [0u8; MAX_PACKED_BYTES];
        if self.dec.next_record(&mut buf) {
            Some(Rec::from_key(&buf[..self.key_len], 0))
        } else {
            None
        }
    }
}

#[inline]
fn hash_key(key: &[u8]) -> u64 {
    let mut h = FxHasher::default();
    h.write(key);
    h.finish()
}

fn io_at(stage: &'static str) -> impl FnOnce(io::Error) -> SolverError {
    move |e| SolverError::Io {
        stage,
        error: e.to_string(),
    }
}

/// Solve one puzzle to optimality. Prints the initial rendering, a per-depth
/// progress trace, the solution replay, and a final summary line unless the
/// config says to stay quiet.
pub fn solve(map: &Map, cfg: &SolverConfig) -> Result<SolveOutcome, SolverError> {
    let started = Instant::now();
    let params = &map.params;
    let shape = StateShape::new(*params);
    let key_len = shape.record_bytes;
    let engine = Engine::new(map);

    let mut start = State::initial(map);
    if !cfg.quiet {
        print!("{}", render(&start, map));
    }
    if !engine.resolve(&mut start, 0) {
        if !cfg.quiet {
            println!("No solution");
        }
        return Ok(SolveOutcome {
            moves: 0,
            states: 0,
            stored_bytes: 0,
            path: Vec::new(),
        });
    }
    start.canonicalize(params.snakes);

    let mut start_key = [0u8; MAX_PACKED_BYTES];
    shape.pack(&start, &mut start_key);
    if start.win {
        let path = vec![render(&start, map)];
        if !cfg.quiet {
            println!("Win\n1 states, 0 moves, 0 bytes");
        }
        return Ok(SolveOutcome {
            moves: 0,
            states: 1,
            stored_bytes: 0,
            path,
        });
    }

    // The visited store: keys as compressed per-depth runs, parent tags in a
    // parallel raw array with matching run indices.
    let mut keys = FileArray::new(cfg.mem_target / 4);
    let mut vals = FileArray::new(cfg.mem_target / 16);
    {
        let mut enc = RecordCompressor::new(key_len);
        enc.push(&start_key[..key_len]);
        let block = enc.finish().map_err(io_at("compress depth 0"))?;
        keys.start_run();
        keys.extend_from_slice(&block).map_err(io_at("append depth 0"))?;
        keys.end_run();
        vals.start_run();
        vals.push(0).map_err(io_at("append depth 0 tag"))?;
        vals.end_run();
    }

    let mut shard_count = cfg.initial_shards.max(1).next_power_of_two();
    let mut shards = new_shards(shard_count, cfg);
    let mut total_states: u64 = 1;
    let mut depth = 0usize;

    loop {
        let depth_started = Instant::now();
        let snapshot = keys.snapshot().map_err(io_at("snapshot visited"))?;
        let runs: Vec<Run> = keys.runs().to_vec();

        // Expand the newest run through the engine, sharding successors by
        // state hash and tagging each with the parent's hash byte.
        let mut frontier = RecordDecompressor::new(snapshot.run_slice(runs[depth]), key_len)
            .map_err(io_at("open frontier"))?;
        let mut key = [0u8; MAX_PACKED_BYTES];
        let mut expanded: u64 = 0;
        let mut emitted: u64 = 0;
        let mut win: Option<(Vec<u8>, u8)> = None;
        let mut io_failure: Option<io::Error> = None;

        while frontier.next_record(&mut key) {
            expanded += 1;
            let st = shape.unpack(&key);
            let parent_tag = hash_key(&key[..key_len]) as u8;
            let mut succ_key = [0u8; MAX_PACKED_BYTES];
            engine.for_each_successor(&st, |succ, _si, _dir| {
                shape.pack(&succ, &mut succ_key);
                if succ.win {
                    win = Some((succ_key[..key_len].to_vec(), parent_tag));
                    return true;
                }
                let shard = hash_key(&succ_key[..key_len]) as usize & (shard_count - 1);
                let res = shards[shard]
                    .extend_from_slice(&succ_key[..key_len])
                    .and_then(|()| shards[shard].push(parent_tag));
                if let Err(e) = res {
                    io_failure = Some(e);
                    return true;
                }
                emitted += 1;
                false
            });
            if win.is_some() || io_failure.is_some() {
                break;
            }
        }
        if let Some(e) = io_failure {
            return Err(io_at("emit successors")(e));
        }

        if let Some(win) = win {
            let moves = depth + 1;
            let path =
                reconstruct_path(&shape, &engine, &snapshot, &runs, &mut vals, win, depth)?;
            if !cfg.quiet {
                println!("Win");
                for rendered in &path {
                    println!("{rendered}");
                }
                println!(
                    "{} states, {} moves, {} bytes ({:.1?})",
                    total_states,
                    moves,
                    keys.len(),
                    started.elapsed()
                );
            }
            return Ok(SolveOutcome {
                moves,
                states: total_states,
                stored_bytes: keys.len(),
                path,
            });
        }

        // Sort each shard in bounded chunks, then merge every chunk of every
        // shard against every prior run; survivors become the next run.
        let pair_len = key_len + 1;
        let chunk_recs = (cfg.mem_target / 2 / std::mem::size_of::<Rec>()).max(1024);
        let mut scratches: Vec<FileArray> = Vec::with_capacity(shard_count);
        for shard in shards.iter_mut() {
            shard.freeze().map_err(io_at("freeze shard"))?;
            let mut scratch = FileArray::new(cfg.mem_target / (2 * shard_count));
            let mut chunk: Vec<Rec> = Vec::new();
            for pair in shard.as_slice().chunks_exact(pair_len) {
                chunk.push(Rec::from_pair(pair, key_len));
                if chunk.len() >= chunk_recs {
                    write_sorted_chunk(&mut scratch, &mut chunk)?;
                }
            }
            if !chunk.is_empty() {
                write_sorted_chunk(&mut scratch, &mut chunk)?;
            }
            scratch.freeze().map_err(io_at("freeze sorted shard"))?;
            scratches.push(scratch);
        }

        let mut candidate_sources: Vec<PairIter> = Vec::new();
        for scratch in scratches.iter() {
            for i in 0..scratch.runs().len() {
                candidate_sources.push(PairIter::new(scratch.run_slice(i), key_len));
            }
        }
        let candidates = MergeIter::new(candidate_sources);

        let visited_sources = runs
            .iter()
            .map(|&run| RunRecords::new(snapshot.run_slice(run), key_len))
            .collect::<io::Result<Vec<_>>>()
            .map_err(io_at("open visited runs"))?;
        let mut visited = MergeIter::new(visited_sources).peekable();

        let mut enc = RecordCompressor::new(key_len);
        vals.start_run();
        let mut last: Option<Rec> = None;
        let mut fresh: u64 = 0;
        for cand in candidates {
            if last.is_some_and(|l| l == cand) {
                continue;
            }
            last = Some(cand);
            while visited.next_if(|v| *v < cand).is_some() {}
            if visited.peek().is_some_and(|v| *v == cand) {
                continue;
            }
            enc.push(cand.key());
            vals.push(cand.tag()).map_err(io_at("append tag"))?;
            fresh += 1;
        }
        vals.end_run();
        let block = enc.finish().map_err(io_at("compress run"))?;
        keys.start_run();
        keys.extend_from_slice(&block).map_err(io_at("append run"))?;
        keys.end_run();

        total_states += fresh;
        if !cfg.quiet {
            println!(
                "depth {:>3}: {} expanded, {} emitted, {} new, {} total, {:.1?}",
                depth + 1,
                expanded,
                emitted,
                fresh,
                total_states,
                depth_started.elapsed()
            );
        }

        if fresh == 0 {
            if !cfg.quiet {
                println!("No solution");
            }
            return Ok(SolveOutcome {
                moves: 0,
                states: total_states,
                stored_bytes: keys.len(),
                path: Vec::new(),
            });
        }

        // Re-shard between depths so per-shard sorts stay inside the memory
        // budget without fragmenting small frontiers.
        let average = emitted / shard_count as u64;
        let mut next_count = shard_count;
        if average > cfg.shard_high_water && shard_count < cfg.max_shards {
            next_count *= 2;
        } else if average < cfg.shard_low_water && shard_count > 1 {
            next_count /= 2;
        }
        if next_count != shard_count {
            debug!("resharding {} -> {} (avg {} pairs)", shard_count, next_count, average);
            shard_count = next_count;
            shards = new_shards(shard_count, cfg);
        } else {
            for shard in shards.iter_mut() {
                shard.reset().map_err(io_at("reset shard"))?;
            }
        }

        depth += 1;
    }
}

fn new_shards(count: usize, cfg: &SolverConfig) -> Vec<FileArray> {
    (0..count)
        .map(|_| FileArray::new(cfg.mem_target / (2 * count)))
        .collect()
}

fn write_sorted_chunk(scratch: &mut FileArray, chunk: &mut Vec<Rec>) -> Result<(), SolverError> {
    chunk.par_sort_unstable();
    chunk.dedup();
    scratch.start_run();
    for rec in chunk.iter() {
        scratch
            .extend_from_slice(rec.pair())
            .map_err(io_at("write sorted chunk"))?;
    }
    scratch.end_run();
    chunk.clear();
    Ok(())
}

/// Walk depth-by-depth from the win back to the start.
///
/// At each depth the stored hash byte filters the run down to a handful of
/// candidates; re-expanding a candidate and comparing packed successors is
/// the authoritative parent test, so tag collisions cost time, not
/// correctness.
fn reconstruct_path(
    shape: &StateShape,
    engine: &Engine,
    visited: &Snapshot,
    keys_runs: &[Run],
    vals: &mut FileArray,
    win: (Vec<u8>, u8),
    last_depth: usize,
) -> Result<Vec<String>, SolverError> {
    let map = engine.map();
    let key_len = shape.record_bytes;
    let vals_runs: Vec<Run> = vals.runs().to_vec();
    let vals_snap = vals.snapshot().map_err(io_at("snapshot tags"))?;

    let (win_key, win_tag) = win;
    let mut chain: Vec<Vec<u8>> = vec![win_key.clone()];
    let mut target = win_key;
    let mut tag = win_tag;

    for i in (0..=last_depth).rev() {
        let mut dec = RecordDecompressor::new(visited.run_slice(keys_runs[i]), key_len)
            .map_err(io_at("open run for reconstruction"))?;
        let mut key = [0u8; MAX_PACKED_BYTES];
        let mut index = 0usize;
        let mut found = false;
        while dec.next_record(&mut key) {
            if hash_key(&key[..key_len]) as u8 == tag {
                let st = shape.unpack(&key);
                let mut succ_key = [0u8; MAX_PACKED_BYTES];
                let mut matched = false;
                engine.for_each_successor(&st, |succ, _si, _dir| {
                    shape.pack(&succ, &mut succ_key);
                    if succ_key[..key_len] == target[..] {
                        matched = true;
                        return true;
                    }
                    false
                });
                if matched {
                    chain.push(key[..key_len].to_vec());
                    target = key[..key_len].to_vec();
                    tag = vals_snap.run_slice(vals_runs[i])[index];
                    found = true;
                    break;
                }
            }
            index += 1;
        }
        assert!(found, "no parent found at depth {i}; visited runs corrupt");
    }

    chain.reverse();
    Ok(chain
        .iter()
        .map(|packed| render(&shape.unpack(packed), map))
        .collect())
}
