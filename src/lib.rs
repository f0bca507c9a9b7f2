//! # snakebird_solver
//!
//! An optimal-solution solver for Snakebird-style puzzles: snakes, pushable
//! gadgets, fruit, teleporters, spikes and an exit, all under gravity. Given
//! a map, it finds a shortest move sequence that gets every snake out.
//!
//! ## Architecture
//!
//! The codebase is structured as layered components:
//!
//! - [`core`]: allocation-free primitives (bit packing, grid directions).
//! - [`game`]: puzzle semantics, from the map loader and the packed state
//!   model to the move/push/gravity/teleport engine.
//! - [`store`]: external-memory building blocks: spill-to-disk byte arrays
//!   with mmap read views, the delta+Snappy record codec, and a stable K-way
//!   merge.
//! - [`search`]: the disk-backed breadth-first search. Visited states live
//!   in per-depth compressed runs; the winning path is reconstructed from a
//!   one-byte parent-hash tag per state instead of a parent-pointer map.
//! - [`levels`]: built-in maps with their parameters and known optima.
//! - [`solution`]: JSON export/import of solved puzzles.
//!
//! ## Quick start
//!
//! ```no_run
//! use snakebird_solver::game::map::Map;
//! use snakebird_solver::levels;
//! use snakebird_solver::search::{bfs, SolverConfig};
//!
//! let level = levels::by_name("level01").unwrap();
//! let map = Map::parse(level.map, level.params);
//! let outcome = bfs::solve(&map, &SolverConfig::default()).unwrap();
//! assert_eq!(outcome.moves, 16);
//! ```
//!
//! The largest stock puzzles are only tractable because the visited set is
//! kept on disk: states are packed to the minimum per-puzzle bit width,
//! delta-compressed in sorted runs, and deduplicated with sort/merge passes
//! under a configurable memory target.

pub mod core;
pub mod game;
pub mod levels;
pub mod search;
pub mod solution;
pub mod store;
