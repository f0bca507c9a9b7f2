//! End-to-end optimal move counts for the stock levels.
//!
//! The slower levels are `#[ignore]`d so the default test run stays quick;
//! run them with `cargo test --release -- --ignored` when touching the
//! engine or the search.

use snakebird_solver::game::map::Map;
use snakebird_solver::levels;
use snakebird_solver::search::{bfs, SolverConfig};

fn solve_level(name: &str) -> usize {
    let level = levels::by_name(name).expect("unknown level");
    let map = Map::parse(level.map, level.params);
    let cfg = SolverConfig {
        mem_target: 64 << 20,
        quiet: true,
        ..SolverConfig::default()
    };
    bfs::solve(&map, &cfg).expect("solve failed").moves
}

#[test]
fn level01_solves_in_16_moves() {
    assert_eq!(solve_level("level01"), 16);
}

#[test]
fn level14_solves_in_24_moves() {
    assert_eq!(solve_level("level14"), 24);
}

#[test]
fn level24_solves_in_26_moves() {
    assert_eq!(solve_level("level24"), 26);
}

#[test]
fn level37_solves_in_16_moves() {
    assert_eq!(solve_level("level37"), 16);
}

#[test]
#[ignore = "multi-minute solve"]
fn level10_solves_in_33_moves() {
    assert_eq!(solve_level("level10"), 33);
}

#[test]
#[ignore = "multi-minute solve"]
fn level12_solves_in_52_moves() {
    assert_eq!(solve_level("level12"), 52);
}

#[test]
#[ignore = "multi-minute solve"]
fn level15_solves_in_34_moves() {
    assert_eq!(solve_level("level15"), 34);
}

#[test]
#[ignore = "multi-minute solve"]
fn level22_solves_in_45_moves() {
    assert_eq!(solve_level("level22"), 45);
}

#[test]
#[ignore = "multi-minute solve"]
fn level35_solves_in_29_moves() {
    assert_eq!(solve_level("level35"), 29);
}

#[test]
#[ignore = "multi-minute solve"]
fn level36_solves_in_29_moves() {
    assert_eq!(solve_level("level36"), 29);
}

#[test]
#[ignore = "multi-minute solve"]
fn level40_solves_in_51_moves() {
    assert_eq!(solve_level("level40"), 51);
}

#[test]
#[ignore = "multi-minute solve"]
fn level41_solves_in_34_moves() {
    assert_eq!(solve_level("level41"), 34);
}

#[test]
#[ignore = "multi-minute solve"]
fn level44_solves_in_36_moves() {
    assert_eq!(solve_level("level44"), 36);
}

#[test]
#[ignore = "needs hours and tens of gigabytes of scratch disk"]
fn star2_solves_in_60_moves() {
    assert_eq!(solve_level("star2"), 60);
}
