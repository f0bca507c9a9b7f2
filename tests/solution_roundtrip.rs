//! Solution manifests survive a write/load cycle.

use tempfile::TempDir;

use snakebird_solver::game::map::Map;
use snakebird_solver::levels;
use snakebird_solver::search::{bfs, SolverConfig};
use snakebird_solver::solution;

#[test]
fn solved_level_roundtrips_through_json() {
    let level = levels::by_name("level01").unwrap();
    let map = Map::parse(level.map, level.params);
    let cfg = SolverConfig {
        mem_target: 16 << 20,
        quiet: true,
        ..SolverConfig::default()
    };
    let outcome = bfs::solve(&map, &cfg).unwrap();
    assert_eq!(outcome.moves, 16);

    let manifest = solution::manifest_for(level.name, level.params, &outcome);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("level01.json");
    solution::write_solution(&path, &manifest).unwrap();

    let loaded = solution::load_solution(&path).unwrap();
    assert_eq!(loaded.level, "level01");
    assert_eq!(loaded.moves, 16);
    assert_eq!(loaded.states_visited, outcome.states);
    assert_eq!(loaded.path, outcome.path);
    assert_eq!(loaded.params.width, 10);
    assert_eq!(loaded.params.height, 11);
}
