use std::path::PathBuf;
use std::process;

use snakebird_solver::game::map::Map;
use snakebird_solver::levels;
use snakebird_solver::search::{bfs, SolverConfig};
use snakebird_solver::solution;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!(
            "Usage: solve <level> [solution.json]\n       solve --all\n\n\
             Available levels:\n  - {}",
            levels::available_names().join("\n  - ")
        );
        process::exit(2);
    }

    if args[1] == "--all" {
        run_all();
        return;
    }

    let level = levels::by_name(&args[1]).unwrap_or_else(|| {
        eprintln!(
            "Unknown level: {}\n\nAvailable levels:\n  - {}",
            args[1],
            levels::available_names().join("\n  - ")
        );
        process::exit(2);
    });

    let map = Map::parse(level.map, level.params);
    let outcome = bfs::solve(&map, &SolverConfig::default()).unwrap_or_else(|e| {
        eprintln!("solve failed: {e}");
        process::exit(1);
    });

    if let Some(out_path) = args.get(2) {
        let manifest = solution::manifest_for(level.name, level.params, &outcome);
        let path = PathBuf::from(out_path);
        if let Err(e) = solution::write_solution(&path, &manifest) {
            eprintln!("export failed: {e}");
            process::exit(1);
        }
        println!("wrote {}", path.display());
    }

    if let Some(expected) = level.optimal_moves {
        if outcome.moves != expected {
            eprintln!(
                "Error: expected {} moves for {}, got {}",
                expected, level.name, outcome.moves
            );
            process::exit(1);
        }
    }
}

/// Solve every level with a recorded optimum and report mismatches, like a
/// regression sweep. Skips levels whose optimum is unknown.
fn run_all() {
    let mut failures = 0;
    for level in levels::all() {
        let Some(expected) = level.optimal_moves else {
            println!("skipping {} (no recorded optimum)", level.name);
            continue;
        };
        println!("=== {} ===", level.name);
        let map = Map::parse(level.map, level.params);
        let outcome = bfs::solve(&map, &SolverConfig::default()).unwrap_or_else(|e| {
            eprintln!("solve failed: {e}");
            process::exit(1);
        });
        if outcome.moves != expected {
            eprintln!(
                "Error: expected {} moves for {}, got {}",
                expected, level.name, outcome.moves
            );
            failures += 1;
        }
    }
    if failures > 0 {
        process::exit(1);
    }
}
