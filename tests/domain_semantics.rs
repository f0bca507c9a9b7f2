//! Hand-crafted miniature maps pinning down individual engine rules.

use snakebird_solver::core::direction::Direction;
use snakebird_solver::game::engine::Engine;
use snakebird_solver::game::map::Map;
use snakebird_solver::game::params::Params;
use snakebird_solver::game::state::{State, GADGET_DELETED};
use snakebird_solver::search::{bfs, SolverConfig};

const fn p(
    height: usize,
    width: usize,
    fruit: usize,
    snakes: usize,
    snake_max_len: usize,
    gadgets: usize,
    teleporters: usize,
) -> Params {
    Params {
        height,
        width,
        fruit,
        snakes,
        snake_max_len,
        gadgets,
        teleporters,
    }
}

fn quiet() -> SolverConfig {
    SolverConfig {
        mem_target: 1 << 20,
        quiet: true,
        ..SolverConfig::default()
    }
}

/// Collect the head cell of the moving snake for every legal successor.
fn successor_heads(map: &Map, st: &State) -> Vec<(Direction, u16)> {
    let engine = Engine::new(map);
    let mut out = Vec::new();
    engine.for_each_successor(st, |succ, si, dir| {
        out.push((dir, succ.snakes[si].head));
        false
    });
    out
}

#[test]
fn snake_falls_onto_spikes_and_dies() {
    let map = Map::parse(
        concat!(
            ".......", //
            ".  *  .",
            ". >R  .",
            ". ~   .",
            ".......",
        ),
        p(5, 7, 0, 1, 2, 0, 0),
    );
    let mut st = State::initial(&map);
    assert!(!Engine::new(&map).resolve(&mut st, 0));
}

#[test]
fn wall_under_any_segment_supports_the_snake() {
    let map = Map::parse(
        concat!(
            ".......", //
            ".  *  .",
            ". >R  .",
            ". .   .",
            ".......",
        ),
        p(5, 7, 0, 1, 2, 0, 0),
    );
    let mut st = State::initial(&map);
    let before = st;
    assert!(Engine::new(&map).resolve(&mut st, 0));
    assert_eq!(st, before);
}

#[test]
fn blocks_do_not_support_snakes() {
    // The block under the snake is not support; the snake falls into it and
    // dies.
    let map = Map::parse(
        concat!(
            ".......", //
            ".  *  .",
            ". >R  .",
            ". ##  .",
            ".......",
        ),
        p(5, 7, 0, 1, 2, 0, 0),
    );
    let mut st = State::initial(&map);
    assert!(!Engine::new(&map).resolve(&mut st, 0));
}

#[test]
fn blocks_support_gadgets() {
    let map = Map::parse(
        concat!(
            ".......", //
            ".  *  .",
            ". 00 R.",
            ". ## ..",
            ".......",
        ),
        p(5, 7, 0, 1, 1, 1, 0),
    );
    let mut st = State::initial(&map);
    let anchor = st.gadgets[0];
    assert!(Engine::new(&map).resolve(&mut st, 0));
    assert_eq!(st.gadgets[0], anchor);
}

#[test]
fn gadget_falling_onto_spikes_is_destroyed_not_fatal() {
    let map = Map::parse(
        concat!(
            ".......", //
            ".  *  .",
            ". 00 R.",
            ". ~~ ..",
            ".......",
        ),
        p(5, 7, 0, 1, 1, 1, 0),
    );
    let mut st = State::initial(&map);
    assert!(Engine::new(&map).resolve(&mut st, 0));
    assert_eq!(st.gadgets[0], GADGET_DELETED);
}

#[test]
fn exit_is_inert_while_fruit_remains() {
    let map = Map::parse(
        concat!(
            ".......", //
            ". *   .",
            ".>RO  .",
            ". ..  .",
            ".......",
        ),
        p(5, 7, 1, 1, 3, 0, 0),
    );
    let st = State::initial(&map);
    // Moving up lands on the exit cell, but with a fruit alive the snake
    // must stay on the board.
    let heads = successor_heads(&map, &st);
    let up = heads
        .iter()
        .find(|(dir, _)| *dir == Direction::Up)
        .expect("up move is legal");
    assert_eq!(up.1, map.exit);
    let engine = Engine::new(&map);
    engine.for_each_successor(&st, |succ, _, dir| {
        if dir == Direction::Up {
            assert!(!succ.win);
            assert_eq!(succ.snakes[0].len, 2);
        }
        false
    });
}

#[test]
fn eat_grow_then_exit_solves_in_three_moves() {
    // Right (eat, growing to length 3), up, left onto the exit.
    let map = Map::parse(
        concat!(
            ".......", //
            ". *   .",
            ".>RO  .",
            ". ..  .",
            ".......",
        ),
        p(5, 7, 1, 1, 3, 0, 0),
    );
    let outcome = bfs::solve(&map, &quiet()).unwrap();
    assert_eq!(outcome.moves, 3);
    assert_eq!(outcome.path.len(), 4);
}

#[test]
fn pushing_a_gadget_translates_it() {
    let map = Map::parse(
        concat!(
            "........", //
            ".  *   .",
            ". R0   .",
            ". .... .",
            "........",
        ),
        p(5, 8, 0, 1, 1, 1, 0),
    );
    let st = State::initial(&map);
    let anchor = st.gadgets[0];
    let engine = Engine::new(&map);
    let mut pushed_offset = None;
    engine.for_each_successor(&st, |succ, _, dir| {
        if dir == Direction::Right {
            pushed_offset = Some(succ.gadgets[0]);
        }
        false
    });
    assert_eq!(pushed_offset, Some(anchor + 1));
}

#[test]
fn push_blocked_by_wall_is_illegal() {
    let map = Map::parse(
        concat!(
            "........", //
            ".  *   .",
            ". R00. .",
            ". .... .",
            "........",
        ),
        p(5, 8, 0, 1, 1, 1, 0),
    );
    let st = State::initial(&map);
    let blocked_head = st.snakes[0].head + 1;
    assert!(successor_heads(&map, &st)
        .iter()
        .all(|&(_, head)| head != blocked_head));
}

#[test]
fn a_snake_cannot_push_itself() {
    // The hooked snake pushes the sparse gadget; the gadget's upper cell
    // would sweep the snake's own body into the pushed set.
    let map = Map::parse(
        concat!(
            ".......", //
            ".0v<  .",
            ". R0 *.",
            ". ..  .",
            ".......",
        ),
        p(5, 7, 0, 1, 3, 1, 0),
    );
    let st = State::initial(&map);
    let self_push_head = st.snakes[0].head + 1;
    assert!(successor_heads(&map, &st)
        .iter()
        .all(|&(_, head)| head != self_push_head));
}

#[test]
fn stepping_onto_a_teleporter_fires_it_and_gravity_follows() {
    let map = Map::parse(
        concat!(
            ".........", //
            ".   *   .",
            ". T   T .",
            ". R     .",
            ". .     .",
            ".........",
        ),
        p(6, 9, 0, 1, 1, 0, 1),
    );
    let st = State::initial(&map);
    let engine = Engine::new(&map);
    let mut landed = None;
    engine.for_each_successor(&st, |succ, _, dir| {
        if dir == Direction::Up {
            landed = Some(succ.snakes[0].head);
        }
        false
    });
    // Up onto the left pad teleports to the right pad, then the snake falls
    // two cells to the floor.
    assert_eq!(landed, Some((4 * 9 + 6) as u16));
}

#[test]
fn unsolvable_pocket_reports_no_solution() {
    let map = Map::parse(
        concat!(
            ".......", //
            ". R.* .",
            ". ... .",
            ".......",
        ),
        p(4, 7, 0, 1, 1, 0, 0),
    );
    let outcome = bfs::solve(&map, &quiet()).unwrap();
    assert_eq!(outcome.moves, 0);
    assert!(outcome.path.is_empty());
}
