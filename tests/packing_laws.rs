//! Packing and canonicalisation laws over reachable states.

use snakebird_solver::game::engine::Engine;
use snakebird_solver::game::map::Map;
use snakebird_solver::game::state::{State, StateShape};
use snakebird_solver::levels;

/// Breadth-first expand a few plies in memory and return distinct states.
fn sample_states(map: &Map, plies: usize) -> Vec<State> {
    let engine = Engine::new(map);
    let mut start = State::initial(map);
    assert!(engine.resolve(&mut start, 0));
    start.canonicalize(map.params.snakes);

    let mut all = vec![start];
    let mut frontier = vec![start];
    for _ in 0..plies {
        let mut next = Vec::new();
        for st in &frontier {
            engine.for_each_successor(st, |succ, _, _| {
                if !all.contains(&succ) {
                    all.push(succ);
                    next.push(succ);
                }
                false
            });
        }
        frontier = next;
    }
    all
}

#[test]
fn pack_unpack_is_identity_on_reachable_states() {
    for name in ["level01", "level14", "level22", "level37", "level44"] {
        let level = levels::by_name(name).unwrap();
        let map = Map::parse(level.map, level.params);
        let shape = StateShape::new(level.params);
        let mut buf = [0u8; 40];
        for st in sample_states(&map, 3) {
            shape.pack(&st, &mut buf);
            let back = shape.unpack(&buf);
            assert_eq!(back, st, "unpack(pack(s)) != s on {name}");

            let mut buf2 = [0u8; 40];
            shape.pack(&back, &mut buf2);
            assert_eq!(buf, buf2, "pack not deterministic on {name}");
        }
    }
}

#[test]
fn byte_equality_agrees_with_state_equality() {
    let level = levels::by_name("level14").unwrap();
    let map = Map::parse(level.map, level.params);
    let shape = StateShape::new(level.params);
    let states = sample_states(&map, 3);
    let packed: Vec<[u8; 40]> = states
        .iter()
        .map(|st| {
            let mut buf = [0u8; 40];
            shape.pack(st, &mut buf);
            buf
        })
        .collect();
    for i in 0..states.len() {
        for j in 0..states.len() {
            assert_eq!(
                states[i] == states[j],
                packed[i] == packed[j],
                "byte equality diverged from state equality at ({i}, {j})"
            );
        }
    }
}

#[test]
fn canonicalize_is_idempotent_and_sorts_snake_identity_away() {
    let level = levels::by_name("level14").unwrap();
    let map = Map::parse(level.map, level.params);
    let shape = StateShape::new(level.params);
    let n = level.params.snakes;

    let mut a = State::initial(&map);
    assert!(Engine::new(&map).resolve(&mut a, 0));
    let mut b = a;
    b.snakes.swap(0, 1);

    a.canonicalize(n);
    b.canonicalize(n);
    assert_eq!(a, b);

    let once = a;
    a.canonicalize(n);
    assert_eq!(a, once);

    let mut pa = [0u8; 40];
    let mut pb = [0u8; 40];
    shape.pack(&a, &mut pa);
    shape.pack(&b, &mut pb);
    assert_eq!(pa, pb);
}
