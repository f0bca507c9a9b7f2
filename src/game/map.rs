//! Parsing ASCII map literals into immutable puzzle maps.

use rustc_hash::FxHashMap;

use crate::core::direction::Direction;
use crate::game::params::{Params, MAX_GADGET_CELLS};
use crate::game::snake::Snake;

pub const TERRAIN_EMPTY: u8 = b' ';
pub const TERRAIN_WALL: u8 = b'.';
pub const TERRAIN_SPIKE: u8 = b'~';
pub const TERRAIN_BLOCK: u8 = b'#';

/// A rigid gadget shape: cell offsets relative to the first (anchor) cell.
#[derive(Debug, Clone, Copy)]
pub struct GadgetShape {
    cells: [u16; MAX_GADGET_CELLS],
    len: usize,
}

impl GadgetShape {
    fn add(&mut self, offset: u16) {
        assert!(self.len < MAX_GADGET_CELLS, "gadget has more than 8 cells");
        self.cells[self.len] = offset;
        self.len += 1;
    }

    #[inline]
    pub fn cells(&self) -> &[u16] {
        &self.cells[..self.len]
    }
}

/// One puzzle's immutable geometry: terrain plus the initial placement of
/// every object. Maps are bordered by solid walls (or spikes) on all sides,
/// so single-step index arithmetic never escapes the grid.
#[derive(Debug, Clone)]
pub struct Map {
    pub params: Params,
    terrain: Vec<u8>,
    pub exit: u16,
    pub fruit: Vec<u16>,
    pub snakes: Vec<Snake>,
    pub gadgets: Vec<GadgetShape>,
    pub gadget_anchor: Vec<i16>,
    pub teleporters: Vec<(u16, u16)>,
}

impl Map {
    /// Parse a map literal of exactly `params.cells()` glyphs.
    ///
    /// Malformed maps and count mismatches against `params` are programming
    /// faults and panic with a diagnostic.
    pub fn parse(text: &str, params: Params) -> Map {
        params.validate();
        let w = params.width;
        let cells = params.cells();
        assert_eq!(text.len(), cells, "map literal length != H * W");

        let glyphs = text.as_bytes();
        let mut terrain = vec![TERRAIN_EMPTY; cells];
        let mut exit = None;
        let mut fruit = Vec::new();
        let mut snakes = Vec::new();
        let mut gadgets: Vec<GadgetShape> = Vec::new();
        let mut gadget_anchor: Vec<i16> = Vec::new();
        let mut teleporters = Vec::new();
        let mut half_teleporter: FxHashMap<u8, u16> = FxHashMap::default();
        let mut max_initial_len = 0usize;

        for i in 0..cells {
            match glyphs[i] {
                b'O' => fruit.push(i as u16),
                b'*' => {
                    assert!(exit.is_none(), "map has more than one exit");
                    exit = Some(i as u16);
                }
                b'T' => {
                    if let Some(first) = half_teleporter.remove(&b'T') {
                        teleporters.push((first, i as u16));
                    } else {
                        half_teleporter.insert(b'T', i as u16);
                    }
                }
                b'R' | b'G' | b'B' => {
                    let snake = trace_snake(glyphs, i, w);
                    max_initial_len = max_initial_len.max(snake.len as usize);
                    snakes.push(snake);
                }
                c @ b'0'..=b'9' => {
                    let index = (c - b'0') as usize;
                    assert!(index < params.gadgets, "gadget {index} not declared");
                    while gadgets.len() <= index {
                        gadgets.push(GadgetShape {
                            cells: [0; MAX_GADGET_CELLS],
                            len: 0,
                        });
                        gadget_anchor.push(0);
                    }
                    if gadgets[index].len == 0 {
                        gadget_anchor[index] = i as i16;
                    }
                    gadgets[index].add((i as i16 - gadget_anchor[index]) as u16);
                }
                b'>' | b'<' | b'^' | b'v' => {}
                c @ (TERRAIN_EMPTY | TERRAIN_WALL | TERRAIN_SPIKE | TERRAIN_BLOCK) => {
                    terrain[i] = c;
                }
                c => panic!("unrecognised map glyph {:?} at cell {i}", c as char),
            }
        }

        assert_eq!(fruit.len(), params.fruit, "fruit count mismatch");
        assert_eq!(snakes.len(), params.snakes, "snake count mismatch");
        assert_eq!(gadgets.len(), params.gadgets, "gadget count mismatch");
        assert_eq!(
            teleporters.len(),
            params.teleporters,
            "teleporter pair count mismatch"
        );
        assert!(
            half_teleporter.is_empty(),
            "unpaired teleporter endpoint in map"
        );
        assert!(
            params.snake_max_len >= max_initial_len + params.fruit,
            "snake_max_len must be >= {} (longest snake {} + {} fruit)",
            max_initial_len + params.fruit,
            max_initial_len,
            params.fruit
        );

        Map {
            params,
            terrain,
            exit: exit.expect("map has no exit"),
            fruit,
            snakes,
            gadgets,
            gadget_anchor,
            teleporters,
        }
    }

    #[inline]
    pub fn terrain(&self, i: i32) -> u8 {
        self.terrain[i as usize]
    }

    #[inline]
    pub fn empty_terrain_at(&self, i: i32) -> bool {
        self.terrain[i as usize] == TERRAIN_EMPTY
    }
}

/// Walk the body arrows away from the head, appending one tail direction per
/// body cell. The arrow *at* a body cell points from that cell towards the
/// head, so the chain is followed against the arrows. Iterative on purpose:
/// long snakes would otherwise recurse per segment.
fn trace_snake(glyphs: &[u8], head: usize, w: usize) -> Snake {
    let mut snake = Snake::new(head as u16);
    let mut at = head;
    let mut j = 0u32;
    loop {
        let (dir, body) = if glyphs[at - 1] == b'>' {
            (Direction::Right, at - 1)
        } else if glyphs[at + 1] == b'<' {
            (Direction::Left, at + 1)
        } else if glyphs[at - w] == b'v' {
            (Direction::Down, at - w)
        } else if glyphs[at + w] == b'^' {
            (Direction::Up, at + w)
        } else {
            break;
        };
        snake.tail |= dir.bits() << (2 * j);
        snake.len += 1;
        at = body;
        j += 1;
    }
    snake
}
