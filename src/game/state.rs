//! Mutable search states and their canonical bit-packed form.

use crate::core::bitpack::{bits_needed, deposit, extract};
use crate::game::map::Map;
use crate::game::params::{Params, MAX_GADGETS, MAX_PACKED_BYTES, MAX_SNAKES};
use crate::game::snake::Snake;

/// Sentinel gadget offset meaning "destroyed".
pub const GADGET_DELETED: i16 = i16::MIN;

/// One search state: snake placements, gadget offsets, surviving fruit, and
/// the win flag. Fixed-capacity arrays; the live counts come from [`Params`].
///
/// A gadget's cells are `map.gadgets[j].cells()[k] + state.gadgets[j]`: the
/// state stores the absolute anchor index, shifted by pushes and falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub snakes: [Snake; MAX_SNAKES],
    pub gadgets: [i16; MAX_GADGETS],
    pub fruit: u32,
    pub win: bool,
}

impl State {
    /// The start state: snakes and gadget anchors from the map, all fruit
    /// alive.
    pub fn initial(map: &Map) -> State {
        let mut snakes = [Snake::default(); MAX_SNAKES];
        for (slot, snake) in snakes.iter_mut().zip(map.snakes.iter()) {
            *slot = *snake;
        }
        let mut gadgets = [0i16; MAX_GADGETS];
        for (slot, anchor) in gadgets.iter_mut().zip(map.gadget_anchor.iter()) {
            *slot = *anchor;
        }
        State {
            snakes,
            gadgets,
            fruit: if map.params.fruit == 0 {
                0
            } else {
                (1u32 << map.params.fruit) - 1
            },
            win: false,
        }
    }

    #[inline]
    pub fn fruit_active(&self, i: usize) -> bool {
        self.fruit & (1 << i) != 0
    }

    #[inline]
    pub fn delete_fruit(&mut self, i: usize) {
        self.fruit &= !(1 << i);
    }

    /// Sort the snake slots so states that differ only by snake identity
    /// compare equal. Idempotent; called before every pack.
    #[inline]
    pub fn canonicalize(&mut self, snake_count: usize) {
        self.snakes[..snake_count].sort_unstable();
    }
}

/// Field widths of the packed form, fixed per puzzle.
///
/// Chosen as the minimum widths the parameters allow: cell indices take
/// `ceil(log2(H*W))` bits, lengths `ceil(log2(L+1))`, tails `2*(L-1)`,
/// gadget offsets 16, fruit one bit each, plus the win bit.
#[derive(Debug, Clone)]
pub struct StateShape {
    pub params: Params,
    pub index_bits: u32,
    pub len_bits: u32,
    pub tail_bits: u32,
    pub total_bits: u32,
    pub record_bytes: usize,
}

impl StateShape {
    pub fn new(params: Params) -> StateShape {
        params.validate();
        let index_bits = bits_needed(params.cells() as u64 - 1);
        let len_bits = bits_needed(params.snake_max_len as u64);
        let tail_bits = 2 * (params.snake_max_len as u32 - 1);
        let total_bits = params.snakes as u32 * (index_bits + len_bits + tail_bits)
            + params.gadgets as u32 * 16
            + params.fruit as u32
            + 1;
        let record_bytes = total_bits.div_ceil(8) as usize;
        assert!(record_bytes <= MAX_PACKED_BYTES);
        StateShape {
            params,
            index_bits,
            len_bits,
            tail_bits,
            total_bits,
            record_bytes,
        }
    }

    /// Pack a canonical state into `out[..self.record_bytes]`.
    ///
    /// Equal canonical states produce byte-identical records, so records can
    /// be compared, sorted and deduplicated without unpacking.
    pub fn pack(&self, st: &State, out: &mut [u8]) {
        let out = &mut out[..self.record_bytes];
        out.fill(0);
        let mut at = 0u32;
        for snake in &st.snakes[..self.params.snakes] {
            at = deposit(out, snake.head as u64, self.index_bits, at);
            at = deposit(out, snake.len as u64, self.len_bits, at);
            // Tails longer than 57 bits go in two pieces.
            let mut bits = self.tail_bits;
            let mut tail = snake.tail;
            while bits > 0 {
                let take = bits.min(48);
                at = deposit(out, tail & ((1u64 << take) - 1), take, at);
                tail >>= take;
                bits -= take;
            }
        }
        for &offset in &st.gadgets[..self.params.gadgets] {
            at = deposit(out, offset as u16 as u64, 16, at);
        }
        at = deposit(out, st.fruit as u64, self.params.fruit as u32, at);
        at = deposit(out, st.win as u64, 1, at);
        debug_assert_eq!(at, self.total_bits);
    }

    /// Inverse of [`pack`](Self::pack).
    pub fn unpack(&self, bytes: &[u8]) -> State {
        let bytes = &bytes[..self.record_bytes];
        let mut st = State {
            snakes: [Snake::default(); MAX_SNAKES],
            gadgets: [0; MAX_GADGETS],
            fruit: 0,
            win: false,
        };
        let mut at = 0u32;
        for snake in st.snakes[..self.params.snakes].iter_mut() {
            let (head, next) = extract(bytes, self.index_bits, at);
            at = next;
            let (len, next) = extract(bytes, self.len_bits, at);
            at = next;
            let mut tail = 0u64;
            let mut got = 0u32;
            let mut bits = self.tail_bits;
            while bits > 0 {
                let take = bits.min(48);
                let (piece, next) = extract(bytes, take, at);
                at = next;
                tail |= piece << got;
                got += take;
                bits -= take;
            }
            *snake = Snake {
                head: head as u16,
                len: len as u8,
                tail,
            };
        }
        for slot in st.gadgets[..self.params.gadgets].iter_mut() {
            let (raw, next) = extract(bytes, 16, at);
            at = next;
            *slot = raw as u16 as i16;
        }
        let (fruit, next) = extract(bytes, self.params.fruit as u32, at);
        at = next;
        let (win, next) = extract(bytes, 1, at);
        st.fruit = fruit as u32;
        st.win = win != 0;
        debug_assert_eq!(next, self.total_bits);
        st
    }
}
