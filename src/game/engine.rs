//! The transition engine: candidate moves, pushing, teleporters, gravity.
//!
//! The engine is purely functional on its input state: every candidate move
//! copies the state, mutates the copy through the fixed-point resolution, and
//! either hands the survivor to the caller or drops it. A rejected candidate
//! is ordinary control flow, not an error.
//!
//! Resolution order is exit check, then teleport activation, then gravity,
//! repeated to a fixed point. The ordering choices and their known edge cases
//! are documented in DESIGN.md.

use crate::core::direction::{Direction, ALL_DIRECTIONS};
use crate::game::map::{Map, TERRAIN_BLOCK, TERRAIN_SPIKE, TERRAIN_WALL};
use crate::game::snake::Snake;
use crate::game::state::{State, GADGET_DELETED};

/// Dense per-cell object ids for one state: 0 empty, `1..=N` snakes,
/// `N+1..=N+G` gadgets, `N+G+1` fruit. Rebuilt whenever the engine needs
/// occupancy; never mutated in place.
pub struct ObjMap {
    grid: Vec<u8>,
    snakes: usize,
    gadgets: usize,
}

impl ObjMap {
    pub fn build(st: &State, map: &Map) -> ObjMap {
        let params = &map.params;
        let mut grid = vec![0u8; params.cells()];
        for (si, snake) in st.snakes[..params.snakes].iter().enumerate() {
            for cell in snake.cells(params.width) {
                grid[cell as usize] = snake_id(si) as u8;
            }
        }
        for (fi, &cell) in map.fruit.iter().enumerate() {
            if st.fruit_active(fi) {
                grid[cell as usize] = (params.snakes + params.gadgets + 1) as u8;
            }
        }
        for (gi, shape) in map.gadgets.iter().enumerate() {
            let offset = st.gadgets[gi];
            if offset != GADGET_DELETED {
                for &rel in shape.cells() {
                    grid[(offset as i32 + rel as i32) as usize] =
                        gadget_id(gi, params.snakes) as u8;
                }
            }
        }
        ObjMap {
            grid,
            snakes: params.snakes,
            gadgets: params.gadgets,
        }
    }

    #[inline]
    pub fn id_at(&self, i: i32) -> usize {
        self.grid[i as usize] as usize
    }

    #[inline]
    pub fn no_object_at(&self, i: i32) -> bool {
        self.id_at(i) == 0
    }

    #[inline]
    pub fn fruit_at(&self, i: i32) -> bool {
        self.id_at(i) == self.snakes + self.gadgets + 1
    }

    #[inline]
    pub fn foreign_object_at(&self, i: i32, id: usize) -> bool {
        let at = self.id_at(i);
        at != 0 && at != id
    }

    /// One-hot mask for the snake or gadget at `i`; 0 for empty cells and
    /// fruit. Fruit is deliberately maskless: it can be eaten or block a
    /// push, but it never teleports and is never part of a pushed set.
    #[inline]
    pub fn mask_at(&self, i: i32) -> u32 {
        let id = self.id_at(i);
        if id == 0 || id > self.snakes + self.gadgets {
            0
        } else {
            1 << (id - 1)
        }
    }
}

#[inline]
fn snake_id(si: usize) -> usize {
    1 + si
}

#[inline]
fn snake_mask(si: usize) -> u32 {
    1 << si
}

#[inline]
fn gadget_id(gi: usize, snakes: usize) -> usize {
    1 + snakes + gi
}

#[inline]
fn gadget_mask(gi: usize, snakes: usize) -> u32 {
    1 << (snakes + gi)
}

/// Move generation and resolution against one fixed map.
pub struct Engine<'a> {
    map: &'a Map,
}

impl<'a> Engine<'a> {
    pub fn new(map: &'a Map) -> Engine<'a> {
        Engine { map }
    }

    #[inline]
    pub fn map(&self) -> &'a Map {
        self.map
    }

    /// Enumerate every legal successor of `st`, calling `f` with the resolved
    /// canonical state, the moving snake's slot, and the direction. `f`
    /// returning `true` stops the enumeration early.
    pub fn for_each_successor(
        &self,
        st: &State,
        mut f: impl FnMut(State, usize, Direction) -> bool,
    ) {
        let params = &self.map.params;
        let w = params.width;
        let obj = ObjMap::build(st, self.map);
        let tele_mask = self.teleporter_overlap(&obj);

        for si in 0..params.snakes {
            if st.snakes[si].is_gone() {
                continue;
            }
            // For push checks, the mover's last tail cell is about to be
            // vacated, so build the occupancy with the snake one shorter.
            let mut push_st = *st;
            push_st.snakes[si].len -= 1;
            let push_obj = ObjMap::build(&push_st, self.map);

            for dir in ALL_DIRECTIONS {
                let delta = dir.delta(w);
                let to = st.snakes[si].head as i32 + delta;

                if let Some(fruit_index) = self.valid_grow(st, to) {
                    let mut next = *st;
                    next.snakes[si].grow(dir, w);
                    next.delete_fruit(fruit_index);
                    if self.resolve(&mut next, tele_mask) {
                        next.canonicalize(params.snakes);
                        if f(next, si, dir) {
                            return;
                        }
                    }
                } else if obj.no_object_at(to) && self.map.empty_terrain_at(to) {
                    let mut next = *st;
                    next.snakes[si].slide(dir, w);
                    if self.resolve(&mut next, tele_mask) {
                        next.canonicalize(params.snakes);
                        if f(next, si, dir) {
                            return;
                        }
                    }
                } else if let Some(pushed) =
                    self.valid_push(st, &push_obj, snake_id(si), st.snakes[si].head as i32, delta)
                {
                    if pushed & snake_mask(si) != 0 {
                        // A snake cannot push itself.
                        continue;
                    }
                    let mut next = *st;
                    next.snakes[si].slide(dir, w);
                    self.do_pushes(&mut next, pushed, delta);
                    if self.resolve(&mut next, tele_mask) {
                        next.canonicalize(params.snakes);
                        if f(next, si, dir) {
                            return;
                        }
                    }
                }
            }
        }
    }

    fn valid_grow(&self, st: &State, to: i32) -> Option<usize> {
        self.map
            .fruit
            .iter()
            .position(|&cell| cell as i32 == to)
            .filter(|&fi| st.fruit_active(fi))
    }

    /// Transitive push closure starting from the object at `push_at + delta`.
    ///
    /// Returns the one-hot set of every snake and gadget that moves, or
    /// `None` if anything in the closure is blocked by terrain or fruit.
    fn valid_push(
        &self,
        st: &State,
        obj: &ObjMap,
        pusher_id: usize,
        push_at: i32,
        delta: i32,
    ) -> Option<u32> {
        let to = push_at + delta;
        if obj.no_object_at(to) || obj.id_at(to) == pusher_id || obj.fruit_at(to) {
            return None;
        }

        let params = &self.map.params;
        let mut pushed = obj.mask_at(to);
        loop {
            let mut grew = false;
            for si in 0..params.snakes {
                if pushed & snake_mask(si) != 0 {
                    let more = self.snake_can_be_pushed(st, obj, si, delta)?;
                    if more & !pushed != 0 {
                        pushed |= more;
                        grew = true;
                    }
                }
            }
            for gi in 0..params.gadgets {
                if pushed & gadget_mask(gi, params.snakes) != 0 {
                    let more = self.gadget_can_be_pushed(st, obj, gi, delta)?;
                    if more & !pushed != 0 {
                        pushed |= more;
                        grew = true;
                    }
                }
            }
            if !grew {
                return Some(pushed);
            }
        }
    }

    fn snake_can_be_pushed(
        &self,
        st: &State,
        obj: &ObjMap,
        si: usize,
        delta: i32,
    ) -> Option<u32> {
        let mut swept = 0u32;
        for cell in st.snakes[si].cells(self.map.params.width) {
            let to = cell as i32 + delta;
            if !self.map.empty_terrain_at(to) || obj.fruit_at(to) {
                return None;
            }
            if obj.foreign_object_at(to, snake_id(si)) {
                swept |= obj.mask_at(to);
            }
        }
        Some(swept)
    }

    fn gadget_can_be_pushed(
        &self,
        st: &State,
        obj: &ObjMap,
        gi: usize,
        delta: i32,
    ) -> Option<u32> {
        let offset = st.gadgets[gi] as i32;
        let mut swept = 0u32;
        for &rel in self.map.gadgets[gi].cells() {
            let to = offset + rel as i32 + delta;
            if !self.map.empty_terrain_at(to) || obj.fruit_at(to) {
                return None;
            }
            if !obj.no_object_at(to) {
                swept |= obj.mask_at(to);
            }
        }
        Some(swept)
    }

    /// Translate every object in `pushed` by `delta`.
    fn do_pushes(&self, st: &mut State, pushed: u32, delta: i32) {
        let params = &self.map.params;
        for si in 0..params.snakes {
            if pushed & snake_mask(si) != 0 {
                st.snakes[si].translate(delta);
            }
        }
        for gi in 0..params.gadgets {
            if pushed & gadget_mask(gi, params.snakes) != 0 {
                st.gadgets[gi] += delta as i16;
            }
        }
    }

    /// After a translation: snakes on spikes or blocks kill the whole state;
    /// gadgets on spikes are destroyed but the state survives.
    fn destroy_on_hazard(&self, st: &mut State, pushed: u32) -> bool {
        let params = &self.map.params;
        for si in 0..params.snakes {
            if pushed & snake_mask(si) != 0 && self.snake_hits_hazard(&st.snakes[si]) {
                return true;
            }
        }
        for gi in 0..params.gadgets {
            if pushed & gadget_mask(gi, params.snakes) != 0 && self.gadget_on_spike(st, gi) {
                st.gadgets[gi] = GADGET_DELETED;
            }
        }
        false
    }

    fn snake_hits_hazard(&self, snake: &Snake) -> bool {
        snake.cells(self.map.params.width).any(|cell| {
            let t = self.map.terrain(cell as i32);
            t == TERRAIN_SPIKE || t == TERRAIN_BLOCK
        })
    }

    fn gadget_on_spike(&self, st: &State, gi: usize) -> bool {
        let offset = st.gadgets[gi] as i32;
        if offset == GADGET_DELETED as i32 {
            return false;
        }
        self.map.gadgets[gi]
            .cells()
            .iter()
            .any(|&rel| self.map.terrain(offset + rel as i32) == TERRAIN_SPIKE)
    }

    /// Per-teleporter-endpoint occupancy bits: for pair `i`, the first
    /// endpoint's object mask, then the second's, at `2 * (N + G) * i`.
    fn teleporter_overlap(&self, obj: &ObjMap) -> u32 {
        let width = (self.map.params.snakes + self.map.params.gadgets) as u32;
        let mut mask = 0u32;
        for (i, &(a, b)) in self.map.teleporters.iter().enumerate() {
            mask |= (obj.mask_at(a as i32) | (obj.mask_at(b as i32) << width))
                << (width * 2 * i as u32);
        }
        mask
    }

    /// Fire every teleport whose (object, endpoint) pair is newly present.
    ///
    /// The bit order fixes the processing order for the multi-pair case; the
    /// real game never exercises it. Returns whether anything fired.
    fn process_teleports(&self, st: &mut State, obj: &ObjMap, only_new: u32) -> bool {
        let params = &self.map.params;
        let mut test = 1u32;
        let mut fired = false;
        for &(a, b) in self.map.teleporters.iter() {
            let mut delta = b as i32 - a as i32;
            for _ in 0..2 {
                for si in 0..params.snakes {
                    if test & only_new != 0 && self.try_snake_teleport(st, obj, si, delta) {
                        fired = true;
                    }
                    test <<= 1;
                }
                for gi in 0..params.gadgets {
                    if test & only_new != 0 && self.try_gadget_teleport(st, obj, gi, delta) {
                        fired = true;
                    }
                    test <<= 1;
                }
                // Delta was endpoint A to B; negate for the B-to-A bits.
                delta = -delta;
            }
        }
        fired
    }

    fn try_snake_teleport(&self, st: &mut State, obj: &ObjMap, si: usize, delta: i32) -> bool {
        // The translated footprint must land entirely on empty terrain and
        // empty cells; a segment landing on the snake's own pre-teleport
        // body blocks the teleport too.
        for cell in st.snakes[si].cells(self.map.params.width) {
            let to = cell as i32 + delta;
            if !self.map.empty_terrain_at(to) || !obj.no_object_at(to) {
                return false;
            }
        }
        st.snakes[si].translate(delta);
        true
    }

    fn try_gadget_teleport(&self, st: &mut State, obj: &ObjMap, gi: usize, delta: i32) -> bool {
        let offset = st.gadgets[gi] as i32 + delta;
        for &rel in self.map.gadgets[gi].cells() {
            let to = offset + rel as i32;
            if !self.map.empty_terrain_at(to) || !obj.no_object_at(to) {
                return false;
            }
        }
        st.gadgets[gi] += delta as i16;
        true
    }

    /// Run exits, teleports and gravity to a fixed point.
    ///
    /// `tele_mask` is the endpoint occupancy before the last physical change;
    /// only newly-appearing overlaps may fire. Returns `false` if the state
    /// dies (a snake lands on a spike or block).
    pub fn resolve(&self, st: &mut State, mut tele_mask: u32) -> bool {
        let params = &self.map.params;
        'again: loop {
            self.check_exits(st);

            let obj = ObjMap::build(st, self.map);
            let new_mask = self.teleporter_overlap(&obj);
            if new_mask & !tele_mask != 0
                && self.process_teleports(st, &obj, new_mask & !tele_mask)
            {
                let after = ObjMap::build(st, self.map);
                tele_mask = self.teleporter_overlap(&after);
                continue 'again;
            }
            tele_mask = new_mask;

            for si in 0..params.snakes {
                if !st.snakes[si].is_gone() {
                    let falling = self.snake_falling(st, &obj, si);
                    if falling != 0 {
                        self.do_pushes(st, falling, params.width as i32);
                        if self.destroy_on_hazard(st, falling) {
                            return false;
                        }
                        continue 'again;
                    }
                }
            }

            for gi in 0..params.gadgets {
                if st.gadgets[gi] != GADGET_DELETED {
                    let falling = self.gadget_falling(st, &obj, gi);
                    if falling != 0 {
                        self.do_pushes(st, falling, params.width as i32);
                        if self.destroy_on_hazard(st, falling) {
                            return false;
                        }
                        continue 'again;
                    }
                }
            }

            return true;
        }
    }

    /// Exits open only once every fruit is eaten; a snake leaves head-first.
    fn check_exits(&self, st: &mut State) {
        if st.fruit != 0 {
            return;
        }
        let params = &self.map.params;
        let mut exited = false;
        for snake in st.snakes[..params.snakes].iter_mut() {
            if !snake.is_gone() && snake.head == self.map.exit {
                snake.exit();
                exited = true;
            }
        }
        if exited {
            st.win = st.snakes[..params.snakes].iter().all(|s| s.is_gone());
        }
    }

    /// 0 if the snake is supported, otherwise the one-hot set of everything
    /// that falls with it. A snake is supported by wall below any segment, or
    /// by a foreign object below that cannot itself be pushed down.
    fn snake_falling(&self, st: &State, obj: &ObjMap, si: usize) -> u32 {
        let w = self.map.params.width as i32;
        let mut pushed = snake_mask(si);
        for cell in st.snakes[si].cells(self.map.params.width) {
            let below = cell as i32 + w;
            if self.map.terrain(below) == TERRAIN_WALL {
                return 0;
            }
            if obj.foreign_object_at(below, snake_id(si)) {
                match self.valid_push(st, obj, snake_id(si), cell as i32, w) {
                    Some(more) => pushed |= more,
                    None => return 0,
                }
            }
        }
        pushed
    }

    /// Gadgets rest on walls and blocks; otherwise as for snakes.
    fn gadget_falling(&self, st: &State, obj: &ObjMap, gi: usize) -> u32 {
        let params = &self.map.params;
        let w = params.width as i32;
        let offset = st.gadgets[gi] as i32;
        let id = gadget_id(gi, params.snakes);
        let mut pushed = gadget_mask(gi, params.snakes);
        for &rel in self.map.gadgets[gi].cells() {
            let at = offset + rel as i32;
            let below = at + w;
            let t = self.map.terrain(below);
            if t == TERRAIN_WALL || t == TERRAIN_BLOCK {
                return 0;
            }
            if obj.foreign_object_at(below, id) {
                match self.valid_push(st, obj, id, at, w) {
                    Some(more) => pushed |= more,
                    None => return 0,
                }
            }
        }
        pushed
    }
}
