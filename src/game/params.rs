//! Per-puzzle parameters and the capacity ceilings they must respect.

/// Maximum number of snakes we support.
pub const MAX_SNAKES: usize = 3;

/// Maximum number of gadgets we support.
pub const MAX_GADGETS: usize = 4;

/// Maximum number of cells in one gadget shape.
pub const MAX_GADGET_CELLS: usize = 8;

/// Maximum snake length (head plus tail segments). The packed tail holds
/// two bits per tail segment in a `u64`, so lengths up to 32 fit.
pub const MAX_SNAKE_LEN: usize = 32;

/// Maximum number of fruit (the surviving-fruit bitmask is a `u32`, one bit
/// reserved so the original's packed flags layout stays representable).
pub const MAX_FRUIT: usize = 31;

/// Maximum number of teleporter pairs.
pub const MAX_TELEPORTERS: usize = 2;

/// Upper bound on the packed byte length of any supported puzzle's state.
pub const MAX_PACKED_BYTES: usize = 40;

/// The `(H, W, F, N, L, G, T)` tuple declared alongside each map literal.
///
/// `snake_max_len` must be at least the longest initial snake plus the fruit
/// count, since every fruit eaten grows some snake by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub height: usize,
    pub width: usize,
    pub fruit: usize,
    pub snakes: usize,
    pub snake_max_len: usize,
    pub gadgets: usize,
    pub teleporters: usize,
}

impl Params {
    #[inline]
    pub fn cells(&self) -> usize {
        self.height * self.width
    }

    /// Panics on any parameter outside the supported ceilings. Parameter
    /// mismatches are programming faults, not runtime errors.
    pub fn validate(&self) {
        assert!(self.height >= 3 && self.width >= 3, "degenerate map size");
        assert!(self.cells() < u16::MAX as usize, "map too large to index");
        assert!(self.snakes >= 1 && self.snakes <= MAX_SNAKES);
        assert!(self.gadgets <= MAX_GADGETS);
        assert!(self.fruit <= MAX_FRUIT);
        assert!(self.teleporters <= MAX_TELEPORTERS);
        assert!(
            self.snake_max_len >= 1 && self.snake_max_len <= MAX_SNAKE_LEN,
            "snake_max_len {} out of range",
            self.snake_max_len
        );
    }
}
