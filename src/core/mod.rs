//! Low-level, allocation-free primitives.
//!
//! These are intentionally compact because the solver manipulates packed
//! byte records for hundreds of millions of states:
//!
//! - [`bitpack`]: little-endian bit deposit/extract into byte buffers.
//! - [`direction`]: the four grid step directions and their two-bit codes.

pub mod bitpack;
pub mod direction;
