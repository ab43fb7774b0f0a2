//! Native 128-bit delta arithmetic.
//!
//! Both operations wrap on overflow, like fixed-width machine arithmetic.
//! Because key ordinals are 96 bits wide, `subtract_masked` never actually
//! wraps; `add` can, if a caller accumulates enough large deltas.

use crate::codec::{WIDTH, load_as_big_endian_key};

/// Returns `ordinal(a) - ordinal(b)`, ignoring the 4-byte suffix of both keys.
#[inline]
pub fn subtract_masked(a: &[u8; WIDTH], b: &[u8; WIDTH]) -> i128 {
    load_as_big_endian_key(a).wrapping_sub(load_as_big_endian_key(b))
}

/// Accumulates `a` into `r`.
#[inline]
pub fn add(r: &mut i128, a: i128) {
    *r = r.wrapping_add(a);
}
