//! The buffer-level interface, for callers that hold raw 16-byte values.
//!
//! Two byte orders meet here and nothing in the bytes says which is which:
//!
//! * keys (`a`, `b` in `compare_to`, `hash_code` and `hash_sub`) are
//!   big-endian, most significant byte first;
//! * native values (the `r` of `hash_sub` and `add`, and every slot of the
//!   `insert_min`/`insert_max` arrays) are in the target's native byte order,
//!   exactly as an `i128` sits in memory.
//!
//! Arguments a caller cannot legally pass (a hash width that does not fit the
//! 32-bit result, an occupancy that is negative or larger than the array) are
//! rejected before anything is read or written.

use log::debug;

use crate::arith;
use crate::codec::{WIDTH, decode, encode};
use crate::error::{Error, Result};
use crate::key;
use crate::topk::insert_by;

/// Widest hash window that fits the 32-bit result of `hash_code`.
pub const MAX_HASH_CODE_BITS: u32 = 32;

/// Compares two keys, ignoring their 4-byte suffixes.  Returns -1, 0 or 1.
#[inline]
pub fn compare_to(a: &[u8; WIDTH], b: &[u8; WIDTH]) -> i32 {
    key::compare(a, b) as i32
}

/// Extracts a `bits`-wide hash window of a key, for `bits` in `0..=32`.
pub fn hash_code(a: &[u8; WIDTH], bits: i32) -> Result<u32> {
    let width = u32::try_from(bits)
        .ok()
        .filter(|&b| b <= MAX_HASH_CODE_BITS)
        .ok_or_else(|| {
            debug!("rejecting hash width {bits}");
            Error::HashWidth {
                bits: bits.into(),
                max: MAX_HASH_CODE_BITS,
            }
        })?;
    // The window is at most 32 bits wide, so the narrowing is exact.
    Ok(key::hash(a, width)? as u32)
}

/// Writes `ordinal(a) - ordinal(b)` into `r` as a native `i128`.
#[inline]
pub fn hash_sub(r: &mut [u8; WIDTH], a: &[u8; WIDTH], b: &[u8; WIDTH]) {
    *r = encode(arith::subtract_masked(a, b));
}

/// Adds the native `i128` in `a` to the one in `r`, wrapping.
#[inline]
pub fn add(r: &mut [u8; WIDTH], a: &[u8; WIDTH]) {
    let mut sum = decode(r);
    arith::add(&mut sum, decode(a));
    *r = encode(sum);
}

/// `topk::insert_min` over native-order buffers.
pub fn insert_min(mins: &mut [[u8; WIDTH]], n: i32, candidate: &[u8; WIDTH]) -> Result<()> {
    insert_native(mins, n, candidate, |c, slot| c < slot)
}

/// `topk::insert_max` over native-order buffers.
pub fn insert_max(maxs: &mut [[u8; WIDTH]], n: i32, candidate: &[u8; WIDTH]) -> Result<()> {
    insert_native(maxs, n, candidate, |c, slot| c > slot)
}

fn insert_native(
    slots: &mut [[u8; WIDTH]],
    n: i32,
    candidate: &[u8; WIDTH],
    beats: fn(i128, i128) -> bool,
) -> Result<()> {
    let n = usize::try_from(n).map_err(|_| {
        debug!("rejecting negative occupancy {n}");
        Error::NegativeOccupancy(n)
    })?;
    insert_by(slots, n, *candidate, |c, slot| beats(decode(c), decode(slot)))
        .inspect_err(|e| debug!("rejecting insert: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn native(vs: &[i128]) -> Vec<[u8; WIDTH]> {
        vs.iter().map(|&v| encode(v)).collect()
    }

    fn values(slots: &[[u8; WIDTH]]) -> Vec<i128> {
        slots.iter().map(decode).collect()
    }

    #[test]
    fn compare_to_returns_unit_signs() {
        let lo = 1u128 << 32;
        let hi = 2u128 << 32;
        assert_eq!(compare_to(&lo.to_be_bytes(), &hi.to_be_bytes()), -1);
        assert_eq!(compare_to(&hi.to_be_bytes(), &lo.to_be_bytes()), 1);
        assert_eq!(compare_to(&hi.to_be_bytes(), &(hi | 0xFFFF).to_be_bytes()), 0);
    }

    #[test]
    fn hash_code_range() {
        let key = u128::MAX.to_be_bytes();
        assert_eq!(hash_code(&key, 0), Ok(0));
        assert_eq!(hash_code(&key, 5), Ok(0x1F));
        assert_eq!(hash_code(&key, 32), Ok(u32::MAX));
        assert_eq!(
            hash_code(&key, 33),
            Err(Error::HashWidth { bits: 33, max: 32 })
        );
        assert_eq!(
            hash_code(&key, -1),
            Err(Error::HashWidth { bits: -1, max: 32 })
        );
    }

    #[test]
    fn hash_sub_then_add_accumulates() {
        let a = (10u128 << 32).to_be_bytes();
        let b = (3u128 << 32 | 0xABCD).to_be_bytes();
        let mut diff = [0u8; WIDTH];
        hash_sub(&mut diff, &a, &b);
        assert_eq!(decode(&diff), 7);

        let mut sum = encode(100);
        add(&mut sum, &diff);
        assert_eq!(decode(&sum), 107);
        hash_sub(&mut diff, &b, &a);
        add(&mut sum, &diff);
        assert_eq!(decode(&sum), 100);
    }

    #[test]
    fn insert_min_over_buffers() {
        let mut mins = native(&[1, 5, 9, 0]);
        insert_min(&mut mins, 3, &encode(7)).unwrap();
        assert_eq!(values(&mins), vec![1, 5, 7, 0]);
    }

    #[test]
    fn insert_max_over_buffers() {
        let mut maxs = native(&[9, 5, 1]);
        insert_max(&mut maxs, 3, &encode(-1)).unwrap();
        assert_eq!(values(&maxs), vec![9, 5, 1]);
        insert_max(&mut maxs, 3, &encode(10)).unwrap();
        assert_eq!(values(&maxs), vec![10, 9, 5]);
    }

    #[test]
    fn bad_occupancy_is_rejected() {
        let mut mins = native(&[1, 2]);
        assert_eq!(
            insert_min(&mut mins, -1, &encode(0)),
            Err(Error::NegativeOccupancy(-1))
        );
        assert_eq!(
            insert_min(&mut mins, 3, &encode(0)),
            Err(Error::Occupancy { n: 3, capacity: 2 })
        );
        assert_eq!(values(&mins), vec![1, 2]);
    }
}
