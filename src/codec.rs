//! Loading 16-byte buffers as native 128-bit integers.
//!
//! Keys travel most-significant-byte first so that a plain byte-wise sort
//! agrees with numeric order, but all arithmetic happens on native words.
//! A raw load followed by `to_big_endian_ordinal` gives the numeric value of
//! a big-endian buffer on any target.
//!
//! The last four bytes of a key are a suffix (a counter, an id, a salt)
//! that takes no part in ordering.  `load_as_big_endian_key` drops them and
//! returns the remaining 96 bits right-aligned, so the ordinal is always in
//! `0..2^96` and the difference of two ordinals can never overflow an `i128`.

/// Width of a key or native value in bytes.
pub const WIDTH: usize = 16;

/// Number of low-order bits of the big-endian value that are not part of the key.
pub const SUFFIX_BITS: u32 = 32;

/// Number of bits of the big-endian value that take part in ordering.
pub const KEY_BITS: u32 = 128 - SUFFIX_BITS;

/// Reinterprets 16 bytes as a native-order integer.  No byte swap.
/// The argument is a byte array, so the read carries no alignment requirement.
#[inline]
pub fn decode(buffer: &[u8; WIDTH]) -> i128 {
    i128::from_ne_bytes(*buffer)
}

/// Writes a native-order integer back out as 16 bytes.  Inverse of `decode`.
#[inline]
pub fn encode(v: i128) -> [u8; WIDTH] {
    v.to_ne_bytes()
}

/// Reverses the byte order of a raw load so that a big-endian buffer becomes
/// its numeric value.  On big-endian targets this is the identity.
#[inline]
pub fn to_big_endian_ordinal(v: i128) -> i128 {
    i128::from_be(v)
}

/// Loads a key and returns its 96-bit ordinal, with the 4-byte suffix dropped.
#[inline]
pub fn load_as_big_endian_key(buffer: &[u8; WIDTH]) -> i128 {
    // Logical shift: the top bit of the big-endian value is data, not a sign.
    ((to_big_endian_ordinal(decode(buffer)) as u128) >> SUFFIX_BITS) as i128
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_is_a_raw_load() {
        let bytes: [u8; WIDTH] = core::array::from_fn(|i| i as u8);
        assert_eq!(decode(&bytes), i128::from_ne_bytes(bytes));
        assert_eq!(encode(decode(&bytes)), bytes);
    }

    #[test]
    fn ordinal_reads_most_significant_byte_first() {
        let mut bytes = [0u8; WIDTH];
        bytes[15] = 0x01;
        assert_eq!(to_big_endian_ordinal(decode(&bytes)), 1);
        bytes[0] = 0x80;
        assert_eq!(
            to_big_endian_ordinal(decode(&bytes)) as u128,
            (1u128 << 127) | 1
        );
    }

    #[test]
    fn key_drops_the_suffix() {
        let bytes = (0x0102_0304_0506_0708_090A_0B0C_DEAD_BEEFu128).to_be_bytes();
        assert_eq!(
            load_as_big_endian_key(&bytes),
            0x0102_0304_0506_0708_090A_0B0C
        );
    }

    #[test]
    fn key_is_never_negative() {
        let bytes = [0xFF; WIDTH];
        let k = load_as_big_endian_key(&bytes);
        assert!(k > 0);
        assert_eq!(k, (1i128 << KEY_BITS) - 1);
    }

    #[test]
    fn unaligned_views_decode_the_same() {
        let backing: [u8; WIDTH + 1] = core::array::from_fn(|i| (i * 7) as u8);
        let unaligned: &[u8; WIDTH] = backing[1..].try_into().unwrap();
        let copied: [u8; WIDTH] = *unaligned;
        assert_eq!(decode(unaligned), decode(&copied));
    }
}
