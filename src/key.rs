//! Ordering and hashing of big-endian keys.
//!
//! A key is 16 bytes, most significant byte first.  Ordering looks only at
//! the first 12 bytes (see `codec`), so two keys that differ only in their
//! 4-byte suffix are equal as far as `compare`, `Eq`, `Ord` and `Hash` are
//! concerned.
//!
//! `hash` is a bit window, not a mixing function: it takes `bits` bits of the
//! big-endian value starting 32 bits below the most significant end.  Hash
//! tables that index by it keep keys with a common prefix in the same
//! bucket, and consumers that already store these values depend on the exact
//! window, so it must not change.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::arith::subtract_masked;
use crate::codec::{
    KEY_BITS, SUFFIX_BITS, WIDTH, decode, load_as_big_endian_key, to_big_endian_ordinal,
};
use crate::error::{Error, Result};

/// Widest hash window `hash` will extract.
pub const MAX_HASH_BITS: u32 = KEY_BITS;

/// Compares two keys by their 96-bit ordinals.
#[inline]
pub fn compare(a: &[u8; WIDTH], b: &[u8; WIDTH]) -> Ordering {
    subtract_masked(a, b).cmp(&0)
}

/// Extracts a `bits`-wide window of the key, starting 32 bits below its top.
/// The result is always below `2^bits`.  Widths above `MAX_HASH_BITS` would
/// shift by a negative amount and are rejected.
#[inline]
pub fn hash(a: &[u8; WIDTH], bits: u32) -> Result<u128> {
    if bits > MAX_HASH_BITS {
        return Err(Error::HashWidth {
            bits: bits.into(),
            max: MAX_HASH_BITS,
        });
    }
    let v = to_big_endian_ordinal(decode(a)) as u128;
    let mask = (1u128 << bits) - 1;
    Ok((v >> (128 - SUFFIX_BITS - bits)) & mask)
}

/// A 16-byte big-endian key.
///
/// Equality, ordering and hashing ignore the last 4 bytes, matching `compare`.
/// Use `as_bytes` to get at the exact bytes, suffix included.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct BigEndianKey([u8; WIDTH]);

impl BigEndianKey {
    pub const LEN: usize = WIDTH;

    #[inline]
    pub const fn new(bytes: [u8; WIDTH]) -> Self {
        Self(bytes)
    }

    /// Builds the key whose big-endian value is `v`.
    #[inline]
    pub const fn from_u128(v: u128) -> Self {
        Self(v.to_be_bytes())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; WIDTH] {
        &self.0
    }

    /// The full big-endian value, suffix included.
    #[inline]
    pub fn to_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// The 96-bit ordinal used for ordering.
    #[inline]
    pub fn ordinal(&self) -> i128 {
        load_as_big_endian_key(&self.0)
    }

    /// The 4-byte suffix, which does not take part in ordering.
    #[inline]
    pub fn suffix(&self) -> u32 {
        self.to_u128() as u32
    }

    /// See [`hash`].
    #[inline]
    pub fn hash_bits(&self, bits: u32) -> Result<u128> {
        hash(&self.0, bits)
    }

    /// `self - other` over the ordinals.
    #[inline]
    pub fn delta(&self, other: &Self) -> i128 {
        subtract_masked(&self.0, &other.0)
    }
}

impl From<[u8; WIDTH]> for BigEndianKey {
    fn from(bytes: [u8; WIDTH]) -> Self {
        Self(bytes)
    }
}

impl From<BigEndianKey> for [u8; WIDTH] {
    fn from(key: BigEndianKey) -> Self {
        key.0
    }
}

impl TryFrom<&[u8]> for BigEndianKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; WIDTH] = bytes.try_into().map_err(|_| Error::KeyLength(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8; WIDTH]> for BigEndianKey {
    fn as_ref(&self) -> &[u8; WIDTH] {
        &self.0
    }
}

impl PartialEq for BigEndianKey {
    fn eq(&self, other: &Self) -> bool {
        compare(&self.0, &other.0) == Ordering::Equal
    }
}

impl Eq for BigEndianKey {}

impl PartialOrd for BigEndianKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigEndianKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

impl Hash for BigEndianKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordinal().hash(state);
    }
}

impl fmt::LowerHex for BigEndianKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_u128(), f)
    }
}

// Shows all 32 hex digits, with the suffix split off.
impl fmt::Debug for BigEndianKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.to_u128();
        write!(f, "BigEndianKey({:024x}_{:08x})", v >> SUFFIX_BITS, v as u32)
    }
}
