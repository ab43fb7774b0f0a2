//! wide_keys works with 128-bit keys that are stored and sent big-endian,
//! most significant byte first, so that sorting their bytes sorts the keys.
//! Comparing, hashing and subtracting them is done on native `i128`s, with
//! the byte swap paid once per load.
//!
//! A key's last four bytes are a suffix (an id, a counter) that does not take
//! part in ordering.  Two keys that differ only there compare equal, and the
//! difference between two keys is the difference of their leading 96 bits.
//! Since 96-bit values cannot overflow an `i128` when subtracted, comparison
//! is simply the sign of the difference.
//!
//! The pieces:
//!
//! * `codec` loads 16-byte buffers as native integers and key ordinals.
//! * `key` compares keys and projects a fixed-width hash window out of them.
//!   `BigEndianKey` wraps a buffer with the matching `Ord`, `Eq` and `Hash`.
//! * `arith` subtracts keys and accumulates deltas, wrapping like machine words.
//! * `topk` keeps the K smallest or K largest values of a stream in a sorted
//!   array, either one you own (`insert_min`, `insert_max`) or an inline one
//!   (`Extremes`).
//! * `gaps` puts the above together: the sum, mean and extremes of the gaps
//!   between consecutive keys.
//! * `boundary` offers the same operations over raw 16-byte buffers, for
//!   callers on the far side of an FFI or a wire format.
//!
//! Nothing here allocates.  Every operation works on buffers and arrays the
//! caller owns, and returns an `Error` rather than reading or writing out of
//! bounds when handed an argument it cannot honor.
//!
//! ```
//! use wide_keys::{BigEndianKey, Extremes};
//!
//! let a = BigEndianKey::from_u128(0x10 << 32 | 0xAAAA);
//! let b = BigEndianKey::from_u128(0x10 << 32 | 0xBBBB);
//! assert_eq!(a, b); // only the suffixes differ
//!
//! let mut closest = Extremes::<3>::mins();
//! for gap in [9, 1, 5, 7] {
//!     closest.see(gap);
//! }
//! assert_eq!(closest.iter().collect::<Vec<_>>(), vec![1, 5, 7]);
//! ```

pub mod arith;
pub mod boundary;
pub mod codec;
pub mod error;
pub mod gaps;
pub mod key;
pub mod topk;

pub use arith::{add, subtract_masked};
pub use error::{Error, Result};
pub use gaps::GapStats;
pub use key::{BigEndianKey, compare, hash};
pub use topk::{Direction, Extremes, insert_max, insert_min, seed_maxs, seed_mins};
