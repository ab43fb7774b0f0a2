//! Error type for contract violations.
//!
//! Every operation in this crate is total over well-formed input, so these
//! errors only ever describe a caller handing in an argument that the
//! operation cannot honor without reading or writing out of bounds.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested hash width would shift outside the 128-bit word.
    #[error("hash width {bits} is outside 0..={max}")]
    HashWidth { bits: i64, max: u32 },

    /// The logical occupancy is larger than the backing array.
    #[error("occupancy {n} exceeds backing capacity {capacity}")]
    Occupancy { n: usize, capacity: usize },

    /// A boundary caller passed a negative occupancy.
    #[error("occupancy {0} is negative")]
    NegativeOccupancy(i32),

    /// A key was built from a slice that is not exactly 16 bytes long.
    #[error("key must be exactly 16 bytes, got {0}")]
    KeyLength(usize),
}
