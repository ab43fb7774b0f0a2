//! Tracking the K smallest or K largest values of a stream.
//!
//! The tracked values live in a small array that is kept fully sorted, best
//! first.  A new value is placed by a linear scan for the first element it
//! beats, then everything from there down shifts one slot toward the end and
//! the last (worst) element falls off.  For the handful of values a top-K
//! tracker keeps this beats a heap, and it means the best value is always at
//! index 0 and the admission bar is always at index `n - 1`.
//!
//! The array never grows.  Every slot is always occupied, so an empty tracker
//! has to be seeded with a sentinel that every real value beats: `i128::MAX`
//! for mins, `i128::MIN` for maxs.  `seed_mins` and `seed_maxs` do that for a
//! caller-owned array; `Extremes` does it for you.
//!
//! Note that a value equal to the sentinel is never admitted.  If you need
//! `i128::MAX` in a mins tracker, you need a different representation.

use std::fmt::Debug;

use crate::error::{Error, Result};

/// Which end of the order a tracker keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Keep the smallest values, ascending.
    Min,
    /// Keep the largest values, descending.
    Max,
}

impl Direction {
    /// Whether `candidate` belongs in front of `incumbent`.
    /// Ties do not beat, so the oldest of equal values stays in front.
    #[inline]
    pub fn beats(self, candidate: i128, incumbent: i128) -> bool {
        match self {
            Direction::Min => candidate < incumbent,
            Direction::Max => candidate > incumbent,
        }
    }

    /// The value that every other value beats.
    #[inline]
    pub fn sentinel(self) -> i128 {
        match self {
            Direction::Min => i128::MAX,
            Direction::Max => i128::MIN,
        }
    }
}

// Inserts candidate in front of the first slot it beats, dropping the last slot.
// Returns the index it landed at, or None if it beats nothing.
#[inline]
pub(crate) fn shift_in<T: Copy>(
    slots: &mut [T],
    candidate: T,
    beats: impl Fn(&T, &T) -> bool,
) -> Option<usize> {
    let i = slots.iter().position(|slot| beats(&candidate, slot))?;
    let n = slots.len();
    slots.copy_within(i..n - 1, i + 1);
    slots[i] = candidate;
    Some(i)
}

// Checks the occupancy against the backing array, then shifts in.
#[inline]
pub(crate) fn insert_by<T: Copy>(
    slots: &mut [T],
    n: usize,
    candidate: T,
    beats: impl Fn(&T, &T) -> bool,
) -> Result<Option<usize>> {
    let capacity = slots.len();
    let occupied = slots
        .get_mut(..n)
        .ok_or(Error::Occupancy { n, capacity })?;
    Ok(shift_in(occupied, candidate, beats))
}

/// Inserts `candidate` into the ascending array `mins[..n]` if it is smaller
/// than one of its elements; the largest element is dropped to make room.
/// Returns the index it was written to, or `None` if the array is unchanged.
/// With `n == 0` nothing is tracked and nothing is ever inserted.
pub fn insert_min(mins: &mut [i128], n: usize, candidate: i128) -> Result<Option<usize>> {
    insert_by(mins, n, candidate, |c, slot| c < slot)
}

/// Inserts `candidate` into the descending array `maxs[..n]` if it is larger
/// than one of its elements; the smallest element is dropped to make room.
/// Returns the index it was written to, or `None` if the array is unchanged.
pub fn insert_max(maxs: &mut [i128], n: usize, candidate: i128) -> Result<Option<usize>> {
    insert_by(maxs, n, candidate, |c, slot| c > slot)
}

/// Fills an array with the mins sentinel, making it an empty mins tracker.
pub fn seed_mins(mins: &mut [i128]) {
    mins.fill(Direction::Min.sentinel());
}

/// Fills an array with the maxs sentinel, making it an empty maxs tracker.
pub fn seed_maxs(maxs: &mut [i128]) {
    maxs.fill(Direction::Max.sentinel());
}

/// Keeps the K best values seen so far, in an inline array.
#[derive(Clone, Copy)]
pub struct Extremes<const K: usize> {
    // Which end of the order we keep.
    direction: Direction,
    // Fills the slots that no value has claimed yet.  A value must beat it
    // to be admitted.
    sentinel: i128,
    // Best first.  Sentinels, if any, are all at the end.
    values: [i128; K],
}

impl<const K: usize> Extremes<K> {
    /// An empty tracker of the K smallest values.
    pub fn mins() -> Self {
        Self::with_sentinel(Direction::Min, Direction::Min.sentinel())
    }

    /// An empty tracker of the K largest values.
    pub fn maxs() -> Self {
        Self::with_sentinel(Direction::Max, Direction::Max.sentinel())
    }

    /// An empty tracker that only admits values beating `sentinel`.
    /// E.g. a maxs tracker with sentinel 0 keeps the K largest positive values.
    pub fn with_sentinel(direction: Direction, sentinel: i128) -> Self {
        Self {
            direction,
            sentinel,
            values: [sentinel; K],
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn sentinel(&self) -> i128 {
        self.sentinel
    }

    /// A value has to beat this to be admitted: the worst tracked value once
    /// the tracker is full, the sentinel before that.
    #[inline]
    pub fn threshold(&self) -> i128 {
        self.values.last().copied().unwrap_or(self.sentinel)
    }

    /// Considers a new value.  Returns 0 if it was not admitted, otherwise its
    /// position among the tracked values: 1 for the best, K for the worst.
    #[inline]
    pub fn see(&mut self, value: i128) -> usize {
        // Cheap rejection first; most values in a long stream fail it.
        // With K == 0 there is nothing to beat and nothing to hold.
        if K == 0 || !self.direction.beats(value, self.threshold()) {
            return 0;
        }
        let direction = self.direction;
        shift_in(&mut self.values, value, |c, slot| direction.beats(*c, *slot))
            .map_or(0, |i| i + 1)
    }

    /// Forgets everything, refilling with the sentinel.
    pub fn clear(&mut self) {
        self.values = [self.sentinel; K];
    }

    /// Number of values tracked so far, at most K.
    #[inline]
    pub fn len(&self) -> usize {
        self.values
            .iter()
            .position(|&v| v == self.sentinel)
            .unwrap_or(K)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == K
    }

    /// The best value tracked, if any.
    #[inline]
    pub fn best(&self) -> Option<i128> {
        self.iter().next()
    }

    /// The worst value tracked, if any.
    #[inline]
    pub fn worst(&self) -> Option<i128> {
        self.iter().next_back()
    }

    /// All K slots, sentinels included.
    #[inline]
    pub fn as_slice(&self) -> &[i128] {
        &self.values
    }

    /// Returns an Iterator over the tracked values, best first.
    /// Sentinels are skipped, so you get fewer than K values until K have been admitted.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            values: &self.values,
            front: 0,
            back: self.len(),
        }
    }
}

impl<const K: usize> Default for Extremes<K> {
    fn default() -> Self {
        Self::mins()
    }
}

// Custom Debug implementation to show unclaimed slots as `-`.
impl<const K: usize> Debug for Extremes<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Extremes {{ direction: {:?}, sentinel: {}, values: [",
            self.direction, self.sentinel
        )?;
        for (i, &v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
                if i % 4 == 0 {
                    write!(f, " ")?;
                }
            }
            if v == self.sentinel {
                write!(f, "-")?;
            } else {
                write!(f, "{v:?}")?;
            }
        }
        write!(f, "] }}")
    }
}

impl<'a, const K: usize> IntoIterator for &'a Extremes<K> {
    type Item = i128;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the values of an Extremes, best first.
/// The iterator is double-ended, so you can use .rev() to get worst first.
pub struct Iter<'a> {
    // The tracked values, sentinels included.
    values: &'a [i128],
    // Index of the next value to return from next().
    front: usize,
    // Index just past the next value to return from next_back().
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = i128;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            self.front += 1;
            Some(self.values[self.front - 1])
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            self.back -= 1;
            Some(self.values[self.back])
        }
    }
}

impl ExactSizeIterator for Iter<'_> {}
