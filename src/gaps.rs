//! Statistics over the gaps between consecutive keys.
//!
//! Feed keys in order and `GapStats` keeps the running sum of the deltas
//! between neighbours along with the K smallest and K largest of them.  For a
//! sorted set of hashes this shows how evenly they are spread: the mean gap,
//! the tightest clusters and the widest holes.  Nothing is allocated; the
//! trackers are inline arrays.

use std::fmt;

use log::trace;

use crate::arith::add;
use crate::key::BigEndianKey;
use crate::topk::Extremes;

#[derive(Clone, Copy)]
pub struct GapStats<const K: usize> {
    // The last key observed; the next gap is measured from it.
    previous: Option<BigEndianKey>,
    // Number of keys observed.
    keys: u64,
    // Sum of all gaps, wrapping.
    sum: i128,
    smallest: Extremes<K>,
    largest: Extremes<K>,
}

impl<const K: usize> GapStats<K> {
    pub fn new() -> Self {
        Self {
            previous: None,
            keys: 0,
            sum: 0,
            smallest: Extremes::mins(),
            largest: Extremes::maxs(),
        }
    }

    /// Collects the gaps of a whole sequence of keys.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = BigEndianKey>,
    {
        let mut stats = Self::new();
        stats.extend(keys);
        stats
    }

    /// Records the next key.  Returns its gap from the previous key,
    /// or `None` for the very first key.
    pub fn observe(&mut self, key: &BigEndianKey) -> Option<i128> {
        self.keys += 1;
        let previous = self.previous.replace(*key)?;
        let gap = key.delta(&previous);
        trace!("gap {gap:#x} after {previous:?}");
        add(&mut self.sum, gap);
        self.smallest.see(gap);
        self.largest.see(gap);
        Some(gap)
    }

    /// Number of keys observed.
    #[inline]
    pub fn keys(&self) -> u64 {
        self.keys
    }

    /// Number of gaps measured, one less than the number of keys.
    #[inline]
    pub fn gaps(&self) -> u64 {
        self.keys.saturating_sub(1)
    }

    #[inline]
    pub fn sum(&self) -> i128 {
        self.sum
    }

    /// The mean gap, rounded toward zero.  `None` until two keys have been seen.
    pub fn mean(&self) -> Option<i128> {
        let gaps = self.gaps();
        (gaps > 0).then(|| self.sum / i128::from(gaps))
    }

    /// The K smallest gaps, smallest first.
    #[inline]
    pub fn smallest(&self) -> &Extremes<K> {
        &self.smallest
    }

    /// The K largest gaps, largest first.
    #[inline]
    pub fn largest(&self) -> &Extremes<K> {
        &self.largest
    }
}

impl<const K: usize> Default for GapStats<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const K: usize> Extend<BigEndianKey> for GapStats<K> {
    fn extend<I: IntoIterator<Item = BigEndianKey>>(&mut self, keys: I) {
        for key in keys {
            self.observe(&key);
        }
    }
}

impl<const K: usize> fmt::Debug for GapStats<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GapStats")
            .field("keys", &self.keys)
            .field("sum", &self.sum)
            .field("smallest", &self.smallest)
            .field("largest", &self.largest)
            .finish()
    }
}

// One line per value, in ascending order: mean, smallest gaps, largest gaps.
impl<const K: usize> fmt::Display for GapStats<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(mean) = self.mean() else {
            return writeln!(f, "no gaps ({} keys)", self.keys);
        };
        write_gap(f, "mean", None, mean)?;
        for (i, gap) in self.smallest.iter().enumerate() {
            write_gap(f, "min", Some(i), gap)?;
        }
        let n = self.largest.len();
        for (i, gap) in self.largest.iter().rev().enumerate() {
            write_gap(f, "max", Some(n - 1 - i), gap)?;
        }
        Ok(())
    }
}

fn write_gap(f: &mut fmt::Formatter<'_>, label: &str, ix: Option<usize>, gap: i128) -> fmt::Result {
    match ix {
        Some(ix) => write!(f, "{label}{ix:>2}: {gap:032x}")?,
        None => write!(f, "{label:>5}: {gap:032x}")?,
    }
    if gap > 0 {
        writeln!(f, " (2^{:.4})", (gap as f64).log2())
    } else {
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(ordinal: u128) -> BigEndianKey {
        BigEndianKey::from_u128(ordinal << 32 | 0x5A5A)
    }

    #[test]
    fn first_key_has_no_gap() {
        let mut stats = GapStats::<2>::new();
        assert_eq!(stats.observe(&key(10)), None);
        assert_eq!(stats.keys(), 1);
        assert_eq!(stats.gaps(), 0);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.observe(&key(14)), Some(4));
        assert_eq!(stats.mean(), Some(4));
    }

    #[test]
    fn tracks_extreme_gaps() {
        let stats = GapStats::<2>::from_keys([0, 1, 5, 6, 20, 22].map(key));
        assert_eq!(stats.sum(), 22);
        assert_eq!(stats.gaps(), 5);
        assert_eq!(stats.mean(), Some(4));
        assert_eq!(stats.smallest().iter().collect::<Vec<_>>(), vec![1, 1]);
        assert_eq!(stats.largest().iter().collect::<Vec<_>>(), vec![14, 4]);
    }

    #[test]
    fn display_lists_values_ascending() {
        let stats = GapStats::<1>::from_keys([0, 2, 10].map(key));
        let text = stats.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                " mean: 00000000000000000000000000000005 (2^2.3219)",
                "min 0: 00000000000000000000000000000002 (2^1.0000)",
                "max 0: 00000000000000000000000000000008 (2^3.0000)",
            ]
        );
    }

    #[test]
    fn display_without_gaps() {
        let stats = GapStats::<1>::from_keys([key(3)]);
        assert_eq!(stats.to_string(), "no gaps (1 keys)\n");
    }
}
