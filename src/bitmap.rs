//! # Bitmap — Packed Flag Storage for the Sieve
//!
//! One bit per integer index, packed into `u64` words. The Atkin sieve keeps
//! its whole filter here: an 8× memory reduction over `Vec<bool>`, so a
//! 100M limit costs ~12.5 MB instead of 100 MB.
//!
//! Bit layout: index `i` lives in word `i / 64`, bit position `i % 64`.
//! A set bit means "currently considered prime".

/// Packed bit array backing the sieve filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSieve {
    words: Vec<u64>,
    len: usize,
}

impl BitSieve {
    /// Create a bitmap of `len` bits, all cleared to 0.
    pub fn new_all_clear(len: usize) -> Self {
        let num_words = len.div_ceil(64);
        BitSieve {
            words: vec![0u64; num_words],
            len,
        }
    }

    /// Number of bits in this bitmap.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the bitmap has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get bit `index`.
    ///
    /// # Panics
    /// Panics if `index >= len` in debug builds.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(
            index < self.len,
            "BitSieve index out of bounds: {} >= {}",
            index,
            self.len
        );
        let word = self.words[index / 64];
        word & (1u64 << (index % 64)) != 0
    }

    /// Set bit `index` to 1.
    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Clear bit `index` to 0.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Flip bit `index`.
    #[inline]
    pub fn toggle(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / 64] ^= 1u64 << (index % 64);
    }

    /// Count set bits in `[0, end)` using hardware POPCNT on whole words and a
    /// mask on the trailing partial word. `end` is clamped to `len`.
    pub fn count_ones_before(&self, end: usize) -> usize {
        let end = end.min(self.len);
        let full = end / 64;
        let mut total: usize = self.words[..full]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum();
        let rem = end % 64;
        if rem > 0 {
            let mask = (1u64 << rem) - 1;
            total += (self.words[full] & mask).count_ones() as usize;
        }
        total
    }

    /// Iterate over the indices of all set bits in ascending order.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let base = wi * 64;
            BitIter { word, base }
        })
    }
}

/// Iterator over set bits within a single u64 word.
struct BitIter {
    word: u64,
    base: usize,
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1; // clear lowest set bit
        Some(self.base + tz)
    }
}

#[cfg(test)]
mod tests {
    //! Packed bitmap tests. Word boundaries (63/64, 127/128) are where the
    //! `i / 64` and `i % 64` split changes words, so most cases sit there.

    use super::*;

    #[test]
    fn new_all_clear_has_no_set_bits() {
        let bs = BitSieve::new_all_clear(100);
        assert_eq!(bs.len(), 100);
        assert_eq!(bs.words.len(), 2);
        assert_eq!(bs.count_ones_before(100), 0);
        for i in 0..100 {
            assert!(!bs.get(i), "bit {} should be clear", i);
        }
    }

    #[test]
    fn empty_bitmap() {
        let bs = BitSieve::new_all_clear(0);
        assert_eq!(bs.len(), 0);
        assert!(bs.is_empty());
        assert_eq!(bs.count_ones_before(0), 0);
        assert_eq!(bs.iter_set_bits().count(), 0);
    }

    /// Set/clear/get at 0, 63, 64, 127, 128 and the last valid index.
    #[test]
    fn set_clear_get_across_words() {
        let mut bs = BitSieve::new_all_clear(200);
        for &i in &[0usize, 63, 64, 127, 128, 199] {
            bs.set(i);
        }
        for &i in &[0usize, 63, 64, 127, 128, 199] {
            assert!(bs.get(i), "bit {} should be set", i);
        }
        assert!(!bs.get(1));
        assert!(!bs.get(65));
        assert_eq!(bs.count_ones_before(200), 6);

        bs.clear(64);
        assert!(!bs.get(64));
        assert!(bs.get(63));
        assert!(bs.get(127));
        assert_eq!(bs.count_ones_before(200), 5);
    }

    /// Toggling twice restores the bit; neighbours in the same word are untouched.
    #[test]
    fn toggle_flips_and_cancels() {
        let mut bs = BitSieve::new_all_clear(130);
        bs.set(65);
        bs.toggle(64);
        assert!(bs.get(64));
        assert!(bs.get(65));
        bs.toggle(64);
        assert!(!bs.get(64));
        assert!(bs.get(65));

        bs.toggle(129);
        bs.toggle(129);
        bs.toggle(129);
        assert!(bs.get(129));
    }

    #[test]
    fn count_ones_before_masks_partial_word() {
        let mut bs = BitSieve::new_all_clear(256);
        for &i in &[0usize, 5, 63, 64, 100, 191, 192, 255] {
            bs.set(i);
        }
        assert_eq!(bs.count_ones_before(0), 0);
        assert_eq!(bs.count_ones_before(1), 1);
        assert_eq!(bs.count_ones_before(6), 2);
        assert_eq!(bs.count_ones_before(63), 2);
        assert_eq!(bs.count_ones_before(64), 3);
        assert_eq!(bs.count_ones_before(65), 4);
        assert_eq!(bs.count_ones_before(192), 6);
        assert_eq!(bs.count_ones_before(256), 8);
        // clamped to len
        assert_eq!(bs.count_ones_before(10_000), 8);
    }

    #[test]
    fn iter_set_bits_ascending() {
        let mut bs = BitSieve::new_all_clear(200);
        let expected = vec![0, 1, 63, 64, 65, 127, 128, 199];
        for &i in &expected {
            bs.set(i);
        }
        let collected: Vec<usize> = bs.iter_set_bits().collect();
        assert_eq!(collected, expected);
    }

    /// `count_ones_before(len)` and `iter_set_bits().count()` must agree on an
    /// irregular pattern spanning many words.
    #[test]
    fn iter_set_bits_matches_count() {
        let mut bs = BitSieve::new_all_clear(1000);
        for i in (0..1000).filter(|i| i % 7 == 3 || i % 11 == 0) {
            bs.set(i);
        }
        assert_eq!(bs.count_ones_before(1000), bs.iter_set_bits().count());
    }
}
