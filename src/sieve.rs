//! # Sieve — Sieve of Atkin Primality Oracle
//!
//! Computes the primality of every integer in the closed range `[0, limit]`
//! once, then answers point queries in O(1). The whole construction is a
//! single ordered pipeline:
//!
//! 1. **Allocate** a packed bitmap with `limit + 1` slots, all clear.
//! 2. **Seed** 2 and 3, which no quadratic form below reaches.
//! 3. **Mark candidates**: for every `1 <= x, y <= root` toggle the flag of
//!    each value of the three Atkin forms that lands in its residue class.
//! 4. **Eliminate** multiples of `r²` for every surviving `r` in `[5, root]`.
//!
//! ## Algorithm: Sieve of Atkin
//!
//! A square-free n > 3 is prime iff it has an odd number of representations
//! by the form matching its residue mod 12:
//!
//! | form          | condition       | residues mod 12 |
//! |---------------|-----------------|-----------------|
//! | 4x² + y²      |                 | 1, 5            |
//! | 3x² + y²      |                 | 7               |
//! | 3x² − y²      | x > y           | 11              |
//!
//! Marking toggles rather than sets, so an even number of hits cancels.
//! Marking alone cannot tell square-free numbers from the rest, so the
//! elimination pass clears every multiple of a prime square.
//!
//! `root = ceil(sqrt(limit))` bounds both passes: each form needs
//! `y² <= limit` and `x² <= limit / 2`, and any composite `<= limit` with a
//! square factor has a prime square factor `<= limit`.
//!
//! ## Operating envelope
//!
//! Memory is one bit per index (`~limit / 8` bytes). Time is O(limit) with a
//! constant dominated by the `root × root` marking loop. Nothing caps
//! `limit`; callers choose a realistic bound.
//!
//! ## Buffer reuse
//!
//! [`Sieve::resize`] only recomputes when growing. Shrinking keeps the larger
//! buffer (its flags stay correct for every smaller range) and lowers the
//! reported limit; queries and [`Sieve::filter`] are bounded by that limit.
//!
//! ## References
//!
//! - A. O. L. Atkin and D. J. Bernstein, "Prime sieves using binary quadratic
//!   forms", Mathematics of Computation, 73(246):1023–1030, 2004.

use std::fmt;
use std::ops::Index;

use tracing::debug;

use crate::bitmap::BitSieve;

/// Errors from sieve queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SieveError {
    /// The queried index is above the sieve's current limit.
    IndexOutOfRange { index: usize, limit: usize },
}

impl fmt::Display for SieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SieveError::IndexOutOfRange { index, limit } => {
                write!(f, "index {} out of range for sieve limit {}", index, limit)
            }
        }
    }
}

impl std::error::Error for SieveError {}

/// Primality oracle over `[0, limit]`, built with the Sieve of Atkin.
#[derive(Clone, Debug)]
pub struct Sieve {
    filter: BitSieve,
    limit: usize,
}

impl Sieve {
    /// Build a sieve valid for the closed range `[0, limit]`.
    pub fn new(limit: usize) -> Self {
        let mut sieve = Sieve {
            filter: BitSieve::new_all_clear(0),
            limit: 0,
        };
        sieve.resize(limit);
        sieve
    }

    /// Re-establish the sieve for `[0, limit]`.
    ///
    /// A no-op apart from updating [`limit`](Self::limit) when the held buffer
    /// already covers `limit`; otherwise reallocates and reruns both passes.
    pub fn resize(&mut self, limit: usize) {
        if self.filter.len() > limit {
            debug!(
                limit,
                previous = self.limit,
                buffer = self.filter.len(),
                "sieve buffer reused"
            );
            self.limit = limit;
            return;
        }

        self.limit = limit;
        self.filter = BitSieve::new_all_clear(limit.saturating_add(1));

        let root = ceil_sqrt(limit);

        if limit >= 2 {
            self.filter.set(2);
        }
        if limit >= 3 {
            self.filter.set(3);
        }

        self.mark_candidates(root);
        self.eliminate_squares(root);

        debug!(
            limit,
            root,
            primes = self.count(),
            "sieve of atkin computed"
        );
    }

    /// Toggle every in-range value of the three quadratic forms whose residue
    /// mod 12 matches its form.
    fn mark_candidates(&mut self, root: usize) {
        let limit = self.limit;
        let in_range = |n: Option<usize>| n.filter(|&n| n <= limit);

        for x in 1..=root {
            let Some(xx) = x.checked_mul(x) else { break };
            let xx3 = xx.checked_mul(3);
            let xx4 = xx.checked_mul(4);

            for y in 1..=root {
                let Some(yy) = y.checked_mul(y) else { break };

                if let Some(n) = in_range(xx4.and_then(|v| v.checked_add(yy))) {
                    if n % 12 == 1 || n % 12 == 5 {
                        self.filter.toggle(n);
                    }
                }

                if let Some(n) = in_range(xx3.and_then(|v| v.checked_add(yy))) {
                    if n % 12 == 7 {
                        self.filter.toggle(n);
                    }
                }

                // 3x² > y² whenever x > y, so the subtraction cannot underflow
                if x > y {
                    if let Some(n) = in_range(xx3.map(|v| v - yy)) {
                        if n % 12 == 11 {
                            self.filter.toggle(n);
                        }
                    }
                }
            }
        }
    }

    /// Clear every multiple of `r²` for each prime `r` in `[5, root]`.
    ///
    /// Ascending order matters: a composite `r <= root` has already been
    /// cleared by its smallest prime square before the loop reaches it.
    fn eliminate_squares(&mut self, root: usize) {
        let limit = self.limit;
        for r in 5..=root.min(limit) {
            if !self.filter.get(r) {
                continue;
            }
            let Some(square) = r.checked_mul(r) else { break };
            if square > limit {
                break;
            }
            for i in (square..=limit).step_by(square) {
                self.filter.clear(i);
            }
        }
    }

    /// Whether `n` is prime. Fails for `n > limit`, regardless of what a
    /// previously larger buffer still holds.
    pub fn is_prime(&self, n: usize) -> Result<bool, SieveError> {
        if n > self.limit {
            return Err(SieveError::IndexOutOfRange {
                index: n,
                limit: self.limit,
            });
        }
        Ok(self.filter.get(n))
    }

    /// Like [`is_prime`](Self::is_prime), with `None` for out-of-range input.
    pub fn get(&self, n: usize) -> Option<bool> {
        self.is_prime(n).ok()
    }

    /// Current inclusive upper bound.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Owned copy of the flags for `[0, limit]`; index `i` is `true` iff `i`
    /// is prime.
    pub fn filter(&self) -> Vec<bool> {
        (0..=self.limit).map(|i| self.filter.get(i)).collect()
    }

    /// All primes in `[0, limit]`, ascending.
    pub fn primes(&self) -> Vec<usize> {
        let limit = self.limit;
        self.filter
            .iter_set_bits()
            .take_while(|&i| i <= limit)
            .collect()
    }

    /// Number of primes in `[0, limit]` (π(limit)).
    pub fn count(&self) -> usize {
        self.filter.count_ones_before(self.limit.saturating_add(1))
    }
}

impl Index<usize> for Sieve {
    type Output = bool;

    /// `sieve[n]` is [`Sieve::is_prime`] that panics on an out-of-range index.
    fn index(&self, n: usize) -> &bool {
        match self.is_prime(n) {
            Ok(true) => &true,
            Ok(false) => &false,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Exact `ceil(sqrt(n))`. Starts from the f64 estimate and corrects it with
/// integer arithmetic, which the estimate alone gets wrong near perfect
/// squares above 2^52.
pub fn ceil_sqrt(n: usize) -> usize {
    if n < 2 {
        return n;
    }
    let mut r = (n as f64).sqrt() as usize;
    while r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    if r * r == n {
        r
    } else {
        r + 1
    }
}
