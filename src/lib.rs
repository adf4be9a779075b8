//! # atkin — Sieve of Atkin Primality Oracle
//!
//! Builds the primality of every integer in `[0, limit]` once with the Sieve
//! of Atkin, then serves O(1) queries.
//!
//! ```
//! use atkin::{Sieve, SieveError};
//!
//! let sieve = Sieve::new(30);
//! assert_eq!(sieve.is_prime(29), Ok(true));
//! assert_eq!(sieve.is_prime(27), Ok(false));
//! assert!(sieve[23]);
//! assert_eq!(
//!     sieve.is_prime(31),
//!     Err(SieveError::IndexOutOfRange { index: 31, limit: 30 })
//! );
//! assert_eq!(sieve.count(), 10);
//! ```

pub mod bitmap;
pub mod sieve;

pub use sieve::{Sieve, SieveError};
