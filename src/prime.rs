// Prime Numbers
// Miller-Rabin primality testing, random prime generation and safe-prime search

use log::{debug, trace, warn};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, Rng};

use crate::config::KeygenConfig;
use crate::error::{Error, Result};

/// Below this bound the fixed witness set makes Miller-Rabin deterministic.
pub const DETERMINISTIC_BOUND: u64 = 3_825_123_056_546_413_051;

/// Fixed witnesses used for n < DETERMINISTIC_BOUND
const DETERMINISTIC_WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Random witnesses above the bound are drawn from [2, min(n-2, 2^20)]
const MAX_RANDOM_WITNESS: u32 = 1 << 20;

/// Trial divisors tried before running Miller-Rabin on a candidate
const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
    307, 311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419,
    421, 431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541,
];

/// Miller-Rabin primality test
/// Returns true if n is probably prime
///
/// Never reports a prime as composite. Below `DETERMINISTIC_BOUND` the answer
/// is exact; above it a composite survives `rounds` random witnesses with
/// probability at most 4^(-rounds).
pub fn is_prime(n: &BigUint, rounds: u32) -> bool {
    is_prime_with_rng(n, rounds, &mut thread_rng())
}

/// Same as [`is_prime`], drawing random witnesses from `rng`.
pub fn is_prime_with_rng<R: Rng + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    if n <= &BigUint::one() {
        return false;
    }
    if n <= &BigUint::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let witnesses: Vec<BigUint> = if n < &BigUint::from(DETERMINISTIC_BOUND) {
        DETERMINISTIC_WITNESSES
            .iter()
            .map(|&a| BigUint::from(a))
            .collect()
    } else {
        let two = BigUint::from(2u8);
        let upper = (n - 2u8).min(BigUint::from(MAX_RANDOM_WITNESS));
        (0..rounds)
            .map(|_| rng.gen_biguint_range(&two, &(&upper + 1u8)))
            .collect()
    };

    for a in witnesses {
        // Small n: a witness at or above n is only meaningful modulo n
        let a = a % n;
        if a.is_zero() {
            continue;
        }
        if is_witness(&a, &d, s, n, &n_minus_one) {
            // Composite
            return false;
        }
    }

    // Probably prime
    true
}

/// True if `a` proves `n` composite.
fn is_witness(a: &BigUint, d: &BigUint, s: u32, n: &BigUint, n_minus_one: &BigUint) -> bool {
    let mut x = a.modpow(d, n);
    if x.is_one() || &x == n_minus_one {
        return false;
    }

    let two = BigUint::from(2u8);
    for _ in 1..s {
        x = x.modpow(&two, n);
        if &x == n_minus_one {
            return false;
        }
    }

    true
}

/// Cheap rejection by trial division before Miller-Rabin.
fn has_small_factor(candidate: &BigUint) -> bool {
    SMALL_PRIMES.iter().any(|&p| {
        let p = BigUint::from(p);
        &p < candidate && (candidate % &p).is_zero()
    })
}

/// Generate a random prime of exactly `bits` bits (top and bottom bit set).
pub fn generate_prime(bits: u64, config: &KeygenConfig) -> Result<BigUint> {
    generate_prime_with_rng(bits, config, &mut thread_rng())
}

/// Same as [`generate_prime`], drawing candidates from `rng`.
///
/// Gives up with `GenerationTimeout` after `config.prime_attempts` candidates.
pub fn generate_prime_with_rng<R: Rng + CryptoRng + ?Sized>(
    bits: u64,
    config: &KeygenConfig,
    rng: &mut R,
) -> Result<BigUint> {
    if bits < 2 {
        return Err(Error::KeyTooShort { min: 2, actual: bits });
    }

    let mask = (BigUint::one() << (bits - 1)) | BigUint::one();

    for attempt in 1..=config.prime_attempts {
        // Random number with the highest bit set, made odd
        let candidate = rng.gen_biguint(bits) | &mask;

        if has_small_factor(&candidate) {
            continue;
        }

        if is_prime_with_rng(&candidate, config.primality_rounds, rng) {
            trace!("found {}-bit prime after {} candidates", bits, attempt);
            return Ok(candidate);
        }
    }

    warn!(
        "prime generation exhausted {} candidates at {} bits",
        config.prime_attempts, bits
    );
    Err(Error::GenerationTimeout {
        bits,
        attempts: config.prime_attempts,
    })
}

/// Generate a safe prime p = 2q + 1 of `bits` bits, returning (p, q).
///
/// `q` is a random prime of `bits - 1` bits; `p` is then re-tested. A failure
/// of the inner prime search is propagated as-is. Gives up with
/// `SafePrimeTimeout` after `config.safe_prime_attempts` values of `q`.
pub fn generate_safe_prime_with_rng<R: Rng + CryptoRng + ?Sized>(
    bits: u64,
    config: &KeygenConfig,
    rng: &mut R,
) -> Result<(BigUint, BigUint)> {
    if bits < 3 {
        return Err(Error::KeyTooShort { min: 3, actual: bits });
    }

    for attempt in 1..=config.safe_prime_attempts {
        let q = generate_prime_with_rng(bits - 1, config, rng)?;
        let p = (&q << 1) + 1u8;

        if is_prime_with_rng(&p, config.primality_rounds, rng) {
            debug!("found {}-bit safe prime after {} attempts", bits, attempt);
            return Ok((p, q));
        }
    }

    warn!(
        "safe prime generation exhausted {} attempts at {} bits",
        config.safe_prime_attempts, bits
    );
    Err(Error::SafePrimeTimeout {
        bits,
        attempts: config.safe_prime_attempts,
    })
}
