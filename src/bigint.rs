// Big Integer Operations
// Helpers over num-bigint shared by the RSA and ElGamal code

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Number of bytes needed to hold `n`, i.e. ceil(bits(n) / 8)
pub fn byte_len(n: &BigUint) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Big-endian encoding of `n` left-padded with zeros to exactly `width` bytes.
/// Returns None if `n` does not fit.
pub fn to_bytes_fixed(n: &BigUint, width: usize) -> Option<Vec<u8>> {
    let len = byte_len(n);
    if len > width {
        return None;
    }

    let mut result = vec![0u8; width];
    if len > 0 {
        let bytes = n.to_bytes_be();
        result[width - len..].copy_from_slice(&bytes);
    }
    Some(result)
}

/// Greatest common divisor
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if the inverse doesn't exist
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() || m.is_one() {
        return None;
    }

    // Iterative extended Euclid on signed values:
    // invariant old_r ≡ old_s * a (mod m)
    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut old_r = BigInt::from_biguint(Sign::Plus, a % m);
    let mut r = modulus.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        // Inverse doesn't exist
        return None;
    }

    old_s.mod_floor(&modulus).to_biguint()
}

/// Uniform random integer in the inclusive range [low, high]
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, low: &BigUint, high: &BigUint) -> BigUint {
    rng.gen_biguint_range(low, &(high + 1u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = BigUint::from(3u8);
        let m = BigUint::from(7u8);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, BigUint::from(5u8));

        // 6^(-1) mod 23 = 4
        let inv = mod_inverse(&BigUint::from(6u8), &BigUint::from(23u8)).unwrap();
        assert_eq!(inv, BigUint::from(4u8));

        // a larger than the modulus
        let inv = mod_inverse(&BigUint::from(29u8), &BigUint::from(23u8)).unwrap();
        assert_eq!(inv, BigUint::from(4u8));
    }

    #[test]
    fn test_mod_inverse_missing() {
        assert!(mod_inverse(&BigUint::from(6u8), &BigUint::from(9u8)).is_none());
        assert!(mod_inverse(&BigUint::zero(), &BigUint::from(7u8)).is_none());
        assert!(mod_inverse(&BigUint::from(3u8), &BigUint::one()).is_none());
    }

    #[test]
    fn test_mod_inverse_rsa_exponent() {
        let e = BigUint::from(65537u32);
        let phi = BigUint::from(3120u32) * BigUint::from(1_000_003u32);
        let d = mod_inverse(&e, &phi).unwrap();
        assert_eq!((&e * &d) % &phi, BigUint::one());
        assert!(d < phi);
    }

    #[test]
    fn test_to_bytes_fixed() {
        let n = BigUint::from(0xABCDu32);
        assert_eq!(to_bytes_fixed(&n, 4).unwrap(), vec![0x00, 0x00, 0xAB, 0xCD]);
        assert_eq!(to_bytes_fixed(&n, 2).unwrap(), vec![0xAB, 0xCD]);
        assert!(to_bytes_fixed(&n, 1).is_none());

        assert_eq!(to_bytes_fixed(&BigUint::zero(), 3).unwrap(), vec![0, 0, 0]);
        assert_eq!(to_bytes_fixed(&BigUint::zero(), 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(byte_len(&BigUint::zero()), 0);
        assert_eq!(byte_len(&BigUint::from(255u32)), 1);
        assert_eq!(byte_len(&BigUint::from(256u32)), 2);
    }

    #[test]
    fn test_random_in_range_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(11);
        let low = BigUint::from(2u8);
        let high = BigUint::from(4u8);

        let mut seen = [false; 5];
        for _ in 0..200 {
            let v = random_in_range(&mut rng, &low, &high);
            assert!(v >= low && v <= high);
            seen[v.to_u32_digits().first().copied().unwrap_or(0) as usize] = true;
        }
        assert!(seen[2] && seen[3] && seen[4]);
    }
}
