// RSA Key Generation
// Implements RSA key pair generation from caller-supplied or random primes

use log::{debug, warn};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, Rng};

use crate::bigint::{byte_len, gcd, mod_inverse};
use crate::config::KeygenConfig;
use crate::error::{Error, Result};
use crate::prime::{generate_prime_with_rng, is_prime_with_rng};
use crate::secure::SecretInt;

/// Fixed public exponent
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Modulus size used when none is given
pub const DEFAULT_BIT_LENGTH: u64 = 2048;

/// Smallest modulus the automatic mode will generate
pub const MIN_AUTO_BIT_LENGTH: u64 = 2048;

/// Allowed deviation, in bits, of caller-supplied primes and their modulus
const BIT_TOLERANCE: u64 = 2;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    e: BigUint, // Public exponent
    n: BigUint, // Modulus
}

/// RSA Private Key
///
/// Only the private exponent and the modulus are kept; the factors are
/// discarded once `d` has been derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    d: SecretInt, // Private exponent
    n: BigUint,   // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    pub fn new(e: BigUint, n: BigUint) -> Self {
        Self { e, n }
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Modulus length in bytes, the `k` of OAEP
    pub fn byte_length(&self) -> usize {
        byte_len(&self.n)
    }
}

impl RsaPrivateKey {
    pub fn new(d: BigUint, n: BigUint) -> Self {
        Self {
            d: SecretInt::new(d),
            n,
        }
    }

    pub fn d(&self) -> &BigUint {
        self.d.expose()
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaKeyPair {
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    pub fn into_parts(self) -> (RsaPublicKey, RsaPrivateKey) {
        (self.public_key, self.private_key)
    }

    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// What to build a key pair from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsaParams {
    /// Draw two random primes of `bit_length / 2` bits each.
    Generate { bit_length: u64 },
    /// Use the given primes; `bit_length` is the modulus size they must match.
    Explicit {
        bit_length: u64,
        p: SecretInt,
        q: SecretInt,
    },
}

impl RsaParams {
    pub fn generate(bit_length: u64) -> Self {
        RsaParams::Generate { bit_length }
    }

    pub fn explicit(bit_length: u64, p: BigUint, q: BigUint) -> Self {
        RsaParams::Explicit {
            bit_length,
            p: SecretInt::new(p),
            q: SecretInt::new(q),
        }
    }

    /// Build parameters from optional primes; both or neither must be given.
    pub fn from_parts(bit_length: u64, p: Option<BigUint>, q: Option<BigUint>) -> Result<Self> {
        match (p, q) {
            (Some(p), Some(q)) => Ok(Self::explicit(bit_length, p, q)),
            (None, None) => Ok(Self::generate(bit_length)),
            _ => Err(Error::ParameterCoexistence("p and q")),
        }
    }

    pub fn bit_length(&self) -> u64 {
        match self {
            RsaParams::Generate { bit_length } | RsaParams::Explicit { bit_length, .. } => {
                *bit_length
            }
        }
    }
}

impl Default for RsaParams {
    fn default() -> Self {
        RsaParams::generate(DEFAULT_BIT_LENGTH)
    }
}

/// Builds RSA key pairs under a fixed set of search bounds.
#[derive(Debug, Clone, Default)]
pub struct RsaKeyGenerator {
    config: KeygenConfig,
}

impl RsaKeyGenerator {
    pub fn new(config: KeygenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeygenConfig {
        &self.config
    }

    /// Generate a key pair using the thread-local RNG.
    pub fn generate_keypair(&self, params: &RsaParams) -> Result<RsaKeyPair> {
        self.generate_keypair_with_rng(params, &mut thread_rng())
    }

    /// Generate a key pair, drawing all randomness from `rng`.
    ///
    /// Explicit primes are validated in order: primality, distinctness, bit
    /// lengths, then coprimality of e with φ(n). Automatic mode retries prime
    /// pairs up to `max_retries` times until the modulus has exactly
    /// `bit_length` bits.
    pub fn generate_keypair_with_rng<R: Rng + CryptoRng + ?Sized>(
        &self,
        params: &RsaParams,
        rng: &mut R,
    ) -> Result<RsaKeyPair> {
        match params {
            RsaParams::Explicit { bit_length, p, q } => {
                self.validate_primes(*bit_length, p, q, rng)?;
                build_keypair(p, q, true)
            }
            RsaParams::Generate { bit_length } => {
                let (p, q) = self.generate_primes(*bit_length, rng)?;
                build_keypair(&p, &q, false)
            }
        }
    }

    fn validate_primes<R: Rng + ?Sized>(
        &self,
        bit_length: u64,
        p: &BigUint,
        q: &BigUint,
        rng: &mut R,
    ) -> Result<()> {
        let rounds = self.config.primality_rounds;
        if !is_prime_with_rng(p, rounds, rng) {
            return Err(Error::NotPrime("p"));
        }
        if !is_prime_with_rng(q, rounds, rng) {
            return Err(Error::NotPrime("q"));
        }

        if p == q {
            return Err(Error::NonDistinctPrimes);
        }

        let target_prime_bits = bit_length / 2;
        let total_bits = p.bits() + q.bits();
        if total_bits != 2 * target_prime_bits {
            return Err(Error::BitLengthMismatch(format!(
                "total prime bits {} != {}",
                total_bits,
                2 * target_prime_bits
            )));
        }

        let modulus_bits = (p * q).bits();
        if modulus_bits.abs_diff(bit_length) > BIT_TOLERANCE {
            return Err(Error::BitLengthMismatch(format!(
                "modulus has {} bits, expected {}±{}",
                modulus_bits, bit_length, BIT_TOLERANCE
            )));
        }

        for (prime, name) in [(p, "p"), (q, "q")] {
            let prime_bits = prime.bits();
            if prime_bits.abs_diff(target_prime_bits) > BIT_TOLERANCE {
                return Err(Error::BitLengthMismatch(format!(
                    "{} has {} bits, expected {}±{}",
                    name, prime_bits, target_prime_bits, BIT_TOLERANCE
                )));
            }
        }

        Ok(())
    }

    fn generate_primes<R: Rng + CryptoRng + ?Sized>(
        &self,
        bit_length: u64,
        rng: &mut R,
    ) -> Result<(SecretInt, SecretInt)> {
        if bit_length < MIN_AUTO_BIT_LENGTH {
            return Err(Error::KeyTooShort {
                min: MIN_AUTO_BIT_LENGTH,
                actual: bit_length,
            });
        }

        debug!("generating {}-bit RSA modulus", bit_length);
        let half_bits = bit_length / 2;

        for attempt in 1..=self.config.max_retries {
            let p = SecretInt::new(generate_prime_with_rng(half_bits, &self.config, rng)?);
            let q = SecretInt::new(generate_prime_with_rng(half_bits, &self.config, rng)?);

            // Ensure p != q
            if p == q {
                debug!("attempt {}: drew the same prime twice", attempt);
                continue;
            }

            let modulus_bits = (&*p * &*q).bits();
            if modulus_bits == bit_length {
                debug!("found RSA prime pair on attempt {}", attempt);
                return Ok((p, q));
            }
            debug!(
                "attempt {}: modulus has {} bits, want {}",
                attempt, modulus_bits, bit_length
            );
        }

        warn!(
            "RSA key generation exhausted {} attempts",
            self.config.max_retries
        );
        Err(Error::KeyGenerationFailed {
            attempts: self.config.max_retries,
        })
    }
}

/// Derive (e, n) and (d, n) from two validated primes.
fn build_keypair(p: &BigUint, q: &BigUint, custom: bool) -> Result<RsaKeyPair> {
    let n = p * q;
    let phi = SecretInt::new((p - 1u8) * (q - 1u8));
    let e = BigUint::from(PUBLIC_EXPONENT);

    if !gcd(&e, &phi).is_one() {
        if custom {
            return Err(Error::NotCoprime);
        }
        // Generated primes: fatal, reported as a generator fault
        return Err(Error::InternalInvariant(
            "e is not coprime with φ(n) for generated primes",
        ));
    }

    let d = SecretInt::new(
        mod_inverse(&e, &phi).ok_or(Error::InternalInvariant("e has no inverse modulo φ(n)"))?,
    );
    if d.is_zero() || *d >= n {
        return Err(Error::InternalInvariant("private exponent outside (0, n)"));
    }

    Ok(RsaKeyPair {
        public_key: RsaPublicKey::new(e, n.clone()),
        private_key: RsaPrivateKey::new(d.expose().clone(), n),
    })
}

/// Generate an RSA key pair with the default search bounds
pub fn generate_keypair(params: &RsaParams) -> Result<RsaKeyPair> {
    RsaKeyGenerator::default().generate_keypair(params)
}

/// Generate RSA key pair with default settings (2048 bits, e=65537)
pub fn generate_default_keypair() -> Result<RsaKeyPair> {
    generate_keypair(&RsaParams::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{rsa_1024_primes, rsa_2048_primes};
    use crate::prime::is_prime;
    use num_integer::Integer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test_log::test]
    fn test_key_generation() {
        let keypair = generate_default_keypair().unwrap();
        assert_eq!(keypair.bit_length(), 2048);
        assert_eq!(*keypair.public_key().e(), BigUint::from(65537u32));
        assert!(*keypair.private_key().d() > BigUint::zero());
        assert!(keypair.private_key().d() < keypair.public_key().n());
        assert_eq!(keypair.private_key().n(), keypair.public_key().n());
    }

    #[test]
    fn test_key_properties() {
        let (p, q) = rsa_1024_primes();
        let keypair = generate_keypair(&RsaParams::explicit(1024, p.clone(), q.clone())).unwrap();

        // Verify n = p * q
        assert_eq!(*keypair.public_key().n(), &p * &q);

        // Verify e * d ≡ 1 (mod φ(n))
        let phi_n = (&p - 1u8) * (&q - 1u8);
        let product = keypair.public_key().e() * keypair.private_key().d();
        assert!((product % &phi_n).is_one());

        // m^(ed) ≡ m (mod n)
        let n = keypair.public_key().n();
        let ed = keypair.public_key().e() * keypair.private_key().d();
        for m in [2u32, 3, 65535, 123_456_789] {
            let m = BigUint::from(m);
            assert!(m.gcd(n).is_one());
            assert_eq!(m.modpow(&ed, n), m);
        }
    }

    #[test]
    fn test_custom_primes_2048() {
        let (p, q) = rsa_2048_primes();
        let keypair = generate_keypair(&RsaParams::explicit(2048, p.clone(), q.clone())).unwrap();

        assert_eq!(*keypair.public_key().n(), &p * &q);
        assert_eq!(*keypair.public_key().e(), BigUint::from(PUBLIC_EXPONENT));
    }

    #[test]
    fn test_rejects_non_prime() {
        let params = RsaParams::explicit(2048, BigUint::from(4u8), BigUint::from(9u8));
        assert_eq!(generate_keypair(&params).unwrap_err(), Error::NotPrime("p"));

        let (p, _) = rsa_2048_primes();
        let params = RsaParams::explicit(2048, p, BigUint::from(987_654u32));
        assert_eq!(generate_keypair(&params).unwrap_err(), Error::NotPrime("q"));
    }

    #[test]
    fn test_rejects_equal_primes() {
        let (p, _) = rsa_2048_primes();
        let params = RsaParams::explicit(2048, p.clone(), p);
        assert_eq!(generate_keypair(&params).unwrap_err(), Error::NonDistinctPrimes);
    }

    #[test]
    fn test_rejects_single_prime() {
        let (p, q) = rsa_2048_primes();
        assert_eq!(
            RsaParams::from_parts(2048, Some(p), None).unwrap_err(),
            Error::ParameterCoexistence("p and q")
        );
        assert_eq!(
            RsaParams::from_parts(2048, None, Some(q)).unwrap_err(),
            Error::ParameterCoexistence("p and q")
        );
        assert_eq!(
            RsaParams::from_parts(4096, None, None).unwrap(),
            RsaParams::generate(4096)
        );
    }

    #[test]
    fn test_rejects_bit_length_mismatch() {
        // 1024-bit primes claimed to form a 4096-bit modulus
        let (p, q) = rsa_2048_primes();
        let params = RsaParams::explicit(4096, p, q);
        assert!(matches!(
            generate_keypair(&params).unwrap_err(),
            Error::BitLengthMismatch(_)
        ));

        // Lopsided primes: 61 + 67 bits sum to 128 but each is 3 bits off
        let mut rng = StdRng::seed_from_u64(5);
        let config = KeygenConfig::default();
        let p = generate_prime_with_rng(61, &config, &mut rng).unwrap();
        let q = generate_prime_with_rng(67, &config, &mut rng).unwrap();
        let params = RsaParams::explicit(128, p, q);
        assert!(matches!(
            generate_keypair(&params).unwrap_err(),
            Error::BitLengthMismatch(_)
        ));
    }

    #[test]
    fn test_rejects_not_coprime() {
        // p - 1 divisible by 65537
        let mut rng = StdRng::seed_from_u64(6);
        let e = BigUint::from(PUBLIC_EXPONENT);
        let mut k = BigUint::from(1u8 << 6);
        let p = loop {
            let candidate = &e * &k + 1u8;
            if is_prime(&candidate, 32) {
                break candidate;
            }
            k += 2u8;
        };
        let bits = p.bits();
        let q = generate_prime_with_rng(bits, &KeygenConfig::default(), &mut rng).unwrap();
        assert_ne!(p, q);

        let params = RsaParams::explicit(2 * bits, p, q);
        assert_eq!(generate_keypair(&params).unwrap_err(), Error::NotCoprime);
    }

    #[test]
    fn test_generated_primes_not_coprime_is_internal() {
        let e = BigUint::from(PUBLIC_EXPONENT);
        let mut k = BigUint::from(1u8 << 6);
        let p = loop {
            let candidate = &e * &k + 1u8;
            if is_prime(&candidate, 32) {
                break candidate;
            }
            k += 2u8;
        };
        let mut rng = StdRng::seed_from_u64(7);
        let q = generate_prime_with_rng(p.bits(), &KeygenConfig::default(), &mut rng).unwrap();

        let err = build_keypair(&p, &q, false).unwrap_err();
        assert!(matches!(err, Error::InternalInvariant(_)));
        assert_eq!(err.category(), crate::error::ErrorCategory::Internal);

        // Same primes supplied by the caller are a parameter error
        assert_eq!(build_keypair(&p, &q, true).unwrap_err(), Error::NotCoprime);
    }

    #[test]
    fn test_auto_mode_requires_2048_bits() {
        assert_eq!(
            generate_keypair(&RsaParams::generate(1024)).unwrap_err(),
            Error::KeyTooShort {
                min: 2048,
                actual: 1024
            }
        );
    }

    #[test]
    fn test_auto_mode_exhausts_retries() {
        let generator = RsaKeyGenerator::new(KeygenConfig::default().with_max_retries(0));
        assert_eq!(
            generator.generate_keypair(&RsaParams::default()).unwrap_err(),
            Error::KeyGenerationFailed { attempts: 0 }
        );
    }

    #[test]
    fn test_auto_mode_propagates_prime_timeout() {
        let generator = RsaKeyGenerator::new(KeygenConfig::default().with_prime_attempts(0));
        assert_eq!(
            generator.generate_keypair(&RsaParams::default()).unwrap_err(),
            Error::GenerationTimeout {
                bits: 1024,
                attempts: 0
            }
        );
    }

    #[test]
    fn test_explicit_params_debug_redacts_primes() {
        let (p, q) = rsa_1024_primes();
        let shown = format!("{:?}", RsaParams::explicit(1024, p.clone(), q));
        assert!(!shown.contains(&p.to_string()));
    }
}
