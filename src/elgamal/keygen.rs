// ElGamal Key Generation
// Implements ElGamal key pair generation over a safe-prime group

use log::{debug, trace, warn};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, Rng};

use crate::bigint::{byte_len, random_in_range};
use crate::config::KeygenConfig;
use crate::error::{Error, Result};
use crate::prime::{generate_safe_prime_with_rng, is_prime_with_rng};
use crate::secure::SecretInt;

/// Safe-prime size used when none is given
pub const DEFAULT_BIT_LENGTH: u64 = 2048;

/// ElGamal Public Key (p, g, h = g^x mod p)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalPublicKey {
    p: BigUint,
    g: BigUint,
    h: BigUint,
}

/// ElGamal Private Key
///
/// Carries p so the range 1 < x < p-1 can be checked without the public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalPrivateKey {
    x: SecretInt,
    p: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalKeyPair {
    public_key: ElGamalPublicKey,
    private_key: ElGamalPrivateKey,
}

impl ElGamalPublicKey {
    pub fn new(p: BigUint, g: BigUint, h: BigUint) -> Self {
        Self { p, g, h }
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    #[inline]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    #[inline]
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    pub fn bit_length(&self) -> u64 {
        self.p.bits()
    }

    pub fn byte_length(&self) -> usize {
        byte_len(&self.p)
    }
}

impl ElGamalPrivateKey {
    pub fn new(x: BigUint, p: BigUint) -> Self {
        Self {
            x: SecretInt::new(x),
            p,
        }
    }

    #[inline]
    pub fn x(&self) -> &BigUint {
        self.x.expose()
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// True when 1 < x < p-1.
    pub fn in_range(&self) -> bool {
        in_private_range(&self.x, &self.p)
    }
}

impl ElGamalKeyPair {
    pub fn public_key(&self) -> &ElGamalPublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &ElGamalPrivateKey {
        &self.private_key
    }

    pub fn into_parts(self) -> (ElGamalPublicKey, ElGamalPrivateKey) {
        (self.public_key, self.private_key)
    }
}

pub(crate) fn in_private_range(x: &BigUint, p: &BigUint) -> bool {
    x > &BigUint::one() && p > &BigUint::from(2u8) && x < &(p - 1u8)
}

/// g generates a large subgroup: g² ≠ 1 and g^q ≠ 1 (mod p), with q = (p-1)/2.
pub fn is_generator(g: &BigUint, p: &BigUint, q: &BigUint) -> bool {
    if (g % p).is_zero() {
        return false;
    }
    !g.modpow(&BigUint::from(2u8), p).is_one() && !g.modpow(q, p).is_one()
}

/// Search for a generator of the safe-prime group by random sampling in [2, p-1].
pub fn find_generator_with_rng<R: Rng + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    attempts: u32,
    rng: &mut R,
) -> Result<BigUint> {
    let low = BigUint::from(2u8);
    let high = p - 1u8;

    for attempt in 1..=attempts {
        let g = random_in_range(rng, &low, &high);
        if is_generator(&g, p, q) {
            trace!("found generator after {} candidates", attempt);
            return Ok(g);
        }
    }

    warn!("generator search exhausted {} candidates", attempts);
    Err(Error::GeneratorNotFound { attempts })
}

/// What to build a key pair from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElGamalParams {
    /// Generate a safe prime of `bit_length` bits, a generator and a private key.
    Generate { bit_length: u64 },
    /// Use the given safe prime, generator and private key.
    Explicit { p: BigUint, g: BigUint, x: SecretInt },
}

impl ElGamalParams {
    pub fn generate(bit_length: u64) -> Self {
        ElGamalParams::Generate { bit_length }
    }

    pub fn explicit(p: BigUint, g: BigUint, x: BigUint) -> Self {
        ElGamalParams::Explicit {
            p,
            g,
            x: SecretInt::new(x),
        }
    }

    /// Build parameters from optional values; p, g and x must be all given or all omitted.
    pub fn from_parts(
        bit_length: u64,
        p: Option<BigUint>,
        g: Option<BigUint>,
        x: Option<BigUint>,
    ) -> Result<Self> {
        match (p, g, x) {
            (Some(p), Some(g), Some(x)) => Ok(Self::explicit(p, g, x)),
            (None, None, None) => Ok(Self::generate(bit_length)),
            _ => Err(Error::ParameterCoexistence("p, g and x")),
        }
    }
}

impl Default for ElGamalParams {
    fn default() -> Self {
        ElGamalParams::generate(DEFAULT_BIT_LENGTH)
    }
}

/// Builds ElGamal key pairs under a fixed set of search bounds.
#[derive(Debug, Clone, Default)]
pub struct ElGamalKeyGenerator {
    config: KeygenConfig,
}

impl ElGamalKeyGenerator {
    pub fn new(config: KeygenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeygenConfig {
        &self.config
    }

    /// Generate a key pair using the thread-local RNG.
    pub fn generate_keypair(&self, params: &ElGamalParams) -> Result<ElGamalKeyPair> {
        self.generate_keypair_with_rng(params, &mut thread_rng())
    }

    /// Generate a key pair, drawing all randomness from `rng`.
    pub fn generate_keypair_with_rng<R: Rng + CryptoRng + ?Sized>(
        &self,
        params: &ElGamalParams,
        rng: &mut R,
    ) -> Result<ElGamalKeyPair> {
        match params {
            ElGamalParams::Explicit { p, g, x } => self.from_explicit(p, g, x, rng),
            ElGamalParams::Generate { bit_length } => self.generate(*bit_length, rng),
        }
    }

    fn from_explicit<R: Rng + ?Sized>(
        &self,
        p: &BigUint,
        g: &BigUint,
        x: &BigUint,
        rng: &mut R,
    ) -> Result<ElGamalKeyPair> {
        let rounds = self.config.primality_rounds;
        if !is_prime_with_rng(p, rounds, rng) {
            return Err(Error::NotPrime("p"));
        }

        // Safe prime: p = 2q + 1 with q prime
        let q = SecretInt::new((p - 1u8) >> 1);
        if !is_prime_with_rng(&q, rounds, rng) {
            return Err(Error::NotSafePrime);
        }

        if !is_generator(g, p, &q) {
            return Err(Error::InvalidGenerator);
        }

        if !in_private_range(x, p) {
            return Err(Error::KeyOutOfRange);
        }

        let h = g.modpow(x, p);
        Ok(ElGamalKeyPair {
            public_key: ElGamalPublicKey::new(p.clone(), g.clone(), h),
            private_key: ElGamalPrivateKey::new(x.clone(), p.clone()),
        })
    }

    fn generate<R: Rng + CryptoRng + ?Sized>(
        &self,
        bit_length: u64,
        rng: &mut R,
    ) -> Result<ElGamalKeyPair> {
        debug!("generating {}-bit ElGamal group", bit_length);

        for attempt in 1..=self.config.max_retries {
            let (p, q) = generate_safe_prime_with_rng(bit_length, &self.config, rng)?;
            let q = SecretInt::new(q);

            let g = find_generator_with_rng(&p, &q, self.config.generator_attempts, rng)?;

            // Private key x in [2, p-2]
            let x = SecretInt::new(random_in_range(rng, &BigUint::from(2u8), &(&p - 2u8)));
            let h = g.modpow(&x, &p);

            // g has order p-1 and x is in [2, p-2], so this only trips if the
            // generator check let a bad g through
            if h.is_zero() || h.is_one() {
                debug!("attempt {}: degenerate public value, retrying", attempt);
                continue;
            }

            debug!("generated ElGamal key pair on attempt {}", attempt);
            return Ok(ElGamalKeyPair {
                public_key: ElGamalPublicKey::new(p.clone(), g, h),
                private_key: ElGamalPrivateKey::new(x.expose().clone(), p),
            });
        }

        warn!(
            "ElGamal key generation exhausted {} attempts",
            self.config.max_retries
        );
        Err(Error::KeyGenerationFailed {
            attempts: self.config.max_retries,
        })
    }
}

/// Generate an ElGamal key pair with the default search bounds
pub fn generate_keypair(params: &ElGamalParams) -> Result<ElGamalKeyPair> {
    ElGamalKeyGenerator::default().generate_keypair(params)
}
