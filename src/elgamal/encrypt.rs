// ElGamal Encryption Implementation
// Encrypts a message integer m < p as (c1, c2) = (g^y, m * h^y) mod p

use num_bigint::BigUint;
use rand::{CryptoRng, Rng};

use super::keygen::ElGamalPublicKey;
use crate::bigint::{from_bytes, random_in_range};
use crate::error::{Error, Result};
use crate::secure::SecretInt;

/// ElGamal ciphertext pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElGamalCiphertext {
    c1: BigUint,
    c2: BigUint,
}

impl ElGamalCiphertext {
    pub fn new(c1: BigUint, c2: BigUint) -> Self {
        Self { c1, c2 }
    }

    #[inline]
    pub fn c1(&self) -> &BigUint {
        &self.c1
    }

    #[inline]
    pub fn c2(&self) -> &BigUint {
        &self.c2
    }
}

/// Encrypt `m` with the ephemeral exponent `y`.
pub(crate) fn encrypt_integer(
    public_key: &ElGamalPublicKey,
    m: &BigUint,
    y: &BigUint,
) -> ElGamalCiphertext {
    let p = public_key.p();
    let c1 = public_key.g().modpow(y, p);

    // Shared secret s = h^y mod p
    let s = SecretInt::new(public_key.h().modpow(y, p));
    let c2 = (m * &*s) % p;

    ElGamalCiphertext { c1, c2 }
}

/// Encrypt bytes using an ElGamal public key
///
/// The plaintext is read as a big-endian integer and must be smaller than p.
/// A fresh y in [2, p-2] is drawn from `rng` for every call; a modulus below 4
/// leaves no such y and is rejected as `KeyFormatError`.
pub fn encrypt_bytes<R: Rng + CryptoRng + ?Sized>(
    plaintext: &[u8],
    public_key: &ElGamalPublicKey,
    rng: &mut R,
) -> Result<ElGamalCiphertext> {
    let p = public_key.p();
    // No ephemeral y in [2, p-2] below p = 4
    if *p < BigUint::from(4u8) {
        return Err(Error::KeyFormatError("p is too small to encrypt with"));
    }

    let m = SecretInt::new(from_bytes(plaintext));
    if *m >= *p {
        return Err(Error::PlaintextTooLarge);
    }

    let y = SecretInt::new(random_in_range(rng, &BigUint::from(2u8), &(p - 2u8)));
    Ok(encrypt_integer(public_key, &m, &y))
}
