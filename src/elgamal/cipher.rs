// ElGamal Cipher
// A public key, optionally paired with its private key, validated once up front

use num_traits::Zero;
use rand::{thread_rng, CryptoRng, Rng};

use super::decrypt::{decrypt_bytes, decrypt_exact, decrypt_trimmed};
use super::encrypt::{encrypt_bytes, ElGamalCiphertext};
use super::keygen::{generate_keypair, ElGamalParams, ElGamalPrivateKey, ElGamalPublicKey};
use crate::error::{Error, Result};

/// ElGamal encryption bound to one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalCipher {
    public_key: ElGamalPublicKey,
    private_key: Option<ElGamalPrivateKey>,
}

impl ElGamalCipher {
    /// Bind a public key and, optionally, the matching private key.
    pub fn new(
        public_key: ElGamalPublicKey,
        private_key: Option<ElGamalPrivateKey>,
    ) -> Result<Self> {
        if public_key.p().is_zero() || public_key.g().is_zero() || public_key.h().is_zero() {
            return Err(Error::KeyFormatError("p, g and h must be positive integers"));
        }

        if let Some(private_key) = &private_key {
            if private_key.p() != public_key.p() {
                return Err(Error::KeyMismatch);
            }
            if !private_key.in_range() {
                return Err(Error::KeyOutOfRange);
            }
            if public_key.g().modpow(private_key.x(), public_key.p()) != *public_key.h() {
                return Err(Error::KeyMismatch);
            }
        }

        Ok(Self {
            public_key,
            private_key,
        })
    }

    /// Generate a fresh key pair and return (encrypt-only, full) ciphers.
    pub fn create_pair(bit_length: u64) -> Result<(Self, Self)> {
        let (public_key, private_key) =
            generate_keypair(&ElGamalParams::generate(bit_length))?.into_parts();
        Ok((
            Self::new(public_key.clone(), None)?,
            Self::new(public_key, Some(private_key))?,
        ))
    }

    pub fn public_key(&self) -> &ElGamalPublicKey {
        &self.public_key
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Longest plaintext block whose every value is below p.
    pub fn max_plaintext_len(&self) -> usize {
        (self.public_key.bit_length().saturating_sub(1) / 8) as usize
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<ElGamalCiphertext> {
        self.encrypt_with_rng(plaintext, &mut thread_rng())
    }

    pub fn encrypt_with_rng<R: Rng + CryptoRng + ?Sized>(
        &self,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<ElGamalCiphertext> {
        encrypt_bytes(plaintext, &self.public_key, rng)
    }

    /// Decrypt to the fixed-width ceil(bits(p)/8)-byte block.
    pub fn decrypt(&self, ciphertext: &ElGamalCiphertext) -> Result<Vec<u8>> {
        decrypt_bytes(ciphertext, self.require_private_key()?)
    }

    /// Decrypt to exactly `len` bytes.
    pub fn decrypt_exact(&self, ciphertext: &ElGamalCiphertext, len: usize) -> Result<Vec<u8>> {
        decrypt_exact(ciphertext, self.require_private_key()?, len)
    }

    /// Decrypt and strip leading zero bytes. Lossy, see [`decrypt_trimmed`].
    pub fn decrypt_trimmed(&self, ciphertext: &ElGamalCiphertext) -> Result<Vec<u8>> {
        decrypt_trimmed(ciphertext, self.require_private_key()?)
    }

    fn require_private_key(&self) -> Result<&ElGamalPrivateKey> {
        self.private_key.as_ref().ok_or(Error::PrivateKeyUnavailable)
    }
}
