// RSA Cipher
// A public key, optionally paired with its private key, validated once up front

use num_traits::Zero;
use rand::{thread_rng, CryptoRng, RngCore};

use super::decrypt::decrypt_bytes;
use super::encrypt::{encrypt_bytes, RsaCiphertext};
use super::keygen::{generate_keypair, RsaParams, RsaPrivateKey, RsaPublicKey};
use super::padding::OaepCodec;
use crate::error::{Error, Result};

/// RSA encryption bound to one key.
///
/// Keys are validated at construction and never change afterwards, so a
/// cipher can be shared read-only between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaCipher {
    public_key: RsaPublicKey,
    private_key: Option<RsaPrivateKey>,
}

impl RsaCipher {
    /// Bind a public key and, optionally, the matching private key.
    pub fn new(public_key: RsaPublicKey, private_key: Option<RsaPrivateKey>) -> Result<Self> {
        if public_key.n().is_zero() {
            return Err(Error::KeyFormatError("modulus n must be a positive integer"));
        }
        if public_key.e().is_zero() {
            return Err(Error::KeyFormatError("exponent must be a positive integer"));
        }

        if let Some(private_key) = &private_key {
            if private_key.n() != public_key.n() {
                return Err(Error::KeyMismatch);
            }
            if private_key.d().is_zero() || private_key.d() >= private_key.n() {
                return Err(Error::InvalidPrivateKey);
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
            generate_keypair(&RsaParams::generate(bit_length))?.into_parts();
        Ok((
            Self::new(public_key.clone(), None)?,
            Self::new(public_key, Some(private_key))?,
        ))
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Largest plaintext block accepted by `encrypt`.
    ///
    /// OAEP: k - 66 bytes. Raw: k - 1 bytes, the longest length whose every
    /// value is below n.
    pub fn max_message_len(&self, use_oaep: bool) -> usize {
        if use_oaep {
            OaepCodec::for_key(&self.public_key).max_message_len()
        } else {
            (self.public_key.bit_length().saturating_sub(1) / 8) as usize
        }
    }

    pub fn encrypt(&self, plaintext: &[u8], use_oaep: bool) -> Result<RsaCiphertext> {
        self.encrypt_with_rng(plaintext, use_oaep, &mut thread_rng())
    }

    pub fn encrypt_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        plaintext: &[u8],
        use_oaep: bool,
        rng: &mut R,
    ) -> Result<RsaCiphertext> {
        encrypt_bytes(plaintext, &self.public_key, use_oaep, rng)
    }

    pub fn decrypt(&self, ciphertext: &RsaCiphertext, use_oaep: bool) -> Result<Vec<u8>> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(Error::PrivateKeyUnavailable)?;
        decrypt_bytes(ciphertext, private_key, use_oaep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::rsa_1024_primes;
    use num_bigint::BigUint;

    fn test_ciphers() -> (RsaCipher, RsaCipher) {
        let (p, q) = rsa_1024_primes();
        let (public_key, private_key) = generate_keypair(&RsaParams::explicit(1024, p, q))
            .unwrap()
            .into_parts();
        (
            RsaCipher::new(public_key.clone(), None).unwrap(),
            RsaCipher::new(public_key, Some(private_key)).unwrap(),
        )
    }

    #[test]
    fn test_encrypt_decrypt() {
        let (public, private) = test_ciphers();
        let ciphertext = public.encrypt(b"Custom primes test", true).unwrap();
        assert_eq!(private.decrypt(&ciphertext, true).unwrap(), b"Custom primes test");
    }

    #[test]
    fn test_public_only_cannot_decrypt() {
        let (public, _) = test_ciphers();
        assert!(!public.has_private_key());

        let ciphertext = public.encrypt(b"secret", true).unwrap();
        assert_eq!(
            public.decrypt(&ciphertext, true).unwrap_err(),
            Error::PrivateKeyUnavailable
        );
    }

    #[test]
    fn test_max_message_len() {
        let (public, _) = test_ciphers();
        // 1023-bit modulus, k = 128
        assert_eq!(public.max_message_len(true), 62);
        assert_eq!(public.max_message_len(false), 127);

        let longest = vec![0xFFu8; 127];
        assert!(public.encrypt(&longest, false).is_ok());
    }

    #[test]
    fn test_raw_roundtrip_keeps_fixed_width() {
        let (_, private) = test_ciphers();
        let message = vec![0x5Au8; 127];

        let ciphertext = private.encrypt(&message, false).unwrap();
        let decrypted = private.decrypt(&ciphertext, false).unwrap();
        assert_eq!(decrypted.len(), 128);
        assert_eq!(decrypted[0], 0);
        assert_eq!(&decrypted[1..], message.as_slice());
    }

    #[test]
    fn test_rejects_malformed_public_key() {
        let key = RsaPublicKey::new(BigUint::from(65537u32), BigUint::zero());
        assert!(matches!(
            RsaCipher::new(key, None).unwrap_err(),
            Error::KeyFormatError(_)
        ));

        let key = RsaPublicKey::new(BigUint::zero(), BigUint::from(3233u32));
        assert!(matches!(
            RsaCipher::new(key, None).unwrap_err(),
            Error::KeyFormatError(_)
        ));
    }

    #[test]
    fn test_rejects_mismatched_private_key() {
        let (public, private) = test_ciphers();
        let n = public.public_key().n();

        let other = RsaPrivateKey::new(BigUint::from(17u8), n + 2u8);
        assert_eq!(
            RsaCipher::new(public.public_key().clone(), Some(other)).unwrap_err(),
            Error::KeyMismatch
        );

        let zero_d = RsaPrivateKey::new(BigUint::zero(), n.clone());
        assert_eq!(
            RsaCipher::new(public.public_key().clone(), Some(zero_d)).unwrap_err(),
            Error::InvalidPrivateKey
        );

        let large_d = RsaPrivateKey::new(n.clone(), n.clone());
        assert_eq!(
            RsaCipher::new(private.public_key().clone(), Some(large_d)).unwrap_err(),
            Error::InvalidPrivateKey
        );
    }

    #[test_log::test]
    fn test_create_pair() {
        let (public, private) = RsaCipher::create_pair(2048).unwrap();
        assert_eq!(public.public_key(), private.public_key());
        assert_eq!(public.public_key().bit_length(), 2048);
        assert!(private.has_private_key());

        let ciphertext = public.encrypt(b"paired", true).unwrap();
        assert_eq!(private.decrypt(&ciphertext, true).unwrap(), b"paired");
    }

    #[test]
    fn test_create_pair_too_short() {
        assert_eq!(
            RsaCipher::create_pair(512).unwrap_err(),
            Error::KeyTooShort {
                min: 2048,
                actual: 512
            }
        );
    }
}
