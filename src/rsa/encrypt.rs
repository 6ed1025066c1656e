// RSA Encryption Implementation
// Implements RSA encryption with optional OAEP padding

use std::fmt;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use super::keygen::RsaPublicKey;
use super::padding::OaepCodec;
use crate::bigint::from_bytes;
use crate::error::{Error, Result};

/// RSA ciphertext: a single integer c with 0 <= c < n
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaCiphertext(BigUint);

impl RsaCiphertext {
    pub fn new(c: BigUint) -> Self {
        RsaCiphertext(c)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Big-endian hex form with a `0x` prefix, e.g. `0x1f03`
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0.to_bytes_be()))
    }

    /// Parse the `0x<hex>` form (prefix optional, odd digit counts allowed).
    pub fn from_hex(text: &str) -> Result<Self> {
        let text = text.trim();
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.is_empty() {
            return Err(Error::InvalidCiphertext);
        }

        let bytes = if digits.len() % 2 == 1 {
            hex::decode(format!("0{}", digits))
        } else {
            hex::decode(digits)
        }
        .map_err(|_| Error::InvalidCiphertext)?;

        Ok(RsaCiphertext(from_bytes(&bytes)))
    }
}

impl fmt::Display for RsaCiphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Encrypt bytes using RSA public key
///
/// With `use_oaep` the plaintext is OAEP-encoded first (seed from `rng`);
/// without it the raw bytes are read as a big-endian integer, which must be
/// smaller than n.
pub fn encrypt_bytes<R: RngCore + CryptoRng + ?Sized>(
    plaintext: &[u8],
    public_key: &RsaPublicKey,
    use_oaep: bool,
    rng: &mut R,
) -> Result<RsaCiphertext> {
    let m = if use_oaep {
        let padded = OaepCodec::for_key(public_key).encode_with_rng(plaintext, rng)?;
        from_bytes(&padded)
    } else {
        from_bytes(plaintext)
    };

    if m >= *public_key.n() {
        return Err(Error::PlaintextTooLarge);
    }

    // Compute c = m^e mod n
    Ok(RsaCiphertext(m.modpow(public_key.e(), public_key.n())))
}
