// RSA Decryption Implementation
// Implements RSA decryption with optional OAEP unpadding

use super::encrypt::RsaCiphertext;
use super::keygen::RsaPrivateKey;
use super::padding::OaepCodec;
use crate::bigint::byte_len;
use crate::error::{Error, Result};
use crate::secure::{SecretBuffer, SecretInt};

/// Decrypt an RSA ciphertext using the private key
///
/// The recovered integer is always serialized to exactly ceil(bits(n)/8)
/// bytes, left-padded with zeros, so the OAEP block keeps its leading zero.
/// Without OAEP that fixed-width block is returned as-is.
pub fn decrypt_bytes(
    ciphertext: &RsaCiphertext,
    private_key: &RsaPrivateKey,
    use_oaep: bool,
) -> Result<Vec<u8>> {
    let n = private_key.n();
    if ciphertext.value() >= n {
        return Err(Error::InvalidCiphertext);
    }

    // m = c^d mod n
    let m = SecretInt::new(ciphertext.value().modpow(private_key.d(), n));

    let k = byte_len(n);
    let padded = SecretBuffer::from_biguint(&m, k)
        .ok_or(Error::InternalInvariant("decrypted value wider than modulus"))?;

    if use_oaep {
        OaepCodec::new(k).decode(padded.as_bytes())
    } else {
        Ok(padded.as_bytes().to_vec())
    }
}
