// ElGamal Decryption Implementation
// Recovers m = c2 * (c1^x)^-1 mod p and serializes it at the chosen width

use num_traits::Zero;

use super::encrypt::ElGamalCiphertext;
use super::keygen::ElGamalPrivateKey;
use crate::bigint::{byte_len, mod_inverse};
use crate::error::{Error, Result};
use crate::secure::{SecretBuffer, SecretInt};

/// Recover the message integer.
pub(crate) fn decrypt_integer(
    ciphertext: &ElGamalCiphertext,
    private_key: &ElGamalPrivateKey,
) -> Result<SecretInt> {
    let p = private_key.p();
    let (c1, c2) = (ciphertext.c1(), ciphertext.c2());
    // c2 = 0 is the encryption of the all-zero block
    if c1.is_zero() || c1 >= p || c2 >= p {
        return Err(Error::InvalidCiphertext);
    }

    // s = c1^x mod p, never zero for prime p and 0 < c1 < p
    let s = SecretInt::new(c1.modpow(private_key.x(), p));
    let s_inv = SecretInt::new(mod_inverse(&s, p).ok_or(Error::InvalidCiphertext)?);

    Ok(SecretInt::new((c2 * &*s_inv) % p))
}

/// Decrypt to the fixed-width block of ceil(bits(p)/8) bytes
pub fn decrypt_bytes(
    ciphertext: &ElGamalCiphertext,
    private_key: &ElGamalPrivateKey,
) -> Result<Vec<u8>> {
    let m = decrypt_integer(ciphertext, private_key)?;
    let block = SecretBuffer::from_biguint(&m, byte_len(private_key.p()))
        .ok_or(Error::InternalInvariant("decrypted value wider than modulus"))?;
    Ok(block.as_bytes().to_vec())
}

/// Decrypt to exactly `len` bytes, the length the plaintext block had.
///
/// Fails with `InvalidCiphertext` if the message does not fit in `len` bytes.
pub fn decrypt_exact(
    ciphertext: &ElGamalCiphertext,
    private_key: &ElGamalPrivateKey,
    len: usize,
) -> Result<Vec<u8>> {
    let m = decrypt_integer(ciphertext, private_key)?;
    let block = SecretBuffer::from_biguint(&m, len).ok_or(Error::InvalidCiphertext)?;
    Ok(block.as_bytes().to_vec())
}

/// Decrypt and strip leading zero bytes.
///
/// Lossy: a plaintext that began with 0x00 bytes comes back shorter, and an
/// all-zero plaintext comes back empty.
pub fn decrypt_trimmed(
    ciphertext: &ElGamalCiphertext,
    private_key: &ElGamalPrivateKey,
) -> Result<Vec<u8>> {
    let block = decrypt_bytes(ciphertext, private_key)?;
    let start = block.iter().position(|&b| b != 0).unwrap_or(block.len());
    Ok(block[start..].to_vec())
}
