// OAEP Padding
// Implements RSA-OAEP encoding with SHA-256 and MGF1-SHA-256, empty label

use num_bigint::BigUint;
use rand::{thread_rng, CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use super::keygen::RsaPublicKey;
use crate::bigint::byte_len;
use crate::error::{Error, Result};
use crate::secure::SecretBuffer;

/// SHA-256 output length
pub const HASH_LEN: usize = 32;

/// Bytes of overhead OAEP adds: leading zero, seed, label hash, separator
pub const OAEP_OVERHEAD: usize = 2 * HASH_LEN + 2;

/// Mask generation function MGF1 over SHA-256
///
/// Concatenates SHA-256(seed || counter) for counter = 0, 1, 2, ...
/// (counter as 4 big-endian bytes) and truncates to `mask_len` bytes.
pub fn mgf1(seed: &[u8], mask_len: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(mask_len + HASH_LEN);
    let mut counter: u32 = 0;

    while output.len() < mask_len {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(counter.to_be_bytes());
        output.extend_from_slice(&hasher.finalize());
        counter = counter.wrapping_add(1);
    }

    output.truncate(mask_len);
    output
}

fn xor_in_place(target: &mut [u8], mask: &[u8]) {
    for (byte, m) in target.iter_mut().zip(mask) {
        *byte ^= m;
    }
}

/// OAEP encoder/decoder bound to one modulus length.
///
/// Encoded message layout (`k` bytes):
/// `0x00 || maskedSeed (32) || maskedDB (k - 33)`
/// where `DB = lHash || 0x00.. || 0x01 || message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OaepCodec {
    k: usize,
}

impl OaepCodec {
    /// Codec for a modulus of `k` bytes.
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn for_modulus(n: &BigUint) -> Self {
        Self::new(byte_len(n))
    }

    pub fn for_key(public_key: &RsaPublicKey) -> Self {
        Self::new(public_key.byte_length())
    }

    pub fn modulus_len(&self) -> usize {
        self.k
    }

    /// Largest message that fits, `k - 66`; 0 when the modulus is too small.
    pub fn max_message_len(&self) -> usize {
        self.k.saturating_sub(OAEP_OVERHEAD)
    }

    fn label_hash() -> impl AsRef<[u8]> {
        Sha256::digest(b"")
    }

    /// Encode `message` with a seed from the thread-local RNG.
    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.encode_with_rng(message, &mut thread_rng())
    }

    /// Encode `message`, drawing the 32-byte seed from `rng`.
    pub fn encode_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let max = self.max_message_len();
        if self.k < OAEP_OVERHEAD || message.len() > max {
            return Err(Error::MessageTooLong {
                max,
                actual: message.len(),
            });
        }

        // DB = lHash || PS || 0x01 || M
        let db_len = self.k - HASH_LEN - 1;
        let mut db = SecretBuffer::zeroed(db_len);
        {
            let bytes = db.as_mut_bytes();
            bytes[..HASH_LEN].copy_from_slice(Self::label_hash().as_ref());
            bytes[db_len - message.len() - 1] = 0x01;
            bytes[db_len - message.len()..].copy_from_slice(message);
        }

        let mut seed = SecretBuffer::zeroed(HASH_LEN);
        rng.fill_bytes(seed.as_mut_bytes());

        // maskedDB = DB xor MGF1(seed)
        let db_mask = mgf1(seed.as_bytes(), db_len);
        xor_in_place(db.as_mut_bytes(), &db_mask);

        // maskedSeed = seed xor MGF1(maskedDB)
        let seed_mask = mgf1(db.as_bytes(), HASH_LEN);
        xor_in_place(seed.as_mut_bytes(), &seed_mask);

        let mut encoded = Vec::with_capacity(self.k);
        encoded.push(0x00);
        encoded.extend_from_slice(seed.as_bytes());
        encoded.extend_from_slice(db.as_bytes());

        Ok(encoded)
    }

    /// Recover the message from a `k`-byte encoded block.
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        if encoded.len() != self.k || self.k < OAEP_OVERHEAD {
            return Err(Error::InvalidOAEPFormat);
        }

        let (masked_seed, masked_db) = encoded[1..].split_at(HASH_LEN);

        // seed = maskedSeed xor MGF1(maskedDB)
        let mut seed = SecretBuffer::from_slice(masked_seed);
        let seed_mask = mgf1(masked_db, HASH_LEN);
        xor_in_place(seed.as_mut_bytes(), &seed_mask);

        // DB = maskedDB xor MGF1(seed)
        let mut db = SecretBuffer::from_slice(masked_db);
        let db_mask = mgf1(seed.as_bytes(), masked_db.len());
        xor_in_place(db.as_mut_bytes(), &db_mask);

        let db = db.as_bytes();
        if db[..HASH_LEN] != *Self::label_hash().as_ref() {
            return Err(Error::LabelMismatch);
        }

        let separator = db[HASH_LEN..]
            .iter()
            .position(|&b| b == 0x01)
            .ok_or(Error::SeparatorNotFound)?;

        Ok(db[HASH_LEN + separator + 1..].to_vec())
    }
}
