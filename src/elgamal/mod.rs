// ElGamal Module - Main module file
// Exports all ElGamal-related functionality

pub mod cipher;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;

pub use cipher::ElGamalCipher;
pub use decrypt::{decrypt_bytes, decrypt_exact, decrypt_trimmed};
pub use encrypt::{encrypt_bytes, ElGamalCiphertext};
pub use keygen::{
    find_generator_with_rng, generate_keypair, is_generator, ElGamalKeyGenerator, ElGamalKeyPair,
    ElGamalParams, ElGamalPrivateKey, ElGamalPublicKey,
};
