// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod cipher;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod padding;

pub use cipher::RsaCipher;
pub use decrypt::decrypt_bytes;
pub use encrypt::{encrypt_bytes, RsaCiphertext};
pub use keygen::{
    generate_default_keypair, generate_keypair, RsaKeyGenerator, RsaKeyPair, RsaParams,
    RsaPrivateKey, RsaPublicKey, PUBLIC_EXPONENT,
};
pub use padding::{mgf1, OaepCodec};
