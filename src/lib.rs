//! Asymmetric encryption primitives: RSA with OAEP (SHA-256) and ElGamal over
//! safe-prime groups.
//!
//! The crate covers key generation, primality testing and block encryption of
//! byte strings that fit in one modulus. Chunking longer inputs and any text or
//! file format are left to the caller.
//!
//! ```no_run
//! use asym_core::{RsaCipher, ElGamalCipher};
//!
//! let (public, private) = RsaCipher::create_pair(2048)?;
//! let ciphertext = public.encrypt(b"hello", true)?;
//! assert_eq!(private.decrypt(&ciphertext, true)?, b"hello");
//!
//! let (public, private) = ElGamalCipher::create_pair(512)?;
//! let ciphertext = public.encrypt(b"hello")?;
//! assert_eq!(private.decrypt_exact(&ciphertext, 5)?, b"hello");
//! # Ok::<(), asym_core::Error>(())
//! ```
//!
//! Secret scalars are held in [`SecretInt`] and [`SecretBuffer`], which zero
//! their storage when dropped. Logging goes through the `log` facade.

pub mod bigint;
pub mod config;
pub mod elgamal;
pub mod error;
pub mod prime;
pub mod rsa;
pub mod secure;

#[cfg(test)]
mod fixtures;

pub use config::KeygenConfig;
pub use error::{Error, ErrorCategory, Result};
pub use prime::{generate_prime, is_prime};
pub use secure::{SecretBuffer, SecretInt};

pub use elgamal::{
    ElGamalCipher, ElGamalCiphertext, ElGamalKeyGenerator, ElGamalKeyPair, ElGamalParams,
    ElGamalPrivateKey, ElGamalPublicKey,
};
pub use rsa::{
    OaepCodec, RsaCipher, RsaCiphertext, RsaKeyGenerator, RsaKeyPair, RsaParams, RsaPrivateKey,
    RsaPublicKey,
};
