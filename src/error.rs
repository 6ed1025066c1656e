// Error Types
// Every failure the key generators and ciphers can report

/// Broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad caller input, raised before any generation work happens.
    Parameter,
    /// A bounded search ran out of attempts.
    ResourceExhaustion,
    /// A single encrypt/decrypt (or cipher construction) call was rejected.
    CryptoOperation,
    /// A generator produced something it never should have.
    Internal,
}

/// Errors that can occur during key generation and cryptographic operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Parameter errors
    #[error("{0} must be all provided or all omitted")]
    ParameterCoexistence(&'static str),

    #[error("Invalid key format: {0}")]
    KeyFormatError(&'static str),

    #[error("Key length must be at least {min} bits, got {actual}")]
    KeyTooShort { min: u64, actual: u64 },

    #[error("Bit length mismatch: {0}")]
    BitLengthMismatch(String),

    #[error("p and q must be distinct")]
    NonDistinctPrimes,

    #[error("{0} is not prime")]
    NotPrime(&'static str),

    #[error("p is not a safe prime: (p-1)/2 is not prime")]
    NotSafePrime,

    #[error("g is not a valid generator")]
    InvalidGenerator,

    #[error("Private key out of range: must satisfy 1 < x < p-1")]
    KeyOutOfRange,

    #[error("e and φ(n) are not coprime")]
    NotCoprime,

    // Resource-exhaustion errors
    #[error("Prime generation timed out after {attempts} attempts ({bits} bits)")]
    GenerationTimeout { bits: u64, attempts: u32 },

    #[error("Safe prime generation timed out after {attempts} attempts ({bits} bits)")]
    SafePrimeTimeout { bits: u64, attempts: u32 },

    #[error("No generator found after {attempts} candidates")]
    GeneratorNotFound { attempts: u32 },

    #[error("Key generation failed after {attempts} attempts")]
    KeyGenerationFailed { attempts: u32 },

    // Cryptographic-operation errors
    #[error("Plaintext value must be less than the modulus")]
    PlaintextTooLarge,

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Decryption requires a private key")]
    PrivateKeyUnavailable,

    #[error("Private key doesn't match public key")]
    KeyMismatch,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Message too long: maximum {max} bytes, got {actual}")]
    MessageTooLong { max: usize, actual: usize },

    #[error("Invalid OAEP encoded message format")]
    InvalidOAEPFormat,

    #[error("OAEP label hash mismatch")]
    LabelMismatch,

    #[error("OAEP separator byte not found")]
    SeparatorNotFound,

    // Generator bugs, not caller mistakes
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ParameterCoexistence(_)
            | Error::KeyFormatError(_)
            | Error::KeyTooShort { .. }
            | Error::BitLengthMismatch(_)
            | Error::NonDistinctPrimes
            | Error::NotPrime(_)
            | Error::NotSafePrime
            | Error::InvalidGenerator
            | Error::KeyOutOfRange
            | Error::NotCoprime => ErrorCategory::Parameter,

            Error::GenerationTimeout { .. }
            | Error::SafePrimeTimeout { .. }
            | Error::GeneratorNotFound { .. }
            | Error::KeyGenerationFailed { .. } => ErrorCategory::ResourceExhaustion,

            Error::PlaintextTooLarge
            | Error::InvalidCiphertext
            | Error::PrivateKeyUnavailable
            | Error::KeyMismatch
            | Error::InvalidPrivateKey
            | Error::MessageTooLong { .. }
            | Error::InvalidOAEPFormat
            | Error::LabelMismatch
            | Error::SeparatorNotFound => ErrorCategory::CryptoOperation,

            Error::InternalInvariant(_) => ErrorCategory::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
