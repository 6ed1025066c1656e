// Key Generation Configuration
// Bounds on every retry loop used while searching for primes and generators

/// Attempt limits for key generation.
///
/// Every search in the crate is bounded by one of these values; nothing loops
/// forever. Tests shrink them to make exhaustion paths fast and deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeygenConfig {
    /// Outer key-generation attempts (RSA prime pairs, ElGamal parameter sets)
    pub max_retries: u32,
    /// Random candidates drawn per prime search
    pub prime_attempts: u32,
    /// Sophie Germain candidates `q` drawn per safe-prime search
    pub safe_prime_attempts: u32,
    /// Random generator candidates drawn per safe prime
    pub generator_attempts: u32,
    /// Random Miller-Rabin witnesses used above the deterministic bound
    pub primality_rounds: u32,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            prime_attempts: 10_000,
            safe_prime_attempts: 1000,
            generator_attempts: 10_000,
            primality_rounds: 64,
        }
    }
}

impl KeygenConfig {
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_prime_attempts(mut self, attempts: u32) -> Self {
        self.prime_attempts = attempts;
        self
    }

    pub fn with_safe_prime_attempts(mut self, attempts: u32) -> Self {
        self.safe_prime_attempts = attempts;
        self
    }

    pub fn with_generator_attempts(mut self, attempts: u32) -> Self {
        self.generator_attempts = attempts;
        self
    }

    pub fn with_primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = rounds;
        self
    }
}
