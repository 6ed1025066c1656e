// Secure Erasure
// Containers for secret numbers and bytes that are wiped when they go out of scope

use std::fmt;
use std::ops::Deref;

use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bigint::{from_bytes, to_bytes_fixed};

/// Overwrite the limbs of `value` with zeros in place, leaving it equal to 0.
///
/// `assign_from_slice` clears the digit vector and refills it from the
/// provided slice without reallocating, so feeding it a zero slice of the same
/// limb count overwrites the old digits before they are released. Copies made
/// earlier by arithmetic are out of reach; this only shortens exposure.
pub fn wipe_biguint(value: &mut BigUint) {
    let limbs = ((value.bits() + 31) / 32) as usize;
    if limbs == 0 {
        return;
    }
    let zeros = vec![0u32; limbs];
    value.assign_from_slice(&zeros);
}

/// A secret big integer that is wiped on drop.
///
/// Used for private exponents, prime factors, Euler's totient and the
/// per-message ElGamal values. Dereferences to `BigUint` for arithmetic.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretInt(BigUint);

impl SecretInt {
    pub fn new(value: BigUint) -> Self {
        SecretInt(value)
    }

    pub fn expose(&self) -> &BigUint {
        &self.0
    }

    /// Wipe the value now instead of waiting for drop.
    pub fn clear(&mut self) {
        wipe_biguint(&mut self.0);
    }
}

impl Deref for SecretInt {
    type Target = BigUint;

    fn deref(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for SecretInt {
    fn from(value: BigUint) -> Self {
        SecretInt(value)
    }
}

impl Drop for SecretInt {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for SecretInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretInt({} bits, redacted)", self.0.bits())
    }
}

/// Fixed-length byte buffer whose backing store is zeroed on drop.
///
/// The length is set at construction and never changes, so the buffer is
/// never reallocated and no stale copy is left behind by growth.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretBuffer {
    bytes: Box<[u8]>,
}

impl SecretBuffer {
    /// A buffer of `len` zero bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len].into_boxed_slice(),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec().into_boxed_slice(),
        }
    }

    /// Big-endian encoding of `value`, left-padded with zeros to `width` bytes.
    /// Returns None if the value needs more than `width` bytes.
    pub fn from_biguint(value: &BigUint, width: usize) -> Option<Self> {
        to_bytes_fixed(value, width).map(|bytes| Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    pub fn to_biguint(&self) -> BigUint {
        from_bytes(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Zero every byte; the length is kept.
    pub fn clear(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer({} bytes, redacted)", self.bytes.len())
    }
}
