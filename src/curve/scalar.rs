//! Integers modulo the group order n

use std::fmt;

use num_bigint::BigUint;

use super::{params::{params, SCALAR_BITS}, to_be_bytes_32};

/// Scalar in [0, n). May carry secret material, so `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Scalar(BigUint);

impl Scalar {
    pub fn zero() -> Self {
        Scalar(BigUint::from(0u32))
    }

    pub fn from_u32(value: u32) -> Self {
        Scalar(BigUint::from(value) % &params().n)
    }

    /**
        Interprets 32 big-endian bytes as an integer.
        Returns None if the value is not below n.
    */
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Option<Self> {
        let value = BigUint::from_bytes_be(bytes);
        if value < params().n {
            Some(Scalar(value))
        } else {
            None
        }
    }

    /// Interprets big-endian bytes of any length, reducing mod n.
    pub fn from_bytes_reduced(bytes: &[u8]) -> Self {
        Scalar(BigUint::from_bytes_be(bytes) % &params().n)
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        to_be_bytes_32(&self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.bits() == 0
    }

    /// Bit i, counting from the least significant
    pub fn bit(&self, i: u64) -> bool {
        self.0.bit(i)
    }

    /**
        k + n, or k + 2n when k + n is below 2^256.
        Congruent to k mod n with bit 256 always set, so scalar
        multiplication runs over the same number of bits for every k.
    */
    pub(crate) fn fixed_length(&self) -> BigUint {
        let n = &params().n;
        let mut lifted = &self.0 + n;
        if !lifted.bit(SCALAR_BITS) {
            lifted += n;
        }
        lifted
    }

    pub fn add(&self, other: &Self) -> Self {
        Scalar((&self.0 + &other.0) % &params().n)
    }

    pub fn neg(&self) -> Self {
        Scalar((&params().n - &self.0) % &params().n)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(..)")
    }
}
