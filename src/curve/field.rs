//! secp256k1 field arithmetic
//!
//! Modular arithmetic over p = 2^256 - 2^32 - 977. Every `FieldElement` is
//! kept reduced, so comparisons are plain integer comparisons.

use std::fmt;

use num_bigint::BigUint;

use super::{params::params, to_be_bytes_32};
use crate::error::{Error, Result};

/// Field element in [0, p)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn zero() -> Self {
        FieldElement(BigUint::from(0u32))
    }

    pub fn one() -> Self {
        FieldElement(BigUint::from(1u32))
    }

    pub fn from_u32(value: u32) -> Self {
        Self::reduce(BigUint::from(value))
    }

    /// Reduce an arbitrary integer mod p
    pub fn reduce(value: BigUint) -> Self {
        FieldElement(value % &params().p)
    }

    /// Big-endian bytes. Values >= p are rejected rather than reduced.
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Option<Self> {
        let value = BigUint::from_bytes_be(bytes);
        if value < params().p {
            Some(FieldElement(value))
        } else {
            None
        }
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        to_be_bytes_32(&self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.bits() == 0
    }

    pub fn is_odd(&self) -> bool {
        self.0.bit(0)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::reduce(&self.0 + &other.0)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self::reduce(&self.0 + &params().p - &other.0)
    }

    pub fn neg(&self) -> Self {
        Self::reduce(&params().p - &self.0)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::reduce(&self.0 * &other.0)
    }

    pub fn mul_small(&self, k: u32) -> Self {
        Self::reduce(&self.0 * k)
    }

    pub fn square(&self) -> Self {
        self.mul(self)
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    pub fn pow(&self, exp: &BigUint) -> Self {
        FieldElement(self.0.modpow(exp, &params().p))
    }

    /// Multiplicative inverse via Fermat: a^(p-2)
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self.pow(&params().p_minus_2))
    }

    /// Square root a^((p+1)/4), or None when a is not a quadratic residue
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(&params().sqrt_exp);
        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{})", hex::encode(self.to_bytes_be()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::params::P_BYTES;

    fn p_minus_one() -> FieldElement {
        FieldElement::reduce(BigUint::from_bytes_be(&P_BYTES) - 1u32)
    }

    #[test]
    fn add_wraps_around_modulus() {
        let sum = p_minus_one().add(&FieldElement::from_u32(5));
        assert_eq!(sum, FieldElement::from_u32(4));
    }

    #[test]
    fn sub_never_goes_negative() {
        let diff = FieldElement::from_u32(3).sub(&FieldElement::from_u32(5));
        assert_eq!(diff, FieldElement::from_u32(2).neg());
        assert_eq!(diff.add(&FieldElement::from_u32(2)), FieldElement::zero());
    }

    #[test]
    fn neg_zero_is_zero() {
        assert_eq!(FieldElement::zero().neg(), FieldElement::zero());
    }

    #[test]
    fn invert_roundtrips() {
        for v in [1u32, 2, 7, 977, 0xdead_beef] {
            let a = FieldElement::from_u32(v);
            let inv = a.invert().unwrap();
            assert_eq!(a.mul(&inv), FieldElement::one());
        }
        let inv = p_minus_one().invert().unwrap();
        assert_eq!(inv, p_minus_one());
    }

    #[test]
    fn invert_zero_fails() {
        assert_eq!(FieldElement::zero().invert(), Err(Error::DivisionByZero));
    }

    #[test]
    fn sqrt_of_square() {
        let a = FieldElement::from_u32(123456789);
        let root = a.square().sqrt().unwrap();
        assert!(root == a || root == a.neg());
    }

    #[test]
    fn sqrt_of_non_residue() {
        //-1 is not a square since p = 3 mod 4
        assert!(FieldElement::one().neg().sqrt().is_none());
    }

    #[test]
    fn bytes_at_or_above_p_rejected() {
        assert!(FieldElement::from_bytes_be(&P_BYTES).is_none());
        assert!(FieldElement::from_bytes_be(&[0xff; 32]).is_none());
        let below = p_minus_one().to_bytes_be();
        assert_eq!(FieldElement::from_bytes_be(&below), Some(p_minus_one()));
    }
}
