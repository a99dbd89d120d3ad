/*
    Finite field and elliptic curve arithmetic for secp256k1.

    y² = x³ + 7 over F_p with p = 2^256 - 2^32 - 977.
    Integers are arbitrary precision (num-bigint) and every value
    is kept reduced by its modulus.
*/

pub mod params;
pub mod field;
pub mod scalar;
pub mod point;

pub use field::FieldElement;
pub use scalar::Scalar;
pub use point::Point;

use num_bigint::BigUint;

/// Left pads a value below 2^256 to 32 big-endian bytes.
pub(crate) fn to_be_bytes_32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
