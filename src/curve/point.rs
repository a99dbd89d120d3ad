//! secp256k1 point operations
//!
//! `Point` is the public affine form (x, y) or the identity. Arithmetic runs
//! on `JacobianPoint` (X, Y, Z) where x = X/Z², y = Y/Z³, so a chain of
//! additions only pays for one inversion when converting back.

use super::{
    field::FieldElement,
    params::{params, SCALAR_BITS},
    scalar::Scalar,
};
use crate::error::{Error, Result};

/// Affine point on y² = x³ + 7, or the point at infinity
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    coords: Option<(FieldElement, FieldElement)>,
}

impl Point {
    /// The point at infinity
    pub fn identity() -> Self {
        Point { coords: None }
    }

    /// Generator point G
    pub fn generator() -> Self {
        let p = params();
        Point {
            coords: Some((
                FieldElement::reduce(p.gx.clone()),
                FieldElement::reduce(p.gy.clone()),
            )),
        }
    }

    /// Build an affine point, checking curve membership
    pub fn from_affine(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Point { coords: Some((x, y)) };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::PointNotOnCurve)
        }
    }

    /// Affine point from coordinates already known to be on the curve
    pub(crate) fn from_coordinates(x: FieldElement, y: FieldElement) -> Self {
        Point { coords: Some((x, y)) }
    }

    pub fn is_identity(&self) -> bool {
        self.coords.is_none()
    }

    /// The affine coordinates, or None for the identity
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        self.coords.as_ref().map(|(x, y)| (x, y))
    }

    /// Check y² = x³ + 7 (mod p). The identity is on every curve.
    pub fn is_on_curve(&self) -> bool {
        match &self.coords {
            None => true,
            Some((x, y)) => y.square() == curve_rhs(x),
        }
    }

    /// -(x, y) = (x, -y)
    pub fn neg(&self) -> Self {
        Point {
            coords: self.coords.as_ref().map(|(x, y)| (x.clone(), y.neg())),
        }
    }

    /// P + Q. Handles P = O, Q = O, P = Q and P = -Q.
    pub fn add(&self, other: &Self) -> Self {
        self.to_jacobian().add(&other.to_jacobian()).to_affine()
    }

    /// 2P
    pub fn double(&self) -> Self {
        self.to_jacobian().double().to_affine()
    }

    /**
        Scalar multiplication kP with a Montgomery ladder.

        k is first lifted to k + n or k + 2n so bit 256 is always set.
        The ladder then starts from (P, 2P) and walks the remaining 256
        bits, most significant first. Every step performs one addition
        and one doubling and the scalar bit only selects which ladder
        register receives which result.
    */
    pub fn mul(&self, k: &Scalar) -> Self {
        let k = k.fixed_length();
        let p = self.to_jacobian();
        let mut ladder = [p.clone(), p.double()];

        for i in (0..SCALAR_BITS).rev() {
            let bit = k.bit(i) as usize;
            let sum = ladder[0].add(&ladder[1]);
            let doubled = ladder[bit].double();
            ladder[1 - bit] = sum;
            ladder[bit] = doubled;
        }

        let [result, _] = ladder;
        result.to_affine()
    }

    /// kG
    pub fn mul_generator(k: &Scalar) -> Self {
        Self::generator().mul(k)
    }

    /**
        Parses a SEC1 encoded point.
        33 bytes compressed (0x02/0x03 || x) or 65 bytes uncompressed (0x04 || x || y).
    */
    pub fn from_sec1(bytes: &[u8]) -> Result<Self> {
        match (bytes.len(), bytes.first()) {
            (33, Some(0x02)) | (33, Some(0x03)) => {
                let x = field_from_slice(&bytes[1..33])?;
                //Solve for y and pick the root with the signalled parity
                let y = curve_rhs(&x).sqrt().ok_or(Error::PointNotOnCurve)?;
                let want_odd = bytes[0] == 0x03;
                let y = if y.is_odd() == want_odd { y } else { y.neg() };

                Self::from_affine(x, y)
            },
            (65, Some(0x04)) => {
                let x = field_from_slice(&bytes[1..33])?;
                let y = field_from_slice(&bytes[33..65])?;

                Self::from_affine(x, y)
            },
            (33, Some(prefix)) | (65, Some(prefix)) => Err(Error::InvalidKeyData(
                format!("unknown point prefix 0x{:02x}", prefix)
            )),
            (len, _) => Err(Error::InvalidLength(len)),
        }
    }

    /// Compressed SEC1 encoding, None for the identity
    pub fn to_compressed(&self) -> Option<[u8; 33]> {
        self.coordinates().map(|(x, y)| encode_compressed(x, y))
    }

    /// Uncompressed SEC1 encoding, None for the identity
    pub fn to_uncompressed(&self) -> Option<[u8; 65]> {
        self.coordinates().map(|(x, y)| encode_uncompressed(x, y))
    }

    fn to_jacobian(&self) -> JacobianPoint {
        match &self.coords {
            None => JacobianPoint::infinity(),
            Some((x, y)) => JacobianPoint {
                x: x.clone(),
                y: y.clone(),
                z: FieldElement::one(),
            },
        }
    }
}

pub(crate) fn encode_compressed(x: &FieldElement, y: &FieldElement) -> [u8; 33] {
    let mut out = [0u8; 33];
    out[0] = if y.is_odd() { 0x03 } else { 0x02 };
    out[1..].copy_from_slice(&x.to_bytes_be());
    out
}

pub(crate) fn encode_uncompressed(x: &FieldElement, y: &FieldElement) -> [u8; 65] {
    let mut out = [0u8; 65];
    out[0] = 0x04;
    out[1..33].copy_from_slice(&x.to_bytes_be());
    out[33..].copy_from_slice(&y.to_bytes_be());
    out
}

/// x³ + 7
fn curve_rhs(x: &FieldElement) -> FieldElement {
    x.square().mul(x).add(&FieldElement::reduce(params().b.clone()))
}

fn field_from_slice(bytes: &[u8]) -> Result<FieldElement> {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(bytes);
    FieldElement::from_bytes_be(&buf).ok_or(Error::PointNotOnCurve)
}

/// Jacobian point (X, Y, Z), infinity when Z = 0
#[derive(Clone, Debug)]
struct JacobianPoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl JacobianPoint {
    fn infinity() -> Self {
        JacobianPoint {
            x: FieldElement::one(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    fn to_affine(&self) -> Point {
        //Z has no inverse exactly when the point is at infinity
        let z_inv = match self.z.invert() {
            Ok(z_inv) => z_inv,
            Err(_) => return Point::identity(),
        };
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2.mul(&z_inv);

        Point {
            coords: Some((self.x.mul(&z_inv2), self.y.mul(&z_inv3))),
        }
    }

    /// Doubling for a = 0:
    /// A = Y², B = 4·X·A, C = 8·A², D = 3·X²,
    /// X3 = D² - 2·B, Y3 = D·(B - X3) - C, Z3 = 2·Y·Z
    fn double(&self) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::infinity();
        }

        let a = self.y.square();
        let b = self.x.mul(&a).mul_small(4);
        let c = a.square().mul_small(8);
        let d = self.x.square().mul_small(3);

        let x3 = d.square().sub(&b.double());
        let y3 = d.mul(&b.sub(&x3)).sub(&c);
        let z3 = self.y.mul(&self.z).double();

        JacobianPoint { x: x3, y: y3, z: z3 }
    }

    fn add(&self, other: &Self) -> Self {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }

        // U1 = X1·Z2², U2 = X2·Z1², S1 = Y1·Z2³, S2 = Y2·Z1³
        let z1_2 = self.z.square();
        let z1_3 = z1_2.mul(&self.z);
        let z2_2 = other.z.square();
        let z2_3 = z2_2.mul(&other.z);

        let u1 = self.x.mul(&z2_2);
        let u2 = other.x.mul(&z1_2);
        let s1 = self.y.mul(&z2_3);
        let s2 = other.y.mul(&z1_3);

        let h = u2.sub(&u1);
        let r = s2.sub(&s1);

        if h.is_zero() {
            //Same x: either P = Q or P = -Q
            if r.is_zero() {
                return self.double();
            } else {
                return Self::infinity();
            }
        }

        let h2 = h.square();
        let h3 = h2.mul(&h);
        let u1h2 = u1.mul(&h2);

        let x3 = r.square().sub(&h3).sub(&u1h2.double());
        let y3 = r.mul(&u1h2.sub(&x3)).sub(&s1.mul(&h3));
        let z3 = self.z.mul(&other.z).mul(&h);

        JacobianPoint { x: x3, y: y3, z: z3 }
    }
}
