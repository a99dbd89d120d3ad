/*
    Private and public keys on secp256k1.

    A private key is a scalar in [1, n-1] and its public key is the
    point kG. Public keys are never the point at infinity.
*/

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    curve::{FieldElement, Point, Scalar},
    curve::point::{encode_compressed, encode_uncompressed},
    encoding::{base58::Base58, version_prefix::VersionPrefix},
    error::{Error, Result},
    hash,
    util::{try_into, Network}
};

/// Suffix marking a WIF private key whose public key is compressed
const WIF_COMPRESSED_FLAG: u8 = 0x01;

pub trait Key: Sized {
    /**
        Parses a key from its byte encoding.
    */
    fn from_slice(byte_array: &[u8]) -> Result<Self>;

    /**
        The canonical byte encoding of the key.
    */
    fn to_vec(&self) -> Vec<u8>;

    fn hex(&self) -> String {
        hex::encode(self.to_vec())
    }
}

/// 32-byte big-endian private scalar. The bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivKey([u8; 32]);

impl PrivKey {
    /**
        Generates a random private key with OsRng.
    */
    pub fn new_rand() -> Self {
        loop {
            let bytes: [u8; 32] = crate::entropy::random_array();
            if let Ok(k) = Self::from_bytes(bytes) {
                return k
            }
        }
    }

    /**
        Use a scalar as a private key. Zero is rejected.
    */
    pub fn from_scalar(k: &Scalar) -> Result<Self> {
        if k.is_zero() { return Err(Error::InvalidScalarRange) }
        Ok(Self(k.to_bytes_be()))
    }

    fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        match Scalar::from_bytes_be(&bytes) {
            Some(k) if !k.is_zero() => Ok(Self(bytes)),
            _ => Err(Error::InvalidScalarRange)
        }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn scalar(&self) -> Scalar {
        //Stored bytes are always below n
        Scalar::from_bytes_reduced(&self.0)
    }

    /**
        Computes the public key kG.
    */
    pub fn public_key(&self) -> Result<PubKey> {
        PubKey::from_point(&Point::mul_generator(&self.scalar()))
    }

    /**
        (self + tweak) mod n. Returns None when the sum is zero.
    */
    pub fn add_tweak(&self, tweak: &Scalar) -> Option<Self> {
        let sum = self.scalar().add(tweak);
        Self::from_scalar(&sum).ok()
    }

    /**
        Export the private key in wallet-import-format.
        The compression flag is always appended as public keys are
        serialized compressed everywhere in this crate.
    */
    pub fn export_as_wif(&self, network: Network) -> String {
        let mut payload: Vec<u8> = self.0.to_vec();
        payload.push(WIF_COMPRESSED_FLAG);

        let wif = Base58::new(Some(VersionPrefix::wif(network)), &payload).check_encode();
        payload.zeroize();
        wif
    }

    /**
        Import a private key from wallet-import-format.
        Accepts keys with and without the compression flag.
    */
    pub fn from_wif(wif: &str) -> Result<(Self, Network)> {
        let mut bytes = Base58::check_decode(wif)?;

        let network = match bytes.first() {
            Some(0x80) => Network::Bitcoin,
            Some(0xEF) => Network::Testnet,
            Some(prefix) => {
                let prefix = *prefix;
                bytes.zeroize();
                return Err(Error::InvalidKeyData(format!("unknown WIF prefix 0x{:02x}", prefix)))
            },
            None => return Err(Error::InvalidLength(0))
        };

        let key = match (bytes.len(), bytes.last()) {
            (33, _) | (34, Some(&WIF_COMPRESSED_FLAG)) => PrivKey::from_slice(&bytes[1..33]),
            (34, _) => Err(Error::InvalidKeyData("bad WIF compression flag".to_string())),
            (len, _) => Err(Error::InvalidLength(len))
        };
        bytes.zeroize();

        Ok((key?, network))
    }
}

impl Key for PrivKey {
    /**
        Use a predefined 32 byte array as a private key.
        The value must be in [1, n-1].
    */
    fn from_slice(byte_array: &[u8]) -> Result<Self> {
        Self::from_bytes(try_into::<32>(byte_array)?)
    }

    fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivKey(..)")
    }
}

/// Non-identity point on secp256k1
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PubKey {
    x: FieldElement,
    y: FieldElement
}

impl PubKey {
    /**
        Fails with InvalidKeyData for the point at infinity.
    */
    pub fn from_point(point: &Point) -> Result<Self> {
        match point.coordinates() {
            Some((x, y)) => Ok(Self { x: x.clone(), y: y.clone() }),
            None => Err(Error::InvalidKeyData("public key is the point at infinity".to_string()))
        }
    }

    pub fn point(&self) -> Point {
        //Coordinates were checked when the key was built
        Point::from_coordinates(self.x.clone(), self.y.clone())
    }

    /**
        Returns the compressed public key as a byte array.
        (33 bytes = parity prefix + x coordinate)
    */
    pub fn serialize(&self) -> [u8; 33] {
        encode_compressed(&self.x, &self.y)
    }

    /**
        Returns the uncompressed public key as a byte array.
        (65 bytes = 0x04 + x coordinate + y coordinate)
    */
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        encode_uncompressed(&self.x, &self.y)
    }

    /// Hash160 of the compressed encoding
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.serialize())
    }

    /**
        tweak·G + self. Returns None when the sum is the point at infinity.
    */
    pub fn add_tweak(&self, tweak: &Scalar) -> Option<Self> {
        let sum = Point::mul_generator(tweak).add(&self.point());
        Self::from_point(&sum).ok()
    }
}

impl Key for PubKey {
    /**
        Parses a compressed (33 byte) or uncompressed (65 byte) public key.
    */
    fn from_slice(byte_array: &[u8]) -> Result<Self> {
        Self::from_point(&Point::from_sec1(byte_array)?)
    }

    fn to_vec(&self) -> Vec<u8> {
        self.serialize().to_vec()
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({})", self.hex())
    }
}
