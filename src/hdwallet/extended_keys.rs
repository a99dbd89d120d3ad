/*
    This module implements extended keys that are
    used in BIP32 hierarchal deterministic wallets.

    An extended key is a private or public key paired with a 32 byte
    chain code, plus the metadata needed to serialize it:
    depth, parent fingerprint and child index.
*/

use std::str::FromStr;

use tracing::{debug, error};
use zeroize::Zeroize;

use crate::{
    key::{
        PrivKey,
        PubKey,
        Key
    },
    curve::Point,
    encoding::{
        base58::Base58,
        version_prefix::VersionPrefix
    },
    entropy,
    error::{Error, Result},
    hash,
    address::Address,
    hdwallet::{
        ckd,
        ChildIndex,
        DerivationPath
    },
    util::{try_into, Network}
};

/// Length of a serialized extended key before Base58Check
pub const EXTENDED_KEY_LEN: usize = 78;

/// HMAC key used to produce master keys from a seed
const MASTER_KEY_SALT: &[u8] = b"Bitcoin seed";

/// Right half of a derivation HMAC. Seeds the derivation of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainCode([u8; 32]);

impl ChainCode {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for ChainCode {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// First four bytes of the hash160 of a public key
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 4]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 4]
    }
}

impl From<[u8; 4]> for Fingerprint {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

/// Key held by an extended key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(PrivKey),
    Public(PubKey)
}

/**
    A BIP32 extended key. Immutable once built.

    Private extended keys keep their public key alongside so fingerprints
    and normal child derivation do not repeat the point multiplication.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    network: Network,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_index: ChildIndex,
    chain_code: ChainCode,
    key: KeyMaterial,
    public_key: PubKey
}

impl ExtendedKey {
    pub(crate) fn construct(
        network: Network,
        depth: u8,
        parent_fingerprint: Fingerprint,
        child_index: ChildIndex,
        chain_code: ChainCode,
        key: KeyMaterial
    ) -> Result<Self> {
        let public_key = match &key {
            KeyMaterial::Private(k) => k.public_key()?,
            KeyMaterial::Public(k) => k.clone()
        };

        Ok(Self {
            network,
            depth,
            parent_fingerprint,
            child_index,
            chain_code,
            key,
            public_key
        })
    }

    /**
        Creates the master private key from a seed.
        * HMAC-SHA512(key = "Bitcoin seed", data = seed)
        * IL is the private key, IR the chain code.

        Seeds must be 16 to 64 bytes long.
    */
    pub fn new_master(seed: &[u8], network: Network) -> Result<Self> {
        entropy::check_seed_len(seed.len())?;

        let mut hash: [u8; 64] = hash::hmac_sha512(seed, MASTER_KEY_SALT)?;
        let key = PrivKey::from_slice(&hash[..32]);
        let chain_code: Result<[u8; 32]> = try_into(&hash[32..]);
        hash.zeroize();

        debug!(seed_len = seed.len(), ?network, "creating master key");
        Self::construct(
            network,
            0,
            Fingerprint::default(),
            ChildIndex::Normal(0),
            ChainCode::from(chain_code?),
            KeyMaterial::Private(key?)
        )
    }

    /**
        Master key from a fresh 32 byte random seed.
    */
    pub fn random_master(network: Network) -> Result<Self> {
        let mut seed = entropy::random_seed(32)?;
        let master = Self::new_master(&seed, network);
        seed.zeroize();
        master
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn child_index(&self) -> ChildIndex {
        self.child_index
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    pub fn private_key(&self) -> Option<&PrivKey> {
        match &self.key {
            KeyMaterial::Private(k) => Some(k),
            KeyMaterial::Public(_) => None
        }
    }

    pub fn public_key(&self) -> &PubKey {
        &self.public_key
    }

    /// The public key as a curve point, for address encoders
    pub fn public_key_point(&self) -> Point {
        self.public_key.point()
    }

    /// Hash160 of the compressed public key
    pub fn identifier(&self) -> [u8; 20] {
        self.public_key.hash160()
    }

    /// First four bytes of the identifier. Children store this as their parent fingerprint.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&self.identifier()[..4]);
        Fingerprint(fp)
    }

    /**
        Drops the private key, keeping every other field.
        Public keys are returned unchanged.
    */
    pub fn neuter(&self) -> Self {
        Self {
            key: KeyMaterial::Public(self.public_key.clone()),
            ..self.clone()
        }
    }

    /**
        Derives the child key of self
    */
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        ckd::derive_child(self, index)
    }

    /**
        Derive the key at the given path, one child at a time from self.
        The first failing step aborts the whole path.
    */
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.clone();
        for index in path {
            current = current.derive_child(*index)?;
        }
        Ok(current)
    }

    /**
        Derives the extended private key at path.
        Fails with PrivateKeyRequired on a public key.
    */
    pub fn derive_private(&self, path: &DerivationPath) -> Result<Self> {
        if !self.is_private() { return Err(Error::PrivateKeyRequired) }
        self.derive_path(path)
    }

    /**
        Derives the extended public key at path.

        From a private key hardened steps are allowed and the result
        is neutered. From a public key every step must be normal.
    */
    pub fn derive_public(&self, path: &DerivationPath) -> Result<Self> {
        Ok(self.derive_path(path)?.neuter())
    }

    /// P2PKH address of the public key on this key's network
    pub fn address(&self) -> String {
        Address::p2pkh(&self.public_key, self.network)
    }

    /// WIF export of the private key
    pub fn to_wif(&self) -> Result<String> {
        match &self.key {
            KeyMaterial::Private(k) => Ok(k.export_as_wif(self.network)),
            KeyMaterial::Public(_) => Err(Error::PrivateKeyRequired)
        }
    }

    /**
        The 78 byte serialization:
        version | depth | parent fingerprint | child index | chain code | key
    */
    pub fn to_bytes(&self) -> [u8; EXTENDED_KEY_LEN] {
        let mut bytes = [0u8; EXTENDED_KEY_LEN];
        bytes[0..4].copy_from_slice(&VersionPrefix::extended(self.network, self.is_private()).to_bytes());
        bytes[4] = self.depth;
        bytes[5..9].copy_from_slice(self.parent_fingerprint.as_bytes());
        bytes[9..13].copy_from_slice(&self.child_index.to_raw().to_be_bytes());
        bytes[13..45].copy_from_slice(self.chain_code.as_bytes());
        match &self.key {
            //Private keys are padded with 0x00 to 33 bytes
            KeyMaterial::Private(k) => bytes[46..78].copy_from_slice(k.as_bytes()),
            KeyMaterial::Public(k) => bytes[45..78].copy_from_slice(&k.serialize())
        }
        bytes
    }

    /**
        Parses the 78 byte serialization, validating every field.
    */
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != EXTENDED_KEY_LEN { return Err(Error::InvalidLength(bytes.len())) }

        let (network, private) = VersionPrefix::parse_extended(try_into(&bytes[0..4])?)?;
        let depth: u8 = bytes[4];
        let parent_fingerprint = Fingerprint(try_into(&bytes[5..9])?);
        let child_index = ChildIndex::from_raw(u32::from_be_bytes(try_into(&bytes[9..13])?));
        let chain_code = ChainCode(try_into(&bytes[13..45])?);

        //Master keys have no parent
        if depth == 0 && (!parent_fingerprint.is_zero() || child_index.to_raw() != 0) {
            return Err(Error::InvalidMasterKey)
        }

        let key = match (private, bytes[45]) {
            (true, 0x00) => KeyMaterial::Private(PrivKey::from_slice(&bytes[46..78]).map_err(|e| {
                error!("extended key holds an out of range private key");
                e
            })?),
            (false, 0x02) | (false, 0x03) => KeyMaterial::Public(PubKey::from_slice(&bytes[45..78]).map_err(|e| {
                error!("extended key holds a point that is not on the curve");
                e
            })?),
            (true, prefix) => return Err(Error::InvalidKeyData(
                format!("private key prefix must be 0x00, found 0x{:02x}", prefix)
            )),
            (false, prefix) => return Err(Error::InvalidKeyData(
                format!("public key prefix must be 0x02 or 0x03, found 0x{:02x}", prefix)
            ))
        };

        Self::construct(network, depth, parent_fingerprint, child_index, chain_code, key)
    }

    /**
        Base58Check encoding of to_bytes(). Gives the "xprv..." / "xpub..." form.
    */
    pub fn serialize(&self) -> String {
        let mut bytes = self.to_bytes();
        let encoded = Base58::new(None, &bytes).check_encode();
        bytes.zeroize();
        encoded
    }

    /**
        Import an extended key from a string.
        "xprv[...]", "xpub[...]", "tprv[...]" or "tpub[...]"
    */
    pub fn deserialize(encoded: &str) -> Result<Self> {
        let mut bytes = Base58::check_decode(encoded)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::deserialize(s)
    }
}
