/*
    This module implements child key derivation
    from parent extended private and public keys
    under the BIP32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::{
    curve::Scalar,
    error::{Error, Result},
    hash::hmac_sha512,
    hdwallet::{
        ChainCode,
        ChildIndex,
        ExtendedKey,
        KeyMaterial
    },
    key::{PrivKey, PubKey}
};

/// Deepest level an extended key can be serialized at
pub const MAX_DEPTH: u8 = u8::MAX;

/**
    Derives private child key material.

    Hardened children hash [0x00 || parent private key || index],
    normal children hash [parent public key || index].
*/
pub fn ckd_priv(parent: &PrivKey, parent_pub: &PubKey, chain_code: &ChainCode, index: ChildIndex) -> Result<(PrivKey, ChainCode)> {
    let mut data = [0u8; 37];
    if index.is_hardened() {
        data[1..33].copy_from_slice(parent.as_bytes());
    } else {
        data[..33].copy_from_slice(&parent_pub.serialize());
    }
    data[33..].copy_from_slice(&index.to_raw().to_be_bytes());

    let hash = hmac_sha512(&data, chain_code.as_bytes());
    data.zeroize();
    let mut hash: [u8; 64] = hash?;
    let (tweak, child_chain_code) = split_hash(&hash);
    hash.zeroize();

    //IL >= n or a zero child are both invalid
    let child = child_or_invalid(tweak.and_then(|il| parent.add_tweak(&il)), index)?;

    Ok((child, child_chain_code))
}

/**
    Derives public child key material from a public parent.
    The child point is IL·G + parent point.
*/
pub fn ckd_pub(parent: &PubKey, chain_code: &ChainCode, index: ChildIndex) -> Result<(PubKey, ChainCode)> {
    if index.is_hardened() {
        return Err(Error::HardenedDerivationRequiresPrivateKey(index))
    }

    let mut data = [0u8; 37];
    data[..33].copy_from_slice(&parent.serialize());
    data[33..].copy_from_slice(&index.to_raw().to_be_bytes());

    let hash: [u8; 64] = hmac_sha512(&data, chain_code.as_bytes())?;
    let (tweak, child_chain_code) = split_hash(&hash);

    //IL >= n or a child at infinity are both invalid
    let child = child_or_invalid(tweak.and_then(|il| parent.add_tweak(&il)), index)?;

    Ok((child, child_chain_code))
}

/**
    Derives the child extended key at index.

    Fails with MaxDepthExceeded below depth 255, with
    HardenedDerivationRequiresPrivateKey for a hardened child of a
    public key and with InvalidChildKey when the index has to be skipped.
*/
pub fn derive_child(parent: &ExtendedKey, index: ChildIndex) -> Result<ExtendedKey> {
    if parent.depth() == MAX_DEPTH { return Err(Error::MaxDepthExceeded(index)) }
    let depth = parent.depth() + 1;
    debug!(depth, index = %index, hardened = index.is_hardened(), "deriving child key");

    let result = match parent.key() {
        KeyMaterial::Private(k) => ckd_priv(k, parent.public_key(), parent.chain_code(), index)
            .map(|(k, c)| (KeyMaterial::Private(k), c)),
        KeyMaterial::Public(k) => ckd_pub(k, parent.chain_code(), index)
            .map(|(k, c)| (KeyMaterial::Public(k), c))
    };

    let (key, chain_code) = match result {
        Ok(x) => x,
        Err(e) => {
            if let Error::InvalidChildKey(_) = e {
                warn!(depth, index = %index, "derived key is invalid, skip to the next index");
            }
            return Err(e)
        }
    };

    ExtendedKey::construct(
        parent.network(),
        depth,
        parent.fingerprint(),
        index,
        chain_code,
        key
    )
}

/// An absent child means the index has to be skipped
fn child_or_invalid<T>(child: Option<T>, index: ChildIndex) -> Result<T> {
    child.ok_or(Error::InvalidChildKey(index))
}

/// Splits an HMAC output into IL as a scalar (None if IL >= n) and IR as the chain code
fn split_hash(hash: &[u8; 64]) -> (Option<Scalar>, ChainCode) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&hash[..32]);
    ir.copy_from_slice(&hash[32..]);

    let tweak = Scalar::from_bytes_be(&il);
    il.zeroize();
    (tweak, ChainCode::from(ir))
}
