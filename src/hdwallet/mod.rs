/*
    This module implements hierarchical deterministic key trees
    under the BIP 32 standard.

    Based on chapter 5 of the bitcoin book. (https://github.com/bitcoinbook/bitcoinbook/)
*/

pub mod ckd;
pub mod extended_keys;
pub mod path;

pub use ckd::MAX_DEPTH;
pub use extended_keys::{
    ChainCode,
    ExtendedKey,
    Fingerprint,
    KeyMaterial,
    EXTENDED_KEY_LEN
};
pub use path::{
    ChildIndex,
    DerivationPath,
    HARDENED_OFFSET
};
