//! Error types for key tree operations

use thiserror::Error;

use crate::hdwallet::ChildIndex;

/// Every failure the crate can report.
///
/// [`Error::InvalidChildKey`] is the only recoverable kind: BIP32 asks the
/// caller to move on to the next index. Nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid checksum")]
    InvalidChecksum,

    #[error("invalid base58 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("invalid length: {0} bytes")]
    InvalidLength(usize),

    #[error("unknown version bytes {0:02x?}")]
    InvalidVersion([u8; 4]),

    #[error("division by zero")]
    DivisionByZero,

    #[error("child {0} produced an invalid key, skip to the next index")]
    InvalidChildKey(ChildIndex),

    #[error("cannot derive hardened child {0} from a public key")]
    HardenedDerivationRequiresPrivateKey(ChildIndex),

    #[error("maximum depth of 255 exceeded deriving child {0}")]
    MaxDepthExceeded(ChildIndex),

    #[error("point is not on the secp256k1 curve")]
    PointNotOnCurve,

    #[error("scalar is outside the range [1, n-1]")]
    InvalidScalarRange,

    #[error("invalid key data: {0}")]
    InvalidKeyData(String),

    #[error("depth 0 key with a non-zero parent fingerprint or child index")]
    InvalidMasterKey,

    #[error("operation requires an extended private key")]
    PrivateKeyRequired,

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("child index {0} is out of range")]
    InvalidIndex(u32),
}

/// Result type for key tree operations
pub type Result<T> = std::result::Result<T, Error>;
