use rand::{rngs::OsRng, RngCore};

use crate::error::{Error, Result};

/// Shortest seed accepted for a master key (128 bits)
pub const MIN_SEED_LEN: usize = 16;
/// Longest seed accepted for a master key (512 bits)
pub const MAX_SEED_LEN: usize = 64;

/**
    Generates random bytes using OsRng
*/
pub fn random_bytes(size: usize) -> Vec<u8> {
    let mut bytes: Vec<u8> = vec![0; size];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

pub fn random_array<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/**
    Random seed suitable for a master key.
    Size is in bytes and must be between 16 and 64.
*/
pub fn random_seed(size: usize) -> Result<Vec<u8>> {
    check_seed_len(size)?;
    Ok(random_bytes(size))
}

pub(crate) fn check_seed_len(len: usize) -> Result<()> {
    if (MIN_SEED_LEN..=MAX_SEED_LEN).contains(&len) {
        Ok(())
    } else {
        Err(Error::InvalidLength(len))
    }
}
