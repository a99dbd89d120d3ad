/*
    Hash module includes the hash functions needed for
    checksums, key identifiers and child key derivation.
*/

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/**
    Takes in a byte array and returns the sha256 hash of it
*/
pub fn sha256<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(input));
    out
}

/**
    Double sha256, used for the Base58Check checksum
*/
pub fn sha256d<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    sha256(sha256(input))
}

/**
    Takes in a byte array and returns the ripemd160 hash of it
*/
pub fn ripemd160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(input));
    out
}

/**
    Ripemd160( Sha256( input ) ). Used for key identifiers and fingerprints.
*/
pub fn hash160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    ripemd160(sha256(input))
}

/**
    HMAC-SHA512 of data keyed with key.
*/
pub fn hmac_sha512(data: &[u8], key: &[u8]) -> Result<[u8; 64]> {
    let mut mac = <HmacSha512 as KeyInit>::new_from_slice(key).map_err(|_| Error::InvalidLength(key.len()))?;
    mac.update(data);

    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
