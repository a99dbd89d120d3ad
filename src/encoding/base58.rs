use tracing::debug;

use crate::{
    encoding::version_prefix::VersionPrefix,
    error::{Error, Result},
    hash
};

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const MAP_BASE58: [i8; 256] = [
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1, 0, 1, 2, 3, 4, 5, 6,  7, 8,-1,-1,-1,-1,-1,-1,
        -1, 9,10,11,12,13,14,15, 16,-1,17,18,19,20,21,-1,
        22,23,24,25,26,27,28,29, 30,31,32,-1,-1,-1,-1,-1,
        -1,33,34,35,36,37,38,39, 40,41,42,43,-1,44,45,46,
        47,48,49,50,51,52,53,54, 55,56,57,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
        -1,-1,-1,-1,-1,-1,-1,-1, -1,-1,-1,-1,-1,-1,-1,-1,
];

/// Length of the double-sha256 checksum appended by check_encode
pub const CHECKSUM_LEN: usize = 4;

#[derive(Debug, Clone)]
pub struct Base58 {
    prefix: Option<VersionPrefix>,
    payload: Vec<u8>
}

impl Base58 {
    pub fn new(prefix: Option<VersionPrefix>, payload: &[u8]) -> Base58 {
        Base58 {
            prefix,
            payload: payload.to_vec()
        }
    }

    /// Check encode data by appending the checksum and then encoding it.
    pub fn check_encode(self) -> String {
        //Concatenate: prefix | payload | checksum
        let mut bytes = self.into_bytes();
        let checksum = checksum(&bytes);
        bytes.extend_from_slice(&checksum);

        encode_bytes(&bytes)
    }

    /// Encode data in base58 format without a checksum.
    pub fn encode(self) -> String {
        encode_bytes(&self.into_bytes())
    }

    /// Decodes a base58 string into a byte vector.
    /// DOES NOT remove the checksum or version prefix if present.
    pub fn decode(encoded: &str) -> Result<Vec<u8>> {
        let mut zeroes = 0;
        let mut leading = true;

        //Little endian base256 digits of the value
        let mut b256: Vec<u8> = Vec::with_capacity(encoded.len() * 733 / 1000 + 1); // log(58) / log(256), rounded up.

        for (position, character) in encoded.chars().enumerate() {
            let digit = digit_of(character).ok_or(Error::InvalidCharacter { character, position })?;

            //Each leading '1' is a leading zero byte
            if leading && digit == 0 {
                zeroes += 1;
                continue;
            }
            leading = false;

            //b256 = b256 * 58 + digit
            let mut carry = digit as u32;
            for byte in b256.iter_mut() {
                carry += 58 * (*byte as u32);
                *byte = (carry & 0xff) as u8;
                carry >>= 8;
            }
            while carry > 0 {
                b256.push((carry & 0xff) as u8);
                carry >>= 8;
            }
        }

        let mut result = vec![0u8; zeroes];
        result.extend(b256.iter().rev());
        Ok(result)
    }

    /// Checks if a base58 check encoded string is valid
    pub fn validate_checksum(encoded: &str) -> Result<bool> {
        let bytes = Base58::decode(encoded)?;
        if bytes.len() < CHECKSUM_LEN { return Err(Error::InvalidLength(bytes.len())) }

        let (payload, extracted) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
        Ok(checksum(payload) == extracted)
    }

    /// Returns the decoded payload with the checksum removed.
    /// Version prefix is NOT removed as it is variable length depending on context.
    pub fn check_decode(encoded: &str) -> Result<Vec<u8>> {
        let mut bytes = Base58::decode(encoded)?;
        if bytes.len() < CHECKSUM_LEN { return Err(Error::InvalidLength(bytes.len())) }

        let extracted = bytes.split_off(bytes.len() - CHECKSUM_LEN);
        if checksum(&bytes)[..] != extracted[..] {
            debug!("base58check checksum mismatch");
            return Err(Error::InvalidChecksum);
        }

        Ok(bytes)
    }

    fn into_bytes(self) -> Vec<u8> {
        let mut bytes: Vec<u8> = match self.prefix {
            Some(x) => x.to_bytes(),
            None => Vec::new()
        };
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

/// First four bytes of sha256d(data)
fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash::sha256d(data)[..CHECKSUM_LEN]);
    out
}

fn digit_of(character: char) -> Option<u8> {
    if !character.is_ascii() { return None }

    match MAP_BASE58[character as usize] {
        -1 => None,
        d => Some(d as u8)
    }
}

fn encode_bytes(data: &[u8]) -> String {
    //Leading zero bytes are written as '1' and skipped in the conversion
    let zcount = data.iter().take_while(|b| **b == 0).count();

    //Little endian base58 digits of the value
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1); // log(256) / log(58), rounded up.
    for &byte in &data[zcount..] {
        //digits = digits * 256 + byte
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut encoded = String::with_capacity(zcount + digits.len());
    encoded.extend(std::iter::repeat('1').take(zcount));
    encoded.extend(digits.iter().rev().map(|d| BASE58_ALPHABET[*d as usize] as char));
    encoded
}
