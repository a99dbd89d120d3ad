use crate::error::{Error, Result};

/**
    Copies a slice into a fixed size array.
    Fails with InvalidLength if the slice is not exactly N bytes.
*/
pub fn try_into<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| Error::InvalidLength(bytes.len()))
}

/**
    Network the keys are encoded for. Selects the version prefixes
    used for extended keys, WIF and P2PKH addresses.
*/
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    #[default]
    Bitcoin,
    Testnet
}
