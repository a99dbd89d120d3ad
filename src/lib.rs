/*
    Library to derive hierarchical deterministic (BIP32) key trees
    for Bitcoin over secp256k1.

    Field and curve arithmetic, Base58Check and the extended key
    serialization are implemented here. Hash primitives come from the
    RustCrypto crates.

    References:
        - BIP 32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
            for the derivation functions, serialization format and test vectors

        - The Bitcoin Book (https://github.com/bitcoinbook/bitcoinbook/)
            most of the general concepts come from here

        - SEC 2 (https://www.secg.org/sec2-v2.pdf)
            for the secp256k1 domain parameters
*/

//Outward facing modules
pub mod key;
pub mod address;
pub mod hdwallet;
pub mod curve;
pub mod encoding;
pub mod error;
pub mod prelude;
pub mod util;
pub mod entropy;

//Modules for internal use
mod hash;
mod impls;

pub use error::{Error, Result};
