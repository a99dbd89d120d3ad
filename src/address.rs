use crate::{
    key::PubKey,
    encoding::{base58::Base58, version_prefix::VersionPrefix},
    hash,
    util::Network
};

/// Base58Check payload length of a P2PKH address (prefix + hash160)
const P2PKH_PAYLOAD_LEN: usize = 21;

pub struct Address;

impl Address {
    /**
        Creates a P2PKH address from a compressed public key.
        * Base58Check( prefix || Ripemd160( Sha256( Public Key ) ) )
    */
    pub fn p2pkh(pk: &PubKey, network: Network) -> String {
        Base58::new(Some(VersionPrefix::p2pkh(network)), &pk.hash160()).check_encode()
    }

    /**
        Same as p2pkh() but hashes the uncompressed encoding of the key.
    */
    pub fn p2pkh_uncompressed(pk: &PubKey, network: Network) -> String {
        let hash = hash::hash160(pk.serialize_uncompressed());
        Base58::new(Some(VersionPrefix::p2pkh(network)), &hash).check_encode()
    }

    /**
        Verifies that an address is valid by checking the payload and checksum
    */
    pub fn is_valid(address: &str) -> bool {
        match Base58::check_decode(address) {
            Ok(payload) => payload.len() == P2PKH_PAYLOAD_LEN && matches!(payload[0], 0x00 | 0x6F),
            Err(_) => false
        }
    }
}
