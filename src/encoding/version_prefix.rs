use crate::{
    error::{Error, Result},
    util::Network
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrefix {
    //One byte version prefixes
        BTCAddress = 0x00,
        BTCTestNetAddress = 0x6F,
        PrivateKeyWIF = 0x80,
        TestNetPrivateKeyWIF = 0xEF,

    //Four byte version prefixes
        //BIP-32
        Xprv = 0x0488ADE4,
        Xpub = 0x0488B21E,
        Tprv = 0x04358394,
        Tpub = 0x043587CF,
}

impl VersionPrefix {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            //Special cases where version bytes is not 4 bytes long
            VersionPrefix::BTCAddress => vec![0x00],
            VersionPrefix::BTCTestNetAddress => vec![0x6F],
            VersionPrefix::PrivateKeyWIF => vec![0x80],
            VersionPrefix::TestNetPrivateKeyWIF => vec![0xEF],

            //Cases where version bytes is 4 bytes long
            _ => (*self as u32).to_be_bytes().to_vec()
        }
    }

    /**
        Prefix for an extended key on the given network
    */
    pub fn extended(network: Network, private: bool) -> Self {
        match (network, private) {
            (Network::Bitcoin, true) => Self::Xprv,
            (Network::Bitcoin, false) => Self::Xpub,
            (Network::Testnet, true) => Self::Tprv,
            (Network::Testnet, false) => Self::Tpub
        }
    }

    /**
        Reads the four version bytes of a serialized extended key.
        Returns the network and whether the key is private.
    */
    pub fn parse_extended(bytes: [u8; 4]) -> Result<(Network, bool)> {
        Ok(match u32::from_be_bytes(bytes) {
            0x0488ADE4 => (Network::Bitcoin, true),
            0x0488B21E => (Network::Bitcoin, false),
            0x04358394 => (Network::Testnet, true),
            0x043587CF => (Network::Testnet, false),

            _ => return Err(Error::InvalidVersion(bytes))
        })
    }

    pub fn p2pkh(network: Network) -> Self {
        match network {
            Network::Bitcoin => Self::BTCAddress,
            Network::Testnet => Self::BTCTestNetAddress
        }
    }

    pub fn wif(network: Network) -> Self {
        match network {
            Network::Bitcoin => Self::PrivateKeyWIF,
            Network::Testnet => Self::TestNetPrivateKeyWIF
        }
    }
}
