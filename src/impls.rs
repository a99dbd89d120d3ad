/**
    This module combines all the boilerplate
    implementations of fmt::Display and more.
*/

use crate::{
    key::{Key, PubKey},
    hdwallet::{
        ChainCode,
        ExtendedKey,
        Fingerprint
    }
};
use std::fmt;

/*
    key module impls
*/
impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/*
    hdwallet module impls
*/
impl fmt::Display for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_bytes()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_bytes()))
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

/*
    serde impls. Both types go through their text forms.
*/
#[cfg(feature = "serde")]
mod serde_impls {
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use crate::hdwallet::{DerivationPath, ExtendedKey};

    impl Serialize for ExtendedKey {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.serialize())
        }
    }

    impl<'de> Deserialize<'de> for ExtendedKey {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            ExtendedKey::from_str(&s).map_err(de::Error::custom)
        }
    }

    impl Serialize for DerivationPath {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for DerivationPath {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DerivationPath::from_str(&s).map_err(de::Error::custom)
        }
    }
}
