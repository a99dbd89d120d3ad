/*
    This module contains the default imports for the library.

    Import the library using:
        use btc_hdkeys::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{

    key::{
        PubKey,
        PrivKey,
        Key
    },

    address::Address,

    hdwallet::{
        ChainCode,
        ChildIndex,
        DerivationPath,
        ExtendedKey,
        Fingerprint,
        KeyMaterial
    },

    curve::{
        FieldElement,
        Point,
        Scalar
    },

    encoding::Base58,

    error::Error,

    util::Network
};
