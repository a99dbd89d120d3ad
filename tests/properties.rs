//! End to end properties of key tree derivation

use btc_hdkeys::{hdwallet::HARDENED_OFFSET, prelude::*};
use rand::{
    rngs::{OsRng, StdRng},
    Rng, RngCore, SeedableRng
};

/// Seeded rng with logging enabled. The seed is printed so a failing run can be repeated.
fn test_rng() -> StdRng {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let seed: [u8; 32] = OsRng.gen();
    eprintln!("rng seed: {seed:?}");
    StdRng::from_seed(seed)
}

fn random_master(rng: &mut StdRng) -> ExtendedKey {
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    ExtendedKey::new_master(&seed, Network::Bitcoin).unwrap()
}

fn random_normal_path(rng: &mut StdRng, len: usize) -> DerivationPath {
    (0..len)
        .map(|_| ChildIndex::normal(rng.gen_range(0..HARDENED_OFFSET)).unwrap())
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn serialization_roundtrip() {
    let mut rng = test_rng();
    let master = random_master(&mut rng);
    let child = master.derive_child(ChildIndex::Hardened(rng.gen_range(0..HARDENED_OFFSET))).unwrap();

    for key in [master.clone(), master.neuter(), child.clone(), child.neuter()] {
        let text = key.to_string();
        assert_eq!(text.parse::<ExtendedKey>().unwrap(), key);
        assert_eq!(ExtendedKey::from_bytes(&key.to_bytes()).unwrap(), key);
    }
}

#[test]
fn derivation_is_deterministic() {
    let seed = hex::decode("5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1").unwrap();
    let path: DerivationPath = "m/44'/0'/0'/0/7".parse().unwrap();

    let a = ExtendedKey::new_master(&seed, Network::Bitcoin).unwrap().derive_private(&path).unwrap();
    let b = ExtendedKey::new_master(&seed, Network::Bitcoin).unwrap().derive_private(&path).unwrap();
    assert_eq!(a.to_bytes(), b.to_bytes());
    assert_eq!(a, b);
}

#[test]
fn public_derivation_matches_private() {
    let mut rng = test_rng();
    let master = random_master(&mut rng);
    let path = random_normal_path(&mut rng, 3);

    let private = master.derive_private(&path).unwrap();
    let public = master.neuter().derive_public(&path).unwrap();

    assert_eq!(private.public_key_point(), public.public_key_point());
    assert_eq!(private.neuter(), public);
    assert!(public.public_key_point().is_on_curve());
}

#[test]
fn hardened_isolation() {
    let mut rng = test_rng();
    let xpub = random_master(&mut rng).neuter();

    for path in ["m/0'", "m/1/2h", "m/3/4/5H/6"] {
        let path: DerivationPath = path.parse().unwrap();
        let first_hardened = *path.iter().find(|i| i.is_hardened()).unwrap();
        assert_eq!(
            xpub.derive_public(&path),
            Err(Error::HardenedDerivationRequiresPrivateKey(first_hardened))
        );
    }
}

#[test]
fn hardened_children_hide_parent() {
    let mut rng = test_rng();
    let master = random_master(&mut rng);

    //Same index in both halves yields unrelated keys
    let normal = master.derive_child(ChildIndex::Normal(0)).unwrap();
    let hardened = master.derive_child(ChildIndex::Hardened(0)).unwrap();
    assert_ne!(normal.public_key(), hardened.public_key());
    assert_ne!(normal.chain_code(), hardened.chain_code());
    assert_eq!(hardened.to_bytes()[9..13], [0x80, 0, 0, 0]);
}

#[test]
fn single_character_flip_breaks_checksum() {
    let mut rng = test_rng();
    let text: Vec<char> = random_master(&mut rng).neuter().to_string().chars().collect();

    for position in [0, 4, text.len() / 2, text.len() - 1] {
        let mut tampered = text.clone();
        tampered[position] = if tampered[position] == 'z' { 'y' } else { 'z' };
        let tampered: String = tampered.into_iter().collect();

        assert_eq!(tampered.parse::<ExtendedKey>(), Err(Error::InvalidChecksum), "{}", tampered);
    }
}

#[test]
fn public_keys_match_libsecp256k1() {
    let mut rng = test_rng();
    let secp = secp256k1::Secp256k1::new();
    let master = random_master(&mut rng);
    let path = "m/0'/1".parse().unwrap();
    let key = master.derive_private(&path).unwrap();

    let secret = secp256k1::SecretKey::from_slice(key.private_key().unwrap().as_bytes()).unwrap();
    let expected = secp256k1::PublicKey::from_secret_key(&secp, &secret);
    assert_eq!(key.public_key().serialize(), expected.serialize());
}

#[test]
fn extended_keys_decode_with_bs58() {
    let mut rng = test_rng();
    let key = random_master(&mut rng);
    let decoded = bs58::decode(key.to_string()).with_check(None).into_vec().unwrap();
    assert_eq!(decoded, key.to_bytes().to_vec());
}

#[test]
fn skipping_invalid_children_is_left_to_the_caller() {
    //Walk forward from an index until derivation succeeds, the way a wallet would
    let mut rng = test_rng();
    let master = random_master(&mut rng);

    let mut index = Some(ChildIndex::Normal(0));
    let mut child = None;
    while let Some(i) = index {
        match master.derive_child(i) {
            Ok(k) => { child = Some(k); break },
            Err(Error::InvalidChildKey(i)) => index = i.next(),
            Err(e) => panic!("unexpected error {e}")
        }
    }
    assert_eq!(child.unwrap().child_index(), ChildIndex::Normal(0));
}

#[test]
fn keys_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExtendedKey>();
    assert_send_sync::<DerivationPath>();
    assert_send_sync::<Point>();
    assert_send_sync::<Error>();
}
