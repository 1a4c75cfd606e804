//! Hex serialization of keys through serde

use dbls_sign::{get_public_key, sign, Key, KeyType, PrivateKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Envelope {
    key_type: KeyType,
    public_key: Key,
    signature: Key,
}

#[test]
fn keys_serialize_as_compressed_hex() {
    let sk = PrivateKey::from_u64(1).unwrap();
    let pk = get_public_key(&sk, KeyType::G1).unwrap();
    let json = serde_json::to_string(&pk).unwrap();
    assert_eq!(
        json,
        "\"97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb\""
    );
    assert_eq!(serde_json::from_str::<Key>(&json).unwrap(), pk);
}

#[test]
fn envelope_round_trip() {
    let sk = PrivateKey::from_u64(77).unwrap();
    let envelope = Envelope {
        key_type: KeyType::G2,
        public_key: get_public_key(&sk, KeyType::G1).unwrap(),
        signature: sign(b"payload", &sk, KeyType::G2).unwrap(),
    };
    let json = serde_json::to_string(&envelope).unwrap();
    assert!(json.contains("\"key_type\":\"g2\""));
    let back: Envelope = serde_json::from_str(&json).unwrap();
    assert_eq!(back, envelope);
}

#[test]
fn malformed_hex_is_a_deserialization_error() {
    assert!(serde_json::from_str::<Key>("\"zz\"").is_err());
    assert!(serde_json::from_str::<Key>("\"c0\"").is_err());
    assert!(serde_json::from_str::<KeyType>("\"g3\"").is_err());
}
