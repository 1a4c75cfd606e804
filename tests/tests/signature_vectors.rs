//! Fixture-driven signing and verification tests

use dbls_sign::{get_public_key, sign, verify, KeyType};
use dbls_tests::{
    g1_signature_vectors, g2_signature_vectors, known_answer_vectors, verify_vectors, SignVector,
};

fn check_sign_vector(v: &SignVector, sig_type: KeyType) {
    let private_key = v.private_key().unwrap();
    let message = v.message().unwrap();

    let sig = sign(&message, &private_key, sig_type).unwrap();
    assert_eq!(sig, v.signature, "signature for key {}", v.private_key);
    assert_eq!(sig.to_hex(true), v.signature.to_hex(true));

    let public_key = get_public_key(&private_key, sig_type.opposite()).unwrap();
    if let Some(expected) = &v.public_key {
        assert_eq!(&public_key, expected, "public key for {}", v.private_key);
    }
    assert!(verify(&sig, &message, &public_key).unwrap());
}

#[test]
fn g2_signatures_match_vectors() {
    let vectors = g2_signature_vectors();
    assert!(!vectors.is_empty());
    for v in vectors {
        check_sign_vector(v, KeyType::G2);
    }
}

#[test]
fn g1_signatures_match_vectors() {
    let vectors = g1_signature_vectors();
    assert!(!vectors.is_empty());
    for v in vectors {
        check_sign_vector(v, KeyType::G1);
    }
}

#[test]
fn long_message_known_answer() {
    for v in known_answer_vectors() {
        check_sign_vector(v, KeyType::G1);
    }
}

#[test]
fn verification_cases() {
    for case in verify_vectors() {
        let message = case.message().unwrap();
        let result = verify(&case.signature, &message, &case.public_key).unwrap();
        assert_eq!(result, case.valid, "case {}: {}", case.id, case.comment);
    }
}

#[test]
fn signatures_do_not_verify_under_neighbouring_keys() {
    let vectors = g2_signature_vectors();
    for pair in vectors.windows(2) {
        let message = pair[0].message().unwrap();
        let other_key = pair[1].public_key.unwrap();
        assert!(!verify(&pair[0].signature, &message, &other_key).unwrap());

        let other_message = pair[1].message().unwrap();
        let own_key = pair[0].public_key.unwrap();
        assert!(!verify(&pair[0].signature, &other_message, &own_key).unwrap());
    }
}
