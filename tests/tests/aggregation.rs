//! Aggregation and batch verification across crates

use dbls_sign::{
    aggregate_public_keys, aggregate_signatures, get_public_key, sign, verify, verify_batch, Key,
    KeyType, PrivateKey,
};
use dbls_tests::{aggregate_vectors, g1_signature_vectors, g2_signature_vectors};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn aggregate_vectors_reproduce() {
    for v in aggregate_vectors() {
        let keys = v.private_keys().unwrap();
        let message = v.message().unwrap();

        let public_keys: Vec<Key> = keys
            .iter()
            .map(|k| get_public_key(k, KeyType::G1).unwrap())
            .collect();
        let signatures: Vec<Key> = keys
            .iter()
            .map(|k| sign(&message, k, KeyType::G2).unwrap())
            .collect();

        let agg_pk = aggregate_public_keys(&public_keys).unwrap();
        let agg_sig = aggregate_signatures(&signatures).unwrap();
        assert_eq!(agg_pk, v.public_key);
        assert_eq!(agg_sig, v.signature);
        assert!(verify(&agg_sig, &message, &agg_pk).unwrap());
    }
}

#[test]
fn fixture_signatures_batch_verify() {
    for (vectors, sig_type) in [
        (g2_signature_vectors(), KeyType::G2),
        (g1_signature_vectors(), KeyType::G1),
    ] {
        let messages: Vec<Vec<u8>> = vectors.iter().map(|v| v.message().unwrap()).collect();
        let public_keys: Vec<Key> = vectors.iter().map(|v| v.public_key.unwrap()).collect();
        let signatures: Vec<Key> = vectors.iter().map(|v| v.signature).collect();
        let agg = aggregate_signatures(&signatures).unwrap();
        assert_eq!(agg.key_type(), sig_type);
        assert!(verify_batch(&agg, &messages, &public_keys).unwrap());

        // dropping one signature from the aggregate breaks the batch
        let partial = aggregate_signatures(&signatures[1..]).unwrap();
        assert!(!verify_batch(&partial, &messages, &public_keys).unwrap());
    }
}

#[test]
fn random_batches_with_wrong_messages_fail() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xb15);
    for size in [1usize, 3, 8] {
        let mut messages = Vec::with_capacity(size);
        let mut wrong_messages = Vec::with_capacity(size);
        let mut public_keys = Vec::with_capacity(size);
        let mut signatures = Vec::with_capacity(size);
        for _ in 0..size {
            let message: [u8; 16] = rng.gen();
            let wrong: [u8; 16] = rng.gen();
            let private_key = PrivateKey::random(&mut rng);
            public_keys.push(get_public_key(&private_key, KeyType::G1).unwrap());
            signatures.push(sign(&message, &private_key, KeyType::G2).unwrap());
            messages.push(message);
            wrong_messages.push(wrong);
        }
        let agg = aggregate_signatures(&signatures).unwrap();
        assert!(verify_batch(&agg, &messages, &public_keys).unwrap());
        assert!(!verify_batch(&agg, &wrong_messages, &public_keys).unwrap());
    }
}

#[test]
fn same_message_batch_matches_aggregate_verify() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let keys: Vec<PrivateKey> = (0..5).map(|_| PrivateKey::random(&mut rng)).collect();
    let message = b"one message for everyone";
    let public_keys: Vec<Key> = keys
        .iter()
        .map(|k| get_public_key(k, KeyType::G2).unwrap())
        .collect();
    let signatures: Vec<Key> = keys
        .iter()
        .map(|k| sign(message, k, KeyType::G1).unwrap())
        .collect();
    let agg = aggregate_signatures(&signatures).unwrap();

    let messages = vec![&message[..]; keys.len()];
    assert!(verify_batch(&agg, &messages, &public_keys).unwrap());
    let agg_pk = aggregate_public_keys(&public_keys).unwrap();
    assert!(verify(&agg, message, &agg_pk).unwrap());
}
