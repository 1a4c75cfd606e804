//! Property tests over random keys and messages

use dbls_algorithms::ec::bls12_381::{pairing, G1Projective, G2Projective, Scalar};
use dbls_sign::{
    aggregate_public_keys, aggregate_signatures, get_public_key, sign, verify, KeyType, PrivateKey,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn sign_then_verify(seed in any::<u64>(), message in proptest::collection::vec(any::<u8>(), 0..64), g1 in any::<bool>()) {
        let sig_type = if g1 { KeyType::G1 } else { KeyType::G2 };
        let sk = PrivateKey::random(&mut ChaCha20Rng::seed_from_u64(seed));
        let pk = get_public_key(&sk, sig_type.opposite()).unwrap();
        let sig = sign(&message, &sk, sig_type).unwrap();
        prop_assert!(verify(&sig, &message, &pk).unwrap());

        let mut other = message.clone();
        other.push(0);
        prop_assert!(!verify(&sig, &other, &pk).unwrap());
    }

    #[test]
    fn aggregate_of_same_message(seed in any::<u64>(), count in 1usize..4) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let keys: Vec<PrivateKey> = (0..count).map(|_| PrivateKey::random(&mut rng)).collect();
        let pks: Vec<_> = keys.iter().map(|k| get_public_key(k, KeyType::G1).unwrap()).collect();
        let sigs: Vec<_> = keys.iter().map(|k| sign(b"shared", k, KeyType::G2).unwrap()).collect();
        let agg_pk = aggregate_public_keys(&pks).unwrap();
        let agg_sig = aggregate_signatures(&sigs).unwrap();
        prop_assert!(verify(&agg_sig, b"shared", &agg_pk).unwrap());
    }

    #[test]
    fn pairing_is_bilinear(seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        let p = G1Projective::generator();
        let q = G2Projective::generator();
        let lhs = pairing(&(p * a), &(q * b), true).unwrap();
        let rhs = pairing(&(p * b), &(q * a), true).unwrap();
        prop_assert_eq!(lhs, rhs);
    }
}
