//! The `dbls_api` signature traits over both BLS layouts

use dbls_api::{Error, Signature, SignatureSerialize};
use dbls_sign::{BlsMinPk, BlsMinSig, Key};
use dbls_tests::g2_signature_vectors;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn exercise<S>()
where
    S: SignatureSerialize<PublicKey = Key, SignatureData = Key>,
{
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let (pk, sk) = {
        let kp = S::keypair(&mut rng).unwrap();
        (S::public_key(&kp), S::secret_key(&kp))
    };

    for message in [&b""[..], &b"short"[..], &[0x5a; 1024][..]] {
        let sig = S::sign(message, &sk).unwrap();
        S::verify(message, &sig, &pk).unwrap();

        let sig_bytes = S::serialize_signature(&sig);
        let restored = S::deserialize_signature(&sig_bytes).unwrap();
        S::verify(message, &restored, &pk).unwrap();
    }

    let sig = S::sign(b"signed", &sk).unwrap();
    match S::verify(b"tampered", &sig, &pk) {
        Err(Error::InvalidSignature { .. }) => {}
        other => panic!("{}: unexpected result {:?}", S::name(), other),
    }

    let mut bytes = S::serialize_public_key(&pk);
    bytes.truncate(bytes.len() - 1);
    assert!(matches!(
        S::deserialize_public_key(&bytes),
        Err(Error::InvalidLength { .. })
    ));
}

#[test]
fn min_pk_layout() {
    exercise::<BlsMinPk>();
}

#[test]
fn min_sig_layout() {
    exercise::<BlsMinSig>();
}

#[test]
fn min_pk_accepts_fixture_encodings() {
    for v in g2_signature_vectors() {
        let pk_bytes = v.public_key.unwrap().to_bytes(true);
        let sig_bytes = v.signature.to_bytes(true);
        let pk = BlsMinPk::deserialize_public_key(&pk_bytes).unwrap();
        let sig = BlsMinPk::deserialize_signature(&sig_bytes).unwrap();
        BlsMinPk::verify(&v.message().unwrap(), &sig, &pk).unwrap();
    }
}
