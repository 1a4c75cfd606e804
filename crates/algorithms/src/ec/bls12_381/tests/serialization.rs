//! Point encoding tests for BLS12-381

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::super::{Fp, Fp2, G1Projective, G2Projective, Scalar};
use crate::error::Error;

const G1_GENERATOR_UNCOMPRESSED: &str = "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1";

const G2_GENERATOR_UNCOMPRESSED: &str = "13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb80606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801";

fn infinity_hex(len: usize) -> String {
    let mut s = String::from("40");
    s.push_str(&"0".repeat(2 * len - 2));
    s
}

// ============================================================================
// Known encodings
// ============================================================================

#[test]
fn g1_generator_encodings() {
    let g = G1Projective::generator();
    assert_eq!(g.to_hex(false), G1_GENERATOR_UNCOMPRESSED);
    assert_eq!(G1Projective::from_hex(G1_GENERATOR_UNCOMPRESSED).unwrap(), g);

    let (x, y) = g.to_affine().unwrap();
    assert_eq!(hex::encode(x.to_bytes()), &G1_GENERATOR_UNCOMPRESSED[..96]);
    assert_eq!(hex::encode(y.to_bytes()), &G1_GENERATOR_UNCOMPRESSED[96..]);
}

#[test]
fn g2_generator_encodings() {
    let g = G2Projective::generator();
    assert_eq!(g.to_hex(false), G2_GENERATOR_UNCOMPRESSED);
    assert_eq!(G2Projective::from_hex(G2_GENERATOR_UNCOMPRESSED).unwrap(), g);

    // x1 comes first, with the flags
    let compressed = g.to_hex(true);
    assert_eq!(&compressed[2..192], &G2_GENERATOR_UNCOMPRESSED[2..192]);
    assert_eq!(&compressed[..2], "93");
}

#[test]
fn infinity_encodings() {
    let z1 = G1Projective::identity();
    assert_eq!(z1.to_hex(false), infinity_hex(96));
    assert_eq!(z1.to_compressed()[0], 0xc0);
    assert_eq!(G1Projective::from_hex(&infinity_hex(96)).unwrap(), z1);
    assert_eq!(G1Projective::from_compressed(&z1.to_compressed()).unwrap(), z1);

    let z2 = G2Projective::identity();
    assert_eq!(z2.to_hex(false), infinity_hex(192));
    assert_eq!(z2.to_compressed()[0], 0xc0);
    assert_eq!(G2Projective::from_hex(&infinity_hex(192)).unwrap(), z2);
    assert_eq!(G2Projective::from_compressed(&z2.to_compressed()).unwrap(), z2);
}

#[test]
fn sign_flag_follows_larger_root() {
    let g = G1Projective::generator();
    let flipped = -g;
    let a = g.to_compressed();
    let b = flipped.to_compressed();
    assert_eq!(a[0] ^ b[0], 0x20);
    assert_eq!(a[1..], b[1..]);
    assert_eq!(G1Projective::from_compressed(&b).unwrap(), flipped);
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn g1_malformed_compressed_is_rejected() {
    // every bit set: x is not below p
    assert!(G1Projective::from_compressed(&[0xff; 48]).is_err());

    // compression flag cleared
    let mut bytes = G1Projective::generator().to_compressed();
    bytes[0] &= 0x7f;
    assert!(G1Projective::from_compressed(&bytes).is_err());

    // infinity with a payload
    let mut bytes = [0u8; 48];
    bytes[0] = 0xc0;
    bytes[47] = 1;
    assert!(G1Projective::from_compressed(&bytes).is_err());

    // infinity with the sign flag
    let mut bytes = [0u8; 48];
    bytes[0] = 0xe0;
    assert!(G1Projective::from_compressed(&bytes).is_err());

    // x = 1 gives y^2 = 5, which is not a square
    let mut bytes = [0u8; 48];
    bytes[0] = 0x80;
    bytes[47] = 1;
    assert!(matches!(
        G1Projective::from_compressed(&bytes),
        Err(Error::Point { .. })
    ));
}

#[test]
fn g1_malformed_uncompressed_is_rejected() {
    let mut bytes = G1Projective::generator().to_uncompressed();
    bytes[0] |= 0x80;
    assert!(G1Projective::from_uncompressed(&bytes).is_err());

    // off the curve
    let mut bytes = [0u8; 96];
    bytes[47] = 1;
    bytes[95] = 2;
    assert!(G1Projective::from_uncompressed(&bytes).is_err());

    let mut bytes = [0u8; 96];
    bytes[0] = 0x40;
    bytes[47] = 1;
    assert!(G1Projective::from_uncompressed(&bytes).is_err());
}

#[test]
fn g2_malformed_encodings_are_rejected() {
    assert!(G2Projective::from_compressed(&[0xff; 96]).is_err());

    let mut bytes = G2Projective::generator().to_compressed();
    bytes[0] &= 0x7f;
    assert!(G2Projective::from_compressed(&bytes).is_err());

    let mut bytes = [0u8; 192];
    bytes[95] = 1;
    bytes[191] = 2;
    assert!(G2Projective::from_uncompressed(&bytes).is_err());

    let mut bytes = [0u8; 192];
    bytes[0] = 0x40;
    bytes[100] = 1;
    assert!(G2Projective::from_uncompressed(&bytes).is_err());
}

#[test]
fn wrong_lengths_and_bad_hex_are_rejected() {
    assert!(matches!(
        G1Projective::from_bytes(&[0u8; 47]),
        Err(Error::Length { actual: 47, .. })
    ));
    assert!(matches!(
        G2Projective::from_bytes(&[0u8; 48]),
        Err(Error::Length { actual: 48, .. })
    ));
    assert!(matches!(
        G1Projective::from_hex("zz"),
        Err(Error::Parameter { .. })
    ));
}

#[test]
fn compressed_decoding_skips_subgroup_check() {
    // (0, 2) lies on the curve but outside G1
    let p = G1Projective::from_affine(Fp::zero(), Fp::from_u64(2));
    let decoded = G1Projective::from_compressed(&p.to_compressed()).unwrap();
    assert_eq!(decoded, p);
    assert!(!decoded.is_torsion_free());

    let off = G2Projective::from_affine(Fp2::one(), Fp2::one());
    assert!(off.validate().is_err());
}

// ============================================================================
// Round trips
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn g1_round_trips(seed in any::<u64>()) {
        let k = Scalar::random(ChaCha20Rng::seed_from_u64(seed));
        let p = G1Projective::generator() * k;
        prop_assert_eq!(G1Projective::from_hex(&p.to_hex(true)).unwrap(), p);
        prop_assert_eq!(G1Projective::from_hex(&p.to_hex(false)).unwrap(), p);
    }

    #[test]
    fn g2_round_trips(seed in any::<u64>()) {
        let k = Scalar::random(ChaCha20Rng::seed_from_u64(seed));
        let p = G2Projective::generator() * k;
        prop_assert_eq!(G2Projective::from_hex(&p.to_hex(true)).unwrap(), p);
        prop_assert_eq!(G2Projective::from_hex(&p.to_hex(false)).unwrap(), p);
    }
}
