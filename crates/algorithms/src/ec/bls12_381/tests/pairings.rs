//! Pairing tests: bilinearity, degenerate inputs and a known value

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::super::field::{Field, Fp, Fp12, Fp2, Fp6};
use super::super::{miller_loop, multi_miller_loop, pairing, G1Projective, G2Prepared, G2Projective, Scalar};

fn e(p: &G1Projective, q: &G2Projective) -> Fp12 {
    pairing(p, q, true).unwrap()
}

// ============================================================================
// Fixed cases
// ============================================================================

#[test]
fn generator_pairing_matches_reference() {
    let expected = Fp12 {
        c0: Fp6 {
            c0: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x1972_e433_a01f_85c5,
                    0x97d3_2b76_fd77_2538,
                    0xc8ce_546f_c96b_cdf9,
                    0xcef6_3e73_66d4_0614,
                    0xa611_3427_8184_3780,
                    0x13f3_448a_3fc6_d825,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xd263_31b0_2e9d_6995,
                    0x9d68_a482_f779_7e7d,
                    0x9c9b_2924_8d39_ea92,
                    0xf480_1ca2_e131_07aa,
                    0xa16c_0732_bdbc_b066,
                    0x083c_a4af_ba36_0478,
                ])
            },
            c1: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x59e2_61db_0916_b641,
                    0x2716_b6f4_b23e_960d,
                    0xc8e5_5b10_a0bd_9c45,
                    0x0bdb_0bd9_9c4d_eda8,
                    0x8cf8_9ebf_57fd_aac5,
                    0x12d6_b792_9e77_7a5e,
                ]),
                c1: Fp::from_raw_unchecked([
                    0x5fc8_5188_b0e1_5f35,
                    0x34a0_6e3a_8f09_6365,
                    0xdb31_26a6_e02a_d62c,
                    0xfc6f_5aa9_7d9a_990b,
                    0xa12f_55f5_eb89_c210,
                    0x1723_703a_926f_8889,
                ])
            },
            c2: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x9358_8f29_7182_8778,
                    0x43f6_5b86_11ab_7585,
                    0x3183_aaf5_ec27_9fdf,
                    0xfa73_d7e1_8ac9_9df6,
                    0x64e1_76a6_a64c_99b0,
                    0x179f_a78c_5838_8f1f,
                ]),
                c1: Fp::from_raw_unchecked([
                    0x672a_0a11_ca2a_ef12,
                    0x0d11_b9b5_2aa3_f16b,
                    0xa444_12d0_699d_056e,
                    0xc01d_0177_221a_5ba5,
                    0x66e0_cede_6c73_5529,
                    0x05f5_a71e_9fdd_c339,
                ])
            }
        },
        c1: Fp6 {
            c0: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0xd30a_88a1_b062_c679,
                    0x5ac5_6a5d_35fc_8304,
                    0xd0c8_34a6_a81f_290d,
                    0xcd54_30c2_da37_07c7,
                    0xf0c2_7ff7_8050_0af0,
                    0x0924_5da6_e2d7_2eae,
                ]),
                c1: Fp::from_raw_unchecked([
                    0x9f2e_0676_791b_5156,
                    0xe2d1_c823_4918_fe13,
                    0x4c9e_459f_3c56_1bf4,
                    0xa3e8_5e53_b9d3_e3c1,
                    0x820a_121e_21a7_0020,
                    0x15af_6183_41c5_9acc,
                ])
            },
            c1: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x7c95_658c_2499_3ab1,
                    0x73eb_3872_1ca8_86b9,
                    0x5256_d749_4774_34bc,
                    0x8ba4_1902_ea50_4a8b,
                    0x04a3_d3f8_0c86_ce6d,
                    0x18a6_4a87_fb68_6eaa,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xbb83_e71b_b920_cf26,
                    0x2a52_77ac_92a7_3945,
                    0xfc0e_e59f_94f0_46a0,
                    0x7158_cdf3_7860_58f7,
                    0x7cc1_061b_82f9_45f6,
                    0x03f8_47aa_9fdb_e567,
                ])
            },
            c2: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x8078_dba5_6134_e657,
                    0x1cd7_ec9a_4399_8a6e,
                    0xb1aa_599a_1a99_3766,
                    0xc9a0_f62f_0842_ee44,
                    0x8e15_9be3_b605_dffa,
                    0x0c86_ba0d_4af1_3fc2,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xe80f_f2a0_6a52_ffb1,
                    0x7694_ca48_721a_906c,
                    0x7583_183e_03b0_8514,
                    0xf567_afdd_40ce_e4e2,
                    0x9a6d_96d2_e526_a5fc,
                    0x197e_9f49_861f_2242,
                ])
            }
        }
    };
    assert_eq!(e(&G1Projective::generator(), &G2Projective::generator()), expected);
}

#[test]
fn small_multiples_are_bilinear() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();
    let p1 = g1 * Scalar::from(2u64);
    let p2 = g1 * Scalar::from(3u64);
    let q = g2 * Scalar::from(5u64);

    assert_eq!(e(&(p1 + p2), &q), e(&p1, &q) * e(&p2, &q));
    assert_eq!(e(&p1, &q), e(&g1, &g2).pow_vartime(&[10]));
    assert_eq!(e(&g1, &(g2 * Scalar::from(6u64))), e(&p1, &(g2 * Scalar::from(3u64))));
}

#[test]
fn pairing_has_order_r() {
    let gt = e(&G1Projective::generator(), &G2Projective::generator());
    assert!(!bool::from(gt.is_one()));
    let order = (-Scalar::one()).to_raw();
    // gt^(r - 1) * gt == 1
    assert_eq!(gt.pow_vartime(&order) * gt, Fp12::one());
}

#[test]
fn negation_inverts() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();
    let product = e(&g1, &g2) * e(&-g1, &g2);
    assert_eq!(product, Fp12::one());
    assert_eq!(e(&-g1, &g2), e(&g1, &-g2));
}

#[test]
fn deferred_final_exponentiation() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();
    let p = g1 * Scalar::from(42u64);

    let raw = pairing(&p, &g2, false).unwrap();
    assert_eq!(raw.final_exponentiation().unwrap(), e(&p, &g2));

    // e(p, g2) * e(-g1, 42 * g2) == 1, with a single final exponentiation
    let lhs = pairing(&p, &g2, false).unwrap()
        * pairing(&-g1, &(g2 * Scalar::from(42u64)), false).unwrap();
    assert_eq!(lhs.final_exponentiation().unwrap(), Fp12::one());
}

#[test]
fn multi_miller_loop_is_the_product() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();
    let p = g1 * Scalar::from(3u64);
    let q = G2Prepared::new(g2 * Scalar::from(7u64));
    let g2_prepared = G2Prepared::from(g2);

    let separate = miller_loop(&g1, &g2_prepared).unwrap() * miller_loop(&p, &q).unwrap();
    let joint = multi_miller_loop(&[(&g1, &g2_prepared), (&p, &q)]).unwrap();
    assert_eq!(joint, separate);
    assert_eq!(
        joint.final_exponentiation().unwrap(),
        e(&g1, &g2) * e(&p, q.point())
    );
}

#[test]
fn degenerate_inputs_are_rejected() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();
    assert!(pairing(&G1Projective::identity(), &g2, true).is_err());
    assert!(pairing(&g1, &G2Projective::identity(), false).is_err());

    let prepared = G2Prepared::new(g2);
    assert!(multi_miller_loop(&[(&G1Projective::identity(), &prepared)]).is_err());

    let off_curve = G1Projective::from_affine(Fp::one(), Fp::one());
    assert!(pairing(&off_curve, &g2, true).is_err());
    let off_curve = G2Projective::from_affine(Fp2::one(), Fp2::one());
    assert!(pairing(&g1, &off_curve, true).is_err());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn bilinearity(sa in any::<u64>(), sb in any::<u64>()) {
        let a = Scalar::random(ChaCha20Rng::seed_from_u64(sa));
        let b = Scalar::random(ChaCha20Rng::seed_from_u64(sb));
        let g1 = G1Projective::generator();
        let g2 = G2Projective::generator();

        let lhs = e(&(g1 * a), &(g2 * b));
        prop_assert_eq!(lhs, e(&(g1 * b), &(g2 * a)));
        prop_assert_eq!(lhs, e(&g1, &g2).pow_vartime(&(a * b).to_raw()));
    }
}
