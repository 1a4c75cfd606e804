//! Field tower tests: fixed vectors and the field axioms

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::super::field::{batch_invert, Field, Fp, Fp12, Fp2, Fp6};
use super::super::Scalar;

fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

// ============================================================================
// Fp vectors
// ============================================================================

#[test]
fn fp_conditional_select_and_ct_eq() {
    let a = Fp::from_u64(7);
    let b = Fp::from_u64(11);
    assert_eq!(Fp::conditional_select(&a, &b, Choice::from(0u8)), a);
    assert_eq!(Fp::conditional_select(&a, &b, Choice::from(1u8)), b);
    assert!(bool::from(a.ct_eq(&Fp::from_u64(7))));
    assert!(!bool::from(a.ct_eq(&b)));
}

#[test]
fn fp_small_values() {
    assert_eq!(Fp::from_u64(2) + Fp::from_u64(3), Fp::from_u64(5));
    assert_eq!(Fp::from_u64(6) * Fp::from_u64(7), Fp::from_u64(42));
    assert_eq!(Fp::from_i64(-1), -Fp::one());
    assert_eq!(Fp::from_u64(42).to_raw(), [42, 0, 0, 0, 0, 0]);
}

#[test]
fn fp_bytes_round_trip_and_range_check() {
    let mut a = Fp::from_raw_unchecked([
        0xdc90_6d9b_e3f9_5dc8,
        0x8755_caf7_4596_91a1,
        0xcff1_a7f4_e958_3ab3,
        0x9b43_821f_849e_2284,
        0xf575_54f3_a297_4f3f,
        0x085d_bea8_4ed4_7f79,
    ]);

    for _ in 0..100 {
        a = a.square();
        let tmp = a.to_bytes();
        let b = Fp::from_bytes(&tmp).unwrap();
        assert_eq!(a, b);
    }

    // p - 1
    assert_eq!(
        -Fp::one(),
        Fp::from_bytes(&[
            26, 1, 17, 234, 57, 127, 230, 154, 75, 27, 167, 182, 67, 75, 172, 215,
            100, 119, 75, 132, 243, 133, 18, 191, 103, 48, 210, 160, 246, 176, 246, 36,
            30, 171, 255, 254, 177, 83, 255, 255, 185, 254, 255, 255, 255, 255, 170, 170
        ])
        .unwrap()
    );

    // p + 2^376 is out of range
    assert!(bool::from(
        Fp::from_bytes(&[
            27, 1, 17, 234, 57, 127, 230, 154, 75, 27, 167, 182, 67, 75, 172, 215,
            100, 119, 75, 132, 243, 133, 18, 191, 103, 48, 210, 160, 246, 176, 246, 36,
            30, 171, 255, 254, 177, 83, 255, 255, 185, 254, 255, 255, 255, 255, 170, 170
        ])
        .is_none()
    ));

    assert!(bool::from(Fp::from_bytes(&[0xff; 48]).is_none()));
}

#[test]
fn fp_sqrt_vector() {
    // a = 4
    let a = Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]);

    assert_eq!(
        // sqrt(4) = -2
        -a.sqrt().unwrap(),
        // 2
        Fp::from_raw_unchecked([
            0x3213_0000_0006_554f,
            0xb93c_0018_d6c4_0005,
            0x5760_5e0d_b0dd_bb51,
            0x8b25_6521_ed1f_9bcb,
            0x6cf2_8d79_0162_2c03,
            0x11eb_ab9d_bb81_e28c,
        ])
    );
}

#[test]
fn fp_inversion_vector() {
    let a = Fp::from_raw_unchecked([
        0x43b4_3a50_78ac_2076,
        0x1ce0_7630_46f8_962b,
        0x724a_5276_486d_735c,
        0x6f05_c2a6_282d_48fd,
        0x2095_bd5b_b4ca_9331,
        0x03b3_5b38_94b0_f7da,
    ]);
    let b = Fp::from_raw_unchecked([
        0x69ec_d704_0952_148f,
        0x985c_cc20_2219_0f55,
        0xe19b_ba36_a9ad_2f41,
        0x19bb_16c9_5219_dbd8,
        0x14dc_acfd_fb47_8693,
        0x115f_f58a_fff9_a8e1,
    ]);

    assert_eq!(a.invert().unwrap(), b);
    assert!(bool::from(Fp::zero().invert().is_none()));
}

#[test]
fn fp_lexicographic_order() {
    assert!(!bool::from(Fp::zero().lexicographically_largest()));
    assert!(!bool::from(Fp::one().lexicographically_largest()));
    assert!(!bool::from(
        Fp::from_raw_unchecked([
            0xa1fa_ffff_fffe_5557,
            0x995b_fff9_76a3_fffe,
            0x03f4_1d24_d174_ceb4,
            0xf654_7998_c199_5dbd,
            0x778a_468f_507a_6034,
            0x0205_5993_1f7f_8103
        ])
        .lexicographically_largest()
    ));
    assert!(bool::from(
        Fp::from_raw_unchecked([
            0x1804_0000_0001_5554,
            0x8550_0005_3ab0_0001,
            0x633c_b57c_253c_276f,
            0x6e22_d1ec_31eb_b502,
            0xd391_6126_f2d1_4ca2,
            0x17fb_b857_1a00_6596,
        ])
        .lexicographically_largest()
    ));
}

#[test]
fn fp_sqrt_of_square() {
    let four = Fp::from_u64(4);
    let root = four.sqrt().unwrap();
    assert!(root == Fp::from_u64(2) || root == -Fp::from_u64(2));
    // -1 is a non-residue since p = 3 mod 4
    assert!(bool::from((-Fp::one()).sqrt().is_none()));
}

#[test]
fn fp_from_be_bytes_mod_reduces() {
    let p_minus_one = (-Fp::one()).to_bytes();
    let mut wide = [0u8; 64];
    wide[16..].copy_from_slice(&p_minus_one);
    assert_eq!(Fp::from_be_bytes_mod(&wide), -Fp::one());
    assert_eq!(Fp::from_be_bytes_mod(&[0u8; 64]), Fp::zero());
}

// ============================================================================
// Tower vectors
// ============================================================================

#[test]
fn fp2_sqrt_of_square() {
    let mut r = rng(1);
    for a in [Fp2::one(), Fp2::from_i64s(0, 1), Fp2::from_i64s(2, 0), Fp2::random(&mut r)] {
        let root = a.square().sqrt().unwrap();
        assert!(root == a || root == -a);
        assert!(bool::from(root.lexicographically_largest()) || root == Fp2::zero());
    }
    assert_eq!(Fp2::zero().sqrt().unwrap(), Fp2::zero());
}

#[test]
fn fp2_non_residue_has_no_root() {
    // u + 1 is the cubic non-residue and not a square in Fp2
    assert!(bool::from(Fp2::from_i64s(1, 1).sqrt().is_none()));
}

#[test]
fn fp2_sign_and_order() {
    assert!(bool::from(Fp2::from_i64s(1, 0).sgn0()));
    assert!(!bool::from(Fp2::from_i64s(2, 1).sgn0()));
    assert!(bool::from(Fp2::from_i64s(0, 1).sgn0()));
    assert!(bool::from(Fp2::from_i64s(0, -1).lexicographically_largest()));
    assert!(!bool::from(Fp2::from_i64s(-1, 1).lexicographically_largest()));
}

#[test]
fn frobenius_is_the_p_power() {
    let mut r = rng(2);
    let p = super::super::field::fp::MODULUS;
    let a2 = Fp2::random(&mut r);
    assert_eq!(a2.frobenius_map(1), a2.pow_vartime(&p));
    let a6 = Fp6::random(&mut r);
    assert_eq!(a6.frobenius_map(1), a6.pow_vartime(&p));
    let a12 = Fp12::random(&mut r);
    assert_eq!(a12.frobenius_map(1), a12.pow_vartime(&p));
    assert_eq!(a12.frobenius_map(12), a12);
}

#[test]
fn sparse_multiplication_matches_dense() {
    let mut r = rng(3);
    let f = Fp12::random(&mut r);
    let (c0, c1, c4) = (Fp2::random(&mut r), Fp2::random(&mut r), Fp2::random(&mut r));
    let dense = Fp12::new(
        Fp6::new(c0, c1, Fp2::zero()),
        Fp6::new(Fp2::zero(), c4, Fp2::zero()),
    );
    assert_eq!(f.mul_by_014(&c0, &c1, &c4), f * dense);
}

#[test]
fn cyclotomic_square_after_easy_part() {
    let mut r = rng(4);
    let f = Fp12::random(&mut r);
    // f^((p^6 - 1)(p^2 + 1)) lies in the cyclotomic subgroup
    let t = f.frobenius_map(6) * f.invert().unwrap();
    let g = t.frobenius_map(2) * t;
    assert_eq!(g.cyclotomic_square(), g.square());
    assert_eq!(g.cyclotomic_exp(5), g.pow_vartime(&[5]));
}

#[test]
fn final_exponentiation_of_zero_fails() {
    assert!(Fp12::zero().final_exponentiation().is_err());
}

#[test]
fn batch_inversion_skips_zero() {
    let mut r = rng(5);
    let values = [Fp2::random(&mut r), Fp2::zero(), Fp2::random(&mut r)];
    let mut inverted = values;
    batch_invert(&mut inverted);
    assert_eq!(inverted[0], values[0].invert().unwrap());
    assert_eq!(inverted[1], Fp2::zero());
    assert_eq!(inverted[2], values[2].invert().unwrap());
}

#[test]
fn division_by_zero_fails() {
    assert!(Fp::one().divide(&Fp::zero()).is_err());
    assert!(Scalar::one().divide(&Scalar::zero()).is_err());
}

fn zero_to_the_zero<F: Field>() {
    assert_eq!(F::zero().pow_vartime(&[0]), F::one());
    assert_eq!(F::zero().pow_vartime(&[]), F::one());
    assert_eq!(F::zero().pow_vartime(&[3]), F::zero());
}

#[test]
fn pow_zero_is_one_for_a_zero_base() {
    zero_to_the_zero::<Fp>();
    zero_to_the_zero::<Fp2>();
    zero_to_the_zero::<Fp6>();
    zero_to_the_zero::<Fp12>();
    zero_to_the_zero::<Scalar>();
}

// ============================================================================
// Field axioms
// ============================================================================

fn check_axioms<F: Field>(a: F, b: F, c: F) -> Result<(), TestCaseError> {
    prop_assert_eq!(a + b, b + a);
    prop_assert_eq!((a + b) + c, a + (b + c));
    prop_assert_eq!(a * (b + c), a * b + a * c);
    prop_assert_eq!(a * b, b * a);
    prop_assert_eq!((a * b) * c, a * (b * c));
    prop_assert_eq!(a - a, F::zero());
    prop_assert_eq!(a + (-a), F::zero());
    prop_assert_eq!(a.pow_vartime(&[0]), F::one());
    prop_assert_eq!(a.pow_vartime(&[2]), a * a);
    prop_assert_eq!(a.square(), a * a);
    prop_assert_eq!(a.double(), a + a);
    if !a.is_zero_vartime() {
        prop_assert_eq!(a.divide(&a).unwrap(), F::one());
    }
    Ok(())
}

proptest! {
    #[test]
    fn fp_axioms(seed in any::<u64>()) {
        let mut r = rng(seed);
        check_axioms(Fp::random(&mut r), Fp::random(&mut r), Fp::random(&mut r))?;
    }

    #[test]
    fn fp_bytes_round_trip(seed in any::<u64>()) {
        let a = Fp::random(rng(seed));
        prop_assert_eq!(Fp::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn fp2_axioms(seed in any::<u64>()) {
        let mut r = rng(seed);
        check_axioms(Fp2::random(&mut r), Fp2::random(&mut r), Fp2::random(&mut r))?;
    }

    #[test]
    fn scalar_axioms(seed in any::<u64>()) {
        let mut r = rng(seed);
        check_axioms(Scalar::random(&mut r), Scalar::random(&mut r), Scalar::random(&mut r))?;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn fp6_axioms(seed in any::<u64>()) {
        let mut r = rng(seed);
        check_axioms(Fp6::random(&mut r), Fp6::random(&mut r), Fp6::random(&mut r))?;
    }

    #[test]
    fn fp12_axioms(seed in any::<u64>()) {
        let mut r = rng(seed);
        check_axioms(Fp12::random(&mut r), Fp12::random(&mut r), Fp12::random(&mut r))?;
    }
}
