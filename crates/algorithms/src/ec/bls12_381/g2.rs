//! G₂ group implementation for BLS12-381.
//!
//! Points are `G2Projective` over `Fp2` on the twist `y^2 = x^3 + 4(u + 1)`.
//! An `Fp2` coordinate `c0 + c1 u` is encoded as `c1 || c0`, and the flag
//! bits sit in the first byte of `x.c1`.

use subtle::{Choice, CtOption};

use super::field::{Fp, Fp2};
use super::g1::{check_infinity_payload, read_fp, Flags, COMPRESSION_FLAG, INFINITY_FLAG, SIGN_FLAG};
use super::point::{CurveField, ProjectivePoint};
use super::BLS_X;
use crate::error::{validate, Error, Result};
use dbls_params::traditional::bls12_381::{
    G2_COMPRESSED_SIZE, G2_UNCOMPRESSED_SIZE, MAX_SCALAR_BITS,
};

/// Curve constant b' = 4(u + 1)
pub const B: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
    c1: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
};

const GENERATOR_X: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xf5f2_8fa2_0294_0a10,
        0xb3f5_fb26_87b4_961a,
        0xa1a8_93b5_3e2a_e580,
        0x9894_999d_1a3c_aee9,
        0x6f67_b763_1863_366b,
        0x0581_9192_4350_bcd7,
    ]),
    c1: Fp::from_raw_unchecked([
        0xa5a9_c075_9e23_f606,
        0xaaa0_c59d_bccd_60c3,
        0x3bb1_7e18_e286_7806,
        0x1b1a_b6cc_8541_b367,
        0xc2b6_ed0e_f215_8547,
        0x1192_2a09_7360_edf3,
    ]),
};

const GENERATOR_Y: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x4c73_0af8_6049_4c4a,
        0x597c_fa1f_5e36_9c5a,
        0xe7e6_856c_aa0a_635a,
        0xbbef_b5e9_6e0d_495f,
        0x07d3_a975_f0ef_25a2,
        0x0083_fd8e_7e80_dae5,
    ]),
    c1: Fp::from_raw_unchecked([
        0xadc0_fc92_df64_b05d,
        0x18aa_270a_2b14_61dc,
        0x86ad_ac6a_3be4_eba0,
        0x7949_5c4e_c93d_a33a,
        0xe717_5850_a43c_caed,
        0x0b2b_c2a1_63de_1bf2,
    ]),
};

/// `1 / (u + 1)^((p - 1) / 3)`, the x twist factor of psi
const PSI_COEFF_X: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    c1: Fp::from_raw_unchecked([
        0x890d_c9e4_8675_45c3,
        0x2af3_2253_3285_a5d5,
        0x5088_0866_309b_7e2c,
        0xa20d_1b8c_7e88_1024,
        0x14e4_f04f_e2db_9068,
        0x14e5_6d3f_1564_853a,
    ]),
};

/// `1 / (u + 1)^((p - 1) / 2)`, the y twist factor of psi
const PSI_COEFF_Y: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x3e2f_585d_a55c_9ad1,
        0x4294_213d_86c1_8183,
        0x3828_44c8_8b62_3732,
        0x92ad_2afd_1910_3e18,
        0x1d79_4e4f_ac7c_f0b9,
        0x0bd5_92fc_7d82_5ec8,
    ]),
    c1: Fp::from_raw_unchecked([
        0x7bcf_a7a2_5aa3_0fda,
        0xdc17_dec1_2a92_7e7c,
        0x2f08_8dd8_6b4e_bef1,
        0xd1ca_2087_da74_d4a7,
        0x2da2_5966_96ce_bc1d,
        0x0e2b_7eed_bbfd_87d2,
    ]),
};

/// x factor of psi^2, a primitive cube root of unity in `Fp`
const PSI2_COEFF_X: Fp = Fp::from_raw_unchecked([
    0xcd03_c9e4_8671_f071,
    0x5dab_2246_1fcd_a5d2,
    0x5870_42af_d385_1b95,
    0x8eb6_0ebe_01ba_cb9e,
    0x03f9_7d6e_83d0_50d2,
    0x18f0_2065_5463_8741,
]);

impl CurveField for Fp2 {
    const GROUP: &'static str = "G2";
    const MAX_BITS: usize = MAX_SCALAR_BITS;

    fn curve_b() -> Fp2 {
        B
    }

    fn generator() -> (Fp2, Fp2) {
        (GENERATOR_X, GENERATOR_Y)
    }

    fn sqrt(&self) -> CtOption<Fp2> {
        Fp2::sqrt(self)
    }

    fn lexicographically_largest(&self) -> Choice {
        Fp2::lexicographically_largest(self)
    }
}

fn read_fp2(bytes: &[u8], mask_flags: bool, op: &'static str) -> Result<Fp2> {
    let c1 = read_fp(&bytes[0..48], mask_flags, op)?;
    let c0 = read_fp(&bytes[48..96], false, op)?;
    Ok(Fp2::new(c0, c1))
}

fn write_fp2(out: &mut [u8], v: &Fp2) {
    out[0..48].copy_from_slice(&v.c1.to_bytes());
    out[48..96].copy_from_slice(&v.c0.to_bytes());
}

impl ProjectivePoint<Fp2> {
    /// Serialize to 96 bytes: `x.c1 || x.c0` with the flags in the first byte.
    pub fn to_compressed(&self) -> [u8; G2_COMPRESSED_SIZE] {
        let mut res = [0u8; G2_COMPRESSED_SIZE];
        match self.to_affine() {
            Err(_) => res[0] = COMPRESSION_FLAG | INFINITY_FLAG,
            Ok((x, y)) => {
                write_fp2(&mut res, &x);
                res[0] |= COMPRESSION_FLAG;
                if bool::from(y.lexicographically_largest()) {
                    res[0] |= SIGN_FLAG;
                }
            }
        }
        res
    }

    /// Serialize to 192 bytes: `x.c1 || x.c0 || y.c1 || y.c0`.
    pub fn to_uncompressed(&self) -> [u8; G2_UNCOMPRESSED_SIZE] {
        let mut res = [0u8; G2_UNCOMPRESSED_SIZE];
        match self.to_affine() {
            Err(_) => res[0] = INFINITY_FLAG,
            Ok((x, y)) => {
                write_fp2(&mut res[0..96], &x);
                write_fp2(&mut res[96..192], &y);
            }
        }
        res
    }

    /// Parse a compressed encoding, recovering y from the sign flag.
    ///
    /// The point is checked against the curve but not against the subgroup.
    pub fn from_compressed(bytes: &[u8; G2_COMPRESSED_SIZE]) -> Result<Self> {
        const OP: &str = "G2 from_compressed";
        let flags = Flags::read(bytes[0]);
        validate::point(flags.compressed, OP, "compression flag not set")?;

        if flags.infinity {
            check_infinity_payload(bytes, &flags, OP)?;
            return Ok(Self::identity());
        }

        let x = read_fp2(bytes, true, OP)?;
        let y = Option::<Fp2>::from((x.square() * x + B).sqrt()).ok_or(Error::Point {
            operation: OP,
            details: "x is not the abscissa of a curve point",
        })?;
        let y = if bool::from(y.lexicographically_largest()) == flags.sign {
            y
        } else {
            -y
        };

        Ok(Self::from_affine(x, y))
    }

    /// Parse an uncompressed encoding and check it lies on the curve.
    pub fn from_uncompressed(bytes: &[u8; G2_UNCOMPRESSED_SIZE]) -> Result<Self> {
        const OP: &str = "G2 from_uncompressed";
        let flags = Flags::read(bytes[0]);
        validate::point(!flags.compressed, OP, "compression flag set")?;

        if flags.infinity {
            check_infinity_payload(bytes, &flags, OP)?;
            return Ok(Self::identity());
        }
        validate::point(!flags.sign, OP, "sign flag set")?;

        let x = read_fp2(&bytes[0..96], true, OP)?;
        let y = read_fp2(&bytes[96..192], false, OP)?;
        let p = Self::from_affine(x, y);
        p.validate()?;
        Ok(p)
    }

    /// Parse either encoding, chosen by length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if let Ok(b) = <&[u8; G2_COMPRESSED_SIZE]>::try_from(bytes) {
            Self::from_compressed(b)
        } else if let Ok(b) = <&[u8; G2_UNCOMPRESSED_SIZE]>::try_from(bytes) {
            Self::from_uncompressed(b)
        } else {
            Err(Error::Length {
                context: "G2 point encoding",
                expected: G2_COMPRESSED_SIZE,
                actual: bytes.len(),
            })
        }
    }

    /// Parse a hex string in either encoding.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = hex::decode(hex).map_err(|_| Error::param("hex", "invalid hex string"))?;
        Self::from_bytes(&bytes)
    }

    /// Hex string of the compressed or uncompressed encoding
    pub fn to_hex(&self, compressed: bool) -> String {
        if compressed {
            hex::encode(self.to_compressed())
        } else {
            hex::encode(self.to_uncompressed())
        }
    }

    /// The untwist-Frobenius-twist endomorphism
    pub fn psi(&self) -> Self {
        ProjectivePoint::from_raw_coordinates(
            self.x.frobenius_map(1) * PSI_COEFF_X,
            self.y.frobenius_map(1) * PSI_COEFF_Y,
            self.z.frobenius_map(1),
        )
    }

    /// psi applied twice
    pub fn psi2(&self) -> Self {
        ProjectivePoint::from_raw_coordinates(self.x.mul_by_fp(&PSI2_COEFF_X), -self.y, self.z)
    }

    /// `[x] P` for the negative curve parameter `x`, computed as `-(|x| P)`
    fn mul_by_x(&self) -> Self {
        -self.mul_by_limbs_vartime(&[BLS_X])
    }

    /// Map an arbitrary twist point into G2:
    /// `psi2(2P) - psi(P) + [x](psi(P) + [x]P) - [x]P - P` with the signed `x`.
    pub fn clear_cofactor(&self) -> Self {
        let t1 = self.mul_by_x();
        let t2 = self.psi();
        let p2 = self.double().psi2();

        p2 - t2 + (t1 + t2).mul_by_x() - t1 - self
    }
}

#[cfg(test)]
mod tests {
    use crate::ec::bls12_381::{G2Projective, Scalar};

    #[test]
    fn generator_is_valid() {
        let g = G2Projective::generator();
        assert!(g.validate().is_ok());
        assert!(g.is_torsion_free());
        assert_eq!(
            g.to_hex(true),
            "93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e\
             024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"
        );
    }

    #[test]
    fn psi_acts_on_g2_as_multiplication_by_p() {
        // on the prime-order subgroup psi is [p mod r] = [x], and psi2 = [x^2]
        let p = G2Projective::generator() * Scalar::from(0xdead_beefu64);
        assert_eq!(p.psi(), p.mul_by_x());
        assert_eq!(p.psi2(), p.mul_by_x().mul_by_x());
        assert_eq!(p.psi().psi(), p.psi2());
    }

    #[test]
    fn cofactor_clearing_matches_on_subgroup_points() {
        // h_eff * P for P already in G2 stays in G2
        let p = G2Projective::generator().double();
        let q = p.clear_cofactor();
        assert!(q.validate().is_ok());
        assert!(q.is_torsion_free());
        assert!(!bool::from(q.is_identity()));
    }
}
