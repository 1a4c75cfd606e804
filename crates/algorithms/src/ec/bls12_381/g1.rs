//! G₁ group implementation for BLS12-381.
//!
//! Points are `G1Projective` over `Fp` on `y^2 = x^3 + 4`. Encodings follow
//! the ZCash/IETF layout: big-endian coordinates with three flag bits in the
//! most significant bits of the first byte.

use subtle::{Choice, CtOption};

use super::field::Fp;
use super::point::{CurveField, ProjectivePoint};
use crate::error::{validate, Error, Result};
use dbls_params::traditional::bls12_381::{
    G1_COMPRESSED_SIZE, G1_H_EFF, G1_UNCOMPRESSED_SIZE, MAX_SCALAR_BITS,
};

/// Most significant bit of the first byte: compressed encoding
pub(crate) const COMPRESSION_FLAG: u8 = 1 << 7;
/// Second bit: point at infinity
pub(crate) const INFINITY_FLAG: u8 = 1 << 6;
/// Third bit: y is the lexicographically largest root
pub(crate) const SIGN_FLAG: u8 = 1 << 5;

/// Curve constant b = 4
pub const B: Fp = Fp::from_u64(4);

const GENERATOR_X: Fp = Fp::from_raw_unchecked([
    0x5cb3_8790_fd53_0c16,
    0x7817_fc67_9976_fff5,
    0x154f_95c7_143b_a1c1,
    0xf0ae_6acd_f3d0_e747,
    0xedce_6ecc_21db_f440,
    0x1201_7741_9e0b_fb75,
]);

const GENERATOR_Y: Fp = Fp::from_raw_unchecked([
    0xbaac_93d5_0ce7_2271,
    0x8c22_631a_7918_fd8e,
    0xdd59_5f13_5707_25ce,
    0x51ac_5829_5040_5194,
    0x0e1c_8c3f_ad00_59c0,
    0x0bbc_3efc_5008_a26a,
]);

impl CurveField for Fp {
    const GROUP: &'static str = "G1";
    const MAX_BITS: usize = MAX_SCALAR_BITS;

    fn curve_b() -> Fp {
        B
    }

    fn generator() -> (Fp, Fp) {
        (GENERATOR_X, GENERATOR_Y)
    }

    fn sqrt(&self) -> CtOption<Fp> {
        Fp::sqrt(self)
    }

    fn lexicographically_largest(&self) -> Choice {
        Fp::lexicographically_largest(self)
    }
}

/// Split the flag bits off the first byte.
pub(crate) struct Flags {
    pub(crate) compressed: bool,
    pub(crate) infinity: bool,
    pub(crate) sign: bool,
}

impl Flags {
    pub(crate) fn read(first: u8) -> Flags {
        Flags {
            compressed: first & COMPRESSION_FLAG != 0,
            infinity: first & INFINITY_FLAG != 0,
            sign: first & SIGN_FLAG != 0,
        }
    }
}

/// An infinity encoding must carry nothing but the flag bits.
pub(crate) fn check_infinity_payload(bytes: &[u8], flags: &Flags, op: &'static str) -> Result<()> {
    validate::point(!flags.sign, op, "sign flag set on the point at infinity")?;
    let payload_is_zero = (bytes[0] & 0b0001_1111) == 0 && bytes[1..].iter().all(|b| *b == 0);
    validate::point(payload_is_zero, op, "non-zero payload for the point at infinity")
}

/// Decode one big-endian field element, masking the flag bits when asked.
pub(crate) fn read_fp(chunk: &[u8], mask_flags: bool, op: &'static str) -> Result<Fp> {
    let mut tmp = [0u8; 48];
    tmp.copy_from_slice(chunk);
    if mask_flags {
        tmp[0] &= 0b0001_1111;
    }
    Option::from(Fp::from_bytes(&tmp)).ok_or(Error::Point {
        operation: op,
        details: "coordinate is not below the field modulus",
    })
}

impl ProjectivePoint<Fp> {
    /// Serialize to 48 bytes: x with the compression, infinity and sign flags.
    pub fn to_compressed(&self) -> [u8; G1_COMPRESSED_SIZE] {
        match self.to_affine() {
            Err(_) => {
                let mut res = [0u8; G1_COMPRESSED_SIZE];
                res[0] = COMPRESSION_FLAG | INFINITY_FLAG;
                res
            }
            Ok((x, y)) => {
                let mut res = x.to_bytes();
                res[0] |= COMPRESSION_FLAG;
                if bool::from(y.lexicographically_largest()) {
                    res[0] |= SIGN_FLAG;
                }
                res
            }
        }
    }

    /// Serialize to 96 bytes: x then y.
    pub fn to_uncompressed(&self) -> [u8; G1_UNCOMPRESSED_SIZE] {
        let mut res = [0u8; G1_UNCOMPRESSED_SIZE];
        match self.to_affine() {
            Err(_) => res[0] = INFINITY_FLAG,
            Ok((x, y)) => {
                res[0..48].copy_from_slice(&x.to_bytes());
                res[48..96].copy_from_slice(&y.to_bytes());
            }
        }
        res
    }

    /// Parse a compressed encoding, recovering y from the sign flag.
    ///
    /// The point is checked against the curve but not against the subgroup.
    pub fn from_compressed(bytes: &[u8; G1_COMPRESSED_SIZE]) -> Result<Self> {
        const OP: &str = "G1 from_compressed";
        let flags = Flags::read(bytes[0]);
        validate::point(flags.compressed, OP, "compression flag not set")?;

        if flags.infinity {
            check_infinity_payload(bytes, &flags, OP)?;
            return Ok(Self::identity());
        }

        let x = read_fp(bytes, true, OP)?;
        let y = Option::<Fp>::from((x.square() * x + B).sqrt()).ok_or(Error::Point {
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
    pub fn from_uncompressed(bytes: &[u8; G1_UNCOMPRESSED_SIZE]) -> Result<Self> {
        const OP: &str = "G1 from_uncompressed";
        let flags = Flags::read(bytes[0]);
        validate::point(!flags.compressed, OP, "compression flag set")?;

        if flags.infinity {
            check_infinity_payload(bytes, &flags, OP)?;
            return Ok(Self::identity());
        }
        validate::point(!flags.sign, OP, "sign flag set")?;

        let x = read_fp(&bytes[0..48], true, OP)?;
        let y = read_fp(&bytes[48..96], false, OP)?;
        let p = Self::from_affine(x, y);
        p.validate()?;
        Ok(p)
    }

    /// Parse either encoding, chosen by length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if let Ok(b) = <&[u8; G1_COMPRESSED_SIZE]>::try_from(bytes) {
            Self::from_compressed(b)
        } else if let Ok(b) = <&[u8; G1_UNCOMPRESSED_SIZE]>::try_from(bytes) {
            Self::from_uncompressed(b)
        } else {
            Err(Error::Length {
                context: "G1 point encoding",
                expected: G1_COMPRESSED_SIZE,
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

    /// Map an arbitrary curve point into G1 by multiplying with the
    /// effective cofactor `1 - x`.
    pub fn clear_cofactor(&self) -> Self {
        self.mul_by_limbs_vartime(&[G1_H_EFF])
    }
}
