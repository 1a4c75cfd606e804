//! BLS12-381 pairing-friendly elliptic curve implementation.
//!
//! The field tower lives in [`field`], the scalar field in [`Scalar`]. Points
//! on both groups share one projective type, [`ProjectivePoint`], which is
//! generic over the coordinate field; [`G1Projective`] and [`G2Projective`]
//! are its two instantiations.
//!
//! **Warning:** Unaudited implementation. Use at your own risk.

#[macro_use]
mod util;

pub mod field;
mod g1;
mod g2;
mod hash_to_curve;
mod pairing;
mod point;
mod scalar;
mod wnaf;

#[cfg(test)]
mod tests;

pub use field::{batch_invert, Field, Fp, Fp12, Fp2, Fp6};
pub use hash_to_curve::{expand_message_xmd, hash_to_field, FromOkm, HashToCurve};
pub use pairing::{miller_loop, multi_miller_loop, pairing, G2Prepared};
pub use point::{CurveField, G1Projective, G2Projective, ProjectivePoint};
pub use scalar::Scalar;
pub use wnaf::{PrecomputedPoint, ScalarLike};

/// BLS parameter x = -0xd201000000010000
pub(crate) const BLS_X: u64 = dbls_params::traditional::bls12_381::BLS_X;
/// Sign of BLS parameter x
pub(crate) const BLS_X_IS_NEGATIVE: bool = dbls_params::traditional::bls12_381::BLS_X_IS_NEGATIVE;
