//! BLS12-381 arithmetic for the dbls library
//!
//! This crate provides the building blocks the signature layer is written
//! against: the base field tower up to `Fp12`, the scalar field, the two
//! curve groups with windowed scalar multiplication and point encodings,
//! hashing to both groups, and the optimal ate pairing.
//!
//! # Security
//!
//! Field arithmetic and point addition do not branch on secret data, and
//! windowed multiplication does the same amount of work for every digit.
//! Variable-time routines are named as such and only used with public
//! inputs. The implementation has not been audited.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Elliptic curve primitives
pub mod ec;
pub use ec::bls12_381::{
    expand_message_xmd, hash_to_field, multi_miller_loop, pairing, Fp, Fp12, Fp2, G1Projective,
    G2Prepared, G2Projective, HashToCurve, PrecomputedPoint, Scalar,
};
