//! Elliptic curve primitives
//!
//! Only the pairing-friendly BLS12-381 curve is implemented.

pub mod bls12_381;
