//! Signature schemes over classical elliptic curves

pub mod bls;
