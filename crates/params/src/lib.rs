//! Constant values for dbls cryptographic operations
//!
//! This crate provides the constants shared across the dbls crates: encoding
//! sizes, curve parameters and domain separation tags.

#![no_std]

pub mod traditional;
pub mod utils;
