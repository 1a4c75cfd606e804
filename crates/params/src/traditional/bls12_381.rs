//! Constants for BLS12-381 and BLS signatures over it

/// Size of a serialized base field element in bytes
pub const FIELD_ELEMENT_SIZE: usize = 48;

/// Size of a serialized scalar in bytes
pub const SCALAR_SIZE: usize = 32;

/// Size of a compressed G1 point in bytes
pub const G1_COMPRESSED_SIZE: usize = 48;

/// Size of an uncompressed G1 point in bytes
pub const G1_UNCOMPRESSED_SIZE: usize = 96;

/// Size of a compressed G2 point in bytes
pub const G2_COMPRESSED_SIZE: usize = 96;

/// Size of an uncompressed G2 point in bytes
pub const G2_UNCOMPRESSED_SIZE: usize = 192;

/// Absolute value of the curve parameter x
pub const BLS_X: u64 = 0xd201_0000_0001_0000;

/// The curve parameter x is negative
pub const BLS_X_IS_NEGATIVE: bool = true;

/// Effective G1 cofactor `1 - x`
pub const G1_H_EFF: u64 = 0xd201_0000_0001_0001;

/// Bit length of the base field modulus; the largest scalar accepted by
/// point multiplication
pub const MAX_SCALAR_BITS: usize = 381;

/// Smallest wNAF window width
pub const MIN_WINDOW: usize = 1;

/// Largest wNAF window width
pub const MAX_WINDOW: usize = 16;

/// Bytes drawn per field element by hash_to_field (`ceil((381 + 128) / 8)`)
pub const HASH_TO_FIELD_L: usize = 64;

/// Maximum number of hash blocks expand_message_xmd may produce
pub const XMD_MAX_BLOCKS: usize = 255;

/// Maximum length of a domain separation tag in bytes
pub const MAX_DST_SIZE: usize = 255;

/// Domain separation tag for signatures in G1 (public keys in G2)
pub const DST_G1: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Domain separation tag for signatures in G2 (public keys in G1)
pub const DST_G2: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";
