//! BLS key material: private keys, group selectors and group-tagged points

use core::fmt;
use core::str::FromStr;

use dbls_algorithms::ec::bls12_381::{G1Projective, G2Projective, Scalar};
use dbls_params::traditional::bls12_381::{
    G1_COMPRESSED_SIZE, G1_UNCOMPRESSED_SIZE, G2_COMPRESSED_SIZE, G2_UNCOMPRESSED_SIZE,
    SCALAR_SIZE,
};
use log::warn;
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Most significant bit of the first encoded byte
const COMPRESSION_FLAG: u8 = 0x80;

/// Selects the group a public key or signature lives in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum KeyType {
    /// Points over the base field, 48 bytes compressed
    G1,
    /// Points over the quadratic extension, 96 bytes compressed
    G2,
}

impl KeyType {
    /// The other group. Signatures and public keys always sit on opposite sides.
    pub fn opposite(self) -> KeyType {
        match self {
            KeyType::G1 => KeyType::G2,
            KeyType::G2 => KeyType::G1,
        }
    }

    /// Length of a compressed point of this group
    pub fn compressed_size(self) -> usize {
        match self {
            KeyType::G1 => G1_COMPRESSED_SIZE,
            KeyType::G2 => G2_COMPRESSED_SIZE,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::G1 => f.write_str("g1"),
            KeyType::G2 => f.write_str("g2"),
        }
    }
}

impl FromStr for KeyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "g1" | "G1" => Ok(KeyType::G1),
            "g2" | "G2" => Ok(KeyType::G2),
            other => Err(Error::InvalidKeyType(other.to_string())),
        }
    }
}

/// A public key or signature: a point in either G1 or G2.
///
/// Which group is in use depends on the signature layout; every operation
/// that combines keys matches on the variants and rejects mixed groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A point in G1
    G1(G1Projective),
    /// A point in G2
    G2(G2Projective),
}

impl From<G1Projective> for Key {
    fn from(p: G1Projective) -> Self {
        Key::G1(p)
    }
}

impl From<G2Projective> for Key {
    fn from(p: G2Projective) -> Self {
        Key::G2(p)
    }
}

impl Key {
    /// The group this key lives in
    pub fn key_type(&self) -> KeyType {
        match self {
            Key::G1(_) => KeyType::G1,
            Key::G2(_) => KeyType::G2,
        }
    }

    /// The G1 point, if this is one
    pub fn as_g1(&self) -> Option<&G1Projective> {
        match self {
            Key::G1(p) => Some(p),
            Key::G2(_) => None,
        }
    }

    /// The G2 point, if this is one
    pub fn as_g2(&self) -> Option<&G2Projective> {
        match self {
            Key::G1(_) => None,
            Key::G2(p) => Some(p),
        }
    }

    /// Whether this is the point at infinity
    pub fn is_identity(&self) -> bool {
        match self {
            Key::G1(p) => bool::from(p.is_identity()),
            Key::G2(p) => bool::from(p.is_identity()),
        }
    }

    /// Check the point lies on its curve
    pub fn validate(&self) -> Result<()> {
        match self {
            Key::G1(p) => p.validate()?,
            Key::G2(p) => p.validate()?,
        }
        Ok(())
    }

    /// Serialize in the compressed or uncompressed encoding
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        match (self, compressed) {
            (Key::G1(p), true) => p.to_compressed().to_vec(),
            (Key::G1(p), false) => p.to_uncompressed().to_vec(),
            (Key::G2(p), true) => p.to_compressed().to_vec(),
            (Key::G2(p), false) => p.to_uncompressed().to_vec(),
        }
    }

    /// Hex string of [`to_bytes`](Self::to_bytes)
    pub fn to_hex(&self, compressed: bool) -> String {
        hex::encode(self.to_bytes(compressed))
    }

    /// Parse any of the four encodings, telling them apart by length.
    ///
    /// 96 bytes is either an uncompressed G1 point or a compressed G2 point;
    /// the compression flag decides.
    pub fn from_bytes(bytes: &[u8]) -> Result<Key> {
        let key_type = match bytes.len() {
            G1_COMPRESSED_SIZE => KeyType::G1,
            G2_UNCOMPRESSED_SIZE => KeyType::G2,
            G1_UNCOMPRESSED_SIZE if bytes[0] & COMPRESSION_FLAG != 0 => KeyType::G2,
            G1_UNCOMPRESSED_SIZE => KeyType::G1,
            len => {
                return Err(Error::InvalidKey(format!(
                    "no point encoding is {} bytes long",
                    len
                )))
            }
        };
        Self::from_bytes_as(key_type, bytes)
    }

    /// Parse an encoding of a point in the given group
    pub fn from_bytes_as(key_type: KeyType, bytes: &[u8]) -> Result<Key> {
        Ok(match key_type {
            KeyType::G1 => Key::G1(G1Projective::from_bytes(bytes)?),
            KeyType::G2 => Key::G2(G2Projective::from_bytes(bytes)?),
        })
    }

    /// Parse a hex string in any of the four encodings
    pub fn from_hex(s: &str) -> Result<Key> {
        Self::from_bytes(&hex::decode(s)?)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex(true))
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Key::from_hex(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex(true))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Key::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A BLS private key: a non-zero scalar modulo the group order.
///
/// Any integer is accepted on input and reduced modulo r; a value that
/// reduces to zero is rejected. The scalar is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    scalar: Scalar,
}

impl PrivateKey {
    /// Wrap a scalar, rejecting zero.
    ///
    /// Keys are reduced modulo the group order r, not the base field modulus.
    /// Public keys and signatures come out the same either way since both
    /// groups have order r, but a multiple of r is rejected here as zero.
    pub fn from_scalar(scalar: Scalar) -> Result<Self> {
        if bool::from(scalar.is_zero()) {
            warn!("rejected a private key that is zero modulo the group order");
            return Err(Error::ZeroPrivateKey);
        }
        Ok(PrivateKey { scalar })
    }

    /// Big-endian integer of any length, reduced modulo r
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_scalar(Scalar::from_be_bytes_mod(bytes))
    }

    /// Hex integer, with or without a `0x` prefix; odd lengths are allowed
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let padded = Zeroizing::new(if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        });
        let bytes = Zeroizing::new(hex::decode(padded.as_str())?);
        Self::from_bytes(&bytes)
    }

    /// Small integer key, mostly useful in tests
    pub fn from_u64(v: u64) -> Result<Self> {
        Self::from_scalar(Scalar::from_u64(v))
    }

    /// Sample a uniformly random non-zero key
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        loop {
            let scalar = Scalar::random(&mut *rng);
            if !bool::from(scalar.is_zero()) {
                return PrivateKey { scalar };
            }
        }
    }

    /// The canonical 32-byte big-endian encoding
    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_SIZE]> {
        Zeroizing::new(self.scalar.to_be_bytes())
    }

    /// The public key in the given group
    pub fn public_key(&self, key_type: KeyType) -> Result<Key> {
        super::get_public_key(self, key_type)
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.scalar.ct_eq(&other.scalar)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PrivateKey::from_hex(s)
    }
}
