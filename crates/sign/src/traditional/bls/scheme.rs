//! `dbls_api::Signature` implementations for the two BLS layouts

use dbls_api::{
    error::Error as ApiError, Result as ApiResult, ResultExt, Signature as SignatureTrait,
    SignatureSerialize,
};
use dbls_params::traditional::bls12_381::{G1_COMPRESSED_SIZE, G2_COMPRESSED_SIZE, SCALAR_SIZE};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use super::{get_public_key, sign, verify, Key, KeyType, PrivateKey};

/// BLS with public keys in G1 and signatures in G2
///
/// Public keys are 48 bytes and signatures 96 bytes compressed. This is the
/// layout used by Ethereum consensus clients.
pub struct BlsMinPk;

/// BLS with public keys in G2 and signatures in G1
///
/// Signatures are 48 bytes and public keys 96 bytes compressed.
pub struct BlsMinSig;

fn expect_length(context: &'static str, bytes: &[u8], expected: usize) -> ApiResult<()> {
    if bytes.len() != expected {
        return Err(ApiError::InvalidLength {
            context,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn decode_point(context: &'static str, key_type: KeyType, bytes: &[u8]) -> ApiResult<Key> {
    expect_length(context, bytes, key_type.compressed_size())?;
    Key::from_bytes_as(key_type, bytes).with_context(context)
}

fn decode_secret_key(bytes: &[u8]) -> ApiResult<PrivateKey> {
    expect_length("BLS secret key", bytes, SCALAR_SIZE)?;
    let sk = PrivateKey::from_bytes(bytes)?;
    // reduction would silently accept encodings of values >= r
    if sk.to_bytes().as_slice() != bytes {
        return Err(ApiError::InvalidKey {
            context: "BLS secret key",
            message: "scalar is not below the group order".to_string(),
        });
    }
    Ok(sk)
}

macro_rules! bls_scheme {
    ($scheme:ident, $name:expr, $sig_type:expr, $pk_size:expr, $sig_size:expr) => {
        impl SignatureTrait for $scheme {
            type PublicKey = Key;
            type SecretKey = PrivateKey;
            type SignatureData = Key;
            type KeyPair = (Key, PrivateKey);

            fn name() -> &'static str {
                $name
            }

            fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
                let secret_key = PrivateKey::random(rng);
                let public_key = get_public_key(&secret_key, $sig_type.opposite())?;
                Ok((public_key, secret_key))
            }

            fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
                keypair.0
            }

            fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
                keypair.1.clone()
            }

            fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
                Ok(sign(message, secret_key, $sig_type)?)
            }

            fn verify(
                message: &[u8],
                signature: &Self::SignatureData,
                public_key: &Self::PublicKey,
            ) -> ApiResult<()> {
                if signature.key_type() != $sig_type {
                    return Err(ApiError::InvalidSignature {
                        context: $name,
                        message: format!("expected a {} signature", $sig_type),
                    });
                }
                if verify(signature, message, public_key)? {
                    Ok(())
                } else {
                    Err(ApiError::InvalidSignature {
                        context: $name,
                        message: "signature does not match message and public key".to_string(),
                    })
                }
            }
        }

        impl SignatureSerialize for $scheme {
            const PUBLIC_KEY_SIZE: usize = $pk_size;
            const SECRET_KEY_SIZE: usize = SCALAR_SIZE;
            const SIGNATURE_SIZE: usize = $sig_size;

            fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8> {
                key.to_bytes(true)
            }

            fn deserialize_public_key(bytes: &[u8]) -> ApiResult<Self::PublicKey> {
                decode_point("BLS public key", $sig_type.opposite(), bytes)
            }

            fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>> {
                Zeroizing::new(key.to_bytes().to_vec())
            }

            fn deserialize_secret_key(bytes: &[u8]) -> ApiResult<Self::SecretKey> {
                decode_secret_key(bytes)
            }

            fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8> {
                sig.to_bytes(true)
            }

            fn deserialize_signature(bytes: &[u8]) -> ApiResult<Self::SignatureData> {
                decode_point("BLS signature", $sig_type, bytes)
            }
        }
    };
}

bls_scheme!(
    BlsMinPk,
    "BLS-MinPk",
    KeyType::G2,
    G1_COMPRESSED_SIZE,
    G2_COMPRESSED_SIZE
);
bls_scheme!(
    BlsMinSig,
    "BLS-MinSig",
    KeyType::G1,
    G2_COMPRESSED_SIZE,
    G1_COMPRESSED_SIZE
);
