//! Loads the BLS test vectors from JSON files.
//!
//! Points are stored as compressed hex and decoded through the `serde`
//! support of [`Key`]; private keys and messages stay hex strings and are
//! decoded on demand.

use std::fs;
use std::path::{Path, PathBuf};

use dbls_sign::{Key, PrivateKey};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or decoding vectors
#[derive(Debug, Error)]
pub enum VectorError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    Sign(#[from] dbls_sign::Error),
}

/// One deterministic signature
#[derive(Debug, Clone, Deserialize)]
pub struct SignVector {
    pub private_key: String,
    pub message: String,
    #[serde(default)]
    pub public_key: Option<Key>,
    pub signature: Key,
}

impl SignVector {
    pub fn private_key(&self) -> Result<PrivateKey, VectorError> {
        Ok(PrivateKey::from_hex(&self.private_key)?)
    }

    pub fn message(&self) -> Result<Vec<u8>, VectorError> {
        Ok(hex::decode(&self.message)?)
    }
}

/// A verification case with its expected outcome
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyVector {
    pub id: u32,
    pub comment: String,
    pub signature: Key,
    pub message: String,
    pub public_key: Key,
    pub valid: bool,
}

impl VerifyVector {
    pub fn message(&self) -> Result<Vec<u8>, VectorError> {
        Ok(hex::decode(&self.message)?)
    }
}

/// Several signers over one message, with the expected sums
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateVector {
    pub message: String,
    pub private_keys: Vec<String>,
    pub public_key: Key,
    pub signature: Key,
}

impl AggregateVector {
    pub fn private_keys(&self) -> Result<Vec<PrivateKey>, VectorError> {
        self.private_keys
            .iter()
            .map(|k| PrivateKey::from_hex(k).map_err(VectorError::from))
            .collect()
    }

    pub fn message(&self) -> Result<Vec<u8>, VectorError> {
        Ok(hex::decode(&self.message)?)
    }
}

#[derive(Debug, Deserialize)]
struct SignFile {
    g2_signatures: Vec<SignVector>,
    g1_signatures: Vec<SignVector>,
    g1_signature_known_answer: Vec<SignVector>,
    aggregate: Vec<AggregateVector>,
}

#[derive(Debug, Deserialize)]
struct VerifyFile {
    cases: Vec<VerifyVector>,
}

fn vectors_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("vectors")
        .join("json")
}

/// Read and parse one fixture file
pub fn load<T: DeserializeOwned>(name: &str) -> Result<T, VectorError> {
    let path = vectors_dir().join(name);
    let display = path.display().to_string();
    let json = fs::read_to_string(&path).map_err(|source| VectorError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| VectorError::Json {
        path: display,
        source,
    })
}

static SIGN_FILE: Lazy<SignFile> =
    Lazy::new(|| load("bls_sign.json").unwrap_or_else(|e| panic!("{}", e)));

static VERIFY_FILE: Lazy<VerifyFile> =
    Lazy::new(|| load("bls_verify.json").unwrap_or_else(|e| panic!("{}", e)));

/// Signatures in G2 with public keys in G1
pub fn g2_signature_vectors() -> &'static [SignVector] {
    &SIGN_FILE.g2_signatures
}

/// Signatures in G1 with public keys in G2
pub fn g1_signature_vectors() -> &'static [SignVector] {
    &SIGN_FILE.g1_signatures
}

/// Long-message G1 signature without a public key
pub fn known_answer_vectors() -> &'static [SignVector] {
    &SIGN_FILE.g1_signature_known_answer
}

pub fn aggregate_vectors() -> &'static [AggregateVector] {
    &SIGN_FILE.aggregate
}

/// Verification cases, both valid and invalid
pub fn verify_vectors() -> &'static [VerifyVector] {
    &VERIFY_FILE.cases
}
