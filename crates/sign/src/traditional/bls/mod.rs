//! BLS signatures on BLS12-381
//!
//! A signature is `sk * H(m)`, where `H` hashes the message into one group
//! and the public key `sk * G` sits in the other. Verification checks
//!
//! ```text
//! e(pk, H(m)) * e(-G, sig) == 1
//! ```
//!
//! with both Miller loops sharing one final exponentiation. Signatures and
//! public keys over the same message add up, so an aggregate of many
//! signatures can be checked against the sum of the public keys, and
//! [`verify_batch`] checks one aggregate over many messages.
//!
//! Both layouts are supported. With `sig_type = G2` the public key is in G1
//! (the "minimal public key" layout); with `sig_type = G1` it is in G2.

use std::borrow::Cow;

use dbls_algorithms::ec::bls12_381::{
    multi_miller_loop, Fp, Fp12, Fp2, G1Projective, G2Prepared, G2Projective, HashToCurve,
    PrecomputedPoint,
};
use log::{debug, trace, warn};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};

mod keys;
mod scheme;


pub use keys::{Key, KeyType, PrivateKey};
pub use scheme::{BlsMinPk, BlsMinSig};

/// Window width of the cached generator tables
const GENERATOR_WINDOW: usize = 8;

static G1_GENERATOR: Lazy<PrecomputedPoint<Fp>> = Lazy::new(|| {
    let g = G1Projective::generator();
    g.with_precomputed_window(GENERATOR_WINDOW)
        .unwrap_or_else(|_| PrecomputedPoint::new(g))
});

static G2_GENERATOR: Lazy<PrecomputedPoint<Fp2>> = Lazy::new(|| {
    let g = G2Projective::generator();
    g.with_precomputed_window(GENERATOR_WINDOW)
        .unwrap_or_else(|_| PrecomputedPoint::new(g))
});

/// Line coefficients of the G2 generator, shared by every G1 signature check
static G2_GENERATOR_PREPARED: Lazy<G2Prepared> =
    Lazy::new(|| G2Prepared::new(G2Projective::generator()));

/// Hash a message into the group selected by `key_type`
fn hash_message(message: &[u8], key_type: KeyType) -> Result<Key> {
    Ok(match key_type {
        KeyType::G1 => Key::G1(G1Projective::hash_to_curve(message)?),
        KeyType::G2 => Key::G2(G2Projective::hash_to_curve(message)?),
    })
}

/// Sign `message`, producing a point in the `sig_type` group.
///
/// Signing is deterministic. The public key that verifies the result is
/// `get_public_key(private_key, sig_type.opposite())`.
pub fn sign(message: &[u8], private_key: &PrivateKey, sig_type: KeyType) -> Result<Key> {
    trace!("signing {} message bytes into {}", message.len(), sig_type);
    let sk = private_key.scalar();
    Ok(match hash_message(message, sig_type)? {
        Key::G1(h) => Key::G1(h.multiply(sk)?),
        Key::G2(h) => Key::G2(h.multiply(sk)?),
    })
}

/// The public key `sk * G` in the `key_type` group
pub fn get_public_key(private_key: &PrivateKey, key_type: KeyType) -> Result<Key> {
    let sk = private_key.scalar();
    Ok(match key_type {
        KeyType::G1 => Key::G1(G1_GENERATOR.multiply(sk)?),
        KeyType::G2 => Key::G2(G2_GENERATOR.multiply(sk)?),
    })
}

/// One pairing term: a G1 point against a prepared G2 point
type Term = (G1Projective, Cow<'static, G2Prepared>);

/// Pairing terms for the public key side and the signature side.
///
/// The signature term pairs `-G` with the signature, so a valid signature
/// makes the product of all terms equal to one after the final
/// exponentiation.
fn signature_term(signature: &Key) -> Term {
    match signature {
        // e(-G1, sig)
        Key::G2(sig) => (
            -G1Projective::generator(),
            Cow::Owned(G2Prepared::new(*sig)),
        ),
        // e(-sig, G2); the generator's lines come from the shared cache
        Key::G1(sig) => (-*sig, Cow::Borrowed(&*G2_GENERATOR_PREPARED)),
    }
}

fn message_term(hashed: Key, public_key: Key) -> Result<Term> {
    match (public_key, hashed) {
        (Key::G1(pk), Key::G2(h)) => Ok((pk, Cow::Owned(G2Prepared::new(h)))),
        (Key::G2(pk), Key::G1(h)) => Ok((h, Cow::Owned(G2Prepared::new(pk)))),
        _ => Err(Error::MixedGroups {
            context: "verify",
        }),
    }
}

/// Multiply the Miller loops of all terms, exponentiate once and compare
/// against one.
fn product_is_one(terms: &[Term]) -> Result<bool> {
    let refs: Vec<(&G1Projective, &G2Prepared)> =
        terms.iter().map(|(p, q)| (p, q.as_ref())).collect();
    let f: Fp12 = multi_miller_loop(&refs)?;
    Ok(bool::from(f.final_exponentiation()?.is_one()))
}

/// Check that both keys are on their curves and that neither is the point
/// at infinity, which has no pairing.
fn check_pairing_input(key: &Key) -> Result<()> {
    key.validate()?;
    if key.is_identity() {
        return Err(dbls_algorithms::Error::Pairing {
            details: "pairing with the point at infinity",
        }
        .into());
    }
    Ok(())
}

/// Verify `signature` over `message` against `public_key`.
///
/// The two keys must be in opposite groups. Returns `Ok(false)` for a
/// well-formed signature that does not match, and an error for inputs
/// that cannot be paired at all.
pub fn verify(signature: &Key, message: &[u8], public_key: &Key) -> Result<bool> {
    if signature.key_type() == public_key.key_type() {
        return Err(Error::MixedGroups { context: "verify" });
    }
    check_pairing_input(signature)?;
    check_pairing_input(public_key)?;

    let hashed = hash_message(message, signature.key_type())?;
    let terms = [message_term(hashed, *public_key)?, signature_term(signature)];
    let valid = product_is_one(&terms)?;
    debug!(
        "{} signature over {} message bytes: {}",
        signature.key_type(),
        message.len(),
        if valid { "valid" } else { "invalid" }
    );
    Ok(valid)
}

/// Sum a non-empty list of points from one group
fn aggregate(keys: &[Key], context: &'static str) -> Result<Key> {
    let (first, rest) = match keys.split_first() {
        Some(split) => split,
        None => {
            warn!("{}: called with an empty list", context);
            return Err(Error::EmptyInput { context });
        }
    };

    let mut acc = match first {
        Key::G1(_) => Key::G1(G1Projective::identity()),
        Key::G2(_) => Key::G2(G2Projective::identity()),
    };
    for key in core::iter::once(first).chain(rest) {
        acc = match (acc, key) {
            (Key::G1(a), Key::G1(b)) => Key::G1(a + b),
            (Key::G2(a), Key::G2(b)) => Key::G2(a + b),
            _ => return Err(Error::MixedGroups { context }),
        };
    }
    trace!("{}: summed {} {} points", context, keys.len(), acc.key_type());
    Ok(acc)
}

/// Sum public keys from one group.
///
/// The result verifies an aggregate of signatures that all cover the same
/// message.
pub fn aggregate_public_keys(public_keys: &[Key]) -> Result<Key> {
    aggregate(public_keys, "aggregate_public_keys")
}

/// Sum signatures from one group
pub fn aggregate_signatures(signatures: &[Key]) -> Result<Key> {
    aggregate(signatures, "aggregate_signatures")
}

/// Verify an aggregate signature over `messages[i]` signed by the holder of
/// `public_keys[i]`.
///
/// Entries with byte-identical messages share one pairing term with the sum
/// of their public keys, so repeated messages are allowed. The whole batch
/// is checked with a single final exponentiation.
pub fn verify_batch<M: AsRef<[u8]>>(
    signature: &Key,
    messages: &[M],
    public_keys: &[Key],
) -> Result<bool> {
    if messages.is_empty() || public_keys.is_empty() {
        warn!("verify_batch: called with an empty batch");
        return Err(Error::EmptyInput {
            context: "verify_batch",
        });
    }
    if messages.len() != public_keys.len() {
        return Err(Error::LengthMismatch {
            messages: messages.len(),
            public_keys: public_keys.len(),
        });
    }
    let pk_type = signature.key_type().opposite();
    if public_keys.iter().any(|pk| pk.key_type() != pk_type) {
        return Err(Error::MixedGroups {
            context: "verify_batch",
        });
    }
    check_pairing_input(signature)?;
    for pk in public_keys {
        pk.validate()?;
    }

    // Group the public keys by message, keeping first-seen order
    let mut groups: Vec<(&[u8], Key)> = Vec::new();
    for (message, pk) in messages.iter().zip(public_keys) {
        let message = message.as_ref();
        match groups.iter_mut().find(|(m, _)| *m == message) {
            Some((_, sum)) => *sum = aggregate(&[*sum, *pk], "verify_batch")?,
            None => groups.push((message, *pk)),
        }
    }

    let mut terms = Vec::with_capacity(groups.len() + 1);
    for (message, pk_sum) in groups {
        let hashed = hash_message(message, signature.key_type())?;
        terms.push(message_term(hashed, pk_sum)?);
    }
    terms.push(signature_term(signature));

    let valid = product_is_one(&terms)?;
    debug!(
        "batch of {} entries over {} distinct messages: {}",
        messages.len(),
        terms.len() - 1,
        if valid { "valid" } else { "invalid" }
    );
    Ok(valid)
}
