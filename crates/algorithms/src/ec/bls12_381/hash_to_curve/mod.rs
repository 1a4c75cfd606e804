//! Hashing to G1 and G2 with the `XMD:SHA-256_SSWU_RO_` suites.
//!
//! `hash_to_curve(msg) = clear_cofactor(iso(sswu(u0)) + iso(sswu(u1)))`
//! where `(u0, u1) = hash_to_field(msg, 2)`. The simplified SWU map lands on a
//! curve isogenous to the target one and the isogeny carries the result
//! over; both steps work in projective coordinates so no inversion is
//! needed until the caller normalizes.

use log::trace;
use sha2::{Digest, Sha256};

use super::field::{Field, Fp, Fp2};
use super::point::{CurveField, G1Projective, G2Projective, ProjectivePoint};
use crate::error::{validate, Result};
use dbls_params::traditional::bls12_381::{
    DST_G1, DST_G2, HASH_TO_FIELD_L, MAX_DST_SIZE, XMD_MAX_BLOCKS,
};
use dbls_params::utils::hash::{SHA256_BLOCK_SIZE, SHA256_OUTPUT_SIZE};

mod map_g1;
mod map_g2;

/// `expand_message_xmd` with SHA-256.
///
/// Produces `len_in_bytes` uniformly distributed bytes from `msg` under the
/// domain separation tag `dst`. Tags longer than 255 bytes and outputs
/// needing more than 255 hash blocks are rejected.
pub fn expand_message_xmd(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>> {
    validate::max_length("hash_to_curve dst", dst.len(), MAX_DST_SIZE)?;
    let ell = (len_in_bytes + SHA256_OUTPUT_SIZE - 1) / SHA256_OUTPUT_SIZE;
    validate::parameter(
        ell <= XMD_MAX_BLOCKS,
        "len_in_bytes",
        "expand_message_xmd output longer than 255 blocks",
    )?;

    let dst_len = [dst.len() as u8];

    let b0 = Sha256::new()
        .chain_update([0u8; SHA256_BLOCK_SIZE])
        .chain_update(msg)
        .chain_update((len_in_bytes as u16).to_be_bytes())
        .chain_update([0u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut out = Vec::with_capacity(ell * SHA256_OUTPUT_SIZE);
    let mut bi = Sha256::new()
        .chain_update(b0)
        .chain_update([1u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();
    out.extend_from_slice(&bi);

    for i in 2..=ell {
        let mut mixed = [0u8; SHA256_OUTPUT_SIZE];
        for (m, (a, b)) in mixed.iter_mut().zip(b0.iter().zip(bi.iter())) {
            *m = a ^ b;
        }
        bi = Sha256::new()
            .chain_update(mixed)
            .chain_update([i as u8])
            .chain_update(dst)
            .chain_update(dst_len)
            .finalize();
        out.extend_from_slice(&bi);
    }

    out.truncate(len_in_bytes);
    Ok(out)
}

/// Field elements that can be drawn from `expand_message_xmd` output.
pub trait FromOkm: Sized {
    /// Extension degree over `Fp`
    const DEGREE: usize;

    /// Build one element from `DEGREE * 64` bytes.
    fn from_okm(okm: &[u8]) -> Self;
}

impl FromOkm for Fp {
    const DEGREE: usize = 1;

    fn from_okm(okm: &[u8]) -> Fp {
        Fp::from_be_bytes_mod(okm)
    }
}

impl FromOkm for Fp2 {
    const DEGREE: usize = 2;

    fn from_okm(okm: &[u8]) -> Fp2 {
        let (c0, c1) = okm.split_at(HASH_TO_FIELD_L);
        Fp2::new(Fp::from_be_bytes_mod(c0), Fp::from_be_bytes_mod(c1))
    }
}

/// Hash a message to `count` field elements, each built from
/// `DEGREE` chunks of 64 bytes reduced modulo p.
pub fn hash_to_field<F: FromOkm>(msg: &[u8], dst: &[u8], count: usize) -> Result<Vec<F>> {
    let chunk = F::DEGREE * HASH_TO_FIELD_L;
    let okm = expand_message_xmd(msg, dst, count * chunk)?;
    Ok(okm.chunks_exact(chunk).map(F::from_okm).collect())
}

/// Evaluate the isogeny `(x, y) -> (x_num / x_den, y * y_num / y_den)` on a
/// point given as `(x / z, y / z)`.
///
/// Each table lists the coefficients from the constant term upwards; the
/// two x tables share one length, as do the two y tables, so the homogenized
/// quotients stay consistent.
pub(crate) fn isogeny_map<F: CurveField>(
    x: F,
    y: F,
    z: F,
    x_num: &[F],
    x_den: &[F],
    y_num: &[F],
    y_den: &[F],
) -> ProjectivePoint<F> {
    let longest = x_num.len().max(y_num.len());
    let mut z_powers = Vec::with_capacity(longest);
    let mut zp = z;
    for _ in 0..longest {
        z_powers.push(zp);
        zp *= z;
    }

    let horner = |coeffs: &[F]| {
        let (last, rest) = match coeffs.split_last() {
            Some(split) => split,
            None => return F::zero(),
        };
        rest.iter()
            .rev()
            .zip(z_powers.iter())
            .fold(*last, |acc, (a, zp)| acc * x + *zp * *a)
    };

    let xn = horner(x_num);
    let xd = horner(x_den);
    let yn = horner(y_num) * y;
    let yd = horner(y_den) * z;

    ProjectivePoint::from_raw_coordinates(xn * yd, xd * yn, xd * yd)
}

/// Hashing arbitrary messages onto a curve group.
pub trait HashToCurve: Sized {
    /// Field element type fed to the map
    type Element: FromOkm;

    /// Domain separation tag used by [`hash_to_curve`](Self::hash_to_curve)
    const DEFAULT_DST: &'static [u8];

    /// Map one field element to the curve, without clearing the cofactor
    fn map_to_curve(u: &Self::Element) -> Result<Self>;

    /// Send a curve point into the prime-order subgroup
    fn clear_cofactor(&self) -> Self;

    /// Hash with a caller supplied domain separation tag
    fn hash_to_curve_with_dst(msg: &[u8], dst: &[u8]) -> Result<Self>;

    /// Hash with the default domain separation tag
    fn hash_to_curve(msg: &[u8]) -> Result<Self> {
        Self::hash_to_curve_with_dst(msg, Self::DEFAULT_DST)
    }
}

fn hash_with<F: CurveField>(msg: &[u8], dst: &[u8]) -> Result<ProjectivePoint<F>>
where
    ProjectivePoint<F>: HashToCurve,
{
    trace!("{}: hash_to_curve over {} message bytes", F::GROUP, msg.len());
    let u = hash_to_field::<<ProjectivePoint<F> as HashToCurve>::Element>(msg, dst, 2)?;
    let q0 = <ProjectivePoint<F> as HashToCurve>::map_to_curve(&u[0])?;
    let q1 = <ProjectivePoint<F> as HashToCurve>::map_to_curve(&u[1])?;
    Ok(HashToCurve::clear_cofactor(&(q0 + q1)))
}

impl HashToCurve for G1Projective {
    type Element = Fp;
    const DEFAULT_DST: &'static [u8] = DST_G1;

    fn map_to_curve(u: &Fp) -> Result<Self> {
        map_g1::map_to_curve(u)
    }

    fn clear_cofactor(&self) -> Self {
        G1Projective::clear_cofactor(self)
    }

    fn hash_to_curve_with_dst(msg: &[u8], dst: &[u8]) -> Result<Self> {
        hash_with(msg, dst)
    }
}

impl HashToCurve for G2Projective {
    type Element = Fp2;
    const DEFAULT_DST: &'static [u8] = DST_G2;

    fn map_to_curve(u: &Fp2) -> Result<Self> {
        map_g2::map_to_curve(u)
    }

    fn clear_cofactor(&self) -> Self {
        G2Projective::clear_cofactor(self)
    }

    fn hash_to_curve_with_dst(msg: &[u8], dst: &[u8]) -> Result<Self> {
        hash_with(msg, dst)
    }
}
