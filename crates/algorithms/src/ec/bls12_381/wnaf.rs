//! Windowed NAF scalar multiplication.
//!
//! A table for window width `w` holds, for each of the
//! `ceil(MAX_BITS / w) + 1` windows, the multiples `1..=2^(w-1)` of
//! `2^(w * window) * P`. Digits are recentred into `[-2^(w-1), 2^(w-1)]`,
//! so each window costs one table lookup and one addition. Windows with a
//! zero digit add into a separate accumulator that is thrown away, keeping
//! the amount of work independent of the digit pattern.

use log::debug;

use super::field::Fp;
use super::point::{CurveField, ProjectivePoint};
use super::scalar::Scalar;
use crate::error::{validate, Error, Result};
use dbls_params::traditional::bls12_381::{MAX_WINDOW, MIN_WINDOW};

/// Anything that can serve as a non-negative integer multiplier.
pub trait ScalarLike {
    /// The integer as six little-endian limbs. Wider values are truncated;
    /// callers check [`bit_length`](Self::bit_length) first.
    fn to_limbs(&self) -> [u64; 6];

    /// Number of significant bits
    fn bit_length(&self) -> usize {
        limbs_bit_length(&self.to_limbs())
    }
}

pub(crate) fn limbs_bit_length(limbs: &[u64]) -> usize {
    limbs
        .iter()
        .enumerate()
        .rev()
        .find(|(_, l)| **l != 0)
        .map(|(i, l)| i * 64 + (64 - l.leading_zeros() as usize))
        .unwrap_or(0)
}

impl<T: ScalarLike + ?Sized> ScalarLike for &T {
    fn to_limbs(&self) -> [u64; 6] {
        (**self).to_limbs()
    }

    fn bit_length(&self) -> usize {
        (**self).bit_length()
    }
}

impl ScalarLike for Scalar {
    fn to_limbs(&self) -> [u64; 6] {
        let raw = self.to_raw();
        [raw[0], raw[1], raw[2], raw[3], 0, 0]
    }
}

impl ScalarLike for Fp {
    fn to_limbs(&self) -> [u64; 6] {
        self.to_raw()
    }
}

impl ScalarLike for u64 {
    fn to_limbs(&self) -> [u64; 6] {
        [*self, 0, 0, 0, 0, 0]
    }
}

impl ScalarLike for u128 {
    fn to_limbs(&self) -> [u64; 6] {
        [*self as u64, (*self >> 64) as u64, 0, 0, 0, 0]
    }
}

impl<const N: usize> ScalarLike for [u64; N] {
    fn to_limbs(&self) -> [u64; 6] {
        let mut out = [0u64; 6];
        for (o, l) in out.iter_mut().zip(self.iter()) {
            *o = *l;
        }
        out
    }

    fn bit_length(&self) -> usize {
        limbs_bit_length(self)
    }
}

/// Reject zero and over-wide scalars, returning the limbs otherwise.
pub(crate) fn checked_limbs<F: CurveField>(scalar: &impl ScalarLike) -> Result<[u64; 6]> {
    let bits = scalar.bit_length();
    validate::point(bits > 0, "multiply", "scalar must be a positive integer")?;
    validate::point(
        bits <= F::MAX_BITS,
        "multiply",
        "scalar is wider than the base field",
    )?;
    Ok(scalar.to_limbs())
}

fn window_count(max_bits: usize, w: usize) -> usize {
    (max_bits + w - 1) / w + 1
}

/// Build the unnormalized multiples table for window width `w`.
pub(crate) fn precompute_window<F: CurveField>(
    point: &ProjectivePoint<F>,
    w: usize,
) -> Vec<ProjectivePoint<F>> {
    let windows = window_count(F::MAX_BITS, w);
    let window_size = 1usize << (w - 1);
    let mut points = Vec::with_capacity(windows * window_size);
    let mut p = *point;
    for _ in 0..windows {
        let mut base = p;
        points.push(base);
        for _ in 1..window_size {
            base = base.add(&p);
            points.push(base);
        }
        p = base.double();
    }
    points
}

/// Shift a little-endian limb vector right by `w < 64` bits.
fn shr_limbs(n: &mut [u64; 7], w: usize) {
    for i in 0..n.len() {
        let hi = if i + 1 < n.len() { n[i + 1] << (64 - w) } else { 0 };
        n[i] = (n[i] >> w) | hi;
    }
}

fn inc_limbs(n: &mut [u64; 7]) {
    for limb in n.iter_mut() {
        let (v, carry) = limb.overflowing_add(1);
        *limb = v;
        if !carry {
            break;
        }
    }
}

/// Walk the scalar window by window against a table built with width `w`.
pub(crate) fn wnaf_multiply<F: CurveField>(
    table: &[ProjectivePoint<F>],
    w: usize,
    scalar: &[u64; 6],
    max_bits: usize,
) -> ProjectivePoint<F> {
    let windows = window_count(max_bits, w);
    let window_size = 1u64 << (w - 1);
    let mask = (1u64 << w) - 1;
    let max_number = 1i64 << w;

    let mut n = [0u64; 7];
    n[..6].copy_from_slice(scalar);

    let mut p = ProjectivePoint::<F>::identity();
    let mut f = ProjectivePoint::<F>::identity();

    for window in 0..windows {
        let offset = window * window_size as usize;
        let mut wbits = (n[0] & mask) as i64;
        shr_limbs(&mut n, w);

        if wbits > window_size as i64 {
            wbits -= max_number;
            inc_limbs(&mut n);
        }

        if wbits == 0 {
            let cached = &table[offset];
            f = if window % 2 == 1 {
                f - cached
            } else {
                f + cached
            };
        } else {
            let cached = &table[offset + wbits.unsigned_abs() as usize - 1];
            p = if wbits < 0 { p - cached } else { p + cached };
        }
    }

    p
}

/// A point bundled with its own wNAF window table.
///
/// The table is owned here rather than by the point, so plain points stay
/// immutable values. Without a table, multiplication falls back to width 1.
#[derive(Clone, Debug)]
pub struct PrecomputedPoint<F: CurveField> {
    point: ProjectivePoint<F>,
    table: Option<(usize, Vec<ProjectivePoint<F>>)>,
}

impl<F: CurveField> PrecomputedPoint<F> {
    /// Wrap a point with no table yet
    pub fn new(point: ProjectivePoint<F>) -> Self {
        PrecomputedPoint { point, table: None }
    }

    /// The base point
    pub fn point(&self) -> &ProjectivePoint<F> {
        &self.point
    }

    /// Window width in use; 1 when no table has been built
    pub fn window(&self) -> usize {
        self.table.as_ref().map(|(w, _)| *w).unwrap_or(1)
    }

    /// Whether a table is present
    pub fn has_precomputes(&self) -> bool {
        self.table.is_some()
    }

    /// Number of points in a table of width `w`: `(ceil(MAX_BITS / w) + 1) * 2^(w-1)`.
    ///
    /// Memory grows almost as `2^w`. A G2 table at the widest window,
    /// 16, holds `25 * 2^15` points, around 230 MB; at width 8 it is under
    /// 2 MB. Widths outside the accepted range give 0.
    pub fn table_len(w: usize) -> usize {
        if !(MIN_WINDOW..=MAX_WINDOW).contains(&w) {
            return 0;
        }
        window_count(F::MAX_BITS, w) << (w - 1)
    }

    /// Build and keep the table for window width `w`, normalized to `Z = 1`.
    ///
    /// Fails if a table already exists; clear it first.
    pub fn calc_multiply_precomputes(&mut self, w: usize) -> Result<()> {
        if self.table.is_some() {
            return Err(Error::point(
                "calc_multiply_precomputes",
                "point already has precomputes",
            ));
        }
        validate::parameter(
            (MIN_WINDOW..=MAX_WINDOW).contains(&w),
            "window",
            "window width must be between 1 and 16",
        )?;

        let table = ProjectivePoint::batch_normalize(&precompute_window(&self.point, w));
        debug!(
            "{}: built wNAF table, window {}, {} points",
            F::GROUP,
            w,
            table.len()
        );
        self.table = Some((w, table));
        Ok(())
    }

    /// Drop the table
    pub fn clear_multiply_precomputes(&mut self) {
        if self.table.take().is_some() {
            debug!("{}: cleared wNAF table", F::GROUP);
        }
    }

    /// Multiply the base point, using the table when present.
    pub fn multiply(&self, scalar: impl ScalarLike) -> Result<ProjectivePoint<F>> {
        let limbs = checked_limbs::<F>(&scalar)?;
        match &self.table {
            Some((w, table)) => Ok(wnaf_multiply(table, *w, &limbs, F::MAX_BITS)),
            None => self.point.multiply(limbs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::bls12_381::{Fp2, G1Projective, G2Projective};

    #[test]
    fn bit_lengths() {
        assert_eq!(0u64.bit_length(), 0);
        assert_eq!(1u64.bit_length(), 1);
        assert_eq!((1u128 << 100).bit_length(), 101);
        assert_eq!([0u64, 0, 0, 0, 0, 0, 1].bit_length(), 385);
        assert_eq!((-Scalar::one()).bit_length(), 255);
    }

    #[test]
    fn table_layout() {
        let g = G1Projective::generator();
        let table = precompute_window(&g, 4);
        // 96 + 1 windows of 8 multiples
        assert_eq!(table.len(), 97 * 8);
        assert_eq!(table[0], g);
        assert_eq!(table[7], g.multiply_unsafe(8u64).unwrap());
        assert_eq!(table[8], g.multiply_unsafe(16u64).unwrap());
    }

    #[test]
    fn table_sizes() {
        assert_eq!(PrecomputedPoint::<Fp>::table_len(4), 97 * 8);
        assert_eq!(PrecomputedPoint::<Fp>::table_len(1), 382);
        assert_eq!(PrecomputedPoint::<Fp>::table_len(17), 0);
        assert_eq!(PrecomputedPoint::<Fp2>::table_len(16), 25 << 15);
        let p = G2Projective::generator().with_precomputed_window(5).unwrap();
        assert_eq!(
            p.table.as_ref().map(|(_, t)| t.len()),
            Some(PrecomputedPoint::<Fp2>::table_len(5))
        );
    }

    #[test]
    fn rejects_bad_scalars_and_windows() {
        let g = G1Projective::generator();
        assert!(g.multiply(0u64).is_err());
        assert!(g.multiply([0u64, 0, 0, 0, 0, 0, 1]).is_err());
        assert!(g.with_precomputed_window(0).is_err());
        assert!(g.with_precomputed_window(17).is_err());
    }

    #[test]
    fn precomputes_lifecycle() {
        let g = G2Projective::generator();
        let mut p = g.with_precomputed_window(4).unwrap();
        assert_eq!(p.window(), 4);
        assert!(p.calc_multiply_precomputes(5).is_err());

        let k = 0x1234_5678_9abc_def0_u64;
        let expected = g.multiply_unsafe(k).unwrap();
        assert_eq!(p.multiply(k).unwrap(), expected);

        p.clear_multiply_precomputes();
        assert!(!p.has_precomputes());
        assert_eq!(p.window(), 1);
        assert_eq!(p.multiply(k).unwrap(), expected);

        p.calc_multiply_precomputes(5).unwrap();
        assert_eq!(p.multiply(k).unwrap(), expected);
    }

    #[test]
    fn top_window_carry_is_kept() {
        // all-ones in the top window forces a borrow out of the last
        // regular window
        let g = G1Projective::generator();
        let k: [u64; 6] = [
            0xffff_ffff_ffff_ffff,
            0xffff_ffff_ffff_ffff,
            0xffff_ffff_ffff_ffff,
            0xffff_ffff_ffff_ffff,
            0xffff_ffff_ffff_ffff,
            0x1fff_ffff_ffff_ffff,
        ];
        let expected = g.multiply_unsafe(k).unwrap();
        for w in [1usize, 4, 5, 8] {
            let p = g.with_precomputed_window(w).unwrap();
            assert_eq!(p.multiply(k).unwrap(), expected, "window {}", w);
        }
    }
}
