//! Optimal ate pairing on BLS12-381.
//!
//! The G2 side of the Miller loop only depends on the G2 point, so its line
//! coefficients are computed once per [`G2Prepared`] and reused by every
//! loop run against it. The G1 side plugs its affine coordinates into those
//! lines as sparse `Fp12` multiplications.

use log::{debug, trace};
use once_cell::sync::OnceCell;

use super::field::{Field, Fp, Fp12, Fp2};
use super::g2::B as B2;
use super::point::{G1Projective, G2Projective};
use super::{BLS_X, BLS_X_IS_NEGATIVE};
use crate::error::{Error, Result};

/// Coefficients `(a, b, c)` of one line, evaluated at `P` as
/// `a + b * px * v + c * py * vw`
type LineCoeffs = (Fp2, Fp2, Fp2);

/// 1/2 in Montgomery form
const TWO_INV: Fp = Fp::from_raw_unchecked([
    0x1804_0000_0001_5554,
    0x8550_0005_3ab0_0001,
    0x633c_b57c_253c_276f,
    0x6e22_d1ec_31eb_b502,
    0xd391_6126_f2d1_4ca2,
    0x17fb_b857_1a00_6596,
]);

fn triple(a: &Fp2) -> Fp2 {
    a.double() + a
}

fn half(a: &Fp2) -> Fp2 {
    a.mul_by_fp(&TWO_INV)
}

/// A G2 point together with its lazily computed Miller loop lines.
///
/// The cell is initialized at most once, even when shared across threads.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    point: G2Projective,
    coeffs: OnceCell<Vec<LineCoeffs>>,
}

impl From<G2Projective> for G2Prepared {
    fn from(point: G2Projective) -> Self {
        G2Prepared::new(point)
    }
}

impl G2Prepared {
    /// Wrap a point; no lines are computed until first use
    pub fn new(point: G2Projective) -> Self {
        G2Prepared {
            point,
            coeffs: OnceCell::new(),
        }
    }

    /// The wrapped point
    pub fn point(&self) -> &G2Projective {
        &self.point
    }

    /// Whether the line coefficients have been computed
    pub fn has_pairing_precomputes(&self) -> bool {
        self.coeffs.get().is_some()
    }

    /// Line coefficients for the Miller loop, computed on first call.
    ///
    /// There is one triple per loop bit plus one per set bit of `|x|`
    /// below the leading one.
    pub fn line_coefficients(&self) -> Result<&[LineCoeffs]> {
        self.coeffs
            .get_or_try_init(|| {
                let (qx, qy) = self.point.to_affine().map_err(|_| Error::Pairing {
                    details: "line coefficients of the point at infinity",
                })?;
                let coeffs = compute_lines(&qx, &qy);
                debug!("G2: computed {} Miller loop line coefficients", coeffs.len());
                Ok(coeffs)
            })
            .map(Vec::as_slice)
    }

    /// Drop the cached line coefficients
    pub fn clear_pairing_precomputes(&mut self) {
        if self.coeffs.take().is_some() {
            debug!("G2: cleared Miller loop line coefficients");
        }
    }
}

fn doubling_step(r: &mut (Fp2, Fp2, Fp2)) -> LineCoeffs {
    let (rx, ry, rz) = *r;
    let t0 = ry.square();
    let t1 = rz.square();
    let t2 = triple(&t1) * B2;
    let t3 = triple(&t2);
    let t4 = (ry + rz).square() - t1 - t0;

    let line = (t2 - t0, triple(&rx.square()), -t4);

    let h = half(&(t0 + t3));
    *r = (
        half(&((t0 - t3) * rx * ry)),
        h.square() - triple(&t2.square()),
        t0 * t4,
    );
    line
}

fn addition_step(r: &mut (Fp2, Fp2, Fp2), qx: &Fp2, qy: &Fp2) -> LineCoeffs {
    let (rx, ry, rz) = *r;
    let t0 = ry - *qy * rz;
    let t1 = rx - *qx * rz;

    let line = (t0 * qx - t1 * qy, -t0, t1);

    let t2 = t1.square();
    let t3 = t2 * t1;
    let t4 = t2 * rx;
    let t5 = t3 - t4.double() + t0.square() * rz;
    *r = (t1 * t5, (t4 - t5) * t0 - t3 * ry, rz * t3);
    line
}

fn compute_lines(qx: &Fp2, qy: &Fp2) -> Vec<LineCoeffs> {
    let mut r = (*qx, *qy, Fp2::one());
    let mut lines = Vec::with_capacity(68);
    for i in (0..63).rev() {
        lines.push(doubling_step(&mut r));
        if (BLS_X >> i) & 1 == 1 {
            lines.push(addition_step(&mut r, qx, qy));
        }
    }
    lines
}

fn evaluate_line(f: Fp12, line: &LineCoeffs, px: &Fp, py: &Fp) -> Fp12 {
    f.mul_by_014(&line.0, &line.1.mul_by_fp(px), &line.2.mul_by_fp(py))
}

/// Product of the Miller loops of several pairs, sharing the squarings.
///
/// The result still has to go through the final exponentiation.
pub fn multi_miller_loop(terms: &[(&G1Projective, &G2Prepared)]) -> Result<Fp12> {
    let mut evaluated = Vec::with_capacity(terms.len());
    for (p, q) in terms {
        let (px, py) = p.to_affine().map_err(|_| Error::Pairing {
            details: "Miller loop at the point at infinity",
        })?;
        evaluated.push((px, py, q.line_coefficients()?));
    }

    let mut f = Fp12::one();
    let mut j = 0;
    for i in (0..63).rev() {
        for (px, py, lines) in &evaluated {
            f = evaluate_line(f, &lines[j], px, py);
        }
        if (BLS_X >> i) & 1 == 1 {
            j += 1;
            for (px, py, lines) in &evaluated {
                f = evaluate_line(f, &lines[j], px, py);
            }
        }
        if i != 0 {
            f = f.square();
        }
        j += 1;
    }

    Ok(if BLS_X_IS_NEGATIVE { f.conjugate() } else { f })
}

/// Miller loop of a single pair
pub fn miller_loop(p: &G1Projective, q: &G2Prepared) -> Result<Fp12> {
    multi_miller_loop(&[(p, q)])
}

/// Compute `e(p, q)`.
///
/// Both points must be on their curves and neither may be the point at
/// infinity. With `with_final_exponent` unset the raw Miller loop output is
/// returned, so that several of them can be multiplied before a single
/// final exponentiation.
pub fn pairing(p: &G1Projective, q: &G2Projective, with_final_exponent: bool) -> Result<Fp12> {
    if bool::from(p.is_identity() | q.is_identity()) {
        return Err(Error::Pairing {
            details: "pairing with the point at infinity",
        });
    }
    p.validate()?;
    q.validate()?;
    trace!("pairing, final exponent: {}", with_final_exponent);

    let f = miller_loop(p, &G2Prepared::new(*q))?;
    if with_final_exponent {
        f.final_exponentiation()
    } else {
        Ok(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_inv_halves() {
        assert_eq!(TWO_INV + TWO_INV, Fp::one());
    }

    #[test]
    fn line_count_follows_loop_parameter() {
        let q = G2Prepared::new(G2Projective::generator());
        let expected = 63 + (BLS_X.count_ones() as usize - 1);
        assert_eq!(q.line_coefficients().unwrap().len(), expected);
    }

    #[test]
    fn precomputes_are_cached_and_cleared() {
        let mut q = G2Prepared::from(G2Projective::generator());
        assert!(!q.has_pairing_precomputes());
        let first = q.line_coefficients().unwrap().to_vec();
        assert!(q.has_pairing_precomputes());
        q.clear_pairing_precomputes();
        assert!(!q.has_pairing_precomputes());
        assert_eq!(q.line_coefficients().unwrap(), first.as_slice());
    }

    #[test]
    fn infinity_is_rejected() {
        let g1 = G1Projective::generator();
        let g2 = G2Projective::generator();
        assert!(matches!(
            pairing(&G1Projective::identity(), &g2, true),
            Err(Error::Pairing { .. })
        ));
        assert!(matches!(
            pairing(&g1, &G2Projective::identity(), true),
            Err(Error::Pairing { .. })
        ));
        let prepared = G2Prepared::new(G2Projective::identity());
        assert!(prepared.line_coefficients().is_err());
    }

    #[test]
    fn generators_pair_to_non_trivial_element() {
        let e = pairing(&G1Projective::generator(), &G2Projective::generator(), true).unwrap();
        assert!(!bool::from(e.is_one()));
    }
}
