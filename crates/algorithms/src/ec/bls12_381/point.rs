//! Projective points on `y^2 = x^3 + b`, generic over the coordinate field.
//!
//! G1 uses coordinates in `Fp` with `b = 4`, G2 uses coordinates in `Fp2`
//! with `b = 4(u + 1)`. Everything that does not depend on the field lives
//! here; serialization and the endomorphisms live in `g1` and `g2`.
//!
//! Coordinates are homogeneous: `(X : Y : Z)` stands for the affine point
//! `(X/Z, Y/Z)`, and `Z = 0` is the point at infinity.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use log::trace;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::{batch_invert, Field, Fp, Fp2};
use super::scalar::Scalar;
use super::wnaf::{self, PrecomputedPoint, ScalarLike};
use crate::error::{validate, Error, Result};

/// Coordinate field of one of the two curve groups.
///
/// Carries the curve constants so that [`ProjectivePoint`] can be written
/// once for both groups.
pub trait CurveField: Field {
    /// Group name used in error messages and logs
    const GROUP: &'static str;

    /// Bit length of the base field modulus; the largest scalar accepted by
    /// [`ProjectivePoint::multiply`]
    const MAX_BITS: usize;

    /// The constant `b` in `y^2 = x^3 + b`
    fn curve_b() -> Self;

    /// Affine coordinates of the fixed group generator
    fn generator() -> (Self, Self);

    /// Square root, if one exists
    fn sqrt(&self) -> CtOption<Self>;

    /// Whether this element is larger than its negation
    fn lexicographically_largest(&self) -> Choice;
}

/// A point in homogeneous projective coordinates.
#[derive(Clone, Copy)]
pub struct ProjectivePoint<F> {
    pub(crate) x: F,
    pub(crate) y: F,
    pub(crate) z: F,
}

/// Points of the group G1, over `Fp`
pub type G1Projective = ProjectivePoint<Fp>;

/// Points of the group G2, over `Fp2`
pub type G2Projective = ProjectivePoint<Fp2>;

impl<F: CurveField> ProjectivePoint<F> {
    /// The point at infinity, `(1 : 1 : 0)`
    pub fn identity() -> Self {
        ProjectivePoint {
            x: F::one(),
            y: F::one(),
            z: F::zero(),
        }
    }

    /// The fixed generator of the group
    pub fn generator() -> Self {
        let (x, y) = F::generator();
        Self::from_affine(x, y)
    }

    /// Lift affine coordinates. The result is not checked against the curve;
    /// use [`validate`](Self::validate) for untrusted input.
    pub fn from_affine(x: F, y: F) -> Self {
        ProjectivePoint { x, y, z: F::one() }
    }

    /// Build a point from raw projective coordinates without validation.
    pub(crate) const fn from_raw_coordinates(x: F, y: F, z: F) -> Self {
        ProjectivePoint { x, y, z }
    }

    /// Projective X coordinate
    pub fn x(&self) -> &F {
        &self.x
    }

    /// Projective Y coordinate
    pub fn y(&self) -> &F {
        &self.y
    }

    /// Projective Z coordinate
    pub fn z(&self) -> &F {
        &self.z
    }

    /// Returns true if this element is the identity (the point at infinity).
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Affine coordinates `(x, y)`. The point at infinity has none.
    pub fn to_affine(&self) -> Result<(F, F)> {
        let zinv = Option::<F>::from(self.z.invert()).ok_or(Error::Point {
            operation: "to_affine",
            details: "point at infinity has no affine coordinates",
        })?;
        Ok((self.x * zinv, self.y * zinv))
    }

    /// Rescale every point to `Z = 1` with a single inversion.
    ///
    /// Points at infinity are returned as [`identity`](Self::identity).
    pub fn batch_normalize(points: &[Self]) -> Vec<Self> {
        let mut zs: Vec<F> = points.iter().map(|p| p.z).collect();
        batch_invert(&mut zs);
        points
            .iter()
            .zip(zs)
            .map(|(p, zinv)| {
                if p.z.is_zero_vartime() {
                    Self::identity()
                } else {
                    Self::from_affine(p.x * zinv, p.y * zinv)
                }
            })
            .collect()
    }

    /// Whether `y^2 z = x^3 + b z^3`. The point at infinity is on the curve.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square() * self.z - self.x.square() * self.x;
        let rhs = F::curve_b() * self.z.square() * self.z;
        lhs.ct_eq(&rhs) | self.z.is_zero()
    }

    /// Fail with a point error unless the point lies on the curve.
    pub fn validate(&self) -> Result<()> {
        validate::point(
            bool::from(self.is_on_curve()),
            "validate",
            "point is not on the curve",
        )
    }

    /// Whether the point lies in the prime-order subgroup, checked by
    /// multiplying with the group order.
    pub fn is_torsion_free(&self) -> bool {
        let order = Scalar::MODULUS_LIMBS;
        bool::from(self.mul_by_limbs_vartime(&order).is_identity())
    }

    /// Computes the doubling of this point.
    pub fn double(&self) -> Self {
        let w = self.x.square() * F::from_small(3);
        let s = self.y * self.z;
        let ss = s.square();
        let sss = ss * s;
        let b = self.x * self.y * s;
        let h = w.square() - b.double().double().double();

        let x3 = (h * s).double();
        let y3 = w * (b.double().double() - h) - (self.y.square() * ss).double().double().double();
        let z3 = sss.double().double().double();

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Adds this point to another point.
    ///
    /// Handles the point at infinity on either side, equal inputs (by
    /// doubling) and opposite inputs (returning the identity).
    pub fn add(&self, rhs: &Self) -> Self {
        if bool::from(self.is_identity()) {
            return *rhs;
        }
        if bool::from(rhs.is_identity()) {
            return *self;
        }

        let u1 = rhs.y * self.z;
        let u2 = self.y * rhs.z;
        let v1 = rhs.x * self.z;
        let v2 = self.x * rhs.z;

        if v1 == v2 {
            return if u1 == u2 {
                self.double()
            } else {
                Self::identity()
            };
        }

        let u = u1 - u2;
        let v = v1 - v2;
        let vv = v.square();
        let vvv = vv * v;
        let v2vv = v2 * vv;
        let w = self.z * rhs.z;
        let a = u.square() * w - vvv - v2vv.double();

        ProjectivePoint {
            x: v * a,
            y: u * (v2vv - a) - vvv * u2,
            z: vvv * w,
        }
    }

    /// Double-and-add over little-endian limbs. Not constant time; only
    /// for public scalars. A zero scalar yields the identity.
    pub(crate) fn mul_by_limbs_vartime(&self, limbs: &[u64]) -> Self {
        let mut acc = Self::identity();
        let mut d = *self;
        for limb in limbs {
            for i in 0..64 {
                if (limb >> i) & 1 == 1 {
                    acc = acc.add(&d);
                }
                d = d.double();
            }
        }
        acc
    }

    /// Plain double-and-add. Not constant time: only for public scalars such
    /// as the curve parameter or the group order.
    pub fn multiply_unsafe(&self, scalar: impl ScalarLike) -> Result<Self> {
        validate::point(
            scalar.bit_length() > 0,
            "multiply_unsafe",
            "scalar must be a positive integer",
        )?;
        Ok(self.mul_by_limbs_vartime(&scalar.to_limbs()))
    }

    /// Scalar multiplication by the windowed NAF method with window width 1.
    ///
    /// The scalar must be positive and no wider than the base field.
    pub fn multiply(&self, scalar: impl ScalarLike) -> Result<Self> {
        let limbs = wnaf::checked_limbs::<F>(&scalar)?;
        let table = wnaf::precompute_window(self, 1);
        Ok(wnaf::wnaf_multiply(&table, 1, &limbs, F::MAX_BITS))
    }

    /// Wrap this point together with a window table of width `w`, for
    /// repeated multiplication of the same base.
    ///
    /// The table holds [`PrecomputedPoint::table_len`] points, which roughly
    /// doubles with each step of `w`; a G2 table at `w = 16` needs about
    /// 230 MB.
    pub fn with_precomputed_window(&self, w: usize) -> Result<PrecomputedPoint<F>> {
        trace!("{}: building wNAF table with window {}", F::GROUP, w);
        let mut point = PrecomputedPoint::new(*self);
        point.calc_multiply_precomputes(w)?;
        Ok(point)
    }
}

/// Small-integer lift used by the point formulas.
trait FromSmall {
    fn from_small(v: u64) -> Self;
}

impl<F: Field> FromSmall for F {
    fn from_small(v: u64) -> Self {
        let mut acc = F::zero();
        let mut base = F::one();
        let mut v = v;
        while v > 0 {
            if v & 1 == 1 {
                acc += base;
            }
            base = base.double();
            v >>= 1;
        }
        acc
    }
}

impl<F: CurveField> fmt::Debug for ProjectivePoint<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_affine() {
            Ok((x, y)) => write!(f, "{}({:?}, {:?})", F::GROUP, x, y),
            Err(_) => write!(f, "{}(infinity)", F::GROUP),
        }
    }
}

impl<F: CurveField> fmt::Display for ProjectivePoint<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<F: CurveField> Default for ProjectivePoint<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: CurveField> ConstantTimeEq for ProjectivePoint<F> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let x1 = self.x * other.z;
        let x2 = other.x * self.z;
        let y1 = self.y * other.z;
        let y2 = other.y * self.z;
        let self_is_zero = self.z.is_zero();
        let other_is_zero = other.z.is_zero();

        (self_is_zero & other_is_zero)
            | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }
}

impl<F: CurveField> ConditionallySelectable for ProjectivePoint<F> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            x: F::conditional_select(&a.x, &b.x, choice),
            y: F::conditional_select(&a.y, &b.y, choice),
            z: F::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<F: CurveField> Eq for ProjectivePoint<F> {}
impl<F: CurveField> PartialEq for ProjectivePoint<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a, F: CurveField> Neg for &'a ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;

    #[inline]
    fn neg(self) -> ProjectivePoint<F> {
        ProjectivePoint {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<F: CurveField> Neg for ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;

    #[inline]
    fn neg(self) -> ProjectivePoint<F> {
        -&self
    }
}

impl<'a, 'b, F: CurveField> Add<&'b ProjectivePoint<F>> for &'a ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;

    #[inline]
    fn add(self, rhs: &'b ProjectivePoint<F>) -> ProjectivePoint<F> {
        ProjectivePoint::add(self, rhs)
    }
}

impl<'a, 'b, F: CurveField> Sub<&'b ProjectivePoint<F>> for &'a ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;

    #[inline]
    fn sub(self, rhs: &'b ProjectivePoint<F>) -> ProjectivePoint<F> {
        self + &(-rhs)
    }
}

impl<'b, F: CurveField> Add<&'b ProjectivePoint<F>> for ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn add(self, rhs: &'b ProjectivePoint<F>) -> ProjectivePoint<F> {
        &self + rhs
    }
}
impl<'a, F: CurveField> Add<ProjectivePoint<F>> for &'a ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn add(self, rhs: ProjectivePoint<F>) -> ProjectivePoint<F> {
        self + &rhs
    }
}
impl<F: CurveField> Add<ProjectivePoint<F>> for ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn add(self, rhs: ProjectivePoint<F>) -> ProjectivePoint<F> {
        &self + &rhs
    }
}
impl<'b, F: CurveField> Sub<&'b ProjectivePoint<F>> for ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn sub(self, rhs: &'b ProjectivePoint<F>) -> ProjectivePoint<F> {
        &self - rhs
    }
}
impl<'a, F: CurveField> Sub<ProjectivePoint<F>> for &'a ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn sub(self, rhs: ProjectivePoint<F>) -> ProjectivePoint<F> {
        self - &rhs
    }
}
impl<F: CurveField> Sub<ProjectivePoint<F>> for ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn sub(self, rhs: ProjectivePoint<F>) -> ProjectivePoint<F> {
        &self - &rhs
    }
}
impl<F: CurveField> AddAssign<ProjectivePoint<F>> for ProjectivePoint<F> {
    #[inline]
    fn add_assign(&mut self, rhs: ProjectivePoint<F>) {
        *self = &*self + &rhs;
    }
}
impl<'b, F: CurveField> AddAssign<&'b ProjectivePoint<F>> for ProjectivePoint<F> {
    #[inline]
    fn add_assign(&mut self, rhs: &'b ProjectivePoint<F>) {
        *self = &*self + rhs;
    }
}
impl<F: CurveField> SubAssign<ProjectivePoint<F>> for ProjectivePoint<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: ProjectivePoint<F>) {
        *self = &*self - &rhs;
    }
}
impl<'b, F: CurveField> SubAssign<&'b ProjectivePoint<F>> for ProjectivePoint<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: &'b ProjectivePoint<F>) {
        *self = &*self - rhs;
    }
}

// Multiplying by a `Scalar` cannot fail: it is reduced below r, and zero maps
// to the identity instead of an error.
impl<'a, 'b, F: CurveField> Mul<&'b Scalar> for &'a ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;

    fn mul(self, rhs: &'b Scalar) -> ProjectivePoint<F> {
        self.multiply(rhs).unwrap_or_else(|_| ProjectivePoint::identity())
    }
}

impl<'b, F: CurveField> Mul<&'b Scalar> for ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn mul(self, rhs: &'b Scalar) -> ProjectivePoint<F> {
        &self * rhs
    }
}
impl<F: CurveField> Mul<Scalar> for ProjectivePoint<F> {
    type Output = ProjectivePoint<F>;
    #[inline]
    fn mul(self, rhs: Scalar) -> ProjectivePoint<F> {
        &self * &rhs
    }
}

impl<T, F: CurveField> Sum<T> for ProjectivePoint<F>
where
    T: Borrow<ProjectivePoint<F>>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_on_curve_and_absorbs() {
        let g = G1Projective::generator();
        let zero = G1Projective::identity();
        assert!(bool::from(zero.is_on_curve()));
        assert_eq!(g + zero, g);
        assert_eq!(zero + g, g);
        assert!(bool::from((g - g).is_identity()));
        assert!(zero.to_affine().is_err());
    }

    #[test]
    fn equality_ignores_representative() {
        let g = G2Projective::generator();
        let k = Fp2::from_i64s(7, -3);
        let scaled = ProjectivePoint::from_raw_coordinates(g.x * k, g.y * k, g.z * k);
        assert_eq!(g, scaled);
        assert_ne!(g, -scaled);
    }

    #[test]
    fn small_lift() {
        assert_eq!(Fp::from_small(0), Fp::zero());
        assert_eq!(Fp::from_small(3), Fp::from_u64(3));
        assert_eq!(Fp2::from_small(12), Fp2::from(Fp::from_u64(12)));
    }

    #[test]
    fn batch_normalize_keeps_identity() {
        let g = G1Projective::generator();
        let points = [g.double(), G1Projective::identity(), g.double().add(&g)];
        let normalized = G1Projective::batch_normalize(&points);
        assert_eq!(normalized[0], points[0]);
        assert!(bool::from(normalized[1].is_identity()));
        assert_eq!(normalized[2], points[2]);
        assert_eq!(normalized[0].z, Fp::one());
    }
}
