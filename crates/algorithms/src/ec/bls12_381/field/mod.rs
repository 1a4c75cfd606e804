//! The BLS12-381 base field and its extension tower
//!
//! `Fp` is the prime field. `Fp2 = Fp[u]/(u^2 + 1)`, `Fp6 = Fp2[v]/(v^3 - (u + 1))`
//! and `Fp12 = Fp6[w]/(w^2 - v)`. Every level implements [`Field`], which is
//! what the generic point and window code is written against.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::error::{Error, Result};

pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp6;

/// Arithmetic shared by every field in the tower and by the scalar field.
///
/// Inversion is constant time and reports a zero input through the
/// returned `CtOption`. Exponentiation is variable time in the exponent.
pub trait Field:
    Sized
    + Copy
    + Debug
    + Default
    + Eq
    + ConstantTimeEq
    + ConditionallySelectable
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Whether this is the additive identity
    fn is_zero(&self) -> Choice;

    /// Square this element
    fn square(&self) -> Self;

    /// Double this element
    fn double(&self) -> Self {
        *self + *self
    }

    /// Multiplicative inverse, `None` for zero
    fn invert(&self) -> CtOption<Self>;

    /// Sample a uniformly distributed element
    fn random(rng: impl RngCore) -> Self;

    /// Raise to the power given as little-endian 64-bit limbs.
    ///
    /// Any base raised to zero is one.
    fn pow_vartime(&self, exp: &[u64]) -> Self {
        let mut res = Self::one();
        for e in exp.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res *= *self;
                }
            }
        }
        res
    }

    /// `self / rhs`, failing when `rhs` is zero
    fn divide(&self, rhs: &Self) -> Result<Self> {
        Option::<Self>::from(rhs.invert())
            .map(|inv| *self * inv)
            .ok_or(Error::Field {
                operation: "divide",
                details: "division by zero",
            })
    }

    /// Variable-time zero test
    fn is_zero_vartime(&self) -> bool {
        bool::from(self.is_zero())
    }
}

/// Invert every non-zero element of `values` in place with a single field
/// inversion. Zero entries are left as zero.
pub fn batch_invert<F: Field>(values: &mut [F]) {
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = F::one();
    for v in values.iter() {
        prefix.push(acc);
        if !v.is_zero_vartime() {
            acc *= *v;
        }
    }

    // acc is a product of non-zero elements, so the inverse exists
    let mut inv = Option::<F>::from(acc.invert()).unwrap_or_else(F::zero);
    for (v, before) in values.iter_mut().zip(prefix.into_iter()).rev() {
        if v.is_zero_vartime() {
            continue;
        }
        let next = inv * *v;
        *v = inv * before;
        inv = next;
    }
}

pub use fp::Fp;
pub use fp12::Fp12;
pub use fp2::Fp2;
pub use fp6::Fp6;
