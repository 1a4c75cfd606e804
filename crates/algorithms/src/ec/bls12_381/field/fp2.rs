//! Quadratic extension `Fp2 = Fp[u] / (u^2 + 1)`

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::Field;

/// (p^2 + 8) / 16, the candidate root exponent for p^2 = 9 mod 16
const SQRT_EXP: [u64; 12] = [
    0xb26a_a000_01c7_18e4,
    0xd7ce_d6b1_d763_82ea,
    0x3162_c338_3621_13cf,
    0x966b_f91e_d3e7_1b74,
    0xb292_e85a_8709_1a04,
    0x11d6_8619_c861_85c7,
    0xef53_1493_3097_8ef0,
    0x050a_62cf_d16d_dca6,
    0x466e_59e4_9349_e8bd,
    0x9e2d_c90e_50e7_046b,
    0x74bd_278e_aa22_f25e,
    0x002a_437a_4b8c_35fc,
];

/// The eighth roots of unity, `ROOTS_OF_UNITY[k] = z^k` for a primitive `z`
/// so that `ROOTS_OF_UNITY[k]^2 = ROOTS_OF_UNITY[2k mod 8]`.
pub(crate) const ROOTS_OF_UNITY: [Fp2; 8] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x7609_0000_0002_fffd,
            0xebf4_000b_c40c_0002,
            0x5f48_9857_53c7_58ba,
            0x77ce_5853_7052_5745,
            0x5c07_1a97_a256_ec6d,
            0x15f6_5ec3_fa80_e493,
        ]),
        c1: Fp::from_raw_unchecked([
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x7bcf_a7a2_5aa3_0fda,
            0xdc17_dec1_2a92_7e7c,
            0x2f08_8dd8_6b4e_bef1,
            0xd1ca_2087_da74_d4a7,
            0x2da2_5966_96ce_bc1d,
            0x0e2b_7eed_bbfd_87d2,
        ]),
        c1: Fp::from_raw_unchecked([
            0x3e2f_585d_a55c_9ad1,
            0x4294_213d_86c1_8183,
            0x3828_44c8_8b62_3732,
            0x92ad_2afd_1910_3e18,
            0x1d79_4e4f_ac7c_f0b9,
            0x0bd5_92fc_7d82_5ec8,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
        ]),
        c1: Fp::from_raw_unchecked([
            0x7609_0000_0002_fffd,
            0xebf4_000b_c40c_0002,
            0x5f48_9857_53c7_58ba,
            0x77ce_5853_7052_5745,
            0x5c07_1a97_a256_ec6d,
            0x15f6_5ec3_fa80_e493,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x7bcf_a7a2_5aa3_0fda,
            0xdc17_dec1_2a92_7e7c,
            0x2f08_8dd8_6b4e_bef1,
            0xd1ca_2087_da74_d4a7,
            0x2da2_5966_96ce_bc1d,
            0x0e2b_7eed_bbfd_87d2,
        ]),
        c1: Fp::from_raw_unchecked([
            0x7bcf_a7a2_5aa3_0fda,
            0xdc17_dec1_2a92_7e7c,
            0x2f08_8dd8_6b4e_bef1,
            0xd1ca_2087_da74_d4a7,
            0x2da2_5966_96ce_bc1d,
            0x0e2b_7eed_bbfd_87d2,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x43f5_ffff_fffc_aaae,
            0x32b7_fff2_ed47_fffd,
            0x07e8_3a49_a2e9_9d69,
            0xeca8_f331_8332_bb7a,
            0xef14_8d1e_a0f4_c069,
            0x040a_b326_3eff_0206,
        ]),
        c1: Fp::from_raw_unchecked([
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x3e2f_585d_a55c_9ad1,
            0x4294_213d_86c1_8183,
            0x3828_44c8_8b62_3732,
            0x92ad_2afd_1910_3e18,
            0x1d79_4e4f_ac7c_f0b9,
            0x0bd5_92fc_7d82_5ec8,
        ]),
        c1: Fp::from_raw_unchecked([
            0x7bcf_a7a2_5aa3_0fda,
            0xdc17_dec1_2a92_7e7c,
            0x2f08_8dd8_6b4e_bef1,
            0xd1ca_2087_da74_d4a7,
            0x2da2_5966_96ce_bc1d,
            0x0e2b_7eed_bbfd_87d2,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
        ]),
        c1: Fp::from_raw_unchecked([
            0x43f5_ffff_fffc_aaae,
            0x32b7_fff2_ed47_fffd,
            0x07e8_3a49_a2e9_9d69,
            0xeca8_f331_8332_bb7a,
            0xef14_8d1e_a0f4_c069,
            0x040a_b326_3eff_0206,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x3e2f_585d_a55c_9ad1,
            0x4294_213d_86c1_8183,
            0x3828_44c8_8b62_3732,
            0x92ad_2afd_1910_3e18,
            0x1d79_4e4f_ac7c_f0b9,
            0x0bd5_92fc_7d82_5ec8,
        ]),
        c1: Fp::from_raw_unchecked([
            0x3e2f_585d_a55c_9ad1,
            0x4294_213d_86c1_8183,
            0x3828_44c8_8b62_3732,
            0x92ad_2afd_1910_3e18,
            0x1d79_4e4f_ac7c_f0b9,
            0x0bd5_92fc_7d82_5ec8,
        ]),
    },
];

/// Element `c0 + c1 * u` of the quadratic extension
#[derive(Copy, Clone)]
pub struct Fp2 {
    /// Real part
    pub c0: Fp,
    /// Imaginary part
    pub c1: Fp,
}

impl Fp2 {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp2 {
        Fp2 {
            c0: Fp::zero(),
            c1: Fp::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp2 {
        Fp2 {
            c0: Fp::one(),
            c1: Fp::zero(),
        }
    }

    /// Build from both coordinates
    pub const fn new(c0: Fp, c1: Fp) -> Fp2 {
        Fp2 { c0, c1 }
    }

    /// Build from small signed integers
    pub fn from_i64s(c0: i64, c1: i64) -> Fp2 {
        Fp2 {
            c0: Fp::from_i64(c0),
            c1: Fp::from_i64(c1),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Complex conjugate `c0 - c1 * u`
    #[inline]
    pub fn conjugate(&self) -> Fp2 {
        Fp2 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Raise to `p^power`; odd powers conjugate
    #[inline]
    pub fn frobenius_map(&self, power: usize) -> Fp2 {
        if power % 2 == 1 {
            self.conjugate()
        } else {
            *self
        }
    }

    /// Multiply by the sextic non-residue `u + 1`
    #[inline]
    pub fn mul_by_nonresidue(&self) -> Fp2 {
        Fp2 {
            c0: self.c0 - self.c1,
            c1: self.c0 + self.c1,
        }
    }

    /// Multiply both coordinates by a base field element
    #[inline]
    pub fn mul_by_fp(&self, k: &Fp) -> Fp2 {
        Fp2 {
            c0: self.c0 * k,
            c1: self.c1 * k,
        }
    }

    /// Norm `c0^2 + c1^2` down to the base field
    pub fn norm(&self) -> Fp {
        self.c0.square() + self.c1.square()
    }

    /// Square this element
    pub fn square(&self) -> Fp2 {
        // (c0 + c1 u)^2 = (c0 + c1)(c0 - c1) + 2 c0 c1 u
        let a = self.c0 + self.c1;
        let b = self.c0 - self.c1;
        let c = self.c0 + self.c0;

        Fp2 {
            c0: a * b,
            c1: c * self.c1,
        }
    }

    /// Multiply two elements (Karatsuba)
    pub fn mul(&self, rhs: &Fp2) -> Fp2 {
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);

        Fp2 {
            c0: t0 - t1,
            c1: t2 - t0 - t1,
        }
    }

    /// Add two elements
    pub fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    /// Subtract two elements
    pub fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    /// Negate
    pub fn neg(&self) -> Fp2 {
        Fp2 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }

    /// Multiplicative inverse through the norm
    pub fn invert(&self) -> CtOption<Fp2> {
        self.norm().invert().map(|t| Fp2 {
            c0: self.c0 * t,
            c1: -(self.c1 * t),
        })
    }

    /// Square root, choosing the lexicographically largest of the two roots.
    ///
    /// A candidate `c = a^((p^2 + 8) / 16)` satisfies `c^2 / a = z^(2k)` for one
    /// `k` in `0..4` when `a` is a square; dividing `c` by `z^k` yields the root.
    pub fn sqrt(&self) -> CtOption<Fp2> {
        if bool::from(self.is_zero()) {
            return CtOption::new(Fp2::zero(), Choice::from(1));
        }

        let candidate = self.pow_vartime(&SQRT_EXP);
        let check = match Option::<Fp2>::from(self.invert()) {
            Some(inv) => candidate.square() * inv,
            None => return CtOption::new(Fp2::zero(), Choice::from(0)),
        };

        for k in 0..4 {
            if check == ROOTS_OF_UNITY[2 * k] {
                let x1 = candidate * ROOTS_OF_UNITY[(8 - k) % 8];
                let x2 = -x1;
                let root = if bool::from(x1.lexicographically_largest()) {
                    x1
                } else {
                    x2
                };
                return CtOption::new(root, Choice::from(1));
            }
        }

        CtOption::new(Fp2::zero(), Choice::from(0))
    }

    /// Ordering used by point compression: compare the imaginary part, then
    /// the real part when the imaginary part is zero.
    pub fn lexicographically_largest(&self) -> Choice {
        self.c1.lexicographically_largest()
            | (self.c1.is_zero() & self.c0.lexicographically_largest())
    }

    /// Sign of the element as used by the simplified SWU map
    pub fn sgn0(&self) -> Choice {
        self.c0.sgn0() | (self.c0.is_zero() & self.c1.sgn0())
    }

    /// Sample a uniform element
    pub fn random(mut rng: impl RngCore) -> Fp2 {
        Fp2 {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
    }
}

impl Field for Fp2 {
    fn zero() -> Self {
        Fp2::zero()
    }

    fn one() -> Self {
        Fp2::one()
    }

    fn is_zero(&self) -> Choice {
        Fp2::is_zero(self)
    }

    fn square(&self) -> Self {
        Fp2::square(self)
    }

    fn invert(&self) -> CtOption<Self> {
        Fp2::invert(self)
    }

    fn random(rng: impl RngCore) -> Self {
        Fp2::random(rng)
    }
}

impl fmt::Debug for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + {:?}*u", self.c0, self.c1)
    }
}

impl Default for Fp2 {
    fn default() -> Self {
        Fp2::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp2 {}

impl From<Fp> for Fp2 {
    fn from(f: Fp) -> Fp2 {
        Fp2 {
            c0: f,
            c1: Fp::zero(),
        }
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp2 {}
impl PartialEq for Fp2 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn neg(self) -> Fp2 {
        self.neg()
    }
}

impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp2);
impl_binops_multiplicative!(Fp2);
