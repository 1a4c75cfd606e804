//! Limb arithmetic helpers and operator boilerplate shared by the field types.

/// Compute a + b + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a - (b + borrow), returning (result, borrow)
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a + (b * c) + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Split a big-endian byte string into little-endian 64-bit limbs,
/// most significant chunk first. The leading chunk is zero-padded.
pub(crate) fn be_bytes_to_limbs_msb_first(bytes: &[u8]) -> impl Iterator<Item = u64> + '_ {
    let head = bytes.len() % 8;
    let (first, rest) = bytes.split_at(head);
    let lead = if head == 0 {
        None
    } else {
        let mut buf = [0u8; 8];
        buf[8 - head..].copy_from_slice(first);
        Some(u64::from_be_bytes(buf))
    };
    lead.into_iter().chain(rest.chunks_exact(8).map(|chunk| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        u64::from_be_bytes(buf)
    }))
}

/// Fill in the owned and assigning variants of `+` and `-` from the
/// `&T op &T` implementations.
macro_rules! impl_binops_additive {
    ($t:ident) => {
        impl<'b> core::ops::Add<&'b $t> for $t {
            type Output = $t;
            #[inline]
            fn add(self, rhs: &'b $t) -> $t {
                &self + rhs
            }
        }

        impl<'a> core::ops::Add<$t> for &'a $t {
            type Output = $t;
            #[inline]
            fn add(self, rhs: $t) -> $t {
                self + &rhs
            }
        }

        impl core::ops::Add<$t> for $t {
            type Output = $t;
            #[inline]
            fn add(self, rhs: $t) -> $t {
                &self + &rhs
            }
        }

        impl<'b> core::ops::Sub<&'b $t> for $t {
            type Output = $t;
            #[inline]
            fn sub(self, rhs: &'b $t) -> $t {
                &self - rhs
            }
        }

        impl<'a> core::ops::Sub<$t> for &'a $t {
            type Output = $t;
            #[inline]
            fn sub(self, rhs: $t) -> $t {
                self - &rhs
            }
        }

        impl core::ops::Sub<$t> for $t {
            type Output = $t;
            #[inline]
            fn sub(self, rhs: $t) -> $t {
                &self - &rhs
            }
        }

        impl core::ops::AddAssign<$t> for $t {
            #[inline]
            fn add_assign(&mut self, rhs: $t) {
                *self = &*self + &rhs;
            }
        }

        impl<'b> core::ops::AddAssign<&'b $t> for $t {
            #[inline]
            fn add_assign(&mut self, rhs: &'b $t) {
                *self = &*self + rhs;
            }
        }

        impl core::ops::SubAssign<$t> for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: $t) {
                *self = &*self - &rhs;
            }
        }

        impl<'b> core::ops::SubAssign<&'b $t> for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: &'b $t) {
                *self = &*self - rhs;
            }
        }

        impl core::ops::Neg for $t {
            type Output = $t;
            #[inline]
            fn neg(self) -> $t {
                -&self
            }
        }
    };
}

/// Fill in the owned and assigning variants of `*` from the `&T * &T`
/// implementation.
macro_rules! impl_binops_multiplicative {
    ($t:ident) => {
        impl<'b> core::ops::Mul<&'b $t> for $t {
            type Output = $t;
            #[inline]
            fn mul(self, rhs: &'b $t) -> $t {
                &self * rhs
            }
        }

        impl<'a> core::ops::Mul<$t> for &'a $t {
            type Output = $t;
            #[inline]
            fn mul(self, rhs: $t) -> $t {
                self * &rhs
            }
        }

        impl core::ops::Mul<$t> for $t {
            type Output = $t;
            #[inline]
            fn mul(self, rhs: $t) -> $t {
                &self * &rhs
            }
        }

        impl core::ops::MulAssign<$t> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: $t) {
                *self = &*self * &rhs;
            }
        }

        impl<'b> core::ops::MulAssign<&'b $t> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: &'b $t) {
                *self = &*self * rhs;
            }
        }
    };
}
