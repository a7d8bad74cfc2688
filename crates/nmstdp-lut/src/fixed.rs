//! STDP fixed-point arithmetic
//!
//! Trace magnitudes, decay factors and weight deltas all share one scale:
//! 11 fractional bits in an `i32`, the same scale the decay tables are
//! generated on. Every operator saturates instead of wrapping so a runaway
//! trace pins at the range limit rather than flipping sign.

use core::{fmt, ops};

/// Signed fixed-point number with 11 fractional bits (`ONE == 2048`)
///
/// Range: roughly [-1048576.0, 1048575.9995] with ~0.00049 precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Number of fractional bits
    pub const FRAC_BITS: u32 = 11;
    /// Scale factor (2^11 = 2048)
    pub const SCALE: i32 = 1 << Self::FRAC_BITS;
    /// Maximum representable value
    pub const MAX: Self = Self(i32::MAX);
    /// Minimum representable value
    pub const MIN: Self = Self(i32::MIN);
    /// Zero value
    pub const ZERO: Self = Self(0);
    /// One value, the peak of a freshly refreshed trace
    pub const ONE: Self = Self(Self::SCALE);

    /// Create from a raw scaled value
    #[inline(always)]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Get the raw scaled value
    #[inline(always)]
    pub const fn to_raw(self) -> i32 {
        self.0
    }

    /// Widen a raw decay-table entry, which is already on this scale
    #[inline(always)]
    pub const fn from_lut_entry(entry: i16) -> Self {
        Self(entry as i32)
    }

    /// Create from integer value
    #[inline(always)]
    pub const fn from_int(value: i32) -> Self {
        if value > i32::MAX >> Self::FRAC_BITS {
            Self::MAX
        } else if value < i32::MIN >> Self::FRAC_BITS {
            Self::MIN
        } else {
            Self(value << Self::FRAC_BITS)
        }
    }

    /// Create from float. Host-side table generation and tests only.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        let scaled = (value * Self::SCALE as f64).round();
        if scaled >= i32::MAX as f64 {
            Self::MAX
        } else if scaled <= i32::MIN as f64 {
            Self::MIN
        } else {
            Self(scaled as i32)
        }
    }

    /// Convert to float for reporting
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// True when the value is exactly zero
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating addition
    #[inline(always)]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction
    #[inline(always)]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Subtraction for unsigned magnitudes: results below zero become zero
    #[inline(always)]
    pub const fn saturating_sub_floor(self, other: Self) -> Self {
        let result = self.0.saturating_sub(other.0);
        if result < 0 {
            Self::ZERO
        } else {
            Self(result)
        }
    }

    /// Saturating multiplication, rounded to nearest with ties away from zero
    ///
    /// Rounding is symmetric in sign, so `(-a) * b == -(a * b)`.
    #[inline(always)]
    pub const fn saturating_mul(self, other: Self) -> Self {
        const HALF: i64 = 1 << (Fixed::FRAC_BITS - 1);
        let product = self.0 as i64 * other.0 as i64;
        let result = if product < 0 {
            -((-product + HALF) >> Self::FRAC_BITS)
        } else {
            (product + HALF) >> Self::FRAC_BITS
        };
        if result > i32::MAX as i64 {
            Self::MAX
        } else if result < i32::MIN as i64 {
            Self::MIN
        } else {
            Self(result as i32)
        }
    }

    /// Saturating negation
    #[inline(always)]
    pub const fn saturating_neg(self) -> Self {
        Self(self.0.saturating_neg())
    }

    /// Clamp into `[lo, hi]`
    #[inline(always)]
    pub const fn clamp(self, lo: Self, hi: Self) -> Self {
        if self.0 < lo.0 {
            lo
        } else if self.0 > hi.0 {
            hi
        } else {
            self
        }
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

impl ops::Add for Fixed {
    type Output = Self;

    #[inline(always)]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl ops::Sub for Fixed {
    type Output = Self;

    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl ops::Mul for Fixed {
    type Output = Self;

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        self.saturating_mul(other)
    }
}

impl ops::Neg for Fixed {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.saturating_neg()
    }
}

impl ops::AddAssign for Fixed {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl ops::SubAssign for Fixed {
    #[inline(always)]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl ops::MulAssign for Fixed {
    #[inline(always)]
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl From<i16> for Fixed {
    #[inline(always)]
    fn from(entry: i16) -> Self {
        Self::from_lut_entry(entry)
    }
}
