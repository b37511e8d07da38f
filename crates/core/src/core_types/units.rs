//! Semantic unit types for weight-and-balance quantities
//!
//! This module provides newtype wrappers so a weight can't be added to an arm
//! or a gallon count passed where pounds are expected.
//!
//! # Design Philosophy
//! - Every quantity is an `f64`; the wrappers add no rounding and do not reorder
//!   arithmetic, so results are bit-identical to the equivalent raw `f64` expressions
//! - Implements the operators the engine needs (Add, Sub, Mul, Div, Neg, Display)
//! - Cross-unit products produce the right unit (`Pounds * Inches = PoundInches`)
//! - Serde serializes each quantity as a bare number
//! - No unit conversion: all figures are pounds, inches and US gallons
//!
//! # Usage
//! ```
//! use weight_balance_core::core_types::units::{Gallons, Inches, Pounds, PoundsPerGallon};
//!
//! let fuel = Gallons::new(40.0) * PoundsPerGallon::new(6.0);
//! assert_eq!(fuel, Pounds::new(240.0));
//!
//! let moment = fuel * Inches::new(48.0);
//! assert_eq!(*moment, 11520.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Deref, Div, Mul, Neg, Sub, SubAssign};

/// Implements the shared surface of a `f64` quantity newtype.
macro_rules! quantity {
    ($name:ident, $suffix:literal, $precision:literal) => {
        impl $name {
            /// Zero of this quantity
            pub const ZERO: $name = $name(0.0);

            /// Wrap a raw value
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                $name(value)
            }

            /// Get the raw f64 value
            #[inline]
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Absolute value
            #[inline]
            #[must_use]
            pub fn abs(self) -> Self {
                $name(self.0.abs())
            }

            /// Smaller of two values (NaN-propagating like `f64::min`)
            #[inline]
            #[must_use]
            pub fn min(self, other: Self) -> Self {
                $name(self.0.min(other.0))
            }

            /// Larger of two values
            #[inline]
            #[must_use]
            pub fn max(self, other: Self) -> Self {
                $name(self.0.max(other.0))
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            #[inline]
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: $name) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = $name;
            #[inline]
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: $name) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $name {
            type Output = $name;
            #[inline]
            fn neg(self) -> $name {
                $name(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            #[inline]
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = $name>>(iter: I) -> $name {
                iter.fold($name::ZERO, |acc, v| acc + v)
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $suffix),
                    None => write!(f, "{:.*} {}", $precision, self.0, $suffix),
                }
            }
        }
    };
}

// ============================================================================
// WEIGHT
// ============================================================================

/// Weight in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pounds(f64);

quantity!(Pounds, "lb", 1);

impl Mul<Inches> for Pounds {
    type Output = PoundInches;
    #[inline]
    fn mul(self, rhs: Inches) -> PoundInches {
        PoundInches(self.0 * rhs.0)
    }
}

impl Div<PoundsPerGallon> for Pounds {
    type Output = Gallons;
    #[inline]
    fn div(self, rhs: PoundsPerGallon) -> Gallons {
        Gallons(self.0 / rhs.0)
    }
}

// ============================================================================
// DISTANCE FROM DATUM
// ============================================================================

/// Arm or CG position, inches aft of the datum
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Inches(f64);

quantity!(Inches, "in", 2);

// ============================================================================
// MOMENT
// ============================================================================

/// Moment (weight × arm) in pound-inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PoundInches(f64);

quantity!(PoundInches, "lb-in", 1);

impl Div<Pounds> for PoundInches {
    type Output = Inches;
    #[inline]
    fn div(self, rhs: Pounds) -> Inches {
        Inches(self.0 / rhs.0)
    }
}

// ============================================================================
// FUEL
// ============================================================================

/// Fuel volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Gallons(f64);

quantity!(Gallons, "gal", 1);

impl Mul<PoundsPerGallon> for Gallons {
    type Output = Pounds;
    #[inline]
    fn mul(self, rhs: PoundsPerGallon) -> Pounds {
        Pounds(self.0 * rhs.0)
    }
}

/// Fuel density in pounds per US gallon (6.0 for avgas)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PoundsPerGallon(f64);

quantity!(PoundsPerGallon, "lb/gal", 2);

impl PoundsPerGallon {
    /// Standard avgas density used in light-aircraft POH tables
    pub const AVGAS: PoundsPerGallon = PoundsPerGallon(6.0);
}
