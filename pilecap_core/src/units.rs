//! # Unit Types
//!
//! Lightweight newtype wrappers for the unit conversions that the capacity
//! equations depend on. The AASHTO shear expressions mix units (f'c in psi
//! for one-way shear, ksi for punching, lengths in inches, results in kips),
//! so conversions go through these types instead of bare `* 12.0` factors.
//!
//! ## Units used by the engine
//!
//! - Length: feet (ft) for plan geometry, inches (in) for section detailing
//! - Force: kips (k)
//! - Stress: ksi for material strengths, psi inside the one-way shear equation
//! - Moment: kip-feet (k-ft)
//! - Unit weight: kips per cubic foot (kcf)
//!
//! ## Example
//!
//! ```rust
//! use pilecap_core::units::{Feet, Inches, Ksi, Psi};
//!
//! let depth: Inches = Feet(0.75).into();
//! assert_eq!(depth.0, 9.0);
//!
//! let fc: Psi = Ksi(5.5).into();
//! assert_eq!(fc.0, 5500.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in kips
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Stress in kips per square inch (ksi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ksi(pub f64);

impl From<Psi> for Ksi {
    fn from(psi: Psi) -> Self {
        Ksi(psi.0 / 1000.0)
    }
}

impl From<Ksi> for Psi {
    fn from(ksi: Ksi) -> Self {
        Psi(ksi.0 * 1000.0)
    }
}

// ============================================================================
// Unit Weight
// ============================================================================

/// Unit weight in kips per cubic foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kcf(pub f64);

/// Normal-weight reinforced concrete
pub const CONCRETE_UNIT_WEIGHT: Kcf = Kcf(0.150);

/// Fresh water
pub const WATER_UNIT_WEIGHT: Kcf = Kcf(0.0624);

impl Kcf {
    /// Weight of a prism of plan area `area` and height `height`
    pub fn weight_of(self, area: SqFt, height: Feet) -> Kips {
        Kips(self.0 * area.0 * height.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Kips);
impl_arithmetic!(Psi);
impl_arithmetic!(Ksi);
impl_arithmetic!(SqFt);
