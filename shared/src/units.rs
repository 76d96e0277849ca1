//! Unit conversion helpers
//!
//! Body metrics arrive in US customary units (pounds, feet and inches) and
//! are converted to SI only where a formula needs it.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Weight
// ============================================================================

/// Pounds per kilogram used by the BMR formulas
pub const POUNDS_PER_KG: f64 = 2.205;

/// Convert pounds to kilograms
pub fn pounds_to_kg(pounds: f64) -> f64 {
    pounds / POUNDS_PER_KG
}

// ============================================================================
// Height
// ============================================================================

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Inches per foot
pub const INCHES_PER_FOOT: u32 = 12;

/// Convert inches to centimeters
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Height as entered on a form: whole feet plus whole inches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeetInchesHeight {
    pub feet: u32,
    pub inches: u32,
}

impl FeetInchesHeight {
    pub fn new(feet: u32, inches: u32) -> Self {
        Self { feet, inches }
    }

    /// Combine into total inches (inches above 11 are carried as-is)
    pub fn total_inches(&self) -> u32 {
        self.feet * INCHES_PER_FOOT + self.inches
    }

    /// Convert to centimeters
    pub fn to_cm(&self) -> f64 {
        inches_to_cm(self.total_inches() as f64)
    }
}

impl fmt::Display for FeetInchesHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}
