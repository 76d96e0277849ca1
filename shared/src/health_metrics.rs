//! Energy expenditure calculations
//!
//! Basal metabolic rate from body metrics, then total daily energy
//! expenditure and a goal-adjusted daily calorie target.
//!
//! All calculations are pure functions over already-validated values.

use crate::units::{inches_to_cm, pounds_to_kg};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Profile Enums
// ============================================================================

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    #[default]
    Female,
}

impl BiologicalSex {
    /// Lowest daily calorie target ever recommended
    pub fn min_daily_calories(&self) -> i32 {
        match self {
            BiologicalSex::Male => 1500,
            BiologicalSex::Female => 1200,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "male",
            BiologicalSex::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "male" | "m" | "man" => Ok(BiologicalSex::Male),
            "female" | "f" | "woman" => Ok(BiologicalSex::Female),
            _ => Err(format!("Unknown sex: {}", s)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Very,
    /// Very hard exercise, physical job
    Extra,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Very => 1.725,
            ActivityLevel::Extra => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Very => "very",
            ActivityLevel::Extra => "extra",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Ok(ActivityLevel::Light),
            "moderate" | "moderately_active" => Ok(ActivityLevel::Moderate),
            "very" | "very_active" | "active" => Ok(ActivityLevel::Very),
            "extra" | "extra_active" | "extremely_active" => Ok(ActivityLevel::Extra),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Stated fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessGoal {
    Maintain,
    #[default]
    Lose,
    Gain,
    /// Lean gain with a smaller surplus
    Muscle,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::Maintain => "maintain",
            FitnessGoal::Lose => "lose",
            FitnessGoal::Gain => "gain",
            FitnessGoal::Muscle => "muscle",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "maintain" | "maintenance" => Ok(FitnessGoal::Maintain),
            "lose" | "lose_weight" | "weight_loss" => Ok(FitnessGoal::Lose),
            "gain" | "gain_weight" | "weight_gain" => Ok(FitnessGoal::Gain),
            "muscle" | "build_muscle" | "muscle_gain" => Ok(FitnessGoal::Muscle),
            _ => Err(format!("Unknown fitness goal: {}", s)),
        }
    }
}

/// Lowercase, trim, and fold spaces/hyphens into underscores
fn normalize_token(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

// ============================================================================
// Age and BMR
// ============================================================================

/// Age assumed when no date of birth is supplied
pub const DEFAULT_AGE_YEARS: u32 = 30;

/// Calculate BMR using the revised Harris-Benedict equation
///
/// Men: BMR = 66.5 + 13.75 × weight(kg) + 5.003 × height(cm) - 6.75 × age(y)
/// Women: BMR = 655.1 + 9.563 × weight(kg) + 1.85 × height(cm) - 4.676 × age(y)
pub fn calculate_bmr_harris_benedict(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: BiologicalSex,
) -> f64 {
    let age = age_years as f64;
    match sex {
        BiologicalSex::Male => 66.5 + 13.75 * weight_kg + 5.003 * height_cm - 6.75 * age,
        BiologicalSex::Female => 655.1 + 9.563 * weight_kg + 1.85 * height_cm - 4.676 * age,
    }
}

/// Calculate BMR from pounds and total inches
pub fn calculate_bmr(weight_lb: f64, height_inches: u32, age_years: u32, sex: BiologicalSex) -> f64 {
    calculate_bmr_harris_benedict(
        pounds_to_kg(weight_lb),
        inches_to_cm(height_inches as f64),
        age_years,
        sex,
    )
}

// ============================================================================
// TDEE and Goal Adjustment
// ============================================================================

/// Energy stored in one pound of body weight (kcal)
pub const KCAL_PER_POUND: f64 = 3500.0;

/// Surplus energy per pound of lean gain (kcal)
pub const KCAL_PER_POUND_MUSCLE: f64 = 2500.0;

const DAYS_PER_WEEK: f64 = 7.0;

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

impl FitnessGoal {
    /// Signed daily calorie change for a weekly rate of change in pounds
    pub fn daily_adjustment_kcal(&self, weekly_rate_lb: f64) -> f64 {
        match self {
            FitnessGoal::Maintain => 0.0,
            FitnessGoal::Lose => -KCAL_PER_POUND * weekly_rate_lb / DAYS_PER_WEEK,
            FitnessGoal::Gain => KCAL_PER_POUND * weekly_rate_lb / DAYS_PER_WEEK,
            FitnessGoal::Muscle => KCAL_PER_POUND_MUSCLE * weekly_rate_lb / DAYS_PER_WEEK,
        }
    }
}

/// Round to the nearest multiple of 10, halves away from zero
pub fn round_to_nearest_ten(kcal: f64) -> i32 {
    ((kcal / 10.0).round() * 10.0) as i32
}

/// Daily calorie target with its intermediate values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTarget {
    /// Basal Metabolic Rate
    pub bmr: f64,
    /// Total Daily Energy Expenditure
    pub tdee: f64,
    /// TDEE after the goal surplus/deficit, before the floor
    pub adjusted_calories: f64,
    /// Final target, a multiple of 10
    pub daily_calories: i32,
    /// Whether the per-sex minimum replaced the adjusted value
    pub calorie_floor_applied: bool,
}

/// Calculate the daily calorie target from BMR
pub fn calculate_daily_calories(
    bmr: f64,
    activity_level: ActivityLevel,
    goal: FitnessGoal,
    weekly_rate_lb: f64,
    sex: BiologicalSex,
) -> EnergyTarget {
    let tdee = calculate_tdee(bmr, activity_level);
    let adjusted = tdee + goal.daily_adjustment_kcal(weekly_rate_lb);

    let floor = sex.min_daily_calories() as f64;
    let calorie_floor_applied = adjusted < floor;
    let daily_calories = round_to_nearest_ten(adjusted.max(floor));

    EnergyTarget {
        bmr,
        tdee,
        adjusted_calories: adjusted,
        daily_calories,
        calorie_floor_applied,
    }
}
