//! Input validation functions
//!
//! Domain checks applied to body metrics before any formula runs. Each
//! check names the field it guards so callers can point users at it.

use crate::errors::TargetsError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for any body weight, in pounds
pub const MAX_WEIGHT_LB: f64 = 1500.0;

/// Upper bound for combined height, in inches (9 ft)
pub const MAX_HEIGHT_INCHES: u32 = 108;

/// Youngest age the formulas are applied to
pub const MIN_AGE_YEARS: u32 = 13;

/// Oldest plausible age
pub const MAX_AGE_YEARS: u32 = 120;

/// Fastest weekly change accepted, in lb/week
pub const MAX_WEEKLY_RATE_LB: f64 = 5.0;

// ============================================================================
// Field names
// ============================================================================

/// Input fields of a nutrition profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Sex,
    DateOfBirth,
    CurrentWeight,
    GoalWeight,
    HeightFeet,
    HeightInches,
    /// Combined feet + inches
    Height,
    ActivityLevel,
    FitnessGoal,
    WeeklyGoalRate,
}

impl ProfileField {
    /// Wire name, as used in request bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Sex => "sex",
            ProfileField::DateOfBirth => "date_of_birth",
            ProfileField::CurrentWeight => "current_weight",
            ProfileField::GoalWeight => "goal_weight",
            ProfileField::HeightFeet => "height_feet",
            ProfileField::HeightInches => "height_inches",
            ProfileField::Height => "height",
            ProfileField::ActivityLevel => "activity_level",
            ProfileField::FitnessGoal => "fitness_goal",
            ProfileField::WeeklyGoalRate => "weekly_goal_rate",
        }
    }

    /// User-friendly display label
    pub fn display_label(&self) -> &'static str {
        match self {
            ProfileField::Sex => "Sex",
            ProfileField::DateOfBirth => "Date of Birth",
            ProfileField::CurrentWeight => "Current Weight",
            ProfileField::GoalWeight => "Goal Weight",
            ProfileField::HeightFeet => "Height (feet)",
            ProfileField::HeightInches => "Height (inches)",
            ProfileField::Height => "Height",
            ProfileField::ActivityLevel => "Activity Level",
            ProfileField::FitnessGoal => "Fitness Goal",
            ProfileField::WeeklyGoalRate => "Weekly Goal Rate",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Body metric validation
// ============================================================================

/// Validate a body weight in pounds
pub fn validate_weight_lb(field: ProfileField, weight_lb: f64) -> Result<f64, TargetsError> {
    if weight_lb.is_nan() || weight_lb.is_infinite() {
        return Err(TargetsError::validation(field, "must be a valid number"));
    }
    if weight_lb <= 0.0 {
        return Err(TargetsError::invalid_input(field, "must be greater than zero"));
    }
    if weight_lb > MAX_WEIGHT_LB {
        return Err(TargetsError::invalid_input(
            field,
            format!("must be at most {} lb", MAX_WEIGHT_LB),
        ));
    }
    Ok(weight_lb)
}

/// Validate one height component (feet or inches) as a non-negative integer
pub fn validate_height_component(field: ProfileField, value: f64) -> Result<u32, TargetsError> {
    if value.is_nan() || value.is_infinite() {
        return Err(TargetsError::validation(field, "must be a valid number"));
    }
    if value < 0.0 {
        return Err(TargetsError::invalid_input(field, "cannot be negative"));
    }
    if value.fract() != 0.0 {
        return Err(TargetsError::validation(field, "must be a whole number"));
    }
    if value > MAX_HEIGHT_INCHES as f64 {
        return Err(TargetsError::invalid_input(field, "is unreasonably large"));
    }
    Ok(value as u32)
}

/// Validate combined height in inches
pub fn validate_total_height(total_inches: u32) -> Result<u32, TargetsError> {
    if total_inches == 0 {
        return Err(TargetsError::invalid_input(
            ProfileField::Height,
            "must be greater than zero",
        ));
    }
    if total_inches > MAX_HEIGHT_INCHES {
        return Err(TargetsError::invalid_input(
            ProfileField::Height,
            format!("must be at most {} inches", MAX_HEIGHT_INCHES),
        ));
    }
    Ok(total_inches)
}

/// Validate the desired weekly rate of weight change (lb/week)
pub fn validate_weekly_rate(rate_lb: f64) -> Result<f64, TargetsError> {
    if rate_lb.is_nan() || rate_lb.is_infinite() {
        return Err(TargetsError::validation(
            ProfileField::WeeklyGoalRate,
            "must be a valid number",
        ));
    }
    if rate_lb <= 0.0 {
        return Err(TargetsError::invalid_input(
            ProfileField::WeeklyGoalRate,
            "must be greater than zero",
        ));
    }
    if rate_lb > MAX_WEEKLY_RATE_LB {
        return Err(TargetsError::invalid_input(
            ProfileField::WeeklyGoalRate,
            format!("must be at most {} lb per week", MAX_WEEKLY_RATE_LB),
        ));
    }
    Ok(rate_lb)
}

/// Validate a date of birth against `today` and return the age in whole years
///
/// Birthdays count only once the month/day has been reached this year.
pub fn validate_age(dob: NaiveDate, today: NaiveDate) -> Result<u32, TargetsError> {
    let age = today.years_since(dob).ok_or_else(|| {
        TargetsError::invalid_input(ProfileField::DateOfBirth, "cannot be in the future")
    })?;

    if age < MIN_AGE_YEARS {
        return Err(TargetsError::invalid_input(
            ProfileField::DateOfBirth,
            format!("age must be at least {} years", MIN_AGE_YEARS),
        ));
    }
    if age > MAX_AGE_YEARS {
        return Err(TargetsError::invalid_input(
            ProfileField::DateOfBirth,
            format!("age cannot exceed {} years", MAX_AGE_YEARS),
        ));
    }
    Ok(age)
}
