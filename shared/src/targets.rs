//! Daily nutrition target computation
//!
//! Composes the three stages over a normalized profile:
//!
//! 1. age and basal metabolic rate
//! 2. activity multiplier and goal surplus/deficit, floored per sex
//! 3. macro split with the protein-floor reconciliation
//!
//! Each stage only consumes the output of earlier ones. Nothing is cached;
//! callers re-run the computation whenever body metrics or goals change.

use crate::errors::TargetsError;
use crate::health_metrics::{calculate_bmr, calculate_daily_calories};
use crate::macronutrients::calculate_macros;
use crate::profile::{normalize_profile, NutritionProfile, ProfileInput};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily targets a caller stores with the user's nutrition preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Daily calorie target, a multiple of 10
    pub daily_calories: i32,
    /// Basal metabolic rate (kcal)
    pub bmr: i32,
    /// Protein (g)
    pub protein: i32,
    /// Carbohydrate (g)
    pub carbs: i32,
    /// Fat (g)
    pub fat: i32,
}

/// Intermediate values behind a set of targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetsBreakdown {
    pub age_years: u32,
    /// Total daily energy expenditure before the goal adjustment (kcal)
    pub tdee: i32,
    pub calorie_floor_applied: bool,
    pub reference_weight_lb: f64,
    pub protein_floor_g: i32,
    pub protein_floor_applied: bool,
    pub macro_minimum_applied: bool,
}

/// Targets together with how they were reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetsReport {
    pub targets: NutritionTargets,
    pub breakdown: TargetsBreakdown,
}

/// Run all three stages over a validated profile
pub fn compute_targets_for_profile(profile: &NutritionProfile) -> TargetsReport {
    let bmr = calculate_bmr(
        profile.current_weight_lb,
        profile.height_inches(),
        profile.age_years,
        profile.sex,
    );

    let energy = calculate_daily_calories(
        bmr,
        profile.activity_level,
        profile.fitness_goal,
        profile.weekly_goal_rate_lb,
        profile.sex,
    );

    let plan = calculate_macros(
        energy.daily_calories,
        profile.fitness_goal,
        profile.current_weight_lb,
        profile.goal_weight_lb,
    );

    TargetsReport {
        targets: NutritionTargets {
            daily_calories: energy.daily_calories,
            bmr: bmr.round() as i32,
            protein: plan.grams.protein,
            carbs: plan.grams.carbs,
            fat: plan.grams.fat,
        },
        breakdown: TargetsBreakdown {
            age_years: profile.age_years,
            tdee: energy.tdee.round() as i32,
            calorie_floor_applied: energy.calorie_floor_applied,
            reference_weight_lb: plan.reference_weight_lb,
            protein_floor_g: plan.protein_floor_g,
            protein_floor_applied: plan.protein_floor_applied,
            macro_minimum_applied: plan.macro_minimum_applied,
        },
    }
}

/// Normalize a raw profile and compute its targets as of `today`
pub fn compute_nutrition_targets_on(
    input: &ProfileInput,
    today: NaiveDate,
) -> Result<TargetsReport, TargetsError> {
    let profile = normalize_profile(input, today)?;
    Ok(compute_targets_for_profile(&profile))
}

/// Compute daily nutrition targets for a raw profile, aging it against today's UTC date
pub fn compute_nutrition_targets(input: &ProfileInput) -> Result<NutritionTargets, TargetsError> {
    compute_nutrition_targets_on(input, Utc::now().date_naive()).map(|report| report.targets)
}
