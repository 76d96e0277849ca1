//! Macronutrient split and protein-floor reconciliation
//!
//! The daily calorie target is divided across carbohydrate, protein and fat
//! by goal-dependent percentages. A minimum protein amount derived from body
//! weight then overrides the percentage split when it would be too low; the
//! calories it adds are taken back from carbs and fat.

use crate::health_metrics::FitnessGoal;
use serde::{Deserialize, Serialize};

/// Energy density of protein (kcal/g)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate (kcal/g)
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy density of fat (kcal/g)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Carbohydrate never drops below this after reconciliation (g)
pub const MIN_CARBS_G: i32 = 50;
/// Fat never drops below this after reconciliation (g)
pub const MIN_FAT_G: i32 = 15;

/// A planned loss larger than this (lb) moves the protein reference toward the goal
pub const LARGE_LOSS_THRESHOLD_LB: f64 = 20.0;

fn round_grams(grams: f64) -> i32 {
    grams.round() as i32
}

// ============================================================================
// Step A: Percentage Split
// ============================================================================

/// Fractions of daily calories allotted to each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl FitnessGoal {
    /// Target calorie fractions for this goal
    pub fn macro_split(&self) -> MacroSplit {
        let (carbs, protein, fat) = match self {
            FitnessGoal::Maintain => (0.575, 0.275, 0.15),
            FitnessGoal::Lose => (0.45, 0.35, 0.20),
            FitnessGoal::Gain => (0.60, 0.25, 0.15),
            FitnessGoal::Muscle => (0.50, 0.35, 0.15),
        };
        MacroSplit { carbs, protein, fat }
    }

    /// Minimum protein per pound of reference weight (g/lb)
    pub fn protein_per_pound(&self) -> f64 {
        match self {
            FitnessGoal::Muscle => 0.8,
            FitnessGoal::Lose => 0.7,
            FitnessGoal::Maintain | FitnessGoal::Gain => 0.5,
        }
    }
}

/// Daily macronutrient amounts in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

impl MacroGrams {
    /// Energy the three amounts add up to (kcal)
    pub fn calories(&self) -> i32 {
        (self.protein as f64 * KCAL_PER_GRAM_PROTEIN
            + self.carbs as f64 * KCAL_PER_GRAM_CARBS
            + self.fat as f64 * KCAL_PER_GRAM_FAT) as i32
    }
}

/// Grams of carbohydrate filling whatever energy protein and fat leave over
fn carbs_for_remaining(daily_calories: i32, protein: i32, fat: i32) -> i32 {
    let remaining = daily_calories as f64
        - protein as f64 * KCAL_PER_GRAM_PROTEIN
        - fat as f64 * KCAL_PER_GRAM_FAT;
    round_grams(remaining / KCAL_PER_GRAM_CARBS)
}

/// Split daily calories into grams by percentage
///
/// Protein and fat are rounded from their shares; carbs take the remainder,
/// which is the carb share with the other two rounding errors absorbed.
pub fn split_calories(daily_calories: i32, split: MacroSplit) -> MacroGrams {
    let calories = daily_calories as f64;
    let protein = round_grams(calories * split.protein / KCAL_PER_GRAM_PROTEIN);
    let fat = round_grams(calories * split.fat / KCAL_PER_GRAM_FAT);
    let carbs = carbs_for_remaining(daily_calories, protein, fat);

    MacroGrams { protein, carbs, fat }
}

// ============================================================================
// Steps B & C: Protein Floor
// ============================================================================

/// Weight used for the protein floor (lb)
///
/// Large planned losses use the midpoint between current and goal weight;
/// gains use the goal weight when it is above the current one.
pub fn reference_weight_lb(goal: FitnessGoal, current_weight_lb: f64, goal_weight_lb: f64) -> f64 {
    match goal {
        FitnessGoal::Lose if current_weight_lb - goal_weight_lb > LARGE_LOSS_THRESHOLD_LB => {
            current_weight_lb - 0.5 * (current_weight_lb - goal_weight_lb)
        }
        FitnessGoal::Muscle | FitnessGoal::Gain if goal_weight_lb > current_weight_lb => {
            goal_weight_lb
        }
        _ => current_weight_lb,
    }
}

/// Minimum daily protein in grams for a reference weight
pub fn protein_floor_g(goal: FitnessGoal, reference_weight_lb: f64) -> i32 {
    round_grams(reference_weight_lb * goal.protein_per_pound())
}

// ============================================================================
// Step D: Reconciliation
// ============================================================================

/// Outcome of enforcing the protein floor on a percentage split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroPlan {
    pub grams: MacroGrams,
    pub reference_weight_lb: f64,
    pub protein_floor_g: i32,
    /// Protein was raised to the floor
    pub protein_floor_applied: bool,
    /// Carbs or fat were lifted to their minimum, so the total can exceed the target
    pub macro_minimum_applied: bool,
}

/// Raise protein to `floor_g` if needed, taking the extra calories from carbs
/// and fat in proportion to their percentage shares
pub fn reconcile_protein_floor(
    daily_calories: i32,
    split: MacroSplit,
    grams: MacroGrams,
    floor_g: i32,
) -> (MacroGrams, bool) {
    if grams.protein >= floor_g {
        return (grams, false);
    }

    let extra_protein_calories = (floor_g - grams.protein) as f64 * KCAL_PER_GRAM_PROTEIN;
    let fat_share = split.fat / (split.carbs + split.fat);
    let fat_reduction_g = extra_protein_calories * fat_share / KCAL_PER_GRAM_FAT;

    let fat = round_grams(grams.fat as f64 - fat_reduction_g);
    // Remainder carries the carb share of the reduction
    let carbs = carbs_for_remaining(daily_calories, floor_g, fat);

    let clamped = carbs < MIN_CARBS_G || fat < MIN_FAT_G;
    let reconciled = MacroGrams {
        protein: floor_g,
        carbs: carbs.max(MIN_CARBS_G),
        fat: fat.max(MIN_FAT_G),
    };
    (reconciled, clamped)
}

/// Full macro computation for a calorie target
pub fn calculate_macros(
    daily_calories: i32,
    goal: FitnessGoal,
    current_weight_lb: f64,
    goal_weight_lb: f64,
) -> MacroPlan {
    let split = goal.macro_split();
    let initial = split_calories(daily_calories, split);

    let reference = reference_weight_lb(goal, current_weight_lb, goal_weight_lb);
    let floor = protein_floor_g(goal, reference);
    let (grams, macro_minimum_applied) = reconcile_protein_floor(daily_calories, split, initial, floor);

    MacroPlan {
        grams,
        reference_weight_lb: reference,
        protein_floor_g: floor,
        protein_floor_applied: initial.protein < floor,
        macro_minimum_applied,
    }
}
