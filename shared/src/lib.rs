//! Nutrition Planner Shared Library
//!
//! The nutritional target engine: turns body metrics and a fitness goal
//! into a daily calorie target and a protein/carbs/fat breakdown. Used by
//! the backend and the WASM module.

pub mod errors;
pub mod health_metrics;
pub mod macronutrients;
pub mod profile;
pub mod targets;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::TargetsError;
pub use health_metrics::{ActivityLevel, BiologicalSex, FitnessGoal};
pub use profile::{normalize_profile, FormValue, NutritionProfile, ProfileInput};
pub use targets::{
    compute_nutrition_targets, compute_nutrition_targets_on, compute_targets_for_profile,
    NutritionTargets, TargetsBreakdown, TargetsReport,
};
pub use validation::ProfileField;
