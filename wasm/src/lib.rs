//! Nutrition Planner WASM Module
//!
//! WebAssembly bindings so the browser can preview targets while the
//! profile form is being filled in, using the same engine as the server.

use chrono::NaiveDate;
use nutrition_planner_shared::health_metrics;
use nutrition_planner_shared::types::{ErrorDetail, ErrorResponse};
use nutrition_planner_shared::{
    compute_nutrition_targets_on, ActivityLevel, BiologicalSex, ProfileInput,
};
use wasm_bindgen::prelude::*;

/// Compute targets from a JSON profile
///
/// `today_iso` is the caller's local date (`YYYY-MM-DD`); the browser
/// clock decides age, not the server's. Errors come back as the same
/// JSON error body the API returns.
#[wasm_bindgen]
pub fn compute_nutrition_targets(input_json: &str, today_iso: &str) -> Result<String, JsValue> {
    compute_targets_json(input_json, today_iso).map_err(|e| JsValue::from_str(&e))
}

/// Calculate BMR from pounds and inches (revised Harris-Benedict)
#[wasm_bindgen]
pub fn calculate_bmr(is_male: bool, weight_lb: f64, height_inches: u32, age_years: u32) -> f64 {
    let sex = if is_male {
        BiologicalSex::Male
    } else {
        BiologicalSex::Female
    };
    health_metrics::calculate_bmr(weight_lb, height_inches, age_years, sex)
}

/// TDEE multiplier for an activity level; unknown levels use moderate
#[wasm_bindgen]
pub fn activity_multiplier(level: &str) -> f64 {
    level
        .parse::<ActivityLevel>()
        .unwrap_or_default()
        .multiplier()
}

fn compute_targets_json(input_json: &str, today_iso: &str) -> Result<String, String> {
    let input: ProfileInput = serde_json::from_str(input_json)
        .map_err(|e| bad_request(format!("Invalid profile JSON: {}", e)))?;
    let today = NaiveDate::parse_from_str(today_iso.trim(), "%Y-%m-%d").map_err(|_| {
        bad_request(format!(
            "'{}' is not a valid date (expected YYYY-MM-DD)",
            today_iso
        ))
    })?;

    let report = compute_nutrition_targets_on(&input, today)
        .map_err(|e| error_json(ErrorDetail::from(&e)))?;

    serde_json::to_string(&report.targets).map_err(|e| e.to_string())
}

fn bad_request(message: String) -> String {
    error_json(ErrorDetail {
        code: "BAD_REQUEST".to_string(),
        message,
        field: None,
    })
}

fn error_json(error: ErrorDetail) -> String {
    let response = ErrorResponse { error };
    serde_json::to_string(&response).unwrap_or_else(|_| response.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrition_planner_shared::NutritionTargets;

    const PROFILE: &str = r#"{
        "sex": "female",
        "current_weight": "150",
        "height_feet": 5,
        "height_inches": 6,
        "activity_level": "moderate",
        "fitness_goal": "maintain"
    }"#;

    #[test]
    fn test_compute_targets_json() {
        let out = compute_targets_json(PROFILE, "2024-07-01").unwrap();
        let targets: NutritionTargets = serde_json::from_str(&out).unwrap();
        assert_eq!(targets.daily_calories, 2290);
        assert_eq!(targets.bmr, 1475);
    }

    #[test]
    fn test_engine_error_is_error_body() {
        let out = compute_targets_json(r#"{"sex": "robot", "height_feet": 5}"#, "2024-07-01")
            .unwrap_err();
        let body: ErrorResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert_eq!(body.error.field.as_deref(), Some("sex"));
    }

    #[test]
    fn test_bad_date_rejected() {
        let out = compute_targets_json(PROFILE, "July 1st").unwrap_err();
        let body: ErrorResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(body.error.code, "BAD_REQUEST");
    }

    #[test]
    fn test_bmr() {
        let bmr = calculate_bmr(false, 150.0, 66, 30);
        assert!((bmr - 1475.5).abs() < 0.1);
    }

    #[test]
    fn test_activity_multiplier_unknown_is_moderate() {
        assert_eq!(activity_multiplier("extra"), 1.9);
        assert_eq!(activity_multiplier("couch"), activity_multiplier("moderate"));
    }
}
