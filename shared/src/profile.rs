//! Profile input normalization
//!
//! Callers hand over whatever their signup or profile form collected. This
//! module applies every default in one place and turns the raw record into a
//! validated [`NutritionProfile`] that the calculation stages can trust.
//!
//! Absent fields fall back to documented defaults. Present fields that cannot
//! be parsed are rejected with [`TargetsError::Validation`]; parsed values
//! outside the physical domain are rejected with [`TargetsError::InvalidInput`].

use crate::errors::TargetsError;
use crate::health_metrics::{ActivityLevel, BiologicalSex, FitnessGoal, DEFAULT_AGE_YEARS};
use crate::units::FeetInchesHeight;
use crate::validation::{
    validate_age, validate_height_component, validate_total_height, validate_weekly_rate,
    validate_weight_lb, ProfileField,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weight assumed when none is supplied (lb)
pub const DEFAULT_WEIGHT_LB: f64 = 150.0;

/// Weekly rate assumed when none is supplied (lb/week)
pub const DEFAULT_WEEKLY_RATE_LB: f64 = 1.0;

// ============================================================================
// Raw Input
// ============================================================================

/// A numeric form value, either a JSON number or a string holding one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    /// Parse into a number; blank text counts as absent
    fn to_number(&self, field: ProfileField) -> Result<Option<f64>, TargetsError> {
        match self {
            FormValue::Number(n) => Ok(Some(*n)),
            FormValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.parse::<f64>().map(Some).map_err(|_| {
                    TargetsError::validation(field, format!("'{}' is not a number", trimmed))
                })
            }
        }
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

/// Body metrics and goal exactly as a caller collected them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Pounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<FormValue>,
    /// Pounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<FormValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_feet: Option<FormValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_inches: Option<FormValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    /// Pounds per week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_goal_rate: Option<FormValue>,
}

// ============================================================================
// Normalized Profile
// ============================================================================

/// Validated inputs for the target calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub sex: BiologicalSex,
    pub age_years: u32,
    pub current_weight_lb: f64,
    pub goal_weight_lb: f64,
    pub height: FeetInchesHeight,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    pub weekly_goal_rate_lb: f64,
}

impl NutritionProfile {
    /// Combined height in inches
    pub fn height_inches(&self) -> u32 {
        self.height.total_inches()
    }
}

/// Apply defaults and validation to a raw profile
///
/// `today` anchors the age calculation so the result is reproducible.
pub fn normalize_profile(
    input: &ProfileInput,
    today: NaiveDate,
) -> Result<NutritionProfile, TargetsError> {
    let sex = parse_choice::<BiologicalSex>(ProfileField::Sex, input.sex.as_deref())?
        .unwrap_or_default();

    let age_years = match parse_date(input.date_of_birth.as_deref())? {
        Some(dob) => validate_age(dob, today)?,
        None => DEFAULT_AGE_YEARS,
    };

    let current_weight_lb = match parse_number(ProfileField::CurrentWeight, &input.current_weight)? {
        Some(weight) => validate_weight_lb(ProfileField::CurrentWeight, weight)?,
        None => DEFAULT_WEIGHT_LB,
    };

    let goal_weight_lb = match parse_number(ProfileField::GoalWeight, &input.goal_weight)? {
        Some(weight) => validate_weight_lb(ProfileField::GoalWeight, weight)?,
        None => current_weight_lb,
    };

    let feet = parse_number(ProfileField::HeightFeet, &input.height_feet)?
        .map(|v| validate_height_component(ProfileField::HeightFeet, v))
        .transpose()?
        .unwrap_or(0);
    let inches = parse_number(ProfileField::HeightInches, &input.height_inches)?
        .map(|v| validate_height_component(ProfileField::HeightInches, v))
        .transpose()?
        .unwrap_or(0);
    let height = FeetInchesHeight::new(feet, inches);
    validate_total_height(height.total_inches())?;

    let activity_level =
        parse_choice::<ActivityLevel>(ProfileField::ActivityLevel, input.activity_level.as_deref())?
            .unwrap_or_default();
    let fitness_goal =
        parse_choice::<FitnessGoal>(ProfileField::FitnessGoal, input.fitness_goal.as_deref())?
            .unwrap_or_default();

    let weekly_goal_rate_lb = match parse_number(ProfileField::WeeklyGoalRate, &input.weekly_goal_rate)? {
        Some(rate) => validate_weekly_rate(rate)?,
        None => DEFAULT_WEEKLY_RATE_LB,
    };

    Ok(NutritionProfile {
        sex,
        age_years,
        current_weight_lb,
        goal_weight_lb,
        height,
        activity_level,
        fitness_goal,
        weekly_goal_rate_lb,
    })
}

fn parse_number(field: ProfileField, value: &Option<FormValue>) -> Result<Option<f64>, TargetsError> {
    match value {
        Some(v) => v.to_number(field),
        None => Ok(None),
    }
}

fn parse_choice<T>(field: ProfileField, raw: Option<&str>) -> Result<Option<T>, TargetsError>
where
    T: FromStr<Err = String>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|e| TargetsError::validation(field, e)),
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, TargetsError> {
    let trimmed = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(s) => s,
    };

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| {
            TargetsError::validation(
                ProfileField::DateOfBirth,
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", trimmed),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn base_input() -> ProfileInput {
        ProfileInput {
            height_feet: Some(5.0.into()),
            height_inches: Some(6.0.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied_once() {
        let profile = normalize_profile(&base_input(), today()).unwrap();
        assert_eq!(profile.sex, BiologicalSex::Female);
        assert_eq!(profile.age_years, 30);
        assert_eq!(profile.current_weight_lb, 150.0);
        assert_eq!(profile.goal_weight_lb, 150.0);
        assert_eq!(profile.height_inches(), 66);
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.fitness_goal, FitnessGoal::Lose);
        assert_eq!(profile.weekly_goal_rate_lb, 1.0);
    }

    #[test]
    fn test_goal_weight_defaults_to_current() {
        let input = ProfileInput {
            current_weight: Some(210.0.into()),
            ..base_input()
        };
        let profile = normalize_profile(&input, today()).unwrap();
        assert_eq!(profile.goal_weight_lb, 210.0);
    }

    #[test]
    fn test_string_form_values_parsed() {
        let input = ProfileInput {
            sex: Some("Male".to_string()),
            date_of_birth: Some("1990-07-02".to_string()),
            current_weight: Some(" 182.5 ".into()),
            goal_weight: Some("170".into()),
            height_feet: Some("6".into()),
            height_inches: Some("1".into()),
            activity_level: Some("very_active".to_string()),
            fitness_goal: Some("muscle".to_string()),
            weekly_goal_rate: Some("0.5".into()),
        };
        let profile = normalize_profile(&input, today()).unwrap();
        assert_eq!(profile.sex, BiologicalSex::Male);
        // Birthday is tomorrow
        assert_eq!(profile.age_years, 33);
        assert_eq!(profile.current_weight_lb, 182.5);
        assert_eq!(profile.goal_weight_lb, 170.0);
        assert_eq!(profile.height_inches(), 73);
        assert_eq!(profile.activity_level, ActivityLevel::Very);
        assert_eq!(profile.fitness_goal, FitnessGoal::Muscle);
        assert_eq!(profile.weekly_goal_rate_lb, 0.5);
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let input = ProfileInput {
            sex: Some("  ".to_string()),
            date_of_birth: Some(String::new()),
            current_weight: Some("".into()),
            activity_level: Some(String::new()),
            ..base_input()
        };
        let profile = normalize_profile(&input, today()).unwrap();
        assert_eq!(profile.sex, BiologicalSex::Female);
        assert_eq!(profile.age_years, 30);
        assert_eq!(profile.current_weight_lb, 150.0);
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
    }

    #[test]
    fn test_rfc3339_date_of_birth() {
        let input = ProfileInput {
            date_of_birth: Some("1984-03-10T00:00:00Z".to_string()),
            ..base_input()
        };
        let profile = normalize_profile(&input, today()).unwrap();
        assert_eq!(profile.age_years, 40);
    }

    #[test]
    fn test_unparseable_values_name_their_field() {
        let cases = [
            (
                ProfileInput { current_weight: Some("heavy".into()), ..base_input() },
                ProfileField::CurrentWeight,
            ),
            (
                ProfileInput { sex: Some("unknown".to_string()), ..base_input() },
                ProfileField::Sex,
            ),
            (
                ProfileInput { date_of_birth: Some("07/01/1990".to_string()), ..base_input() },
                ProfileField::DateOfBirth,
            ),
            (
                ProfileInput { activity_level: Some("couch".to_string()), ..base_input() },
                ProfileField::ActivityLevel,
            ),
            (
                ProfileInput { fitness_goal: Some("bulk".to_string()), ..base_input() },
                ProfileField::FitnessGoal,
            ),
            (
                ProfileInput { height_inches: Some(6.5.into()), ..base_input() },
                ProfileField::HeightInches,
            ),
        ];

        for (input, field) in cases {
            let err = normalize_profile(&input, today()).unwrap_err();
            assert_eq!(err.field(), field, "{:?}", err);
            assert!(matches!(err, TargetsError::Validation { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_domain_violations_rejected() {
        let cases = [
            (
                ProfileInput { current_weight: Some((-150.0).into()), ..base_input() },
                ProfileField::CurrentWeight,
            ),
            (
                ProfileInput { goal_weight: Some(0.0.into()), ..base_input() },
                ProfileField::GoalWeight,
            ),
            (
                ProfileInput { weekly_goal_rate: Some(0.0.into()), ..base_input() },
                ProfileField::WeeklyGoalRate,
            ),
            (
                ProfileInput { weekly_goal_rate: Some(1e7.into()), ..base_input() },
                ProfileField::WeeklyGoalRate,
            ),
            (
                ProfileInput { height_feet: Some((-5.0).into()), ..base_input() },
                ProfileField::HeightFeet,
            ),
            (
                ProfileInput { date_of_birth: Some("2030-01-01".to_string()), ..base_input() },
                ProfileField::DateOfBirth,
            ),
            (
                ProfileInput { date_of_birth: Some("2020-01-01".to_string()), ..base_input() },
                ProfileField::DateOfBirth,
            ),
        ];

        for (input, field) in cases {
            let err = normalize_profile(&input, today()).unwrap_err();
            assert_eq!(err.field(), field, "{:?}", err);
            assert!(matches!(err, TargetsError::InvalidInput { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_missing_height_is_invalid() {
        let err = normalize_profile(&ProfileInput::default(), today()).unwrap_err();
        assert_eq!(err.field(), ProfileField::Height);
        assert!(matches!(err, TargetsError::InvalidInput { .. }));
    }

    #[test]
    fn test_height_from_inches_only() {
        let input = ProfileInput {
            height_inches: Some(64.0.into()),
            ..Default::default()
        };
        let profile = normalize_profile(&input, today()).unwrap();
        assert_eq!(profile.height_inches(), 64);
    }

    #[test]
    fn test_input_deserializes_mixed_json() {
        let json = r#"{
            "sex": "male",
            "current_weight": "200",
            "goal_weight": 185,
            "height_feet": 5,
            "height_inches": "11",
            "fitness_goal": "lose",
            "weekly_goal_rate": null
        }"#;
        let input: ProfileInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.current_weight, Some(FormValue::Text("200".to_string())));
        assert_eq!(input.goal_weight, Some(FormValue::Number(185.0)));
        assert_eq!(input.weekly_goal_rate, None);

        let profile = normalize_profile(&input, today()).unwrap();
        assert_eq!(profile.height_inches(), 71);
        assert_eq!(profile.weekly_goal_rate_lb, 1.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: numeric text and numbers normalize identically
        #[test]
        fn prop_text_and_number_equivalent(weight in 1.0f64..1500.0) {
            let weight = (weight * 10.0).round() / 10.0;
            let as_number = ProfileInput { current_weight: Some(weight.into()), ..base_input() };
            let as_text = ProfileInput {
                current_weight: Some(FormValue::Text(weight.to_string())),
                ..base_input()
            };
            prop_assert_eq!(
                normalize_profile(&as_number, today()).unwrap(),
                normalize_profile(&as_text, today()).unwrap()
            );
        }
    }
}
