//! Nutrition targets service - wraps the shared engine for the API

use crate::error::ApiError;
use chrono::NaiveDate;
use metrics::counter;
use nutrition_planner_shared::macronutrients::{MIN_CARBS_G, MIN_FAT_G};
use nutrition_planner_shared::types::{BackfillRequest, BackfillResponse, BackfillResult};
use nutrition_planner_shared::{
    compute_nutrition_targets_on, compute_targets_for_profile, ActivityLevel, BiologicalSex,
    FitnessGoal, NutritionProfile, ProfileInput, TargetsReport,
};
use nutrition_planner_shared::units::FeetInchesHeight;
use tracing::{debug, info, warn};
use validator::Validate;

/// Nutrition targets service
pub struct TargetsService;

impl TargetsService {
    /// Compute targets for one raw profile
    pub fn compute(input: &ProfileInput, today: NaiveDate) -> Result<TargetsReport, ApiError> {
        match compute_nutrition_targets_on(input, today) {
            Ok(report) => {
                counter!("nutrition_targets_computed_total").increment(1);
                debug!(
                    daily_calories = report.targets.daily_calories,
                    protein_floor_applied = report.breakdown.protein_floor_applied,
                    calorie_floor_applied = report.breakdown.calorie_floor_applied,
                    "Computed nutrition targets"
                );
                Ok(report)
            }
            Err(err) => {
                counter!("nutrition_targets_rejected_total", "kind" => err.code()).increment(1);
                info!(field = %err.field(), code = err.code(), "Profile rejected");
                Err(err.into())
            }
        }
    }

    /// Recompute targets for a batch of stored profiles
    ///
    /// Individual failures are reported per item; only a malformed batch
    /// fails the whole request.
    pub fn backfill(
        req: BackfillRequest,
        max_items: usize,
        today: NaiveDate,
    ) -> Result<BackfillResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        if req.items.len() > max_items {
            return Err(ApiError::BadRequest(format!(
                "Backfill accepts at most {} items, got {}",
                max_items,
                req.items.len()
            )));
        }

        let results: Vec<BackfillResult> = req
            .items
            .into_iter()
            .map(|item| {
                let outcome = compute_nutrition_targets_on(&item.profile, today)
                    .map(|report| report.targets);
                if let Err(ref err) = outcome {
                    debug!(id = %item.id, field = %err.field(), "Backfill item rejected");
                }
                BackfillResult::from_outcome(item.id, outcome)
            })
            .collect();

        let response = BackfillResponse::from_results(results);
        counter!("nutrition_backfill_items_total", "outcome" => "succeeded")
            .increment(response.succeeded as u64);
        counter!("nutrition_backfill_items_total", "outcome" => "failed")
            .increment(response.failed as u64);

        info!(
            processed = response.processed,
            succeeded = response.succeeded,
            failed = response.failed,
            "Backfill complete"
        );

        Ok(response)
    }

    /// Run the engine on a reference profile and check its invariants
    pub fn self_check() -> Result<(), String> {
        let profile = NutritionProfile {
            sex: BiologicalSex::Female,
            age_years: 30,
            current_weight_lb: 150.0,
            goal_weight_lb: 150.0,
            height: FeetInchesHeight::new(5, 6),
            activity_level: ActivityLevel::Moderate,
            fitness_goal: FitnessGoal::Maintain,
            weekly_goal_rate_lb: 1.0,
        };

        let targets = compute_targets_for_profile(&profile).targets;
        let macro_calories = 4 * targets.protein + 4 * targets.carbs + 9 * targets.fat;

        let problem = if targets.daily_calories < profile.sex.min_daily_calories() {
            Some("daily calories below floor")
        } else if (macro_calories - targets.daily_calories).abs() > 5 {
            Some("macros do not add up to daily calories")
        } else if targets.carbs < MIN_CARBS_G || targets.fat < MIN_FAT_G {
            Some("carb or fat minimum violated")
        } else {
            None
        };

        match problem {
            Some(msg) => {
                warn!(?targets, "Engine self-check failed: {}", msg);
                Err(msg.to_string())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrition_planner_shared::types::BackfillItem;
    use nutrition_planner_shared::TargetsError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn valid_profile() -> ProfileInput {
        ProfileInput {
            height_feet: Some(5.0.into()),
            height_inches: Some(6.0.into()),
            fitness_goal: Some("maintain".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_valid_profile() {
        let report = TargetsService::compute(&valid_profile(), today()).unwrap();
        assert_eq!(report.targets.daily_calories, 2290);
    }

    #[test]
    fn test_compute_maps_engine_errors() {
        let input = ProfileInput {
            weekly_goal_rate: Some((-1.0).into()),
            ..valid_profile()
        };
        let err = TargetsService::compute(&input, today()).unwrap_err();
        assert!(matches!(err, ApiError::Targets(TargetsError::InvalidInput { .. })));
    }

    #[test]
    fn test_backfill_reports_each_item() {
        let req = BackfillRequest {
            items: vec![
                BackfillItem {
                    id: "ok".to_string(),
                    profile: valid_profile(),
                },
                BackfillItem {
                    id: "no-height".to_string(),
                    profile: ProfileInput::default(),
                },
            ],
        };
        let response = TargetsService::backfill(req, 10, today()).unwrap();
        assert_eq!(response.processed, 2);
        assert_eq!(response.succeeded, 1);
        assert_eq!(response.failed, 1);
        assert_eq!(response.results[0].id, "ok");
        assert_eq!(
            response.results[1].error.as_ref().unwrap().field.as_deref(),
            Some("height")
        );
    }

    #[test]
    fn test_backfill_rejects_empty_and_oversized() {
        let empty = BackfillRequest { items: vec![] };
        assert!(matches!(
            TargetsService::backfill(empty, 10, today()),
            Err(ApiError::Validation(_))
        ));

        let items = (0..3)
            .map(|i| BackfillItem {
                id: i.to_string(),
                profile: valid_profile(),
            })
            .collect();
        assert!(matches!(
            TargetsService::backfill(BackfillRequest { items }, 2, today()),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_self_check_passes() {
        assert!(TargetsService::self_check().is_ok());
    }
}
