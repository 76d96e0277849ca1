//! API request and response types

use crate::errors::TargetsError;
use crate::profile::ProfileInput;
use crate::targets::{NutritionTargets, TargetsBreakdown, TargetsReport};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&TargetsError> for ErrorDetail {
    fn from(err: &TargetsError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.user_message(),
            field: Some(err.field().as_str().to_string()),
        }
    }
}

// ============================================================================
// Nutrition Targets
// ============================================================================

/// Query parameters for the targets endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetsQuery {
    /// Include the intermediate values behind the targets
    #[serde(default)]
    pub detailed: bool,
}

/// Targets response; the breakdown is only present when requested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsResponse {
    #[serde(flatten)]
    pub targets: NutritionTargets,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<TargetsBreakdown>,
}

impl TargetsResponse {
    pub fn from_report(report: TargetsReport, detailed: bool) -> Self {
        Self {
            targets: report.targets,
            breakdown: detailed.then_some(report.breakdown),
        }
    }
}

// ============================================================================
// Backfill
// ============================================================================

/// Recompute targets for a batch of stored profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackfillRequest {
    #[validate(length(min = 1, message = "at least one item is required"))]
    pub items: Vec<BackfillItem>,
}

/// One stored profile, keyed by the caller's identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillItem {
    pub id: String,
    pub profile: ProfileInput,
}

/// Outcome for one backfill item: targets or the reason there are none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillResult {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<NutritionTargets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl BackfillResult {
    pub fn from_outcome(id: String, outcome: Result<NutritionTargets, TargetsError>) -> Self {
        match outcome {
            Ok(targets) => Self {
                id,
                targets: Some(targets),
                error: None,
            },
            Err(err) => Self {
                id,
                targets: None,
                error: Some(ErrorDetail::from(&err)),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.targets.is_some()
    }
}

/// Backfill summary with per-item results in request order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillResponse {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BackfillResult>,
}

impl BackfillResponse {
    pub fn from_results(results: Vec<BackfillResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            processed: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }
}
