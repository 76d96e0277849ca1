//! Error types for the nutrition target engine

use crate::validation::ProfileField;
use thiserror::Error;

/// Errors produced while turning a raw profile into nutrition targets
///
/// Every error names the input field that caused it. Nothing here is
/// transient; the same input always fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TargetsError {
    /// Field present but malformed (unparseable number, unknown enum value)
    #[error("Validation error: {}: {message}", .field.display_label())]
    Validation { field: ProfileField, message: String },

    /// Field well-formed but physically meaningless (negative weight, zero height)
    #[error("Invalid input: {}: {message}", .field.display_label())]
    InvalidInput { field: ProfileField, message: String },
}

impl TargetsError {
    pub fn validation(field: ProfileField, message: impl Into<String>) -> Self {
        TargetsError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_input(field: ProfileField, message: impl Into<String>) -> Self {
        TargetsError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// The offending input field
    pub fn field(&self) -> ProfileField {
        match self {
            TargetsError::Validation { field, .. } | TargetsError::InvalidInput { field, .. } => {
                *field
            }
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            TargetsError::Validation { .. } => "VALIDATION_ERROR",
            TargetsError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }

    /// Format as a user-friendly message, e.g. "Height: must be greater than zero"
    pub fn user_message(&self) -> String {
        match self {
            TargetsError::Validation { field, message }
            | TargetsError::InvalidInput { field, message } => {
                format!("{}: {}", field.display_label(), message)
            }
        }
    }
}
