//! Error types for the Payroll and Severance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll generation and
//! severance settlement.

use thiserror::Error;

/// The main error type for the Payroll and Severance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use school_payroll_engine::error::EngineError;
///
/// let error = EngineError::validation("pay day must be 15 or 30");
/// assert_eq!(error.to_string(), "Validation error: pay day must be 15 or 30");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was malformed or out of range (bad pay day, negative rate,
    /// non-payroll employee type, and so on).
    #[error("Validation error: {message}")]
    Validation {
        /// A description of what made the input invalid.
        message: String,
    },

    /// A required record was missing (no active payroll configuration,
    /// unknown employee or settlement id).
    #[error("Not found: {message}")]
    NotFound {
        /// A description of what was missing.
        message: String,
    },

    /// The operation collides with existing state (duplicate pay period,
    /// duplicate employee in a run, deleting the active configuration).
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        EngineError::NotFound {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        EngineError::Conflict {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_message() {
        let error = EngineError::validation("social security rate cannot be negative");
        assert_eq!(
            error.to_string(),
            "Validation error: social security rate cannot be negative"
        );
    }

    #[test]
    fn test_not_found_displays_message() {
        let error = EngineError::not_found("no active payroll configuration");
        assert_eq!(
            error.to_string(),
            "Not found: no active payroll configuration"
        );
    }

    #[test]
    fn test_conflict_displays_message() {
        let error =
            EngineError::conflict("payroll for period 'First Biweekly June 2024' already exists");
        assert_eq!(
            error.to_string(),
            "Conflict: payroll for period 'First Biweekly June 2024' already exists"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_conflict() -> EngineResult<()> {
            Err(EngineError::conflict("duplicate"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_conflict()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
