//! Error types for petcare analytics

use thiserror::Error;

/// Errors that can occur during computation
///
/// Structural problems in caller input are hard errors and are returned
/// unmodified. Absent optional fields never produce an error; they surface as
/// [`crate::types::ScoreWarning`]s instead.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Invalid body condition score {0}: expected 1-9")]
    InvalidBodyCondition(u8),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported schema version: expected {expected}, got {actual}")]
    UnsupportedSchema { expected: String, actual: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyticsError {
    /// Stable machine-readable code, used by the CLI and FFI error envelopes
    pub fn code(&self) -> &'static str {
        match self {
            AnalyticsError::InsufficientData(_) => "INSUFFICIENT_DATA",
            AnalyticsError::InvalidWeight(_) => "INVALID_WEIGHT",
            AnalyticsError::InvalidGoal(_) => "INVALID_GOAL",
            AnalyticsError::InvalidBodyCondition(_) => "INVALID_BODY_CONDITION",
            AnalyticsError::InvalidRequest(_) => "INVALID_REQUEST",
            AnalyticsError::UnsupportedSchema { .. } => "UNSUPPORTED_SCHEMA",
            AnalyticsError::Json(_) => "JSON_ERROR",
        }
    }
}

/// Convenience alias used across the calculators
pub type Result<T> = std::result::Result<T, AnalyticsError>;
