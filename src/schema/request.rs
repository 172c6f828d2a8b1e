//! petcare.analysis_request.v1 schema definition
//!
//! One request carries everything needed for a full analysis of one pet:
//! - The pet snapshot
//! - Mixed-metric observations (grouped into per-metric datasets)
//! - Medication log and goals
//! - Optional nutrition goal and reference date

use crate::error::AnalyticsError;
use crate::types::{
    Goal, HealthDataset, Medication, NutritionGoal, Observation, Pet,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current schema version
pub const SCHEMA_VERSION: &str = "petcare.analysis_request.v1";

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Analysis request for a single pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Schema version (petcare.analysis_request.v1); assumed when absent
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Caller correlation id, echoed in the report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub pet: Pet,
    #[serde(default)]
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_goal: Option<NutritionGoal>,
    /// Reference date for goal schedules; schedules are omitted without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl AnalysisRequest {
    /// Create a request with no observations, medications or goals
    pub fn new(pet: Pet) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            request_id: None,
            pet,
            observations: Vec::new(),
            medications: Vec::new(),
            goals: Vec::new(),
            nutrition_goal: None,
            as_of: None,
        }
    }

    pub fn with_observations(mut self, observations: Vec<Observation>) -> Self {
        self.observations = observations;
        self
    }

    pub fn with_medications(mut self, medications: Vec<Medication>) -> Self {
        self.medications = medications;
        self
    }

    pub fn with_goals(mut self, goals: Vec<Goal>) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_nutrition_goal(mut self, goal: NutritionGoal) -> Self {
        self.nutrition_goal = Some(goal);
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Validate the request structure.
    ///
    /// Only checks what the schema itself guarantees (version, finite numbers,
    /// coherent dates). Domain rules such as a positive weight are enforced by
    /// the calculators so they surface as their own error kinds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ValidationError::InvalidSchemaVersion {
                expected: SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }

        if self.pet.id.trim().is_empty() {
            return Err(ValidationError::MissingPetId);
        }

        if let Some(index) = self.observations.iter().position(|o| !o.value.is_finite()) {
            return Err(ValidationError::NonFiniteValue {
                field: "observations".to_string(),
                index,
            });
        }

        for med in &self.medications {
            if !(0.0..=100.0).contains(&med.adherence_percent) {
                return Err(ValidationError::AdherenceOutOfRange {
                    medication: med.name.clone(),
                    value: med.adherence_percent,
                });
            }
            if med.end_date.is_some_and(|end| end < med.start_date) {
                return Err(ValidationError::InvertedDates {
                    field: format!("medication '{}'", med.name),
                });
            }
        }

        if let Some(index) = self.goals.iter().position(|g| g.target_date < g.start_date) {
            return Err(ValidationError::InvertedDates {
                field: format!("goals[{index}]"),
            });
        }

        Ok(())
    }

    /// Group observations and medications into a [`HealthDataset`]
    pub fn health_dataset(&self) -> HealthDataset {
        HealthDataset::from_observations(&self.observations, self.medications.clone())
    }
}

/// Validation errors for analysis requests
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid schema version: expected {expected}, got {actual}")]
    InvalidSchemaVersion { expected: String, actual: String },

    #[error("Pet id must not be empty")]
    MissingPetId,

    #[error("Non-finite value in {field} at index {index}")]
    NonFiniteValue { field: String, index: usize },

    #[error("Adherence for {medication} must be within 0-100, got {value}")]
    AdherenceOutOfRange { medication: String, value: f64 },

    #[error("End date precedes start date in {field}")]
    InvertedDates { field: String },
}

impl From<ValidationError> for AnalyticsError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::InvalidSchemaVersion { expected, actual } => {
                AnalyticsError::UnsupportedSchema { expected, actual }
            }
            other => AnalyticsError::InvalidRequest(other.to_string()),
        }
    }
}
