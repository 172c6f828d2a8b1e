//! Parsing and batch validation of analysis requests
//!
//! Requests arrive as a single JSON object, a JSON array, or NDJSON (one
//! request per line) when a caller analyzes several pets at once.

use crate::error::AnalyticsError;
use crate::schema::request::{AnalysisRequest, ValidationError};

/// Adapter for reading analysis requests from JSON text
pub struct RequestAdapter;

impl RequestAdapter {
    /// Parse a single JSON request
    pub fn parse(json: &str) -> Result<AnalysisRequest, AnalyticsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of requests
    pub fn parse_array(json: &str) -> Result<Vec<AnalysisRequest>, AnalyticsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse NDJSON (newline-delimited JSON) requests, skipping blank lines
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<AnalysisRequest>, AnalyticsError> {
        let mut requests = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<AnalysisRequest>(trimmed) {
                Ok(request) => requests.push(request),
                Err(e) => {
                    return Err(AnalyticsError::InvalidRequest(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(requests)
    }

    /// Validate a batch of requests, returning only the failures
    pub fn validate_requests(requests: &[AnalysisRequest]) -> Vec<ValidationResult> {
        requests
            .iter()
            .enumerate()
            .filter_map(|(index, request)| {
                request.validate().err().map(|error| ValidationResult {
                    index,
                    pet_id: request.pet.id.clone(),
                    error,
                })
            })
            .collect()
    }
}

/// A failed request in a validated batch
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub index: usize,
    pub pet_id: String,
    pub error: ValidationError,
}
