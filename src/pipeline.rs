//! Pipeline orchestration
//!
//! This module provides the public API for a full pet analysis.
//! It runs one request through every calculator in a fixed order:
//! 1. Request validation and grouping into per-metric datasets
//! 2. Nutrition plan
//! 3. Health score breakdown
//! 4. Per-metric statistics and trends
//! 5. Goal progress
//! 6. Insights over the outputs of steps 3-5
//!
//! Each derived value is computed once and shared with the insight engine, so
//! the insights always agree with the numbers next to them in the report.

use crate::calories::CalorieEstimator;
use crate::config::EngineConfig;
use crate::encoder::ReportEncoder;
use crate::error::Result;
use crate::goals::GoalProgressTracker;
use crate::health_score::HealthScoreCalculator;
use crate::insights::{DerivedMetrics, InsightEngine};
use crate::schema::{AnalysisRequest, RequestAdapter};
use crate::statistics::StatisticsCalculator;
use crate::types::{GoalProgress, HealthReport, MetricKind};
use std::collections::BTreeMap;
use tracing::debug;

/// Analyze a JSON request with the default configuration.
///
/// # Arguments
/// * `request_json` - A `petcare.analysis_request.v1` document
///
/// # Returns
/// The encoded report payload as pretty-printed JSON
///
/// # Example
/// ```ignore
/// let payload = analyze_json(request_json)?;
/// ```
pub fn analyze_json(request_json: String) -> Result<String> {
    AnalyticsProcessor::new().process_json(&request_json)
}

/// Analyze a parsed request with the default configuration
pub fn analyze(request: &AnalysisRequest) -> Result<HealthReport> {
    AnalyticsProcessor::new().process(request)
}

/// Configured processor.
///
/// Holds only immutable configuration and an encoder, so one instance can serve
/// any number of requests.
pub struct AnalyticsProcessor {
    config: EngineConfig,
    statistics: StatisticsCalculator,
    calories: CalorieEstimator,
    health_score: HealthScoreCalculator,
    goals: GoalProgressTracker,
    insights: InsightEngine,
    encoder: ReportEncoder,
}

impl Default for AnalyticsProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsProcessor {
    /// Create a new processor with default settings
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a processor with a specific configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            statistics: StatisticsCalculator::with_config(config.statistics.clone()),
            calories: CalorieEstimator::with_config(config.calories.clone()),
            health_score: HealthScoreCalculator::with_config(config.health_score.clone()),
            goals: GoalProgressTracker::with_config(config.goals.clone()),
            insights: InsightEngine::with_config(config.insights.clone()),
            encoder: ReportEncoder::new(),
            config,
        }
    }

    /// Replace the insight engine, e.g. with extra rules
    pub fn with_insight_engine(mut self, engine: InsightEngine) -> Self {
        self.insights = engine;
        self
    }

    /// Replace the encoder, e.g. to pin the instance id
    pub fn with_encoder(mut self, encoder: ReportEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load configuration from JSON, rebuilding every calculator.
    ///
    /// A custom insight engine set through [`Self::with_insight_engine`] is
    /// replaced by the default rules.
    pub fn load_config(&mut self, json: &str) -> Result<()> {
        let config = EngineConfig::from_json(json)?;
        let encoder = self.encoder.clone();
        *self = Self::with_config(config).with_encoder(encoder);
        Ok(())
    }

    /// Save configuration to JSON
    pub fn save_config(&self) -> Result<String> {
        Ok(self.config.to_json()?)
    }

    /// Run a request through every calculator
    pub fn process(&self, request: &AnalysisRequest) -> Result<HealthReport> {
        request.validate()?;

        let pet = &request.pet;
        let dataset = request.health_dataset();
        debug!(
            pet_id = %pet.id,
            species = pet.species.as_str(),
            metrics = dataset.datasets.len(),
            medications = dataset.medications.len(),
            goals = request.goals.len(),
            "analyzing pet"
        );

        let nutrition_plan = self.calories.estimate_plan(pet, request.nutrition_goal)?;
        let health_breakdown = self.health_score.compute_breakdown(pet, &dataset)?;
        debug!(
            pet_id = %pet.id,
            daily_calories = nutrition_plan.daily_calories,
            health_score = health_breakdown.score,
            warnings = health_breakdown.warnings.len(),
            "computed nutrition and score"
        );

        let mut statistics = BTreeMap::new();
        let mut trends = BTreeMap::new();
        for (metric, series) in &dataset.datasets {
            statistics.insert(
                *metric,
                self.statistics.compute_dataset_statistics(series)?,
            );
            // A single reading has no trend; that is not an error for the report.
            if series.len() >= 2 {
                trends.insert(*metric, self.statistics.compute_trend(series)?);
            }
        }

        let goal_progress = request
            .goals
            .iter()
            .map(|goal| self.goals.compute_report(goal, request.as_of))
            .collect::<Result<Vec<_>>>()?;

        let mut derived = DerivedMetrics::new(health_breakdown.score).with_goal_progress(
            goal_progress
                .iter()
                .map(|report| GoalProgress {
                    percentage: report.percentage,
                    status: report.status,
                })
                .collect(),
        );
        if let Some(trend) = trends.get(&MetricKind::Weight) {
            derived = derived.with_weight_trend(*trend);
        }
        if let Some(stats) = statistics.get(&MetricKind::Weight) {
            derived = derived.with_weight_statistics(*stats);
        }

        let insights = self.insights.generate_insights(pet, &dataset, &derived);
        debug!(pet_id = %pet.id, insights = insights.len(), "generated insights");

        Ok(HealthReport {
            request_id: request.request_id.clone(),
            pet_id: pet.id.clone(),
            species: pet.species,
            nutrition_plan,
            health_score: health_breakdown.score,
            health_breakdown,
            statistics,
            trends,
            goal_progress,
            insights,
        })
    }

    /// Parse, analyze and encode a JSON request
    pub fn process_json(&self, request_json: &str) -> Result<String> {
        let request = RequestAdapter::parse(request_json)?;
        let report = self.process(&request)?;
        self.encoder.encode_to_json(report)
    }

    /// Analyze every request of a batch, keeping per-request results
    pub fn process_batch(&self, requests: &[AnalysisRequest]) -> Vec<Result<HealthReport>> {
        requests.iter().map(|request| self.process(request)).collect()
    }

    pub fn encoder(&self) -> &ReportEncoder {
        &self.encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::insights::{VACCINATION_REMINDER_ID, WEIGHT_FLUCTUATION_ID, WEIGHT_MANAGEMENT_ID};
    use crate::types::{
        ActivityLevel, Goal, GoalStatus, GoalType, Medication, MedicationStatus, Observation,
        Pet, Species, TrendDirection,
    };
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn weights(values: &[f64]) -> Vec<Observation> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| Observation {
                date: date(1, 1) + chrono::Days::new(i as u64 * 7),
                value: *value,
                metric: MetricKind::Weight,
            })
            .collect()
    }

    fn healthy_request() -> AnalysisRequest {
        let pet = Pet::new("dog-1", Species::Dog, 20.0, ActivityLevel::Medium)
            .with_ideal_weight(20.0)
            .with_body_condition(5);
        AnalysisRequest::new(pet).with_observations(weights(&[20.1, 20.0, 19.9, 20.0, 20.0]))
    }

    fn sample_request_json() -> &'static str {
        r#"{
            "schema_version": "petcare.analysis_request.v1",
            "request_id": "req-42",
            "pet": {
                "id": "cat-9",
                "name": "Miso",
                "species": "cat",
                "current_weight_kg": 5.6,
                "ideal_weight_kg": 4.5,
                "body_condition_score": 7,
                "activity_level": "low"
            },
            "observations": [
                {"date": "2024-01-01", "value": 5.2, "metric": "weight"},
                {"date": "2024-02-01", "value": 5.4, "metric": "weight"},
                {"date": "2024-03-01", "value": 5.6, "metric": "weight"},
                {"date": "2024-03-01", "value": 38.6, "metric": "temperature"}
            ],
            "goals": [{
                "type": "weight_loss",
                "target_value": 4.5,
                "current_value": 3.0,
                "unit": "kg",
                "start_date": "2024-03-01",
                "target_date": "2024-06-01"
            }],
            "nutrition_goal": "lose_weight",
            "as_of": "2024-03-15"
        }"#
    }

    #[test]
    fn test_healthy_pet_report() {
        let report = analyze(&healthy_request()).unwrap();

        assert_eq!(report.pet_id, "dog-1");
        assert_eq!(report.health_score, 100);
        assert_eq!(report.health_breakdown.score, report.health_score);
        assert_eq!(report.trends[&MetricKind::Weight].direction, TrendDirection::Stable);
        assert_eq!(report.statistics[&MetricKind::Weight].count, 5);

        let ids: Vec<&str> = report.insights.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec![VACCINATION_REMINDER_ID]);
    }

    #[test]
    fn test_rising_weight_at_ideal_is_not_a_concern() {
        let pet = Pet::new("dog-5", Species::Dog, 20.0, ActivityLevel::High)
            .with_ideal_weight(20.0)
            .with_body_condition(5);
        let request = AnalysisRequest::new(pet)
            .with_observations(weights(&[18.0, 18.5, 19.0, 19.5, 20.0]));
        let report = analyze(&request).unwrap();

        assert_eq!(report.health_score, 100);
        assert_eq!(report.trends[&MetricKind::Weight].direction, TrendDirection::Increasing);
        let ids: Vec<&str> = report.insights.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec![VACCINATION_REMINDER_ID]);
    }

    #[test]
    fn test_weight_swings_reach_insights() {
        let pet = Pet::new("dog-6", Species::Dog, 20.0, ActivityLevel::High)
            .with_ideal_weight(20.0)
            .with_body_condition(5);
        let request = AnalysisRequest::new(pet)
            .with_observations(weights(&[20.0, 23.5, 17.0, 22.5, 20.0]));
        let report = analyze(&request).unwrap();

        let ids: Vec<&str> = report.insights.iter().map(|i| i.id.as_str()).collect();
        assert!(ids.contains(&WEIGHT_FLUCTUATION_ID));
    }

    #[test]
    fn test_analyze_json() {
        let payload = analyze_json(sample_request_json().to_string()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed["producer"]["name"], crate::PRODUCER_NAME);
        assert_eq!(parsed["report"]["request_id"], "req-42");
        assert_eq!(parsed["report"]["pet_id"], "cat-9");
        assert_eq!(parsed["report"]["trends"]["weight"]["direction"], "increasing");
        assert!(parsed["report"]["statistics"]["temperature"].is_object());
        assert!(parsed["report"]["trends"].get("temperature").is_none());
        assert_eq!(parsed["report"]["goal_progress"][0]["days_remaining"], 78);
        assert_eq!(parsed["report"]["goal_progress"][0]["status"], "needs_attention");
    }

    #[test]
    fn test_report_insights_follow_derived_values() {
        let request = RequestAdapter::parse(sample_request_json()).unwrap();
        let report = analyze(&request).unwrap();

        let ids: Vec<&str> = report.insights.iter().map(|i| i.id.as_str()).collect();
        assert!(ids.contains(&WEIGHT_MANAGEMENT_ID));
        assert_eq!(report.goal_progress[0].status, GoalStatus::NeedsAttention);
        assert!(report.nutrition_plan.goal_multiplier < 1.0);
    }

    #[test]
    fn test_invalid_weight_propagates() {
        let mut request = healthy_request();
        request.pet.current_weight_kg = 0.0;
        assert!(matches!(
            analyze(&request),
            Err(AnalyticsError::InvalidWeight(_))
        ));
    }

    #[test]
    fn test_invalid_goal_propagates() {
        let request = healthy_request().with_goals(vec![Goal {
            id: None,
            goal_type: GoalType::Activity,
            target_value: 0.0,
            current_value: 10.0,
            unit: "min".to_string(),
            start_date: date(1, 1),
            target_date: date(2, 1),
        }]);
        assert!(matches!(
            analyze(&request),
            Err(AnalyticsError::InvalidGoal(_))
        ));
    }

    #[test]
    fn test_unsupported_schema() {
        let mut request = healthy_request();
        request.schema_version = "petcare.analysis_request.v2".to_string();
        assert!(matches!(
            analyze(&request),
            Err(AnalyticsError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(analyze_json("not valid json".to_string()).is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = EngineConfig::default();
        config.insights.checkup_reminder = false;
        let processor = AnalyticsProcessor::with_config(config);
        let saved = processor.save_config().unwrap();

        let mut restored = AnalyticsProcessor::new();
        restored.load_config(&saved).unwrap();
        assert!(!restored.config().insights.checkup_reminder);

        let report = restored.process(&healthy_request()).unwrap();
        assert!(report.insights.is_empty());
    }

    #[test]
    fn test_load_config_keeps_encoder() {
        let mut processor = AnalyticsProcessor::new()
            .with_encoder(ReportEncoder::with_instance_id("fixed".to_string()));
        processor.load_config("{}").unwrap();
        assert_eq!(processor.encoder().instance_id(), "fixed");
    }

    #[test]
    fn test_batch_keeps_per_request_results() {
        let mut broken = healthy_request();
        broken.pet.current_weight_kg = -1.0;
        let results = AnalyticsProcessor::new().process_batch(&[healthy_request(), broken]);

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_medication_adherence_in_breakdown() {
        let request = healthy_request().with_medications(vec![Medication {
            name: "Apoquel".to_string(),
            start_date: date(1, 1),
            end_date: None,
            status: MedicationStatus::Active,
            adherence_percent: 50.0,
        }]);
        let report = analyze(&request).unwrap();

        assert_eq!(report.health_score, 90);
        assert!(report.insights.iter().any(|i| i.id == "medication-adherence"));
    }

    #[test]
    fn test_deterministic() {
        let request = RequestAdapter::parse(sample_request_json()).unwrap();
        let processor = AnalyticsProcessor::new();
        assert_eq!(
            processor.process(&request).unwrap(),
            processor.process(&request).unwrap()
        );
    }
}
