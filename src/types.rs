//! Core types for petcare analytics
//!
//! This module defines the data structures that flow through the engine:
//! the caller-owned pet snapshot and observations, and the derived results
//! (statistics, trends, scores, insights, goal progress).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Animal species; keys the allometric exponent and activity need tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
    Bird,
    Other,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Rabbit => "rabbit",
            Species::Bird => "bird",
            Species::Other => "other",
        }
    }
}

/// Activity level, ordered from least to most active
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    #[serde(alias = "moderate")]
    Medium,
    High,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Medium => "medium",
            ActivityLevel::High => "high",
        }
    }
}

/// Pet snapshot supplied by the caller. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Caller-side identifier
    pub id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub species: Species,
    /// Latest known body weight (kg)
    pub current_weight_kg: f64,
    /// Target body weight (kg), if the owner or vet has set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_weight_kg: Option<f64>,
    /// Body condition score on the 1-9 scale (5 = ideal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_condition_score: Option<u8>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<f64>,
}

impl Pet {
    /// Create a pet with the required fields; optional fields start unset
    pub fn new(
        id: impl Into<String>,
        species: Species,
        current_weight_kg: f64,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            species,
            current_weight_kg,
            ideal_weight_kg: None,
            body_condition_score: None,
            activity_level,
            age_years: None,
        }
    }

    pub fn with_ideal_weight(mut self, ideal_weight_kg: f64) -> Self {
        self.ideal_weight_kg = Some(ideal_weight_kg);
        self
    }

    pub fn with_body_condition(mut self, score: u8) -> Self {
        self.body_condition_score = Some(score);
        self
    }

    /// Signed difference between current and ideal weight (kg)
    pub fn weight_difference_kg(&self) -> Option<f64> {
        self.ideal_weight_kg
            .map(|ideal| self.current_weight_kg - ideal)
    }
}

/// Kind of scalar health reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Weight,
    Temperature,
    HeartRate,
    RespiratoryRate,
    ActivityMinutes,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Weight => "weight",
            MetricKind::Temperature => "temperature",
            MetricKind::HeartRate => "heart_rate",
            MetricKind::RespiratoryRate => "respiratory_rate",
            MetricKind::ActivityMinutes => "activity_minutes",
        }
    }
}

/// A timestamped scalar reading for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    pub metric: MetricKind,
}

/// A single dated value inside a [`Dataset`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Chronologically ordered readings for one metric, unique by date.
///
/// Inserting a point for a date that is already present replaces its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDataset")]
pub struct Dataset {
    metric: MetricKind,
    points: Vec<DataPoint>,
}

#[derive(Deserialize)]
struct RawDataset {
    metric: MetricKind,
    #[serde(default)]
    points: Vec<DataPoint>,
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        Dataset::from_points(raw.metric, raw.points)
    }
}

impl Dataset {
    /// Create an empty dataset for a metric
    pub fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            points: Vec::new(),
        }
    }

    /// Build a dataset from `(date, value)` pairs in any order
    pub fn from_points(metric: MetricKind, points: impl IntoIterator<Item = DataPoint>) -> Self {
        let mut dataset = Self::new(metric);
        for point in points {
            dataset.insert(point.date, point.value);
        }
        dataset
    }

    /// Build a dataset from observations, keeping only those of `metric`
    pub fn from_observations<'a>(
        metric: MetricKind,
        observations: impl IntoIterator<Item = &'a Observation>,
    ) -> Self {
        Self::from_points(
            metric,
            observations
                .into_iter()
                .filter(|o| o.metric == metric)
                .map(|o| DataPoint {
                    date: o.date,
                    value: o.value,
                }),
        )
    }

    /// Insert a reading, replacing any existing reading on the same date
    pub fn insert(&mut self, date: NaiveDate, value: f64) {
        match self.points.binary_search_by(|p| p.date.cmp(&date)) {
            Ok(idx) => self.points[idx].value = value,
            Err(idx) => self.points.insert(idx, DataPoint { date, value }),
        }
    }

    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DataPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DataPoint> {
        self.points.last()
    }
}

/// Medication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationStatus {
    Active,
    Inactive,
}

fn default_adherence() -> f64 {
    100.0
}

/// Medication log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub status: MedicationStatus,
    /// Share of scheduled doses actually given (0-100)
    #[serde(default = "default_adherence")]
    pub adherence_percent: f64,
}

impl Medication {
    pub fn is_active(&self) -> bool {
        self.status == MedicationStatus::Active
    }
}

/// Everything observed about one pet: per-metric series plus medication log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthDataset {
    #[serde(default)]
    pub datasets: BTreeMap<MetricKind, Dataset>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

impl HealthDataset {
    /// Group a mixed list of observations by metric
    pub fn from_observations(observations: &[Observation], medications: Vec<Medication>) -> Self {
        let mut datasets: BTreeMap<MetricKind, Dataset> = BTreeMap::new();
        for obs in observations {
            datasets
                .entry(obs.metric)
                .or_insert_with(|| Dataset::new(obs.metric))
                .insert(obs.date, obs.value);
        }
        Self {
            datasets,
            medications,
        }
    }

    pub fn get(&self, metric: MetricKind) -> Option<&Dataset> {
        self.datasets.get(&metric)
    }

    pub fn weight(&self) -> Option<&Dataset> {
        self.get(MetricKind::Weight)
    }

    pub fn active_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter().filter(|m| m.is_active())
    }
}

/// Kind of user-defined goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    WeightGain,
    Activity,
    Medication,
}

/// User-defined health goal. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
}

/// Goal status classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Completed,
    OnTrack,
    NeedsAttention,
}

/// Derived goal progress. `percentage` has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub percentage: f64,
    pub status: GoalStatus,
}

/// Goal progress with schedule context relative to a reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgressReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    pub goal_type: GoalType,
    pub percentage: f64,
    pub status: GoalStatus,
    /// Days until the target date (negative once past it); needs a reference date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    /// Past the target date without being completed
    pub overdue: bool,
}

/// Insight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Success,
    Warning,
    Error,
    Info,
}

/// Insight priority; orders `High` before `Medium` before `Low`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Actionable recommendation. Produced fresh per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Stable rule identifier, usable for caller-side dismissal
    pub id: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub suggested_action: String,
}

/// Descriptive statistics over a numeric series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Heuristic confidence label (sample size and signal magnitude)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendConfidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub confidence: TrendConfidence,
    /// Trailing window mean minus leading window mean, in the metric's unit
    pub change_absolute: f64,
    /// `change_absolute` as a percentage of the absolute mean of the raw series
    pub change_relative: f64,
}

/// Nutrition goal used for the calorie adjustment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionGoal {
    LoseWeight,
    #[default]
    Maintain,
    GainWeight,
}

/// Daily feeding plan built on the calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionPlan {
    pub daily_calories: u32,
    /// Unadjusted `70 * weight^exponent` energy (kcal)
    pub resting_energy_kcal: f64,
    pub activity_multiplier: f64,
    pub goal_multiplier: f64,
    pub meals_per_day: u32,
    pub calories_per_meal: u32,
    pub water_ml: u32,
}

/// Health score sub-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthComponent {
    Weight,
    BodyCondition,
    Activity,
    Medication,
}

/// Soft warning: an optional field was absent and scoring degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreWarning {
    MissingIdealWeight,
    MissingBodyConditionScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub component: HealthComponent,
    /// Sub-score, 0-100
    pub score: f64,
    /// Configured weight before redistribution
    pub base_weight: f64,
    /// Weight actually applied
    pub effective_weight: f64,
}

/// Full explanation of a health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreBreakdown {
    pub score: u8,
    /// Present components only
    pub components: Vec<ComponentScore>,
    pub warnings: Vec<ScoreWarning>,
}

impl HealthScoreBreakdown {
    /// Sum of the effective weights; 1.0 up to float tolerance
    pub fn weight_sum(&self) -> f64 {
        self.components.iter().map(|c| c.effective_weight).sum()
    }

    pub fn component(&self, component: HealthComponent) -> Option<&ComponentScore> {
        self.components.iter().find(|c| c.component == component)
    }
}

/// Full analysis of one pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub pet_id: String,
    pub species: Species,
    pub nutrition_plan: DailyNutritionPlan,
    pub health_score: u8,
    pub health_breakdown: HealthScoreBreakdown,
    /// Descriptive statistics per recorded metric
    pub statistics: BTreeMap<MetricKind, StatisticsResult>,
    /// Trends for metrics with at least two readings
    pub trends: BTreeMap<MetricKind, TrendResult>,
    pub goal_progress: Vec<GoalProgressReport>,
    pub insights: Vec<Insight>,
}

/// Producer metadata attached to encoded reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Versioned, self-describing report envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub report: HealthReport,
}
