//! Engine configuration
//!
//! Every coefficient and threshold the calculators use lives here as a named
//! constant and a field on a per-component config struct. Callers can swap in
//! alternate policies (or load them from JSON) without touching the
//! calculation code.

use crate::types::{
    ActivityLevel, HealthComponent, NutritionGoal, Species, TrendConfidence,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Statistics

/// Maximum moving-average window used to smooth a series before trend detection
pub const DEFAULT_SMOOTHING_WINDOW: usize = 7;
/// Relative change (percent) below which a trend is `stable`
pub const STABLE_CHANGE_THRESHOLD_PCT: f64 = 2.0;
pub const HIGH_CONFIDENCE_MIN_POINTS: usize = 10;
/// Relative change (percent) above which a long series earns `high` confidence
pub const HIGH_CONFIDENCE_MIN_CHANGE_PCT: f64 = 10.0;
pub const MEDIUM_CONFIDENCE_MIN_POINTS: usize = 5;

// Calories

/// Coefficient of the `coefficient * weight^exponent` resting energy formula
pub const BASE_ENERGY_COEFFICIENT: f64 = 70.0;
pub const DEFAULT_METABOLIC_EXPONENT: f64 = 0.75;
pub const CAT_METABOLIC_EXPONENT: f64 = 0.67;
pub const LOW_ACTIVITY_MULTIPLIER: f64 = 1.2;
pub const MEDIUM_ACTIVITY_MULTIPLIER: f64 = 1.6;
pub const HIGH_ACTIVITY_MULTIPLIER: f64 = 2.0;
pub const LOSE_WEIGHT_MULTIPLIER: f64 = 0.8;
pub const MAINTAIN_WEIGHT_MULTIPLIER: f64 = 1.0;
pub const GAIN_WEIGHT_MULTIPLIER: f64 = 1.2;
pub const DEFAULT_MEALS_PER_DAY: u32 = 2;
pub const CAT_MEALS_PER_DAY: u32 = 3;
/// Daily water target per kg of body weight
pub const WATER_ML_PER_KG: f64 = 50.0;

// Health score

pub const WEIGHT_COMPONENT_WEIGHT: f64 = 0.35;
pub const BODY_CONDITION_COMPONENT_WEIGHT: f64 = 0.25;
pub const ACTIVITY_COMPONENT_WEIGHT: f64 = 0.20;
pub const MEDICATION_COMPONENT_WEIGHT: f64 = 0.20;
/// Weight ratio (current / ideal) at or below which the weight sub-score is 0
pub const WEIGHT_RATIO_FLOOR: f64 = 0.8;
/// Weight ratio at or above which the weight sub-score is 0
pub const WEIGHT_RATIO_CEILING: f64 = 1.3;
pub const IDEAL_BODY_CONDITION_SCORE: u8 = 5;
pub const BODY_CONDITION_PENALTY_PER_POINT: f64 = 25.0;
pub const ADEQUATE_ACTIVITY_SCORE: f64 = 100.0;
pub const UNDER_ACTIVE_SCORE: f64 = 60.0;
/// Medication sub-score when no medication is active
pub const NO_ACTIVE_MEDICATION_SCORE: f64 = 100.0;

// Insights

pub const WEIGHT_DEVIATION_KG: f64 = 1.0;
pub const WEIGHT_DEVIATION_HIGH_PRIORITY_KG: f64 = 3.0;
pub const ADHERENCE_THRESHOLD_PERCENT: f64 = 80.0;
pub const LOW_HEALTH_SCORE_THRESHOLD: u8 = 60;
/// Relative weight change (percent) flagged when no ideal weight is known
pub const WEIGHT_TREND_MIN_CHANGE_PCT: f64 = 5.0;
/// Weight range (max - min) as a percentage of mean weight flagged as a swing
pub const WEIGHT_FLUCTUATION_PCT: f64 = 15.0;
/// Readings needed before a weight range is judged
pub const WEIGHT_FLUCTUATION_MIN_POINTS: usize = 3;

// Goals

pub const GOAL_COMPLETED_PERCENT: f64 = 100.0;
pub const GOAL_ON_TRACK_PERCENT: f64 = 75.0;

/// Trend detection thresholds. Heuristics, not statistical guarantees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    pub smoothing_window: usize,
    pub stable_threshold_pct: f64,
    pub high_confidence_min_points: usize,
    pub high_confidence_min_change_pct: f64,
    pub medium_confidence_min_points: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            stable_threshold_pct: STABLE_CHANGE_THRESHOLD_PCT,
            high_confidence_min_points: HIGH_CONFIDENCE_MIN_POINTS,
            high_confidence_min_change_pct: HIGH_CONFIDENCE_MIN_CHANGE_PCT,
            medium_confidence_min_points: MEDIUM_CONFIDENCE_MIN_POINTS,
        }
    }
}

/// Activity multipliers applied to resting energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for ActivityMultipliers {
    fn default() -> Self {
        Self {
            low: LOW_ACTIVITY_MULTIPLIER,
            medium: MEDIUM_ACTIVITY_MULTIPLIER,
            high: HIGH_ACTIVITY_MULTIPLIER,
        }
    }
}

impl ActivityMultipliers {
    pub fn for_level(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Low => self.low,
            ActivityLevel::Medium => self.medium,
            ActivityLevel::High => self.high,
        }
    }
}

/// Fixed goal coefficients; a simplification of veterinary RER/MER tables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalMultipliers {
    pub lose_weight: f64,
    pub maintain: f64,
    pub gain_weight: f64,
}

impl Default for GoalMultipliers {
    fn default() -> Self {
        Self {
            lose_weight: LOSE_WEIGHT_MULTIPLIER,
            maintain: MAINTAIN_WEIGHT_MULTIPLIER,
            gain_weight: GAIN_WEIGHT_MULTIPLIER,
        }
    }
}

impl GoalMultipliers {
    pub fn for_goal(&self, goal: NutritionGoal) -> f64 {
        match goal {
            NutritionGoal::LoseWeight => self.lose_weight,
            NutritionGoal::Maintain => self.maintain,
            NutritionGoal::GainWeight => self.gain_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalorieConfig {
    pub base_coefficient: f64,
    /// Exponent for species missing from `species_exponents`
    pub default_exponent: f64,
    pub species_exponents: BTreeMap<Species, f64>,
    pub activity_multipliers: ActivityMultipliers,
    pub goal_multipliers: GoalMultipliers,
    pub default_meals_per_day: u32,
    pub species_meals_per_day: BTreeMap<Species, u32>,
    pub water_ml_per_kg: f64,
}

impl Default for CalorieConfig {
    fn default() -> Self {
        let species_exponents = BTreeMap::from([
            (Species::Dog, DEFAULT_METABOLIC_EXPONENT),
            (Species::Cat, CAT_METABOLIC_EXPONENT),
            (Species::Other, DEFAULT_METABOLIC_EXPONENT),
        ]);
        let species_meals_per_day = BTreeMap::from([(Species::Cat, CAT_MEALS_PER_DAY)]);

        Self {
            base_coefficient: BASE_ENERGY_COEFFICIENT,
            default_exponent: DEFAULT_METABOLIC_EXPONENT,
            species_exponents,
            activity_multipliers: ActivityMultipliers::default(),
            goal_multipliers: GoalMultipliers::default(),
            default_meals_per_day: DEFAULT_MEALS_PER_DAY,
            species_meals_per_day,
            water_ml_per_kg: WATER_ML_PER_KG,
        }
    }
}

impl CalorieConfig {
    pub fn exponent_for(&self, species: Species) -> f64 {
        self.species_exponents
            .get(&species)
            .copied()
            .unwrap_or(self.default_exponent)
    }

    pub fn meals_for(&self, species: Species) -> u32 {
        self.species_meals_per_day
            .get(&species)
            .copied()
            .unwrap_or(self.default_meals_per_day)
            .max(1)
    }
}

/// Relative importance of each health sub-score.
///
/// These are policy, not derived from data. Missing sub-scores have their
/// weight redistributed by [`crate::health_score::redistribute_weights`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthScoreWeights {
    pub weight: f64,
    pub body_condition: f64,
    pub activity: f64,
    pub medication: f64,
}

impl Default for HealthScoreWeights {
    fn default() -> Self {
        Self {
            weight: WEIGHT_COMPONENT_WEIGHT,
            body_condition: BODY_CONDITION_COMPONENT_WEIGHT,
            activity: ACTIVITY_COMPONENT_WEIGHT,
            medication: MEDICATION_COMPONENT_WEIGHT,
        }
    }
}

impl HealthScoreWeights {
    pub fn for_component(&self, component: HealthComponent) -> f64 {
        match component {
            HealthComponent::Weight => self.weight,
            HealthComponent::BodyCondition => self.body_condition,
            HealthComponent::Activity => self.activity,
            HealthComponent::Medication => self.medication,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthScoreConfig {
    pub weights: HealthScoreWeights,
    pub weight_ratio_floor: f64,
    pub weight_ratio_ceiling: f64,
    pub ideal_body_condition: u8,
    pub body_condition_penalty_per_point: f64,
    pub adequate_activity_score: f64,
    pub under_active_score: f64,
    /// Minimum activity level each species needs; others use `default_activity_need`
    pub activity_needs: BTreeMap<Species, ActivityLevel>,
    pub default_activity_need: ActivityLevel,
    pub no_active_medication_score: f64,
}

impl Default for HealthScoreConfig {
    fn default() -> Self {
        let activity_needs = BTreeMap::from([
            (Species::Dog, ActivityLevel::Medium),
            (Species::Cat, ActivityLevel::Low),
            (Species::Rabbit, ActivityLevel::Medium),
            (Species::Bird, ActivityLevel::Low),
            (Species::Other, ActivityLevel::Low),
        ]);

        Self {
            weights: HealthScoreWeights::default(),
            weight_ratio_floor: WEIGHT_RATIO_FLOOR,
            weight_ratio_ceiling: WEIGHT_RATIO_CEILING,
            ideal_body_condition: IDEAL_BODY_CONDITION_SCORE,
            body_condition_penalty_per_point: BODY_CONDITION_PENALTY_PER_POINT,
            adequate_activity_score: ADEQUATE_ACTIVITY_SCORE,
            under_active_score: UNDER_ACTIVE_SCORE,
            activity_needs,
            default_activity_need: ActivityLevel::Low,
            no_active_medication_score: NO_ACTIVE_MEDICATION_SCORE,
        }
    }
}

impl HealthScoreConfig {
    pub fn activity_need(&self, species: Species) -> ActivityLevel {
        self.activity_needs
            .get(&species)
            .copied()
            .unwrap_or(self.default_activity_need)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub weight_deviation_kg: f64,
    pub weight_deviation_high_priority_kg: f64,
    pub adherence_threshold_percent: f64,
    /// Emit the standing vaccination/checkup reminder
    pub checkup_reminder: bool,
    pub low_health_score_threshold: u8,
    pub weight_trend_min_change_pct: f64,
    pub weight_trend_min_confidence: TrendConfidence,
    pub weight_fluctuation_pct: f64,
    pub weight_fluctuation_min_points: usize,
    /// Emit goal-attention / goal-achieved insights
    pub goal_insights: bool,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            weight_deviation_kg: WEIGHT_DEVIATION_KG,
            weight_deviation_high_priority_kg: WEIGHT_DEVIATION_HIGH_PRIORITY_KG,
            adherence_threshold_percent: ADHERENCE_THRESHOLD_PERCENT,
            checkup_reminder: true,
            low_health_score_threshold: LOW_HEALTH_SCORE_THRESHOLD,
            weight_trend_min_change_pct: WEIGHT_TREND_MIN_CHANGE_PCT,
            weight_trend_min_confidence: TrendConfidence::Medium,
            weight_fluctuation_pct: WEIGHT_FLUCTUATION_PCT,
            weight_fluctuation_min_points: WEIGHT_FLUCTUATION_MIN_POINTS,
            goal_insights: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub completed_percent: f64,
    pub on_track_percent: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            completed_percent: GOAL_COMPLETED_PERCENT,
            on_track_percent: GOAL_ON_TRACK_PERCENT,
        }
    }
}

/// Engine-wide configuration, one section per calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub statistics: StatisticsConfig,
    pub calories: CalorieConfig,
    pub health_score: HealthScoreConfig,
    pub insights: InsightConfig,
    pub goals: GoalConfig,
}

impl EngineConfig {
    /// Load configuration from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = HealthScoreWeights::default();
        let sum = w.weight + w.body_condition + w.activity + w.medication;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_exponent_lookup_falls_back() {
        let config = CalorieConfig::default();
        assert_eq!(config.exponent_for(Species::Cat), 0.67);
        assert_eq!(config.exponent_for(Species::Dog), 0.75);
        assert_eq!(config.exponent_for(Species::Rabbit), 0.75);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"insights": {"checkup_reminder": false}, "goals": {"on_track_percent": 50.0}}"#;
        let config = EngineConfig::from_json(json).unwrap();

        assert!(!config.insights.checkup_reminder);
        assert_eq!(config.insights.adherence_threshold_percent, 80.0);
        assert_eq!(config.goals.on_track_percent, 50.0);
        assert_eq!(config.goals.completed_percent, 100.0);
        assert_eq!(config.calories, CalorieConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        let loaded = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_meals_never_zero() {
        let mut config = CalorieConfig::default();
        config.default_meals_per_day = 0;
        assert_eq!(config.meals_for(Species::Dog), 1);
        assert_eq!(config.meals_for(Species::Cat), 3);
    }
}
