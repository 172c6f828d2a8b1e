//! Rule-based insights
//!
//! The engine runs an ordered pipeline of [`InsightRule`]s against the pet,
//! its observations and metrics that were already computed by the other
//! calculators. Each rule emits at most one [`Insight`]. The result is sorted
//! by priority (high first); rules of equal priority keep pipeline order.
//!
//! A rule whose condition is already satisfied emits nothing, so an empty
//! result means no concerns were detected.

use crate::config::InsightConfig;
use crate::types::{
    ActivityLevel, GoalProgress, GoalStatus, HealthDataset, Insight, InsightType, Pet, Priority,
    StatisticsResult, TrendDirection, TrendResult,
};
use serde::{Deserialize, Serialize};

pub const WEIGHT_MANAGEMENT_ID: &str = "weight-management";
pub const INCREASE_ACTIVITY_ID: &str = "increase-activity";
pub const VACCINATION_REMINDER_ID: &str = "vaccination-reminder";
pub const MEDICATION_ADHERENCE_ID: &str = "medication-adherence";
pub const WEIGHT_TREND_ID: &str = "weight-trend";
pub const WEIGHT_FLUCTUATION_ID: &str = "weight-fluctuation";
pub const HEALTH_SCORE_LOW_ID: &str = "health-score-low";
pub const GOAL_ATTENTION_ID: &str = "goal-attention";
pub const GOAL_ACHIEVED_ID: &str = "goal-achieved";

/// Outputs of the other calculators, computed once per analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub health_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_trend: Option<TrendResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_statistics: Option<StatisticsResult>,
    #[serde(default)]
    pub goal_progress: Vec<GoalProgress>,
}

impl DerivedMetrics {
    pub fn new(health_score: u8) -> Self {
        Self {
            health_score,
            weight_trend: None,
            weight_statistics: None,
            goal_progress: Vec::new(),
        }
    }

    pub fn with_weight_trend(mut self, trend: TrendResult) -> Self {
        self.weight_trend = Some(trend);
        self
    }

    pub fn with_weight_statistics(mut self, statistics: StatisticsResult) -> Self {
        self.weight_statistics = Some(statistics);
        self
    }

    pub fn with_goal_progress(mut self, progress: Vec<GoalProgress>) -> Self {
        self.goal_progress = progress;
        self
    }
}

/// Everything a rule may inspect
pub struct InsightContext<'a> {
    pub pet: &'a Pet,
    pub dataset: &'a HealthDataset,
    pub derived: &'a DerivedMetrics,
    pub config: &'a InsightConfig,
}

impl InsightContext<'_> {
    fn pet_name(&self) -> &str {
        self.pet.name.as_deref().unwrap_or("Your pet")
    }
}

/// A single insight rule
pub trait InsightRule: Send + Sync {
    /// Stable identifier of the insight this rule emits
    fn id(&self) -> &'static str;

    /// Evaluate the rule, emitting at most one insight
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight>;
}

fn insight(
    id: &str,
    insight_type: InsightType,
    priority: Priority,
    title: &str,
    message: String,
    suggested_action: &str,
) -> Insight {
    Insight {
        id: id.to_string(),
        insight_type,
        title: title.to_string(),
        message,
        priority,
        suggested_action: suggested_action.to_string(),
    }
}

/// Current weight more than the configured margin away from the ideal weight
pub struct WeightDeviationRule;

impl InsightRule for WeightDeviationRule {
    fn id(&self) -> &'static str {
        WEIGHT_MANAGEMENT_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let ideal = ctx.pet.ideal_weight_kg?;
        let diff = ctx.pet.weight_difference_kg()?;
        if diff.abs() <= ctx.config.weight_deviation_kg {
            return None;
        }

        let priority = if diff.abs() > ctx.config.weight_deviation_high_priority_kg {
            Priority::High
        } else {
            Priority::Medium
        };
        let (relation, action) = if diff > 0.0 {
            (
                "above",
                "Reduce daily portions, add gentle exercise and ask your vet about a weight-loss plan.",
            )
        } else {
            (
                "below",
                "Increase portions with nutrient-dense food and check with your vet for underlying causes.",
            )
        };

        Some(insight(
            self.id(),
            InsightType::Warning,
            priority,
            "Weight management needed",
            format!(
                "{} is {:.1} kg {} the ideal weight of {:.1} kg.",
                ctx.pet_name(),
                diff.abs(),
                relation,
                ideal
            ),
            action,
        ))
    }
}

pub struct LowActivityRule;

impl InsightRule for LowActivityRule {
    fn id(&self) -> &'static str {
        INCREASE_ACTIVITY_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        if ctx.pet.activity_level != ActivityLevel::Low {
            return None;
        }

        Some(insight(
            self.id(),
            InsightType::Info,
            Priority::Medium,
            "Increase daily activity",
            format!("{} has a low activity level.", ctx.pet_name()),
            "Add short walks or play sessions and build up duration over a few weeks.",
        ))
    }
}

/// Standing vaccination and checkup reminder.
///
/// Time since the last vet visit is not tracked here, so the reminder is
/// emitted on every run unless disabled in [`InsightConfig`].
pub struct CheckupReminderRule;

impl InsightRule for CheckupReminderRule {
    fn id(&self) -> &'static str {
        VACCINATION_REMINDER_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        if !ctx.config.checkup_reminder {
            return None;
        }

        Some(insight(
            self.id(),
            InsightType::Info,
            Priority::High,
            "Vaccination and checkup reminder",
            format!(
                "Keep {}'s vaccinations and annual checkup up to date.",
                ctx.pet.name.as_deref().unwrap_or("your pet")
            ),
            "Schedule a checkup with your vet if the last visit was over a year ago.",
        ))
    }
}

/// Any active medication under the adherence threshold
pub struct MedicationAdherenceRule;

impl InsightRule for MedicationAdherenceRule {
    fn id(&self) -> &'static str {
        MEDICATION_ADHERENCE_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let missed: Vec<&str> = ctx
            .dataset
            .active_medications()
            .filter(|m| m.adherence_percent < ctx.config.adherence_threshold_percent)
            .map(|m| m.name.as_str())
            .collect();

        if missed.is_empty() {
            return None;
        }

        Some(insight(
            self.id(),
            InsightType::Warning,
            Priority::High,
            "Medication doses are being missed",
            format!(
                "Adherence is below {:.0}% for: {}.",
                ctx.config.adherence_threshold_percent,
                missed.join(", ")
            ),
            "Set dose reminders and talk to your vet if doses are hard to give.",
        ))
    }
}

/// Weight outside the ideal band and trending further away, or changing fast
/// without a known ideal weight
pub struct WeightTrendRule;

impl InsightRule for WeightTrendRule {
    fn id(&self) -> &'static str {
        WEIGHT_TREND_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let trend = ctx.derived.weight_trend?;
        if trend.direction == TrendDirection::Stable
            || trend.confidence < ctx.config.weight_trend_min_confidence
        {
            return None;
        }

        let concerning = match ctx.pet.weight_difference_kg() {
            Some(diff) if diff.abs() <= ctx.config.weight_deviation_kg => false,
            Some(diff) => match trend.direction {
                TrendDirection::Increasing => diff > 0.0,
                TrendDirection::Decreasing => diff < 0.0,
                TrendDirection::Stable => false,
            },
            None => trend.change_relative.abs() >= ctx.config.weight_trend_min_change_pct,
        };
        if !concerning {
            return None;
        }

        let (title, verb) = match trend.direction {
            TrendDirection::Increasing => ("Weight trending up", "gained"),
            _ => ("Weight trending down", "lost"),
        };

        Some(insight(
            self.id(),
            InsightType::Warning,
            Priority::Medium,
            title,
            format!(
                "{} has {} {:.1} kg ({:.1}%) over the recorded period.",
                ctx.pet_name(),
                verb,
                trend.change_absolute.abs(),
                trend.change_relative.abs()
            ),
            "Review portions and treats, and keep logging weight weekly.",
        ))
    }
}

/// Recorded weights spread over a wide range relative to their mean
pub struct WeightFluctuationRule;

impl InsightRule for WeightFluctuationRule {
    fn id(&self) -> &'static str {
        WEIGHT_FLUCTUATION_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let stats = ctx.derived.weight_statistics?;
        if stats.count < ctx.config.weight_fluctuation_min_points || stats.mean <= 0.0 {
            return None;
        }

        let range_pct = (stats.max - stats.min) / stats.mean * 100.0;
        if range_pct <= ctx.config.weight_fluctuation_pct {
            return None;
        }

        Some(insight(
            self.id(),
            InsightType::Warning,
            Priority::Medium,
            "Weight is fluctuating",
            format!(
                "{}'s recorded weight ranged from {:.1} kg to {:.1} kg ({:.0}% of the average).",
                ctx.pet_name(),
                stats.min,
                stats.max,
                range_pct
            ),
            "Weigh at the same time of day on the same scale, and see your vet if swings continue.",
        ))
    }
}

pub struct LowHealthScoreRule;

impl InsightRule for LowHealthScoreRule {
    fn id(&self) -> &'static str {
        HEALTH_SCORE_LOW_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        if ctx.derived.health_score >= ctx.config.low_health_score_threshold {
            return None;
        }

        Some(insight(
            self.id(),
            InsightType::Error,
            Priority::High,
            "Health score needs attention",
            format!(
                "{}'s health score is {} out of 100.",
                ctx.pet_name(),
                ctx.derived.health_score
            ),
            "Review the other recommendations and book a vet consultation.",
        ))
    }
}

/// Goals needing attention, otherwise goals achieved
pub struct GoalProgressRule;

impl InsightRule for GoalProgressRule {
    fn id(&self) -> &'static str {
        GOAL_ATTENTION_ID
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        if !ctx.config.goal_insights {
            return None;
        }

        let count = |status: GoalStatus| {
            ctx.derived
                .goal_progress
                .iter()
                .filter(|p| p.status == status)
                .count()
        };
        let behind = count(GoalStatus::NeedsAttention);
        let completed = count(GoalStatus::Completed);

        if behind > 0 {
            Some(insight(
                GOAL_ATTENTION_ID,
                InsightType::Info,
                Priority::Low,
                "Goals falling behind",
                format!("{behind} goal(s) are below 75% progress."),
                "Revisit the goal targets or adjust the daily routine to catch up.",
            ))
        } else if completed > 0 {
            Some(insight(
                GOAL_ACHIEVED_ID,
                InsightType::Success,
                Priority::Low,
                "Goals achieved",
                format!("{completed} goal(s) completed."),
                "Set a new goal to keep the momentum going.",
            ))
        } else {
            None
        }
    }
}

/// The default rule pipeline, in evaluation order
pub fn default_rules() -> Vec<Box<dyn InsightRule>> {
    vec![
        Box::new(WeightDeviationRule),
        Box::new(LowActivityRule),
        Box::new(CheckupReminderRule),
        Box::new(MedicationAdherenceRule),
        Box::new(WeightTrendRule),
        Box::new(WeightFluctuationRule),
        Box::new(LowHealthScoreRule),
        Box::new(GoalProgressRule),
    ]
}

/// Insight engine: a configured, ordered rule pipeline
pub struct InsightEngine {
    config: InsightConfig,
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    pub fn with_config(config: InsightConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
        }
    }

    /// Engine with a caller-supplied rule pipeline
    pub fn with_rules(config: InsightConfig, rules: Vec<Box<dyn InsightRule>>) -> Self {
        Self { config, rules }
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Evaluate every rule and return the insights, high priority first
    pub fn generate_insights(
        &self,
        pet: &Pet,
        dataset: &HealthDataset,
        derived: &DerivedMetrics,
    ) -> Vec<Insight> {
        let ctx = InsightContext {
            pet,
            dataset,
            derived,
            config: &self.config,
        };

        let mut insights: Vec<Insight> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(&ctx))
            .collect();
        insights.sort_by_key(|i| i.priority);
        insights
    }
}

/// [`InsightEngine::generate_insights`] with the default rules and configuration
pub fn generate_insights(
    pet: &Pet,
    dataset: &HealthDataset,
    derived: &DerivedMetrics,
) -> Vec<Insight> {
    InsightEngine::default().generate_insights(pet, dataset, derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Medication, MedicationStatus, Species, TrendConfidence};
    use chrono::NaiveDate;

    fn healthy_pet() -> Pet {
        let mut pet = Pet::new("dog-1", Species::Dog, 20.0, ActivityLevel::High)
            .with_ideal_weight(20.0)
            .with_body_condition(5);
        pet.name = Some("Max".to_string());
        pet
    }

    fn ids(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.id.as_str()).collect()
    }

    fn medication(name: &str, adherence: f64, status: MedicationStatus) -> Medication {
        Medication {
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            status,
            adherence_percent: adherence,
        }
    }

    fn trend(direction: TrendDirection, change: f64, confidence: TrendConfidence) -> TrendResult {
        TrendResult {
            direction,
            confidence,
            change_absolute: change,
            change_relative: change / 20.0 * 100.0,
        }
    }

    #[test]
    fn test_healthy_pet_only_gets_standing_reminder() {
        let insights = generate_insights(
            &healthy_pet(),
            &HealthDataset::default(),
            &DerivedMetrics::new(95),
        );
        assert_eq!(ids(&insights), vec![VACCINATION_REMINDER_ID]);
    }

    #[test]
    fn test_reminder_can_be_disabled() {
        let engine = InsightEngine::with_config(InsightConfig {
            checkup_reminder: false,
            ..Default::default()
        });
        let insights = engine.generate_insights(
            &healthy_pet(),
            &HealthDataset::default(),
            &DerivedMetrics::new(95),
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn test_weight_deviation_thresholds() {
        let dataset = HealthDataset::default();
        let derived = DerivedMetrics::new(90);

        let mut pet = healthy_pet();
        pet.current_weight_kg = 21.0;
        let insights = generate_insights(&pet, &dataset, &derived);
        assert!(!ids(&insights).contains(&WEIGHT_MANAGEMENT_ID));

        pet.current_weight_kg = 22.0;
        let insights = generate_insights(&pet, &dataset, &derived);
        let weight = insights.iter().find(|i| i.id == WEIGHT_MANAGEMENT_ID).unwrap();
        assert_eq!(weight.priority, Priority::Medium);
        assert_eq!(weight.message, "Max is 2.0 kg above the ideal weight of 20.0 kg.");

        pet.current_weight_kg = 16.5;
        let insights = generate_insights(&pet, &dataset, &derived);
        let weight = insights.iter().find(|i| i.id == WEIGHT_MANAGEMENT_ID).unwrap();
        assert_eq!(weight.priority, Priority::High);
        assert!(weight.message.contains("below"));
    }

    #[test]
    fn test_no_weight_rule_without_ideal() {
        let pet = Pet::new("cat-1", Species::Cat, 9.0, ActivityLevel::Medium);
        let insights = generate_insights(&pet, &HealthDataset::default(), &DerivedMetrics::new(90));
        assert_eq!(ids(&insights), vec![VACCINATION_REMINDER_ID]);
    }

    #[test]
    fn test_low_activity() {
        let mut pet = healthy_pet();
        pet.activity_level = ActivityLevel::Low;
        let insights = generate_insights(&pet, &HealthDataset::default(), &DerivedMetrics::new(90));
        let activity = insights.iter().find(|i| i.id == INCREASE_ACTIVITY_ID).unwrap();
        assert_eq!(activity.priority, Priority::Medium);
    }

    #[test]
    fn test_medication_adherence() {
        let dataset = HealthDataset {
            medications: vec![
                medication("Carprofen", 65.0, MedicationStatus::Active),
                medication("Old antibiotic", 10.0, MedicationStatus::Inactive),
                medication("Heartworm", 95.0, MedicationStatus::Active),
            ],
            ..Default::default()
        };
        let insights = generate_insights(&healthy_pet(), &dataset, &DerivedMetrics::new(90));
        let meds = insights.iter().find(|i| i.id == MEDICATION_ADHERENCE_ID).unwrap();
        assert_eq!(meds.priority, Priority::High);
        assert_eq!(meds.message, "Adherence is below 80% for: Carprofen.");
    }

    #[test]
    fn test_inactive_medication_ignored() {
        let dataset = HealthDataset {
            medications: vec![medication("Old antibiotic", 10.0, MedicationStatus::Inactive)],
            ..Default::default()
        };
        let insights = generate_insights(&healthy_pet(), &dataset, &DerivedMetrics::new(90));
        assert!(!ids(&insights).contains(&MEDICATION_ADHERENCE_ID));
    }

    #[test]
    fn test_priority_order_is_stable() {
        let mut pet = healthy_pet();
        pet.activity_level = ActivityLevel::Low;
        pet.current_weight_kg = 25.0;
        let dataset = HealthDataset {
            medications: vec![medication("Carprofen", 50.0, MedicationStatus::Active)],
            ..Default::default()
        };
        let insights = generate_insights(&pet, &dataset, &DerivedMetrics::new(40));

        assert_eq!(
            ids(&insights),
            vec![
                WEIGHT_MANAGEMENT_ID,
                VACCINATION_REMINDER_ID,
                MEDICATION_ADHERENCE_ID,
                HEALTH_SCORE_LOW_ID,
                INCREASE_ACTIVITY_ID,
            ]
        );
        assert!(insights.windows(2).all(|w| w[0].priority <= w[1].priority));
    }

    #[test]
    fn test_weight_trend_away_from_ideal() {
        let mut pet = healthy_pet();
        pet.current_weight_kg = 21.5;
        let derived = DerivedMetrics::new(90).with_weight_trend(trend(
            TrendDirection::Increasing,
            1.5,
            TrendConfidence::Medium,
        ));
        let insights = generate_insights(&pet, &HealthDataset::default(), &derived);
        let t = insights.iter().find(|i| i.id == WEIGHT_TREND_ID).unwrap();
        assert_eq!(t.title, "Weight trending up");

        // Losing weight while above ideal is the desired direction
        let derived = DerivedMetrics::new(90).with_weight_trend(trend(
            TrendDirection::Decreasing,
            -1.5,
            TrendConfidence::High,
        ));
        let insights = generate_insights(&pet, &HealthDataset::default(), &derived);
        assert!(!ids(&insights).contains(&WEIGHT_TREND_ID));
    }

    #[test]
    fn test_weight_trend_ignored_inside_ideal_band() {
        let rising = DerivedMetrics::new(100).with_weight_trend(trend(
            TrendDirection::Increasing,
            2.0,
            TrendConfidence::Medium,
        ));
        let insights = generate_insights(&healthy_pet(), &HealthDataset::default(), &rising);
        assert_eq!(ids(&insights), vec![VACCINATION_REMINDER_ID]);

        let mut pet = healthy_pet();
        pet.current_weight_kg = 20.8;
        let insights = generate_insights(&pet, &HealthDataset::default(), &rising);
        assert!(!ids(&insights).contains(&WEIGHT_TREND_ID));
    }

    #[test]
    fn test_weight_fluctuation() {
        let stats = |min: f64, max: f64, count: usize| StatisticsResult {
            mean: (min + max) / 2.0,
            min,
            max,
            std_dev: (max - min) / 2.0,
            count,
        };

        let steady = DerivedMetrics::new(100).with_weight_statistics(stats(19.0, 21.0, 6));
        let insights = generate_insights(&healthy_pet(), &HealthDataset::default(), &steady);
        assert!(!ids(&insights).contains(&WEIGHT_FLUCTUATION_ID));

        let swinging = DerivedMetrics::new(100).with_weight_statistics(stats(17.0, 23.0, 6));
        let insights = generate_insights(&healthy_pet(), &HealthDataset::default(), &swinging);
        let swing = insights.iter().find(|i| i.id == WEIGHT_FLUCTUATION_ID).unwrap();
        assert_eq!(swing.priority, Priority::Medium);
        assert_eq!(
            swing.message,
            "Max's recorded weight ranged from 17.0 kg to 23.0 kg (30% of the average)."
        );

        let too_few = DerivedMetrics::new(100).with_weight_statistics(stats(17.0, 23.0, 2));
        let insights = generate_insights(&healthy_pet(), &HealthDataset::default(), &too_few);
        assert!(!ids(&insights).contains(&WEIGHT_FLUCTUATION_ID));
    }

    #[test]
    fn test_weight_trend_needs_confidence() {
        let pet = Pet::new("dog-2", Species::Dog, 20.0, ActivityLevel::Medium);
        let low = DerivedMetrics::new(90).with_weight_trend(trend(
            TrendDirection::Decreasing,
            -3.0,
            TrendConfidence::Low,
        ));
        let insights = generate_insights(&pet, &HealthDataset::default(), &low);
        assert!(!ids(&insights).contains(&WEIGHT_TREND_ID));

        let medium = DerivedMetrics::new(90).with_weight_trend(trend(
            TrendDirection::Decreasing,
            -3.0,
            TrendConfidence::Medium,
        ));
        let insights = generate_insights(&pet, &HealthDataset::default(), &medium);
        let t = insights.iter().find(|i| i.id == WEIGHT_TREND_ID).unwrap();
        assert_eq!(t.title, "Weight trending down");
    }

    #[test]
    fn test_goal_insights() {
        let behind = DerivedMetrics::new(90).with_goal_progress(vec![
            GoalProgress {
                percentage: 40.0,
                status: GoalStatus::NeedsAttention,
            },
            GoalProgress {
                percentage: 100.0,
                status: GoalStatus::Completed,
            },
        ]);
        let insights = generate_insights(&healthy_pet(), &HealthDataset::default(), &behind);
        assert_eq!(insights.last().unwrap().id, GOAL_ATTENTION_ID);

        let done = DerivedMetrics::new(90).with_goal_progress(vec![GoalProgress {
            percentage: 120.0,
            status: GoalStatus::Completed,
        }]);
        let insights = generate_insights(&healthy_pet(), &HealthDataset::default(), &done);
        let achieved = insights.last().unwrap();
        assert_eq!(achieved.id, GOAL_ACHIEVED_ID);
        assert_eq!(achieved.insight_type, InsightType::Success);
    }

    struct SeniorRule;

    impl InsightRule for SeniorRule {
        fn id(&self) -> &'static str {
            "senior-screening"
        }

        fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
            let age = ctx.pet.age_years?;
            (age >= 8.0).then(|| {
                insight(
                    self.id(),
                    InsightType::Info,
                    Priority::Low,
                    "Senior screening",
                    "Consider bloodwork twice a year.".to_string(),
                    "Ask your vet about senior screening.",
                )
            })
        }
    }

    #[test]
    fn test_custom_rule_pipeline() {
        let engine = InsightEngine::with_rules(InsightConfig::default(), vec![Box::new(SeniorRule)]);
        assert_eq!(engine.rule_ids(), vec!["senior-screening"]);

        let mut pet = healthy_pet();
        pet.age_years = Some(10.0);
        let insights =
            engine.generate_insights(&pet, &HealthDataset::default(), &DerivedMetrics::new(90));
        assert_eq!(ids(&insights), vec!["senior-screening"]);
    }

    #[test]
    fn test_deterministic() {
        let mut pet = healthy_pet();
        pet.activity_level = ActivityLevel::Low;
        let derived = DerivedMetrics::new(55);
        let a = generate_insights(&pet, &HealthDataset::default(), &derived);
        let b = generate_insights(&pet, &HealthDataset::default(), &derived);
        assert_eq!(a, b);
    }
}
